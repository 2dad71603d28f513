//! Compiled `enum`/`bit` member sets and their restriction algebra
//! (spec.md §4.4 "For enums and bits").

use yang2_base::{ErrorKind, Result, YangError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Default)]
pub struct EnumSet {
    members: Vec<EnumMember>,
}

impl EnumSet {
    /// Builds an enum set, rejecting a duplicate member name (spec.md §8
    /// "no two enum members share a name").
    pub fn new(members: Vec<EnumMember>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for member in &members {
            if !seen.insert(member.name.as_str()) {
                return Err(YangError::new(ErrorKind::Validation, format!("enum '{}' is declared more than once", member.name)));
            }
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    pub fn find(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Validates that every member of `self` also appears in `parent` with
    /// the identical assigned value (a derived enumeration may drop
    /// members, never add or re-number them).
    pub fn is_subset_of(&self, parent: &EnumSet) -> Result<()> {
        for member in &self.members {
            match parent.find(&member.name) {
                None => return Err(YangError::new(ErrorKind::Validation, format!("enum '{}' is not a member of the base type", member.name))),
                Some(base) if base.value != member.value => {
                    return Err(YangError::new(ErrorKind::Validation, format!("enum '{}' may not be re-assigned a different value in a derived type", member.name)))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMember {
    pub name: String,
    pub position: u32,
}

#[derive(Debug, Clone, Default)]
pub struct BitSet {
    members: Vec<BitMember>,
}

impl BitSet {
    /// Builds a bit set, rejecting a duplicate member name or position
    /// (spec.md §8 "no two bit members share a name or position").
    pub fn new(members: Vec<BitMember>) -> Result<Self> {
        let mut seen_names = std::collections::HashSet::new();
        let mut seen_positions = std::collections::HashSet::new();
        for member in &members {
            if !seen_names.insert(member.name.as_str()) {
                return Err(YangError::new(ErrorKind::Validation, format!("bit '{}' is declared more than once", member.name)));
            }
            if !seen_positions.insert(member.position) {
                return Err(YangError::new(ErrorKind::Validation, format!("bit '{}' reuses position {} already assigned to another bit", member.name, member.position)));
            }
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[BitMember] {
        &self.members
    }

    pub fn find(&self, name: &str) -> Option<&BitMember> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn is_subset_of(&self, parent: &BitSet) -> Result<()> {
        for member in &self.members {
            match parent.find(&member.name) {
                None => return Err(YangError::new(ErrorKind::Validation, format!("bit '{}' is not a member of the base type", member.name))),
                Some(base) if base.position != member.position => {
                    return Err(YangError::new(ErrorKind::Validation, format!("bit '{}' may not be re-assigned a different position in a derived type", member.name)))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_enums() -> EnumSet {
        EnumSet::new(vec![EnumMember { name: "up".into(), value: 0 }, EnumMember { name: "down".into(), value: 1 }]).unwrap()
    }

    #[test]
    fn derived_enum_may_drop_members() {
        let derived = EnumSet::new(vec![EnumMember { name: "up".into(), value: 0 }]).unwrap();
        assert!(derived.is_subset_of(&base_enums()).is_ok());
    }

    #[test]
    fn derived_enum_cannot_introduce_new_members() {
        let derived = EnumSet::new(vec![EnumMember { name: "sideways".into(), value: 2 }]).unwrap();
        let err = derived.is_subset_of(&base_enums()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn derived_enum_cannot_reassign_value() {
        let derived = EnumSet::new(vec![EnumMember { name: "up".into(), value: 5 }]).unwrap();
        let err = derived.is_subset_of(&base_enums()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn rejects_a_duplicate_enum_name() {
        let err = EnumSet::new(vec![EnumMember { name: "up".into(), value: 0 }, EnumMember { name: "up".into(), value: 1 }]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn rejects_a_duplicate_bit_name_or_position() {
        let err = BitSet::new(vec![BitMember { name: "a".into(), position: 0 }, BitMember { name: "a".into(), position: 1 }]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = BitSet::new(vec![BitMember { name: "a".into(), position: 0 }, BitMember { name: "b".into(), position: 0 }]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
