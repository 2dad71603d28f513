//! Typedef chain resolution to a built-in root (spec.md §4.6 step 5), using
//! `yang2-types`'s restriction algebra (C6) to compose range/length/pattern/
//! enum/bit restrictions at each step.

use std::collections::HashSet;

use yang2_base::{ErrorKind, Result, YangError};
use yang2_parse::ast::{BitMember as ParsedBitMember, EnumMember as ParsedEnumMember, ParsedType, Typedef};
use yang2_types::{engine, range, BitMember, BitSet, BuiltinType, EnumMember, EnumSet, PatternSet, RestrictionSet, Value};

/// A fully resolved type: a built-in root plus the restrictions composed
/// along its derivation chain.
#[derive(Debug, Clone)]
pub struct CompiledType {
    pub builtin: BuiltinType,
    pub range: Option<RestrictionSet>,
    pub length: Option<RestrictionSet>,
    pub patterns: Option<PatternSet>,
    pub enums: Option<EnumSet>,
    pub bits: Option<BitSet>,
    pub path: Option<String>,
    pub base_identities: Vec<String>,
    pub require_instance: bool,
    pub members: Vec<CompiledType>,
}

fn builtin_by_name(name: &str, fraction_digits: Option<u8>) -> Result<Option<BuiltinType>> {
    Ok(Some(match name {
        "binary" => BuiltinType::Binary,
        "bits" => BuiltinType::Bits,
        "boolean" => BuiltinType::Boolean,
        "decimal64" => {
            let fd = fraction_digits.ok_or_else(|| YangError::new(ErrorKind::Validation, "decimal64 requires 'fraction-digits'"))?;
            if !(1..=18).contains(&fd) {
                return Err(YangError::new(ErrorKind::Validation, format!("fraction-digits {} is outside 1..=18", fd)));
            }
            BuiltinType::Decimal64 { fraction_digits: fd }
        }
        "empty" => BuiltinType::Empty,
        "enumeration" => BuiltinType::Enumeration,
        "identityref" => BuiltinType::Identityref,
        "instance-identifier" => BuiltinType::InstanceIdentifier,
        "int8" => BuiltinType::Int8,
        "int16" => BuiltinType::Int16,
        "int32" => BuiltinType::Int32,
        "int64" => BuiltinType::Int64,
        "leafref" => BuiltinType::Leafref,
        "string" => BuiltinType::String,
        "uint8" => BuiltinType::Uint8,
        "uint16" => BuiltinType::Uint16,
        "uint32" => BuiltinType::Uint32,
        "uint64" => BuiltinType::Uint64,
        "union" => BuiltinType::Union,
        _ => return Ok(None),
    }))
}

const STRING_LENGTH_BOUNDS: (i128, i128) = (0, u64::MAX as i128);

fn literal_fn(builtin: BuiltinType) -> Box<dyn Fn(&str) -> Result<i128>> {
    match builtin {
        BuiltinType::Decimal64 { fraction_digits } => Box::new(move |t| range::decimal64_literal(t, fraction_digits)),
        b if b.is_integer() => Box::new(range::integer_literal),
        _ => Box::new(range::length_literal),
    }
}

/// Assigns auto-incrementing values to enum members that omit an explicit
/// `value` (RFC 7950 §9.6.4.2: one more than the previous member's, or 0 for
/// the first).
fn assign_enum_values(members: &[ParsedEnumMember]) -> Vec<EnumMember> {
    let mut next = 0i64;
    members
        .iter()
        .map(|m| {
            let value = m.value.unwrap_or(next);
            next = value + 1;
            EnumMember { name: m.name.clone(), value }
        })
        .collect()
}

fn assign_bit_positions(members: &[ParsedBitMember]) -> Vec<BitMember> {
    let mut next = 0u32;
    members
        .iter()
        .map(|m| {
            let position = m.position.unwrap_or(next);
            next = position + 1;
            BitMember { name: m.name.clone(), position }
        })
        .collect()
}

fn compile_patterns(parsed: &ParsedType) -> Result<Option<PatternSet>> {
    if parsed.patterns.is_empty() {
        return Ok(None);
    }
    let mut compiled = Vec::with_capacity(parsed.patterns.len());
    for p in &parsed.patterns {
        compiled.push(yang2_types::CompiledPattern::compile(&p.text, p.invert_match)?);
    }
    Ok(Some(PatternSet::new(compiled)))
}

/// Compiles `parsed` to its built-in root, resolving typedef references via
/// `lookup_typedef`. `seen` tracks typedef names visited on this chain to
/// detect cycles (spec.md §4.6 step 5: "cycle detection is required").
pub fn compile_type(parsed: &ParsedType, lookup_typedef: &dyn Fn(&str) -> Option<Typedef>, seen: &mut HashSet<String>) -> Result<CompiledType> {
    if let Some(builtin) = builtin_by_name(&parsed.name, parsed.fraction_digits)? {
        return compile_builtin_root(builtin, parsed, lookup_typedef, seen);
    }

    if !seen.insert(parsed.name.clone()) {
        return Err(YangError::new(ErrorKind::Denied, format!("typedef chain for '{}' is cyclic", parsed.name)));
    }
    let typedef = lookup_typedef(&parsed.name).ok_or_else(|| YangError::new(ErrorKind::Unresolved, format!("type '{}' does not name a built-in type or a known typedef", parsed.name)))?;
    let parent = compile_type(&typedef.type_, lookup_typedef, seen)?;
    derive(parent, parsed)
}

fn compile_builtin_root(builtin: BuiltinType, parsed: &ParsedType, lookup_typedef: &dyn Fn(&str) -> Option<Typedef>, seen: &mut HashSet<String>) -> Result<CompiledType> {
    let mut compiled = CompiledType {
        builtin,
        range: None,
        length: None,
        patterns: None,
        enums: None,
        bits: None,
        path: parsed.path.clone(),
        base_identities: parsed.base_identities.clone(),
        require_instance: parsed.require_instance.unwrap_or(true),
        members: Vec::new(),
    };

    if let Some(bounds) = builtin.natural_bounds() {
        let unrestricted = RestrictionSet::unrestricted(bounds);
        compiled.range = Some(match &parsed.range {
            Some(text) => range::parse_restriction(text, &unrestricted, &literal_fn(builtin))?,
            None => unrestricted,
        });
    }

    if matches!(builtin, BuiltinType::String | BuiltinType::Binary) {
        let unrestricted = RestrictionSet::unrestricted(STRING_LENGTH_BOUNDS);
        compiled.length = Some(match &parsed.length {
            Some(text) => range::parse_restriction(text, &unrestricted, &range::length_literal)?,
            None => unrestricted,
        });
    }

    if matches!(builtin, BuiltinType::String) {
        compiled.patterns = compile_patterns(parsed)?;
    }

    if matches!(builtin, BuiltinType::Enumeration) {
        if parsed.enums.is_empty() {
            return Err(YangError::new(ErrorKind::Validation, "an enumeration type must declare at least one 'enum'"));
        }
        compiled.enums = Some(EnumSet::new(assign_enum_values(&parsed.enums))?);
    }

    if matches!(builtin, BuiltinType::Bits) {
        if parsed.bits.is_empty() {
            return Err(YangError::new(ErrorKind::Validation, "a bits type must declare at least one 'bit'"));
        }
        compiled.bits = Some(BitSet::new(assign_bit_positions(&parsed.bits))?);
    }

    if matches!(builtin, BuiltinType::Union) {
        for member in &parsed.members {
            let mut branch_seen = seen.clone();
            compiled.members.push(compile_type(member, lookup_typedef, &mut branch_seen)?);
        }
        if compiled.members.is_empty() {
            return Err(YangError::new(ErrorKind::Validation, "a union type must declare at least one member 'type'"));
        }
    }

    Ok(compiled)
}

/// Applies `this`'s own restrictions on top of its typedef `parent`,
/// validating that every restriction narrows (never widens) the parent's
/// (spec.md §4.4 "Derive").
fn derive(parent: CompiledType, this: &ParsedType) -> Result<CompiledType> {
    let mut compiled = parent.clone();

    if let Some(parent_range) = &parent.range {
        if let Some(text) = &this.range {
            if matches!(parent.builtin, BuiltinType::Decimal64 { .. }) && this.fraction_digits.is_some() {
                return Err(YangError::new(ErrorKind::Validation, "fraction-digits cannot change along a derivation chain"));
            }
            let derived = range::parse_restriction(text, parent_range, &literal_fn(parent.builtin))?;
            if !derived.is_subset_of(parent_range) {
                return Err(YangError::new(ErrorKind::Validation, format!("derived restriction ({}) is not equally or more limiting", text)));
            }
            compiled.range = Some(derived);
        }
    } else if matches!(parent.builtin, BuiltinType::Decimal64 { .. }) && this.fraction_digits.is_some() {
        return Err(YangError::new(ErrorKind::Validation, "fraction-digits cannot change along a derivation chain"));
    }

    if let Some(parent_length) = &parent.length {
        if let Some(text) = &this.length {
            let derived = range::parse_restriction(text, parent_length, &range::length_literal)?;
            if !derived.is_subset_of(parent_length) {
                return Err(YangError::new(ErrorKind::Validation, format!("derived restriction ({}) is not equally or more limiting", text)));
            }
            compiled.length = Some(derived);
        }
    }

    if matches!(parent.builtin, BuiltinType::String) && !this.patterns.is_empty() {
        let mut patterns = match &parent.patterns {
            Some(set) => set.patterns().to_vec(),
            None => Vec::new(),
        };
        for p in &this.patterns {
            patterns.push(yang2_types::CompiledPattern::compile(&p.text, p.invert_match)?);
        }
        compiled.patterns = Some(PatternSet::new(patterns));
    }

    if matches!(parent.builtin, BuiltinType::Enumeration) && !this.enums.is_empty() {
        let parent_enums = parent.enums.as_ref().expect("enumeration always carries an EnumSet");
        let derived_members: Vec<EnumMember> = this
            .enums
            .iter()
            .map(|m| match m.value {
                Some(v) => EnumMember { name: m.name.clone(), value: v },
                None => parent_enums.find(&m.name).cloned().unwrap_or(EnumMember { name: m.name.clone(), value: 0 }),
            })
            .collect();
        let derived = EnumSet::new(derived_members)?;
        derived.is_subset_of(parent_enums)?;
        compiled.enums = Some(derived);
    }

    if matches!(parent.builtin, BuiltinType::Bits) && !this.bits.is_empty() {
        let parent_bits = parent.bits.as_ref().expect("bits always carries a BitSet");
        let derived_members: Vec<BitMember> = this
            .bits
            .iter()
            .map(|m| match m.position {
                Some(p) => BitMember { name: m.name.clone(), position: p },
                None => parent_bits.find(&m.name).cloned().unwrap_or(BitMember { name: m.name.clone(), position: 0 }),
            })
            .collect();
        let derived = BitSet::new(derived_members)?;
        derived.is_subset_of(parent_bits)?;
        compiled.bits = Some(derived);
    }

    if matches!(parent.builtin, BuiltinType::Identityref) && !this.base_identities.is_empty() {
        compiled.base_identities = this.base_identities.clone();
    }

    if matches!(parent.builtin, BuiltinType::Leafref) {
        if let Some(path) = &this.path {
            compiled.path = Some(path.clone());
        }
    }

    if let Some(ri) = this.require_instance {
        compiled.require_instance = ri;
    }

    Ok(compiled)
}

/// Invokes the type-value engine's `store` for a compiled type (spec.md
/// §4.6 step 8, "Validate defaults"; also the backbone of the `yang2`
/// facade's public `store` entry point).
///
/// `identityref` accepts any well-formed `(prefix:)?name` here since this
/// crate does not resolve identity membership against a live Context from
/// inside a pure type operation; callers that need the full check should
/// verify separately via [`crate::identity::IdentityDag::is_derived_from`].
/// `leafref` similarly stores the referent as an opaque string rather than
/// resolving the path against a compiled schema.
pub fn store_value(type_: &CompiledType, text: &str) -> Result<Value> {
    match type_.builtin {
        _ if type_.builtin.is_integer() => engine::store_integer(text, type_.builtin.natural_bounds().expect("integer types always have natural bounds"), type_.range.as_ref().expect("integer types always carry a range")),
        BuiltinType::Binary => engine::store_binary(text, type_.length.as_ref()),
        BuiltinType::Bits => engine::store_bits(text, type_.bits.as_ref().expect("bits type always carries a BitSet")),
        BuiltinType::Boolean => engine::store_boolean(text),
        BuiltinType::Decimal64 { fraction_digits } => engine::store_decimal64(text, fraction_digits, type_.range.as_ref().expect("decimal64 always carries a range")),
        BuiltinType::Empty => engine::store_empty(text),
        BuiltinType::Enumeration => engine::store_enumeration(text, type_.enums.as_ref().expect("enumeration type always carries an EnumSet")),
        BuiltinType::Identityref => engine::store_identityref(text, &|_, _| true),
        BuiltinType::InstanceIdentifier => engine::store_instance_identifier(text),
        BuiltinType::Leafref => engine::store_leafref(text, &|t| Ok(Value::String(t.to_string()))),
        BuiltinType::String => engine::store_string(text, type_.length.as_ref(), type_.patterns.as_ref()),
        BuiltinType::Union => {
            let branches: Vec<Box<dyn Fn(&str) -> Result<Value>>> = type_
                .members
                .iter()
                .map(|member| {
                    let member = member.clone();
                    Box::new(move |t: &str| store_value(&member, t)) as Box<dyn Fn(&str) -> Result<Value>>
                })
                .collect();
            let refs: Vec<&dyn Fn(&str) -> Result<Value>> = branches.iter().map(|b| b.as_ref()).collect();
            engine::store_union(text, &refs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yang2_base::ErrorKind;

    fn leaf_type(name: &str, range: Option<&str>) -> ParsedType {
        ParsedType { name: name.to_string(), range: range.map(str::to_string), ..Default::default() }
    }

    #[test]
    fn compiles_an_int8_with_a_gapped_range() {
        let t = leaf_type("int8", Some("0 .. 50 | 127"));
        let compiled = compile_type(&t, &|_| None, &mut HashSet::new()).unwrap();
        let range = compiled.range.unwrap();
        assert!(range.contains(0));
        assert!(range.contains(127));
        assert!(!range.contains(60));
    }

    #[test]
    fn typedef_chain_rejects_a_wider_derived_range() {
        let base = Typedef {
            name: "my".to_string(),
            type_: leaf_type("int8", Some("-128 .. -60 | -1 .. 1 | 60 .. 127")),
            units: None,
            default: None,
            status: Default::default(),
            description: None,
            reference: None,
        };
        let derived = leaf_type("my", Some("-80 .. 80"));
        let err = compile_type(&derived, &|name| if name == "my" { Some(base.clone()) } else { None }, &mut HashSet::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("is not equally or more limiting"));
    }

    #[test]
    fn detects_a_typedef_cycle() {
        let cyclic = Typedef {
            name: "a".to_string(),
            type_: leaf_type("a", None),
            units: None,
            default: None,
            status: Default::default(),
            description: None,
            reference: None,
        };
        let t = leaf_type("a", None);
        let err = compile_type(&t, &|_| Some(cyclic.clone()), &mut HashSet::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Denied);
    }

    #[test]
    fn decimal64_requires_fraction_digits() {
        let t = leaf_type("decimal64", None);
        let err = compile_type(&t, &|_| None, &mut HashSet::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn enumeration_auto_assigns_ascending_values() {
        let mut t = leaf_type("enumeration", None);
        t.enums = vec![
            ParsedEnumMember { name: "up".into(), value: None, status: Default::default(), description: None, reference: None },
            ParsedEnumMember { name: "down".into(), value: Some(5), status: Default::default(), description: None, reference: None },
            ParsedEnumMember { name: "sideways".into(), value: None, status: Default::default(), description: None, reference: None },
        ];
        let compiled = compile_type(&t, &|_| None, &mut HashSet::new()).unwrap();
        let enums = compiled.enums.unwrap();
        assert_eq!(enums.find("up").unwrap().value, 0);
        assert_eq!(enums.find("down").unwrap().value, 5);
        assert_eq!(enums.find("sideways").unwrap().value, 6);
    }

    #[test]
    fn union_compiles_each_member() {
        let mut t = leaf_type("union", None);
        t.members = vec![leaf_type("int8", None), leaf_type("string", None)];
        let compiled = compile_type(&t, &|_| None, &mut HashSet::new()).unwrap();
        assert_eq!(compiled.members.len(), 2);
    }
}
