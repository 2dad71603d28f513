//! The identity DAG (spec.md §4.6 step 3) and [`IdentityDag::is_derived_from`]
//! (SPEC_FULL.md §10.7's supplemented, memoized traversal).

use std::cell::RefCell;
use std::collections::HashMap;

use yang2_base::{ErrorKind, Result, YangError};
use yang2_parse::ast::Status;

/// An identity qualified by the module that declared it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub module: String,
    pub name: String,
}

impl IdentityKey {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self { module: module.into(), name: name.into() }
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct CompiledIdentity {
    pub key: IdentityKey,
    pub bases: Vec<IdentityKey>,
    pub status: Status,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Default)]
pub struct IdentityDag {
    identities: HashMap<IdentityKey, CompiledIdentity>,
    derived_cache: RefCell<HashMap<(IdentityKey, IdentityKey), bool>>,
}

impl IdentityDag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: CompiledIdentity) {
        self.identities.insert(identity.key.clone(), identity);
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&CompiledIdentity> {
        self.identities.get(key)
    }

    /// Detects cycles in the base-identity graph (spec.md §4.6 step 3:
    /// "detect cycles (fatal)").
    pub fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }
        let mut marks: HashMap<&IdentityKey, Mark> = HashMap::new();

        fn visit<'a>(dag: &'a IdentityDag, key: &'a IdentityKey, marks: &mut HashMap<&'a IdentityKey, Mark>) -> Result<()> {
            match marks.get(key) {
                Some(Mark::Done) => return Ok(()),
                Some(Mark::Visiting) => return Err(YangError::new(ErrorKind::Denied, format!("identity '{}' participates in a cyclic derivation", key))),
                None => {}
            }
            marks.insert(key, Mark::Visiting);
            if let Some(identity) = dag.identities.get(key) {
                for base in &identity.bases {
                    visit(dag, base, marks)?;
                }
            }
            marks.insert(key, Mark::Done);
            Ok(())
        }

        for key in self.identities.keys() {
            visit(self, key, &mut marks)?;
        }
        Ok(())
    }

    /// Whether `child` is derived from (or equal to) `base`, walking the
    /// base-identity chain. Memoized since the same pair is asked about
    /// repeatedly during identityref `store` calls.
    pub fn is_derived_from(&self, child: &IdentityKey, base: &IdentityKey) -> bool {
        if child == base {
            return true;
        }
        let cache_key = (child.clone(), base.clone());
        if let Some(cached) = self.derived_cache.borrow().get(&cache_key) {
            return *cached;
        }
        let result = match self.identities.get(child) {
            Some(identity) => identity.bases.iter().any(|b| self.is_derived_from(b, base)),
            None => false,
        };
        self.derived_cache.borrow_mut().insert(cache_key, result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str, bases: &[&str]) -> CompiledIdentity {
        CompiledIdentity {
            key: IdentityKey::new("m", name),
            bases: bases.iter().map(|b| IdentityKey::new("m", *b)).collect(),
            status: Status::Current,
            description: None,
            reference: None,
        }
    }

    #[test]
    fn is_derived_from_walks_the_chain_transitively() {
        let mut dag = IdentityDag::new();
        dag.insert(id("root", &[]));
        dag.insert(id("mid", &["root"]));
        dag.insert(id("leaf", &["mid"]));
        assert!(dag.is_derived_from(&IdentityKey::new("m", "leaf"), &IdentityKey::new("m", "root")));
        assert!(!dag.is_derived_from(&IdentityKey::new("m", "root"), &IdentityKey::new("m", "leaf")));
    }

    #[test]
    fn an_identity_is_derived_from_itself() {
        let mut dag = IdentityDag::new();
        dag.insert(id("solo", &[]));
        assert!(dag.is_derived_from(&IdentityKey::new("m", "solo"), &IdentityKey::new("m", "solo")));
    }

    #[test]
    fn check_acyclic_rejects_a_cycle() {
        let mut dag = IdentityDag::new();
        dag.insert(id("a", &["b"]));
        dag.insert(id("b", &["a"]));
        let err = dag.check_acyclic().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Denied);
    }

    #[test]
    fn check_acyclic_accepts_a_dag() {
        let mut dag = IdentityDag::new();
        dag.insert(id("root", &[]));
        dag.insert(id("mid", &["root"]));
        assert!(dag.check_acyclic().is_ok());
    }
}
