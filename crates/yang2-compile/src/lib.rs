//! The schema compiler (C5), the `Context` registry, the identity DAG, and
//! the compiled schema tree (spec.md §4.6; SPEC_FULL.md §10.1, §10.4,
//! §10.5).

pub mod compile;
pub mod diagnostics;
pub mod feature;
pub mod identity;
pub mod schema;
pub mod typedef;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use yang2_base::{ErrorKind, Result, YangError};
use yang2_parse::ast::{ParsedModule, ParsedSubmodule};
use yang2_types::CustomTypeCallbacks;

pub use compile::CompiledModule;
pub use identity::{CompiledIdentity, IdentityDag, IdentityKey};
pub use schema::CompiledNode;

/// Configuration for a [`Context`] (SPEC_FULL.md §10.4; mirrors the
/// teacher's `CompileOptions`).
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    /// `(module, feature)` pairs enabled for if-feature pruning (spec.md
    /// §4.6 step 4).
    pub enabled_features: HashSet<(String, String)>,
    /// Version assumed for modules whose `yang-version` statement is
    /// absent. YANG itself defaults to 1.0; this exists for test fixtures
    /// that want 1.1 gating without writing the statement out.
    pub yang_1_1_by_default: bool,
    /// When true, a deviation targeting a nonexistent node is `Denied`.
    /// When false (the default, matching common tooling leniency), it is a
    /// no-op. Recorded as an Open Question resolution in DESIGN.md.
    pub strict_deviations: bool,
}

/// The registry of parsed modules, submodules, custom type callbacks, and
/// compiled output for one compilation universe (spec.md §5: "a Context
/// holds no locks internally... all operations... must be serialized by the
/// caller").
pub struct Context {
    options: ContextOptions,
    modules: HashMap<String, ParsedModule>,
    submodules: HashMap<String, ParsedSubmodule>,
    compiled: HashMap<String, CompiledModule>,
    custom_types: HashMap<String, CustomTypeCallbacks>,
    identity_dag: IdentityDag,
    last_diagnostic: RefCell<Option<YangError>>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self::with_options(ContextOptions::default())
    }

    pub fn with_options(options: ContextOptions) -> Self {
        Self {
            options,
            modules: HashMap::new(),
            submodules: HashMap::new(),
            compiled: HashMap::new(),
            custom_types: HashMap::new(),
            identity_dag: IdentityDag::new(),
            last_diagnostic: RefCell::new(None),
        }
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// Registers a parsed main module so later `compile` calls (on it or on
    /// modules that import it) can find it.
    pub fn add_module(&mut self, module: ParsedModule) {
        log::debug!("registering module '{}'", module.name);
        self.modules.insert(module.name.clone(), module);
    }

    pub fn add_submodule(&mut self, submodule: ParsedSubmodule) {
        log::debug!("registering submodule '{}'", submodule.name);
        self.submodules.insert(submodule.name.clone(), submodule);
    }

    /// Registers caller-supplied `store`/`print`/`duplicate`/`compare`
    /// callbacks for a type name the built-in closed set does not cover
    /// (SPEC_FULL.md §10.5).
    pub fn register_custom_type(&mut self, name: impl Into<String>, callbacks: CustomTypeCallbacks) {
        self.custom_types.insert(name.into(), callbacks);
    }

    pub fn custom_type(&self, name: &str) -> Option<&CustomTypeCallbacks> {
        self.custom_types.get(name)
    }

    /// The most recent diagnostic produced by a failed call (spec.md §6).
    pub fn last_diagnostic(&self) -> Option<YangError> {
        self.last_diagnostic.borrow().clone()
    }

    fn record_failure(&self, error: YangError) -> YangError {
        *self.last_diagnostic.borrow_mut() = Some(error.clone());
        error
    }

    /// Compiles the registered module named `name` (spec.md §4.6's full
    /// pipeline), caching the result for subsequent lookups.
    pub fn compile(&mut self, name: &str) -> Result<&CompiledModule> {
        if self.compiled.contains_key(name) {
            return Ok(&self.compiled[name]);
        }
        let module = self.modules.get(name).cloned().ok_or_else(|| YangError::new(ErrorKind::Unresolved, format!("module '{}' is not registered with this Context", name)))?;

        let modules = &self.modules;
        let imported = |imported_name: &str, revision: Option<&str>| -> Result<()> {
            let dep = modules.get(imported_name).ok_or_else(|| YangError::new(ErrorKind::Unresolved, format!("unresolved import: '{}'", imported_name)))?;
            if let Some(requested) = revision {
                let latest = dep.latest_revision().map(|r| r.date.as_str());
                if latest != Some(requested) {
                    return Err(YangError::new(ErrorKind::Unresolved, format!("import of '{}' requested revision '{}' but the latest registered revision is {:?}", imported_name, requested, latest)));
                }
            }
            Ok(())
        };

        let result = compile::compile_module(&self.options, &module, &self.submodules, &imported, &mut self.identity_dag);
        match result {
            Ok(compiled) => {
                self.compiled.insert(name.to_string(), compiled);
                log::info!("compiled module '{}'", name);
                Ok(&self.compiled[name])
            }
            Err(e) => Err(self.record_failure(e)),
        }
    }

    pub fn compiled_module(&self, name: &str) -> Option<&CompiledModule> {
        self.compiled.get(name)
    }

    pub fn identities(&self) -> &IdentityDag {
        &self.identity_dag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_module(name: &str) -> ParsedModule {
        yang2_parse::parse_module(&format!("module {} {{ namespace \"urn:{}\"; prefix {}; yang-version 1.1; }}", name, name, name)).unwrap()
    }

    #[test]
    fn compiling_an_unregistered_module_is_unresolved() {
        let mut ctx = Context::new();
        let err = ctx.compile("missing").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unresolved);
        assert_eq!(ctx.last_diagnostic().unwrap().kind, ErrorKind::Unresolved);
    }

    #[test]
    fn compiles_a_minimal_module_with_a_leaf() {
        let src = r#"
            module acme-box {
              namespace "urn:acme:box";
              prefix box;
              yang-version 1.1;
              leaf port {
                type int8 {
                  range "0 .. 50 | 127";
                }
                default "20";
              }
            }
        "#;
        let module = yang2_parse::parse_module(src).unwrap();
        let mut ctx = Context::new();
        ctx.add_module(module);
        let compiled = ctx.compile("acme-box").unwrap();
        let leaf = compiled.child("port").unwrap();
        match leaf {
            CompiledNode::Leaf(l) => {
                assert_eq!(l.default.as_deref(), Some("20"));
                assert!(l.type_.range.as_ref().unwrap().contains(127));
            }
            _ => panic!("expected a leaf"),
        }
    }

    #[test]
    fn rejects_a_default_outside_the_range_constraint() {
        let src = r#"
            module acme-box {
              namespace "urn:acme:box";
              prefix box;
              leaf port {
                type int8 {
                  range "0 .. 50";
                }
                default "60";
              }
            }
        "#;
        let module = yang2_parse::parse_module(src).unwrap();
        let mut ctx = Context::new();
        ctx.add_module(module);
        let err = ctx.compile("acme-box").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("does not satisfy the range constraint"));
    }

    #[test]
    fn unresolved_import_is_reported() {
        let src = r#"
            module acme-box {
              namespace "urn:acme:box";
              prefix box;
              import acme-types { prefix t; }
            }
        "#;
        let module = yang2_parse::parse_module(src).unwrap();
        let mut ctx = Context::new();
        ctx.add_module(module);
        let err = ctx.compile("acme-box").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unresolved);
    }

    #[test]
    fn registers_and_reads_back_a_custom_type() {
        fn store(t: &str) -> Result<yang2_types::Value> {
            Ok(yang2_types::Value::String(t.to_string()))
        }
        fn print(v: &yang2_types::Value) -> Result<String> {
            match v {
                yang2_types::Value::String(s) => Ok(s.clone()),
                _ => unreachable!(),
            }
        }
        fn duplicate(v: &yang2_types::Value) -> yang2_types::Value {
            v.clone()
        }
        fn compare(a: &yang2_types::Value, b: &yang2_types::Value) -> yang2_types::Comparison {
            a.compare(b)
        }
        let mut ctx = Context::new();
        ctx.register_custom_type("acme:ip-address", CustomTypeCallbacks { store, print, duplicate, compare });
        assert!(ctx.custom_type("acme:ip-address").is_some());
    }

    #[test]
    fn minimal_module_helper_round_trips() {
        let module = minimal_module("helper-check");
        assert_eq!(module.name, "helper-check");
    }
}
