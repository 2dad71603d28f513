//! The schema compiler pipeline proper (spec.md §4.6): resolve imports,
//! flatten includes, compile identities/features, compile the data tree,
//! apply top-level augments, validate defaults, apply deviations.

use std::collections::HashMap;

use yang2_base::{ErrorKind, Result, SchemaPath, YangError};
use yang2_parse::ast::{ParsedModule, ParsedSubmodule, SchemaNode};

use crate::identity::{CompiledIdentity, IdentityDag, IdentityKey};
use crate::schema::{apply_deviations, apply_top_level_augments, build_env, compile_children, CompiledNode};
use crate::typedef::store_value;
use crate::ContextOptions;

/// A fully compiled, frozen module (spec.md §4.6 "Finalize").
#[derive(Debug, Clone)]
pub struct CompiledModule {
    pub name: String,
    pub namespace: String,
    pub prefix: String,
    pub body: Vec<CompiledNode>,
}

impl CompiledModule {
    pub fn child(&self, name: &str) -> Option<&CompiledNode> {
        self.body.iter().find(|n| n.name() == name)
    }
}

fn strip_prefix(name: &str) -> &str {
    name.rsplit_once(':').map(|(_, n)| n).unwrap_or(name)
}

/// Splices submodule typedefs/groupings/identities/features/deviations/body
/// into a clone of `module`, per spec.md §4.6 step 2 ("Flatten includes").
fn flatten_includes(module: &ParsedModule, submodules: &HashMap<String, ParsedSubmodule>) -> Result<ParsedModule> {
    let mut flattened = module.clone();
    for include in &module.includes {
        let sub = submodules.get(&include.submodule).ok_or_else(|| YangError::new(ErrorKind::Unresolved, format!("included submodule '{}' not found", include.submodule)))?;
        if sub.belongs_to != module.name {
            return Err(YangError::new(ErrorKind::Denied, format!("submodule '{}' belongs to '{}', not '{}'", sub.name, sub.belongs_to, module.name)));
        }
        flattened.typedefs.extend(sub.typedefs.clone());
        flattened.groupings.extend(sub.groupings.clone());
        flattened.identities.extend(sub.identities.clone());
        flattened.features.extend(sub.features.clone());
        flattened.extensions.extend(sub.extensions.clone());
        flattened.deviations.extend(sub.deviations.clone());
        flattened.body.extend(sub.body.clone());
    }
    Ok(flattened)
}

fn compile_identities(module: &ParsedModule, dag: &mut IdentityDag) -> Result<()> {
    for identity in &module.identities {
        let key = IdentityKey::new(&module.name, &identity.name);
        let bases = identity.bases.iter().map(|b| IdentityKey::new(&module.name, strip_prefix(b))).collect();
        dag.insert(CompiledIdentity { key, bases, status: identity.status, description: identity.description.clone(), reference: identity.reference.clone() });
    }
    dag.check_acyclic()
}

fn validate_defaults(body: &[CompiledNode]) -> Result<()> {
    let mut messages = Vec::new();
    fn walk(nodes: &[CompiledNode], messages: &mut Vec<String>) {
        for node in nodes {
            match node {
                CompiledNode::Leaf(l) => {
                    if let Some(default) = &l.default {
                        if let Err(e) = store_value(&l.type_, default) {
                            messages.push(format!("Invalid default - value does not fit the type ({}) at {}", e.message, l.common.path));
                        }
                    }
                }
                CompiledNode::LeafList(l) => {
                    for default in &l.defaults {
                        if let Err(e) = store_value(&l.type_, default) {
                            messages.push(format!("Invalid default - value does not fit the type ({}) at {}", e.message, l.common.path));
                        }
                    }
                }
                CompiledNode::Container(c) => walk(&c.children, messages),
                CompiledNode::List(l) => walk(&l.children, messages),
                CompiledNode::Notification(n) => walk(&n.children, messages),
                CompiledNode::Choice(c) => {
                    for case in &c.cases {
                        walk(&case.children, messages);
                    }
                }
                _ => {}
            }
        }
    }
    walk(body, &mut messages);
    if messages.is_empty() {
        Ok(())
    } else {
        Err(YangError::new(ErrorKind::Validation, messages.join("; ")))
    }
}

/// Runs C5's full pipeline for `module`, given its flattened dependency set.
pub fn compile_module(options: &ContextOptions, module: &ParsedModule, submodules: &HashMap<String, ParsedSubmodule>, imported: &dyn Fn(&str, Option<&str>) -> Result<()>, dag: &mut IdentityDag) -> Result<CompiledModule> {
    log::debug!("compiling module '{}'", module.name);

    for import in &module.imports {
        imported(&import.module, import.revision_date.as_deref())?;
    }

    let flattened = flatten_includes(module, submodules)?;

    compile_identities(&flattened, dag)?;

    log::trace!("{} feature(s), {} typedef(s), {} top-level node(s)", flattened.features.len(), flattened.typedefs.len(), flattened.body.len());

    let enabled: std::collections::HashSet<&str> = options.enabled_features.iter().filter(|(m, _)| m == &module.name).map(|(_, f)| f.as_str()).collect();
    let is_feature_enabled = move |name: &str| enabled.contains(name);
    let env = build_env(&module.name, &flattened, &is_feature_enabled);

    let mut body = compile_children(&flattened.body, &env, true, &SchemaPath::new())?;

    let augments: Vec<_> = flattened
        .body
        .iter()
        .filter_map(|n| match n {
            SchemaNode::Augment(a) => Some(a.clone()),
            _ => None,
        })
        .collect();
    apply_top_level_augments(&mut body, &augments, &env)?;

    validate_defaults(&body)?;

    apply_deviations(&mut body, &flattened.deviations, options.strict_deviations)?;

    Ok(CompiledModule { name: module.name.clone(), namespace: module.namespace.clone(), prefix: module.prefix.clone(), body })
}
