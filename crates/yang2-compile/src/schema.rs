//! The compiled schema tree (spec.md §4.6 steps 6-9) and its consumer-facing
//! walk (spec.md §6 "Compiled-schema consumer interface").

use std::collections::HashMap;

use yang2_base::{ErrorKind, Result, SchemaPath, YangError};
use yang2_parse::ast::{
    AnyNode, AugmentNode, ChoiceNode, ConfigFlag, ContainerNode, Deviate, Deviation, GroupingNode, InputOutputNode, LeafListNode, LeafNode, ListNode, MaxElements, NotificationNode, OrderedBy,
    ParsedModule, RpcNode, SchemaNode, SchemaNodeCommon, Status, Typedef, UsesNode,
};

use crate::feature::all_satisfied;
use crate::typedef::{compile_type, CompiledType};

#[derive(Debug, Clone)]
pub struct CompiledCommon {
    pub name: String,
    pub status: Status,
    /// Resolved from the tri-state [`ConfigFlag`] against the nearest
    /// ancestor that set it (root default: `true`).
    pub config: bool,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub path: SchemaPath,
}

#[derive(Debug, Clone)]
pub struct CompiledContainer {
    pub common: CompiledCommon,
    pub presence: Option<String>,
    pub children: Vec<CompiledNode>,
}

#[derive(Debug, Clone)]
pub struct CompiledList {
    pub common: CompiledCommon,
    pub key: Option<String>,
    pub uniques: Vec<String>,
    pub min_elements: u32,
    pub max_elements: MaxElements,
    pub ordered_by: OrderedBy,
    pub children: Vec<CompiledNode>,
}

#[derive(Debug, Clone)]
pub struct CompiledLeaf {
    pub common: CompiledCommon,
    pub type_: CompiledType,
    pub units: Option<String>,
    pub default: Option<String>,
    pub mandatory: bool,
}

#[derive(Debug, Clone)]
pub struct CompiledLeafList {
    pub common: CompiledCommon,
    pub type_: CompiledType,
    pub units: Option<String>,
    pub defaults: Vec<String>,
    pub min_elements: u32,
    pub max_elements: MaxElements,
    pub ordered_by: OrderedBy,
}

#[derive(Debug, Clone)]
pub struct CompiledCase {
    pub common: CompiledCommon,
    pub children: Vec<CompiledNode>,
}

#[derive(Debug, Clone)]
pub struct CompiledChoice {
    pub common: CompiledCommon,
    pub default: Option<String>,
    pub mandatory: bool,
    pub cases: Vec<CompiledCase>,
}

#[derive(Debug, Clone)]
pub struct CompiledAny {
    pub common: CompiledCommon,
    pub mandatory: bool,
}

#[derive(Debug, Clone)]
pub struct CompiledRpc {
    pub common: CompiledCommon,
    pub input: Vec<CompiledNode>,
    pub output: Vec<CompiledNode>,
}

#[derive(Debug, Clone)]
pub struct CompiledNotification {
    pub common: CompiledCommon,
    pub children: Vec<CompiledNode>,
}

#[derive(Debug, Clone)]
pub enum CompiledNode {
    Container(CompiledContainer),
    List(CompiledList),
    Leaf(CompiledLeaf),
    LeafList(CompiledLeafList),
    Choice(CompiledChoice),
    AnyData(CompiledAny),
    AnyXml(CompiledAny),
    Rpc(CompiledRpc),
    Action(CompiledRpc),
    Notification(CompiledNotification),
}

impl CompiledNode {
    pub fn common(&self) -> &CompiledCommon {
        match self {
            CompiledNode::Container(n) => &n.common,
            CompiledNode::List(n) => &n.common,
            CompiledNode::Leaf(n) => &n.common,
            CompiledNode::LeafList(n) => &n.common,
            CompiledNode::Choice(n) => &n.common,
            CompiledNode::AnyData(n) => &n.common,
            CompiledNode::AnyXml(n) => &n.common,
            CompiledNode::Rpc(n) => &n.common,
            CompiledNode::Action(n) => &n.common,
            CompiledNode::Notification(n) => &n.common,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    /// Children of a container/list/case/notification; empty for terminal
    /// nodes (leaf/leaf-list/any) and for rpc/action (use `.input`/`.output`).
    pub fn children(&self) -> &[CompiledNode] {
        match self {
            CompiledNode::Container(n) => &n.children,
            CompiledNode::List(n) => &n.children,
            CompiledNode::Notification(n) => &n.children,
            _ => &[],
        }
    }

    pub fn child(&self, name: &str) -> Option<&CompiledNode> {
        self.children().iter().find(|c| c.name() == name)
    }
}

/// Per-module compile-time environment: the flat typedef and grouping
/// namespaces (this compiler does not model full RFC 7950 lexical scoping —
/// nested typedefs/groupings are folded into one module-wide namespace, the
/// common case for real-world modules; see DESIGN.md).
pub struct Env<'a> {
    pub module_name: String,
    pub typedefs: HashMap<String, Typedef>,
    pub groupings: HashMap<String, &'a GroupingNode>,
    pub is_feature_enabled: &'a dyn Fn(&str) -> bool,
}

impl<'a> Env<'a> {
    fn lookup_typedef(&self, name: &str) -> Option<Typedef> {
        self.typedefs.get(name).cloned()
    }

    fn compile_type(&self, parsed: &yang2_parse::ast::ParsedType) -> Result<CompiledType> {
        compile_type(parsed, &|n| self.lookup_typedef(n), &mut std::collections::HashSet::new())
    }
}

fn collect_typedefs(module: &ParsedModule) -> HashMap<String, Typedef> {
    let mut map = HashMap::new();
    fn walk_grouping(g: &GroupingNode, map: &mut HashMap<String, Typedef>) {
        for t in &g.typedefs {
            map.insert(t.name.clone(), t.clone());
        }
        for g2 in &g.groupings {
            walk_grouping(g2, map);
        }
    }
    fn walk_node(n: &SchemaNode, map: &mut HashMap<String, Typedef>) {
        match n {
            SchemaNode::Container(c) => {
                for t in &c.typedefs {
                    map.insert(t.name.clone(), t.clone());
                }
                for g in &c.groupings {
                    walk_grouping(g, map);
                }
                for child in &c.children {
                    walk_node(child, map);
                }
            }
            SchemaNode::List(l) => {
                for t in &l.typedefs {
                    map.insert(t.name.clone(), t.clone());
                }
                for g in &l.groupings {
                    walk_grouping(g, map);
                }
                for child in &l.children {
                    walk_node(child, map);
                }
            }
            _ => {}
        }
    }
    for t in &module.typedefs {
        map.insert(t.name.clone(), t.clone());
    }
    for g in &module.groupings {
        walk_grouping(g, &mut map);
    }
    for n in &module.body {
        walk_node(n, &mut map);
    }
    map
}

fn collect_groupings(module: &ParsedModule) -> HashMap<String, &GroupingNode> {
    let mut map = HashMap::new();
    fn walk(g: &GroupingNode, map: &mut HashMap<String, &GroupingNode>) {
        map.insert(g.name.clone(), g);
        for g2 in &g.groupings {
            walk(g2, map);
        }
    }
    for g in &module.groupings {
        walk(g, &mut map);
    }
    fn walk_node<'a>(n: &'a SchemaNode, map: &mut HashMap<String, &'a GroupingNode>) {
        match n {
            SchemaNode::Container(c) => {
                for g in &c.groupings {
                    walk(g, map);
                }
                for child in &c.children {
                    walk_node(child, map);
                }
            }
            SchemaNode::List(l) => {
                for g in &l.groupings {
                    walk(g, map);
                }
                for child in &l.children {
                    walk_node(child, map);
                }
            }
            _ => {}
        }
    }
    for n in &module.body {
        walk_node(n, &mut map);
    }
    map
}

pub fn build_env<'a>(module_name: &str, module: &'a ParsedModule, is_feature_enabled: &'a dyn Fn(&str) -> bool) -> Env<'a> {
    Env { module_name: module_name.to_string(), typedefs: collect_typedefs(module), groupings: collect_groupings(module), is_feature_enabled }
}

fn resolve_config(explicit: ConfigFlag, inherited: bool) -> bool {
    match explicit {
        ConfigFlag::True => true,
        ConfigFlag::False => false,
        ConfigFlag::Inherit => inherited,
    }
}

fn common(raw: &SchemaNodeCommon, env: &Env, inherited_config: bool, path: &SchemaPath) -> Result<(CompiledCommon, bool)> {
    let mut path = path.clone();
    if path.is_empty() {
        path.push(&env.module_name, &raw.name);
    } else {
        path.push_child(&raw.name);
    }
    let config = resolve_config(raw.config, inherited_config);
    let common = CompiledCommon { name: raw.name.clone(), status: raw.status, config, description: raw.description.clone(), reference: raw.reference.clone(), path };
    Ok((common, config))
}

fn is_enabled(if_features: &[String], env: &Env) -> Result<bool> {
    all_satisfied(if_features, env.is_feature_enabled)
}

/// Compiles a sibling list, expanding `uses`, pruning disabled `if-feature`
/// nodes, and flattening shorthand/explicit `case` wrappers as normal
/// children of their `choice` (spec.md §4.6 step 6).
pub fn compile_children(nodes: &[SchemaNode], env: &Env, inherited_config: bool, path: &SchemaPath) -> Result<Vec<CompiledNode>> {
    let mut out = Vec::new();
    for node in nodes {
        if !is_enabled(&node.common().if_features, env)? {
            log::debug!("pruning '{}': a guarding if-feature is not enabled", node.name());
            continue;
        }
        match node {
            SchemaNode::Uses(u) => out.extend(compile_uses(u, env, inherited_config, path)?),
            // Top-level augments are not data-node children; the compile
            // pipeline applies them separately once the whole tree exists
            // (spec.md §4.6 step 7), after every other node is in place.
            SchemaNode::Augment(_) => {}
            other => out.push(compile_node(other, env, inherited_config, path)?),
        }
    }
    check_unique_names(&out, path)?;
    Ok(out)
}

fn check_unique_names(nodes: &[CompiledNode], path: &SchemaPath) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for n in nodes {
        if !seen.insert(n.name()) {
            return Err(YangError::with_path(ErrorKind::Validation, format!("duplicate child name '{}' under the same parent", n.name()), path.clone()));
        }
    }
    Ok(())
}

fn compile_node(node: &SchemaNode, env: &Env, inherited_config: bool, path: &SchemaPath) -> Result<CompiledNode> {
    match node {
        SchemaNode::Container(c) => compile_container(c, env, inherited_config, path),
        SchemaNode::List(l) => compile_list(l, env, inherited_config, path),
        SchemaNode::Leaf(l) => compile_leaf(l, env, inherited_config, path),
        SchemaNode::LeafList(l) => compile_leaf_list(l, env, inherited_config, path),
        SchemaNode::Choice(c) => compile_choice(c, env, inherited_config, path),
        SchemaNode::AnyData(a) => compile_any(a, env, inherited_config, path).map(CompiledNode::AnyData),
        SchemaNode::AnyXml(a) => compile_any(a, env, inherited_config, path).map(CompiledNode::AnyXml),
        SchemaNode::Rpc(r) => compile_rpc(r, env, path).map(CompiledNode::Rpc),
        SchemaNode::Action(r) => compile_rpc(r, env, path).map(CompiledNode::Action),
        SchemaNode::Notification(n) => compile_notification(n, env, path),
        SchemaNode::Augment(_) => Err(YangError::with_path(ErrorKind::Internal, "a top-level augment must be applied after the tree is built, not compiled as a plain child", path.clone())),
        SchemaNode::Uses(_) => unreachable!("uses is expanded by compile_children before reaching compile_node"),
        SchemaNode::Grouping(_) | SchemaNode::Case(_) => unreachable!("grouping/case definitions are not data nodes and never appear in a children list"),
    }
}

fn compile_container(c: &ContainerNode, env: &Env, inherited_config: bool, path: &SchemaPath) -> Result<CompiledNode> {
    let (common, config) = common(&c.common, env, inherited_config, path)?;
    let children = compile_children(&c.children, env, config, &common.path)?;
    Ok(CompiledNode::Container(CompiledContainer { common, presence: c.presence.clone(), children }))
}

fn compile_list(l: &ListNode, env: &Env, inherited_config: bool, path: &SchemaPath) -> Result<CompiledNode> {
    let (common, config) = common(&l.common, env, inherited_config, path)?;
    let children = compile_children(&l.children, env, config, &common.path)?;
    Ok(CompiledNode::List(CompiledList { common, key: l.key.clone(), uniques: l.uniques.clone(), min_elements: l.min_elements, max_elements: l.max_elements, ordered_by: l.ordered_by, children }))
}

fn compile_leaf(l: &LeafNode, env: &Env, inherited_config: bool, path: &SchemaPath) -> Result<CompiledNode> {
    let (common, _) = common(&l.common, env, inherited_config, path)?;
    let type_ = env.compile_type(&l.type_).map_err(|e| e.attach_path(common.path.clone()))?;
    Ok(CompiledNode::Leaf(CompiledLeaf { common, type_, units: l.units.clone(), default: l.default.clone(), mandatory: l.mandatory }))
}

fn compile_leaf_list(l: &LeafListNode, env: &Env, inherited_config: bool, path: &SchemaPath) -> Result<CompiledNode> {
    let (common, _) = common(&l.common, env, inherited_config, path)?;
    let type_ = env.compile_type(&l.type_).map_err(|e| e.attach_path(common.path.clone()))?;
    Ok(CompiledNode::LeafList(CompiledLeafList { common, type_, units: l.units.clone(), defaults: l.defaults.clone(), min_elements: l.min_elements, max_elements: l.max_elements, ordered_by: l.ordered_by }))
}

fn compile_choice(c: &ChoiceNode, env: &Env, inherited_config: bool, path: &SchemaPath) -> Result<CompiledNode> {
    let (common, config) = common(&c.common, env, inherited_config, path)?;
    let mut cases = Vec::new();
    for case in &c.cases {
        if !is_enabled(&case.common.if_features, env)? {
            continue;
        }
        let (case_common, _) = common(&case.common, env, config, &common.path)?;
        let children = compile_children(&case.children, env, config, &case_common.path)?;
        cases.push(CompiledCase { common: case_common, children });
    }
    Ok(CompiledNode::Choice(CompiledChoice { common, default: c.default.clone(), mandatory: c.mandatory, cases }))
}

fn compile_any(a: &AnyNode, env: &Env, inherited_config: bool, path: &SchemaPath) -> Result<CompiledAny> {
    let (common, _) = common(&a.common, env, inherited_config, path)?;
    Ok(CompiledAny { common, mandatory: a.mandatory })
}

fn compile_input_output(io: &InputOutputNode, env: &Env, path: &SchemaPath) -> Result<Vec<CompiledNode>> {
    compile_children(&io.children, env, true, path)
}

fn compile_rpc(r: &RpcNode, env: &Env, path: &SchemaPath) -> Result<CompiledRpc> {
    let (common, _) = common(&r.common, env, true, path)?;
    let input = match &r.input {
        Some(io) => compile_input_output(io, env, &common.path)?,
        None => Vec::new(),
    };
    let output = match &r.output {
        Some(io) => compile_input_output(io, env, &common.path)?,
        None => Vec::new(),
    };
    Ok(CompiledRpc { common, input, output })
}

fn compile_notification(n: &NotificationNode, env: &Env, path: &SchemaPath) -> Result<CompiledNode> {
    let (common, _) = common(&n.common, env, true, path)?;
    let children = compile_children(&n.children, env, true, &common.path)?;
    Ok(CompiledNode::Notification(CompiledNotification { common, children }))
}

/// Expands a `uses` statement: looks up the named grouping, compiles its
/// body under the `uses`' own parent/config context, then applies `refine`
/// and uses-scoped `augment` clauses (spec.md §4.6 step 6).
fn compile_uses(u: &UsesNode, env: &Env, inherited_config: bool, path: &SchemaPath) -> Result<Vec<CompiledNode>> {
    let grouping = env.groupings.get(u.grouping_name.as_str()).copied().ok_or_else(|| YangError::with_path(ErrorKind::Unresolved, format!("'uses {}' does not name a known grouping", u.grouping_name), path.clone()))?;
    let mut children = compile_children(&grouping.children, env, inherited_config, path)?;
    for refine in &u.refines {
        apply_refine(&mut children, refine)?;
    }
    for augment in &u.augments {
        apply_augment_to(&mut children, &augment.target_path, &augment.children, env)?;
    }
    Ok(children)
}

fn split_target_path(target: &str) -> Vec<String> {
    target.trim_start_matches('/').split('/').filter(|s| !s.is_empty()).map(|seg| seg.rsplit_once(':').map(|(_, n)| n.to_string()).unwrap_or_else(|| seg.to_string())).collect()
}

fn find_mut<'a>(nodes: &'a mut [CompiledNode], name: &str) -> Option<&'a mut CompiledNode> {
    nodes.iter_mut().find(|n| n.name() == name)
}

fn children_mut(node: &mut CompiledNode) -> Option<&mut Vec<CompiledNode>> {
    match node {
        CompiledNode::Container(c) => Some(&mut c.children),
        CompiledNode::List(l) => Some(&mut l.children),
        CompiledNode::Notification(n) => Some(&mut n.children),
        _ => None,
    }
}

fn apply_refine(children: &mut [CompiledNode], refine: &yang2_parse::ast::Refine) -> Result<()> {
    let segments = split_target_path(&refine.target);
    let mut current: &mut [CompiledNode] = children;
    let mut target: Option<&mut CompiledNode> = None;
    for (i, seg) in segments.iter().enumerate() {
        let found = find_mut(current, seg).ok_or_else(|| YangError::validation(format!("refine target '{}' not found", refine.target)))?;
        if i == segments.len() - 1 {
            target = Some(found);
            break;
        }
        current = children_mut(found).ok_or_else(|| YangError::validation(format!("refine target '{}' does not name a container/list ancestor", refine.target)))?;
    }
    let target = target.ok_or_else(|| YangError::validation(format!("refine target '{}' not found", refine.target)))?;
    if let Some(config) = refine.config {
        match target {
            CompiledNode::Container(n) => n.common.config = resolve_config(config, n.common.config),
            CompiledNode::List(n) => n.common.config = resolve_config(config, n.common.config),
            CompiledNode::Leaf(n) => n.common.config = resolve_config(config, n.common.config),
            CompiledNode::LeafList(n) => n.common.config = resolve_config(config, n.common.config),
            _ => {}
        }
    }
    if let Some(description) = &refine.description {
        set_description(target, description.clone());
    }
    if let Some(mandatory) = refine.mandatory {
        set_mandatory(target, mandatory);
    }
    if let (CompiledNode::Container(n), Some(presence)) = (&mut *target, &refine.presence) {
        n.presence = Some(presence.clone());
    }
    Ok(())
}

fn set_description(node: &mut CompiledNode, description: String) {
    match node {
        CompiledNode::Container(n) => n.common.description = Some(description),
        CompiledNode::List(n) => n.common.description = Some(description),
        CompiledNode::Leaf(n) => n.common.description = Some(description),
        CompiledNode::LeafList(n) => n.common.description = Some(description),
        CompiledNode::Choice(n) => n.common.description = Some(description),
        CompiledNode::AnyData(n) => n.common.description = Some(description),
        CompiledNode::AnyXml(n) => n.common.description = Some(description),
        _ => {}
    }
}

fn set_mandatory(node: &mut CompiledNode, mandatory: bool) {
    match node {
        CompiledNode::Leaf(n) => n.mandatory = mandatory,
        CompiledNode::Choice(n) => n.mandatory = mandatory,
        CompiledNode::AnyData(n) => n.mandatory = mandatory,
        CompiledNode::AnyXml(n) => n.mandatory = mandatory,
        _ => {}
    }
}

/// Grafts `new_children` into the node found by walking `target` from
/// `roots`, rejecting name conflicts (spec.md §4.6 step 7, scoped here to a
/// single `uses`' augment clause rather than the top-level body).
fn apply_augment_to(roots: &mut [CompiledNode], target: &str, new_children: &[SchemaNode], env: &Env) -> Result<()> {
    let segments = split_target_path(target);
    if segments.is_empty() {
        return Err(YangError::validation("an augment target path must name at least one node"));
    }
    let mut current: &mut [CompiledNode] = roots;
    for (i, seg) in segments.iter().enumerate() {
        let found = find_mut(current, seg).ok_or_else(|| YangError::new(ErrorKind::Unresolved, format!("augment target '{}' not found", target)))?;
        if i == segments.len() - 1 {
            let config = found.common().config;
            let found_path = found.common().path.clone();
            let compiled_new = compile_children(new_children, env, config, &found_path)?;
            let sink = children_mut(found).ok_or_else(|| YangError::validation(format!("augment target '{}' does not name an augmentable node", target)))?;
            for child in compiled_new {
                if sink.iter().any(|c| c.name() == child.name()) {
                    return Err(YangError::validation(format!("augment target '{}' already has a child named '{}'", target, child.name())));
                }
                sink.push(child);
            }
            return Ok(());
        }
        current = children_mut(found).ok_or_else(|| YangError::validation(format!("augment target '{}' does not name an augmentable node", target)))?;
    }
    Ok(())
}

pub fn apply_top_level_augments(body: &mut Vec<CompiledNode>, augments: &[AugmentNode], env: &Env) -> Result<()> {
    for augment in augments {
        if !is_enabled(&augment.common.if_features, env)? {
            continue;
        }
        let segments = split_target_path(&augment.target_path);
        if segments.is_empty() {
            return Err(YangError::validation("an augment target path must name at least one node"));
        }
        let mut current = body.as_mut_slice();
        for (i, seg) in segments.iter().enumerate() {
            let found = find_mut(current, seg).ok_or_else(|| YangError::new(ErrorKind::Unresolved, format!("augment target '{}' not found", augment.target_path)))?;
            if i == segments.len() - 1 {
                let config = found.common().config;
                let path = found.common().path.clone();
                let new_children = compile_children(&augment.children, env, config, &path)?;
                let sink = children_mut(found).ok_or_else(|| YangError::validation(format!("augment target '{}' does not name an augmentable node", augment.target_path)))?;
                for child in new_children {
                    if sink.iter().any(|c| c.name() == child.name()) {
                        return Err(YangError::validation(format!("augment target '{}' already has a child named '{}'", augment.target_path, child.name())));
                    }
                    sink.push(child);
                }
                break;
            }
            current = children_mut(found).ok_or_else(|| YangError::validation(format!("augment target '{}' does not name an augmentable node", augment.target_path)))?;
        }
    }
    Ok(())
}

pub fn apply_deviations(body: &mut Vec<CompiledNode>, deviations: &[Deviation], strict: bool) -> Result<()> {
    for deviation in deviations {
        let segments = split_target_path(&deviation.target_path);
        if segments.is_empty() {
            continue;
        }
        let (parent_segments, last) = segments.split_at(segments.len() - 1);
        let last = &last[0];
        let mut current = body.as_mut_slice();
        let mut missing = false;
        for seg in parent_segments {
            match find_mut(current, seg) {
                Some(found) => current = children_mut(found).unwrap_or(&mut []),
                None => {
                    missing = true;
                    break;
                }
            }
        }
        if missing || find_mut(current, last).is_none() {
            if strict {
                return Err(YangError::new(ErrorKind::Denied, format!("deviation target '{}' not found", deviation.target_path)));
            }
            continue;
        }
        for deviate in &deviation.deviates {
            apply_deviate(current, last, deviate)?;
        }
    }
    Ok(())
}

fn set_config(node: &mut CompiledNode, config: ConfigFlag) {
    match node {
        CompiledNode::Container(n) => n.common.config = resolve_config(config, n.common.config),
        CompiledNode::List(n) => n.common.config = resolve_config(config, n.common.config),
        CompiledNode::Leaf(n) => n.common.config = resolve_config(config, n.common.config),
        CompiledNode::LeafList(n) => n.common.config = resolve_config(config, n.common.config),
        _ => {}
    }
}

/// `deviate add`: introduces a property the target does not already carry
/// (RFC 7950 §7.20.3.2, "it is an error... if the property already exists").
/// Only checked for the properties this tree represents as an `Option`
/// (`presence`, `default`) — `config`/`mandatory` are resolved booleans with
/// no representable "absent" state, so they are applied unconditionally.
fn apply_deviate_add(node: &mut CompiledNode, name: &str, props: &yang2_parse::ast::DeviateProps) -> Result<()> {
    if let Some(config) = props.config {
        set_config(node, config);
    }
    if let Some(mandatory) = props.mandatory {
        set_mandatory(node, mandatory);
    }
    if let Some(presence) = &props.presence {
        if let CompiledNode::Container(n) = node {
            if n.presence.is_some() {
                return Err(YangError::validation(format!("deviate add on '{}' cannot add 'presence': it is already present", name)));
            }
            n.presence = Some(presence.clone());
        }
    }
    if let Some(default) = props.defaults.first() {
        if let CompiledNode::Leaf(n) = node {
            if n.default.is_some() {
                return Err(YangError::validation(format!("deviate add on '{}' cannot add 'default': it is already present", name)));
            }
            n.default = Some(default.clone());
        }
    }
    Ok(())
}

/// `deviate replace`: unconditionally overwrites an existing property value
/// (RFC 7950 §7.20.3.4), no conflict detection.
fn apply_deviate_replace(node: &mut CompiledNode, props: &yang2_parse::ast::DeviateProps) {
    if let Some(config) = props.config {
        set_config(node, config);
    }
    if let Some(mandatory) = props.mandatory {
        set_mandatory(node, mandatory);
    }
    if let (CompiledNode::Container(n), Some(presence)) = (&mut *node, &props.presence) {
        n.presence = Some(presence.clone());
    }
    if let CompiledNode::Leaf(n) = node {
        if let Some(default) = props.defaults.first() {
            n.default = Some(default.clone());
        }
    }
}

fn apply_deviate(siblings: &mut Vec<CompiledNode>, name: &str, deviate: &Deviate) -> Result<()> {
    match deviate {
        Deviate::NotSupported => {
            siblings.retain(|n| n.name() != name);
        }
        Deviate::Add(props) => {
            if let Some(node) = find_mut(siblings, name) {
                apply_deviate_add(node, name, props)?;
            }
        }
        Deviate::Replace(props) => {
            if let Some(node) = find_mut(siblings, name) {
                apply_deviate_replace(node, props);
            }
        }
        Deviate::Delete(props) => {
            if let Some(node) = find_mut(siblings, name) {
                if let CompiledNode::Container(n) = node {
                    if props.presence.is_some() {
                        n.presence = None;
                    }
                }
                if let CompiledNode::Leaf(n) = node {
                    if !props.defaults.is_empty() {
                        n.default = None;
                    }
                }
            }
        }
    }
    Ok(())
}
