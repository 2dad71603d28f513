//! Typed parsed-tree structures (spec.md §3 "Data model", §4.3 output).
//!
//! [`builder::lower`] turns a [`crate::tree::RawStatement`] tree, already
//! validated against the sub-statement rules, into these typed records. This
//! is the "parsed tree rooted at a Module or Submodule record" spec.md §4.3
//! describes as C3's output.

/// `current | deprecated | obsolete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Current,
    Deprecated,
    Obsolete,
}

/// The tri-state `config` flag: explicit true/false, or inherited from the
/// nearest ancestor that sets it (defaulting to `true` at the root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFlag {
    #[default]
    Inherit,
    True,
    False,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderedBy {
    #[default]
    System,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxElements {
    Unbounded,
    Bounded(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YangVersion {
    V1_0,
    V1_1,
}

impl YangVersion {
    pub fn is_1_1(self) -> bool {
        matches!(self, YangVersion::V1_1)
    }
}

/// An unresolved extension-instance statement, kept generic since the set
/// of extension keywords is open (spec.md §4.3).
#[derive(Debug, Clone)]
pub struct ExtensionInstance {
    pub prefix: String,
    pub name: String,
    pub argument: Option<String>,
    pub children: Vec<ExtensionInstance>,
}

#[derive(Debug, Clone)]
pub struct MustCondition {
    pub expression: String,
    pub error_message: Option<String>,
    pub error_app_tag: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PatternRestriction {
    pub text: String,
    pub invert_match: bool,
}

#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: String,
    pub value: Option<i64>,
    pub status: Status,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BitMember {
    pub name: String,
    pub position: Option<u32>,
    pub status: Status,
    pub description: Option<String>,
    pub reference: Option<String>,
}

/// Type descriptor (parsed) — spec.md §3: "a name (possibly prefixed), and
/// an unresolved bag of restrictions."
#[derive(Debug, Clone, Default)]
pub struct ParsedType {
    pub name: String,
    pub range: Option<String>,
    pub length: Option<String>,
    pub patterns: Vec<PatternRestriction>,
    pub fraction_digits: Option<u8>,
    pub enums: Vec<EnumMember>,
    pub bits: Vec<BitMember>,
    pub path: Option<String>,
    pub base_identities: Vec<String>,
    pub require_instance: Option<bool>,
    pub nested: Vec<Typedef>,
    /// This type's own `type` substatements — populated only for `union`,
    /// where each member is itself a full type descriptor (spec.md §4.5
    /// "Union").
    pub members: Vec<ParsedType>,
}

#[derive(Debug, Clone)]
pub struct Typedef {
    pub name: String,
    pub type_: ParsedType,
    pub units: Option<String>,
    pub default: Option<String>,
    pub status: Status,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SchemaNodeCommon {
    pub name: String,
    pub status: Status,
    pub config: ConfigFlag,
    pub when: Option<String>,
    pub if_features: Vec<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub extensions: Vec<ExtensionInstance>,
}

#[derive(Debug, Clone)]
pub struct ContainerNode {
    pub common: SchemaNodeCommon,
    pub presence: Option<String>,
    pub musts: Vec<MustCondition>,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<GroupingNode>,
    pub children: Vec<SchemaNode>,
}

#[derive(Debug, Clone)]
pub struct ListNode {
    pub common: SchemaNodeCommon,
    pub key: Option<String>,
    pub uniques: Vec<String>,
    pub musts: Vec<MustCondition>,
    pub min_elements: u32,
    pub max_elements: MaxElements,
    pub ordered_by: OrderedBy,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<GroupingNode>,
    pub children: Vec<SchemaNode>,
}

#[derive(Debug, Clone)]
pub struct LeafNode {
    pub common: SchemaNodeCommon,
    pub type_: ParsedType,
    pub units: Option<String>,
    pub musts: Vec<MustCondition>,
    pub default: Option<String>,
    pub mandatory: bool,
}

#[derive(Debug, Clone)]
pub struct LeafListNode {
    pub common: SchemaNodeCommon,
    pub type_: ParsedType,
    pub units: Option<String>,
    pub musts: Vec<MustCondition>,
    pub defaults: Vec<String>,
    pub min_elements: u32,
    pub max_elements: MaxElements,
    pub ordered_by: OrderedBy,
}

#[derive(Debug, Clone)]
pub struct CaseNode {
    pub common: SchemaNodeCommon,
    /// `true` when this case was not written explicitly (a data node
    /// appeared directly under `choice` — the "shorthand case" form).
    pub implicit: bool,
    pub children: Vec<SchemaNode>,
}

#[derive(Debug, Clone)]
pub struct ChoiceNode {
    pub common: SchemaNodeCommon,
    pub default: Option<String>,
    pub mandatory: bool,
    pub cases: Vec<CaseNode>,
}

#[derive(Debug, Clone)]
pub struct AnyNode {
    pub common: SchemaNodeCommon,
    pub musts: Vec<MustCondition>,
    pub mandatory: bool,
}

#[derive(Debug, Clone)]
pub struct Refine {
    pub target: String,
    pub if_features: Vec<String>,
    pub musts: Vec<MustCondition>,
    pub presence: Option<String>,
    pub defaults: Vec<String>,
    pub config: Option<ConfigFlag>,
    pub mandatory: Option<bool>,
    pub min_elements: Option<u32>,
    pub max_elements: Option<MaxElements>,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UsesNode {
    pub common: SchemaNodeCommon,
    pub grouping_name: String,
    pub refines: Vec<Refine>,
    pub augments: Vec<AugmentNode>,
}

#[derive(Debug, Clone)]
pub struct GroupingNode {
    pub common: SchemaNodeCommon,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<GroupingNode>,
    pub children: Vec<SchemaNode>,
}

#[derive(Debug, Clone)]
pub struct InputOutputNode {
    pub musts: Vec<MustCondition>,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<GroupingNode>,
    pub children: Vec<SchemaNode>,
}

#[derive(Debug, Clone)]
pub struct RpcNode {
    pub common: SchemaNodeCommon,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<GroupingNode>,
    pub input: Option<InputOutputNode>,
    pub output: Option<InputOutputNode>,
}

#[derive(Debug, Clone)]
pub struct NotificationNode {
    pub common: SchemaNodeCommon,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<GroupingNode>,
    pub children: Vec<SchemaNode>,
}

#[derive(Debug, Clone)]
pub struct AugmentNode {
    pub common: SchemaNodeCommon,
    pub target_path: String,
    pub children: Vec<SchemaNode>,
}

/// A variant over the schema-node set of spec.md §3.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    Container(ContainerNode),
    List(ListNode),
    Leaf(LeafNode),
    LeafList(LeafListNode),
    Choice(ChoiceNode),
    Case(CaseNode),
    AnyData(AnyNode),
    AnyXml(AnyNode),
    Uses(UsesNode),
    Grouping(GroupingNode),
    Rpc(RpcNode),
    Action(RpcNode),
    Notification(NotificationNode),
    Augment(AugmentNode),
}

impl SchemaNode {
    pub fn common(&self) -> &SchemaNodeCommon {
        match self {
            SchemaNode::Container(n) => &n.common,
            SchemaNode::List(n) => &n.common,
            SchemaNode::Leaf(n) => &n.common,
            SchemaNode::LeafList(n) => &n.common,
            SchemaNode::Choice(n) => &n.common,
            SchemaNode::Case(n) => &n.common,
            SchemaNode::AnyData(n) => &n.common,
            SchemaNode::AnyXml(n) => &n.common,
            SchemaNode::Uses(n) => &n.common,
            SchemaNode::Grouping(n) => &n.common,
            SchemaNode::Rpc(n) => &n.common,
            SchemaNode::Action(n) => &n.common,
            SchemaNode::Notification(n) => &n.common,
            SchemaNode::Augment(n) => &n.common,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }
}

#[derive(Debug, Clone)]
pub struct Revision {
    pub date: String,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Import {
    pub module: String,
    pub prefix: String,
    pub revision_date: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Include {
    pub submodule: String,
    pub revision_date: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Identity {
    pub name: String,
    pub bases: Vec<String>,
    pub if_features: Vec<String>,
    pub status: Status,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Feature {
    pub name: String,
    pub if_features: Vec<String>,
    pub status: Status,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ExtensionDef {
    pub name: String,
    /// `(argument-name, yin-element)`.
    pub argument: Option<(String, bool)>,
    pub status: Status,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DeviateProps {
    pub type_: Option<ParsedType>,
    pub units: Option<String>,
    pub musts: Vec<MustCondition>,
    pub uniques: Vec<String>,
    pub defaults: Vec<String>,
    pub config: Option<ConfigFlag>,
    pub mandatory: Option<bool>,
    pub min_elements: Option<u32>,
    pub max_elements: Option<MaxElements>,
    pub presence: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Deviate {
    NotSupported,
    Add(DeviateProps),
    Replace(DeviateProps),
    Delete(DeviateProps),
}

#[derive(Debug, Clone)]
pub struct Deviation {
    pub target_path: String,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub deviates: Vec<Deviate>,
}

/// A fully lowered, but not yet compiled, module (spec.md §3 "Module").
#[derive(Debug, Clone)]
pub struct ParsedModule {
    pub name: String,
    pub namespace: String,
    pub prefix: String,
    pub yang_version: YangVersion,
    pub organization: Option<String>,
    pub contact: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub revisions: Vec<Revision>,
    pub imports: Vec<Import>,
    pub includes: Vec<Include>,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<GroupingNode>,
    pub identities: Vec<Identity>,
    pub features: Vec<Feature>,
    pub extensions: Vec<ExtensionDef>,
    pub deviations: Vec<Deviation>,
    pub body: Vec<SchemaNode>,
}

impl ParsedModule {
    /// The most recent revision by declared date, per spec.md §9's Open
    /// Question resolution (compiled form sorts revisions descending).
    pub fn latest_revision(&self) -> Option<&Revision> {
        self.revisions.iter().max_by(|a, b| a.date.cmp(&b.date))
    }
}

/// Like [`ParsedModule`] but identified by `belongs-to` rather than owning a
/// namespace/prefix of its own (spec.md §3 "Submodule").
#[derive(Debug, Clone)]
pub struct ParsedSubmodule {
    pub name: String,
    pub belongs_to: String,
    pub belongs_to_prefix: String,
    pub yang_version: YangVersion,
    pub organization: Option<String>,
    pub contact: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub revisions: Vec<Revision>,
    pub imports: Vec<Import>,
    pub includes: Vec<Include>,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<GroupingNode>,
    pub identities: Vec<Identity>,
    pub features: Vec<Feature>,
    pub extensions: Vec<ExtensionDef>,
    pub deviations: Vec<Deviation>,
    pub body: Vec<SchemaNode>,
}
