//! Lowers a validated [`RawStatement`] tree into the typed [`crate::ast`]
//! records (spec.md §4.3's "parsed tree rooted at a Module or Submodule").

use yang2_base::{Result, YangError};
use yang2_lexicon::{Keyword, KeywordOrCustom};

use crate::ast::*;
use crate::tree::RawStatement;

fn text_of(stmt: &RawStatement) -> String {
    stmt.argument.clone().unwrap_or_default()
}

fn child_text(stmt: &RawStatement, keyword: Keyword) -> Option<String> {
    stmt.child_of(keyword).and_then(|c| c.argument.clone())
}

fn status_of(stmt: &RawStatement) -> Status {
    match child_text(stmt, Keyword::Status).as_deref() {
        Some("deprecated") => Status::Deprecated,
        Some("obsolete") => Status::Obsolete,
        _ => Status::Current,
    }
}

fn config_of(stmt: &RawStatement) -> ConfigFlag {
    match child_text(stmt, Keyword::Config).as_deref() {
        Some("true") => ConfigFlag::True,
        Some("false") => ConfigFlag::False,
        _ => ConfigFlag::Inherit,
    }
}

fn bool_child(stmt: &RawStatement, keyword: Keyword) -> Option<bool> {
    match child_text(stmt, keyword).as_deref() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

fn u32_child(stmt: &RawStatement, keyword: Keyword) -> Result<Option<u32>> {
    match child_text(stmt, keyword) {
        Some(text) => text
            .parse::<u32>()
            .map(Some)
            .map_err(|_| YangError::validation(format!("'{}' is not a valid unsigned integer", keyword_label(keyword)))),
        None => Ok(None),
    }
}

fn keyword_label(keyword: Keyword) -> String {
    format!("{:?}", keyword)
}

fn max_elements_child(stmt: &RawStatement) -> Result<MaxElements> {
    match child_text(stmt, Keyword::MaxElements) {
        None => Ok(MaxElements::Unbounded),
        Some(text) if text == "unbounded" => Ok(MaxElements::Unbounded),
        Some(text) => text
            .parse::<u32>()
            .map(MaxElements::Bounded)
            .map_err(|_| YangError::validation("'max-elements' is not a valid bound")),
    }
}

fn ordered_by_child(stmt: &RawStatement) -> OrderedBy {
    match child_text(stmt, Keyword::OrderedBy).as_deref() {
        Some("user") => OrderedBy::User,
        _ => OrderedBy::System,
    }
}

fn if_features(stmt: &RawStatement) -> Vec<String> {
    stmt.children_of(Keyword::IfFeature).filter_map(|c| c.argument.clone()).collect()
}

fn musts(stmt: &RawStatement) -> Vec<MustCondition> {
    stmt.children_of(Keyword::Must)
        .map(|m| MustCondition {
            expression: text_of(m),
            error_message: child_text(m, Keyword::ErrorMessage),
            error_app_tag: child_text(m, Keyword::ErrorAppTag),
            description: child_text(m, Keyword::Description),
            reference: child_text(m, Keyword::Reference),
        })
        .collect()
}

fn common(stmt: &RawStatement) -> SchemaNodeCommon {
    SchemaNodeCommon {
        name: text_of(stmt),
        status: status_of(stmt),
        config: config_of(stmt),
        when: child_text(stmt, Keyword::When),
        if_features: if_features(stmt),
        description: child_text(stmt, Keyword::Description),
        reference: child_text(stmt, Keyword::Reference),
        extensions: extension_instances(stmt),
    }
}

fn extension_instances(stmt: &RawStatement) -> Vec<ExtensionInstance> {
    stmt.children.iter().filter_map(lower_extension_instance).collect()
}

fn lower_extension_instance(stmt: &RawStatement) -> Option<ExtensionInstance> {
    match &stmt.keyword {
        KeywordOrCustom::Custom { prefix, name } => Some(ExtensionInstance {
            prefix: prefix.clone(),
            name: name.clone(),
            argument: stmt.argument.clone(),
            children: stmt.children.iter().filter_map(lower_extension_instance).collect(),
        }),
        _ => None,
    }
}

fn lower_pattern(stmt: &RawStatement) -> PatternRestriction {
    PatternRestriction { text: text_of(stmt), invert_match: matches!(child_text(stmt, Keyword::Modifier).as_deref(), Some("invert-match")) }
}

fn lower_enum_member(stmt: &RawStatement) -> Result<EnumMember> {
    let value = match child_text(stmt, Keyword::Value) {
        Some(text) => Some(text.parse::<i64>().map_err(|_| YangError::validation("'value' is not a valid integer"))?),
        None => None,
    };
    Ok(EnumMember {
        name: text_of(stmt),
        value,
        status: status_of(stmt),
        description: child_text(stmt, Keyword::Description),
        reference: child_text(stmt, Keyword::Reference),
    })
}

fn lower_bit_member(stmt: &RawStatement) -> Result<BitMember> {
    let position = match child_text(stmt, Keyword::Position) {
        Some(text) => Some(text.parse::<u32>().map_err(|_| YangError::validation("'position' is not a valid unsigned integer"))?),
        None => None,
    };
    Ok(BitMember {
        name: text_of(stmt),
        position,
        status: status_of(stmt),
        description: child_text(stmt, Keyword::Description),
        reference: child_text(stmt, Keyword::Reference),
    })
}

fn lower_type(stmt: &RawStatement) -> Result<ParsedType> {
    let mut patterns = Vec::new();
    let mut enums = Vec::new();
    let mut bits = Vec::new();
    let mut nested = Vec::new();
    for child in stmt.children_of(Keyword::Pattern) {
        patterns.push(lower_pattern(child));
    }
    for child in stmt.children_of(Keyword::Enum) {
        enums.push(lower_enum_member(child)?);
    }
    for child in stmt.children_of(Keyword::Bit) {
        bits.push(lower_bit_member(child)?);
    }
    for child in stmt.children_of(Keyword::Typedef) {
        nested.push(lower_typedef(child)?);
    }
    let mut members = Vec::new();
    for child in stmt.children_of(Keyword::Type) {
        members.push(lower_type(child)?);
    }
    let fraction_digits = match child_text(stmt, Keyword::FractionDigits) {
        Some(text) => Some(text.parse::<u8>().map_err(|_| YangError::validation("'fraction-digits' is not a valid small integer"))?),
        None => None,
    };
    Ok(ParsedType {
        name: text_of(stmt),
        range: child_text(stmt, Keyword::Range),
        length: child_text(stmt, Keyword::Length),
        patterns,
        fraction_digits,
        enums,
        bits,
        path: child_text(stmt, Keyword::Path),
        base_identities: stmt.children_of(Keyword::Base).filter_map(|c| c.argument.clone()).collect(),
        require_instance: bool_child(stmt, Keyword::RequireInstance),
        nested,
        members,
    })
}

fn lower_typedef(stmt: &RawStatement) -> Result<Typedef> {
    let type_stmt = stmt.child_of(Keyword::Type).ok_or_else(|| YangError::validation("typedef is missing 'type'"))?;
    Ok(Typedef {
        name: text_of(stmt),
        type_: lower_type(type_stmt)?,
        units: child_text(stmt, Keyword::Units),
        default: child_text(stmt, Keyword::Default),
        status: status_of(stmt),
        description: child_text(stmt, Keyword::Description),
        reference: child_text(stmt, Keyword::Reference),
    })
}

fn lower_typedefs(stmt: &RawStatement) -> Result<Vec<Typedef>> {
    stmt.children_of(Keyword::Typedef).map(lower_typedef).collect()
}

fn lower_groupings(stmt: &RawStatement) -> Result<Vec<GroupingNode>> {
    stmt.children_of(Keyword::Grouping).map(lower_grouping).collect()
}

fn lower_grouping(stmt: &RawStatement) -> Result<GroupingNode> {
    Ok(GroupingNode {
        common: common(stmt),
        typedefs: lower_typedefs(stmt)?,
        groupings: lower_groupings(stmt)?,
        children: lower_data_children(stmt)?,
    })
}

const DATA_NODE_KEYWORDS: &[Keyword] = &[
    Keyword::Container,
    Keyword::Leaf,
    Keyword::LeafList,
    Keyword::List,
    Keyword::Choice,
    Keyword::AnyXml,
    Keyword::AnyData,
    Keyword::Uses,
];

/// Lowers every direct data-definition child (in source order), normalizing
/// a bare data node under `choice` into an implicit single-child case.
fn lower_data_children(stmt: &RawStatement) -> Result<Vec<SchemaNode>> {
    let mut out = Vec::new();
    for child in &stmt.children {
        if let KeywordOrCustom::Known(kw) = &child.keyword {
            if DATA_NODE_KEYWORDS.contains(kw) {
                out.push(lower_schema_node(child)?);
            }
        }
    }
    Ok(out)
}

fn lower_case(stmt: &RawStatement) -> Result<CaseNode> {
    Ok(CaseNode { common: common(stmt), implicit: false, children: lower_data_children(stmt)? })
}

fn implicit_case(child: &RawStatement) -> Result<CaseNode> {
    let node = lower_schema_node(child)?;
    Ok(CaseNode { common: SchemaNodeCommon { name: node.name().to_string(), ..common(child) }, implicit: true, children: vec![node] })
}

fn lower_schema_node(stmt: &RawStatement) -> Result<SchemaNode> {
    let keyword = match &stmt.keyword {
        KeywordOrCustom::Known(k) => *k,
        _ => return Err(YangError::internal("lower_schema_node called on a non-keyword statement")),
    };
    Ok(match keyword {
        Keyword::Container => SchemaNode::Container(ContainerNode {
            common: common(stmt),
            presence: child_text(stmt, Keyword::Presence),
            musts: musts(stmt),
            typedefs: lower_typedefs(stmt)?,
            groupings: lower_groupings(stmt)?,
            children: lower_data_children(stmt)?,
        }),
        Keyword::List => SchemaNode::List(ListNode {
            common: common(stmt),
            key: child_text(stmt, Keyword::Key),
            uniques: stmt.children_of(Keyword::Unique).filter_map(|c| c.argument.clone()).collect(),
            musts: musts(stmt),
            min_elements: u32_child(stmt, Keyword::MinElements)?.unwrap_or(0),
            max_elements: max_elements_child(stmt)?,
            ordered_by: ordered_by_child(stmt),
            typedefs: lower_typedefs(stmt)?,
            groupings: lower_groupings(stmt)?,
            children: lower_data_children(stmt)?,
        }),
        Keyword::Leaf => SchemaNode::Leaf(LeafNode {
            common: common(stmt),
            type_: lower_type(stmt.child_of(Keyword::Type).ok_or_else(|| YangError::validation("leaf is missing 'type'"))?)?,
            units: child_text(stmt, Keyword::Units),
            musts: musts(stmt),
            default: child_text(stmt, Keyword::Default),
            mandatory: bool_child(stmt, Keyword::Mandatory).unwrap_or(false),
        }),
        Keyword::LeafList => SchemaNode::LeafList(LeafListNode {
            common: common(stmt),
            type_: lower_type(stmt.child_of(Keyword::Type).ok_or_else(|| YangError::validation("leaf-list is missing 'type'"))?)?,
            units: child_text(stmt, Keyword::Units),
            musts: musts(stmt),
            defaults: stmt.children_of(Keyword::Default).filter_map(|c| c.argument.clone()).collect(),
            min_elements: u32_child(stmt, Keyword::MinElements)?.unwrap_or(0),
            max_elements: max_elements_child(stmt)?,
            ordered_by: ordered_by_child(stmt),
        }),
        Keyword::Choice => {
            let mut cases = Vec::new();
            for child in &stmt.children {
                match &child.keyword {
                    KeywordOrCustom::Known(Keyword::Case) => cases.push(lower_case(child)?),
                    KeywordOrCustom::Known(kw) if DATA_NODE_KEYWORDS.contains(kw) => cases.push(implicit_case(child)?),
                    _ => {}
                }
            }
            SchemaNode::Choice(ChoiceNode {
                common: common(stmt),
                default: child_text(stmt, Keyword::Default),
                mandatory: bool_child(stmt, Keyword::Mandatory).unwrap_or(false),
                cases,
            })
        }
        Keyword::Case => SchemaNode::Case(lower_case(stmt)?),
        Keyword::AnyXml => SchemaNode::AnyXml(AnyNode { common: common(stmt), musts: musts(stmt), mandatory: bool_child(stmt, Keyword::Mandatory).unwrap_or(false) }),
        Keyword::AnyData => SchemaNode::AnyData(AnyNode { common: common(stmt), musts: musts(stmt), mandatory: bool_child(stmt, Keyword::Mandatory).unwrap_or(false) }),
        Keyword::Uses => SchemaNode::Uses(UsesNode {
            common: common(stmt),
            grouping_name: text_of(stmt),
            refines: stmt.children_of(Keyword::Refine).map(lower_refine).collect::<Result<_>>()?,
            augments: stmt.children_of(Keyword::Augment).map(lower_augment).collect::<Result<_>>()?,
        }),
        Keyword::Grouping => SchemaNode::Grouping(lower_grouping(stmt)?),
        Keyword::Rpc | Keyword::Action => {
            let node = RpcNode {
                common: common(stmt),
                typedefs: lower_typedefs(stmt)?,
                groupings: lower_groupings(stmt)?,
                input: stmt.child_of(Keyword::Input).map(lower_input_output).transpose()?,
                output: stmt.child_of(Keyword::Output).map(lower_input_output).transpose()?,
            };
            if keyword == Keyword::Rpc {
                SchemaNode::Rpc(node)
            } else {
                SchemaNode::Action(node)
            }
        }
        Keyword::Notification => SchemaNode::Notification(NotificationNode {
            common: common(stmt),
            typedefs: lower_typedefs(stmt)?,
            groupings: lower_groupings(stmt)?,
            children: lower_data_children(stmt)?,
        }),
        Keyword::Augment => SchemaNode::Augment(lower_augment(stmt)?),
        other => return Err(YangError::internal(format!("'{:?}' is not a schema node keyword", other))),
    })
}

fn lower_input_output(stmt: &RawStatement) -> Result<InputOutputNode> {
    Ok(InputOutputNode { musts: musts(stmt), typedefs: lower_typedefs(stmt)?, groupings: lower_groupings(stmt)?, children: lower_data_children(stmt)? })
}

fn lower_refine(stmt: &RawStatement) -> Result<Refine> {
    Ok(Refine {
        target: text_of(stmt),
        if_features: if_features(stmt),
        musts: musts(stmt),
        presence: child_text(stmt, Keyword::Presence),
        defaults: stmt.children_of(Keyword::Default).filter_map(|c| c.argument.clone()).collect(),
        config: match child_text(stmt, Keyword::Config).as_deref() {
            Some("true") => Some(ConfigFlag::True),
            Some("false") => Some(ConfigFlag::False),
            _ => None,
        },
        mandatory: bool_child(stmt, Keyword::Mandatory),
        min_elements: u32_child(stmt, Keyword::MinElements)?,
        max_elements: if stmt.child_of(Keyword::MaxElements).is_some() { Some(max_elements_child(stmt)?) } else { None },
        description: child_text(stmt, Keyword::Description),
        reference: child_text(stmt, Keyword::Reference),
    })
}

fn lower_augment(stmt: &RawStatement) -> Result<AugmentNode> {
    Ok(AugmentNode { common: common(stmt), target_path: text_of(stmt), children: lower_data_children(stmt)? })
}

fn lower_identity(stmt: &RawStatement) -> Identity {
    Identity {
        name: text_of(stmt),
        bases: stmt.children_of(Keyword::Base).filter_map(|c| c.argument.clone()).collect(),
        if_features: if_features(stmt),
        status: status_of(stmt),
        description: child_text(stmt, Keyword::Description),
        reference: child_text(stmt, Keyword::Reference),
    }
}

fn lower_feature(stmt: &RawStatement) -> Feature {
    Feature { name: text_of(stmt), if_features: if_features(stmt), status: status_of(stmt), description: child_text(stmt, Keyword::Description), reference: child_text(stmt, Keyword::Reference) }
}

fn lower_extension_def(stmt: &RawStatement) -> ExtensionDef {
    let argument = stmt.child_of(Keyword::Argument).map(|a| (text_of(a), bool_child(a, Keyword::YinElement).unwrap_or(false)));
    ExtensionDef { name: text_of(stmt), argument, status: status_of(stmt), description: child_text(stmt, Keyword::Description), reference: child_text(stmt, Keyword::Reference) }
}

fn lower_deviate_props(stmt: &RawStatement) -> Result<DeviateProps> {
    Ok(DeviateProps {
        type_: stmt.child_of(Keyword::Type).map(lower_type).transpose()?,
        units: child_text(stmt, Keyword::Units),
        musts: musts(stmt),
        uniques: stmt.children_of(Keyword::Unique).filter_map(|c| c.argument.clone()).collect(),
        defaults: stmt.children_of(Keyword::Default).filter_map(|c| c.argument.clone()).collect(),
        config: match child_text(stmt, Keyword::Config).as_deref() {
            Some("true") => Some(ConfigFlag::True),
            Some("false") => Some(ConfigFlag::False),
            _ => None,
        },
        mandatory: bool_child(stmt, Keyword::Mandatory),
        min_elements: u32_child(stmt, Keyword::MinElements)?,
        max_elements: if stmt.child_of(Keyword::MaxElements).is_some() { Some(max_elements_child(stmt)?) } else { None },
        presence: child_text(stmt, Keyword::Presence),
    })
}

fn lower_deviate(stmt: &RawStatement) -> Result<Deviate> {
    Ok(match text_of(stmt).as_str() {
        "not-supported" => Deviate::NotSupported,
        "add" => Deviate::Add(lower_deviate_props(stmt)?),
        "replace" => Deviate::Replace(lower_deviate_props(stmt)?),
        "delete" => Deviate::Delete(lower_deviate_props(stmt)?),
        other => return Err(YangError::validation(format!("'{}' is not a valid deviate argument", other))),
    })
}

fn lower_deviation(stmt: &RawStatement) -> Result<Deviation> {
    Ok(Deviation {
        target_path: text_of(stmt),
        description: child_text(stmt, Keyword::Description),
        reference: child_text(stmt, Keyword::Reference),
        deviates: stmt.children_of(Keyword::Deviate).map(lower_deviate).collect::<Result<_>>()?,
    })
}

fn lower_revision(stmt: &RawStatement) -> Revision {
    Revision { date: text_of(stmt), description: child_text(stmt, Keyword::Description), reference: child_text(stmt, Keyword::Reference) }
}

fn lower_import(stmt: &RawStatement) -> Result<Import> {
    Ok(Import {
        module: text_of(stmt),
        prefix: child_text(stmt, Keyword::Prefix).ok_or_else(|| YangError::validation("import is missing 'prefix'"))?,
        revision_date: child_text(stmt, Keyword::RevisionDate),
        description: child_text(stmt, Keyword::Description),
        reference: child_text(stmt, Keyword::Reference),
    })
}

fn lower_include(stmt: &RawStatement) -> Include {
    Include { submodule: text_of(stmt), revision_date: child_text(stmt, Keyword::RevisionDate), description: child_text(stmt, Keyword::Description), reference: child_text(stmt, Keyword::Reference) }
}

fn yang_version_of(stmt: &RawStatement) -> YangVersion {
    match child_text(stmt, Keyword::YangVersion).as_deref() {
        Some("1.1") => YangVersion::V1_1,
        _ => YangVersion::V1_0,
    }
}

/// Lowers a validated `module` statement into a [`ParsedModule`].
pub fn lower_module(stmt: &RawStatement) -> Result<ParsedModule> {
    Ok(ParsedModule {
        name: text_of(stmt),
        namespace: child_text(stmt, Keyword::Namespace).ok_or_else(|| YangError::validation("module is missing 'namespace'"))?,
        prefix: child_text(stmt, Keyword::Prefix).ok_or_else(|| YangError::validation("module is missing 'prefix'"))?,
        yang_version: yang_version_of(stmt),
        organization: child_text(stmt, Keyword::Organization),
        contact: child_text(stmt, Keyword::Contact),
        description: child_text(stmt, Keyword::Description),
        reference: child_text(stmt, Keyword::Reference),
        revisions: stmt.children_of(Keyword::Revision).map(lower_revision).collect(),
        imports: stmt.children_of(Keyword::Import).map(lower_import).collect::<Result<_>>()?,
        includes: stmt.children_of(Keyword::Include).map(lower_include).collect(),
        typedefs: lower_typedefs(stmt)?,
        groupings: lower_groupings(stmt)?,
        identities: stmt.children_of(Keyword::Identity).map(lower_identity).collect(),
        features: stmt.children_of(Keyword::Feature).map(lower_feature).collect(),
        extensions: stmt.children_of(Keyword::Extension).map(lower_extension_def).collect(),
        deviations: stmt.children_of(Keyword::Deviation).map(lower_deviation).collect::<Result<_>>()?,
        body: lower_body(stmt)?,
    })
}

/// Lowers a validated `submodule` statement into a [`ParsedSubmodule`].
pub fn lower_submodule(stmt: &RawStatement) -> Result<ParsedSubmodule> {
    let belongs_to = stmt.child_of(Keyword::BelongsTo).ok_or_else(|| YangError::validation("submodule is missing 'belongs-to'"))?;
    Ok(ParsedSubmodule {
        name: text_of(stmt),
        belongs_to: text_of(belongs_to),
        belongs_to_prefix: child_text(belongs_to, Keyword::Prefix).ok_or_else(|| YangError::validation("belongs-to is missing 'prefix'"))?,
        yang_version: yang_version_of(stmt),
        organization: child_text(stmt, Keyword::Organization),
        contact: child_text(stmt, Keyword::Contact),
        description: child_text(stmt, Keyword::Description),
        reference: child_text(stmt, Keyword::Reference),
        revisions: stmt.children_of(Keyword::Revision).map(lower_revision).collect(),
        imports: stmt.children_of(Keyword::Import).map(lower_import).collect::<Result<_>>()?,
        includes: stmt.children_of(Keyword::Include).map(lower_include).collect(),
        typedefs: lower_typedefs(stmt)?,
        groupings: lower_groupings(stmt)?,
        identities: stmt.children_of(Keyword::Identity).map(lower_identity).collect(),
        features: stmt.children_of(Keyword::Feature).map(lower_feature).collect(),
        extensions: stmt.children_of(Keyword::Extension).map(lower_extension_def).collect(),
        deviations: stmt.children_of(Keyword::Deviation).map(lower_deviation).collect::<Result<_>>()?,
        body: lower_body(stmt)?,
    })
}

const TOP_LEVEL_BODY_KEYWORDS: &[Keyword] =
    &[Keyword::Container, Keyword::Leaf, Keyword::LeafList, Keyword::List, Keyword::Choice, Keyword::AnyXml, Keyword::AnyData, Keyword::Uses, Keyword::Augment, Keyword::Rpc, Keyword::Action, Keyword::Notification];

fn lower_body(stmt: &RawStatement) -> Result<Vec<SchemaNode>> {
    let mut out = Vec::new();
    for child in &stmt.children {
        if let KeywordOrCustom::Known(kw) = &child.keyword {
            if TOP_LEVEL_BODY_KEYWORDS.contains(kw) {
                out.push(lower_schema_node(child)?);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact::parse_raw;

    fn module(src: &str) -> ParsedModule {
        let raw = parse_raw(src).unwrap();
        crate::tree::validate(&raw, false).unwrap();
        lower_module(&raw).unwrap()
    }

    #[test]
    fn lowers_leaf_with_range_restricted_type() {
        let m = module(
            r#"
            module m {
                yang-version 1;
                namespace "urn:m";
                prefix m;
                leaf port {
                    type int8 {
                        range "0 .. 50 | 127";
                    }
                    default "20";
                }
            }
            "#,
        );
        let SchemaNode::Leaf(leaf) = &m.body[0] else { panic!("expected a leaf") };
        assert_eq!(leaf.type_.name, "int8");
        assert_eq!(leaf.type_.range.as_deref(), Some("0 .. 50 | 127"));
        assert_eq!(leaf.default.as_deref(), Some("20"));
    }

    #[test]
    fn normalizes_shorthand_case_under_choice() {
        let m = module(
            r#"
            module m {
                yang-version 1;
                namespace "urn:m";
                prefix m;
                choice c {
                    leaf a {
                        type string;
                    }
                }
            }
            "#,
        );
        let SchemaNode::Choice(choice) = &m.body[0] else { panic!("expected a choice") };
        assert_eq!(choice.cases.len(), 1);
        assert!(choice.cases[0].implicit);
        assert_eq!(choice.cases[0].common.name, "a");
    }

    #[test]
    fn latest_revision_picks_max_date() {
        let m = module(
            r#"
            module m {
                yang-version 1;
                namespace "urn:m";
                prefix m;
                revision 2020-01-01;
                revision 2022-06-15;
            }
            "#,
        );
        assert_eq!(m.latest_revision().unwrap().date, "2022-06-15");
    }
}
