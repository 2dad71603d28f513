//! YIN (XML) surface syntax reader (spec.md §4.1, "XML reader").
//!
//! Lowers a namespace-resolved [`super::dom::Element`] tree into a
//! [`RawStatement`] tree, applying YIN's fixed per-keyword argument
//! placement (RFC 7950 Appendix B): most statements carry their argument in
//! a named attribute; `description`, `reference`, `organization`, `contact`
//! and `error-message` carry it in a `<text>`/`<value>` child element
//! instead, since the argument is free text unsafe to put in an attribute.

use yang2_base::{ErrorKind, Result, YangError};
use yang2_lexicon::{match_keyword, Keyword, KeywordOrCustom};

use super::dom::{self, Element};
use crate::tree::RawStatement;

const YIN_NAMESPACE: &str = "urn:ietf:params:xml:ns:yang:yin:1";

enum ArgLoc {
    None,
    Attribute(&'static str),
    TextChild(&'static str),
}

fn argument_location(keyword: Keyword) -> ArgLoc {
    use Keyword::*;
    match keyword {
        Input | Output => ArgLoc::None,
        Description | Reference | Organization | Contact => ArgLoc::TextChild("text"),
        ErrorMessage => ArgLoc::TextChild("value"),
        Augment | Deviation | Refine => ArgLoc::Attribute("target-node"),
        Import | Include | BelongsTo => ArgLoc::Attribute("module"),
        Revision | RevisionDate => ArgLoc::Attribute("date"),
        Unique => ArgLoc::Attribute("tag"),
        Must | When => ArgLoc::Attribute("condition"),
        Namespace => ArgLoc::Attribute("uri"),
        Prefix | Config | Default | Deviate | ErrorAppTag | FractionDigits | Key | Length | Mandatory | MaxElements | MinElements | Modifier | OrderedBy | Path | Pattern | Position
        | Presence | Range | RequireInstance | Status | YangVersion | YinElement | Value => ArgLoc::Attribute("value"),
        _ => ArgLoc::Attribute("name"),
    }
}

fn in_yin_namespace(elem: &Element) -> bool {
    elem.namespace.as_deref() == Some(YIN_NAMESPACE) || elem.namespace.is_none()
}

fn keyword_for(elem: &Element, parent: Option<&Keyword>) -> KeywordOrCustom {
    if !in_yin_namespace(elem) {
        return KeywordOrCustom::Custom { prefix: elem.prefix.clone().unwrap_or_default(), name: elem.local_name.clone() };
    }
    match match_keyword(&elem.local_name, None, parent) {
        // XML has no `value`-under-error-message / bare-`text` pseudo-element
        // ambiguity the way the compact form's token stream does: those
        // names are resolved positionally (as the fixed argument-holder
        // child), never reached here as an ordinary child statement.
        KeywordOrCustom::Pseudo(_) => KeywordOrCustom::Custom { prefix: String::new(), name: elem.local_name.clone() },
        other => other,
    }
}

fn extract_known_argument(elem: &Element, keyword: Keyword) -> Option<String> {
    match argument_location(keyword) {
        ArgLoc::None => None,
        ArgLoc::Attribute(attr) => elem.attr(attr).map(str::to_string),
        ArgLoc::TextChild(name) => elem.child_elements().find(|c| c.local_name == name && in_yin_namespace(c)).map(|c| c.text()),
    }
}

/// Extensions carry their argument by a convention private to the
/// extension's own `argument`/`yin-element` declaration, which this
/// statement-level reader cannot resolve without a compiled context. As a
/// best effort: a single attribute's value, or a lone text child.
fn extract_custom_argument(elem: &Element) -> Option<String> {
    if elem.attributes.len() == 1 {
        return Some(elem.attributes[0].value.clone());
    }
    let text = elem.text();
    if !text.trim().is_empty() {
        return Some(text);
    }
    None
}

fn lower_element(elem: &Element, parent: Option<&Keyword>) -> Result<RawStatement> {
    let keyword = keyword_for(elem, parent);
    let known = match &keyword {
        KeywordOrCustom::Known(k) => Some(*k),
        _ => None,
    };
    let argument = match known {
        Some(k) => extract_known_argument(elem, k),
        None => extract_custom_argument(elem),
    };

    let mut children = Vec::new();
    for child in elem.child_elements() {
        if let Some(k) = known {
            if let ArgLoc::TextChild(name) = argument_location(k) {
                if child.local_name == name && in_yin_namespace(child) {
                    continue;
                }
            }
        }
        children.push(lower_element(child, known.as_ref())?);
    }

    Ok(RawStatement::new(keyword, argument, elem.span, children))
}

/// Parses a YIN document into a single top-level [`RawStatement`] (the
/// `module` or `submodule`), without enforcing C3's sub-statement rules —
/// callers run [`crate::tree::validate`] afterward, exactly as for the
/// compact reader.
pub fn parse_raw_xml(source: &str) -> Result<RawStatement> {
    let root = dom::parse_document(source)?;
    match keyword_for(&root, None) {
        KeywordOrCustom::Known(Keyword::Module) | KeywordOrCustom::Known(Keyword::Submodule) => lower_element(&root, None),
        other => {
            let name = match other {
                KeywordOrCustom::Custom { name, .. } => name,
                _ => root.local_name.clone(),
            };
            Err(YangError::new(ErrorKind::Syntax, format!("expected a top-level 'module' or 'submodule' element, found '{}'", name)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowers_attribute_argument_and_text_child_argument() {
        let raw = parse_raw_xml(
            r#"<module xmlns="urn:ietf:params:xml:ns:yang:yin:1" name="m">
                 <namespace uri="urn:m"/>
                 <prefix value="m"/>
                 <description><text>an example module</text></description>
               </module>"#,
        )
        .unwrap();
        assert_eq!(raw.argument.as_deref(), Some("m"));
        let ns = raw.child_of(Keyword::Namespace).unwrap();
        assert_eq!(ns.argument.as_deref(), Some("urn:m"));
        let desc = raw.child_of(Keyword::Description).unwrap();
        assert_eq!(desc.argument.as_deref(), Some("an example module"));
        assert!(desc.children.is_empty());
    }

    #[test]
    fn custom_namespace_element_becomes_extension_instance() {
        let raw = parse_raw_xml(
            r#"<module xmlns="urn:ietf:params:xml:ns:yang:yin:1" xmlns:ext="urn:ext" name="m">
                 <ext:widget color="blue"/>
               </module>"#,
        )
        .unwrap();
        let child = &raw.children[0];
        match &child.keyword {
            KeywordOrCustom::Custom { prefix, name } => {
                assert_eq!(prefix, "ext");
                assert_eq!(name, "widget");
            }
            other => panic!("expected a custom statement, got {:?}", other),
        }
        assert_eq!(child.argument.as_deref(), Some("blue"));
    }

    #[test]
    fn rejects_non_module_root() {
        let err = parse_raw_xml(r#"<leaf xmlns="urn:ietf:params:xml:ns:yang:yin:1" name="x"/>"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }
}
