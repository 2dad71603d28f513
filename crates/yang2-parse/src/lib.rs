//! Lexical readers and the parsed-tree builder (spec.md §4, C1/C3).
//!
//! Two lexical readers — [`compact`] (brace/semicolon) and [`xml`] (YIN) —
//! produce a shared, reader-agnostic [`tree::RawStatement`] tree. [`tree`]
//! validates that tree against the sub-statement rules in `yang2-lexicon`
//! (C3). [`builder`] then lowers a validated tree into the typed
//! [`ast::ParsedModule`]/[`ast::ParsedSubmodule`] records the compiler
//! consumes.

pub mod ast;
mod builder;
mod compact;
pub mod tree;
mod xml;

use yang2_base::{ErrorKind, Result, YangError};
use yang2_lexicon::{Keyword, KeywordOrCustom};

pub use ast::{ParsedModule, ParsedSubmodule};

fn yang_version_is_1_1(stmt: &tree::RawStatement) -> bool {
    stmt.child_of(Keyword::YangVersion).and_then(|c| c.argument.as_deref()) == Some("1.1")
}

/// Parses compact-form source text as a `module`, validating its
/// sub-statement structure and lowering it into a [`ParsedModule`].
pub fn parse_module(source: &str) -> Result<ParsedModule> {
    log::debug!("parsing compact-form module ({} bytes)", source.len());
    let raw = compact::parse_raw(source)?;
    require_top_level(&raw, Keyword::Module)?;
    tree::validate(&raw, yang_version_is_1_1(&raw))?;
    let module = builder::lower_module(&raw)?;
    log::info!("parsed module '{}'", module.name);
    Ok(module)
}

/// Parses compact-form source text as a `submodule`.
pub fn parse_submodule(source: &str) -> Result<ParsedSubmodule> {
    let raw = compact::parse_raw(source)?;
    require_top_level(&raw, Keyword::Submodule)?;
    tree::validate(&raw, yang_version_is_1_1(&raw))?;
    builder::lower_submodule(&raw)
}

/// Parses a YIN (XML) document as a `module`.
pub fn parse_module_xml(source: &str) -> Result<ParsedModule> {
    log::debug!("parsing YIN module ({} bytes)", source.len());
    let raw = xml::parse_raw_xml(source)?;
    require_top_level(&raw, Keyword::Module)?;
    tree::validate(&raw, yang_version_is_1_1(&raw))?;
    let module = builder::lower_module(&raw)?;
    log::info!("parsed module '{}' from YIN", module.name);
    Ok(module)
}

/// Parses a YIN (XML) document as a `submodule`.
pub fn parse_submodule_xml(source: &str) -> Result<ParsedSubmodule> {
    let raw = xml::parse_raw_xml(source)?;
    require_top_level(&raw, Keyword::Submodule)?;
    tree::validate(&raw, yang_version_is_1_1(&raw))?;
    builder::lower_submodule(&raw)
}

fn require_top_level(stmt: &tree::RawStatement, expected: Keyword) -> Result<()> {
    match &stmt.keyword {
        KeywordOrCustom::Known(k) if *k == expected => Ok(()),
        _ => Err(YangError::new(ErrorKind::Syntax, format!("expected a top-level '{:?}' statement, found '{}'", expected, stmt.keyword_name()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_module_rejects_a_submodule() {
        let err = parse_module(
            r#"
            submodule m {
                belongs-to parent { prefix p; }
            }
            "#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn compact_and_xml_readers_agree_on_a_minimal_module() {
        let from_compact = parse_module(
            r#"
            module m {
                yang-version 1.1;
                namespace "urn:m";
                prefix m;
            }
            "#,
        )
        .unwrap();
        let from_xml = parse_module_xml(
            r#"<module xmlns="urn:ietf:params:xml:ns:yang:yin:1" name="m">
                 <yang-version value="1.1"/>
                 <namespace uri="urn:m"/>
                 <prefix value="m"/>
               </module>"#,
        )
        .unwrap();
        assert_eq!(from_compact.name, from_xml.name);
        assert_eq!(from_compact.namespace, from_xml.namespace);
        assert_eq!(from_compact.prefix, from_xml.prefix);
    }
}
