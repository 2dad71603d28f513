//! Argument-kind alphabets (spec.md §4.3).
//!
//! Every keyword requires an argument of exactly one kind. The parsed-tree
//! builder (C3) looks up a keyword's required kind in the sub-statement
//! table and validates the raw argument text against it before storing it.

use yang2_base::{ErrorKind, Result, YangError};

/// The kind of argument a statement's keyword requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// The statement takes no argument (e.g. `input`, `output`).
    None,
    /// A bare identifier: `type`, `status`, etc.
    Identifier,
    /// `prefix:identifier` or a bare identifier: `type`, `base`, `if-feature`.
    PrefixedIdentifier,
    /// An arbitrary string: `description`, `pattern`, `range`.
    String,
    /// A string, or no argument at all (rare; used by a few extension
    /// statements whose argument is optional at the grammar level even
    /// though none of the fixed built-in keywords need it).
    MaybeString,
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
}

/// Validates that `text` is a well-formed YANG identifier.
pub fn is_valid_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => {}
        _ => return false,
    }
    chars.all(is_identifier_continue)
}

/// Validates that `text` is a well-formed `prefix:identifier` or bare
/// identifier.
pub fn is_valid_prefixed_identifier(text: &str) -> bool {
    match text.split_once(':') {
        Some((prefix, ident)) => is_valid_identifier(prefix) && is_valid_identifier(ident),
        None => is_valid_identifier(text),
    }
}

/// Validates that `text` contains no control characters outside
/// `\t \n \r`, as required of every YANG string argument.
pub fn is_valid_string(text: &str) -> bool {
    text.chars().all(|c| !c.is_control() || c == '\t' || c == '\n' || c == '\r')
}

/// Checks `text` against `kind`, returning a [`yang2_base::YangError`] of
/// kind [`ErrorKind::Validation`] describing the mismatch on failure.
pub fn validate_argument(kind: ArgumentKind, text: &str) -> Result<()> {
    let ok = match kind {
        ArgumentKind::None => text.is_empty(),
        ArgumentKind::Identifier => is_valid_identifier(text),
        ArgumentKind::PrefixedIdentifier => is_valid_prefixed_identifier(text),
        ArgumentKind::String | ArgumentKind::MaybeString => is_valid_string(text),
    };
    if ok {
        Ok(())
    } else {
        Err(YangError::new(
            ErrorKind::Validation,
            format!("argument '{}' is not a valid {:?}", text, kind),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_must_start_with_letter_or_underscore() {
        assert!(is_valid_identifier("port"));
        assert!(is_valid_identifier("_hidden"));
        assert!(!is_valid_identifier("1port"));
    }

    #[test]
    fn identifier_continue_allows_digits_dash_dot() {
        assert!(is_valid_identifier("my-type.v2"));
        assert!(!is_valid_identifier("bad name"));
    }

    #[test]
    fn prefixed_identifier_accepts_bare_or_prefixed() {
        assert!(is_valid_prefixed_identifier("int8"));
        assert!(is_valid_prefixed_identifier("ietf-inet:ipv4-address"));
        assert!(!is_valid_prefixed_identifier("ietf-inet:"));
        assert!(!is_valid_prefixed_identifier(":ipv4"));
    }

    #[test]
    fn string_rejects_control_chars_outside_tab_newline_cr() {
        assert!(is_valid_string("line1\nline2\tindented"));
        assert!(!is_valid_string("bad\u{0007}bell"));
    }

    #[test]
    fn validate_argument_reports_kind_in_message() {
        let err = validate_argument(ArgumentKind::Identifier, "1bad").unwrap_err();
        assert!(err.message.contains("Identifier"));
    }
}
