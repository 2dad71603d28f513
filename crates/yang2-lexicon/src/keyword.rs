//! The fixed YANG keyword enumeration (C2).
//!
//! Every statement name in a YANG module resolves to one of these variants,
//! to a pseudo-keyword used only by the XML surface (`Text`/`Value`, see
//! [`match_keyword`]), or to [`Keyword::Custom`] for an extension instance.
//! The enumeration is closed: no caller can register a new built-in
//! statement, since that would require a new revision of the language
//! itself, not a library extension point.

/// A YANG statement keyword, or the marker for an unrecognized
/// (extension-instance) statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Module,
    Submodule,
    YangVersion,
    Namespace,
    Prefix,
    Import,
    Include,
    BelongsTo,
    Organization,
    Contact,
    Description,
    Reference,
    Revision,
    RevisionDate,
    Units,
    Typedef,
    Type,
    Default,
    Status,
    Config,
    Mandatory,
    Presence,
    OrderedBy,
    MinElements,
    MaxElements,
    Must,
    ErrorMessage,
    ErrorAppTag,
    When,
    Key,
    Unique,
    Grouping,
    Uses,
    Refine,
    Augment,
    Action,
    Rpc,
    Input,
    Output,
    Notification,
    Container,
    Leaf,
    LeafList,
    List,
    Choice,
    Case,
    AnyXml,
    AnyData,
    Identity,
    Base,
    IfFeature,
    Feature,
    Deviation,
    Deviate,
    Extension,
    Argument,
    YinElement,
    Position,
    Value,
    Bit,
    Enum,
    Path,
    RequireInstance,
    FractionDigits,
    Pattern,
    Range,
    Length,
    Modifier,
    /// An extension statement in a non-YANG namespace (XML) or a
    /// `prefix:name` statement (compact form) not in this enumeration.
    Custom,
}

/// Pseudo-keywords that exist only to name the XML surface's argument-holder
/// child elements (`<text>`, `<value>`); the compact form has no equivalent
/// since arguments are plain tokens/strings there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoKeyword {
    /// `<text>` — carries the argument of a meta statement
    /// (`description`, `reference`, `organization`, `contact`).
    Text,
    /// `<value>` — carries the argument of `error-message`.
    Value,
}

/// The result of resolving a statement name against a parent context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordOrCustom {
    Known(Keyword),
    Pseudo(PseudoKeyword),
    /// An extension instance: `(prefix, local-name)`. `prefix` is empty for
    /// unprefixed XML elements in a foreign namespace (represented by the
    /// caller passing `""`).
    Custom { prefix: String, name: String },
}

/// Maps a statement/element name (plus its defining prefix/namespace, if
/// any) to a keyword, honoring the XML form's two special cases.
///
/// - `name` is the bare local name (`"leaf"`, `"value"`, a custom name).
/// - `prefix` is `Some(p)` when the statement is `p:name` in the compact
///   form, or when the XML element belongs to a non-YANG namespace (the
///   caller passes the namespace's bound prefix, or an empty string if
///   unbound).
/// - `parent` is the enclosing statement's keyword, used only to
///   disambiguate `value` (spec.md §4.2).
pub fn match_keyword(name: &str, prefix: Option<&str>, parent: Option<&Keyword>) -> KeywordOrCustom {
    if let Some(p) = prefix {
        if !p.is_empty() {
            return KeywordOrCustom::Custom { prefix: p.to_string(), name: name.to_string() };
        }
    }

    if name == "value" && matches!(parent, Some(Keyword::ErrorMessage)) {
        return KeywordOrCustom::Pseudo(PseudoKeyword::Value);
    }
    if name == "text" {
        // `text` never names a real YANG statement; treat consistently of
        // parent, matching the teacher's own "every matched name is final"
        // dispatch style.
        return KeywordOrCustom::Pseudo(PseudoKeyword::Text);
    }

    match keyword_from_str(name) {
        Some(k) => KeywordOrCustom::Known(k),
        None => KeywordOrCustom::Custom { prefix: String::new(), name: name.to_string() },
    }
}

/// Resolves a bare keyword string to a [`Keyword`] variant, or `None` if it
/// is not one of the fixed YANG statements.
pub fn keyword_from_str(name: &str) -> Option<Keyword> {
    use Keyword::*;
    Some(match name {
        "module" => Module,
        "submodule" => Submodule,
        "yang-version" => YangVersion,
        "namespace" => Namespace,
        "prefix" => Prefix,
        "import" => Import,
        "include" => Include,
        "belongs-to" => BelongsTo,
        "organization" => Organization,
        "contact" => Contact,
        "description" => Description,
        "reference" => Reference,
        "revision" => Revision,
        "revision-date" => RevisionDate,
        "units" => Units,
        "typedef" => Typedef,
        "type" => Type,
        "default" => Default,
        "status" => Status,
        "config" => Config,
        "mandatory" => Mandatory,
        "presence" => Presence,
        "ordered-by" => OrderedBy,
        "min-elements" => MinElements,
        "max-elements" => MaxElements,
        "must" => Must,
        "error-message" => ErrorMessage,
        "error-app-tag" => ErrorAppTag,
        "when" => When,
        "key" => Key,
        "unique" => Unique,
        "grouping" => Grouping,
        "uses" => Uses,
        "refine" => Refine,
        "augment" => Augment,
        "action" => Action,
        "rpc" => Rpc,
        "input" => Input,
        "output" => Output,
        "notification" => Notification,
        "container" => Container,
        "leaf" => Leaf,
        "leaf-list" => LeafList,
        "list" => List,
        "choice" => Choice,
        "case" => Case,
        "anyxml" => AnyXml,
        "anydata" => AnyData,
        "identity" => Identity,
        "base" => Base,
        "if-feature" => IfFeature,
        "feature" => Feature,
        "deviation" => Deviation,
        "deviate" => Deviate,
        "extension" => Extension,
        "argument" => Argument,
        "yin-element" => YinElement,
        "position" => Position,
        "value" => Value,
        "bit" => Bit,
        "enum" => Enum,
        "path" => Path,
        "require-instance" => RequireInstance,
        "fraction-digits" => FractionDigits,
        "pattern" => Pattern,
        "range" => Range,
        "length" => Length,
        "modifier" => Modifier,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keyword_resolves() {
        assert_eq!(match_keyword("leaf", None, None), KeywordOrCustom::Known(Keyword::Leaf));
    }

    #[test]
    fn unknown_unprefixed_name_is_custom() {
        assert_eq!(
            match_keyword("frobnicate", None, None),
            KeywordOrCustom::Custom { prefix: String::new(), name: "frobnicate".into() }
        );
    }

    #[test]
    fn prefixed_name_is_always_custom() {
        assert_eq!(
            match_keyword("wobble", Some("ext"), None),
            KeywordOrCustom::Custom { prefix: "ext".into(), name: "wobble".into() }
        );
    }

    #[test]
    fn value_under_error_message_is_pseudo() {
        assert_eq!(
            match_keyword("value", None, Some(&Keyword::ErrorMessage)),
            KeywordOrCustom::Pseudo(PseudoKeyword::Value)
        );
    }

    #[test]
    fn value_elsewhere_is_regular_keyword() {
        assert_eq!(
            match_keyword("value", None, Some(&Keyword::Enum)),
            KeywordOrCustom::Known(Keyword::Value)
        );
        assert_eq!(match_keyword("value", None, None), KeywordOrCustom::Known(Keyword::Value));
    }

    #[test]
    fn text_is_always_pseudo() {
        assert_eq!(
            match_keyword("text", None, Some(&Keyword::Description)),
            KeywordOrCustom::Pseudo(PseudoKeyword::Text)
        );
    }
}
