//! The generic statement tree shared by both lexical readers (spec.md §4.3).
//!
//! [`RawStatement`] is what either reader produces: every statement resolved
//! to a keyword (or kept as a [`KeywordOrCustom::Custom`] extension
//! instance), with its argument text and children, before any
//! YANG-semantic meaning is attached. [`validate`] enforces the C3
//! sub-statement rules (uniqueness, mandatory, must-be-first, version gate,
//! module-body ordering) against the sub-statement tables in
//! `yang2-lexicon`. `builder::lower` then turns a validated tree into the
//! typed [`crate::ast`] structures.

use std::collections::HashSet;

use yang2_base::{ErrorKind, Result, SchemaPath, Span, YangError};
use yang2_lexicon::{argument_kind, match_keyword, substatements, validate_argument, Keyword, KeywordOrCustom};

#[derive(Debug, Clone)]
pub struct RawStatement {
    pub keyword: KeywordOrCustom,
    pub argument: Option<String>,
    pub span: Span,
    pub children: Vec<RawStatement>,
}

impl RawStatement {
    pub fn new(keyword: KeywordOrCustom, argument: Option<String>, span: Span, children: Vec<RawStatement>) -> Self {
        Self { keyword, argument, span, children }
    }

    /// The keyword's name, for diagnostics; `"<custom>"` covers extension
    /// instances uniformly regardless of their local name.
    pub fn keyword_name(&self) -> String {
        match &self.keyword {
            KeywordOrCustom::Known(k) => format!("{:?}", k),
            KeywordOrCustom::Pseudo(_) => "<pseudo>".to_string(),
            KeywordOrCustom::Custom { prefix, name } => {
                if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}:{}", prefix, name)
                }
            }
        }
    }

    pub fn children_of(&self, keyword: Keyword) -> impl Iterator<Item = &RawStatement> {
        self.children.iter().filter(move |c| matches!(&c.keyword, KeywordOrCustom::Known(k) if *k == keyword))
    }

    pub fn child_of(&self, keyword: Keyword) -> Option<&RawStatement> {
        self.children_of(keyword).next()
    }

    pub fn require_argument(&self) -> Result<&str> {
        self.argument.as_deref().ok_or_else(|| {
            YangError::new(ErrorKind::Syntax, format!("'{}' requires an argument", self.keyword_name()))
        })
    }
}

/// Validates a single statement's declared argument kind and recurses into
/// its children enforcing uniqueness/mandatory/first/version-gate rules.
/// `version_1_1` reflects the enclosing module's resolved `yang-version`.
pub fn validate(stmt: &RawStatement, version_1_1: bool) -> Result<()> {
    if let KeywordOrCustom::Known(keyword) = &stmt.keyword {
        let kind = argument_kind(keyword);
        if let Some(arg) = &stmt.argument {
            validate_argument(kind, arg).map_err(|e| e.attach_path(schema_path_for(stmt)))?;
        }

        let rules = substatements(keyword);
        let mut seen: HashSet<Keyword> = HashSet::new();

        for (i, child) in stmt.children.iter().enumerate() {
            if let KeywordOrCustom::Known(child_kw) = &child.keyword {
                let rule = rules.iter().find(|r| r.keyword == *child_kw);
                match rule {
                    None => {
                        return Err(YangError::new(
                            ErrorKind::Validation,
                            format!("'{}' is not permitted under '{}'", child.keyword_name(), stmt.keyword_name()),
                        )
                        .attach_path(schema_path_for(child)));
                    }
                    Some(rule) => {
                        if rule.version_1_1_only && !version_1_1 {
                            return Err(YangError::new(
                                ErrorKind::Validation,
                                format!("'{}' requires yang-version 1.1", child.keyword_name()),
                            )
                            .attach_path(schema_path_for(child)));
                        }
                        if rule.unique && !seen.insert(*child_kw) {
                            return Err(YangError::new(
                                ErrorKind::Validation,
                                format!("'{}' may appear at most once under '{}'", child.keyword_name(), stmt.keyword_name()),
                            )
                            .attach_path(schema_path_for(child)));
                        }
                        if rule.must_be_first && i != 0 {
                            return Err(YangError::new(
                                ErrorKind::Validation,
                                format!("'{}' must be the first sub-statement of '{}'", child.keyword_name(), stmt.keyword_name()),
                            )
                            .attach_path(schema_path_for(child)));
                        }
                    }
                }
            }
            validate(child, version_1_1)?;
        }

        for rule in rules.iter().filter(|r| r.mandatory) {
            if stmt.children_of(rule.keyword).next().is_none() {
                return Err(YangError::new(
                    ErrorKind::Validation,
                    format!("'{}' is missing mandatory sub-statement '{:?}'", stmt.keyword_name(), rule.keyword),
                )
                .attach_path(schema_path_for(stmt)));
            }
        }

        if matches!(keyword, Keyword::Module | Keyword::Submodule) {
            validate_module_body_order(stmt)?;
        }
    } else {
        for child in &stmt.children {
            validate(child, version_1_1)?;
        }
    }
    Ok(())
}

/// Enforces spec.md §4.3's "module-body ordering": header, linkage, meta,
/// revision, body groups must appear in that relative order (free order
/// within each group).
fn validate_module_body_order(stmt: &RawStatement) -> Result<()> {
    fn group(keyword: &Keyword) -> u8 {
        use Keyword::*;
        match keyword {
            YangVersion | Namespace | Prefix | BelongsTo => 0,
            Import | Include => 1,
            Organization | Contact | Description | Reference => 2,
            Revision => 3,
            _ => 4,
        }
    }

    let mut max_group_seen = 0u8;
    for child in &stmt.children {
        if let KeywordOrCustom::Known(kw) = &child.keyword {
            let g = group(kw);
            if g < max_group_seen {
                return Err(YangError::new(
                    ErrorKind::Validation,
                    format!(
                        "'{}' is out of order in the module body (header/linkage/meta/revision/body must appear in that relative order)",
                        child.keyword_name()
                    ),
                )
                .attach_path(schema_path_for(child)));
            }
            max_group_seen = max_group_seen.max(g);
        }
    }
    Ok(())
}

fn schema_path_for(stmt: &RawStatement) -> SchemaPath {
    let mut path = SchemaPath::new();
    path.push_child(&stmt.keyword_name());
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use yang2_base::Position;

    fn point() -> Span {
        Span::point(Position::start())
    }

    fn leaf(kind: Keyword, arg: Option<&str>, children: Vec<RawStatement>) -> RawStatement {
        RawStatement::new(KeywordOrCustom::Known(kind), arg.map(str::to_string), point(), children)
    }

    #[test]
    fn rejects_duplicate_unique_substatement() {
        let stmt = leaf(
            Keyword::Leaf,
            Some("port"),
            vec![
                leaf(Keyword::Type, Some("int8"), vec![]),
                leaf(Keyword::Description, Some("a"), vec![]),
                leaf(Keyword::Description, Some("b"), vec![]),
            ],
        );
        let err = validate(&stmt, true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn rejects_missing_mandatory_type() {
        let stmt = leaf(Keyword::Leaf, Some("port"), vec![]);
        let err = validate(&stmt, true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn rejects_1_1_only_substatement_under_1_0() {
        let stmt = leaf(
            Keyword::Choice,
            Some("c"),
            vec![leaf(Keyword::AnyData, Some("d"), vec![])],
        );
        let err = validate(&stmt, false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(validate(&stmt, true).is_ok());
    }

    #[test]
    fn rejects_out_of_order_module_body() {
        let stmt = leaf(
            Keyword::Module,
            Some("m"),
            vec![
                leaf(Keyword::YangVersion, Some("1"), vec![]),
                leaf(Keyword::Namespace, Some("urn:m"), vec![]),
                leaf(Keyword::Prefix, Some("m"), vec![]),
                leaf(Keyword::Organization, Some("acme"), vec![]),
                leaf(Keyword::Import, Some("other"), vec![leaf(Keyword::Prefix, Some("o"), vec![])]),
            ],
        );
        let err = validate(&stmt, false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
