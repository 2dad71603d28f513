//! Compact-form recursive-descent parser: turns a token stream into a
//! [`RawStatement`] tree (spec.md §4.1, "Compact reader").

use yang2_base::{ErrorKind, Result, Span, YangError};
use yang2_lexicon::{match_keyword, Keyword, KeywordOrCustom};

use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::tree::RawStatement;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Token {
        let tok = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn syntax_error(&self, message: impl Into<String>) -> YangError {
        let pos = self.peek().span.start;
        YangError::new(ErrorKind::Syntax, format!("syntax error at line {} column {}: {}", pos.line, pos.column, message.into()))
    }

    /// Parses one statement: `name [prefix:]name argument? ( '{' stmt* '}' | ';' )`.
    fn parse_statement(&mut self, parent: Option<&Keyword>) -> Result<RawStatement> {
        let start = self.peek().span.start;
        let name_tok = self.bump();
        let name_text = match &name_tok.kind {
            TokenKind::Unquoted(s) => s.clone(),
            _ => return Err(self.syntax_error("expected a statement keyword")),
        };

        let (prefix, local) = match name_text.split_once(':') {
            Some((p, n)) => (Some(p.to_string()), n.to_string()),
            None => (None, name_text),
        };
        let keyword = match_keyword(&local, prefix.as_deref(), parent);
        let kw_for_children = match &keyword {
            KeywordOrCustom::Known(k) => Some(*k),
            _ => None,
        };

        let argument = match self.peek().kind.clone() {
            TokenKind::LBrace | TokenKind::Semicolon => None,
            TokenKind::Unquoted(s) => {
                self.bump();
                Some(s)
            }
            TokenKind::Quoted(s) => {
                self.bump();
                Some(s)
            }
            TokenKind::Eof => return Err(self.syntax_error("unexpected end of input")),
            _ => return Err(self.syntax_error("expected a statement argument, '{' or ';'")),
        };

        let mut children = Vec::new();
        match self.peek().kind.clone() {
            TokenKind::Semicolon => {
                self.bump();
            }
            TokenKind::LBrace => {
                self.bump();
                loop {
                    match self.peek().kind {
                        TokenKind::RBrace => {
                            self.bump();
                            break;
                        }
                        TokenKind::Eof => return Err(self.syntax_error("unterminated statement block, expected '}'")),
                        _ => children.push(self.parse_statement(kw_for_children.as_ref())?),
                    }
                }
            }
            _ => return Err(self.syntax_error("expected '{' or ';' after statement argument")),
        }

        let end = self.peek().span.start;
        Ok(RawStatement::new(keyword, argument, Span::new(start, end), children))
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }
}

/// Parses compact-form source text into a single top-level [`RawStatement`]
/// (the `module` or `submodule`), without yet enforcing C3's sub-statement
/// rules — callers run [`crate::tree::validate`] afterward.
pub fn parse_raw(source: &str) -> Result<RawStatement> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser::new(tokens);
    if parser.at_eof() {
        return Err(YangError::new(ErrorKind::Syntax, "empty input: expected a 'module' or 'submodule' statement"));
    }
    let top = parser.parse_statement(None)?;
    if !parser.at_eof() {
        return Err(parser.syntax_error("unexpected trailing content after the top-level statement"));
    }
    match &top.keyword {
        KeywordOrCustom::Known(Keyword::Module) | KeywordOrCustom::Known(Keyword::Submodule) => Ok(top),
        _ => Err(YangError::new(ErrorKind::Syntax, format!("expected a top-level 'module' or 'submodule' statement, found '{}'", top.keyword_name()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_module_skeleton() {
        let raw = parse_raw(
            r#"
            module example {
                yang-version 1.1;
                namespace "urn:example";
                prefix ex;

                leaf greeting {
                    type string;
                    default "hello";
                }
            }
            "#,
        )
        .unwrap();
        assert_eq!(raw.argument.as_deref(), Some("example"));
        assert_eq!(raw.children.len(), 4);
        assert_eq!(raw.children[3].keyword_name(), "Leaf");
        assert_eq!(raw.children[3].children[1].argument.as_deref(), Some("hello"));
    }

    #[test]
    fn rejects_top_level_non_module() {
        let err = parse_raw("leaf x { type string; }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn rejects_unterminated_block() {
        let err = parse_raw("module m { namespace \"urn:m\";").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn custom_extension_statement_keeps_prefix() {
        let raw = parse_raw(
            r#"
            module m {
                namespace "urn:m";
                prefix m;
                ext:widget "blue";
            }
            "#,
        )
        .unwrap();
        let ext = &raw.children[2];
        match &ext.keyword {
            KeywordOrCustom::Custom { prefix, name } => {
                assert_eq!(prefix, "ext");
                assert_eq!(name, "widget");
            }
            other => panic!("expected a custom statement, got {:?}", other),
        }
    }
}
