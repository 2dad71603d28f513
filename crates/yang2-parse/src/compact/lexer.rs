//! Compact-form lexer (spec.md §4.1, "Compact reader").
//!
//! Whitespace-insensitive outside quoted strings. Recognizes unquoted
//! tokens, single- and double-quoted strings with escape handling and
//! `+`-concatenation, `{ }`, `;`, and `//` / `/* */` comments.

use yang2_base::{ErrorKind, Position, Result, Span, YangError};

use super::token::{Token, TokenKind};

pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, bytes: source.as_bytes(), pos: 0, line: 1, column: 1 }
    }

    /// Tokenizes the whole buffer, returning every token including a
    /// trailing `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn here(&self) -> Position {
        Position::new(self.pos, self.line, self.column)
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.source[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn syntax_error(&self, message: impl Into<String>) -> YangError {
        let pos = self.here();
        YangError::new(
            ErrorKind::Syntax,
            format!("syntax error at line {} column {}: {}", pos.line, pos.column, message.into()),
        )
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            match self.peek_byte() {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => {
                    self.bump();
                }
                Some(b'/') if self.peek_byte_at(1) == Some(b'/') => {
                    while self.peek_byte().is_some() && self.peek_byte() != Some(b'\n') {
                        self.bump();
                    }
                }
                Some(b'/') if self.peek_byte_at(1) == Some(b'*') => {
                    self.bump();
                    self.bump();
                    loop {
                        match self.peek_byte() {
                            None => return Err(self.syntax_error("unterminated block comment")),
                            Some(b'*') if self.peek_byte_at(1) == Some(b'/') => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            _ => {
                                self.bump();
                            }
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn read_quoted(&mut self, quote: char) -> Result<String> {
        let mut out = String::new();
        self.bump(); // opening quote
        loop {
            match self.bump() {
                None => return Err(self.syntax_error("unterminated string literal")),
                Some(c) if c == quote => break,
                Some('\\') if quote == '"' => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => return Err(self.syntax_error("unterminated string literal")),
                },
                Some(c) => out.push(c),
            }
        }
        Ok(out)
    }

    fn read_unquoted(&mut self) -> String {
        let mut out = String::new();
        while let Some(b) = self.peek_byte() {
            match b {
                b' ' | b'\t' | b'\r' | b'\n' | b'{' | b'}' | b';' | b'"' | b'\'' => break,
                _ => {
                    if let Some(c) = self.bump() {
                        out.push(c);
                    }
                }
            }
        }
        out
    }

    /// Reads a quoted string, then absorbs any `+`-concatenated continuation
    /// strings into a single logical argument (spec.md §4.1).
    fn read_quoted_with_concat(&mut self, quote: char) -> Result<String> {
        let mut value = self.read_quoted(quote)?;
        loop {
            let checkpoint = (self.pos, self.line, self.column);
            self.skip_whitespace_and_comments()?;
            if self.peek_byte() == Some(b'+') {
                self.bump();
                self.skip_whitespace_and_comments()?;
                match self.peek_byte() {
                    Some(b'"') => value.push_str(&self.read_quoted('"')?),
                    Some(b'\'') => value.push_str(&self.read_quoted('\'')?),
                    _ => return Err(self.syntax_error("expected a quoted string after '+'")),
                }
            } else {
                let (pos, line, column) = checkpoint;
                self.pos = pos;
                self.line = line;
                self.column = column;
                break;
            }
        }
        Ok(value)
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments()?;
        let start = self.here();
        let kind = match self.peek_byte() {
            None => TokenKind::Eof,
            Some(b'{') => {
                self.bump();
                TokenKind::LBrace
            }
            Some(b'}') => {
                self.bump();
                TokenKind::RBrace
            }
            Some(b';') => {
                self.bump();
                TokenKind::Semicolon
            }
            Some(b'"') => TokenKind::Quoted(self.read_quoted_with_concat('"')?),
            Some(b'\'') => TokenKind::Quoted(self.read_quoted_with_concat('\'')?),
            Some(_) => TokenKind::Unquoted(self.read_unquoted()),
        };
        let end = self.here();
        Ok(Token::new(kind, Span::new(start, end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_braces_and_semicolons() {
        assert_eq!(
            kinds("leaf port { type int8; }"),
            vec![
                TokenKind::Unquoted("leaf".into()),
                TokenKind::Unquoted("port".into()),
                TokenKind::LBrace,
                TokenKind::Unquoted("type".into()),
                TokenKind::Unquoted("int8".into()),
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn double_quoted_string_honors_escapes() {
        let toks = kinds(r#"description "a\nb";"#);
        assert_eq!(toks[0], TokenKind::Unquoted("description".into()));
        assert_eq!(toks[1], TokenKind::Quoted("a\nb".into()));
    }

    #[test]
    fn concatenates_adjacent_quoted_strings() {
        let toks = kinds("\"foo\" + \"bar\"");
        assert_eq!(toks[0], TokenKind::Quoted("foobar".into()));
    }

    #[test]
    fn skips_line_and_block_comments() {
        let toks = kinds("// comment\nleaf /* inline */ x;");
        assert_eq!(
            toks,
            vec![
                TokenKind::Unquoted("leaf".into()),
                TokenKind::Unquoted("x".into()),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_is_syntax_error() {
        let err = Lexer::new("description \"oops").tokenize().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }
}
