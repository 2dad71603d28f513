//! Minimal XML document parser for the YIN surface syntax (spec.md §4.1).
//!
//! Scoped to what YIN documents actually use: elements, attributes, text,
//! comments, the `<?xml ... ?>` prolog, and `xmlns`/`xmlns:prefix`
//! namespace declarations. No DTD, CDATA, or processing-instruction support.

use std::collections::HashMap;

use yang2_base::{ErrorKind, Position, Result, Span, YangError};

use super::entities;

#[derive(Debug, Clone)]
pub struct Attribute {
    pub prefix: Option<String>,
    pub local_name: String,
    /// The resolved namespace URI, if the attribute's prefix (or the
    /// element's default namespace, for unprefixed attributes naming YIN
    /// argument values) was bound.
    pub namespace: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub prefix: Option<String>,
    pub local_name: String,
    pub namespace: Option<String>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    pub span: Span,
}

impl Element {
    pub fn attr(&self, local_name: &str) -> Option<&str> {
        self.attributes.iter().find(|a| a.local_name == local_name).map(|a| a.value.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenation of all direct text children (YIN never mixes text and
    /// element content within the same statement's argument).
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

struct Scope {
    default_ns: Option<String>,
    prefixes: HashMap<String, String>,
}

struct DomParser<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
    scopes: Vec<Scope>,
}

impl<'a> DomParser<'a> {
    fn new(source: &'a str) -> Self {
        Self { bytes: source.as_bytes(), pos: 0, line: 1, column: 1, scopes: vec![Scope { default_ns: None, prefixes: HashMap::new() }] }
    }

    fn here(&self) -> Position {
        Position::new(self.pos, self.line, self.column)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.bytes[self.pos..].starts_with(s.as_bytes())
    }

    fn bump(&mut self) -> u8 {
        let b = self.bytes[self.pos];
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        b
    }

    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            if self.peek().is_some() {
                self.bump();
            }
        }
    }

    fn syntax_error(&self, message: impl Into<String>) -> YangError {
        let pos = self.here();
        YangError::new(ErrorKind::Syntax, format!("syntax error at line {} column {}: {}", pos.line, pos.column, message.into()))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n')) {
            self.bump();
        }
    }

    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            if self.starts_with("<?") {
                self.skip_until("?>")?;
            } else if self.starts_with("<!--") {
                self.skip_until("-->")?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn skip_until(&mut self, terminator: &str) -> Result<()> {
        while !self.starts_with(terminator) {
            if self.peek().is_none() {
                return Err(self.syntax_error(format!("unterminated construct, expected '{}'", terminator)));
            }
            self.bump();
        }
        self.advance(terminator.len());
        Ok(())
    }

    fn read_name(&mut self) -> Result<String> {
        let mut name = String::new();
        while let Some(b) = self.peek() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':' => {
                    name.push(self.bump() as char);
                }
                _ => break,
            }
        }
        if name.is_empty() {
            return Err(self.syntax_error("expected an element or attribute name"));
        }
        Ok(name)
    }

    fn split_qname(name: &str) -> (Option<String>, String) {
        match name.split_once(':') {
            Some((p, n)) => (Some(p.to_string()), n.to_string()),
            None => (None, name.to_string()),
        }
    }

    fn read_attribute_value(&mut self) -> Result<String> {
        let quote = match self.peek() {
            Some(b'"') => '"',
            Some(b'\'') => '\'',
            _ => return Err(self.syntax_error("expected a quoted attribute value")),
        };
        self.bump();
        let mut raw = String::new();
        loop {
            match self.peek() {
                None => return Err(self.syntax_error("unterminated attribute value")),
                Some(b) if b as char == quote => {
                    self.bump();
                    break;
                }
                Some(_) => raw.push(self.bump() as char),
            }
        }
        entities::decode(&raw)
    }

    fn current_scope(&self) -> &Scope {
        self.scopes.last().expect("at least one scope always present")
    }

    fn resolve_prefix(&self, prefix: &str) -> Option<String> {
        self.current_scope().prefixes.get(prefix).cloned()
    }

    /// Parses one element (and its subtree), pushing/popping a namespace
    /// scope for any `xmlns`/`xmlns:prefix` attributes it declares.
    fn parse_element(&mut self) -> Result<Element> {
        let start = self.here();
        if self.peek() != Some(b'<') {
            return Err(self.syntax_error("expected '<'"));
        }
        self.bump();
        let name = self.read_name()?;

        let mut raw_attributes: Vec<(String, String)> = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => {
                    let attr_name = self.read_name()?;
                    self.skip_whitespace();
                    if self.peek() != Some(b'=') {
                        return Err(self.syntax_error("expected '=' after attribute name"));
                    }
                    self.bump();
                    self.skip_whitespace();
                    let value = self.read_attribute_value()?;
                    raw_attributes.push((attr_name, value));
                }
                None => return Err(self.syntax_error("unterminated start tag")),
            }
        }

        let mut scope = Scope { default_ns: self.current_scope().default_ns.clone(), prefixes: self.current_scope().prefixes.clone() };
        for (name, value) in &raw_attributes {
            if name == "xmlns" {
                scope.default_ns = Some(value.clone());
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                scope.prefixes.insert(prefix.to_string(), value.clone());
            }
        }
        self.scopes.push(scope);

        let (prefix, local_name) = Self::split_qname(&name);
        let namespace = match &prefix {
            Some(p) => Some(self.resolve_prefix(p).ok_or_else(|| self.syntax_error(format!("unbound namespace prefix '{}'", p)))?),
            None => self.current_scope().default_ns.clone(),
        };

        let mut attributes = Vec::new();
        for (raw_name, value) in raw_attributes {
            if raw_name == "xmlns" || raw_name.starts_with("xmlns:") {
                continue;
            }
            let (attr_prefix, local) = Self::split_qname(&raw_name);
            let attr_ns = match &attr_prefix {
                Some(p) => Some(self.resolve_prefix(p).ok_or_else(|| self.syntax_error(format!("unbound namespace prefix '{}'", p)))?),
                None => None,
            };
            attributes.push(Attribute { prefix: attr_prefix, local_name: local, namespace: attr_ns, value });
        }

        let mut children = Vec::new();
        if self.peek() == Some(b'/') {
            self.bump();
            if self.peek() != Some(b'>') {
                return Err(self.syntax_error("expected '>' after '/'"));
            }
            self.bump();
        } else {
            if self.peek() != Some(b'>') {
                return Err(self.syntax_error("expected '>' to close the start tag"));
            }
            self.bump();
            children = self.parse_content(&name)?;
        }

        self.scopes.pop();
        let end = self.here();
        Ok(Element { prefix, local_name, namespace, attributes, children, span: Span::new(start, end) })
    }

    fn parse_content(&mut self, open_name: &str) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        let mut text = String::new();
        loop {
            if self.starts_with("<!--") {
                self.skip_until("-->")?;
                continue;
            }
            if self.starts_with("</") {
                if !text.is_empty() {
                    nodes.push(Node::Text(entities::decode(&text)?));
                    text.clear();
                }
                self.advance(2);
                let close_name = self.read_name()?;
                self.skip_whitespace();
                if self.peek() != Some(b'>') {
                    return Err(self.syntax_error("expected '>' to close end tag"));
                }
                self.bump();
                if close_name != open_name {
                    return Err(self.syntax_error(format!("mismatched closing tag: expected '</{}>', found '</{}>'", open_name, close_name)));
                }
                return Ok(nodes);
            }
            match self.peek() {
                None => return Err(self.syntax_error(format!("unterminated element, expected '</{}>'", open_name))),
                Some(b'<') => {
                    if !text.is_empty() {
                        nodes.push(Node::Text(entities::decode(&text)?));
                        text.clear();
                    }
                    nodes.push(Node::Element(self.parse_element()?));
                }
                Some(_) => text.push(self.bump() as char),
            }
        }
    }
}

/// Parses a complete YIN document into its root [`Element`], resolving
/// namespaces and decoding entities, but attaching no YANG meaning.
pub fn parse_document(source: &str) -> Result<Element> {
    let mut parser = DomParser::new(source);
    parser.skip_misc()?;
    let root = parser.parse_element()?;
    parser.skip_misc()?;
    if parser.peek().is_some() {
        return Err(parser.syntax_error("unexpected trailing content after the root element"));
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_with_attributes() {
        let root = parse_document(r#"<module xmlns="urn:ietf:params:xml:ns:yang:yin:1" name="m"><leaf name="x"/></module>"#).unwrap();
        assert_eq!(root.local_name, "module");
        assert_eq!(root.attr("name"), Some("m"));
        assert_eq!(root.namespace.as_deref(), Some("urn:ietf:params:xml:ns:yang:yin:1"));
        assert_eq!(root.child_elements().count(), 1);
    }

    #[test]
    fn resolves_prefixed_extension_namespace() {
        let root = parse_document(r#"<module xmlns:ext="urn:ext"><ext:widget/></module>"#).unwrap();
        let child = root.child_elements().next().unwrap();
        assert_eq!(child.prefix.as_deref(), Some("ext"));
        assert_eq!(child.namespace.as_deref(), Some("urn:ext"));
    }

    #[test]
    fn decodes_text_content() {
        let root = parse_document("<description>a &amp; b</description>").unwrap();
        assert_eq!(root.text(), "a & b");
    }

    #[test]
    fn rejects_mismatched_closing_tag() {
        let err = parse_document("<a><b></c></a>").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn rejects_unbound_prefix() {
        let err = parse_document("<ext:widget/>").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }
}
