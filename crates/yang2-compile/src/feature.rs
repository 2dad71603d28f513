//! `if-feature` expression compilation and evaluation (spec.md §4.6 step 4).
//!
//! Grammar (RFC 7950 §9.10.2): `expr ::= or-expr`, `or-expr ::= and-expr
//! ('or' and-expr)*`, `and-expr ::= unary-expr ('and' unary-expr)*`,
//! `unary-expr ::= 'not'? atom`, `atom ::= identifier | '(' expr ')'`.

use yang2_base::{ErrorKind, Result, YangError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureExpr {
    Feature(String),
    Not(Box<FeatureExpr>),
    And(Box<FeatureExpr>, Box<FeatureExpr>),
    Or(Box<FeatureExpr>, Box<FeatureExpr>),
}

impl FeatureExpr {
    pub fn eval(&self, is_enabled: &dyn Fn(&str) -> bool) -> bool {
        match self {
            FeatureExpr::Feature(name) => is_enabled(name),
            FeatureExpr::Not(inner) => !inner.eval(is_enabled),
            FeatureExpr::And(a, b) => a.eval(is_enabled) && b.eval(is_enabled),
            FeatureExpr::Or(a, b) => a.eval(is_enabled) || b.eval(is_enabled),
        }
    }
}

struct Tokens {
    items: Vec<String>,
    pos: usize,
}

impl Tokens {
    fn tokenize(text: &str) -> Self {
        let mut items = Vec::new();
        let mut chars = text.chars().peekable();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
            } else if c == '(' || c == ')' {
                items.push(c.to_string());
                chars.next();
            } else {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                items.push(word);
            }
        }
        Self { items, pos: 0 }
    }

    fn peek(&self) -> Option<&str> {
        self.items.get(self.pos).map(String::as_str)
    }

    fn bump(&mut self) -> Option<String> {
        let t = self.items.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }
}

fn parse_or(tokens: &mut Tokens) -> Result<FeatureExpr> {
    let mut lhs = parse_and(tokens)?;
    while tokens.peek() == Some("or") {
        tokens.bump();
        let rhs = parse_and(tokens)?;
        lhs = FeatureExpr::Or(Box::new(lhs), Box::new(rhs));
    }
    Ok(lhs)
}

fn parse_and(tokens: &mut Tokens) -> Result<FeatureExpr> {
    let mut lhs = parse_unary(tokens)?;
    while tokens.peek() == Some("and") {
        tokens.bump();
        let rhs = parse_unary(tokens)?;
        lhs = FeatureExpr::And(Box::new(lhs), Box::new(rhs));
    }
    Ok(lhs)
}

fn parse_unary(tokens: &mut Tokens) -> Result<FeatureExpr> {
    if tokens.peek() == Some("not") {
        tokens.bump();
        return Ok(FeatureExpr::Not(Box::new(parse_unary(tokens)?)));
    }
    parse_atom(tokens)
}

fn parse_atom(tokens: &mut Tokens) -> Result<FeatureExpr> {
    match tokens.bump() {
        Some(t) if t == "(" => {
            let inner = parse_or(tokens)?;
            match tokens.bump() {
                Some(t) if t == ")" => Ok(inner),
                _ => Err(YangError::new(ErrorKind::Syntax, "unterminated '(' in if-feature expression")),
            }
        }
        Some(t) if t == ")" || t == "and" || t == "or" || t == "not" => Err(YangError::new(ErrorKind::Syntax, format!("unexpected '{}' in if-feature expression", t))),
        Some(name) => Ok(FeatureExpr::Feature(name)),
        None => Err(YangError::new(ErrorKind::Syntax, "empty if-feature expression")),
    }
}

/// Parses a single `if-feature` statement's argument text.
pub fn parse_if_feature(text: &str) -> Result<FeatureExpr> {
    let mut tokens = Tokens::tokenize(text);
    let expr = parse_or(&mut tokens)?;
    if tokens.pos != tokens.items.len() {
        return Err(YangError::new(ErrorKind::Syntax, format!("trailing tokens in if-feature expression '{}'", text)));
    }
    Ok(expr)
}

/// Whether every `if-feature` expression on a node evaluates to true (a
/// node with no `if-feature` statements is always enabled; multiple
/// statements are conjunctive).
pub fn all_satisfied(expressions: &[String], is_enabled: &dyn Fn(&str) -> bool) -> Result<bool> {
    for text in expressions {
        if !parse_if_feature(text)?.eval(is_enabled) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(names: &[&str]) -> impl Fn(&str) -> bool + '_ {
        move |n| names.contains(&n)
    }

    #[test]
    fn plain_feature_name() {
        let expr = parse_if_feature("turbo").unwrap();
        assert!(expr.eval(&enabled(&["turbo"])));
        assert!(!expr.eval(&enabled(&[])));
    }

    #[test]
    fn not_negates() {
        let expr = parse_if_feature("not turbo").unwrap();
        assert!(!expr.eval(&enabled(&["turbo"])));
        assert!(expr.eval(&enabled(&[])));
    }

    #[test]
    fn and_or_precedence_and_parens() {
        let expr = parse_if_feature("a and (b or c)").unwrap();
        assert!(expr.eval(&enabled(&["a", "b"])));
        assert!(!expr.eval(&enabled(&["a"])));
        assert!(!expr.eval(&enabled(&["b"])));
    }

    #[test]
    fn all_satisfied_is_conjunctive_across_statements() {
        let exprs = vec!["a".to_string(), "b".to_string()];
        assert!(all_satisfied(&exprs, &enabled(&["a", "b"])).unwrap());
        assert!(!all_satisfied(&exprs, &enabled(&["a"])).unwrap());
    }

    #[test]
    fn rejects_unterminated_parenthesis() {
        assert!(parse_if_feature("(a and b").is_err());
    }
}
