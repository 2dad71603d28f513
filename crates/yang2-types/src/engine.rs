//! `store`/`print`/`duplicate`/`compare` for every built-in type
//! (spec.md §4.5, the type-value engine proper).
//!
//! `identityref`, `leafref`, and `union` need lookups this crate has no
//! knowledge of (identity DAG membership, schema-tree path resolution,
//! the other member types of a union) — per [`crate::builtin::BuiltinType`]'s
//! isolation from the parsed/compiled tree, those three take the lookup as
//! a caller-supplied closure rather than reaching for a `Context` directly.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use yang2_base::{ErrorKind, Result, YangError};

use crate::enumbits::BitSet;
use crate::enumbits::EnumSet;
use crate::interval::RestrictionSet;
use crate::pattern::PatternSet;
use crate::value::{Comparison, Value};

fn syntax(msg: impl Into<String>) -> YangError {
    YangError::new(ErrorKind::Syntax, msg)
}

fn validation(msg: impl Into<String>) -> YangError {
    YangError::new(ErrorKind::Validation, msg)
}

pub fn duplicate(value: &Value) -> Value {
    value.duplicate()
}

pub fn compare(a: &Value, b: &Value) -> Comparison {
    a.compare(b)
}

// ---- Integer types (int8..int64, uint8..uint64) ----

fn parse_integer_text(text: &str) -> Result<i128> {
    if text.is_empty() || text.chars().any(|c| c.is_whitespace()) {
        return Err(syntax(format!("'{}' is not a valid integer literal", text)));
    }
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1i128, rest),
        None => match text.strip_prefix('+') {
            Some(rest) => (1i128, rest),
            None => (1i128, text),
        },
    };
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
        return Err(syntax(format!("'{}' is not a valid integer literal", text)));
    }
    let magnitude: i128 = rest.parse().map_err(|_| syntax(format!("'{}' is not a valid integer literal", text)))?;
    if text.starts_with('+') && magnitude == 0 {
        return Err(syntax("'+0' is not a valid integer literal: a leading '+' on zero is redundant"));
    }
    Ok(sign * magnitude)
}

pub fn store_integer(text: &str, natural_bounds: (i128, i128), restriction: &RestrictionSet) -> Result<Value> {
    let n = parse_integer_text(text)?;
    if n < natural_bounds.0 || n > natural_bounds.1 {
        return Err(validation(format!("'{}' does not fit the type's min/max bounds", text)));
    }
    if !restriction.contains(n) {
        return Err(validation(format!("'{}' does not satisfy the range constraint", text)));
    }
    Ok(Value::Integer(n))
}

/// Canonical integer print: `i128`'s own `Display` already omits a
/// leading `+` and redundant leading zeros.
pub fn print_integer(value: &Value) -> Result<String> {
    match value {
        Value::Integer(n) => Ok(n.to_string()),
        _ => Err(YangError::internal("print_integer called on a non-integer value")),
    }
}

// ---- decimal64 ----

pub fn store_decimal64(text: &str, fraction_digits: u8, restriction: &RestrictionSet) -> Result<Value> {
    let scaled = crate::range::decimal64_literal(text, fraction_digits)?;
    if !restriction.contains(scaled) {
        return Err(validation(format!("'{}' does not satisfy the range constraint", text)));
    }
    Ok(Value::Decimal64(scaled))
}

pub fn print_decimal64(value: &Value, fraction_digits: u8) -> Result<String> {
    let scaled = match value {
        Value::Decimal64(s) => *s,
        _ => return Err(YangError::internal("print_decimal64 called on a non-decimal64 value")),
    };
    let scale = 10i128.pow(fraction_digits as u32);
    let magnitude = scaled.unsigned_abs();
    let int_part = magnitude / scale as u128;
    let frac_part = magnitude % scale as u128;
    let sign = if scaled < 0 { "-" } else { "" };
    Ok(format!("{}{}.{:0width$}", sign, int_part, frac_part, width = fraction_digits as usize))
}

// ---- boolean ----

pub fn store_boolean(text: &str) -> Result<Value> {
    match text {
        "true" => Ok(Value::Boolean(true)),
        "false" => Ok(Value::Boolean(false)),
        other => Err(syntax(format!("'{}' is not a valid boolean (expected 'true' or 'false')", other))),
    }
}

pub fn print_boolean(value: &Value) -> Result<String> {
    match value {
        Value::Boolean(true) => Ok("true".to_string()),
        Value::Boolean(false) => Ok("false".to_string()),
        _ => Err(YangError::internal("print_boolean called on a non-boolean value")),
    }
}

// ---- empty ----

pub fn store_empty(text: &str) -> Result<Value> {
    if text.is_empty() {
        Ok(Value::Empty)
    } else {
        Err(syntax("the 'empty' type carries no text"))
    }
}

pub fn print_empty(value: &Value) -> Result<String> {
    match value {
        Value::Empty => Ok(String::new()),
        _ => Err(YangError::internal("print_empty called on a non-empty value")),
    }
}

// ---- binary ----

pub fn store_binary(text: &str, length: Option<&RestrictionSet>) -> Result<Value> {
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64.decode(stripped.as_bytes()).map_err(|e| syntax(format!("'{}' is not valid base64: {}", text, e)))?;
    if let Some(length) = length {
        if !length.contains(bytes.len() as i128) {
            return Err(validation(format!("binary value of {} octets does not satisfy the length constraint", bytes.len())));
        }
    }
    Ok(Value::Binary(bytes))
}

pub fn print_binary(value: &Value) -> Result<String> {
    match value {
        Value::Binary(bytes) => Ok(BASE64.encode(bytes)),
        _ => Err(YangError::internal("print_binary called on a non-binary value")),
    }
}

// ---- bits ----

pub fn store_bits(text: &str, bits: &BitSet) -> Result<Value> {
    let mut names: Vec<&str> = Vec::new();
    for token in text.split_whitespace() {
        if names.contains(&token) {
            return Err(validation(format!("bit '{}' is set more than once", token)));
        }
        if bits.find(token).is_none() {
            return Err(validation(format!("'{}' is not a member of this bits type", token)));
        }
        names.push(token);
    }
    names.sort_by_key(|name| bits.find(name).expect("checked above").position);
    Ok(Value::Bits(names.into_iter().map(str::to_string).collect()))
}

pub fn print_bits(value: &Value) -> Result<String> {
    match value {
        Value::Bits(names) => Ok(names.join(" ")),
        _ => Err(YangError::internal("print_bits called on a non-bits value")),
    }
}

// ---- enumeration ----

pub fn store_enumeration(text: &str, members: &EnumSet) -> Result<Value> {
    if members.find(text).is_none() {
        return Err(validation(format!("'{}' is not a declared enum member", text)));
    }
    Ok(Value::Enumeration(text.to_string()))
}

pub fn print_enumeration(value: &Value) -> Result<String> {
    match value {
        Value::Enumeration(name) => Ok(name.clone()),
        _ => Err(YangError::internal("print_enumeration called on a non-enumeration value")),
    }
}

// ---- string ----

pub fn store_string(text: &str, length: Option<&RestrictionSet>, patterns: Option<&PatternSet>) -> Result<Value> {
    if let Some(length) = length {
        let scalars = text.chars().count() as i128;
        if !length.contains(scalars) {
            return Err(validation(format!("string of {} characters does not satisfy the length constraint", scalars)));
        }
    }
    if let Some(patterns) = patterns {
        if !patterns.is_satisfied_by(text) {
            return Err(validation(format!("'{}' does not satisfy the range constraint", text)));
        }
    }
    Ok(Value::String(text.to_string()))
}

pub fn print_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(YangError::internal("print_string called on a non-string value")),
    }
}

// ---- instance-identifier ----

/// Shape-only validation: a non-empty string starting with `/`. Existence
/// of the referenced instance is an instance-time check outside this
/// crate's scope.
pub fn store_instance_identifier(text: &str) -> Result<Value> {
    if !text.starts_with('/') {
        return Err(syntax("an instance-identifier must be an absolute path starting with '/'"));
    }
    Ok(Value::InstanceIdentifier(text.to_string()))
}

pub fn print_instance_identifier(value: &Value) -> Result<String> {
    match value {
        Value::InstanceIdentifier(s) => Ok(s.clone()),
        _ => Err(YangError::internal("print_instance_identifier called on a non-instance-identifier value")),
    }
}

// ---- identityref ----

/// `is_known_identity` tells whether `(prefix, name)` names an identity
/// derived-from-or-equal-to one of the type's declared base identities;
/// the identity DAG itself lives in the compiler, not here.
pub fn store_identityref(text: &str, is_known_identity: &dyn Fn(Option<&str>, &str) -> bool) -> Result<Value> {
    let (prefix, name) = match text.split_once(':') {
        Some((p, n)) => (Some(p.to_string()), n.to_string()),
        None => (None, text.to_string()),
    };
    if name.is_empty() {
        return Err(syntax(format!("'{}' is not a valid identityref", text)));
    }
    if !is_known_identity(prefix.as_deref(), &name) {
        return Err(YangError::new(ErrorKind::Unresolved, format!("'{}' does not name a known identity derived from this type's base", text)));
    }
    Ok(Value::Identityref { prefix, name })
}

pub fn print_identityref(value: &Value) -> Result<String> {
    match value {
        Value::Identityref { prefix: Some(p), name } => Ok(format!("{}:{}", p, name)),
        Value::Identityref { prefix: None, name } => Ok(name.clone()),
        _ => Err(YangError::internal("print_identityref called on a non-identityref value")),
    }
}

// ---- leafref ----

/// Stores `text` as the leafref's referent type, by delegating to
/// `resolve_referent` (the leafref path's target type, evaluated by the
/// compiler against the compiled schema). `require-instance` is an
/// instance-time concern and is not checked here.
pub fn store_leafref(text: &str, resolve_referent: &dyn Fn(&str) -> Result<Value>) -> Result<Value> {
    Ok(Value::Leafref(Box::new(resolve_referent(text)?)))
}

pub fn print_leafref(value: &Value, print_referent: &dyn Fn(&Value) -> Result<String>) -> Result<String> {
    match value {
        Value::Leafref(inner) => print_referent(inner),
        _ => Err(YangError::internal("print_leafref called on a non-leafref value")),
    }
}

// ---- union ----

/// Tries each member store function in declaration order; the first
/// success wins (spec.md §4.5 "Union").
pub fn store_union(text: &str, members: &[&dyn Fn(&str) -> Result<Value>]) -> Result<Value> {
    for member in members {
        if let Ok(value) = member(text) {
            return Ok(Value::Union(Box::new(value)));
        }
    }
    Err(validation(format!("'{}' does not fit any member type of the union", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumbits::{BitMember, EnumMember};
    use crate::interval::Interval;

    fn unrestricted_i8() -> RestrictionSet {
        RestrictionSet::unrestricted((-128, 127))
    }

    #[test]
    fn integer_rejects_redundant_plus_on_zero() {
        let err = store_integer("+0", (-128, 127), &unrestricted_i8()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn integer_round_trips_through_print() {
        let v = store_integer("-42", (-128, 127), &unrestricted_i8()).unwrap();
        assert_eq!(print_integer(&v).unwrap(), "-42");
    }

    #[test]
    fn integer_out_of_bounds_vs_out_of_range_are_distinct() {
        let restricted = RestrictionSet::from_intervals(vec![Interval::new(0, 50)], (-128, 127)).unwrap();
        let out_of_range = store_integer("60", (-128, 127), &restricted).unwrap_err();
        assert_eq!(out_of_range.message, "'60' does not satisfy the range constraint");
        let out_of_bounds = store_integer("200", (-128, 127), &restricted).unwrap_err();
        assert_eq!(out_of_bounds.message, "'200' does not fit the type's min/max bounds");
    }

    #[test]
    fn decimal64_canonical_print_pads_fractional_digits() {
        let restriction = RestrictionSet::unrestricted((-(i64::MAX as i128), i64::MAX as i128));
        let v = store_decimal64("3.1", 2, &restriction).unwrap();
        assert_eq!(print_decimal64(&v, 2).unwrap(), "3.10");
    }

    #[test]
    fn decimal64_negative_zero_canonicalizes_to_zero() {
        let restriction = RestrictionSet::unrestricted((-(i64::MAX as i128), i64::MAX as i128));
        let v = store_decimal64("-0.00", 2, &restriction).unwrap();
        assert_eq!(print_decimal64(&v, 2).unwrap(), "0.00");
    }

    #[test]
    fn boolean_rejects_anything_but_true_or_false() {
        assert!(store_boolean("true").is_ok());
        assert!(store_boolean("True").is_err());
    }

    #[test]
    fn empty_rejects_non_empty_text() {
        assert!(store_empty("").is_ok());
        assert!(store_empty("x").is_err());
    }

    #[test]
    fn binary_round_trips_and_ignores_embedded_whitespace() {
        let v = store_binary("aG Vs bG8=", None).unwrap();
        assert_eq!(print_binary(&v).unwrap(), "aGVsbG8=");
    }

    #[test]
    fn bits_canonicalizes_to_ascending_position_order() {
        let bits = BitSet::new(vec![BitMember { name: "b".into(), position: 1 }, BitMember { name: "a".into(), position: 0 }]).unwrap();
        let v = store_bits("b a", &bits).unwrap();
        assert_eq!(print_bits(&v).unwrap(), "a b");
    }

    #[test]
    fn bits_rejects_duplicates_and_unknown_names() {
        let bits = BitSet::new(vec![BitMember { name: "a".into(), position: 0 }]).unwrap();
        assert!(store_bits("a a", &bits).is_err());
        assert!(store_bits("z", &bits).is_err());
    }

    #[test]
    fn enumeration_requires_a_declared_member() {
        let members = EnumSet::new(vec![EnumMember { name: "up".into(), value: 0 }]).unwrap();
        assert!(store_enumeration("up", &members).is_ok());
        assert!(store_enumeration("down", &members).is_err());
    }

    #[test]
    fn string_checks_length_and_pattern() {
        use crate::pattern::CompiledPattern;
        let length = RestrictionSet::from_intervals(vec![Interval::new(1, 5)], (0, i128::MAX)).unwrap();
        let patterns = PatternSet::new(vec![CompiledPattern::compile("[a-z]+", false).unwrap()]);
        assert!(store_string("abc", Some(&length), Some(&patterns)).is_ok());
        assert!(store_string("ABCDEFG", Some(&length), Some(&patterns)).is_err());
    }

    #[test]
    fn union_tries_members_in_order() {
        let as_bool: &dyn Fn(&str) -> Result<Value> = &store_boolean;
        let as_int: &dyn Fn(&str) -> Result<Value> = &|t| store_integer(t, (-128, 127), &unrestricted_i8());
        let v = store_union("12", &[as_bool, as_int]).unwrap();
        assert_eq!(v, Value::Union(Box::new(Value::Integer(12))));
    }

    #[test]
    fn identityref_resolves_via_supplied_predicate() {
        let v = store_identityref("acme:widget", &|prefix, name| prefix == Some("acme") && name == "widget").unwrap();
        assert_eq!(print_identityref(&v).unwrap(), "acme:widget");

        let err = store_identityref("acme:gadget", &|_, _| false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unresolved);
    }
}
