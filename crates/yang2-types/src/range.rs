//! Parses and derives `range`/`length` restriction text (spec.md §4.4).
//!
//! Grammar: `part (| part)*`, each `part` is `atom` or `atom .. atom`, each
//! `atom` is `min`, `max`, or a literal. `min`/`max` resolve against the
//! parent restriction's effective bounds. Literal parsing is
//! domain-specific (plain integers for `range` on integer types, scaled
//! decimals for `decimal64`, non-negative counts for `length`), so callers
//! supply a literal parser.

use yang2_base::{ErrorKind, Result, YangError};

use crate::interval::{Interval, RestrictionSet};

impl RestrictionSet {
    pub fn min(&self) -> i128 {
        self.intervals().first().expect("a restriction set always has at least one interval").lo
    }

    pub fn max(&self) -> i128 {
        self.intervals().last().expect("a restriction set always has at least one interval").hi
    }
}

fn parse_atom(text: &str, parent: &RestrictionSet, parse_literal: &dyn Fn(&str) -> Result<i128>) -> Result<i128> {
    match text {
        "min" => Ok(parent.min()),
        "max" => Ok(parent.max()),
        literal => parse_literal(literal),
    }
}

/// Parses restriction text into a [`RestrictionSet`], validating it against
/// `parent`'s bounds (spec.md §4.4 "Parse" and "Validate parsed form" —
/// deriving a subset of `parent` is a separate, later check: [`RestrictionSet::is_subset_of`]).
pub fn parse_restriction(text: &str, parent: &RestrictionSet, parse_literal: &dyn Fn(&str) -> Result<i128>) -> Result<RestrictionSet> {
    let mut intervals = Vec::new();
    for part in text.split('|') {
        let part = part.trim();
        if part.is_empty() {
            return Err(YangError::new(ErrorKind::Syntax, "empty range/length part"));
        }
        let interval = match part.split_once("..") {
            Some((lo, hi)) => {
                let lo = parse_atom(lo.trim(), parent, parse_literal)?;
                let hi = parse_atom(hi.trim(), parent, parse_literal)?;
                if lo > hi {
                    return Err(YangError::new(ErrorKind::Validation, format!("'{}' has a lower bound greater than its upper bound", part)));
                }
                Interval::new(lo, hi)
            }
            None => {
                let v = parse_atom(part, parent, parse_literal)?;
                Interval::new(v, v)
            }
        };
        intervals.push(interval);
    }
    RestrictionSet::from_intervals(intervals, (parent.min(), parent.max()))
}

/// Parses an integer literal: optional sign, then decimal digits.
pub fn integer_literal(text: &str) -> Result<i128> {
    text.parse::<i128>().map_err(|_| YangError::new(ErrorKind::Validation, format!("'{}' is not a valid integer literal", text)))
}

/// Parses a non-negative length count.
pub fn length_literal(text: &str) -> Result<i128> {
    let v = integer_literal(text)?;
    if v < 0 {
        return Err(YangError::new(ErrorKind::Validation, format!("'{}' is not a valid length (must be non-negative)", text)));
    }
    Ok(v)
}

/// Parses a decimal64 literal at `fraction_digits` scale into a scaled
/// integer (spec.md §4.4 "For decimal64").
pub fn decimal64_literal(text: &str, fraction_digits: u8) -> Result<i128> {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1i128, rest),
        None => (1i128, text.strip_prefix('+').unwrap_or(text)),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, f),
        None => (rest, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(YangError::new(ErrorKind::Validation, format!("'{}' is not a valid decimal64 literal", text)));
    }
    if frac_part.len() > fraction_digits as usize {
        return Err(YangError::new(ErrorKind::Validation, format!("'{}' has more fractional digits than fraction-digits {} permits", text, fraction_digits)));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit()) && !int_part.is_empty() {
        return Err(YangError::new(ErrorKind::Validation, format!("'{}' is not a valid decimal64 literal", text)));
    }
    if !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(YangError::new(ErrorKind::Validation, format!("'{}' is not a valid decimal64 literal", text)));
    }
    let int_value: i128 = if int_part.is_empty() { 0 } else { int_part.parse().map_err(|_| YangError::new(ErrorKind::Validation, format!("'{}' is not a valid decimal64 literal", text)))? };
    let mut frac_padded = frac_part.to_string();
    while frac_padded.len() < fraction_digits as usize {
        frac_padded.push('0');
    }
    let frac_value: i128 = if frac_padded.is_empty() { 0 } else { frac_padded.parse().unwrap_or(0) };
    let scale = 10i128.pow(fraction_digits as u32);
    Ok(sign * (int_value * scale + frac_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_i8() -> RestrictionSet {
        RestrictionSet::unrestricted((-128, 127))
    }

    #[test]
    fn parses_single_values_and_ranges() {
        let set = parse_restriction("0 .. 50 | 127", &full_i8(), &integer_literal).unwrap();
        assert!(set.contains(0));
        assert!(set.contains(50));
        assert!(set.contains(127));
        assert!(!set.contains(51));
    }

    #[test]
    fn min_and_max_resolve_against_parent_bounds() {
        let set = parse_restriction("min .. 0", &full_i8(), &integer_literal).unwrap();
        assert_eq!(set.min(), -128);
        assert_eq!(set.max(), 0);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = parse_restriction("50 .. 0", &full_i8(), &integer_literal).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn decimal64_literal_scales_by_fraction_digits() {
        assert_eq!(decimal64_literal("3.14", 2).unwrap(), 314);
        assert_eq!(decimal64_literal("3.1", 2).unwrap(), 310);
        assert_eq!(decimal64_literal("-3.1", 2).unwrap(), -310);
        assert!(decimal64_literal("3.145", 2).is_err());
    }

    #[test]
    fn length_literal_rejects_negative() {
        assert!(length_literal("-1").is_err());
        assert_eq!(length_literal("10").unwrap(), 10);
    }
}
