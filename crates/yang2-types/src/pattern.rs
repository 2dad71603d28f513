//! Compiled `pattern` restrictions (spec.md §4.4 "For strings").
//!
//! Patterns are accumulated as a conjunctive list and never composed or
//! simplified — every pattern in the list is checked against a candidate
//! string, honoring each pattern's own `invert-match` modifier.

use regex::Regex;
use yang2_base::{ErrorKind, Result, YangError};

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    source: String,
    pub invert_match: bool,
}

impl CompiledPattern {
    pub fn compile(source: &str, invert_match: bool) -> Result<Self> {
        let anchored = format!("^(?:{})$", source);
        let regex = Regex::new(&anchored).map_err(|e| YangError::new(ErrorKind::Validation, format!("invalid pattern '{}': {}", source, e)))?;
        Ok(Self { regex, source: source.to_string(), invert_match })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn matches_regex(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// Whether `candidate` satisfies this single pattern restriction,
    /// honoring `invert_match`.
    pub fn is_satisfied_by(&self, candidate: &str) -> bool {
        self.matches_regex(candidate) != self.invert_match
    }
}

/// A conjunctive list of compiled patterns; `candidate` must satisfy every
/// one.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    pub fn new(patterns: Vec<CompiledPattern>) -> Self {
        Self { patterns }
    }

    pub fn is_satisfied_by(&self, candidate: &str) -> bool {
        self.patterns.iter().all(|p| p.is_satisfied_by(candidate))
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_pattern_requires_full_match() {
        let p = CompiledPattern::compile("[a-z]+", false).unwrap();
        assert!(p.is_satisfied_by("abc"));
        assert!(!p.is_satisfied_by("abc1"));
    }

    #[test]
    fn invert_match_flips_the_result() {
        let p = CompiledPattern::compile("forbidden", true).unwrap();
        assert!(p.is_satisfied_by("allowed"));
        assert!(!p.is_satisfied_by("forbidden"));
    }

    #[test]
    fn pattern_set_requires_every_pattern_to_be_satisfied() {
        let set = PatternSet::new(vec![CompiledPattern::compile("[a-z]+", false).unwrap(), CompiledPattern::compile(".{3,}", false).unwrap()]);
        assert!(set.is_satisfied_by("abcd"));
        assert!(!set.is_satisfied_by("ab"));
        assert!(!set.is_satisfied_by("AB12"));
    }
}
