//! # Wildcard pattern set for dynamic admission.
//!
//! [`PatternSet`] holds the operator-declared wildcard patterns of one resource
//! kind and answers "should this freshly discovered name be auto-admitted?".
//!
//! Each pattern is translated by escaping its literal segments and replacing
//! every `*` with "match any sequence", then compiled anchored at the start of
//! the candidate. The match is a prefix match, not a full match: `"foo"` admits
//! `"foo/bar"`.
//!
//! ## Rules
//! - Patterns accumulate monotonically: `insert` only adds, nothing removes.
//! - Duplicate inserts are ignored.
//! - Compiled matchers are cached at insert time; `matches` is pure and cheap.

use regex::Regex;

/// Characters treated as wildcards in a pattern string.
const WILDCARD: char = '*';

/// Accumulating set of wildcard patterns with cached compiled matchers.
#[derive(Debug, Default)]
pub struct PatternSet {
    raw: Vec<String>,
    compiled: Vec<Regex>,
}

impl PatternSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern. Returns `true` if it was new.
    ///
    /// A pattern that is already stored (string-equal) is ignored.
    pub fn insert(&mut self, pattern: &str) -> bool {
        if self.raw.iter().any(|p| p == pattern) {
            return false;
        }
        // Escaped input always compiles; the guard keeps the failure path
        // panic-free regardless.
        let Ok(regex) = Regex::new(&translate(pattern)) else {
            return false;
        };
        self.raw.push(pattern.to_string());
        self.compiled.push(regex);
        true
    }

    /// True if any stored pattern matches the candidate name (prefix match,
    /// anchored at the start).
    pub fn matches(&self, candidate: &str) -> bool {
        self.compiled.iter().any(|re| re.is_match(candidate))
    }

    /// True if the set stores this exact pattern string.
    pub fn contains(&self, pattern: &str) -> bool {
        self.raw.iter().any(|p| p == pattern)
    }

    /// Number of stored patterns.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True if no patterns are stored.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Stored pattern strings, in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.raw
    }
}

/// True if the string contains at least one wildcard character.
///
/// Used by reconfiguration to partition raw name lists into patterns and plain
/// names.
pub(crate) fn is_pattern(name: &str) -> bool {
    name.contains(WILDCARD)
}

/// Translates a wildcard pattern into a start-anchored regex expression.
///
/// Literal segments are escaped, so only `*` is magic. No trailing anchor:
/// prefix semantics.
fn translate(pattern: &str) -> String {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for (i, segment) in pattern.split(WILDCARD).enumerate() {
        if i > 0 {
            expr.push_str(".*");
        }
        expr.push_str(&regex::escape(segment));
    }
    expr
}
