//! OSC address pattern matching
//!
//! OSC addresses are `/`-separated parts:
//! ```text
//! /synth/1/freq
//! /mixer/channel/12/gain
//! ```
//!
//! Patterns (for routing):
//! - `?` matches any single character
//! - `*` matches any sequence of characters, including none
//! - `{foo,bar}` matches either alternative
//! - `[abc]`, `[a-z]` match one character from a set; `[!abc]` negates it
//!
//! A pattern only matches addresses with the same number of parts, and
//! neither side may contain an empty part.

use crate::{Error, Result};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Part separator
pub const SEPARATOR: char = '/';

/// Characters that make an address a pattern rather than a literal
const PATTERN_CHARS: &[char] = &['*', '?', '{', '}', '[', ']'];

/// Check that `address` and `pattern` split into the same number of parts
/// and that every part after the leading one is non-empty.
pub fn verify_parts(address: &str, pattern: &str) -> bool {
    let a: Vec<&str> = address.split(SEPARATOR).collect();
    let p: Vec<&str> = pattern.split(SEPARATOR).collect();

    if a.len() != p.len() || a.is_empty() {
        return false;
    }

    // Index 0 is whatever precedes the leading '/', normally ""
    a.iter()
        .zip(p.iter())
        .skip(1)
        .all(|(a, p)| !a.is_empty() && !p.is_empty())
}

/// Whether `s` contains any wildcard syntax
pub fn is_pattern(s: &str) -> bool {
    s.contains(PATTERN_CHARS)
}

/// Translate an OSC address pattern into an anchored regular expression.
///
/// Substitutions run in a fixed order: regex metacharacters that OSC treats
/// literally are escaped before any wildcard is expanded, so later steps never
/// see a backslash they introduced.
pub fn translate(pattern: &str) -> String {
    let body = pattern
        .replace('\\', "\\\\")
        .replace('.', "\\.")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('+', "\\+")
        .replace('^', "\\^")
        .replace('$', "\\$")
        .replace('|', "\\|")
        .replace('*', ".*")
        .replace('{', "(")
        .replace(',', "|")
        .replace('}', ")")
        .replace('?', ".")
        .replace("[!", "[^");
    format!("^{}$", body)
}

/// A compiled address pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    regex: regex_lite::Regex,
}

impl Pattern {
    /// Compile a pattern string
    pub fn compile(pattern: &str) -> Result<Self> {
        let regex_str = translate(pattern);
        let regex = regex_lite::Regex::new(&regex_str).map_err(|e| {
            debug!("OSC pattern {:?} failed to compile: {}", pattern, e);
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// Check if a concrete address matches this pattern
    pub fn matches(&self, address: &str) -> bool {
        if !verify_parts(address, &self.raw) {
            return false;
        }
        address == self.raw || (is_pattern(&self.raw) && self.regex.is_match(address))
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The translated regular expression
    pub fn regex(&self) -> &str {
        self.regex.as_str()
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl TryFrom<&str> for Pattern {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Pattern::compile(s)
    }
}

/// Test a concrete address against a pattern.
///
/// Part-count mismatches and empty parts are a plain `false`. Identical
/// strings match without compiling, and a pattern with no wildcard syntax is
/// compared literally. A malformed pattern is an error.
pub fn matches(address: &str, pattern: &str) -> Result<bool> {
    if !verify_parts(address, pattern) {
        return Ok(false);
    }
    if address == pattern {
        return Ok(true);
    }
    if !is_pattern(pattern) {
        return Ok(false);
    }
    Ok(Pattern::compile(pattern)?.regex.is_match(address))
}

/// Compiled patterns keyed by their raw string.
///
/// Patterns are immutable once compiled, so entries never need invalidating.
/// Safe to share between threads.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: DashMap<String, Arc<Pattern>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a compiled pattern, compiling and storing it on first use.
    /// Malformed patterns are not cached.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<Pattern>> {
        if let Some(compiled) = self.patterns.get(pattern) {
            trace!("OSC pattern cache hit: {}", pattern);
            return Ok(Arc::clone(compiled.value()));
        }

        trace!("OSC pattern cache miss: {}", pattern);
        let compiled = Arc::new(Pattern::compile(pattern)?);
        let entry = self
            .patterns
            .entry(pattern.to_string())
            .or_insert_with(|| Arc::clone(&compiled));
        Ok(Arc::clone(entry.value()))
    }

    /// Same semantics as [`matches`], reusing compiled patterns
    pub fn matches(&self, address: &str, pattern: &str) -> Result<bool> {
        if !verify_parts(address, pattern) {
            return Ok(false);
        }
        if address == pattern {
            return Ok(true);
        }
        if !is_pattern(pattern) {
            return Ok(false);
        }
        Ok(self.get_or_compile(pattern)?.regex.is_match(address))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn clear(&self) {
        self.patterns.clear();
    }
}
