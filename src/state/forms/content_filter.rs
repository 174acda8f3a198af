//! Denylist-based screening of free-text input
//!
//! Advisory only: the API performs its own validation. This exists to give
//! immediate feedback before a request is sent.

/// Substrings rejected when no list is configured
pub const DEFAULT_FORBIDDEN_PATTERNS: &[&str] = &[
    "--",
    "/*",
    "*/",
    ";",
    "{",
    "}",
    "<script",
    "</script",
    "javascript:",
    "drop table",
    "delete from",
    "insert into",
    "select * from",
    "union select",
    "$where",
    "$ne",
];

/// Case-insensitive substring denylist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFilter {
    /// Lowercased, non-empty patterns
    patterns: Vec<String>,
}

impl ContentFilter {
    /// Build a filter from an arbitrary pattern list.
    /// Patterns are case-folded here; blank entries are dropped.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().to_lowercase())
            .filter(|p| !p.trim().is_empty())
            .collect();
        Self { patterns }
    }

    /// The configured patterns, already lowercased
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Return the first pattern contained in any of the given fields
    pub fn find_violation<'a, I>(&self, fields: I) -> Option<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for field in fields {
            let folded = field.to_lowercase();
            if let Some(pattern) = self.patterns.iter().find(|p| folded.contains(p.as_str())) {
                return Some(pattern.as_str());
            }
        }
        None
    }

    /// True when none of the fields contains a forbidden pattern
    pub fn is_safe<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.find_violation(fields).is_none()
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FORBIDDEN_PATTERNS)
    }
}
