//! Type-safe config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// A config field path used in diagnostics.
///
/// Paths follow the TOML shape of `shiori.toml`, with index suffixes for
/// list entries:
///
/// ```ignore
/// FieldPath::new("site.locales")
/// FieldPath::new("theme.sidebar").index(2)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Append a list index, e.g. `theme.nav[1]`.
    #[must_use]
    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{}]", self.0, i))
    }

    /// Append a child segment, e.g. `markdown.anchor.permalink`.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        Self(format!("{}.{}", self.0, segment))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_and_child() {
        let path = FieldPath::new("theme.sidebar").index(3);
        assert_eq!(path.as_str(), "theme.sidebar[3]");

        let path = FieldPath::new("markdown").child("extensions").index(0);
        assert_eq!(path.as_str(), "markdown.extensions[0]");
    }
}
