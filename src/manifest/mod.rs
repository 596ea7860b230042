//! Manifest parsing - the declarative include/exclude rule set

mod matcher;

pub use matcher::Matcher;

use crate::types::SyncError;
use serde::Deserialize;
use std::path::Path;

/// A single include rule
///
/// An entry name is selected by this rule when it matches `pattern`, matches
/// none of the `excluded` patterns, and (when `extensions` is non-empty)
/// carries one of the allowed suffixes.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Rule {
    /// Glob-style name pattern (`*` = any run of characters within one name,
    /// `?` = single character), matched against entry names per directory
    /// level, never against full paths
    pub pattern: String,

    /// Sub-patterns or literal names to skip even though they match `pattern`
    #[serde(default)]
    pub excluded: Vec<String>,

    /// Allowed file suffixes; accepted as `py`, `.py`, or `*.py`
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl Rule {
    /// Rule with a bare pattern and no narrowing
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            excluded: Vec::new(),
            extensions: Vec::new(),
        }
    }
}

/// Ordered rule set describing which files/directories are in scope
///
/// Rules are unioned: an entry is in scope when any rule selects it. Order
/// carries no priority.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Manifest {
    /// Empty manifest: the derived matcher excludes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest from bare patterns, one rule each
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: patterns.into_iter().map(Rule::new).collect(),
        }
    }

    /// Parse the structured TOML encoding (`[[rules]]` tables)
    pub fn from_toml_str(input: &str) -> Result<Self, SyncError> {
        toml::from_str(input).map_err(|e| SyncError::Manifest(e.to_string()))
    }

    /// Parse the plain-text encoding: one pattern per line, blank lines and
    /// `#` comments skipped
    pub fn from_pattern_lines(input: &str) -> Self {
        let patterns = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        Self::from_patterns(patterns)
    }

    /// Load a manifest file, choosing the encoding by extension: `.toml`
    /// parses as TOML, anything else as one pattern per line
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SyncError::Manifest(format!("cannot read {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_toml_str(&contents)
        } else {
            Ok(Self::from_pattern_lines(&contents))
        }
    }

    /// Compile every rule's globs into a reusable [`Matcher`]
    ///
    /// A malformed pattern fails here, before any filesystem mutation.
    pub fn matcher(&self) -> Result<Matcher, SyncError> {
        Matcher::build(self)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pattern_lines_skips_blanks_and_comments() {
        let manifest = Manifest::from_pattern_lines("*.md\n\n# docs only\ndocs\n");
        assert_eq!(
            manifest,
            Manifest::from_patterns(["*.md", "docs"]),
        );
    }

    #[test]
    fn test_from_toml_str() {
        let manifest = Manifest::from_toml_str(
            r#"
            [[rules]]
            pattern = "*.md"

            [[rules]]
            pattern = "src"
            excluded = ["generated_*"]
            extensions = ["rs", "toml"]
            "#,
        )
        .expect("valid manifest TOML");

        assert_eq!(manifest.rules.len(), 2);
        assert_eq!(manifest.rules[0], Rule::new("*.md"));
        assert_eq!(manifest.rules[1].excluded, vec!["generated_*"]);
        assert_eq!(manifest.rules[1].extensions, vec!["rs", "toml"]);
    }

    #[test]
    fn test_from_toml_str_rejects_garbage() {
        let result = Manifest::from_toml_str("rules = 3");
        assert!(matches!(result, Err(crate::types::SyncError::Manifest(_))));
    }

    #[test]
    fn test_empty_manifest() {
        assert!(Manifest::new().is_empty());
        assert!(Manifest::from_pattern_lines("").is_empty());
    }
}
