//! Compiled manifest predicate

use super::{Manifest, Rule};
use crate::types::SyncError;
use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::Path;

/// One rule with its globs compiled
#[derive(Debug)]
struct CompiledRule {
    pattern: GlobMatcher,
    excluded: GlobSet,
    extensions: Vec<String>,
}

impl CompiledRule {
    fn build(rule: &Rule) -> Result<Self, SyncError> {
        Ok(Self {
            pattern: compile_glob(&rule.pattern)?.compile_matcher(),
            excluded: compile_glob_set(&rule.excluded)?,
            extensions: rule
                .extensions
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect(),
        })
    }

    fn selects(&self, name: &str) -> bool {
        if !self.pattern.is_match(name) || self.excluded.is_match(name) {
            return false;
        }
        if self.extensions.is_empty() {
            return true;
        }
        match Path::new(name).extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.extensions.iter().any(|allowed| allowed == ext),
            None => false,
        }
    }
}

/// The predicate derived from a [`Manifest`]
///
/// Built once per synchronization run and reused at every directory level.
/// Matching is per-level and name-only: `*` never crosses a path separator,
/// and a directory whose name fails to match is excluded wholesale together
/// with everything beneath it.
#[derive(Debug)]
pub struct Matcher {
    rules: Vec<CompiledRule>,
}

impl Matcher {
    pub(super) fn build(manifest: &Manifest) -> Result<Self, SyncError> {
        let rules = manifest
            .rules
            .iter()
            .map(CompiledRule::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Whether a single entry name is in the manifest's scope
    ///
    /// An empty manifest includes everything.
    pub fn is_match(&self, name: &str) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        self.rules.iter().any(|rule| rule.selects(name))
    }

    /// The subset of `names` at one directory level to exclude from the copy
    pub fn excluded<I, S>(&self, names: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter(|name| !self.is_match(name.as_ref()))
            .map(|name| name.as_ref().to_string())
            .collect()
    }
}

fn compile_glob(pattern: &str) -> Result<globset::Glob, SyncError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| SyncError::Pattern {
            pattern: pattern.to_string(),
            source: e,
        })
}

fn compile_glob_set(patterns: &[String]) -> Result<GlobSet, SyncError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    builder.build().map_err(|e| SyncError::Pattern {
        pattern: patterns.join(", "),
        source: e,
    })
}

/// Accept extension entries written as `py`, `.py`, or `*.py`
fn normalize_extension(entry: &str) -> String {
    entry
        .trim_start_matches("*.")
        .trim_start_matches('.')
        .to_string()
}
