//! Ant-style include/exclude matching for fileset selection.
//!
//! - `*` matches zero or more characters within one path segment
//! - `?` matches exactly one character within one path segment
//! - `**` matches zero or more whole segments
//!
//! Paths are matched segment-wise: a relative path is split into its components
//! and re-joined with `/` before matching, so patterns never need to special-case
//! the platform separator. Patterns may use either `/` or `\`.

mod defaults;

#[cfg(test)]
mod tests;

pub use defaults::DEFAULT_EXCLUDES;

use crate::error::{Result, ScourError};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Component, Path};

/// Compiled include/exclude pattern sets for one fileset.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    /// `None` means "match everything".
    includes: Option<GlobSet>,
    excludes: GlobSet,
}

impl PatternMatcher {
    /// Compile include and exclude patterns.
    ///
    /// An empty `includes` list matches every path. When `use_default_excludes`
    /// is set, [`DEFAULT_EXCLUDES`] are appended to `excludes`.
    pub fn new(includes: &[String], excludes: &[String], use_default_excludes: bool) -> Result<Self> {
        let includes = if includes.is_empty() {
            None
        } else {
            Some(build_globset(includes.iter().map(String::as_str), "includes")?)
        };

        let defaults: &[&str] = if use_default_excludes {
            DEFAULT_EXCLUDES
        } else {
            &[]
        };
        let excludes = build_globset(
            excludes
                .iter()
                .map(String::as_str)
                .chain(defaults.iter().copied()),
            "excludes",
        )?;

        Ok(Self { includes, excludes })
    }

    /// True if `relative` satisfies an include pattern and no exclude pattern.
    pub fn matches(&self, relative: &Path) -> bool {
        let candidate = segment_path(relative);
        let included = self
            .includes
            .as_ref()
            .is_none_or(|set| set.is_match(&candidate));
        included && !self.excludes.is_match(&candidate)
    }

    /// True if `relative` hits an exclude pattern, regardless of includes.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.excludes.is_match(segment_path(relative))
    }
}

/// One-shot form of [`PatternMatcher::matches`] without default excludes.
pub fn matches(relative: &Path, includes: &[String], excludes: &[String]) -> Result<bool> {
    Ok(PatternMatcher::new(includes, excludes, false)?.matches(relative))
}

/// Compile patterns into a GlobSet, expanding Ant directory shorthands.
fn build_globset<'a>(
    patterns: impl IntoIterator<Item = &'a str>,
    field_name: &str,
) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        for expanded in expand_pattern(pattern) {
            let glob = GlobBuilder::new(&expanded)
                .literal_separator(true)
                .backslash_escape(false)
                .build()
                .map_err(|e| {
                    ScourError::InvalidRequest(format!(
                        "invalid glob pattern in {}: '{}' - {}",
                        field_name, pattern, e
                    ))
                })?;
            builder.add(glob);
        }
    }

    builder.build().map_err(|e| {
        ScourError::InvalidRequest(format!("failed to compile {} globs: {}", field_name, e))
    })
}

/// Normalize a pattern the way Ant does.
///
/// `dir/` is shorthand for `dir/**`, and `dir/**` also selects `dir` itself.
fn expand_pattern(pattern: &str) -> Vec<String> {
    let mut normalized = pattern.replace('\\', "/");
    if normalized.ends_with('/') {
        normalized.push_str("**");
    }

    match normalized.strip_suffix("/**") {
        Some(prefix) if !prefix.is_empty() => {
            let prefix = prefix.to_string();
            vec![normalized, prefix]
        }
        _ => vec![normalized],
    }
}

/// Join the normal components of a relative path with `/`.
pub(crate) fn segment_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
