//! Request loading, validation, and builder helpers.

use super::model::{CleanupRequest, FilesetSpec};
use super::types::default_parallelism;
use crate::error::{Result, ScourError};
use std::path::{Path, PathBuf};

impl CleanupRequest {
    /// An empty request with default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a request from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(CleanupRequest)` - Successfully loaded and validated request
    /// * `Err(ScourError::UserError)` - The file could not be read or parsed
    /// * `Err(ScourError::InvalidRequest)` - The request failed validation
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ScourError::UserError(format!(
                "failed to read request file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a request from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let request: CleanupRequest = serde_yaml::from_str(yaml)
            .map_err(|e| ScourError::UserError(format!("failed to parse request YAML: {}", e)))?;

        request.validate()?;
        Ok(request)
    }

    /// Serialize the request to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ScourError::UserError(format!("failed to serialize request to YAML: {}", e))
        })
    }

    /// Validate field values without touching the filesystem.
    ///
    /// Validation rules:
    /// - `parallelism`, if set, must be greater than 0
    /// - every fileset must name a directory
    /// - include/exclude patterns must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.parallelism == Some(0) {
            return Err(ScourError::InvalidRequest(
                "parallelism must be greater than 0".to_string(),
            ));
        }

        for (index, fileset) in self.filesets.iter().enumerate() {
            if fileset.directory.as_os_str().is_empty() {
                return Err(ScourError::InvalidRequest(format!(
                    "fileset #{} has no directory",
                    index + 1
                )));
            }

            let empty_pattern = fileset
                .includes
                .iter()
                .chain(fileset.excludes.iter())
                .any(|p| p.trim().is_empty());
            if empty_pattern {
                return Err(ScourError::InvalidRequest(format!(
                    "fileset '{}' has an empty include/exclude pattern",
                    fileset.directory.display()
                )));
            }
        }

        Ok(())
    }

    /// Default targets that take part in this run, in declaration order.
    pub fn active_default_targets(&self) -> Vec<PathBuf> {
        if self.exclude_default_directories {
            return Vec::new();
        }
        self.default_targets
            .iter()
            .filter(|p| !p.as_os_str().is_empty())
            .cloned()
            .collect()
    }

    /// Worker count for the deletion phase.
    pub fn effective_parallelism(&self) -> usize {
        self.parallelism.unwrap_or_else(default_parallelism).max(1)
    }

    /// Append a default target.
    pub fn with_default_target(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_targets.push(path.into());
        self
    }

    /// Append a fileset.
    pub fn with_fileset(mut self, fileset: FilesetSpec) -> Self {
        self.filesets.push(fileset);
        self
    }

    /// Set the fail-fast policy.
    pub fn fail_on_error(mut self, fail: bool) -> Self {
        self.fail_on_error = fail;
        self
    }

    /// Enable or disable bounded retry.
    pub fn retry_on_error(mut self, retry: bool) -> Self {
        self.retry_on_error = retry;
        self
    }

    /// Fix the number of deletion workers.
    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = Some(workers);
        self
    }
}

impl FilesetSpec {
    /// A fileset selecting everything under `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Default::default()
        }
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.includes.push(pattern.into());
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Follow symbolic links while walking.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Toggle the built-in default excludes.
    pub fn use_default_excludes(mut self, enabled: bool) -> Self {
        self.use_default_excludes = enabled;
        self
    }
}
