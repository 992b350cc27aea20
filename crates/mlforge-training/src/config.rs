//! Configuration for the training pipeline.
//!
//! This module provides [`PipelineConfig`] and its builder. The config
//! holds the two filesystem locations the orchestrator writes to: the
//! artifact directory and the metrics file inside it.
//!
//! # Example
//!
//! ```no_run
//! use mlforge_training::PipelineConfig;
//!
//! let config = PipelineConfig::builder()
//!     .artifacts_dir("out/run-7")
//!     .metrics_file("out/run-7/metrics.json")
//!     .build()
//!     .expect("valid config");
//! ```

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Configuration for a training-pipeline run.
///
/// Immutable for the duration of a run. `Default` yields a fresh value with
/// the conventional `artifacts` layout each time it is called; there is no
/// shared default instance, so runs cannot leak state into each other.
///
/// Building through [`PipelineConfig::builder()`] validates the paths and
/// creates the artifact directory (recursively, idempotently). A config
/// obtained via `Default` performs no I/O until it reaches a pipeline
/// builder, which repeats the same directory guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory where all run-produced files are stored.
    pub artifacts_dir: PathBuf,

    /// Location of the metrics document written after a successful run.
    pub metrics_file: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let artifacts_dir = PathBuf::from("artifacts");
        let metrics_file = artifacts_dir.join("metrics.json");
        Self {
            artifacts_dir,
            metrics_file,
        }
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    #[must_use]
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Create the artifact directory if it does not exist.
    ///
    /// Recursive and idempotent: an already-existing directory is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ArtifactDir`] on a real I/O failure such as
    /// a permission problem.
    pub fn ensure_artifacts_dir(&self) -> Result<(), PipelineError> {
        fs::create_dir_all(&self.artifacts_dir).map_err(|source| PipelineError::ArtifactDir {
            path: self.artifacts_dir.clone(),
            source,
        })
    }
}

/// Builder for [`PipelineConfig`].
///
/// Created via [`PipelineConfig::builder()`]. All setters return `self` to
/// allow method chaining.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Set the artifact directory (default: `artifacts`).
    #[must_use]
    pub fn artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.artifacts_dir = dir.into();
        self
    }

    /// Set the metrics file location (default: `artifacts/metrics.json`).
    #[must_use]
    pub fn metrics_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.metrics_file = path.into();
        self
    }

    /// Build the configuration, validating the paths and creating the
    /// artifact directory.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if either path is empty,
    /// or [`PipelineError::ArtifactDir`] if the directory cannot be
    /// created.
    pub fn build(self) -> Result<PipelineConfig, PipelineError> {
        if self.config.artifacts_dir.as_os_str().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "artifacts_dir must not be empty".to_string(),
            ));
        }

        if self.config.metrics_file.as_os_str().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "metrics_file must not be empty".to_string(),
            ));
        }

        self.config.ensure_artifacts_dir()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
        assert_eq!(
            config.metrics_file,
            PathBuf::from("artifacts").join("metrics.json")
        );
    }

    #[test]
    fn test_default_reconstructed_per_call() {
        // Two calls yield equal but independent values.
        let a = PipelineConfig::default();
        let b = PipelineConfig::default();
        assert_eq!(a, b);
    }

    #[test]
    fn test_builder_creates_artifacts_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("artifacts");
        assert!(!dir.exists());

        let config = PipelineConfig::builder()
            .artifacts_dir(&dir)
            .metrics_file(dir.join("metrics.json"))
            .build()
            .unwrap();

        assert!(dir.is_dir());
        assert_eq!(config.artifacts_dir, dir);
    }

    #[test]
    fn test_builder_idempotent_on_existing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("artifacts");

        for _ in 0..2 {
            PipelineConfig::builder()
                .artifacts_dir(&dir)
                .metrics_file(dir.join("metrics.json"))
                .build()
                .unwrap();
        }

        assert!(dir.is_dir());
    }

    #[test]
    fn test_builder_creates_nested_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("deeply").join("nested").join("artifacts");

        PipelineConfig::builder()
            .artifacts_dir(&dir)
            .metrics_file(dir.join("metrics.json"))
            .build()
            .unwrap();

        assert!(dir.is_dir());
    }

    #[test]
    fn test_empty_artifacts_dir_rejected() {
        let result = PipelineConfig::builder().artifacts_dir("").build();
        let err = result.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
        assert!(err.to_string().contains("artifacts_dir"));
    }

    #[test]
    fn test_empty_metrics_file_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let result = PipelineConfig::builder()
            .artifacts_dir(tmp.path().join("artifacts"))
            .metrics_file("")
            .build();
        let err = result.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
        assert!(err.to_string().contains("metrics_file"));
    }
}
