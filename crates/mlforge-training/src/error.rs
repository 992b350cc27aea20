//! Error types for the training-pipeline orchestrator.
//!
//! This module defines [`PipelineError`], the single error type returned by
//! the public API. Whatever goes wrong inside a run, the caller always sees
//! a `PipelineError`; the variant records which part of the pipeline was
//! active and carries the original cause for diagnosis.
//!
//! # Error Handling
//!
//! Stage collaborators report failures as a boxed error ([`StageError`]),
//! which keeps the trait seams free of any particular error library. An
//! implementation built on `anyhow` converts with `?` or `.into()`; one
//! built on `thiserror` boxes its own enum the same way.

use std::path::PathBuf;

use thiserror::Error;

use crate::progress::PipelineStage;

/// Boxed error type carried across the stage collaborator seams.
///
/// Ingestion, transformation, and trainer implementations return this from
/// their trait methods. Any error type that is `Send + Sync` converts into
/// it, including `anyhow::Error`.
pub type StageError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Specific kinds of metrics-persistence failures.
///
/// The metrics document is encoded to JSON and written to the configured
/// path; either step can fail independently.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PersistenceError {
    /// Failed to encode the metrics record as JSON.
    #[error("failed to encode metrics: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failed to write the metrics document to disk.
    ///
    /// Covers disk-full, permission, and vanished-parent-directory failures.
    /// The pipeline does not attempt to re-create a directory that
    /// disappeared mid-run.
    #[error("failed to write metrics file: {0}")]
    Io(#[from] std::io::Error),
}

/// The error type for training-pipeline runs.
///
/// Every failure raised by a stage collaborator, or by the metrics-write
/// step, is caught at the orchestrator boundary and surfaced as one of
/// these variants. No metrics are persisted on any failure path.
///
/// # Diagnosis
///
/// - [`stage()`](Self::stage) reports which pipeline stage was active.
/// - The stage variants keep the collaborator's error as their
///   [`source`](std::error::Error::source), so the full cause chain stays
///   inspectable.
/// - `Display` embeds the cause message, e.g.
///   `model training failed: empty dataset`.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Invalid configuration or an incompletely specified pipeline.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// Creating the artifact directory at construction time failed.
    ///
    /// An already-existing directory is not an error; this is raised only
    /// for real I/O failures such as permission problems.
    #[error("failed to create artifact directory '{path}': {source}")]
    ArtifactDir {
        /// The directory that could not be created.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ingestion collaborator failed to produce the dataset split.
    #[error("data ingestion failed: {source}")]
    Ingestion {
        #[source]
        source: StageError,
    },

    /// The transformation collaborator failed.
    #[error("data transformation failed: {source}")]
    Transformation {
        #[source]
        source: StageError,
    },

    /// The trainer collaborator failed to fit a model.
    #[error("model training failed: {source}")]
    Training {
        #[source]
        source: StageError,
    },

    /// Writing the metrics document failed after training succeeded.
    #[error("failed to persist metrics: {0}")]
    Persistence(#[from] PersistenceError),
}

impl PipelineError {
    /// The pipeline stage that was active when this error was raised.
    ///
    /// Returns `None` for construction-time errors, which occur before the
    /// run starts.
    #[must_use]
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::Ingestion { .. } => Some(PipelineStage::Ingesting),
            Self::Transformation { .. } => Some(PipelineStage::Transforming),
            Self::Training { .. } => Some(PipelineStage::Training),
            Self::Persistence(_) => Some(PipelineStage::PersistingMetrics),
            Self::InvalidConfig(_) | Self::ArtifactDir { .. } => None,
        }
    }

    /// Check if this error originated in a stage collaborator (as opposed
    /// to configuration or metrics persistence).
    #[must_use]
    pub fn is_stage_failure(&self) -> bool {
        matches!(
            self,
            Self::Ingestion { .. } | Self::Transformation { .. } | Self::Training { .. }
        )
    }
}

// The error crosses thread boundaries when the host runs the pipeline on a
// worker thread.
static_assertions::assert_impl_all!(PipelineError: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn boxed(message: &str) -> StageError {
        anyhow::anyhow!("{message}").into()
    }

    #[test]
    fn test_display_embeds_cause() {
        let err = PipelineError::Training {
            source: boxed("empty dataset"),
        };
        assert_eq!(err.to_string(), "model training failed: empty dataset");
    }

    #[test]
    fn test_source_chain_preserved() {
        let err = PipelineError::Ingestion {
            source: boxed("source data missing"),
        };
        let cause = err.source().expect("stage variants carry a source");
        assert!(cause.to_string().contains("source data missing"));
    }

    #[test]
    fn test_stage_mapping() {
        assert_eq!(
            PipelineError::Ingestion { source: boxed("x") }.stage(),
            Some(PipelineStage::Ingesting)
        );
        assert_eq!(
            PipelineError::Transformation { source: boxed("x") }.stage(),
            Some(PipelineStage::Transforming)
        );
        assert_eq!(
            PipelineError::Training { source: boxed("x") }.stage(),
            Some(PipelineStage::Training)
        );
        assert_eq!(
            PipelineError::InvalidConfig("x".to_string()).stage(),
            None
        );
    }

    #[test]
    fn test_persistence_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PipelineError::from(PersistenceError::from(io));
        assert_eq!(err.stage(), Some(PipelineStage::PersistingMetrics));
        assert!(err.to_string().contains("failed to persist metrics"));
        assert!(!err.is_stage_failure());
    }

    #[test]
    fn test_is_stage_failure() {
        assert!(PipelineError::Training { source: boxed("x") }.is_stage_failure());
        assert!(!PipelineError::InvalidConfig("x".to_string()).is_stage_failure());
    }
}
