//! Pipeline stages and progress reporting.
//!
//! This module defines [`PipelineStage`], the state machine of a training
//! run, together with [`ProgressUpdate`] and the [`ProgressReporter`]
//! observer seam. Progress reporting is observability only; it is not part
//! of the functional contract, and a pipeline built without a reporter
//! behaves identically.
//!
//! The observer is injectable rather than global so tests can assert on
//! emitted events without touching process-wide logging state.
//!
//! # Example
//!
//! ```
//! use mlforge_training::{ProgressReporter, ProgressUpdate, ClosureProgressReporter};
//!
//! let reporter = ClosureProgressReporter::new(|update: ProgressUpdate| {
//!     println!("[{}] {}", update.stage.as_str(), update.message);
//! });
//! reporter.report(ProgressUpdate::complete("Done"));
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The stages of a training-pipeline run.
///
/// A run progresses strictly in order (unless it fails):
///
/// 1. [`NotStarted`](Self::NotStarted) - pipeline constructed, `run()` not yet called
/// 2. [`Ingesting`](Self::Ingesting) - producing the train/test dataset split
/// 3. [`Transforming`](Self::Transforming) - producing the transformed datasets
/// 4. [`Training`](Self::Training) - fitting the model and scoring it
/// 5. [`PersistingMetrics`](Self::PersistingMetrics) - writing the metrics document
/// 6. [`Complete`](Self::Complete) - run finished successfully
///
/// Any stage may transition directly to [`Failed`](Self::Failed) on error.
/// Terminal states: [`Complete`](Self::Complete), [`Failed`](Self::Failed).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new stages in
/// future versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PipelineStage {
    /// The pipeline has been constructed but not yet run.
    #[default]
    NotStarted,

    /// The ingestion collaborator is producing the dataset split.
    Ingesting,

    /// The transformation collaborator is producing transformed datasets.
    Transforming,

    /// The trainer collaborator is fitting and scoring a model.
    Training,

    /// The metrics document is being written.
    PersistingMetrics,

    /// The run finished successfully. Terminal.
    Complete,

    /// The run aborted with an error. Terminal.
    Failed,
}

impl PipelineStage {
    /// Returns the snake_case string form of the stage.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlforge_training::PipelineStage;
    ///
    /// assert_eq!(PipelineStage::Ingesting.as_str(), "ingesting");
    /// assert_eq!(PipelineStage::PersistingMetrics.as_str(), "persisting_metrics");
    /// ```
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::NotStarted => "not_started",
            PipelineStage::Ingesting => "ingesting",
            PipelineStage::Transforming => "transforming",
            PipelineStage::Training => "training",
            PipelineStage::PersistingMetrics => "persisting_metrics",
            PipelineStage::Complete => "complete",
            PipelineStage::Failed => "failed",
        }
    }

    /// Returns `true` if this is a terminal state.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlforge_training::PipelineStage;
    ///
    /// assert!(PipelineStage::Complete.is_terminal());
    /// assert!(PipelineStage::Failed.is_terminal());
    /// assert!(!PipelineStage::Training.is_terminal());
    /// ```
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Complete | PipelineStage::Failed)
    }
}

/// Error type for parsing a [`PipelineStage`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePipelineStageError {
    invalid_value: String,
}

impl ParsePipelineStageError {
    /// Returns the invalid value that caused the parse error.
    #[must_use]
    pub fn invalid_value(&self) -> &str {
        &self.invalid_value
    }
}

impl std::fmt::Display for ParsePipelineStageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid pipeline stage: '{}'. Valid values are: not_started, ingesting, \
             transforming, training, persisting_metrics, complete, failed",
            self.invalid_value
        )
    }
}

impl std::error::Error for ParsePipelineStageError {}

impl FromStr for PipelineStage {
    type Err = ParsePipelineStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(PipelineStage::NotStarted),
            "ingesting" => Ok(PipelineStage::Ingesting),
            "transforming" => Ok(PipelineStage::Transforming),
            "training" => Ok(PipelineStage::Training),
            "persisting_metrics" => Ok(PipelineStage::PersistingMetrics),
            "complete" => Ok(PipelineStage::Complete),
            "failed" => Ok(PipelineStage::Failed),
            _ => Err(ParsePipelineStageError {
                invalid_value: s.to_string(),
            }),
        }
    }
}

/// A progress update emitted at a stage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// The stage the pipeline is entering (or the terminal state reached).
    pub stage: PipelineStage,

    /// Human-readable description of the current activity.
    pub message: String,
}

impl ProgressUpdate {
    /// Creates a progress update for entering a stage.
    pub fn new(stage: PipelineStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }

    /// Creates a completion update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(PipelineStage::Complete, message)
    }

    /// Creates a failure update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(PipelineStage::Failed, message)
    }
}

impl Default for ProgressUpdate {
    fn default() -> Self {
        Self {
            stage: PipelineStage::default(),
            message: String::new(),
        }
    }
}

/// Trait for receiving progress updates during a pipeline run.
///
/// Implementations must be `Send + Sync` so the pipeline can run on a
/// background thread while the observer lives elsewhere. The reporter is
/// called synchronously at each stage boundary and should return quickly.
pub trait ProgressReporter: Send + Sync {
    /// Called at each stage boundary with the current update.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = TrainingPipeline::builder()
///     .on_progress(|update| println!("{}", update.message))
///     ...
/// ```
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

// Updates are handed to observers that may live on other threads.
static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_stage_as_str() {
        assert_eq!(PipelineStage::NotStarted.as_str(), "not_started");
        assert_eq!(PipelineStage::Ingesting.as_str(), "ingesting");
        assert_eq!(PipelineStage::Transforming.as_str(), "transforming");
        assert_eq!(PipelineStage::Training.as_str(), "training");
        assert_eq!(PipelineStage::PersistingMetrics.as_str(), "persisting_metrics");
        assert_eq!(PipelineStage::Complete.as_str(), "complete");
        assert_eq!(PipelineStage::Failed.as_str(), "failed");
    }

    #[test]
    fn test_stage_from_str_roundtrip() {
        let stages = [
            PipelineStage::NotStarted,
            PipelineStage::Ingesting,
            PipelineStage::Transforming,
            PipelineStage::Training,
            PipelineStage::PersistingMetrics,
            PipelineStage::Complete,
            PipelineStage::Failed,
        ];

        for stage in stages {
            let parsed: PipelineStage = stage.as_str().parse().unwrap();
            assert_eq!(parsed, stage);
        }

        let err = "unknown".parse::<PipelineStage>().unwrap_err();
        assert_eq!(err.invalid_value(), "unknown");
        assert!(err.to_string().contains("Valid values"));
    }

    #[test]
    fn test_stage_is_terminal() {
        assert!(PipelineStage::Complete.is_terminal());
        assert!(PipelineStage::Failed.is_terminal());
        assert!(!PipelineStage::NotStarted.is_terminal());
        assert!(!PipelineStage::Ingesting.is_terminal());
        assert!(!PipelineStage::PersistingMetrics.is_terminal());
    }

    #[test]
    fn test_stage_serde_snake_case() {
        let json = serde_json::to_string(&PipelineStage::PersistingMetrics).unwrap();
        assert_eq!(json, "\"persisting_metrics\"");

        let parsed: PipelineStage = serde_json::from_str("\"ingesting\"").unwrap();
        assert_eq!(parsed, PipelineStage::Ingesting);
    }

    #[test]
    fn test_progress_update_constructors() {
        let update = ProgressUpdate::new(PipelineStage::Training, "Training model...");
        assert_eq!(update.stage, PipelineStage::Training);
        assert_eq!(update.message, "Training model...");

        assert_eq!(ProgressUpdate::complete("ok").stage, PipelineStage::Complete);
        assert_eq!(ProgressUpdate::failed("boom").stage, PipelineStage::Failed);
    }

    #[test]
    fn test_progress_update_default() {
        let update = ProgressUpdate::default();
        assert_eq!(update.stage, PipelineStage::NotStarted);
        assert!(update.message.is_empty());
    }

    #[test]
    fn test_closure_progress_reporter() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        reporter.report(ProgressUpdate::new(PipelineStage::Ingesting, "go"));
        reporter.report(ProgressUpdate::complete("done"));

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_progress_reporter_across_threads() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = Arc::new(ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let reporter_clone = reporter.clone();
        let handle = std::thread::spawn(move || {
            reporter_clone.report(ProgressUpdate::new(
                PipelineStage::Training,
                "from background thread",
            ));
        });

        handle.join().expect("thread should not panic");
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }
}
