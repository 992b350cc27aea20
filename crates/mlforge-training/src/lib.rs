//! mlforge-training: sequential training-pipeline orchestrator.
//!
//! This crate runs the three stages of a model-training workflow in order
//! (data ingestion, data transformation, model training), persists a metrics
//! summary, and wraps any failure into a single uniform error type. The
//! stages themselves are external collaborators plugged in behind traits;
//! this crate owns only the orchestration contract: the sequencing, the data
//! handed between stages, and the failure-wrapping policy.
//!
//! # Pipeline flow
//!
//! ```text
//! TrainingPipeline::run()
//!     │
//!     ├─► DataIngestion::ingest()          ──► DatasetSplit (train/test paths)
//!     ├─► DataTransformation::transform()  ──► TransformedData (datasets + preprocessor path)
//!     ├─► ModelTrainer::train()            ──► score (f64)
//!     └─► persist {"score": score}         ──► PipelineRunResult
//! ```
//!
//! Strictly linear, single-threaded, blocking. Each stage's output is the
//! next stage's entire input; the metrics file is written if and only if all
//! three stages succeed.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use mlforge_training::{PipelineConfig, TrainingPipeline};
//!
//! let mut pipeline = TrainingPipeline::builder()
//!     .config(PipelineConfig::default())
//!     .ingestion(CsvIngestion::new("data/raw.csv"))
//!     .transformation(StandardTransformation::default())
//!     .trainer(RegressionTrainer::default())
//!     .build()?;
//!
//! let result = pipeline.run()?;
//! println!("score: {}", result.metrics.score);
//! println!("metrics at: {}", result.metrics_path.display());
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PipelineError>`]. The caller
//! sees one error type no matter which stage failed:
//!
//! - [`PipelineError::Ingestion`] - the ingestion collaborator failed
//! - [`PipelineError::Transformation`] - the transformation collaborator failed
//! - [`PipelineError::Training`] - the trainer collaborator failed
//! - [`PipelineError::Persistence`] - the metrics-write step failed
//!
//! Each variant keeps the original cause as its error source, and
//! [`PipelineError::stage()`] reports which stage was active. Every failure
//! is fatal to the run; there are no retries and no partial results.
//!
//! # Observability
//!
//! The pipeline emits `tracing` events at each stage boundary (this crate
//! installs no subscriber) and, independently, reports to an injectable
//! [`ProgressReporter`] so hosts and tests can observe the run without
//! global state. Both are observability only and not part of the functional
//! contract.

mod config;
mod error;
mod pipeline;
mod progress;
mod stage;
mod types;

// Re-export public API
//
// Configuration types
pub use config::{PipelineConfig, PipelineConfigBuilder};
// Error types
pub use error::{PersistenceError, PipelineError, Result, StageError};
// Pipeline types
pub use pipeline::{TrainingPipeline, TrainingPipelineBuilder};
// Progress reporting types
pub use progress::{
    ClosureProgressReporter, ParsePipelineStageError, PipelineStage, ProgressReporter,
    ProgressUpdate,
};
// Stage collaborator seams
pub use stage::{DataIngestion, DataTransformation, ModelTrainer};
// Stage hand-off and result types
pub use types::{DatasetSplit, MetricsRecord, PipelineRunResult, TransformedData};
