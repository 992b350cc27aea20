//! Value types handed between pipeline stages.
//!
//! Each stage's output is the next stage's entire input; there is no shared
//! mutable state between stages. These types are plain data carriers:
//!
//! - [`DatasetSplit`]: ingestion output (train/test dataset locations)
//! - [`TransformedData`]: transformation output (two datasets plus the
//!   persisted preprocessor location)
//! - [`MetricsRecord`]: the document persisted after a successful run
//! - [`PipelineRunResult`]: the aggregate returned by
//!   [`TrainingPipeline::run()`](crate::TrainingPipeline::run)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The dataset locations produced by the ingestion stage.
///
/// On success both paths are non-empty location identifiers; whether the
/// files exist is the ingestion stage's contract to guarantee, not the
/// orchestrator's to validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSplit {
    /// Location of the training dataset.
    pub train_path: PathBuf,

    /// Location of the held-out test dataset.
    pub test_path: PathBuf,
}

/// The output of the transformation stage.
///
/// `D` is whatever in-memory dataset representation the transformation and
/// trainer collaborators agree on; the orchestrator never inspects it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedData<D> {
    /// The transformed training dataset.
    pub train: D,

    /// The transformed test dataset.
    pub test: D,

    /// Location of the persisted preprocessing artifact, reused at
    /// inference time.
    pub preprocessor_path: PathBuf,
}

/// The metrics document persisted after a successful run.
///
/// Serialized as `{"score": <number>}` with 2-space indentation, fully
/// overwriting any prior content at the metrics path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// The model fit metric reported by the trainer (e.g. a coefficient of
    /// determination).
    pub score: f64,
}

/// Aggregate result of a successful pipeline run.
///
/// Collects the locations produced along the way plus the persisted metrics.
/// Nothing beyond what individual stages already persisted is written for
/// this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRunResult {
    /// Location of the training dataset from ingestion.
    pub train_path: PathBuf,

    /// Location of the test dataset from ingestion.
    pub test_path: PathBuf,

    /// Location of the persisted preprocessing artifact.
    pub preprocessor_path: PathBuf,

    /// Location of the written metrics document.
    pub metrics_path: PathBuf,

    /// The metrics that were persisted.
    pub metrics: MetricsRecord,
}
