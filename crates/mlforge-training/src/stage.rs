//! Collaborator traits for the three pipeline stages.
//!
//! The orchestrator owns the sequencing; the actual ingestion,
//! transformation, and training work lives behind these seams. Each trait
//! method blocks until its result is ready (or fails), and each failure
//! crosses the seam as a [`StageError`] that the orchestrator wraps into
//! the matching [`PipelineError`](crate::PipelineError) variant.
//!
//! The in-memory dataset representation is an associated type: the
//! transformation and trainer collaborators agree on it (`M::Data =
//! T::Data`), and the orchestrator passes it through untouched.

use std::path::Path;

use crate::error::StageError;
use crate::types::{DatasetSplit, TransformedData};

/// The ingestion stage: produce train/test dataset locations from a raw
/// source.
pub trait DataIngestion {
    /// Ingest the raw source and return the dataset split.
    ///
    /// On success both returned paths are non-empty location identifiers
    /// pointing at data this stage has materialized.
    ///
    /// # Errors
    ///
    /// Fails on any data-source problem (missing or corrupt source data).
    fn ingest(&mut self) -> Result<DatasetSplit, StageError>;
}

/// The transformation stage: turn the dataset split into in-memory
/// datasets, persisting the fitted preprocessor as a side effect.
pub trait DataTransformation {
    /// The in-memory dataset representation produced by this stage.
    type Data;

    /// Transform the ingested datasets.
    ///
    /// Receives the train and test locations exactly as ingestion returned
    /// them. Returns the transformed datasets and the location of the
    /// persisted preprocessing artifact.
    ///
    /// # Errors
    ///
    /// Fails on schema or encoding problems in the ingested data.
    fn transform(
        &mut self,
        train_path: &Path,
        test_path: &Path,
    ) -> Result<TransformedData<Self::Data>, StageError>;
}

/// The trainer stage: fit a model on the transformed datasets and report a
/// single scalar quality score.
///
/// Persisting the trained model is this stage's side effect; the
/// orchestrator only sees the score.
pub trait ModelTrainer {
    /// The in-memory dataset representation this trainer consumes. Must
    /// match the transformation stage's [`DataTransformation::Data`].
    type Data;

    /// Fit and evaluate a model, returning its fit metric.
    ///
    /// Implementations convert whatever native numeric their backend
    /// produces to `f64` before returning, so no backend-specific numeric
    /// type reaches the serialized metrics record.
    ///
    /// # Errors
    ///
    /// Fails on fit failure (e.g. an empty dataset).
    fn train(&mut self, train: Self::Data, test: Self::Data) -> Result<f64, StageError>;
}
