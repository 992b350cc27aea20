//! The training-pipeline orchestrator.
//!
//! [`TrainingPipeline`] owns a [`PipelineConfig`] and the three stage
//! collaborators, invokes them strictly in order (ingestion, then
//! transformation, then training), persists the metrics document, and wraps
//! any failure into a [`PipelineError`] at the outermost level.
//!
//! Control and data flow are strictly linear. There is no branching, no
//! retry, and no concurrency within a run; each stage call blocks until its
//! result is ready or it fails. The metrics file is written if and only if
//! all three stages complete without error.
//!
//! # Example
//!
//! ```rust,ignore
//! use mlforge_training::{PipelineConfig, TrainingPipeline};
//!
//! let mut pipeline = TrainingPipeline::builder()
//!     .config(PipelineConfig::default())
//!     .ingestion(CsvIngestion::new("data/raw.csv"))
//!     .transformation(StandardTransformation::default())
//!     .trainer(RegressionTrainer::default())
//!     .on_progress(|update| println!("[{}] {}", update.stage.as_str(), update.message))
//!     .build()?;
//!
//! let result = pipeline.run()?;
//! println!("score: {}", result.metrics.score);
//! ```
//!
//! # Concurrency
//!
//! Two runs targeting the same artifact directory at once are out of scope;
//! no locking discipline is defined and their interleaving is undefined.

use std::fs;
use std::sync::Arc;

use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::error::{PersistenceError, PipelineError};
use crate::progress::{ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate};
use crate::stage::{DataIngestion, DataTransformation, ModelTrainer};
use crate::types::{MetricsRecord, PipelineRunResult};

/// The training-pipeline orchestrator.
///
/// Generic over the three stage collaborators; the transformation and
/// trainer must agree on the in-memory dataset type (`M::Data = T::Data`).
/// Use [`TrainingPipeline::builder()`] to construct one.
pub struct TrainingPipeline<I, T, M> {
    config: PipelineConfig,
    ingestion: I,
    transformation: T,
    trainer: M,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl<I, T, M> std::fmt::Debug for TrainingPipeline<I, T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainingPipeline")
            .field("config", &self.config)
            .field(
                "progress_reporter",
                &self.progress_reporter.as_ref().map(|_| "<reporter>"),
            )
            .finish_non_exhaustive()
    }
}

impl<I, T, M> TrainingPipeline<I, T, M> {
    /// Create a new builder for `TrainingPipeline`.
    #[must_use]
    pub fn builder() -> TrainingPipelineBuilder<I, T, M> {
        TrainingPipelineBuilder::default()
    }

    /// Get the pipeline configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Report progress if a reporter is configured.
    fn report(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

impl<I, T, M> TrainingPipeline<I, T, M>
where
    I: DataIngestion,
    T: DataTransformation,
    M: ModelTrainer<Data = T::Data>,
{
    /// Run the pipeline: ingestion, transformation, training, then metrics
    /// persistence.
    ///
    /// All configuration is fixed at construction time. On success the
    /// metrics document `{"score": <score>}` has been written to the
    /// configured path, fully overwriting prior content, and the returned
    /// [`PipelineRunResult`] aggregates every location produced along the
    /// way.
    ///
    /// # Errors
    ///
    /// Any stage failure, or a failure of the metrics-write step, aborts
    /// the run and surfaces as the matching [`PipelineError`] variant with
    /// the original cause attached. No metrics are persisted on failure and
    /// no partial result is returned.
    pub fn run(&mut self) -> Result<PipelineRunResult, PipelineError> {
        info!("Starting training pipeline...");

        match self.run_stages() {
            Ok(result) => {
                self.report(ProgressUpdate::complete(
                    "Training pipeline completed successfully",
                ));
                Ok(result)
            }
            Err(e) => {
                self.report(ProgressUpdate::failed(e.to_string()));
                error!("Training pipeline failed: {}", e);
                Err(e)
            }
        }
    }

    fn run_stages(&mut self) -> Result<PipelineRunResult, PipelineError> {
        // 1. Ingestion: produce the train/test dataset locations.
        self.report(ProgressUpdate::new(
            PipelineStage::Ingesting,
            "Ingesting raw data...",
        ));
        let split = self
            .ingestion
            .ingest()
            .map_err(|source| PipelineError::Ingestion { source })?;
        info!(
            "Data ingestion complete. train: {}, test: {}",
            split.train_path.display(),
            split.test_path.display()
        );

        // 2. Transformation: consumes exactly the two ingested locations.
        self.report(ProgressUpdate::new(
            PipelineStage::Transforming,
            "Transforming datasets...",
        ));
        let transformed = self
            .transformation
            .transform(&split.train_path, &split.test_path)
            .map_err(|source| PipelineError::Transformation { source })?;
        info!(
            "Data transformation complete. Preprocessor saved at: {}",
            transformed.preprocessor_path.display()
        );

        // 3. Training: consumes exactly the two transformed datasets.
        self.report(ProgressUpdate::new(
            PipelineStage::Training,
            "Training model...",
        ));
        let score = self
            .trainer
            .train(transformed.train, transformed.test)
            .map_err(|source| PipelineError::Training { source })?;
        info!("Model training complete. score: {}", score);

        // 4. Persist the metrics document.
        self.report(ProgressUpdate::new(
            PipelineStage::PersistingMetrics,
            "Persisting metrics...",
        ));
        let metrics = MetricsRecord { score };
        self.persist_metrics(&metrics)?;
        info!("Metrics saved to {}", self.config.metrics_file.display());

        Ok(PipelineRunResult {
            train_path: split.train_path,
            test_path: split.test_path,
            preprocessor_path: transformed.preprocessor_path,
            metrics_path: self.config.metrics_file.clone(),
            metrics,
        })
    }

    /// Write the metrics document, fully overwriting prior content.
    ///
    /// If the metrics location's parent directory vanished mid-run this
    /// fails fast; the pipeline does not re-create it.
    fn persist_metrics(&self, metrics: &MetricsRecord) -> Result<(), PersistenceError> {
        let document = serde_json::to_string_pretty(metrics)?;
        fs::write(&self.config.metrics_file, document)?;
        Ok(())
    }
}

/// Builder for [`TrainingPipeline`].
///
/// The three stage collaborators are required; the config defaults to a
/// fresh [`PipelineConfig::default()`] and the progress reporter is
/// optional. [`build()`](Self::build) creates the artifact directory as a
/// side effect (idempotently).
pub struct TrainingPipelineBuilder<I, T, M> {
    config: Option<PipelineConfig>,
    ingestion: Option<I>,
    transformation: Option<T>,
    trainer: Option<M>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl<I, T, M> Default for TrainingPipelineBuilder<I, T, M> {
    fn default() -> Self {
        Self {
            config: None,
            ingestion: None,
            transformation: None,
            trainer: None,
            progress_reporter: None,
        }
    }
}

impl<I, T, M> std::fmt::Debug for TrainingPipelineBuilder<I, T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainingPipelineBuilder")
            .field("config", &self.config)
            .field(
                "progress_reporter",
                &self.progress_reporter.as_ref().map(|_| "<reporter>"),
            )
            .finish_non_exhaustive()
    }
}

impl<I, T, M> TrainingPipelineBuilder<I, T, M> {
    /// Set the pipeline configuration (optional).
    ///
    /// Defaults to a fresh [`PipelineConfig::default()`], reconstructed per
    /// build so no state is shared across pipelines.
    #[must_use]
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the ingestion collaborator (required).
    #[must_use]
    pub fn ingestion(mut self, ingestion: I) -> Self {
        self.ingestion = Some(ingestion);
        self
    }

    /// Set the transformation collaborator (required).
    #[must_use]
    pub fn transformation(mut self, transformation: T) -> Self {
        self.transformation = Some(transformation);
        self
    }

    /// Set the trainer collaborator (required).
    #[must_use]
    pub fn trainer(mut self, trainer: M) -> Self {
        self.trainer = Some(trainer);
        self
    }

    /// Set a progress observer from a closure (optional).
    ///
    /// The callback is invoked synchronously at each stage boundary and
    /// should return quickly.
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Set a progress observer (optional).
    ///
    /// Prefer [`on_progress()`](Self::on_progress) unless the reporter is
    /// shared with other parts of the host.
    #[must_use]
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Build the pipeline, creating the artifact directory.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if a stage collaborator is
    /// missing, or [`PipelineError::ArtifactDir`] if the artifact directory
    /// cannot be created.
    pub fn build(self) -> Result<TrainingPipeline<I, T, M>, PipelineError> {
        let ingestion = self.ingestion.ok_or_else(|| {
            PipelineError::InvalidConfig("an ingestion stage is required".to_string())
        })?;
        let transformation = self.transformation.ok_or_else(|| {
            PipelineError::InvalidConfig("a transformation stage is required".to_string())
        })?;
        let trainer = self.trainer.ok_or_else(|| {
            PipelineError::InvalidConfig("a trainer stage is required".to_string())
        })?;

        let config = self.config.unwrap_or_default();
        config.ensure_artifacts_dir()?;

        Ok(TrainingPipeline {
            config,
            ingestion,
            transformation,
            trainer,
            progress_reporter: self.progress_reporter,
        })
    }
}
