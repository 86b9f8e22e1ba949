//! Progress reporting for bulk preprocessing.
//!
//! [`PreprocessingPipeline::preprocess_dataset_with_progress`] runs each
//! stage as a full pass over the target column and calls the callback once
//! per finished pass.
//!
//! [`PreprocessingPipeline::preprocess_dataset_with_progress`]:
//! crate::preprocess::PreprocessingPipeline::preprocess_dataset_with_progress
//!
//! # Example
//!
//! ```rust
//! use chatsense::preprocess::Stage;
//! use chatsense::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     println!("{}: {:.0}%", progress.stage, progress.percentage());
//! });
//!
//! callback(Progress::new(Stage::CleanCharacters, 3, 120));
//! ```

use std::sync::Arc;

use crate::preprocess::Stage;

/// State of a bulk preprocessing call after a stage pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// The stage that just finished.
    pub stage: Stage,

    /// Number of stage passes finished so far, including this one.
    pub stages_completed: usize,

    /// Total number of stage passes in the call.
    pub total_stages: usize,

    /// Rows the stage was applied to.
    pub rows_processed: usize,
}

impl Progress {
    /// Creates a progress report for a finished stage of [`Stage::ORDER`].
    pub fn new(stage: Stage, stages_completed: usize, rows_processed: usize) -> Self {
        Self {
            stage,
            stages_completed,
            total_stages: Stage::ORDER.len(),
            rows_processed,
        }
    }

    /// Returns the share of finished stage passes (0.0 - 100.0).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatsense::preprocess::Stage;
    /// use chatsense::progress::Progress;
    ///
    /// let progress = Progress::new(Stage::Lemmatize, 5, 10);
    /// assert_eq!(progress.percentage(), 100.0);
    /// ```
    pub fn percentage(&self) -> f64 {
        if self.total_stages == 0 {
            100.0
        } else {
            (self.stages_completed as f64 / self.total_stages as f64) * 100.0
        }
    }

    /// Returns whether every stage pass has finished.
    pub fn is_complete(&self) -> bool {
        self.stages_completed >= self.total_stages
    }
}

/// Callback type for receiving progress updates.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Creates a no-op progress callback.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Creates a progress callback that prints one line per stage to stderr.
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| {
        eprintln!(
            "[{}/{}] {} ({} rows)",
            progress.stages_completed, progress.total_stages, progress.stage, progress.rows_processed
        );
    })
}
