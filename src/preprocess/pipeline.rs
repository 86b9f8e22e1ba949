//! Fixed-order preprocessing over one string or a table column.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::core::Table;
use crate::error::{ChatsenseError, Result};
use crate::progress::{Progress, ProgressCallback};

use super::Stage;
use super::morph::Lemmatizer;
use super::names::NameExtractor;
use super::normalizer::TextNormalizer;

/// Longest text prefix included in a failure log line.
const LOG_PREVIEW_CHARS: usize = 80;

/// Runs the normalization stages in [`Stage::ORDER`].
///
/// The configuration is fixed at construction. The normalizer resources are
/// built once and reused read-only by every call.
///
/// # Example
///
/// ```rust
/// use chatsense::config::PipelineConfig;
/// use chatsense::preprocess::PreprocessingPipeline;
///
/// # fn main() -> chatsense::Result<()> {
/// let pipeline = PreprocessingPipeline::new(PipelineConfig::default());
///
/// let cleaned = pipeline.preprocess_text("Маша, мне очень понравились 2 фильма!")?;
/// assert_eq!(cleaned, "очень понравиться фильм");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PreprocessingPipeline {
    config: PipelineConfig,
    normalizer: TextNormalizer,
}

impl Default for PreprocessingPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl PreprocessingPipeline {
    /// Creates a pipeline with the built-in name gazetteer and lemma table.
    pub fn new(config: PipelineConfig) -> Self {
        let normalizer = TextNormalizer::new(&config);
        Self { config, normalizer }
    }

    /// Creates a pipeline with custom name-extraction and lemmatization
    /// resources.
    pub fn with_resources(
        config: PipelineConfig,
        names: Arc<dyn NameExtractor>,
        lemmatizer: Arc<dyn Lemmatizer>,
    ) -> Self {
        let normalizer = TextNormalizer::with_resources(&config, names, lemmatizer);
        Self { config, normalizer }
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The stage implementations.
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Normalizes a single string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsenseError::Preprocessing`] naming the first stage that
    /// failed and the text it was given.
    pub fn preprocess_text(&self, text: &str) -> Result<String> {
        let mut current = text.to_string();
        for stage in Stage::ORDER {
            current = self.run_stage(stage, &current)?;
        }
        Ok(current)
    }

    /// Normalizes the configured target column of `table`.
    ///
    /// Returns a new table; `table` itself is not modified. Missing cells in
    /// the target column are treated as empty text. Rows whose target value
    /// is empty after trimming are dropped before the first stage and again
    /// after the last one. Each stage runs over the whole column before the
    /// next stage starts.
    ///
    /// # Errors
    ///
    /// - [`ChatsenseError::ColumnNotFound`] if the table has no target column
    /// - [`ChatsenseError::Preprocessing`] for the first failing row; no
    ///   partial table is returned
    pub fn preprocess_dataset(&self, table: &Table) -> Result<Table> {
        self.preprocess_column(table, &self.config.target_column, None)
    }

    /// Same as [`preprocess_dataset`](Self::preprocess_dataset), reporting
    /// progress after each stage pass.
    pub fn preprocess_dataset_with_progress(
        &self,
        table: &Table,
        progress: &ProgressCallback,
    ) -> Result<Table> {
        self.preprocess_column(table, &self.config.target_column, Some(progress))
    }

    /// Normalizes an explicitly named column instead of the configured one.
    pub fn preprocess_dataset_column(&self, table: &Table, column: &str) -> Result<Table> {
        self.preprocess_column(table, column, None)
    }

    fn preprocess_column(
        &self,
        table: &Table,
        column: &str,
        progress: Option<&ProgressCallback>,
    ) -> Result<Table> {
        let index = table
            .column_index(column)
            .ok_or_else(|| ChatsenseError::column_not_found(column, table.columns()))?;

        let mut output = table.clone();
        for row in output.rows_mut() {
            row[index].get_or_insert_with(String::new);
        }
        output.retain_rows(|row| !is_blank(row[index].as_deref()));

        let rows = output.len();
        for (completed, stage) in Stage::ORDER.into_iter().enumerate() {
            for row in output.rows_mut() {
                let text = row[index].take().unwrap_or_default();
                row[index] = Some(self.run_stage(stage, &text)?);
            }
            debug!(%stage, rows, "stage pass finished");
            if let Some(callback) = progress {
                callback(Progress::new(stage, completed + 1, rows));
            }
        }

        output.retain_rows(|row| !is_blank(row[index].as_deref()));
        debug!(
            column,
            input_rows = table.len(),
            output_rows = output.len(),
            "preprocessed dataset"
        );
        Ok(output)
    }

    fn run_stage(&self, stage: Stage, text: &str) -> Result<String> {
        self.normalizer.apply(stage, text).map_err(|source| {
            let preview: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
            warn!(%stage, text = %preview, error = %source, "preprocessing stage failed");
            ChatsenseError::preprocessing(stage, text, source)
        })
    }
}

fn is_blank(cell: Option<&str>) -> bool {
    cell.is_none_or(|value| value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StageErrorKind;
    use crate::preprocess::{DictionaryLemmatizer, GazetteerNameExtractor};
    use std::sync::Mutex;

    struct BrokenLemmatizer;

    impl Lemmatizer for BrokenLemmatizer {
        fn normal_form(&self, word: &str) -> std::result::Result<String, StageErrorKind> {
            if word == "сломай" {
                Err(StageErrorKind::Morphology(format!("no parse for {word}")))
            } else {
                Ok(word.to_string())
            }
        }
    }

    fn messages(values: &[Option<&str>]) -> Table {
        let mut table = Table::new(["Sender", "Message"]);
        for value in values {
            table
                .push_row(vec![Some("A".into()), value.map(String::from)])
                .unwrap();
        }
        table
    }

    #[test]
    fn test_preprocess_text_full_order() {
        let pipeline = PreprocessingPipeline::default();
        assert_eq!(
            pipeline.preprocess_text("Иван сказал, что это не хорошо!").unwrap(),
            "сказать это не хорошо"
        );
    }

    #[test]
    fn test_preprocess_text_numerals_and_urls() {
        let pipeline = PreprocessingPipeline::default();
        assert_eq!(
            pipeline
                .preprocess_text("В 2024 году смотрите https://example.com фильмы")
                .unwrap(),
            "год смотреть фильм"
        );
    }

    #[test]
    fn test_preprocess_text_error_names_stage_and_text() {
        let pipeline = PreprocessingPipeline::with_resources(
            PipelineConfig::default(),
            Arc::new(GazetteerNameExtractor::builtin()),
            Arc::new(BrokenLemmatizer),
        );
        let err = pipeline.preprocess_text("Сломай").unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Lemmatize));
        match err {
            ChatsenseError::Preprocessing { text, .. } => assert_eq!(text, "сломай"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dataset_missing_column() {
        let pipeline = PreprocessingPipeline::new(PipelineConfig::new().with_target_column("Text"));
        let err = pipeline.preprocess_dataset(&messages(&[Some("x")])).unwrap_err();
        assert!(err.is_column_not_found());
        assert!(err.to_string().contains("[Sender, Message]"));
    }

    #[test]
    fn test_dataset_drops_empty_rows() {
        let pipeline = PreprocessingPipeline::default();
        let input = messages(&[
            Some("Отличный фильм"),
            None,
            Some("   "),
            Some("он был там"),
            Some("12345"),
        ]);
        let output = pipeline.preprocess_dataset(&input).unwrap();

        assert_eq!(output.len(), 1);
        assert_eq!(output.get(0, "Message"), Some("отличный фильм"));
        assert_eq!(output.get(0, "Sender"), Some("A"));
    }

    #[test]
    fn test_dataset_does_not_mutate_input() {
        let pipeline = PreprocessingPipeline::default();
        let input = messages(&[Some("Хорошие новости!")]);
        let before = input.clone();
        let output = pipeline.preprocess_dataset(&input).unwrap();

        assert_eq!(input, before);
        assert_eq!(output.get(0, "Message"), Some("хороший новость"));
    }

    #[test]
    fn test_dataset_matches_single_text_mode() {
        let pipeline = PreprocessingPipeline::default();
        let text = "Анна, вчера было 3 отличных встречи";
        let output = pipeline.preprocess_dataset(&messages(&[Some(text)])).unwrap();
        assert_eq!(
            output.get(0, "Message"),
            Some(pipeline.preprocess_text(text).unwrap().as_str())
        );
    }

    #[test]
    fn test_dataset_aborts_on_failure() {
        let pipeline = PreprocessingPipeline::with_resources(
            PipelineConfig::default(),
            Arc::new(GazetteerNameExtractor::builtin()),
            Arc::new(BrokenLemmatizer),
        );
        let input = messages(&[Some("хорошо"), Some("сломай"), Some("плохо")]);
        let err = pipeline.preprocess_dataset(&input).unwrap_err();
        assert!(err.is_preprocessing());
        assert_eq!(err.stage(), Some(Stage::Lemmatize));
    }

    #[test]
    fn test_dataset_explicit_column() {
        let pipeline = PreprocessingPipeline::default();
        let mut table = Table::new(["text"]);
        table.push_row(vec![Some("Фильмы!".into())]).unwrap();
        let output = pipeline.preprocess_dataset_column(&table, "text").unwrap();
        assert_eq!(output.get(0, "text"), Some("фильм"));
    }

    #[test]
    fn test_dataset_progress_reports_each_stage() {
        let pipeline = PreprocessingPipeline::with_resources(
            PipelineConfig::default(),
            Arc::new(GazetteerNameExtractor::builtin()),
            Arc::new(DictionaryLemmatizer::empty()),
        );
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Arc::new(move |p| sink.lock().unwrap().push(p));

        pipeline
            .preprocess_dataset_with_progress(&messages(&[Some("раз"), Some("два")]), &callback)
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), Stage::ORDER.len());
        assert_eq!(seen[0].stage, Stage::ORDER[0]);
        assert!(seen.last().unwrap().is_complete());
        assert!(seen.iter().all(|p| p.rows_processed == 2));
    }
}
