//! Sentiment classifier interface.
//!
//! The model itself lives outside this crate. It is reached through the
//! [`Classifier`] trait: `classify(text) -> Prediction { label, score }`.
//! Model labels are mapped onto [`Sentiment`] with [`Sentiment::from_label`].
//!
//! [`ModelHandle`] is the shared, swappable reference to the active model.
//! Readers take a cheap `Arc` snapshot with [`ModelHandle::current`]; a
//! finished fine-tuning run installs its model with
//! [`ModelHandle::replace`], so no reader ever sees a half-updated model.
//!
//! # Example
//!
//! ```rust
//! use chatsense::classify::{Classifier, ModelHandle, Prediction, Sentiment};
//!
//! struct AlwaysPositive;
//!
//! impl Classifier for AlwaysPositive {
//!     fn classify(&self, _text: &str) -> chatsense::Result<Prediction> {
//!         Ok(Prediction::new("LABEL_1", 0.9))
//!     }
//! }
//!
//! let handle = ModelHandle::new(AlwaysPositive);
//! let prediction = handle.current().classify("отличный фильм").unwrap();
//! assert_eq!(prediction.sentiment(), Some(Sentiment::Positive));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ChatsenseError, Result};

/// A model's answer for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Raw model label, e.g. `LABEL_2` or `4 stars`
    pub label: String,
    /// Confidence in `[0, 1]`
    pub score: f32,
}

impl Prediction {
    /// Creates a prediction.
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Maps the raw label onto a [`Sentiment`].
    pub fn sentiment(&self) -> Option<Sentiment> {
        Sentiment::from_label(&self.label)
    }
}

/// Three-way sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    /// Negative
    Negative,
    /// Neutral
    Neutral,
    /// Positive
    Positive,
}

impl Sentiment {
    /// All sentiments, from most negative to most positive.
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// Maps a model label onto a sentiment.
    ///
    /// Understands the fine-tuned three-class labels (`LABEL_0` neutral,
    /// `LABEL_1` positive, `LABEL_2` negative), five-star rating labels
    /// (`1 star` .. `5 stars`), and the plain names in any case.
    ///
    /// ```
    /// use chatsense::classify::Sentiment;
    ///
    /// assert_eq!(Sentiment::from_label("LABEL_2"), Some(Sentiment::Negative));
    /// assert_eq!(Sentiment::from_label("4 stars"), Some(Sentiment::Positive));
    /// assert_eq!(Sentiment::from_label("Neutral"), Some(Sentiment::Neutral));
    /// assert_eq!(Sentiment::from_label("LABEL_9"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "label_0" | "neutral" | "3 stars" => Some(Sentiment::Neutral),
            "label_1" | "positive" | "4 stars" | "5 stars" => Some(Sentiment::Positive),
            "label_2" | "negative" | "1 star" | "2 stars" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    /// Numeric score used for averaging: Negative 1, Neutral 2, Positive 3.
    pub fn score(self) -> u8 {
        match self {
            Sentiment::Negative => 1,
            Sentiment::Neutral => 2,
            Sentiment::Positive => 3,
        }
    }

    /// The fine-tuned model label for this sentiment.
    pub fn model_label(self) -> &'static str {
        match self {
            Sentiment::Neutral => "LABEL_0",
            Sentiment::Positive => "LABEL_1",
            Sentiment::Negative => "LABEL_2",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Positive => write!(f, "Positive"),
        }
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Sentiment::from_label(s).ok_or_else(|| {
            format!("Unknown sentiment: '{s}'. Expected one of: negative, neutral, positive")
        })
    }
}

/// A sentiment model: text in, label and confidence out.
///
/// Implementations must be callable from several threads at once.
pub trait Classifier: Send + Sync {
    /// Classifies one text.
    fn classify(&self, text: &str) -> Result<Prediction>;

    /// Classifies several texts, in order.
    fn classify_batch(&self, texts: &[&str]) -> Result<Vec<Prediction>> {
        texts.iter().map(|text| self.classify(text)).collect()
    }
}

/// One labelled text for fine-tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Preprocessed text
    pub text: String,
    /// Target sentiment
    pub label: Sentiment,
}

impl TrainingExample {
    /// Creates a training example.
    pub fn new(text: impl Into<String>, label: Sentiment) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Progress of a fine-tuning run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingProgress {
    /// Steps finished so far
    pub step: usize,
    /// Total steps in the run
    pub total_steps: usize,
    /// Training loss at this step, if the trainer reports one
    pub loss: Option<f32>,
}

/// Callback receiving fine-tuning progress.
pub type TrainingCallback = Arc<dyn Fn(TrainingProgress) + Send + Sync>;

/// Produces a new model from labelled examples.
pub trait Trainer: Send + Sync {
    /// Fine-tunes a model on `examples`, reporting progress as it goes.
    fn fine_tune(
        &self,
        examples: &[TrainingExample],
        progress: &TrainingCallback,
    ) -> Result<Arc<dyn Classifier>>;
}

/// Shared reference to the active classifier.
///
/// Cloning the handle shares the same slot. The slot is only ever replaced
/// as a whole.
#[derive(Clone)]
pub struct ModelHandle {
    slot: Arc<RwLock<Arc<dyn Classifier>>>,
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle").finish_non_exhaustive()
    }
}

impl ModelHandle {
    /// Creates a handle holding `classifier`.
    pub fn new(classifier: impl Classifier + 'static) -> Self {
        Self::from_arc(Arc::new(classifier))
    }

    /// Creates a handle from an already shared classifier.
    pub fn from_arc(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(classifier)),
        }
    }

    /// Snapshot of the active classifier.
    ///
    /// The snapshot stays valid after a later [`replace`](Self::replace).
    pub fn current(&self) -> Arc<dyn Classifier> {
        let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Installs a new classifier and returns the previous one.
    pub fn replace(&self, classifier: Arc<dyn Classifier>) -> Arc<dyn Classifier> {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, classifier);
        info!("classifier model replaced");
        previous
    }

    /// Classifies `text` with the active classifier.
    pub fn classify(&self, text: &str) -> Result<Prediction> {
        self.current().classify(text)
    }

    /// Runs `trainer` and installs the resulting model.
    ///
    /// The active model keeps serving requests while training runs. On
    /// failure the active model is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsenseError::Classifier`] if `examples` is empty, or the
    /// trainer's own error.
    pub fn fine_tune(
        &self,
        trainer: &dyn Trainer,
        examples: &[TrainingExample],
        progress: &TrainingCallback,
    ) -> Result<()> {
        if examples.is_empty() {
            return Err(ChatsenseError::classifier("no training examples"));
        }
        info!(examples = examples.len(), "fine-tuning started");
        let model = trainer.fine_tune(examples, progress)?;
        self.replace(model);
        Ok(())
    }
}
