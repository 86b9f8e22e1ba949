//! Sentiment statistics over a classified chat.
//!
//! [`analyze_records`] preprocesses each record's message, classifies the
//! normalized text, and collects the results into a [`ChatAnalysis`]. The
//! aggregates use the numeric [`Sentiment::score`] (Negative 1, Neutral 2,
//! Positive 3):
//!
//! | Method | Result |
//! |--------|--------|
//! | [`label_distribution`](ChatAnalysis::label_distribution) | Message count per sentiment |
//! | [`sender_stats`](ChatAnalysis::sender_stats) | Total, mean, and count per sender |
//! | [`top_positive`](ChatAnalysis::top_positive) / [`top_negative`](ChatAnalysis::top_negative) | Senders with the highest / lowest mean |
//! | [`hourly`](ChatAnalysis::hourly) | Message count and mean score per hour of day |
//! | [`top_words`](ChatAnalysis::top_words) | Most frequent normalized words per sentiment |

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::classify::{Classifier, Prediction, Sentiment};
use crate::error::Result;
use crate::preprocess::PreprocessingPipeline;
use crate::record::ChatMessageRecord;

/// A chat record together with its normalized text and classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledMessage {
    /// The original record
    pub record: ChatMessageRecord,
    /// Normalized message text that was classified
    pub clean_message: String,
    /// Raw classifier output
    pub prediction: Prediction,
    /// Sentiment mapped from the prediction label, if the label is known
    pub sentiment: Option<Sentiment>,
}

/// Per-sender sentiment aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderStats {
    /// Sender display name
    pub sender: String,
    /// Sum of sentiment scores
    pub total: u32,
    /// Mean sentiment score
    pub mean: f64,
    /// Number of scored messages
    pub count: usize,
}

/// Per-hour activity aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyStats {
    /// Hour of day, 0-23
    pub hour: u32,
    /// Number of scored messages sent in this hour
    pub count: usize,
    /// Mean sentiment score in this hour
    pub mean: f64,
}

/// Classified messages of one chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatAnalysis {
    /// Messages in chat order
    pub messages: Vec<LabeledMessage>,
}

/// Preprocesses and classifies every record.
///
/// Records whose message normalizes to an empty string are skipped.
///
/// # Errors
///
/// Propagates the first preprocessing or classifier error.
pub fn analyze_records(
    records: &[ChatMessageRecord],
    pipeline: &PreprocessingPipeline,
    classifier: &dyn Classifier,
) -> Result<ChatAnalysis> {
    let mut messages = Vec::with_capacity(records.len());
    for record in records {
        let clean_message = pipeline.preprocess_text(&record.message)?;
        if clean_message.is_empty() {
            continue;
        }
        let prediction = classifier.classify(&clean_message)?;
        let sentiment = prediction.sentiment();
        messages.push(LabeledMessage {
            record: record.clone(),
            clean_message,
            prediction,
            sentiment,
        });
    }
    debug!(
        records = records.len(),
        classified = messages.len(),
        "analyzed chat"
    );
    Ok(ChatAnalysis { messages })
}

impl ChatAnalysis {
    /// Wraps already classified messages.
    pub fn new(messages: Vec<LabeledMessage>) -> Self {
        Self { messages }
    }

    /// Number of classified messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing was classified.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn scored(&self) -> impl Iterator<Item = (&LabeledMessage, Sentiment)> {
        self.messages
            .iter()
            .filter_map(|m| m.sentiment.map(|s| (m, s)))
    }

    /// Message count per sentiment. Messages with unknown labels are not
    /// counted.
    pub fn label_distribution(&self) -> BTreeMap<Sentiment, usize> {
        let mut counts = BTreeMap::new();
        for (_, sentiment) in self.scored() {
            *counts.entry(sentiment).or_insert(0) += 1;
        }
        counts
    }

    /// Sentiment aggregate per sender, sorted by sender name.
    ///
    /// Messages without a sender or with an unknown label are left out.
    pub fn sender_stats(&self) -> Vec<SenderStats> {
        let mut groups: BTreeMap<&str, (u32, usize)> = BTreeMap::new();
        for (message, sentiment) in self.scored() {
            let Some(sender) = message.record.sender() else {
                continue;
            };
            let entry = groups.entry(sender).or_insert((0, 0));
            entry.0 += u32::from(sentiment.score());
            entry.1 += 1;
        }

        groups
            .into_iter()
            .map(|(sender, (total, count))| SenderStats {
                sender: sender.to_string(),
                total,
                mean: f64::from(total) / count as f64,
                count,
            })
            .collect()
    }

    /// Up to `n` senders with the highest mean score. Ties keep name order.
    pub fn top_positive(&self, n: usize) -> Vec<SenderStats> {
        let mut stats = self.sender_stats();
        stats.sort_by(|a, b| b.mean.partial_cmp(&a.mean).unwrap_or(Ordering::Equal));
        stats.truncate(n);
        stats
    }

    /// Up to `n` senders with the lowest mean score. Ties keep name order.
    pub fn top_negative(&self, n: usize) -> Vec<SenderStats> {
        let mut stats = self.sender_stats();
        stats.sort_by(|a, b| a.mean.partial_cmp(&b.mean).unwrap_or(Ordering::Equal));
        stats.truncate(n);
        stats
    }

    /// Message count and mean score per hour of day, sorted by hour.
    ///
    /// Messages without a parsable time are left out.
    pub fn hourly(&self) -> Vec<HourlyStats> {
        let mut groups: BTreeMap<u32, (u32, usize)> = BTreeMap::new();
        for (message, sentiment) in self.scored() {
            let Some(hour) = message.record.hour() else {
                continue;
            };
            let entry = groups.entry(hour).or_insert((0, 0));
            entry.0 += u32::from(sentiment.score());
            entry.1 += 1;
        }

        groups
            .into_iter()
            .map(|(hour, (total, count))| HourlyStats {
                hour,
                count,
                mean: f64::from(total) / count as f64,
            })
            .collect()
    }

    /// The `n` most frequent words in the normalized text of messages with
    /// the given sentiment, most frequent first. Ties are broken
    /// alphabetically.
    pub fn top_words(&self, sentiment: Sentiment, n: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (message, _) in self.scored().filter(|(_, s)| *s == sentiment) {
            for word in message.clean_message.split_whitespace() {
                *counts.entry(word).or_insert(0) += 1;
            }
        }

        let mut words: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(word, count)| (word.to_string(), count))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(n);
        words
    }
}
