//! Filter chat records by date range and sender.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering record collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Records attributed to one sender |
//!
//! # Examples
//!
//! ```
//! use chatsense::ChatMessageRecord;
//! use chatsense::core::filter::{FilterConfig, apply_filters};
//!
//! # fn main() -> chatsense::Result<()> {
//! let records = vec![
//!     ChatMessageRecord::new("старое").with_sender("Алиса").with_date("01.01.2024"),
//!     ChatMessageRecord::new("новое").with_sender("Алиса").with_date("15.06.2024"),
//!     ChatMessageRecord::new("чужое").with_sender("Боб").with_date("15.06.2024"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_sender("алиса");
//!
//! let filtered = apply_filters(records, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].message, "новое");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Records without a parsable date are **excluded** when date filters are active
//! - Records without a sender are **excluded** when the sender filter is active
//! - Sender matching is case-insensitive, Cyrillic included
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;

use crate::error::ChatsenseError;
use crate::record::ChatMessageRecord;

/// Date format accepted by the filter bounds.
const BOUND_FORMAT: &str = "%Y-%m-%d";

/// Configuration for filtering records by date and sender.
///
/// Filters are combined with AND logic: a record must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only records on or after this date.
    pub after: Option<NaiveDate>,

    /// Include only records on or before this date.
    pub before: Option<NaiveDate>,

    /// Include only records from this sender (case-insensitive).
    pub from: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsenseError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatsenseError> {
        self.after = Some(parse_bound(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsenseError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatsenseError> {
        self.before = Some(parse_bound(date_str)?);
        Ok(self)
    }

    /// Sets the sender filter.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_sender_filter()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the sender filter is active.
    pub fn has_sender_filter(&self) -> bool {
        self.from.is_some()
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &ChatMessageRecord) -> bool {
        if let Some(ref from) = self.from {
            let same_sender = record
                .sender()
                .is_some_and(|sender| sender.to_lowercase() == from.to_lowercase());
            if !same_sender {
                return false;
            }
        }

        if self.has_date_filter() {
            let Some(date) = record.naive_date() else {
                return false;
            };
            if self.after.is_some_and(|after| date < after) {
                return false;
            }
            if self.before.is_some_and(|before| date > before) {
                return false;
            }
        }

        true
    }
}

fn parse_bound(date_str: &str) -> Result<NaiveDate, ChatsenseError> {
    NaiveDate::parse_from_str(date_str, BOUND_FORMAT).map_err(|_| ChatsenseError::invalid_date(date_str))
}

/// Filters records, keeping only those that match all active filters.
///
/// If no filters are active, returns the records unchanged.
pub fn apply_filters(records: Vec<ChatMessageRecord>, config: &FilterConfig) -> Vec<ChatMessageRecord> {
    if !config.is_active() {
        return records;
    }

    records.into_iter().filter(|r| config.matches(r)).collect()
}
