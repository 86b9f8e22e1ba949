//! Chat message records extracted from a Telegram HTML export.
//!
//! A [`ChatMessageRecord`] is produced for every message block in the export
//! that carries visible text. Records are plain values: they are created
//! during a single parse pass and then consumed into a [`Table`](crate::core::Table).
//!
//! # Examples
//!
//! ```
//! use chatsense::ChatMessageRecord;
//!
//! let record = ChatMessageRecord::new("Привет!")
//!     .with_sender("Alice")
//!     .with_date("15.03.2024")
//!     .with_time("14:32");
//!
//! assert_eq!(record.sender(), Some("Alice"));
//! assert_eq!(record.hour(), Some(14));
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Date format used in the `title` attribute of Telegram export date nodes.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Truncated time format stored in records.
pub const TIME_FORMAT: &str = "%H:%M";

/// A single message extracted from a chat export.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `sender` | `Option<String>` | Attributed sender, `None` before any sender is seen |
/// | `message` | `String` | Visible text of the message block |
/// | `date` | `String` | `DD.MM.YYYY`, or empty when the block has no timestamp |
/// | `time` | `String` | `HH:MM`, or empty when the block has no timestamp |
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChatMessageRecord {
    /// Attributed sender of the message.
    #[serde(default)]
    pub sender: Option<String>,

    /// Visible text of the message.
    pub message: String,

    /// Date part of the block timestamp (`DD.MM.YYYY`).
    #[serde(default)]
    pub date: String,

    /// Time part of the block timestamp, truncated to `HH:MM`.
    #[serde(default)]
    pub time: String,
}

impl ChatMessageRecord {
    /// Creates a record with text only: no sender, no timestamp.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            sender: None,
            message: message.into(),
            date: String::new(),
            time: String::new(),
        }
    }

    /// Creates a record with all fields specified.
    pub fn with_fields(
        sender: Option<String>,
        message: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            message: message.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the sender.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Builder method to set the date (`DD.MM.YYYY`).
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Builder method to set the time (`HH:MM`).
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name, if attributed.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if the message text is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.message.trim().is_empty()
    }

    /// Parses the date field.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Parses the date and time fields together.
    ///
    /// Returns `None` when either field is empty or malformed.
    ///
    /// ```
    /// use chatsense::ChatMessageRecord;
    ///
    /// let record = ChatMessageRecord::new("hi").with_date("15.03.2024").with_time("14:32");
    /// let dt = record.datetime().unwrap();
    /// assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-03-15 14:32");
    /// ```
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        let date = self.naive_date()?;
        let time = NaiveTime::parse_from_str(&self.time, TIME_FORMAT).ok()?;
        Some(date.and_time(time))
    }

    /// Returns the hour of day the message was sent, if known.
    pub fn hour(&self) -> Option<u32> {
        NaiveTime::parse_from_str(&self.time, TIME_FORMAT)
            .ok()
            .map(|t| t.hour())
    }
}
