//! Parser trait for chat exports.
//!
//! A chat export can be handed over either as a file on disk or as a string
//! already held in memory (for example, the body of an uploaded file).
//! [`ChatParser`] covers both entry points.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatsense::parser::ChatParser;
//! use chatsense::parsing::TelegramHtmlParser;
//! use std::path::Path;
//!
//! # fn main() -> chatsense::Result<()> {
//! let parser = TelegramHtmlParser::new();
//!
//! // From a file
//! let records = parser.parse(Path::new("messages.html"))?;
//!
//! // Or from memory
//! let records = parser.parse_str("<div class=\"message\">...</div>")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use crate::ChatMessageRecord;
use crate::error::ChatsenseError;

/// Trait for parsing chat exports into [`ChatMessageRecord`]s.
///
/// Implementations must not keep attribution state between calls: every
/// call to [`parse`](ChatParser::parse) or [`parse_str`](ChatParser::parse_str)
/// starts from a clean slate, so one parser can serve concurrent requests.
pub trait ChatParser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Parses a chat export file and returns all records in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsenseError`] if:
    /// - File cannot be read ([`ChatsenseError::Io`])
    /// - Content cannot be parsed ([`ChatsenseError::Parse`])
    fn parse(&self, path: &Path) -> Result<Vec<ChatMessageRecord>, ChatsenseError>;

    /// Parses chat content from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsenseError::Parse`] if content cannot be parsed.
    fn parse_str(&self, content: &str) -> Result<Vec<ChatMessageRecord>, ChatsenseError>;

    /// Parses a chat export file (convenience method accepting &str path).
    fn parse_file(&self, path: &str) -> Result<Vec<ChatMessageRecord>, ChatsenseError> {
        self.parse(Path::new(path))
    }
}
