//! Telegram Desktop HTML export parser.
//!
//! Telegram Desktop exports a chat as a series of `messages*.html` files with
//! the following structure:
//!
//! ```html
//! <div class="message default clearfix" id="message1">
//!   <div class="body">
//!     <div class="pull_right date details" title="15.03.2024 14:32:10 UTC+03:00">14:32</div>
//!     <div class="from_name">Alice</div>
//!     <div class="text">hi</div>
//!   </div>
//! </div>
//! <div class="message default clearfix joined" id="message2">
//!   <div class="body">
//!     <div class="text">there</div>
//!   </div>
//! </div>
//! ```
//!
//! Consecutive messages from one participant are "joined": only the first
//! block names the sender. The parser therefore carries the last seen sender
//! forward. A forwarded sub-message names its original author, and that name
//! replaces the running sender for this block and the blocks after it.

use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::ChatMessageRecord;
use crate::config::TelegramHtmlConfig;
use crate::error::{ChatsenseError, ParseErrorKind};
use crate::parser::ChatParser;

use super::{collapse_whitespace, split_timestamp_title};

/// Parser for Telegram HTML exports.
///
/// # Example
///
/// ```rust
/// use chatsense::parser::ChatParser;
/// use chatsense::parsing::TelegramHtmlParser;
///
/// # fn main() -> chatsense::Result<()> {
/// let html = r#"
///   <div class="message"><div class="from_name">Alice</div><div class="text">hi</div></div>
///   <div class="message"><div class="text">there</div></div>
/// "#;
///
/// let records = TelegramHtmlParser::new().parse_str(html)?;
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].sender(), Some("Alice"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TelegramHtmlParser {
    config: TelegramHtmlConfig,
}

impl TelegramHtmlParser {
    /// Creates a parser for the default Telegram Desktop markup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom selectors.
    pub fn with_config(config: TelegramHtmlConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &TelegramHtmlConfig {
        &self.config
    }

    fn parse_document(&self, content: &str) -> Result<Vec<ChatMessageRecord>, ParseErrorKind> {
        if content.trim().is_empty() {
            return Err(ParseErrorKind::Empty);
        }

        let selectors = Selectors::compile(&self.config)?;
        let document = Html::parse_document(content);

        let mut state = ParseState::default();
        let mut records = Vec::new();
        let mut blocks = 0usize;

        for block in document.select(&selectors.message) {
            blocks += 1;
            if let Some(record) = state.visit(block, &selectors) {
                records.push(record);
            }
        }

        debug!(blocks, records = records.len(), "parsed Telegram HTML export");
        Ok(records)
    }
}

impl ChatParser for TelegramHtmlParser {
    fn name(&self) -> &'static str {
        "Telegram HTML"
    }

    fn parse(&self, path: &Path) -> Result<Vec<ChatMessageRecord>, ChatsenseError> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|e| {
            ChatsenseError::telegram_html_parse(ParseErrorKind::Utf8(e), Some(path.to_path_buf()))
        })?;
        self.parse_document(&content)
            .map_err(|kind| ChatsenseError::telegram_html_parse(kind, Some(path.to_path_buf())))
    }

    fn parse_str(&self, content: &str) -> Result<Vec<ChatMessageRecord>, ChatsenseError> {
        self.parse_document(content)
            .map_err(|kind| ChatsenseError::telegram_html_parse(kind, None))
    }
}

/// Compiled selectors for one parse call.
struct Selectors {
    message: Selector,
    from_name: Selector,
    text: Selector,
    forwarded: Selector,
    date: Selector,
    name_date: Selector,
}

impl Selectors {
    fn compile(config: &TelegramHtmlConfig) -> Result<Self, ParseErrorKind> {
        Ok(Self {
            message: compile(&config.message_selector)?,
            from_name: compile(&config.from_name_selector)?,
            text: compile(&config.text_selector)?,
            forwarded: compile(&config.forwarded_selector)?,
            date: compile(&config.date_selector)?,
            name_date: compile(&config.name_date_selector)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector, ParseErrorKind> {
    Selector::parse(selector).map_err(|_| ParseErrorKind::Selector(selector.to_string()))
}

/// Sender attribution state, scoped to a single parse call.
///
/// `current_sender` is `None` until the first block naming a sender; after
/// that it only ever changes to another name.
#[derive(Debug, Default)]
struct ParseState {
    current_sender: Option<String>,
}

impl ParseState {
    /// Visits one message block, updating attribution and returning a
    /// record when the block has visible text.
    fn visit(&mut self, block: ElementRef<'_>, selectors: &Selectors) -> Option<ChatMessageRecord> {
        if let Some(name) = own_sender_node(block, selectors).and_then(|node| extract_name(node, selectors)) {
            self.current_sender = Some(name);
        }

        // A forwarded author takes over even when the block has no text
        let forwarded_name = block
            .select(&selectors.forwarded)
            .next()
            .and_then(|forwarded| forwarded.select(&selectors.from_name).next())
            .and_then(|node| extract_name(node, selectors));
        if let Some(name) = forwarded_name {
            self.current_sender = Some(name);
        }

        let text_node = block.select(&selectors.text).next()?;
        let message = collapse_whitespace(text_node.text());
        if message.is_empty() {
            return None;
        }

        let (date, time) = block
            .select(&selectors.date)
            .next()
            .and_then(|node| node.value().attr("title"))
            .map(split_timestamp_title)
            .unwrap_or_default();

        Some(ChatMessageRecord::with_fields(
            self.current_sender.clone(),
            message,
            date,
            time,
        ))
    }
}

/// Finds the block's own sender node, ignoring names inside a forwarded
/// sub-message.
fn own_sender_node<'a>(block: ElementRef<'a>, selectors: &Selectors) -> Option<ElementRef<'a>> {
    block
        .select(&selectors.from_name)
        .find(|node| !is_within(*node, block, &selectors.forwarded))
}

/// Returns `true` if `node` has an ancestor below `root` matching `container`.
fn is_within(node: ElementRef<'_>, root: ElementRef<'_>, container: &Selector) -> bool {
    (*node)
        .ancestors()
        .take_while(|ancestor| ancestor.id() != (*root).id())
        .filter_map(ElementRef::wrap)
        .any(|ancestor| container.matches(&ancestor))
}

/// Reads a display name, skipping the timestamp span Telegram embeds in
/// forwarded name nodes. Returns `None` for blank names.
fn extract_name(node: ElementRef<'_>, selectors: &Selectors) -> Option<String> {
    let excised: Vec<_> = node.select(&selectors.name_date).map(|span| (*span).id()).collect();

    let fragments = (*node).descendants().filter_map(|descendant| {
        let text = descendant.value().as_text()?;
        let hidden = descendant
            .ancestors()
            .take_while(|ancestor| ancestor.id() != (*node).id())
            .any(|ancestor| excised.contains(&ancestor.id()));
        if hidden { None } else { Some(&**text) }
    });

    let name = collapse_whitespace(fragments);
    if name.is_empty() { None } else { Some(name) }
}
