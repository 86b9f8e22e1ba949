//! Chat export parsers and the helpers they share.
//!
//! - [`TelegramHtmlParser`] - Parses Telegram Desktop HTML exports
//!   (`messages.html`, `messages2.html`, ...)

pub mod telegram_html;

pub use telegram_html::TelegramHtmlParser;

/// Splits a Telegram date `title` attribute into `(date, time)`.
///
/// The attribute looks like `"15.03.2024 14:32:10 UTC+03:00"`. The date is
/// everything before the first space; the time is the next space-separated
/// token truncated to `HH:MM`. A title without a space yields two empty
/// strings.
///
/// # Example
///
/// ```
/// use chatsense::parsing::split_timestamp_title;
///
/// assert_eq!(
///     split_timestamp_title("15.03.2024 14:32:10 UTC+03:00"),
///     ("15.03.2024".to_string(), "14:32".to_string())
/// );
/// assert_eq!(split_timestamp_title("garbage"), (String::new(), String::new()));
/// ```
pub fn split_timestamp_title(title: &str) -> (String, String) {
    let Some((date, rest)) = title.split_once(' ') else {
        return (String::new(), String::new());
    };
    let time_part = rest.split(' ').next().unwrap_or_default();
    let time = time_part.chars().take(5).collect();
    (date.to_string(), time)
}

/// Joins text fragments with single spaces, dropping whitespace runs and
/// empty fragments.
pub fn collapse_whitespace<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    fragments
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
