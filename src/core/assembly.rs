//! Conversion of parsed chat records into a table.

use tracing::debug;

use crate::core::table::Table;
use crate::record::ChatMessageRecord;

/// Columns produced by [`to_table`], in order.
pub const CHAT_COLUMNS: [&str; 4] = ["Sender", "Message", "Date", "Time"];

/// Builds a `Sender`/`Message`/`Date`/`Time` table from records.
///
/// Input order is preserved. Records whose message is empty after trimming
/// are dropped. A missing sender becomes a missing cell; date and time are
/// copied as they are (possibly empty).
///
/// # Example
///
/// ```rust
/// use chatsense::ChatMessageRecord;
/// use chatsense::core::to_table;
///
/// let records = vec![
///     ChatMessageRecord::new("привет").with_sender("Alice"),
///     ChatMessageRecord::new("   "),
/// ];
/// let table = to_table(&records);
///
/// assert_eq!(table.columns(), ["Sender", "Message", "Date", "Time"]);
/// assert_eq!(table.len(), 1);
/// ```
pub fn to_table(records: &[ChatMessageRecord]) -> Table {
    let rows = records
        .iter()
        .filter(|r| !r.is_empty())
        .map(|record| {
            vec![
                record.sender.clone(),
                Some(record.message.clone()),
                Some(record.date.clone()),
                Some(record.time.clone()),
            ]
        })
        .collect();
    let table = Table::from_rows(CHAT_COLUMNS.map(String::from).to_vec(), rows);
    debug!(
        records = records.len(),
        rows = table.len(),
        "assembled chat table"
    );
    table
}
