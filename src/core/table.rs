//! In-memory table with named columns and optional string cells.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ChatsenseError, Result};

/// A rectangular table of optional string cells.
///
/// Column order is significant and preserved by every reader and writer.
/// A `None` cell is a missing value; it is distinct from an empty string
/// until a preprocessing step coerces it.
///
/// # Example
///
/// ```rust
/// use chatsense::core::Table;
///
/// let mut table = Table::new(["Sender", "Message"]);
/// table.push_row(vec![Some("Alice".into()), Some("привет".into())]).unwrap();
///
/// assert_eq!(table.get(0, "Message"), Some("привет"));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates a table from rows that already match the column count.
    pub(crate) fn from_rows(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns `true` if the table has a column named `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsenseError::InvalidFormat`] if the row width differs
    /// from the number of columns.
    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ChatsenseError::invalid_format(
                "table",
                format!(
                    "row {} has {} cells, expected {}",
                    self.rows.len() + 1,
                    row.len(),
                    self.columns.len()
                ),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Cell value at `row` in column `column`, if present and not missing.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)?.as_deref()
    }

    /// All values of one column, or `None` if there is no such column.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index].as_deref()).collect())
    }

    /// Keeps only the rows for which `keep` returns `true`.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Option<String>]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Iterates rows as serializable column-name maps.
    pub fn records(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(|cells| RowRef {
            columns: &self.columns,
            cells,
        })
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<Option<String>>] {
        &mut self.rows
    }
}

/// A borrowed row that serializes as a map from column name to value,
/// keys in column order.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [String],
    cells: &'a [Option<String>],
}

impl<'a> RowRef<'a> {
    /// Cell values, in column order.
    pub fn cells(&self) -> &'a [Option<String>] {
        self.cells
    }
}

impl Serialize for RowRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["Sender", "Message"]);
        table
            .push_row(vec![Some("Alice".into()), Some("привет".into())])
            .unwrap();
        table.push_row(vec![None, Some("пока".into())]).unwrap();
        table
    }

    #[test]
    fn test_column_lookup() {
        let table = sample();
        assert_eq!(table.column_index("Message"), Some(1));
        assert!(table.has_column("Sender"));
        assert!(!table.has_column("message"));
    }

    #[test]
    fn test_get_and_column() {
        let table = sample();
        assert_eq!(table.get(0, "Sender"), Some("Alice"));
        assert_eq!(table.get(1, "Sender"), None);
        assert_eq!(table.get(5, "Sender"), None);
        assert_eq!(table.column("Message"), Some(vec![Some("привет"), Some("пока")]));
        assert_eq!(table.column("Date"), None);
    }

    #[test]
    fn test_push_row_wrong_width() {
        let mut table = Table::new(["A", "B"]);
        let err = table.push_row(vec![Some("x".into())]).unwrap_err();
        assert!(err.to_string().contains("expected 2"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_retain_rows() {
        let mut table = sample();
        table.retain_rows(|row| row[0].is_some());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_row_serializes_in_column_order() {
        let table = sample();
        let json: Vec<String> = table
            .records()
            .map(|row| serde_json::to_string(&row).unwrap())
            .collect();
        assert_eq!(json[0], r#"{"Sender":"Alice","Message":"привет"}"#);
        assert_eq!(json[1], r#"{"Sender":null,"Message":"пока"}"#);
    }
}
