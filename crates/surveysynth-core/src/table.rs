use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identifier::IdentifierAllocator;

/// One named column of survey responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseColumn {
    pub name: String,
    pub cells: Vec<Option<String>>,
}

impl ResponseColumn {
    /// Non-missing cell values in row order.
    pub fn observed(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .filter(|cell| !cell_is_missing(cell))
            .filter_map(|cell| cell.as_deref())
    }

    /// True when every cell is missing or blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.observed().next().is_none()
    }
}

/// In-memory table of survey responses.
///
/// Ordered named columns with equal-length cell vectors; a cell is missing
/// when `None` or blank after trimming. Produced by the external ingestion
/// adapter after header detection and row normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseTable {
    columns: Vec<ResponseColumn>,
}

impl ResponseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from pre-shaped columns, validating equal lengths.
    pub fn from_columns(columns: Vec<ResponseColumn>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.cells.len();
            for column in &columns {
                if column.cells.len() != rows {
                    return Err(Error::InvalidTable(format!(
                        "column '{}' has {} cells, expected {}",
                        column.name,
                        column.cells.len(),
                        rows
                    )));
                }
            }
        }
        Ok(Self { columns })
    }

    /// Build a table from a header row plus data rows.
    ///
    /// Every row must match the header length; padding and truncation are
    /// the ingestion adapter's job.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let mut columns: Vec<ResponseColumn> = headers
            .into_iter()
            .map(|name| ResponseColumn {
                name,
                cells: Vec::with_capacity(rows.len()),
            })
            .collect();

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::InvalidTable(format!(
                    "row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    columns.len()
                )));
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.cells.push(cell);
            }
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[ResponseColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ResponseColumn> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns
            .first()
            .map(|column| column.cells.len())
            .unwrap_or(0)
    }

    /// Remove columns whose raw label looks like an ingestion timestamp.
    pub fn without_timestamp_columns(mut self) -> Self {
        self.columns
            .retain(|column| !column.name.to_lowercase().contains("time"));
        self
    }

    /// Rename every column to its canonical identifier, de-duplicated in
    /// column order.
    pub fn canonicalize_columns(&mut self) {
        let mut allocator = IdentifierAllocator::new();
        for column in &mut self.columns {
            column.name = allocator.allocate(&column.name);
        }
    }

    /// Keep only columns accepted by `keep`, preserving order.
    pub fn retain_columns(&mut self, keep: impl Fn(&str) -> bool) {
        self.columns.retain(|column| keep(&column.name));
    }

    /// Drop columns that are blank across all rows; returns their names.
    pub fn drop_blank_columns(&mut self) -> Vec<String> {
        let mut dropped = Vec::new();
        self.columns.retain(|column| {
            if column.is_blank() {
                dropped.push(column.name.clone());
                false
            } else {
                true
            }
        });
        dropped
    }

    /// Append one row; columns absent from `row` receive a missing cell.
    pub fn push_row(&mut self, row: &HashMap<String, String>) {
        for column in &mut self.columns {
            column.cells.push(row.get(&column.name).cloned());
        }
    }
}

/// True when a cell carries no observation.
pub fn cell_is_missing(cell: &Option<String>) -> bool {
    match cell {
        Some(value) => value.trim().is_empty(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let result = ResponseTable::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![cell("1"), cell("2")], vec![cell("3")]],
        );
        assert!(matches!(result, Err(Error::InvalidTable(_))));
    }

    #[test]
    fn from_columns_rejects_unequal_lengths() {
        let result = ResponseTable::from_columns(vec![
            ResponseColumn {
                name: "a".to_string(),
                cells: vec![cell("1")],
            },
            ResponseColumn {
                name: "b".to_string(),
                cells: vec![cell("1"), cell("2")],
            },
        ]);
        assert!(matches!(result, Err(Error::InvalidTable(_))));
    }

    #[test]
    fn drops_timestamp_like_columns() {
        let table = ResponseTable::from_rows(
            vec!["Timestamp".to_string(), "Name".to_string()],
            vec![vec![cell("t1"), cell("Amal")]],
        )
        .unwrap();

        let table = table.without_timestamp_columns();
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["Name"]);
    }

    #[test]
    fn drops_blank_columns() {
        let mut table = ResponseTable::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![cell("1"), cell("  ")], vec![cell("2"), None]],
        )
        .unwrap();

        let dropped = table.drop_blank_columns();
        assert_eq!(dropped, vec!["b".to_string()]);
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn push_row_fills_absent_columns_with_missing() {
        let mut table = ResponseTable::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![cell("1"), cell("2")]],
        )
        .unwrap();

        let mut row = HashMap::new();
        row.insert("a".to_string(), "3".to_string());
        table.push_row(&row);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("a").unwrap().cells[1], cell("3"));
        assert_eq!(table.column("b").unwrap().cells[1], None);
    }
}
