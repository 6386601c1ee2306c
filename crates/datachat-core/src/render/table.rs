//! Table normalization: heterogeneous row objects into a rectangular grid

use serde_json::Value;

/// A rectangular grid of display strings. Every row has `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Build a grid from row objects.
    ///
    /// Columns are the union of all field names in first-seen order. A row
    /// without a field gets an empty cell; a row that is not an object
    /// contributes no fields.
    pub fn from_rows(rows: &[Value]) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for row in rows {
            if let Some(object) = row.as_object() {
                for key in object.keys() {
                    if !headers.iter().any(|h| h == key) {
                        headers.push(key.clone());
                    }
                }
            }
        }

        let rows = rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|h| cell_text(row.as_object().and_then(|o| o.get(h))))
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// Display width (in chars) of each column, headers included.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

/// Text for one cell. Missing fields are empty, strings are shown as-is,
/// other values (including `null`) use their JSON text.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
