use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One enumeration table: a header of column names followed by rows.
///
/// The first column is the canonical option label; the remaining columns
/// are numeric secondary values applied onto the owning spec when the
/// option is selected. Tables are read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumTable {
    /// Column names. `header[0]` names the label column.
    pub header: Vec<String>,
    pub rows: Vec<EnumRow>,
}

/// One table row: the option label plus its secondary values, aligned with
/// `header[1..]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumRow {
    pub label: String,
    pub values: Vec<f64>,
}

/// Errors while parsing an enumeration table document.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TableError {
    #[error("failed to parse table: {0}")]
    ParseError(String),

    #[error("table document is empty")]
    Empty,

    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

impl EnumTable {
    /// Parse the on-disk JSON layout: an array of arrays whose first entry
    /// is the header and whose remaining entries are `[label, value...]`.
    pub fn from_json(json: &str) -> Result<EnumTable, TableError> {
        let doc: Vec<Vec<Value>> =
            serde_json::from_str(json).map_err(|e| TableError::ParseError(e.to_string()))?;

        let mut entries = doc.into_iter();
        let header_row = entries.next().ok_or(TableError::Empty)?;
        let header = header_row
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| TableError::MalformedRow {
                        row: 0,
                        reason: "header entries must be strings".to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::new();
        for (i, entry) in entries.enumerate() {
            let mut cells = entry.into_iter();
            let label = match cells.next() {
                Some(Value::String(s)) => s,
                _ => {
                    return Err(TableError::MalformedRow {
                        row: i + 1,
                        reason: "first cell must be the option label".to_string(),
                    });
                }
            };
            let values = cells
                .map(|v| {
                    v.as_f64().ok_or_else(|| TableError::MalformedRow {
                        row: i + 1,
                        reason: "secondary cells must be numeric".to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(EnumRow { label, values });
        }

        Ok(EnumTable { header, rows })
    }

    /// 1-based row index of a label, or None when no row matches.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.label == label)
            .map(|pos| pos + 1)
    }

    /// Row for a label, if any.
    pub fn row(&self, label: &str) -> Option<&EnumRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    /// Whether the table carries secondary columns at all.
    pub fn has_secondary_columns(&self) -> bool {
        self.header.len() > 1
    }
}
