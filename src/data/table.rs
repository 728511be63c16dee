use std::io;
use std::path::Path;

use crate::error::ExportError;

// ---------------------------------------------------------------------------
// RawTable – a CSV file with cleaned headers
// ---------------------------------------------------------------------------

/// A CSV export held as trimmed strings, before any typing.
///
/// Header names are stripped of a UTF-8 BOM and surrounding whitespace so
/// that exports saved by spreadsheet tools still match the expected names.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Display name of the source file, used in error messages.
    pub file: String,
    pub headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Read a CSV file whose first record is the header.
    pub fn from_path(path: &Path, file: &str) -> Result<Self, ExportError> {
        Self::from_path_with_header(path, file, None)
    }

    /// Read a CSV file, skipping any preamble before the record that
    /// contains `anchor` (when given).
    pub fn from_path_with_header(
        path: &Path,
        file: &str,
        anchor: Option<&str>,
    ) -> Result<Self, ExportError> {
        let handle = std::fs::File::open(path).map_err(|e| ExportError::Csv {
            file: file.to_string(),
            source: csv::Error::from(e),
        })?;
        Self::from_reader(handle, file, anchor)
    }

    pub fn from_reader<R: io::Read>(
        reader: R,
        file: &str,
        anchor: Option<&str>,
    ) -> Result<Self, ExportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|source| ExportError::Csv {
                file: file.to_string(),
                source,
            })?;

            match &headers {
                None => {
                    let cells: Vec<String> = record.iter().map(clean_header).collect();
                    let is_header = match anchor {
                        Some(a) => cells.iter().any(|c| c == a),
                        None => true,
                    };
                    if is_header {
                        headers = Some(cells);
                    }
                }
                Some(_) => {
                    rows.push(record.iter().map(|c| c.trim().to_string()).collect());
                }
            }
        }

        let headers = match (headers, anchor) {
            (Some(h), _) => h,
            (None, Some(a)) => {
                return Err(ExportError::HeaderNotFound {
                    file: file.to_string(),
                    anchor: a.to_string(),
                })
            }
            (None, None) => Vec::new(),
        };

        Ok(RawTable {
            file: file.to_string(),
            headers,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Fail with the first column of `columns` that is absent.
    pub fn require(&self, columns: &[&str]) -> Result<(), ExportError> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(ExportError::MissingColumn {
                file: self.file.clone(),
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Iterate over data rows.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row {
            table: self,
            cells,
        })
    }
}

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

// ---------------------------------------------------------------------------
// Row – borrowed view of one data record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a RawTable,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Cell value by column name; `None` when the column or cell is empty.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column_index(column)?;
        self.cells
            .get(idx)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Cell value or an empty string.
    pub fn text(&self, column: &str) -> String {
        self.get(column).unwrap_or_default().to_string()
    }
}
