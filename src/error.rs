use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Loading errors
// ---------------------------------------------------------------------------

/// Problems reading the export directory or one of its CSV files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("data directory does not exist: {0}")]
    MissingDataDir(PathBuf),

    #[error("could not read {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("{file} has no header row containing '{anchor}'")]
    HeaderNotFound { file: String, anchor: String },

    #[error("column '{column}' is missing in {file}")]
    MissingColumn { file: String, column: String },
}

// ---------------------------------------------------------------------------
// Analysis errors
// ---------------------------------------------------------------------------

/// Reasons an analysis cannot be produced. Displayed verbatim in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no data available: {0}")]
    NoData(&'static str),

    #[error("column '{column}' is missing in {file}")]
    MissingColumn { file: String, column: String },

    #[error("{0} was not found in the export")]
    MissingFile(&'static str),
}

impl From<ExportError> for AnalysisError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::MissingColumn { file, column } => {
                AnalysisError::MissingColumn { file, column }
            }
            _ => AnalysisError::NoData("the export file could not be read"),
        }
    }
}
