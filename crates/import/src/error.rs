//! Error types for import and seeding.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a whole batch. Per-row failures are reported, not raised.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("no worksheet found in {0}")]
    NoWorksheet(PathBuf),

    #[error("record store error: {0}")]
    Records(#[from] vrnt_records::RecordError),

    #[error("invalid sample dataset: {0}")]
    SampleData(#[from] serde_json::Error),
}

/// Result type for import operations.
pub type ImportResult<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_worksheet_names_the_file() {
        let err = ImportError::NoWorksheet(PathBuf::from("students.xlsx"));
        assert_eq!(err.to_string(), "no worksheet found in students.xlsx");
    }
}
