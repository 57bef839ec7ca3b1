//! Error types for the CSV output stage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing or post-processing output files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Nothing to write; no file was created.
    #[error("no records to write")]
    NoRecords,

    /// The primary file has a header but no data rows.
    #[error("no data rows in {path}; nothing to sort", path = path.display())]
    EmptyOutput {
        /// The primary file that was read.
        path: PathBuf,
    },

    /// Creating or flushing a file failed.
    #[error("I/O error on {path}: {source}", path = path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding or decoding a CSV row failed.
    #[error("CSV error in {path}: {source}", path = path.display())]
    Csv {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },
}

impl OutputError {
    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a CSV error for `path`.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
