/// Error types for dataset loading and request handling
///
/// `TableReadError` is what reading CSV into a `Table` can fail with.
/// `LoadError` adds the file path, and `Error` is what a request can fail
/// with.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to turn a dataset file into a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed table in {}: {message}", path.display())]
    Schema { path: PathBuf, message: String },
}

impl LoadError {
    /// Attach `path` to a table read failure.
    pub fn from_read(path: &Path, err: TableReadError) -> Self {
        match err {
            TableReadError::Csv(source) => LoadError::Parse {
                path: path.to_path_buf(),
                source,
            },
            TableReadError::Schema(message) => LoadError::Schema {
                path: path.to_path_buf(),
                message,
            },
        }
    }
}

/// Failure to build a table from CSV data.
#[derive(Debug, Error)]
pub enum TableReadError {
    /// The bytes are not readable CSV.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Readable CSV that does not form a table: no header row, or a record
    /// whose field count differs from the header.
    #[error("{0}")]
    Schema(String),
}

/// Request-level errors. Each one ends the request; bad filter input never
/// reaches this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown dataset '{0}'")]
    DatasetNotFound(String),

    #[error(transparent)]
    Storage(#[from] LoadError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "server")]
mod http {
    use actix_web::http::{header::ContentType, StatusCode};
    use actix_web::{HttpResponse, ResponseError};

    use super::Error;
    use crate::render;

    impl Error {
        pub fn title(&self) -> &'static str {
            match self {
                Error::DatasetNotFound(_) => "Dataset not found",
                Error::Storage(_) => "Dataset unavailable",
                Error::Internal(_) => "Internal error",
            }
        }
    }

    impl ResponseError for Error {
        fn status_code(&self) -> StatusCode {
            match self {
                Error::DatasetNotFound(_) => StatusCode::NOT_FOUND,
                Error::Storage(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        fn error_response(&self) -> HttpResponse {
            HttpResponse::build(self.status_code())
                .insert_header(ContentType::html())
                .body(render::render_error(self.title(), &self.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::DatasetNotFound("nope.com".to_string());
        assert_eq!(err.to_string(), "unknown dataset 'nope.com'");

        let err: Error = LoadError::NotFound {
            path: PathBuf::from("datasets/missing.csv"),
        }
        .into();
        assert_eq!(err.to_string(), "dataset file not found: datasets/missing.csv");
    }

    #[test]
    fn test_from_read_keeps_csv_source() {
        use std::error::Error as _;

        let csv_err = crate::table::Table::from_csv_reader("t", &b"Make\n\xff\xfe\n"[..])
            .unwrap_err();
        let err = LoadError::from_read(Path::new("bad.csv"), csv_err);

        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_read_schema() {
        let err = LoadError::from_read(
            Path::new("ragged.csv"),
            TableReadError::Schema("Row 1: 4 fields, expected 2".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "malformed table in ragged.csv: Row 1: 4 fields, expected 2"
        );
    }
}
