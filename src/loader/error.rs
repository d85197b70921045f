// File: ./src/loader/error.rs
use http::StatusCode;
use thiserror::Error;

/// Why a data document could not be turned into a value.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid data location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },
    #[error("failed to fetch {path}: {reason}")]
    Transport { path: String, reason: String },
    #[error("failed to load {path}: HTTP {status}")]
    Status { path: String, status: StatusCode },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fail-soft combinator: swap any load failure for a caller-provided value.
pub trait LoadResultExt<T> {
    fn or_fallback(self, fallback: T) -> T;
}

impl<T> LoadResultExt<T> for Result<T, LoadError> {
    fn or_fallback(self, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{}; using fallback value", e);
                fallback
            }
        }
    }
}
