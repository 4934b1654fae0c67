// File: crates/chart-core/src/error.rs
// Summary: Error types for loading, configuration and page output.

use thiserror::Error;

/// Result type alias for chart-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure while fetching or decoding a CSV dataset.
/// Every variant is terminal for the load that raised it; nothing is retried.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Invalid render configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid colour '{0}' (expected #rgb or #rrggbb)")]
    Color(String),

    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
