use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by amenimap.
#[derive(Debug, Error)]
pub enum Error {
    /// A geometric precondition was violated (coordinate or radius out of range).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid algorithm parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: String,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount { requested: usize, n_items: usize },

    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// The clustering backend rejected its input.
    #[error("clustering failed: {0}")]
    Clustering(#[from] clump::Error),

    /// A required input file does not exist.
    #[error("{} is not present in {}", file_name(.0), parent_dir(.0))]
    MissingInput(PathBuf),

    /// A record in an input file could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Invalid analysis configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn parent_dir(path: &std::path::Path) -> String {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
        _ => ".".to_string(),
    }
}
