use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read analyzer result {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid converter configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("no analyzer result converter registered for tool {0:?}")]
    UnknownTool(String),
    #[error("failed to serialize plist results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reasons a [`crate::Message`] cannot be constructed.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum MessageError {
    #[error("file path is empty")]
    EmptyPath,
    #[error("line numbers are 1-based, got 0")]
    ZeroLine,
    #[error("column numbers are 1-based, got 0")]
    ZeroColumn,
    #[error("checker name is empty or malformed")]
    EmptyChecker,
}

/// Why a single raw record was dropped during a scan.
///
/// Skips never reach the caller of a parse; they are only logged.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum LineSkip {
    #[error("record does not match the expected pattern")]
    NoMatch,
    #[error("invalid {field} number {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("line too long (observed_bytes={observed_bytes}, max_line_bytes={max_line_bytes})")]
    LineTooLong {
        observed_bytes: usize,
        max_line_bytes: usize,
    },
    #[error("invalid message: {0}")]
    InvalidMessage(#[from] MessageError),
}
