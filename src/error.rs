use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures that end the program before or outside a session.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No JSON file provided or piped input detected")]
    NoInput,

    #[error("JSON file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Invalid JSON data provided: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Empty path")]
    Empty,

    #[error("Empty segment at offset {0}")]
    EmptySegment(usize),

    #[error("Unclosed bracket at offset {0}")]
    UnclosedBracket(usize),

    #[error("Invalid index `{0}`")]
    InvalidIndex(String),

    #[error("Unexpected character `{ch}` at offset {offset}")]
    Unexpected { ch: char, offset: usize },
}

/// Session store failures; a missing file is not one of them.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Saved data in {path} is not valid: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),
}
