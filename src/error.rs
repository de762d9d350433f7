//! Error types for table generation
//!
//! Every error is fatal: a partially correct syscall table must never be
//! written out.

use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while fetching, parsing or rendering syscall tables
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("HTTP GET {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download of {url} failed with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line_no}: {source} at '{line}'")]
    Parse {
        path: String,
        line_no: usize,
        line: String,
        #[source]
        source: LineError,
    },

    #[error("{arch}: syscall number {num} is assigned to both {first} and {second}")]
    DuplicateNumber {
        arch: String,
        num: u32,
        first: String,
        second: String,
    },

    #[error("Invalid header pattern for {path}: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to render output: {0}")]
    Render(String),
}

impl GenerateError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Why a single source line could not be turned into a syscall
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("unexpected line format: expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("failed to parse syscall number '{field}': {source}")]
    BadNumber {
        field: String,
        #[source]
        source: ParseIntError,
    },

    #[error("syscall number {num} plus offset {offset:#x} overflows")]
    NumberOverflow { num: u32, offset: u32 },
}

pub type Result<T> = std::result::Result<T, GenerateError>;
