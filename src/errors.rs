//! Error types for test case reading.
//!
//! Failures fall into three families: the filesystem (`Io`), the document
//! grammar and setting literals (`Parse` / `Format`), and setting values
//! with their own vocabulary (`Setting`).

use thiserror::Error;
use verification_targets::SettingValueError;

/// Errors that can occur while reading a test case.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// A document, external source or import could not be opened or read.
    #[error("{path}: {message}")]
    Io { path: String, message: String },

    /// A grammar violation at a specific document line.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A format violation not tied to one line (setting literals, leftovers).
    #[error("{message}")]
    Format { message: String },

    /// The reader configuration file is not valid TOML.
    #[error("invalid reader configuration {path}: {message}")]
    Config { path: String, message: String },

    /// A setting value was rejected by its value parser.
    #[error(transparent)]
    Setting(#[from] SettingValueError),
}

impl ReaderError {
    /// Whether this is a format error in the broad sense: a grammar
    /// violation, a bad literal, or a malformed setting value.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            ReaderError::Parse { .. }
                | ReaderError::Format { .. }
                | ReaderError::Setting(SettingValueError::Format { .. })
        )
    }

    pub(crate) fn io(path: impl AsRef<std::path::Path>, message: impl ToString) -> Self {
        ReaderError::Io {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        ReaderError::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        ReaderError::Format {
            message: message.into(),
        }
    }
}

/// Result type for reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;
