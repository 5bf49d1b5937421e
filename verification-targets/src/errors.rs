//! Error types for setting-value parsing.

use thiserror::Error;

/// Errors produced while turning a raw setting value into a structured one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingValueError {
    /// The value does not follow the token grammar.
    #[error("invalid setting value \"{value}\": {message}")]
    Format { value: String, message: String },

    /// A keyword outside the known vocabulary.
    #[error("unknown verification target \"{keyword}\"")]
    Configuration { keyword: String },
}

/// Result type for setting-value parsing.
pub type SettingValueResult<T> = Result<T, SettingValueError>;
