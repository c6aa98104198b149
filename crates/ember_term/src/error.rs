//! Session-level error types.

use thiserror::Error;

/// Fatal session errors. Parse-level problems never surface here; they
/// are logged and skipped.
#[derive(Debug, Error)]
pub enum TermError {
    #[error("cannot load input method dictionary")]
    DictionaryLoad(#[from] std::io::Error),

    #[error("input method dictionary key {0:?} is not lowercase ascii")]
    InvalidDictionaryKey(String),
}
