//! Errors raised outside of `validate` itself
//!
//! Validation failures are never errors: they are messages on [`FormData`]
//! and a `false` return. This type covers registry lookups, property maps
//! and the collaborator failures that validators log and swallow.
//!
//! [`FormData`]: crate::FormData

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("no {kind} registered under class name \"{class_name}\"")]
    UnknownPlugin { kind: &'static str, class_name: String },

    #[error("properties must be a JSON object, got {0}")]
    InvalidProperties(String),

    #[error("file \"{0}\" could not be resolved")]
    FileNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ValidatorError> = std::result::Result<T, E>;
