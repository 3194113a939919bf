//! Error kinds shared by the value tree and the serialization layer.

use thiserror::Error;

/// Errors produced while reading, converting, or registering codecs.
///
/// `MissingKey`, `TypeMismatch`, and `MalformedToken` are recoverable:
/// defaulting accessors such as [`crate::Section::get_or`] swallow them.
/// `DuplicateRegistration` only occurs while a registry is being populated
/// at startup and is fatal to that registration call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("section has no value with key {0:?}")]
    MissingKey(String),

    #[error("cannot convert {found} to {requested}")]
    TypeMismatch {
        requested: &'static str,
        found: String,
    },

    #[error("no codec registered for {0}")]
    NoCodecRegistered(&'static str),

    #[error("malformed token {token:?}: {reason}")]
    MalformedToken { token: String, reason: String },

    #[error("a codec is already registered for {0}")]
    DuplicateRegistration(&'static str),
}

impl ConfigError {
    /// Shorthand for a [`ConfigError::TypeMismatch`] against a requested type.
    pub fn mismatch(requested: &'static str, found: impl Into<String>) -> Self {
        ConfigError::TypeMismatch {
            requested,
            found: found.into(),
        }
    }

    /// Shorthand for a [`ConfigError::MalformedToken`].
    pub fn malformed(token: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::MalformedToken {
            token: token.into(),
            reason: reason.into(),
        }
    }
}
