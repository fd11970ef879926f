//! Error types for store commands and persistence.

use std::io;

use thiserror::Error;

/// Primary error type for settings operations.
///
/// Validation variants describe a rejected command; the store state is left
/// exactly as it was before the command.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reorder input was not a permutation of the current section ids.
    #[error("section order must be a permutation of the current sections")]
    InvalidPermutation {
        /// Current ids absent from the requested order.
        missing: Vec<String>,
        /// Requested ids that do not exist.
        unexpected: Vec<String>,
        /// Ids listed more than once.
        duplicates: Vec<String>,
    },
    /// No section with the given id exists.
    #[error("unknown section '{id}'")]
    UnknownSection {
        /// Identifier supplied by the caller.
        id: String,
    },
    /// A settings field contained a value outside its domain.
    #[error("invalid value for '{field}': {reason}")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Color value is not a recognised CSS color.
    #[error("malformed color value '{value}'")]
    InvalidColor {
        /// Color payload provided by the caller.
        value: String,
    },
    /// File system operation failed.
    #[error("filesystem operation '{operation}' failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Source IO error.
        source: io::Error,
    },
    /// Encoding or decoding a settings document failed.
    #[error("settings document {operation} failed")]
    Serialization {
        /// Operation identifier.
        operation: &'static str,
        /// Source serde error.
        source: serde_json::Error,
    },
}

impl SettingsError {
    /// Whether the error is a rejected command rather than an IO failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPermutation { .. }
                | Self::UnknownSection { .. }
                | Self::InvalidField { .. }
                | Self::InvalidColor { .. }
        )
    }

    pub(crate) fn invalid_field(
        field: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::InvalidField {
            field,
            value: Some(value.to_string()),
            reason,
        }
    }
}

/// Convenience alias for settings results.
pub type SettingsResult<T> = Result<T, SettingsError>;
