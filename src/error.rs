//! Error taxonomy shared by the card model, the deck, the codec and the catalog.
//!
//! Every failure here is recoverable: the object an operation was applied to
//! is left exactly as it was before the call.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors raised by deck and card operations.
#[derive(Debug, Error)]
pub enum DeckError {
    /// A field value is outside its domain (empty name, range violation, bad suit).
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The deck already holds `capacity` cards.
    #[error("deck is full ({capacity} cards)")]
    Capacity {
        /// Capacity that was reached.
        capacity: usize,
    },

    /// The operation needs at least one card.
    #[error("cannot {operation} an empty deck")]
    Empty {
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// An argument was missing or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A byte stream could not be decoded.
    #[error("corrupt deck file: bad {field} (expected {expected}, found {found})")]
    CorruptFile {
        /// Field being decoded when the failure occurred.
        field: &'static str,
        /// What the decoder expected.
        expected: String,
        /// What it observed instead.
        found: String,
    },

    /// Filesystem failure.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },
}

impl DeckError {
    /// Build a validation error for `field`.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Build a corrupt-file error for `field`.
    pub fn corrupt(
        field: &'static str,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::CorruptFile {
            field,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Name of the field this error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } | Self::CorruptFile { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Check if this is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a decode failure.
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptFile { .. })
    }
}
