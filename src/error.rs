use std::fmt;
use thiserror::Error;

use crate::element::ContentKind;
use crate::property::{PropertyKey, ValueKind};

/// The kind of entity an id refers to, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Element,
    Animation,
    Keyframe,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element => write!(f, "element"),
            Self::Animation => write!(f, "animation"),
            Self::Keyframe => write!(f, "keyframe"),
        }
    }
}

/// Errors raised when reading or writing a single property
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    #[error("Property {key} expects a {expected} value")]
    KindMismatch { key: PropertyKey, expected: ValueKind },

    #[error("Property {key} does not apply to {content} content")]
    NotApplicable { key: PropertyKey, content: ContentKind },

    #[error("Property {key} must be a finite number")]
    NotFinite { key: PropertyKey },

    #[error("Property {key} follows the content size and has no value to key")]
    AutoSized { key: PropertyKey },
}

/// Errors that can occur during store mutations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The referenced entity does not exist (or no longer exists)
    #[error("No {kind} with id {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Animation durations must be strictly positive
    #[error("Invalid animation duration: {0} ms")]
    InvalidDuration(u64),

    #[error(transparent)]
    Property(#[from] PropertyError),
}

impl StoreError {
    pub(crate) fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
