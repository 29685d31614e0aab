use std::fmt;

use thiserror::Error;

use crate::domain::query::errors::FilterError;

/// Category of integrity constraint a write ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
    NotNull,
    DataTooLong,
    Check,
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConstraintViolation::Unique => "unique",
            ConstraintViolation::ForeignKey => "foreign key",
            ConstraintViolation::NotNull => "not null",
            ConstraintViolation::DataTooLong => "data too long",
            ConstraintViolation::Check => "check",
        };
        f.write_str(label)
    }
}

/// Failures a caller may retry. The core never retries queries itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientKind {
    Deadlock,
    Timeout,
    Cancelled,
    Connection,
}

impl fmt::Display for TransientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransientKind::Deadlock => "deadlock",
            TransientKind::Timeout => "timeout",
            TransientKind::Cancelled => "cancelled",
            TransientKind::Connection => "connection unavailable",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] FilterError),

    #[error("Resource not found")]
    NotFound,

    #[error("Constraint violation ({kind}): {detail}")]
    Constraint {
        kind: ConstraintViolation,
        detail: String,
    },

    #[error("Transient failure: {0}")]
    Transient(TransientKind),

    #[error("Object storage error: {0}")]
    ObjectStorageError(String),

    #[error("File too large")]
    FileTooLarge,

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    pub fn constraint(kind: ConstraintViolation, detail: impl Into<String>) -> Self {
        CoreError::Constraint {
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::Transient(_))
    }

    pub fn constraint_kind(&self) -> Option<ConstraintViolation> {
        match self {
            CoreError::Constraint { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
