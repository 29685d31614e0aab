use thiserror::Error;

use super::{operator::FilterMode, value::DataType};

/// Caller mistakes in a filter/sort/paginate request. Always surfaced, never logged-and-skipped
/// unless the engine runs with [`UnsupportedPolicy::SkipWithWarning`].
///
/// [`UnsupportedPolicy::SkipWithWarning`]: crate::infrastructure::query::combinator::UnsupportedPolicy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid field name '{field}': only letters, digits and underscores are allowed")]
    InvalidFieldName { field: String },

    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    #[error("unsupported operator '{mode}'")]
    UnsupportedOperator { mode: String },

    #[error("unsupported data type '{data_type}'")]
    UnsupportedDataType { data_type: String },

    #[error("operator '{mode}' is not allowed on {data_type} field '{field}'")]
    OperatorNotAllowed {
        field: String,
        mode: FilterMode,
        data_type: DataType,
    },

    #[error("field '{field}' is declared as {expected}, request says {actual}")]
    DataTypeMismatch {
        field: String,
        expected: DataType,
        actual: DataType,
    },

    #[error("invalid value for field '{field}': {reason}")]
    InvalidFilterValue { field: String, reason: String },

    #[error("invalid sort field '{field}'")]
    InvalidSortField { field: String },

    #[error("unknown preload '{name}'")]
    UnknownPreload { name: String },

    #[error("malformed filter request: {reason}")]
    MalformedRequest { reason: String },
}

impl FilterError {
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FilterError::InvalidFilterValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        FilterError::MalformedRequest {
            reason: reason.into(),
        }
    }

    /// Field the error is about, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            FilterError::InvalidFieldName { field }
            | FilterError::UnknownField { field }
            | FilterError::OperatorNotAllowed { field, .. }
            | FilterError::DataTypeMismatch { field, .. }
            | FilterError::InvalidFilterValue { field, .. }
            | FilterError::InvalidSortField { field } => Some(field),
            _ => None,
        }
    }
}
