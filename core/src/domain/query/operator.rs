use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::value::DataType;

/// Filter operator, named by its kebab-case wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    Equal,
    NotEqual,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    Before,
    After,
    IsEmpty,
    IsNotEmpty,
    Range,
    Between,
    BooleanTrue,
    BooleanFalse,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl FilterMode {
    pub const ALL: [FilterMode; 22] = [
        FilterMode::Equal,
        FilterMode::NotEqual,
        FilterMode::Contains,
        FilterMode::NotContains,
        FilterMode::StartsWith,
        FilterMode::EndsWith,
        FilterMode::Greater,
        FilterMode::GreaterEq,
        FilterMode::Less,
        FilterMode::LessEq,
        FilterMode::Before,
        FilterMode::After,
        FilterMode::IsEmpty,
        FilterMode::IsNotEmpty,
        FilterMode::Range,
        FilterMode::Between,
        FilterMode::BooleanTrue,
        FilterMode::BooleanFalse,
        FilterMode::In,
        FilterMode::NotIn,
        FilterMode::IsNull,
        FilterMode::IsNotNull,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Equal => "equal",
            FilterMode::NotEqual => "not-equal",
            FilterMode::Contains => "contains",
            FilterMode::NotContains => "not-contains",
            FilterMode::StartsWith => "starts-with",
            FilterMode::EndsWith => "ends-with",
            FilterMode::Greater => "greater",
            FilterMode::GreaterEq => "greater-eq",
            FilterMode::Less => "less",
            FilterMode::LessEq => "less-eq",
            FilterMode::Before => "before",
            FilterMode::After => "after",
            FilterMode::IsEmpty => "is-empty",
            FilterMode::IsNotEmpty => "is-not-empty",
            FilterMode::Range => "range",
            FilterMode::Between => "between",
            FilterMode::BooleanTrue => "boolean-true",
            FilterMode::BooleanFalse => "boolean-false",
            FilterMode::In => "in",
            FilterMode::NotIn => "not-in",
            FilterMode::IsNull => "is-null",
            FilterMode::IsNotNull => "is-not-null",
        }
    }

    /// Whether the operator makes sense on a column of `data_type`.
    pub fn allows(&self, data_type: DataType) -> bool {
        match self {
            FilterMode::Contains
            | FilterMode::NotContains
            | FilterMode::StartsWith
            | FilterMode::EndsWith => data_type == DataType::Text,
            FilterMode::Greater
            | FilterMode::GreaterEq
            | FilterMode::Less
            | FilterMode::LessEq
            | FilterMode::Range
            | FilterMode::Between => data_type.is_comparable(),
            FilterMode::Before | FilterMode::After => data_type.is_temporal(),
            FilterMode::BooleanTrue | FilterMode::BooleanFalse => {
                data_type == DataType::Boolean
            }
            FilterMode::Equal
            | FilterMode::NotEqual
            | FilterMode::IsEmpty
            | FilterMode::IsNotEmpty
            | FilterMode::In
            | FilterMode::NotIn
            | FilterMode::IsNull
            | FilterMode::IsNotNull => true,
        }
    }

    /// Operators whose value may be a list expanded into an OR-group.
    pub fn is_multi_eligible(&self) -> bool {
        matches!(
            self,
            FilterMode::Contains
                | FilterMode::NotContains
                | FilterMode::Between
                | FilterMode::Range
                | FilterMode::StartsWith
                | FilterMode::EndsWith
        )
    }

    pub fn takes_value(&self) -> bool {
        !matches!(
            self,
            FilterMode::IsEmpty
                | FilterMode::IsNotEmpty
                | FilterMode::BooleanTrue
                | FilterMode::BooleanFalse
                | FilterMode::IsNull
                | FilterMode::IsNotNull
        )
    }

    pub fn is_range(&self) -> bool {
        matches!(self, FilterMode::Range | FilterMode::Between)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, FilterMode::In | FilterMode::NotIn)
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "eq" => return Ok(FilterMode::Equal),
            "ne" => return Ok(FilterMode::NotEqual),
            "gt" => return Ok(FilterMode::Greater),
            "gte" => return Ok(FilterMode::GreaterEq),
            "lt" => return Ok(FilterMode::Less),
            "lte" => return Ok(FilterMode::LessEq),
            _ => {}
        }

        FilterMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or(())
    }
}
