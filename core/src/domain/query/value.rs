use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DATE_LAYOUT: &str = "%Y-%m-%d";
pub const DATETIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";
pub const TIME_LAYOUT: &str = "%H:%M:%S";

/// Declared type of a filter value (of each element, for list values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Text,
    Number,
    Float,
    Boolean,
    Date,
    DateTime,
    Time,
    Uuid,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Number => "number",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::DateTime => "datetime",
            DataType::Time => "time",
            DataType::Uuid => "uuid",
        }
    }

    /// Types with a meaningful ordering.
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            DataType::Number | DataType::Float | DataType::Date | DataType::DateTime | DataType::Time
        )
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, DataType::Date | DataType::DateTime | DataType::Time)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "string" => Ok(DataType::Text),
            "number" | "integer" | "int" => Ok(DataType::Number),
            "float" | "decimal" => Ok(DataType::Float),
            "boolean" | "bool" => Ok(DataType::Boolean),
            "date" => Ok(DataType::Date),
            "datetime" | "timestamp" => Ok(DataType::DateTime),
            "time" => Ok(DataType::Time),
            "uuid" => Ok(DataType::Uuid),
            _ => Err(()),
        }
    }
}

/// Naive point in time. No timezone is attached; values are compared as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Temporal {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

impl Temporal {
    pub fn format(&self) -> String {
        match self {
            Temporal::Date(date) => date.format(DATE_LAYOUT).to_string(),
            Temporal::DateTime(datetime) => datetime.format(DATETIME_LAYOUT).to_string(),
            Temporal::Time(time) => time.format(TIME_LAYOUT).to_string(),
        }
    }
}

/// A single strongly typed filter operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(i64),
    Float(f64),
    Bool(bool),
    Temporal(Temporal),
    Uuid(Uuid),
}

impl Scalar {
    pub fn data_type(&self) -> DataType {
        match self {
            Scalar::Text(_) => DataType::Text,
            Scalar::Number(_) => DataType::Number,
            Scalar::Float(_) => DataType::Float,
            Scalar::Bool(_) => DataType::Boolean,
            Scalar::Temporal(Temporal::Date(_)) => DataType::Date,
            Scalar::Temporal(Temporal::DateTime(_)) => DataType::DateTime,
            Scalar::Temporal(Temporal::Time(_)) => DataType::Time,
            Scalar::Uuid(_) => DataType::Uuid,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Operand shape of a decoded filter, fixed at decode time.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Operators such as `is-null` or `boolean-true` take no operand.
    None,
    Single(Scalar),
    Range { from: Scalar, to: Scalar },
    /// Operand of `in` / `not-in`.
    List(Vec<Scalar>),
    /// Multi-value filter, expanded into an OR-group with one predicate per element.
    Multi(Vec<FilterValue>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot interpret {raw} as {expected}")]
pub struct CoercionError {
    pub expected: DataType,
    pub raw: String,
}

impl CoercionError {
    fn new(expected: DataType, raw: &Value) -> Self {
        Self {
            expected,
            raw: raw.to_string(),
        }
    }
}

/// Converts a loosely typed wire value into the scalar `data_type` demands.
pub fn coerce(data_type: DataType, raw: &Value) -> Result<Scalar, CoercionError> {
    let fail = || CoercionError::new(data_type, raw);

    match data_type {
        DataType::Text => Ok(Scalar::Text(match raw {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })),
        DataType::Number => match raw {
            Value::Number(number) => match number.as_i64() {
                Some(value) => Ok(Scalar::Number(value)),
                None => number
                    .as_f64()
                    .filter(|value| value.is_finite())
                    .map(f64::trunc)
                    .filter(|value| *value >= i64::MIN as f64 && *value <= i64::MAX as f64)
                    .map(|value| Scalar::Number(value as i64))
                    .ok_or_else(fail),
            },
            Value::String(text) => text
                .trim()
                .parse::<i64>()
                .map(Scalar::Number)
                .map_err(|_| fail()),
            _ => Err(fail()),
        },
        DataType::Float => match raw {
            Value::Number(number) => number.as_f64().map(Scalar::Float).ok_or_else(fail),
            Value::String(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Scalar::Float)
                .ok_or_else(fail),
            _ => Err(fail()),
        },
        DataType::Boolean => match raw {
            Value::Bool(value) => Ok(Scalar::Bool(*value)),
            Value::String(text) => parse_bool(text.trim()).map(Scalar::Bool).ok_or_else(fail),
            _ => Err(fail()),
        },
        DataType::Date => parse_temporal(raw, |s| {
            NaiveDate::parse_from_str(s, DATE_LAYOUT).map(Temporal::Date)
        })
        .ok_or_else(fail),
        DataType::DateTime => parse_temporal(raw, |s| {
            NaiveDateTime::parse_from_str(s, DATETIME_LAYOUT).map(Temporal::DateTime)
        })
        .ok_or_else(fail),
        DataType::Time => parse_temporal(raw, |s| {
            NaiveTime::parse_from_str(s, TIME_LAYOUT).map(Temporal::Time)
        })
        .ok_or_else(fail),
        DataType::Uuid => match raw {
            Value::String(text) => Uuid::parse_str(text.trim())
                .map(Scalar::Uuid)
                .map_err(|_| fail()),
            _ => Err(fail()),
        },
    }
}

fn parse_temporal(
    raw: &Value,
    parse: impl Fn(&str) -> chrono::ParseResult<Temporal>,
) -> Option<Scalar> {
    match raw {
        Value::String(text) => parse(text.trim()).ok().map(Scalar::Temporal),
        _ => None,
    }
}

/// Accepts the usual spellings: `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn number_accepts_integers_truncated_floats_and_strings() {
        assert_eq!(coerce(DataType::Number, &json!(7)), Ok(Scalar::Number(7)));
        assert_eq!(coerce(DataType::Number, &json!(7.9)), Ok(Scalar::Number(7)));
        assert_eq!(coerce(DataType::Number, &json!(" 42 ")), Ok(Scalar::Number(42)));
    }

    #[test]
    fn number_rejects_garbage_instead_of_passing_it_through() {
        let err = coerce(DataType::Number, &json!("forty")).unwrap_err();
        assert_eq!(err.expected, DataType::Number);
        assert_eq!(err.raw, "\"forty\"");
        assert!(coerce(DataType::Number, &json!(true)).is_err());
    }

    #[test]
    fn float_accepts_numbers_and_strings() {
        assert_eq!(coerce(DataType::Float, &json!(2)), Ok(Scalar::Float(2.0)));
        assert_eq!(coerce(DataType::Float, &json!("2.5")), Ok(Scalar::Float(2.5)));
        assert!(coerce(DataType::Float, &json!("NaN")).is_err());
    }

    #[test]
    fn boolean_accepts_common_spellings() {
        for raw in ["1", "t", "TRUE", "true", "True"] {
            assert_eq!(coerce(DataType::Boolean, &json!(raw)), Ok(Scalar::Bool(true)));
        }
        for raw in ["0", "f", "FALSE", "false", "False"] {
            assert_eq!(coerce(DataType::Boolean, &json!(raw)), Ok(Scalar::Bool(false)));
        }
        assert_eq!(coerce(DataType::Boolean, &json!(false)), Ok(Scalar::Bool(false)));
        assert!(coerce(DataType::Boolean, &json!("yes")).is_err());
    }

    #[test]
    fn date_round_trips_through_its_layout() {
        let scalar = coerce(DataType::Date, &json!("2024-03-15")).unwrap();
        let Scalar::Temporal(temporal) = scalar else {
            panic!("expected a temporal value");
        };
        assert_eq!(temporal.format(), "2024-03-15");
    }

    #[test]
    fn datetime_and_time_use_fixed_layouts() {
        let datetime = coerce(DataType::DateTime, &json!("2024-03-15 08:30:00")).unwrap();
        assert_eq!(datetime.data_type(), DataType::DateTime);

        let time = coerce(DataType::Time, &json!("08:30:00")).unwrap();
        assert_eq!(time.data_type(), DataType::Time);

        assert!(coerce(DataType::Date, &json!("15/03/2024")).is_err());
        assert!(coerce(DataType::DateTime, &json!("2024-03-15T08:30:00Z")).is_err());
    }

    #[test]
    fn text_always_succeeds() {
        assert_eq!(
            coerce(DataType::Text, &json!("active")),
            Ok(Scalar::Text("active".to_string()))
        );
        assert_eq!(coerce(DataType::Text, &json!(12)), Ok(Scalar::Text("12".to_string())));
        assert_eq!(coerce(DataType::Text, &Value::Null), Ok(Scalar::Text(String::new())));
    }

    #[test]
    fn uuid_requires_a_parseable_string() {
        let id = Uuid::new_v4();
        assert_eq!(
            coerce(DataType::Uuid, &json!(id.to_string())),
            Ok(Scalar::Uuid(id))
        );
        assert!(coerce(DataType::Uuid, &json!("not-a-uuid")).is_err());
    }

    #[test]
    fn data_type_names_parse_with_aliases() {
        assert_eq!("datetime".parse::<DataType>(), Ok(DataType::DateTime));
        assert_eq!("Timestamp".parse::<DataType>(), Ok(DataType::DateTime));
        assert_eq!("string".parse::<DataType>(), Ok(DataType::Text));
        assert!("blob".parse::<DataType>().is_err());
    }
}
