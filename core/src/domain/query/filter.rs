use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{
    errors::FilterError,
    operator::FilterMode,
    sanitizer::validate_field_name,
    value::{DataType, FilterValue, Scalar, coerce},
};

/// Filter as it arrives on the wire, before any validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterInput {
    pub field: String,
    pub mode: String,
    /// Optional; when present it must agree with the field's declared type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
}

impl FilterInput {
    pub fn new(field: impl Into<String>, mode: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            mode: mode.into(),
            data_type: None,
            value,
            multiple: None,
        }
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = Some(multiple);
        self
    }
}

/// A validated filter. The value shape is fixed here and never inspected by type again.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub mode: FilterMode,
    pub data_type: DataType,
    pub value: FilterValue,
}

impl Filter {
    /// Validates `input` against the type the entity declares for the field.
    ///
    /// `declared` is `None` when the entity has no such field. Checks run in a fixed
    /// order: field name, field existence, data type, operator, value.
    pub fn decode(input: &FilterInput, declared: Option<DataType>) -> Result<Self, FilterError> {
        let field = validate_field_name(&input.field)?.to_string();

        let declared = declared.ok_or_else(|| FilterError::UnknownField {
            field: field.clone(),
        })?;

        if let Some(raw) = input.data_type.as_deref().filter(|raw| !raw.trim().is_empty()) {
            let requested =
                raw.parse::<DataType>()
                    .map_err(|_| FilterError::UnsupportedDataType {
                        data_type: raw.to_string(),
                    })?;
            if requested != declared {
                return Err(FilterError::DataTypeMismatch {
                    field,
                    expected: declared,
                    actual: requested,
                });
            }
        }

        let mode = input
            .mode
            .parse::<FilterMode>()
            .map_err(|_| FilterError::UnsupportedOperator {
                mode: input.mode.clone(),
            })?;

        if !mode.allows(declared) {
            return Err(FilterError::OperatorNotAllowed {
                field,
                mode,
                data_type: declared,
            });
        }

        let value = decode_value(&field, mode, declared, &input.value, input.multiple)?;

        Ok(Self {
            field,
            mode,
            data_type: declared,
            value,
        })
    }

    pub fn is_multi(&self) -> bool {
        matches!(self.value, FilterValue::Multi(_))
    }
}

fn decode_value(
    field: &str,
    mode: FilterMode,
    data_type: DataType,
    raw: &Value,
    multiple: Option<bool>,
) -> Result<FilterValue, FilterError> {
    if !mode.takes_value() {
        return Ok(FilterValue::None);
    }

    if mode.is_set() {
        let items = match raw {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            single => vec![single],
        };
        if items.is_empty() {
            return Err(FilterError::invalid_value(
                field,
                format!("'{mode}' expects at least one value"),
            ));
        }
        let scalars = items
            .into_iter()
            .map(|item| coerce_for(field, data_type, item))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(FilterValue::List(scalars));
    }

    // A multi-eligible operator with a scalar value degrades to a single-value filter.
    if let Value::Array(items) = raw
        && mode.is_multi_eligible()
        && multiple != Some(false)
    {
        if items.is_empty() {
            return Err(FilterError::invalid_value(
                field,
                "multi-value filter needs at least one value",
            ));
        }
        let values = items
            .iter()
            .map(|item| decode_single(field, mode, data_type, item))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(FilterValue::Multi(values));
    }

    decode_single(field, mode, data_type, raw)
}

fn decode_single(
    field: &str,
    mode: FilterMode,
    data_type: DataType,
    raw: &Value,
) -> Result<FilterValue, FilterError> {
    if mode.is_range() {
        let Value::Object(bounds) = raw else {
            return Err(FilterError::invalid_value(
                field,
                format!("'{mode}' expects an object with 'from' and 'to'"),
            ));
        };
        let bound = |name: &str| {
            bounds
                .get(name)
                .filter(|value| !value.is_null())
                .ok_or_else(|| FilterError::invalid_value(field, format!("missing '{name}' bound")))
                .and_then(|value| coerce_for(field, data_type, value))
        };
        return Ok(FilterValue::Range {
            from: bound("from")?,
            to: bound("to")?,
        });
    }

    if raw.is_array() || raw.is_object() {
        return Err(FilterError::invalid_value(
            field,
            format!("'{mode}' expects a single value"),
        ));
    }

    coerce_for(field, data_type, raw).map(FilterValue::Single)
}

fn coerce_for(field: &str, data_type: DataType, raw: &Value) -> Result<Scalar, FilterError> {
    coerce(data_type, raw).map_err(|err| FilterError::invalid_value(field, err.to_string()))
}

/// How the filters of one request are joined at the top level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl Logic {
    /// Only `or` selects disjunction; anything else, empty included, means `and`.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("or") {
            Logic::Or
        } else {
            Logic::And
        }
    }
}

impl From<Option<String>> for Logic {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(Logic::parse).unwrap_or_default()
    }
}

/// Filter, sort and paginate request for any listable entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginatedRequest {
    pub filters: Vec<FilterInput>,
    pub logic: Logic,
    pub preloads: Vec<String>,
    pub page_index: i64,
    pub page_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl PaginatedRequest {
    pub fn page(page_index: i64, page_size: i64) -> Self {
        Self {
            page_index,
            page_size,
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: FilterInput) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(sort_order.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::value::Temporal;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn text(value: &str) -> Scalar {
        Scalar::Text(value.to_string())
    }

    #[test]
    fn decodes_a_plain_equal_filter() {
        let input = FilterInput::new("status", "equal", json!("active")).with_data_type("text");
        let filter = Filter::decode(&input, Some(DataType::Text)).unwrap();

        assert_eq!(
            filter,
            Filter {
                field: "status".to_string(),
                mode: FilterMode::Equal,
                data_type: DataType::Text,
                value: FilterValue::Single(text("active")),
            }
        );
    }

    #[test]
    fn invalid_name_wins_over_unknown_field() {
        let input = FilterInput::new("name; DROP TABLE users", "equal", json!("x"));
        assert_eq!(
            Filter::decode(&input, None),
            Err(FilterError::InvalidFieldName {
                field: "name; DROP TABLE users".to_string()
            })
        );
    }

    #[test]
    fn undeclared_field_is_unknown() {
        let input = FilterInput::new("password_hash", "equal", json!("x"));
        assert_eq!(
            Filter::decode(&input, None),
            Err(FilterError::UnknownField {
                field: "password_hash".to_string()
            })
        );
    }

    #[test]
    fn wire_data_type_must_match_declaration() {
        let input = FilterInput::new("shares", "equal", json!("10")).with_data_type("text");
        assert_eq!(
            Filter::decode(&input, Some(DataType::Number)),
            Err(FilterError::DataTypeMismatch {
                field: "shares".to_string(),
                expected: DataType::Number,
                actual: DataType::Text,
            })
        );

        let input = FilterInput::new("shares", "equal", json!("10")).with_data_type("blob");
        assert!(matches!(
            Filter::decode(&input, Some(DataType::Number)),
            Err(FilterError::UnsupportedDataType { .. })
        ));
    }

    #[test]
    fn unknown_operator_is_reported() {
        let input = FilterInput::new("status", "sounds-like", json!("x"));
        assert_eq!(
            Filter::decode(&input, Some(DataType::Text)),
            Err(FilterError::UnsupportedOperator {
                mode: "sounds-like".to_string()
            })
        );
    }

    #[test]
    fn starts_with_on_a_number_is_not_allowed() {
        let input = FilterInput::new("shares", "starts-with", json!("1"));
        assert_eq!(
            Filter::decode(&input, Some(DataType::Number)),
            Err(FilterError::OperatorNotAllowed {
                field: "shares".to_string(),
                mode: FilterMode::StartsWith,
                data_type: DataType::Number,
            })
        );
    }

    #[test]
    fn uncoercible_value_names_the_field() {
        let input = FilterInput::new("shares", "greater", json!("lots"));
        let err = Filter::decode(&input, Some(DataType::Number)).unwrap_err();
        assert_eq!(err.field(), Some("shares"));
        assert!(matches!(err, FilterError::InvalidFilterValue { .. }));
    }

    #[test]
    fn contains_with_list_expands_to_multi() {
        let input = FilterInput::new("first_name", "contains", json!(["a", "b"]))
            .with_data_type("text")
            .with_multiple(true);
        let filter = Filter::decode(&input, Some(DataType::Text)).unwrap();
        assert_eq!(
            filter.value,
            FilterValue::Multi(vec![
                FilterValue::Single(text("a")),
                FilterValue::Single(text("b")),
            ])
        );
    }

    #[test]
    fn multi_eligible_operator_with_scalar_collapses_to_single() {
        let input = FilterInput::new("first_name", "contains", json!("a")).with_multiple(true);
        let filter = Filter::decode(&input, Some(DataType::Text)).unwrap();
        assert_eq!(filter.value, FilterValue::Single(text("a")));
        assert!(!filter.is_multi());
    }

    #[test]
    fn explicit_single_rejects_a_list() {
        let input = FilterInput::new("first_name", "contains", json!(["a"])).with_multiple(false);
        assert!(matches!(
            Filter::decode(&input, Some(DataType::Text)),
            Err(FilterError::InvalidFilterValue { .. })
        ));
    }

    #[test]
    fn range_takes_from_and_to() {
        let input = FilterInput::new(
            "joined_on",
            "between",
            json!({"from": "2024-01-01", "to": "2024-12-31"}),
        );
        let filter = Filter::decode(&input, Some(DataType::Date)).unwrap();
        let date = |y, m, d| {
            Scalar::Temporal(Temporal::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap()))
        };
        assert_eq!(
            filter.value,
            FilterValue::Range {
                from: date(2024, 1, 1),
                to: date(2024, 12, 31),
            }
        );

        let missing = FilterInput::new("joined_on", "range", json!({"from": "2024-01-01"}));
        assert!(Filter::decode(&missing, Some(DataType::Date)).is_err());
    }

    #[test]
    fn in_wraps_a_single_value_into_a_list() {
        let input = FilterInput::new("shares", "in", json!("5"));
        let filter = Filter::decode(&input, Some(DataType::Number)).unwrap();
        assert_eq!(filter.value, FilterValue::List(vec![Scalar::Number(5)]));

        let input = FilterInput::new("shares", "not-in", json!([1, "2"]));
        let filter = Filter::decode(&input, Some(DataType::Number)).unwrap();
        assert_eq!(
            filter.value,
            FilterValue::List(vec![Scalar::Number(1), Scalar::Number(2)])
        );

        let empty = FilterInput::new("shares", "in", json!([]));
        assert!(Filter::decode(&empty, Some(DataType::Number)).is_err());
    }

    #[test]
    fn valueless_operators_ignore_the_value() {
        let input = FilterInput::new("city", "is-null", json!("whatever"));
        let filter = Filter::decode(&input, Some(DataType::Text)).unwrap();
        assert_eq!(filter.value, FilterValue::None);
    }

    #[test]
    fn logic_defaults_to_and() {
        assert_eq!(Logic::parse("or"), Logic::Or);
        assert_eq!(Logic::parse("OR "), Logic::Or);
        assert_eq!(Logic::parse(""), Logic::And);
        assert_eq!(Logic::parse("xor"), Logic::And);

        let request: PaginatedRequest = serde_json::from_str(r#"{"logic": null}"#).unwrap();
        assert_eq!(request.logic, Logic::And);
        let request: PaginatedRequest = serde_json::from_str(r#"{"logic": "whatever"}"#).unwrap();
        assert_eq!(request.logic, Logic::And);
    }

    #[test]
    fn paginated_request_reads_camel_case() {
        let request: PaginatedRequest = serde_json::from_value(json!({
            "filters": [{"field": "status", "mode": "equal", "dataType": "text", "value": "active"}],
            "logic": "or",
            "preloads": ["branch"],
            "pageIndex": 1,
            "pageSize": 2,
            "sortBy": "last_name",
            "sortOrder": "desc"
        }))
        .unwrap();

        assert_eq!(request.filters.len(), 1);
        assert_eq!(request.filters[0].data_type.as_deref(), Some("text"));
        assert_eq!(request.logic, Logic::Or);
        assert_eq!(request.preloads, vec!["branch".to_string()]);
        assert_eq!(request.page_index, 1);
        assert_eq!(request.page_size, 2);
        assert_eq!(request.sort_by.as_deref(), Some("last_name"));
    }
}
