use std::str::FromStr;
use std::sync::LazyLock;

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use coopdesk_core::domain::query::{
    errors::FilterError,
    filter::{FilterInput, Logic, PaginatedRequest},
    operator::FilterMode,
};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::IntoParams;

/// Largest decoded `filter` payload accepted.
pub const MAX_FILTER_BYTES: usize = 8 * 1024;

/// Statement-shaped fragments that never belong in an identifier of a filter payload.
/// A pre-check only: names are whitelisted and values are bound by the engine regardless.
static SUSPICIOUS_SQL: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(--|/\*|\*/|;\s*\w|\bunion\s+(all\s+)?select\b|\b(drop|truncate|alter)\s+table\b|\bexec(ute)?\s*\()",
    )
});

/// `?preload=branch,photo` on single-entity reads.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PreloadQuery {
    /// Comma separated relation names.
    pub preload: Option<String>,
}

impl PreloadQuery {
    pub fn names(&self) -> Vec<String> {
        self.preload
            .as_deref()
            .map(split_names)
            .unwrap_or_default()
    }
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Decodes the base64 `filter` parameter into a full list request.
pub fn decode_filter_param(encoded: &str) -> Result<PaginatedRequest, FilterError> {
    let encoded = encoded.trim();
    // Upper bound on the encoded size of MAX_FILTER_BYTES, checked before allocating.
    if encoded.len() > MAX_FILTER_BYTES.div_ceil(3) * 4 {
        return Err(too_large());
    }

    let decoded = STANDARD
        .decode(encoded)
        .or_else(|_| URL_SAFE_NO_PAD.decode(encoded.trim_end_matches('=')))
        .map_err(|err| FilterError::malformed(format!("filter is not valid base64: {err}")))?;

    if decoded.len() > MAX_FILTER_BYTES {
        return Err(too_large());
    }

    let text = String::from_utf8(decoded)
        .map_err(|_| FilterError::malformed("filter is not valid UTF-8"))?;

    let request: PaginatedRequest = serde_json::from_str(&text)
        .map_err(|err| FilterError::malformed(format!("filter is not a valid request: {err}")))?;

    reject_sql_in_identifiers(&request)?;
    Ok(request)
}

/// Filter values are free text and may legitimately contain `--` or `;`.
fn reject_sql_in_identifiers(request: &PaginatedRequest) -> Result<(), FilterError> {
    let pattern = SUSPICIOUS_SQL
        .as_ref()
        .map_err(|_| FilterError::malformed("filter pre-check is unavailable"))?;

    let filter_names = request.filters.iter().flat_map(|filter| {
        [Some(&filter.field), Some(&filter.mode), filter.data_type.as_ref()]
            .into_iter()
            .flatten()
    });
    let mut identifiers = filter_names
        .chain(request.sort_by.as_ref())
        .chain(request.sort_order.as_ref())
        .chain(request.preloads.iter());

    if identifiers.any(|name| pattern.is_match(name)) {
        return Err(FilterError::malformed("filter contains a forbidden SQL fragment"));
    }

    Ok(())
}

fn too_large() -> FilterError {
    FilterError::malformed(format!(
        "filter exceeds {MAX_FILTER_BYTES} bytes once decoded"
    ))
}

/// Parses a list query string. Handles:
/// - `filter=<base64 JSON request>`
/// - `filter[field]=value` (equal) and `filter[field][mode]=value`
/// - `sort=field` / `sort=-field`, or `sortBy` + `sortOrder`
/// - `pageIndex`/`page`, `pageSize`/`limit`, `logic`, `preload=a,b`
///
/// Plain parameters apply on top of a base64 request; bracket filters are appended to it.
pub fn parse_list_query(query: &str) -> Result<PaginatedRequest, FilterError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
        .map_err(|err| FilterError::malformed(format!("invalid query string: {err}")))?;

    let mut request = match pairs.iter().find(|(key, _)| key == "filter") {
        Some((_, encoded)) => decode_filter_param(encoded)?,
        None => PaginatedRequest::default(),
    };

    for (key, value) in &pairs {
        if let Some(rest) = key.strip_prefix("filter[") {
            request.filters.push(bracket_filter(key, rest, value)?);
            continue;
        }

        match key.as_str() {
            "pageIndex" | "page" => request.page_index = parse_int(key, value)?,
            "pageSize" | "limit" => request.page_size = parse_int(key, value)?,
            "sortBy" => request.sort_by = Some(value.clone()),
            "sortOrder" => request.sort_order = Some(value.clone()),
            "sort" => {
                let (field, order) = parse_sort(value)?;
                request.sort_by = Some(field);
                request.sort_order = Some(order.to_string());
            }
            "logic" => request.logic = Logic::parse(value),
            "preload" | "preloads" => request.preloads.extend(split_names(value)),
            _ => {}
        }
    }

    Ok(request)
}

/// `rest` is the key after `filter[`, e.g. `status]` or `shares][gte]`.
fn bracket_filter(key: &str, rest: &str, value: &str) -> Result<FilterInput, FilterError> {
    let malformed = || FilterError::malformed(format!("invalid filter parameter '{key}'"));

    let (field, tail) = rest.split_once(']').ok_or_else(malformed)?;
    let mode = match tail {
        "" => FilterMode::Equal,
        _ => {
            let raw = tail
                .strip_prefix('[')
                .and_then(|tail| tail.strip_suffix(']'))
                .ok_or_else(malformed)?;
            FilterMode::from_str(raw).map_err(|_| FilterError::UnsupportedOperator {
                mode: raw.to_string(),
            })?
        }
    };

    Ok(FilterInput::new(field, mode.as_str(), bracket_value(mode, value)))
}

/// Query strings only carry text; the engine coerces it to the field's declared type.
fn bracket_value(mode: FilterMode, raw: &str) -> Value {
    if !mode.takes_value() {
        return Value::Null;
    }

    let items = || {
        raw.split(',')
            .map(|item| Value::String(item.trim().to_string()))
            .collect::<Vec<_>>()
    };

    if mode.is_set() {
        Value::Array(items())
    } else if mode.is_range() {
        match raw.split_once(',') {
            Some((from, to)) => json!({ "from": from.trim(), "to": to.trim() }),
            None => Value::String(raw.to_string()),
        }
    } else {
        Value::String(raw.to_string())
    }
}

fn parse_sort(raw: &str) -> Result<(String, &'static str), FilterError> {
    let raw = raw.trim();
    if raw.contains(',') {
        return Err(FilterError::malformed("only one sort field is supported"));
    }

    Ok(match raw.strip_prefix('-') {
        Some(field) => (field.to_string(), "DESC"),
        None => (raw.trim_start_matches('+').to_string(), "ASC"),
    })
}

fn parse_int(key: &str, raw: &str) -> Result<i64, FilterError> {
    raw.trim()
        .parse()
        .map_err(|_| FilterError::malformed(format!("'{key}' must be an integer")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coopdesk_core::domain::query::pagination::SortOrder;

    fn encode(value: &Value) -> String {
        STANDARD.encode(serde_json::to_vec(value).unwrap())
    }

    #[test]
    fn bracket_filters_keep_their_order() {
        let request =
            parse_list_query("filter[status]=active&filter[shares][gte]=10&pageIndex=2&pageSize=5")
                .unwrap();

        assert_eq!(request.filters.len(), 2);
        assert_eq!(request.filters[0].field, "status");
        assert_eq!(request.filters[0].mode, "equal");
        assert_eq!(request.filters[0].value, json!("active"));
        assert_eq!(request.filters[1].field, "shares");
        assert_eq!(request.filters[1].mode, "greater-eq");
        assert_eq!(request.page_index, 2);
        assert_eq!(request.page_size, 5);
    }

    #[test]
    fn bracket_values_follow_the_operator_shape() {
        let request = parse_list_query(
            "filter[status][in]=active,inactive&filter[joined_on][between]=2024-01-01,2024-12-31&filter[photo_id][is-null]=",
        )
        .unwrap();

        assert_eq!(request.filters[0].value, json!(["active", "inactive"]));
        assert_eq!(
            request.filters[1].value,
            json!({ "from": "2024-01-01", "to": "2024-12-31" })
        );
        assert_eq!(request.filters[2].value, Value::Null);
    }

    #[test]
    fn unknown_bracket_operator_is_rejected() {
        let err = parse_list_query("filter[status][ilike]=x").unwrap_err();
        assert_eq!(
            err,
            FilterError::UnsupportedOperator {
                mode: "ilike".to_string()
            }
        );
    }

    #[test]
    fn sort_prefix_selects_the_direction() {
        let request = parse_list_query("sort=-last_name").unwrap();
        assert_eq!(request.sort_by.as_deref(), Some("last_name"));
        assert_eq!(SortOrder::parse(request.sort_order.as_deref()), SortOrder::Desc);

        assert!(parse_list_query("sort=a,-b").is_err());
    }

    #[test]
    fn base64_request_is_decoded_and_extended() {
        let payload = json!({
            "filters": [{ "field": "status", "mode": "equal", "value": "active" }],
            "logic": "or",
            "pageIndex": 1,
            "pageSize": 2
        });
        let query = format!(
            "filter={}&filter[shares][gt]=5&pageSize=20&preload=branch",
            urlencode(&encode(&payload))
        );

        let request = parse_list_query(&query).unwrap();
        assert_eq!(request.logic, Logic::Or);
        assert_eq!(request.filters.len(), 2);
        assert_eq!(request.page_size, 20);
        assert_eq!(request.preloads, vec!["branch"]);
    }

    #[test]
    fn oversized_filter_is_rejected_before_decoding() {
        let huge = "A".repeat(MAX_FILTER_BYTES * 2);
        assert!(matches!(
            decode_filter_param(&huge),
            Err(FilterError::MalformedRequest { .. })
        ));
    }

    #[test]
    fn sql_fragments_in_names_fail_the_pre_check() {
        let payloads = [
            json!({ "sortBy": "id; DROP TABLE members" }),
            json!({
                "filters": [{ "field": "status--", "mode": "equal", "value": "active" }]
            }),
            json!({ "preloads": ["branch UNION SELECT password"] }),
        ];

        for payload in payloads {
            let err = decode_filter_param(&encode(&payload)).unwrap_err();
            assert!(err.to_string().contains("forbidden"), "{payload}");
        }
    }

    #[test]
    fn punctuation_in_filter_values_is_allowed() {
        let payload = json!({
            "filters": [
                { "field": "last_name", "mode": "equal", "value": "Otieno; Jr" },
                { "field": "notes", "mode": "contains", "value": "well--known" }
            ]
        });

        let request = decode_filter_param(&encode(&payload)).unwrap();
        assert_eq!(request.filters[0].value, json!("Otieno; Jr"));
        assert_eq!(request.filters[1].value, json!("well--known"));
    }

    #[test]
    fn preload_query_splits_names() {
        let query = PreloadQuery {
            preload: Some(" branch, ,photo".to_string()),
        };
        assert_eq!(query.names(), vec!["branch", "photo"]);
        assert!(PreloadQuery::default().names().is_empty());
    }

    #[test]
    fn invalid_page_numbers_are_reported() {
        assert!(matches!(
            parse_list_query("pageIndex=two"),
            Err(FilterError::MalformedRequest { .. })
        ));
    }

    fn urlencode(raw: &str) -> String {
        serde_urlencoded::to_string([("v", raw)])
            .unwrap()
            .trim_start_matches("v=")
            .to_string()
    }
}
