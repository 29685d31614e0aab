use super::errors::FilterError;

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Strips every character outside `[A-Za-z0-9_]`.
///
/// Only useful for display and logging. Query building goes through
/// [`validate_field_name`] and the entity field table instead.
pub fn sanitize(field: &str) -> String {
    field.chars().filter(|c| is_identifier_char(*c)).collect()
}

pub fn is_valid_identifier(field: &str) -> bool {
    !field.is_empty() && field.chars().all(is_identifier_char)
}

/// Rejects any name that `sanitize` would alter.
pub fn validate_field_name(field: &str) -> Result<&str, FilterError> {
    if is_valid_identifier(field) {
        Ok(field)
    } else {
        Err(FilterError::InvalidFieldName {
            field: field.to_string(),
        })
    }
}
