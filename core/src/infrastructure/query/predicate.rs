use sea_orm::{ColumnTrait, Condition, Value, sea_query::LikeExpr, sea_query::SimpleExpr};

use crate::domain::query::{
    errors::FilterError,
    filter::Filter,
    operator::FilterMode,
    value::{DataType, FilterValue, Scalar, Temporal},
};

const LIKE_ESCAPE: char = '\\';

pub fn to_db_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Text(text) => text.clone().into(),
        Scalar::Number(number) => (*number).into(),
        Scalar::Float(float) => (*float).into(),
        Scalar::Bool(flag) => (*flag).into(),
        Scalar::Temporal(Temporal::Date(date)) => (*date).into(),
        Scalar::Temporal(Temporal::DateTime(datetime)) => (*datetime).into(),
        Scalar::Temporal(Temporal::Time(time)) => (*time).into(),
        Scalar::Uuid(uuid) => (*uuid).into(),
    }
}

/// Escapes LIKE wildcards so user input only ever matches literally.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Maps one decoded filter onto a condition over `column`.
///
/// A multi-value filter becomes an OR-group with one predicate per element.
pub fn build_predicate<C: ColumnTrait>(column: C, filter: &Filter) -> Result<Condition, FilterError> {
    if !filter.mode.allows(filter.data_type) {
        return Err(FilterError::OperatorNotAllowed {
            field: filter.field.clone(),
            mode: filter.mode,
            data_type: filter.data_type,
        });
    }

    match &filter.value {
        FilterValue::Multi(values) => values.iter().try_fold(Condition::any(), |group, value| {
            Ok(group.add(predicate(column, filter, value)?))
        }),
        value => predicate(column, filter, value),
    }
}

fn predicate<C: ColumnTrait>(
    column: C,
    filter: &Filter,
    value: &FilterValue,
) -> Result<Condition, FilterError> {
    let is_text = filter.data_type == DataType::Text;

    let expr: SimpleExpr = match (filter.mode, value) {
        (FilterMode::Equal, FilterValue::Single(v)) => column.eq(to_db_value(v)),
        (FilterMode::NotEqual, FilterValue::Single(v)) => column.ne(to_db_value(v)),
        (FilterMode::Contains, FilterValue::Single(v)) => column.like(like(filter, v, true, true)?),
        (FilterMode::NotContains, FilterValue::Single(v)) => {
            column.not_like(like(filter, v, true, true)?)
        }
        (FilterMode::StartsWith, FilterValue::Single(v)) => {
            column.like(like(filter, v, false, true)?)
        }
        (FilterMode::EndsWith, FilterValue::Single(v)) => column.like(like(filter, v, true, false)?),
        (FilterMode::Greater | FilterMode::After, FilterValue::Single(v)) => {
            column.gt(to_db_value(v))
        }
        (FilterMode::GreaterEq, FilterValue::Single(v)) => column.gte(to_db_value(v)),
        (FilterMode::Less | FilterMode::Before, FilterValue::Single(v)) => {
            column.lt(to_db_value(v))
        }
        (FilterMode::LessEq, FilterValue::Single(v)) => column.lte(to_db_value(v)),
        (FilterMode::Range | FilterMode::Between, FilterValue::Range { from, to }) => {
            column.between(to_db_value(from), to_db_value(to))
        }
        (FilterMode::In, FilterValue::List(values)) => column.is_in(values.iter().map(to_db_value)),
        (FilterMode::NotIn, FilterValue::List(values)) => {
            column.is_not_in(values.iter().map(to_db_value))
        }
        (FilterMode::BooleanTrue, FilterValue::None) => column.eq(true),
        (FilterMode::BooleanFalse, FilterValue::None) => column.eq(false),
        (FilterMode::IsNull, FilterValue::None) => column.is_null(),
        (FilterMode::IsNotNull, FilterValue::None) => column.is_not_null(),
        // Only text has an empty literal; other types fall back to NULL checks.
        (FilterMode::IsEmpty, FilterValue::None) if is_text => {
            return Ok(Condition::any()
                .add(column.is_null())
                .add(column.eq(String::new())));
        }
        (FilterMode::IsEmpty, FilterValue::None) => column.is_null(),
        (FilterMode::IsNotEmpty, FilterValue::None) if is_text => {
            return Ok(Condition::all()
                .add(column.is_not_null())
                .add(column.ne(String::new())));
        }
        (FilterMode::IsNotEmpty, FilterValue::None) => column.is_not_null(),
        (mode, _) => {
            return Err(FilterError::invalid_value(
                &filter.field,
                format!("value shape does not fit operator '{mode}'"),
            ));
        }
    };

    Ok(Condition::all().add(expr))
}

fn like(filter: &Filter, value: &Scalar, lead: bool, trail: bool) -> Result<LikeExpr, FilterError> {
    let text = value.as_text().ok_or_else(|| {
        FilterError::invalid_value(&filter.field, "pattern operators need a text value")
    })?;

    let mut pattern = String::with_capacity(text.len() + 2);
    if lead {
        pattern.push('%');
    }
    pattern.push_str(&escape_like(text));
    if trail {
        pattern.push('%');
    }

    Ok(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}
