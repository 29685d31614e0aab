use sea_orm::{EntityTrait, Order};

use crate::{
    domain::query::{errors::FilterError, pagination::SortOrder, sanitizer::is_valid_identifier},
    infrastructure::query::field_map::FieldMap,
};

#[derive(Debug, Clone)]
pub struct SortSpec<C> {
    /// Public field name echoed back in the pagination block.
    pub field: String,
    pub column: C,
    pub order: SortOrder,
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Resolves the requested ordering against the field table. Fails closed: a name that is
/// not a plain identifier or not in the table never reaches the query.
pub fn resolve_sort<E: EntityTrait>(
    fields: &FieldMap<E>,
    sort_by: Option<&str>,
    sort_order: Option<&str>,
    default: (&str, E::Column),
) -> Result<SortSpec<E::Column>, FilterError> {
    let order = SortOrder::parse(sort_order);

    let Some(sort_by) = sort_by.map(str::trim).filter(|name| !name.is_empty()) else {
        return Ok(SortSpec {
            field: default.0.to_string(),
            column: default.1,
            order,
        });
    };

    let invalid = || FilterError::InvalidSortField {
        field: sort_by.to_string(),
    };

    if !is_valid_identifier(sort_by) {
        return Err(invalid());
    }

    let field = fields.get(sort_by).ok_or_else(invalid)?;

    Ok(SortSpec {
        field: sort_by.to_ascii_lowercase(),
        column: field.column,
        order,
    })
}
