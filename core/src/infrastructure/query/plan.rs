use sea_orm::{EntityTrait, IdenStatic, Order, QueryFilter, QueryOrder, QuerySelect, Select};

use crate::{
    domain::query::{
        errors::FilterError,
        filter::PaginatedRequest,
        pagination::{PageWindow, Pagination},
    },
    infrastructure::{
        query::{
            combinator::{UnsupportedPolicy, compile_filters},
            sort::{SortSpec, resolve_sort},
        },
        repositories::crud_entity::CrudEntity,
    },
};

/// A fully validated list request. Building one never touches the database, so every
/// caller mistake is caught before the first query.
pub struct QueryPlan<E: CrudEntity> {
    pub condition: Option<sea_orm::Condition>,
    pub sort: SortSpec<E::Column>,
    pub window: PageWindow,
    pub preloads: Vec<String>,
    pub warnings: Vec<String>,
}

impl<E: CrudEntity> QueryPlan<E> {
    pub fn from_request(
        request: &PaginatedRequest,
        extra_preloads: &[String],
        policy: UnsupportedPolicy,
    ) -> Result<Self, FilterError> {
        let compiled = compile_filters(E::field_map(), &request.filters, request.logic, policy)?;

        let sort = resolve_sort(
            E::field_map(),
            request.sort_by.as_deref(),
            request.sort_order.as_deref(),
            E::default_sort(),
        )?;

        let requested: Vec<String> = request
            .preloads
            .iter()
            .chain(extra_preloads)
            .cloned()
            .collect();
        let preloads = validate_preloads(E::PRELOADS, &requested)?;

        Ok(Self {
            condition: compiled.condition,
            sort,
            window: PageWindow::new(request.page_index, request.page_size),
            preloads,
            warnings: compiled.skipped.iter().map(ToString::to_string).collect(),
        })
    }

    /// Filtered select without ordering or paging, for counting.
    pub fn filtered(&self) -> Select<E> {
        match &self.condition {
            Some(condition) => E::find().filter(condition.clone()),
            None => E::find(),
        }
    }

    /// Ordered page of the filtered select. Ties on the sort column break on the id.
    pub fn page(&self) -> Select<E> {
        let id = E::id_column();
        let mut select = self
            .filtered()
            .order_by(self.sort.column, Order::from(self.sort.order));

        if self.sort.column.as_str() != id.as_str() {
            select = select.order_by(id, Order::Asc);
        }

        select.offset(self.window.offset).limit(self.window.limit)
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination::compute(self.window, total, self.sort.field.clone(), self.sort.order)
    }
}

/// Lowercases, dedupes and checks preload names against what the entity declares.
pub fn validate_preloads(
    allowed: &[&str],
    requested: &[String],
) -> Result<Vec<String>, FilterError> {
    let mut preloads: Vec<String> = Vec::with_capacity(requested.len());

    for name in requested {
        let name = name.trim().to_ascii_lowercase();
        if !allowed.contains(&name.as_str()) {
            return Err(FilterError::UnknownPreload { name });
        }
        if !preloads.contains(&name) {
            preloads.push(name);
        }
    }

    Ok(preloads)
}
