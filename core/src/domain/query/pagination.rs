use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Effective page, limit and offset after defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
    pub offset: u64,
}

impl PageWindow {
    pub fn new(page: i64, limit: i64) -> Self {
        let limit = if limit <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            (limit as u64).min(MAX_PAGE_SIZE)
        };
        let page = if page <= 0 { 1 } else { page as u64 };

        Self {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    /// Case-insensitive; anything but `desc` is ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(raw) if raw.trim().eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("ASC"),
            SortOrder::Desc => f.write_str("DESC"),
        }
    }
}

/// Pagination block of a list response. Derived from the row count of the same request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub limit: u64,
    pub page: u64,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub total: u64,
    pub total_pages: u64,
    pub prev_page: u64,
    pub next_page: u64,
}

impl Pagination {
    pub fn compute(window: PageWindow, total: u64, sort_by: String, sort_order: SortOrder) -> Self {
        let total_pages = total.div_ceil(window.limit);
        let last = total_pages.max(1);

        Self {
            limit: window.limit,
            page: window.page,
            sort_by,
            sort_order,
            total,
            total_pages,
            prev_page: window.page.saturating_sub(1).clamp(1, last),
            next_page: window.page.saturating_add(1).clamp(1, last),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
    /// Filters dropped under the skip-with-warning policy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T> ListResponse<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResponse<U> {
        ListResponse {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
            warnings: self.warnings,
        }
    }
}

/// Flat list shape kept for older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub page_index: u64,
    pub total_page: u64,
    pub page_size: u64,
    pub total_size: u64,
    pub pages: Vec<u64>,
}

impl<T> From<ListResponse<T>> for PageResponse<T> {
    fn from(response: ListResponse<T>) -> Self {
        let pagination = response.pagination;
        Self {
            data: response.data,
            page_index: pagination.page,
            total_page: pagination.total_pages,
            page_size: pagination.limit,
            total_size: pagination.total,
            pages: (1..=pagination.total_pages).collect(),
        }
    }
}
