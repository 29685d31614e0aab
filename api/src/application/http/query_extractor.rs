use axum::{extract::FromRequestParts, http::request::Parts};
use coopdesk_core::domain::{
    common::entities::app_errors::CoreError, query::filter::PaginatedRequest,
};

use super::{query_params::parse_list_query, server::api_entities::api_error::ApiError};

/// List request taken from the query string, in either the base64 or the bracket encoding.
///
/// ```ignore
/// async fn handler(ListQuery(request): ListQuery) -> Result<Response<..>, ApiError> {
///     // request.filters, request.sort_by, request.page_index ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ListQuery(pub PaginatedRequest);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or("");

        parse_list_query(query)
            .map(ListQuery)
            .map_err(|err| ApiError::from(CoreError::from(err)))
    }
}
