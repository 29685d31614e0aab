use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::{context::RequestContext, entities::app_errors::CoreError},
    query::{filter::PaginatedRequest, pagination::ListResponse},
};

/// Create, read, update, delete and list over one entity type.
///
/// Every call is bounded by the deadline and cancellation of `ctx`. Preload names are
/// checked against the relations the entity declares before any query runs.
pub trait CrudRepository<T>: Send + Sync {
    fn create(
        &self,
        ctx: &RequestContext,
        entity: T,
    ) -> impl Future<Output = Result<T, CoreError>> + Send;

    fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        preloads: &[String],
    ) -> impl Future<Output = Result<T, CoreError>> + Send;

    fn find_all(
        &self,
        ctx: &RequestContext,
        preloads: &[String],
    ) -> impl Future<Output = Result<Vec<T>, CoreError>> + Send;

    /// Filters, counts, sorts and pages in one go. `preloads` adds to the ones named in
    /// the request.
    fn list(
        &self,
        ctx: &RequestContext,
        request: PaginatedRequest,
        preloads: &[String],
    ) -> impl Future<Output = Result<ListResponse<T>, CoreError>> + Send;

    fn update(
        &self,
        ctx: &RequestContext,
        entity: T,
    ) -> impl Future<Output = Result<T, CoreError>> + Send;

    fn delete(&self, ctx: &RequestContext, id: Uuid)
    -> impl Future<Output = Result<(), CoreError>> + Send;
}
