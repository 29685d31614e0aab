use std::{marker::PhantomData, sync::Arc};

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    domain::{
        common::{context::RequestContext, entities::app_errors::CoreError},
        crud::ports::CrudRepository,
        events::{
            entities::{DomainEvent, EventAction},
            ports::{EventPublisher, NoopEventPublisher},
        },
        query::{filter::PaginatedRequest, pagination::ListResponse},
    },
    infrastructure::{
        db::errors::translate_db_error,
        query::{
            combinator::UnsupportedPolicy,
            plan::{QueryPlan, validate_preloads},
        },
        repositories::crud_entity::CrudEntity,
    },
};

/// Generic sea-orm repository. One instance serves one entity; successful writes are
/// announced through `P`.
pub struct SeaCrudRepository<E, P = NoopEventPublisher> {
    db: Arc<DatabaseConnection>,
    publisher: P,
    policy: UnsupportedPolicy,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CrudEntity> SeaCrudRepository<E> {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            publisher: NoopEventPublisher,
            policy: UnsupportedPolicy::default(),
            _entity: PhantomData,
        }
    }
}

impl<E, P> Clone for SeaCrudRepository<E, P>
where
    P: Clone,
{
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            publisher: self.publisher.clone(),
            policy: self.policy,
            _entity: PhantomData,
        }
    }
}

impl<E, P> SeaCrudRepository<E, P>
where
    E: CrudEntity,
    P: EventPublisher,
{
    pub fn with_publisher<Q: EventPublisher>(self, publisher: Q) -> SeaCrudRepository<E, Q> {
        SeaCrudRepository {
            db: self.db,
            publisher,
            policy: self.policy,
            _entity: PhantomData,
        }
    }

    pub fn with_policy(mut self, policy: UnsupportedPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn notify(&self, action: EventAction, id: Uuid, payload: Value) {
        if E::PUBLISHES_EVENTS {
            self.publisher
                .publish(DomainEvent::new(E::RESOURCE, id, action, payload));
        }
    }

    fn payload(entity: &E::Domain) -> Value {
        serde_json::to_value(entity).unwrap_or_else(|err| {
            warn!(resource = E::RESOURCE, error = %err, "Failed to serialize event payload");
            Value::Null
        })
    }
}

impl<E, P> CrudRepository<E::Domain> for SeaCrudRepository<E, P>
where
    E: CrudEntity,
    P: EventPublisher,
{
    #[instrument(skip(self, ctx, entity), fields(resource = E::RESOURCE))]
    async fn create(&self, ctx: &RequestContext, entity: E::Domain) -> Result<E::Domain, CoreError> {
        let active_model = E::into_active_model(&entity);

        ctx.run(async {
            E::insert(active_model)
                .exec(self.db.as_ref())
                .await
                .map_err(|err| translate_db_error(err, "create"))
        })
        .await?;

        let id = E::domain_id(&entity);
        info!(%id, "Record created");
        self.notify(EventAction::Created, id, Self::payload(&entity));

        Ok(entity)
    }

    #[instrument(skip(self, ctx), fields(resource = E::RESOURCE))]
    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        preloads: &[String],
    ) -> Result<E::Domain, CoreError> {
        let preloads = validate_preloads(E::PRELOADS, preloads)?;

        ctx.run(async {
            let model = E::find()
                .filter(E::id_column().eq(id))
                .one(self.db.as_ref())
                .await
                .map_err(|err| translate_db_error(err, "find_by_id"))?
                .ok_or(CoreError::NotFound)?;

            E::attach_preloads(self.db.as_ref(), vec![model], &preloads)
                .await
                .map_err(|err| translate_db_error(err, "find_by_id"))?
                .pop()
                .ok_or(CoreError::NotFound)
        })
        .await
    }

    #[instrument(skip(self, ctx), fields(resource = E::RESOURCE))]
    async fn find_all(
        &self,
        ctx: &RequestContext,
        preloads: &[String],
    ) -> Result<Vec<E::Domain>, CoreError> {
        let preloads = validate_preloads(E::PRELOADS, preloads)?;
        let (_, sort_column) = E::default_sort();

        ctx.run(async {
            let models = E::find()
                .order_by(sort_column, Order::Asc)
                .all(self.db.as_ref())
                .await
                .map_err(|err| translate_db_error(err, "find_all"))?;

            E::attach_preloads(self.db.as_ref(), models, &preloads)
                .await
                .map_err(|err| translate_db_error(err, "find_all"))
        })
        .await
    }

    #[instrument(skip(self, ctx, request), fields(resource = E::RESOURCE, filters = request.filters.len()))]
    async fn list(
        &self,
        ctx: &RequestContext,
        request: PaginatedRequest,
        preloads: &[String],
    ) -> Result<ListResponse<E::Domain>, CoreError> {
        // Every caller mistake surfaces here, before the first query.
        let plan = QueryPlan::<E>::from_request(&request, preloads, self.policy)?;

        let response = ctx
            .run(async {
                let total = plan
                    .filtered()
                    .count(self.db.as_ref())
                    .await
                    .map_err(|err| translate_db_error(err, "list"))?;

                let models = plan
                    .page()
                    .all(self.db.as_ref())
                    .await
                    .map_err(|err| translate_db_error(err, "list"))?;

                let data = E::attach_preloads(self.db.as_ref(), models, &plan.preloads)
                    .await
                    .map_err(|err| translate_db_error(err, "list"))?;

                Ok(ListResponse {
                    data,
                    pagination: plan.pagination(total),
                    warnings: plan.warnings.clone(),
                })
            })
            .await?;

        info!(
            total = response.pagination.total,
            returned = response.data.len(),
            "Records listed"
        );
        Ok(response)
    }

    #[instrument(skip(self, ctx, entity), fields(resource = E::RESOURCE))]
    async fn update(&self, ctx: &RequestContext, entity: E::Domain) -> Result<E::Domain, CoreError> {
        let id = E::domain_id(&entity);
        let active_model = E::into_active_model(&entity);

        let result = ctx
            .run(async {
                E::update_many()
                    .set(active_model)
                    .filter(E::id_column().eq(id))
                    .exec(self.db.as_ref())
                    .await
                    .map_err(|err| translate_db_error(err, "update"))
            })
            .await?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }

        info!(%id, "Record updated");
        self.notify(EventAction::Updated, id, Self::payload(&entity));

        Ok(entity)
    }

    #[instrument(skip(self, ctx), fields(resource = E::RESOURCE))]
    async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), CoreError> {
        let result = ctx
            .run(async {
                E::delete_many()
                    .filter(E::id_column().eq(id))
                    .exec(self.db.as_ref())
                    .await
                    .map_err(|err| translate_db_error(err, "delete"))
            })
            .await?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }

        info!(%id, "Record deleted");
        self.notify(EventAction::Deleted, id, json!({ "id": id }));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use sea_orm::{ConnectOptions, Database, DatabaseBackend, MockDatabase};
    use serde_json::json;

    use super::*;
    use crate::{
        domain::{
            branch::{entities::Branch, value_objects::CreateBranchInput},
            common::entities::app_errors::ConstraintViolation,
            events::ports::MockEventPublisher,
            member::{
                entities::Member,
                value_objects::{CreateMemberInput, UpdateMemberInput},
            },
            query::{
                errors::FilterError,
                filter::{FilterInput, Logic},
                pagination::{PageResponse, SortOrder},
            },
        },
        entity::{branches, members},
        infrastructure::db::schema::create_schema,
    };

    async fn sqlite() -> Arc<DatabaseConnection> {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        create_schema(&db).await.unwrap();
        Arc::new(db)
    }

    fn branch(code: &str) -> Branch {
        Branch::new(CreateBranchInput {
            name: format!("Branch {code}"),
            code: code.to_string(),
            city: Some("Mombasa".to_string()),
            is_active: None,
            opened_on: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
        })
    }

    fn member(branch_id: Uuid, first_name: &str, status: &str, shares: i64) -> Member {
        Member::new(CreateMemberInput {
            branch_id,
            photo_id: None,
            first_name: first_name.to_string(),
            last_name: "Otieno".to_string(),
            email: format!("{}@coop.test", first_name.to_lowercase()),
            status: Some(status.to_string()),
            shares: Some(shares),
            balance: None,
            joined_on: None,
        })
    }

    /// Five members: three active, one inactive, one suspended.
    async fn seeded() -> (Arc<DatabaseConnection>, Branch) {
        let db = sqlite().await;
        let ctx = RequestContext::default();

        let branch = SeaCrudRepository::<branches::Entity>::new(db.clone())
            .create(&ctx, branch("NRB-01"))
            .await
            .unwrap();

        let repository = SeaCrudRepository::<members::Entity>::new(db.clone());
        for (name, status, shares) in [
            ("Amina", "active", 10),
            ("Baraka", "active", 25),
            ("Chege", "inactive", 5),
            ("Daudi", "active", 40),
            ("Eshe", "suspended", 0),
        ] {
            repository
                .create(&ctx, member(branch.id, name, status, shares))
                .await
                .unwrap();
        }

        (db, branch)
    }

    fn first_names(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.first_name.as_str()).collect()
    }

    #[tokio::test]
    async fn list_filters_counts_and_pages() {
        let (db, _) = seeded().await;
        let repository = SeaCrudRepository::<members::Entity>::new(db);

        let request = PaginatedRequest::page(1, 2)
            .with_filter(FilterInput::new("status", "equal", json!("active")))
            .with_sort("first_name", "asc");
        let response = repository
            .list(&RequestContext::default(), request, &[])
            .await
            .unwrap();

        assert_eq!(first_names(&response.data), vec!["Amina", "Baraka"]);
        assert_eq!(response.pagination.total, 3);
        assert_eq!(response.pagination.total_pages, 2);
        assert_eq!(response.pagination.prev_page, 1);
        assert_eq!(response.pagination.next_page, 2);
        assert_eq!(response.pagination.sort_by, "first_name");

        let legacy = PageResponse::from(response);
        assert_eq!(legacy.pages, vec![1, 2]);
        assert_eq!(legacy.total_size, 3);
    }

    #[tokio::test]
    async fn or_logic_widens_the_result() {
        let (db, _) = seeded().await;
        let repository = SeaCrudRepository::<members::Entity>::new(db);

        let request = PaginatedRequest::page(1, 10)
            .with_filter(FilterInput::new("status", "equal", json!("inactive")))
            .with_filter(FilterInput::new("shares", "gte", json!(40)))
            .with_logic(Logic::Or)
            .with_sort("first_name", "asc");
        let response = repository
            .list(&RequestContext::default(), request, &[])
            .await
            .unwrap();

        assert_eq!(first_names(&response.data), vec!["Chege", "Daudi"]);
    }

    #[tokio::test]
    async fn multi_value_contains_matches_any_element() {
        let (db, _) = seeded().await;
        let repository = SeaCrudRepository::<members::Entity>::new(db);

        let request = PaginatedRequest::page(1, 10)
            .with_filter(
                FilterInput::new("first_name", "contains", json!(["min", "she"])).with_multiple(true),
            )
            .with_sort("first_name", "asc");
        let response = repository
            .list(&RequestContext::default(), request, &[])
            .await
            .unwrap();

        assert_eq!(first_names(&response.data), vec!["Amina", "Eshe"]);
    }

    #[tokio::test]
    async fn descending_sort_reverses_the_page() {
        let (db, _) = seeded().await;
        let repository = SeaCrudRepository::<members::Entity>::new(db);

        let request = PaginatedRequest::page(1, 2).with_sort("shares", "DESC");
        let response = repository
            .list(&RequestContext::default(), request, &[])
            .await
            .unwrap();

        assert_eq!(first_names(&response.data), vec!["Daudi", "Baraka"]);
        assert_eq!(response.pagination.sort_order, SortOrder::Desc);
        assert_eq!(response.pagination.total, 5);
    }

    #[tokio::test]
    async fn branch_preload_is_attached() {
        let (db, branch) = seeded().await;
        let repository = SeaCrudRepository::<members::Entity>::new(db);
        let ctx = RequestContext::default();

        let response = repository
            .list(&ctx, PaginatedRequest::page(1, 10), &["branch".to_string()])
            .await
            .unwrap();
        assert_eq!(response.data.len(), 5);
        assert!(
            response
                .data
                .iter()
                .all(|m| m.branch.as_ref().map(|b| b.id) == Some(branch.id))
        );
        assert!(response.data.iter().all(|m| m.photo.is_none()));

        let plain = repository.find_all(&ctx, &[]).await.unwrap();
        assert!(plain.iter().all(|m| m.branch.is_none()));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let (db, branch) = seeded().await;
        let repository = SeaCrudRepository::<members::Entity>::new(db);

        let err = repository
            .create(
                &RequestContext::default(),
                member(branch.id, "Amina", "active", 1),
            )
            .await
            .unwrap_err();

        assert_eq!(err.constraint_kind(), Some(ConstraintViolation::Unique));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let (db, branch) = seeded().await;
        let repository = SeaCrudRepository::<members::Entity>::new(db);
        let ctx = RequestContext::default();
        let ghost = member(branch.id, "Ghost", "active", 0);

        assert!(matches!(
            repository.update(&ctx, ghost.clone()).await,
            Err(CoreError::NotFound)
        ));
        assert!(matches!(
            repository.delete(&ctx, ghost.id).await,
            Err(CoreError::NotFound)
        ));
        assert!(matches!(
            repository.find_by_id(&ctx, ghost.id, &[]).await,
            Err(CoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_persists_changes() {
        let (db, branch) = seeded().await;
        let repository = SeaCrudRepository::<members::Entity>::new(db);
        let ctx = RequestContext::default();

        let created = repository
            .create(&ctx, member(branch.id, "Faraji", "active", 3))
            .await
            .unwrap();
        let id = created.id;
        let changed = created.apply(UpdateMemberInput {
            status: Some("suspended".to_string()),
            ..Default::default()
        });
        repository.update(&ctx, changed).await.unwrap();

        let reloaded = repository.find_by_id(&ctx, id, &[]).await.unwrap();
        assert_eq!(reloaded.status, "suspended");
        assert_eq!(reloaded.first_name, "Faraji");
    }

    #[tokio::test]
    async fn writes_publish_events() {
        let db = sqlite().await;
        let ctx = RequestContext::default();

        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .withf(|event| event.event_type == "branch.created")
            .times(1)
            .return_const(());
        publisher
            .expect_publish()
            .withf(|event| event.event_type == "branch.deleted" && event.payload.get("id").is_some())
            .times(1)
            .return_const(());

        let repository = SeaCrudRepository::<branches::Entity>::new(db).with_publisher(publisher);
        let created = repository.create(&ctx, branch("KSM-02")).await.unwrap();
        repository.delete(&ctx, created.id).await.unwrap();
    }

    #[tokio::test]
    async fn rejected_requests_never_reach_the_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repository = SeaCrudRepository::<members::Entity>::new(Arc::new(db));
        let ctx = RequestContext::default();

        let injection = PaginatedRequest::page(1, 10).with_filter(FilterInput::new(
            "status; DROP TABLE members",
            "equal",
            json!("x"),
        ));
        assert!(matches!(
            repository.list(&ctx, injection, &[]).await,
            Err(CoreError::Validation(FilterError::InvalidFieldName { .. }))
        ));

        let unknown_preload = repository
            .list(&ctx, PaginatedRequest::page(1, 10), &["password".to_string()])
            .await;
        assert!(matches!(
            unknown_preload,
            Err(CoreError::Validation(FilterError::UnknownPreload { .. }))
        ));

        let bad_sort = PaginatedRequest::page(1, 10).with_sort("email DESC", "asc");
        assert!(matches!(
            repository.list(&ctx, bad_sort, &[]).await,
            Err(CoreError::Validation(FilterError::InvalidSortField { .. }))
        ));

        let db = Arc::try_unwrap(repository.db).unwrap();
        assert!(db.into_transaction_log().is_empty());
    }
}
