use std::future::Future;

use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use serde::Serialize;
use uuid::Uuid;

use crate::infrastructure::query::field_map::FieldMap;

/// Binds a sea-orm entity to its domain type so [`SeaCrudRepository`] can serve it.
///
/// [`SeaCrudRepository`]: super::crud_repository::SeaCrudRepository
pub trait CrudEntity: EntityTrait<Model: Sync, ActiveModel: Send> {
    type Domain: Serialize + Clone + Send + Sync + 'static;

    /// Resource name used in events and footsteps.
    const RESOURCE: &'static str;
    /// Relation names a caller may ask to preload.
    const PRELOADS: &'static [&'static str] = &[];
    const PUBLISHES_EVENTS: bool = true;

    fn field_map() -> &'static FieldMap<Self>;

    fn id_column() -> Self::Column;

    fn default_sort() -> (&'static str, Self::Column) {
        ("id", Self::id_column())
    }

    fn domain_id(domain: &Self::Domain) -> Uuid;

    fn into_domain(model: Self::Model) -> Self::Domain;

    fn into_active_model(domain: &Self::Domain) -> Self::ActiveModel;

    /// Turns models into domain values with the requested relations filled in.
    /// `preloads` is already validated against [`CrudEntity::PRELOADS`].
    fn attach_preloads(
        db: &DatabaseConnection,
        models: Vec<Self::Model>,
        preloads: &[String],
    ) -> impl Future<Output = Result<Vec<Self::Domain>, DbErr>> + Send {
        let _ = (db, preloads);
        async move { Ok(models.into_iter().map(Self::into_domain).collect()) }
    }
}
