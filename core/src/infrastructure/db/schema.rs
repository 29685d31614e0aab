use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::entity::{branches, footsteps, media, members};

/// Creates every table straight from the entity definitions.
///
/// Used for throwaway SQLite databases; Postgres is migrated with the SQL files instead.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, branches::Entity).await?;
    create_table(db, media::Entity).await?;
    create_table(db, members::Entity).await?;
    create_table(db, footsteps::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let statement = backend.build(&schema.create_table_from_entity(entity));
    db.execute(statement).await?;
    Ok(())
}
