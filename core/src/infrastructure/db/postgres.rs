use std::{sync::Arc, time::Duration};

use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::domain::common::DatabaseConfig;

/// Connection handle to the Postgres store.
///
/// Only the initial connect is retried. Queries are executed once and failures are
/// reported to the caller.
#[derive(Debug, Clone)]
pub struct Postgres {
    db: Arc<DatabaseConnection>,
}

impl Postgres {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, anyhow::Error> {
        let mut options = ConnectOptions::new(config.url());
        options
            .max_connections(config.max_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let attempts = config.connect_attempts.max(1);
        let mut attempt = 1;

        loop {
            match Database::connect(options.clone()).await {
                Ok(db) => {
                    info!(host = %config.host, database = %config.name, "Connected to Postgres");
                    return Ok(Self { db: Arc::new(db) });
                }
                Err(err) if attempt < attempts => {
                    warn!(attempt, attempts, error = %err, "Postgres connection failed, retrying");
                    tokio::time::sleep(Duration::from_secs(u64::from(attempt))).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("failed to connect to Postgres after {attempts} attempts")
                    });
                }
            }
        }
    }

    pub async fn migrate(&self) -> Result<(), anyhow::Error> {
        sqlx::migrate!("./migrations")
            .run(self.db.get_postgres_connection_pool())
            .await
            .context("failed to run database migrations")?;

        info!("Database migrations applied");
        Ok(())
    }

    pub fn get_db(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.db)
    }
}
