use clap::{Args as ClapArgs, Parser};
use coopdesk_core::domain::common::{
    CoopdeskConfig, DatabaseConfig, EventsConfig, FilterConfig, ObjectStorageConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "coopdesk-api", version, about = "Coopdesk records API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub object_storage: ObjectStorageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(id = "server_host", long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(id = "server_port", long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    /// Deadline applied to the database work of each request.
    #[arg(long = "request-timeout-secs", env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Drop filters whose operator does not fit the field type instead of rejecting the request.
    #[arg(long = "skip-unsupported-filters", env = "SKIP_UNSUPPORTED_FILTERS", default_value_t = false)]
    pub skip_unsupported_filters: bool,

    #[arg(long = "live-update-capacity", env = "LIVE_UPDATE_CAPACITY", default_value_t = 256)]
    pub live_update_capacity: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DatabaseArgs {
    #[arg(id = "database_host", long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "database_port", long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(long = "database-password", env = "DATABASE_PASSWORD", default_value = "postgres")]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "coopdesk")]
    pub name: String,

    #[arg(long = "database-max-connections", env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    #[arg(long = "database-connect-attempts", env = "DATABASE_CONNECT_ATTEMPTS", default_value_t = 5)]
    pub connect_attempts: u32,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ObjectStorageArgs {
    #[arg(long = "object-storage-endpoint", env = "OBJECT_STORAGE_ENDPOINT", default_value = "http://localhost:9000")]
    pub endpoint: String,

    #[arg(long = "object-storage-region", env = "OBJECT_STORAGE_REGION", default_value = "us-east-1")]
    pub region: String,

    #[arg(long = "object-storage-access-key", env = "OBJECT_STORAGE_ACCESS_KEY", default_value = "minioadmin")]
    pub access_key: String,

    #[arg(long = "object-storage-secret-key", env = "OBJECT_STORAGE_SECRET_KEY", default_value = "minioadmin")]
    pub secret_key: String,

    #[arg(long = "object-storage-bucket", env = "OBJECT_STORAGE_BUCKET", default_value = "coopdesk-media")]
    pub bucket: String,

    #[arg(long = "object-storage-presign-ttl-secs", env = "OBJECT_STORAGE_PRESIGN_TTL_SECS", default_value_t = 300)]
    pub presign_ttl_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// `tracing_subscriber::EnvFilter` directives.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for CoopdeskConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
                max_connections: args.db.max_connections,
                connect_attempts: args.db.connect_attempts,
            },
            object_storage: ObjectStorageConfig {
                endpoint: args.object_storage.endpoint,
                region: args.object_storage.region,
                access_key: args.object_storage.access_key,
                secret_key: args.object_storage.secret_key,
                bucket: args.object_storage.bucket,
                presign_ttl_secs: args.object_storage.presign_ttl_secs,
            },
            events: EventsConfig {
                live_update_capacity: args.server.live_update_capacity,
            },
            filters: FilterConfig {
                skip_unsupported: args.server.skip_unsupported_filters,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn argument_ids_are_unique() {
        Args::command().debug_assert();
    }

    #[test]
    fn server_and_database_hosts_are_separate() {
        let args = Args::parse_from([
            "coopdesk-api",
            "--server-host",
            "127.0.0.1",
            "--server-port",
            "8080",
            "--database-host",
            "db.internal",
            "--database-port",
            "6543",
        ]);

        assert_eq!(args.server.host, "127.0.0.1");
        assert_eq!(args.server.port, 8080);
        assert_eq!(args.db.host, "db.internal");
        assert_eq!(args.db.port, 6543);
    }

    #[test]
    fn flags_map_onto_core_config() {
        let args = Args::parse_from([
            "coopdesk-api",
            "--database-host",
            "db.internal",
            "--database-port",
            "5433",
            "--object-storage-bucket",
            "members",
            "--skip-unsupported-filters",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);
        assert_eq!(args.server.allowed_origins.len(), 2);

        let config = CoopdeskConfig::from(args);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 5433);
        assert_eq!(config.object_storage.bucket, "members");
        assert!(config.filters.skip_unsupported);
        assert_eq!(config.events.live_update_capacity, 256);
    }
}
