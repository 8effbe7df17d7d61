//! Configuration management

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub seed: SeedConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whether to expose interactive API docs (Swagger UI). Should be false in hardened production.
    pub enable_docs: bool,
    /// Global request timeout in seconds applied at the HTTP layer.
    pub request_timeout_seconds: u64,
    /// Allowed CORS origins. Use ["*"] to allow any (development only). Empty vector -> no external origins.
    pub allowed_origins: Vec<String>,
    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,
}

/// Relational store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://wavv_travel.db?mode=rwc` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

/// Token and password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

/// Startup data seeding. Only inserts into empty tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub enabled: bool,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
    pub sample_packages: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                enable_docs: true,
                request_timeout_seconds: 30,
                allowed_origins: vec!["*".to_string()],
                body_limit_bytes: 10 * 1024 * 1024,
            },
            database: DatabaseConfig {
                url: "sqlite://wavv_travel.db?mode=rwc".to_string(),
                max_connections: 10,
                acquire_timeout_seconds: 30,
                run_migrations: true,
            },
            auth: AuthConfig {
                jwt_secret: "change-me-in-production".to_string(),
                token_ttl_hours: 24 * 7,
                bcrypt_cost: 12,
            },
            seed: SeedConfig {
                enabled: false,
                admin_name: "Admin User".to_string(),
                admin_email: "admin@wavv.com".to_string(),
                admin_password: "admin123".to_string(),
                sample_packages: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        // Override with environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("WAVV")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.allowed_origins")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Configuration for tests: private in-memory store, cheap hashing, seeded admin
    pub fn for_tests() -> Self {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        config.auth.jwt_secret = "test-secret".to_string();
        config.auth.bcrypt_cost = 4;
        config.seed.enabled = true;
        config.seed.sample_packages = false;
        config.logging.format = "compact".to_string();
        config
    }
}
