use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BookingConfig {
    /// When enabled, booking status updates must follow the
    /// PENDING -> CONFIRMED -> IN_PROGRESS -> COMPLETED chain
    /// (CANCELLED is reachable from any non-terminal state).
    /// Disabled by default: admins may overwrite status freely.
    #[serde(default)]
    pub enforce_status_transitions: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite://tasknest.db")?
            .set_default("database.max_connections", 10)?
            .set_default("auth.jwt_secret", "development-secret-change-in-production")?
            .set_default("auth.token_ttl_hours", 24 * 7)?
            .set_default("booking.enforce_status_transitions", false)?
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (with TASKNEST__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("TASKNEST").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "sqlite://tasknest.db".to_string(),
                max_connections: 10,
            },
            auth: AuthConfig {
                jwt_secret: "development-secret-change-in-production".to_string(),
                token_ttl_hours: 24 * 7,
            },
            booking: BookingConfig::default(),
        }
    }
}
