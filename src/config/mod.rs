use once_cell::sync::Lazy;
use std::env;

/// Process-wide configuration, loaded once from the environment.
///
/// The two secrets have no default: when unset they stay empty, and an empty
/// secret never matches, so login and the bearer filter reject everything
/// until the process is configured.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub admin_password: String,
    pub auth_token: String,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Host (optionally host:port) of the database server.
    pub server: String,
    /// Name of the database holding the item table.
    pub name: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_default(),
            auth_token: env::var("AUTH_TOKEN").unwrap_or_default(),
            database: DatabaseConfig::from_env(),
        }
    }
}

impl DatabaseConfig {
    fn from_env() -> Self {
        let mut config = Self {
            server: env::var("DB_SERVER").unwrap_or_else(|_| "localhost".to_string()),
            name: env::var("DB_NAME").unwrap_or_else(|_| "iteminfo".to_string()),
            max_connections: 10,
            connect_timeout_secs: 30,
        };

        if let Ok(v) = env::var("DB_MAX_CONNECTIONS") {
            config.max_connections = v.parse().unwrap_or(config.max_connections);
        }
        if let Ok(v) = env::var("DB_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout_secs = v.parse().unwrap_or(config.connect_timeout_secs);
        }

        config
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
