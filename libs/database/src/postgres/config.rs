use core_config::{env_or_default, ConfigError, Settings};
use sea_orm::ConnectOptions;
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

/// Connection pool settings for PostgreSQL.
///
/// The URL comes from the resolved [`Settings`]; pool sizing can be tuned per
/// deployment through optional `DB_*` variables.
#[derive(Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Log every statement through sqlx
    pub sqlx_logging: bool,
}

impl std::fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_lifetime_secs", &self.max_lifetime_secs)
            .field("sqlx_logging", &self.sqlx_logging)
            .finish()
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
            sqlx_logging: false,
        }
    }

    /// Build from resolved settings, applying `DB_*` overrides:
    ///
    /// - `DB_MAX_CONNECTIONS` (default 20)
    /// - `DB_MIN_CONNECTIONS` (default 2)
    /// - `DB_CONNECT_TIMEOUT_SECS` / `DB_ACQUIRE_TIMEOUT_SECS` (default 8)
    /// - `DB_IDLE_TIMEOUT_SECS` (default 300)
    /// - `DB_MAX_LIFETIME_SECS` (default 1800)
    /// - `DB_SQLX_LOGGING` (defaults to the settings' debug flag)
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let defaults = Self::new(settings.database_uri.clone());

        Ok(Self {
            max_connections: parse_or("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parse_or("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout_secs: parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            acquire_timeout_secs: parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            )?,
            idle_timeout_secs: parse_or("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout_secs)?,
            max_lifetime_secs: parse_or("DB_MAX_LIFETIME_SECS", defaults.max_lifetime_secs)?,
            sqlx_logging: parse_or("DB_SQLX_LOGGING", settings.debug)?,
            url: defaults.url,
        })
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + ToString,
    T::Err: std::fmt::Display,
{
    env_or_default(key, &default.to_string())
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Environment;

    fn settings(debug: bool) -> Settings {
        Settings {
            environment: Environment::Development,
            secret_key: "secret".to_string(),
            database_uri: "postgres://localhost/boardroom".to_string(),
            debug,
        }
    }

    #[test]
    fn test_from_settings_defaults() {
        temp_env::with_vars_unset(
            ["DB_MAX_CONNECTIONS", "DB_MIN_CONNECTIONS", "DB_SQLX_LOGGING"],
            || {
                let config = PostgresConfig::from_settings(&settings(true)).unwrap();
                assert_eq!(config.url, "postgres://localhost/boardroom");
                assert_eq!(config.max_connections, 20);
                assert_eq!(config.min_connections, 2);
                assert!(config.sqlx_logging);
            },
        );
    }

    #[test]
    fn test_from_settings_overrides() {
        temp_env::with_vars(
            [
                ("DB_MAX_CONNECTIONS", Some("50")),
                ("DB_CONNECT_TIMEOUT_SECS", Some("15")),
                ("DB_SQLX_LOGGING", Some("false")),
            ],
            || {
                let config = PostgresConfig::from_settings(&settings(true)).unwrap();
                assert_eq!(config.max_connections, 50);
                assert_eq!(config.connect_timeout_secs, 15);
                assert!(!config.sqlx_logging);
            },
        );
    }

    #[test]
    fn test_from_settings_invalid_number() {
        temp_env::with_var("DB_MAX_CONNECTIONS", Some("lots"), || {
            let err = PostgresConfig::from_settings(&settings(false)).unwrap_err();
            assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
        });
    }

    #[test]
    fn test_debug_hides_url() {
        let config = PostgresConfig::new("postgres://user:pw@db/boardroom");
        assert!(!format!("{:?}", config).contains("pw@"));
    }
}
