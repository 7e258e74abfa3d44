pub mod server;
pub mod settings;
pub mod tracing;

use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use settings::{resolve, Settings};

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },

    #[error("Unknown environment '{0}' (expected one of: testing, development)")]
    UnknownEnvironment(String),
}

/// Deployment environment the service is configured for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Testing,
    Development,
}

impl Environment {
    /// Reads `APP_ENV`, defaulting to `development` when unset.
    ///
    /// Unlike an unset variable, an unrecognized value is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        env_or_default("APP_ENV", "development").parse()
    }

    /// Name of the variable holding this environment's database URI.
    pub fn database_uri_var(&self) -> &'static str {
        match self {
            Environment::Testing => "TESTING_DATABASE_URI",
            Environment::Development => "DEVELOPMENT_DATABASE_URI",
        }
    }

    pub fn debug(&self) -> bool {
        matches!(self, Environment::Testing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Testing => "testing",
            Environment::Development => "development",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "testing" => Ok(Environment::Testing),
            "development" => Ok(Environment::Development),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Name and version of the running binary, reported by the liveness probe.
#[derive(Clone, Copy, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Builds an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}
