//! Per-environment application settings.
//!
//! Settings are resolved once at startup and handed to the application
//! state; request handlers never read the process environment themselves.

use crate::{env_required, ConfigError, Environment};

/// Variable holding the token signing secret, shared by all environments.
pub const SECRET_KEY_VAR: &str = "APP_SECRET_KEY";

/// Resolved configuration for one deployment environment.
#[derive(Clone)]
pub struct Settings {
    pub environment: Environment,
    pub secret_key: String,
    pub database_uri: String,
    pub debug: bool,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("environment", &self.environment)
            .field("secret_key", &"<redacted>")
            .field("database_uri", &"<redacted>")
            .field("debug", &self.debug)
            .finish()
    }
}

impl Settings {
    /// Reads the secret key and the environment's database URI.
    pub fn for_environment(environment: Environment) -> Result<Self, ConfigError> {
        Ok(Self {
            environment,
            secret_key: env_required(SECRET_KEY_VAR)?,
            database_uri: env_required(environment.database_uri_var())?,
            debug: environment.debug(),
        })
    }
}

/// Maps an environment name ("testing", "development") to its settings.
///
/// # Errors
/// - [`ConfigError::UnknownEnvironment`] for any other name
/// - [`ConfigError::MissingEnvVar`] when `APP_SECRET_KEY` or the environment's
///   database variable is unset
pub fn resolve(environment_name: &str) -> Result<Settings, ConfigError> {
    let environment: Environment = environment_name.parse()?;
    Settings::for_environment(environment)
}
