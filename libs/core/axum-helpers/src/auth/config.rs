use core_config::{ConfigError, Settings};

/// Token signing configuration.
///
/// The secret is the application's `APP_SECRET_KEY`, taken from the resolved
/// [`Settings`] rather than read from the environment again.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// # Errors
    /// [`ConfigError::ParseError`] when the secret key is blank.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        if settings.secret_key.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: core_config::settings::SECRET_KEY_VAR.to_string(),
                details: "must not be empty".to_string(),
            });
        }

        Ok(Self::new(settings.secret_key.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Environment;

    fn settings(secret_key: &str) -> Settings {
        Settings {
            environment: Environment::Testing,
            secret_key: secret_key.to_string(),
            database_uri: "postgres://localhost/boardroom_test".to_string(),
            debug: true,
        }
    }

    #[test]
    fn test_from_settings() {
        let config = JwtConfig::from_settings(&settings("s3cret")).unwrap();
        assert_eq!(config.secret, "s3cret");
    }

    #[test]
    fn test_from_settings_blank_secret() {
        let err = JwtConfig::from_settings(&settings("  ")).unwrap_err();
        assert!(err.to_string().contains("APP_SECRET_KEY"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        assert!(!format!("{:?}", JwtConfig::new("s3cret")).contains("s3cret"));
    }
}
