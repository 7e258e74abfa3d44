use crate::Settings;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre for startup error reports.
///
/// Call before any fallible operation in `main`. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing for the resolved settings.
///
/// - **debug** settings (testing): pretty output, default level `debug`
/// - otherwise (development): JSON output with flattened events and no
///   targets, default level `info`
///
/// `RUST_LOG` overrides the default level in both cases. An `ErrorLayer` is
/// always installed so eyre reports carry span traces.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if settings.debug {
            EnvFilter::new("debug,sqlx=info,hyper=info")
        } else {
            EnvFilter::new("info,sea_orm=warn,sqlx=warn")
        }
    });

    let result = if settings.debug {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(
            environment = %settings.environment,
            debug = settings.debug,
            "Tracing initialized"
        ),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Environment;

    fn settings(environment: Environment) -> Settings {
        Settings {
            environment,
            secret_key: "secret".to_string(),
            database_uri: "postgres://localhost/test".to_string(),
            debug: environment.debug(),
        }
    }

    #[test]
    fn test_init_tracing_testing() {
        init_tracing(&settings(Environment::Testing));
    }

    #[test]
    fn test_init_tracing_development() {
        init_tracing(&settings(Environment::Development));
    }

    #[test]
    fn test_init_tracing_multiple_calls() {
        let settings = settings(Environment::Testing);
        init_tracing(&settings);
        init_tracing(&settings);
    }

    #[test]
    fn test_init_tracing_with_rust_log_env() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            init_tracing(&settings(Environment::Development));
        });
    }
}
