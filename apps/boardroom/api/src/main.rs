//! Boardroom API
//!
//! Serves the users API, or mints bearer tokens for operators.

use axum_helpers::{JwtAuth, JwtConfig, create_production_app, create_router, health_router};
use clap::{Parser, Subcommand};
use core_config::server::ServerConfig;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv, Settings, app_info};
use database::postgres::{self, PostgresConfig};
use eyre::Result;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

mod api;
mod openapi;
mod state;

use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(name = "boardroom-api")]
#[command(about = "User accounts, roles, wallets and board membership")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Environment to configure for (testing, development)
        #[arg(short, long, env = "APP_ENV", default_value = "development")]
        env: String,
    },

    /// Print a bearer token for a user
    IssueToken {
        /// Subject of the token
        #[arg(short, long)]
        user: Uuid,

        /// Lifetime in seconds
        #[arg(short, long, default_value_t = axum_helpers::auth::DEFAULT_TOKEN_TTL_SECS)]
        ttl_secs: i64,

        #[arg(short, long, env = "APP_ENV", default_value = "development")]
        env: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { env }) => serve(&env).await,
        None => serve(Environment::from_env()?.as_str()).await,
        Some(Commands::IssueToken {
            user,
            ttl_secs,
            env,
        }) => issue_token(&env, user, ttl_secs),
    }
}

async fn serve(environment_name: &str) -> Result<()> {
    let settings = core_config::resolve(environment_name)?;
    init_tracing(&settings);

    info!(environment = %settings.environment, "Starting boardroom API");

    let server = ServerConfig::from_env()?;
    let auth = JwtAuth::new(&JwtConfig::from_settings(&settings)?);

    let db = postgres::connect_from_config_with_retry(PostgresConfig::from_settings(&settings)?, None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    postgres::run_migrations::<migration::Migrator>(&db, app_info!().name).await?;

    let state = AppState {
        settings,
        server,
        db,
        auth,
    };

    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let app = create_router::<openapi::ApiDoc>(api_routes)
        .merge(health_router(app_info!()))
        .merge(api::ready_router(state.clone()));

    let db = state.db.clone();
    create_production_app(app, &state.server, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Boardroom API shutdown complete");
    Ok(())
}

fn issue_token(environment_name: &str, user: Uuid, ttl_secs: i64) -> Result<()> {
    let settings: Settings = core_config::resolve(environment_name)?;
    let auth = JwtAuth::new(&JwtConfig::from_settings(&settings)?);

    let token = auth.issue_token(&user.to_string(), ttl_secs)?;
    println!("{}", token);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_issue_token_arguments() {
        let user = Uuid::now_v7();
        let user_arg = user.to_string();
        let cli = Cli::parse_from([
            "boardroom-api",
            "issue-token",
            "--user",
            user_arg.as_str(),
            "--ttl-secs",
            "60",
            "--env",
            "testing",
        ]);

        match cli.command {
            Some(Commands::IssueToken {
                user: parsed,
                ttl_secs,
                env,
            }) => {
                assert_eq!(parsed, user);
                assert_eq!(ttl_secs, 60);
                assert_eq!(env, "testing");
            }
            _ => panic!("expected issue-token"),
        }
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::parse_from(["boardroom-api"]);
        assert!(cli.command.is_none());
    }
}
