//! Herald API server binary.
//!
//! Loads `.env`, opens the SQLite database, seeds the bootstrap admin and
//! serves the HTTP API until Ctrl-C.

use std::path::Path;

use clap::Parser;
use herald_api::config::ApiConfig;
use herald_core::auth::bootstrap::BootstrapState;
use tracing::{info, warn};

mod logging;

/// CLI arguments. Anything left unset falls back to the environment.
#[derive(Parser, Debug)]
#[command(name = "herald_server", about = "Herald news and accounts API")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// SQLite connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://data/data.db?mode=rwc"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, env = "MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,

    /// Directory for rotated log files.
    #[arg(long, env = "LOG_DIR", default_value = "data")]
    log_dir: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let _log_guard = logging::init(Path::new(&args.log_dir));

    info!(
        database_url = %args.database_url,
        max_connections = args.max_connections,
        log_dir = %args.log_dir,
        "starting herald_server"
    );

    let pool = herald_core::db::connect(&args.database_url, args.max_connections).await?;

    info!("running database migrations");
    herald_api::migrate(&pool).await?;

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        database_url: args.database_url,
        ..ApiConfig::from_env()
    };
    if config.access_key.is_none() {
        warn!("API_SECURITY_KEY is not set; user administration endpoints will reject every call");
    }

    let state = herald_api::AppState::new(pool, config.clone());
    if herald_api::bootstrap(&state).await == BootstrapState::Unseeded {
        warn!("bootstrap admin is missing; only existing admins can sign in");
    }

    let app = herald_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
