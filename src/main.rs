//! Pizza API - Main Application Entry Point
//!
//! Runs the HTTP server, or manages API keys out of band.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Either serve HTTP or issue/regenerate a key and exit

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pizza_api::{
    app, config::Config, db, services::key_service, state::AppState, store::PgStore,
};

#[derive(Debug, Parser)]
#[command(name = "pizza-api")]
#[command(version, about = "Pizza ordering API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Issue the first API key for a user and print it
    IssueKey {
        /// User identifier that will own the key
        owner: String,
    },

    /// Replace a user's API key and print the new one
    ///
    /// The previous key stops working immediately.
    RegenerateKey {
        /// User identifier that owns the key
        owner: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let store = PgStore::new(pool);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(AppState::new(store), config.server_port).await,
        Commands::IssueKey { owner } => {
            let issued = key_service::issue(&store, &owner).await?;
            println!("{}", issued.key);
            Ok(())
        }
        Commands::RegenerateKey { owner } => {
            let issued = key_service::regenerate(&store, &owner).await?;
            println!("{}", issued.key);
            Ok(())
        }
    }
}

async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = app::router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
