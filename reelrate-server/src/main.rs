//! # Reelrate Server
//!
//! Movie-rating REST API.
//!
//! ## Overview
//!
//! - **Top-rated aggregation**: average rating per movie with a
//!   minimum-vote threshold, optional genre filter, and deterministic
//!   tie-breaking
//! - **Movie catalog**: CRUD plus filtered, paginated listing
//! - **Ratings**: append-only votes per movie
//! - **Static frontend**: a small chart page served from `static/`
//!
//! The server is built on Axum and uses PostgreSQL for persistent storage.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use reelrate_core::PostgresDatabase;
use reelrate_server::{
    AppState,
    auth::jwt::{DEFAULT_TOKEN_TTL_SECS, generate_access_token},
    config::AppConfig,
    routes::build_app,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "reelrate-server")]
#[command(about = "Movie-rating REST API with top-rated aggregation")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default when no subcommand is given)
    Serve(ServeArgs),

    /// Mint an access token for the mutation routes
    IssueToken {
        /// Subject user id; a random one is generated when omitted
        #[arg(long)]
        user: Option<Uuid>,

        /// Token lifetime in seconds
        #[arg(long, default_value_t = DEFAULT_TOKEN_TTL_SECS)]
        ttl: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;

    match cli.command {
        Some(Command::IssueToken { user, ttl }) => {
            let subject = user.unwrap_or_else(Uuid::new_v4);
            let token = generate_access_token(&config.jwt_secret, subject, ttl)
                .context("failed to sign token")?;
            println!("{token}");
            Ok(())
        }
        Some(Command::Serve(args)) => {
            apply_overrides(&mut config, &args);
            serve(config).await
        }
        None => {
            apply_overrides(&mut config, &cli.serve);
            serve(config).await
        }
    }
}

fn apply_overrides(config: &mut AppConfig, args: &ServeArgs) {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;

    let db = PostgresDatabase::new(&database_url)
        .await
        .context("failed to connect to the database")?;
    db.ping().await.context("database is not reachable")?;
    db.initialize_schema()
        .await
        .context("failed to initialize the database schema")?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;

    let state = AppState::new(Arc::new(db), config);

    // Periodically drop idle limiter entries; without this the per-client
    // map grows by one entry per distinct address forever.
    let limiter = state.limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            limiter.cleanup(Duration::from_secs(3600)).await;
        }
    });

    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    info!("Server shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {}", e);
    }
}
