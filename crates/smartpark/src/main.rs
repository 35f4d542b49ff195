use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use smartpark_api::AppState;
use smartpark_core::{db, seed};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Smart-parking API server and CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Run database migrations
    Migrate,
    /// Replace the database contents with demonstration data
    DbSeed(DbSeedArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address the server listens on
    #[arg(long, env = "SMARTPARK_BIND", default_value = "0.0.0.0:4000")]
    bind: SocketAddr,
    /// Maximum number of pooled database connections
    #[arg(long, env = "SMARTPARK_MAX_CONNECTIONS", default_value_t = db::DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,
    /// Skip running migrations before serving
    #[arg(long)]
    skip_migrations: bool,
}

#[derive(Args, Debug, Default)]
struct DbSeedArgs {
    /// Skip running migrations before seeding
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Migrate => {
            let pool = connect_pool(db::DEFAULT_MAX_CONNECTIONS).await?;
            db::run_migrations(&pool).await?;
            info!("Database migrations applied");
            Ok(())
        }
        Command::DbSeed(args) => {
            let pool = connect_pool(db::DEFAULT_MAX_CONNECTIONS).await?;
            if args.skip_migrations {
                warn!("Skipping migrations before seeding");
            } else {
                db::run_migrations(&pool).await?;
            }
            let summary = seed::run(&pool).await?;
            info!(?summary, "Demonstration data seeded");
            Ok(())
        }
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let pool = connect_pool(args.max_connections).await?;
    if args.skip_migrations {
        warn!("Skipping migrations at user request");
    } else {
        db::run_migrations(&pool).await?;
    }

    let app = smartpark_api::router(AppState::new(pool));

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn connect_pool(max_connections: u32) -> Result<db::DbPool> {
    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("SMARTPARK_DATABASE_URL"))
        .context("DATABASE_URL (or SMARTPARK_DATABASE_URL) must be set")?;
    db::connect_with(&database_url, max_connections).await
}
