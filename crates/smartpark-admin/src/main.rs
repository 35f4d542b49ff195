use std::env;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use smartpark_core::{db, seed, status};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Smart-parking administrative tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace the database contents with demonstration data
    DbSeed(MigrationArgs),
    /// Check connectivity and report row counts per table
    DbStatus,
    /// Delete every row without reseeding
    DbReset(DbResetArgs),
}

#[derive(Args, Debug, Default)]
struct MigrationArgs {
    /// Skip running embedded database migrations first
    #[arg(long)]
    skip_migrations: bool,
}

#[derive(Args, Debug, Default)]
struct DbResetArgs {
    /// Confirm that all rows should be deleted
    #[arg(long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::DbSeed(args) => handle_db_seed(args).await,
        Command::DbStatus => handle_db_status().await,
        Command::DbReset(args) => handle_db_reset(args).await,
    }
}

async fn handle_db_seed(args: MigrationArgs) -> Result<()> {
    let pool = connect_pool().await?;

    if args.skip_migrations {
        info!("Skipping migrations at user request");
    } else {
        db::run_migrations(&pool).await?;
    }

    let summary = seed::run(&pool).await?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Seeded", "Rows"]);
    table.add_row(vec!["parkings".to_string(), summary.parkings.to_string()]);
    table.add_row(vec!["parking slots".to_string(), summary.parking_slots.to_string()]);
    table.add_row(vec!["slot sensors".to_string(), summary.sensors.to_string()]);
    table.add_row(vec![
        "environment sensors".to_string(),
        summary.parking_sensors.to_string(),
    ]);
    table.add_row(vec![
        "slot sensor readings".to_string(),
        summary.sensor_data.to_string(),
    ]);
    table.add_row(vec![
        "environment readings".to_string(),
        summary.parking_sensor_data.to_string(),
    ]);
    table.add_row(vec![
        "contact messages".to_string(),
        summary.contact_messages.to_string(),
    ]);
    println!("{table}");

    Ok(())
}

async fn handle_db_status() -> Result<()> {
    let pool = connect_pool().await?;
    db::ping(&pool)
        .await
        .context("database did not answer a trivial query")?;
    println!("Connected to database.");

    let counts = status::table_counts(&pool)
        .await
        .context("failed to count rows; have migrations been applied?")?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Table", "Rows"]);
    for count in &counts {
        table.add_row(vec![count.table.to_string(), count.rows.to_string()]);
    }
    println!("{table}");

    Ok(())
}

async fn handle_db_reset(args: DbResetArgs) -> Result<()> {
    if !args.yes {
        println!("This deletes every row in every table. Run again with --yes to proceed.");
        return Ok(());
    }

    let pool = connect_pool().await?;
    seed::reset(&pool).await?;
    println!("All tables cleared.");
    Ok(())
}

async fn connect_pool() -> Result<db::DbPool> {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("SMARTPARK_DATABASE_URL"))
        .context("DATABASE_URL (or SMARTPARK_DATABASE_URL) must be set")?;

    db::connect(&database_url).await
}
