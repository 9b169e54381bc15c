//! Retention purge for the scheduling board
//!
//! Deletes day rows older than the retention cutoff (their program items and
//! direct reservations go with them via FK cascade) and hotel bookings whose
//! stay ended before the cutoff (cascading their breakfast configurations and
//! stay-derived reservations).
//!
//! Run daily (e.g. via cron job: 0 2 * * * /app/purge-data)
//!
//! Usage: purge-data [--keep-days N] [--dry-run]

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use fairway_api::scheduling::dates::{add_days, today_in_operating_tz};

#[derive(Parser)]
#[command(name = "purge-data", about = "Purge old rows from the scheduling board")]
struct Args {
    /// How many days of history to keep
    #[arg(long, default_value_t = 90)]
    keep_days: i64,

    /// Count what would be deleted without deleting anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL environment variable not set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let cutoff = add_days(today_in_operating_tz(), -args.keep_days);
    tracing::info!(
        "Starting board purge: keeping {} days, cutoff {}",
        args.keep_days,
        cutoff
    );

    let old_days: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM days WHERE date < $1")
        .bind(cutoff)
        .fetch_one(&pool)
        .await?;
    let old_bookings: i64 = sqlx::query_scalar(
        "SELECT COUNT(*)::BIGINT FROM hotel_bookings WHERE check_out_date < $1",
    )
    .bind(cutoff)
    .fetch_one(&pool)
    .await?;

    if args.dry_run {
        tracing::info!(
            "Dry run: would delete {} day rows and {} ended bookings",
            old_days,
            old_bookings
        );
        return Ok(());
    }

    let deleted_bookings = sqlx::query("DELETE FROM hotel_bookings WHERE check_out_date < $1")
        .bind(cutoff)
        .execute(&pool)
        .await?
        .rows_affected();

    let deleted_days = sqlx::query("DELETE FROM days WHERE date < $1")
        .bind(cutoff)
        .execute(&pool)
        .await?
        .rows_affected();

    tracing::info!(
        "Board purge completed: removed {} day rows and {} ended bookings",
        deleted_days,
        deleted_bookings
    );

    Ok(())
}
