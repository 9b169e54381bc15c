use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_gauge_vec, Counter,
    CounterVec, Gauge, GaugeVec,
};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::scheduling::dates::today_in_operating_tz;

lazy_static! {
    // Event counters, incremented at the call sites.
    pub static ref LOGINS_COUNTER: CounterVec = register_counter_vec!(
        "api_logins_total",
        "Editor login attempts by status",
        &["status"]
    ).unwrap();

    pub static ref ITEMS_CREATED_COUNTER: CounterVec = register_counter_vec!(
        "api_program_items_created_total",
        "Program items created by type",
        &["item_type"]
    ).unwrap();

    pub static ref OCCURRENCES_SKIPPED_COUNTER: Counter = register_counter!(
        "api_recurrence_occurrences_skipped_total",
        "Recurring occurrences skipped because their insert failed"
    ).unwrap();

    pub static ref BOOKINGS_CREATED_COUNTER: Counter = register_counter!(
        "api_hotel_bookings_created_total",
        "Hotel bookings created"
    ).unwrap();

    pub static ref RESERVATIONS_CREATED_COUNTER: Counter = register_counter!(
        "api_reservations_created_total",
        "Restaurant reservations created directly (not derived from stays)"
    ).unwrap();

    pub static ref BREAKFASTS_CONFIGURED_COUNTER: Counter = register_counter!(
        "api_breakfasts_configured_total",
        "Breakfast configurations created or overwritten directly"
    ).unwrap();

    // Board state gauges, refreshed by the background collector.
    pub static ref DAYS_GAUGE: Gauge = register_gauge!(
        "board_days_total",
        "Day rows on the board"
    ).unwrap();

    pub static ref UPCOMING_ITEMS_GAUGE: GaugeVec = register_gauge_vec!(
        "board_program_items_upcoming_total",
        "Program items from today onward by type",
        &["item_type"]
    ).unwrap();

    pub static ref GUESTS_IN_HOUSE_GAUGE: Gauge = register_gauge!(
        "board_guests_in_house_total",
        "Guests sleeping in the hotel tonight"
    ).unwrap();

    pub static ref ACTIVE_BOOKINGS_GAUGE: Gauge = register_gauge!(
        "board_hotel_bookings_active_total",
        "Hotel bookings whose stay touches today or later"
    ).unwrap();
}

/// Spawn the background metrics collector (refreshes every 5 minutes).
pub fn start(pool: PgPool) {
    tokio::spawn(async move {
        // Initial collection on startup
        if let Err(e) = collect(&pool).await {
            warn!("Metrics: initial collection failed: {}", e);
        }
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
            if let Err(e) = collect(&pool).await {
                warn!("Metrics: collection failed: {}", e);
            }
        }
    });
}

async fn collect(pool: &PgPool) -> anyhow::Result<()> {
    let today = today_in_operating_tz();

    let days: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM days")
        .fetch_one(pool)
        .await
        .unwrap_or(0);
    DAYS_GAUGE.set(days as f64);

    let upcoming: Vec<(String, i64)> = sqlx::query_as(
        "SELECT pi.item_type, COUNT(*)::BIGINT
         FROM program_items pi
         JOIN days d ON d.id = pi.day_id
         WHERE d.date >= $1
         GROUP BY pi.item_type",
    )
    .bind(today)
    .fetch_all(pool)
    .await
    .unwrap_or_default();
    for (item_type, count) in upcoming {
        UPCOMING_ITEMS_GAUGE.with_label_values(&[&item_type]).set(count as f64);
    }

    // Tonight's occupancy: check-out night itself is not slept.
    let in_house: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(guest_count), 0)::BIGINT FROM hotel_bookings
         WHERE check_in_date <= $1 AND $1 < check_out_date",
    )
    .bind(today)
    .fetch_one(pool)
    .await
    .unwrap_or(0);
    GUESTS_IN_HOUSE_GAUGE.set(in_house as f64);

    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*)::BIGINT FROM hotel_bookings WHERE check_out_date >= $1",
    )
    .bind(today)
    .fetch_one(pool)
    .await
    .unwrap_or(0);
    ACTIVE_BOOKINGS_GAUGE.set(active as f64);

    info!("Metrics: board gauges refreshed");
    Ok(())
}
