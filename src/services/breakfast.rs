use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ScheduleError;
use crate::models::breakfast::{
    BreakfastConfiguration, CreateBreakfastRequest, UpdateBreakfastRequest,
};
use crate::models::hotel_booking::HotelBooking;
use crate::scheduling::dates::{add_days, parse_hm, parse_ymd};
use crate::services::hotel_bookings::HotelBookingService;
use crate::services::parse_opt_time;

pub struct BreakfastService;

impl BreakfastService {
    /// Configures breakfast for one morning of a stay. Creating the same
    /// morning twice overwrites the earlier configuration.
    pub async fn create(
        pool: &PgPool,
        req: &CreateBreakfastRequest,
    ) -> Result<BreakfastConfiguration, ScheduleError> {
        let booking = HotelBookingService::get(pool, req.hotel_booking_id).await?;
        let date = parse_ymd(&req.breakfast_date)?;
        validate_breakfast_window(&booking, date)?;
        let total = breakdown_total(&req.table_breakdown)?;
        let start_time = parse_opt_time(&req.start_time)?;

        let config = sqlx::query_as::<_, BreakfastConfiguration>(
            "INSERT INTO breakfast_configurations
                 (hotel_booking_id, breakfast_date, table_breakdown, total_guests, start_time, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (hotel_booking_id, breakfast_date) DO UPDATE SET
                 table_breakdown = EXCLUDED.table_breakdown,
                 total_guests    = EXCLUDED.total_guests,
                 start_time      = EXCLUDED.start_time,
                 notes           = EXCLUDED.notes,
                 updated_at      = NOW()
             RETURNING *",
        )
        .bind(booking.id)
        .bind(date)
        .bind(&req.table_breakdown)
        .bind(total)
        .bind(start_time)
        .bind(&req.notes)
        .fetch_one(pool)
        .await?;
        Ok(config)
    }

    /// Updates one configuration. `total_guests` is recomputed from the
    /// effective table breakdown; a moved date is revalidated against the
    /// owning stay's window.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateBreakfastRequest,
    ) -> Result<BreakfastConfiguration, ScheduleError> {
        let existing = sqlx::query_as::<_, BreakfastConfiguration>(
            "SELECT * FROM breakfast_configurations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ScheduleError::NotFound("Breakfast configuration"))?;

        let date = match &req.breakfast_date {
            Some(s) => {
                let date = parse_ymd(s)?;
                let booking = HotelBookingService::get(pool, existing.hotel_booking_id).await?;
                validate_breakfast_window(&booking, date)?;
                date
            }
            None => existing.breakfast_date,
        };
        let breakdown = req
            .table_breakdown
            .clone()
            .unwrap_or_else(|| existing.table_breakdown.clone());
        let total = breakdown_total(&breakdown)?;
        let start_time = match &req.start_time {
            Some(s) => Some(parse_hm(s)?),
            None => existing.start_time,
        };
        let notes = req.notes.clone().or(existing.notes);

        let config = sqlx::query_as::<_, BreakfastConfiguration>(
            "UPDATE breakfast_configurations
             SET breakfast_date  = $1,
                 table_breakdown = $2,
                 total_guests    = $3,
                 start_time      = $4,
                 notes           = $5,
                 updated_at      = NOW()
             WHERE id = $6
             RETURNING *",
        )
        .bind(date)
        .bind(&breakdown)
        .bind(total)
        .bind(start_time)
        .bind(&notes)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(config)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ScheduleError> {
        let result = sqlx::query("DELETE FROM breakfast_configurations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ScheduleError::NotFound("Breakfast configuration"));
        }
        Ok(())
    }
}

/// Validates a table breakdown and returns its guest total.
pub(crate) fn breakdown_total(breakdown: &[i32]) -> Result<i32, ScheduleError> {
    if breakdown.is_empty() {
        return Err(ScheduleError::invalid_input("At least one breakfast table is required"));
    }
    if breakdown.iter().any(|&size| size < 1) {
        return Err(ScheduleError::invalid_input("Breakfast table sizes must be positive"));
    }
    Ok(breakdown.iter().sum())
}

/// A breakfast belongs to a slept night's following morning: after check-in,
/// no later than check-out.
fn validate_breakfast_window(booking: &HotelBooking, date: NaiveDate) -> Result<(), ScheduleError> {
    if !booking.covers_night(add_days(date, -1)) {
        return Err(ScheduleError::invalid_input(
            "Breakfast must fall within the stay, from the morning after check-in through check-out",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn booking(check_in: &str, check_out: &str) -> HotelBooking {
        HotelBooking {
            id: Uuid::new_v4(),
            guest_name: "Guest".into(),
            guest_count: 2,
            check_in_date: check_in.parse().unwrap(),
            check_out_date: check_out.parse().unwrap(),
            notes: None,
            is_tour_operator: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn breakdown_total_sums_tables() {
        assert_eq!(breakdown_total(&[2, 4, 2]).unwrap(), 8);
        assert!(breakdown_total(&[]).is_err());
        assert!(breakdown_total(&[2, 0]).is_err());
        assert!(breakdown_total(&[-1]).is_err());
    }

    #[test]
    fn breakfast_window_excludes_check_in_morning() {
        let stay = booking("2024-06-10", "2024-06-13");
        assert!(validate_breakfast_window(&stay, "2024-06-10".parse().unwrap()).is_err());
        assert!(validate_breakfast_window(&stay, "2024-06-11".parse().unwrap()).is_ok());
        assert!(validate_breakfast_window(&stay, "2024-06-13".parse().unwrap()).is_ok());
        assert!(validate_breakfast_window(&stay, "2024-06-14".parse().unwrap()).is_err());
    }
}
