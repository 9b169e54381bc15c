use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::ScheduleError;
use crate::models::hotel_booking::{
    BreakfastDayInput, CreateHotelBookingRequest, HotelBooking, ReservationDayInput,
    UpdateHotelBookingRequest,
};
use crate::scheduling::dates::{is_within_horizon, parse_ymd};
use crate::scheduling::stay_range::{nth_breakfast_day, nth_reservation_day};
use crate::services::breakfast::breakdown_total;
use crate::services::days::DayService;
use crate::services::parse_opt_time;

pub struct HotelBookingService;

impl HotelBookingService {
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<HotelBooking, ScheduleError> {
        let booking = sqlx::query_as::<_, HotelBooking>("SELECT * FROM hotel_bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(ScheduleError::NotFound("Hotel booking"))?;
        Ok(booking)
    }

    /// Inserts the booking and its derived breakfast/reservation rows in one
    /// transaction. Stays recorded after the fact are accepted: only the
    /// horizon bounds the check-in, not "today".
    pub async fn create(
        pool: &PgPool,
        req: &CreateHotelBookingRequest,
    ) -> Result<HotelBooking, ScheduleError> {
        if req.guest_name.trim().is_empty() {
            return Err(ScheduleError::invalid_input("Guest name is required"));
        }
        if req.guest_count < 1 {
            return Err(ScheduleError::invalid_input("Guest count must be at least 1"));
        }
        let check_in = parse_ymd(&req.check_in_date)?;
        let check_out = parse_ymd(&req.check_out_date)?;
        validate_range(check_in, check_out)?;

        let mut tx = pool.begin().await?;
        let booking = sqlx::query_as::<_, HotelBooking>(
            "INSERT INTO hotel_bookings
                 (guest_name, guest_count, check_in_date, check_out_date, notes, is_tour_operator)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(req.guest_name.trim())
        .bind(req.guest_count)
        .bind(check_in)
        .bind(check_out)
        .bind(&req.notes)
        .bind(req.is_tour_operator)
        .fetch_one(&mut *tx)
        .await?;

        insert_derived(&mut tx, &booking, &req.breakfasts, &req.reservations).await?;
        tx.commit().await?;
        Ok(booking)
    }

    /// Partial update of the booking. Submitting a new range or any per-day
    /// inputs replaces every derived row for the stay from the submitted
    /// form, all inside one transaction.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateHotelBookingRequest,
    ) -> Result<HotelBooking, ScheduleError> {
        if let Some(ref name) = req.guest_name {
            if name.trim().is_empty() {
                return Err(ScheduleError::invalid_input("Guest name is required"));
            }
        }
        if req.guest_count.is_some_and(|c| c < 1) {
            return Err(ScheduleError::invalid_input("Guest count must be at least 1"));
        }

        let existing = Self::get(pool, id).await?;
        let check_in = match &req.check_in_date {
            Some(s) => parse_ymd(s)?,
            None => existing.check_in_date,
        };
        let check_out = match &req.check_out_date {
            Some(s) => parse_ymd(s)?,
            None => existing.check_out_date,
        };
        validate_range(check_in, check_out)?;

        let replace_derived = req.check_in_date.is_some()
            || req.check_out_date.is_some()
            || req.breakfasts.is_some()
            || req.reservations.is_some();

        let mut tx = pool.begin().await?;
        let booking = sqlx::query_as::<_, HotelBooking>(
            "UPDATE hotel_bookings
             SET guest_name       = COALESCE($1, guest_name),
                 guest_count      = COALESCE($2, guest_count),
                 check_in_date    = $3,
                 check_out_date   = $4,
                 notes            = COALESCE($5, notes),
                 is_tour_operator = COALESCE($6, is_tour_operator),
                 updated_at       = NOW()
             WHERE id = $7
             RETURNING *",
        )
        .bind(req.guest_name.as_deref().map(str::trim))
        .bind(req.guest_count)
        .bind(check_in)
        .bind(check_out)
        .bind(&req.notes)
        .bind(req.is_tour_operator)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if replace_derived {
            sqlx::query("DELETE FROM breakfast_configurations WHERE hotel_booking_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("DELETE FROM reservations WHERE hotel_booking_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_derived(
                &mut tx,
                &booking,
                req.breakfasts.as_deref().unwrap_or_default(),
                req.reservations.as_deref().unwrap_or_default(),
            )
            .await?;
        }
        tx.commit().await?;
        Ok(booking)
    }

    /// Deletes the booking; foreign keys cascade to its derived rows.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ScheduleError> {
        let result = sqlx::query("DELETE FROM hotel_bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ScheduleError::NotFound("Hotel booking"));
        }
        Ok(())
    }
}

fn validate_range(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), ScheduleError> {
    if check_out <= check_in {
        return Err(ScheduleError::invalid_input("Check-out must be after check-in"));
    }
    if !is_within_horizon(check_in) {
        return Err(ScheduleError::bad_date("Check-in is more than a year ahead"));
    }
    Ok(())
}

/// Inserts the derived breakfast and reservation rows for a stay from the
/// sparse per-day form inputs. Indexes resolve against the stay's own
/// breakfast/reservation day lists; anything out of range aborts the whole
/// transaction.
async fn insert_derived(
    tx: &mut Transaction<'_, Postgres>,
    booking: &HotelBooking,
    breakfasts: &[BreakfastDayInput],
    reservations: &[ReservationDayInput],
) -> Result<(), ScheduleError> {
    for input in breakfasts {
        let date = nth_breakfast_day(booking.check_in_date, booking.check_out_date, input.day_index)?;
        let total = breakdown_total(&input.table_breakdown)?;
        let start_time = parse_opt_time(&input.start_time)?;
        sqlx::query(
            "INSERT INTO breakfast_configurations
                 (hotel_booking_id, breakfast_date, table_breakdown, total_guests, start_time, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (hotel_booking_id, breakfast_date) DO UPDATE SET
                 table_breakdown = EXCLUDED.table_breakdown,
                 total_guests    = EXCLUDED.total_guests,
                 start_time      = EXCLUDED.start_time,
                 notes           = EXCLUDED.notes,
                 updated_at      = NOW()",
        )
        .bind(booking.id)
        .bind(date)
        .bind(&input.table_breakdown)
        .bind(total)
        .bind(start_time)
        .bind(&input.notes)
        .execute(&mut **tx)
        .await?;
    }

    for input in reservations {
        let date =
            nth_reservation_day(booking.check_in_date, booking.check_out_date, input.day_index)?;
        let guest_count = input.guest_count.unwrap_or(booking.guest_count);
        if guest_count < 1 {
            return Err(ScheduleError::invalid_input("Guest count must be at least 1"));
        }
        let start_time = parse_opt_time(&input.start_time)?;
        let end_time = parse_opt_time(&input.end_time)?;
        let day = DayService::upsert_for_date(&mut **tx, date).await?;
        sqlx::query(
            "INSERT INTO reservations
                 (day_id, guest_name, guest_count, start_time, end_time, notes,
                  is_tour_operator, hotel_booking_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(day.id)
        .bind(&booking.guest_name)
        .bind(guest_count)
        .bind(start_time)
        .bind(end_time)
        .bind(&input.notes)
        .bind(booking.is_tour_operator)
        .bind(booking.id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
