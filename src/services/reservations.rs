use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ScheduleError;
use crate::models::reservation::{
    CreateReservationRequest, Reservation, UpdateReservationRequest,
};
use crate::scheduling::dates::{is_past_date, is_within_horizon, parse_ymd};
use crate::services::days::DayService;
use crate::services::hotel_bookings::HotelBookingService;
use crate::services::parse_opt_time;
use crate::services::program_items::ProgramItemService;

pub struct ReservationService;

impl ReservationService {
    pub async fn create(
        pool: &PgPool,
        req: &CreateReservationRequest,
    ) -> Result<Reservation, ScheduleError> {
        if req.guest_name.trim().is_empty() {
            return Err(ScheduleError::invalid_input("Guest name is required"));
        }
        if req.guest_count < 1 {
            return Err(ScheduleError::invalid_input("Guest count must be at least 1"));
        }
        let date = parse_ymd(&req.date)?;
        if is_past_date(date) {
            return Err(ScheduleError::bad_date("Cannot create reservations on a past date"));
        }
        if !is_within_horizon(date) {
            return Err(ScheduleError::bad_date("Date is more than a year ahead"));
        }
        let start_time = parse_opt_time(&req.start_time)?;
        let end_time = parse_opt_time(&req.end_time)?;

        // Dangling links surface as 404 before the insert can hit an FK violation.
        if let Some(item_id) = req.program_item_id {
            ProgramItemService::get(pool, item_id).await?;
        }
        if let Some(booking_id) = req.hotel_booking_id {
            HotelBookingService::get(pool, booking_id).await?;
        }

        let day = DayService::upsert_for_date(pool, date).await?;
        let reservation = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations
                 (day_id, guest_name, guest_count, start_time, end_time, notes,
                  is_tour_operator, program_item_id, table_index, hotel_booking_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(day.id)
        .bind(req.guest_name.trim())
        .bind(req.guest_count)
        .bind(start_time)
        .bind(end_time)
        .bind(&req.notes)
        .bind(req.is_tour_operator)
        .bind(req.program_item_id)
        .bind(req.table_index)
        .bind(req.hotel_booking_id)
        .fetch_one(pool)
        .await?;
        Ok(reservation)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateReservationRequest,
    ) -> Result<Reservation, ScheduleError> {
        if let Some(ref name) = req.guest_name {
            if name.trim().is_empty() {
                return Err(ScheduleError::invalid_input("Guest name is required"));
            }
        }
        if req.guest_count.is_some_and(|c| c < 1) {
            return Err(ScheduleError::invalid_input("Guest count must be at least 1"));
        }
        let start_time = parse_opt_time(&req.start_time)?;
        let end_time = parse_opt_time(&req.end_time)?;
        if let Some(item_id) = req.program_item_id {
            ProgramItemService::get(pool, item_id).await?;
        }

        let reservation = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations
             SET guest_name       = COALESCE($1, guest_name),
                 guest_count      = COALESCE($2, guest_count),
                 start_time       = COALESCE($3, start_time),
                 end_time         = COALESCE($4, end_time),
                 notes            = COALESCE($5, notes),
                 is_tour_operator = COALESCE($6, is_tour_operator),
                 program_item_id  = COALESCE($7, program_item_id),
                 table_index      = COALESCE($8, table_index),
                 updated_at       = NOW()
             WHERE id = $9
             RETURNING *",
        )
        .bind(req.guest_name.as_deref().map(str::trim))
        .bind(req.guest_count)
        .bind(start_time)
        .bind(end_time)
        .bind(&req.notes)
        .bind(req.is_tour_operator)
        .bind(req.program_item_id)
        .bind(req.table_index)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ScheduleError::NotFound("Reservation"))?;
        Ok(reservation)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ScheduleError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ScheduleError::NotFound("Reservation"));
        }
        Ok(())
    }
}
