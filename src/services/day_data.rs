use std::collections::BTreeMap;

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::ScheduleError;
use crate::models::breakfast::BreakfastDetail;
use crate::models::hotel_booking::HotelBooking;
use crate::models::program_item::ProgramItemDetail;
use crate::models::reservation::ReservationDetail;
use crate::scheduling::aggregate::{build_day_data, DayData};
use crate::services::days::DayService;

pub struct DayDataService;

impl DayDataService {
    /// Fetches everything the calendar needs for a date window and assembles
    /// it into the per-date map. Five plain reads, no isolation from
    /// concurrent writes; the caller re-fetches rather than patching.
    pub async fn fetch_range(
        pool: &PgPool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, DayData>, ScheduleError> {
        if start > end {
            return Err(ScheduleError::invalid_input("Start date must not be after end date"));
        }

        let days = DayService::list_range(pool, start, end).await?;

        let items = sqlx::query_as::<_, ProgramItemDetail>(
            "SELECT pi.id, pi.day_id, d.date, pi.item_type, pi.title, pi.description,
                    pi.confirmed_count, pi.capacity,
                    pi.venue_id, v.name AS venue_name,
                    pi.contact_id, c.name AS contact_name,
                    pi.start_time, pi.end_time, pi.notes, pi.is_tour_operator,
                    pi.is_recurring, pi.recurrence_frequency, pi.recurrence_group_id
             FROM program_items pi
             JOIN days d ON d.id = pi.day_id
             LEFT JOIN venues v ON v.id = pi.venue_id
             LEFT JOIN contacts c ON c.id = pi.contact_id
             WHERE d.date BETWEEN $1 AND $2
             ORDER BY d.date, pi.start_time",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        let reservations = sqlx::query_as::<_, ReservationDetail>(
            "SELECT r.id, r.day_id, d.date, r.guest_name, r.guest_count,
                    r.start_time, r.end_time, r.notes, r.is_tour_operator,
                    r.program_item_id, pi.title AS program_item_title,
                    r.table_index, r.hotel_booking_id
             FROM reservations r
             JOIN days d ON d.id = r.day_id
             LEFT JOIN program_items pi ON pi.id = r.program_item_id
             WHERE d.date BETWEEN $1 AND $2
             ORDER BY d.date, r.start_time",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        let breakfasts = sqlx::query_as::<_, BreakfastDetail>(
            "SELECT b.id, b.hotel_booking_id, b.breakfast_date, b.table_breakdown,
                    b.total_guests, b.start_time, b.notes,
                    hb.guest_name, hb.is_tour_operator
             FROM breakfast_configurations b
             JOIN hotel_bookings hb ON hb.id = b.hotel_booking_id
             WHERE b.breakfast_date BETWEEN $1 AND $2
             ORDER BY b.breakfast_date, b.start_time",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        let bookings = sqlx::query_as::<_, HotelBooking>(
            "SELECT * FROM hotel_bookings
             WHERE check_in_date <= $2 AND check_out_date >= $1
             ORDER BY check_in_date",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(build_day_data(start, end, days, items, reservations, breakfasts, bookings))
    }
}
