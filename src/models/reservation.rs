use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A restaurant reservation attached to one Day. May be linked to a program
/// item (with a table assignment) or to the hotel stay it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub day_id: Uuid,
    pub guest_name: String,
    pub guest_count: i32,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub is_tour_operator: bool,
    pub program_item_id: Option<Uuid>,
    pub table_index: Option<i32>,
    pub hotel_booking_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reservation joined to its day's date and linked program item title.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReservationDetail {
    pub id: Uuid,
    pub day_id: Uuid,
    pub date: NaiveDate,
    pub guest_name: String,
    pub guest_count: i32,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub is_tour_operator: bool,
    pub program_item_id: Option<Uuid>,
    pub program_item_title: Option<String>,
    pub table_index: Option<i32>,
    pub hotel_booking_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub date: String,
    pub guest_name: String,
    pub guest_count: i32,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_tour_operator: bool,
    pub program_item_id: Option<Uuid>,
    pub table_index: Option<i32>,
    pub hotel_booking_id: Option<Uuid>,
}

/// Body for PUT /reservations/{id}. The reservation stays on its day; moving
/// it means delete and recreate.
#[derive(Debug, Deserialize)]
pub struct UpdateReservationRequest {
    pub guest_name: Option<String>,
    pub guest_count: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: Option<String>,
    pub is_tour_operator: Option<bool>,
    pub program_item_id: Option<Uuid>,
    pub table_index: Option<i32>,
}
