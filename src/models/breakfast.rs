use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Breakfast service for one stay on one morning. `table_breakdown` lists the
/// party size seated at each table; `total_guests` is always the server-side
/// sum of it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BreakfastConfiguration {
    pub id: Uuid,
    pub hotel_booking_id: Uuid,
    pub breakfast_date: NaiveDate,
    pub table_breakdown: Vec<i32>,
    pub total_guests: i32,
    pub start_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Breakfast joined to its booking's guest fields, as the calendar shows it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BreakfastDetail {
    pub id: Uuid,
    pub hotel_booking_id: Uuid,
    pub breakfast_date: NaiveDate,
    pub table_breakdown: Vec<i32>,
    pub total_guests: i32,
    pub start_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub guest_name: String,
    pub is_tour_operator: bool,
}

/// Body for POST /breakfasts (adding one morning to an existing stay).
#[derive(Debug, Deserialize)]
pub struct CreateBreakfastRequest {
    pub hotel_booking_id: Uuid,
    pub breakfast_date: String,
    pub table_breakdown: Vec<i32>,
    pub start_time: Option<String>,
    pub notes: Option<String>,
}

/// Body for PUT /breakfasts/{id}. A new date must still fall inside the
/// owning stay's breakfast window.
#[derive(Debug, Deserialize)]
pub struct UpdateBreakfastRequest {
    pub breakfast_date: Option<String>,
    pub table_breakdown: Option<Vec<i32>>,
    pub start_time: Option<String>,
    pub notes: Option<String>,
}
