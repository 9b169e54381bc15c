use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The two kinds of program item the board distinguishes.
pub const ITEM_TYPES: &[&str] = &["golf", "event"];

/// A scheduled golf round or hospitality event attached to one Day.
///
/// Occurrences of the same recurring series share a `recurrence_group_id`;
/// rows imported from before group ids existed may carry `is_recurring`
/// without one and are matched heuristically instead.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgramItem {
    pub id: Uuid,
    pub day_id: Uuid,
    pub item_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub confirmed_count: Option<i32>,
    pub capacity: Option<i32>,
    pub venue_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub is_tour_operator: bool,
    pub is_recurring: bool,
    pub recurrence_frequency: Option<String>,
    pub recurrence_group_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Program item joined to its day's date and its venue/contact display names,
/// as the calendar consumes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgramItemDetail {
    pub id: Uuid,
    pub day_id: Uuid,
    pub date: NaiveDate,
    pub item_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub confirmed_count: Option<i32>,
    pub capacity: Option<i32>,
    pub venue_id: Option<Uuid>,
    pub venue_name: Option<String>,
    pub contact_id: Option<Uuid>,
    pub contact_name: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub is_tour_operator: bool,
    pub is_recurring: bool,
    pub recurrence_frequency: Option<String>,
    pub recurrence_group_id: Option<Uuid>,
}

/// Body for POST /program-items. Dates and times arrive as form strings and
/// are validated server-side.
#[derive(Debug, Deserialize)]
pub struct CreateProgramItemRequest {
    pub date: String,
    pub item_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub confirmed_count: Option<i32>,
    pub capacity: Option<i32>,
    pub venue_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_tour_operator: bool,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence_frequency: Option<String>,
}

/// Body for PUT /program-items/{id}. The item's date and recurrence
/// attributes are fixed at creation and cannot be changed here; set
/// `apply_to_series` to push the field changes to every sibling occurrence.
#[derive(Debug, Deserialize)]
pub struct UpdateProgramItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub confirmed_count: Option<i32>,
    pub capacity: Option<i32>,
    pub venue_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: Option<String>,
    pub is_tour_operator: Option<bool>,
    #[serde(default)]
    pub apply_to_series: bool,
}

/// Query params for DELETE /program-items/{id}.
#[derive(Debug, Deserialize)]
pub struct DeleteItemQuery {
    /// When true, delete every occurrence of the item's series.
    #[serde(default)]
    pub series: bool,
}

/// Outcome of one recurring-creation call: how many occurrences were actually
/// inserted, under which group id, and the dates they landed on. Returned as
/// a value so callers can refresh exactly the affected dates.
#[derive(Debug, Clone, Serialize)]
pub struct RecurringCreated {
    pub count: usize,
    pub group_id: Uuid,
    pub dates: Vec<NaiveDate>,
    pub items: Vec<ProgramItem>,
}

/// What one create call produced.
#[derive(Debug)]
pub enum CreatedProgramItems {
    Single(ProgramItem),
    Recurring(RecurringCreated),
}

/// Response for GET /program-items/{id}/occurrences.
#[derive(Debug, Clone, Serialize)]
pub struct OccurrenceInfo {
    pub other_occurrences: i64,
    pub recurrence_group_id: Option<Uuid>,
    pub recurrence_frequency: Option<String>,
}
