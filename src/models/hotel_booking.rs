use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A hotel stay. Check-out is always strictly after check-in; the nights
/// slept are check-in up to but not including check-out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelBooking {
    pub id: Uuid,
    pub guest_name: String,
    pub guest_count: i32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub notes: Option<String>,
    pub is_tour_operator: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HotelBooking {
    /// True when the guest sleeps the night starting on `date`. The check-out
    /// date is excluded: the room is free again that night.
    pub fn covers_night(&self, date: NaiveDate) -> bool {
        self.check_in_date <= date && date < self.check_out_date
    }

    /// True when the stay touches `date` at all, check-out day included. The
    /// calendar uses this so the departure morning's breakfast and final-day
    /// reservation appear next to their stay.
    pub fn spans_date(&self, date: NaiveDate) -> bool {
        self.check_in_date <= date && date <= self.check_out_date
    }
}

/// Sparse per-day breakfast input on the stay form, keyed by position in the
/// stay's breakfast-day list (0 = morning after check-in).
#[derive(Debug, Clone, Deserialize)]
pub struct BreakfastDayInput {
    pub day_index: usize,
    pub table_breakdown: Vec<i32>,
    pub start_time: Option<String>,
    pub notes: Option<String>,
}

/// Sparse per-day dinner-reservation input on the stay form, keyed by
/// position in the stay's reservation-day list (0 = check-in day). Guest
/// name and count default to the booking's own.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationDayInput {
    pub day_index: usize,
    pub guest_count: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: Option<String>,
}

/// Body for POST /hotel-bookings: the booking plus its derived per-day rows.
#[derive(Debug, Deserialize)]
pub struct CreateHotelBookingRequest {
    pub guest_name: String,
    pub guest_count: i32,
    pub check_in_date: String,
    pub check_out_date: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_tour_operator: bool,
    #[serde(default)]
    pub breakfasts: Vec<BreakfastDayInput>,
    #[serde(default)]
    pub reservations: Vec<ReservationDayInput>,
}

/// Body for PUT /hotel-bookings/{id}. Submitting a new range or any per-day
/// inputs replaces all derived rows for the stay.
#[derive(Debug, Deserialize)]
pub struct UpdateHotelBookingRequest {
    pub guest_name: Option<String>,
    pub guest_count: Option<i32>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub notes: Option<String>,
    pub is_tour_operator: Option<bool>,
    pub breakfasts: Option<Vec<BreakfastDayInput>>,
    pub reservations: Option<Vec<ReservationDayInput>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(check_in: &str, check_out: &str) -> HotelBooking {
        HotelBooking {
            id: Uuid::new_v4(),
            guest_name: "Test Guest".into(),
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
    fn covers_night_excludes_check_out() {
        let stay = booking("2024-06-10", "2024-06-13");
        assert!(stay.covers_night("2024-06-10".parse().unwrap()));
        assert!(stay.covers_night("2024-06-12".parse().unwrap()));
        assert!(!stay.covers_night("2024-06-13".parse().unwrap()));
        assert!(!stay.covers_night("2024-06-09".parse().unwrap()));
    }

    #[test]
    fn spans_date_includes_both_endpoints() {
        let stay = booking("2024-06-10", "2024-06-13");
        assert!(stay.spans_date("2024-06-10".parse().unwrap()));
        assert!(stay.spans_date("2024-06-13".parse().unwrap()));
        assert!(!stay.spans_date("2024-06-09".parse().unwrap()));
        assert!(!stay.spans_date("2024-06-14".parse().unwrap()));
    }
}
