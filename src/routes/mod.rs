use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

use crate::error::ScheduleError;

pub mod auth;
pub mod breakfasts;
pub mod calendar;
pub mod contacts;
pub mod health;
pub mod hotel_bookings;
pub mod metrics;
pub mod program_items;
pub mod reservations;
pub mod venues;

/// Map a service error to the `{ "ok": false, "error": ... }` envelope.
/// Validation problems are 400, missing rows 404, store failures 500.
pub(crate) fn error_response(e: ScheduleError) -> (StatusCode, Json<Value>) {
    let status = match &e {
        ScheduleError::InvalidDateFormat(_)
        | ScheduleError::InvalidInput(_)
        | ScheduleError::PastOrOutOfHorizon(_) => StatusCode::BAD_REQUEST,
        ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
        ScheduleError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "ok": false, "error": e.to_string() })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        let (status, _) = error_response(ScheduleError::invalid_input("Guest name is required"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) =
            error_response(ScheduleError::InvalidDateFormat("2024-13-01".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = error_response(ScheduleError::bad_date("Date is more than a year ahead"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_rows_map_to_404_with_envelope() {
        let (status, Json(body)) = error_response(ScheduleError::NotFound("Program item"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Program item not found");
    }

    #[test]
    fn dangling_link_lookups_read_as_404_sentences() {
        let (status, Json(body)) = error_response(ScheduleError::NotFound("Venue"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Venue not found");
        let (_, Json(body)) = error_response(ScheduleError::NotFound("Contact"));
        assert_eq!(body["error"], "Contact not found");
    }
}
