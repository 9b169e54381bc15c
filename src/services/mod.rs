use chrono::NaiveTime;

use crate::error::ScheduleError;
use crate::scheduling::dates::parse_hm;

pub mod auth;
pub mod breakfast;
pub mod contacts;
pub mod day_data;
pub mod days;
pub mod hotel_bookings;
pub mod metrics;
pub mod program_items;
pub mod reservations;
pub mod venues;

pub(crate) fn parse_opt_time(value: &Option<String>) -> Result<Option<NaiveTime>, ScheduleError> {
    value.as_deref().map(parse_hm).transpose()
}
