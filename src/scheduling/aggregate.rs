use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::breakfast::BreakfastDetail;
use crate::models::day::Day;
use crate::models::hotel_booking::HotelBooking;
use crate::models::program_item::ProgramItemDetail;
use crate::models::reservation::ReservationDetail;
use crate::scheduling::dates::add_days;

/// Everything the board shows for one date.
///
/// `day` is `None` for dates that only appear because a hotel stay spans
/// them; the Day row is created lazily when something is scheduled directly
/// on the date.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DayData {
    pub day: Option<Day>,
    pub golf_items: Vec<ProgramItemDetail>,
    pub events: Vec<ProgramItemDetail>,
    pub reservations: Vec<ReservationDetail>,
    pub breakfasts: Vec<BreakfastDetail>,
    pub hotel_stays: Vec<HotelBooking>,
    pub has_activity: bool,
}

impl DayData {
    /// A bare Day row is not activity; only scheduled content counts.
    fn compute_activity(&self) -> bool {
        !(self.golf_items.is_empty()
            && self.events.is_empty()
            && self.reservations.is_empty()
            && self.breakfasts.is_empty()
            && self.hotel_stays.is_empty())
    }
}

/// Assembles the calendar window from fetched rows. Pure: same rows in, same
/// map out; the route re-fetches on every call instead of patching a cache.
///
/// Program items split into golf and event buckets. Bookings are fanned out
/// over every date they span inside the window (check-out day included, so
/// the departure breakfast sits next to its stay), synthesizing entries for
/// dates that have no Day row yet. Rows outside the window are ignored.
pub fn build_day_data(
    start: NaiveDate,
    end: NaiveDate,
    days: Vec<Day>,
    items: Vec<ProgramItemDetail>,
    reservations: Vec<ReservationDetail>,
    breakfasts: Vec<BreakfastDetail>,
    bookings: Vec<HotelBooking>,
) -> BTreeMap<NaiveDate, DayData> {
    let mut map: BTreeMap<NaiveDate, DayData> = BTreeMap::new();

    for day in days {
        if day.date < start || day.date > end {
            continue;
        }
        let date = day.date;
        map.entry(date).or_default().day = Some(day);
    }

    for item in items {
        if item.date < start || item.date > end {
            continue;
        }
        let entry = map.entry(item.date).or_default();
        if item.item_type == "golf" {
            entry.golf_items.push(item);
        } else {
            entry.events.push(item);
        }
    }

    for reservation in reservations {
        if reservation.date < start || reservation.date > end {
            continue;
        }
        map.entry(reservation.date).or_default().reservations.push(reservation);
    }

    for breakfast in breakfasts {
        if breakfast.breakfast_date < start || breakfast.breakfast_date > end {
            continue;
        }
        map.entry(breakfast.breakfast_date)
            .or_default()
            .breakfasts
            .push(breakfast);
    }

    for booking in bookings {
        let mut date = booking.check_in_date.max(start);
        while date <= end && booking.spans_date(date) {
            map.entry(date).or_default().hotel_stays.push(booking.clone());
            date = add_days(date, 1);
        }
    }

    for data in map.values_mut() {
        data.has_activity = data.compute_activity();
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::dates::{parse_ymd, weekday_name};
    use chrono::Utc;
    use uuid::Uuid;

    fn d(s: &str) -> NaiveDate {
        parse_ymd(s).unwrap()
    }

    fn day_row(date: NaiveDate) -> Day {
        Day {
            id: Uuid::new_v4(),
            date,
            weekday: weekday_name(date),
            created_at: Utc::now(),
        }
    }

    fn item(date: NaiveDate, item_type: &str, title: &str) -> ProgramItemDetail {
        ProgramItemDetail {
            id: Uuid::new_v4(),
            day_id: Uuid::new_v4(),
            date,
            item_type: item_type.into(),
            title: Some(title.into()),
            description: None,
            confirmed_count: Some(12),
            capacity: Some(16),
            venue_id: None,
            venue_name: Some("Royal Links".into()),
            contact_id: None,
            contact_name: None,
            start_time: None,
            end_time: None,
            notes: None,
            is_tour_operator: false,
            is_recurring: false,
            recurrence_frequency: None,
            recurrence_group_id: None,
        }
    }

    fn reservation(date: NaiveDate, guest_name: &str) -> ReservationDetail {
        ReservationDetail {
            id: Uuid::new_v4(),
            day_id: Uuid::new_v4(),
            date,
            guest_name: guest_name.into(),
            guest_count: 4,
            start_time: None,
            end_time: None,
            notes: None,
            is_tour_operator: false,
            program_item_id: None,
            program_item_title: None,
            table_index: None,
            hotel_booking_id: None,
        }
    }

    fn breakfast(date: NaiveDate, booking_id: Uuid) -> BreakfastDetail {
        BreakfastDetail {
            id: Uuid::new_v4(),
            hotel_booking_id: booking_id,
            breakfast_date: date,
            table_breakdown: vec![2, 2],
            total_guests: 4,
            start_time: None,
            notes: None,
            guest_name: "Stay Guest".into(),
            is_tour_operator: false,
        }
    }

    fn booking(check_in: &str, check_out: &str) -> HotelBooking {
        HotelBooking {
            id: Uuid::new_v4(),
            guest_name: "Stay Guest".into(),
            guest_count: 4,
            check_in_date: d(check_in),
            check_out_date: d(check_out),
            notes: None,
            is_tour_operator: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn buckets_items_by_type() {
        let date = d("2024-06-10");
        let map = build_day_data(
            d("2024-06-01"),
            d("2024-06-30"),
            vec![day_row(date)],
            vec![item(date, "golf", "Morning round"), item(date, "event", "Welcome dinner")],
            vec![reservation(date, "Walk-in")],
            vec![],
            vec![],
        );
        let data = &map[&date];
        assert_eq!(data.golf_items.len(), 1);
        assert_eq!(data.events.len(), 1);
        assert_eq!(data.reservations.len(), 1);
        assert!(data.day.is_some());
        assert!(data.has_activity);
    }

    #[test]
    fn booking_fans_out_over_every_spanned_date() {
        let stay = booking("2024-06-10", "2024-06-13");
        let map = build_day_data(
            d("2024-06-01"),
            d("2024-06-30"),
            vec![],
            vec![],
            vec![],
            vec![],
            vec![stay.clone()],
        );
        assert_eq!(map.len(), 4);
        for offset in 0..4 {
            let date = add_days(d("2024-06-10"), offset);
            let data = &map[&date];
            assert!(data.day.is_none());
            assert_eq!(data.hotel_stays.len(), 1);
            assert_eq!(data.hotel_stays[0].id, stay.id);
            assert!(data.has_activity);
        }
    }

    #[test]
    fn booking_is_clamped_to_the_window() {
        let map = build_day_data(
            d("2024-06-12"),
            d("2024-06-14"),
            vec![],
            vec![],
            vec![],
            vec![],
            vec![booking("2024-06-10", "2024-06-13")],
        );
        assert_eq!(
            map.keys().copied().collect::<Vec<_>>(),
            vec![d("2024-06-12"), d("2024-06-13")]
        );
    }

    #[test]
    fn breakfasts_attach_by_breakfast_date() {
        let stay = booking("2024-06-10", "2024-06-12");
        let map = build_day_data(
            d("2024-06-01"),
            d("2024-06-30"),
            vec![],
            vec![],
            vec![],
            vec![breakfast(d("2024-06-11"), stay.id), breakfast(d("2024-06-12"), stay.id)],
            vec![stay],
        );
        assert_eq!(map[&d("2024-06-11")].breakfasts.len(), 1);
        assert_eq!(map[&d("2024-06-12")].breakfasts.len(), 1);
        assert!(map[&d("2024-06-10")].breakfasts.is_empty());
    }

    #[test]
    fn bare_day_row_has_no_activity() {
        let date = d("2024-06-10");
        let map = build_day_data(
            d("2024-06-01"),
            d("2024-06-30"),
            vec![day_row(date)],
            vec![],
            vec![],
            vec![],
            vec![],
        );
        assert!(!map[&date].has_activity);
    }

    #[test]
    fn day_rows_key_the_map_by_their_own_date() {
        let first = day_row(d("2024-06-10"));
        let second = day_row(d("2024-06-11"));
        let map = build_day_data(
            d("2024-06-01"),
            d("2024-06-30"),
            vec![first.clone(), second.clone()],
            vec![],
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(map.len(), 2);
        assert_eq!(map[&first.date].day.as_ref().map(|day| day.id), Some(first.id));
        assert_eq!(map[&second.date].day.as_ref().map(|day| day.id), Some(second.id));
    }

    #[test]
    fn rows_outside_the_window_are_ignored() {
        let map = build_day_data(
            d("2024-06-01"),
            d("2024-06-30"),
            vec![day_row(d("2024-05-31")), day_row(d("2024-07-01"))],
            vec![item(d("2024-05-01"), "golf", "Stale")],
            vec![reservation(d("2024-07-02"), "Late")],
            vec![],
            vec![],
        );
        assert!(map.is_empty());
    }

    #[test]
    fn same_rows_produce_the_same_map() {
        let date = d("2024-06-10");
        let stay = booking("2024-06-10", "2024-06-12");
        let days = vec![day_row(date)];
        let items = vec![item(date, "golf", "Round")];
        let reservations = vec![reservation(date, "De Groote")];
        let breakfasts = vec![breakfast(d("2024-06-11"), stay.id)];
        let bookings = vec![stay];
        let build = || {
            build_day_data(
                d("2024-06-01"),
                d("2024-06-30"),
                days.clone(),
                items.clone(),
                reservations.clone(),
                breakfasts.clone(),
                bookings.clone(),
            )
        };
        let first = serde_json::to_value(build()).unwrap();
        let second = serde_json::to_value(build()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn map_serializes_keyed_by_wall_date() {
        let date = d("2024-06-10");
        let map = build_day_data(
            d("2024-06-01"),
            d("2024-06-30"),
            vec![day_row(date)],
            vec![item(date, "golf", "Round")],
            vec![],
            vec![],
            vec![],
        );
        let value = serde_json::to_value(&map).unwrap();
        assert!(value.get("2024-06-10").is_some());
        assert_eq!(value["2024-06-10"]["has_activity"], serde_json::Value::Bool(true));
    }
}
