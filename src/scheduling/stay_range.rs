use chrono::NaiveDate;

use crate::error::ScheduleError;
use crate::scheduling::dates::add_days;

/// Breakfast mornings for a stay: every day after the arrival night through
/// check-out. The check-in morning itself never gets one.
pub fn breakfast_days(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    date_span(add_days(check_in, 1), check_out)
}

/// Dinner-reservation days for a stay: check-in through check-out inclusive.
pub fn reservation_days(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    date_span(check_in, check_out)
}

/// Resolves a sparse per-day breakfast input to its wall-date. Inputs are
/// keyed by position in the stay's breakfast list.
pub fn nth_breakfast_day(
    check_in: NaiveDate,
    check_out: NaiveDate,
    index: usize,
) -> Result<NaiveDate, ScheduleError> {
    breakfast_days(check_in, check_out)
        .get(index)
        .copied()
        .ok_or_else(|| {
            ScheduleError::invalid_input(format!("Breakfast day {index} is outside the stay"))
        })
}

/// Resolves a sparse per-day reservation input to its wall-date.
pub fn nth_reservation_day(
    check_in: NaiveDate,
    check_out: NaiveDate,
    index: usize,
) -> Result<NaiveDate, ScheduleError> {
    reservation_days(check_in, check_out)
        .get(index)
        .copied()
        .ok_or_else(|| {
            ScheduleError::invalid_input(format!("Reservation day {index} is outside the stay"))
        })
}

fn date_span(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = from;
    while current <= to {
        days.push(current);
        current = add_days(current, 1);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::dates::parse_ymd;

    fn d(s: &str) -> NaiveDate {
        parse_ymd(s).unwrap()
    }

    #[test]
    fn three_night_stay() {
        let (check_in, check_out) = (d("2024-06-10"), d("2024-06-13"));
        assert_eq!(
            breakfast_days(check_in, check_out),
            vec![d("2024-06-11"), d("2024-06-12"), d("2024-06-13")]
        );
        assert_eq!(
            reservation_days(check_in, check_out),
            vec![d("2024-06-10"), d("2024-06-11"), d("2024-06-12"), d("2024-06-13")]
        );
    }

    #[test]
    fn one_night_stay_has_a_single_breakfast() {
        let (check_in, check_out) = (d("2024-06-10"), d("2024-06-11"));
        assert_eq!(breakfast_days(check_in, check_out), vec![d("2024-06-11")]);
        assert_eq!(
            reservation_days(check_in, check_out),
            vec![d("2024-06-10"), d("2024-06-11")]
        );
    }

    #[test]
    fn degenerate_ranges_yield_no_breakfasts() {
        let day = d("2024-06-10");
        assert!(breakfast_days(day, day).is_empty());
        assert_eq!(reservation_days(day, day), vec![day]);
        assert!(breakfast_days(day, d("2024-06-09")).is_empty());
        assert!(reservation_days(day, d("2024-06-09")).is_empty());
    }

    #[test]
    fn stay_crossing_a_month_boundary() {
        let days = reservation_days(d("2024-06-29"), d("2024-07-02"));
        assert_eq!(
            days,
            vec![d("2024-06-29"), d("2024-06-30"), d("2024-07-01"), d("2024-07-02")]
        );
    }

    #[test]
    fn nth_day_resolution_and_bounds() {
        let (check_in, check_out) = (d("2024-06-10"), d("2024-06-13"));
        assert_eq!(nth_breakfast_day(check_in, check_out, 0).unwrap(), d("2024-06-11"));
        assert_eq!(nth_breakfast_day(check_in, check_out, 2).unwrap(), d("2024-06-13"));
        assert!(nth_breakfast_day(check_in, check_out, 3).is_err());
        assert_eq!(nth_reservation_day(check_in, check_out, 0).unwrap(), d("2024-06-10"));
        assert_eq!(nth_reservation_day(check_in, check_out, 3).unwrap(), d("2024-06-13"));
        assert!(nth_reservation_day(check_in, check_out, 4).is_err());
    }
}
