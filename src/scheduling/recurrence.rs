use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Recurrence step for a program-item series. Stored as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl FromStr for Frequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(ScheduleError::invalid_input(format!(
                "Unknown recurrence frequency: {other}"
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expands a recurring series into its occurrence dates: strictly increasing,
/// starting at `start`, none past `horizon_end` (inclusive).
///
/// Each step is computed from the current occurrence, not the original start.
/// Monthly and yearly steps clamp to the last valid day of the target month,
/// so a series started on the 31st drifts to the 29th/28th after a short month
/// and stays there.
pub fn expand_occurrences(
    start: NaiveDate,
    frequency: Frequency,
    horizon_end: NaiveDate,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= horizon_end {
        dates.push(current);
        match next_occurrence(current, frequency) {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

fn next_occurrence(current: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Weekly => current.checked_add_days(Days::new(7)),
        Frequency::Biweekly => current.checked_add_days(Days::new(14)),
        Frequency::Monthly => current.checked_add_months(Months::new(1)),
        Frequency::Yearly => current.checked_add_months(Months::new(12)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::dates::{add_days, parse_ymd, HORIZON_DAYS};

    fn d(s: &str) -> NaiveDate {
        parse_ymd(s).unwrap()
    }

    #[test]
    fn frequency_parses_lowercase_names() {
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!("biweekly".parse::<Frequency>().unwrap(), Frequency::Biweekly);
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("yearly".parse::<Frequency>().unwrap(), Frequency::Yearly);
        assert!("daily".parse::<Frequency>().is_err());
        assert!("Weekly".parse::<Frequency>().is_err());
    }

    #[test]
    fn weekly_series_over_a_full_year_has_53_occurrences() {
        let start = d("2024-01-01");
        let dates = expand_occurrences(start, Frequency::Weekly, add_days(start, HORIZON_DAYS));
        assert_eq!(dates.len(), 53);
        assert_eq!(dates[0], start);
        assert_eq!(*dates.last().unwrap(), d("2024-12-30"));
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::Duration::days(7));
        }
    }

    #[test]
    fn biweekly_steps_fourteen_days() {
        let dates = expand_occurrences(d("2024-06-01"), Frequency::Biweekly, d("2024-07-31"));
        assert_eq!(
            dates,
            vec![d("2024-06-01"), d("2024-06-15"), d("2024-06-29"), d("2024-07-13"), d("2024-07-27")]
        );
    }

    #[test]
    fn monthly_clamps_to_last_day_and_steps_from_current() {
        let dates = expand_occurrences(d("2024-01-31"), Frequency::Monthly, d("2024-04-30"));
        // Feb clamps 31 -> 29 (leap year); later steps keep the drifted day.
        assert_eq!(
            dates,
            vec![d("2024-01-31"), d("2024-02-29"), d("2024-03-29"), d("2024-04-29")]
        );
    }

    #[test]
    fn monthly_without_clamping_keeps_the_day_of_month() {
        let dates = expand_occurrences(d("2024-01-15"), Frequency::Monthly, d("2024-04-30"));
        assert_eq!(
            dates,
            vec![d("2024-01-15"), d("2024-02-15"), d("2024-03-15"), d("2024-04-15")]
        );
    }

    #[test]
    fn yearly_clamps_leap_day() {
        let dates = expand_occurrences(d("2024-02-29"), Frequency::Yearly, d("2025-12-31"));
        assert_eq!(dates, vec![d("2024-02-29"), d("2025-02-28")]);
    }

    #[test]
    fn candidate_past_horizon_is_excluded() {
        let dates = expand_occurrences(d("2024-06-01"), Frequency::Yearly, d("2025-05-31"));
        assert_eq!(dates, vec![d("2024-06-01")]);
    }

    #[test]
    fn start_equal_to_horizon_yields_single_occurrence() {
        let start = d("2024-06-01");
        assert_eq!(expand_occurrences(start, Frequency::Weekly, start), vec![start]);
    }

    #[test]
    fn start_past_horizon_yields_nothing() {
        assert!(expand_occurrences(d("2024-06-02"), Frequency::Weekly, d("2024-06-01")).is_empty());
    }

    #[test]
    fn output_is_strictly_increasing_for_every_frequency() {
        let start = d("2024-01-31");
        let horizon = add_days(start, HORIZON_DAYS);
        for frequency in [Frequency::Weekly, Frequency::Biweekly, Frequency::Monthly, Frequency::Yearly] {
            let dates = expand_occurrences(start, frequency, horizon);
            assert_eq!(dates[0], start);
            assert!(dates.windows(2).all(|pair| pair[0] < pair[1]), "{frequency} not increasing");
            assert!(dates.iter().all(|date| *date <= horizon));
        }
    }
}
