use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::ScheduleError;
use crate::models::day::Day;
use crate::scheduling::dates::weekday_name;

pub struct DayService;

impl DayService {
    /// Insert-or-fetch the Day row for a date. The no-op conflict update makes
    /// RETURNING yield the existing row, so every caller gets the same id for
    /// the same date. Generic over the executor so it runs inside callers'
    /// transactions.
    pub async fn upsert_for_date<'e, E>(executor: E, date: NaiveDate) -> Result<Day, ScheduleError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let day = sqlx::query_as::<_, Day>(
            "INSERT INTO days (date, weekday)
             VALUES ($1, $2)
             ON CONFLICT (date) DO UPDATE SET weekday = EXCLUDED.weekday
             RETURNING *",
        )
        .bind(date)
        .bind(weekday_name(date))
        .fetch_one(executor)
        .await?;
        Ok(day)
    }

    pub async fn list_range(
        pool: &PgPool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Day>, ScheduleError> {
        let days = sqlx::query_as::<_, Day>(
            "SELECT * FROM days WHERE date BETWEEN $1 AND $2 ORDER BY date",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
        Ok(days)
    }
}
