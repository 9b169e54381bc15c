use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One calendar date on the board. Rows are created lazily the first time
/// something is scheduled on the date and are only removed by the retention
/// purge, never through the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Day {
    pub id: Uuid,
    pub date: NaiveDate,
    pub weekday: String,
    pub created_at: DateTime<Utc>,
}
