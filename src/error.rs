use thiserror::Error;

/// Errors surfaced by the scheduling core and the services built on it.
///
/// Every variant renders to a sentence the UI shows verbatim, so messages
/// are written for guests-and-staff readers, not for logs.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    PastOrOutOfHorizon(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl ScheduleError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn bad_date(msg: impl Into<String>) -> Self {
        Self::PastOrOutOfHorizon(msg.into())
    }
}
