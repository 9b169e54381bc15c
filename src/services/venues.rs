use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ScheduleError;
use crate::models::venue::{CreateVenueRequest, UpdateVenueRequest, Venue};

pub struct VenueService;

impl VenueService {
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Venue, ScheduleError> {
        let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(ScheduleError::NotFound("Venue"))?;
        Ok(venue)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Venue>, ScheduleError> {
        let venues = sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY name")
            .fetch_all(pool)
            .await?;
        Ok(venues)
    }

    pub async fn create(pool: &PgPool, req: &CreateVenueRequest) -> Result<Venue, ScheduleError> {
        if req.name.trim().is_empty() {
            return Err(ScheduleError::invalid_input("Venue name is required"));
        }
        let venue = sqlx::query_as::<_, Venue>(
            "INSERT INTO venues (name, area) VALUES ($1, $2) RETURNING *",
        )
        .bind(req.name.trim())
        .bind(&req.area)
        .fetch_one(pool)
        .await?;
        Ok(venue)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateVenueRequest,
    ) -> Result<Venue, ScheduleError> {
        if let Some(ref name) = req.name {
            if name.trim().is_empty() {
                return Err(ScheduleError::invalid_input("Venue name is required"));
            }
        }
        let venue = sqlx::query_as::<_, Venue>(
            "UPDATE venues
             SET name       = COALESCE($1, name),
                 area       = COALESCE($2, area),
                 updated_at = NOW()
             WHERE id = $3
             RETURNING *",
        )
        .bind(req.name.as_deref().map(str::trim))
        .bind(&req.area)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ScheduleError::NotFound("Venue"))?;
        Ok(venue)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ScheduleError> {
        let in_use: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM program_items WHERE venue_id = $1",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        if in_use > 0 {
            return Err(ScheduleError::invalid_input(
                "Venue is still used by program items and cannot be deleted",
            ));
        }
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ScheduleError::NotFound("Venue"));
        }
        Ok(())
    }
}
