use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ScheduleError;
use crate::models::contact::{Contact, CreateContactRequest, UpdateContactRequest};

pub struct ContactService;

impl ContactService {
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Contact, ScheduleError> {
        let contact = sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(ScheduleError::NotFound("Contact"))?;
        Ok(contact)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Contact>, ScheduleError> {
        let contacts = sqlx::query_as::<_, Contact>("SELECT * FROM contacts ORDER BY name")
            .fetch_all(pool)
            .await?;
        Ok(contacts)
    }

    pub async fn create(pool: &PgPool, req: &CreateContactRequest) -> Result<Contact, ScheduleError> {
        if req.name.trim().is_empty() {
            return Err(ScheduleError::invalid_input("Contact name is required"));
        }
        let contact = sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (name, phone, email) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(req.name.trim())
        .bind(&req.phone)
        .bind(&req.email)
        .fetch_one(pool)
        .await?;
        Ok(contact)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateContactRequest,
    ) -> Result<Contact, ScheduleError> {
        if let Some(ref name) = req.name {
            if name.trim().is_empty() {
                return Err(ScheduleError::invalid_input("Contact name is required"));
            }
        }
        let contact = sqlx::query_as::<_, Contact>(
            "UPDATE contacts
             SET name       = COALESCE($1, name),
                 phone      = COALESCE($2, phone),
                 email      = COALESCE($3, email),
                 updated_at = NOW()
             WHERE id = $4
             RETURNING *",
        )
        .bind(req.name.as_deref().map(str::trim))
        .bind(&req.phone)
        .bind(&req.email)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ScheduleError::NotFound("Contact"))?;
        Ok(contact)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ScheduleError> {
        let in_use: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM program_items WHERE contact_id = $1",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        if in_use > 0 {
            return Err(ScheduleError::invalid_input(
                "Contact is still used by program items and cannot be deleted",
            ));
        }
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ScheduleError::NotFound("Contact"));
        }
        Ok(())
    }
}
