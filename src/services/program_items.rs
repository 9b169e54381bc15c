use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::error::ScheduleError;
use crate::models::program_item::{
    CreateProgramItemRequest, CreatedProgramItems, OccurrenceInfo, ProgramItem, RecurringCreated,
    UpdateProgramItemRequest, ITEM_TYPES,
};
use crate::scheduling::dates::{add_days, is_past_date, is_within_horizon, parse_ymd, HORIZON_DAYS};
use crate::scheduling::recurrence::{expand_occurrences, Frequency};
use crate::services::contacts::ContactService;
use crate::services::days::DayService;
use crate::services::parse_opt_time;
use crate::services::venues::VenueService;

pub struct ProgramItemService;

impl ProgramItemService {
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<ProgramItem, ScheduleError> {
        let item = sqlx::query_as::<_, ProgramItem>("SELECT * FROM program_items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(ScheduleError::NotFound("Program item"))?;
        Ok(item)
    }

    /// Creates one item, or the whole series when the form marks it recurring.
    ///
    /// Recurring creation expands the occurrence dates over a one-year
    /// horizon and inserts each occurrence in its own transaction. A failed
    /// occurrence is logged and skipped while the batch continues; the
    /// returned count and date list reflect what actually landed.
    pub async fn create(
        pool: &PgPool,
        req: &CreateProgramItemRequest,
    ) -> Result<CreatedProgramItems, ScheduleError> {
        let date = parse_ymd(&req.date)?;
        if is_past_date(date) {
            return Err(ScheduleError::bad_date(
                "Cannot schedule program items on a past date",
            ));
        }
        if !is_within_horizon(date) {
            return Err(ScheduleError::bad_date("Date is more than a year ahead"));
        }
        if !ITEM_TYPES.contains(&req.item_type.as_str()) {
            return Err(ScheduleError::invalid_input(format!(
                "Unknown program item type: {}",
                req.item_type
            )));
        }
        let start_time = parse_opt_time(&req.start_time)?;
        let end_time = parse_opt_time(&req.end_time)?;
        validate_counts(req.confirmed_count, req.capacity)?;

        // Dangling links surface as 404 before any insert can hit an FK violation.
        if let Some(venue_id) = req.venue_id {
            VenueService::get(pool, venue_id).await?;
        }
        if let Some(contact_id) = req.contact_id {
            ContactService::get(pool, contact_id).await?;
        }

        if !req.is_recurring {
            let day = DayService::upsert_for_date(pool, date).await?;
            let item = insert_item(pool, day.id, req, start_time, end_time, None).await?;
            return Ok(CreatedProgramItems::Single(item));
        }

        let frequency: Frequency = req
            .recurrence_frequency
            .as_deref()
            .ok_or_else(|| {
                ScheduleError::invalid_input("Recurrence frequency is required for recurring items")
            })?
            .parse()?;
        let occurrences = expand_occurrences(date, frequency, add_days(date, HORIZON_DAYS));
        let group_id = Uuid::new_v4();

        let mut items = Vec::with_capacity(occurrences.len());
        let mut dates = Vec::with_capacity(occurrences.len());
        for occurrence in occurrences {
            match insert_occurrence(pool, occurrence, req, start_time, end_time, frequency, group_id)
                .await
            {
                Ok(item) => {
                    dates.push(occurrence);
                    items.push(item);
                }
                Err(e) => {
                    crate::services::metrics::OCCURRENCES_SKIPPED_COUNTER.inc();
                    warn!(date = %occurrence, error = %e, "skipping recurrence occurrence");
                }
            }
        }

        Ok(CreatedProgramItems::Recurring(RecurringCreated {
            count: items.len(),
            group_id,
            dates,
            items,
        }))
    }

    /// Partial update of one item, or of its whole series when the form opts
    /// in. Dates and recurrence attributes are never touched here.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateProgramItemRequest,
    ) -> Result<Vec<ProgramItem>, ScheduleError> {
        let start_time = parse_opt_time(&req.start_time)?;
        let end_time = parse_opt_time(&req.end_time)?;
        validate_counts(req.confirmed_count, req.capacity)?;
        if let Some(venue_id) = req.venue_id {
            VenueService::get(pool, venue_id).await?;
        }
        if let Some(contact_id) = req.contact_id {
            ContactService::get(pool, contact_id).await?;
        }

        let item = Self::get(pool, id).await?;

        if !req.apply_to_series {
            let updated = sqlx::query_as::<_, ProgramItem>(
                "UPDATE program_items
                 SET title            = COALESCE($1, title),
                     description      = COALESCE($2, description),
                     confirmed_count  = COALESCE($3, confirmed_count),
                     capacity         = COALESCE($4, capacity),
                     venue_id         = COALESCE($5, venue_id),
                     contact_id       = COALESCE($6, contact_id),
                     start_time       = COALESCE($7, start_time),
                     end_time         = COALESCE($8, end_time),
                     notes            = COALESCE($9, notes),
                     is_tour_operator = COALESCE($10, is_tour_operator),
                     updated_at       = NOW()
                 WHERE id = $11
                 RETURNING *",
            )
            .bind(&req.title)
            .bind(&req.description)
            .bind(req.confirmed_count)
            .bind(req.capacity)
            .bind(req.venue_id)
            .bind(req.contact_id)
            .bind(start_time)
            .bind(end_time)
            .bind(&req.notes)
            .bind(req.is_tour_operator)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(ScheduleError::NotFound("Program item"))?;
            return Ok(vec![updated]);
        }

        let siblings = Self::find_series(pool, &item).await?;
        let ids: Vec<Uuid> = if siblings.is_empty() {
            vec![item.id]
        } else {
            siblings.iter().map(|s| s.id).collect()
        };
        let updated = sqlx::query_as::<_, ProgramItem>(
            "UPDATE program_items
             SET title            = COALESCE($1, title),
                 description      = COALESCE($2, description),
                 confirmed_count  = COALESCE($3, confirmed_count),
                 capacity         = COALESCE($4, capacity),
                 venue_id         = COALESCE($5, venue_id),
                 contact_id       = COALESCE($6, contact_id),
                 start_time       = COALESCE($7, start_time),
                 end_time         = COALESCE($8, end_time),
                 notes            = COALESCE($9, notes),
                 is_tour_operator = COALESCE($10, is_tour_operator),
                 updated_at       = NOW()
             WHERE id = ANY($11)
             RETURNING *",
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.confirmed_count)
        .bind(req.capacity)
        .bind(req.venue_id)
        .bind(req.contact_id)
        .bind(start_time)
        .bind(end_time)
        .bind(&req.notes)
        .bind(req.is_tour_operator)
        .bind(&ids)
        .fetch_all(pool)
        .await?;
        Ok(updated)
    }

    /// Deletes one occurrence, or the whole series when `series` is set.
    /// Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: Uuid, series: bool) -> Result<u64, ScheduleError> {
        let item = Self::get(pool, id).await?;

        if !series || !item.is_recurring {
            let result = sqlx::query("DELETE FROM program_items WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
            return Ok(result.rows_affected());
        }

        if let Some(group_id) = item.recurrence_group_id {
            let result = sqlx::query(
                "DELETE FROM program_items WHERE recurrence_group_id = $1 AND item_type = $2",
            )
            .bind(group_id)
            .bind(&item.item_type)
            .execute(pool)
            .await?;
            return Ok(result.rows_affected());
        }

        let siblings = Self::find_series(pool, &item).await?;
        let ids: Vec<Uuid> = siblings.iter().map(|s| s.id).collect();
        let result = sqlx::query("DELETE FROM program_items WHERE id = ANY($1)")
            .bind(&ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// All occurrences of the series the item belongs to, itself included,
    /// in date order. Empty for non-recurring items.
    ///
    /// Rows created since group ids were introduced match on the shared
    /// group id. Legacy rows without one fall back to the old heuristic:
    /// same type, recurring, same frequency, and same title when the item
    /// has one.
    pub async fn find_series(
        pool: &PgPool,
        item: &ProgramItem,
    ) -> Result<Vec<ProgramItem>, ScheduleError> {
        if !item.is_recurring {
            return Ok(Vec::new());
        }

        if let Some(group_id) = item.recurrence_group_id {
            let siblings = sqlx::query_as::<_, ProgramItem>(
                "SELECT pi.* FROM program_items pi
                 JOIN days d ON d.id = pi.day_id
                 WHERE pi.recurrence_group_id = $1 AND pi.item_type = $2
                 ORDER BY d.date",
            )
            .bind(group_id)
            .bind(&item.item_type)
            .fetch_all(pool)
            .await?;
            return Ok(siblings);
        }

        let siblings = if let Some(ref title) = item.title {
            sqlx::query_as::<_, ProgramItem>(
                "SELECT pi.* FROM program_items pi
                 JOIN days d ON d.id = pi.day_id
                 WHERE pi.recurrence_group_id IS NULL
                   AND pi.is_recurring = TRUE
                   AND pi.item_type = $1
                   AND pi.recurrence_frequency IS NOT DISTINCT FROM $2
                   AND pi.title = $3
                 ORDER BY d.date",
            )
            .bind(&item.item_type)
            .bind(&item.recurrence_frequency)
            .bind(title)
            .fetch_all(pool)
            .await?
        } else {
            sqlx::query_as::<_, ProgramItem>(
                "SELECT pi.* FROM program_items pi
                 JOIN days d ON d.id = pi.day_id
                 WHERE pi.recurrence_group_id IS NULL
                   AND pi.is_recurring = TRUE
                   AND pi.item_type = $1
                   AND pi.recurrence_frequency IS NOT DISTINCT FROM $2
                 ORDER BY d.date",
            )
            .bind(&item.item_type)
            .bind(&item.recurrence_frequency)
            .fetch_all(pool)
            .await?
        };
        Ok(siblings)
    }

    /// How many sibling occurrences the item has besides itself, plus the
    /// series attributes the detail panel shows.
    pub async fn count_other_occurrences(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<OccurrenceInfo, ScheduleError> {
        let item = Self::get(pool, id).await?;
        let siblings = Self::find_series(pool, &item).await?;
        let other_occurrences = siblings.iter().filter(|s| s.id != item.id).count() as i64;
        Ok(OccurrenceInfo {
            other_occurrences,
            recurrence_group_id: item.recurrence_group_id,
            recurrence_frequency: item.recurrence_frequency,
        })
    }
}

fn validate_counts(confirmed: Option<i32>, capacity: Option<i32>) -> Result<(), ScheduleError> {
    if confirmed.is_some_and(|c| c < 0) {
        return Err(ScheduleError::invalid_input("Confirmed count cannot be negative"));
    }
    if capacity.is_some_and(|c| c < 0) {
        return Err(ScheduleError::invalid_input("Capacity cannot be negative"));
    }
    Ok(())
}

async fn insert_occurrence(
    pool: &PgPool,
    date: NaiveDate,
    req: &CreateProgramItemRequest,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    frequency: Frequency,
    group_id: Uuid,
) -> Result<ProgramItem, ScheduleError> {
    let mut tx = pool.begin().await?;
    let day = DayService::upsert_for_date(&mut *tx, date).await?;
    let item = insert_item(&mut *tx, day.id, req, start_time, end_time, Some((frequency, group_id))).await?;
    tx.commit().await?;
    Ok(item)
}

async fn insert_item<'e, E>(
    executor: E,
    day_id: Uuid,
    req: &CreateProgramItemRequest,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    recurring: Option<(Frequency, Uuid)>,
) -> Result<ProgramItem, ScheduleError>
where
    E: sqlx::PgExecutor<'e>,
{
    let (frequency, group_id) = match recurring {
        Some((f, g)) => (Some(f.as_str()), Some(g)),
        None => (None, None),
    };
    let item = sqlx::query_as::<_, ProgramItem>(
        "INSERT INTO program_items
             (day_id, item_type, title, description, confirmed_count, capacity,
              venue_id, contact_id, start_time, end_time, notes, is_tour_operator,
              is_recurring, recurrence_frequency, recurrence_group_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
         RETURNING *",
    )
    .bind(day_id)
    .bind(&req.item_type)
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.confirmed_count)
    .bind(req.capacity)
    .bind(req.venue_id)
    .bind(req.contact_id)
    .bind(start_time)
    .bind(end_time)
    .bind(&req.notes)
    .bind(req.is_tour_operator)
    .bind(recurring.is_some())
    .bind(frequency)
    .bind(group_id)
    .fetch_one(executor)
    .await?;
    Ok(item)
}
