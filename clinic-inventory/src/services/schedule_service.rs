use diesel::prelude::*;
use uuid::Uuid;

use clinic_shared::clients::db::DbPool;
use clinic_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{schedule_status, NewSchedule, Schedule, ScheduleChanges};
use crate::schema::schedules;

/// List all schedules, ordered by title ascending.
pub fn list_schedules(pool: &DbPool) -> AppResult<Vec<Schedule>> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let items = schedules::table
        .order(schedules::title.asc())
        .load::<Schedule>(&mut conn)?;

    Ok(items)
}

pub fn create_schedule(
    pool: &DbPool,
    title: &str,
    doctor: &str,
    day: &str,
    start_time: &str,
    end_time: &str,
) -> AppResult<Schedule> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let new_schedule = NewSchedule {
        title: title.to_string(),
        doctor: doctor.to_string(),
        day: day.to_string(),
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        status: schedule_status::ACTIVE.to_string(),
    };

    let schedule = diesel::insert_into(schedules::table)
        .values(&new_schedule)
        .get_result::<Schedule>(&mut conn)?;

    tracing::debug!(schedule_id = %schedule.id, title = %schedule.title, "schedule created");

    Ok(schedule)
}

/// Apply a partial update. Returns the updated row together with whether
/// its status changed.
pub fn update_schedule(
    pool: &DbPool,
    id: Uuid,
    mut changes: ScheduleChanges,
) -> AppResult<(Schedule, bool)> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let original: Schedule = schedules::table
        .filter(schedules::id.eq(id))
        .first(&mut conn)
        .map_err(|_| AppError::new(ErrorCode::ScheduleNotFound, "schedule not found"))?;

    changes.updated_at = Some(chrono::Utc::now());

    let updated = diesel::update(schedules::table.filter(schedules::id.eq(id)))
        .set(&changes)
        .get_result::<Schedule>(&mut conn)?;

    let status_changed = updated.status != original.status;

    Ok((updated, status_changed))
}

/// Delete a schedule. Idempotent: a missing id returns `None`.
pub fn delete_schedule(pool: &DbPool, id: Uuid) -> AppResult<Option<Schedule>> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let existing: Option<Schedule> = schedules::table
        .filter(schedules::id.eq(id))
        .first(&mut conn)
        .optional()?;

    let Some(schedule) = existing else {
        return Ok(None);
    };

    diesel::delete(schedules::table.filter(schedules::id.eq(id))).execute(&mut conn)?;

    tracing::debug!(schedule_id = %id, "schedule deleted");

    Ok(Some(schedule))
}
