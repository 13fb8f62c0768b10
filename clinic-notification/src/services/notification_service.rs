use diesel::prelude::*;
use uuid::Uuid;

use clinic_shared::clients::db::DbPool;
use clinic_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{NewNotification, Notification};
use crate::schema::notifications;

/// Create a notification. `owner_id = None` broadcasts to all users.
pub fn create_notification(
    pool: &DbPool,
    title: &str,
    message: &str,
    owner_id: Option<Uuid>,
) -> AppResult<Notification> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".into()));
    }

    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let new_notification = NewNotification {
        title: title.to_string(),
        message: message.to_string(),
        owner_id,
    };

    let notification = diesel::insert_into(notifications::table)
        .values(&new_notification)
        .get_result::<Notification>(&mut conn)?;

    tracing::debug!(
        notification_id = %notification.id,
        broadcast = notification.owner_id.is_none(),
        "notification created"
    );

    Ok(notification)
}

/// List notifications visible to a user (broadcast or owned), most recent
/// first. With `include_read = false` only unread rows are returned.
pub fn list_for_user(
    pool: &DbPool,
    user_id: Uuid,
    include_read: bool,
) -> AppResult<Vec<Notification>> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let visible = notifications::owner_id
        .is_null()
        .or(notifications::owner_id.eq(user_id));

    let items = if include_read {
        notifications::table
            .filter(visible)
            .order(notifications::created_at.desc())
            .load::<Notification>(&mut conn)?
    } else {
        notifications::table
            .filter(visible)
            .filter(notifications::is_read.eq(false))
            .order(notifications::created_at.desc())
            .load::<Notification>(&mut conn)?
    };

    Ok(items)
}

/// Count unread notifications visible to a user. Always equals
/// `list_for_user(user_id, false).len()`.
pub fn count_unread(pool: &DbPool, user_id: Uuid) -> AppResult<i64> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let count: i64 = notifications::table
        .filter(
            notifications::owner_id
                .is_null()
                .or(notifications::owner_id.eq(user_id)),
        )
        .filter(notifications::is_read.eq(false))
        .count()
        .get_result(&mut conn)?;

    Ok(count)
}

/// Mark a single notification as read, constrained to rows visible to the
/// user. Idempotent: a second call returns the row unchanged. Note that a
/// broadcast row is shared, so this marks it read for everyone.
pub fn mark_read(pool: &DbPool, notification_id: Uuid, user_id: Uuid) -> AppResult<Notification> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let notification = diesel::update(
        notifications::table
            .filter(notifications::id.eq(notification_id))
            .filter(
                notifications::owner_id
                    .is_null()
                    .or(notifications::owner_id.eq(user_id)),
            ),
    )
    .set(notifications::is_read.eq(true))
    .get_result::<Notification>(&mut conn)
    .map_err(|e| match e {
        diesel::result::Error::NotFound => {
            AppError::new(ErrorCode::NotificationNotFound, "notification not found")
        }
        other => AppError::Database(other),
    })?;

    Ok(notification)
}

/// Mark every unread notification visible to the user as read, as one
/// statement. Returns rows affected; success is the store's indicator for
/// the whole batch.
pub fn mark_all_read(pool: &DbPool, user_id: Uuid) -> AppResult<usize> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let updated = diesel::update(
        notifications::table
            .filter(
                notifications::owner_id
                    .is_null()
                    .or(notifications::owner_id.eq(user_id)),
            )
            .filter(notifications::is_read.eq(false)),
    )
    .set(notifications::is_read.eq(true))
    .execute(&mut conn)?;

    Ok(updated)
}

/// Delete a notification unconditionally (admin surface; visibility is not
/// re-checked). Idempotent: a missing id is not an error.
pub fn delete_notification(pool: &DbPool, notification_id: Uuid) -> AppResult<()> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let removed =
        diesel::delete(notifications::table.filter(notifications::id.eq(notification_id)))
            .execute(&mut conn)?;

    tracing::debug!(notification_id = %notification_id, removed, "notification delete");

    Ok(())
}
