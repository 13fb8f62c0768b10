use diesel::prelude::*;
use uuid::Uuid;

use clinic_shared::clients::db::DbPool;
use clinic_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{status_for_quantity, Medicine, MedicineChanges, NewMedicine};
use crate::schema::medicines;

/// List all medicines, ordered by name ascending.
pub fn list_medicines(pool: &DbPool) -> AppResult<Vec<Medicine>> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let items = medicines::table
        .order(medicines::name.asc())
        .load::<Medicine>(&mut conn)?;

    Ok(items)
}

/// Create a medicine. Stock status is derived from the quantity.
pub fn create_medicine(
    pool: &DbPool,
    name: &str,
    category: &str,
    quantity: i32,
) -> AppResult<Medicine> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let new_medicine = NewMedicine {
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        status: status_for_quantity(quantity).to_string(),
    };

    let medicine = diesel::insert_into(medicines::table)
        .values(&new_medicine)
        .get_result::<Medicine>(&mut conn)?;

    tracing::debug!(medicine_id = %medicine.id, name = %medicine.name, "medicine created");

    Ok(medicine)
}

/// Apply a partial update. Returns the updated row together with whether
/// its stock status changed (the caller publishes an event only then).
pub fn update_medicine(
    pool: &DbPool,
    id: Uuid,
    mut changes: MedicineChanges,
) -> AppResult<(Medicine, bool)> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let original: Medicine = medicines::table
        .filter(medicines::id.eq(id))
        .first(&mut conn)
        .map_err(|_| AppError::new(ErrorCode::MedicineNotFound, "medicine not found"))?;

    if let Some(quantity) = changes.quantity {
        changes.status = Some(status_for_quantity(quantity).to_string());
    }
    changes.updated_at = Some(chrono::Utc::now());

    let updated = diesel::update(medicines::table.filter(medicines::id.eq(id)))
        .set(&changes)
        .get_result::<Medicine>(&mut conn)?;

    let status_changed = updated.status != original.status;

    Ok((updated, status_changed))
}

/// Delete a medicine. Idempotent: a missing id is not an error, the
/// returned row is `None` and no event should be published.
pub fn delete_medicine(pool: &DbPool, id: Uuid) -> AppResult<Option<Medicine>> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!(error = %e, "failed to get db connection");
        AppError::internal("database connection error")
    })?;

    let existing: Option<Medicine> = medicines::table
        .filter(medicines::id.eq(id))
        .first(&mut conn)
        .optional()?;

    let Some(medicine) = existing else {
        return Ok(None);
    };

    diesel::delete(medicines::table.filter(medicines::id.eq(id))).execute(&mut conn)?;

    tracing::debug!(medicine_id = %id, "medicine deleted");

    Ok(Some(medicine))
}
