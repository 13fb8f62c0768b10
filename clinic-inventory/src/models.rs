use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::{medicines, schedules};

/// Stock level below which a medicine counts as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 15;

pub mod medicine_status {
    pub const AVAILABLE: &str = "available";
    pub const LOW_STOCK: &str = "low_stock";
    pub const OUT_OF_STOCK: &str = "out_of_stock";
}

pub mod schedule_status {
    pub const ACTIVE: &str = "active";
    pub const CANCELLED: &str = "cancelled";
}

/// Derive a medicine's stock status from its quantity.
pub fn status_for_quantity(quantity: i32) -> &'static str {
    if quantity <= 0 {
        medicine_status::OUT_OF_STOCK
    } else if quantity <= LOW_STOCK_THRESHOLD {
        medicine_status::LOW_STOCK
    } else {
        medicine_status::AVAILABLE
    }
}

#[derive(Debug, Queryable, Identifiable, Serialize)]
#[diesel(table_name = medicines)]
pub struct Medicine {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = medicines)]
pub struct NewMedicine {
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub status: String,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = medicines)]
pub struct MedicineChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub status: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Queryable, Identifiable, Serialize)]
#[diesel(table_name = schedules)]
pub struct Schedule {
    pub id: Uuid,
    pub title: String,
    pub doctor: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = schedules)]
pub struct NewSchedule {
    pub title: String,
    pub doctor: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = schedules)]
pub struct ScheduleChanges {
    pub title: Option<String>,
    pub doctor: Option<String>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantity_is_out_of_stock() {
        assert_eq!(status_for_quantity(0), medicine_status::OUT_OF_STOCK);
        assert_eq!(status_for_quantity(-1), medicine_status::OUT_OF_STOCK);
    }

    #[test]
    fn threshold_is_low_stock() {
        assert_eq!(status_for_quantity(1), medicine_status::LOW_STOCK);
        assert_eq!(status_for_quantity(LOW_STOCK_THRESHOLD), medicine_status::LOW_STOCK);
    }

    #[test]
    fn above_threshold_is_available() {
        assert_eq!(status_for_quantity(LOW_STOCK_THRESHOLD + 1), medicine_status::AVAILABLE);
        assert_eq!(status_for_quantity(500), medicine_status::AVAILABLE);
    }
}
