//! Row types for the read-only reference tables backing the form's option
//! lists: store locations, open positions, and weekly store hours.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoreRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PositionRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

/// One row per weekday. Closed days are still displayed by the form but are
/// not selectable as an available day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoreHourRow {
    pub id: Uuid,
    pub day_of_week: String,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub is_closed: bool,
    pub day_order: i32,
    pub created_at: DateTime<Utc>,
}
