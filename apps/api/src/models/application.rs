//! Row type for persisted applications as read back by the admin surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted application. Written once by the public intake surface and
/// never mutated by this service; the admin surface is read-only.
///
/// `equipment_exposure` exists in older rows only — nothing in this service
/// writes it, but the detail view surfaces it when present.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub store_id: Option<Uuid>,
    pub location_flexibility: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub positions: Vec<Uuid>,
    pub start_date: Option<String>,
    pub desired_pay: Option<String>,
    pub available_days: Vec<String>,
    pub reliable_transportation: bool,
    pub work_experience: Option<String>,
    pub mechanical_experience: Option<String>,
    pub equipment_exposure: Option<Vec<String>>,
    pub equipment_repair: Option<Vec<String>>,
    pub equipment_operated: Option<Vec<String>>,
    pub diagnostic_ability: Option<String>,
    pub hydraulics_comfort: Option<String>,
    pub equipment_care: Option<String>,
    pub customer_facing: Option<String>,
    pub drug_test_consent: bool,
    pub license_type: Option<String>,
    pub trailer_experience: Option<Vec<String>>,
    pub license_state: Option<String>,
    pub moving_violations: Option<String>,
    pub dui_dwi: Option<String>,
    pub license_suspended: Option<String>,
    pub can_be_insured: Option<String>,
    pub driving_notes: Option<String>,
    pub computer_skills: Option<Vec<String>>,
    pub computer_skill_level: Option<String>,
    pub systems_used: Option<Vec<String>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
