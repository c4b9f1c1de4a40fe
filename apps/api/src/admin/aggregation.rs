//! Admin record aggregation: loads persisted applications with the full
//! reference sets, resolves foreign keys to display labels, classifies
//! statuses into the badge taxonomy, and projects summary/detail views.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::models::application::ApplicationRow;
use crate::models::reference::{PositionRow, StoreRow};

/// Badge styling taxonomy for application statuses. The classification is
/// exhaustive: any status outside the three known ones falls to `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBadge {
    Warning,
    Info,
    Success,
    Neutral,
}

impl StatusBadge {
    pub fn classify(status: &str) -> Self {
        match status {
            "pending" => StatusBadge::Warning,
            "reviewed" => StatusBadge::Info,
            "accepted" => StatusBadge::Success,
            _ => StatusBadge::Neutral,
        }
    }
}

/// Single-selection expand toggle: selecting a new record collapses the
/// previous one; selecting the expanded record collapses it.
pub fn toggle_expand(current: Option<Uuid>, id: Uuid) -> Option<Uuid> {
    if current == Some(id) {
        None
    } else {
        Some(id)
    }
}

/// Everything the dashboard joins against: all applications newest-first
/// plus the full (unfiltered) store and position sets.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub applications: Vec<ApplicationRow>,
    pub stores: Vec<StoreRow>,
    pub positions: Vec<PositionRow>,
}

impl Dashboard {
    /// Loads the dashboard data. The three fetches run concurrently and
    /// degrade independently: a failed fetch logs and leaves its slot empty
    /// rather than failing the load.
    pub async fn load(pool: &PgPool) -> Self {
        let (applications, reference) = tokio::join!(
            sqlx::query_as::<_, ApplicationRow>(
                "SELECT * FROM applications ORDER BY created_at DESC",
            )
            .fetch_all(pool),
            crate::reference::load_admin_reference(pool),
        );

        let applications = match applications {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Failed to load applications: {e}");
                Vec::new()
            }
        };

        Dashboard {
            applications,
            stores: reference.stores,
            positions: reference.positions,
        }
    }

    /// Resolves a store reference to its display name. An absent reference
    /// (no store preference) shows "N/A"; an id that no longer resolves
    /// shows "Unknown".
    pub fn store_name(&self, store_id: Option<Uuid>) -> String {
        match store_id {
            None => "N/A".to_string(),
            Some(id) => self
                .stores
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    /// Resolves position ids to a joined title list. Unresolved ids are
    /// silently dropped; an empty result shows "N/A".
    pub fn position_titles(&self, position_ids: &[Uuid]) -> String {
        let titles: Vec<&str> = position_ids
            .iter()
            .filter_map(|id| self.positions.iter().find(|p| p.id == *id))
            .map(|p| p.title.as_str())
            .collect();
        if titles.is_empty() {
            "N/A".to_string()
        } else {
            titles.join(", ")
        }
    }

    pub fn summaries(&self) -> Vec<ApplicationSummary> {
        self.applications
            .iter()
            .map(ApplicationSummary::from_row)
            .collect()
    }

    pub fn detail(&self, id: Uuid) -> Option<ApplicationDetail> {
        self.applications
            .iter()
            .find(|a| a.id == id)
            .map(|row| ApplicationDetail::project(self, row))
    }
}

/// The collapsed card shown for every record.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub status: String,
    pub badge: StatusBadge,
    pub applied_at: DateTime<Utc>,
}

impl ApplicationSummary {
    fn from_row(row: &ApplicationRow) -> Self {
        ApplicationSummary {
            id: row.id,
            name: format!("{} {}", row.first_name, row.last_name),
            email: row.email.clone(),
            phone: row.phone.clone(),
            location: format!(
                "{}, {} {}",
                row.city.as_deref().unwrap_or(""),
                row.state.as_deref().unwrap_or(""),
                row.zip_code.as_deref().unwrap_or(""),
            )
            .trim()
            .trim_matches(',')
            .trim()
            .to_string(),
            status: row.status.clone(),
            badge: StatusBadge::classify(&row.status),
            applied_at: row.created_at,
        }
    }
}

/// The expanded detail view: resolved labels, normalized display values, and
/// the conditionally-present skill/experience groups (emitted only when the
/// record actually answered them).
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetail {
    pub id: Uuid,
    pub store: String,
    pub positions: String,
    pub location_flexibility: Option<String>,
    pub start_date: String,
    pub desired_pay: String,
    pub available_days: String,
    pub reliable_transportation: &'static str,
    pub drug_test_consent: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computer_skill_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanical_experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_exposure: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_repair: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_operated: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_ability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydraulics_comfort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_care: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_facing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_experience: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_violations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dui_dwi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_suspended: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_be_insured: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computer_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systems_used: Option<Vec<String>>,
}

impl ApplicationDetail {
    fn project(dashboard: &Dashboard, row: &ApplicationRow) -> Self {
        ApplicationDetail {
            id: row.id,
            store: dashboard.store_name(row.store_id),
            positions: dashboard.position_titles(&row.positions),
            location_flexibility: row.location_flexibility.clone(),
            start_date: or_na(row.start_date.as_deref()),
            desired_pay: or_na(row.desired_pay.as_deref()),
            available_days: join_or_na(&row.available_days),
            reliable_transportation: yes_no(row.reliable_transportation),
            drug_test_consent: yes_no(row.drug_test_consent),
            license_type: row.license_type.clone(),
            computer_skill_level: row.computer_skill_level.clone(),
            work_experience: row.work_experience.clone(),
            mechanical_experience: row.mechanical_experience.clone(),
            equipment_exposure: nonempty(row.equipment_exposure.clone()),
            equipment_repair: nonempty(row.equipment_repair.clone()),
            equipment_operated: nonempty(row.equipment_operated.clone()),
            diagnostic_ability: row.diagnostic_ability.clone(),
            hydraulics_comfort: row.hydraulics_comfort.clone(),
            equipment_care: row.equipment_care.clone(),
            customer_facing: row.customer_facing.clone(),
            trailer_experience: nonempty(row.trailer_experience.clone()),
            license_state: row.license_state.clone(),
            moving_violations: row.moving_violations.clone(),
            dui_dwi: row.dui_dwi.clone(),
            license_suspended: row.license_suspended.clone(),
            can_be_insured: row.can_be_insured.clone(),
            driving_notes: row.driving_notes.clone(),
            computer_skills: nonempty(row.computer_skills.clone()),
            systems_used: nonempty(row.systems_used.clone()),
        }
    }
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        "N/A".to_string()
    } else {
        values.join(", ")
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// An empty list reads the same as an unanswered group.
fn nonempty(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn store(name: &str) -> StoreRow {
        StoreRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: "100 Main St".to_string(),
            city: "Nashville".to_string(),
            state: "TN".to_string(),
            zip: "37201".to_string(),
            phone: "(615) 555-0100".to_string(),
            email: "store@example.com".to_string(),
            is_active: true,
            display_order: 1,
            created_at: Utc::now(),
        }
    }

    fn position(title: &str) -> PositionRow {
        PositionRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            category: "operations".to_string(),
            is_active: true,
            display_order: 1,
            created_at: Utc::now(),
        }
    }

    fn application(status: &str) -> ApplicationRow {
        ApplicationRow {
            id: Uuid::new_v4(),
            store_id: None,
            location_flexibility: None,
            first_name: "Sam".to_string(),
            last_name: "Rivers".to_string(),
            email: "sam@example.com".to_string(),
            phone: "(615) 555-1234".to_string(),
            city: Some("Franklin".to_string()),
            state: Some("TN".to_string()),
            zip_code: Some("37064".to_string()),
            positions: vec![],
            start_date: None,
            desired_pay: None,
            available_days: vec![],
            reliable_transportation: true,
            work_experience: None,
            mechanical_experience: None,
            equipment_exposure: None,
            equipment_repair: None,
            equipment_operated: None,
            diagnostic_ability: None,
            hydraulics_comfort: None,
            equipment_care: None,
            customer_facing: None,
            drug_test_consent: true,
            license_type: None,
            trailer_experience: None,
            license_state: None,
            moving_violations: Some("0".to_string()),
            dui_dwi: Some("no".to_string()),
            license_suspended: Some("no".to_string()),
            can_be_insured: None,
            driving_notes: None,
            computer_skills: None,
            computer_skill_level: None,
            systems_used: None,
            status: status.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard {
            applications: vec![],
            stores: vec![store("Downtown"), store("Eastside")],
            positions: vec![position("Counter Sales"), position("Yard Crew")],
        }
    }

    #[test]
    fn test_store_name_resolves_known_id() {
        let d = dashboard();
        let id = d.stores[0].id;
        assert_eq!(d.store_name(Some(id)), "Downtown");
    }

    #[test]
    fn test_store_name_unknown_id() {
        let d = dashboard();
        assert_eq!(d.store_name(Some(Uuid::new_v4())), "Unknown");
    }

    #[test]
    fn test_store_name_absent_id() {
        let d = dashboard();
        assert_eq!(d.store_name(None), "N/A");
    }

    #[test]
    fn test_position_titles_joins_resolved() {
        let d = dashboard();
        let ids = [d.positions[0].id, d.positions[1].id];
        assert_eq!(d.position_titles(&ids), "Counter Sales, Yard Crew");
    }

    #[test]
    fn test_position_titles_drops_unresolved() {
        let d = dashboard();
        let ids = [d.positions[1].id, Uuid::new_v4()];
        assert_eq!(d.position_titles(&ids), "Yard Crew");
    }

    #[test]
    fn test_position_titles_empty_is_na() {
        let d = dashboard();
        assert_eq!(d.position_titles(&[]), "N/A");
        assert_eq!(d.position_titles(&[Uuid::new_v4()]), "N/A");
    }

    #[test]
    fn test_badge_classification() {
        assert_eq!(StatusBadge::classify("pending"), StatusBadge::Warning);
        assert_eq!(StatusBadge::classify("reviewed"), StatusBadge::Info);
        assert_eq!(StatusBadge::classify("accepted"), StatusBadge::Success);
        assert_eq!(StatusBadge::classify("rejected"), StatusBadge::Neutral);
        assert_eq!(StatusBadge::classify(""), StatusBadge::Neutral);
    }

    #[test]
    fn test_toggle_expand_single_selection() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let state = toggle_expand(None, a);
        assert_eq!(state, Some(a));
        // Expanding B collapses A.
        let state = toggle_expand(state, b);
        assert_eq!(state, Some(b));
        // Toggling the expanded record collapses it.
        let state = toggle_expand(state, b);
        assert_eq!(state, None);
    }

    #[test]
    fn test_summary_projection() {
        let mut d = dashboard();
        d.applications.push(application("pending"));
        let summaries = d.summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Sam Rivers");
        assert_eq!(summaries[0].location, "Franklin, TN 37064");
        assert_eq!(summaries[0].badge, StatusBadge::Warning);
    }

    #[test]
    fn test_detail_normalizes_missing_values() {
        let mut d = dashboard();
        d.applications.push(application("pending"));
        let id = d.applications[0].id;
        let detail = d.detail(id).unwrap();
        assert_eq!(detail.store, "N/A");
        assert_eq!(detail.positions, "N/A");
        assert_eq!(detail.start_date, "N/A");
        assert_eq!(detail.desired_pay, "N/A");
        assert_eq!(detail.available_days, "N/A");
        assert_eq!(detail.reliable_transportation, "Yes");
        assert_eq!(detail.drug_test_consent, "Yes");
    }

    #[test]
    fn test_detail_resolves_references() {
        let mut d = dashboard();
        let mut app = application("reviewed");
        app.store_id = Some(d.stores[1].id);
        app.positions = vec![d.positions[0].id];
        app.available_days = vec!["Monday".to_string(), "Tuesday".to_string()];
        let id = app.id;
        d.applications.push(app);

        let detail = d.detail(id).unwrap();
        assert_eq!(detail.store, "Eastside");
        assert_eq!(detail.positions, "Counter Sales");
        assert_eq!(detail.available_days, "Monday, Tuesday");
    }

    #[test]
    fn test_detail_omits_unanswered_groups() {
        let mut d = dashboard();
        let mut app = application("pending");
        app.computer_skills = Some(vec![]);
        let id = app.id;
        d.applications.push(app);

        let detail = d.detail(id).unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("work_experience").is_none());
        assert!(json.get("license_type").is_none());
        // An empty answered list reads the same as unanswered.
        assert!(json.get("computer_skills").is_none());
    }

    #[test]
    fn test_detail_surfaces_legacy_equipment_exposure() {
        let mut d = dashboard();
        let mut app = application("pending");
        app.equipment_exposure = Some(vec!["skid_steers".to_string()]);
        let id = app.id;
        d.applications.push(app);

        let detail = d.detail(id).unwrap();
        assert_eq!(
            detail.equipment_exposure,
            Some(vec!["skid_steers".to_string()])
        );
    }

    #[test]
    fn test_detail_unknown_id() {
        let d = dashboard();
        assert!(d.detail(Uuid::new_v4()).is_none());
    }
}
