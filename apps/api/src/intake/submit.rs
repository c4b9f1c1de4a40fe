//! Submission pipeline — transforms a finished draft into the persisted
//! write record and issues the single insert.
//!
//! Required-field gating happens at the form level (the handler); this
//! pipeline does not re-validate. Its one transform is typing the wire
//! values: the `"any"` store sentinel becomes an absent store reference and
//! empty scalars become NULL.

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::draft::{ApplicationDraft, StoreChoice};

/// The write contract for the `applications` table: every column present,
/// nullable where the draft left it empty. `status`, timestamps, and the row
/// id are owned by the persistence service.
#[derive(Debug, Clone, Serialize)]
pub struct NewApplication {
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
    pub equipment_repair: Vec<String>,
    pub equipment_operated: Vec<String>,
    pub diagnostic_ability: Option<String>,
    pub hydraulics_comfort: Option<String>,
    pub equipment_care: Option<String>,
    pub customer_facing: Option<String>,
    pub drug_test_consent: bool,
    pub license_type: Option<String>,
    pub trailer_experience: Vec<String>,
    pub license_state: Option<String>,
    pub moving_violations: Option<String>,
    pub dui_dwi: Option<String>,
    pub license_suspended: Option<String>,
    pub can_be_insured: Option<String>,
    pub driving_notes: Option<String>,
    pub computer_skills: Vec<String>,
    pub computer_skill_level: Option<String>,
    pub systems_used: Vec<String>,
}

/// Builds the persisted record from a draft. Pure: the draft is read, never
/// mutated, so a failed submission can retry with the same draft.
///
/// `StoreChoice::Any` (the UI's "Any Store Available" option) and `Unset`
/// both persist as an absent store reference — the literal sentinel token
/// never reaches storage.
pub fn build_record(draft: &ApplicationDraft) -> Result<NewApplication, AppError> {
    let store_id = match draft.store_choice {
        StoreChoice::Store(id) => Some(id),
        StoreChoice::Any | StoreChoice::Unset => None,
    };

    let positions = draft
        .positions
        .iter()
        .map(|p| {
            p.parse::<Uuid>()
                .map_err(|_| AppError::Validation(format!("Invalid position id: {p}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewApplication {
        store_id,
        location_flexibility: opt(&draft.location_flexibility),
        first_name: draft.first_name.clone(),
        last_name: draft.last_name.clone(),
        email: draft.email.clone(),
        phone: draft.phone.clone(),
        city: opt(&draft.city),
        state: opt(&draft.state),
        zip_code: opt(&draft.zip_code),
        positions,
        start_date: opt(&draft.start_date),
        desired_pay: opt(&draft.desired_pay),
        available_days: draft.available_days.clone(),
        reliable_transportation: draft.reliable_transportation,
        work_experience: opt(&draft.work_experience),
        mechanical_experience: opt(&draft.mechanical_experience),
        equipment_repair: draft.equipment_repair.clone(),
        equipment_operated: draft.equipment_operated.clone(),
        diagnostic_ability: opt(&draft.diagnostic_ability),
        hydraulics_comfort: opt(&draft.hydraulics_comfort),
        equipment_care: opt(&draft.equipment_care),
        customer_facing: opt(&draft.customer_facing),
        drug_test_consent: draft.drug_test_consent,
        license_type: opt(&draft.license_type),
        trailer_experience: draft.trailer_experience.clone(),
        license_state: opt(&draft.license_state),
        moving_violations: opt(&draft.moving_violations),
        dui_dwi: opt(&draft.dui_dwi),
        license_suspended: opt(&draft.license_suspended),
        can_be_insured: opt(&draft.can_be_insured),
        driving_notes: opt(&draft.driving_notes),
        computer_skills: draft.computer_skills.clone(),
        computer_skill_level: opt(&draft.computer_skill_level),
        systems_used: draft.systems_used.clone(),
    })
}

/// Empty scalars persist as NULL rather than "".
fn opt(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Inserts the record and returns the new row id. The persistence service
/// owns `id`, `status` (defaults to pending), and the timestamps.
pub async fn insert_application(
    pool: &PgPool,
    record: &NewApplication,
) -> Result<Uuid, sqlx::Error> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO applications
            (store_id, location_flexibility, first_name, last_name, email, phone,
             city, state, zip_code, positions, start_date, desired_pay,
             available_days, reliable_transportation, work_experience,
             mechanical_experience, equipment_repair, equipment_operated,
             diagnostic_ability, hydraulics_comfort, equipment_care,
             customer_facing, drug_test_consent, license_type,
             trailer_experience, license_state, moving_violations, dui_dwi,
             license_suspended, can_be_insured, driving_notes, computer_skills,
             computer_skill_level, systems_used)
        VALUES
            ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
             $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28,
             $29, $30, $31, $32, $33, $34)
        RETURNING id
        "#,
    )
    .bind(record.store_id)
    .bind(&record.location_flexibility)
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.zip_code)
    .bind(&record.positions)
    .bind(&record.start_date)
    .bind(&record.desired_pay)
    .bind(&record.available_days)
    .bind(record.reliable_transportation)
    .bind(&record.work_experience)
    .bind(&record.mechanical_experience)
    .bind(&record.equipment_repair)
    .bind(&record.equipment_operated)
    .bind(&record.diagnostic_ability)
    .bind(&record.hydraulics_comfort)
    .bind(&record.equipment_care)
    .bind(&record.customer_facing)
    .bind(record.drug_test_consent)
    .bind(&record.license_type)
    .bind(&record.trailer_experience)
    .bind(&record.license_state)
    .bind(&record.moving_violations)
    .bind(&record.dui_dwi)
    .bind(&record.license_suspended)
    .bind(&record.can_be_insured)
    .bind(&record.driving_notes)
    .bind(&record.computer_skills)
    .bind(&record.computer_skill_level)
    .bind(&record.systems_used)
    .fetch_one(pool)
    .await?;

    info!("Inserted application {id}");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_draft() -> ApplicationDraft {
        let mut draft = ApplicationDraft::default();
        draft.store_choice = StoreChoice::Any;
        draft.location_flexibility = "Willing to work at any store location".into();
        draft.first_name = "Sam".into();
        draft.last_name = "Rivers".into();
        draft.email = "sam@example.com".into();
        draft.phone = "(615) 555-1234".into();
        draft.positions.push(Uuid::new_v4().to_string());
        draft.drug_test_consent = true;
        draft.license_type = "regular".into();
        draft.dui_dwi = "no".into();
        draft.license_suspended = "no".into();
        draft
    }

    #[test]
    fn test_any_store_persists_as_absent() {
        let record = build_record(&minimal_draft()).unwrap();
        assert_eq!(record.store_id, None);
    }

    #[test]
    fn test_unset_store_also_persists_as_absent() {
        let mut draft = minimal_draft();
        draft.store_choice = StoreChoice::Unset;
        let record = build_record(&draft).unwrap();
        assert_eq!(record.store_id, None);
    }

    #[test]
    fn test_specific_store_carried_through() {
        let id = Uuid::new_v4();
        let mut draft = minimal_draft();
        draft.store_choice = StoreChoice::Store(id);
        let record = build_record(&draft).unwrap();
        assert_eq!(record.store_id, Some(id));
    }

    #[test]
    fn test_sentinel_token_never_serialized() {
        let record = build_record(&minimal_draft()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains(r#""any""#));
        assert!(json.contains(r#""store_id":null"#));
    }

    #[test]
    fn test_empty_scalars_become_null() {
        let record = build_record(&minimal_draft()).unwrap();
        assert_eq!(record.desired_pay, None);
        assert_eq!(record.driving_notes, None);
        // A defaulted-but-nonempty value survives.
        assert_eq!(record.moving_violations.as_deref(), Some("0"));
    }

    #[test]
    fn test_other_fields_carried_verbatim() {
        let mut draft = minimal_draft();
        draft.available_days = vec!["Monday".into(), "Friday".into()];
        draft.reliable_transportation = true;
        let record = build_record(&draft).unwrap();
        assert_eq!(record.available_days, vec!["Monday", "Friday"]);
        assert!(record.reliable_transportation);
        assert_eq!(record.first_name, "Sam");
        assert_eq!(record.phone, "(615) 555-1234");
    }

    #[test]
    fn test_invalid_position_id_rejected() {
        let mut draft = minimal_draft();
        draft.positions.push("counter_sales".into());
        assert!(matches!(
            build_record(&draft),
            Err(AppError::Validation(_))
        ));
    }

    /// Full intake flow short of the database: fill a minimal draft through
    /// the session operations, gate it, build the record, and freeze the
    /// session as the submit handler would after a successful insert.
    #[tokio::test]
    async fn test_minimal_submission_flow() {
        use crate::intake::draft::{ScalarField, SetField};
        use crate::intake::session::SessionStore;
        use crate::reference::ReferenceData;
        use serde_json::json;

        let store = SessionStore::new();
        let id = store.create(ReferenceData::default()).await;

        let position_id = Uuid::new_v4().to_string();
        store
            .update(id, |draft| {
                draft.set_scalar(ScalarField::StoreId, &json!("any"))?;
                draft.set_scalar(
                    ScalarField::LocationFlexibility,
                    &json!("Willing to work at any store location"),
                )?;
                draft.set_scalar(ScalarField::FirstName, &json!("Sam"))?;
                draft.set_scalar(ScalarField::LastName, &json!("Rivers"))?;
                draft.set_scalar(ScalarField::Email, &json!("sam@example.com"))?;
                draft.set_scalar(ScalarField::Phone, &json!("6155551234"))?;
                draft.set_scalar(ScalarField::DrugTestConsent, &json!(true))?;
                draft.set_scalar(ScalarField::LicenseType, &json!("regular"))?;
                draft.set_scalar(ScalarField::DuiDwi, &json!("no"))?;
                draft.set_scalar(ScalarField::LicenseSuspended, &json!("no"))?;
                draft.toggle(SetField::Positions, &position_id);
                Ok(())
            })
            .await
            .unwrap();

        let session = store.get(id).await.unwrap();
        assert!(session.draft.missing_required().is_empty());

        let record = build_record(&session.draft).unwrap();
        // "Any store" persists as an absent preference, never the sentinel.
        assert_eq!(record.store_id, None);
        assert_eq!(record.phone, "(615) 555-1234");
        assert_eq!(record.positions.len(), 1);

        store.mark_submitted(id).await.unwrap();
        assert!(store.get(id).await.unwrap().submitted);
        // No second submission without a fresh session.
        assert!(store.mark_submitted(id).await.is_err());
    }

    #[test]
    fn test_build_record_does_not_mutate_draft() {
        let draft = minimal_draft();
        let before = format!("{draft:?}");
        let _ = build_record(&draft).unwrap();
        assert_eq!(format!("{draft:?}"), before);
    }
}
