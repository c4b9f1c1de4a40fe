//! Form state model — the in-progress application draft owned by a form
//! session, plus the generic toggle engine shared by its set-valued fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::phone::format_phone;

/// Store preference parsed at the wire boundary. The `"any"` sentinel exists
/// only in the form's option list; past parsing it is `Any`, and at
/// persistence time both `Any` and `Unset` map to an absent store reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreChoice {
    #[default]
    Unset,
    Any,
    Store(Uuid),
}

impl StoreChoice {
    /// Parses the raw select value: empty → `Unset`, `"any"` → `Any`,
    /// anything else must be a store id.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "" => Ok(StoreChoice::Unset),
            "any" => Ok(StoreChoice::Any),
            id => id
                .parse::<Uuid>()
                .map(StoreChoice::Store)
                .map_err(|_| AppError::Validation(format!("Invalid store id: {id}"))),
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, StoreChoice::Unset)
    }
}

/// The seven set-valued fields of the draft. All share one toggle
/// implementation; the variant only selects which vector is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetField {
    Positions,
    AvailableDays,
    EquipmentRepair,
    EquipmentOperated,
    TrailerExperience,
    ComputerSkills,
    SystemsUsed,
}

/// Scalar draft fields settable through the field-update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    StoreId,
    LocationFlexibility,
    FirstName,
    LastName,
    Email,
    Phone,
    City,
    State,
    ZipCode,
    StartDate,
    DesiredPay,
    ReliableTransportation,
    WorkExperience,
    MechanicalExperience,
    DiagnosticAbility,
    HydraulicsComfort,
    EquipmentCare,
    CustomerFacing,
    DrugTestConsent,
    LicenseType,
    LicenseState,
    MovingViolations,
    DuiDwi,
    LicenseSuspended,
    CanBeInsured,
    DrivingNotes,
    ComputerSkillLevel,
}

/// The in-progress application. One mutable instance per form session;
/// mutated field-by-field, read once at submission, then frozen.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDraft {
    pub store_choice: StoreChoice,
    pub location_flexibility: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub positions: Vec<String>,
    pub start_date: String,
    pub desired_pay: String,
    pub available_days: Vec<String>,
    pub reliable_transportation: bool,
    pub work_experience: String,
    pub mechanical_experience: String,
    pub equipment_repair: Vec<String>,
    pub equipment_operated: Vec<String>,
    pub diagnostic_ability: String,
    pub hydraulics_comfort: String,
    pub equipment_care: String,
    pub customer_facing: String,
    pub drug_test_consent: bool,
    pub license_type: String,
    pub trailer_experience: Vec<String>,
    pub license_state: String,
    pub moving_violations: String,
    pub dui_dwi: String,
    pub license_suspended: String,
    pub can_be_insured: String,
    pub driving_notes: String,
    pub computer_skills: Vec<String>,
    pub computer_skill_level: String,
    pub systems_used: Vec<String>,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        ApplicationDraft {
            store_choice: StoreChoice::Unset,
            location_flexibility: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            positions: Vec::new(),
            start_date: String::new(),
            desired_pay: String::new(),
            available_days: Vec::new(),
            reliable_transportation: false,
            work_experience: String::new(),
            mechanical_experience: String::new(),
            equipment_repair: Vec::new(),
            equipment_operated: Vec::new(),
            diagnostic_ability: String::new(),
            hydraulics_comfort: String::new(),
            equipment_care: String::new(),
            customer_facing: String::new(),
            drug_test_consent: false,
            license_type: String::new(),
            trailer_experience: Vec::new(),
            license_state: String::new(),
            // The violations count starts at "0" rather than empty.
            moving_violations: "0".to_string(),
            dui_dwi: String::new(),
            license_suspended: String::new(),
            can_be_insured: String::new(),
            driving_notes: String::new(),
            computer_skills: Vec::new(),
            computer_skill_level: String::new(),
            systems_used: Vec::new(),
        }
    }
}

impl ApplicationDraft {
    fn set_mut(&mut self, field: SetField) -> &mut Vec<String> {
        match field {
            SetField::Positions => &mut self.positions,
            SetField::AvailableDays => &mut self.available_days,
            SetField::EquipmentRepair => &mut self.equipment_repair,
            SetField::EquipmentOperated => &mut self.equipment_operated,
            SetField::TrailerExperience => &mut self.trailer_experience,
            SetField::ComputerSkills => &mut self.computer_skills,
            SetField::SystemsUsed => &mut self.systems_used,
        }
    }

    pub fn set_tokens(&self, field: SetField) -> &[String] {
        match field {
            SetField::Positions => &self.positions,
            SetField::AvailableDays => &self.available_days,
            SetField::EquipmentRepair => &self.equipment_repair,
            SetField::EquipmentOperated => &self.equipment_operated,
            SetField::TrailerExperience => &self.trailer_experience,
            SetField::ComputerSkills => &self.computer_skills,
            SetField::SystemsUsed => &self.systems_used,
        }
    }

    /// Generic multi-select toggle: removes `token` from the named field if
    /// present, otherwise appends it. Only the named field changes, so
    /// toggling twice restores the original draft.
    pub fn toggle(&mut self, field: SetField, token: &str) {
        let set = self.set_mut(field);
        if let Some(pos) = set.iter().position(|t| t == token) {
            set.remove(pos);
        } else {
            set.push(token.to_string());
        }
    }

    /// Sets a scalar field from its wire value. Booleans expect a JSON bool;
    /// everything else expects a JSON string. The phone field is routed
    /// through the canonicalizer and the store choice through the sentinel
    /// parser, so neither raw form ever lands in the draft.
    pub fn set_scalar(&mut self, field: ScalarField, value: &Value) -> Result<(), AppError> {
        match field {
            ScalarField::ReliableTransportation => {
                self.reliable_transportation = expect_bool(field, value)?;
                return Ok(());
            }
            ScalarField::DrugTestConsent => {
                self.drug_test_consent = expect_bool(field, value)?;
                return Ok(());
            }
            _ => {}
        }

        let raw = expect_string(field, value)?;
        match field {
            ScalarField::StoreId => self.store_choice = StoreChoice::parse(raw)?,
            ScalarField::Phone => self.phone = format_phone(raw),
            ScalarField::LocationFlexibility => self.location_flexibility = raw.to_string(),
            ScalarField::FirstName => self.first_name = raw.to_string(),
            ScalarField::LastName => self.last_name = raw.to_string(),
            ScalarField::Email => self.email = raw.to_string(),
            ScalarField::City => self.city = raw.to_string(),
            ScalarField::State => self.state = raw.to_string(),
            ScalarField::ZipCode => self.zip_code = raw.to_string(),
            ScalarField::StartDate => self.start_date = raw.to_string(),
            ScalarField::DesiredPay => self.desired_pay = raw.to_string(),
            ScalarField::WorkExperience => self.work_experience = raw.to_string(),
            ScalarField::MechanicalExperience => self.mechanical_experience = raw.to_string(),
            ScalarField::DiagnosticAbility => self.diagnostic_ability = raw.to_string(),
            ScalarField::HydraulicsComfort => self.hydraulics_comfort = raw.to_string(),
            ScalarField::EquipmentCare => self.equipment_care = raw.to_string(),
            ScalarField::CustomerFacing => self.customer_facing = raw.to_string(),
            ScalarField::LicenseType => self.license_type = raw.to_string(),
            ScalarField::LicenseState => self.license_state = raw.to_string(),
            ScalarField::MovingViolations => self.moving_violations = raw.to_string(),
            ScalarField::DuiDwi => self.dui_dwi = raw.to_string(),
            ScalarField::LicenseSuspended => self.license_suspended = raw.to_string(),
            ScalarField::CanBeInsured => self.can_be_insured = raw.to_string(),
            ScalarField::DrivingNotes => self.driving_notes = raw.to_string(),
            ScalarField::ComputerSkillLevel => self.computer_skill_level = raw.to_string(),
            ScalarField::ReliableTransportation | ScalarField::DrugTestConsent => unreachable!(),
        }
        Ok(())
    }

    /// Form-level required gate. Returns the wire names of every required
    /// field still empty; an empty result means the draft is submittable.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.store_choice.is_set() {
            missing.push("store_id");
        }
        if self.location_flexibility.is_empty() {
            missing.push("location_flexibility");
        }
        if self.first_name.is_empty() {
            missing.push("first_name");
        }
        if self.last_name.is_empty() {
            missing.push("last_name");
        }
        if self.email.is_empty() {
            missing.push("email");
        }
        if self.phone.is_empty() {
            missing.push("phone");
        }
        if self.positions.is_empty() {
            missing.push("positions");
        }
        if !self.drug_test_consent {
            missing.push("drug_test_consent");
        }
        if self.license_type.is_empty() {
            missing.push("license_type");
        }
        if self.moving_violations.is_empty() {
            missing.push("moving_violations");
        }
        if self.dui_dwi.is_empty() {
            missing.push("dui_dwi");
        }
        if self.license_suspended.is_empty() {
            missing.push("license_suspended");
        }
        missing
    }
}

fn expect_string<'a>(field: ScalarField, value: &'a Value) -> Result<&'a str, AppError> {
    value
        .as_str()
        .ok_or_else(|| AppError::Validation(format!("Field {field:?} expects a string value")))
}

fn expect_bool(field: ScalarField, value: &Value) -> Result<bool, AppError> {
    value
        .as_bool()
        .ok_or_else(|| AppError::Validation(format!("Field {field:?} expects a boolean value")))
}
