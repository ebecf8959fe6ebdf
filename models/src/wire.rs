// models/src/wire.rs
//! Request/response schemas, one pair per backend endpoint. Decoded with
//! serde at the boundary so workflow code never touches dynamic JSON.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::encounter::EmergencyType;
use crate::purpose::Purpose;
use crate::roles::Role;
use crate::timeline::TimelineEvent;

/// POST /auth/login-patient
#[derive(Debug, Clone, Serialize)]
pub struct PatientLoginRequest {
    pub patient_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientLoginResponse {
    pub session_id: String,
    pub patient_id: String,
    pub access_token: String,
    #[serde(default)]
    pub allowed_purposes: Vec<Purpose>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub email: Option<String>,
}

/// POST /auth/login-staff
#[derive(Debug, Clone, Serialize)]
pub struct StaffLoginRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaffLoginResponse {
    pub session_id: String,
    pub user_id: String,
    pub role: Role,
    pub access_token: String,
    #[serde(default)]
    pub allowed_purposes: Vec<Purpose>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// GET /auth/consent/{patient_id}
#[derive(Debug, Clone, Deserialize)]
pub struct ConsentResponse {
    pub consent_genetic: bool,
    pub consent_imaging: bool,
    pub consent_ai_analysis: bool,
    pub consent_research: bool,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// POST /auth/encounters
#[derive(Debug, Clone, Serialize)]
pub struct EncounterRequest {
    pub patient_id: String,
    pub purpose: Purpose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncounterResponse {
    pub encounter_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// POST /auth/break-glass
#[derive(Debug, Clone, Serialize)]
pub struct BreakGlassRequest {
    pub patient_id: String,
    pub reason: String,
    pub emergency_type: EmergencyType,
}

/// GET /patients/{id}/encounters
#[derive(Debug, Clone, Deserialize)]
pub struct EncounterListResponse {
    #[serde(default)]
    pub encounters: Vec<EncounterSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncounterSummary {
    pub encounter_id: String,
    pub purpose: Purpose,
    #[serde(default)]
    pub break_glass: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// GET /encounters/{id}/timeline
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineResponse {
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}
