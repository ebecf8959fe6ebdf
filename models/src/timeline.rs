// models/src/timeline.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event kinds the timeline endpoint emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Prediction,
    Genetic,
    Imaging,
    AiNote,
    EncounterStart,
    EncounterComplete,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Prediction => "prediction",
            EventType::Genetic => "genetic",
            EventType::Imaging => "imaging",
            EventType::AiNote => "ai_note",
            EventType::EncounterStart => "encounter_start",
            EventType::EncounterComplete => "encounter_complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    PatientVisible,
    ClinicianOnly,
}

/// One timeline entry. Immutable once fetched; ordering is assigned by the
/// server, the client only groups and filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub summary: String,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TimelineEvent {
    pub fn is_patient_visible(&self) -> bool {
        matches!(self.visibility, Visibility::PatientVisible)
    }
}
