// models/src/encounter.rs
use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::purpose::Purpose;
use crate::wire::EncounterResponse;

/// Validity window for a normally-opened encounter.
pub const NORMAL_VALIDITY_HOURS: i64 = 24;
/// Break-glass grants are deliberately shorter-lived.
pub const BREAK_GLASS_VALIDITY_HOURS: i64 = 4;

/// A time-boxed authorization record scoping access to one patient's data
/// for a declared purpose. Expiry is enforced server-side; the client only
/// records and displays the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub encounter_id: String,
    pub patient_id: String,
    pub purpose: Purpose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub break_glass: bool,
}

impl Encounter {
    /// Build from a creation response. The backend may omit `expires_at`;
    /// the client then derives the display window from the grant kind.
    pub fn from_response(
        resp: EncounterResponse,
        patient_id: &str,
        purpose: Purpose,
        justification: Option<String>,
        break_glass: bool,
    ) -> Self {
        let created_at = resp.created_at.unwrap_or_else(Utc::now);
        let validity = if break_glass {
            Duration::hours(BREAK_GLASS_VALIDITY_HOURS)
        } else {
            Duration::hours(NORMAL_VALIDITY_HOURS)
        };
        Encounter {
            encounter_id: resp.encounter_id,
            patient_id: patient_id.to_string(),
            purpose,
            justification,
            created_at,
            expires_at: resp.expires_at.unwrap_or(created_at + validity),
            break_glass,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Conditions that justify a break-glass grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyType {
    LifeThreatening,
    Unconscious,
    SurgicalEmergency,
    MassCasualty,
}

impl EmergencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyType::LifeThreatening => "life_threatening",
            EmergencyType::Unconscious => "unconscious",
            EmergencyType::SurgicalEmergency => "surgical_emergency",
            EmergencyType::MassCasualty => "mass_casualty",
        }
    }
}

impl fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmergencyType {
    type Err = ValidationError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind.trim().to_lowercase().as_str() {
            "life_threatening" | "life-threatening" => Ok(EmergencyType::LifeThreatening),
            "unconscious" => Ok(EmergencyType::Unconscious),
            "surgical_emergency" | "surgical-emergency" | "surgical" => {
                Ok(EmergencyType::SurgicalEmergency)
            }
            "mass_casualty" | "mass-casualty" => Ok(EmergencyType::MassCasualty),
            other => Err(ValidationError::UnknownEmergencyType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Encounter, BREAK_GLASS_VALIDITY_HOURS, NORMAL_VALIDITY_HOURS};
    use crate::purpose::Purpose;
    use crate::wire::EncounterResponse;
    use chrono::{Duration, Utc};

    fn bare_response(id: &str) -> EncounterResponse {
        EncounterResponse {
            encounter_id: id.to_string(),
            created_at: None,
            expires_at: None,
        }
    }

    #[test]
    fn normal_encounter_defaults_to_24_hour_window() {
        let enc = Encounter::from_response(
            bare_response("e-1"),
            "p-1",
            Purpose::Treatment,
            None,
            false,
        );
        assert_eq!(enc.expires_at - enc.created_at, Duration::hours(NORMAL_VALIDITY_HOURS));
        assert!(!enc.break_glass);
    }

    #[test]
    fn break_glass_encounter_defaults_to_4_hour_window() {
        let enc = Encounter::from_response(
            bare_response("e-2"),
            "p-1",
            Purpose::Emergency,
            Some("unresponsive on arrival".to_string()),
            true,
        );
        assert_eq!(
            enc.expires_at - enc.created_at,
            Duration::hours(BREAK_GLASS_VALIDITY_HOURS)
        );
        assert!(enc.break_glass);
    }

    #[test]
    fn server_expiry_wins_over_derived_window() {
        let expires = Utc::now() + Duration::minutes(30);
        let resp = EncounterResponse {
            encounter_id: "e-3".to_string(),
            created_at: None,
            expires_at: Some(expires),
        };
        let enc = Encounter::from_response(resp, "p-1", Purpose::Treatment, None, false);
        assert_eq!(enc.expires_at, expires);
    }
}
