// models/src/consent.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::purpose::DataCategory;
use crate::wire::ConsentResponse;

/// Per-category consent flags for one patient. Fetched fresh on every
/// patient selection; read-only from this client (consent capture happens
/// through a separate flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consent {
    pub patient_id: String,
    pub genetic: bool,
    pub imaging: bool,
    pub ai_analysis: bool,
    pub research: bool,
    pub recorded_at: DateTime<Utc>,
}

impl Consent {
    pub fn from_response(patient_id: &str, resp: ConsentResponse) -> Self {
        Consent {
            patient_id: patient_id.to_string(),
            genetic: resp.consent_genetic,
            imaging: resp.consent_imaging,
            ai_analysis: resp.consent_ai_analysis,
            research: resp.consent_research,
            recorded_at: resp.timestamp.unwrap_or_else(Utc::now),
        }
    }

    pub fn permits(&self, category: DataCategory) -> bool {
        match category {
            DataCategory::Genetic => self.genetic,
            DataCategory::Imaging => self.imaging,
            DataCategory::AiAnalysis => self.ai_analysis,
            DataCategory::Research => self.research,
        }
    }

    /// Categories the patient has opted into, in display order.
    pub fn granted_categories(&self) -> Vec<DataCategory> {
        DataCategory::ALL
            .iter()
            .copied()
            .filter(|c| self.permits(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Consent;
    use crate::purpose::DataCategory;
    use crate::wire::ConsentResponse;

    #[test]
    fn should_map_wire_flags_per_category() {
        let resp = ConsentResponse {
            consent_genetic: true,
            consent_imaging: false,
            consent_ai_analysis: true,
            consent_research: false,
            timestamp: None,
        };
        let consent = Consent::from_response("p-1", resp);
        assert!(consent.permits(DataCategory::Genetic));
        assert!(!consent.permits(DataCategory::Imaging));
        assert_eq!(
            consent.granted_categories(),
            vec![DataCategory::Genetic, DataCategory::AiAnalysis]
        );
    }
}
