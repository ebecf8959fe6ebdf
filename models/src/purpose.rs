// models/src/purpose.rs
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Declared access purposes. Static, compiled into the client; the catalog
/// in `clinical_access` maps each one to the data categories it authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Treatment,
    Research,
    QualityImprovement,
    Registration,
    Billing,
    Emergency,
    Consultation,
    LabTesting,
}

impl Purpose {
    pub const ALL: [Purpose; 8] = [
        Purpose::Treatment,
        Purpose::Research,
        Purpose::QualityImprovement,
        Purpose::Registration,
        Purpose::Billing,
        Purpose::Emergency,
        Purpose::Consultation,
        Purpose::LabTesting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Treatment => "treatment",
            Purpose::Research => "research",
            Purpose::QualityImprovement => "quality_improvement",
            Purpose::Registration => "registration",
            Purpose::Billing => "billing",
            Purpose::Emergency => "emergency",
            Purpose::Consultation => "consultation",
            Purpose::LabTesting => "lab_testing",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = ValidationError;

    fn from_str(purpose: &str) -> Result<Self, Self::Err> {
        match purpose.trim().to_lowercase().as_str() {
            "treatment" => Ok(Purpose::Treatment),
            "research" => Ok(Purpose::Research),
            "quality_improvement" | "quality-improvement" | "qi" => {
                Ok(Purpose::QualityImprovement)
            }
            "registration" => Ok(Purpose::Registration),
            "billing" => Ok(Purpose::Billing),
            "emergency" => Ok(Purpose::Emergency),
            "consultation" => Ok(Purpose::Consultation),
            "lab_testing" | "lab-testing" | "lab" => Ok(Purpose::LabTesting),
            other => Err(ValidationError::UnknownPurpose(other.to_string())),
        }
    }
}

/// The data categories patients consent to per category. Mirrors the four
/// consent flags the backend records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    Genetic,
    Imaging,
    AiAnalysis,
    Research,
}

impl DataCategory {
    pub const ALL: [DataCategory; 4] = [
        DataCategory::Genetic,
        DataCategory::Imaging,
        DataCategory::AiAnalysis,
        DataCategory::Research,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::Genetic => "genetic",
            DataCategory::Imaging => "imaging",
            DataCategory::AiAnalysis => "ai_analysis",
            DataCategory::Research => "research",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataCategory {
    type Err = ValidationError;

    fn from_str(category: &str) -> Result<Self, Self::Err> {
        match category.trim().to_lowercase().as_str() {
            "genetic" | "genomics" | "dna" => Ok(DataCategory::Genetic),
            "imaging" => Ok(DataCategory::Imaging),
            "ai_analysis" | "ai-analysis" | "ai" => Ok(DataCategory::AiAnalysis),
            "research" => Ok(DataCategory::Research),
            other => Err(ValidationError::UnknownDataCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataCategory, Purpose};
    use core::str::FromStr;

    #[test]
    fn should_parse_purpose_aliases() {
        assert_eq!(Purpose::from_str("qi").unwrap(), Purpose::QualityImprovement);
        assert_eq!(Purpose::from_str("lab").unwrap(), Purpose::LabTesting);
        assert!(Purpose::from_str("marketing").is_err());
    }

    #[test]
    fn should_round_trip_wire_spelling() {
        let parsed: Purpose = serde_json::from_str("\"quality_improvement\"").unwrap();
        assert_eq!(parsed, Purpose::QualityImprovement);
        assert_eq!(
            serde_json::to_string(&Purpose::LabTesting).unwrap(),
            "\"lab_testing\""
        );
    }

    #[test]
    fn should_parse_data_category_aliases() {
        assert_eq!(DataCategory::from_str("dna").unwrap(), DataCategory::Genetic);
        assert_eq!(
            DataCategory::from_str("ai").unwrap(),
            DataCategory::AiAnalysis
        );
    }
}
