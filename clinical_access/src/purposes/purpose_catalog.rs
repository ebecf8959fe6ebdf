// clinical_access/src/purposes/purpose_catalog.rs
//! The compiled-in purpose catalog and the declaration step built on it.
//! Purpose limitation: access requires an explicit, role-valid reason
//! naming the data category it covers.
use std::collections::HashSet;

use models::errors::{ValidationError, ValidationResult};
use models::purpose::{DataCategory, Purpose};
use models::roles::Role;

/// One catalog row: what a purpose authorizes and who may declare it.
#[derive(Debug, Clone, Copy)]
pub struct PurposeSpec {
    pub purpose: Purpose,
    pub label: &'static str,
    pub authorizes: &'static [DataCategory],
    pub roles: &'static [Role],
}

/// Static, compiled into the client; never created or destroyed at runtime.
pub const PURPOSE_CATALOG: &[PurposeSpec] = &[
    PurposeSpec {
        purpose: Purpose::Treatment,
        label: "Direct patient treatment",
        authorizes: &[
            DataCategory::Genetic,
            DataCategory::Imaging,
            DataCategory::AiAnalysis,
        ],
        roles: &[Role::Doctor, Role::Nurse],
    },
    PurposeSpec {
        purpose: Purpose::Research,
        label: "Approved research protocol",
        authorizes: &[DataCategory::Research],
        roles: &[Role::Researcher, Role::Doctor],
    },
    PurposeSpec {
        purpose: Purpose::QualityImprovement,
        label: "Quality improvement review",
        authorizes: &[DataCategory::Imaging, DataCategory::AiAnalysis],
        roles: &[Role::Admin, Role::Doctor],
    },
    PurposeSpec {
        purpose: Purpose::Registration,
        label: "Patient registration",
        authorizes: &[],
        roles: &[Role::Receptionist, Role::Admin],
    },
    PurposeSpec {
        purpose: Purpose::Billing,
        label: "Billing and claims",
        authorizes: &[],
        roles: &[Role::Receptionist, Role::Admin],
    },
    PurposeSpec {
        purpose: Purpose::Emergency,
        label: "Emergency care",
        authorizes: &[
            DataCategory::Genetic,
            DataCategory::Imaging,
            DataCategory::AiAnalysis,
            DataCategory::Research,
        ],
        roles: &[Role::Doctor, Role::Admin],
    },
    PurposeSpec {
        purpose: Purpose::Consultation,
        label: "Specialist consultation",
        authorizes: &[DataCategory::Genetic, DataCategory::Imaging],
        roles: &[Role::Doctor],
    },
    PurposeSpec {
        purpose: Purpose::LabTesting,
        label: "Laboratory testing",
        authorizes: &[DataCategory::Genetic],
        roles: &[Role::Doctor, Role::Nurse],
    },
];

pub fn spec_for(purpose: Purpose) -> &'static PurposeSpec {
    // The catalog covers every Purpose variant.
    PURPOSE_CATALOG
        .iter()
        .find(|s| s.purpose == purpose)
        .expect("purpose missing from catalog")
}

pub fn purposes_for_role(role: Role) -> Vec<Purpose> {
    PURPOSE_CATALOG
        .iter()
        .filter(|s| s.roles.contains(&role))
        .map(|s| s.purpose)
        .collect()
}

/// Intersection of the global catalog with the session's allowed set and,
/// when a data type is requested, with the purposes authorizing it.
/// Catalog order is preserved for stable display.
pub fn selectable_purposes(
    allowed: &HashSet<Purpose>,
    data_type: Option<DataCategory>,
) -> Vec<Purpose> {
    PURPOSE_CATALOG
        .iter()
        .filter(|s| allowed.contains(&s.purpose))
        .filter(|s| match data_type {
            Some(category) => s.authorizes.contains(&category),
            None => true,
        })
        .map(|s| s.purpose)
        .collect()
}

/// The declaration step: a filtered option list, exactly one selection,
/// and an explicit dead end when nothing is selectable.
#[derive(Debug, Clone, PartialEq)]
pub struct PurposeDeclaration {
    options: Vec<Purpose>,
    selected: Option<Purpose>,
}

impl PurposeDeclaration {
    pub fn new(allowed: &HashSet<Purpose>, data_type: Option<DataCategory>) -> Self {
        PurposeDeclaration {
            options: selectable_purposes(allowed, data_type),
            selected: None,
        }
    }

    pub fn options(&self) -> &[Purpose] {
        &self.options
    }

    /// Dead end: the caller must offer cancel only.
    pub fn is_dead_end(&self) -> bool {
        self.options.is_empty()
    }

    pub fn select(&mut self, purpose: Purpose) -> ValidationResult<()> {
        if !self.options.contains(&purpose) {
            return Err(ValidationError::PurposeNotSelectable(
                purpose.as_str().to_string(),
            ));
        }
        self.selected = Some(purpose);
        Ok(())
    }

    pub fn can_confirm(&self) -> bool {
        self.selected.is_some()
    }

    /// Hand the confirmed purpose back to the caller. Nothing is stored
    /// globally and no network call originates here.
    pub fn confirm(&self) -> ValidationResult<Purpose> {
        if self.is_dead_end() {
            return Err(ValidationError::NoSelectablePurposes);
        }
        self.selected.ok_or(ValidationError::NoPurposeSelected)
    }
}
