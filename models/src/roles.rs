// models/src/roles.rs
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Every role the backend provisions. Staff roles come back in the login
/// response; patient logins imply `Patient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Nurse,
    Researcher,
    Admin,
    Patient,
    Receptionist,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Doctor,
        Role::Nurse,
        Role::Researcher,
        Role::Admin,
        Role::Patient,
        Role::Receptionist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Researcher => "researcher",
            Role::Admin => "admin",
            Role::Patient => "patient",
            Role::Receptionist => "receptionist",
        }
    }

    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Patient)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the spellings seen in backend payloads and on the command line
/// (dr, md, reception, front-desk).
impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(role: &str) -> Result<Self, Self::Err> {
        match role.trim().to_lowercase().as_str() {
            "doctor" | "dr" | "md" | "physician" => Ok(Role::Doctor),
            "nurse" | "rn" => Ok(Role::Nurse),
            "researcher" | "research" => Ok(Role::Researcher),
            "admin" | "administrator" => Ok(Role::Admin),
            "patient" => Ok(Role::Patient),
            "receptionist" | "reception" | "front-desk" | "front_desk" => Ok(Role::Receptionist),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}
