// clinical_access/src/capabilities/capabilities.rs
//! Capability sets. Each command declares the capability it needs and asks
//! once; nothing downstream re-derives permissions from the role.
use models::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewPatientRecord,
    StartEncounter,
    BreakGlass,
    ViewClinicianNotes,
    RegisterPatients,
    ManageBilling,
    RunResearchQueries,
    ManageUsers,
    ViewOwnRecord,
}

/// Static role-to-capability table.
pub fn capabilities_for(role: Role) -> &'static [Capability] {
    match role {
        Role::Doctor => &[
            Capability::ViewPatientRecord,
            Capability::StartEncounter,
            Capability::BreakGlass,
            Capability::ViewClinicianNotes,
            Capability::RunResearchQueries,
        ],
        Role::Nurse => &[
            Capability::ViewPatientRecord,
            Capability::StartEncounter,
            Capability::ViewClinicianNotes,
        ],
        Role::Researcher => &[Capability::RunResearchQueries],
        Role::Admin => &[
            Capability::ViewPatientRecord,
            Capability::StartEncounter,
            Capability::BreakGlass,
            Capability::ViewClinicianNotes,
            Capability::ManageUsers,
            Capability::ManageBilling,
        ],
        Role::Patient => &[Capability::ViewOwnRecord],
        Role::Receptionist => &[Capability::RegisterPatients, Capability::ManageBilling],
    }
}

pub fn has_capability(role: Role, capability: Capability) -> bool {
    capabilities_for(role).contains(&capability)
}

#[cfg(test)]
mod tests {
    use super::{has_capability, Capability};
    use models::roles::Role;

    #[test]
    fn only_doctor_and_admin_hold_break_glass() {
        for role in Role::ALL {
            let expected = matches!(role, Role::Doctor | Role::Admin);
            assert_eq!(
                has_capability(role, Capability::BreakGlass),
                expected,
                "break-glass capability wrong for {}",
                role
            );
        }
    }

    #[test]
    fn patients_see_only_their_own_record() {
        assert!(has_capability(Role::Patient, Capability::ViewOwnRecord));
        assert!(!has_capability(Role::Patient, Capability::ViewPatientRecord));
        assert!(!has_capability(Role::Patient, Capability::ViewClinicianNotes));
    }
}
