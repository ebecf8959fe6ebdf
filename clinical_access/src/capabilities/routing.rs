// clinical_access/src/capabilities/routing.rs
//! Role router: pure mapping from an authenticated role to its landing
//! route. Invoked once per successful login.
use models::roles::Role;

/// Fallback for role strings this build does not recognize.
pub const DEFAULT_ROUTE: &str = "/login";

pub fn route_for(role: Role) -> &'static str {
    match role {
        Role::Doctor => "/platform",
        Role::Nurse => "/nurse",
        Role::Patient => "/consent",
        Role::Researcher => "/researcher",
        Role::Admin => "/admin",
        Role::Receptionist => "/reception",
    }
}

/// Router over the raw role string a backend payload carries. Unknown
/// roles fall through to the default route.
pub fn landing_route(role: &str) -> &'static str {
    match role.trim().to_lowercase().as_str() {
        "doctor" => route_for(Role::Doctor),
        "nurse" => route_for(Role::Nurse),
        "patient" => route_for(Role::Patient),
        "researcher" => route_for(Role::Researcher),
        "admin" => route_for(Role::Admin),
        "receptionist" => route_for(Role::Receptionist),
        _ => DEFAULT_ROUTE,
    }
}

#[cfg(test)]
mod tests {
    use super::{landing_route, route_for, DEFAULT_ROUTE};
    use models::roles::Role;

    #[test]
    fn nurse_lands_on_the_nurse_dashboard() {
        assert_eq!(landing_route("nurse"), "/nurse");
    }

    #[test]
    fn patient_lands_on_consent_not_platform() {
        assert_eq!(landing_route("patient"), "/consent");
        assert_ne!(landing_route("patient"), route_for(Role::Doctor));
    }

    #[test]
    fn unknown_role_falls_through_to_default() {
        assert_eq!(landing_route("superuser"), DEFAULT_ROUTE);
        assert_eq!(landing_route(""), DEFAULT_ROUTE);
    }
}
