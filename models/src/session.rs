// models/src/session.rs
use std::collections::HashSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::purpose::Purpose;
use crate::roles::Role;
use crate::wire::{PatientLoginResponse, StaffLoginResponse};

/// The authenticated identity. Exactly one per client process; persisted by
/// the session store and destroyed on sign-out or expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub user_id: String,
    pub role: Role,
    pub access_token: String,
    pub allowed_purposes: HashSet<Purpose>,
    pub expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Normalize a staff login payload. The backend names the role; an
    /// unrecognized role string has already been rejected at decode time.
    pub fn from_staff_login(resp: StaffLoginResponse) -> Self {
        Session {
            session_id: resp.session_id,
            user_id: resp.user_id,
            role: resp.role,
            access_token: resp.access_token,
            allowed_purposes: resp.allowed_purposes.into_iter().collect(),
            expires_at: resp.expires_at,
            full_name: resp.full_name,
            email: resp.email,
        }
    }

    /// Patient logins carry no role field; the role is implied.
    pub fn from_patient_login(resp: PatientLoginResponse) -> Self {
        Session {
            session_id: resp.session_id,
            user_id: resp.patient_id,
            role: Role::Patient,
            access_token: resp.access_token,
            allowed_purposes: resp.allowed_purposes.into_iter().collect(),
            expires_at: resp.expires_at,
            full_name: None,
            email: resp.email,
        }
    }

    pub fn allows_purpose(&self, purpose: Purpose) -> bool {
        self.allowed_purposes.contains(&purpose)
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::purpose::Purpose;
    use crate::roles::Role;
    use crate::wire::PatientLoginResponse;
    use chrono::{Duration, Utc};

    #[test]
    fn patient_login_implies_patient_role() {
        let resp = PatientLoginResponse {
            session_id: "s-1".into(),
            patient_id: "p-100".into(),
            access_token: "tok".into(),
            allowed_purposes: vec![Purpose::Treatment],
            expires_at: Utc::now() + Duration::hours(24),
            email: Some("p@example.org".into()),
        };
        let session = Session::from_patient_login(resp);
        assert_eq!(session.role, Role::Patient);
        assert_eq!(session.user_id, "p-100");
        assert!(session.allows_purpose(Purpose::Treatment));
        assert!(!session.allows_purpose(Purpose::Billing));
    }

    #[test]
    fn expiry_is_inclusive_at_the_boundary() {
        let now = Utc::now();
        let resp = PatientLoginResponse {
            session_id: "s-1".into(),
            patient_id: "p-100".into(),
            access_token: "tok".into(),
            allowed_purposes: vec![],
            expires_at: now,
            email: None,
        };
        let session = Session::from_patient_login(resp);
        assert!(session.is_expired_at(now));
        assert!(!session.is_expired_at(now - Duration::seconds(1)));
    }
}
