// clinical_access/src/consent/consent_service.rs
use std::sync::Arc;
use log::warn;

use client::api::AccessApi;
use models::consent::Consent;
use models::errors::AccessResult;
use models::session::Session;

/// Read-only consent lookup. Flags are fetched fresh on every patient
/// selection and never cached across patients.
pub struct ConsentService {
    api: Arc<dyn AccessApi>,
}

impl ConsentService {
    pub fn new(api: Arc<dyn AccessApi>) -> Self {
        ConsentService { api }
    }

    pub async fn lookup(&self, session: &Session, patient_id: &str) -> AccessResult<Consent> {
        let resp = self
            .api
            .fetch_consent(patient_id, session.role, &session.user_id)
            .await?;
        Ok(Consent::from_response(patient_id, resp))
    }

    /// Best-effort variant used inside encounter creation: a failed lookup
    /// must not block the encounter request, it only hides the flags.
    pub async fn lookup_best_effort(
        &self,
        session: &Session,
        patient_id: &str,
    ) -> Option<Consent> {
        match self.lookup(session, patient_id).await {
            Ok(consent) => Some(consent),
            Err(e) => {
                warn!("Consent lookup for {} failed, continuing without flags: {}", patient_id, e);
                None
            }
        }
    }
}
