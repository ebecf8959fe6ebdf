// clinical_access/src/workflow/access_workflow.rs
//! The access workflow state machine. Every patient-data view sits behind
//! this sequence: authenticate, select a patient (consent lookup), declare
//! a purpose, open an encounter; break-glass is the audited emergency
//! bypass. The backend re-checks everything; this machine is the client's
//! own sequencing guarantee.
use std::mem;
use std::sync::Arc;

use log::{info, warn};

use audit_log::{AuditAction, AuditEvent, AuditSink};
use client::api::AccessApi;
use client::session_store::SessionStore;
use models::consent::Consent;
use models::encounter::{EmergencyType, Encounter};
use models::errors::{AccessError, AccessResult, ValidationError, ValidationResult};
use models::purpose::{DataCategory, Purpose};
use models::session::Session;
use models::wire::{
    BreakGlassRequest, EncounterRequest, PatientLoginRequest, StaffLoginRequest,
};

use crate::capabilities::{has_capability, route_for, Capability};
use crate::consent::ConsentService;
use crate::purposes::PurposeDeclaration;

/// Client-side floor for a break-glass justification. Advisory; the server
/// is the authority.
pub const MIN_JUSTIFICATION_CHARS: usize = 10;

pub fn validate_justification(reason: &str) -> ValidationResult<()> {
    let len = reason.chars().count();
    if len < MIN_JUSTIFICATION_CHARS {
        return Err(ValidationError::JustificationTooShort {
            min: MIN_JUSTIFICATION_CHARS,
            len,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccessState {
    Unauthenticated,
    /// Authenticated, no patient in context.
    Idle,
    ConsentPending {
        patient_id: String,
    },
    PurposePending {
        patient_id: String,
        consent: Option<Consent>,
    },
    EncounterPending {
        patient_id: String,
        purpose: Purpose,
    },
    EncounterActive {
        encounter: Encounter,
    },
    BreakGlassActive {
        encounter: Encounter,
    },
}

impl AccessState {
    pub fn name(&self) -> &'static str {
        match self {
            AccessState::Unauthenticated => "unauthenticated",
            AccessState::Idle => "idle",
            AccessState::ConsentPending { .. } => "consent-pending",
            AccessState::PurposePending { .. } => "purpose-pending",
            AccessState::EncounterPending { .. } => "encounter-pending",
            AccessState::EncounterActive { .. } => "encounter-active",
            AccessState::BreakGlassActive { .. } => "break-glass-active",
        }
    }
}

pub struct AccessWorkflow {
    api: Arc<dyn AccessApi>,
    sessions: SessionStore,
    consent: ConsentService,
    audit: Arc<dyn AuditSink>,
    state: AccessState,
}

impl AccessWorkflow {
    /// Build the workflow, resuming an unexpired persisted session.
    pub async fn new(
        api: Arc<dyn AccessApi>,
        sessions: SessionStore,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let state = if sessions.current().await.is_some() {
            AccessState::Idle
        } else {
            AccessState::Unauthenticated
        };
        AccessWorkflow {
            consent: ConsentService::new(api.clone()),
            api,
            sessions,
            audit,
            state,
        }
    }

    pub fn state(&self) -> &AccessState {
        &self.state
    }

    pub async fn session(&self) -> AccessResult<Session> {
        self.sessions.require().await
    }

    fn invalid(&self, action: &str) -> AccessError {
        AccessError::InvalidTransition {
            state: self.state.name().to_string(),
            action: action.to_string(),
        }
    }

    /// Advisory journal write; a failed append never blocks the workflow.
    async fn audit(&self, event: AuditEvent) {
        if let Err(e) = self.audit.record(event).await {
            warn!("Audit journal write failed: {}", e);
        }
    }

    // ------------------------------------------------------------------
    // Authentication gate
    // ------------------------------------------------------------------

    /// Staff login. Returns the session and its landing route.
    pub async fn sign_in_staff(
        &mut self,
        user_id: &str,
        password: &str,
    ) -> AccessResult<(Session, &'static str)> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::EmptyUserId.into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingPassword.into());
        }
        let resp = self
            .api
            .login_staff(StaffLoginRequest {
                user_id: user_id.to_string(),
                password: password.to_string(),
            })
            .await?;
        let session = Session::from_staff_login(resp);
        self.finish_sign_in(session).await
    }

    /// Patient login. The role is implied, not chosen.
    pub async fn sign_in_patient(
        &mut self,
        patient_id: &str,
        password: &str,
    ) -> AccessResult<(Session, &'static str)> {
        if patient_id.trim().is_empty() {
            return Err(ValidationError::EmptyPatientId.into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingPassword.into());
        }
        let resp = self
            .api
            .login_patient(PatientLoginRequest {
                patient_id: patient_id.to_string(),
                password: password.to_string(),
            })
            .await?;
        let session = Session::from_patient_login(resp);
        self.finish_sign_in(session).await
    }

    async fn finish_sign_in(&mut self, session: Session) -> AccessResult<(Session, &'static str)> {
        self.sessions.store(session.clone()).await?;
        self.audit(AuditEvent::new(
            &session.user_id,
            session.role,
            AuditAction::SignIn,
        ))
        .await;
        self.state = AccessState::Idle;
        let route = route_for(session.role);
        info!("Signed in {} as {}, landing on {}", session.user_id, session.role, route);
        Ok((session, route))
    }

    pub async fn sign_out(&mut self) -> AccessResult<()> {
        if let Some(session) = self.sessions.current().await {
            self.audit(AuditEvent::new(
                &session.user_id,
                session.role,
                AuditAction::SignOut,
            ))
            .await;
        }
        self.sessions.clear().await?;
        self.state = AccessState::Unauthenticated;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Patient selection and consent
    // ------------------------------------------------------------------

    /// Enter a patient context. Consent lookup is best-effort: failure only
    /// hides the flags, the workflow always advances to purpose-pending.
    pub async fn select_patient(&mut self, patient_id: &str) -> AccessResult<Option<Consent>> {
        if patient_id.trim().is_empty() {
            return Err(ValidationError::EmptyPatientId.into());
        }
        if self.state != AccessState::Idle {
            return Err(self.invalid("select patient"));
        }
        let session = self.sessions.require().await?;

        self.state = AccessState::ConsentPending {
            patient_id: patient_id.to_string(),
        };
        let consent = self.consent.lookup_best_effort(&session, patient_id).await;
        if consent.is_some() {
            self.audit(
                AuditEvent::new(&session.user_id, session.role, AuditAction::ConsentViewed)
                    .for_patient(patient_id),
            )
            .await;
        }
        self.state = AccessState::PurposePending {
            patient_id: patient_id.to_string(),
            consent: consent.clone(),
        };
        Ok(consent)
    }

    // ------------------------------------------------------------------
    // Purpose declaration
    // ------------------------------------------------------------------

    /// The declaration for the current patient context, optionally narrowed
    /// to purposes authorizing one data category.
    pub async fn purpose_declaration(
        &self,
        data_type: Option<DataCategory>,
    ) -> AccessResult<PurposeDeclaration> {
        if !matches!(self.state, AccessState::PurposePending { .. }) {
            return Err(self.invalid("declare purpose"));
        }
        let session = self.sessions.require().await?;
        Ok(PurposeDeclaration::new(&session.allowed_purposes, data_type))
    }

    // ------------------------------------------------------------------
    // Encounter creation
    // ------------------------------------------------------------------

    /// Open an encounter for the selected patient under a confirmed
    /// purpose. On failure the workflow returns to purpose-pending so the
    /// same declaration can be resubmitted.
    pub async fn open_encounter(
        &mut self,
        purpose: Purpose,
        justification: Option<String>,
    ) -> AccessResult<Encounter> {
        let session = self.sessions.require().await?;
        if !session.allows_purpose(purpose) {
            return Err(ValidationError::PurposeNotSelectable(
                purpose.as_str().to_string(),
            )
            .into());
        }

        let (patient_id, consent) = match mem::replace(&mut self.state, AccessState::Idle) {
            AccessState::PurposePending {
                patient_id,
                consent,
            } => (patient_id, consent),
            other => {
                self.state = other;
                return Err(self.invalid("open encounter"));
            }
        };

        self.state = AccessState::EncounterPending {
            patient_id: patient_id.clone(),
            purpose,
        };
        self.audit(
            AuditEvent::new(
                &session.user_id,
                session.role,
                AuditAction::PurposeDeclared { purpose },
            )
            .for_patient(&patient_id),
        )
        .await;

        let result = self
            .api
            .create_encounter(
                &session.access_token,
                EncounterRequest {
                    patient_id: patient_id.clone(),
                    purpose,
                    justification: justification.clone(),
                },
            )
            .await;

        match result {
            Ok(resp) => {
                let encounter =
                    Encounter::from_response(resp, &patient_id, purpose, justification, false);
                self.audit(
                    AuditEvent::new(&session.user_id, session.role, AuditAction::EncounterOpened)
                        .for_patient(&patient_id)
                        .for_encounter(&encounter.encounter_id),
                )
                .await;
                info!(
                    "Encounter {} open for {} until {}",
                    encounter.encounter_id, patient_id, encounter.expires_at
                );
                self.state = AccessState::EncounterActive {
                    encounter: encounter.clone(),
                };
                Ok(encounter)
            }
            Err(e) => {
                // Dialog stays open: same patient, same consent, resubmittable.
                self.state = AccessState::PurposePending {
                    patient_id,
                    consent,
                };
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Break-glass override
    // ------------------------------------------------------------------

    /// Emergency bypass. Capability-gated, justification-floored, audited,
    /// and reachable from any authenticated state.
    pub async fn break_glass(
        &mut self,
        patient_id: &str,
        reason: &str,
        emergency_type: EmergencyType,
    ) -> AccessResult<Encounter> {
        if patient_id.trim().is_empty() {
            return Err(ValidationError::EmptyPatientId.into());
        }
        let session = self.sessions.require().await?;
        if !has_capability(session.role, Capability::BreakGlass) {
            return Err(AccessError::Forbidden(format!(
                "role {} cannot use break-glass access",
                session.role
            )));
        }
        validate_justification(reason)?;

        let resp = self
            .api
            .break_glass(
                &session.access_token,
                BreakGlassRequest {
                    patient_id: patient_id.to_string(),
                    reason: reason.to_string(),
                    emergency_type,
                },
            )
            .await?;

        let encounter = Encounter::from_response(
            resp,
            patient_id,
            Purpose::Emergency,
            Some(reason.to_string()),
            true,
        );
        self.audit(
            AuditEvent::new(
                &session.user_id,
                session.role,
                AuditAction::BreakGlassInvoked {
                    reason: reason.to_string(),
                },
            )
            .for_patient(patient_id)
            .for_encounter(&encounter.encounter_id),
        )
        .await;
        warn!(
            "BREAK-GLASS: {} opened emergency access to {} ({}), expires {}",
            session.user_id, patient_id, emergency_type, encounter.expires_at
        );
        self.state = AccessState::BreakGlassActive {
            encounter: encounter.clone(),
        };
        Ok(encounter)
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_justification, AccessState, AccessWorkflow};
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use tokio::sync::Mutex;

    use audit_log::{AuditEvent, AuditSink};
    use client::api::AccessApi;
    use client::session_store::SessionStore;
    use models::errors::{AccessError, AccessResult, ValidationError};
    use models::purpose::{DataCategory, Purpose};
    use models::roles::Role;
    use models::wire::{
        BreakGlassRequest, ConsentResponse, EncounterListResponse, EncounterRequest,
        EncounterResponse, PatientLoginRequest, PatientLoginResponse, StaffLoginRequest,
        StaffLoginResponse, TimelineResponse,
    };

    /// In-process backend double: scripted results plus a call journal.
    struct StubApi {
        calls: Mutex<Vec<String>>,
        consent_fails: bool,
        encounter_results: Mutex<VecDeque<AccessResult<EncounterResponse>>>,
        login_role: Role,
        login_purposes: Vec<Purpose>,
    }

    impl StubApi {
        fn new(role: Role, purposes: &[Purpose]) -> Self {
            StubApi {
                calls: Mutex::new(Vec::new()),
                consent_fails: false,
                encounter_results: Mutex::new(VecDeque::new()),
                login_role: role,
                login_purposes: purposes.to_vec(),
            }
        }

        fn failing_consent(mut self) -> Self {
            self.consent_fails = true;
            self
        }

        async fn script_encounter(&self, result: AccessResult<EncounterResponse>) {
            self.encounter_results.lock().await.push_back(result);
        }

        async fn calls(&self) -> Vec<String> {
            self.calls.lock().await.clone()
        }

        async fn note(&self, call: &str) {
            self.calls.lock().await.push(call.to_string());
        }
    }

    #[async_trait]
    impl AccessApi for StubApi {
        async fn login_patient(
            &self,
            req: PatientLoginRequest,
        ) -> AccessResult<PatientLoginResponse> {
            self.note("login_patient").await;
            Ok(PatientLoginResponse {
                session_id: "sess-p".into(),
                patient_id: req.patient_id,
                access_token: "tok-p".into(),
                allowed_purposes: self.login_purposes.clone(),
                expires_at: Utc::now() + Duration::hours(24),
                email: None,
            })
        }

        async fn login_staff(&self, req: StaffLoginRequest) -> AccessResult<StaffLoginResponse> {
            self.note("login_staff").await;
            Ok(StaffLoginResponse {
                session_id: "sess-s".into(),
                user_id: req.user_id,
                role: self.login_role,
                access_token: "tok-s".into(),
                allowed_purposes: self.login_purposes.clone(),
                expires_at: Utc::now() + Duration::hours(24),
                full_name: None,
                email: None,
            })
        }

        async fn fetch_consent(
            &self,
            patient_id: &str,
            _caller_role: Role,
            _caller_id: &str,
        ) -> AccessResult<ConsentResponse> {
            self.note(&format!("fetch_consent:{}", patient_id)).await;
            if self.consent_fails {
                return Err(AccessError::Network("consent service unreachable".into()));
            }
            Ok(ConsentResponse {
                consent_genetic: true,
                consent_imaging: true,
                consent_ai_analysis: false,
                consent_research: false,
                timestamp: None,
            })
        }

        async fn create_encounter(
            &self,
            _token: &str,
            req: EncounterRequest,
        ) -> AccessResult<EncounterResponse> {
            self.note(&format!("create_encounter:{}", req.patient_id)).await;
            match self.encounter_results.lock().await.pop_front() {
                Some(result) => result,
                None => Ok(EncounterResponse {
                    encounter_id: "e-1".into(),
                    created_at: None,
                    expires_at: None,
                }),
            }
        }

        async fn break_glass(
            &self,
            _token: &str,
            req: BreakGlassRequest,
        ) -> AccessResult<EncounterResponse> {
            self.note(&format!("break_glass:{}", req.patient_id)).await;
            Ok(EncounterResponse {
                encounter_id: "e-bg".into(),
                created_at: None,
                expires_at: None,
            })
        }

        async fn list_encounters(
            &self,
            _token: &str,
            _patient_id: &str,
        ) -> AccessResult<EncounterListResponse> {
            Ok(EncounterListResponse { encounters: vec![] })
        }

        async fn fetch_timeline(
            &self,
            _token: &str,
            _encounter_id: &str,
        ) -> AccessResult<TimelineResponse> {
            Ok(TimelineResponse { timeline: vec![] })
        }
    }

    struct NullAudit;

    #[async_trait]
    impl AuditSink for NullAudit {
        async fn record(&self, _event: AuditEvent) -> AccessResult<()> {
            Ok(())
        }
    }

    async fn workflow_with(api: Arc<StubApi>) -> (AccessWorkflow, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionStore::open(&dir.path().join("session.json"));
        let wf = AccessWorkflow::new(api, sessions, Arc::new(NullAudit)).await;
        (wf, dir)
    }

    #[tokio::test]
    async fn happy_path_reaches_an_active_encounter() {
        let api = Arc::new(StubApi::new(Role::Doctor, &[Purpose::Treatment]));
        let (mut wf, _dir) = workflow_with(api.clone()).await;
        assert_eq!(*wf.state(), AccessState::Unauthenticated);

        let (session, route) = wf.sign_in_staff("dr-jones", "pw").await.unwrap();
        assert_eq!(session.role, Role::Doctor);
        assert_eq!(route, "/platform");
        assert_eq!(*wf.state(), AccessState::Idle);

        let consent = wf.select_patient("p-100").await.unwrap();
        assert!(consent.unwrap().genetic);

        let mut declaration = wf
            .purpose_declaration(Some(DataCategory::Genetic))
            .await
            .unwrap();
        declaration.select(Purpose::Treatment).unwrap();
        let purpose = declaration.confirm().unwrap();

        let encounter = wf.open_encounter(purpose, None).await.unwrap();
        assert_eq!(encounter.encounter_id, "e-1");
        assert!(!encounter.break_glass);
        assert!(matches!(wf.state(), AccessState::EncounterActive { .. }));
    }

    #[tokio::test]
    async fn consent_failure_does_not_block_the_encounter_post() {
        let api = Arc::new(StubApi::new(Role::Doctor, &[Purpose::Treatment]).failing_consent());
        let (mut wf, _dir) = workflow_with(api.clone()).await;
        wf.sign_in_staff("dr-jones", "pw").await.unwrap();

        // Lookup fails; the workflow still advances to purpose-pending.
        let consent = wf.select_patient("p-100").await.unwrap();
        assert!(consent.is_none());
        assert!(matches!(wf.state(), AccessState::PurposePending { .. }));

        let encounter = wf.open_encounter(Purpose::Treatment, None).await.unwrap();
        assert_eq!(encounter.encounter_id, "e-1");

        let calls = api.calls().await;
        assert!(calls.contains(&"fetch_consent:p-100".to_string()));
        assert!(calls.contains(&"create_encounter:p-100".to_string()));
    }

    #[tokio::test]
    async fn encounter_failure_surfaces_detail_and_allows_resubmission() {
        let api = Arc::new(StubApi::new(Role::Doctor, &[Purpose::Treatment]));
        api.script_encounter(Err(AccessError::Api {
            status: 404,
            detail: "Patient not found".into(),
        }))
        .await;

        let (mut wf, _dir) = workflow_with(api.clone()).await;
        wf.sign_in_staff("dr-jones", "pw").await.unwrap();
        wf.select_patient("p-100").await.unwrap();

        let err = wf.open_encounter(Purpose::Treatment, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Patient not found");
        // Back to purpose-pending: the same declaration can be resubmitted.
        assert!(matches!(wf.state(), AccessState::PurposePending { .. }));

        let encounter = wf.open_encounter(Purpose::Treatment, None).await.unwrap();
        assert_eq!(encounter.encounter_id, "e-1");
    }

    #[tokio::test]
    async fn nurse_cannot_break_glass_and_no_request_is_issued() {
        let api = Arc::new(StubApi::new(Role::Nurse, &[Purpose::Treatment]));
        let (mut wf, _dir) = workflow_with(api.clone()).await;
        wf.sign_in_staff("rn-5", "pw").await.unwrap();

        let err = wf
            .break_glass("p-100", "patient is unresponsive", models::EmergencyType::Unconscious)
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Forbidden(_)));
        assert!(!api.calls().await.iter().any(|c| c.starts_with("break_glass")));
    }

    #[tokio::test]
    async fn justification_floor_is_inclusive_at_ten_characters() {
        assert!(validate_justification("123456789").is_err());
        assert!(validate_justification("1234567890").is_ok());

        let api = Arc::new(StubApi::new(Role::Doctor, &[Purpose::Treatment]));
        let (mut wf, _dir) = workflow_with(api.clone()).await;
        wf.sign_in_staff("dr-jones", "pw").await.unwrap();

        let err = wf
            .break_glass("p-100", "too short", models::EmergencyType::Unconscious)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AccessError::Validation(ValidationError::JustificationTooShort { min: 10, len: 9 })
        );

        let encounter = wf
            .break_glass("p-100", "exactly10c", models::EmergencyType::Unconscious)
            .await
            .unwrap();
        assert!(encounter.break_glass);
        assert!(matches!(wf.state(), AccessState::BreakGlassActive { .. }));
    }

    #[tokio::test]
    async fn break_glass_is_reachable_from_an_active_encounter() {
        let api = Arc::new(StubApi::new(Role::Doctor, &[Purpose::Treatment]));
        let (mut wf, _dir) = workflow_with(api.clone()).await;
        wf.sign_in_staff("dr-jones", "pw").await.unwrap();
        wf.select_patient("p-100").await.unwrap();
        wf.open_encounter(Purpose::Treatment, None).await.unwrap();

        let encounter = wf
            .break_glass("p-200", "collapsed in waiting room", models::EmergencyType::LifeThreatening)
            .await
            .unwrap();
        assert_eq!(encounter.patient_id, "p-200");
    }

    #[tokio::test]
    async fn operations_out_of_order_are_invalid_transitions() {
        let api = Arc::new(StubApi::new(Role::Doctor, &[Purpose::Treatment]));
        let (mut wf, _dir) = workflow_with(api.clone()).await;

        // No session at all.
        let err = wf.select_patient("p-100").await.unwrap_err();
        assert!(matches!(
            err,
            AccessError::InvalidTransition { .. } | AccessError::NotAuthenticated
        ));

        wf.sign_in_staff("dr-jones", "pw").await.unwrap();
        // Opening an encounter before selecting a patient.
        let err = wf.open_encounter(Purpose::Treatment, None).await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidTransition { .. }));

        // Selecting a patient twice without finishing the first flow.
        wf.select_patient("p-100").await.unwrap();
        let err = wf.select_patient("p-101").await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn empty_password_never_reaches_the_network() {
        let api = Arc::new(StubApi::new(Role::Doctor, &[Purpose::Treatment]));
        let (mut wf, _dir) = workflow_with(api.clone()).await;

        let err = wf.sign_in_staff("dr-jones", "").await.unwrap_err();
        assert_eq!(
            err,
            AccessError::Validation(ValidationError::MissingPassword)
        );
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn sign_out_clears_the_persisted_session() {
        let api = Arc::new(StubApi::new(Role::Admin, &[Purpose::Emergency]));
        let (mut wf, _dir) = workflow_with(api.clone()).await;
        wf.sign_in_staff("admin-1", "pw").await.unwrap();
        assert!(wf.session().await.is_ok());

        wf.sign_out().await.unwrap();
        assert_eq!(*wf.state(), AccessState::Unauthenticated);
        assert!(matches!(
            wf.session().await.unwrap_err(),
            AccessError::NotAuthenticated
        ));
    }

    #[tokio::test]
    async fn patient_login_lands_on_the_consent_route() {
        let api = Arc::new(StubApi::new(Role::Patient, &[]));
        let (mut wf, _dir) = workflow_with(api.clone()).await;
        let (session, route) = wf.sign_in_patient("p-100", "pw").await.unwrap();
        assert_eq!(session.role, Role::Patient);
        assert_eq!(route, "/consent");
    }
}
