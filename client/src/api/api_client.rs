// client/src/api/api_client.rs
//! Typed HTTP client for the BioTek backend. One method per endpoint, one
//! attempt per call. Non-2xx responses surface the server's `detail` text
//! verbatim; transport failures map to `AccessError::Network`.
use std::time::Duration;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};

use models::errors::{AccessError, AccessResult};
use models::roles::Role;
use models::wire::{
    ApiErrorBody, BreakGlassRequest, ConsentResponse, EncounterListResponse,
    EncounterRequest, EncounterResponse, PatientLoginRequest, PatientLoginResponse,
    StaffLoginRequest, StaffLoginResponse, TimelineResponse,
};

use crate::config::config_structs::ApiConfig;

/// The backend surface the workflow depends on. Kept behind a trait so the
/// workflow tests can run against an in-process stub.
#[async_trait]
pub trait AccessApi: Send + Sync {
    async fn login_patient(&self, req: PatientLoginRequest) -> AccessResult<PatientLoginResponse>;
    async fn login_staff(&self, req: StaffLoginRequest) -> AccessResult<StaffLoginResponse>;
    async fn fetch_consent(
        &self,
        patient_id: &str,
        caller_role: Role,
        caller_id: &str,
    ) -> AccessResult<ConsentResponse>;
    async fn create_encounter(
        &self,
        token: &str,
        req: EncounterRequest,
    ) -> AccessResult<EncounterResponse>;
    async fn break_glass(
        &self,
        token: &str,
        req: BreakGlassRequest,
    ) -> AccessResult<EncounterResponse>;
    async fn list_encounters(
        &self,
        token: &str,
        patient_id: &str,
    ) -> AccessResult<EncounterListResponse>;
    async fn fetch_timeline(
        &self,
        token: &str,
        encounter_id: &str,
    ) -> AccessResult<TimelineResponse>;
}

pub struct HttpAccessApi {
    base_url: String,
    http: Client,
}

impl HttpAccessApi {
    pub fn new(config: &ApiConfig) -> AccessResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| AccessError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(HttpAccessApi {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a 2xx body, or turn a non-2xx response into `Api { detail }`.
    async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> AccessResult<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(Self::error_from(status, resp).await)
    }

    async fn error_from(status: StatusCode, resp: Response) -> AccessError {
        let fallback = status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
        let detail = match resp.json::<ApiErrorBody>().await {
            Ok(body) => body.detail,
            Err(e) => {
                warn!("Non-2xx response without a detail body: {}", e);
                fallback
            }
        };
        AccessError::Api {
            status: status.as_u16(),
            detail,
        }
    }
}

#[async_trait]
impl AccessApi for HttpAccessApi {
    async fn login_patient(&self, req: PatientLoginRequest) -> AccessResult<PatientLoginResponse> {
        debug!("POST /auth/login-patient for {}", req.patient_id);
        let resp = self
            .http
            .post(self.url("/auth/login-patient"))
            .json(&req)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn login_staff(&self, req: StaffLoginRequest) -> AccessResult<StaffLoginResponse> {
        debug!("POST /auth/login-staff for {}", req.user_id);
        let resp = self
            .http
            .post(self.url("/auth/login-staff"))
            .json(&req)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn fetch_consent(
        &self,
        patient_id: &str,
        caller_role: Role,
        caller_id: &str,
    ) -> AccessResult<ConsentResponse> {
        debug!("GET /auth/consent/{}", patient_id);
        let resp = self
            .http
            .get(self.url(&format!("/auth/consent/{}", patient_id)))
            .header("X-User-Role", caller_role.as_str())
            .header("X-User-ID", caller_id)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn create_encounter(
        &self,
        token: &str,
        req: EncounterRequest,
    ) -> AccessResult<EncounterResponse> {
        debug!("POST /auth/encounters for {}", req.patient_id);
        let resp = self
            .http
            .post(self.url("/auth/encounters"))
            .bearer_auth(token)
            .json(&req)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn break_glass(
        &self,
        token: &str,
        req: BreakGlassRequest,
    ) -> AccessResult<EncounterResponse> {
        debug!("POST /auth/break-glass for {}", req.patient_id);
        let resp = self
            .http
            .post(self.url("/auth/break-glass"))
            .bearer_auth(token)
            .json(&req)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn list_encounters(
        &self,
        token: &str,
        patient_id: &str,
    ) -> AccessResult<EncounterListResponse> {
        let resp = self
            .http
            .get(self.url(&format!("/patients/{}/encounters", patient_id)))
            .bearer_auth(token)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn fetch_timeline(
        &self,
        token: &str,
        encounter_id: &str,
    ) -> AccessResult<TimelineResponse> {
        let resp = self
            .http
            .get(self.url(&format!("/encounters/{}/timeline", encounter_id)))
            .bearer_auth(token)
            .send()
            .await?;
        Self::decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::HttpAccessApi;
    use crate::config::config_structs::ApiConfig;

    #[test]
    fn base_url_loses_its_trailing_slash() {
        let api = HttpAccessApi::new(&ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            request_timeout_secs: None,
        })
        .unwrap();
        assert_eq!(api.url("/auth/encounters"), "http://localhost:8000/auth/encounters");
    }
}
