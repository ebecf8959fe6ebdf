// audit_log/src/audit.rs
//! Client-side audit journal. Every workflow transition that touches
//! patient data appends one JSONL record and emits a structured log line.
//! Advisory only: the backend keeps the authoritative audit trail.
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slog::{info, o, Drain, Logger};
use tokio::sync::Mutex;
use uuid::Uuid;

use models::errors::{AccessError, AccessResult};
use models::purpose::Purpose;
use models::roles::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditAction {
    SignIn,
    SignOut,
    ConsentViewed,
    PurposeDeclared { purpose: Purpose },
    EncounterOpened,
    BreakGlassInvoked { reason: String },
    TimelineViewed,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditAction::SignIn => write!(f, "sign_in"),
            AuditAction::SignOut => write!(f, "sign_out"),
            AuditAction::ConsentViewed => write!(f, "consent_viewed"),
            AuditAction::PurposeDeclared { purpose } => {
                write!(f, "purpose_declared:{}", purpose)
            }
            AuditAction::EncounterOpened => write!(f, "encounter_opened"),
            AuditAction::BreakGlassInvoked { .. } => write!(f, "break_glass_invoked"),
            AuditAction::TimelineViewed => write!(f, "timeline_viewed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub actor_id: String,
    pub actor_role: Role,
    pub action: AuditAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter_id: Option<String>,
}

impl AuditEvent {
    pub fn new(actor_id: &str, actor_role: Role, action: AuditAction) -> Self {
        AuditEvent {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            actor_id: actor_id.to_string(),
            actor_role,
            action,
            patient_id: None,
            encounter_id: None,
        }
    }

    pub fn for_patient(mut self, patient_id: &str) -> Self {
        self.patient_id = Some(patient_id.to_string());
        self
    }

    pub fn for_encounter(mut self, encounter_id: &str) -> Self {
        self.encounter_id = Some(encounter_id.to_string());
        self
    }
}

#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: AuditEvent) -> AccessResult<()>;
}

pub struct FileAuditLog {
    logger: Logger,
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl FileAuditLog {
    pub fn open(path: &Path) -> AccessResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let decorator = slog_term::TermDecorator::new().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        let logger = Logger::root(drain, o!("journal" => path.display().to_string()));

        Ok(FileAuditLog {
            logger,
            path: path.to_path_buf(),
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditSink for FileAuditLog {
    async fn record(&self, event: AuditEvent) -> AccessResult<()> {
        info!(self.logger, "audit";
            "action" => %event.action,
            "actor" => event.actor_id.as_str(),
            "role" => event.actor_role.as_str(),
            "patient" => event.patient_id.as_deref().unwrap_or("-")
        );

        let line = serde_json::to_string(&event)?;
        let mut file = self.file.lock().await;
        writeln!(file, "{}", line)
            .map_err(|e| AccessError::Audit(format!("failed to append audit record: {}", e)))?;
        Ok(())
    }
}
