// client/src/session_store/session_store.rs
//! File-backed holder of the one active session. Every gated command reads
//! it; only sign-in and sign-out write it. Two concurrent processes may
//! hold divergent views until restart, the same way two browser tabs did.
use std::path::{Path, PathBuf};
use std::sync::Arc;
use log::{debug, warn};
use tokio::sync::RwLock;

use models::errors::{AccessError, AccessResult};
use models::session::Session;

#[derive(Clone)]
pub struct SessionStore {
    path: PathBuf,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// Open the store, loading a persisted session if one survives. A
    /// corrupt record is discarded with a warning, never an error. An
    /// expired record is discarded too: expiry forces re-login.
    pub fn open(path: &Path) -> Self {
        let current = match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) if session.is_expired() => {
                    warn!(
                        "Persisted session for {} expired at {}, discarding",
                        session.user_id, session.expires_at
                    );
                    None
                }
                Ok(session) => {
                    debug!("Resumed session for {} ({})", session.user_id, session.role);
                    Some(session)
                }
                Err(e) => {
                    warn!("Discarding unreadable session record at {}: {}", path.display(), e);
                    None
                }
            },
            Err(_) => None,
        };
        SessionStore {
            path: path.to_path_buf(),
            current: Arc::new(RwLock::new(current)),
        }
    }

    /// Persist a freshly authenticated session. The single writer.
    pub async fn store(&self, session: Session) -> AccessResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&session)?;
        std::fs::write(&self.path, raw)?;
        *self.current.write().await = Some(session);
        Ok(())
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// The session, or the error every gated operation reports without one.
    pub async fn require(&self) -> AccessResult<Session> {
        match self.current().await {
            Some(session) if session.is_expired() => {
                Err(AccessError::SessionExpired(session.expires_at.to_rfc3339()))
            }
            Some(session) => Ok(session),
            None => Err(AccessError::NotAuthenticated),
        }
    }

    /// Drop both the in-memory and the persisted record.
    pub async fn clear(&self) -> AccessResult<()> {
        *self.current.write().await = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
