// client/src/config/config_structs.rs
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Backend base URL baked into release builds; override via config file or
/// the BIOTEK_API_URL environment variable.
pub const DEFAULT_BASE_URL: &str = "https://biotek-production.up.railway.app";

pub const ENV_API_URL: &str = "BIOTEK_API_URL";
pub const ENV_SESSION_PATH: &str = "BIOTEK_SESSION_PATH";
pub const ENV_AUDIT_PATH: &str = "BIOTEK_AUDIT_PATH";

const SESSION_FILE_NAME: &str = "session.json";
const AUDIT_FILE_NAME: &str = "audit.jsonl";
const STATE_DIR_NAME: &str = ".biotek";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub audit: AuditConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// No timeout unless configured; a single attempt per user action.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            path: state_dir().join(SESSION_FILE_NAME),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            path: state_dir().join(AUDIT_FILE_NAME),
        }
    }
}

/// Per-user state directory, `$HOME/.biotek`. Falls back to the working
/// directory when HOME is unset (containers, CI).
fn state_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(STATE_DIR_NAME),
        None => PathBuf::from(STATE_DIR_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, DEFAULT_BASE_URL};

    #[test]
    fn defaults_point_at_production() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.api.request_timeout_secs.is_none());
        assert!(config.session.path.ends_with("session.json"));
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_the_rest() {
        let yaml = "api:\n  base_url: http://localhost:8000\n";
        let config: ClientConfig = serde_yaml2::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(config.audit.path.ends_with("audit.jsonl"));
    }
}
