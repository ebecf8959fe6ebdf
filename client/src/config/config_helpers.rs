// client/src/config/config_helpers.rs
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use serde_yaml2 as serde_yaml;
use models::errors::{AccessError, AccessResult};

use crate::config::config_structs::{
    ClientConfig, ENV_API_URL, ENV_AUDIT_PATH, ENV_SESSION_PATH,
};

/// Load client configuration: compiled-in defaults, then the YAML file if
/// one exists at `path`, then environment overrides. A missing file is not
/// an error; an unreadable or malformed one is.
pub fn load_client_config(path: Option<&Path>) -> AccessResult<ClientConfig> {
    let mut config = match path {
        Some(p) if p.exists() => {
            info!("Loading client config from {}", p.display());
            let raw = std::fs::read_to_string(p)?;
            serde_yaml::from_str(&raw).map_err(|e| {
                AccessError::Config(format!("failed to parse {}: {}", p.display(), e))
            })?
        }
        Some(p) => {
            warn!("Config file {} not found, using defaults", p.display());
            ClientConfig::default()
        }
        None => ClientConfig::default(),
    };

    apply_env_overrides(&mut config);
    debug!("Effective base URL: {}", config.api.base_url);
    Ok(config)
}

fn apply_env_overrides(config: &mut ClientConfig) {
    if let Ok(url) = std::env::var(ENV_API_URL) {
        if !url.trim().is_empty() {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }
    }
    if let Ok(path) = std::env::var(ENV_SESSION_PATH) {
        if !path.is_empty() {
            config.session.path = PathBuf::from(path);
        }
    }
    if let Ok(path) = std::env::var(ENV_AUDIT_PATH) {
        if !path.is_empty() {
            config.audit.path = PathBuf::from(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::load_client_config;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_client_config(Some(&dir.path().join("absent.yaml"))).unwrap();
        assert!(config.api.base_url.starts_with("https://"));
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biotek.yaml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "api:").unwrap();
        writeln!(f, "  base_url: http://127.0.0.1:9000").unwrap();
        writeln!(f, "  request_timeout_secs: 15").unwrap();
        let config = load_client_config(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.request_timeout_secs, Some(15));
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "api: [not a map").unwrap();
        assert!(load_client_config(Some(&path)).is_err());
    }
}
