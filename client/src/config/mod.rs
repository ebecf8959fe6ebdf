// client/src/config/mod.rs

pub mod config_helpers;
pub mod config_structs;

pub use config_helpers::load_client_config;
pub use config_structs::{
    ApiConfig, AuditConfig, ClientConfig, SessionConfig, DEFAULT_BASE_URL,
    ENV_API_URL, ENV_AUDIT_PATH, ENV_SESSION_PATH,
};
