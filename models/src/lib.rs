// models/src/lib.rs

// Declare all top-level modules within the 'models' crate
pub mod consent;
pub mod encounter;
pub mod errors;
pub mod purpose;
pub mod roles;
pub mod session;
pub mod timeline;
pub mod wire;

// Re-export the core types for convenience when other crates use 'models::*'
pub use consent::Consent;
pub use encounter::{EmergencyType, Encounter};
pub use errors::{AccessError, AccessResult, ValidationError, ValidationResult};
pub use purpose::{DataCategory, Purpose};
pub use roles::Role;
pub use session::Session;
pub use timeline::{EventType, TimelineEvent, Visibility};
