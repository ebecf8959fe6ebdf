// clinical_access/src/lib.rs
//! The clinical access workflow: everything between "who are you" and
//! "here is a scoped encounter". Consent lookup, purpose declaration,
//! encounter creation, break-glass override, capability checks and the
//! state machine tying them together.

pub mod capabilities;
pub mod consent;
pub mod purposes;
pub mod timeline;
pub mod workflow;

pub use capabilities::{capabilities_for, has_capability, landing_route, Capability};
pub use consent::ConsentService;
pub use purposes::{selectable_purposes, PurposeDeclaration};
pub use timeline::TimelineService;
pub use workflow::{AccessState, AccessWorkflow};
