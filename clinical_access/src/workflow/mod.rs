// clinical_access/src/workflow/mod.rs

pub mod access_workflow;

pub use access_workflow::{
    validate_justification, AccessState, AccessWorkflow, MIN_JUSTIFICATION_CHARS,
};
