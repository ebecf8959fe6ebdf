// clinical_access/src/timeline/mod.rs

pub mod timeline_service;

pub use timeline_service::{group_by_type, visible_to, TimelineService};
