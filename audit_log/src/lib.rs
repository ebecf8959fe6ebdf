// audit_log/src/lib.rs

pub mod audit;

pub use audit::{AuditAction, AuditEvent, AuditSink, FileAuditLog};
