// clinical_access/src/capabilities/mod.rs

pub mod capabilities;
pub mod routing;

pub use capabilities::{capabilities_for, has_capability, Capability};
pub use routing::{landing_route, route_for};
