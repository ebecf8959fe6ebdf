// client/src/api/mod.rs

pub mod api_client;

pub use api_client::{AccessApi, HttpAccessApi};
