//! Configuration loading for the spacebridge client.
//!
//! Uses figment to merge YAML files and `SPACEBRIDGE_*` environment
//! variables over sensible defaults.

pub mod schema;

pub use schema::{ClientConfig, DEFAULT_BASE_URL};
