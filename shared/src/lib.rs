//! Shared types for the Patitas edge server
//!
//! Domain models exchanged between the server and its clients,
//! plus small id/time utilities used everywhere.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
