//! Data models
//!
//! Shared between patitas-server and the dashboard frontend (via API).
//! All IDs are `i64` snowflake values; timestamps are Unix millis.
//! Calendar dates (check-in, expiry) travel as `YYYY-MM-DD` strings.

pub mod appointment;
pub mod cage;
pub mod campaign;
pub mod client;
pub mod coupon;
pub mod invoice;
pub mod pension_stay;
pub mod sale;
pub mod settings;
pub mod share_content;
pub mod sync;

// Re-exports
pub use appointment::*;
pub use cage::*;
pub use campaign::*;
pub use client::*;
pub use coupon::*;
pub use invoice::*;
pub use pension_stay::*;
pub use sale::*;
pub use settings::*;
pub use share_content::*;
pub use sync::*;
