//! Pension (boarding) domain
//!
//! Owns the cage and stay collections and keeps the occupancy invariant:
//! a cage is `occupied` iff exactly one active stay references it.
//! Billing math lives in [`billing`] as pure date-in/number-out helpers.

pub mod billing;
mod service;

pub use service::{PensionService, PensionSummary};
