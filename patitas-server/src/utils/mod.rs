//! Utility module - shared helpers for the server
//!
//! - [`AppError`] / [`AppResult`] - application error type
//! - [`logger`] - tracing setup
//! - [`time`] - business-timezone date helpers
//! - [`validation`] - input length/presence checks

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::AppError;
pub use result::AppResult;
