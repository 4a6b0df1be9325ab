//! Application result alias

use super::error::AppError;

/// Result with [`AppError`] as the error type
pub type AppResult<T> = Result<T, AppError>;
