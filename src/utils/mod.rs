//! Utilities
//!
//! Error types and filesystem locations shared by the application layer.

pub mod error;
pub mod paths;

pub use error::{AppError, AppResult};
