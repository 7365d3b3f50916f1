//! Command Handlers
//!
//! Entry points called by the CLI. Each handler wraps its result in a
//! `CommandResponse` so callers get one envelope shape for every operation.

pub mod analysis;
pub mod chat;
pub mod health;
pub mod settings;

pub use analysis::*;
pub use chat::*;
pub use health::*;
pub use settings::*;
