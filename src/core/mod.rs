//! Core utilities, configuration, and common types

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-exports for convenience
pub use error::{GameError, GameResult};
pub use logging::init_logger;
pub use types::{ChatId, Difficulty, GameKey, UserId};
