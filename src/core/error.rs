use crate::core::types::UserId;
use thiserror::Error;

/// Centralized error types for the game core
///
/// Input-validation and protocol-sequencing errors are surfaced to the caller
/// as typed failures for it to render as a user message. Transient content
/// fetch failures (`ProviderUnavailable`) are recovered internally via the
/// static fallback pool and never reach a caller of the engine.
#[derive(Error, Debug)]
pub enum GameError {
    /// Difficulty string is not one of easy/medium/hard; rejected before any
    /// side effect
    #[error("Unknown difficulty: {0}")]
    InvalidDifficulty(String),

    /// A quiz session already exists for this (chat, user) pair
    #[error("A quiz is already running for this chat and user")]
    AlreadyActive,

    /// An answer (or guess) arrived with no running game for the pair
    #[error("No active game for this chat and user")]
    NoActiveSession,

    /// User is on the ban list; rejected before any side effect
    #[error("User {0} is banned")]
    Banned(UserId),

    /// Content provider failed or timed out. Internal only: the engine
    /// converts this to fallback content before returning to the caller.
    #[error("Content provider unavailable: {0}")]
    ProviderUnavailable(String),
}

/// Type alias for Result with GameError
pub type GameResult<T> = Result<T, GameError>;
