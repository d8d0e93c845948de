//! PlayPal core - quiz engine, reward ledger, and minigames for the PlayPal bot
//!
//! This library holds everything stateful behind the bot's game commands:
//! session lifecycles, per-user counters, leaderboards, and the content
//! provider seam with its offline fallback. It performs no I/O of its own;
//! the Telegram surface, the trivia/meme API clients, and the keep-alive
//! web endpoint live in the bot binary and talk to this crate through
//! opaque chat/user identifiers.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, and common types
//! - `content`: the provider trait, static fallback pool, and recent-items cache
//! - `storage`: user ledger, session store, and ban registry
//! - `game`: the quiz engine, leaderboard views, session sweeper, and minigames

pub mod content;
pub mod core;
pub mod game;
pub mod storage;

// Re-export commonly used types for convenience
pub use content::{ContentProvider, QuizQuestion, StaticPool};
pub use core::{ChatId, Difficulty, GameError, GameKey, GameResult, UserId};
pub use game::{spawn_sweeper, AnswerOutcome, QuizEngine, QuizResults, QuizSettings};
pub use storage::{BanList, SessionStore, UserLedger};
