//! In-process stores: the user ledger, active game sessions, and the ban
//! registry. All are safe under concurrent access from different
//! (chat, user) keys via per-key shard entries, never a single global lock.

pub mod bans;
pub mod ledger;
pub mod sessions;

pub use bans::BanList;
pub use ledger::{CounterField, LeaderboardEntry, UserDefaults, UserLedger, UserRecord};
pub use sessions::{QuizSession, SessionStore};
