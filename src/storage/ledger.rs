//! Per-user counter store: experience, coins, flags, and the capped
//! completed-quiz history.
//!
//! Backed by a sharded concurrent map so increments for unrelated users never
//! serialize on a global lock. All mutation of one record happens under that
//! record's shard entry, which is what makes `increment` atomic per field
//! against concurrent writers (the quiz engine and the message counter both
//! credit the same user).

use crate::core::config::{self, rewards};
use crate::core::types::{Difficulty, UserId};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// One completed-session result kept in a user's leaderboard history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    pub total_questions: u32,
    pub duration_seconds: i64,
    pub difficulty: Difficulty,
}

/// One record per distinct end-user identity.
///
/// Created on first contact, mutated by the quiz engine (xp/coins on answer)
/// and by out-of-scope collaborators (message counters, referral bonuses)
/// through the same contract. Never deleted during normal operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: Option<String>,
    pub xp: i64,
    pub coins: i64,
    pub games_played: i64,
    pub messages: i64,
    pub referrals: i64,
    pub premium: bool,
    pub language: String,
    pub joined_at: DateTime<Utc>,
    pub referred_by: Option<UserId>,
    pub history: Vec<LeaderboardEntry>,
}

impl UserRecord {
    /// Level is derived from experience, never stored.
    pub fn level(&self) -> i64 {
        self.xp / rewards::XP_PER_LEVEL + 1
    }
}

/// Caller-supplied defaults for newly created records.
#[derive(Debug, Clone)]
pub struct UserDefaults {
    pub username: Option<String>,
    pub language: String,
    pub premium: bool,
    pub starting_coins: i64,
}

impl Default for UserDefaults {
    fn default() -> Self {
        Self {
            username: None,
            language: "en".to_string(),
            premium: false,
            starting_coins: *config::STARTING_COINS,
        }
    }
}

/// Named numeric fields of a [`UserRecord`], for [`UserLedger::increment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    Xp,
    Coins,
    GamesPlayed,
    Messages,
    Referrals,
}

impl CounterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterField::Xp => "xp",
            CounterField::Coins => "coins",
            CounterField::GamesPlayed => "games_played",
            CounterField::Messages => "messages",
            CounterField::Referrals => "referrals",
        }
    }
}

/// The per-user counter store.
#[derive(Debug, Default)]
pub struct UserLedger {
    users: DashMap<UserId, UserRecord>,
}

impl UserLedger {
    pub fn new() -> Self {
        Self { users: DashMap::new() }
    }

    /// Returns the existing record or creates one with the given defaults.
    ///
    /// Idempotent: concurrent calls for the same user resolve on the shard
    /// entry, so at most one record per id is ever created. An already
    /// existing record only gets its username refreshed.
    pub fn ensure(&self, user_id: UserId, defaults: UserDefaults) -> UserRecord {
        let mut entry = self.users.entry(user_id).or_insert_with(|| {
            log::info!("Creating user record for {}", user_id);
            UserRecord {
                user_id,
                username: defaults.username.clone(),
                xp: 0,
                coins: defaults.starting_coins,
                games_played: 0,
                messages: 0,
                referrals: 0,
                premium: defaults.premium,
                language: defaults.language.clone(),
                joined_at: Utc::now(),
                referred_by: None,
                history: Vec::new(),
            }
        });
        if defaults.username.is_some() && entry.username != defaults.username {
            entry.username = defaults.username;
        }
        entry.clone()
    }

    /// Adds `amount` (may be negative for coin spends) to a named field.
    ///
    /// Best-effort counter semantics: a missing record is logged and skipped,
    /// never an error. Balances are floored at zero.
    pub fn increment(&self, user_id: UserId, field: CounterField, amount: i64) {
        match self.users.get_mut(&user_id) {
            Some(mut record) => {
                let slot = match field {
                    CounterField::Xp => &mut record.xp,
                    CounterField::Coins => &mut record.coins,
                    CounterField::GamesPlayed => &mut record.games_played,
                    CounterField::Messages => &mut record.messages,
                    CounterField::Referrals => &mut record.referrals,
                };
                *slot = (*slot + amount).max(0);
            }
            None => {
                log::warn!(
                    "increment({}, {:+}) for unknown user {}, skipping",
                    field.as_str(),
                    amount,
                    user_id
                );
            }
        }
    }

    /// Snapshot of a record, if it exists.
    pub fn get(&self, user_id: UserId) -> Option<UserRecord> {
        self.users.get(&user_id).map(|r| r.clone())
    }

    pub fn set_premium(&self, user_id: UserId, premium: bool) {
        match self.users.get_mut(&user_id) {
            Some(mut record) => record.premium = premium,
            None => log::warn!("set_premium for unknown user {}, skipping", user_id),
        }
    }

    pub fn set_language(&self, user_id: UserId, language: &str) {
        match self.users.get_mut(&user_id) {
            Some(mut record) => record.language = language.to_string(),
            None => log::warn!("set_language for unknown user {}, skipping", user_id),
        }
    }

    /// Records the referrer once; later calls do not overwrite.
    pub fn set_referred_by(&self, user_id: UserId, referrer: UserId) {
        match self.users.get_mut(&user_id) {
            Some(mut record) => {
                if record.referred_by.is_none() && user_id != referrer {
                    record.referred_by = Some(referrer);
                }
            }
            None => log::warn!("set_referred_by for unknown user {}, skipping", user_id),
        }
    }

    /// Appends a completed-session result to the user's capped history.
    ///
    /// The history stays sorted by score descending (stable, so ties keep
    /// insertion order) and holds at most
    /// [`HISTORY_CAP`](config::leaderboard::HISTORY_CAP) entries; the lowest
    /// score at time of insertion is evicted.
    pub fn record_result(&self, user_id: UserId, entry: LeaderboardEntry) {
        match self.users.get_mut(&user_id) {
            Some(mut record) => {
                record.history.push(entry);
                record.history.sort_by_key(|e| std::cmp::Reverse(e.score));
                record.history.truncate(config::leaderboard::HISTORY_CAP);
            }
            None => log::warn!("record_result for unknown user {}, skipping", user_id),
        }
    }

    /// Every user's history, for the global leaderboard view.
    pub fn snapshot_histories(&self) -> Vec<(UserId, Vec<LeaderboardEntry>)> {
        self.users
            .iter()
            .filter(|r| !r.history.is_empty())
            .map(|r| (r.user_id, r.history.clone()))
            .collect()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn premium_count(&self) -> usize {
        self.users.iter().filter(|r| r.premium).count()
    }
}
