//! Leaderboard views, recomputed over ledger histories on every call.
//!
//! No incremental index: at bot scale a full scan per /leaderboard command
//! is cheaper than keeping one coherent.

use crate::core::config;
use crate::core::types::{Difficulty, UserId};
use crate::storage::ledger::{LeaderboardEntry, UserLedger};
use serde::{Deserialize, Serialize};

/// One row of the global top view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalEntry {
    pub user_id: UserId,
    pub score: u32,
    pub difficulty: Difficulty,
}

/// What `get_leaderboard` returns, depending on whether a user was named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeaderboardView {
    Personal(Vec<LeaderboardEntry>),
    Global(Vec<GlobalEntry>),
}

/// A user's stored history, already sorted score-descending by the ledger.
pub fn per_user(ledger: &UserLedger, user: UserId) -> Vec<LeaderboardEntry> {
    ledger.get(user).map(|r| r.history).unwrap_or_default()
}

/// Top scores across all users' stored entries, score descending.
pub fn global(ledger: &UserLedger) -> Vec<GlobalEntry> {
    let mut all: Vec<GlobalEntry> = ledger
        .snapshot_histories()
        .into_iter()
        .flat_map(|(user_id, history)| {
            history.into_iter().map(move |e| GlobalEntry {
                user_id,
                score: e.score,
                difficulty: e.difficulty,
            })
        })
        .collect();

    all.sort_by_key(|e| std::cmp::Reverse(e.score));
    all.truncate(config::leaderboard::GLOBAL_TOP);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Difficulty;
    use crate::storage::ledger::UserDefaults;
    use pretty_assertions::assert_eq;

    fn entry(score: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            score,
            total_questions: 5,
            duration_seconds: 20,
            difficulty: Difficulty::Medium,
        }
    }

    #[test]
    fn test_per_user_empty_without_record() {
        let ledger = UserLedger::new();
        assert!(per_user(&ledger, UserId(1)).is_empty());
    }

    #[test]
    fn test_global_top_across_users() {
        let ledger = UserLedger::new();
        for uid in 1..=3 {
            ledger.ensure(UserId(uid), UserDefaults::default());
        }
        ledger.record_result(UserId(1), entry(5));
        ledger.record_result(UserId(1), entry(2));
        ledger.record_result(UserId(2), entry(4));
        ledger.record_result(UserId(3), entry(3));

        let top = global(&ledger);
        assert_eq!(top.len(), 4);
        let scores: Vec<u32> = top.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![5, 4, 3, 2]);
        assert_eq!(top[0].user_id, UserId(1));
    }

    #[test]
    fn test_global_caps_at_ten() {
        let ledger = UserLedger::new();
        for uid in 1..=6 {
            ledger.ensure(UserId(uid), UserDefaults::default());
            ledger.record_result(UserId(uid), entry(1));
            ledger.record_result(UserId(uid), entry(2));
            ledger.record_result(UserId(uid), entry(3));
        }
        // 18 entries stored, view returns 10
        assert_eq!(global(&ledger).len(), 10);
    }

    #[test]
    fn test_global_is_idempotent() {
        let ledger = UserLedger::new();
        ledger.ensure(UserId(1), UserDefaults::default());
        ledger.record_result(UserId(1), entry(4));

        assert_eq!(global(&ledger), global(&ledger));
        assert_eq!(per_user(&ledger, UserId(1)), per_user(&ledger, UserId(1)));
    }
}
