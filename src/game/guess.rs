//! Guess-the-number, one round per (chat, user) in its own typed store.

use crate::core::config::rewards;
use crate::core::error::{GameError, GameResult};
use crate::core::types::GameKey;
use crate::storage::ledger::{CounterField, UserLedger};
use dashmap::DashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_MIN: i64 = 1;
pub const DEFAULT_MAX: i64 = 100;

#[derive(Debug, Clone, Copy)]
struct GuessGame {
    secret: i64,
    tries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    TooLow,
    TooHigh,
    Correct { tries: u32, xp_earned: i64 },
}

#[derive(Debug)]
pub struct GuessNumber {
    games: DashMap<GameKey, GuessGame>,
    ledger: Arc<UserLedger>,
}

impl GuessNumber {
    pub fn new(ledger: Arc<UserLedger>) -> Self {
        Self {
            games: DashMap::new(),
            ledger,
        }
    }

    /// Starts (or restarts) a round with a random secret in 1..=100.
    ///
    /// Unlike quiz sessions, restarting is allowed: there is no score
    /// history to lose, and the original behavior let `/guess start` reroll.
    pub fn start(&self, key: GameKey) -> (i64, i64) {
        let secret = rand::thread_rng().gen_range(DEFAULT_MIN..=DEFAULT_MAX);
        self.start_with_secret(key, secret);
        (DEFAULT_MIN, DEFAULT_MAX)
    }

    pub fn start_with_secret(&self, key: GameKey, secret: i64) {
        self.games.insert(key, GuessGame { secret, tries: 0 });
    }

    /// Checks a guess; a correct one ends the round and pays fixed XP.
    pub fn guess(&self, key: GameKey, n: i64) -> GameResult<GuessOutcome> {
        let won = {
            let mut game = self.games.get_mut(&key).ok_or(GameError::NoActiveSession)?;
            game.tries += 1;
            if n < game.secret {
                return Ok(GuessOutcome::TooLow);
            }
            if n > game.secret {
                return Ok(GuessOutcome::TooHigh);
            }
            game.tries
        };

        self.games.remove(&key);
        self.ledger.increment(key.user, CounterField::Xp, rewards::GUESS_XP);
        Ok(GuessOutcome::Correct {
            tries: won,
            xp_earned: rewards::GUESS_XP,
        })
    }

    pub fn is_active(&self, key: GameKey) -> bool {
        self.games.contains_key(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ChatId, UserId};
    use crate::storage::ledger::UserDefaults;

    fn key() -> GameKey {
        GameKey::new(ChatId(1), UserId(42))
    }

    #[test]
    fn test_guess_without_start() {
        let game = GuessNumber::new(Arc::new(UserLedger::new()));
        assert!(matches!(game.guess(key(), 50), Err(GameError::NoActiveSession)));
    }

    #[test]
    fn test_hints_and_win() {
        let ledger = Arc::new(UserLedger::new());
        ledger.ensure(UserId(42), UserDefaults::default());
        let game = GuessNumber::new(Arc::clone(&ledger));
        game.start_with_secret(key(), 37);

        assert_eq!(game.guess(key(), 10).unwrap(), GuessOutcome::TooLow);
        assert_eq!(game.guess(key(), 80).unwrap(), GuessOutcome::TooHigh);
        assert_eq!(
            game.guess(key(), 37).unwrap(),
            GuessOutcome::Correct {
                tries: 3,
                xp_earned: rewards::GUESS_XP
            }
        );

        // Round is gone and the XP landed
        assert!(!game.is_active(key()));
        assert!(matches!(game.guess(key(), 37), Err(GameError::NoActiveSession)));
        assert_eq!(ledger.get(UserId(42)).unwrap().xp, rewards::GUESS_XP);
    }

    #[test]
    fn test_restart_rerolls() {
        let game = GuessNumber::new(Arc::new(UserLedger::new()));
        game.start_with_secret(key(), 10);
        game.start_with_secret(key(), 20);
        assert_eq!(game.guess(key(), 10).unwrap(), GuessOutcome::TooLow);
    }

    #[test]
    fn test_start_range() {
        let game = GuessNumber::new(Arc::new(UserLedger::new()));
        let (min, max) = game.start(key());
        assert_eq!((min, max), (DEFAULT_MIN, DEFAULT_MAX));
        assert!(game.is_active(key()));
    }
}
