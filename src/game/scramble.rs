//! Word scramble, one round per (chat, user) in its own typed store.

use crate::core::config::rewards;
use crate::core::error::{GameError, GameResult};
use crate::core::types::GameKey;
use crate::storage::ledger::{CounterField, UserLedger};
use dashmap::DashMap;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

static WORDS: &[&str] = &[
    "banana", "puzzle", "galaxy", "keyboard", "meteor", "jungle", "wizard", "rocket", "island", "violin",
];

#[derive(Debug, Clone)]
struct ScrambleRound {
    word: String,
    scrambled: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrambleOutcome {
    Correct { word: String, xp_earned: i64 },
    Incorrect,
}

/// Shuffle the word's letters, rerolling a few times so the puzzle does not
/// come out identical to the answer (single-letter words aside).
fn scramble_word(word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    let mut rng = rand::thread_rng();
    for _ in 0..8 {
        chars.shuffle(&mut rng);
        let candidate: String = chars.iter().collect();
        if candidate != word {
            return candidate;
        }
    }
    chars.iter().collect()
}

#[derive(Debug)]
pub struct Scramble {
    rounds: DashMap<GameKey, ScrambleRound>,
    ledger: Arc<UserLedger>,
}

impl Scramble {
    pub fn new(ledger: Arc<UserLedger>) -> Self {
        Self {
            rounds: DashMap::new(),
            ledger,
        }
    }

    /// Starts (or restarts) a round with a random word; returns the
    /// scrambled form to display.
    pub fn start(&self, key: GameKey) -> String {
        let word = WORDS.choose(&mut rand::thread_rng()).unwrap_or(&WORDS[0]);
        self.start_with_word(key, word)
    }

    pub fn start_with_word(&self, key: GameKey, word: &str) -> String {
        let scrambled = scramble_word(word);
        self.rounds.insert(
            key,
            ScrambleRound {
                word: word.to_string(),
                scrambled: scrambled.clone(),
            },
        );
        scrambled
    }

    /// Case-insensitive check; a correct guess ends the round and pays XP.
    pub fn guess(&self, key: GameKey, text: &str) -> GameResult<ScrambleOutcome> {
        let word = {
            let round = self.rounds.get(&key).ok_or(GameError::NoActiveSession)?;
            if !text.trim().eq_ignore_ascii_case(&round.word) {
                return Ok(ScrambleOutcome::Incorrect);
            }
            round.word.clone()
        };

        self.rounds.remove(&key);
        self.ledger.increment(key.user, CounterField::Xp, rewards::SCRAMBLE_XP);
        Ok(ScrambleOutcome::Correct {
            word,
            xp_earned: rewards::SCRAMBLE_XP,
        })
    }

    /// The scrambled form of the active round, for re-display.
    pub fn current(&self, key: GameKey) -> Option<String> {
        self.rounds.get(&key).map(|r| r.scrambled.clone())
    }
}
