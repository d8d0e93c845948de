//! Rock-paper-scissors. Stateless: one call, one round.

use crate::core::config::rewards;
use crate::core::types::UserId;
use crate::storage::ledger::{CounterField, UserLedger};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    fn random() -> Self {
        *[Move::Rock, Move::Paper, Move::Scissors]
            .choose(&mut rand::thread_rng())
            .unwrap_or(&Move::Rock)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(format!("Unknown move: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

/// Pure round decision, separated from rand and the ledger for testing.
pub fn decide(user: Move, bot: Move) -> Outcome {
    if user == bot {
        return Outcome::Draw;
    }
    match (user, bot) {
        (Move::Rock, Move::Scissors) | (Move::Paper, Move::Rock) | (Move::Scissors, Move::Paper) => Outcome::Win,
        _ => Outcome::Lose,
    }
}

/// One played round, ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub user_move: Move,
    pub bot_move: Move,
    pub outcome: Outcome,
    pub xp_earned: i64,
}

#[derive(Debug)]
pub struct Roshambo {
    ledger: Arc<UserLedger>,
}

impl Roshambo {
    pub fn new(ledger: Arc<UserLedger>) -> Self {
        Self { ledger }
    }

    /// Plays one round against a random bot move; a win pays fixed XP.
    pub fn play(&self, user_id: UserId, user_move: Move) -> Round {
        self.play_against(user_id, user_move, Move::random())
    }

    pub fn play_against(&self, user_id: UserId, user_move: Move, bot_move: Move) -> Round {
        let outcome = decide(user_move, bot_move);
        let xp_earned = if outcome == Outcome::Win { rewards::ROSHAMBO_XP } else { 0 };
        if xp_earned > 0 {
            self.ledger.increment(user_id, CounterField::Xp, xp_earned);
        }
        Round {
            user_move,
            bot_move,
            outcome,
            xp_earned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ledger::UserDefaults;
    use std::sync::Arc;

    #[test]
    fn test_decide_covers_all_pairs() {
        use Move::*;
        assert_eq!(decide(Rock, Scissors), Outcome::Win);
        assert_eq!(decide(Paper, Rock), Outcome::Win);
        assert_eq!(decide(Scissors, Paper), Outcome::Win);
        assert_eq!(decide(Scissors, Rock), Outcome::Lose);
        assert_eq!(decide(Rock, Paper), Outcome::Lose);
        assert_eq!(decide(Paper, Scissors), Outcome::Lose);
        assert_eq!(decide(Rock, Rock), Outcome::Draw);
    }

    #[test]
    fn test_move_from_str() {
        assert_eq!(Move::from_str("rock").unwrap(), Move::Rock);
        assert!(Move::from_str("lizard").is_err());
    }

    #[test]
    fn test_win_pays_xp() {
        let ledger = Arc::new(UserLedger::new());
        ledger.ensure(UserId(1), UserDefaults::default());
        let game = Roshambo::new(Arc::clone(&ledger));

        let round = game.play_against(UserId(1), Move::Rock, Move::Scissors);
        assert_eq!(round.outcome, Outcome::Win);
        assert_eq!(ledger.get(UserId(1)).unwrap().xp, rewards::ROSHAMBO_XP);

        // Draw and loss pay nothing
        game.play_against(UserId(1), Move::Rock, Move::Rock);
        game.play_against(UserId(1), Move::Rock, Move::Paper);
        assert_eq!(ledger.get(UserId(1)).unwrap().xp, rewards::ROSHAMBO_XP);
    }
}
