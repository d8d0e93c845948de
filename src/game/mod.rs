//! Game engines: the scored quiz lifecycle plus the three small one-shot
//! minigames. Each game keeps its own typed store; nothing shares an
//! untyped map.

pub mod guess;
pub mod leaderboard;
pub mod quiz;
pub mod roshambo;
pub mod scramble;
pub mod sweeper;

pub use guess::{GuessNumber, GuessOutcome};
pub use leaderboard::{GlobalEntry, LeaderboardView};
pub use quiz::{AnswerOutcome, QuizEngine, QuizResults, QuizSettings};
pub use roshambo::Roshambo;
pub use scramble::{Scramble, ScrambleOutcome};
pub use sweeper::spawn_sweeper;
