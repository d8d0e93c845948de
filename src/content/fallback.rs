//! Built-in question pool used when the content provider is unavailable.

use crate::content::provider::{ContentProvider, QuizQuestion};
use crate::core::error::GameResult;
use crate::core::types::Difficulty;
use async_trait::async_trait;
use rand::seq::SliceRandom;

/// Infallible provider backed by the static per-difficulty pools.
///
/// Doubles as the fallback source behind
/// [`fetch_with_fallback`](crate::content::provider::fetch_with_fallback) and
/// as a standalone provider for offline runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticPool;

/// (question, options, correct index, category)
type PoolItem = (&'static str, &'static [&'static str], usize, &'static str);

static EASY: &[PoolItem] = &[
    ("What is 2 + 2?", &["3", "4", "5", "6"], 1, "Math"),
    (
        "Which planet is known as the Red Planet?",
        &["Venus", "Mars", "Jupiter", "Saturn"],
        1,
        "Science",
    ),
    (
        "How many days are in a week?",
        &["five", "six", "seven", "eight"],
        2,
        "General",
    ),
    (
        "Which animal is known as man's best friend?",
        &["Cat", "Dog", "Horse", "Parrot"],
        1,
        "General",
    ),
    (
        "What color do you get by mixing blue and yellow?",
        &["Purple", "Orange", "Green", "Brown"],
        2,
        "Art",
    ),
    (
        "How many legs does a spider have?",
        &["Six", "Eight", "Ten", "Twelve"],
        1,
        "Science",
    ),
];

static MEDIUM: &[PoolItem] = &[
    (
        "What is the capital of Australia?",
        &["Sydney", "Melbourne", "Canberra", "Perth"],
        2,
        "Geography",
    ),
    (
        "Which element has the chemical symbol 'Fe'?",
        &["Fluorine", "Iron", "Lead", "Tin"],
        1,
        "Science",
    ),
    (
        "In which year did the Berlin Wall fall?",
        &["1987", "1989", "1991", "1993"],
        1,
        "History",
    ),
    (
        "Which instrument has 88 keys?",
        &["Organ", "Harpsichord", "Piano", "Accordion"],
        2,
        "Music",
    ),
    (
        "What is the largest ocean on Earth?",
        &["Atlantic", "Indian", "Arctic", "Pacific"],
        3,
        "Geography",
    ),
    (
        "How many bits are in a byte?",
        &["4", "8", "16", "32"],
        1,
        "Tech",
    ),
];

static HARD: &[PoolItem] = &[
    (
        "Who wrote 'One Hundred Years of Solitude'?",
        &[
            "Gabriel Garcia Marquez",
            "Mario Vargas Llosa",
            "Isabel Allende",
            "Pablo Neruda",
        ],
        0,
        "Literature",
    ),
    (
        "What is the only even prime number?",
        &["0", "1", "2", "4"],
        2,
        "Math",
    ),
    (
        "Which physicist introduced the uncertainty principle?",
        &["Bohr", "Heisenberg", "Schrodinger", "Dirac"],
        1,
        "Science",
    ),
    (
        "In what year was the first website published?",
        &["1989", "1991", "1993", "1995"],
        1,
        "Tech",
    ),
    (
        "Which country hosted the first modern Olympic Games?",
        &["Italy", "France", "Greece", "England"],
        2,
        "History",
    ),
];

impl StaticPool {
    /// Pick a random question of the given difficulty from the built-in pool.
    pub fn pick(difficulty: Difficulty) -> QuizQuestion {
        let pool = match difficulty {
            Difficulty::Easy => EASY,
            Difficulty::Medium => MEDIUM,
            Difficulty::Hard => HARD,
        };

        // Pools are non-empty static data, so choose() cannot return None;
        // keep a deterministic first item as the cold path anyway.
        let (question, options, correct_index, category) =
            pool.choose(&mut rand::thread_rng()).unwrap_or(&pool[0]);

        QuizQuestion {
            question: (*question).to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            correct_index: *correct_index,
            category: (*category).to_string(),
            difficulty,
        }
    }
}

#[async_trait]
impl ContentProvider for StaticPool {
    async fn get_question(&self, difficulty: Difficulty) -> GameResult<QuizQuestion> {
        Ok(Self::pick(difficulty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_are_well_formed() {
        for difficulty in Difficulty::all() {
            for _ in 0..20 {
                let q = StaticPool::pick(difficulty);
                assert!(q.options.len() >= 2);
                assert!(q.correct_index < q.options.len());
                assert_eq!(q.difficulty, difficulty);
                assert!(!q.question.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_provider_impl_never_fails() {
        let q = StaticPool.get_question(Difficulty::Medium).await.unwrap();
        assert_eq!(q.difficulty, Difficulty::Medium);
    }
}
