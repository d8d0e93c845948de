use crate::core::error::{GameError, GameResult};
use crate::core::types::Difficulty;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One quiz item as delivered by a content source.
///
/// The core accepts whatever the provider returns without validating content
/// truthfulness; only the shape matters (at least two options, index in
/// range).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub category: String,
    pub difficulty: Difficulty,
}

impl QuizQuestion {
    /// Exact integer comparison; text-matching fallbacks belong to the
    /// command handler, not here.
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

/// Source of quiz questions (trivia API client, cached feed, static pool).
///
/// Implementations may fail or be slow; callers bound the wait and fall back
/// (see [`fetch_with_fallback`]).
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn get_question(&self, difficulty: Difficulty) -> GameResult<QuizQuestion>;
}

/// Fetch a question, masking provider failure with the static pool.
///
/// The provider call is bounded by `timeout`; on error or timeout the built-in
/// pool supplies the question, so this never fails and a stalled provider
/// cannot stall the quiz.
pub async fn fetch_with_fallback(
    provider: &dyn ContentProvider,
    difficulty: Difficulty,
    timeout: Duration,
) -> QuizQuestion {
    match tokio::time::timeout(timeout, provider.get_question(difficulty)).await {
        Ok(Ok(question)) => question,
        Ok(Err(e)) => {
            log::warn!("Content provider failed ({}), using fallback pool", e);
            crate::content::fallback::StaticPool::pick(difficulty)
        }
        Err(_) => {
            let e = GameError::ProviderUnavailable(format!("timed out after {:?}", timeout));
            log::warn!("{}, using fallback pool", e);
            crate::content::fallback::StaticPool::pick(difficulty)
        }
    }
}
