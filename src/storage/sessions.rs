//! Active quiz sessions, keyed by (chat, user).
//!
//! Zero or one session per pair. Mutation happens in place under the shard
//! entry, so different pairs never contend on a global lock; the host
//! delivers one user's updates serially, which orders start before answers
//! for the same key.

use crate::content::provider::QuizQuestion;
use crate::core::error::{GameError, GameResult};
use crate::core::types::{Difficulty, GameKey};
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// State of one in-progress quiz for a chat+user pair.
///
/// Invariants: `questions_asked <= question_limit` and
/// `score <= questions_asked`. A session that has reached its limit is
/// removed from the store at completion, so a stored session always accepts
/// one more answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSession {
    pub key: GameKey,
    pub difficulty: Difficulty,
    pub score: u32,
    pub questions_asked: u32,
    pub question_limit: u32,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Ordered history of issued questions; the last one is the question
    /// currently awaiting an answer.
    pub questions: Vec<QuizQuestion>,
}

impl QuizSession {
    /// The question the next answer will be scored against.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.last()
    }

    pub fn is_full(&self) -> bool {
        self.questions_asked >= self.question_limit
    }

    pub fn duration_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// Result of scoring one answer against a stored session.
#[derive(Debug, Clone, Copy)]
pub struct ScoredAnswer {
    pub was_correct: bool,
    pub score: u32,
    pub questions_asked: u32,
    /// The session hit its question limit and must now be terminated.
    pub finished: bool,
}

/// Store of active quiz sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<GameKey, QuizSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Creates a session with its first issued question.
    ///
    /// Rejects with [`GameError::AlreadyActive`] when the pair already has a
    /// session; silently overwriting would lose the running score. The check
    /// and insert resolve atomically on the shard entry.
    pub fn create(
        &self,
        key: GameKey,
        difficulty: Difficulty,
        question_limit: u32,
        first_question: QuizQuestion,
    ) -> GameResult<()> {
        match self.sessions.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(GameError::AlreadyActive),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let now = Utc::now();
                slot.insert(QuizSession {
                    key,
                    difficulty,
                    score: 0,
                    questions_asked: 0,
                    question_limit,
                    started_at: now,
                    last_activity: now,
                    questions: vec![first_question],
                });
                log::debug!("Created {} quiz session for {}", difficulty, key);
                Ok(())
            }
        }
    }

    /// Snapshot of the session for the pair, if any.
    pub fn get(&self, key: GameKey) -> Option<QuizSession> {
        self.sessions.get(&key).map(|s| s.clone())
    }

    /// Scores `choice` against the session's current question and bumps the
    /// counters. Does not issue the next question or remove the session;
    /// the engine decides between [`advance`](Self::advance) and
    /// [`terminate`](Self::terminate) based on `finished`.
    pub fn score_answer(&self, key: GameKey, choice: usize) -> GameResult<ScoredAnswer> {
        let mut session = self.sessions.get_mut(&key).ok_or(GameError::NoActiveSession)?;
        if session.is_full() {
            // Full sessions are removed at completion; one still here means
            // the caller answered a finished quiz.
            return Err(GameError::NoActiveSession);
        }

        let was_correct = session
            .current_question()
            .map(|q| q.is_correct(choice))
            .unwrap_or(false);

        session.questions_asked += 1;
        if was_correct {
            session.score += 1;
        }
        session.last_activity = Utc::now();

        Ok(ScoredAnswer {
            was_correct,
            score: session.score,
            questions_asked: session.questions_asked,
            finished: session.is_full(),
        })
    }

    /// Appends the next issued question.
    pub fn advance(&self, key: GameKey, next_question: QuizQuestion) -> GameResult<()> {
        let mut session = self.sessions.get_mut(&key).ok_or(GameError::NoActiveSession)?;
        session.questions.push(next_question);
        session.last_activity = Utc::now();
        Ok(())
    }

    /// Removes and returns the session for finalization.
    pub fn terminate(&self, key: GameKey) -> GameResult<QuizSession> {
        self.sessions
            .remove(&key)
            .map(|(_, session)| session)
            .ok_or(GameError::NoActiveSession)
    }

    /// Removes and returns all sessions idle longer than `max_age`.
    ///
    /// Resource-leak guard, not a gameplay feature: swept sessions are
    /// terminated without scoring and produce no ledger update. The threshold
    /// is a parameter so tests and deployments can tune it.
    pub fn sweep_expired(&self, max_age: Duration) -> Vec<QuizSession> {
        let cutoff = TimeDelta::from_std(max_age).unwrap_or(TimeDelta::MAX);
        let now = Utc::now();

        let expired: Vec<GameKey> = self
            .sessions
            .iter()
            .filter(|s| now - s.last_activity > cutoff)
            .map(|s| s.key)
            .collect();

        expired
            .into_iter()
            .filter_map(|key| self.sessions.remove(&key).map(|(_, s)| s))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback::StaticPool;
    use crate::core::types::{ChatId, UserId};
    use pretty_assertions::assert_eq;

    fn key() -> GameKey {
        GameKey::new(ChatId(1), UserId(42))
    }

    fn question() -> QuizQuestion {
        StaticPool::pick(Difficulty::Easy)
    }

    #[test]
    fn test_create_rejects_duplicate() {
        let store = SessionStore::new();
        store.create(key(), Difficulty::Easy, 5, question()).unwrap();

        let err = store.create(key(), Difficulty::Hard, 5, question()).unwrap_err();
        assert!(matches!(err, GameError::AlreadyActive));

        // The original session survives, score history intact
        assert_eq!(store.get(key()).unwrap().difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_independent_sessions_per_chat_and_user() {
        let store = SessionStore::new();
        store
            .create(GameKey::new(ChatId(1), UserId(42)), Difficulty::Easy, 5, question())
            .unwrap();
        store
            .create(GameKey::new(ChatId(1), UserId(43)), Difficulty::Easy, 5, question())
            .unwrap();
        store
            .create(GameKey::new(ChatId(2), UserId(42)), Difficulty::Easy, 5, question())
            .unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_score_answer_counts_and_finishes() {
        let store = SessionStore::new();
        let q = question();
        let correct = q.correct_index;
        store.create(key(), Difficulty::Easy, 2, q).unwrap();

        let first = store.score_answer(key(), correct).unwrap();
        assert!(first.was_correct);
        assert_eq!(first.score, 1);
        assert_eq!(first.questions_asked, 1);
        assert!(!first.finished);

        store.advance(key(), question()).unwrap();
        let wrong_choice = 999;
        let second = store.score_answer(key(), wrong_choice).unwrap();
        assert!(!second.was_correct);
        assert_eq!(second.score, 1);
        assert_eq!(second.questions_asked, 2);
        assert!(second.finished);
    }

    #[test]
    fn test_score_answer_without_session() {
        let store = SessionStore::new();
        let err = store.score_answer(key(), 0).unwrap_err();
        assert!(matches!(err, GameError::NoActiveSession));
    }

    #[test]
    fn test_terminate_removes() {
        let store = SessionStore::new();
        store.create(key(), Difficulty::Easy, 5, question()).unwrap();

        let session = store.terminate(key()).unwrap();
        assert_eq!(session.key, key());
        assert!(store.get(key()).is_none());
        assert!(matches!(store.terminate(key()), Err(GameError::NoActiveSession)));
    }

    #[test]
    fn test_sweep_expired() {
        let store = SessionStore::new();
        store.create(key(), Difficulty::Easy, 5, question()).unwrap();

        // Generous threshold: nothing to sweep
        assert!(store.sweep_expired(Duration::from_secs(600)).is_empty());
        assert_eq!(store.len(), 1);

        // Zero threshold: any elapsed time is "too idle"
        std::thread::sleep(Duration::from_millis(5));
        let swept = store.sweep_expired(Duration::ZERO);
        assert_eq!(swept.len(), 1);
        assert!(store.is_empty());
    }
}
