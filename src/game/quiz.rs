//! The quiz session engine.
//!
//! State machine per (chat, user) pair:
//! `NoSession -> AwaitingAnswer -> (AwaitingAnswer | Completed)`.
//! `Completed` is an event, not a resting state: finalization removes the
//! session, credits the ledger, and records the leaderboard entry in one go.

use crate::content::cache::ContentCache;
use crate::content::provider::{fetch_with_fallback, ContentProvider, QuizQuestion};
use crate::core::config::{self, rewards};
use crate::core::error::{GameError, GameResult};
use crate::core::types::{ChatId, Difficulty, GameKey, UserId};
use crate::game::leaderboard::{self, GlobalEntry, LeaderboardView};
use crate::storage::bans::BanList;
use crate::storage::ledger::{CounterField, LeaderboardEntry, UserDefaults, UserLedger};
use crate::storage::sessions::{QuizSession, SessionStore};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Engine knobs, parameterized so tests never depend on the environment.
#[derive(Debug, Clone)]
pub struct QuizSettings {
    pub question_limit: u32,
    pub provider_timeout: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_limit: *config::QUIZ_QUESTION_LIMIT,
            provider_timeout: config::provider::timeout(),
        }
    }
}

/// Final results of a completed session, including the reward delta so the
/// caller can notify the user (the engine itself performs no I/O).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResults {
    pub score: u32,
    pub total_questions: u32,
    pub duration_seconds: i64,
    pub difficulty: Difficulty,
    pub xp_earned: i64,
    pub coins_earned: i64,
    pub new_level: i64,
    pub leveled_up: bool,
}

/// What `submit_answer` hands back to the caller for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    /// The session continues; `question` is the next one to display.
    Next {
        was_correct: bool,
        score: u32,
        question: QuizQuestion,
    },
    /// The session reached its question limit and has been removed.
    Completed { was_correct: bool, results: QuizResults },
}

/// Orchestrates quiz sessions across the stores and the content provider.
pub struct QuizEngine {
    sessions: Arc<SessionStore>,
    ledger: Arc<UserLedger>,
    bans: Arc<BanList>,
    provider: Arc<dyn ContentProvider>,
    recent: ContentCache<QuizQuestion>,
    settings: QuizSettings,
}

impl QuizEngine {
    /// Engine with fresh stores and default settings.
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self::with_parts(
            Arc::new(SessionStore::new()),
            Arc::new(UserLedger::new()),
            Arc::new(BanList::new()),
            provider,
            QuizSettings::default(),
        )
    }

    /// Engine over shared stores; the bot wires the same ledger into its
    /// message counter and referral handler.
    pub fn with_parts(
        sessions: Arc<SessionStore>,
        ledger: Arc<UserLedger>,
        bans: Arc<BanList>,
        provider: Arc<dyn ContentProvider>,
        settings: QuizSettings,
    ) -> Self {
        Self {
            sessions,
            ledger,
            bans,
            provider,
            recent: ContentCache::new(config::content::CACHE_CAP),
            settings,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn ledger(&self) -> &Arc<UserLedger> {
        &self.ledger
    }

    pub fn bans(&self) -> &Arc<BanList> {
        &self.bans
    }

    /// Starts a quiz session and returns the first question for display.
    ///
    /// Validation order matters: an unrecognized difficulty or a banned user
    /// is rejected before any side effect. Provider failure is masked by the
    /// static pool and never reaches the caller.
    pub async fn start(&self, chat: ChatId, user: UserId, difficulty: &str) -> GameResult<QuizQuestion> {
        let difficulty =
            Difficulty::from_str(difficulty).map_err(|_| GameError::InvalidDifficulty(difficulty.to_string()))?;

        if self.bans.is_banned(user) {
            return Err(GameError::Banned(user));
        }

        let key = GameKey::new(chat, user);
        // Fast pre-check; the create() below is the authoritative atomic one.
        if self.sessions.get(key).is_some() {
            return Err(GameError::AlreadyActive);
        }

        self.ledger.ensure(user, UserDefaults::default());

        let question = fetch_with_fallback(self.provider.as_ref(), difficulty, self.settings.provider_timeout).await;
        self.sessions
            .create(key, difficulty, self.settings.question_limit, question.clone())?;
        self.recent.push(question.clone());

        log::info!("Started {} quiz for {} ({} questions)", difficulty, key, self.settings.question_limit);
        Ok(question)
    }

    /// Scores one answer for the pair's running session.
    ///
    /// Exact integer comparison against the current question. Either issues
    /// the next question or, once the limit is hit, finalizes: credits fixed
    /// rewards through the ledger, appends the capped leaderboard entry, and
    /// removes the session.
    pub async fn submit_answer(&self, chat: ChatId, user: UserId, choice: usize) -> GameResult<AnswerOutcome> {
        let key = GameKey::new(chat, user);
        let scored = self.sessions.score_answer(key, choice)?;

        if !scored.finished {
            let difficulty = self
                .sessions
                .get(key)
                .map(|s| s.difficulty)
                .ok_or(GameError::NoActiveSession)?;
            let question =
                fetch_with_fallback(self.provider.as_ref(), difficulty, self.settings.provider_timeout).await;
            self.sessions.advance(key, question.clone())?;
            self.recent.push(question.clone());

            return Ok(AnswerOutcome::Next {
                was_correct: scored.was_correct,
                score: scored.score,
                question,
            });
        }

        let session = self.sessions.terminate(key)?;
        let results = self.finalize(user, &session);
        Ok(AnswerOutcome::Completed {
            was_correct: scored.was_correct,
            results,
        })
    }

    /// Publishes a completed session into the ledger and history.
    fn finalize(&self, user: UserId, session: &QuizSession) -> QuizResults {
        let duration_seconds = session.duration_seconds();
        let xp_earned = i64::from(session.score) * rewards::XP_PER_CORRECT;
        let coins_earned = i64::from(session.score) * rewards::COINS_PER_CORRECT;

        let old_level = self.ledger.get(user).map(|r| r.level()).unwrap_or(1);
        self.ledger.increment(user, CounterField::Xp, xp_earned);
        self.ledger.increment(user, CounterField::Coins, coins_earned);
        self.ledger.increment(user, CounterField::GamesPlayed, 1);
        self.ledger.record_result(
            user,
            LeaderboardEntry {
                score: session.score,
                total_questions: session.questions_asked,
                duration_seconds,
                difficulty: session.difficulty,
            },
        );
        let new_level = self.ledger.get(user).map(|r| r.level()).unwrap_or(old_level);

        log::info!(
            "Quiz finished for {}: {}/{} in {}s (+{} xp, +{} coins)",
            session.key,
            session.score,
            session.questions_asked,
            duration_seconds,
            xp_earned,
            coins_earned
        );

        QuizResults {
            score: session.score,
            total_questions: session.questions_asked,
            duration_seconds,
            difficulty: session.difficulty,
            xp_earned,
            coins_earned,
            new_level,
            leveled_up: new_level > old_level,
        }
    }

    /// Leaderboard view: a user's own history, or the global top when no
    /// user is given. Recomputed on every call.
    pub fn get_leaderboard(&self, user: Option<UserId>) -> LeaderboardView {
        match user {
            Some(user) => LeaderboardView::Personal(self.personal_leaderboard(user)),
            None => LeaderboardView::Global(self.global_leaderboard()),
        }
    }

    pub fn personal_leaderboard(&self, user: UserId) -> Vec<LeaderboardEntry> {
        leaderboard::per_user(&self.ledger, user)
    }

    pub fn global_leaderboard(&self) -> Vec<GlobalEntry> {
        leaderboard::global(&self.ledger)
    }

    /// Most recently issued questions, newest first.
    pub fn recent_questions(&self, limit: usize) -> Vec<QuizQuestion> {
        self.recent.recent(limit)
    }
}
