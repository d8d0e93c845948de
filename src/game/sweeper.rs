//! Background reclamation of idle quiz sessions.
//!
//! Runs independently of any request on a periodic timer. Swept sessions are
//! terminated without scoring and never touch the ledger; a user who walks
//! away simply loses the unfinished run.

use crate::storage::sessions::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawns the sweep task. Both the interval and the idle threshold are
/// parameters (see `config::session` for the deployment defaults).
pub fn spawn_sweeper(sessions: Arc<SessionStore>, interval: Duration, max_age: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let swept = sessions.sweep_expired(max_age);
            if !swept.is_empty() {
                log::info!("Swept {} idle quiz session(s)", swept.len());
                for session in &swept {
                    log::debug!(
                        "Reclaimed idle session {} at {}/{} questions",
                        session.key,
                        session.questions_asked,
                        session.question_limit
                    );
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback::StaticPool;
    use crate::core::types::{ChatId, Difficulty, GameKey, UserId};

    #[tokio::test]
    async fn test_sweeper_reclaims_idle_sessions() {
        let sessions = Arc::new(SessionStore::new());
        sessions
            .create(
                GameKey::new(ChatId(1), UserId(42)),
                Difficulty::Easy,
                5,
                StaticPool::pick(Difficulty::Easy),
            )
            .unwrap();

        let handle = spawn_sweeper(Arc::clone(&sessions), Duration::from_millis(20), Duration::ZERO);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(sessions.is_empty());
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_leaves_fresh_sessions() {
        let sessions = Arc::new(SessionStore::new());
        sessions
            .create(
                GameKey::new(ChatId(1), UserId(42)),
                Difficulty::Easy,
                5,
                StaticPool::pick(Difficulty::Easy),
            )
            .unwrap();

        let handle = spawn_sweeper(
            Arc::clone(&sessions),
            Duration::from_millis(20),
            Duration::from_secs(600),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(sessions.len(), 1);
        handle.abort();
    }
}
