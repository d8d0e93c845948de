use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration for the game core
///
/// Values are read once at startup from the environment with sensible
/// defaults. Components take these as constructor parameters, so tests can
/// override them without touching the environment.
/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: playpal.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "playpal.log".to_string()));

/// Questions per quiz session
/// Read from QUIZ_QUESTION_LIMIT environment variable
/// Default: 5
pub static QUIZ_QUESTION_LIMIT: Lazy<u32> = Lazy::new(|| {
    env::var("QUIZ_QUESTION_LIMIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5)
});

/// Coins granted to a newly created user record
/// Read from STARTING_COINS environment variable
/// Default: 50
pub static STARTING_COINS: Lazy<i64> = Lazy::new(|| {
    env::var("STARTING_COINS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(50)
});

/// Session idle-timeout configuration
pub mod session {
    use super::{env, Duration, Lazy};

    /// Seconds a quiz session may sit idle before the sweeper reclaims it.
    /// Read from SESSION_IDLE_TIMEOUT_SECS environment variable
    /// Default: 600 (10 minutes)
    pub static IDLE_TIMEOUT_SECS: Lazy<u64> = Lazy::new(|| {
        env::var("SESSION_IDLE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(600)
    });

    /// Interval between sweeper runs (in seconds)
    /// Read from SWEEP_INTERVAL_SECS environment variable
    /// Default: 60
    pub static SWEEP_INTERVAL_SECS: Lazy<u64> = Lazy::new(|| {
        env::var("SWEEP_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60)
    });

    /// Idle timeout duration
    pub fn idle_timeout() -> Duration {
        Duration::from_secs(*IDLE_TIMEOUT_SECS)
    }

    /// Sweep interval duration
    pub fn sweep_interval() -> Duration {
        Duration::from_secs(*SWEEP_INTERVAL_SECS)
    }
}

/// Content provider configuration
pub mod provider {
    use super::{env, Duration, Lazy};

    /// Seconds to wait for the content provider before falling back to the
    /// static question pool.
    /// Read from PROVIDER_TIMEOUT_SECS environment variable
    /// Default: 5
    pub static TIMEOUT_SECS: Lazy<u64> = Lazy::new(|| {
        env::var("PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5)
    });

    /// Provider timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(*TIMEOUT_SECS)
    }
}

/// Reward configuration
///
/// Rewards are fixed amounts, not random ranges, so a session's payout is
/// fully determined by its score.
pub mod rewards {
    /// Experience points per correct quiz answer
    pub const XP_PER_CORRECT: i64 = 10;

    /// Coins per correct quiz answer
    pub const COINS_PER_CORRECT: i64 = 5;

    /// Experience points per derived level
    pub const XP_PER_LEVEL: i64 = 100;

    /// Experience for winning a rock-paper-scissors round
    pub const ROSHAMBO_XP: i64 = 5;

    /// Experience for guessing the secret number
    pub const GUESS_XP: i64 = 20;

    /// Experience for unscrambling a word
    pub const SCRAMBLE_XP: i64 = 10;
}

/// Leaderboard configuration
pub mod leaderboard {
    /// Completed-session entries kept per user; the lowest score is evicted
    /// once the cap is exceeded
    pub const HISTORY_CAP: usize = 10;

    /// Entries in the global top view
    pub const GLOBAL_TOP: usize = 10;
}

/// Content cache configuration
pub mod content {
    /// Items kept per content kind ("keep last N")
    pub const CACHE_CAP: usize = 20;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Statics read the env once; defaults apply when the variables are
        // unset, which is the normal test environment.
        assert!(*QUIZ_QUESTION_LIMIT >= 1);
        assert!(session::idle_timeout() >= Duration::from_secs(1));
        assert!(provider::timeout() >= Duration::from_secs(1));
    }

    #[test]
    fn test_reward_constants() {
        assert_eq!(rewards::XP_PER_CORRECT, 10);
        assert_eq!(rewards::XP_PER_LEVEL, 100);
        assert_eq!(leaderboard::HISTORY_CAP, 10);
    }
}
