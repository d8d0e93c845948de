//! Ban registry.
//!
//! Admin-facing: banning hides the bot from a user but never deletes their
//! ledger record.

use crate::core::types::UserId;
use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct BanList {
    banned: DashSet<UserId>,
}

impl BanList {
    pub fn new() -> Self {
        Self {
            banned: DashSet::new(),
        }
    }

    pub fn ban(&self, user_id: UserId) {
        if self.banned.insert(user_id) {
            log::info!("Banned user {}", user_id);
        }
    }

    pub fn unban(&self, user_id: UserId) {
        if self.banned.remove(&user_id).is_some() {
            log::info!("Unbanned user {}", user_id);
        }
    }

    pub fn is_banned(&self, user_id: UserId) -> bool {
        self.banned.contains(&user_id)
    }
}
