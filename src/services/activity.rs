//! Activity feed service

use tracing::debug;

use crate::error::FinanceResult;
use crate::models::{ActivityDto, UserId};
use crate::storage::Storage;

/// Upper bound on entries returned by one feed request
pub const MAX_FEED_LIMIT: usize = 100;

/// Service for reading a user's recent activity
pub struct ActivityService<'a> {
    storage: &'a Storage,
}

impl<'a> ActivityService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The actor's latest entries, newest first
    ///
    /// `limit` is clamped to `1..=MAX_FEED_LIMIT`.
    pub fn recent(&self, actor: UserId, limit: usize) -> FinanceResult<Vec<ActivityDto>> {
        let limit = limit.clamp(1, MAX_FEED_LIMIT);
        let entries = self.storage.activity().recent_for_user(actor, limit)?;
        debug!(user = %actor, limit, returned = entries.len(), "recent activity");
        Ok(entries.iter().map(|e| e.to_dto()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;
    use crate::services::test_support::{add_user, create_test_storage};

    #[test]
    fn test_recent_clamps_limit() {
        let (_temp, storage) = create_test_storage();
        let ana = add_user(&storage, "ana@example.com");
        for i in 0..3 {
            storage
                .log_event(ana, ActivityType::Login, format!("login {}", i))
                .unwrap();
        }

        let service = ActivityService::new(&storage);
        let feed = service.recent(ana, 0).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].description, "login 2");
        assert_eq!(feed[0].icon.as_deref(), Some("pi pi-sign-in"));

        assert_eq!(service.recent(ana, 1000).unwrap().len(), 3);
    }
}
