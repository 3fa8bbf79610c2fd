//! Append-only activity log
//!
//! Entries are written one JSON object per line and flushed immediately.
//! Each entry gets the next sequence number; the sequence is recovered from
//! the file the first time the log is written after startup.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{ActivityId, UserId};
use crate::storage::file_io::{append_json_line, read_json_lines, visit_json_lines_rev};

use super::entry::ActivityEntry;

/// Writes and reads the activity log file
pub struct ActivityLog {
    log_path: PathBuf,
    next_id: Mutex<Option<i64>>,
}

impl ActivityLog {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            next_id: Mutex::new(None),
        }
    }

    /// Append an entry, assigning its id. Returns the entry as written.
    pub fn log(&self, mut entry: ActivityEntry) -> FinanceResult<ActivityEntry> {
        let mut next_id = self
            .next_id
            .lock()
            .map_err(|e| FinanceError::Storage(format!("Failed to lock activity log: {}", e)))?;

        let id = match *next_id {
            Some(id) => id,
            None => {
                self.read_all()?
                    .iter()
                    .map(|e| e.id.get())
                    .max()
                    .unwrap_or(0)
                    + 1
            }
        };

        entry.id = ActivityId::new(id);
        append_json_line(&self.log_path, &entry)?;
        *next_id = Some(id + 1);

        Ok(entry)
    }

    /// All entries, oldest first
    pub fn read_all(&self) -> FinanceResult<Vec<ActivityEntry>> {
        read_json_lines(&self.log_path)
    }

    /// The last `count` entries across all users, oldest first
    pub fn read_recent(&self, count: usize) -> FinanceResult<Vec<ActivityEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// A user's most recent entries, newest first
    ///
    /// The log is walked from its end and reading stops after `limit`
    /// matches.
    pub fn recent_for_user(&self, user_id: UserId, limit: usize) -> FinanceResult<Vec<ActivityEntry>> {
        let mut entries = Vec::new();
        if limit == 0 {
            return Ok(entries);
        }

        visit_json_lines_rev(&self.log_path, |entry: ActivityEntry| {
            if entry.user_id == user_id {
                entries.push(entry);
            }
            entries.len() < limit
        })?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    pub fn entry_count(&self) -> FinanceResult<usize> {
        Ok(self.read_all()?.len())
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::EntityType;
    use crate::models::ActivityType;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_log() -> (ActivityLog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log = ActivityLog::new(temp_dir.path().join("activity.log"));
        (log, temp_dir)
    }

    fn expense_entry(user: i64, label: &str) -> ActivityEntry {
        ActivityEntry::create(
            UserId::new(user),
            EntityType::Expense,
            1,
            label,
            &json!({"category": label}),
        )
    }

    #[test]
    fn test_log_assigns_sequential_ids() {
        let (log, _temp) = create_test_log();

        let first = log.log(expense_entry(1, "Rent")).unwrap();
        let second = log.log(expense_entry(1, "Food")).unwrap();

        assert_eq!(first.id, ActivityId::new(1));
        assert_eq!(second.id, ActivityId::new(2));
        assert_eq!(log.entry_count().unwrap(), 2);
    }

    #[test]
    fn test_sequence_recovered_after_restart() {
        let (log, temp) = create_test_log();
        for label in ["a", "b", "c"] {
            log.log(expense_entry(1, label)).unwrap();
        }

        let reopened = ActivityLog::new(temp.path().join("activity.log"));
        let next = reopened.log(expense_entry(1, "d")).unwrap();
        assert_eq!(next.id, ActivityId::new(4));
    }

    #[test]
    fn test_recent_for_user_is_scoped_and_newest_first() {
        let (log, _temp) = create_test_log();
        for i in 0..6 {
            log.log(expense_entry(1, &format!("mine {}", i))).unwrap();
            log.log(expense_entry(2, &format!("theirs {}", i))).unwrap();
        }

        let recent = log.recent_for_user(UserId::new(1), 5).unwrap();
        assert_eq!(recent.len(), 5);
        assert!(recent.iter().all(|e| e.user_id == UserId::new(1)));
        assert_eq!(recent[0].description, "Added expense mine 5");
        assert_eq!(recent[4].description, "Added expense mine 1");
    }

    #[test]
    fn test_recent_for_user_reads_only_the_tail() {
        let (log, temp) = create_test_log();
        log.log(expense_entry(1, "oldest")).unwrap();
        for i in 0..200 {
            log.log(expense_entry(2, &format!("theirs {}", i))).unwrap();
        }
        log.log(expense_entry(1, "newest")).unwrap();

        let recent = log.recent_for_user(UserId::new(1), 1).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].description, "Added expense newest");

        // Corrupting the head of the file goes unnoticed when the tail suffices
        let path = temp.path().join("activity.log");
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, format!("not json\n{}", contents)).unwrap();
        assert_eq!(log.recent_for_user(UserId::new(2), 3).unwrap().len(), 3);
        assert!(log.recent_for_user(UserId::new(1), 5).is_err());
        assert!(log.recent_for_user(UserId::new(1), 0).unwrap().is_empty());
    }

    #[test]
    fn test_read_recent() {
        let (log, _temp) = create_test_log();
        for i in 0..10 {
            log.log(ActivityEntry::event(
                UserId::new(1),
                ActivityType::Login,
                format!("login {}", i),
            ))
            .unwrap();
        }

        let recent = log.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].description, "login 7");
        assert_eq!(recent[2].description, "login 9");
    }

    #[test]
    fn test_empty_log() {
        let (log, _temp) = create_test_log();

        assert!(!log.exists());
        assert_eq!(log.entry_count().unwrap(), 0);
        assert!(log.recent_for_user(UserId::new(1), 5).unwrap().is_empty());
    }
}
