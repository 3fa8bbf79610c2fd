//! Activity logging for fintrack
//!
//! Every registration, login, logout, password change and record
//! create/update/delete is appended to a per-install activity log. Each user
//! sees their own entries as the "recent activity" feed.
//!
//! - `ActivityEntry`: one entry with timestamp, owner, type and optional
//!   before/after snapshots of the record involved.
//! - `ActivityLog`: append-only JSONL file with sequential entry ids.
//! - `generate_diff`: one-line summary of the fields an update changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{ActivityEntry, EntityType};
pub use logger::ActivityLog;
