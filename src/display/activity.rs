//! Activity feed formatting

use crate::models::ActivityDto;

pub fn format_activity_feed(entries: &[ActivityDto]) -> String {
    if entries.is_empty() {
        return "No recent activity.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{}  {:15}  {}\n",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.activity_type.to_string(),
            entry.description
        ));
        if let Some(changes) = entry.changes.as_deref().filter(|c| !c.is_empty()) {
            for line in changes.lines() {
                output.push_str(&format!("{:18}  {}\n", "", line));
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityId, ActivityType, UserId};
    use chrono::TimeZone;

    #[test]
    fn test_feed_shows_changes() {
        let entry = ActivityDto {
            id: ActivityId::new(1),
            user_id: UserId::new(1),
            activity_type: ActivityType::Update,
            description: "Updated expense Rent".into(),
            created_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            icon: None,
            changes: Some("amount: 900.0 -> 950.0".into()),
        };
        let feed = format_activity_feed(&[entry]);
        assert!(feed.starts_with("2024-05-01 09:30  UPDATE"));
        assert!(feed.contains("amount: 900.0 -> 950.0"));
    }
}
