use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A work item on the board. `created_at` is stamped once in [`Task::new`]
/// and carried through every later save; `category_id` may point at a
/// category that no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub deadline: Option<String>,
    pub created_at: String,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        content: Option<String>,
        category_id: Option<String>,
        deadline: Option<String>,
    ) -> Self {
        Self {
            id: format!("task-{}", Uuid::new_v4()),
            title: title.into(),
            content,
            category_id,
            deadline,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Whether the deadline falls strictly before the start of the current
    /// local day. Tasks without a deadline are never overdue.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Local::now().date_naive())
    }

    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        match self.deadline.as_deref() {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| d < today)
                .unwrap_or(false),
            None => false,
        }
    }
}
