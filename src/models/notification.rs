use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_id: i64,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub message: String,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// `GET /notifications/unread-count` answers either `{count: n}` or a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnreadCount {
    Wrapped { count: u64 },
    Bare(u64),
}

impl UnreadCount {
    pub fn value(&self) -> u64 {
        match self {
            UnreadCount::Wrapped { count } | UnreadCount::Bare(count) => *count,
        }
    }
}
