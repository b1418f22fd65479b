//! In-app notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Resource;

/// A notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID.
    pub id: u64,
    /// Recipient.
    pub user_id: u64,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Kind tag (e.g. "appointment_reminder").
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Whether the recipient has read it.
    #[serde(default)]
    pub is_read: bool,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Notification {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Query parameters for listing notifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationFilter {
    /// Only read or only unread notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

impl NotificationFilter {
    /// Only unread notifications.
    pub fn unread() -> Self {
        Self {
            is_read: Some(false),
        }
    }
}
