use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product-update notice shown in the notification bell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
}

/// An announcement as rendered for one viewer.
/// Borrows the source record so no field is copied.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VisibleAnnouncement<'a> {
    #[serde(flatten)]
    pub record: &'a AnnouncementRecord,
    pub is_new: bool,
}

/// Query string shared by the announcement endpoints.
/// A missing `last_seen_at` means the viewer never opened the panel.
#[derive(Debug, Default, Deserialize)]
pub struct LastSeenQuery {
    pub last_seen_at: Option<DateTime<Utc>>,
}
