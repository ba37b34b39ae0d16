use std::{collections::HashSet, path::Path};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::announcement::{AnnouncementRecord, VisibleAnnouncement};

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("announcement with an empty id")]
    EmptyId,

    #[error("announcement {id} has an empty title")]
    EmptyTitle { id: String },

    #[error("duplicate announcement id: {id}")]
    DuplicateId { id: String },

    #[error("announcement {id} is not older than the one listed before it")]
    OutOfOrder { id: String },

    #[error("announcement {id} has an invalid publication date: {source}")]
    InvalidDate {
        id: String,
        source: chrono::ParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compiled-in catalog, newest first: (id, title, description, published_at).
const BUILTIN: &[(&str, &str, &str, &str)] = &[
    (
        "2025-03-packages",
        "Forfaits de prestations",
        "Regroupez plusieurs prestations dans un forfait à prix unique et ajoutez-le à vos devis en un clic.",
        "2025-03-18T09:00:00Z",
    ),
    (
        "2025-02-quote-discount",
        "Remises sur les devis",
        "Appliquez une remise en pourcentage sur l'ensemble d'un devis, le total est recalculé automatiquement.",
        "2025-02-04T09:00:00Z",
    ),
    (
        "2025-01-client-notes",
        "Notes clientes",
        "Ajoutez des notes privées sur vos clientes : allergies, préférences, historique de coloration.",
        "2025-01-14T09:00:00Z",
    ),
    (
        "2024-12-welcome",
        "Bienvenue sur Devis Salon",
        "Créez vos premiers devis, personnalisez votre catalogue de prestations et envoyez-les à vos clientes.",
        "2024-12-02T09:00:00Z",
    ),
];

/// Decides which product announcements a viewer has not seen yet.
///
/// The records are fixed at construction and kept newest first. Every query
/// compares `published_at` strictly against the viewer's `last_seen_at`:
/// an announcement published exactly at `last_seen_at` counts as seen.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementFeed {
    records: Vec<AnnouncementRecord>,
}

impl AnnouncementFeed {
    /// Builds a feed, rejecting lists that break the ordering or identity invariants.
    /// The list is checked, never re-sorted.
    pub fn new(records: Vec<AnnouncementRecord>) -> Result<Self, FeedError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut previous: Option<DateTime<Utc>> = None;

        for record in &records {
            if record.id.trim().is_empty() {
                return Err(FeedError::EmptyId);
            }
            if record.title.trim().is_empty() {
                return Err(FeedError::EmptyTitle { id: record.id.clone() });
            }
            if !seen.insert(record.id.as_str()) {
                return Err(FeedError::DuplicateId { id: record.id.clone() });
            }
            if previous.is_some_and(|p| record.published_at >= p) {
                return Err(FeedError::OutOfOrder { id: record.id.clone() });
            }
            previous = Some(record.published_at);
        }

        Ok(Self { records })
    }

    pub fn builtin() -> Result<Self, FeedError> {
        let records = BUILTIN
            .iter()
            .map(|(id, title, description, published_at)| {
                let published_at = published_at
                    .parse::<DateTime<Utc>>()
                    .map_err(|source| FeedError::InvalidDate { id: id.to_string(), source })?;
                Ok(AnnouncementRecord {
                    id: id.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    published_at,
                })
            })
            .collect::<Result<Vec<_>, FeedError>>()?;
        Self::new(records)
    }

    /// Loads a JSON array of records, newest first.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let records: Vec<AnnouncementRecord> = serde_json::from_str(&raw)?;
        let feed = Self::new(records)?;
        info!("Loaded {} announcements from {}", feed.len(), path.as_ref().display());
        Ok(feed)
    }

    pub fn records(&self) -> &[AnnouncementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn newest(&self) -> Option<&AnnouncementRecord> {
        self.records.first()
    }

    /// True when at least one announcement is newer than `last_seen_at`.
    /// Only the newest record needs checking since the list is descending.
    pub fn has_unseen(&self, last_seen_at: Option<DateTime<Utc>>) -> bool {
        match self.newest() {
            None => false,
            Some(newest) => is_new(newest, last_seen_at),
        }
    }

    pub fn unseen_count(&self, last_seen_at: Option<DateTime<Utc>>) -> usize {
        match last_seen_at {
            None => self.records.len(),
            // Descending order: the unseen records form a prefix.
            Some(t) => self.records.partition_point(|r| r.published_at > t),
        }
    }

    pub fn visible(&self, last_seen_at: Option<DateTime<Utc>>) -> Vec<VisibleAnnouncement<'_>> {
        self.records
            .iter()
            .map(|record| VisibleAnnouncement {
                record,
                is_new: is_new(record, last_seen_at),
            })
            .collect()
    }
}

fn is_new(record: &AnnouncementRecord, last_seen_at: Option<DateTime<Utc>>) -> bool {
    match last_seen_at {
        None => true,
        Some(t) => record.published_at > t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap()
    }

    fn record(id: &str, published_at: DateTime<Utc>) -> AnnouncementRecord {
        AnnouncementRecord {
            id: id.into(),
            title: format!("Titre {id}"),
            description: format!("Description {id}"),
            published_at,
        }
    }

    /// D1 > D2 > D3
    fn three() -> AnnouncementFeed {
        AnnouncementFeed::new(vec![
            record("d1", at(20)),
            record("d2", at(10)),
            record("d3", at(1)),
        ])
        .unwrap()
    }

    #[test]
    fn never_seen_marks_everything_new() {
        let feed = three();
        assert!(feed.has_unseen(None));
        assert_eq!(feed.unseen_count(None), 3);
        assert!(feed.visible(None).iter().all(|v| v.is_new));
    }

    #[test]
    fn last_seen_between_d2_and_d1() {
        let feed = three();
        let t = at(15);
        assert!(feed.has_unseen(Some(t)));
        assert_eq!(feed.unseen_count(Some(t)), 1);
        let flags: Vec<bool> = feed.visible(Some(t)).iter().map(|v| v.is_new).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn last_seen_between_d3_and_d2() {
        let feed = three();
        assert_eq!(feed.unseen_count(Some(at(5))), 2);
    }

    #[test]
    fn last_seen_after_everything() {
        let feed = three();
        let t = at(21);
        assert!(!feed.has_unseen(Some(t)));
        assert_eq!(feed.unseen_count(Some(t)), 0);
        assert!(feed.visible(Some(t)).iter().all(|v| !v.is_new));
    }

    #[test]
    fn equality_counts_as_seen() {
        let feed = three();
        let t = at(20);
        assert!(!feed.has_unseen(Some(t)));
        assert_eq!(feed.unseen_count(Some(t)), 0);
        assert!(!feed.visible(Some(t))[0].is_new);

        // One second earlier and the newest one is new again.
        assert_eq!(feed.unseen_count(Some(t - Duration::seconds(1))), 1);
    }

    #[test]
    fn empty_feed_has_nothing_unseen() {
        let feed = AnnouncementFeed::new(Vec::new()).unwrap();
        assert!(!feed.has_unseen(None));
        assert!(!feed.has_unseen(Some(at(1))));
        assert_eq!(feed.unseen_count(None), 0);
        assert!(feed.visible(None).is_empty());
    }

    #[test]
    fn unseen_count_is_monotonic() {
        let feed = three();
        let mut previous = usize::MAX;
        for day in 1..=25 {
            let count = feed.unseen_count(Some(at(day)));
            assert!(count <= previous, "count grew at day {day}");
            previous = count;
        }
    }

    #[test]
    fn visible_preserves_order_and_fields() {
        let feed = three();
        for last_seen in [None, Some(at(5)), Some(at(30))] {
            let visible = feed.visible(last_seen);
            assert_eq!(visible.len(), feed.len());
            for (v, source) in visible.iter().zip(feed.records()) {
                assert!(std::ptr::eq(v.record, source));
            }
        }
    }

    #[test]
    fn visible_serializes_flat() {
        let feed = three();
        let value = serde_json::to_value(feed.visible(Some(at(15)))).unwrap();
        assert_eq!(value[0]["id"], "d1");
        assert_eq!(value[0]["is_new"], true);
        assert_eq!(value[1]["is_new"], false);
        assert_eq!(value[0]["published_at"], "2025-01-20T12:00:00Z");
    }

    #[test]
    fn rejects_out_of_order_and_ties() {
        let err = AnnouncementFeed::new(vec![record("a", at(1)), record("b", at(2))]).unwrap_err();
        assert!(matches!(err, FeedError::OutOfOrder { id } if id == "b"));

        let err = AnnouncementFeed::new(vec![record("a", at(2)), record("b", at(2))]).unwrap_err();
        assert!(matches!(err, FeedError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_duplicate_and_blank_fields() {
        let err = AnnouncementFeed::new(vec![record("a", at(2)), record("a", at(1))]).unwrap_err();
        assert!(matches!(err, FeedError::DuplicateId { .. }));

        let err = AnnouncementFeed::new(vec![record(" ", at(2))]).unwrap_err();
        assert!(matches!(err, FeedError::EmptyId));

        let mut untitled = record("a", at(2));
        untitled.title = String::new();
        let err = AnnouncementFeed::new(vec![untitled]).unwrap_err();
        assert!(matches!(err, FeedError::EmptyTitle { .. }));
    }

    #[test]
    fn builtin_catalog_is_well_formed() {
        let feed = AnnouncementFeed::builtin().unwrap();
        assert!(!feed.is_empty());
        assert!(feed.has_unseen(None));
    }

    #[test]
    fn loads_from_json_file() {
        let path = std::env::temp_dir().join(format!("announcements-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[
                {"id": "b", "title": "B", "description": "", "published_at": "2025-02-01T00:00:00Z"},
                {"id": "a", "title": "A", "description": "", "published_at": "2025-01-01T00:00:00+01:00"}
            ]"#,
        )
        .unwrap();

        let feed = AnnouncementFeed::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(feed.len(), 2);
        assert_eq!(feed.newest().unwrap().id, "b");
    }

    #[test]
    fn misordered_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("announcements-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[
                {"id": "a", "title": "A", "description": "", "published_at": "2025-01-01T00:00:00Z"},
                {"id": "b", "title": "B", "description": "", "published_at": "2025-02-01T00:00:00Z"}
            ]"#,
        )
        .unwrap();

        let result = AnnouncementFeed::from_json_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(FeedError::OutOfOrder { id }) if id == "b"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AnnouncementFeed::from_json_file("/nonexistent/announcements.json").unwrap_err();
        assert!(matches!(err, FeedError::Io(_)));
    }
}
