//! Feed lookup configuration.
//!
//! Maps a GTFS feed index to the agency it belongs to: the URL slug pages
//! are published under and how stops are labelled for riders. Callers load
//! this once and pass it where it is needed.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::Stop;

/// Which stop identifier riders see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopLabel {
    /// The GTFS `stop_id`.
    #[default]
    Id,
    /// The rider-facing `stop_code`, falling back to `stop_id` if absent.
    Code,
}

/// Per-feed agency settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedInfo {
    /// URL path segment for the agency, e.g. "ddot".
    pub slug: String,

    #[serde(default)]
    pub stop_label: StopLabel,
}

impl FeedInfo {
    pub fn new(slug: impl Into<String>, stop_label: StopLabel) -> Self {
        Self {
            slug: slug.into(),
            stop_label,
        }
    }

    /// The identifier to show riders for `stop`.
    pub fn label<'s>(&self, stop: &'s Stop) -> &'s str {
        match self.stop_label {
            StopLabel::Id => stop.id.as_str(),
            StopLabel::Code => stop.code.as_deref().unwrap_or(stop.id.as_str()),
        }
    }
}

/// Feed index → agency lookup.
///
/// # Examples
///
/// ```
/// use timetable_engine::feed::{FeedRegistry, StopLabel};
///
/// let registry: FeedRegistry = serde_json::from_str(
///     r#"{"9": {"slug": "ddot", "stopLabel": "code"}, "10": {"slug": "smart"}}"#,
/// )
/// .unwrap();
///
/// assert_eq!(registry.route_path(9, "4").as_deref(), Some("/ddot/route/4"));
/// assert_eq!(registry.get(10).unwrap().stop_label, StopLabel::Id);
/// assert!(registry.get(11).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FeedRegistry {
    feeds: HashMap<i64, FeedInfo>,
}

impl FeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feed_index: i64, info: FeedInfo) {
        self.feeds.insert(feed_index, info);
    }

    pub fn get(&self, feed_index: i64) -> Option<&FeedInfo> {
        self.feeds.get(&feed_index)
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Path of the agency's landing page.
    pub fn agency_path(&self, feed_index: i64) -> Option<String> {
        self.get(feed_index).map(|f| format!("/{}/", f.slug))
    }

    /// Path of a route's timetable page.
    pub fn route_path(&self, feed_index: i64, route_short_name: &str) -> Option<String> {
        self.get(feed_index)
            .map(|f| format!("/{}/route/{}", f.slug, route_short_name))
    }

    /// Path of a stop's page, keyed by the agency's stop label.
    pub fn stop_path(&self, feed_index: i64, stop: &Stop) -> Option<String> {
        self.get(feed_index)
            .map(|f| format!("/{}/stop/{}", f.slug, f.label(stop)))
    }
}
