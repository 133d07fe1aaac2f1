//! Date-bucket clustering — the computed read model for the dashboard.
//!
//! Clusters are never stored, always derived: every feed refresh recomputes
//! them from scratch against the current instant. Calendar comparisons are
//! done in UTC; localised month names are the caller's concern.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use vibe_core::{vibe::Vibe, view::ViewMode};

// ─── Derived types ───────────────────────────────────────────────────────────

/// Which time bucket a cluster represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterKind {
  Today,
  Yesterday,
  ThisWeek,
  Month,
  Flashback,
}

/// A named group of vibes for one dashboard section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCluster {
  /// "Today", "Yesterday", "This Week", "<Month> <Year>", or "On this day".
  pub title:      String,
  pub kind:       ClusterKind,
  /// Oldest member `created_at`.
  pub start_date: DateTime<Utc>,
  /// Newest member `created_at`; clusters sort on this.
  pub end_date:   DateTime<Utc>,
  /// Member vibes, in the order they appeared in the input.
  pub vibes:      Vec<Vibe>,
}

impl MemoryCluster {
  /// Build a cluster around `vibes`, computing the date span from the
  /// members. Returns `None` for an empty member list.
  pub(crate) fn from_members(
    title: String,
    kind: ClusterKind,
    vibes: Vec<Vibe>,
  ) -> Option<Self> {
    let start_date = vibes.iter().map(|v| v.created_at).min()?;
    let end_date = vibes.iter().map(|v| v.created_at).max()?;
    Some(Self { title, kind, start_date, end_date, vibes })
  }

  /// Count label rendered under the cluster title, e.g. "3 memories"
  /// (received view) or "3 vibes" (sent view).
  pub fn subtitle(&self, view: ViewMode) -> String {
    let n = self.vibes.len();
    let noun = match (view, n) {
      (ViewMode::Received, 1) => "memory",
      (ViewMode::Received, _) => "memories",
      (ViewMode::Sent, 1) => "vibe",
      (ViewMode::Sent, _) => "vibes",
    };
    format!("{n} {noun}")
  }
}

// ─── Clustering ──────────────────────────────────────────────────────────────

/// Internal bucket identity. Month buckets are keyed on (year, month) so two
/// different Junes never merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BucketKey {
  Today,
  Yesterday,
  ThisWeek,
  Month { year: i32, month: u32 },
}

/// Partition `vibes` into calendar buckets relative to `now`.
///
/// - same UTC calendar day as `now` → "Today"
/// - exactly one day before → "Yesterday"
/// - two to six days before (the rest of the trailing 7-day window) →
///   "This Week"
/// - anything older → one "<Month> <Year>" bucket per distinct month
///
/// Vibes dated after `now` (clock skew between devices) clamp into "Today".
/// Member order within a bucket preserves input order; callers pass
/// newest-first lists. Clusters themselves are explicitly sorted newest
/// first by their newest member, independent of input order.
pub fn cluster_vibes(vibes: &[Vibe], now: DateTime<Utc>) -> Vec<MemoryCluster> {
  let today = now.date_naive();

  let mut buckets: HashMap<BucketKey, Vec<Vibe>> = HashMap::new();
  for vibe in vibes {
    let day = vibe.created_at.date_naive();
    let days_ago = (today - day).num_days();
    let key = if days_ago <= 0 {
      BucketKey::Today
    } else if days_ago == 1 {
      BucketKey::Yesterday
    } else if days_ago <= 6 {
      BucketKey::ThisWeek
    } else {
      BucketKey::Month { year: day.year(), month: day.month() }
    };
    buckets.entry(key).or_default().push(vibe.clone());
  }

  let mut clusters: Vec<MemoryCluster> = buckets
    .into_iter()
    .filter_map(|(key, members)| {
      let (title, kind) = match key {
        BucketKey::Today => ("Today".to_owned(), ClusterKind::Today),
        BucketKey::Yesterday => ("Yesterday".to_owned(), ClusterKind::Yesterday),
        BucketKey::ThisWeek => ("This Week".to_owned(), ClusterKind::ThisWeek),
        BucketKey::Month { .. } => (
          members[0].created_at.format("%B %Y").to_string(),
          ClusterKind::Month,
        ),
      };
      MemoryCluster::from_members(title, kind, members)
    })
    .collect();

  clusters.sort_by(|a, b| b.end_date.cmp(&a.end_date));
  clusters
}
