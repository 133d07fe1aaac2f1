//! "On this day" selection.
//!
//! A flashback is a vibe whose creation date matches today's month and day
//! in a different year. The match is exact: a vibe created on Feb 29 only
//! resurfaces in leap years.

use chrono::{DateTime, Datelike, Utc};
use vibe_core::vibe::Vibe;

use crate::cluster::{ClusterKind, MemoryCluster};

/// Select every vibe created on today's month/day in another year.
///
/// Operates on the raw (not batch-collapsed) list and preserves input order.
pub fn flashbacks(vibes: &[Vibe], now: DateTime<Utc>) -> Vec<Vibe> {
  vibes
    .iter()
    .filter(|v| {
      let day = v.created_at.date_naive();
      day.month() == now.month()
        && day.day() == now.day()
        && day.year() != now.year()
    })
    .cloned()
    .collect()
}

/// Wrap a flashback selection into its dashboard cluster.
/// Returns `None` when there is nothing to show.
pub fn flashback_cluster(vibes: Vec<Vibe>) -> Option<MemoryCluster> {
  MemoryCluster::from_members(
    "On this day".to_owned(),
    ClusterKind::Flashback,
    vibes,
  )
}
