//! Feed aggregation for the Vibe dashboard.
//!
//! Pure, synchronous transformations over an in-memory vibe list: hero-slot
//! selection, batch collapsing, date-bucket clustering, and flashback
//! selection. Nothing here performs I/O or can fail; each feed refresh
//! recomputes a fresh [`FeedView`] from a complete snapshot, so concurrent
//! refreshes are trivially race-free.

pub mod cluster;
pub mod dedup;
pub mod flashback;
pub mod hero;

pub use cluster::{ClusterKind, MemoryCluster, cluster_vibes};
pub use dedup::{DedupedSent, dedup_batches};
pub use flashback::{flashback_cluster, flashbacks};
pub use hero::{HERO_LIMIT, hero_candidates};

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use vibe_core::{vibe::Vibe, view::ViewMode};


// ─── FeedView ────────────────────────────────────────────────────────────────

/// One computed dashboard snapshot. Derived on every refresh, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
  pub view:             ViewMode,
  /// Up to [`HERO_LIMIT`] vibes for the hero slot, unplayed first.
  pub hero:             Vec<Vibe>,
  /// Date-bucket clusters, newest first. In the sent view these hold one
  /// representative per batch.
  pub clusters:         Vec<MemoryCluster>,
  /// The "On this day" section, if any vibe qualifies. Always drawn from
  /// the raw list, even in the sent view.
  pub flashbacks:       Option<MemoryCluster>,
  /// Recipient count per group key, for "sent to N friends" badges.
  /// Empty in the received view.
  pub recipient_counts: HashMap<Uuid, usize>,
}

/// Compute a full dashboard snapshot from one direction's vibe list.
///
/// `vibes` is the raw store snapshot for the viewer (newest first, as the
/// list operations return it). Batch collapsing applies only to
/// [`ViewMode::Sent`]; the hero slot and flashbacks always see the raw list.
pub fn build_feed(
  vibes: &[Vibe],
  view: ViewMode,
  now: DateTime<Utc>,
) -> FeedView {
  let hero = hero_candidates(vibes);

  let (clustered, recipient_counts) = match view {
    ViewMode::Sent => {
      let deduped = dedup_batches(vibes);
      (deduped.vibes, deduped.recipient_counts)
    }
    ViewMode::Received => (vibes.to_vec(), HashMap::new()),
  };
  let clusters = cluster_vibes(&clustered, now);

  let flashbacks = flashback_cluster(flashbacks(vibes, now));

  FeedView { view, hero, clusters, flashbacks, recipient_counts }
}
