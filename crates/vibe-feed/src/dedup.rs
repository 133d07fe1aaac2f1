//! Batch collapsing for the sent view.
//!
//! One "send to N friends" action produces N per-recipient vibes that share
//! a `batch_id`. The sender's own feed should show that action once, with a
//! "sent to N friends" badge, not N near-identical rows.

use std::collections::HashMap;

use uuid::Uuid;
use vibe_core::vibe::Vibe;

/// The result of collapsing batch sends: one representative vibe per send
/// action, plus how many recipients each action reached.
#[derive(Debug, Clone, Default)]
pub struct DedupedSent {
  /// One vibe per group, newest first.
  pub vibes:            Vec<Vibe>,
  /// Group key ([`Vibe::group_key`]: `batch_id`, or the vibe's own id for
  /// single sends) to recipient count. Counts sum to the input length.
  pub recipient_counts: HashMap<Uuid, usize>,
}

/// Collapse batch copies down to one representative per group.
///
/// The representative is the first-encountered member of its group in input
/// order. Vibes without a `batch_id` each form their own group of size 1.
pub fn dedup_batches(vibes: &[Vibe]) -> DedupedSent {
  let mut recipient_counts: HashMap<Uuid, usize> = HashMap::new();
  let mut kept: Vec<Vibe> = Vec::new();

  for vibe in vibes {
    let count = recipient_counts.entry(vibe.group_key()).or_insert(0);
    if *count == 0 {
      kept.push(vibe.clone());
    }
    *count += 1;
  }

  kept.sort_by(|a, b| b.created_at.cmp(&a.created_at));

  DedupedSent { vibes: kept, recipient_counts }
}
