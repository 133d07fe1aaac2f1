//! Hero-slot candidate selection.
//!
//! The dashboard's most prominent position shows the handful of vibes the
//! viewer most likely wants next: anything unplayed first, newest first
//! within each group.

use vibe_core::vibe::Vibe;

/// Maximum number of candidates surfaced for the hero slot.
pub const HERO_LIMIT: usize = 5;

/// Select up to [`HERO_LIMIT`] vibes: unplayed before played, then newest
/// first. The sort is stable, so full ties keep their input order.
///
/// Works on either direction's list; the input need not be pre-sorted.
pub fn hero_candidates(vibes: &[Vibe]) -> Vec<Vibe> {
  let mut out = vibes.to_vec();
  out.sort_by(|a, b| {
    a.is_played
      .cmp(&b.is_played)
      .then_with(|| b.created_at.cmp(&a.created_at))
  });
  out.truncate(HERO_LIMIT);
  out
}
