//! The direction a feed is viewed from.

use serde::{Deserialize, Serialize};

/// Which side of the exchange a feed shows.
///
/// Some feed behaviour differs per view (batch collapsing only applies to
/// `Sent`), so this is an explicit parameter rather than a hidden flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
  /// Vibes addressed to the viewer.
  Received,
  /// Vibes the viewer sent.
  Sent,
}
