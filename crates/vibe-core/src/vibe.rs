//! Vibe types — the atomic unit of shared content.
//!
//! A vibe is one short media message (photo, video, or voice-only) addressed
//! to exactly one receiver. A single "send to N friends" action creates N
//! independent vibes that share a `batch_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Media ───────────────────────────────────────────────────────────────────

/// What kind of media the vibe carries.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
  Photo,
  Video,
  AudioOnly,
}

// ─── Reactions ───────────────────────────────────────────────────────────────

/// One emoji reaction left on a vibe by its receiver (or sender).
/// Reactions form an ordered, append-only sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
  pub emoji:      String,
  pub reactor_id: Uuid,
  pub reacted_at: DateTime<Utc>,
}

// ─── Vibe ────────────────────────────────────────────────────────────────────

/// One shared media message.
///
/// `created_at` is store-assigned at send time and never changes.
/// `is_played` transitions false→true at most once and never reverts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vibe {
  pub vibe_id:     Uuid,
  pub sender_id:   Uuid,
  pub receiver_id: Uuid,
  /// Store-assigned timestamp; identical across all copies of one batch.
  pub created_at:  DateTime<Utc>,
  /// Whether the receiver has viewed/listened to this vibe.
  pub is_played:   bool,
  /// Shared by all per-recipient copies of one multi-send; `None` for a
  /// single-recipient send.
  pub batch_id:    Option<Uuid>,
  pub media_kind:  MediaKind,
  /// Opaque reference to the media blob (storage path or URL). The media
  /// itself never passes through this service.
  pub media_ref:   String,
  pub reactions:   Vec<Reaction>,
}

impl Vibe {
  /// The key under which this vibe groups when collapsing batch sends:
  /// the shared `batch_id` if present, otherwise its own id.
  pub fn group_key(&self) -> Uuid { self.batch_id.unwrap_or(self.vibe_id) }
}

// ─── NewVibe ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::VibeStore::send`] — one send action.
///
/// The store assigns ids and `created_at`, and mints a shared `batch_id`
/// when `receiver_ids` names more than one friend.
#[derive(Debug, Clone)]
pub struct NewVibe {
  pub sender_id:    Uuid,
  pub receiver_ids: Vec<Uuid>,
  pub media_kind:   MediaKind,
  pub media_ref:    String,
}

impl NewVibe {
  /// Convenience constructor for a single-recipient send.
  pub fn to(
    sender_id: Uuid,
    receiver_id: Uuid,
    media_kind: MediaKind,
    media_ref: impl Into<String>,
  ) -> Self {
    Self {
      sender_id,
      receiver_ids: vec![receiver_id],
      media_kind,
      media_ref: media_ref.into(),
    }
  }
}
