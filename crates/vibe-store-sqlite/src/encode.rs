//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microsecond
//! precision) so lexicographic column order matches chronological order.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;
use vibe_core::vibe::{MediaKind, Reaction, Vibe};

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, false)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── MediaKind ───────────────────────────────────────────────────────────────

pub fn encode_media_kind(k: MediaKind) -> &'static str {
  match k {
    MediaKind::Photo => "photo",
    MediaKind::Video => "video",
    MediaKind::AudioOnly => "audio_only",
  }
}

pub fn decode_media_kind(s: &str) -> Result<MediaKind> {
  match s {
    "photo" => Ok(MediaKind::Photo),
    "video" => Ok(MediaKind::Video),
    "audio_only" => Ok(MediaKind::AudioOnly),
    other => Err(Error::UnknownMediaKind(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// A `vibes` row as read from SQLite, before decoding.
pub struct RawVibe {
  pub vibe_id:     String,
  pub sender_id:   String,
  pub receiver_id: String,
  pub created_at:  String,
  pub is_played:   bool,
  pub batch_id:    Option<String>,
  pub media_kind:  String,
  pub media_ref:   String,
}

impl RawVibe {
  pub fn into_vibe(self, reactions: Vec<Reaction>) -> Result<Vibe> {
    Ok(Vibe {
      vibe_id: decode_uuid(&self.vibe_id)?,
      sender_id: decode_uuid(&self.sender_id)?,
      receiver_id: decode_uuid(&self.receiver_id)?,
      created_at: decode_dt(&self.created_at)?,
      is_played: self.is_played,
      batch_id: self.batch_id.as_deref().map(decode_uuid).transpose()?,
      media_kind: decode_media_kind(&self.media_kind)?,
      media_ref: self.media_ref,
      reactions,
    })
  }
}

/// A `reactions` row as read from SQLite, before decoding.
pub struct RawReaction {
  pub emoji:      String,
  pub reactor_id: String,
  pub reacted_at: String,
}

impl RawReaction {
  pub fn into_reaction(self) -> Result<Reaction> {
    Ok(Reaction {
      emoji:      self.emoji,
      reactor_id: decode_uuid(&self.reactor_id)?,
      reacted_at: decode_dt(&self.reacted_at)?,
    })
  }
}
