//! The `VibeStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `vibe-store-sqlite`).
//! Higher layers (`vibe-api`, the server binary) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::vibe::{NewVibe, Vibe};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Pagination parameters for the list operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct VibeQuery {
  pub limit:          Option<usize>,
  pub offset:         Option<usize>,
  /// Cursor: only return vibes created strictly before this instant.
  pub created_before: Option<DateTime<Utc>>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a vibe store backend.
///
/// Vibes are immutable after creation except for two append-style updates:
/// the one-way `is_played` flag and the ordered reaction sequence.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait VibeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist one send action: one vibe per receiver in `input`.
  ///
  /// All created vibes carry the same store-assigned `created_at`; when the
  /// action names more than one receiver they also share a fresh `batch_id`.
  /// Returns an error if `input.receiver_ids` is empty.
  fn send(
    &self,
    input: NewVibe,
  ) -> impl Future<Output = Result<Vec<Vibe>, Self::Error>> + Send + '_;

  /// Flip `is_played` to `true`. The transition happens at most once;
  /// marking an already-played vibe is a no-op. Returns `None` if the vibe
  /// does not exist.
  fn mark_played(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Vibe>, Self::Error>> + Send + '_;

  /// Append a reaction to the vibe's ordered reaction sequence.
  /// Returns the updated vibe, or `None` if the vibe does not exist.
  fn add_reaction(
    &self,
    id: Uuid,
    emoji: String,
    reactor_id: Uuid,
  ) -> impl Future<Output = Result<Option<Vibe>, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a vibe by id. Returns `None` if not found.
  fn get_vibe(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Vibe>, Self::Error>> + Send + '_;

  /// All vibes addressed to `receiver_id`, newest first.
  fn list_received(
    &self,
    receiver_id: Uuid,
    query: VibeQuery,
  ) -> impl Future<Output = Result<Vec<Vibe>, Self::Error>> + Send + '_;

  /// All vibes sent by `sender_id` (every batch copy included), newest
  /// first.
  fn list_sent(
    &self,
    sender_id: Uuid,
    query: VibeQuery,
  ) -> impl Future<Output = Result<Vec<Vibe>, Self::Error>> + Send + '_;
}
