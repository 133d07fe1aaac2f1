//! Handlers for `/vibes` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/vibes` | `?user` and `?view` required; optional `limit`, `offset`, `created_before` |
//! | `GET`  | `/vibes/:id` | Single vibe |
//! | `POST` | `/vibes` | Body: [`SendBody`]; one send action, returns 201 + all created copies |
//! | `POST` | `/vibes/:id/play` | Flip the played flag (idempotent) |
//! | `POST` | `/vibes/:id/reactions` | Body: [`ReactBody`]; appends one reaction |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use vibe_core::{
  store::{VibeQuery, VibeStore},
  vibe::{MediaKind, NewVibe, Vibe},
  view::ViewMode,
};

use crate::{ApiState, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Whose vibes to return.
  pub user:           Uuid,
  /// `received` or `sent`.
  pub view:           ViewMode,
  pub limit:          Option<usize>,
  pub offset:         Option<usize>,
  /// Cursor: only vibes created strictly before this instant.
  pub created_before: Option<DateTime<Utc>>,
}

/// `GET /vibes?user=<id>&view=received|sent[&limit=..][&offset=..][&created_before=..]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Vibe>>, ApiError>
where
  S: VibeStore,
{
  let query = VibeQuery {
    limit:          params.limit,
    offset:         params.offset,
    created_before: params.created_before,
  };

  let vibes = match params.view {
    ViewMode::Received => state.store.list_received(params.user, query).await,
    ViewMode::Sent => state.store.list_sent(params.user, query).await,
  }
  .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(vibes))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /vibes/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vibe>, ApiError>
where
  S: VibeStore,
{
  let vibe = state
    .store
    .get_vibe(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("vibe {id} not found")))?;
  Ok(Json(vibe))
}

// ─── Send ────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /vibes` — one send action.
#[derive(Debug, Deserialize)]
pub struct SendBody {
  pub sender_id:    Uuid,
  pub receiver_ids: Vec<Uuid>,
  pub media_kind:   MediaKind,
  pub media_ref:    String,
}

/// `POST /vibes` — returns 201 + every created per-recipient copy.
pub async fn send<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<SendBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: VibeStore,
{
  if body.receiver_ids.is_empty() {
    return Err(ApiError::BadRequest(
      "a send action requires at least one receiver".to_owned(),
    ));
  }

  let vibes = state
    .store
    .send(NewVibe {
      sender_id:    body.sender_id,
      receiver_ids: body.receiver_ids,
      media_kind:   body.media_kind,
      media_ref:    body.media_ref,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((StatusCode::CREATED, Json(vibes)))
}

// ─── Play ────────────────────────────────────────────────────────────────────

/// `POST /vibes/:id/play`
pub async fn play<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vibe>, ApiError>
where
  S: VibeStore,
{
  let vibe = state
    .store
    .mark_played(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("vibe {id} not found")))?;
  Ok(Json(vibe))
}

// ─── React ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /vibes/:id/reactions`.
#[derive(Debug, Deserialize)]
pub struct ReactBody {
  pub emoji:      String,
  pub reactor_id: Uuid,
}

/// `POST /vibes/:id/reactions` — returns the vibe with the appended reaction.
pub async fn react<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ReactBody>,
) -> Result<Json<Vibe>, ApiError>
where
  S: VibeStore,
{
  let vibe = state
    .store
    .add_reaction(id, body.emoji, body.reactor_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("vibe {id} not found")))?;
  Ok(Json(vibe))
}
