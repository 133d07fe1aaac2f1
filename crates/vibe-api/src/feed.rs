//! Handler for `GET /feed`.
//!
//! Takes a fresh snapshot of the viewer's vibes from the store and runs the
//! pure feed aggregation over it with the injected clock. Nothing is cached;
//! each request recomputes the full [`FeedView`].

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use uuid::Uuid;
use vibe_core::{
  store::{VibeQuery, VibeStore},
  view::ViewMode,
};
use vibe_feed::FeedView;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct FeedParams {
  /// The viewer.
  pub user: Uuid,
  /// `received` or `sent`.
  pub view: ViewMode,
}

/// `GET /feed?user=<id>&view=received|sent`
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<FeedParams>,
) -> Result<Json<FeedView>, ApiError>
where
  S: VibeStore,
{
  let vibes = match params.view {
    ViewMode::Received => {
      state.store.list_received(params.user, VibeQuery::default()).await
    }
    ViewMode::Sent => {
      state.store.list_sent(params.user, VibeQuery::default()).await
    }
  }
  .map_err(|e| ApiError::Store(Box::new(e)))?;

  let feed = vibe_feed::build_feed(&vibes, params.view, state.clock.now());
  Ok(Json(feed))
}
