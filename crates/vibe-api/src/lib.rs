//! JSON REST API for the Vibe messaging service.
//!
//! Exposes an axum [`Router`] backed by any [`vibe_core::store::VibeStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", vibe_api::api_router(store.clone(), clock.clone()))
//! ```

pub mod error;
pub mod feed;
pub mod vibes;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use vibe_core::{clock::Clock, store::VibeStore};

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct ApiState<S> {
  pub store: Arc<S>,
  /// Injected time source for feed computation; tests pin this.
  pub clock: Arc<dyn Clock>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), clock: self.clock.clone() }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Router<()>
where
  S: VibeStore + 'static,
{
  let state = ApiState { store, clock };
  Router::new()
    // Vibes
    .route("/vibes", get(vibes::list::<S>).post(vibes::send::<S>))
    .route("/vibes/{id}", get(vibes::get_one::<S>))
    .route("/vibes/{id}/play", post(vibes::play::<S>))
    .route("/vibes/{id}/reactions", post(vibes::react::<S>))
    // Feed
    .route("/feed", get(feed::handler::<S>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use chrono::{DateTime, Duration, Utc};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;
  use vibe_core::clock::{FixedClock, SystemClock};
  use vibe_store_sqlite::SqliteStore;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store), Arc::new(SystemClock))
  }

  async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header("content-type", "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes =
      axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn send_body(sender: Uuid, receivers: &[Uuid]) -> Value {
    json!({
      "sender_id": sender,
      "receiver_ids": receivers,
      "media_kind": "photo",
      "media_ref": "vibes/sunset.jpg",
    })
  }

  // ── Sending ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn send_returns_every_created_copy() {
    let app = app().await;
    let sender = Uuid::new_v4();
    let receivers: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

    let (status, body) =
      call(&app, "POST", "/vibes", Some(send_body(sender, &receivers))).await;
    assert_eq!(status, StatusCode::CREATED);

    let copies = body.as_array().unwrap();
    assert_eq!(copies.len(), 3);
    let batch = copies[0]["batch_id"].as_str().unwrap();
    assert!(copies.iter().all(|v| v["batch_id"] == batch));
  }

  #[tokio::test]
  async fn send_with_no_receivers_is_rejected() {
    let app = app().await;

    let (status, body) =
      call(&app, "POST", "/vibes", Some(send_body(Uuid::new_v4(), &[]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("receiver"));
  }

  // ── Reads ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_missing_vibe_is_404() {
    let app = app().await;

    let (status, _) =
      call(&app, "GET", &format!("/vibes/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn list_is_scoped_to_user_and_view() {
    let app = app().await;
    let me = Uuid::new_v4();
    let friend = Uuid::new_v4();

    call(&app, "POST", "/vibes", Some(send_body(friend, &[me]))).await;
    call(&app, "POST", "/vibes", Some(send_body(me, &[friend]))).await;

    let (status, body) =
      call(&app, "GET", &format!("/vibes?user={me}&view=received"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) =
      call(&app, "GET", &format!("/vibes?user={me}&view=sent"), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
  }

  // ── Play & react ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn play_flips_the_flag() {
    let app = app().await;
    let (_, created) = call(
      &app,
      "POST",
      "/vibes",
      Some(send_body(Uuid::new_v4(), &[Uuid::new_v4()])),
    )
    .await;
    let id = created[0]["vibe_id"].as_str().unwrap().to_owned();

    let (status, played) =
      call(&app, "POST", &format!("/vibes/{id}/play"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(played["is_played"], json!(true));
  }

  #[tokio::test]
  async fn react_appends_to_the_sequence() {
    let app = app().await;
    let receiver = Uuid::new_v4();
    let (_, created) = call(
      &app,
      "POST",
      "/vibes",
      Some(send_body(Uuid::new_v4(), &[receiver])),
    )
    .await;
    let id = created[0]["vibe_id"].as_str().unwrap().to_owned();

    let (status, updated) = call(
      &app,
      "POST",
      &format!("/vibes/{id}/reactions"),
      Some(json!({ "emoji": "🔥", "reactor_id": receiver })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["reactions"][0]["emoji"], json!("🔥"));
  }

  // ── Feed ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn received_feed_clusters_fresh_vibes_under_today() {
    let app = app().await;
    let me = Uuid::new_v4();

    call(&app, "POST", "/vibes", Some(send_body(Uuid::new_v4(), &[me]))).await;
    call(&app, "POST", "/vibes", Some(send_body(Uuid::new_v4(), &[me]))).await;

    let (status, feed) =
      call(&app, "GET", &format!("/feed?user={me}&view=received"), None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(feed["clusters"][0]["title"], json!("Today"));
    assert_eq!(feed["clusters"][0]["vibes"].as_array().unwrap().len(), 2);
    assert_eq!(feed["hero"].as_array().unwrap().len(), 2);
    assert!(feed["recipient_counts"].as_object().unwrap().is_empty());
  }

  #[tokio::test]
  async fn feed_clock_is_injectable() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let me = Uuid::new_v4();

    let live = api_router(store.clone(), Arc::new(SystemClock));
    let (_, created) =
      call(&live, "POST", "/vibes", Some(send_body(Uuid::new_v4(), &[me])))
        .await;
    let created_at: DateTime<Utc> =
      created[0]["created_at"].as_str().unwrap().parse().unwrap();

    // Viewed through a clock pinned a month later, the fresh vibe is no
    // longer "Today" — it falls into its month bucket.
    let later = api_router(
      store,
      Arc::new(FixedClock(created_at + Duration::days(30))),
    );
    let (_, feed) =
      call(&later, "GET", &format!("/feed?user={me}&view=received"), None)
        .await;

    assert_eq!(feed["clusters"][0]["kind"], json!("month"));
    assert_eq!(
      feed["clusters"][0]["title"],
      json!(created_at.format("%B %Y").to_string())
    );
  }

  #[tokio::test]
  async fn sent_feed_collapses_batches_into_one_row() {
    let app = app().await;
    let sender = Uuid::new_v4();
    let receivers: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

    call(&app, "POST", "/vibes", Some(send_body(sender, &receivers))).await;

    let (_, feed) =
      call(&app, "GET", &format!("/feed?user={sender}&view=sent"), None).await;

    assert_eq!(feed["clusters"][0]["vibes"].as_array().unwrap().len(), 1);
    let counts = feed["recipient_counts"].as_object().unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts.values().next().unwrap(), &json!(3));
  }
}
