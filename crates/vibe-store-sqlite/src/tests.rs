//! Integration tests for `SqliteStore` against an in-memory database.

use std::time::Duration;

use uuid::Uuid;
use vibe_core::{
  store::{VibeQuery, VibeStore},
  vibe::{MediaKind, NewVibe},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// Space out store-assigned timestamps so ordering assertions are stable.
async fn tick() { tokio::time::sleep(Duration::from_millis(2)).await }

fn photo_to(sender: Uuid, receiver: Uuid) -> NewVibe {
  NewVibe::to(sender, receiver, MediaKind::Photo, "vibes/sunset.jpg")
}

// ─── Sending ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn single_send_has_no_batch_id() {
  let s = store().await;
  let sender = Uuid::new_v4();
  let receiver = Uuid::new_v4();

  let sent = s.send(photo_to(sender, receiver)).await.unwrap();
  assert_eq!(sent.len(), 1);
  assert_eq!(sent[0].sender_id, sender);
  assert_eq!(sent[0].receiver_id, receiver);
  assert!(sent[0].batch_id.is_none());
  assert!(!sent[0].is_played);
}

#[tokio::test]
async fn batch_send_shares_batch_id_and_timestamp() {
  let s = store().await;
  let sender = Uuid::new_v4();
  let receivers: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

  let sent = s
    .send(NewVibe {
      sender_id:    sender,
      receiver_ids: receivers.clone(),
      media_kind:   MediaKind::Video,
      media_ref:    "vibes/clip.mp4".to_owned(),
    })
    .await
    .unwrap();

  assert_eq!(sent.len(), 3);
  let batch = sent[0].batch_id.expect("batch id");
  assert!(sent.iter().all(|v| v.batch_id == Some(batch)));
  assert!(sent.iter().all(|v| v.created_at == sent[0].created_at));

  let got: Vec<Uuid> = sent.iter().map(|v| v.receiver_id).collect();
  assert_eq!(got, receivers);
}

#[tokio::test]
async fn send_with_no_receivers_is_an_error() {
  let s = store().await;

  let result = s
    .send(NewVibe {
      sender_id:    Uuid::new_v4(),
      receiver_ids: Vec::new(),
      media_kind:   MediaKind::Photo,
      media_ref:    "vibes/none.jpg".to_owned(),
    })
    .await;
  assert!(result.is_err());
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_vibe_round_trips() {
  let s = store().await;
  let sent = s.send(photo_to(Uuid::new_v4(), Uuid::new_v4())).await.unwrap();

  let got = s.get_vibe(sent[0].vibe_id).await.unwrap().unwrap();
  assert_eq!(got.vibe_id, sent[0].vibe_id);
  assert_eq!(got.created_at, sent[0].created_at);
  assert_eq!(got.media_kind, MediaKind::Photo);
  assert_eq!(got.media_ref, "vibes/sunset.jpg");
}

#[tokio::test]
async fn get_vibe_missing_returns_none() {
  let s = store().await;
  let result = s.get_vibe(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn list_received_is_scoped_and_newest_first() {
  let s = store().await;
  let me = Uuid::new_v4();
  let someone_else = Uuid::new_v4();

  let first = s.send(photo_to(Uuid::new_v4(), me)).await.unwrap();
  tick().await;
  s.send(photo_to(Uuid::new_v4(), someone_else)).await.unwrap();
  tick().await;
  let second = s.send(photo_to(Uuid::new_v4(), me)).await.unwrap();

  let mine = s.list_received(me, VibeQuery::default()).await.unwrap();
  assert_eq!(mine.len(), 2);
  assert_eq!(mine[0].vibe_id, second[0].vibe_id);
  assert_eq!(mine[1].vibe_id, first[0].vibe_id);
}

#[tokio::test]
async fn list_sent_includes_every_batch_copy() {
  let s = store().await;
  let sender = Uuid::new_v4();

  s.send(NewVibe {
    sender_id:    sender,
    receiver_ids: vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()],
    media_kind:   MediaKind::AudioOnly,
    media_ref:    "vibes/voice.ogg".to_owned(),
  })
  .await
  .unwrap();
  tick().await;
  s.send(photo_to(sender, Uuid::new_v4())).await.unwrap();

  let sent = s.list_sent(sender, VibeQuery::default()).await.unwrap();
  assert_eq!(sent.len(), 4);
  assert_eq!(sent.iter().filter(|v| v.batch_id.is_some()).count(), 3);
}

#[tokio::test]
async fn list_pagination_with_limit_and_offset() {
  let s = store().await;
  let me = Uuid::new_v4();

  for _ in 0..5 {
    s.send(photo_to(Uuid::new_v4(), me)).await.unwrap();
    tick().await;
  }

  let all = s.list_received(me, VibeQuery::default()).await.unwrap();
  let page = s
    .list_received(me, VibeQuery {
      limit: Some(2),
      offset: Some(1),
      created_before: None,
    })
    .await
    .unwrap();

  assert_eq!(page.len(), 2);
  assert_eq!(page[0].vibe_id, all[1].vibe_id);
  assert_eq!(page[1].vibe_id, all[2].vibe_id);
}

#[tokio::test]
async fn list_created_before_cursor_excludes_newer() {
  let s = store().await;
  let me = Uuid::new_v4();

  let old = s.send(photo_to(Uuid::new_v4(), me)).await.unwrap();
  tick().await;
  let new = s.send(photo_to(Uuid::new_v4(), me)).await.unwrap();

  let page = s
    .list_received(me, VibeQuery {
      limit: None,
      offset: None,
      created_before: Some(new[0].created_at),
    })
    .await
    .unwrap();

  assert_eq!(page.len(), 1);
  assert_eq!(page[0].vibe_id, old[0].vibe_id);
}

// ─── Played flag ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn mark_played_flips_once_and_is_idempotent() {
  let s = store().await;
  let sent = s.send(photo_to(Uuid::new_v4(), Uuid::new_v4())).await.unwrap();

  let played = s.mark_played(sent[0].vibe_id).await.unwrap().unwrap();
  assert!(played.is_played);

  // Second mark is a no-op, not an error.
  let again = s.mark_played(sent[0].vibe_id).await.unwrap().unwrap();
  assert!(again.is_played);
}

#[tokio::test]
async fn mark_played_missing_returns_none() {
  let s = store().await;
  let result = s.mark_played(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

// ─── Reactions ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn reactions_append_in_order() {
  let s = store().await;
  let receiver = Uuid::new_v4();
  let sent = s.send(photo_to(Uuid::new_v4(), receiver)).await.unwrap();
  let id = sent[0].vibe_id;

  s.add_reaction(id, "🔥".to_owned(), receiver).await.unwrap();
  tick().await;
  let updated = s
    .add_reaction(id, "😂".to_owned(), receiver)
    .await
    .unwrap()
    .unwrap();

  let emojis: Vec<&str> =
    updated.reactions.iter().map(|r| r.emoji.as_str()).collect();
  assert_eq!(emojis, vec!["🔥", "😂"]);
  assert!(updated.reactions.iter().all(|r| r.reactor_id == receiver));
}

#[tokio::test]
async fn add_reaction_missing_returns_none() {
  let s = store().await;
  let result = s
    .add_reaction(Uuid::new_v4(), "🔥".to_owned(), Uuid::new_v4())
    .await
    .unwrap();
  assert!(result.is_none());
}
