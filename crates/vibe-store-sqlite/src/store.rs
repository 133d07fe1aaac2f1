//! [`SqliteStore`] — the SQLite implementation of [`VibeStore`].

use std::path::Path;

use chrono::{DateTime, SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use vibe_core::{
  store::{VibeQuery, VibeStore},
  vibe::{NewVibe, Vibe},
};

use crate::{
  Error, Result,
  encode::{RawReaction, RawVibe, encode_dt, encode_media_kind, encode_uuid},
  schema::SCHEMA,
};

/// Store-assigned timestamps are truncated to the microsecond width the
/// `created_at` column stores, so returned values round-trip exactly.
fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

const VIBE_COLUMNS: &str =
  "vibe_id, sender_id, receiver_id, created_at, is_played, batch_id, \
   media_kind, media_ref";

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn raw_vibe_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawVibe> {
  Ok(RawVibe {
    vibe_id:     row.get(0)?,
    sender_id:   row.get(1)?,
    receiver_id: row.get(2)?,
    created_at:  row.get(3)?,
    is_played:   row.get(4)?,
    batch_id:    row.get(5)?,
    media_kind:  row.get(6)?,
    media_ref:   row.get(7)?,
  })
}

fn load_reactions(
  conn: &rusqlite::Connection,
  vibe_id: &str,
) -> rusqlite::Result<Vec<RawReaction>> {
  let mut stmt = conn.prepare(
    "SELECT emoji, reactor_id, reacted_at FROM reactions
     WHERE vibe_id = ?1 ORDER BY reacted_at, rowid",
  )?;
  stmt
    .query_map(rusqlite::params![vibe_id], |row| {
      Ok(RawReaction {
        emoji:      row.get(0)?,
        reactor_id: row.get(1)?,
        reacted_at: row.get(2)?,
      })
    })?
    .collect()
}

fn decode_pairs(pairs: Vec<(RawVibe, Vec<RawReaction>)>) -> Result<Vec<Vibe>> {
  pairs
    .into_iter()
    .map(|(raw, raw_reactions)| {
      let reactions = raw_reactions
        .into_iter()
        .map(RawReaction::into_reaction)
        .collect::<Result<Vec<_>>>()?;
      raw.into_vibe(reactions)
    })
    .collect()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A vibe store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Shared body of `list_received` / `list_sent`; `column` selects which
  /// participant the list is scoped to.
  async fn list_by(
    &self,
    column: &'static str,
    user: Uuid,
    query: VibeQuery,
  ) -> Result<Vec<Vibe>> {
    let user_str = encode_uuid(user);
    let cursor = query.created_before.map(encode_dt);
    // SQLite treats LIMIT -1 as "no limit".
    let limit = query.limit.map(|n| n as i64).unwrap_or(-1);
    let offset = query.offset.unwrap_or(0) as i64;

    let pairs = self
      .conn
      .call(move |conn| {
        let raws = if let Some(cursor_str) = cursor {
          let mut stmt = conn.prepare(&format!(
            "SELECT {VIBE_COLUMNS} FROM vibes
             WHERE {column} = ?1 AND created_at < ?2
             ORDER BY created_at DESC LIMIT ?3 OFFSET ?4"
          ))?;
          stmt
            .query_map(
              rusqlite::params![user_str, cursor_str, limit, offset],
              raw_vibe_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {VIBE_COLUMNS} FROM vibes
             WHERE {column} = ?1
             ORDER BY created_at DESC LIMIT ?2 OFFSET ?3"
          ))?;
          stmt
            .query_map(
              rusqlite::params![user_str, limit, offset],
              raw_vibe_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        let mut pairs = Vec::with_capacity(raws.len());
        for raw in raws {
          let reactions = load_reactions(conn, &raw.vibe_id)?;
          pairs.push((raw, reactions));
        }
        Ok(pairs)
      })
      .await?;

    decode_pairs(pairs)
  }
}

// ─── VibeStore impl ──────────────────────────────────────────────────────────

impl VibeStore for SqliteStore {
  type Error = Error;

  // ── Writes ──────────────────────────────────────────────────────────────

  async fn send(&self, input: NewVibe) -> Result<Vec<Vibe>> {
    if input.receiver_ids.is_empty() {
      return Err(Error::Core(vibe_core::Error::EmptySend));
    }

    let created_at = now();
    let batch_id = (input.receiver_ids.len() > 1).then(Uuid::new_v4);

    let vibes: Vec<Vibe> = input
      .receiver_ids
      .iter()
      .map(|&receiver_id| Vibe {
        vibe_id: Uuid::new_v4(),
        sender_id: input.sender_id,
        receiver_id,
        created_at,
        is_played: false,
        batch_id,
        media_kind: input.media_kind,
        media_ref: input.media_ref.clone(),
        reactions: Vec::new(),
      })
      .collect();

    let rows: Vec<_> = vibes
      .iter()
      .map(|v| {
        (
          encode_uuid(v.vibe_id),
          encode_uuid(v.sender_id),
          encode_uuid(v.receiver_id),
          encode_dt(v.created_at),
          v.batch_id.map(encode_uuid),
          encode_media_kind(v.media_kind).to_owned(),
          v.media_ref.clone(),
        )
      })
      .collect();

    // All copies of one send action land atomically.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO vibes (
               vibe_id, sender_id, receiver_id, created_at,
               is_played, batch_id, media_kind, media_ref
             ) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?7)",
          )?;
          for (vibe_id, sender_id, receiver_id, at, batch, kind, media_ref) in
            &rows
          {
            stmt.execute(rusqlite::params![
              vibe_id,
              sender_id,
              receiver_id,
              at,
              batch,
              kind,
              media_ref,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(vibes)
  }

  async fn mark_played(&self, id: Uuid) -> Result<Option<Vibe>> {
    let id_str = encode_uuid(id);

    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE vibes SET is_played = 1 WHERE vibe_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Ok(None);
    }
    self.get_vibe(id).await
  }

  async fn add_reaction(
    &self,
    id: Uuid,
    emoji: String,
    reactor_id: Uuid,
  ) -> Result<Option<Vibe>> {
    let vibe_id_str = encode_uuid(id);
    let reaction_id_str = encode_uuid(Uuid::new_v4());
    let reactor_str = encode_uuid(reactor_id);
    let at_str = encode_dt(now());

    let inserted = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM vibes WHERE vibe_id = ?1",
            rusqlite::params![vibe_id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO reactions (reaction_id, vibe_id, emoji, reactor_id, reacted_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            reaction_id_str,
            vibe_id_str,
            emoji,
            reactor_str,
            at_str,
          ],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Ok(None);
    }
    self.get_vibe(id).await
  }

  // ── Reads ───────────────────────────────────────────────────────────────

  async fn get_vibe(&self, id: Uuid) -> Result<Option<Vibe>> {
    let id_str = encode_uuid(id);

    let pair: Option<(RawVibe, Vec<RawReaction>)> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            &format!("SELECT {VIBE_COLUMNS} FROM vibes WHERE vibe_id = ?1"),
            rusqlite::params![id_str],
            raw_vibe_from_row,
          )
          .optional()?;

        match raw {
          Some(raw) => {
            let reactions = load_reactions(conn, &raw.vibe_id)?;
            Ok(Some((raw, reactions)))
          }
          None => Ok(None),
        }
      })
      .await?;

    Ok(decode_pairs(pair.into_iter().collect())?.pop())
  }

  async fn list_received(
    &self,
    receiver_id: Uuid,
    query: VibeQuery,
  ) -> Result<Vec<Vibe>> {
    self.list_by("receiver_id", receiver_id, query).await
  }

  async fn list_sent(
    &self,
    sender_id: Uuid,
    query: VibeQuery,
  ) -> Result<Vec<Vibe>> {
    self.list_by("sender_id", sender_id, query).await
  }
}
