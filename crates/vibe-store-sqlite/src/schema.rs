//! SQL schema for the SQLite vibe store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per recipient copy. A multi-recipient send inserts N rows that
-- share batch_id, sender_id, created_at, and media columns.
CREATE TABLE IF NOT EXISTS vibes (
    vibe_id     TEXT PRIMARY KEY,
    sender_id   TEXT NOT NULL,
    receiver_id TEXT NOT NULL,
    created_at  TEXT NOT NULL,              -- ISO 8601 UTC; store-assigned
    is_played   INTEGER NOT NULL DEFAULT 0, -- flips 0 -> 1 at most once
    batch_id    TEXT,                       -- NULL for single sends
    media_kind  TEXT NOT NULL,              -- 'photo' | 'video' | 'audio_only'
    media_ref   TEXT NOT NULL
);

-- Reactions are append-only; display order is reacted_at, then rowid.
CREATE TABLE IF NOT EXISTS reactions (
    reaction_id TEXT PRIMARY KEY,
    vibe_id     TEXT NOT NULL REFERENCES vibes(vibe_id),
    emoji       TEXT NOT NULL,
    reactor_id  TEXT NOT NULL,
    reacted_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS vibes_receiver_idx  ON vibes(receiver_id, created_at);
CREATE INDEX IF NOT EXISTS vibes_sender_idx    ON vibes(sender_id, created_at);
CREATE INDEX IF NOT EXISTS vibes_batch_idx     ON vibes(batch_id);
CREATE INDEX IF NOT EXISTS reactions_vibe_idx  ON reactions(vibe_id);

PRAGMA user_version = 1;
";
