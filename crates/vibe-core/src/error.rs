//! Error types for `vibe-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("a send action requires at least one receiver")]
  EmptySend,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
