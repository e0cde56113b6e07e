//! Error types for the register payload reader.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("xml error at byte {position}: {message}")]
  Xml { position: u64, message: String },

  #[error("response body contains no XML element")]
  EmptyDocument,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
