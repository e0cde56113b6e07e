//! Error types for `abr-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A date field could not be parsed. The mapper recovers from this by
  /// substituting the documented default; it never reaches callers.
  #[error("invalid date in {field}: {value:?}")]
  InvalidDate { field: &'static str, value: String },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
