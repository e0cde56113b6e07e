//! Error types for `abr-client`.

use abr_core::registry::SearchKind;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("register responded with {0}")]
  Status(StatusCode),

  #[error("malformed register response: {0}")]
  Xml(#[from] abr_xml::Error),

  #[error("lookup key is empty after sanitisation")]
  EmptyLookupKey,

  #[error("no canned response for {kind:?} {query:?}")]
  NotCanned { kind: SearchKind, query: String },

  #[error("registry error: {0}")]
  Registry(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Whether the failure happened between us and the register, as opposed
  /// to a problem with the caller's input.
  pub fn is_upstream(&self) -> bool { !matches!(self, Self::EmptyLookupKey) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
