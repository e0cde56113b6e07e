//! Registry-reported exceptions.
//!
//! The register answers bad requests (invalid search text, unknown GUID, no
//! match) with `exception` elements inside an otherwise normal response. These
//! are data, not Rust errors: the mapper accumulates them here and the views
//! surface them in place of the entity attributes.

use serde::{Deserialize, Serialize};

/// All messages the register reported under one exception code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryException {
  pub code:     String,
  pub messages: Vec<String>,
}

/// Exception messages keyed by code, in order of first appearance. Repeated
/// codes accumulate messages instead of overwriting them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryExceptions {
  entries: Vec<RegistryException>,
}

impl RegistryExceptions {
  pub fn new() -> Self { Self::default() }

  pub fn add(&mut self, code: impl Into<String>, message: impl Into<String>) {
    let code = code.into();
    let message = message.into();
    match self.entries.iter_mut().find(|e| e.code == code) {
      Some(entry) => entry.messages.push(message),
      None => self.entries.push(RegistryException {
        code,
        messages: vec![message],
      }),
    }
  }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// Messages reported under `code`; empty if none.
  pub fn get(&self, code: &str) -> &[String] {
    self
      .entries
      .iter()
      .find(|e| e.code == code)
      .map(|e| e.messages.as_slice())
      .unwrap_or(&[])
  }

  pub fn iter(&self) -> impl Iterator<Item = &RegistryException> {
    self.entries.iter()
  }

  /// Every message, grouped by code in order of first appearance.
  pub fn messages(&self) -> impl Iterator<Item = &str> {
    self
      .entries
      .iter()
      .flat_map(|e| e.messages.iter().map(String::as_str))
  }

  /// All messages joined with `", "`, as exposed in the `errors` field.
  pub fn joined(&self) -> String {
    self.messages().collect::<Vec<_>>().join(", ")
  }
}
