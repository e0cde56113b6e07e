//! An in-memory [`Registry`] serving pre-recorded response bodies.
//!
//! Useful for offline runs and for exercising the lookup pipeline in tests
//! without touching the network.

use std::{collections::HashMap, future::Future};

use abr_core::registry::{Registry, SearchKind};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct CannedRegistry {
  responses: HashMap<(SearchKind, String), String>,
}

impl CannedRegistry {
  pub fn new() -> Self { Self::default() }

  /// Serve `body` for searches of `kind` with exactly `query`.
  pub fn with(
    mut self,
    kind: SearchKind,
    query: impl Into<String>,
    body: impl Into<String>,
  ) -> Self {
    self.responses.insert((kind, query.into()), body.into());
    self
  }

  fn respond(&self, kind: SearchKind, query: &str) -> Result<String> {
    self
      .responses
      .get(&(kind, query.to_string()))
      .cloned()
      .ok_or_else(|| Error::NotCanned { kind, query: query.to_string() })
  }
}

impl Registry for CannedRegistry {
  type Error = Error;

  fn fetch_abn<'a>(
    &'a self,
    abn: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a {
    async move { self.respond(SearchKind::Abn, abn) }
  }

  fn fetch_asic<'a>(
    &'a self,
    acn: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a {
    async move { self.respond(SearchKind::Asic, acn) }
  }

  fn fetch_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a {
    async move { self.respond(SearchKind::Name, name) }
  }
}
