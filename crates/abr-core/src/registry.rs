//! The `Registry` trait, the seam between lookups and transport.
//!
//! Implemented by the HTTP client in `abr-client` and by fixture-backed
//! registries in tests. Higher layers (`abr-api`, `abr-cli`) depend on this
//! abstraction, not on any concrete transport.

use std::future::Future;

/// Which register search method a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
  /// Search by Australian Business Number.
  Abn,
  /// Search by ASIC number (ACN).
  Asic,
  /// Simple-protocol name search.
  Name,
}

/// A source of raw register response documents.
///
/// Every method receives an already sanitised query and returns the response
/// body unparsed. Registry-level problems (invalid search text, unknown GUID)
/// arrive inside a successful body; `Self::Error` is reserved for transport
/// failures.
pub trait Registry: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the historical record set for an ABN.
  fn fetch_abn<'a>(
    &'a self,
    abn: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// Fetch the historical record set for an ACN.
  fn fetch_asic<'a>(
    &'a self,
    acn: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// Run a name search.
  fn fetch_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
