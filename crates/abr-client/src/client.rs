//! reqwest-backed [`Registry`] talking to the ABR XML search web service.

use std::{future::Future, time::Duration};

use abr_core::registry::{Registry, SearchKind};
use reqwest::Client;

use crate::error::{Error, Result};

/// Production endpoint of the ABR XML search service.
pub const DEFAULT_BASE_URL: &str =
  "https://abr.business.gov.au/abrxmlsearch/AbrXmlSearch.asmx";

/// State filters sent with every name search. All are left blank, which the
/// service treats as "any state".
const STATE_FILTERS: [&str; 8] =
  ["NSW", "SA", "ACT", "VIC", "WA", "NT", "QLD", "TAS"];

/// Connection settings for the register.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
  /// Authentication GUID issued by the ABR.
  pub guid:     String,
  pub timeout:  Duration,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      guid:     String::new(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// HTTP client for the register.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
  client: Client,
  config: ClientConfig,
}

impl HttpRegistry {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &ClientConfig { &self.config }

  fn url(&self, kind: SearchKind) -> String {
    format!(
      "{}/{}",
      self.config.base_url.trim_end_matches('/'),
      method_name(kind)
    )
  }

  async fn get(&self, kind: SearchKind, query: &str) -> Result<String> {
    let url = self.url(kind);
    tracing::debug!(?kind, %url, "querying register");

    let resp = self
      .client
      .get(&url)
      .query(&query_params(kind, query, &self.config.guid))
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      tracing::warn!(?kind, %status, "register request failed");
      return Err(Error::Status(status));
    }
    Ok(resp.text().await?)
  }
}

impl Registry for HttpRegistry {
  type Error = Error;

  fn fetch_abn<'a>(
    &'a self,
    abn: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a {
    async move { self.get(SearchKind::Abn, abn).await }
  }

  fn fetch_asic<'a>(
    &'a self,
    acn: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a {
    async move { self.get(SearchKind::Asic, acn).await }
  }

  fn fetch_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a {
    async move { self.get(SearchKind::Name, name).await }
  }
}

// ─── Request shape ────────────────────────────────────────────────────────────

/// The web-service method serving `kind`.
pub fn method_name(kind: SearchKind) -> &'static str {
  match kind {
    SearchKind::Abn => "ABRSearchByABN",
    SearchKind::Asic => "ABRSearchByASIC",
    SearchKind::Name => "ABRSearchByNameSimpleProtocol",
  }
}

/// Query-string parameters for one request, in the order the service
/// documents them.
pub fn query_params<'a>(
  kind: SearchKind,
  query: &'a str,
  guid: &'a str,
) -> Vec<(&'static str, &'a str)> {
  match kind {
    SearchKind::Abn | SearchKind::Asic => vec![
      ("searchString", query),
      ("includeHistoricalDetails", "Y"),
      ("authenticationGuid", guid),
    ],
    SearchKind::Name => {
      let mut params = vec![
        ("name", query),
        ("postcode", ""),
        ("legalName", ""),
        ("tradingName", ""),
      ];
      params.extend(STATE_FILTERS.iter().map(|s| (*s, "")));
      params.push(("authenticationGuid", guid));
      params
    }
  }
}
