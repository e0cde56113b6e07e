//! The lookup service: sanitise, fetch, parse, map, project.

use abr_core::{
  key,
  lookup::LookupResult,
  mapper::map_response,
  registry::{Registry, SearchKind},
  search::NameSearchResult,
};
use chrono::{Local, NaiveDate};

use crate::error::{Error, Result};

/// The identifier searches that produce a [`LookupResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberSearch {
  Abn,
  Asic,
}

impl From<NumberSearch> for SearchKind {
  fn from(search: NumberSearch) -> Self {
    match search {
      NumberSearch::Abn => SearchKind::Abn,
      NumberSearch::Asic => SearchKind::Asic,
    }
  }
}

/// Runs lookups against a [`Registry`].
///
/// Every mapping pass is evaluated against a single date: the one fixed with
/// [`Lookup::as_of`], or the local calendar date at the time of the call.
#[derive(Debug, Clone)]
pub struct Lookup<R> {
  registry: R,
  as_of:    Option<NaiveDate>,
}

impl<R: Registry> Lookup<R> {
  pub fn new(registry: R) -> Self { Self { registry, as_of: None } }

  /// Pin the evaluation date instead of reading the clock.
  pub fn as_of(mut self, date: Option<NaiveDate>) -> Self {
    self.as_of = date;
    self
  }

  pub fn registry(&self) -> &R { &self.registry }

  /// The date current values are evaluated against.
  pub fn today(&self) -> NaiveDate {
    self.as_of.unwrap_or_else(|| Local::now().date_naive())
  }

  /// Look up an ABN, including its full history.
  pub async fn lookup_abn(&self, abn: &str) -> Result<LookupResult> {
    self.lookup_number(NumberSearch::Abn, abn).await
  }

  /// Look up an ACN through the register's ASIC search.
  pub async fn lookup_asic(&self, acn: &str) -> Result<LookupResult> {
    self.lookup_number(NumberSearch::Asic, acn).await
  }

  /// Search the register by entity or trading name.
  pub async fn search_name(&self, name: &str) -> Result<NameSearchResult> {
    let query = key::normalize_name(name);
    if query.is_empty() {
      return Err(Error::EmptyLookupKey);
    }

    let body = self
      .registry
      .fetch_name(&query)
      .await
      .map_err(|e| Error::Registry(Box::new(e)))?;
    let raw = abr_xml::parse_response(body.as_bytes())?;
    let result = NameSearchResult::new(query, &raw.groups, &raw.records);

    tracing::info!(
      results = result.results().len(),
      errors = result.has_errors(),
      "name search finished"
    );
    Ok(result)
  }

  async fn lookup_number(
    &self,
    search: NumberSearch,
    input: &str,
  ) -> Result<LookupResult> {
    let number = key::sanitize(input);
    if number.is_empty() {
      return Err(Error::EmptyLookupKey);
    }
    let kind = SearchKind::from(search);
    tracing::debug!(?kind, %number, "looking up");

    let fetch = match search {
      NumberSearch::Abn => self.registry.fetch_abn(&number).await,
      NumberSearch::Asic => self.registry.fetch_asic(&number).await,
    };
    let body = fetch.map_err(|e| Error::Registry(Box::new(e)))?;

    let today = self.today();
    let raw = abr_xml::parse_response(body.as_bytes())?;
    let result = LookupResult::new(number, map_response(&raw.groups, today), today);

    tracing::info!(
      lookup_number = result.lookup_number(),
      errors = result.has_errors(),
      "lookup finished"
    );
    Ok(result)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::canned::CannedRegistry;

  const SUCCESSFUL: &str = include_str!("../../../fixtures/successful.xml");
  const SUCCESSFUL_COMPANY: &str =
    include_str!("../../../fixtures/successful_company.xml");
  const FAILED_ABN: &str = include_str!("../../../fixtures/failed_abn.xml");
  const FAILED_GUID: &str = include_str!("../../../fixtures/failed_guid.xml");
  const NAME_SEARCH: &str = include_str!("../../../fixtures/name_search.xml");

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn lookup() -> Lookup<CannedRegistry> {
    let registry = CannedRegistry::new()
      .with(SearchKind::Abn, "18406500889", SUCCESSFUL)
      .with(SearchKind::Abn, "75584793718", SUCCESSFUL_COMPANY)
      .with(SearchKind::Abn, "12345", FAILED_ABN)
      .with(SearchKind::Asic, "004085616", FAILED_GUID)
      .with(SearchKind::Name, "paddy biggs", NAME_SEARCH)
      .with(SearchKind::Abn, "999", "Service Unavailable");
    Lookup::new(registry).as_of(Some(date(2024, 5, 1)))
  }

  #[tokio::test]
  async fn key_is_sanitised_before_fetch() {
    let result = lookup().lookup_abn("18 406 500 889").await.unwrap();
    assert_eq!(result.lookup_number(), "18406500889");
    assert!(!result.has_errors());

    let view = result.view().unwrap();
    assert_eq!(view.registered_name.as_deref(), Some("CHRISANTHY BARONE"));
    assert_eq!(view.postcode.as_deref(), Some("5067"));
  }

  #[tokio::test]
  async fn pinned_date_controls_current_values() {
    // Before the trading name took effect.
    let early = lookup().as_of(Some(date(2004, 1, 1)));
    let result = early.lookup_abn("18406500889").await.unwrap();
    assert_eq!(result.view().unwrap().trading_name, None);

    // Before the current address took effect, the closed one applies.
    let result = lookup()
      .as_of(Some(date(2000, 1, 1)))
      .lookup_abn("75584793718")
      .await
      .unwrap();
    let view = result.view().unwrap();
    assert_eq!(view.postcode.as_deref(), Some("4870"));
    assert_eq!(view.entity_status, None);
  }

  #[tokio::test]
  async fn registry_exception_is_a_result_not_an_error() {
    let result = lookup().lookup_abn("12345").await.unwrap();
    assert!(result.has_errors());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "lookup_number": "12345",
        "errors": "Search text is not a valid ABN or ACN",
      })
    );
  }

  #[tokio::test]
  async fn acn_lookup_uses_asic_search() {
    let result = lookup().lookup_asic("004 085 616").await.unwrap();
    assert_eq!(result.lookup_number(), "004085616");
    let exceptions = result.exceptions().unwrap();
    assert_eq!(exceptions.get("WebServices").len(), 1);
  }

  #[tokio::test]
  async fn number_lookups_never_hit_name_search() {
    // Only a name-search body is registered for this key.
    let registry = CannedRegistry::new().with(SearchKind::Name, "75584793718", NAME_SEARCH);
    let l = Lookup::new(registry).as_of(Some(date(2024, 5, 1)));
    assert!(matches!(l.lookup_abn("75584793718").await, Err(Error::Registry(_))));
    assert!(matches!(l.lookup_asic("75584793718").await, Err(Error::Registry(_))));
    assert_eq!(SearchKind::from(NumberSearch::Asic), SearchKind::Asic);
  }

  #[tokio::test]
  async fn name_search_normalises_query() {
    let result = lookup().search_name("  paddy   biggs ").await.unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["lookup_name"], "paddy biggs");
    assert_eq!(json["search_results"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn empty_keys_are_rejected() {
    let l = lookup();
    assert!(matches!(l.lookup_abn(" -_ ").await, Err(Error::EmptyLookupKey)));
    assert!(matches!(l.lookup_asic("").await, Err(Error::EmptyLookupKey)));
    assert!(matches!(l.search_name("   ").await, Err(Error::EmptyLookupKey)));
  }

  #[tokio::test]
  async fn transport_and_parse_failures_propagate() {
    let l = lookup();
    let err = l.lookup_abn("11111111111").await.unwrap_err();
    assert!(matches!(err, Error::Registry(_)), "{err}");
    assert!(err.is_upstream());

    let err = l.lookup_abn("999").await.unwrap_err();
    assert!(matches!(err, Error::Xml(_)), "{err}");
  }

  #[test]
  fn today_defaults_to_the_clock() {
    let l = Lookup::new(CannedRegistry::new());
    assert_eq!(l.today(), Local::now().date_naive());
  }
}
