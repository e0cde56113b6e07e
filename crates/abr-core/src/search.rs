//! Name search results.
//!
//! A name search returns one `searchResultsRecord` per matching entity. Each
//! record is summarised as the ABN, its status, the best name the record
//! carries and a `postcode, state` location string.

use serde::{Deserialize, Serialize};

use crate::{
  entity::Name,
  exception::RegistryExceptions,
  field::{self, FieldGroup, GroupKind},
};

/// Which register name a search hit matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameType {
  #[serde(rename = "Entity Name")]
  EntityName,
  #[serde(rename = "Trading Name")]
  TradingName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
  pub abn:       String,
  pub status:    String,
  pub name:      String,
  pub name_type: NameType,
  pub location:  String,
}

impl SearchResult {
  /// Summarise one `searchResultsRecord`.
  ///
  /// The entity's main name wins, then its legal name; a record with neither
  /// is reported under its trading name.
  pub fn from_record(groups: &[FieldGroup]) -> Self {
    let first = |kind: GroupKind| groups.iter().find(|g| g.kind == kind);

    let (abn, status) = first(GroupKind::Identifier)
      .map(|g| {
        (
          g.field(field::IDENTIFIER_VALUE).to_string(),
          g.field(field::IDENTIFIER_STATUS).to_string(),
        )
      })
      .unwrap_or_default();

    let (name, name_type) = if let Some(g) = first(GroupKind::MainName) {
      (g.field(field::ORGANISATION_NAME).to_string(), NameType::EntityName)
    } else if let Some(g) = first(GroupKind::LegalName) {
      let person = Name::Person {
        given_name:       g.field(field::GIVEN_NAME).to_string(),
        other_given_name: g.field(field::OTHER_GIVEN_NAME).to_string(),
        family_name:      g.field(field::FAMILY_NAME).to_string(),
      };
      (person.display_name(), NameType::EntityName)
    } else {
      let name = first(GroupKind::MainTradingName)
        .or_else(|| first(GroupKind::BusinessName))
        .map(|g| g.field(field::ORGANISATION_NAME).to_string())
        .unwrap_or_default();
      (name, NameType::TradingName)
    };

    let location = first(GroupKind::MainBusinessPhysicalAddress)
      .map(|g| {
        format!(
          "{}, {}",
          g.field(field::POSTCODE),
          g.field(field::STATE_CODE)
        )
      })
      .unwrap_or_default();

    Self { abn, status, name, name_type, location }
  }
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// The outcome of a name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSearchResult {
  Found {
    lookup_name: String,
    results:     Vec<SearchResult>,
  },
  Failed {
    lookup_name: String,
    exceptions:  RegistryExceptions,
  },
}

impl NameSearchResult {
  /// Build the outcome from the top-level groups (where exceptions live) and
  /// the per-record groups of a name search response.
  pub fn new(
    lookup_name: impl Into<String>,
    groups: &[FieldGroup],
    records: &[Vec<FieldGroup>],
  ) -> Self {
    let lookup_name = lookup_name.into();
    let mut exceptions = RegistryExceptions::new();
    for g in groups
      .iter()
      .chain(records.iter().flatten())
      .filter(|g| g.kind == GroupKind::Exception)
    {
      exceptions.add(
        g.field(field::EXCEPTION_CODE),
        g.field(field::EXCEPTION_DESCRIPTION),
      );
    }
    if !exceptions.is_empty() {
      return Self::Failed { lookup_name, exceptions };
    }

    let results = records
      .iter()
      .map(|record| SearchResult::from_record(record))
      .collect();
    Self::Found { lookup_name, results }
  }

  pub fn has_errors(&self) -> bool { matches!(self, Self::Failed { .. }) }

  pub fn results(&self) -> &[SearchResult] {
    match self {
      Self::Found { results, .. } => results,
      Self::Failed { .. } => &[],
    }
  }
}

#[derive(Serialize)]
struct FoundView<'a> {
  lookup_name:    &'a str,
  search_results: &'a [SearchResult],
}

#[derive(Serialize)]
struct FailedView<'a> {
  lookup_name: &'a str,
  errors:      String,
}

impl Serialize for NameSearchResult {
  fn serialize<S: serde::Serializer>(
    &self,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    match self {
      Self::Found { lookup_name, results } => FoundView {
        lookup_name:    lookup_name.as_str(),
        search_results: results.as_slice(),
      }
      .serialize(serializer),
      Self::Failed { lookup_name, exceptions } => FailedView {
        lookup_name: lookup_name.as_str(),
        errors:      exceptions.joined(),
      }
      .serialize(serializer),
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
