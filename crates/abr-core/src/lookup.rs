//! The flattened lookup view handed to callers.
//!
//! A [`LookupResult`] is either a populated snapshot of the entity's current
//! values or, when the register reported any exception, only the lookup key
//! and the joined error text. Attributes with no current value are omitted
//! from the serialised form rather than emitted as `null`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{entity::Entity, exception::RegistryExceptions, mapper::Mapped};

// ─── Views ───────────────────────────────────────────────────────────────────

/// The current-value snapshot of a successful lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupView {
  pub lookup_number:           String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub abn:                     Option<String>,
  #[serde(default, skip_serializing_if = "is_false")]
  pub current:                 bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub effective_from:          Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub effective_to:            Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub entity_status:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub entity_type:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub entity_type_description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub given_name:              Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub other_given_name:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub family_name:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub trading_name:            Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub state_code:              Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub postcode:                Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub registered_name:         Option<String>,
}

impl LookupView {
  /// Project the entity's current values as of `as_of`.
  pub fn from_entity(
    lookup_number: impl Into<String>,
    entity: &Entity,
    as_of: NaiveDate,
  ) -> Self {
    let status = entity.current_status(as_of);
    let name = entity.current_name(as_of);
    let address = entity.current_address(as_of);
    let trading = entity.current_trading_names(as_of);

    Self {
      lookup_number:           lookup_number.into(),
      abn:                     present(&entity.abn().identifier_value),
      current:                 entity.identifier_is_current(),
      effective_from:          status.map(|s| s.effective_from),
      effective_to:            status.and_then(|s| s.effective_until),
      entity_status:           status.and_then(|s| present(&s.status_code)),
      entity_type:             present(&entity.entity_type().code),
      entity_type_description: present(&entity.entity_type().description),
      given_name:              name.and_then(|n| n.given_name()).and_then(present),
      other_given_name:        name
        .and_then(|n| n.other_given_name())
        .and_then(present),
      family_name:             name.and_then(|n| n.family_name()).and_then(present),
      trading_name:            trading
        .first()
        .and_then(|t| present(&t.display_name())),
      state_code:              address.and_then(|a| present(&a.state_code)),
      postcode:                address.and_then(|a| present(&a.postcode)),
      registered_name:         name.and_then(|n| present(&n.display_name())),
    }
  }
}

fn is_false(b: &bool) -> bool { !*b }

fn present(s: &str) -> Option<String> {
  let s = s.trim();
  (!s.is_empty()).then(|| s.to_string())
}

/// The error-only form: the lookup key and every registry message joined with
/// `", "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorView {
  pub lookup_number: String,
  pub errors:        String,
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// The outcome of an ABN or ACN lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
  Found {
    view:   LookupView,
    entity: Entity,
  },
  Failed {
    lookup_number: String,
    exceptions:    RegistryExceptions,
  },
}

impl LookupResult {
  /// Build the result for `lookup_number` from a mapping pass. Any registry
  /// exception suppresses every entity attribute.
  pub fn new(
    lookup_number: impl Into<String>,
    mapped: Mapped,
    as_of: NaiveDate,
  ) -> Self {
    let lookup_number = lookup_number.into();
    if mapped.has_errors() {
      return Self::Failed { lookup_number, exceptions: mapped.exceptions };
    }
    let view = LookupView::from_entity(lookup_number, &mapped.entity, as_of);
    Self::Found { view, entity: mapped.entity }
  }

  pub fn lookup_number(&self) -> &str {
    match self {
      Self::Found { view, .. } => &view.lookup_number,
      Self::Failed { lookup_number, .. } => lookup_number,
    }
  }

  pub fn has_errors(&self) -> bool { matches!(self, Self::Failed { .. }) }

  pub fn view(&self) -> Option<&LookupView> {
    match self {
      Self::Found { view, .. } => Some(view),
      Self::Failed { .. } => None,
    }
  }

  pub fn entity(&self) -> Option<&Entity> {
    match self {
      Self::Found { entity, .. } => Some(entity),
      Self::Failed { .. } => None,
    }
  }

  pub fn exceptions(&self) -> Option<&RegistryExceptions> {
    match self {
      Self::Found { .. } => None,
      Self::Failed { exceptions, .. } => Some(exceptions),
    }
  }

  /// The full-history form: the lookup key plus either the complete entity or
  /// the joined errors.
  pub fn history(&self) -> HistoryView<'_> {
    match self {
      Self::Found { view, entity } => HistoryView {
        lookup_number: &view.lookup_number,
        entity:        Some(entity),
        errors:        None,
      },
      Self::Failed { lookup_number, exceptions } => HistoryView {
        lookup_number: lookup_number.as_str(),
        entity:        None,
        errors:        Some(exceptions.joined()),
      },
    }
  }
}

/// Serialises as the flattened view: [`LookupView`] or [`ErrorView`].
impl Serialize for LookupResult {
  fn serialize<S: serde::Serializer>(
    &self,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    match self {
      Self::Found { view, .. } => view.serialize(serializer),
      Self::Failed { lookup_number, exceptions } => ErrorView {
        lookup_number: lookup_number.clone(),
        errors:        exceptions.joined(),
      }
      .serialize(serializer),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct HistoryView<'a> {
  pub lookup_number: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub entity:        Option<&'a Entity>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors:        Option<String>,
}

// ─── Tests ────────────────────────────────────────────────────────────────────
