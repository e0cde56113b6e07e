//! The entity aggregate — everything the register knows about one ABN.
//!
//! An [`Entity`] is built empty, filled once by [`crate::mapper`], and never
//! mutated afterwards. All "current" accessors take the evaluation date
//! explicitly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::effective::{EffectiveCollection, EffectiveRecord};

// ─── Payloads ────────────────────────────────────────────────────────────────

/// An entity status such as `Active` or `Cancelled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
  pub status_code: String,
}

/// The main business physical address; the register only discloses state and
/// postcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub state_code: String,
  pub postcode:   String,
}

/// A GST registration period. The record carries no payload: an active record
/// means the entity is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gst {}

/// A legal, main, trading or business name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Name {
  /// An individual's name, split into its parts.
  Person {
    given_name:       String,
    other_given_name: String,
    family_name:      String,
  },
  Organisation { organisation_name: String },
}

impl Name {
  /// The name as it should be displayed: the organisation name verbatim, or
  /// the non-empty person name parts joined by single spaces.
  pub fn display_name(&self) -> String {
    match self {
      Self::Organisation { organisation_name } => organisation_name.clone(),
      Self::Person { given_name, other_given_name, family_name } => {
        collapse_whitespace(&format!(
          "{given_name} {other_given_name} {family_name}"
        ))
      }
    }
  }

  pub fn organisation_name(&self) -> Option<&str> {
    match self {
      Self::Organisation { organisation_name } => Some(organisation_name),
      Self::Person { .. } => None,
    }
  }

  pub fn given_name(&self) -> Option<&str> {
    match self {
      Self::Person { given_name, .. } => Some(given_name),
      Self::Organisation { .. } => None,
    }
  }

  pub fn other_given_name(&self) -> Option<&str> {
    match self {
      Self::Person { other_given_name, .. } => Some(other_given_name),
      Self::Organisation { .. } => None,
    }
  }

  pub fn family_name(&self) -> Option<&str> {
    match self {
      Self::Person { family_name, .. } => Some(family_name),
      Self::Organisation { .. } => None,
    }
  }
}

fn collapse_whitespace(s: &str) -> String {
  s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ─── Singletons ──────────────────────────────────────────────────────────────

/// The top-level identifier and its currency indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
  pub identifier_value:     String,
  /// Raw `isCurrentIndicator` text, normally `Y` or `N`.
  pub is_current_indicator: String,
}

impl Identifier {
  pub fn is_current(&self) -> bool {
    self.is_current_indicator.to_ascii_uppercase().contains('Y')
  }
}

/// The entity type classification, e.g. `IND` / `Individual/Sole Trader`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
  pub code:        String,
  pub description: String,
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// Serialises to the full-history view: every category's complete ordered
/// record list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
  pub(crate) abn:            Identifier,
  pub(crate) entity_type:    EntityType,
  pub(crate) statuses:       EffectiveCollection<Status>,
  pub(crate) addresses:      EffectiveCollection<Address>,
  pub(crate) gsts:           EffectiveCollection<Gst>,
  pub(crate) main_names:     EffectiveCollection<Name>,
  pub(crate) legal_names:    EffectiveCollection<Name>,
  pub(crate) trading_names:  EffectiveCollection<Name>,
  pub(crate) business_names: EffectiveCollection<Name>,
}

impl Entity {
  pub fn abn(&self) -> &Identifier { &self.abn }

  pub fn entity_type(&self) -> &EntityType { &self.entity_type }

  pub fn statuses(&self) -> &EffectiveCollection<Status> { &self.statuses }

  pub fn addresses(&self) -> &EffectiveCollection<Address> { &self.addresses }

  pub fn gsts(&self) -> &EffectiveCollection<Gst> { &self.gsts }

  pub fn main_names(&self) -> &EffectiveCollection<Name> { &self.main_names }

  pub fn legal_names(&self) -> &EffectiveCollection<Name> { &self.legal_names }

  pub fn trading_names(&self) -> &EffectiveCollection<Name> {
    &self.trading_names
  }

  pub fn business_names(&self) -> &EffectiveCollection<Name> {
    &self.business_names
  }

  // ── Current values ────────────────────────────────────────────────────

  pub fn identifier_is_current(&self) -> bool { self.abn.is_current() }

  pub fn current_status(
    &self,
    as_of: NaiveDate,
  ) -> Option<&EffectiveRecord<Status>> {
    self.statuses.current(as_of)
  }

  pub fn current_address(
    &self,
    as_of: NaiveDate,
  ) -> Option<&EffectiveRecord<Address>> {
    self.addresses.current(as_of)
  }

  /// The current main name, falling back to the current legal name.
  pub fn current_name(&self, as_of: NaiveDate) -> Option<&EffectiveRecord<Name>> {
    self
      .main_names
      .current(as_of)
      .or_else(|| self.legal_names.current(as_of))
  }

  pub fn current_gst_status(&self, as_of: NaiveDate) -> bool {
    !self.gsts.active(as_of).is_empty()
  }

  pub fn current_trading_names(
    &self,
    as_of: NaiveDate,
  ) -> Vec<&EffectiveRecord<Name>> {
    self.trading_names.active(as_of)
  }

  /// Always empty for mapped responses: the mapper files `businessName`
  /// groups under trading names.
  pub fn current_business_names(
    &self,
    as_of: NaiveDate,
  ) -> Vec<&EffectiveRecord<Name>> {
    self.business_names.active(as_of)
  }

  /// The full-history view as a JSON value.
  pub fn history(&self) -> crate::Result<serde_json::Value> {
    Ok(serde_json::to_value(self)?)
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
