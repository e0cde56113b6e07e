//! Raw field groups: the boundary between the XML layer and the mapper.
//!
//! The XML reader emits one [`FieldGroup`] per recognised register element
//! (`entityStatus`, `legalName`, `exception`, ...). A group is a flat mapping
//! from child element name to its trimmed text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─── Field names ─────────────────────────────────────────────────────────────

pub const IDENTIFIER_VALUE: &str = "identifierValue";
pub const IDENTIFIER_STATUS: &str = "identifierStatus";
pub const IS_CURRENT_INDICATOR: &str = "isCurrentIndicator";
pub const ENTITY_STATUS_CODE: &str = "entityStatusCode";
pub const ENTITY_TYPE_CODE: &str = "entityTypeCode";
pub const ENTITY_DESCRIPTION: &str = "entityDescription";
pub const EFFECTIVE_FROM: &str = "effectiveFrom";
pub const EFFECTIVE_TO: &str = "effectiveTo";
pub const GIVEN_NAME: &str = "givenName";
pub const OTHER_GIVEN_NAME: &str = "otherGivenName";
pub const FAMILY_NAME: &str = "familyName";
pub const ORGANISATION_NAME: &str = "organisationName";
pub const STATE_CODE: &str = "stateCode";
pub const POSTCODE: &str = "postcode";
pub const EXCEPTION_CODE: &str = "exceptionCode";
pub const EXCEPTION_DESCRIPTION: &str = "exceptionDescription";

// ─── Group kind ──────────────────────────────────────────────────────────────

/// The register element a group was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupKind {
  /// The `ABN` element.
  #[serde(rename = "ABN")]
  Identifier,
  EntityStatus,
  EntityType,
  GoodsAndServicesTax,
  LegalName,
  MainName,
  MainTradingName,
  BusinessName,
  MainBusinessPhysicalAddress,
  Exception,
}

impl GroupKind {
  /// Map a local element name to a group kind. Unknown elements are not
  /// groups.
  pub fn from_element(local_name: &str) -> Option<Self> {
    Some(match local_name {
      "ABN" => Self::Identifier,
      "entityStatus" => Self::EntityStatus,
      "entityType" => Self::EntityType,
      "goodsAndServicesTax" => Self::GoodsAndServicesTax,
      "legalName" => Self::LegalName,
      "mainName" => Self::MainName,
      "mainTradingName" => Self::MainTradingName,
      "businessName" => Self::BusinessName,
      "mainBusinessPhysicalAddress" => Self::MainBusinessPhysicalAddress,
      "exception" => Self::Exception,
      _ => return None,
    })
  }

  /// The register element name.
  pub fn element(&self) -> &'static str {
    match self {
      Self::Identifier => "ABN",
      Self::EntityStatus => "entityStatus",
      Self::EntityType => "entityType",
      Self::GoodsAndServicesTax => "goodsAndServicesTax",
      Self::LegalName => "legalName",
      Self::MainName => "mainName",
      Self::MainTradingName => "mainTradingName",
      Self::BusinessName => "businessName",
      Self::MainBusinessPhysicalAddress => "mainBusinessPhysicalAddress",
      Self::Exception => "exception",
    }
  }
}

// ─── Group ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
  pub kind:   GroupKind,
  pub fields: BTreeMap<String, String>,
}

impl FieldGroup {
  pub fn new(kind: GroupKind) -> Self {
    Self { kind, fields: BTreeMap::new() }
  }

  /// Builder-style insert, mostly for tests and fixtures.
  pub fn with(mut self, name: &str, text: &str) -> Self {
    self.insert(name, text);
    self
  }

  /// Append `text` to the field. Text split across several XML events
  /// (entities, CDATA) arrives in pieces.
  pub fn insert(&mut self, name: &str, text: &str) {
    self.fields.entry(name.to_string()).or_default().push_str(text);
  }

  /// The trimmed text of `name`, or `""` when the field is absent.
  pub fn field(&self, name: &str) -> &str {
    self.fields.get(name).map(|s| s.trim()).unwrap_or("")
  }
}

/// A parsed register response: top-level groups plus, for name searches, the
/// groups of each `searchResultsRecord` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
  pub groups:  Vec<FieldGroup>,
  pub records: Vec<Vec<FieldGroup>>,
}

// ─── Tests ────────────────────────────────────────────────────────────────────
