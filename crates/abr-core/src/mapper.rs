//! Builds an [`Entity`] from the raw field groups of a register response.
//!
//! Every temporal group follows the same rule: `effectiveFrom` defaults to the
//! evaluation date, `effectiveTo` is open-ended when empty, equal to the
//! `0001-01-01` sentinel, or unparseable. A bad date never fails the pass.

use chrono::NaiveDate;

use crate::{
  effective::{EffectiveRecord, parse_effective_from, parse_effective_until},
  entity::{Address, Entity, EntityType, Gst, Identifier, Name, Status},
  exception::RegistryExceptions,
  field::{self, FieldGroup, GroupKind},
};

/// The outcome of one mapping pass.
///
/// A response holding only exception groups yields an empty entity; check
/// [`Mapped::has_errors`] before trusting any attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapped {
  pub entity:     Entity,
  pub exceptions: RegistryExceptions,
}

impl Mapped {
  pub fn has_errors(&self) -> bool { !self.exceptions.is_empty() }
}

/// Map `groups`, in response order, into an entity. `today` is the evaluation
/// date used for missing start dates.
pub fn map_response<'a, I>(groups: I, today: NaiveDate) -> Mapped
where
  I: IntoIterator<Item = &'a FieldGroup>,
{
  let mut out = Mapped::default();
  for group in groups {
    apply(&mut out, group, today);
  }
  out
}

fn apply(out: &mut Mapped, group: &FieldGroup, today: NaiveDate) {
  let entity = &mut out.entity;
  match group.kind {
    GroupKind::Identifier => {
      entity.abn = Identifier {
        identifier_value:     group.field(field::IDENTIFIER_VALUE).to_string(),
        is_current_indicator: group
          .field(field::IS_CURRENT_INDICATOR)
          .to_string(),
      };
    }
    GroupKind::EntityType => {
      entity.entity_type = EntityType {
        code:        group.field(field::ENTITY_TYPE_CODE).to_string(),
        description: group.field(field::ENTITY_DESCRIPTION).to_string(),
      };
    }
    GroupKind::EntityStatus => {
      let status = Status {
        status_code: group.field(field::ENTITY_STATUS_CODE).to_string(),
      };
      entity.statuses.push(effective(group, status, today));
    }
    GroupKind::GoodsAndServicesTax => {
      entity.gsts.push(effective(group, Gst {}, today));
    }
    GroupKind::LegalName => {
      entity.legal_names.push(effective(group, person_name(group), today));
    }
    GroupKind::MainName => {
      entity.main_names.push(effective(group, org_name(group), today));
    }
    // Business names share the trading-name history; the separate
    // business-name collection is never filled.
    GroupKind::MainTradingName | GroupKind::BusinessName => {
      entity.trading_names.push(effective(group, org_name(group), today));
    }
    GroupKind::MainBusinessPhysicalAddress => {
      let address = Address {
        state_code: group.field(field::STATE_CODE).to_string(),
        postcode:   group.field(field::POSTCODE).to_string(),
      };
      entity.addresses.push(effective(group, address, today));
    }
    GroupKind::Exception => {
      let code = group.field(field::EXCEPTION_CODE);
      let description = group.field(field::EXCEPTION_DESCRIPTION);
      tracing::info!(code, description, "registry reported an exception");
      out.exceptions.add(code, description);
    }
  }
}

fn effective<T>(
  group: &FieldGroup,
  value: T,
  today: NaiveDate,
) -> EffectiveRecord<T> {
  EffectiveRecord::new(
    value,
    parse_effective_from(group.field(field::EFFECTIVE_FROM), today),
    parse_effective_until(group.field(field::EFFECTIVE_TO)),
  )
}

fn person_name(group: &FieldGroup) -> Name {
  Name::Person {
    given_name:       group.field(field::GIVEN_NAME).to_string(),
    other_given_name: group.field(field::OTHER_GIVEN_NAME).to_string(),
    family_name:      group.field(field::FAMILY_NAME).to_string(),
  }
}

fn org_name(group: &FieldGroup) -> Name {
  Name::Organisation {
    organisation_name: group.field(field::ORGANISATION_NAME).to_string(),
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
