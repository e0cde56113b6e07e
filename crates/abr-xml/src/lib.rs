//! ABR XML search payload reader.
//!
//! Walks an `ABRPayloadSearchResults` document with `quick-xml` and emits one
//! [`FieldGroup`] per recognised register element. Groups inside a
//! `searchResultsRecord` (name searches) are collected per record; all other
//! groups are returned in document order. Unknown elements are skipped.
//!
//! ```no_run
//! let xml = std::fs::read("successful.xml").unwrap();
//! let raw = abr_xml::parse_response(&xml).unwrap();
//! println!("{} groups", raw.groups.len());
//! ```

pub mod error;

use abr_core::field::{FieldGroup, GroupKind, RawResponse};
use quick_xml::{Reader, events::Event};

pub use error::{Error, Result};

const SEARCH_RESULTS_RECORD: &[u8] = b"searchResultsRecord";

/// A group being filled, with the element depth it opened at.
struct OpenGroup {
  group: FieldGroup,
  depth: usize,
  field: Option<String>,
}

/// Parse a register response body into raw field groups.
pub fn parse_response(xml: &[u8]) -> Result<RawResponse> {
  let mut reader = Reader::from_reader(xml);
  reader.config_mut().trim_text(true);

  let mut out = RawResponse::default();
  let mut record: Option<Vec<FieldGroup>> = None;
  let mut open: Option<OpenGroup> = None;
  let mut depth = 0usize;
  let mut seen_root = false;
  let mut buf = Vec::new();

  loop {
    let event = reader.read_event_into(&mut buf).map_err(|e| Error::Xml {
      position: reader.buffer_position() as u64,
      message:  e.to_string(),
    })?;

    match event {
      Event::Start(ref e) => {
        seen_root = true;
        depth += 1;
        let name = e.name();
        let local = local_name(name.as_ref());
        match open.as_mut() {
          Some(g) if depth == g.depth + 1 => {
            g.field = Some(String::from_utf8_lossy(local).into_owned());
          }
          Some(_) => {}
          None if local == SEARCH_RESULTS_RECORD => {
            record = Some(Vec::new());
          }
          None => {
            if let Some(kind) = group_kind(local) {
              open = Some(OpenGroup {
                group: FieldGroup::new(kind),
                depth,
                field: None,
              });
            }
          }
        }
      }
      Event::Empty(ref e) => {
        seen_root = true;
        let name = e.name();
        let local = local_name(name.as_ref());
        match open.as_mut() {
          // `<otherGivenName />` is an empty field, recorded as "".
          Some(g) if depth == g.depth => {
            g.group.insert(&String::from_utf8_lossy(local), "");
          }
          Some(_) => {}
          None => {
            if let Some(kind) = group_kind(local) {
              push_group(&mut out, record.as_mut(), FieldGroup::new(kind));
            }
          }
        }
      }
      Event::Text(ref e) => {
        if let Some(g) = open.as_mut()
          && depth == g.depth + 1
          && let Some(field) = g.field.as_deref()
        {
          let text = e.unescape().map_err(|e| Error::Xml {
            position: reader.buffer_position() as u64,
            message:  e.to_string(),
          })?;
          g.group.insert(field, &text);
        }
      }
      Event::CData(ref e) => {
        if let Some(g) = open.as_mut()
          && depth == g.depth + 1
          && let Some(field) = g.field.as_deref()
        {
          g.group.insert(field, &String::from_utf8_lossy(e));
        }
      }
      Event::End(ref e) => {
        match open.as_mut() {
          Some(g) if depth == g.depth => {
            if let Some(g) = open.take() {
              push_group(&mut out, record.as_mut(), g.group);
            }
          }
          Some(g) if depth == g.depth + 1 => g.field = None,
          Some(_) => {}
          None => {
            let name = e.name();
            if local_name(name.as_ref()) == SEARCH_RESULTS_RECORD
              && let Some(groups) = record.take()
            {
              out.records.push(groups);
            }
          }
        }
        depth = depth.saturating_sub(1);
      }
      Event::Eof => break,
      _ => {}
    }
    buf.clear();
  }

  if !seen_root {
    return Err(Error::EmptyDocument);
  }

  tracing::debug!(
    groups = out.groups.len(),
    records = out.records.len(),
    "parsed register response"
  );
  Ok(out)
}

fn push_group(
  out: &mut RawResponse,
  record: Option<&mut Vec<FieldGroup>>,
  group: FieldGroup,
) {
  tracing::trace!(kind = group.kind.element(), "closed group");
  match record {
    Some(groups) => groups.push(group),
    None => out.groups.push(group),
  }
}

fn group_kind(local: &[u8]) -> Option<GroupKind> {
  std::str::from_utf8(local).ok().and_then(GroupKind::from_element)
}

fn local_name(name: &[u8]) -> &[u8] {
  // strip "prefix:" if present
  if let Some(pos) = name.iter().rposition(|&b| b == b':') {
    &name[pos + 1..]
  } else {
    name
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use abr_core::{
    field::{self, GroupKind},
    lookup::LookupResult,
    mapper::map_response,
    search::{NameSearchResult, NameType},
  };
  use chrono::NaiveDate;

  use super::*;

  const SUCCESSFUL: &str = include_str!("../../../fixtures/successful.xml");
  const SUCCESSFUL_COMPANY: &str =
    include_str!("../../../fixtures/successful_company.xml");
  const FAILED_ABN: &str = include_str!("../../../fixtures/failed_abn.xml");
  const FAILED_GUID: &str = include_str!("../../../fixtures/failed_guid.xml");
  const NAME_SEARCH: &str = include_str!("../../../fixtures/name_search.xml");

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 5, 1).unwrap() }

  fn kinds(raw: &RawResponse) -> Vec<GroupKind> {
    raw.groups.iter().map(|g| g.kind).collect()
  }

  #[test]
  fn sole_trader_groups_in_document_order() {
    let raw = parse_response(SUCCESSFUL.as_bytes()).unwrap();
    assert_eq!(
      kinds(&raw),
      vec![
        GroupKind::Identifier,
        GroupKind::EntityStatus,
        GroupKind::EntityType,
        GroupKind::GoodsAndServicesTax,
        GroupKind::LegalName,
        GroupKind::MainTradingName,
        GroupKind::MainBusinessPhysicalAddress,
      ]
    );
    assert!(raw.records.is_empty());

    let legal = &raw.groups[4];
    assert_eq!(legal.field(field::GIVEN_NAME), "CHRISANTHY");
    assert_eq!(legal.field(field::OTHER_GIVEN_NAME), "");
    assert!(legal.fields.contains_key(field::OTHER_GIVEN_NAME));
    assert_eq!(legal.field(field::EFFECTIVE_TO), "0001-01-01");
  }

  #[test]
  fn entities_are_unescaped() {
    let raw = parse_response(SUCCESSFUL.as_bytes()).unwrap();
    assert_eq!(
      raw.groups[5].field(field::ORGANISATION_NAME),
      "CLARITY - Create Inner Space & Clarity"
    );
  }

  #[test]
  fn sole_trader_lookup_end_to_end() {
    let raw = parse_response(SUCCESSFUL.as_bytes()).unwrap();
    let result =
      LookupResult::new("18406500889", map_response(&raw.groups, today()), today());
    let view = result.view().unwrap();

    assert_eq!(view.abn.as_deref(), Some("18406500889"));
    assert_eq!(view.effective_from, NaiveDate::from_ymd_opt(2002, 12, 1));
    assert_eq!(view.effective_to, None);
    assert_eq!(view.entity_status.as_deref(), Some("Active"));
    assert_eq!(view.entity_type.as_deref(), Some("IND"));
    assert_eq!(view.given_name.as_deref(), Some("CHRISANTHY"));
    assert_eq!(view.family_name.as_deref(), Some("BARONE"));
    assert_eq!(view.registered_name.as_deref(), Some("CHRISANTHY BARONE"));
    assert_eq!(
      view.trading_name.as_deref(),
      Some("CLARITY - Create Inner Space & Clarity")
    );
    assert_eq!(view.state_code.as_deref(), Some("SA"));
    assert_eq!(view.postcode.as_deref(), Some("5067"));
    assert!(view.current);
    assert!(result.entity().unwrap().current_gst_status(today()));
  }

  #[test]
  fn company_lookup_end_to_end() {
    let raw = parse_response(SUCCESSFUL_COMPANY.as_bytes()).unwrap();
    let result =
      LookupResult::new("75584793718", map_response(&raw.groups, today()), today());
    let view = result.view().unwrap();

    assert_eq!(view.effective_from, NaiveDate::from_ymd_opt(2000, 2, 24));
    assert_eq!(view.entity_type.as_deref(), Some("FPT"));
    assert_eq!(
      view.entity_type_description.as_deref(),
      Some("Family Partnership")
    );
    assert_eq!(view.given_name, None);
    assert_eq!(view.family_name, None);
    assert_eq!(view.registered_name.as_deref(), Some("P F & B K BIGGS"));
    assert_eq!(view.trading_name.as_deref(), Some("PADDY'S CONSTRUCTIONS"));
    assert_eq!(view.state_code.as_deref(), Some("QLD"));
    assert_eq!(view.postcode.as_deref(), Some("4879"));

    let entity = result.entity().unwrap();
    assert_eq!(entity.current_trading_names(today()).len(), 2);
    assert_eq!(entity.addresses().len(), 2);
  }

  #[test]
  fn failed_abn_yields_only_errors() {
    let raw = parse_response(FAILED_ABN.as_bytes()).unwrap();
    let mapped = map_response(&raw.groups, today());
    assert_eq!(
      mapped.exceptions.get("Search"),
      ["Search text is not a valid ABN or ACN"]
    );

    let result = LookupResult::new("18406500889", mapped, today());
    let json = serde_json_value(&result);
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj["errors"], "Search text is not a valid ABN or ACN");
  }

  #[test]
  fn failed_guid_is_reported_under_web_services() {
    let raw = parse_response(FAILED_GUID.as_bytes()).unwrap();
    let mapped = map_response(&raw.groups, today());
    assert_eq!(
      mapped.exceptions.get("WebServices"),
      ["The GUID entered is not recognised as a Registered Party. : abcde"]
    );
  }

  #[test]
  fn name_search_groups_per_record() {
    let raw = parse_response(NAME_SEARCH.as_bytes()).unwrap();
    assert!(raw.groups.is_empty());
    assert_eq!(raw.records.len(), 2);

    let out = NameSearchResult::new("biggs", &raw.groups, &raw.records);
    let results = out.results();
    assert_eq!(results[0].abn, "75584793718");
    assert_eq!(results[0].name, "P F & B K BIGGS");
    assert_eq!(results[0].name_type, NameType::EntityName);
    assert_eq!(results[0].location, "4879, QLD");
    assert_eq!(results[1].status, "Cancelled");
    assert_eq!(results[1].name_type, NameType::TradingName);
    assert_eq!(results[1].location, "2000, NSW");
  }

  #[test]
  fn prefixed_elements_are_recognised() {
    let xml = br#"<?xml version="1.0"?>
    <a:response xmlns:a="http://abr.business.gov.au/ABRXMLSearch/">
      <a:entityStatus>
        <a:entityStatusCode>Active</a:entityStatusCode>
        <a:effectiveFrom>2002-12-01</a:effectiveFrom>
      </a:entityStatus>
    </a:response>"#;
    let raw = parse_response(xml).unwrap();
    assert_eq!(raw.groups.len(), 1);
    assert_eq!(raw.groups[0].field(field::ENTITY_STATUS_CODE), "Active");
  }

  #[test]
  fn nested_children_do_not_leak_into_fields() {
    let xml = br#"<response><mainName>
      <organisationName>ACME</organisationName>
      <extra><organisationName>WRONG</organisationName></extra>
    </mainName></response>"#;
    let raw = parse_response(xml).unwrap();
    assert_eq!(raw.groups[0].field(field::ORGANISATION_NAME), "ACME");
  }

  #[test]
  fn empty_body_is_an_error() {
    assert!(matches!(parse_response(b""), Err(Error::EmptyDocument)));
    assert!(matches!(parse_response(b"  \n"), Err(Error::EmptyDocument)));
  }

  #[test]
  fn mismatched_tags_are_an_error() {
    let r = parse_response(b"<response><entityStatus></response>");
    assert!(matches!(r, Err(Error::Xml { .. })));
  }

  fn serde_json_value(result: &LookupResult) -> serde_json::Value {
    serde_json::to_value(result).unwrap()
  }
}
