//! Effective-dated records, the unit of an ABR entity history.
//!
//! Every temporal attribute the register reports (status, name, address, GST
//! registration) arrives as a value with a validity window. A record is
//! *active* on a date when the window contains that date. The *current* value
//! of a category is the first active record in response order; the register
//! lists its most authoritative record first, so this is not a max-by-date
//! selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Sentinel ────────────────────────────────────────────────────────────────

/// The text the register uses in `effectiveTo` for "no end date".
pub const NO_END_DATE: &str = "0001-01-01";

// ─── Temporal contract ───────────────────────────────────────────────────────

/// Anything carrying a validity window.
pub trait Temporal {
  fn effective_from(&self) -> NaiveDate;

  /// `None` means open-ended.
  fn effective_until(&self) -> Option<NaiveDate>;

  /// Whether the window contains `as_of`. Both bounds are inclusive.
  fn is_active_on(&self, as_of: NaiveDate) -> bool {
    self.effective_from() <= as_of
      && self.effective_until().is_none_or(|until| until >= as_of)
  }
}

/// Every record in `records` whose window contains `as_of`, in the original
/// order.
pub fn active_subset<'a, R, I>(records: I, as_of: NaiveDate) -> Vec<&'a R>
where
  R: Temporal + 'a,
  I: IntoIterator<Item = &'a R>,
{
  records
    .into_iter()
    .filter(|record| record.is_active_on(as_of))
    .collect()
}

/// The first active record in `records`, if any.
///
/// Always equal to `active_subset(records, as_of).first()`.
pub fn current<'a, R, I>(records: I, as_of: NaiveDate) -> Option<&'a R>
where
  R: Temporal + 'a,
  I: IntoIterator<Item = &'a R>,
{
  records.into_iter().find(|record| record.is_active_on(as_of))
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A category payload plus its validity window.
///
/// `effective_from <= effective_until` is expected but not enforced; malformed
/// register data is passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveRecord<T> {
  pub effective_from:  NaiveDate,
  pub effective_until: Option<NaiveDate>,
  #[serde(flatten)]
  pub value:           T,
}

impl<T> EffectiveRecord<T> {
  pub fn new(
    value: T,
    effective_from: NaiveDate,
    effective_until: Option<NaiveDate>,
  ) -> Self {
    Self { effective_from, effective_until, value }
  }
}

impl<T> Temporal for EffectiveRecord<T> {
  fn effective_from(&self) -> NaiveDate { self.effective_from }

  fn effective_until(&self) -> Option<NaiveDate> { self.effective_until }
}

impl<T> std::ops::Deref for EffectiveRecord<T> {
  type Target = T;

  fn deref(&self) -> &T { &self.value }
}

// ─── Collection ──────────────────────────────────────────────────────────────

/// The history of one attribute category, in register response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectiveCollection<T> {
  records: Vec<EffectiveRecord<T>>,
}

impl<T> Default for EffectiveCollection<T> {
  fn default() -> Self { Self { records: Vec::new() } }
}

impl<T> EffectiveCollection<T> {
  pub fn new() -> Self { Self::default() }

  pub(crate) fn push(&mut self, record: EffectiveRecord<T>) {
    self.records.push(record);
  }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  pub fn iter(&self) -> std::slice::Iter<'_, EffectiveRecord<T>> {
    self.records.iter()
  }

  pub fn as_slice(&self) -> &[EffectiveRecord<T>] { &self.records }

  pub fn active(&self, as_of: NaiveDate) -> Vec<&EffectiveRecord<T>> {
    active_subset(&self.records, as_of)
  }

  pub fn current(&self, as_of: NaiveDate) -> Option<&EffectiveRecord<T>> {
    current(&self.records, as_of)
  }
}

impl<T> FromIterator<EffectiveRecord<T>> for EffectiveCollection<T> {
  fn from_iter<I: IntoIterator<Item = EffectiveRecord<T>>>(iter: I) -> Self {
    Self { records: iter.into_iter().collect() }
  }
}

impl<'a, T> IntoIterator for &'a EffectiveCollection<T> {
  type IntoIter = std::slice::Iter<'a, EffectiveRecord<T>>;
  type Item = &'a EffectiveRecord<T>;

  fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}

// ─── Date parsing ────────────────────────────────────────────────────────────

/// Parse a register date. Accepts `YYYY-MM-DD`, `YYYYMMDD`, and a full
/// timestamp whose first ten characters are a `YYYY-MM-DD` date.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
  let value = value.trim();
  if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
    return Ok(d);
  }
  if let Ok(d) = NaiveDate::parse_from_str(value, "%Y%m%d") {
    return Ok(d);
  }
  if let Some(prefix) = value.get(..10)
    && value.as_bytes().get(10) == Some(&b'T')
    && let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
  {
    return Ok(d);
  }
  Err(Error::InvalidDate { field, value: value.to_string() })
}

/// Resolve an `effectiveFrom` text. Empty or unparseable text yields `today`,
/// the evaluation date of the mapping pass.
pub fn parse_effective_from(text: &str, today: NaiveDate) -> NaiveDate {
  if text.trim().is_empty() {
    return today;
  }
  parse_date("effectiveFrom", text).unwrap_or_else(|e| {
    tracing::warn!(error = %e, "falling back to evaluation date");
    today
  })
}

/// Resolve an `effectiveTo` text. Empty text, the [`NO_END_DATE`] sentinel and
/// unparseable text all mean open-ended.
pub fn parse_effective_until(text: &str) -> Option<NaiveDate> {
  let text = text.trim();
  if text.is_empty() || text == NO_END_DATE {
    return None;
  }
  match parse_date("effectiveTo", text) {
    Ok(d) if Some(d) == NaiveDate::from_ymd_opt(1, 1, 1) => None,
    Ok(d) => Some(d),
    Err(e) => {
      tracing::warn!(error = %e, "treating end date as open-ended");
      None
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn d(s: &str) -> NaiveDate { NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap() }

  fn rec(
    value: &'static str,
    from: &str,
    until: Option<&str>,
  ) -> EffectiveRecord<&'static str> {
    EffectiveRecord::new(value, d(from), until.map(d))
  }

  fn sample() -> EffectiveCollection<&'static str> {
    [
      rec("closed", "2001-01-01", Some("2005-06-30")),
      rec("open-old", "2002-01-01", None),
      rec("future", "2030-01-01", None),
      rec("open-new", "2010-01-01", None),
      rec("bounded", "2004-01-01", Some("2020-12-31")),
    ]
    .into_iter()
    .collect()
  }

  #[test]
  fn active_subset_preserves_order_and_filters() {
    let c = sample();
    let names: Vec<_> =
      c.active(d("2015-03-01")).iter().map(|r| r.value).collect();
    assert_eq!(names, vec!["open-old", "open-new", "bounded"]);
  }

  #[test]
  fn window_bounds_are_inclusive() {
    let c = sample();
    let on_end: Vec<_> =
      c.active(d("2005-06-30")).iter().map(|r| r.value).collect();
    assert_eq!(on_end, vec!["closed", "open-old", "bounded"]);

    let on_start: Vec<_> =
      c.active(d("2010-01-01")).iter().map(|r| r.value).collect();
    assert_eq!(on_start, vec!["open-old", "open-new", "bounded"]);
  }

  #[test]
  fn current_is_first_active_not_most_recent() {
    let c = sample();
    let cur = c.current(d("2015-03-01")).unwrap();
    assert_eq!(cur.value, "open-old");
  }

  #[test]
  fn current_matches_first_of_active_subset_for_every_date() {
    let c = sample();
    for date in ["1999-01-01", "2001-06-01", "2005-07-01", "2021-01-01", "2031-01-01"] {
      let as_of = d(date);
      assert_eq!(
        c.current(as_of).map(|r| r.value),
        c.active(as_of).first().map(|r| r.value),
        "mismatch on {date}"
      );
    }
  }

  #[test]
  fn current_is_none_when_nothing_active() {
    let c = sample();
    assert!(c.current(d("1990-01-01")).is_none());
    assert!(EffectiveCollection::<&str>::new().current(d("2020-01-01")).is_none());
  }

  #[test]
  fn free_functions_work_over_plain_slices() {
    let records = vec![
      rec("a", "2000-01-01", Some("2000-12-31")),
      rec("b", "2000-06-01", None),
    ];
    let active = active_subset(&records, d("2001-01-01"));
    assert_eq!(active.len(), 1);
    assert_eq!(current(&records, d("2000-07-01")).unwrap().value, "a");
  }

  #[test]
  fn from_defaults_to_evaluation_date() {
    let today = d("2024-02-29");
    assert_eq!(parse_effective_from("", today), today);
    assert_eq!(parse_effective_from("   ", today), today);
    assert_eq!(parse_effective_from("not a date", today), today);
    assert_eq!(parse_effective_from("2002-12-01", today), d("2002-12-01"));
  }

  #[test]
  fn until_sentinel_is_open_ended() {
    assert_eq!(parse_effective_until(NO_END_DATE), None);
    assert_eq!(parse_effective_until(""), None);
    assert_eq!(parse_effective_until("00010101"), None);
    assert_eq!(parse_effective_until("garbage"), None);
    assert_eq!(parse_effective_until("2011-04-30"), Some(d("2011-04-30")));
  }

  #[test]
  fn parse_date_accepts_timestamps() {
    assert_eq!(
      parse_date("effectiveFrom", "2002-12-01T00:00:00").unwrap(),
      d("2002-12-01")
    );
    assert!(matches!(
      parse_date("effectiveFrom", "01/12/2002"),
      Err(Error::InvalidDate { field: "effectiveFrom", .. })
    ));
  }

  #[test]
  fn reversed_window_is_passed_through() {
    let r = rec("odd", "2010-01-01", Some("2009-01-01"));
    assert!(!r.is_active_on(d("2009-06-01")));
    assert!(!r.is_active_on(d("2010-06-01")));
  }
}
