//! Filter engine: pure predicates over location records.
//!
//! [`filter_records`] applies a [`FilterCriteria`] snapshot to a record slice
//! in a single pass. A record is kept only if every predicate passes. A
//! predicate that cannot be evaluated because the record lacks the field
//! (no `full_name`, no `city`, ...) passes rather than excluding the record.
//!
//! # Accepting-new-patients flag
//!
//! The flag keeps the behaviour the directory has always shipped with: while
//! it is **off**, records explicitly marked [`PatientAcceptance::Accepting`]
//! are hidden; while it is **on**, nothing is hidden on that basis. Records
//! that are not accepting (or unknown) are never hidden by it. This reads like
//! an inverted check ("show only accepting" would be the natural meaning of
//! the checkbox) and is kept as-is until the product owners confirm intent.

use crate::domain::{ActivityStatus, FilterCriteria, LocationRecord, PatientAcceptance};
use std::borrow::Cow;

/// Filters `records` by `criteria`.
///
/// Returns the input slice unchanged (borrowed) when `criteria` is `None` or
/// `records` is empty. Otherwise returns the retained records in input order.
/// The input is never mutated, and filtering an already-filtered list with the
/// same criteria yields the same list.
///
/// # Examples
///
/// ```
/// use provider_directory::domain::{FilterCriteria, LocationRecord};
/// use provider_directory::filter::filter_records;
///
/// let records = vec![
///     LocationRecord { city: Some("Boston".into()), ..Default::default() },
///     LocationRecord { city: Some("Chicago".into()), ..Default::default() },
/// ];
/// let criteria = FilterCriteria { city: "bos".into(), ..Default::default() };
///
/// let filtered = filter_records(&records, Some(&criteria));
/// assert_eq!(filtered.len(), 1);
/// ```
#[must_use]
pub fn filter_records<'a>(
    records: &'a [LocationRecord],
    criteria: Option<&FilterCriteria>,
) -> Cow<'a, [LocationRecord]> {
    let Some(criteria) = criteria else {
        return Cow::Borrowed(records);
    };
    if records.is_empty() {
        return Cow::Borrowed(records);
    }

    let _span = tracing::debug_span!(
        "filter_records",
        total = records.len(),
        text_filters = criteria.active_text_filters(),
        accepting_new_patients = criteria.accepting_new_patients,
        include_inactive = criteria.include_inactive,
    )
    .entered();

    let prepared = PreparedCriteria::new(criteria);
    let retained: Vec<LocationRecord> = records
        .iter()
        .filter(|record| prepared.matches(record))
        .cloned()
        .collect();

    tracing::debug!(retained = retained.len(), "filter applied");
    Cow::Owned(retained)
}

/// Criteria with the text needles trimmed and lower-cased once per pass.
struct PreparedCriteria<'c> {
    name: Option<String>,
    city: Option<String>,
    state: Option<String>,
    criteria: &'c FilterCriteria,
}

impl<'c> PreparedCriteria<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        Self {
            name: needle(&criteria.name),
            city: needle(&criteria.city),
            state: needle(&criteria.state),
            criteria,
        }
    }

    fn matches(&self, record: &LocationRecord) -> bool {
        contains_needle(record.full_name.as_deref(), self.name.as_deref())
            && contains_needle(record.city.as_deref(), self.city.as_deref())
            && contains_needle(record.state.as_deref(), self.state.as_deref())
            && passes_acceptance(record.accept_new_patients, self.criteria.accepting_new_patients)
            && passes_activity(record.state_code, self.criteria.include_inactive)
    }
}

fn needle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn contains_needle(haystack: Option<&str>, needle: Option<&str>) -> bool {
    match (haystack, needle) {
        (_, None) | (None, Some(_)) => true,
        (Some(haystack), Some(needle)) => haystack.to_lowercase().contains(needle),
    }
}

/// Name predicate: passes when the criterion is blank, the record has no
/// `full_name`, or `full_name` contains the criterion (case-insensitive).
#[must_use]
pub fn matches_name(record: &LocationRecord, criteria: &FilterCriteria) -> bool {
    contains_needle(record.full_name.as_deref(), needle(&criteria.name).as_deref())
}

/// City predicate, same substring semantics as [`matches_name`].
#[must_use]
pub fn matches_city(record: &LocationRecord, criteria: &FilterCriteria) -> bool {
    contains_needle(record.city.as_deref(), needle(&criteria.city).as_deref())
}

/// State predicate. Substring containment, not equality: `"A"` keeps `"MA"`.
#[must_use]
pub fn matches_state(record: &LocationRecord, criteria: &FilterCriteria) -> bool {
    contains_needle(record.state.as_deref(), needle(&criteria.state).as_deref())
}

/// Accepting-new-patients predicate. Hides only `Accepting` records, and only
/// while the flag is off. See the module docs.
#[must_use]
pub fn passes_acceptance(acceptance: PatientAcceptance, accepting_new_patients: bool) -> bool {
    !(acceptance == PatientAcceptance::Accepting && !accepting_new_patients)
}

/// Activity predicate. Hides `Inactive` records unless inactive ones are included.
#[must_use]
pub fn passes_activity(status: ActivityStatus, include_inactive: bool) -> bool {
    include_inactive || status != ActivityStatus::Inactive
}
