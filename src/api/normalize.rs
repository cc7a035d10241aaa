//! Record cleanup at the ingestion boundary.
//!
//! Rosters arrive with padded strings, empty strings standing in for missing
//! values, and the occasional duplicated row. Everything is cleaned here once,
//! so the filter and the views can rely on `None` meaning "absent".

use crate::domain::{LocationRecord, RecordId, RecordKey};
use std::collections::HashSet;

/// Trims a text field; blank values become `None`.
#[must_use]
pub fn clean_text(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

fn clean_id(id: RecordId) -> RecordId {
    let trimmed = id.as_str().trim();
    if trimmed.len() == id.as_str().len() {
        id
    } else {
        RecordId::new(trimmed)
    }
}

fn clean_coordinate(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Cleans every field of one record.
#[must_use]
pub fn normalize_record(record: LocationRecord) -> LocationRecord {
    LocationRecord {
        practitioner_id: clean_id(record.practitioner_id),
        practice_location_id: clean_id(record.practice_location_id),
        full_name: clean_text(record.full_name),
        first_name: clean_text(record.first_name),
        last_name: clean_text(record.last_name),
        address_line1: clean_text(record.address_line1),
        address_line2: clean_text(record.address_line2),
        city: clean_text(record.city),
        state: clean_text(record.state),
        zip: clean_text(record.zip),
        latitude: clean_coordinate(record.latitude),
        longitude: clean_coordinate(record.longitude),
        office_phone_number: clean_text(record.office_phone_number),
        office_fax_number: clean_text(record.office_fax_number),
        office_phone_extension: clean_text(record.office_phone_extension),
        office_type: clean_text(record.office_type),
        participating_organization_id: record.participating_organization_id.map(clean_id),
        practice_location_name: clean_text(record.practice_location_name),
        roster_id: record.roster_id.map(clean_id),
        ..record
    }
}

/// Cleans a roster and keeps only the first row for each composite key.
#[must_use]
pub fn normalize_records(records: Vec<LocationRecord>) -> Vec<LocationRecord> {
    let _span = tracing::debug_span!("normalize_records", total = records.len()).entered();

    let mut seen: HashSet<RecordKey> = HashSet::with_capacity(records.len());
    let normalized: Vec<LocationRecord> = records
        .into_iter()
        .map(normalize_record)
        .filter(|record| {
            let fresh = seen.insert(record.key());
            if !fresh {
                tracing::debug!(key = %record.key(), "dropping duplicate roster row");
            }
            fresh
        })
        .collect();

    let missing_ids = normalized
        .iter()
        .filter(|record| record.practitioner_id.is_empty() || record.practice_location_id.is_empty())
        .count();
    if missing_ids > 0 {
        tracing::warn!(missing_ids, "roster rows without a complete composite key");
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_becomes_none() {
        assert_eq!(clean_text(Some("  ".into())), None);
        assert_eq!(clean_text(Some(" Boston ".into())), Some("Boston".into()));
        assert_eq!(clean_text(Some("MA".into())), Some("MA".into()));
        assert_eq!(clean_text(None), None);
    }

    #[test]
    fn record_fields_are_trimmed() {
        let record = normalize_record(LocationRecord {
            practitioner_id: " 1 ".into(),
            practice_location_id: "10".into(),
            full_name: Some(" Alice ".into()),
            city: Some(String::new()),
            latitude: Some(f64::INFINITY),
            longitude: Some(-71.0),
            ..Default::default()
        });

        assert_eq!(record.practitioner_id.as_str(), "1");
        assert_eq!(record.full_name.as_deref(), Some("Alice"));
        assert_eq!(record.city, None);
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, Some(-71.0));
        assert!(record.coordinates().is_none());
    }

    #[test]
    fn duplicate_keys_keep_first_row() {
        let row = |name: &str, location: &str| LocationRecord {
            practitioner_id: "1".into(),
            practice_location_id: location.into(),
            full_name: Some(name.into()),
            ..Default::default()
        };
        let records = normalize_records(vec![row("first", "10"), row("second", "10"), row("third", "20")]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].full_name.as_deref(), Some("first"));
        assert_eq!(records[1].full_name.as_deref(), Some("third"));
    }
}
