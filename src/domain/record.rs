//! Location record domain model.
//!
//! A [`LocationRecord`] is one practitioner-at-a-location row as returned by the
//! Nova roster endpoints. Its selection identity is the composite
//! [`RecordKey`] `(practitioner_id, practice_location_id)`: a practitioner can
//! appear at several locations within one result set.

use super::geo::LatLng;
use super::status::{ActivityStatus, PatientAcceptance};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier that arrives either as a JSON string or a JSON integer.
///
/// Identifiers are compared by their string form, so `42` and `"42"` refer to
/// the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates an identifier from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty identifier produced by missing fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(text)) => Self(text),
            Some(Raw::Signed(n)) => Self(n.to_string()),
            Some(Raw::Unsigned(n)) => Self(n.to_string()),
            None => Self::default(),
        })
    }
}

/// Composite identity of a record: practitioner plus practice location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub practitioner_id: RecordId,
    pub practice_location_id: RecordId,
}

impl RecordKey {
    #[must_use]
    pub fn new(practitioner_id: impl Into<RecordId>, practice_location_id: impl Into<RecordId>) -> Self {
        Self {
            practitioner_id: practitioner_id.into(),
            practice_location_id: practice_location_id.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.practitioner_id, self.practice_location_id)
    }
}

/// One practitioner at one practice location.
///
/// Every field except the two identifiers is optional: the roster endpoints
/// omit or null out fields freely, and consumers degrade per field rather than
/// rejecting the record. Field order here is the natural column order of the
/// roster table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationRecord {
    pub practitioner_id: RecordId,
    pub practice_location_id: RecordId,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub longitude: Option<f64>,
    pub accept_new_patients: PatientAcceptance,
    pub state_code: ActivityStatus,
    pub location_count: Option<u32>,
    pub provider_count: Option<u32>,
    pub office_phone_number: Option<String>,
    pub office_fax_number: Option<String>,
    pub office_phone_extension: Option<String>,
    pub office_type: Option<String>,
    pub participating_organization_id: Option<RecordId>,
    pub practice_location_name: Option<String>,
    pub roster_id: Option<RecordId>,
}

impl LocationRecord {
    /// Returns the composite selection key of this record.
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            practitioner_id: self.practitioner_id.clone(),
            practice_location_id: self.practice_location_id.clone(),
        }
    }

    /// Returns `true` if this record has the given composite key.
    ///
    /// Avoids cloning the identifiers on hot lookup paths.
    #[must_use]
    pub fn has_key(&self, key: &RecordKey) -> bool {
        self.practitioner_id == key.practitioner_id
            && self.practice_location_id == key.practice_location_id
    }

    /// Name shown on cards and popups.
    ///
    /// Uses `full_name` when present, otherwise joins first and last name.
    ///
    /// # Examples
    ///
    /// ```
    /// use provider_directory::domain::LocationRecord;
    ///
    /// let record = LocationRecord {
    ///     first_name: Some("Ada".into()),
    ///     last_name: Some("Lovelace".into()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(record.display_name(), "Ada Lovelace");
    /// ```
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return full.to_string();
        }

        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }

    /// Geographic position, if both coordinates are present and finite.
    #[must_use]
    pub fn coordinates(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }

    /// Single-line postal address, skipping absent parts.
    #[must_use]
    pub fn formatted_address(&self) -> String {
        let state_zip = [self.state.as_deref(), self.zip.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.address_line1.as_deref(),
            self.address_line2.as_deref(),
            self.city.as_deref(),
            Some(state_zip.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Office phone with extension, if any.
    #[must_use]
    pub fn phone_display(&self) -> Option<String> {
        let phone = self.office_phone_number.as_deref()?.trim();
        if phone.is_empty() {
            return None;
        }
        match self.office_phone_extension.as_deref().map(str::trim) {
            Some(ext) if !ext.is_empty() => Some(format!("{phone} ext. {ext}")),
            _ => Some(phone.to_string()),
        }
    }

    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.state_code == ActivityStatus::Inactive
    }
}

/// Accepts a number, a numeric string, or null. Non-finite values become `None`.
fn deserialize_coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_strings_and_integers() {
        let record: LocationRecord = serde_json::from_value(serde_json::json!({
            "practitionerId": 17,
            "practiceLocationId": "loc-9",
        }))
        .unwrap();

        assert_eq!(record.key(), RecordKey::new("17", "loc-9"));
        assert_eq!(record.practitioner_id, RecordId::from(17));
    }

    #[test]
    fn display_name_prefers_full_name() {
        let record = LocationRecord {
            full_name: Some("Dr. Grace Hopper".into()),
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            ..Default::default()
        };
        assert_eq!(record.display_name(), "Dr. Grace Hopper");

        let only_last = LocationRecord {
            last_name: Some("Hopper".into()),
            ..Default::default()
        };
        assert_eq!(only_last.display_name(), "Hopper");
    }

    #[test]
    fn coordinates_require_both_finite_values() {
        let record: LocationRecord = serde_json::from_value(serde_json::json!({
            "practitionerId": "1",
            "practiceLocationId": "10",
            "latitude": "42.36",
            "longitude": -71.06,
        }))
        .unwrap();
        assert_eq!(record.coordinates(), Some(LatLng::new(42.36, -71.06)));

        let nan: LocationRecord = serde_json::from_value(serde_json::json!({
            "practitionerId": "1",
            "practiceLocationId": "10",
            "latitude": "NaN",
            "longitude": -71.06,
        }))
        .unwrap();
        assert_eq!(nan.latitude, None);
        assert_eq!(nan.coordinates(), None);

        let half = LocationRecord {
            latitude: Some(f64::NAN),
            longitude: Some(1.0),
            ..Default::default()
        };
        assert_eq!(half.coordinates(), None);
    }

    #[test]
    fn formatted_address_skips_missing_parts() {
        let record = LocationRecord {
            address_line1: Some("1 Main St".into()),
            city: Some("Boston".into()),
            state: Some("MA".into()),
            zip: Some("02110".into()),
            ..Default::default()
        };
        assert_eq!(record.formatted_address(), "1 Main St, Boston, MA 02110");
        assert_eq!(LocationRecord::default().formatted_address(), "");
    }

    #[test]
    fn phone_display_appends_extension() {
        let record = LocationRecord {
            office_phone_number: Some("555-0100".into()),
            office_phone_extension: Some("12".into()),
            ..Default::default()
        };
        assert_eq!(record.phone_display().as_deref(), Some("555-0100 ext. 12"));
    }
}
