//! Tagged status types and the sentinel-code adapter.
//!
//! The Nova API encodes two record flags as bare integers: patient acceptance
//! uses `100000001` / `100000000`, and activity uses the `stateCode` values `0`
//! and `1`. Everything past the ingestion boundary works with the enums below;
//! the numeric codes are only read and written in this module.

use serde::{Deserialize, Serialize};

/// Wire code for a practitioner that is not accepting new patients.
pub const NOT_ACCEPTING_CODE: i64 = 100_000_000;

/// Wire code for a practitioner that is accepting new patients.
pub const ACCEPTING_CODE: i64 = 100_000_001;

/// Wire code for an active record.
pub const ACTIVE_CODE: i64 = 0;

/// Wire code for an inactive record.
pub const INACTIVE_CODE: i64 = 1;

/// Whether a practitioner takes new patients at a location.
///
/// Serialized as the numeric sentinel code (or `null` for [`Unknown`](Self::Unknown)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum PatientAcceptance {
    /// Explicitly accepting new patients.
    Accepting,
    /// Explicitly not accepting new patients.
    NotAccepting,
    /// No value, or a code the directory does not recognize.
    #[default]
    Unknown,
}

impl PatientAcceptance {
    /// Maps a wire code to the tagged value. Unrecognized codes become `Unknown`.
    #[must_use]
    pub const fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(ACCEPTING_CODE) => Self::Accepting,
            Some(NOT_ACCEPTING_CODE) => Self::NotAccepting,
            _ => Self::Unknown,
        }
    }

    /// Maps the tagged value back to its wire code.
    #[must_use]
    pub const fn to_code(self) -> Option<i64> {
        match self {
            Self::Accepting => Some(ACCEPTING_CODE),
            Self::NotAccepting => Some(NOT_ACCEPTING_CODE),
            Self::Unknown => None,
        }
    }

    /// Short badge text shown on cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepting => "Accepting new patients",
            Self::NotAccepting => "Not accepting new patients",
            Self::Unknown => "Acceptance unknown",
        }
    }
}

impl From<Option<i64>> for PatientAcceptance {
    fn from(code: Option<i64>) -> Self {
        Self::from_code(code)
    }
}

impl From<PatientAcceptance> for Option<i64> {
    fn from(value: PatientAcceptance) -> Self {
        value.to_code()
    }
}

/// Active/inactive status of a record (`stateCode` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum ActivityStatus {
    /// `stateCode == 0`.
    Active,
    /// `stateCode == 1`.
    Inactive,
    /// Missing or unrecognized code.
    #[default]
    Unknown,
}

impl ActivityStatus {
    /// Maps a wire code to the tagged value. Unrecognized codes become `Unknown`.
    #[must_use]
    pub const fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(ACTIVE_CODE) => Self::Active,
            Some(INACTIVE_CODE) => Self::Inactive,
            _ => Self::Unknown,
        }
    }

    /// Maps the tagged value back to its wire code.
    #[must_use]
    pub const fn to_code(self) -> Option<i64> {
        match self {
            Self::Active => Some(ACTIVE_CODE),
            Self::Inactive => Some(INACTIVE_CODE),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Unknown => "",
        }
    }
}

impl From<Option<i64>> for ActivityStatus {
    fn from(code: Option<i64>) -> Self {
        Self::from_code(code)
    }
}

impl From<ActivityStatus> for Option<i64> {
    fn from(value: ActivityStatus) -> Self {
        value.to_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptance_codes_map_to_variants() {
        assert_eq!(PatientAcceptance::from_code(Some(100_000_001)), PatientAcceptance::Accepting);
        assert_eq!(PatientAcceptance::from_code(Some(100_000_000)), PatientAcceptance::NotAccepting);
        assert_eq!(PatientAcceptance::from_code(None), PatientAcceptance::Unknown);
        assert_eq!(PatientAcceptance::from_code(Some(42)), PatientAcceptance::Unknown);
    }

    #[test]
    fn activity_codes_map_to_variants() {
        assert_eq!(ActivityStatus::from_code(Some(0)), ActivityStatus::Active);
        assert_eq!(ActivityStatus::from_code(Some(1)), ActivityStatus::Inactive);
        assert_eq!(ActivityStatus::from_code(Some(7)), ActivityStatus::Unknown);
    }

    #[test]
    fn statuses_deserialize_from_wire_codes() {
        let accepting: PatientAcceptance = serde_json::from_str("100000001").unwrap();
        let missing: PatientAcceptance = serde_json::from_str("null").unwrap();
        let inactive: ActivityStatus = serde_json::from_str("1").unwrap();

        assert_eq!(accepting, PatientAcceptance::Accepting);
        assert_eq!(missing, PatientAcceptance::Unknown);
        assert_eq!(inactive, ActivityStatus::Inactive);
        assert_eq!(serde_json::to_string(&PatientAcceptance::NotAccepting).unwrap(), "100000000");
    }
}
