//! Roster snapshot files.
//!
//! A snapshot lets the directory run offline against a saved roster. Two
//! shapes are accepted on load:
//!
//! - a bare JSON array of location records, as returned by the roster endpoint
//! - a versioned envelope, which is also what [`save_roster`] writes:
//!
//! ```json
//! {
//!   "version": 1,
//!   "organizationId": "42",
//!   "savedAt": "2026-10-19T12:00:00Z",
//!   "locations": [ { "practitionerId": "1", "practiceLocationId": "10" } ]
//! }
//! ```
//!
//! Writes go to a temporary file that is renamed over the target, so a crash
//! never leaves a half-written snapshot behind.

use super::normalize::normalize_records;
use crate::domain::{DirectoryError, LocationRecord, RecordId, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapshot format version written by this build.
pub const ROSTER_FILE_VERSION: u32 = 1;

/// A loaded or to-be-saved roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    pub version: u32,
    #[serde(default)]
    pub organization_id: Option<RecordId>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    pub locations: Vec<LocationRecord>,
}

impl RosterSnapshot {
    #[must_use]
    pub fn new(organization_id: Option<RecordId>, locations: Vec<LocationRecord>) -> Self {
        Self {
            version: ROSTER_FILE_VERSION,
            organization_id,
            saved_at: Some(Utc::now()),
            locations,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RosterFileFormat {
    Bare(Vec<LocationRecord>),
    Envelope(RosterSnapshot),
}

/// Parses snapshot text in either accepted shape and normalizes its records.
///
/// # Errors
///
/// Returns [`DirectoryError::RosterFile`] for an unsupported version, or
/// [`DirectoryError::Deserialize`] if the text matches neither shape.
pub fn parse_roster(contents: &str, context: &str) -> Result<RosterSnapshot> {
    let format: RosterFileFormat = serde_json::from_str(contents).map_err(|source| DirectoryError::Deserialize {
        context: context.to_string(),
        source,
    })?;

    let mut snapshot = match format {
        RosterFileFormat::Bare(locations) => RosterSnapshot {
            version: ROSTER_FILE_VERSION,
            organization_id: None,
            saved_at: None,
            locations,
        },
        RosterFileFormat::Envelope(snapshot) => snapshot,
    };

    if snapshot.version > ROSTER_FILE_VERSION {
        return Err(DirectoryError::RosterFile(format!(
            "{context}: unsupported roster file version {}",
            snapshot.version
        )));
    }

    snapshot.locations = normalize_records(std::mem::take(&mut snapshot.locations));
    Ok(snapshot)
}

/// Loads a roster snapshot from disk.
///
/// # Errors
///
/// Returns [`DirectoryError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_roster`].
pub fn load_roster(path: &Path) -> Result<RosterSnapshot> {
    let _span = tracing::debug_span!("load_roster", path = %path.display()).entered();

    let contents = std::fs::read_to_string(path)?;
    let snapshot = parse_roster(&contents, &path.display().to_string())?;

    tracing::debug!(
        version = snapshot.version,
        locations = snapshot.locations.len(),
        organization = ?snapshot.organization_id,
        "loaded roster snapshot"
    );
    Ok(snapshot)
}

/// Writes a snapshot atomically, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`DirectoryError::Io`] if the directory, temporary file or rename
/// fails, or [`DirectoryError::RosterFile`] if serialization fails.
pub fn save_roster(path: &Path, snapshot: &RosterSnapshot) -> Result<()> {
    let _span = tracing::debug_span!("save_roster", path = %path.display(), locations = snapshot.locations.len())
        .entered();

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| DirectoryError::RosterFile(format!("failed to serialize roster: {e}")))?;

    let tmp_path = path.with_extension("tmp");
    tracing::trace!(tmp_path = %tmp_path.display(), "writing to temporary file");
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;

    tracing::debug!("roster snapshot saved");
    Ok(())
}
