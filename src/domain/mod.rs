//! Domain layer for the provider directory.
//!
//! This module contains the core domain types, independent of the REST API,
//! terminal rendering, or any map backend.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Location records, identifiers and composite keys
//! - [`status`]: Tagged replacements for the sentinel status codes
//! - [`criteria`]: Filter criteria snapshots
//! - [`geo`]: Positions and bounding boxes
//!
//! # Examples
//!
//! ```
//! use provider_directory::domain::{LocationRecord, RecordKey};
//!
//! let record = LocationRecord {
//!     practitioner_id: "1".into(),
//!     practice_location_id: "10".into(),
//!     full_name: Some("Alice".into()),
//!     ..Default::default()
//! };
//! assert_eq!(record.key(), RecordKey::new("1", "10"));
//! ```

pub mod criteria;
pub mod error;
pub mod geo;
pub mod record;
pub mod status;

pub use criteria::{FilterCriteria, TextField};
pub use error::{DirectoryError, Result};
pub use geo::{Bounds, LatLng};
pub use record::{LocationRecord, RecordId, RecordKey};
pub use status::{ActivityStatus, PatientAcceptance};
