//! Marker construction with scoped icon configuration.

use crate::domain::{LatLng, LocationRecord, RecordKey};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Icon configuration handed to every marker a [`MapView`](super::MapView)
/// builds.
///
/// Each map view owns its own style, so two maps never share or overwrite each
/// other's icon settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
    /// Icon width and height in pixels.
    pub icon_size: (u32, u32),
    /// Pixel offset of the icon tip from its top-left corner.
    pub icon_anchor: (i32, i32),
    /// Pixel offset of the popup relative to the anchor.
    pub popup_anchor: (i32, i32),
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            icon_url: "marker-icon.png".to_string(),
            icon_retina_url: "marker-icon-2x.png".to_string(),
            shadow_url: "marker-shadow.png".to_string(),
            icon_size: (25, 41),
            icon_anchor: (12, 41),
            popup_anchor: (1, -34),
        }
    }
}

/// Text shown in a marker's popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub title: String,
    pub address: String,
    pub phone: Option<String>,
}

impl PopupContent {
    #[must_use]
    pub fn for_record(record: &LocationRecord) -> Self {
        Self {
            title: record.display_name(),
            address: record.formatted_address(),
            phone: record.phone_display(),
        }
    }
}

/// One placed marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: RecordKey,
    pub position: LatLng,
    pub popup: PopupContent,
    pub style: Arc<MarkerStyle>,
}

impl Marker {
    /// Builds a marker for `record`, or `None` when it has no usable coordinates.
    #[must_use]
    pub fn for_record(record: &LocationRecord, style: &Arc<MarkerStyle>) -> Option<Self> {
        Some(Self {
            key: record.key(),
            position: record.coordinates()?,
            popup: PopupContent::for_record(record),
            style: Arc::clone(style),
        })
    }
}
