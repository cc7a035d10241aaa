//! Map view adapter.
//!
//! Turns the filtered record list and selection changes into [`MapCommand`]s
//! for whatever [`MapSurface`] the host injects. The adapter holds no viewport
//! state itself; [`CameraState`] is the built-in headless surface.
//!
//! # Modules
//!
//! - [`marker`]: Markers, popups and the scoped icon style
//! - [`commands`]: Map commands and the backend trait
//! - [`camera`]: Headless surface that tracks viewport and popups
//!
//! # Example
//!
//! ```
//! use provider_directory::domain::LocationRecord;
//! use provider_directory::map::{MapCommand, MapSettings, MapView};
//!
//! let view = MapView::new(MapSettings::default());
//! let record = LocationRecord {
//!     practitioner_id: "1".into(),
//!     practice_location_id: "10".into(),
//!     latitude: Some(42.36),
//!     longitude: Some(-71.06),
//!     ..Default::default()
//! };
//!
//! let commands = view.focus(&record);
//! assert!(matches!(commands[0], MapCommand::FlyTo { .. }));
//! assert!(matches!(commands[1], MapCommand::OpenPopup { .. }));
//! ```

pub mod camera;
pub mod commands;
pub mod marker;

pub use camera::CameraState;
pub use commands::{MapCommand, MapSurface};
pub use marker::{Marker, MarkerStyle, PopupContent};

use crate::app::selection::SelectionChange;
use crate::domain::{Bounds, LocationRecord};
use std::sync::Arc;
use std::time::Duration;

/// Animation and layout parameters for the map adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    /// Zoom level used when flying to a selected record.
    pub fly_to_zoom: f64,
    /// Length of the fly-to animation.
    pub fly_duration: Duration,
    /// Delay before the popup opens; kept longer than `fly_duration`.
    pub popup_delay: Duration,
    /// Pixel padding used when fitting all markers.
    pub fit_padding: u32,
    pub marker_style: MarkerStyle,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            fly_to_zoom: 14.0,
            fly_duration: Duration::from_millis(1500),
            popup_delay: Duration::from_millis(1600),
            fit_padding: 50,
            marker_style: MarkerStyle::default(),
        }
    }
}

/// Produces map commands for the filtered list and the current selection.
#[derive(Debug, Clone)]
pub struct MapView {
    settings: MapSettings,
    style: Arc<MarkerStyle>,
}

impl MapView {
    /// Creates the adapter. A popup delay not later than the flight duration is
    /// pushed out to 100ms after the flight ends.
    #[must_use]
    pub fn new(mut settings: MapSettings) -> Self {
        if settings.popup_delay <= settings.fly_duration {
            settings.popup_delay = settings.fly_duration + Duration::from_millis(100);
        }
        let style = Arc::new(settings.marker_style.clone());
        Self { settings, style }
    }

    #[must_use]
    pub const fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// One marker per record with finite coordinates, in list order.
    #[must_use]
    pub fn markers(&self, filtered: &[LocationRecord]) -> Vec<Marker> {
        filtered
            .iter()
            .filter_map(|record| Marker::for_record(record, &self.style))
            .collect()
    }

    /// Bounds of every placeable record.
    #[must_use]
    pub fn bounds(filtered: &[LocationRecord]) -> Option<Bounds> {
        Bounds::from_points(filtered.iter().filter_map(LocationRecord::coordinates))
    }

    /// Fit command for the filtered list, or `None` when no record has coordinates.
    #[must_use]
    pub fn fit(&self, filtered: &[LocationRecord]) -> Option<MapCommand> {
        Self::bounds(filtered).map(|bounds| MapCommand::FitBounds {
            bounds,
            padding: self.settings.fit_padding,
        })
    }

    /// Marker layer plus fit for a freshly filtered list.
    #[must_use]
    pub fn refresh(&self, filtered: &[LocationRecord]) -> Vec<MapCommand> {
        let mut commands = vec![MapCommand::ShowMarkers(self.markers(filtered))];
        commands.extend(self.fit(filtered));
        commands
    }

    /// Fly-to followed by a delayed popup for `record`.
    ///
    /// Records without coordinates produce no commands; they stay selectable in
    /// the list.
    #[must_use]
    pub fn focus(&self, record: &LocationRecord) -> Vec<MapCommand> {
        let Some(position) = record.coordinates() else {
            tracing::debug!(key = %record.key(), "selected record has no coordinates");
            return Vec::new();
        };

        vec![
            MapCommand::FlyTo {
                position,
                zoom: self.settings.fly_to_zoom,
                duration: self.settings.fly_duration,
            },
            MapCommand::OpenPopup {
                key: record.key(),
                delay: self.settings.popup_delay,
            },
        ]
    }

    /// Commands for a selection change against the current filtered list.
    #[must_use]
    pub fn on_selection(&self, change: SelectionChange, filtered: &[LocationRecord]) -> Vec<MapCommand> {
        match change {
            SelectionChange::Activated(index) => filtered
                .get(index)
                .map(|record| self.focus(record))
                .unwrap_or_default(),
            SelectionChange::Deactivated => vec![MapCommand::ClosePopup],
            SelectionChange::Unchanged => Vec::new(),
        }
    }
}
