//! Headless map surface.
//!
//! [`CameraState`] applies [`MapCommand`]s to a plain viewport model: where the
//! map is centered, how far it is zoomed, which markers are placed and which
//! popup is open. The terminal host renders from it, and tests assert on it.

use super::commands::{MapCommand, MapSurface};
use super::marker::Marker;
use crate::domain::{Bounds, LatLng, RecordKey};
use std::time::Instant;

/// Viewport and popup state built up from applied commands.
#[derive(Debug, Clone, Default)]
pub struct CameraState {
    markers: Vec<Marker>,
    center: Option<LatLng>,
    zoom: Option<f64>,
    fitted: Option<Bounds>,
    open_popup: Option<RecordKey>,
    pending_popup: Option<(RecordKey, Instant)>,
}

impl CameraState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub const fn center(&self) -> Option<LatLng> {
        self.center
    }

    /// Explicit zoom level, or `None` while the viewport is fitted to bounds.
    #[must_use]
    pub const fn zoom(&self) -> Option<f64> {
        self.zoom
    }

    /// Bounds of the last fit, if the viewport has not flown elsewhere since.
    #[must_use]
    pub const fn fitted_bounds(&self) -> Option<Bounds> {
        self.fitted
    }

    #[must_use]
    pub fn open_popup(&self) -> Option<&RecordKey> {
        self.open_popup.as_ref()
    }

    #[must_use]
    pub fn pending_popup(&self) -> Option<&RecordKey> {
        self.pending_popup.as_ref().map(|(key, _)| key)
    }

    /// When the pending popup is due, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.pending_popup.as_ref().map(|(_, due)| *due)
    }

    /// Marker whose popup is open.
    #[must_use]
    pub fn open_marker(&self) -> Option<&Marker> {
        let key = self.open_popup.as_ref()?;
        self.markers.iter().find(|marker| &marker.key == key)
    }

    /// Applies `command` as if it were issued at `now`.
    pub fn apply_at(&mut self, command: &MapCommand, now: Instant) {
        match command {
            MapCommand::ShowMarkers(markers) => {
                self.markers.clone_from(markers);
                if let Some(key) = &self.open_popup {
                    if !self.markers.iter().any(|marker| &marker.key == key) {
                        self.open_popup = None;
                    }
                }
            }
            MapCommand::FitBounds { bounds, .. } => {
                self.fitted = Some(*bounds);
                self.center = Some(bounds.center());
                self.zoom = None;
            }
            MapCommand::FlyTo { position, zoom, .. } => {
                self.fitted = None;
                self.center = Some(*position);
                self.zoom = Some(*zoom);
            }
            MapCommand::OpenPopup { key, delay } => {
                self.pending_popup = Some((key.clone(), now + *delay));
            }
            MapCommand::ClosePopup => {
                self.open_popup = None;
                self.pending_popup = None;
            }
        }
    }

    /// Opens the pending popup if it is due. Returns `true` if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.pending_popup {
            Some((_, due)) if *due <= now => {
                self.open_popup = self.pending_popup.take().map(|(key, _)| key);
                true
            }
            _ => false,
        }
    }
}

impl MapSurface for CameraState {
    fn apply(&mut self, command: &MapCommand) {
        self.apply_at(command, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn popup_opens_only_after_delay() {
        let mut camera = CameraState::new();
        let start = Instant::now();
        let key = RecordKey::new("1", "10");

        camera.apply_at(
            &MapCommand::FlyTo {
                position: LatLng::new(42.36, -71.06),
                zoom: 14.0,
                duration: Duration::from_millis(1500),
            },
            start,
        );
        camera.apply_at(
            &MapCommand::OpenPopup {
                key: key.clone(),
                delay: Duration::from_millis(1600),
            },
            start,
        );

        assert_eq!(camera.zoom(), Some(14.0));
        assert!(!camera.tick(start + Duration::from_millis(1500)));
        assert_eq!(camera.open_popup(), None);
        assert_eq!(camera.pending_popup(), Some(&key));

        assert!(camera.tick(start + Duration::from_millis(1600)));
        assert_eq!(camera.open_popup(), Some(&key));
        assert_eq!(camera.next_due(), None);
    }

    #[test]
    fn close_drops_pending_popup() {
        let mut camera = CameraState::new();
        let start = Instant::now();
        camera.apply_at(
            &MapCommand::OpenPopup {
                key: RecordKey::new("1", "10"),
                delay: Duration::from_millis(10),
            },
            start,
        );
        camera.apply_at(&MapCommand::ClosePopup, start);

        assert!(!camera.tick(start + Duration::from_secs(1)));
        assert_eq!(camera.open_popup(), None);
    }

    #[test]
    fn fit_resets_zoom_and_centers() {
        let mut camera = CameraState::new();
        let bounds = Bounds {
            west: -87.0,
            south: 41.0,
            east: -71.0,
            north: 43.0,
        };
        camera.apply(&MapCommand::FitBounds { bounds, padding: 50 });

        assert_eq!(camera.zoom(), None);
        assert_eq!(camera.fitted_bounds(), Some(bounds));
        assert_eq!(camera.center(), Some(LatLng::new(42.0, -79.0)));
    }
}
