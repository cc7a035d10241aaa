//! Map commands and the rendering backend seam.

use super::marker::Marker;
use crate::domain::{Bounds, LatLng, RecordKey};
use std::time::Duration;

/// One operation against a map widget.
///
/// These mirror the primitives any slippy-map library offers; the directory
/// never projects coordinates itself.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    /// Replaces the marker layer.
    ShowMarkers(Vec<Marker>),
    /// Fits the viewport to `bounds` with `padding` pixels on every side.
    FitBounds { bounds: Bounds, padding: u32 },
    /// Animates the viewport to `position` at `zoom`.
    FlyTo {
        position: LatLng,
        zoom: f64,
        duration: Duration,
    },
    /// Opens the popup of the marker for `key` once `delay` has elapsed.
    OpenPopup { key: RecordKey, delay: Duration },
    /// Closes whichever popup is open and drops any pending one.
    ClosePopup,
}

/// A map rendering backend.
///
/// The host injects an implementation and feeds it every
/// [`MapCommand`] the application emits, in order.
pub trait MapSurface {
    fn apply(&mut self, command: &MapCommand);
}
