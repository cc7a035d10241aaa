//! Geographic primitives shared by records and the map adapter.

use serde::{Deserialize, Serialize};

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl Bounds {
    /// Degenerate box around a single point.
    #[must_use]
    pub const fn around(point: LatLng) -> Self {
        Self {
            west: point.lng,
            south: point.lat,
            east: point.lng,
            north: point.lat,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use provider_directory::domain::{Bounds, LatLng};
    ///
    /// let bounds = Bounds::from_points([LatLng::new(42.0, -71.0), LatLng::new(41.0, -87.0)]).unwrap();
    /// assert_eq!(bounds.west, -87.0);
    /// assert_eq!(bounds.north, 42.0);
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::around(first), |mut bounds, point| {
            bounds.extend(point);
            bounds
        }))
    }

    /// Grows the box to include `point`.
    pub fn extend(&mut self, point: LatLng) {
        self.west = self.west.min(point.lng);
        self.east = self.east.max(point.lng);
        self.south = self.south.min(point.lat);
        self.north = self.north.max(point.lat);
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }
}
