use crate::point::GeoPoint;
use geo::Rect;
use serde::{Deserialize, Serialize};

/// An axis-aligned latitude/longitude rectangle in degrees.
///
/// Wraps a `geo::Rect` with x = longitude and y = latitude. Values are produced
/// by `amenimap::compute::compute_bounding_box` and are never modified
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBoundingBox {
    rect: Rect,
}

impl GeoBoundingBox {
    /// Create a bounding box from its four bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use amenimap_types::bbox::GeoBoundingBox;
    ///
    /// let bbox = GeoBoundingBox::from_bounds(49.2, 49.3, -123.2, -123.0);
    /// assert_eq!(bbox.lat_max(), 49.3);
    /// ```
    pub fn from_bounds(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: lon_min, y: lat_min },
                geo::coord! { x: lon_max, y: lat_max },
            ),
        }
    }

    pub fn lat_min(&self) -> f64 {
        self.rect.min().y
    }

    pub fn lat_max(&self) -> f64 {
        self.rect.max().y
    }

    pub fn lon_min(&self) -> f64 {
        self.rect.min().x
    }

    pub fn lon_max(&self) -> f64 {
        self.rect.max().x
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.rect.height()
    }

    /// Longitude extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.rect.width()
    }

    /// Midpoint of both ranges.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.lat_min() + self.lat_max()) / 2.0,
            (self.lon_min() + self.lon_max()) / 2.0,
        )
    }

    /// Strict containment: a point lying exactly on any edge is outside.
    ///
    /// ```
    /// use amenimap_types::{bbox::GeoBoundingBox, point::GeoPoint};
    ///
    /// let bbox = GeoBoundingBox::from_bounds(0.0, 10.0, 0.0, 10.0);
    /// assert!(bbox.contains_strict(&GeoPoint::new(5.0, 5.0)));
    /// assert!(!bbox.contains_strict(&GeoPoint::new(0.0, 5.0)));
    /// ```
    pub fn contains_strict(&self, point: &GeoPoint) -> bool {
        let (min, max) = (self.rect.min(), self.rect.max());
        point.lat() > min.y && point.lon() > min.x && point.lat() < max.y && point.lon() < max.x
    }
}
