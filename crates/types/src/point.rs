//! Geographic point type wrapping the `geo` crate.
//!
//! Coordinates are stored as a `geo::Point<f64>` with `x = longitude` and
//! `y = latitude`, but the public constructor takes `(latitude, longitude)`,
//! which is the order the datasets use.

use serde::{Deserialize, Serialize};

/// A geographic point in degrees.
///
/// # Examples
///
/// ```
/// use amenimap_types::point::GeoPoint;
///
/// let vancouver = GeoPoint::new(49.246292, -123.116226);
/// assert_eq!(vancouver.lat(), 49.246292);
/// assert_eq!(vancouver.lon(), -123.116226);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    inner: geo::Point<f64>,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    ///
    /// No range checking happens here; see `amenimap::compute::validation`.
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            inner: geo::Point::new(lon, lat),
        }
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.inner.y()
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.inner.x()
    }

    /// Access the inner `geo::Point`.
    #[inline]
    pub fn inner(&self) -> &geo::Point<f64> {
        &self.inner
    }

    /// Haversine distance to another point in kilometers.
    ///
    /// ```
    /// use amenimap_types::point::GeoPoint;
    ///
    /// let downtown = GeoPoint::new(49.2827, -123.1207);
    /// let airport = GeoPoint::new(49.1967, -123.1815);
    /// let km = downtown.haversine_km(&airport);
    /// assert!(km > 10.0 && km < 11.5);
    /// ```
    #[inline]
    pub fn haversine_km(&self, other: &GeoPoint) -> f64 {
        use geo::Distance;
        geo::Haversine.distance(self.inner, other.inner) / 1000.0
    }

    /// Squared euclidean distance in degree space, as used by k-means.
    #[inline]
    pub fn squared_degree_distance(&self, other: &GeoPoint) -> f64 {
        let dlat = self.lat() - other.lat();
        let dlon = self.lon() - other.lon();
        dlat * dlat + dlon * dlon
    }

    /// GeoJSON point geometry (`[lon, lat]` order).
    #[cfg(feature = "geojson")]
    pub fn to_geometry(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::Point(vec![self.lon(), self.lat()]))
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(point: geo::Point<f64>) -> Self {
        Self { inner: point }
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        point.inner
    }
}

/// Converts from a `(lat, lon)` tuple.
impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}
