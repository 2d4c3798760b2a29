//! Validation for geographic coordinates and distances.

use crate::error::{Error, Result};
use amenimap_types::GeoPoint;

/// Validates a point has finite, in-range latitude and longitude.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use amenimap::compute::validation::validate_geographic_point;
/// use amenimap::GeoPoint;
///
/// assert!(validate_geographic_point(&GeoPoint::new(49.25, -123.1)).is_ok());
/// assert!(validate_geographic_point(&GeoPoint::new(95.0, -123.1)).is_err());
/// assert!(validate_geographic_point(&GeoPoint::new(49.25, 200.0)).is_err());
/// ```
pub fn validate_geographic_point(point: &GeoPoint) -> Result<()> {
    let (lat, lon) = (point.lat(), point.lon());

    if !lat.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !lon.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::InvalidArgument(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(Error::InvalidArgument(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    Ok(())
}

/// Validates multiple points, reporting the index of the first bad one.
pub fn validate_points(points: &[GeoPoint]) -> Result<()> {
    for (idx, point) in points.iter().enumerate() {
        validate_geographic_point(point)
            .map_err(|e| Error::InvalidArgument(format!("Point at index {}: {}", idx, e)))?;
    }
    Ok(())
}

/// Validates a distance in kilometers is finite and strictly positive.
///
/// ```
/// use amenimap::compute::validation::validate_radius;
///
/// assert!(validate_radius(5.0).is_ok());
/// assert!(validate_radius(0.0).is_err());
/// assert!(validate_radius(-1.0).is_err());
/// ```
pub fn validate_radius(radius_km: f64) -> Result<()> {
    if !radius_km.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "Radius must be finite, got: {}",
            radius_km
        )));
    }

    if radius_km <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "Radius must be positive, got: {}",
            radius_km
        )));
    }

    Ok(())
}
