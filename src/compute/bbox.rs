//! Bounding boxes around a center point on a spherical Earth.

use super::validation::{validate_geographic_point, validate_radius};
use crate::error::Result;
use amenimap_types::{GeoBoundingBox, GeoPoint};

/// Mean Earth radius in kilometers used by the spherical model.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Below this parallel radius the longitude delta is treated as unbounded.
const MIN_PARALLEL_RADIUS_KM: f64 = 1e-9;

/// Compute the lat/lon rectangle extending `half_side_km` from `center` in
/// each cardinal direction.
///
/// The latitude delta is `half_side_km / R` radians. The longitude delta is
/// `half_side_km / (R * cos(lat))` radians, so boxes widen in degree terms as
/// the latitude grows. At the poles the parallel radius collapses to zero;
/// there the longitude bounds are reported as the full `[-180, 180]` range.
/// Latitude bounds are never clamped, so a box near a pole may extend past
/// +/-90 degrees.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if the
/// radius is not strictly positive or the center is out of range.
///
/// # Examples
///
/// ```
/// use amenimap::{compute_bounding_box, GeoPoint};
///
/// let bbox = compute_bounding_box(GeoPoint::new(49.246292, -123.116226), 5.0).unwrap();
/// assert!((bbox.lat_min() - 49.2013).abs() < 1e-4);
/// assert!((bbox.lat_max() - 49.2913).abs() < 1e-4);
/// assert!(bbox.lon_span() > bbox.lat_span());
///
/// assert!(compute_bounding_box(GeoPoint::new(49.0, -123.0), 0.0).is_err());
/// ```
pub fn compute_bounding_box(center: GeoPoint, half_side_km: f64) -> Result<GeoBoundingBox> {
    validate_radius(half_side_km)?;
    validate_geographic_point(&center)?;

    let lat = center.lat().to_radians();
    let lon = center.lon().to_radians();

    let lat_delta = half_side_km / EARTH_RADIUS_KM;
    let lat_min = (lat - lat_delta).to_degrees();
    let lat_max = (lat + lat_delta).to_degrees();

    let parallel_radius = EARTH_RADIUS_KM * lat.cos();
    let (lon_min, lon_max) = if parallel_radius > MIN_PARALLEL_RADIUS_KM {
        let lon_delta = half_side_km / parallel_radius;
        ((lon - lon_delta).to_degrees(), (lon + lon_delta).to_degrees())
    } else {
        log::debug!(
            "Bounding box centered at polar latitude {} spans all longitudes",
            center.lat()
        );
        (-180.0, 180.0)
    };

    Ok(GeoBoundingBox::from_bounds(lat_min, lat_max, lon_min, lon_max))
}
