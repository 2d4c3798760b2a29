//! Selection of listings that sit near exactly one cluster center.

use super::bbox::compute_bounding_box;
use crate::error::Result;
use amenimap_types::{GeoBoundingBox, GeoPoint, Listing};
use serde::Serialize;

/// A listing that falls inside exactly one cluster's bounding box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealListing {
    pub listing: Listing,
    /// Index of the cluster center whose box contains the listing.
    pub cluster: usize,
    /// Haversine distance from the listing to that center.
    pub distance_km: f64,
}

/// Bounding box of every center, in center order.
pub fn cluster_boxes(centers: &[GeoPoint], radius_km: f64) -> Result<Vec<GeoBoundingBox>> {
    centers
        .iter()
        .map(|center| compute_bounding_box(*center, radius_km))
        .collect()
}

/// Match listings against the boxes around `centers` and keep the ones
/// contained (strictly) in exactly one box.
///
/// A listing inside two or more boxes is dropped entirely rather than
/// reported once. Results are ordered by cluster, then by listing position.
pub fn ideal_listing_matches(
    listings: &[Listing],
    centers: &[GeoPoint],
    radius_km: f64,
) -> Result<Vec<IdealListing>> {
    let boxes = cluster_boxes(centers, radius_km)?;

    let mut hits = vec![0usize; listings.len()];
    let mut selections: Vec<(usize, usize)> = Vec::new();
    for (cluster, bbox) in boxes.iter().enumerate() {
        for (idx, listing) in listings.iter().enumerate() {
            if bbox.contains_strict(&listing.position()) {
                hits[idx] += 1;
                selections.push((cluster, idx));
            }
        }
    }

    let matches: Vec<IdealListing> = selections
        .into_iter()
        .filter(|&(_, idx)| hits[idx] == 1)
        .map(|(cluster, idx)| {
            let listing = &listings[idx];
            IdealListing {
                distance_km: listing.position().haversine_km(&centers[cluster]),
                listing: listing.clone(),
                cluster,
            }
        })
        .collect();

    let overlapping = hits.iter().filter(|&&count| count > 1).count();
    log::debug!(
        "Selected {} listings near {} centers ({} dropped for overlapping boxes)",
        matches.len(),
        centers.len(),
        overlapping
    );

    Ok(matches)
}

/// Listings located within `radius_km` boxes of exactly one cluster center.
///
/// # Examples
///
/// ```
/// use amenimap::{select_ideal_listings, GeoPoint, Listing};
///
/// let centers = [GeoPoint::new(49.28, -123.12), GeoPoint::new(49.20, -122.90)];
/// let listings = vec![
///     Listing::at(1, 49.281, -123.121), // near the first center only
///     Listing::at(2, 48.0, -120.0),     // near neither
/// ];
///
/// let ideal = select_ideal_listings(&listings, &centers, 5.0).unwrap();
/// assert_eq!(ideal.len(), 1);
/// assert_eq!(ideal[0].id, 1);
///
/// assert!(select_ideal_listings(&listings, &[], 5.0).unwrap().is_empty());
/// ```
pub fn select_ideal_listings(
    listings: &[Listing],
    centers: &[GeoPoint],
    radius_km: f64,
) -> Result<Vec<Listing>> {
    Ok(ideal_listing_matches(listings, centers, radius_km)?
        .into_iter()
        .map(|m| m.listing)
        .collect())
}
