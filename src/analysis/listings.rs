//! Amenity clustering and ideal listing selection.

use crate::cluster::{ClusterFit, Clustering, KMeans};
use crate::compute::{IdealListing, compute_bounding_box, ideal_listing_matches};
use crate::config::{AnalysisConfig, ListingFilter};
use crate::error::Result;
use amenimap_types::{Amenity, GeoBoundingBox, GeoPoint, Listing};
use serde::Serialize;
use std::collections::BTreeMap;

/// Amenities whose category is one of `categories`.
pub fn filter_amenities<S: AsRef<str>>(amenities: &[Amenity], categories: &[S]) -> Vec<Amenity> {
    amenities
        .iter()
        .filter(|a| categories.iter().any(|c| c.as_ref() == a.amenity))
        .cloned()
        .collect()
}

/// Number of amenities per category.
pub fn amenity_counts(amenities: &[Amenity]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for amenity in amenities {
        *counts.entry(amenity.amenity.clone()).or_insert(0) += 1;
    }
    counts
}

/// Whether a listing satisfies the review, host and price criteria.
pub fn listing_matches(listing: &Listing, filter: &ListingFilter) -> bool {
    let Some(score) = listing.review_score else {
        return false;
    };
    if score <= filter.min_review_score {
        return false;
    }
    if listing.num_reviews.is_none_or(|n| n <= filter.min_reviews) {
        return false;
    }
    if filter.require_verified_host && listing.host_identity_verified != Some(true) {
        return false;
    }
    match (filter.price_range, listing.price) {
        (None, _) => true,
        (Some(range), Some(price)) => range.contains(price),
        (Some(_), None) => false,
    }
}

/// Keep well-reviewed listings with a verified host inside the price range.
pub fn filter_listings(listings: &[Listing], filter: &ListingFilter) -> Vec<Listing> {
    let kept: Vec<Listing> = listings
        .iter()
        .filter(|l| listing_matches(l, filter))
        .cloned()
        .collect();
    log::info!(
        "Airbnb listings: {} total, {} remaining after filtering",
        listings.len(),
        kept.len()
    );
    kept
}

/// Cluster amenity positions into `k` groups.
///
/// The fit is checked before it is returned: one label per amenity, each
/// naming an existing centroid.
pub fn cluster_amenities<C: Clustering + ?Sized>(
    amenities: &[Amenity],
    clustering: &C,
    k: usize,
) -> Result<ClusterFit> {
    let points: Vec<GeoPoint> = amenities.iter().map(Amenity::position).collect();
    let fit = clustering.cluster(&points, k)?;
    fit.validate(points.len())?;
    Ok(fit)
}

/// One amenity cluster and the area searched for listings around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub cluster: usize,
    pub center: GeoPoint,
    pub members: usize,
    pub bbox: GeoBoundingBox,
    /// Ideal listings attributed to this cluster.
    pub ideal_listings: usize,
}

/// Everything the listings analysis produces.
#[derive(Debug, Clone)]
pub struct ListingsReport {
    /// Basic amenities that were clustered.
    pub amenities: Vec<Amenity>,
    pub amenity_counts: BTreeMap<String, usize>,
    pub filtered_listings: Vec<Listing>,
    pub fit: ClusterFit,
    pub clusters: Vec<ClusterSummary>,
    pub ideal_listings: Vec<IdealListing>,
}

/// Run the listings analysis with k-means configured from `config`.
pub fn analyze_listings(
    amenities: &[Amenity],
    listings: &[Listing],
    config: &AnalysisConfig,
) -> Result<ListingsReport> {
    let mut kmeans = KMeans::new()
        .with_max_iter(config.max_iter)
        .with_n_init(config.n_init);
    if let Some(seed) = config.seed {
        kmeans = kmeans.with_seed(seed);
    }
    analyze_listings_with(amenities, listings, config, &kmeans)
}

/// Run the listings analysis with any clustering implementation.
pub fn analyze_listings_with<C: Clustering + ?Sized>(
    amenities: &[Amenity],
    listings: &[Listing],
    config: &AnalysisConfig,
    clustering: &C,
) -> Result<ListingsReport> {
    config.validate()?;

    let basic = filter_amenities(amenities, &config.amenity_categories);
    let counts = amenity_counts(&basic);
    log::info!(
        "Clustering {} basic amenities into {} clusters",
        basic.len(),
        config.clusters
    );

    let filtered = filter_listings(listings, &config.listing_filter);
    let fit = cluster_amenities(&basic, clustering, config.clusters)?;
    let ideal = ideal_listing_matches(&filtered, &fit.centroids, config.radius_km)?;
    log::info!("Total ideal Airbnb listings: {}", ideal.len());

    let sizes = fit.cluster_sizes();
    let clusters = fit
        .centroids
        .iter()
        .enumerate()
        .map(|(cluster, center)| {
            Ok(ClusterSummary {
                cluster,
                center: *center,
                members: sizes[cluster],
                bbox: compute_bounding_box(*center, config.radius_km)?,
                ideal_listings: ideal.iter().filter(|m| m.cluster == cluster).count(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ListingsReport {
        amenities: basic,
        amenity_counts: counts,
        filtered_listings: filtered,
        fit,
        clusters,
        ideal_listings: ideal,
    })
}
