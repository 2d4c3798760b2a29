//! Geometric computations.
//!
//! - Coordinate and radius validation
//! - Bounding boxes around a center on a spherical Earth
//! - Selection of listings near exactly one cluster center

pub mod bbox;
pub mod selection;
pub mod validation;

pub use bbox::{EARTH_RADIUS_KM, compute_bounding_box};
pub use selection::{IdealListing, cluster_boxes, ideal_listing_matches, select_ideal_listings};
