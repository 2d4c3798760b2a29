//! Amenity clustering and Airbnb listing selection for city datasets.
//!
//! ```rust
//! use amenimap::{GeoPoint, Listing, compute_bounding_box, select_ideal_listings};
//!
//! let downtown = GeoPoint::new(49.2463, -123.1207);
//! let bbox = compute_bounding_box(downtown, 5.0)?;
//! assert!(bbox.contains_strict(&downtown));
//!
//! let listings = vec![Listing::at(1, 49.25, -123.12), Listing::at(2, 49.9, -123.12)];
//! let ideal = select_ideal_listings(&listings, &[downtown], 5.0)?;
//! assert_eq!(ideal.len(), 1);
//! # Ok::<(), amenimap::Error>(())
//! ```

pub mod analysis;
pub mod cluster;
pub mod compute;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;

pub use error::{Error, Result};

pub use amenimap_types::{Amenity, CoordinateStats, GeoBoundingBox, GeoPoint, Listing};

pub use compute::{
    EARTH_RADIUS_KM, IdealListing, compute_bounding_box, ideal_listing_matches,
    select_ideal_listings,
};

pub use cluster::{ClusterFit, Clustering, KMeans};

pub use config::{AnalysisConfig, ListingFilter, PriceRange};

pub use analysis::{ListingsReport, RestaurantsReport, analyze_listings, analyze_restaurants};

pub use dataset::{load_amenities, load_listings};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Error, Result};

    pub use crate::{Amenity, GeoBoundingBox, GeoPoint, Listing};

    pub use crate::{compute_bounding_box, select_ideal_listings};

    pub use crate::{AnalysisConfig, ListingFilter, PriceRange};

    pub use crate::{Clustering, KMeans};

    pub use crate::{analyze_listings, analyze_restaurants};
}
