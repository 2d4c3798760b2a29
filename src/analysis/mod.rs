//! The two analyses run by the command line tool.
//!
//! - [`listings`]: cluster basic amenities and pick nearby, well-reviewed
//!   listings that belong to exactly one cluster neighbourhood.
//! - [`restaurants`]: split restaurants into chains and independents and
//!   describe where each group is located.

pub mod listings;
pub mod restaurants;

pub use listings::{
    ClusterSummary, ListingsReport, amenity_counts, analyze_listings, analyze_listings_with,
    cluster_amenities, filter_amenities, filter_listings, listing_matches,
};
pub use restaurants::{
    ChainSplit, RestaurantsReport, analyze_restaurants, coordinate_stats, locations_of,
    restaurants, split_chains,
};
