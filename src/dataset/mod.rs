//! Loading of the amenity (NDJSON) and listing (CSV) datasets.
//!
//! Both loaders accept plain or gzip-compressed files.

pub mod amenities;
pub mod listings;
pub mod reader;

pub use amenities::{load_amenities, read_amenities};
pub use listings::{load_listings, read_listings};
pub use reader::open_input;

/// Default amenity dataset file name inside the input directory.
pub const AMENITIES_FILE: &str = "amenities-vancouver.json.gz";

/// Default listing dataset file name inside the input directory.
pub const LISTINGS_FILE: &str = "airbnb-listings.csv.gz";
