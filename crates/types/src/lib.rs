//! # amenimap-types
//!
//! Core geographic value types and dataset records for amenimap.
//!
//! - **Point type**: `GeoPoint` (latitude/longitude in degrees)
//! - **Bounding box type**: `GeoBoundingBox`
//! - **Records**: `Amenity`, `Listing`
//! - **Statistics**: `CoordinateStats`
//!
//! Geometric types are built on top of the `geo` crate's primitives and are
//! serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use amenimap_types::bbox::GeoBoundingBox;
//! use amenimap_types::point::GeoPoint;
//!
//! let downtown = GeoBoundingBox::from_bounds(49.27, 49.29, -123.14, -123.10);
//! assert!(downtown.contains_strict(&GeoPoint::new(49.2827, -123.1207)));
//! ```

pub mod bbox;
pub mod point;
pub mod record;
pub mod stats;

pub use bbox::GeoBoundingBox;
pub use point::GeoPoint;
pub use record::{Amenity, Listing};
pub use stats::CoordinateStats;
