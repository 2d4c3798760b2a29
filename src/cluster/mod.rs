//! Clustering of geographic points.
//!
//! Clustering sits behind the [`Clustering`] trait so the analyses only depend
//! on `cluster(points, k) -> ClusterFit`. [`KMeans`] is the provided
//! implementation.
//!
//! ## K-means
//!
//! [`KMeans`] hands the points to `clump` as `[lat, lon]` rows and turns the
//! labels it returns into a [`ClusterFit`]. Centroids are the member means and
//! inertia is the summed squared degree distance to them. Degree space is fine
//! within one city, where a degree of longitude has near-constant length.
//!
//! ## Usage
//!
//! ```rust
//! use amenimap::cluster::{Clustering, KMeans};
//! use amenimap::GeoPoint;
//!
//! let points = vec![
//!     GeoPoint::new(49.280, -123.120),
//!     GeoPoint::new(49.281, -123.121),
//!     GeoPoint::new(49.170, -123.140),
//!     GeoPoint::new(49.171, -123.141),
//! ];
//!
//! let fit = KMeans::new().with_seed(42).cluster(&points, 2).unwrap();
//! assert_eq!(fit.assignments[0], fit.assignments[1]);
//! assert_ne!(fit.assignments[0], fit.assignments[2]);
//! ```

mod kmeans;
mod traits;

pub use kmeans::KMeans;
pub use traits::{ClusterFit, Clustering};
