use super::traits::{ClusterFit, Clustering};
use crate::compute::validation::validate_points;
use crate::error::{Error, Result};
use amenimap_types::GeoPoint;

/// K-means over geographic points, backed by [`clump::Kmeans`]
/// (k-means++ seeding, Lloyd iterations).
///
/// Points are clustered in degree space, shifted to their mean position.
/// `clump` is run `n_init` times with consecutive seeds and the labelling with
/// the lowest inertia is kept. Centroids and inertia are recomputed in `f64`
/// from the labels.
#[derive(Debug, Clone)]
pub struct KMeans {
    max_iter: usize,
    n_init: usize,
    seed: Option<u64>,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            max_iter: 300,
            n_init: 10,
            seed: None,
        }
    }
}

impl KMeans {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum Lloyd iterations per run.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Number of independently seeded runs.
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Fix the base seed for reproducible results.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self, points: &[GeoPoint], k: usize) -> Result<()> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        if k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1".to_string(),
            });
        }
        if k > points.len() {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: points.len(),
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1".to_string(),
            });
        }
        if self.n_init == 0 {
            return Err(Error::InvalidParameter {
                name: "n_init",
                message: "must be at least 1".to_string(),
            });
        }
        validate_points(points)
    }
}

impl Clustering for KMeans {
    fn cluster(&self, points: &[GeoPoint], k: usize) -> Result<ClusterFit> {
        self.validate(points, k)?;

        let rows = to_rows(points);
        let base_seed = self.seed.unwrap_or_else(rand::random);

        let mut best: Option<ClusterFit> = None;
        for run in 0..self.n_init {
            let model = clump::Kmeans::new(k)
                .with_max_iter(self.max_iter)
                .with_seed(base_seed.wrapping_add(run as u64));
            let labels = model.fit_predict(&rows)?;
            let fit = ClusterFit::from_labels(points, labels)?;
            if best.as_ref().is_none_or(|b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }

        let best = best.ok_or(Error::EmptyInput)?;
        log::debug!(
            "k-means fitted {} points into {} clusters (inertia {:.6})",
            points.len(),
            best.centroids.len(),
            best.inertia
        );
        Ok(best)
    }
}

/// `[lat, lon]` rows relative to the mean position. Offsets within a city
/// keep full `f32` precision where absolute degrees would not.
fn to_rows(points: &[GeoPoint]) -> Vec<Vec<f32>> {
    let n = points.len() as f64;
    let mean_lat = points.iter().map(GeoPoint::lat).sum::<f64>() / n;
    let mean_lon = points.iter().map(GeoPoint::lon).sum::<f64>() / n;
    points
        .iter()
        .map(|p| vec![(p.lat() - mean_lat) as f32, (p.lon() - mean_lon) as f32])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_groups() -> Vec<GeoPoint> {
        vec![
            // near downtown
            GeoPoint::new(49.280, -123.120),
            GeoPoint::new(49.281, -123.121),
            GeoPoint::new(49.282, -123.119),
            GeoPoint::new(49.279, -123.122),
            // near Richmond
            GeoPoint::new(49.170, -123.140),
            GeoPoint::new(49.171, -123.139),
            GeoPoint::new(49.169, -123.141),
            // near Burnaby
            GeoPoint::new(49.250, -122.980),
            GeoPoint::new(49.251, -122.981),
            GeoPoint::new(49.249, -122.979),
        ]
    }

    #[test]
    fn test_separates_well_separated_groups() {
        let points = three_groups();
        let fit = KMeans::new().with_seed(42).cluster(&points, 3).unwrap();

        assert_eq!(fit.assignments.len(), points.len());
        assert_eq!(fit.centroids.len(), 3);
        let a = fit.assignments[0];
        let b = fit.assignments[4];
        let c = fit.assignments[7];
        assert!(fit.assignments[0..4].iter().all(|&l| l == a));
        assert!(fit.assignments[4..7].iter().all(|&l| l == b));
        assert!(fit.assignments[7..10].iter().all(|&l| l == c));
        assert!(a != b && b != c && a != c);
        assert_eq!(fit.cluster_sizes().iter().sum::<usize>(), points.len());
    }

    #[test]
    fn test_centroid_is_group_mean() {
        let points = three_groups();
        let fit = KMeans::new().with_seed(7).cluster(&points, 3).unwrap();
        let richmond = fit.centroids[fit.assignments[4]];
        assert!((richmond.lat() - 49.170).abs() < 1e-9);
        assert!((richmond.lon() - -123.140).abs() < 1e-9);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let points = three_groups();
        let first = KMeans::new().with_seed(3).cluster(&points, 3).unwrap();
        let second = KMeans::new().with_seed(3).cluster(&points, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_cluster_centroid_is_overall_mean() {
        let points = three_groups();
        let fit = KMeans::new().with_seed(1).cluster(&points, 1).unwrap();
        assert!(fit.assignments.iter().all(|&l| l == 0));
        let mean_lat = points.iter().map(GeoPoint::lat).sum::<f64>() / points.len() as f64;
        assert!((fit.centroids[0].lat() - mean_lat).abs() < 1e-9);
    }

    #[test]
    fn test_rows_are_centered() {
        let rows = to_rows(&[GeoPoint::new(49.0, -123.0), GeoPoint::new(49.2, -123.4)]);
        assert!((rows[0][0] + 0.1).abs() < 1e-6);
        assert!((rows[1][1] + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_inputs() {
        let model = KMeans::new().with_seed(0);
        assert!(matches!(model.cluster(&[], 1), Err(Error::EmptyInput)));

        let points = three_groups();
        assert!(matches!(
            model.cluster(&points, 0),
            Err(Error::InvalidParameter { name: "k", .. })
        ));
        assert!(matches!(
            model.cluster(&points, 11),
            Err(Error::InvalidClusterCount {
                requested: 11,
                n_items: 10
            })
        ));
        assert!(
            KMeans::new()
                .with_n_init(0)
                .cluster(&points, 2)
                .is_err()
        );
        assert!(matches!(
            model.cluster(&[GeoPoint::new(95.0, 0.0)], 1),
            Err(Error::InvalidArgument(_))
        ));
    }
}
