use crate::error::{Error, Result};
use amenimap_types::GeoPoint;
use serde::Serialize;

/// Output of a hard clustering: one label per point plus the cluster centers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterFit {
    /// Cluster index for each input point, in input order.
    pub assignments: Vec<usize>,
    /// Cluster centers; `centroids[i]` is the center of cluster `i`.
    pub centroids: Vec<GeoPoint>,
    /// Within-cluster sum of squared distances (degree space).
    pub inertia: f64,
}

impl ClusterFit {
    /// Build a fit from raw labels: centroids are member means and inertia is
    /// measured against them. Labels without members are dropped and the rest
    /// renumbered in order, so every centroid has at least one point.
    pub fn from_labels(points: &[GeoPoint], labels: Vec<usize>) -> Result<Self> {
        if labels.len() != points.len() {
            return Err(Error::InvalidParameter {
                name: "assignments",
                message: format!("{} labels for {} points", labels.len(), points.len()),
            });
        }

        let width = labels.iter().max().map_or(0, |&m| m + 1);
        let mut sums = vec![(0.0f64, 0.0f64, 0usize); width];
        for (point, &label) in points.iter().zip(&labels) {
            let slot = &mut sums[label];
            slot.0 += point.lat();
            slot.1 += point.lon();
            slot.2 += 1;
        }

        let mut remap = vec![usize::MAX; width];
        let mut centroids = Vec::new();
        for (label, &(lat, lon, count)) in sums.iter().enumerate() {
            if count > 0 {
                remap[label] = centroids.len();
                let n = count as f64;
                centroids.push(GeoPoint::new(lat / n, lon / n));
            }
        }

        let assignments: Vec<usize> = labels.iter().map(|&l| remap[l]).collect();
        let inertia = points
            .iter()
            .zip(&assignments)
            .map(|(p, &c)| p.squared_degree_distance(&centroids[c]))
            .sum();

        Ok(Self {
            assignments,
            centroids,
            inertia,
        })
    }

    /// Check that the fit labels exactly `n_points` points and every label
    /// names an existing centroid.
    pub fn validate(&self, n_points: usize) -> Result<()> {
        if self.assignments.len() != n_points {
            return Err(Error::InvalidParameter {
                name: "assignments",
                message: format!(
                    "{} labels for {} points",
                    self.assignments.len(),
                    n_points
                ),
            });
        }
        if let Some(&label) = self
            .assignments
            .iter()
            .find(|&&l| l >= self.centroids.len())
        {
            return Err(Error::InvalidParameter {
                name: "assignments",
                message: format!(
                    "label {} has no centroid ({} centroids)",
                    label,
                    self.centroids.len()
                ),
            });
        }
        Ok(())
    }

    /// Number of points assigned to each cluster. Labels without a centroid
    /// are not counted.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.assignments {
            if let Some(size) = sizes.get_mut(label) {
                *size += 1;
            }
        }
        sizes
    }
}

/// Common interface for hard clustering algorithms over geographic points.
pub trait Clustering {
    /// Partition `points` into at most `k` clusters.
    fn cluster(&self, points: &[GeoPoint], k: usize) -> Result<ClusterFit>;
}
