use crate::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// Descriptive statistics over a set of coordinates.
///
/// Standard deviations are sample deviations (n - 1 denominator) and are
/// `None` for fewer than two points. Means are `None` for an empty set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateStats {
    pub count: usize,
    pub mean_lat: Option<f64>,
    pub mean_lon: Option<f64>,
    pub std_lat: Option<f64>,
    pub std_lon: Option<f64>,
}

impl CoordinateStats {
    pub fn from_points(points: &[GeoPoint]) -> Self {
        let lats: Vec<f64> = points.iter().map(GeoPoint::lat).collect();
        let lons: Vec<f64> = points.iter().map(GeoPoint::lon).collect();
        Self {
            count: points.len(),
            mean_lat: mean(&lats),
            mean_lon: mean(&lons),
            std_lat: sample_std(&lats),
            std_lon: sample_std(&lons),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}
