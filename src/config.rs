//! Analysis configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Amenity categories counted as everyday "basic" amenities.
pub const BASIC_AMENITIES: [&str; 9] = [
    "restaurant",
    "fast_food",
    "fuel",
    "atm",
    "bank",
    "pharmacy",
    "clinic",
    "cinema",
    "bar",
];

/// Amenity categories treated as restaurants.
pub const RESTAURANT_CATEGORIES: [&str; 3] = ["restaurant", "cafe", "fast_food"];

/// Inclusive nightly price range in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default = "PriceRange::default_min")]
    pub min: f64,
    #[serde(default = "PriceRange::default_max")]
    pub max: f64,
}

impl PriceRange {
    const fn default_min() -> f64 {
        0.0
    }

    const fn default_max() -> f64 {
        100_000.0
    }

    /// Range with either bound optional; missing bounds use the defaults.
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min: min.unwrap_or(Self::default_min()),
            max: max.unwrap_or(Self::default_max()),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::from_bounds(None, None)
    }
}

/// Criteria for a "well reviewed" listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    /// Listings need strictly more reviews than this.
    #[serde(default = "ListingFilter::default_min_reviews")]
    pub min_reviews: u32,
    /// Listings need a review score strictly above this.
    #[serde(default = "ListingFilter::default_min_review_score")]
    pub min_review_score: f64,
    #[serde(default = "ListingFilter::default_require_verified_host")]
    pub require_verified_host: bool,
    /// When set, listings without a price are excluded too.
    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

impl ListingFilter {
    const fn default_min_reviews() -> u32 {
        10
    }

    const fn default_min_review_score() -> f64 {
        75.0
    }

    const fn default_require_verified_host() -> bool {
        true
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            min_reviews: Self::default_min_reviews(),
            min_review_score: Self::default_min_review_score(),
            require_verified_host: Self::default_require_verified_host(),
            price_range: None,
        }
    }
}

/// Settings for both analyses.
///
/// # Example
///
/// ```rust
/// use amenimap::AnalysisConfig;
///
/// let json = r#"{
///     "clusters": 8,
///     "radius_km": 3.0,
///     "listing_filter": { "price_range": { "max": 250.0 } }
/// }"#;
/// let config = AnalysisConfig::from_json(json).unwrap();
/// assert_eq!(config.clusters, 8);
/// assert_eq!(config.listing_filter.min_reviews, 10);
/// assert_eq!(config.listing_filter.price_range.unwrap().min, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub listing_filter: ListingFilter,

    /// Categories clustered by the listings analysis.
    #[serde(default = "AnalysisConfig::default_amenity_categories")]
    pub amenity_categories: Vec<String>,

    /// Number of k-means clusters.
    #[serde(default = "AnalysisConfig::default_clusters")]
    pub clusters: usize,

    /// Half side of the box drawn around each cluster center.
    #[serde(default = "AnalysisConfig::default_radius_km")]
    pub radius_km: f64,

    /// Fixed k-means seed; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "AnalysisConfig::default_max_iter")]
    pub max_iter: usize,

    #[serde(default = "AnalysisConfig::default_n_init")]
    pub n_init: usize,

    #[serde(default = "AnalysisConfig::default_restaurant_categories")]
    pub restaurant_categories: Vec<String>,
}

impl AnalysisConfig {
    fn default_amenity_categories() -> Vec<String> {
        BASIC_AMENITIES.iter().map(|s| s.to_string()).collect()
    }

    const fn default_clusters() -> usize {
        10
    }

    const fn default_radius_km() -> f64 {
        5.0
    }

    const fn default_max_iter() -> usize {
        300
    }

    const fn default_n_init() -> usize {
        10
    }

    fn default_restaurant_categories() -> Vec<String> {
        RESTAURANT_CATEGORIES.iter().map(|s| s.to_string()).collect()
    }

    pub fn with_clusters(mut self, clusters: usize) -> Self {
        self.clusters = clusters;
        self
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.listing_filter.price_range = Some(range);
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.clusters == 0 {
            return Err(Error::Config("clusters must be greater than zero".to_string()));
        }
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(Error::Config(format!(
                "radius_km must be a positive number, got {}",
                self.radius_km
            )));
        }
        if self.max_iter == 0 {
            return Err(Error::Config("max_iter must be greater than zero".to_string()));
        }
        if self.n_init == 0 {
            return Err(Error::Config("n_init must be greater than zero".to_string()));
        }
        if !self.listing_filter.min_review_score.is_finite() {
            return Err(Error::Config("min_review_score must be finite".to_string()));
        }
        if let Some(range) = self.listing_filter.price_range {
            if range.min.is_nan() || range.max.is_nan() {
                return Err(Error::Config("price range bounds must be numbers".to_string()));
            }
            if range.min > range.max {
                return Err(Error::Config(format!(
                    "minimum price ({}) must be <= maximum price ({})",
                    range.min, range.max
                )));
            }
        }
        if self.amenity_categories.is_empty() {
            return Err(Error::Config(
                "amenity_categories must not be empty".to_string(),
            ));
        }
        if self.restaurant_categories.is_empty() {
            return Err(Error::Config(
                "restaurant_categories must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AnalysisConfig =
            toml::from_str(toml_str).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a `.json` or `.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&text),
            #[cfg(not(feature = "toml"))]
            Some("toml") => Err(Error::Config(
                "TOML configuration requires the `toml` feature".to_string(),
            )),
            _ => Self::from_json(&text),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            listing_filter: ListingFilter::default(),
            amenity_categories: Self::default_amenity_categories(),
            clusters: Self::default_clusters(),
            radius_km: Self::default_radius_km(),
            seed: None,
            max_iter: Self::default_max_iter(),
            n_init: Self::default_n_init(),
            restaurant_categories: Self::default_restaurant_categories(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.clusters, 10);
        assert_eq!(config.radius_km, 5.0);
        assert_eq!(config.amenity_categories.len(), 9);
        assert_eq!(config.restaurant_categories, vec!["restaurant", "cafe", "fast_food"]);
        assert!(config.listing_filter.price_range.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(AnalysisConfig::from_json("{}").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AnalysisConfig::default()
            .with_clusters(4)
            .with_seed(9)
            .with_price_range(PriceRange::from_bounds(Some(50.0), None));
        let json = config.to_json().unwrap();
        assert_eq!(AnalysisConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(AnalysisConfig::default().with_clusters(0).validate().is_err());
        assert!(AnalysisConfig::default().with_radius_km(0.0).validate().is_err());
        assert!(AnalysisConfig::default().with_radius_km(f64::NAN).validate().is_err());
        let inverted = PriceRange::from_bounds(Some(300.0), Some(100.0));
        assert!(matches!(
            AnalysisConfig::default().with_price_range(inverted).validate(),
            Err(Error::Config(_))
        ));
        assert!(AnalysisConfig::from_json(r#"{"n_init": 0}"#).is_err());
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let range = PriceRange::from_bounds(Some(100.0), Some(200.0));
        assert!(range.contains(100.0));
        assert!(range.contains(200.0));
        assert!(!range.contains(99.99));
        assert!(!range.contains(200.01));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        std::fs::write(&path, r#"{"radius_km": 2.5}"#).unwrap();
        assert_eq!(AnalysisConfig::load(&path).unwrap().radius_km, 2.5);

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            AnalysisConfig::load(&missing),
            Err(Error::MissingInput(_))
        ));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_roundtrip() {
        let config = AnalysisConfig::default().with_clusters(6);
        let text = config.to_toml().unwrap();
        assert_eq!(AnalysisConfig::from_toml(&text).unwrap(), config);
    }
}
