//! Chain vs. non-chain restaurant statistics.

use amenimap_types::{Amenity, CoordinateStats, GeoPoint};
use std::collections::HashMap;

/// Amenities in one of `categories` with a non-blank name.
pub fn restaurants<S: AsRef<str>>(amenities: &[Amenity], categories: &[S]) -> Vec<Amenity> {
    amenities
        .iter()
        .filter(|a| categories.iter().any(|c| c.as_ref() == a.amenity))
        .filter(|a| !a.name.trim().is_empty())
        .cloned()
        .collect()
}

/// Restaurants partitioned by whether their name occurs more than once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainSplit {
    pub chains: Vec<Amenity>,
    pub non_chains: Vec<Amenity>,
}

/// Split restaurants into chains (exact name seen at least twice) and
/// independents. Input order is preserved within each group.
pub fn split_chains(restaurants: &[Amenity]) -> ChainSplit {
    let mut branches: HashMap<&str, usize> = HashMap::new();
    for r in restaurants {
        *branches.entry(r.name.as_str()).or_insert(0) += 1;
    }

    let (chains, non_chains): (Vec<Amenity>, Vec<Amenity>) = restaurants
        .iter()
        .cloned()
        .partition(|r| branches.get(r.name.as_str()).copied().unwrap_or(0) > 1);

    log::info!(
        "{} chain and {} non-chain restaurants",
        chains.len(),
        non_chains.len()
    );
    ChainSplit { chains, non_chains }
}

/// Mean and sample standard deviation of amenity coordinates.
pub fn coordinate_stats(amenities: &[Amenity]) -> CoordinateStats {
    let points: Vec<GeoPoint> = amenities.iter().map(Amenity::position).collect();
    CoordinateStats::from_points(&points)
}

/// Every branch of the restaurant called exactly `name`.
pub fn locations_of(restaurants: &[Amenity], name: &str) -> Vec<Amenity> {
    restaurants
        .iter()
        .filter(|r| r.name == name)
        .cloned()
        .collect()
}

/// Result of the restaurant analysis.
#[derive(Debug, Clone)]
pub struct RestaurantsReport {
    pub split: ChainSplit,
    pub chain_stats: CoordinateStats,
    pub non_chain_stats: CoordinateStats,
    /// Requested restaurant name and its branches.
    pub locations: Option<(String, Vec<Amenity>)>,
}

impl RestaurantsReport {
    /// Plain-text statistical summary.
    pub fn summary(&self) -> String {
        let mut out = String::from("\nStatistical Analysis of Restaurants Data:\n\n");
        write_group(&mut out, "Chain restaurants", &self.chain_stats);
        out.push('\n');
        write_group(&mut out, "Non-Chain restaurants", &self.non_chain_stats);
        out
    }
}

fn write_group(out: &mut String, title: &str, stats: &CoordinateStats) {
    out.push_str(&format!(
        "{title}:\n    Mean Latitude: {}\n    Mean Longitude: {}\n\n",
        fmt_value(stats.mean_lat),
        fmt_value(stats.mean_lon)
    ));
    out.push_str(&format!(
        "    Latitude standard deviation: {}\n    Longitude standard deviation: {}\n",
        fmt_value(stats.std_lat),
        fmt_value(stats.std_lon)
    ));
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}

/// Run the restaurant analysis. `name`, when given, also collects the
/// branches of that restaurant.
pub fn analyze_restaurants<S: AsRef<str>>(
    amenities: &[Amenity],
    categories: &[S],
    name: Option<&str>,
) -> RestaurantsReport {
    let restaurants = restaurants(amenities, categories);
    let split = split_chains(&restaurants);
    let chain_stats = coordinate_stats(&split.chains);
    let non_chain_stats = coordinate_stats(&split.non_chains);

    let locations = name.filter(|n| !n.trim().is_empty()).map(|n| {
        let found = locations_of(&restaurants, n);
        log::info!("Found {} locations of {}", found.len(), n);
        (n.to_string(), found)
    });

    RestaurantsReport {
        split,
        chain_stats,
        non_chain_stats,
        locations,
    }
}
