//! Dataset records: OpenStreetMap-style amenities and Airbnb listings.

use crate::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// A point of interest (restaurant, pharmacy, bank, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub lat: f64,
    pub lon: f64,
    /// Category tag, e.g. `restaurant` or `atm`.
    pub amenity: String,
    pub name: String,
    pub timestamp: String,
    #[serde(default)]
    pub tags: serde_json::Map<String, serde_json::Value>,
}

impl Amenity {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// An Airbnb rental listing.
///
/// Numeric fields that could not be parsed in the source file are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub name: Option<String>,
    pub host_id: Option<u64>,
    pub host_name: Option<String>,
    /// Acceptance rate in percent (0-100).
    pub host_acceptance_rate: Option<f64>,
    pub host_identity_verified: Option<bool>,
    pub lat: f64,
    pub lon: f64,
    pub neighbourhood: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub zipcode: Option<String>,
    /// Nightly price in dollars.
    pub price: Option<f64>,
    pub accommodates: Option<u32>,
    pub min_nights: Option<u32>,
    pub num_reviews: Option<u32>,
    pub review_score: Option<f64>,
}

impl Listing {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// Listing at a position with every optional field empty.
    pub fn at(id: u64, lat: f64, lon: f64) -> Self {
        Self {
            id,
            name: None,
            host_id: None,
            host_name: None,
            host_acceptance_rate: None,
            host_identity_verified: None,
            lat,
            lon,
            neighbourhood: None,
            city: None,
            country: None,
            zipcode: None,
            price: None,
            accommodates: None,
            min_nights: None,
            num_reviews: None,
            review_score: None,
        }
    }
}
