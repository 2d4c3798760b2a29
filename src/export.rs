//! Result files: CSV tables, JSON cluster summaries, GeoJSON layers and the
//! plain-text restaurant summary.

use crate::analysis::ClusterSummary;
use crate::compute::IdealListing;
use crate::error::Result;
use amenimap_types::{Amenity, GeoBoundingBox, Listing};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Create (or truncate) an output file for buffered writing.
pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    log::debug!("Writing {}", path.display());
    Ok(BufWriter::new(File::create(path)?))
}

/// Write listings as CSV with a header row.
pub fn write_listings_csv<W: Write>(writer: W, listings: &[Listing]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for listing in listings {
        csv_writer.serialize(listing)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct AmenityRow<'a> {
    name: &'a str,
    amenity: &'a str,
    lat: f64,
    lon: f64,
    timestamp: &'a str,
}

/// Write amenities as `name,amenity,lat,lon,timestamp` rows. Tags are left out.
pub fn write_amenities_csv<W: Write>(writer: W, amenities: &[Amenity]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for a in amenities {
        csv_writer.serialize(AmenityRow {
            name: &a.name,
            amenity: &a.amenity,
            lat: a.lat,
            lon: a.lon,
            timestamp: &a.timestamp,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct IdealListingRow<'a> {
    cluster: usize,
    distance_km: f64,
    id: u64,
    name: Option<&'a str>,
    lat: f64,
    lon: f64,
    neighbourhood: Option<&'a str>,
    price: Option<f64>,
    num_reviews: Option<u32>,
    review_score: Option<f64>,
}

/// Write ideal listings, one row per listing, with their cluster and distance.
pub fn write_ideal_listings_csv<W: Write>(writer: W, matches: &[IdealListing]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for m in matches {
        let l = &m.listing;
        csv_writer.serialize(IdealListingRow {
            cluster: m.cluster,
            distance_km: m.distance_km,
            id: l.id,
            name: l.name.as_deref(),
            lat: l.lat,
            lon: l.lon,
            neighbourhood: l.neighbourhood.as_deref(),
            price: l.price,
            num_reviews: l.num_reviews,
            review_score: l.review_score,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `amenity,count` rows.
pub fn write_amenity_counts_csv<W: Write>(
    writer: W,
    counts: &BTreeMap<String, usize>,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["amenity", "count"])?;
    for (amenity, count) in counts {
        csv_writer.write_record([amenity.as_str(), &count.to_string()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ClusterRecord {
    cluster: usize,
    lat: f64,
    lon: f64,
    members: usize,
    ideal_listings: usize,
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

impl From<&ClusterSummary> for ClusterRecord {
    fn from(summary: &ClusterSummary) -> Self {
        Self {
            cluster: summary.cluster,
            lat: summary.center.lat(),
            lon: summary.center.lon(),
            members: summary.members,
            ideal_listings: summary.ideal_listings,
            lat_min: summary.bbox.lat_min(),
            lat_max: summary.bbox.lat_max(),
            lon_min: summary.bbox.lon_min(),
            lon_max: summary.bbox.lon_max(),
        }
    }
}

/// Write cluster centers and their search boxes as a pretty JSON array.
pub fn write_clusters_json<W: Write>(writer: W, clusters: &[ClusterSummary]) -> Result<()> {
    let records: Vec<ClusterRecord> = clusters.iter().map(ClusterRecord::from).collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Write a text file.
pub fn write_summary(path: &Path, text: &str) -> Result<()> {
    let mut out = create_output(path)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn properties_of<T: Serialize>(value: &T) -> Result<JsonObject> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => {
            let mut map = JsonObject::new();
            map.insert("value".to_string(), other);
            Ok(map)
        }
    }
}

fn feature(geometry: Geometry, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn box_polygon(bbox: &GeoBoundingBox) -> Geometry {
    let ring = vec![
        vec![bbox.lon_min(), bbox.lat_min()],
        vec![bbox.lon_max(), bbox.lat_min()],
        vec![bbox.lon_max(), bbox.lat_max()],
        vec![bbox.lon_min(), bbox.lat_max()],
        vec![bbox.lon_min(), bbox.lat_min()],
    ];
    Geometry::new(Value::Polygon(vec![ring]))
}

/// Point features for amenities; every record field becomes a property.
pub fn amenities_geojson(amenities: &[Amenity]) -> Result<FeatureCollection> {
    let features = amenities
        .iter()
        .map(|a| Ok(feature(a.position().to_geometry(), properties_of(a)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(collection(features))
}

/// Point features for amenities tagged with their cluster label.
pub fn clustered_amenities_geojson(
    amenities: &[Amenity],
    assignments: &[usize],
) -> Result<FeatureCollection> {
    let features = amenities
        .iter()
        .zip(assignments)
        .map(|(a, &cluster)| {
            let mut properties = properties_of(a)?;
            properties.insert("cluster".to_string(), cluster.into());
            Ok(feature(a.position().to_geometry(), properties))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(collection(features))
}

/// Point features for listings.
pub fn listings_geojson(listings: &[Listing]) -> Result<FeatureCollection> {
    let features = listings
        .iter()
        .map(|l| Ok(feature(l.position().to_geometry(), properties_of(l)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(collection(features))
}

/// Point features for ideal listings with `cluster` and `distance_km` properties.
pub fn ideal_listings_geojson(matches: &[IdealListing]) -> Result<FeatureCollection> {
    let features = matches
        .iter()
        .map(|m| {
            let mut properties = properties_of(&m.listing)?;
            properties.insert("cluster".to_string(), m.cluster.into());
            properties.insert("distance_km".to_string(), m.distance_km.into());
            Ok(feature(m.listing.position().to_geometry(), properties))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(collection(features))
}

/// A center point and a box polygon per cluster.
pub fn clusters_geojson(clusters: &[ClusterSummary]) -> Result<FeatureCollection> {
    let mut features = Vec::with_capacity(clusters.len() * 2);
    for summary in clusters {
        let properties = properties_of(&ClusterRecord::from(summary))?;
        features.push(feature(summary.center.to_geometry(), properties.clone()));
        features.push(feature(box_polygon(&summary.bbox), properties));
    }
    Ok(collection(features))
}

/// Serialize a feature collection as pretty JSON.
pub fn write_geojson<W: Write>(writer: W, collection: &FeatureCollection) -> Result<()> {
    serde_json::to_writer_pretty(writer, collection)?;
    Ok(())
}
