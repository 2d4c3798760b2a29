use amenimap::dataset::{AMENITIES_FILE, LISTINGS_FILE};
use amenimap::{
    AnalysisConfig, Error, GeoPoint, Listing, PriceRange, analyze_listings, analyze_restaurants,
    load_amenities, load_listings, select_ideal_listings,
};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

const LISTINGS_HEADER: &str = "id,name,host_id,host_name,host_acceptance_rate,host_identity_verified,latitude,longitude,neighbourhood_cleansed,city,country,zipcode,price,accommodates,minimum_nights,number_of_reviews,review_scores_rating";

const GROUPS: [(f64, f64); 3] = [(49.28, -123.12), (49.17, -123.14), (49.25, -122.80)];

fn write_gz(path: &Path, text: &str) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

fn amenity_line(category: &str, name: &str, lat: f64, lon: f64) -> String {
    format!(
        r#"{{"lat": {lat}, "lon": {lon}, "timestamp": "2020-04-07T00:00:00.000Z", "amenity": "{category}", "name": "{name}", "tags": {{}}}}"#
    )
}

fn listing_row(id: u64, lat: f64, lon: f64, price: &str, reviews: u32, score: u32) -> String {
    format!(
        "{id},Listing {id},{host},Host,95%,t,{lat},{lon},Downtown,Vancouver,Canada,V6B,\"{price}\",2,1,{reviews},{score}",
        host = id * 10
    )
}

fn amenities_ndjson() -> String {
    let mut lines = Vec::new();
    for (g, (lat, lon)) in GROUPS.iter().enumerate() {
        for i in 0..6 {
            let d = i as f64 * 0.0008;
            let category = ["restaurant", "bank", "pharmacy"][i % 3];
            lines.push(amenity_line(category, &format!("Place {g}-{i}"), lat + d, lon - d));
        }
    }
    lines.push(amenity_line("bench", "Bench", 49.26, -123.0));
    lines.push(amenity_line("cafe", "Blenz", 49.281, -123.121));
    lines.push(amenity_line("cafe", "Blenz", 49.171, -123.141));
    lines.push(amenity_line("fast_food", "Blenz", 49.251, -122.801));
    lines.push(amenity_line("cafe", "Only One", 49.20, -123.00));
    lines.push(r#"{"lat": 49.2, "lon": -123.1, "amenity": "bank", "tags": {}}"#.to_string());
    lines.push(String::new());
    lines.join("\n")
}

fn listings_csv() -> String {
    let rows = [
        listing_row(1, 49.283, -123.118, "$120.00", 40, 96),
        listing_row(2, 49.172, -123.139, "$1,050.00", 22, 91),
        listing_row(3, 49.251, -122.802, "$85.00", 15, 88),
        listing_row(4, 48.50, -121.0, "$85.00", 15, 88),
        listing_row(5, 49.284, -123.117, "$99.00", 3, 99),
        listing_row(6, 49.285, -123.119, "$99.00", 50, 70),
    ];
    let mut text = String::from(LISTINGS_HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(&row);
    }
    text.push_str("\nnot-a-number,Broken,,,,t,,,,,,,,,,,\n");
    text
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fixture_dir() -> TempDir {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    write_gz(&dir.path().join(AMENITIES_FILE), &amenities_ndjson());
    write_gz(&dir.path().join(LISTINGS_FILE), &listings_csv());
    dir
}

#[test]
fn test_load_gzip_fixtures() {
    let dir = fixture_dir();

    let amenities = load_amenities(&dir.path().join(AMENITIES_FILE)).unwrap();
    // the record without a name and timestamp is dropped
    assert_eq!(amenities.len(), 23);

    let listings = load_listings(&dir.path().join(LISTINGS_FILE)).unwrap();
    assert_eq!(listings.len(), 6);
    assert_eq!(listings[1].price, Some(1050.0));
    assert_eq!(listings[0].host_identity_verified, Some(true));
    assert_eq!(listings[0].host_acceptance_rate, Some(95.0));
}

#[test]
fn test_missing_dataset_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_amenities(&dir.path().join(AMENITIES_FILE)).unwrap_err();
    assert!(matches!(err, Error::MissingInput(_)));
    assert!(err.to_string().starts_with("amenities-vancouver.json.gz is not present in"));
}

#[test]
fn test_listings_analysis_on_fixtures() {
    let dir = fixture_dir();
    let amenities = load_amenities(&dir.path().join(AMENITIES_FILE)).unwrap();
    let listings = load_listings(&dir.path().join(LISTINGS_FILE)).unwrap();

    let config = AnalysisConfig::default().with_clusters(3).with_seed(5);
    let report = analyze_listings(&amenities, &listings, &config).unwrap();

    // 18 group members plus the fast_food Blenz
    assert_eq!(report.amenities.len(), 19);
    assert_eq!(report.filtered_listings.len(), 4);
    assert_eq!(report.clusters.len(), 3);

    let mut ids: Vec<u64> = report.ideal_listings.iter().map(|m| m.listing.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);

    let capped = config.with_price_range(PriceRange::from_bounds(None, Some(100.0)));
    let report = analyze_listings(&amenities, &listings, &capped).unwrap();
    let mut ids: Vec<u64> = report.ideal_listings.iter().map(|m| m.listing.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![3]);
}

#[test]
fn test_restaurants_analysis_on_fixtures() {
    let dir = fixture_dir();
    let amenities = load_amenities(&dir.path().join(AMENITIES_FILE)).unwrap();
    let config = AnalysisConfig::default();

    let report = analyze_restaurants(&amenities, &config.restaurant_categories, Some("Blenz"));
    assert_eq!(report.split.chains.len(), 3);
    // 6 uniquely named group restaurants plus "Only One"
    assert_eq!(report.split.non_chains.len(), 7);
    assert_eq!(report.locations.as_ref().unwrap().1.len(), 3);
    assert_eq!(report.chain_stats.count, 3);
}

#[test]
fn test_three_centers_end_to_end() {
    // A and B are ~5.6 km apart so their 5 km boxes overlap; C is far away.
    let a = GeoPoint::new(49.25, -123.10);
    let b = GeoPoint::new(49.30, -123.10);
    let c = GeoPoint::new(49.10, -122.80);

    let listings = vec![
        Listing::at(1, 49.22, -123.10),
        Listing::at(2, 49.275, -123.10),
        Listing::at(3, 48.50, -121.00),
    ];

    let ideal = select_ideal_listings(&listings, &[a, b, c], 5.0).unwrap();
    assert_eq!(ideal.len(), 1);
    assert_eq!(ideal[0].id, 1);
}
