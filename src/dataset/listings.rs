use super::reader::open_input;
use crate::error::{Error, Result};
use amenimap_types::Listing;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 3] = ["id", "latitude", "longitude"];

/// One CSV row. Every column is read as text so that malformed values can be
/// coerced to `None` instead of failing the whole file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawListing {
    id: Option<String>,
    name: Option<String>,
    host_id: Option<String>,
    host_name: Option<String>,
    host_acceptance_rate: Option<String>,
    host_identity_verified: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    neighbourhood_cleansed: Option<String>,
    city: Option<String>,
    country: Option<String>,
    zipcode: Option<String>,
    price: Option<String>,
    accommodates: Option<String>,
    minimum_nights: Option<String>,
    number_of_reviews: Option<String>,
    review_scores_rating: Option<String>,
}

impl RawListing {
    fn into_listing(self) -> Option<Listing> {
        Some(Listing {
            id: parse_count(self.id.as_deref())?,
            name: non_empty(self.name),
            host_id: parse_count(self.host_id.as_deref()),
            host_name: non_empty(self.host_name),
            host_acceptance_rate: parse_percent(self.host_acceptance_rate.as_deref()),
            host_identity_verified: parse_flag(self.host_identity_verified.as_deref()),
            lat: parse_number(self.latitude.as_deref())?,
            lon: parse_number(self.longitude.as_deref())?,
            neighbourhood: non_empty(self.neighbourhood_cleansed),
            city: non_empty(self.city),
            country: non_empty(self.country),
            zipcode: non_empty(self.zipcode),
            price: parse_price(self.price.as_deref()),
            accommodates: parse_count(self.accommodates.as_deref()),
            min_nights: parse_count(self.minimum_nights.as_deref()),
            num_reviews: parse_count(self.number_of_reviews.as_deref()),
            review_score: parse_number(self.review_scores_rating.as_deref()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Finite float, or `None` for anything unparseable.
pub(crate) fn parse_number(value: Option<&str>) -> Option<f64> {
    value?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Currency string such as `$1,250.00`.
pub(crate) fn parse_price(value: Option<&str>) -> Option<f64> {
    let cleaned: String = value?.chars().filter(|c| *c != '$' && *c != ',').collect();
    parse_number(Some(&cleaned))
}

/// Percentage string such as `93%`.
pub(crate) fn parse_percent(value: Option<&str>) -> Option<f64> {
    parse_number(Some(value?.trim().trim_end_matches('%')))
}

/// `t`/`f` flags as written by the Inside Airbnb exports.
pub(crate) fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value?.trim() {
        "t" | "true" | "True" => Some(true),
        "f" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Non-negative integer; accepts integral floats like `2.0`.
pub(crate) fn parse_count<T: TryFrom<u64>>(value: Option<&str>) -> Option<T> {
    let text = value?.trim();
    let n = match text.parse::<u64>() {
        Ok(n) => n,
        Err(_) => {
            let f = text.parse::<f64>().ok()?;
            if !(f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64) {
                return None;
            }
            f as u64
        }
    };
    T::try_from(n).ok()
}

/// Read Airbnb listings from CSV with a header row.
///
/// Fields are trimmed and unknown columns are ignored. Unparseable numeric
/// values become `None`. Rows without a usable `id`, `latitude` or
/// `longitude` are skipped.
///
/// # Errors
///
/// Returns [`Error::Parse`] if a required column is absent and
/// [`Error::Csv`] for structurally broken CSV.
pub fn read_listings<R: Read>(reader: R) -> Result<Vec<Listing>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::Parse {
                line: 1,
                message: format!("missing required column '{}'", column),
            });
        }
    }

    let mut listings = Vec::new();
    let mut skipped = 0usize;
    for row in csv_reader.deserialize::<RawListing>() {
        match row?.into_listing() {
            Some(listing) => listings.push(listing),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!(
            "Skipped {} listings without a usable id or coordinates",
            skipped
        );
    }
    log::info!("Loaded {} listings", listings.len());
    Ok(listings)
}

/// Load listings from a (possibly gzip-compressed) CSV file.
pub fn load_listings(path: &Path) -> Result<Vec<Listing>> {
    read_listings(open_input(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,name,host_id,host_name,host_acceptance_rate,host_identity_verified,latitude,longitude,neighbourhood_cleansed,city,country,zipcode,price,accommodates,minimum_nights,number_of_reviews,review_scores_rating,extra";

    fn csv_with(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_reads_and_renames_fields() {
        let input = csv_with(&[
            "10080,Loft,30899,Rami,93%,t,49.28,-123.12,Downtown,Vancouver,Canada,V6B,$150.00,2,30,16,93,ignored",
        ]);
        let listings = read_listings(input.as_bytes()).unwrap();
        assert_eq!(listings.len(), 1);
        let l = &listings[0];
        assert_eq!(l.id, 10080);
        assert_eq!(l.name.as_deref(), Some("Loft"));
        assert_eq!(l.host_id, Some(30899));
        assert_eq!(l.host_acceptance_rate, Some(93.0));
        assert_eq!(l.host_identity_verified, Some(true));
        assert_eq!(l.lat, 49.28);
        assert_eq!(l.lon, -123.12);
        assert_eq!(l.neighbourhood.as_deref(), Some("Downtown"));
        assert_eq!(l.price, Some(150.0));
        assert_eq!(l.accommodates, Some(2));
        assert_eq!(l.min_nights, Some(30));
        assert_eq!(l.num_reviews, Some(16));
        assert_eq!(l.review_score, Some(93.0));
    }

    #[test]
    fn test_malformed_numbers_become_none() {
        let input = csv_with(&["1,A,2,B,N/A,f,49.0,-123.0,,,,,call us,two,,x,"]);
        let l = &read_listings(input.as_bytes()).unwrap()[0];
        assert_eq!(l.host_acceptance_rate, None);
        assert_eq!(l.host_identity_verified, Some(false));
        assert_eq!(l.price, None);
        assert_eq!(l.accommodates, None);
        assert_eq!(l.num_reviews, None);
        assert_eq!(l.review_score, None);
        assert_eq!(l.city, None);
    }

    #[test]
    fn test_skip_initial_space_and_quoted_price() {
        let input = format!(
            "{}\n2, Spaced , 3, Host, 100%, t, 49.1, -123.1, , , , ,\"$1,250.00\", 4, 1, 12, 88.5, \n",
            HEADER
        );
        let l = &read_listings(input.as_bytes()).unwrap()[0];
        assert_eq!(l.name.as_deref(), Some("Spaced"));
        assert_eq!(l.price, Some(1250.0));
        assert_eq!(l.review_score, Some(88.5));
    }

    #[test]
    fn test_rows_without_coordinates_are_skipped() {
        let input = csv_with(&[
            "1,A,,,,,,-123.0,,,,,,,,,",
            "2,B,,,,,49.0,-123.0,,,,,,,,,",
        ]);
        let listings = read_listings(input.as_bytes()).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, 2);
    }

    #[test]
    fn test_missing_required_column() {
        let input = "id,name,longitude\n1,A,-123.0\n";
        match read_listings(input.as_bytes()) {
            Err(Error::Parse { line, message }) => {
                assert_eq!(line, 1);
                assert!(message.contains("latitude"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_price(Some("$85.00")), Some(85.0));
        assert_eq!(parse_price(Some("")), None);
        assert_eq!(parse_percent(Some("67%")), Some(67.0));
        assert_eq!(parse_flag(Some("maybe")), None);
        assert_eq!(parse_count::<u32>(Some("3.0")), Some(3));
        assert_eq!(parse_count::<u32>(Some("3.5")), None);
        assert_eq!(parse_count::<u32>(Some("-1")), None);
        assert_eq!(parse_number(Some("NaN")), None);
    }
}
