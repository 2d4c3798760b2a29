use super::reader::open_input;
use crate::error::{Error, Result};
use amenimap_types::Amenity;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawAmenity {
    lat: Option<f64>,
    lon: Option<f64>,
    amenity: Option<String>,
    name: Option<String>,
    timestamp: Option<Value>,
    #[serde(default)]
    tags: Option<Map<String, Value>>,
}

impl RawAmenity {
    /// Complete records only; any missing field drops the record.
    fn into_amenity(self) -> Option<Amenity> {
        let timestamp = match self.timestamp? {
            Value::Null => return None,
            Value::String(s) => s,
            other => other.to_string(),
        };
        Some(Amenity {
            lat: self.lat?,
            lon: self.lon?,
            amenity: self.amenity?,
            name: self.name?,
            timestamp,
            tags: self.tags?,
        })
    }
}

/// Read newline-delimited JSON amenity records.
///
/// Blank lines are skipped. Records with a missing field (`lat`, `lon`,
/// `amenity`, `name`, `timestamp` or `tags`) are dropped.
///
/// # Errors
///
/// Returns [`Error::Parse`] with the 1-based line number for a malformed line.
pub fn read_amenities<R: BufRead>(reader: R) -> Result<Vec<Amenity>> {
    let mut amenities = Vec::new();
    let mut dropped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawAmenity = serde_json::from_str(&line).map_err(|e| Error::Parse {
            line: idx + 1,
            message: e.to_string(),
        })?;
        match raw.into_amenity() {
            Some(amenity) => amenities.push(amenity),
            None => dropped += 1,
        }
    }

    log::info!(
        "Loaded {} amenities ({} incomplete records dropped)",
        amenities.len(),
        dropped
    );
    Ok(amenities)
}

/// Load amenities from a (possibly gzip-compressed) NDJSON file.
pub fn load_amenities(path: &Path) -> Result<Vec<Amenity>> {
    read_amenities(open_input(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"lat":49.2602,"lon":-123.1144,"timestamp":"2019-07-31T09:42:10.000-07:00","amenity":"cafe","name":"Starbucks","tags":{"brand":"Starbucks"}}
{"lat":49.2611,"lon":-123.1139,"timestamp":"2019-07-31T09:42:10.000-07:00","amenity":"bench","name":null,"tags":{}}

{"lat":49.2500,"lon":-123.1000,"timestamp":1564591330,"amenity":"bank","name":"RBC","tags":{}}
"#;

    #[test]
    fn test_reads_complete_records_only() {
        let amenities = read_amenities(SAMPLE.as_bytes()).unwrap();
        assert_eq!(amenities.len(), 2);
        assert_eq!(amenities[0].name, "Starbucks");
        assert_eq!(amenities[0].amenity, "cafe");
        assert_eq!(amenities[0].tags["brand"], "Starbucks");
        assert_eq!(amenities[1].amenity, "bank");
    }

    #[test]
    fn test_numeric_timestamp_is_kept_as_text() {
        let amenities = read_amenities(SAMPLE.as_bytes()).unwrap();
        assert_eq!(amenities[1].timestamp, "1564591330");
    }

    #[test]
    fn test_missing_tags_drops_record() {
        let line = r#"{"lat":49.0,"lon":-123.0,"timestamp":"t","amenity":"atm","name":"ATM"}"#;
        assert!(read_amenities(line.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = "{\"lat\":49.0,\"lon\":-123.0}\nnot json\n";
        match read_amenities(input.as_bytes()) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
