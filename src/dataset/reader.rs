use crate::error::{Error, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open an input file for buffered reading, decompressing gzip transparently.
///
/// Compression is detected from the gzip magic bytes, not the file name.
///
/// # Errors
///
/// Returns [`Error::MissingInput`] if the file does not exist.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }

    let mut reader = BufReader::new(File::open(path)?);
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

    if is_gzip {
        log::debug!("Reading gzip-compressed input {}", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        log::debug!("Reading plain input {}", path.display());
        Ok(Box::new(reader))
    }
}
