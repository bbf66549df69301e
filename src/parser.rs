//! CSV parser for student datasets, accepting plain or gzip-compressed input.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

use crate::dataset::Dataset;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decodes a [`Dataset`] from raw bytes. Gzip input is detected by its magic
/// number and decompressed first.
///
/// # Errors
///
/// Returns an error if the gzip stream is corrupt, the CSV is malformed, or a
/// subject column is missing from the header.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset> {
    if bytes.starts_with(&GZIP_MAGIC) {
        Dataset::from_reader(GzDecoder::new(bytes)).context("failed to read gzipped dataset")
    } else {
        Dataset::from_reader(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const RAW: &str = "Name,Roll,Mathematics,Science,English\nAsha,1,90,85,70\n";

    #[test]
    fn test_parse_plain_csv() {
        let dataset = parse_dataset(RAW.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.headers().len(), 5);
    }

    #[test]
    fn test_parse_gzipped_csv() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(RAW.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let dataset = parse_dataset(&compressed).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].name, "Asha");
    }

    #[test]
    fn test_parse_missing_columns_fails() {
        let result = parse_dataset(b"Name,Roll\nAsha,1\n");
        assert!(result.is_err());
    }
}
