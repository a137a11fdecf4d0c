//! Archive input loading.
//!
//! History archives store their files gzipped; callers may hand over either
//! the compressed or the already-decompressed bytes.

use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::archive::error::ParseError;

/// Gzip stream magic.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read an archive file, decompressing it when it is gzipped.
pub fn load_archive(path: impl AsRef<Path>) -> Result<Vec<u8>, ParseError> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), "loaded archive file");
    decompress_if_gzip(data)
}

/// Gunzip a buffer when it carries the gzip magic, otherwise return it
/// unchanged.
pub fn decompress_if_gzip(data: Vec<u8>) -> Result<Vec<u8>, ParseError> {
    if !data.starts_with(&GZIP_MAGIC) {
        return Ok(data);
    }
    let mut decoder = GzDecoder::new(data.as_slice());
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn plain_buffers_pass_through() {
        let data = vec![0u8, 1, 2, 3];
        assert_eq!(decompress_if_gzip(data.clone()).unwrap(), data);
    }

    #[test]
    fn gzipped_buffers_are_decompressed() {
        let original = b"length-prefixed records".to_vec();
        let compressed = gzip(&original);
        assert_ne!(compressed, original);
        assert_eq!(decompress_if_gzip(compressed).unwrap(), original);
    }

    #[test]
    fn truncated_gzip_is_an_io_error() {
        let mut compressed = gzip(b"some records");
        compressed.truncate(6);
        assert!(matches!(
            decompress_if_gzip(compressed),
            Err(ParseError::Io(_))
        ));
    }

    #[test]
    fn empty_buffer_passes_through() {
        assert_eq!(decompress_if_gzip(Vec::new()).unwrap(), Vec::<u8>::new());
    }
}
