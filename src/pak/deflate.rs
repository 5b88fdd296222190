#![forbid(unsafe_code)]

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::pak::error::{PakError, PakResult};

/// zlib level used for a frame: best when optimizing, stored blocks otherwise.
pub fn level(optimize: bool) -> Compression {
    if optimize {
        Compression::best()
    } else {
        Compression::none()
    }
}

pub fn compress(frame: &[u8], optimize: bool) -> PakResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), level(optimize));
    encoder.write_all(frame)?;
    Ok(encoder.finish()?)
}

pub fn inflate(compressed: &[u8]) -> PakResult<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(compressed)
        .read_to_end(&mut out)
        .map_err(|e| PakError::Invalid(format!("cannot inflate frame: {e}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_levels_inflate() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i % 7) as u8).collect();
        for optimize in [false, true] {
            let packed = compress(&data, optimize).unwrap();
            assert_eq!(inflate(&packed).unwrap(), data);
        }
    }

    #[test]
    fn optimize_shrinks_repetitive_data() {
        let data = vec![0u8; 10_000];
        let stored = compress(&data, false).unwrap();
        let best = compress(&data, true).unwrap();
        assert!(stored.len() > data.len());
        assert!(best.len() < 100);
    }

    #[test]
    fn garbage_does_not_inflate() {
        assert!(matches!(inflate(b"not zlib"), Err(PakError::Invalid(_))));
    }
}
