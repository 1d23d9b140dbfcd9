//! zlib wrapping of the canonical object bytes.

use std::io::{self, Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::CorruptStream;

pub fn compress(bytes: &[u8], level: Compression) -> io::Result<Vec<u8>> {
    let mut e = ZlibEncoder::new(Vec::with_capacity(bytes.len() / 2 + 16), level);
    e.write_all(bytes)?;
    e.finish()
}

/// Inflate a complete zlib stream. Truncated streams and trailing bytes after the end of the
/// stream are both rejected.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, CorruptStream> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut out = Vec::with_capacity(bytes.len() * 2 + 64);
    decoder.read_to_end(&mut out).map_err(CorruptStream)?;

    if decoder.total_in() as usize != bytes.len() {
        return Err(CorruptStream(io::Error::new(
            io::ErrorKind::InvalidData,
            "trailing bytes after end of zlib stream",
        )));
    }

    Ok(out)
}
