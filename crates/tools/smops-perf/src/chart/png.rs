//! Minimal PNG encoder for 8-bit RGB images.
//!
//! Writes IHDR, a single zlib-compressed IDAT and IEND. Every scanline uses
//! filter type 0 so the output depends only on the pixels.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::{self, Write};

/// PNG file signature.
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Colour type 2: truecolour without alpha.
const COLOR_TYPE_RGB: u8 = 2;

/// Encode `pixels` (row-major RGB triples) as a PNG image.
pub fn encode_rgb(width: u32, height: u32, pixels: &[u8]) -> io::Result<Vec<u8>> {
    let stride = width as usize * 3;
    if pixels.len() != stride * height as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "pixel buffer is {} bytes, expected {} for {width}x{height}",
                pixels.len(),
                stride * height as usize
            ),
        ));
    }

    let mut out = Vec::with_capacity(pixels.len() / 4);
    out.extend_from_slice(PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, COLOR_TYPE_RGB, 0, 0, 0]);
    write_chunk(&mut out, b"IHDR", &ihdr)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    if stride > 0 {
        for row in pixels.chunks(stride) {
            encoder.write_all(&[0])?;
            encoder.write_all(row)?;
        }
    }
    let idat = encoder.finish()?;
    write_chunk(&mut out, b"IDAT", &idat)?;

    write_chunk(&mut out, b"IEND", &[])?;
    Ok(out)
}

/// Append a chunk: big-endian length, type, data, CRC-32 of type and data.
fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) -> io::Result<()> {
    let len = u32::try_from(data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "PNG chunk larger than 4 GiB"))?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
    Ok(())
}
