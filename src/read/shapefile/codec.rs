//! Endian-flagged 32-bit decoding. Shapefile headers mix byte orders — file
//! lengths are big-endian, shape types and part counts little-endian — so
//! the flag travels with every call instead of hiding in a type parameter.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// Decodes the first 4 bytes of `bytes` as a signed 32-bit integer.
///
/// Pure and infallible for any 4-byte input; panics if `bytes` holds fewer
/// than 4 bytes, which the fixed-size buffers at every call site rule out.
pub fn decode_i32(bytes: &[u8], endian: Endian) -> i32 {
    match endian {
        Endian::Big => BigEndian::read_i32(bytes),
        Endian::Little => LittleEndian::read_i32(bytes),
    }
}
