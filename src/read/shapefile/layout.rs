//! The binary layout both the ".shx" and ".shp" readers consult, in one
//! place so the two can never drift apart.
//!
//! Lengths in the files themselves are counted in 16-bit words; everything
//! here is in bytes unless the name says otherwise.

/// Both files open with a fixed 100-byte header.
pub const FILE_HEADER_LEN: usize = 100;

/// Header offset of the total file length, in big-endian words, header
/// included.
pub const FILE_LENGTH_OFFSET: usize = 24;

/// Header offset of the little-endian shape type code.
pub const SHAPE_TYPE_OFFSET: usize = 32;

/// The only shape type this decoder accepts.
pub const POLYLINE_TYPE: i32 = 3;

/// Payload records open with record number + content length, both big-endian.
pub const RECORD_HEADER_LEN: usize = 8;

/// Index records are fixed-size: 4-byte offset + 4-byte content length.
pub const INDEX_RECORD_LEN: usize = 8;

/// Record content read before the part table: shape type (4), bounding box
/// (32), part count (4).
pub const RECORD_PRELUDE_LEN: usize = 40;

/// Offset of the part count within record content.
pub const PART_COUNT_OFFSET: usize = 36;

/// Content bytes before the vertex run in a single-part record: shape type
/// (4) + bounding box (32) + part count (4) + point count (4) + one part
/// index (4).
pub const SINGLE_PART_HEADER_LEN: i64 = 48;

/// One xy vertex: two little-endian f64s.
pub const POINT_LEN: usize = 16;

/// Number of index records implied by the index file's length field.
pub fn index_record_count(file_len_words: i32) -> i64 {
    (2 * i64::from(file_len_words) - FILE_HEADER_LEN as i64) / INDEX_RECORD_LEN as i64
}

/// Vertex count implied by an index record's content length, assuming a
/// single-part record. E.g. 104 words = 208 bytes of content, minus the
/// 48-byte header, is 160 bytes of vertices = 10 points.
pub fn record_vertex_count(record_len_words: i32) -> i64 {
    (2 * i64::from(record_len_words) - SINGLE_PART_HEADER_LEN) / POINT_LEN as i64
}
