//! Reads the ".shx" index. A single-pass decode has no use for the index's
//! intended fast-seek role; it is scanned once to learn how many records the
//! payload holds and how many vertices each contributes.

use std::fs;
use std::io;
use std::path::Path;

use super::codec::{decode_i32, Endian};
use super::layout;
use super::{truncated, ShapefileError};

/// What one pass over the index yields: per-record vertex counts, in record
/// order. The geometry count is the table's length, so the two can never
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub vertex_counts: Vec<usize>,
}

impl IndexSummary {
    pub fn record_count(&self) -> usize {
        self.vertex_counts.len()
    }
}

/// Reads an entire index from `file`.
///
/// Fails with `UnsupportedShapeType` unless the header declares polylines,
/// with `EmptyDataset` when the file length implies no records, and with
/// `InvalidVertexCount` the moment any record implies fewer than two
/// vertices — nothing partial survives an error.
pub fn read_index<R: io::Read>(mut file: R) -> Result<IndexSummary, ShapefileError> {
    let mut header = [0u8; layout::FILE_HEADER_LEN];
    file.read_exact(&mut header)?;

    let shape_type = decode_i32(&header[layout::SHAPE_TYPE_OFFSET..], Endian::Little);
    if shape_type != layout::POLYLINE_TYPE {
        return Err(ShapefileError::UnsupportedShapeType { found: shape_type });
    }

    let file_len_words = decode_i32(&header[layout::FILE_LENGTH_OFFSET..], Endian::Big);
    let n_records = layout::index_record_count(file_len_words);
    if n_records < 1 {
        return Err(ShapefileError::EmptyDataset);
    }

    // Grown record by record rather than preallocated: the count above comes
    // from a single header field a corrupt file can inflate, and a lying
    // header should fail on its first short read, not allocate first.
    let mut vertex_counts = Vec::new();
    let mut record_buf = [0u8; layout::INDEX_RECORD_LEN];
    for record in 0..n_records as usize {
        file.read_exact(&mut record_buf)
            .map_err(|err| truncated(record, err))?;

        // The first 4 bytes are the record's payload offset; unused here.
        let len_words = decode_i32(&record_buf[4..], Endian::Big);
        let count = layout::record_vertex_count(len_words);
        if count < 2 {
            return Err(ShapefileError::InvalidVertexCount { record, count });
        }
        vertex_counts.push(count as usize);
    }

    Ok(IndexSummary { vertex_counts })
}

pub fn open(path: &Path) -> Result<IndexSummary, ShapefileError> {
    let f = fs::File::open(path)?;
    read_index(io::BufReader::new(f))
}

#[cfg(test)]
mod test {
    use super::*;
    use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
    use std::io::Cursor;

    fn index_bytes(shape_type: i32, record_len_words: &[i32]) -> Vec<u8> {
        let mut buf = vec![0u8; layout::FILE_HEADER_LEN];
        let n_bytes = layout::FILE_HEADER_LEN + layout::INDEX_RECORD_LEN * record_len_words.len();
        BigEndian::write_i32(&mut buf[layout::FILE_LENGTH_OFFSET..], (n_bytes / 2) as i32);
        LittleEndian::write_i32(&mut buf[layout::SHAPE_TYPE_OFFSET..], shape_type);
        for &len_words in record_len_words {
            buf.write_i32::<BigEndian>(0).unwrap(); // offset, unused
            buf.write_i32::<BigEndian>(len_words).unwrap();
        }
        buf
    }

    #[test]
    fn test_reads_vertex_count_table() {
        // 40 words = 2 vertices, 64 words = 5 vertices.
        let buf = index_bytes(layout::POLYLINE_TYPE, &[40, 64]);
        let summary = read_index(Cursor::new(buf)).unwrap();
        assert_eq!(2, summary.record_count());
        assert_eq!(vec![2, 5], summary.vertex_counts);
    }

    #[test]
    fn test_rejects_non_polyline_shape_type() {
        let buf = index_bytes(5, &[40]);
        match read_index(Cursor::new(buf)) {
            Err(ShapefileError::UnsupportedShapeType { found: 5 }) => {}
            other => panic!("expected UnsupportedShapeType, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_dataset() {
        let buf = index_bytes(layout::POLYLINE_TYPE, &[]);
        match read_index(Cursor::new(buf)) {
            Err(ShapefileError::EmptyDataset) => {}
            other => panic!("expected EmptyDataset, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_single_vertex_record() {
        // 32 words imply a single vertex.
        let buf = index_bytes(layout::POLYLINE_TYPE, &[40, 32]);
        match read_index(Cursor::new(buf)) {
            Err(ShapefileError::InvalidVertexCount { record: 1, count: 1 }) => {}
            other => panic!("expected InvalidVertexCount, got {:?}", other),
        }
    }

    #[test]
    fn test_short_record_table_is_truncation() {
        let mut buf = index_bytes(layout::POLYLINE_TYPE, &[40, 40]);
        buf.truncate(buf.len() - 5);
        match read_index(Cursor::new(buf)) {
            Err(ShapefileError::TruncatedRecord { record: 1 }) => {}
            other => panic!("expected TruncatedRecord, got {:?}", other),
        }
    }
}
