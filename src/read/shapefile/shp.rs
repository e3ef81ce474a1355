//! Reads the ".shp" geometry payload, guided by the vertex-count table the
//! index produced. Record headers and bounding boxes are skipped; only the
//! vertex runs are kept.

use std::fs;
use std::io;
use std::io::Read;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use tracing::warn;

use super::codec::{decode_i32, Endian};
use super::layout;
use super::{truncated, ShapefileError};
use crate::geo;

/// Reads one path per entry in `vertex_counts`, in record order.
///
/// Every read is bounded: a payload that ends before a record's declared
/// vertex run fails with `TruncatedRecord` instead of reading past
/// end-of-file. Beyond that there is no mid-record validation — the index
/// already vetted the dataset.
pub fn read_paths<R: io::Read>(
    mut file: R,
    vertex_counts: &[usize],
) -> Result<Vec<geo::Path>, ShapefileError> {
    let mut header = [0u8; layout::FILE_HEADER_LEN];
    file.read_exact(&mut header)?; // content ignored; the index is authoritative

    let mut paths = Vec::new();
    for (record, &n_vertices) in vertex_counts.iter().enumerate() {
        // Record header plus the content up to and including the part count.
        let mut prelude = [0u8; layout::RECORD_HEADER_LEN + layout::RECORD_PRELUDE_LEN];
        file.read_exact(&mut prelude)
            .map_err(|err| truncated(record, err))?;

        let part_count = decode_i32(
            &prelude[layout::RECORD_HEADER_LEN + layout::PART_COUNT_OFFSET..],
            Endian::Little,
        );
        if part_count > 1 {
            warn!(
                "record {} declares {} parts; it is read as one contiguous run of {} vertices, which may misinterpret multi-part data",
                record, part_count, n_vertices
            );
        }

        // Point count plus the part index table sit between the prelude and
        // the vertex run. A negative (garbage) part count skips nothing
        // rather than seeking backwards; an oversized one runs into the
        // end-of-file bound below.
        let table_len = 4 + 4 * u64::try_from(part_count).unwrap_or(0);
        skip(&mut file, table_len).map_err(|err| truncated(record, err))?;

        let mut points = Vec::new();
        let mut point_buf = [0u8; layout::POINT_LEN];
        for _ in 0..n_vertices {
            file.read_exact(&mut point_buf)
                .map_err(|err| truncated(record, err))?;
            points.push(geo::Point(
                LittleEndian::read_f64(&point_buf[0..8]),
                LittleEndian::read_f64(&point_buf[8..16]),
            ));
        }
        paths.push(geo::Path(points.into_boxed_slice()));
    }

    Ok(paths)
}

pub fn open(path: &Path, vertex_counts: &[usize]) -> Result<Vec<geo::Path>, ShapefileError> {
    let f = fs::File::open(path)?;
    read_paths(io::BufReader::new(f), vertex_counts)
}

/// Discards exactly `n` bytes, reporting `UnexpectedEof` on a short file.
fn skip<R: io::Read>(file: &mut R, n: u64) -> io::Result<()> {
    let discarded = io::copy(&mut file.by_ref().take(n), &mut io::sink())?;
    if discarded < n {
        Err(io::ErrorKind::UnexpectedEof.into())
    } else {
        Ok(())
    }
}
