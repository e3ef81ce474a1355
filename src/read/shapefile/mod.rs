//! Reads polyline shapefile triplets: a ".shp" geometry payload, its ".shx"
//! index, and an optional ".prj" CRS description, all sharing one base path.
//!
//! This is a single-pass, read-only decoder. The index is scanned first to
//! learn how many records there are and how many vertices each holds; the
//! payload is then read front to back with every read bounded against
//! end-of-file; the ".prj" text is classified last and is allowed to fail
//! without failing the load.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use shapeline::read::shapefile::PolylineStore;
//!
//! // "rivers" names rivers.shp, rivers.shx and (optionally) rivers.prj.
//! let mut store = PolylineStore::new();
//! store.load(Path::new("rivers")).unwrap();
//!
//! for path in store.paths() {
//!     println!("{} vertices: {}", path.len(), path);
//! }
//! println!("CRS: {}", store.crs());
//! ```

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

pub mod codec;
pub mod layout;
pub mod prj;
pub mod shp;
pub mod shx;
pub mod store;

pub use self::prj::PrjError;
pub use self::shx::IndexSummary;
pub use self::store::PolylineStore;

/// Why a load failed. Every variant is fatal: the store ends up empty.
///
/// CRS trouble is deliberately absent here — see [`PrjError`], which the
/// store degrades to `Crs::Undefined` instead of propagating.
#[derive(Debug, Error)]
pub enum ShapefileError {
    #[error("missing shapefile component(s): {missing}")]
    MissingFile { missing: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("unsupported shape type: found {found}, expected 3 (polyline)")]
    UnsupportedShapeType { found: i32 },

    #[error("the index declares no geometry records")]
    EmptyDataset,

    #[error("record {record} would have {count} vertices; a polyline needs at least 2")]
    InvalidVertexCount { record: usize, count: i64 },

    #[error("record {record} is truncated: a read would run past end of file")]
    TruncatedRecord { record: usize },
}

/// Converts a short read inside record `record` into `TruncatedRecord`;
/// anything else stays an I/O error.
pub(crate) fn truncated(record: usize, err: io::Error) -> ShapefileError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        ShapefileError::TruncatedRecord { record }
    } else {
        ShapefileError::Io(err)
    }
}

/// Probes that `<base>.shp` and `<base>.shx` can be opened for binary read.
///
/// Both files are probed even when the first is missing, so the diagnostic
/// names everything that needs fixing at once.
pub fn verify_components(base: &Path) -> Result<(), ShapefileError> {
    let mut missing = Vec::new();

    for ext in ["shp", "shx"] {
        let path = base.with_extension(ext);
        if fs::File::open(&path).is_err() {
            warn!("missing shapefile component: {}", path.display());
            missing.push(format!(".{}", ext));
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ShapefileError::MissingFile { missing: missing.join(", ") })
    }
}
