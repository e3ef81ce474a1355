//! The facade that owns a decoded dataset. Orchestrates the component
//! probe, the index and payload readers, and the best-effort CRS resolver,
//! and exposes the load/unload lifecycle.

use std::path::Path;
use tracing::{debug, warn};

use super::{prj, shp, shx, verify_components, ShapefileError};
use crate::geo;
use crate::geo::{Crs, GeometrySet};

/// Loads, owns, and serves one polyline dataset at a time.
///
/// The lifecycle is structural: the store is either `Empty` or holds a
/// complete [`GeometrySet`]; there is no partially loaded state observable
/// from outside.
#[derive(Debug, Default)]
pub struct PolylineStore {
    state: State,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Empty,
    Loaded(GeometrySet),
}

impl PolylineStore {
    pub fn new() -> PolylineStore {
        PolylineStore::default()
    }

    /// Decodes the triplet at `base` (a path without extension; ".shp",
    /// ".shx" and ".prj" are appended to it).
    ///
    /// All-or-nothing for geometry: the index and payload must both decode
    /// completely or the store stays empty. A missing or unparseable ".prj"
    /// only degrades the CRS to `Undefined`. Prior contents are dropped up
    /// front, so loading twice replaces and a failed reload leaves nothing
    /// stale behind.
    pub fn load(&mut self, base: &Path) -> Result<(), ShapefileError> {
        self.unload();

        verify_components(base)?;

        let index = shx::open(&base.with_extension("shx"))?;
        debug!(
            "index {}: {} records",
            base.with_extension("shx").display(),
            index.record_count()
        );

        let paths = shp::open(&base.with_extension("shp"), &index.vertex_counts)?;

        let prj_path = base.with_extension("prj");
        let crs = match prj::open(&prj_path) {
            Ok(crs) => {
                debug!("resolved CRS from {}: {}", prj_path.display(), crs);
                crs
            }
            Err(err) => {
                warn!(
                    "could not resolve a CRS from {}: {}; continuing without CRS metadata",
                    prj_path.display(),
                    err
                );
                Crs::Undefined
            }
        };

        self.state = State::Loaded(GeometrySet {
            paths: paths.into_boxed_slice(),
            crs,
        });
        Ok(())
    }

    /// Drops the current dataset. Idempotent: unloading an empty store is a
    /// no-op.
    pub fn unload(&mut self) {
        self.state = State::Empty;
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    pub fn geometry(&self) -> Option<&GeometrySet> {
        match self.state {
            State::Loaded(ref set) => Some(set),
            State::Empty => None,
        }
    }

    /// The decoded paths, in record order; empty when nothing is loaded.
    /// Callers must treat the data as read-only for the life of the store.
    pub fn paths(&self) -> &[geo::Path] {
        self.geometry().map(|set| &*set.paths).unwrap_or(&[])
    }

    pub fn crs(&self) -> Crs {
        self.geometry().map(|set| set.crs).unwrap_or_default()
    }

    /// The UTM zone, when the CRS is UTM. `None` for any other CRS — the
    /// non-UTM case is a checked outcome, not a sentinel value.
    pub fn utm_zone(&self) -> Option<u8> {
        self.crs().utm_zone()
    }

    pub fn is_northern_hemisphere(&self) -> Option<bool> {
        self.crs().is_northern_hemisphere()
    }
}
