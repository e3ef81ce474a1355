//! The in-memory model a decoded dataset is held in: 2D points, polyline
//! paths, and the coordinate reference system the coordinates live in.

use std::fmt;

/// A 2D vertex, (x, y) in dataset units.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Point(pub f64, pub f64);

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

/// One polyline: an ordered run of vertices, as stored in the source record.
///
/// Always holds at least two points; the decoder rejects shorter records
/// before a `Path` is ever built.
#[derive(Debug, Clone, PartialEq)]
pub struct Path(pub Box<[Point]>);

impl Path {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut r = write!(f, "[");
        for (i, &point) in self.0.iter().enumerate() {
            if i > 0 {
                r = r.and_then(|_| write!(f, ","));
            }
            r = r.and_then(|_| write!(f, "{}", point));
        }
        r.and_then(|_| write!(f, "]"))
    }
}

/// Classified coordinate reference system of a dataset.
///
/// `Undefined` is the default and the degraded state after any `.prj`
/// resolution failure. The UTM accessors make the non-UTM case a checked
/// outcome instead of a sentinel value:
///
/// ```
/// use shapeline::geo::Crs;
///
/// let crs = Crs::Utm { zone: 36, north: true };
/// assert_eq!(Some(36), crs.utm_zone());
/// assert_eq!(None, Crs::Geographic.utm_zone());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crs {
    #[default]
    Undefined,
    /// Geographic or geocentric coordinates; WGS84 assumed.
    Geographic,
    /// WGS84 UTM, zone 1..=60, split into hemispheres.
    Utm { zone: u8, north: bool },
}

impl Crs {
    pub fn utm_zone(&self) -> Option<u8> {
        match *self {
            Crs::Utm { zone, .. } => Some(zone),
            _ => None,
        }
    }

    pub fn is_northern_hemisphere(&self) -> Option<bool> {
        match *self {
            Crs::Utm { north, .. } => Some(north),
            _ => None,
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Crs::Undefined => write!(f, "undefined"),
            Crs::Geographic => write!(f, "geographic (WGS84)"),
            Crs::Utm { zone, north } => {
                write!(f, "UTM zone {}{}", zone, if north { "N" } else { "S" })
            }
        }
    }
}

/// Everything one successful load produces, owned as a unit so the paths and
/// their CRS can never go out of sync.
#[derive(Debug)]
pub struct GeometrySet {
    pub paths: Box<[Path]>,
    pub crs: Crs,
}

impl GeometrySet {
    /// Per-path vertex counts, in record order.
    pub fn vertex_counts(&self) -> Vec<usize> {
        self.paths.iter().map(Path::len).collect()
    }
}
