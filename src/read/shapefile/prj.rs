//! Resolves the ".prj" CRS description: a WKT-like text whose leading
//! 6-character tag names the CRS family, and whose quoted projection name —
//! for projected systems — encodes a WGS84 UTM zone and hemisphere.
//!
//! Nothing here is fatal to a load: the store degrades any failure to
//! `Crs::Undefined` and keeps the geometry.

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::geo::Crs;

/// ESRI and OGC spellings of the WGS84 UTM projection name, both 12 bytes.
const UTM_NAME_PREFIXES: [&[u8]; 2] = [b"WGS_1984_UTM", b"WGS 84 / UTM"];

#[derive(Debug, Error)]
pub enum PrjError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("unrecognized CRS family tag {0:?}")]
    UnrecognizedTag(String),

    #[error("end of file before the projection name's closing quote")]
    UnterminatedName,

    #[error("projection is not WGS84 UTM: {0:?}")]
    NotUtm(String),

    #[error("cannot determine a hemisphere from projection name {0:?}")]
    UnknownHemisphere(String),

    #[error("cannot determine a UTM zone from projection name {0:?}")]
    InvalidZone(String),
}

/// Classifies an entire ".prj" text.
pub fn parse(buf: &[u8]) -> Result<Crs, PrjError> {
    let tag = buf
        .get(0..6)
        .ok_or_else(|| PrjError::UnrecognizedTag(lossy(buf)))?;

    match tag {
        // Geographic and geocentric systems are treated alike; WGS84 assumed.
        b"GEOGCS" | b"GEOCCS" => Ok(Crs::Geographic),
        b"PROJCS" => parse_projection_name(&buf[6..]),
        _ => Err(PrjError::UnrecognizedTag(lossy(tag))),
    }
}

fn parse_projection_name(rest: &[u8]) -> Result<Crs, PrjError> {
    // The tag is followed by a bracket and an opening quote; the name runs
    // to the next quote.
    let body = rest.get(2..).ok_or(PrjError::UnterminatedName)?;
    let end = body
        .iter()
        .position(|&b| b == b'"')
        .ok_or(PrjError::UnterminatedName)?;
    let name = &body[..end];

    if name.len() < UTM_NAME_PREFIXES[0].len()
        || !UTM_NAME_PREFIXES.iter().any(|p| name.starts_with(p))
    {
        return Err(PrjError::NotUtm(lossy(name)));
    }

    // Names end "...<zone><hemisphere>", e.g. "WGS_1984_UTM_Zone_36N" or
    // "WGS 84 / UTM zone 5S". Single-digit zones pad with a space or
    // underscore rather than a zero.
    let north = match name[name.len() - 1] {
        b'N' => true,
        b'S' => false,
        _ => return Err(PrjError::UnknownHemisphere(lossy(name))),
    };

    let mut zone_digits = [name[name.len() - 3], name[name.len() - 2]];
    if zone_digits[0] == b' ' || zone_digits[0] == b'_' {
        zone_digits[0] = b'0';
    }
    let zone = std::str::from_utf8(&zone_digits)
        .ok()
        .and_then(|s| s.parse::<u8>().ok())
        .filter(|zone| (1..=60).contains(zone))
        .ok_or_else(|| PrjError::InvalidZone(lossy(name)))?;

    Ok(Crs::Utm { zone, north })
}

pub fn resolve<R: io::Read>(mut file: R) -> Result<Crs, PrjError> {
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    parse(&buf)
}

pub fn open(path: &Path) -> Result<Crs, PrjError> {
    let f = fs::File::open(path)?;
    resolve(io::BufReader::new(f))
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_esri_utm_name() {
        let crs = parse(br#"PROJCS["WGS_1984_UTM_Zone_36N",GEOGCS["GCS_WGS_1984"]]"#).unwrap();
        assert_eq!(Crs::Utm { zone: 36, north: true }, crs);
    }

    #[test]
    fn test_ogc_utm_name_with_padded_single_digit_zone() {
        let crs = parse(br#"PROJCS["WGS 84 / UTM zone 5S",GEOGCS["WGS 84"]]"#).unwrap();
        assert_eq!(Crs::Utm { zone: 5, north: false }, crs);
    }

    #[test]
    fn test_underscore_padded_zone() {
        let crs = parse(br#"PROJCS["WGS_1984_UTM_Zone_7N"]"#).unwrap();
        assert_eq!(Crs::Utm { zone: 7, north: true }, crs);
    }

    #[test]
    fn test_geographic_and_geocentric_tags() {
        assert_eq!(Crs::Geographic, parse(br#"GEOGCS["GCS_WGS_1984"]"#).unwrap());
        assert_eq!(Crs::Geographic, parse(br#"GEOCCS["WGS 84 geocentric"]"#).unwrap());
    }

    #[test]
    fn test_unrecognized_tag() {
        match parse(b"LOCAL_CS[\"whatever\"]") {
            Err(PrjError::UnrecognizedTag(tag)) => assert_eq!("LOCAL_", tag),
            other => panic!("expected UnrecognizedTag, got {:?}", other),
        }
    }

    #[test]
    fn test_too_short_for_a_tag() {
        assert!(matches!(parse(b"PROJ"), Err(PrjError::UnrecognizedTag(_))));
    }

    #[test]
    fn test_unterminated_name() {
        assert!(matches!(
            parse(br#"PROJCS["WGS_1984_UTM_Zone_36N"#),
            Err(PrjError::UnterminatedName)
        ));
    }

    #[test]
    fn test_non_utm_projection() {
        // Long enough that only the prefix check can reject it.
        assert!(matches!(
            parse(br#"PROJCS["NAD_1983_StatePlane_California_I"]"#),
            Err(PrjError::NotUtm(_))
        ));
    }

    #[test]
    fn test_name_shorter_than_a_prefix() {
        assert!(matches!(parse(br#"PROJCS["UTM_36N"]"#), Err(PrjError::NotUtm(_))));
    }

    #[test]
    fn test_unknown_hemisphere() {
        assert!(matches!(
            parse(br#"PROJCS["WGS_1984_UTM_Zone_36X"]"#),
            Err(PrjError::UnknownHemisphere(_))
        ));
    }

    #[test]
    fn test_zone_out_of_range() {
        assert!(matches!(
            parse(br#"PROJCS["WGS_1984_UTM_Zone_61N"]"#),
            Err(PrjError::InvalidZone(_))
        ));
        assert!(matches!(
            parse(br#"PROJCS["WGS_1984_UTM_Zone__0N"]"#),
            Err(PrjError::InvalidZone(_))
        ));
    }

    #[test]
    fn test_non_digit_zone() {
        assert!(matches!(
            parse(br#"PROJCS["WGS_1984_UTM_Zone_xyN"]"#),
            Err(PrjError::InvalidZone(_))
        ));
    }
}
