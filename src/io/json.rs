//! Polygon sources in JSON form.
//!
//! A source is an array of rings, each an array of `[x, y]` pairs. The first
//! ring is the outer boundary and every following ring is a hole.

use std::path::Path;

use crate::error::{IoError, Result};
use crate::geometry::Polygon;
use crate::math::Point2;

/// Parses and validates a polygon from JSON text.
///
/// # Errors
///
/// Returns `IoError::Parse` for invalid JSON, `IoError::Malformed` for an
/// empty ring list, and an `InputError` if a ring fails validation.
pub fn parse_polygon(text: &str) -> Result<Polygon> {
    let rings: Vec<Vec<[f64; 2]>> = serde_json::from_str(text).map_err(IoError::from)?;
    let mut rings = rings
        .into_iter()
        .map(|ring| ring.into_iter().map(|[x, y]| Point2::new(x, y)).collect::<Vec<_>>());

    let Some(outer) = rings.next() else {
        return Err(IoError::Malformed("no rings in polygon source".into()).into());
    };
    let polygon = Polygon::new(outer).with_holes(rings.collect());
    polygon.validate()?;
    Ok(polygon)
}

/// Reads and parses a polygon file.
///
/// # Errors
///
/// Returns `IoError::Read` if the file cannot be read, otherwise the errors
/// of [`parse_polygon`].
pub fn read_polygon(path: impl AsRef<Path>) -> Result<Polygon> {
    let text = std::fs::read_to_string(path).map_err(IoError::from)?;
    parse_polygon(&text)
}
