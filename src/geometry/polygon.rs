use crate::error::{InputError, Result};
use crate::math::polygon_2d::{force_clockwise, force_counter_clockwise};
use crate::math::Point2;
use crate::triangulation::{BridgeHoles, BridgedRing};

/// A simple polygon: one outer ring plus zero or more hole rings.
///
/// Rings are implicitly closed (the last point connects back to the first).
/// Holes must lie strictly inside the outer ring and must not overlap each
/// other; simplicity of the rings is the caller's responsibility.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub outer: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

impl Polygon {
    /// Creates a polygon without holes.
    #[must_use]
    pub fn new(outer: Vec<Point2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Sets the hole rings.
    #[must_use]
    pub fn with_holes(mut self, holes: Vec<Vec<Point2>>) -> Self {
        self.holes = holes;
        self
    }

    /// Iterates over all rings, outer ring first.
    pub fn rings(&self) -> impl Iterator<Item = &[Point2]> {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    /// Checks the boundary pre-conditions of every ring.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewPoints` or `InputError::NonFinite` naming the
    /// offending ring (0 is the outer ring, `k` is hole `k - 1`).
    pub fn validate(&self) -> Result<()> {
        for (ring, points) in self.rings().enumerate() {
            validate_ring(points, ring)?;
        }
        Ok(())
    }

    /// Orients the rings and merges the holes into a single ring.
    ///
    /// The outer ring is forced clockwise and every hole counter-clockwise
    /// before bridging, so the result is ready for the ear clipper.
    ///
    /// # Errors
    ///
    /// Returns an error if any ring fails [`Polygon::validate`].
    pub fn into_ring(self) -> Result<BridgedRing> {
        self.validate()?;
        let Self {
            mut outer,
            mut holes,
        } = self;

        force_clockwise(&mut outer);
        for hole in &mut holes {
            force_counter_clockwise(hole);
        }
        Ok(BridgeHoles::new(outer, holes).execute())
    }
}

/// Checks that a ring has at least 3 points and only finite coordinates.
///
/// # Errors
///
/// Returns `InputError::TooFewPoints` or `InputError::NonFinite`.
pub fn validate_ring(points: &[Point2], ring: usize) -> Result<()> {
    if points.len() < 3 {
        return Err(InputError::TooFewPoints {
            ring,
            count: points.len(),
        }
        .into());
    }
    if let Some(index) = points
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(InputError::NonFinite { ring, index }.into());
    }
    Ok(())
}
