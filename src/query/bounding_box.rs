use crate::error::{InputError, Result};
use crate::math::Point2;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb {
    /// Returns the extent along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the extent along y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the box grown by `margin` on every side.
    #[must_use]
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min: Point2::new(self.min.x - margin, self.min.y - margin),
            max: Point2::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

/// Computes the axis-aligned bounding box of a point set.
#[derive(Debug)]
pub struct BoundingBox<'a> {
    points: &'a [Point2],
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewPoints` if the point set is empty.
    pub fn execute(&self) -> Result<Aabb> {
        let Some(first) = self.points.first() else {
            return Err(InputError::TooFewPoints { ring: 0, count: 0 }.into());
        };
        let (min, max) = self
            .points
            .iter()
            .fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)));
        Ok(Aabb { min, max })
    }
}
