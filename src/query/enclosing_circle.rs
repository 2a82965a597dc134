use crate::error::Result;
use crate::math::vector_2d::cross;
use crate::math::{Point2, Vector2};

use super::ConvexHull;

/// Relative slack when testing whether a point lies in a circle.
const CONTAINS_EPS: f64 = 1e-12;

/// A circle in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    fn from_point(p: Point2) -> Self {
        Self {
            center: p,
            radius: 0.0,
        }
    }

    fn from_diameter(a: Point2, b: Point2) -> Self {
        let center = nalgebra::center(&a, &b);
        Self {
            center,
            radius: (a - center).norm(),
        }
    }

    /// Circumcircle of `abc`, or the circle over the farthest pair when the
    /// points are collinear.
    #[allow(clippy::float_cmp)]
    fn from_three(a: Point2, b: Point2, c: Point2) -> Self {
        let (ab, ac) = (b - a, c - a);
        let d = 2.0 * cross(&ab, &ac);
        if d == 0.0 {
            let pairs = [(a, b), (a, c), (b, c)];
            let (p, q) = pairs
                .into_iter()
                .max_by(|x, y| (x.1 - x.0).norm_squared().total_cmp(&(y.1 - y.0).norm_squared()))
                .unwrap_or((a, b));
            return Self::from_diameter(p, q);
        }
        let (b2, c2) = (ab.norm_squared(), ac.norm_squared());
        let offset = Vector2::new(
            (ac.y * b2 - ab.y * c2) / d,
            (ab.x * c2 - ac.x * b2) / d,
        );
        Self {
            center: a + offset,
            radius: offset.norm(),
        }
    }

    /// Returns `true` if `p` lies in the closed disc, up to rounding.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        (p - self.center).norm() <= self.radius * (1.0 + CONTAINS_EPS)
    }
}

/// Computes the smallest circle enclosing a point set.
///
/// Runs the incremental form of Welzl's algorithm over the convex hull
/// vertices only, since interior points can never touch the circle.
#[derive(Debug)]
pub struct EnclosingCircle<'a> {
    points: &'a [Point2],
}

impl<'a> EnclosingCircle<'a> {
    /// Creates a new `EnclosingCircle` query.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewPoints` if the point set is empty.
    pub fn execute(&self) -> Result<Circle> {
        let hull: Vec<Point2> = ConvexHull::new(self.points)
            .execute()?
            .into_iter()
            .map(|i| self.points[i])
            .collect();

        let mut circle = Circle::from_point(hull[0]);
        for i in 1..hull.len() {
            if circle.contains(&hull[i]) {
                continue;
            }
            circle = Circle::from_point(hull[i]);
            for j in 0..i {
                if circle.contains(&hull[j]) {
                    continue;
                }
                circle = Circle::from_diameter(hull[i], hull[j]);
                for k in 0..j {
                    if !circle.contains(&hull[k]) {
                        circle = Circle::from_three(hull[i], hull[j], hull[k]);
                    }
                }
            }
        }
        Ok(circle)
    }
}
