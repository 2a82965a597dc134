use crate::error::Result;
use crate::math::{Point2, Vector2};

use super::ConvexHull;

/// A rectangle rotated about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedBox {
    pub center: Point2,
    /// Extent along the box's own x axis, then its y axis.
    pub size: [f64; 2],
    /// Rotation of the box's x axis from the world x axis, in radians.
    pub angle: f64,
}

impl RotatedBox {
    /// Returns the area of the box.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.size[0] * self.size[1]
    }

    /// Returns the four corners, counter-clockwise from the minimum corner.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        let u = Vector2::new(self.angle.cos(), self.angle.sin());
        let v = Vector2::new(-u.y, u.x);
        let (hu, hv) = (u * self.size[0] / 2.0, v * self.size[1] / 2.0);
        [
            self.center - hu - hv,
            self.center + hu - hv,
            self.center + hu + hv,
            self.center - hu + hv,
        ]
    }
}

/// Computes the minimum-area rectangle enclosing a point set.
///
/// Rotating calipers: the optimal rectangle has one side on a convex hull
/// edge, so every hull edge direction is tried.
#[derive(Debug)]
pub struct MinAreaBox<'a> {
    points: &'a [Point2],
}

impl<'a> MinAreaBox<'a> {
    /// Creates a new `MinAreaBox` query.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the query.
    ///
    /// A flat point set gives a box of zero height along its extent; a
    /// single distinct point gives a zero-size box.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewPoints` if the point set is empty.
    pub fn execute(&self) -> Result<RotatedBox> {
        let hull: Vec<Point2> = ConvexHull::new(self.points)
            .execute()?
            .into_iter()
            .map(|i| self.points[i])
            .collect();

        let mut best = RotatedBox {
            center: hull[0],
            size: [0.0, 0.0],
            angle: 0.0,
        };
        let mut best_area = f64::INFINITY;

        let n = hull.len();
        for i in 0..n {
            let edge = hull[(i + 1) % n] - hull[i];
            let len = edge.norm();
            if len <= 0.0 {
                continue;
            }
            let u = edge / len;
            let v = Vector2::new(-u.y, u.x);

            let (mut min_u, mut max_u) = (f64::INFINITY, f64::NEG_INFINITY);
            let (mut min_v, mut max_v) = (f64::INFINITY, f64::NEG_INFINITY);
            for p in &hull {
                let (pu, pv) = (p.coords.dot(&u), p.coords.dot(&v));
                min_u = min_u.min(pu);
                max_u = max_u.max(pu);
                min_v = min_v.min(pv);
                max_v = max_v.max(pv);
            }

            let area = (max_u - min_u) * (max_v - min_v);
            if area < best_area {
                best_area = area;
                let mid = u * (min_u + max_u) / 2.0 + v * (min_v + max_v) / 2.0;
                best = RotatedBox {
                    center: Point2::from(mid),
                    size: [max_u - min_u, max_v - min_v],
                    angle: u.y.atan2(u.x),
                };
            }
        }
        Ok(best)
    }
}
