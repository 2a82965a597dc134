use crate::error::{InputError, Result};
use crate::math::vector_2d::turn;
use crate::math::Point2;

/// Computes the convex hull of a point set as indices into it.
///
/// Uses Andrew's monotone chain. The hull runs counter-clockwise in the usual
/// y-up sense, starting at the point with the smallest x (then smallest y).
/// Collinear and duplicate points are dropped, so a flat point set yields its
/// two extreme points.
#[derive(Debug)]
pub struct ConvexHull<'a> {
    points: &'a [Point2],
}

impl<'a> ConvexHull<'a> {
    /// Creates a new `ConvexHull` query.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the query, returning hull vertex indices.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewPoints` if the point set is empty.
    pub fn execute(&self) -> Result<Vec<usize>> {
        let points = self.points;
        match points.len() {
            0 => return Err(InputError::TooFewPoints { ring: 0, count: 0 }.into()),
            1 => return Ok(vec![0]),
            _ => {}
        }

        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|&a, &b| {
            points[a]
                .x
                .total_cmp(&points[b].x)
                .then(points[a].y.total_cmp(&points[b].y))
        });

        let chain = |sweep: &mut dyn Iterator<Item = usize>| {
            let mut half: Vec<usize> = Vec::new();
            for i in sweep {
                while half.len() >= 2
                    && turn(
                        &points[half[half.len() - 2]],
                        &points[half[half.len() - 1]],
                        &points[i],
                    ) <= 0.0
                {
                    half.pop();
                }
                half.push(i);
            }
            half.pop();
            half
        };

        let mut hull = chain(&mut order.iter().copied());
        hull.extend(chain(&mut order.iter().rev().copied()));
        if hull.len() == 2 && points[hull[0]] == points[hull[1]] {
            // Every point coincides.
            hull.truncate(1);
        }
        Ok(hull)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn interior_point_is_dropped() {
        let points = pts(&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 2.0)]);
        assert_eq!(ConvexHull::new(&points).execute().unwrap(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn reflex_vertex_is_dropped() {
        let points = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        assert_eq!(
            ConvexHull::new(&points).execute().unwrap(),
            vec![0, 1, 2, 4, 5]
        );
    }

    #[test]
    fn collinear_points_keep_extremes() {
        let points = pts(&[(1.0, 1.0), (0.0, 0.0), (2.0, 2.0)]);
        assert_eq!(ConvexHull::new(&points).execute().unwrap(), vec![1, 2]);
    }

    #[test]
    fn coincident_points_give_one_vertex() {
        let points = pts(&[(1.0, 1.0), (1.0, 1.0)]);
        assert_eq!(ConvexHull::new(&points).execute().unwrap().len(), 1);
        assert!(ConvexHull::new(&[]).execute().is_err());
    }
}
