use tracing::debug;

use crate::error::Result;
use crate::geometry::polygon::validate_ring;
use crate::math::Point2;

use super::ear_clip::clip_ears;
use super::optimize::optimize;
use super::{flatten, Triangulation, TriangulationParams};

/// Triangulates a simple polygon and repairs sliver triangles.
///
/// Runs ear clipping, then repeats the optimizer pass until it reports no
/// improvement, hits a degenerate angle, or exhausts `max_passes`. Polygons
/// with holes must first be merged into one ring, see
/// [`crate::geometry::Polygon::into_ring`].
#[derive(Debug)]
pub struct Triangulate<'a> {
    points: &'a [Point2],
    params: TriangulationParams,
}

impl<'a> Triangulate<'a> {
    /// Creates a new `Triangulate` operation with default parameters.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            params: TriangulationParams::default(),
        }
    }

    /// Sets custom parameters.
    #[must_use]
    pub fn with_params(mut self, params: TriangulationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the triangulation.
    ///
    /// Degenerate geometry never fails the call: an exhausted ear clip
    /// returns the triangles found so far, and a degenerate angle stops the
    /// optimizer, each with a matching diagnostic.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring has fewer than 3 points, a non-finite
    /// coordinate, or the parameters are invalid.
    pub fn execute(&self) -> Result<Triangulation> {
        validate_ring(self.points, 0)?;
        self.params.validate()?;

        let (mut triangles, exhausted) = clip_ears(self.points, self.params.ear_selection);
        let summary = optimize(self.points, &mut triangles, &self.params);
        debug!(
            points = self.points.len(),
            triangles = triangles.len(),
            passes = summary.passes,
            swaps = summary.swaps,
            "triangulation finished"
        );

        Ok(Triangulation {
            indices: flatten(&triangles),
            diagnostics: exhausted.into_iter().chain(summary.diagnostic).collect(),
            passes: summary.passes,
            swaps: summary.swaps,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::f64::consts::TAU;

    use super::*;
    use crate::geometry::Polygon;
    use crate::math::polygon_2d::signed_area;
    use crate::math::vector_2d::{triangle_angles, turn};
    use crate::triangulation::{Diagnostic, EarSelection, OptimizeTriangles};
    use approx::assert_abs_diff_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn covered_area(points: &[Point2], result: &Triangulation) -> f64 {
        result
            .triangles()
            .map(|t| -signed_area(&[points[t[0]], points[t[1]], points[t[2]]]))
            .sum()
    }

    /// Undirected edge counts over all triangles.
    fn edge_counts(result: &Triangulation) -> HashMap<(usize, usize), usize> {
        let mut counts = HashMap::new();
        for t in result.triangles() {
            for e in 0..3 {
                let (a, b) = (t[e], t[(e + 1) % 3]);
                *counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        counts
    }

    fn regular_polygon(n: usize, radius: f64) -> Vec<Point2> {
        (0..n)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = TAU * i as f64 / n as f64;
                Point2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect()
    }

    #[test]
    fn convex_polygon_gives_n_minus_two_triangles() {
        for n in 3..12 {
            let points = regular_polygon(n, 5.0);
            let result = Triangulate::new(&points).execute().unwrap();
            assert_eq!(result.len(), n - 2);
            assert!(result.diagnostics.is_empty());
            assert_abs_diff_eq!(
                covered_area(&points, &result),
                -signed_area(&points),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn boundary_edges_are_reconstructed() {
        let points = pts(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 3.0),
            (2.0, 1.0),
            (0.0, 3.0),
        ]);
        let result = Triangulate::new(&points).execute().unwrap();
        assert_eq!(result.len(), 3);

        let counts = edge_counts(&result);
        let n = points.len();
        for i in 0..n {
            let (a, b) = (i, (i + 1) % n);
            assert_eq!(counts.get(&(a.min(b), a.max(b))), Some(&1), "edge {a}-{b}");
        }
        let boundary = counts.values().filter(|&&c| c == 1).count();
        assert_eq!(boundary, n);
        assert!(counts.values().all(|&c| c <= 2));
        for i in 0..n {
            assert!(result.indices.contains(&i));
        }
    }

    #[test]
    fn square_with_hole_covers_ring_area() {
        let outer = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let hole = pts(&[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)]);
        let bridged = Polygon::new(outer).with_holes(vec![hole]).into_ring().unwrap();
        assert_eq!(bridged.ring.len(), 10);

        let result = Triangulate::new(&bridged.ring).execute().unwrap();
        assert_eq!(result.len(), 8);
        assert!(result.is_complete());
        assert_abs_diff_eq!(covered_area(&bridged.ring, &result), 84.0, epsilon = 1e-9);
        for t in result.triangles() {
            let [a, b, c] = t.map(|i| bridged.ring[i]);
            assert!(turn(&a, &b, &c) > 0.0);
        }
    }

    #[test]
    fn collinear_triangle_is_returned_unchanged() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let result = Triangulate::new(&points).execute().unwrap();
        assert_eq!(result.indices, vec![0, 1, 2]);
        assert_eq!(result.swaps, 0);
    }

    #[test]
    fn duplicate_point_reports_angle_degeneracy() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let points = pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0)]);
        let result = Triangulate::new(&points).execute().unwrap();
        assert_eq!(result.indices, vec![0, 1, 2]);
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::AngleDegeneracy { triangle: 0 }]
        );
        assert!(result.is_complete());
    }

    #[test]
    fn equilateral_triangle_stops_after_one_pass() {
        let h = 3.0_f64.sqrt() / 2.0;
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (0.5, h)]);
        let result = Triangulate::new(&points).execute().unwrap();
        assert_eq!(result.indices, vec![0, 1, 2]);
        assert_eq!(result.passes, 1);
        assert_eq!(result.swaps, 0);
    }

    #[test]
    fn wrong_winding_returns_partial_result() {
        let points = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let result = Triangulate::new(&points).execute().unwrap();
        assert!(result.is_empty());
        assert!(!result.is_complete());
    }

    #[test]
    fn exhausted_clip_keeps_found_triangles() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let points = pts(&[
            (0.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
            (2.0, 1.0),
            (2.0, 0.0),
            (0.0, 0.0),
        ]);
        let result = Triangulate::new(&points).execute().unwrap();
        assert_eq!(result.indices, vec![1, 2, 3]);
        assert_eq!(result.swaps, 0);
        assert!(!result.is_complete());
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::Exhausted {
                produced: 1,
                expected: 4
            }]
        );
    }

    #[test]
    fn output_is_deterministic() {
        let points = pts(&[
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 4.0),
            (4.0, 1.5),
            (2.0, 4.0),
            (0.0, 3.0),
            (1.0, 1.5),
        ]);
        let first_ear = TriangulationParams::default().with_ear_selection(EarSelection::First);
        for params in [TriangulationParams::default(), first_ear] {
            let first = Triangulate::new(&points).with_params(params).execute().unwrap();
            let second = Triangulate::new(&points).with_params(params).execute().unwrap();
            assert_eq!(first, second);
            assert_eq!(first.len(), points.len() - 2);
        }
    }

    fn min_angle(points: &[Point2], result: &Triangulation) -> f64 {
        result
            .triangles()
            .flat_map(|t| triangle_angles(&points[t[0]], &points[t[1]], &points[t[2]]))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn optimizer_never_lowers_minimum_angle() {
        // Long thin polygon: ear clipping alone leaves slivers.
        let points = pts(&[
            (0.0, 0.0),
            (2.0, -0.5),
            (4.0, -0.6),
            (6.0, -0.5),
            (8.0, 0.0),
            (6.0, 0.5),
            (4.0, 0.6),
            (2.0, 0.5),
        ]);
        let raw = Triangulate::new(&points)
            .with_params(TriangulationParams::default().with_max_passes(0))
            .execute()
            .unwrap();
        let optimized = OptimizeTriangles::new(&points, &raw.indices).execute().unwrap();
        assert_eq!(optimized.len(), raw.len());
        assert!(min_angle(&points, &optimized) >= min_angle(&points, &raw));
        assert_abs_diff_eq!(
            covered_area(&points, &optimized),
            covered_area(&points, &raw),
            epsilon = 1e-9
        );
    }

    #[test]
    fn rejects_short_input() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(Triangulate::new(&points).execute().is_err());
    }
}
