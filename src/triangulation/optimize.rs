//! Sliver repair by diagonal swapping.
//!
//! A sliver is a triangle whose smallest angle is at most the sliver
//! threshold. Its longest edge (opposite its largest angle) is shared with at
//! most one other triangle; if swapping the diagonal of the quadrilateral they
//! form raises the minimum angle of the pair, the swap is applied.

use tracing::{debug, warn};

use crate::error::{InputError, Result};
use crate::geometry::polygon::validate_ring;
use crate::math::vector_2d::{triangle_angles, turn};
use crate::math::Point2;

use super::{flatten, Diagnostic, Triangulation, TriangulationParams};

/// Result of a single optimizer pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// One diagonal swap was applied.
    Improved,
    /// No swap improves the triangulation.
    FixedPoint,
    /// Triangle `triangle` has an undefined angle; nothing was changed.
    Degenerate { triangle: usize },
}

/// Runs one optimizer pass over `triangles`, applying at most one swap.
///
/// Triangles are visited in list order. The first sliver whose long-edge
/// swap strictly increases the minimum angle of the affected pair is swapped
/// and the pass ends.
///
/// Indices are not checked; [`OptimizeTriangles`] validates them first.
///
/// # Panics
///
/// Panics if a triangle references an index outside `points`.
#[must_use]
pub fn improve(
    points: &[Point2],
    triangles: &mut [[usize; 3]],
    sliver_threshold: f64,
) -> PassOutcome {
    for i in 0..triangles.len() {
        let [a, b, c] = triangles[i];
        let angles = triangle_angles(&points[a], &points[b], &points[c]);
        if angles.iter().any(|x| x.is_nan()) {
            return PassOutcome::Degenerate { triangle: i };
        }
        let min_angle = min_of(&angles);
        if min_angle > sliver_threshold {
            continue;
        }

        // Rotate so that `p` holds the largest angle; `q -> r` is the long edge.
        let [aa, ab, ac] = angles;
        let (p, q, r) = if aa >= ab && aa >= ac {
            (a, b, c)
        } else if ab >= aa && ab >= ac {
            (b, c, a)
        } else {
            (c, a, b)
        };

        let Some((k, d)) = find_partner(triangles, i, r, q) else {
            continue;
        };

        let t0 = [p, q, d];
        let t1 = [d, r, p];
        if !is_left_turn(points, t0) || !is_left_turn(points, t1) {
            continue;
        }

        let [ka, kb, kc] = triangles[k];
        let partner = triangle_angles(&points[ka], &points[kb], &points[kc]);
        if partner.iter().any(|x| x.is_nan()) {
            continue;
        }
        let before = min_angle.min(min_of(&partner));

        let after = min_of(&triangle_angles(&points[t0[0]], &points[t0[1]], &points[t0[2]]))
            .min(min_of(&triangle_angles(
                &points[t1[0]],
                &points[t1[1]],
                &points[t1[2]],
            )));

        if after > before {
            triangles[k] = t0;
            triangles[i] = t1;
            return PassOutcome::Improved;
        }
    }
    PassOutcome::FixedPoint
}

fn min_of(angles: &[f64; 3]) -> f64 {
    angles[0].min(angles[1]).min(angles[2])
}

fn is_left_turn(points: &[Point2], t: [usize; 3]) -> bool {
    turn(&points[t[0]], &points[t[1]], &points[t[2]]) > 0.0
}

/// Finds a triangle other than `skip` with edge `u-v` in either direction.
///
/// Returns the triangle's position and its vertex opposite that edge.
fn find_partner(triangles: &[[usize; 3]], skip: usize, u: usize, v: usize) -> Option<(usize, usize)> {
    triangles
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != skip)
        .find_map(|(k, t)| {
            (0..3).find_map(|e| {
                let (s, f, apex) = (t[e], t[(e + 1) % 3], t[(e + 2) % 3]);
                ((s == u && f == v) || (s == v && f == u)).then_some((k, apex))
            })
        })
}

/// Summary of an optimizer run.
#[derive(Debug, Default)]
pub(crate) struct OptimizeSummary {
    pub passes: usize,
    pub swaps: usize,
    pub diagnostic: Option<Diagnostic>,
}

/// Repeats [`improve`] until a fixed point, a degeneracy, or the pass budget.
pub(crate) fn optimize(
    points: &[Point2],
    triangles: &mut [[usize; 3]],
    params: &TriangulationParams,
) -> OptimizeSummary {
    let mut summary = OptimizeSummary::default();
    for _ in 0..params.max_passes {
        summary.passes += 1;
        match improve(points, triangles, params.sliver_threshold) {
            PassOutcome::Improved => summary.swaps += 1,
            PassOutcome::FixedPoint => return summary,
            PassOutcome::Degenerate { triangle } => {
                warn!(triangle, "degenerate angle, optimization aborted");
                summary.diagnostic = Some(Diagnostic::AngleDegeneracy { triangle });
                return summary;
            }
        }
    }
    if params.max_passes > 0 {
        debug!(passes = summary.passes, "optimizer pass budget exhausted");
    }
    summary
}

/// Improves an existing triangulation without re-running ear clipping.
///
/// Swaps are only accepted when both new triangles turn left, so the input
/// triangles should share that winding.
#[derive(Debug)]
pub struct OptimizeTriangles<'a> {
    points: &'a [Point2],
    indices: &'a [usize],
    params: TriangulationParams,
}

impl<'a> OptimizeTriangles<'a> {
    /// Creates a new `OptimizeTriangles` operation over a flat triangle list.
    #[must_use]
    pub fn new(points: &'a [Point2], indices: &'a [usize]) -> Self {
        Self {
            points,
            indices,
            params: TriangulationParams::default(),
        }
    }

    /// Sets custom parameters.
    #[must_use]
    pub fn with_params(mut self, params: TriangulationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the optimization.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are malformed, the parameters are
    /// invalid, or the index list is not a list of in-range triples.
    pub fn execute(&self) -> Result<Triangulation> {
        validate_ring(self.points, 0)?;
        self.params.validate()?;
        let mut triangles = chunk_triangles(self.indices, self.points.len())?;

        let summary = optimize(self.points, &mut triangles, &self.params);
        debug!(
            triangles = triangles.len(),
            passes = summary.passes,
            swaps = summary.swaps,
            "optimization finished"
        );
        Ok(Triangulation {
            indices: flatten(&triangles),
            diagnostics: summary.diagnostic.into_iter().collect(),
            passes: summary.passes,
            swaps: summary.swaps,
        })
    }
}

fn chunk_triangles(indices: &[usize], point_count: usize) -> Result<Vec<[usize; 3]>> {
    if indices.len() % 3 != 0 {
        return Err(InputError::InvalidTriangles(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        ))
        .into());
    }
    if let Some(&bad) = indices.iter().find(|&&i| i >= point_count) {
        return Err(InputError::InvalidTriangles(format!(
            "index {bad} is out of range for {point_count} points"
        ))
        .into());
    }
    Ok(indices
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect())
}
