mod bridge_holes;
mod ear_clip;
mod optimize;
mod triangulate;

pub use bridge_holes::{BridgeHoles, BridgedRing};
pub use ear_clip::EarClip;
pub use optimize::{improve, OptimizeTriangles, PassOutcome};
pub use triangulate::Triangulate;

use std::f64::consts::FRAC_PI_4;

use thiserror::Error;

use crate::error::{InputError, Result};

/// How the ear clipper picks the next ear to cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EarSelection {
    /// Scan every ear and cut the one with the smallest interior angle.
    #[default]
    SmallestAngle,
    /// Cut the first ear found from the current head.
    First,
}

/// Parameters controlling triangulation and quality optimization.
#[derive(Debug, Clone, Copy)]
pub struct TriangulationParams {
    /// Triangles whose minimum angle (radians) exceeds this are not slivers.
    pub sliver_threshold: f64,
    /// Ear selection policy.
    pub ear_selection: EarSelection,
    /// Maximum number of optimizer passes. Zero disables optimization.
    pub max_passes: usize,
}

impl Default for TriangulationParams {
    fn default() -> Self {
        Self {
            sliver_threshold: FRAC_PI_4,
            ear_selection: EarSelection::SmallestAngle,
            max_passes: 9999,
        }
    }
}

impl TriangulationParams {
    /// Sets the sliver threshold in radians.
    #[must_use]
    pub fn with_sliver_threshold(mut self, sliver_threshold: f64) -> Self {
        self.sliver_threshold = sliver_threshold;
        self
    }

    /// Sets the ear selection policy.
    #[must_use]
    pub fn with_ear_selection(mut self, ear_selection: EarSelection) -> Self {
        self.ear_selection = ear_selection;
        self
    }

    /// Sets the optimizer pass budget.
    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Checks that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidParameters` if the sliver threshold is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.sliver_threshold.is_finite() || self.sliver_threshold < 0.0 {
            return Err(InputError::InvalidParameters(format!(
                "sliver threshold must be finite and non-negative, got {}",
                self.sliver_threshold
            ))
            .into());
        }
        Ok(())
    }
}

/// Non-fatal problems found while triangulating degenerate geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// No ear was left before the polygon was fully reduced.
    #[error("triangulation exhausted: produced {produced} of {expected} triangles")]
    Exhausted { produced: usize, expected: usize },

    /// A triangle had an undefined interior angle; optimization stopped.
    #[error("degenerate angle in triangle {triangle}, optimization aborted")]
    AngleDegeneracy { triangle: usize },

    /// No outer vertex was visible from a hole; the hole was left out.
    #[error("hole {hole} could not be bridged to the outer ring")]
    UnbridgeableHole { hole: usize },
}

/// Output of a triangulation or optimization run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    /// Flat vertex indices, one triple per triangle.
    pub indices: Vec<usize>,
    /// Problems encountered on the way; empty for a clean run.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of optimizer passes run.
    pub passes: usize,
    /// Number of diagonal swaps accepted by the optimizer.
    pub swaps: usize,
}

impl Triangulation {
    /// Returns the number of triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if there are no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.len() < 3
    }

    /// Iterates over the triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Returns `true` if the ear clipper produced every triangle.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::Exhausted { .. }))
    }
}

/// Flattens index triples into the flat output layout.
pub(crate) fn flatten(triangles: &[[usize; 3]]) -> Vec<usize> {
    triangles.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let params = TriangulationParams::default();
        assert!((params.sliver_threshold - FRAC_PI_4).abs() < f64::EPSILON);
        assert_eq!(params.ear_selection, EarSelection::SmallestAngle);
        assert_eq!(params.max_passes, 9999);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let negative = TriangulationParams::default().with_sliver_threshold(-0.1);
        assert!(negative.validate().is_err());
        let nan = TriangulationParams::default().with_sliver_threshold(f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn triangles_groups_triples() {
        let result = Triangulation {
            indices: vec![0, 1, 2, 0, 2, 3],
            ..Triangulation::default()
        };
        assert_eq!(result.len(), 2);
        let tris: Vec<_> = result.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
        assert!(result.is_complete());
    }

    #[test]
    fn exhaustion_marks_incomplete() {
        let result = Triangulation {
            diagnostics: vec![Diagnostic::Exhausted {
                produced: 1,
                expected: 3,
            }],
            ..Triangulation::default()
        };
        assert!(!result.is_complete());
        assert_eq!(
            result.diagnostics[0].to_string(),
            "triangulation exhausted: produced 1 of 3 triangles"
        );
    }

    #[test]
    fn flatten_keeps_order() {
        assert_eq!(flatten(&[[2, 0, 1], [3, 4, 5]]), vec![2, 0, 1, 3, 4, 5]);
    }
}
