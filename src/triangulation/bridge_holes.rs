//! Merges hole rings into the outer ring through bridge edges.
//!
//! Holes are processed left to right by their leftmost vertex. For each hole,
//! outer vertices at or left of that vertex are tried in order of increasing
//! distance; the first one whose connecting segment crosses no outer edge
//! becomes the bridge bank. Holes already merged count as outer edges, but
//! holes not yet merged are ignored, so visibility is approximate.

use tracing::{debug, warn};

use crate::math::intersect_2d::segment_intersect_2d;
use crate::math::polygon_2d::leftmost_index;
use crate::math::Point2;

use super::Diagnostic;

/// The outer ring with holes spliced in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgedRing {
    /// Single ring ready for ear clipping.
    pub ring: Vec<Point2>,
    /// One [`Diagnostic::UnbridgeableHole`] per hole that was left out.
    pub diagnostics: Vec<Diagnostic>,
}

/// Bridges hole rings into an outer ring.
///
/// The outer ring and the holes must have opposite winding: typically the
/// outer ring clockwise and the holes counter-clockwise (see
/// [`crate::math::polygon_2d::force_clockwise`]). Each bridged hole adds
/// `hole.len() + 2` points: the hole loop closed on its leftmost vertex, and a
/// second copy of the bank vertex.
#[derive(Debug)]
pub struct BridgeHoles {
    outer: Vec<Point2>,
    holes: Vec<Vec<Point2>>,
}

impl BridgeHoles {
    /// Creates a new `BridgeHoles` operation.
    #[must_use]
    pub fn new(outer: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Self {
        Self { outer, holes }
    }

    /// Executes the bridging, consuming the operation.
    ///
    /// A hole with no visible outer vertex is skipped and reported as a
    /// diagnostic; its vertices do not appear in the result.
    #[must_use]
    pub fn execute(self) -> BridgedRing {
        let Self { mut outer, holes } = self;
        let mut diagnostics = Vec::new();

        let mut order = Vec::with_capacity(holes.len());
        for (hole, ring) in holes.iter().enumerate() {
            match leftmost_index(ring) {
                Some(left) => order.push((hole, left)),
                None => {
                    warn!(hole, "empty hole left unbridged");
                    diagnostics.push(Diagnostic::UnbridgeableHole { hole });
                }
            }
        }
        order.sort_by(|&(ha, la), &(hb, lb)| holes[ha][la].x.total_cmp(&holes[hb][lb].x));

        for (hole, left) in order {
            let ring = &holes[hole];
            match find_bank(&outer, &ring[left]) {
                Some(bank) => {
                    debug!(hole, bank, "bridging hole");
                    splice_hole(&mut outer, bank, ring, left);
                }
                None => {
                    warn!(hole, "no visible outer vertex, hole left unbridged");
                    diagnostics.push(Diagnostic::UnbridgeableHole { hole });
                }
            }
        }

        BridgedRing {
            ring: outer,
            diagnostics,
        }
    }
}

/// Closest outer vertex at or left of `left` that `left` can see.
fn find_bank(outer: &[Point2], left: &Point2) -> Option<usize> {
    let mut candidates: Vec<(usize, f64)> = outer
        .iter()
        .enumerate()
        .filter(|(_, p)| p.x <= left.x)
        .map(|(i, p)| (i, (p - left).norm_squared()))
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

    candidates
        .into_iter()
        .map(|(i, _)| i)
        .find(|&bank| is_visible(outer, left, bank))
}

/// Returns `true` if segment `left -> outer[bank]` crosses no outer edge
/// other than the two edges incident to `bank`.
fn is_visible(outer: &[Point2], left: &Point2, bank: usize) -> bool {
    let n = outer.len();
    (0..n)
        .filter(|&k| k != bank && (k + 1) % n != bank)
        .all(|k| segment_intersect_2d(left, &outer[bank], &outer[k], &outer[(k + 1) % n]).is_none())
}

/// Inserts the hole loop after `bank`: the hole from its leftmost vertex
/// around and back to it, then a copy of the bank vertex.
fn splice_hole(outer: &mut Vec<Point2>, bank: usize, hole: &[Point2], left: usize) {
    let bank_point = outer[bank];
    let loop_points = hole[left..]
        .iter()
        .chain(&hole[..left])
        .chain(std::iter::once(&hole[left]))
        .copied()
        .chain(std::iter::once(bank_point));
    outer.splice(bank + 1..bank + 1, loop_points);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::{force_clockwise, force_counter_clockwise, signed_area};
    use approx::assert_abs_diff_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ]
    }

    fn oriented(outer: Vec<Point2>, holes: Vec<Vec<Point2>>) -> BridgeHoles {
        let mut outer = outer;
        let mut holes = holes;
        force_clockwise(&mut outer);
        for hole in &mut holes {
            force_counter_clockwise(hole);
        }
        BridgeHoles::new(outer, holes)
    }

    #[test]
    fn no_holes_leaves_outer_untouched() {
        let bridged = BridgeHoles::new(rect(0.0, 0.0, 1.0, 1.0), Vec::new()).execute();
        assert_eq!(bridged.ring, rect(0.0, 0.0, 1.0, 1.0));
        assert!(bridged.diagnostics.is_empty());
    }

    #[test]
    fn square_hole_is_spliced_after_nearest_bank() {
        let bridged = oriented(rect(0.0, 0.0, 10.0, 10.0), vec![rect(3.0, 3.0, 7.0, 7.0)]).execute();
        let ring = &bridged.ring;
        assert_eq!(ring.len(), 10);
        assert_eq!(ring[3], Point2::new(0.0, 10.0));
        assert_eq!(ring[4], Point2::new(3.0, 7.0));
        assert_eq!(ring[8], Point2::new(3.0, 7.0));
        assert_eq!(ring[9], Point2::new(0.0, 10.0));
        assert_abs_diff_eq!(signed_area(ring), -84.0, epsilon = 1e-9);
        assert!(bridged.diagnostics.is_empty());
    }

    #[test]
    fn holes_are_bridged_left_to_right() {
        let right = rect(12.0, 3.0, 16.0, 7.0);
        let left = rect(2.0, 3.0, 6.0, 7.0);
        let bridged = oriented(rect(0.0, 0.0, 20.0, 10.0), vec![right, left]).execute();
        let ring = &bridged.ring;
        assert_eq!(ring.len(), 16);
        // Left hole bridges to the outer corner, right hole to the left hole.
        assert_eq!(ring[4], Point2::new(2.0, 7.0));
        assert_eq!(ring[5], Point2::new(6.0, 7.0));
        assert_eq!(ring[6], Point2::new(12.0, 7.0));
        assert_eq!(ring[11], Point2::new(6.0, 7.0));
        assert_abs_diff_eq!(signed_area(ring), -168.0, epsilon = 1e-9);
    }

    #[test]
    fn hole_without_visible_bank_is_skipped() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let bridged =
            oriented(rect(0.0, 0.0, 10.0, 10.0), vec![rect(-10.0, 0.0, -6.0, 4.0)]).execute();
        assert_eq!(bridged.ring.len(), 4);
        assert_eq!(
            bridged.diagnostics,
            vec![Diagnostic::UnbridgeableHole { hole: 0 }]
        );
    }

    #[test]
    fn blocked_candidate_is_passed_over() {
        // A slot cut down from the top edge; vertex 6 sits on the far wall of
        // the slot, nearest to the hole but hidden behind the near wall.
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(4.5, 10.0),
            Point2::new(4.5, 2.0),
            Point2::new(4.0, 2.0),
            Point2::new(4.0, 5.0),
            Point2::new(4.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let left = Point2::new(5.0, 5.0);
        assert!(!is_visible(&outer, &left, 6));
        assert_eq!(find_bank(&outer, &left), Some(4));
    }
}
