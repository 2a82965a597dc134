//! Ear clipping with smallest-angle ear selection.
//!
//! The polygon is held as a circular doubly-linked list stored in an arena:
//! node `i` wraps input point `i`, and `prev`/`next` are arena indices. Cutting
//! an ear only relinks its two neighbours, so ids stay stable and removed
//! nodes are simply no longer reachable from `head`.
//!
//! Convexity and ear status are cached per node and recomputed only for the
//! two neighbours of each cut ear.

use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::polygon::validate_ring;
use crate::math::vector_2d::{cross, turn, vertex_angle};
use crate::math::Point2;

use super::{flatten, Diagnostic, EarSelection, Triangulation};

/// A node of the vertex ring.
#[derive(Debug, Clone)]
struct Vertex {
    point: Point2,
    prev: usize,
    next: usize,
    is_convex: bool,
    is_ear: bool,
    /// Interior angle, meaningful only while `is_ear` holds.
    angle: f64,
}

/// Circular doubly-linked list of the not yet clipped vertices.
#[derive(Debug)]
struct VertexRing {
    vertices: Vec<Vertex>,
    head: usize,
    len: usize,
}

impl VertexRing {
    fn new(points: &[Point2]) -> Self {
        let n = points.len();
        let vertices = points
            .iter()
            .enumerate()
            .map(|(i, &point)| Vertex {
                point,
                prev: (i + n - 1) % n,
                next: (i + 1) % n,
                is_convex: false,
                is_ear: false,
                angle: 0.0,
            })
            .collect();
        let mut ring = Self {
            vertices,
            head: 0,
            len: n,
        };
        for i in 0..n {
            ring.update_convex(i);
        }
        for i in 0..n {
            ring.update_ear(i);
        }
        ring
    }

    /// Live node indices in traversal order, starting at `head`.
    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let mut current = self.head;
        (0..self.len).map(move |_| {
            let v = current;
            current = self.vertices[v].next;
            v
        })
    }

    fn corners(&self, v: usize) -> (Point2, Point2, Point2) {
        let node = &self.vertices[v];
        (
            self.vertices[node.prev].point,
            node.point,
            self.vertices[node.next].point,
        )
    }

    fn update_convex(&mut self, v: usize) {
        let (a, b, c) = self.corners(v);
        self.vertices[v].is_convex = turn(&a, &b, &c) > 0.0;
    }

    /// Requires the convexity of every live node to be current.
    fn update_ear(&mut self, v: usize) {
        let (a, b, c) = self.corners(v);
        let is_ear = self.vertices[v].is_convex && !self.blocks_ear(v, &a, &b, &c);
        let node = &mut self.vertices[v];
        node.is_ear = is_ear;
        if is_ear {
            node.angle = vertex_angle(&a, &b, &c);
        }
    }

    /// Returns `true` if a reflex vertex lies in the closed triangle `abc` cut at `v`.
    fn blocks_ear(&self, v: usize, a: &Point2, b: &Point2, c: &Point2) -> bool {
        let node = &self.vertices[v];
        self.iter().any(|j| {
            let other = &self.vertices[j];
            !other.is_convex
                && j != v
                && j != node.prev
                && j != node.next
                && point_in_triangle(&other.point, a, b, c)
        })
    }

    fn select_ear(&self, selection: EarSelection) -> Option<usize> {
        let mut ears = self.iter().filter(|&v| self.vertices[v].is_ear);
        match selection {
            EarSelection::First => ears.next(),
            EarSelection::SmallestAngle => ears.fold(None, |best, v| match best {
                Some(b) if self.vertices[b].angle <= self.vertices[v].angle => Some(b),
                _ => Some(v),
            }),
        }
    }

    /// Unlinks `v` and returns the triangle it formed with its neighbours.
    fn cut(&mut self, v: usize) -> [usize; 3] {
        let (prev, next) = (self.vertices[v].prev, self.vertices[v].next);
        self.vertices[prev].next = next;
        self.vertices[next].prev = prev;
        if self.head == v {
            self.head = next;
        }
        self.len -= 1;

        self.update_convex(prev);
        self.update_convex(next);
        self.update_ear(prev);
        self.update_ear(next);
        [prev, v, next]
    }
}

/// Closed point-in-triangle test for a left-turning triangle `abc`.
///
/// Points on an edge are inside; points coincident with a corner are not.
fn point_in_triangle(p: &Point2, a: &Point2, b: &Point2, c: &Point2) -> bool {
    let in_half_plane = |s: &Point2, e: &Point2| cross(&(p - s), &(e - s)) <= 0.0;
    in_half_plane(a, b) && in_half_plane(b, c) && in_half_plane(c, a) && p != a && p != b && p != c
}

/// Clips ears until `n - 2` triangles exist or no ear is left.
///
/// Returns the triangles produced and, on early exhaustion, a diagnostic.
pub(crate) fn clip_ears(
    points: &[Point2],
    selection: EarSelection,
) -> (Vec<[usize; 3]>, Option<Diagnostic>) {
    if points.len() <= 3 {
        return (vec![[0, 1, 2]], None);
    }

    let expected = points.len() - 2;
    let mut ring = VertexRing::new(points);
    let mut triangles = Vec::with_capacity(expected);

    for step in 0..expected {
        let ear = match ring.select_ear(selection) {
            Some(v) => v,
            // Any three remaining nodes close the polygon.
            None if step + 1 == expected => ring.head,
            None => {
                let produced = triangles.len();
                warn!(
                    produced,
                    expected,
                    remaining = ring.len,
                    "no ear left, polygon is probably degenerate"
                );
                return (triangles, Some(Diagnostic::Exhausted { produced, expected }));
            }
        };
        triangles.push(ring.cut(ear));
    }

    debug!(triangles = triangles.len(), "ear clipping finished");
    (triangles, None)
}

/// Triangulates a simple polygon by ear clipping, without optimization.
///
/// The ring must turn left at its convex corners (clockwise by
/// [`crate::math::polygon_2d::signed_area`]).
#[derive(Debug)]
pub struct EarClip<'a> {
    points: &'a [Point2],
    selection: EarSelection,
}

impl<'a> EarClip<'a> {
    /// Creates a new `EarClip` operation with smallest-angle ear selection.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            selection: EarSelection::default(),
        }
    }

    /// Sets the ear selection policy.
    #[must_use]
    pub fn with_selection(mut self, selection: EarSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Executes the ear clipping.
    ///
    /// Running out of ears is not an error: the partial triangle list is
    /// returned with a [`Diagnostic::Exhausted`] entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring has fewer than 3 points or a non-finite
    /// coordinate.
    pub fn execute(&self) -> Result<Triangulation> {
        validate_ring(self.points, 0)?;
        let (triangles, diagnostic) = clip_ears(self.points, self.selection);
        Ok(Triangulation {
            indices: flatten(&triangles),
            diagnostics: diagnostic.into_iter().collect(),
            ..Triangulation::default()
        })
    }
}
