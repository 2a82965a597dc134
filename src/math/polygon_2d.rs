use super::Point2;

/// Winding order of a ring.
///
/// Orientation follows the sign of [`signed_area`]: a negative area is
/// clockwise, a positive one counter-clockwise. In y-up coordinates a clockwise
/// ring in this convention turns left at its convex corners, which is the
/// winding the ear clipper expects for outer boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    /// Zero signed area (collinear or empty ring).
    Degenerate,
}

/// Signed area of an implicitly closed ring,
/// `0.5 * Σ (x_i + x_{i+1}) * (y_i - y_{i+1})`.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += (points[i].x + points[j].x) * (points[i].y - points[j].y);
    }
    sum * 0.5
}

/// Classifies the winding order of a ring.
#[must_use]
pub fn orientation(points: &[Point2]) -> Orientation {
    let area = signed_area(points);
    if area < 0.0 {
        Orientation::Clockwise
    } else if area > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Degenerate
    }
}

/// Reverses `ring` in place unless it is already clockwise.
///
/// Returns `true` if the ring was reversed. Afterwards `signed_area(ring) <= 0`.
pub fn force_clockwise(ring: &mut [Point2]) -> bool {
    if signed_area(ring) > 0.0 {
        ring.reverse();
        return true;
    }
    false
}

/// Reverses `ring` in place unless it is already counter-clockwise.
///
/// Returns `true` if the ring was reversed. Afterwards `signed_area(ring) >= 0`.
pub fn force_counter_clockwise(ring: &mut [Point2]) -> bool {
    if signed_area(ring) < 0.0 {
        ring.reverse();
        return true;
    }
    false
}

/// Index of the vertex with the smallest x; ties go to the first occurrence.
///
/// Returns `None` for an empty ring.
#[must_use]
pub fn leftmost_index(points: &[Point2]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, pt) in points.iter().enumerate() {
        match best {
            Some(b) if pt.x >= points[b].x => {}
            _ => best = Some(i),
        }
    }
    best
}
