use super::vector_2d::cross;
use super::Point2;

/// Bounded segment-segment intersection in 2D.
///
/// Solves `p0 + t * (p1 - p0) = q0 + s * (q1 - q0)` and returns `(t, s)` when
/// both parameters lie in `[0, 1]`. Endpoint contact counts as an
/// intersection. Parallel segments (zero determinant) never intersect, even
/// when they overlap.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn segment_intersect_2d(
    p0: &Point2,
    p1: &Point2,
    q0: &Point2,
    q1: &Point2,
) -> Option<(f64, f64)> {
    let d0 = p1 - p0;
    let d1 = q1 - q0;
    let det = cross(&d0, &d1);
    if det == 0.0 {
        return None;
    }

    let offset = q0 - p0;
    let t = cross(&offset, &d1) / det;
    let s = cross(&offset, &d0) / det;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&s) {
        Some((t, s))
    } else {
        None
    }
}
