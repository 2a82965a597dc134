//! Scalar and vector primitives of the 2D geometry kernel.

use super::{Point2, Vector2};

/// 2D cross product `u.x * v.y - v.x * u.y`.
///
/// Positive when `v` turns left from `u`, negative when it turns right.
#[must_use]
pub fn cross(u: &Vector2, v: &Vector2) -> f64 {
    u.x * v.y - v.x * u.y
}

/// Dot product of two vectors.
#[must_use]
pub fn dot(u: &Vector2, v: &Vector2) -> f64 {
    u.dot(v)
}

/// Euclidean length of a vector.
#[must_use]
pub fn norm(u: &Vector2) -> f64 {
    u.norm()
}

/// Cross product of the turn `a -> b -> c`, i.e. `cross(b - a, c - b)`.
#[must_use]
pub fn turn(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    cross(&(b - a), &(c - b))
}

/// Angle at `b` between the rays `b -> a` and `b -> c`, in `[0, π]`.
///
/// Returns NaN when either ray has zero length. The cosine is clamped into
/// `[-1, 1]` so rounding on nearly straight angles cannot produce NaN.
#[must_use]
pub fn vertex_angle(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let u = a - b;
    let v = c - b;
    let cs = dot(&u, &v) / (norm(&u) * norm(&v));
    cs.clamp(-1.0, 1.0).acos()
}

/// Interior angles of triangle `abc`, at `a`, `b` and `c` respectively.
#[must_use]
pub fn triangle_angles(a: &Point2, b: &Point2, c: &Point2) -> [f64; 3] {
    [
        vertex_angle(c, a, b),
        vertex_angle(a, b, c),
        vertex_angle(b, c, a),
    ]
}
