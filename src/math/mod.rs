pub mod intersect_2d;
pub mod polygon_2d;
pub mod vector_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Tolerance for floating-point comparisons in tests and measurements.
pub const TOLERANCE: f64 = 1e-10;
