mod bounding_box;
mod enclosing_circle;
mod hull;
mod metrics;
mod rotated_box;

pub use bounding_box::{Aabb, BoundingBox};
pub use enclosing_circle::{Circle, EnclosingCircle};
pub use hull::ConvexHull;
pub use metrics::{Metrics, PolygonMetrics};
pub use rotated_box::{MinAreaBox, RotatedBox};
