use serde::Serialize;

use crate::error::{GeometryError, InputError, IoError, Result};
use crate::math::polygon_2d::signed_area;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Aabb, BoundingBox, Circle, ConvexHull, EnclosingCircle, MinAreaBox, RotatedBox};

/// Measurements of a triangulated polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Area-weighted centroid of the triangles.
    pub centroid: Point2,
    /// Total area covered by the triangles.
    pub area: f64,
    /// Bounding box of all points.
    pub bounds: Aabb,
    /// Minimum-area enclosing rectangle of all points.
    pub rotated_box: RotatedBox,
    /// Smallest enclosing circle of all points.
    pub bounding_circle: Circle,
    /// Convex hull as indices into the points.
    pub hull: Vec<usize>,
}

/// Flat JSON layout of [`Metrics`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsJson<'a> {
    centroid: [f64; 2],
    area: f64,
    bounds: [f64; 4],
    rotated_bounding_box: RotatedBoxJson,
    bounding_circle: CircleJson,
    hull: &'a [usize],
}

#[derive(Serialize)]
struct RotatedBoxJson {
    center: [f64; 2],
    size: [f64; 2],
    /// Degrees, as used by an SVG `rotate()` transform.
    angle: f64,
}

#[derive(Serialize)]
struct CircleJson {
    center: [f64; 2],
    radius: f64,
}

impl Metrics {
    /// Serializes to a flat JSON object.
    ///
    /// The keys are `centroid` (`[cx, cy]`), `area`, `bounds`
    /// (`[xmin, ymin, xmax, ymax]`), `rotatedBoundingBox` (`center`, `size`,
    /// `angle` in degrees), `boundingCircle` (`center`, `radius`) and `hull`.
    ///
    /// # Errors
    ///
    /// Returns `IoError::Parse` if a value cannot be represented in JSON.
    pub fn to_json(&self) -> Result<String> {
        let json = MetricsJson {
            centroid: [self.centroid.x, self.centroid.y],
            area: self.area,
            bounds: [
                self.bounds.min.x,
                self.bounds.min.y,
                self.bounds.max.x,
                self.bounds.max.y,
            ],
            rotated_bounding_box: RotatedBoxJson {
                center: [self.rotated_box.center.x, self.rotated_box.center.y],
                size: self.rotated_box.size,
                angle: self.rotated_box.angle.to_degrees(),
            },
            bounding_circle: CircleJson {
                center: [self.bounding_circle.center.x, self.bounding_circle.center.y],
                radius: self.bounding_circle.radius,
            },
            hull: &self.hull,
        };
        serde_json::to_string(&json).map_err(|e| IoError::Parse(e).into())
    }
}

/// Computes area, centroid and enclosing shapes of a triangulation.
///
/// Triangle areas use the standard orientation, so triangles produced by the
/// ear clipper count as positive. Bounds, hull, circle and rotated box cover
/// every point, used by a triangle or not.
#[derive(Debug)]
pub struct PolygonMetrics<'a> {
    points: &'a [Point2],
    indices: &'a [usize],
}

impl<'a> PolygonMetrics<'a> {
    /// Creates a new `PolygonMetrics` query.
    #[must_use]
    pub fn new(points: &'a [Point2], indices: &'a [usize]) -> Self {
        Self { points, indices }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidTriangles` for a malformed index list and
    /// `GeometryError::Degenerate` if the triangles cover no area relative to
    /// the bounding box.
    pub fn execute(&self) -> Result<Metrics> {
        if self.indices.len() % 3 != 0 {
            return Err(InputError::InvalidTriangles(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            ))
            .into());
        }
        let bounds = BoundingBox::new(self.points).execute()?;

        let mut area = 0.0;
        let mut moment = Vector2::zeros();
        for tri in self.indices.chunks_exact(3) {
            let corners = self.triangle(tri)?;
            let tri_area = -signed_area(&corners);
            let center = (corners[0].coords + corners[1].coords + corners[2].coords) / 3.0;
            area += tri_area;
            moment += center * tri_area;
        }

        let centroid = Point2::from(moment / area);
        if area.abs() <= TOLERANCE * bounds.width() * bounds.height()
            || !centroid.coords.iter().all(|c| c.is_finite())
        {
            return Err(GeometryError::Degenerate(format!(
                "triangles cover zero area ({} triangles)",
                self.indices.len() / 3
            ))
            .into());
        }

        Ok(Metrics {
            centroid,
            area,
            bounds,
            rotated_box: MinAreaBox::new(self.points).execute()?,
            bounding_circle: EnclosingCircle::new(self.points).execute()?,
            hull: ConvexHull::new(self.points).execute()?,
        })
    }

    fn triangle(&self, tri: &[usize]) -> Result<[Point2; 3]> {
        let lookup = |i: usize| {
            self.points.get(i).copied().ok_or_else(|| {
                InputError::InvalidTriangles(format!(
                    "index {i} is out of range for {} points",
                    self.points.len()
                ))
            })
        };
        Ok([lookup(tri[0])?, lookup(tri[1])?, lookup(tri[2])?])
    }
}
