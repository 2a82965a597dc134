//! SVG rendering of a ring and its triangulation.

use svg::node::element::{Group, Path};
use svg::Document;

use crate::error::Result;
use crate::math::Point2;
use crate::query::BoundingBox;

/// Layout of the rendered document.
#[derive(Debug, Clone, Copy)]
pub struct SvgStyle {
    /// Size of the longer document side, in pixels.
    pub viewport: f64,
    /// Margin added around the bounding box, in drawing units.
    pub padding: f64,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            viewport: 600.0,
            padding: 2.0,
        }
    }
}

/// Renders a ring, and optionally its triangles, as an SVG document.
#[derive(Debug)]
pub struct RenderSvg<'a> {
    points: &'a [Point2],
    indices: Option<&'a [usize]>,
    style: SvgStyle,
}

impl<'a> RenderSvg<'a> {
    /// Creates a new `RenderSvg` operation for the outline only.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            indices: None,
            style: SvgStyle::default(),
        }
    }

    /// Adds the triangles to draw, as a flat index list.
    #[must_use]
    pub fn with_triangles(mut self, indices: &'a [usize]) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Sets a custom layout.
    #[must_use]
    pub fn with_style(mut self, style: SvgStyle) -> Self {
        self.style = style;
        self
    }

    /// Executes the rendering, returning the SVG text.
    ///
    /// Triangles referencing a point out of range are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no points to draw.
    pub fn execute(&self) -> Result<String> {
        let bounds = BoundingBox::new(self.points).execute()?;
        let (w, h) = (bounds.width(), bounds.height());
        let (width, height) = if w <= 0.0 || h <= 0.0 {
            (self.style.viewport, self.style.viewport)
        } else if w < h {
            (self.style.viewport * w / h, self.style.viewport)
        } else {
            (self.style.viewport, self.style.viewport * h / w)
        };
        let view = bounds.padded(self.style.padding);

        let outline = Path::new()
            .set("fill", "gainsboro")
            .set("stroke", "black")
            .set("stroke-width", 3)
            .set("vector-effect", "non-scaling-stroke")
            .set("d", closed_path(self.points));

        let mut document = Document::new()
            .set("version", "1.1")
            .set("width", width)
            .set("height", height)
            .set(
                "viewBox",
                (view.min.x, view.min.y, view.width(), view.height()),
            )
            .add(outline);

        if let Some(indices) = self.indices {
            let mut group = Group::new()
                .set("fill", "none")
                .set("stroke", "black")
                .set("stroke-width", 1);
            for tri in indices.chunks_exact(3) {
                let corners: Option<Vec<&Point2>> =
                    tri.iter().map(|&i| self.points.get(i)).collect();
                let Some(corners) = corners else {
                    continue;
                };
                group = group.add(
                    Path::new()
                        .set("vector-effect", "non-scaling-stroke")
                        .set("d", closed_path(corners)),
                );
            }
            document = document.add(group);
        }

        Ok(document.to_string())
    }
}

/// Closed path data at full `f64` precision.
fn closed_path<'p>(points: impl IntoIterator<Item = &'p Point2>) -> String {
    let mut data = String::new();
    for (i, p) in points.into_iter().enumerate() {
        let command = if i == 0 { "M" } else { " L" };
        data.push_str(&format!("{command}{} {}", p.x, p.y));
    }
    if !data.is_empty() {
        data.push_str(" z");
    }
    data
}
