mod json;
mod svg;

pub use json::{parse_polygon, read_polygon};
pub use self::svg::{RenderSvg, SvgStyle};
