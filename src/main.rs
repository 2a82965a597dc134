use std::io::{self, Read};

use earmesh::io::{parse_polygon, read_polygon, RenderSvg};
use earmesh::math::polygon_2d::orientation;
use earmesh::query::PolygonMetrics;
use earmesh::triangulation::Triangulate;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: earmesh <polygon.json|-> [--svg <out.svg>]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let source = args.next().ok_or(USAGE)?;
    let svg_out = match (args.next().as_deref(), args.next()) {
        (None, _) => None,
        (Some("--svg"), Some(path)) => Some(path),
        _ => return Err(USAGE.into()),
    };

    let polygon = if source == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        parse_polygon(&text)?
    } else {
        read_polygon(&source)?
    };
    info!(
        outer = polygon.outer.len(),
        holes = polygon.holes.len(),
        orientation = ?orientation(&polygon.outer),
        "polygon loaded"
    );

    let bridged = polygon.into_ring()?;
    let result = Triangulate::new(&bridged.ring).execute()?;
    info!(
        triangles = result.len(),
        complete = result.is_complete(),
        "triangulated"
    );

    let metrics = PolygonMetrics::new(&bridged.ring, &result.indices).execute()?;
    println!("{}", metrics.to_json()?);

    if let Some(path) = svg_out {
        let svg = RenderSvg::new(&bridged.ring)
            .with_triangles(&result.indices)
            .execute()?;
        std::fs::write(&path, svg)?;
        info!(path = %path, "svg written");
    }

    Ok(())
}
