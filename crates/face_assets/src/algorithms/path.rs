use geo_types::Coord;
use svgtypes::{PathParser, PathSegment};

use crate::types::Point;

/// Start point of every segment in SVG path data, in order.
///
/// A moveto contributes its own target, a closepath the point it closes
/// from. Curves contribute only where they begin; control points are
/// dropped, so the result is exact only for straight-edged paths.
pub fn segment_start_points(data: &str) -> Result<Vec<Point>, svgtypes::Error> {
    let mut points = Vec::new();
    let mut current = Coord { x: 0.0, y: 0.0 };
    let mut subpath_start = current;

    for segment in PathParser::from(data) {
        let segment = segment?;

        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let target = resolve(current, abs, x, y);
                points.push(target);
                current = target;
                subpath_start = target;
            }
            PathSegment::ClosePath { .. } => {
                points.push(current);
                current = subpath_start;
            }
            PathSegment::LineTo { abs, x, y }
            | PathSegment::CurveTo { abs, x, y, .. }
            | PathSegment::SmoothCurveTo { abs, x, y, .. }
            | PathSegment::Quadratic { abs, x, y, .. }
            | PathSegment::SmoothQuadratic { abs, x, y }
            | PathSegment::EllipticalArc { abs, x, y, .. } => {
                points.push(current);
                current = resolve(current, abs, x, y);
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                points.push(current);
                current.x = if abs { x } else { current.x + x };
            }
            PathSegment::VerticalLineTo { abs, y } => {
                points.push(current);
                current.y = if abs { y } else { current.y + y };
            }
        }
    }

    Ok(points)
}

fn resolve(current: Point, abs: bool, x: f64, y: f64) -> Point {
    if abs {
        Coord { x, y }
    } else {
        Coord { x: current.x + x, y: current.y + y }
    }
}
