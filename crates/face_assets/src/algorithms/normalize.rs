use std::str::FromStr;

use geo_types::Coord;
use tracing::trace;

use crate::{
    algorithms::path::segment_start_points,
    drawing::{Element, SVG_NS},
    error::{MalformedAsset, Result},
    traits::ShapeNormalizer,
    types::{Circle, Geometry, Outline, Point, Quad},
};

const QUAD_CORNERS: usize = 4;

/// Authoring primitives the normalizers understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Circle,
    Path,
}

impl ShapeKind {
    pub fn of(element: &Element) -> Result<Self> {
        let kind = if element.name.is(SVG_NS, "rect") {
            ShapeKind::Rect
        } else if element.name.is(SVG_NS, "circle") {
            ShapeKind::Circle
        } else if element.name.is(SVG_NS, "path") {
            ShapeKind::Path
        } else {
            return Err(unsupported(element));
        };
        Ok(kind)
    }
}

fn unsupported(element: &Element) -> crate::error::AssetError {
    MalformedAsset::UnsupportedShape {
        label: element.display_name(),
        tag: element.name.qualified(),
    }
    .into()
}

/// Reads a numeric presentation attribute, `default` when absent
fn number(element: &Element, attribute: &str, default: Option<f64>) -> Result<f64> {
    match element.attr(attribute) {
        Some(value) => svgtypes::Number::from_str(value)
            .map(|n| n.0)
            .map_err(|_| {
                MalformedAsset::InvalidNumber {
                    label: element.display_name(),
                    attribute: attribute.to_string(),
                    value: value.to_string(),
                }
                .into()
            }),
        None => default.ok_or_else(|| {
            MalformedAsset::MissingAttribute {
                label: element.display_name(),
                attribute: attribute.to_string(),
            }
            .into()
        }),
    }
}

pub fn rect_to_quad(element: &Element) -> Result<Quad> {
    let x = number(element, "x", Some(0.0))?;
    let y = number(element, "y", Some(0.0))?;
    let width = number(element, "width", None)?;
    let height = number(element, "height", None)?;
    Ok(Quad::from_rect(x, y, width, height))
}

pub fn circle_geometry(element: &Element) -> Result<Circle> {
    Ok(Circle {
        center: Coord {
            x: number(element, "cx", Some(0.0))?,
            y: number(element, "cy", Some(0.0))?,
        },
        radius: number(element, "r", None)?,
    })
}

pub fn path_points(element: &Element) -> Result<Vec<Point>> {
    let data = element.attr("d").ok_or_else(|| MalformedAsset::MissingAttribute {
        label: element.display_name(),
        attribute: "d".to_string(),
    })?;
    segment_start_points(data).map_err(|e| {
        MalformedAsset::InvalidPathData {
            label: element.display_name(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Four authored corners of a path. A leading moveto that the closing
/// segment repeats is dropped; anything but 4 remaining points is malformed.
pub fn path_to_quad(element: &Element) -> Result<Quad> {
    let mut points = path_points(element)?;
    if points.len() == QUAD_CORNERS + 1 {
        points.remove(0);
    }
    let corners: [Point; QUAD_CORNERS] = points.try_into().map_err(|points: Vec<Point>| {
        MalformedAsset::PointCount {
            label: element.display_name(),
            expected: QUAD_CORNERS,
            found: points.len(),
        }
    })?;
    Ok(Quad::new(corners))
}

/// Rectangles and paths become quads, circles pass through
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadNormalizer;

impl ShapeNormalizer for QuadNormalizer {
    fn normalize(&self, element: &Element) -> Result<Geometry> {
        let geometry = match ShapeKind::of(element)? {
            ShapeKind::Rect => Geometry::Quad(rect_to_quad(element)?),
            ShapeKind::Circle => Geometry::Circle(circle_geometry(element)?),
            ShapeKind::Path => Geometry::Quad(path_to_quad(element)?),
        };
        trace!("Normalized '{}' to {:?}", element.display_name(), geometry);
        Ok(geometry)
    }
}

/// Paths keep every decoded point
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineNormalizer;

impl ShapeNormalizer for OutlineNormalizer {
    fn normalize(&self, element: &Element) -> Result<Geometry> {
        match ShapeKind::of(element)? {
            ShapeKind::Path => Ok(Geometry::Outline(Outline {
                points: path_points(element)?,
            })),
            _ => Err(unsupported(element)),
        }
    }
}
