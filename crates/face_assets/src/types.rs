use serde::{Deserialize, Serialize};
use geo_types::{Coord, LineString, Polygon};

pub type Point = Coord<f64>;

/// Four corners, canonically serialized as 8 numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "QuadRepr", from = "QuadRepr")]
pub struct Quad {
    pub corners: [Point; 4],
}

#[derive(Serialize, Deserialize)]
struct QuadRepr {
    coords: [f64; 8],
}

impl Quad {
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Corners clockwise from the top-left of an axis-aligned rectangle
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        let right = x + width;
        let bottom = y + height;
        Self::new([
            Coord { x, y },
            Coord { x: right, y },
            Coord { x: right, y: bottom },
            Coord { x, y: bottom },
        ])
    }

    /// The flat `x0, y0, .., x3, y3` form
    pub fn coords(&self) -> [f64; 8] {
        let mut coords = [0.0; 8];
        for (i, corner) in self.corners.iter().enumerate() {
            coords[2 * i] = corner.x;
            coords[2 * i + 1] = corner.y;
        }
        coords
    }

    /// Closed polygon through the corners, for consumers doing placement math
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.corners.to_vec()), vec![])
    }
}

impl From<Quad> for QuadRepr {
    fn from(quad: Quad) -> Self {
        Self { coords: quad.coords() }
    }
}

impl From<QuadRepr> for Quad {
    fn from(repr: QuadRepr) -> Self {
        let c = repr.coords;
        Quad::new([
            Coord { x: c[0], y: c[1] },
            Coord { x: c[2], y: c[3] },
            Coord { x: c[4], y: c[5] },
            Coord { x: c[6], y: c[7] },
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "CircleRepr", from = "CircleRepr")]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

#[derive(Serialize, Deserialize)]
struct CircleRepr {
    center: [f64; 2],
    radius: f64,
}

impl From<Circle> for CircleRepr {
    fn from(circle: Circle) -> Self {
        Self {
            center: [circle.center.x, circle.center.y],
            radius: circle.radius,
        }
    }
}

impl From<CircleRepr> for Circle {
    fn from(repr: CircleRepr) -> Self {
        Self {
            center: Coord { x: repr.center[0], y: repr.center[1] },
            radius: repr.radius,
        }
    }
}

/// Unreduced boundary, any number of points in authored order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "OutlineRepr", from = "OutlineRepr")]
pub struct Outline {
    pub points: Vec<Point>,
}

#[derive(Serialize, Deserialize)]
struct OutlineRepr {
    points: Vec<[f64; 2]>,
}

impl Outline {
    pub fn point_pairs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }
}

impl From<Outline> for OutlineRepr {
    fn from(outline: Outline) -> Self {
        Self { points: outline.point_pairs() }
    }
}

impl From<OutlineRepr> for Outline {
    fn from(repr: OutlineRepr) -> Self {
        Self {
            points: repr.points.into_iter().map(|[x, y]| Coord { x, y }).collect(),
        }
    }
}

/// Canonical geometry of one authoring shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    Quad(Quad),
    Circle(Circle),
    Outline(Outline),
}

impl Geometry {
    pub fn as_quad(&self) -> Option<&Quad> {
        match self {
            Geometry::Quad(quad) => Some(quad),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Geometry::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    pub fn as_outline(&self) -> Option<&Outline> {
        match self {
            Geometry::Outline(outline) => Some(outline),
            _ => None,
        }
    }
}

/// The two mutually exclusive ways a skull template describes the head
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum HeadShape {
    /// A single silhouette path
    Outline { outline: Outline },
    /// Three skeletal regions
    Skeletal {
        skull_cap: Geometry,
        cheek_bones: Geometry,
        mandible: Geometry,
    },
}

/// Anchor geometry of one skull template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkullGeometry {
    pub eyeball_left: Geometry,
    pub eyeball_right: Geometry,
    pub ear_left: Geometry,
    pub ear_right: Geometry,
    pub mouth: Geometry,
    pub nose: Geometry,
    pub hair: Geometry,
    #[serde(flatten)]
    pub head: HeadShape,
}
