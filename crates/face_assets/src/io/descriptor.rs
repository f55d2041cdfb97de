use serde_json::{Map, Value, json};

use crate::{
    error::Result,
    options::DescriptorFormat,
    types::{Geometry, HeadShape, SkullGeometry},
};

/// Geometry written next to (or instead of) a fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// The guide a feature is placed into
    Guide(Geometry),
    /// Anchor geometry of a skull template
    Skull(SkullGeometry),
}

impl Descriptor {
    pub fn to_json(&self, format: DescriptorFormat) -> Result<Value> {
        let value = match (format, self) {
            (DescriptorFormat::Tagged, Descriptor::Guide(geometry)) => serde_json::to_value(geometry)?,
            (DescriptorFormat::Tagged, Descriptor::Skull(skull)) => serde_json::to_value(skull)?,
            (DescriptorFormat::Legacy, Descriptor::Guide(geometry)) => legacy_guide(geometry),
            (DescriptorFormat::Legacy, Descriptor::Skull(skull)) => legacy_skull(skull),
        };
        Ok(value)
    }

    pub fn to_json_string(&self, format: DescriptorFormat) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json(format)?)?)
    }
}

/// 8 slots; circles fill the first three and pad with nulls
fn legacy_guide(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Quad(quad) => json!(quad.coords()),
        Geometry::Circle(circle) => json!([
            circle.center.x,
            circle.center.y,
            circle.radius,
            null,
            null,
            null,
            null,
            null
        ]),
        Geometry::Outline(outline) => json!(outline.point_pairs()),
    }
}

/// Circles as `[[cx, cy], r]`
fn legacy_component(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Circle(circle) => json!([[circle.center.x, circle.center.y], circle.radius]),
        other => legacy_guide(other),
    }
}

/// Flat map in the positional style of the old skull files.
///
/// Quad components are their 8 corner numbers; the old files stored
/// rectangles as `[x, y, w, h]`, which this does not reproduce.
fn legacy_skull(skull: &SkullGeometry) -> Value {
    let mut map = Map::new();
    let components = [
        ("eyeball_left", &skull.eyeball_left),
        ("eyeball_right", &skull.eyeball_right),
        ("ear_left", &skull.ear_left),
        ("ear_right", &skull.ear_right),
        ("mouth", &skull.mouth),
        ("nose", &skull.nose),
        ("hair", &skull.hair),
    ];
    for (name, geometry) in components {
        map.insert(name.to_string(), legacy_component(geometry));
    }

    match &skull.head {
        HeadShape::Outline { outline } => {
            map.insert("outline".to_string(), json!(outline.point_pairs()));
        }
        HeadShape::Skeletal { skull_cap, cheek_bones, mandible } => {
            map.insert("skull_cap".to_string(), legacy_component(skull_cap));
            map.insert("cheek_bones".to_string(), legacy_component(cheek_bones));
            map.insert("mandible".to_string(), legacy_component(mandible));
        }
    }

    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Circle, Outline, Quad};
    use geo_types::Coord;

    fn circle() -> Geometry {
        Geometry::Circle(Circle { center: Coord { x: 1.0, y: 2.0 }, radius: 3.0 })
    }

    fn skull() -> SkullGeometry {
        let quad = Geometry::Quad(Quad::from_rect(0.0, 0.0, 2.0, 1.0));
        SkullGeometry {
            eyeball_left: circle(),
            eyeball_right: circle(),
            ear_left: quad.clone(),
            ear_right: quad.clone(),
            mouth: quad.clone(),
            nose: quad.clone(),
            hair: quad,
            head: HeadShape::Outline {
                outline: Outline { points: vec![Coord { x: 0.0, y: 1.0 }, Coord { x: 2.0, y: 3.0 }] },
            },
        }
    }

    #[test]
    fn test_legacy_guide_pads_circles_with_nulls() {
        let value = Descriptor::Guide(circle())
            .to_json(DescriptorFormat::Legacy)
            .expect("Should serialize");
        assert_eq!(value, json!([1.0, 2.0, 3.0, null, null, null, null, null]));
    }

    #[test]
    fn test_legacy_guide_quad_is_flat() {
        let value = Descriptor::Guide(Geometry::Quad(Quad::from_rect(1.0, 1.0, 1.0, 1.0)))
            .to_json(DescriptorFormat::Legacy)
            .expect("Should serialize");
        assert_eq!(value, json!([1.0, 1.0, 2.0, 1.0, 2.0, 2.0, 1.0, 2.0]));
    }

    #[test]
    fn test_tagged_guide_names_its_kind() {
        let value = Descriptor::Guide(circle())
            .to_json(DescriptorFormat::Tagged)
            .expect("Should serialize");
        assert_eq!(value["kind"], "circle");
    }

    #[test]
    fn test_legacy_skull_nests_circles() {
        let value = Descriptor::Skull(skull())
            .to_json(DescriptorFormat::Legacy)
            .expect("Should serialize");
        assert_eq!(value["eyeball_left"], json!([[1.0, 2.0], 3.0]));
        assert_eq!(value["ear_left"], json!([0.0, 0.0, 2.0, 0.0, 2.0, 1.0, 0.0, 1.0]));
        assert_eq!(value["outline"], json!([[0.0, 1.0], [2.0, 3.0]]));
        assert!(value.get("schema").is_none());
    }

    #[test]
    fn test_legacy_rect_component_is_corners_not_extent() {
        let value = Descriptor::Skull(skull())
            .to_json(DescriptorFormat::Legacy)
            .expect("Should serialize");
        let ear = value["ear_left"].as_array().expect("Should be an array");
        assert_eq!(ear.len(), 8);
        assert_ne!(value["ear_left"], json!([0.0, 0.0, 2.0, 1.0]));
    }

    #[test]
    fn test_tagged_skull_has_schema() {
        let value = Descriptor::Skull(skull())
            .to_json(DescriptorFormat::Tagged)
            .expect("Should serialize");
        assert_eq!(value["schema"], "outline");
        assert_eq!(value["eyeball_right"]["kind"], "circle");
    }
}
