//! Decodes the boundary dataset into GeoJSON features.
//!
//! The public world atlas ships as TopoJSON: polygons reference shared,
//! delta-encoded arcs rather than carrying their own coordinates. Plain
//! GeoJSON is accepted as well so a self-hosted dataset can be used.

use std::collections::HashMap;

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Position, Value};
use serde::Deserialize;
use thiserror::Error;

/// Object holding the country polygons in the world atlas.
pub const COUNTRIES_OBJECT: &str = "countries";

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Topology has no object named {0:?}")]
    MissingObject(String),

    #[error("Arc index {0} is out of range")]
    ArcOutOfRange(i64),
}

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    #[serde(default)]
    arcs: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    objects: HashMap<String, TopoGeometry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum TopoGeometry {
    GeometryCollection {
        #[serde(default)]
        geometries: Vec<TopoGeometry>,
    },
    Polygon {
        arcs: Vec<Vec<i64>>,
        #[serde(default)]
        id: Option<serde_json::Value>,
        #[serde(default)]
        properties: Option<JsonObject>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i64>>>,
        #[serde(default)]
        id: Option<serde_json::Value>,
        #[serde(default)]
        properties: Option<JsonObject>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Deserialize)]
struct Kind {
    #[serde(rename = "type")]
    kind: String,
}

/// Decodes the `countries` object of a topology, or a GeoJSON document.
pub fn decode(body: &str) -> Result<FeatureCollection, TopologyError> {
    decode_object(body, COUNTRIES_OBJECT)
}

pub fn decode_object(body: &str, object: &str) -> Result<FeatureCollection, TopologyError> {
    let Kind { kind } = serde_json::from_str(body)?;
    if kind != "Topology" {
        return geojson_features(body.parse::<GeoJson>()?);
    }

    let topology: Topology = serde_json::from_str(body)?;
    let root = topology
        .objects
        .get(object)
        .ok_or_else(|| TopologyError::MissingObject(object.to_string()))?;

    let arcs = ArcTable::new(&topology.arcs, topology.transform);
    let mut features = Vec::new();
    collect_features(root, &arcs, &mut features)?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn geojson_features(geojson: GeoJson) -> Result<FeatureCollection, TopologyError> {
    Ok(match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(feature) => FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        },
        GeoJson::Geometry(geometry) => FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: None,
                foreign_members: None,
            }],
            foreign_members: None,
        },
    })
}

/// Absolute arc coordinates, dequantized once.
struct ArcTable {
    arcs: Vec<Vec<Position>>,
}

impl ArcTable {
    fn new(raw: &[Vec<Vec<f64>>], transform: Option<Transform>) -> Self {
        let arcs = raw
            .iter()
            .map(|arc| match transform {
                Some(transform) => {
                    let (mut x, mut y) = (0.0, 0.0);
                    arc.iter()
                        .filter(|point| point.len() >= 2)
                        .map(|point| {
                            x += point[0];
                            y += point[1];
                            vec![
                                x.mul_add(transform.scale[0], transform.translate[0]),
                                y.mul_add(transform.scale[1], transform.translate[1]),
                            ]
                        })
                        .collect()
                }
                None => arc.iter().filter(|point| point.len() >= 2).cloned().collect(),
            })
            .collect();

        Self { arcs }
    }

    /// Joins arcs into one ring. A negative index `!i` walks arc `i`
    /// backwards; the shared endpoint between consecutive arcs is kept once.
    fn ring(&self, indexes: &[i64]) -> Result<Vec<Position>, TopologyError> {
        let mut ring: Vec<Position> = Vec::new();

        for &index in indexes {
            let reversed = index < 0;
            let slot = if reversed { !index } else { index };
            let arc = usize::try_from(slot)
                .ok()
                .and_then(|slot| self.arcs.get(slot))
                .ok_or(TopologyError::ArcOutOfRange(index))?;

            if !ring.is_empty() {
                ring.pop();
            }
            if reversed {
                ring.extend(arc.iter().rev().cloned());
            } else {
                ring.extend(arc.iter().cloned());
            }
        }

        Ok(ring)
    }

    fn polygon(&self, rings: &[Vec<i64>]) -> Result<Vec<Vec<Position>>, TopologyError> {
        rings.iter().map(|ring| self.ring(ring)).collect()
    }
}

fn collect_features(
    geometry: &TopoGeometry,
    arcs: &ArcTable,
    features: &mut Vec<Feature>,
) -> Result<(), TopologyError> {
    match geometry {
        TopoGeometry::GeometryCollection { geometries } => {
            for child in geometries {
                collect_features(child, arcs, features)?;
            }
        }
        TopoGeometry::Polygon {
            arcs: rings,
            id,
            properties,
        } => {
            let value = Value::Polygon(arcs.polygon(rings)?);
            features.push(feature(value, id.as_ref(), properties.clone()));
        }
        TopoGeometry::MultiPolygon {
            arcs: polygons,
            id,
            properties,
        } => {
            let polygons = polygons
                .iter()
                .map(|rings| arcs.polygon(rings))
                .collect::<Result<Vec<_>, _>>()?;
            features.push(feature(
                Value::MultiPolygon(polygons),
                id.as_ref(),
                properties.clone(),
            ));
        }
        TopoGeometry::Unsupported => {}
    }

    Ok(())
}

fn feature(value: Value, id: Option<&serde_json::Value>, properties: Option<JsonObject>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: id.and_then(feature_id),
        properties,
        foreign_members: None,
    }
}

fn feature_id(id: &serde_json::Value) -> Option<Id> {
    match id {
        serde_json::Value::String(id) => Some(Id::String(id.clone())),
        serde_json::Value::Number(id) => Some(Id::Number(id.clone())),
        _ => None,
    }
}

/// Feature id as text, whether it was encoded as a string or a number.
pub fn feature_id_text(feature: &Feature) -> Option<String> {
    match feature.id.as_ref()? {
        Id::String(id) => Some(id.clone()),
        Id::Number(id) => Some(id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUANTIZED: &str = r#"{
        "type": "Topology",
        "transform": {"scale": [0.5, 0.5], "translate": [-10, 20]},
        "arcs": [
            [[0, 0], [4, 0], [0, 4]],
            [[4, 4], [-4, 0], [0, -4]]
        ],
        "objects": {
            "countries": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": "528", "properties": {"name": "Netherlands"}, "arcs": [[0, 1]]},
                    {"type": "MultiPolygon", "id": 56, "arcs": [[[-2, -1]]]},
                    {"type": "Point", "coordinates": [0, 0]}
                ]
            }
        }
    }"#;

    #[test]
    fn quantized_arcs_are_stitched_into_rings() {
        let collection = decode(QUANTIZED).unwrap();
        assert_eq!(collection.features.len(), 2);

        let netherlands = &collection.features[0];
        assert_eq!(feature_id_text(netherlands).as_deref(), Some("528"));
        let Some(Value::Polygon(rings)) = netherlands.geometry.as_ref().map(|g| &g.value) else {
            panic!("expected a polygon");
        };
        assert_eq!(
            rings[0],
            vec![
                vec![-10.0, 20.0],
                vec![-8.0, 20.0],
                vec![-8.0, 22.0],
                vec![-10.0, 22.0],
                vec![-10.0, 20.0],
            ]
        );
    }

    #[test]
    fn negative_indexes_walk_arcs_backwards() {
        let collection = decode(QUANTIZED).unwrap();
        let belgium = &collection.features[1];
        assert_eq!(feature_id_text(belgium).as_deref(), Some("56"));

        let Some(Value::MultiPolygon(polygons)) = belgium.geometry.as_ref().map(|g| &g.value)
        else {
            panic!("expected a multipolygon");
        };
        assert_eq!(
            polygons[0][0],
            vec![
                vec![-10.0, 20.0],
                vec![-10.0, 22.0],
                vec![-8.0, 22.0],
                vec![-8.0, 20.0],
                vec![-10.0, 20.0],
            ]
        );
    }

    #[test]
    fn unquantized_arcs_are_absolute() {
        let body = r#"{
            "type": "Topology",
            "arcs": [[[170, 10], [-170, 10], [-170, 20], [170, 10]]],
            "objects": {"land": {"type": "Polygon", "id": "242", "arcs": [[0]]}}
        }"#;

        let collection = decode_object(body, "land").unwrap();
        let Some(Value::Polygon(rings)) = collection.features[0].geometry.as_ref().map(|g| &g.value)
        else {
            panic!("expected a polygon");
        };
        assert_eq!(rings[0][1], vec![-170.0, 10.0]);
    }

    #[test]
    fn plain_geojson_is_accepted() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "840",
                "properties": null,
                "geometry": {"type": "Polygon", "coordinates": [[[170, 10], [171, 10], [171, 11], [170, 10]]]}
            }]
        }"#;

        let collection = decode(body).unwrap();
        assert_eq!(feature_id_text(&collection.features[0]).as_deref(), Some("840"));
    }

    #[test]
    fn missing_object_and_bad_arcs_are_errors() {
        let missing = r#"{"type": "Topology", "arcs": [], "objects": {}}"#;
        assert!(matches!(decode(missing), Err(TopologyError::MissingObject(_))));

        let bad_arc = r#"{
            "type": "Topology",
            "arcs": [],
            "objects": {"countries": {"type": "Polygon", "arcs": [[3]]}}
        }"#;
        assert!(matches!(decode(bad_arc), Err(TopologyError::ArcOutOfRange(3))));

        assert!(matches!(decode("[]"), Err(TopologyError::Json(_))));
    }
}
