//! Point-in-polygon rasterization of the normalized world map onto a grid of
//! terminal half-cells.

use geojson::{FeatureCollection, Position, Value};

use crate::topology::feature_id_text;

/// Wide enough for the shifted antimeridian regions on either side.
pub const X_BOUNDS: [f64; 2] = [-200.0, 200.0];
/// Antarctica's interior is cut off.
pub const Y_BOUNDS: [f64; 2] = [-60.0, 85.0];

type Ring = Vec<(f64, f64)>;

/// One region's outline, ready for hit testing and drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    pub id: String,
    pub polygons: Vec<Vec<Ring>>,
    bbox: [f64; 4],
}

impl RegionShape {
    /// Regions from normalized features. Features without an id or without
    /// polygon geometry are skipped.
    pub fn from_features(collection: &FeatureCollection) -> Vec<Self> {
        collection
            .features
            .iter()
            .filter_map(|feature| {
                let id = feature_id_text(feature)?;
                let polygons = match &feature.geometry.as_ref()?.value {
                    Value::Polygon(rings) => vec![to_rings(rings)],
                    Value::MultiPolygon(polygons) => {
                        polygons.iter().map(|rings| to_rings(rings)).collect()
                    }
                    _ => return None,
                };
                Some(Self::new(id, polygons))
            })
            .collect()
    }

    pub fn new(id: String, polygons: Vec<Vec<Ring>>) -> Self {
        let mut bbox = [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY];
        for &(x, y) in polygons.iter().flatten().flatten() {
            bbox[0] = bbox[0].min(x);
            bbox[1] = bbox[1].min(y);
            bbox[2] = bbox[2].max(x);
            bbox[3] = bbox[3].max(y);
        }
        Self { id, polygons, bbox }
    }

    /// Even-odd test across each polygon's rings, so holes are excluded.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let [min_x, min_y, max_x, max_y] = self.bbox;
        if x < min_x || x > max_x || y < min_y || y > max_y {
            return false;
        }

        self.polygons.iter().any(|rings| {
            rings
                .iter()
                .filter(|ring| ring_contains(ring, x, y))
                .count()
                % 2
                == 1
        })
    }
}

fn to_rings(rings: &[Vec<Position>]) -> Vec<Ring> {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .filter_map(|position| Some((*position.first()?, *position.get(1)?)))
                .collect()
        })
        .collect()
}

fn ring_contains(ring: &[(f64, f64)], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut previous = match ring.last() {
        Some(&point) => point,
        None => return false,
    };

    for &(xi, yi) in ring {
        let (xj, yj) = previous;
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        previous = (xi, yi);
    }

    inside
}

/// Region under each half-cell of the canvas, sampled once per size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapRaster {
    width: u16,
    height: u16,
    samples: Vec<(f64, f64, usize)>,
}

impl MapRaster {
    pub fn build(shapes: &[RegionShape], width: u16, height: u16) -> Self {
        let columns = usize::from(width);
        let rows = usize::from(height) * 2;
        let [x0, x1] = X_BOUNDS;
        let [y0, y1] = Y_BOUNDS;

        let mut samples = Vec::new();
        for row in 0..rows {
            let y = y1 - (row as f64 + 0.5) / rows as f64 * (y1 - y0);
            for column in 0..columns {
                let x = x0 + (column as f64 + 0.5) / columns as f64 * (x1 - x0);
                if let Some(index) = shapes.iter().position(|shape| shape.contains(x, y)) {
                    samples.push((x, y, index));
                }
            }
        }

        Self {
            width,
            height,
            samples,
        }
    }

    pub const fn matches(&self, width: u16, height: u16) -> bool {
        self.width == width && self.height == height
    }

    /// `(x, y, shape index)` for every covered half-cell.
    pub fn samples(&self) -> &[(f64, f64, usize)] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology;

    fn square(id: &str, x: f64, y: f64, size: f64) -> RegionShape {
        RegionShape::new(
            id.to_string(),
            vec![vec![vec![
                (x, y),
                (x + size, y),
                (x + size, y + size),
                (x, y + size),
                (x, y),
            ]]],
        )
    }

    #[test]
    fn point_in_polygon() {
        let shape = square("528", 0.0, 0.0, 10.0);
        assert!(shape.contains(5.0, 5.0));
        assert!(!shape.contains(15.0, 5.0));
        assert!(!shape.contains(-1.0, -1.0));
    }

    #[test]
    fn holes_are_excluded() {
        let mut outer = square("528", 0.0, 0.0, 10.0);
        let hole = square("x", 4.0, 4.0, 2.0).polygons.remove(0).remove(0);
        outer.polygons[0].push(hole);
        assert!(!outer.contains(5.0, 5.0));
        assert!(outer.contains(1.0, 1.0));
    }

    #[test]
    fn shapes_come_from_decoded_features() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "528", "properties": {},
                 "geometry": {"type": "Polygon",
                              "coordinates": [[[3, 50], [7, 50], [7, 53], [3, 53], [3, 50]]]}},
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Point", "coordinates": [0, 0]}}
            ]
        }"#;
        let collection = topology::decode(body).unwrap();
        let shapes = RegionShape::from_features(&collection);

        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].id, "528");
        assert!(shapes[0].contains(5.0, 51.5));
    }

    #[test]
    fn raster_samples_land_inside_their_region() {
        let shapes = vec![square("643", 0.0, 0.0, 100.0)];
        let raster = MapRaster::build(&shapes, 40, 10);

        assert!(raster.matches(40, 10));
        assert!(!raster.samples().is_empty());
        assert!(raster
            .samples()
            .iter()
            .all(|&(x, y, index)| index == 0 && shapes[0].contains(x, y)));
    }
}
