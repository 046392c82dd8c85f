//! Per-region figures and styling for the world map.

use geojson::{Feature, FeatureCollection, Position, Value};
use serde::Serialize;

use crate::aggregate::{users_label, Aggregate};
use crate::color::Rgba;
use crate::regions;
use crate::topology::feature_id_text;

/// Regions drawn east of the antimeridian: Russia, Fiji, Antarctica.
pub const SHIFT_EAST_IDS: &[&str] = &["643", "242", "010"];

/// Regions drawn west of the antimeridian: the United States.
pub const SHIFT_WEST_IDS: &[&str] = &["840"];

/// Fill tiers by share of the busiest region, checked top-down.
pub const COLOR_TIERS: &[(f64, Rgba)] = &[
    (0.8, Rgba::opaque(0x99, 0x1b, 0x1b)),
    (0.6, Rgba::opaque(0xb9, 0x1c, 0x1c)),
    (0.4, Rgba::opaque(0xdc, 0x26, 0x26)),
    (0.2, Rgba::opaque(0xef, 0x44, 0x44)),
    (0.05, Rgba::opaque(0xf8, 0x71, 0x71)),
];

/// Fill for regions with users below every tier.
pub const FLOOR_COLOR: Rgba = Rgba::opaque(0xfc, 0xa5, 0xa5);

/// Fill for regions without users.
pub const ZERO_COLOR: Rgba = Rgba::with_alpha(255, 255, 255, 0.03);

pub const STROKE_COLOR: Rgba = Rgba::with_alpha(255, 255, 255, 0.12);
pub const HOVER_STROKE_COLOR: Rgba = Rgba::opaque(0x0e, 0xa5, 0xe9);

pub fn color_for(count: u64, max_count: u64) -> Rgba {
    if count == 0 {
        return ZERO_COLOR;
    }

    let ratio = count as f64 / max_count.max(1) as f64;
    COLOR_TIERS
        .iter()
        .find(|(threshold, _)| ratio > *threshold)
        .map_or(FLOOR_COLOR, |(_, color)| *color)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    East,
    West,
}

fn shift_for(numeric_id: &str) -> Option<Shift> {
    if SHIFT_EAST_IDS.contains(&numeric_id) {
        Some(Shift::East)
    } else if SHIFT_WEST_IDS.contains(&numeric_id) {
        Some(Shift::West)
    } else {
        None
    }
}

/// Moves every ring of the regions that straddle the antimeridian onto one
/// side of it, so each is drawn as a single shape. Run once before drawing.
pub fn normalize(collection: &mut FeatureCollection) {
    for feature in &mut collection.features {
        normalize_feature(feature);
    }
}

pub fn normalize_feature(feature: &mut Feature) {
    let Some(shift) = feature_id_text(feature).as_deref().and_then(shift_for) else {
        return;
    };
    let Some(geometry) = feature.geometry.as_mut() else {
        return;
    };

    match &mut geometry.value {
        Value::Polygon(rings) => shift_positions(rings.iter_mut().flatten(), shift),
        Value::MultiPolygon(polygons) => {
            shift_positions(polygons.iter_mut().flatten().flatten(), shift);
        }
        _ => {}
    }
}

fn shift_positions<'a>(positions: impl Iterator<Item = &'a mut Position>, shift: Shift) {
    for position in positions {
        let Some(longitude) = position.first_mut() else {
            continue;
        };
        match shift {
            Shift::East if *longitude < 0.0 => *longitude += 360.0,
            Shift::West if *longitude > 0.0 => *longitude -= 360.0,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStyle {
    pub fill_color: Rgba,
    pub fill_opacity: f64,
    pub weight: f64,
    pub color: Rgba,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub flag: String,
    pub name: String,
    pub count: u64,
    pub users_label: String,
}

/// Map-facing view over the chosen day's counts.
#[derive(Debug, Clone)]
pub struct Choropleth<'a> {
    aggregate: &'a Aggregate,
    max_count: u64,
}

impl<'a> Choropleth<'a> {
    pub fn new(aggregate: &'a Aggregate) -> Self {
        let max_count = aggregate.countries.values().copied().max().unwrap_or(0).max(1);
        Self {
            aggregate,
            max_count,
        }
    }

    pub const fn max_count(&self) -> u64 {
        self.max_count
    }

    pub fn count_for(&self, numeric_id: &str) -> u64 {
        regions::to_code(numeric_id)
            .and_then(|code| self.aggregate.countries.get(code))
            .copied()
            .unwrap_or(0)
    }

    pub fn name_for(&self, numeric_id: &str) -> &'static str {
        regions::to_code(numeric_id).map_or(regions::UNKNOWN_NAME, regions::display_name)
    }

    pub fn flag_for(&self, numeric_id: &str) -> String {
        regions::to_code(numeric_id).map_or_else(
            || regions::UNKNOWN_GLYPH.to_string(),
            regions::flag_glyph,
        )
    }

    pub fn color_for(&self, numeric_id: &str) -> Rgba {
        color_for(self.count_for(numeric_id), self.max_count)
    }

    pub fn style_for(&self, numeric_id: &str) -> RegionStyle {
        let count = self.count_for(numeric_id);
        RegionStyle {
            fill_color: color_for(count, self.max_count),
            fill_opacity: if count > 0 { 0.85 } else { 0.15 },
            weight: 0.5,
            color: STROKE_COLOR,
            opacity: 1.0,
        }
    }

    pub fn hover_style_for(&self, numeric_id: &str) -> RegionStyle {
        RegionStyle {
            weight: 2.0,
            color: HOVER_STROKE_COLOR,
            fill_opacity: 0.95,
            ..self.style_for(numeric_id)
        }
    }

    pub fn tooltip_for(&self, numeric_id: &str) -> Tooltip {
        let count = self.count_for(numeric_id);
        Tooltip {
            flag: self.flag_for(numeric_id),
            name: self.name_for(numeric_id).to_string(),
            count,
            users_label: users_label(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::feature::Id;
    use geojson::Geometry;

    fn feature(id: &str, value: Value) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(value)),
            id: Some(Id::String(id.to_string())),
            properties: None,
            foreign_members: None,
        }
    }

    fn first_ring(feature: &Feature) -> Vec<Vec<f64>> {
        match feature.geometry.as_ref().map(|geometry| &geometry.value) {
            Some(Value::Polygon(rings)) => rings[0].clone(),
            Some(Value::MultiPolygon(polygons)) => polygons[0][0].clone(),
            _ => Vec::new(),
        }
    }

    fn aggregate(countries: &[(&str, u64)]) -> Aggregate {
        Aggregate {
            chosen_date: Some("2024-01-02".to_string()),
            total_users: countries.iter().map(|(_, count)| count).sum(),
            countries: countries
                .iter()
                .map(|(code, count)| ((*code).to_string(), *count))
                .collect(),
        }
    }

    #[test]
    fn zero_and_tier_colors() {
        assert_eq!(color_for(0, 100), ZERO_COLOR);
        assert_eq!(color_for(81, 100), COLOR_TIERS[0].1);
        assert_eq!(color_for(80, 100), COLOR_TIERS[1].1);
        assert_eq!(color_for(21, 100), COLOR_TIERS[3].1);
        assert_eq!(color_for(6, 100), COLOR_TIERS[4].1);
        assert_eq!(color_for(5, 100), FLOOR_COLOR);
        assert_eq!(COLOR_TIERS[0].1.to_css(), "#991b1b");
        assert_eq!(ZERO_COLOR.to_css(), "rgba(255, 255, 255, 0.03)");
    }

    #[test]
    fn russia_moves_east_and_united_states_moves_west() {
        let mut russia = feature("643", Value::Polygon(vec![vec![vec![-170.0, 10.0], vec![170.0, 10.0]]]));
        let mut states = feature(
            "840",
            Value::MultiPolygon(vec![vec![vec![vec![170.0, 10.0], vec![-170.0, 10.0]]]]),
        );
        let mut netherlands = feature("528", Value::Polygon(vec![vec![vec![-170.0, 10.0], vec![170.0, 10.0]]]));

        normalize_feature(&mut russia);
        normalize_feature(&mut states);
        normalize_feature(&mut netherlands);

        assert_eq!(first_ring(&russia), vec![vec![190.0, 10.0], vec![170.0, 10.0]]);
        assert_eq!(first_ring(&states), vec![vec![-190.0, 10.0], vec![-170.0, 10.0]]);
        assert_eq!(first_ring(&netherlands), vec![vec![-170.0, 10.0], vec![170.0, 10.0]]);
    }

    #[test]
    fn collection_normalization_covers_fiji_and_antarctica() {
        let mut collection = FeatureCollection {
            bbox: None,
            features: vec![
                feature("242", Value::Polygon(vec![vec![vec![-179.5, -16.0]]])),
                feature("010", Value::Polygon(vec![vec![vec![-60.0, -80.0]]])),
            ],
            foreign_members: None,
        };

        normalize(&mut collection);

        assert_eq!(first_ring(&collection.features[0]), vec![vec![180.5, -16.0]]);
        assert_eq!(first_ring(&collection.features[1]), vec![vec![300.0, -80.0]]);
    }

    #[test]
    fn lookups_resolve_through_the_registry() {
        let aggregate = aggregate(&[("NL", 20), ("AT", 4), ("XX", 50)]);
        let map = Choropleth::new(&aggregate);

        assert_eq!(map.max_count(), 50);
        assert_eq!(map.count_for("528"), 20);
        assert_eq!(map.count_for("40"), 4);
        assert_eq!(map.count_for("999"), 0);
        assert_eq!(map.name_for("528"), "Netherlands");
        assert_eq!(map.name_for("999"), "Unknown");
        assert_eq!(map.name_for("344"), "HK");
        assert_eq!(map.flag_for("999"), regions::UNKNOWN_GLYPH);
    }

    #[test]
    fn styles_and_tooltips() {
        let aggregate = aggregate(&[("NL", 1)]);
        let map = Choropleth::new(&aggregate);

        let style = map.style_for("528");
        assert_eq!(style.fill_color.to_css(), "#991b1b");
        assert!((style.fill_opacity - 0.85).abs() < f64::EPSILON);
        assert!((map.style_for("276").fill_opacity - 0.15).abs() < f64::EPSILON);
        assert!((map.hover_style_for("528").weight - 2.0).abs() < f64::EPSILON);

        let tooltip = map.tooltip_for("528");
        assert_eq!(tooltip.name, "Netherlands");
        assert_eq!(tooltip.users_label, "1 user");
        assert_eq!(map.tooltip_for("276").users_label, "0 users");
    }

    #[test]
    fn empty_aggregate_has_unit_max() {
        let aggregate = Aggregate::default();
        assert_eq!(Choropleth::new(&aggregate).max_count(), 1);
    }
}
