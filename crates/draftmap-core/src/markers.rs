//! Derived marker geometries for edit handles.
//!
//! Markers are synthetic MultiPoint features rebuilt from the draft set on
//! every change: one carries every editable vertex, the other the midpoint
//! of every segment (where a new vertex may be inserted).

use crate::feature::Feature;
use crate::geometry::{Geometry, GeometryType, point_to_position, position_to_point};
use serde_json::Value;

/// Property key tagging a marker feature.
pub const META_KEY: &str = "meta";

/// The kind of marker feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Vertices,
    Midpoints,
}

impl MarkerKind {
    /// Value of the `meta` property for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKind::Vertices => "vertices",
            MarkerKind::Midpoints => "midpoints",
        }
    }

    /// Wrap positions into a marker feature of this kind.
    pub fn to_feature(self, positions: Vec<Value>) -> Feature {
        Feature::new(Geometry::multi_point(positions)).with_property(META_KEY, self.as_str())
    }
}

/// Vertex positions a single feature contributes.
fn feature_vertices(feature: &Feature) -> &[Value] {
    let geometry = &feature.geometry;
    match geometry.kind {
        // Outer ring only, closing point included.
        GeometryType::Polygon => geometry.outer_ring(),
        GeometryType::LineString => geometry.positions(),
        GeometryType::Point | GeometryType::MultiPoint | GeometryType::Other(_) => &[],
    }
}

/// Midpoint of every consecutive pair of positions.
///
/// Pairs where either side is not a numeric position are skipped.
fn segment_midpoints(positions: &[Value], out: &mut Vec<Value>) {
    for pair in positions.windows(2) {
        if let (Some(a), Some(b)) = (position_to_point(&pair[0]), position_to_point(&pair[1])) {
            out.push(point_to_position(a.midpoint(b)));
        }
    }
}

/// Whether a polygon ring gets midpoint handles.
///
/// Rings whose first two positions share the same first component are
/// skipped, as are rings too short or too malformed to compare.
fn ring_takes_midpoints(ring: &[Value]) -> bool {
    match (ring.first().and_then(first_component), ring.get(1).and_then(first_component)) {
        (Some(a), Some(b)) => a != b,
        _ => false,
    }
}

fn first_component(position: &Value) -> Option<f64> {
    position.as_array()?.first()?.as_f64()
}

/// Build the vertices marker for a set of features, in iteration order.
pub fn vertices<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Feature {
    let positions = features
        .into_iter()
        .flat_map(|feature| feature_vertices(feature).iter().cloned())
        .collect();
    MarkerKind::Vertices.to_feature(positions)
}

/// Build the midpoints marker for a set of features, in iteration order.
pub fn midpoints<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Feature {
    let mut positions = Vec::new();
    for feature in features {
        let geometry = &feature.geometry;
        match geometry.kind {
            GeometryType::LineString => segment_midpoints(geometry.positions(), &mut positions),
            GeometryType::Polygon => {
                let ring = geometry.outer_ring();
                if ring_takes_midpoints(ring) {
                    segment_midpoints(ring, &mut positions);
                }
            }
            GeometryType::Point | GeometryType::MultiPoint | GeometryType::Other(_) => {}
        }
    }
    MarkerKind::Midpoints.to_feature(positions)
}
