//! GeoJSON geometry as seen by the draft store.
//!
//! Coordinates are kept as raw JSON so a malformed geometry can still be
//! stored and handed back to the host untouched. Only the accessors used by
//! marker derivation interpret them, and they do so leniently.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The geometry types the store distinguishes.
///
/// Anything else round-trips through `Other` with its original tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    Other(String),
}

impl GeometryType {
    /// The GeoJSON tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::Other(tag) => tag,
        }
    }
}

impl Default for GeometryType {
    fn default() -> Self {
        GeometryType::Other(String::new())
    }
}

impl From<String> for GeometryType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Point" => GeometryType::Point,
            "LineString" => GeometryType::LineString,
            "Polygon" => GeometryType::Polygon,
            "MultiPoint" => GeometryType::MultiPoint,
            _ => GeometryType::Other(tag),
        }
    }
}

impl From<GeometryType> for String {
    fn from(kind: GeometryType) -> Self {
        match kind {
            GeometryType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// A geometry with its type tag and untyped coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default)]
    pub kind: GeometryType,
    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    pub fn new(kind: GeometryType, coordinates: Value) -> Self {
        Self { kind, coordinates }
    }

    /// Build a LineString from 2D positions.
    pub fn line_string(points: &[[f64; 2]]) -> Self {
        Self::new(GeometryType::LineString, positions_to_value(points))
    }

    /// Build a Polygon from rings of 2D positions.
    pub fn polygon(rings: &[Vec<[f64; 2]>]) -> Self {
        let rings = rings.iter().map(|ring| positions_to_value(ring)).collect();
        Self::new(GeometryType::Polygon, Value::Array(rings))
    }

    /// Build a Point.
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(GeometryType::Point, serde_json::json!([x, y]))
    }

    /// Build a MultiPoint from already-encoded positions.
    pub fn multi_point(positions: Vec<Value>) -> Self {
        Self::new(GeometryType::MultiPoint, Value::Array(positions))
    }

    /// True when the top-level coordinate sequence holds at least one entry.
    pub fn has_coordinates(&self) -> bool {
        self.coordinates.as_array().is_some_and(|c| !c.is_empty())
    }

    /// Top-level coordinate entries, or nothing if `coordinates` is not an array.
    pub fn positions(&self) -> &[Value] {
        self.coordinates.as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entries of the first ring (for polygons, the outer boundary).
    pub fn outer_ring(&self) -> &[Value] {
        self.positions()
            .first()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Read the first two components of a position.
///
/// Extra components such as elevation are ignored. Returns `None` for
/// anything that is not an array of at least two numbers.
pub fn position_to_point(position: &Value) -> Option<Point> {
    let components = position.as_array()?;
    let x = components.first()?.as_f64()?;
    let y = components.get(1)?.as_f64()?;
    Some(Point::new(x, y))
}

/// Encode a point as a 2D GeoJSON position.
pub fn point_to_position(point: Point) -> Value {
    serde_json::json!([point.x, point.y])
}

fn positions_to_value(points: &[[f64; 2]]) -> Value {
    Value::Array(
        points
            .iter()
            .map(|&[x, y]| point_to_position(Point::new(x, y)))
            .collect(),
    )
}
