//! Draft features and feature collections.

use crate::error::DraftResult;
use crate::geometry::Geometry;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Property key carrying a feature's draft identifier.
pub const DRAFT_ID_KEY: &str = "_drawid";

/// Open property bag of a feature.
pub type Properties = Map<String, Value>;

/// Identifier of a feature while it is being edited.
///
/// Ids keep their JSON type: the string `"7"` and the number `7` are
/// different drafts. Numbers compare by value, so `7` and `7.0` are the
/// same draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftId {
    /// A string id.
    Text(String),
    /// A numeric id, in canonical decimal form.
    Number(String),
    /// Any other JSON value, in compact JSON form.
    Other(String),
}

impl DraftId {
    /// Mint a fresh random identifier.
    ///
    /// For hosts that create drafts themselves rather than receiving them
    /// with ids already assigned.
    pub fn generate() -> Self {
        Self::Text(Uuid::new_v4().to_string())
    }

    /// Read an id from a property value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(id) => Self::Text(id.clone()),
            Value::Number(n) => Self::Number(canonical_number(n)),
            other => Self::Other(other.to_string()),
        }
    }

    /// The id as a property value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Text(id) => Value::String(id.clone()),
            Self::Number(n) => n
                .parse::<i64>()
                .map(Value::from)
                .or_else(|_| n.parse::<f64>().map(Value::from))
                .unwrap_or_else(|_| Value::String(n.clone())),
            Self::Other(json) => {
                serde_json::from_str(json).unwrap_or_else(|_| Value::String(json.clone()))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(id) | Self::Number(id) | Self::Other(id) => id,
        }
    }
}

fn canonical_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    // Adding 0.0 folds -0.0 into 0.0
    (n.as_f64().unwrap_or_default() + 0.0).to_string()
}

impl From<String> for DraftId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&str> for DraftId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<i64> for DraftId {
    fn from(id: i64) -> Self {
        Self::Number(id.to_string())
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(id) => write!(f, "{:?}", id),
            Self::Number(id) | Self::Other(id) => f.write_str(id),
        }
    }
}

/// A GeoJSON feature.
///
/// A missing or `null` geometry or property bag reads as empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(default, deserialize_with = "null_as_default")]
    pub geometry: Geometry,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Properties,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Feature {
    /// Create a feature with no properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: Properties::new(),
        }
    }

    /// Set the draft identifier (builder style).
    pub fn with_draft_id(mut self, id: impl Into<DraftId>) -> Self {
        self.set_draft_id(id.into());
        self
    }

    /// Set an arbitrary property (builder style).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn set_draft_id(&mut self, id: DraftId) {
        self.properties.insert(DRAFT_ID_KEY.to_string(), id.to_value());
    }

    /// The draft identifier, if the feature carries one.
    pub fn draft_id(&self) -> Option<DraftId> {
        self.properties.get(DRAFT_ID_KEY).map(DraftId::from_value)
    }

    /// Deserialize a feature from JSON.
    pub fn from_json(json: &str) -> DraftResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Serialize the collection to JSON.
    pub fn to_json(&self) -> DraftResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a collection from JSON.
    pub fn from_json(json: &str) -> DraftResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self::new(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryType;
    use serde_json::json;

    #[test]
    fn test_draft_id_string() {
        let feature = Feature::new(Geometry::point(0.0, 0.0)).with_draft_id("a");
        assert_eq!(feature.draft_id(), Some(DraftId::from("a")));
    }

    fn id_of(value: Value) -> Option<DraftId> {
        Feature::new(Geometry::point(0.0, 0.0))
            .with_property(DRAFT_ID_KEY, value)
            .draft_id()
    }

    #[test]
    fn test_draft_id_integer() {
        assert_eq!(id_of(json!(7)), Some(DraftId::from(7_i64)));
        assert_ne!(id_of(json!(7)), id_of(json!("7")));
    }

    #[test]
    fn test_draft_id_numbers_compare_by_value() {
        assert_eq!(id_of(json!(7)), id_of(json!(7.0)));
        assert_eq!(id_of(json!(0)), id_of(json!(-0.0)));
        assert_ne!(id_of(json!(1.5)), id_of(json!(2.5)));
    }

    #[test]
    fn test_draft_id_other_values() {
        assert_eq!(id_of(json!(true)), Some(DraftId::Other("true".to_string())));
        assert_ne!(id_of(json!(true)), id_of(json!("true")));
        assert!(id_of(Value::Null).is_some());
    }

    #[test]
    fn test_draft_id_missing() {
        let feature = Feature::new(Geometry::point(0.0, 0.0));
        assert_eq!(feature.draft_id(), None);
    }

    #[test]
    fn test_draft_id_written_back_with_type() {
        for value in [json!("a"), json!(7), json!(1.5), json!(true)] {
            let id = DraftId::from_value(&value);
            let feature = Feature::new(Geometry::point(0.0, 0.0)).with_draft_id(id.clone());
            assert_eq!(feature.properties[DRAFT_ID_KEY], value);
            assert_eq!(feature.draft_id(), Some(id));
        }
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(DraftId::generate(), DraftId::generate());
    }

    #[test]
    fn test_feature_json_shape() {
        let feature = Feature::new(Geometry::line_string(&[[0.0, 0.0], [1.0, 1.0]]))
            .with_draft_id("line-1");
        let value = serde_json::to_value(&feature).unwrap();

        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "LineString");
        assert_eq!(value["properties"]["_drawid"], "line-1");
    }

    #[test]
    fn test_feature_from_json() {
        let feature = Feature::from_json(
            r#"{"type":"Feature","geometry":{"type":"Polygon","coordinates":[]},"properties":{"_drawid":"p"}}"#,
        )
        .unwrap();
        assert_eq!(feature.geometry.kind, GeometryType::Polygon);
        assert_eq!(feature.draft_id(), Some(DraftId::from("p")));
    }

    #[test]
    fn test_feature_without_properties() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [1, 2]}
        }))
        .unwrap();
        assert!(feature.properties.is_empty());
    }

    #[test]
    fn test_feature_null_members() {
        let feature: Feature = serde_json::from_value(
            json!({"type": "Feature", "geometry": null, "properties": null}),
        )
        .unwrap();
        assert_eq!(feature, Feature::default());
    }

    #[test]
    fn test_collection_from_json() {
        let collection = FeatureCollection::from_json(
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},"properties":{}}]}"#,
        )
        .unwrap();
        assert_eq!(collection.len(), 1);

        let json = collection.to_json().unwrap();
        assert!(json.contains("\"FeatureCollection\""));
    }

    #[test]
    fn test_collection_rejects_garbage() {
        assert!(FeatureCollection::from_json("not json").is_err());
    }
}
