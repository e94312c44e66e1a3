//! DraftMap Core Library
//!
//! Holds the features a map editor is currently editing and derives the
//! vertex and midpoint handle geometries used to draw grab points.

pub mod error;
pub mod feature;
pub mod geometry;
pub mod markers;
pub mod sink;
pub mod store;

pub use error::{DraftError, DraftResult};
pub use feature::{DRAFT_ID_KEY, DraftId, Feature, FeatureCollection, Properties};
pub use geometry::{Geometry, GeometryType};
pub use markers::{META_KEY, MarkerKind};
pub use sink::{FEATURE_UPDATE_EVENT, RecordingSink, RenderEvent, RenderPayload, RenderSink};
pub use store::{DraftStore, DraftStoreConfig, InitialNormalization};
