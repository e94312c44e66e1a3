//! Draft feature store.
//!
//! Holds the features currently being edited, before they are committed to
//! history, and pushes a fresh render payload to the host on every change.

use crate::feature::{DraftId, Feature, FeatureCollection};
use crate::markers;
use crate::sink::{FEATURE_UPDATE_EVENT, RenderPayload, RenderSink};
use std::collections::HashMap;

/// Storage key of a draft. Features without an id share the `None` slot.
type DraftKey = Option<DraftId>;

/// How the initial features passed at construction are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialNormalization {
    /// Replay every initial feature through [`DraftStore::update`].
    #[default]
    Always,
    /// Replay only when the first feature has a non-empty coordinate
    /// sequence; otherwise load the features silently.
    FirstFeatureHeuristic,
}

/// Store configuration.
#[derive(Debug, Clone, Default)]
pub struct DraftStoreConfig {
    pub normalization: InitialNormalization,
}

/// The set of in-progress features, keyed by draft id.
#[derive(Debug)]
pub struct DraftStore<S: RenderSink> {
    /// Render notification target.
    sink: S,
    /// All drafts, keyed by draft id.
    features: HashMap<DraftKey, Feature>,
    /// Storage order of the drafts (oldest update first).
    order: Vec<DraftKey>,
}

impl<S: RenderSink> DraftStore<S> {
    /// Create a store with the default configuration.
    pub fn new(sink: S, features: Vec<Feature>) -> Self {
        Self::with_config(sink, features, DraftStoreConfig::default())
    }

    /// Create a store with an explicit configuration.
    pub fn with_config(sink: S, features: Vec<Feature>, config: DraftStoreConfig) -> Self {
        let mut store = Self {
            sink,
            features: HashMap::new(),
            order: Vec::new(),
        };

        let replay = match config.normalization {
            InitialNormalization::Always => true,
            InitialNormalization::FirstFeatureHeuristic => features
                .first()
                .is_some_and(|feature| feature.geometry.has_coordinates()),
        };

        log::debug!(
            "Loading {} initial drafts (replay: {})",
            features.len(),
            replay
        );

        for feature in features {
            if replay {
                store.update(feature);
            } else {
                store.insert(feature);
            }
        }
        store
    }

    /// All drafts as a feature collection, in storage order.
    pub fn get_all(&self) -> FeatureCollection {
        FeatureCollection::new(self.features().cloned().collect())
    }

    /// Get a draft by id.
    pub fn get_by_id(&self, id: &DraftId) -> Option<&Feature> {
        self.features.get(&Some(id.clone()))
    }

    /// Iterate drafts in storage order.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.order.iter().filter_map(|key| self.features.get(key))
    }

    /// Number of drafts.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if there are no drafts.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Remove all drafts.
    pub fn clear(&mut self) {
        self.features.clear();
        self.order.clear();
        log::debug!("Cleared drafts");
        self.render();
    }

    /// Insert or replace a draft.
    ///
    /// Any draft with the same id is dropped whole, not merged, and the new
    /// feature moves to the end of storage order. Always notifies.
    pub fn update(&mut self, feature: Feature) {
        self.insert(feature);
        self.render();
    }

    /// Remove a single draft.
    ///
    /// Notifies only when a draft was actually removed.
    pub fn remove(&mut self, id: &DraftId) -> Option<Feature> {
        let key = Some(id.clone());
        let removed = self.features.remove(&key)?;
        self.order.retain(|k| k != &key);
        log::debug!("Removed draft {}", id);
        self.render();
        Some(removed)
    }

    /// Push the current drafts and their markers to the sink.
    pub fn render(&mut self) {
        let mut collection = self.get_all();
        let vertices = markers::vertices(self.features());
        let midpoints = markers::midpoints(self.features());
        collection.features.push(vertices);
        collection.features.push(midpoints);

        let payload = RenderPayload { geojson: collection };
        self.sink.fire(FEATURE_UPDATE_EVENT, &payload);
    }

    /// Get the render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the store, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn insert(&mut self, feature: Feature) {
        let key = feature.draft_id();
        match &key {
            Some(id) => log::debug!("Updating draft {}", id),
            None => log::warn!("Draft feature has no {} property", crate::feature::DRAFT_ID_KEY),
        }

        if self.features.insert(key.clone(), feature).is_some() {
            self.order.retain(|k| k != &key);
        }
        self.order.push(key);
    }
}
