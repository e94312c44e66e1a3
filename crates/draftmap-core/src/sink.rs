//! Notification channel to the host renderer.

use crate::feature::FeatureCollection;
use serde::{Deserialize, Serialize};

/// Event fired whenever the draft set changes.
pub const FEATURE_UPDATE_EVENT: &str = "edit.feature.update";

/// Payload of a render notification: the drafts followed by the marker features.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderPayload {
    pub geojson: FeatureCollection,
}

/// A named notification together with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEvent {
    pub event: String,
    pub payload: RenderPayload,
}

/// Something that can receive named events from the store.
///
/// This is the only way the store talks to the renderer.
pub trait RenderSink {
    fn fire(&mut self, event: &str, payload: &RenderPayload);
}

impl<F> RenderSink for F
where
    F: FnMut(&str, &RenderPayload),
{
    fn fire(&mut self, event: &str, payload: &RenderPayload) {
        self(event, payload)
    }
}

/// Collects every notification, for hosts that poll instead of reacting.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<RenderEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far, oldest first.
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// The most recent event.
    pub fn last(&self) -> Option<&RenderEvent> {
        self.events.last()
    }

    /// Take the recorded events, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }
}

impl RenderSink for RecordingSink {
    fn fire(&mut self, event: &str, payload: &RenderPayload) {
        self.events.push(RenderEvent {
            event: event.to_string(),
            payload: payload.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink() {
        let mut names = Vec::new();
        {
            let mut sink = |event: &str, _: &RenderPayload| names.push(event.to_string());
            sink.fire(FEATURE_UPDATE_EVENT, &RenderPayload::default());
        }
        assert_eq!(names, vec![FEATURE_UPDATE_EVENT.to_string()]);
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.fire("a", &RenderPayload::default());
        sink.fire("b", &RenderPayload::default());
        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.last().unwrap().event, "b");

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_payload_json_shape() {
        let value = serde_json::to_value(RenderPayload::default()).unwrap();
        assert_eq!(value["geojson"]["type"], "FeatureCollection");
        assert!(value["geojson"]["features"].as_array().unwrap().is_empty());
    }
}
