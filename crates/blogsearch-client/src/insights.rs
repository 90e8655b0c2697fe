//! Analytics event sink.
//!
//! The result-item template emits a named click event before the browser
//! follows a link. The sink records the event synchronously, so the event is
//! captured exactly once per click even though the page navigates away;
//! delivery to the insights endpoint is fire-and-forget.

use std::{cell::RefCell, rc::Rc};

use blogsearch_core::{Hit, SearchConfig};
use log::debug;
use serde::{Deserialize, Serialize};

const EVENTS_PATH: &str = "/1/events";

/// Kind of interaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// The user clicked a result.
    Click,
    /// The user converted on a result.
    Conversion,
    /// A result was viewed.
    View,
}

/// Capability for emitting interaction events from the item template.
///
/// `emit` must record the event synchronously and exactly once per call;
/// click handlers rely on this to capture the event before navigation.
pub trait EventSink {
    /// Emit one named event carrying the full hit as payload.
    fn emit(&self, kind: EventKind, hit: &Hit, label: &str);
}

/// One event on the insights wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsightsEvent {
    /// Event kind.
    pub event_type: EventKind,

    /// Event label, e.g. `"Title Clicked"`.
    pub event_name: String,

    /// Index the hit came from.
    pub index: String,

    /// Service identifiers of the hits involved.
    #[serde(rename = "objectIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub object_ids: Vec<String>,

    /// Permalinks of the hits involved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Serialize)]
struct EventsBody<'a> {
    events: &'a [InsightsEvent],
}

/// Sink forwarding events to the hosted insights endpoint.
#[derive(Clone)]
pub struct InsightsClient {
    config: SearchConfig,
    base_url: String,
    /// Events recorded since construction, newest last.
    recorded: Rc<RefCell<Vec<InsightsEvent>>>,
}

impl InsightsClient {
    /// Create a sink bound to the same application as the search client.
    pub fn new(config: SearchConfig) -> Self {
        let base_url = "https://insights.search-api.net".to_string();
        Self {
            config,
            base_url,
            recorded: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Set a custom base URL for the insights endpoint (useful for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// URL of the events endpoint.
    pub fn events_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), EVENTS_PATH)
    }

    /// Number of events recorded so far.
    pub fn recorded_count(&self) -> usize {
        self.recorded.borrow().len()
    }

    fn build_event(&self, kind: EventKind, hit: &Hit, label: &str) -> InsightsEvent {
        InsightsEvent {
            event_type: kind,
            event_name: label.to_string(),
            index: self.config.index_name.clone(),
            object_ids: hit.object_id.iter().cloned().collect(),
            urls: vec![hit.permalink.clone()],
        }
    }

    /// Deliver one event to the endpoint. Failures are logged and dropped;
    /// analytics never blocks or breaks the page.
    #[cfg(target_arch = "wasm32")]
    fn deliver(&self, event: InsightsEvent) {
        use gloo_net::http::Request;
        use log::warn;

        use crate::client::{API_KEY_HEADER, APP_ID_HEADER};

        let url = self.events_url();
        let app_id = self.config.app_id.clone();
        let api_key = self.config.api_key.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let events = [event];
            let body = EventsBody { events: &events };

            let request = match Request::post(&url)
                .header(APP_ID_HEADER, &app_id)
                .header(API_KEY_HEADER, &api_key)
                .json(&body)
            {
                Ok(request) => request,
                Err(e) => {
                    warn!("failed to build insights request: {e}");
                    return;
                }
            };

            match request.send().await {
                Ok(response) if !response.ok() => {
                    warn!("insights endpoint returned HTTP {}", response.status());
                }
                Ok(_) => {}
                Err(e) => warn!("failed to deliver insights event: {e}"),
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn deliver(&self, _event: InsightsEvent) {}
}

impl EventSink for InsightsClient {
    fn emit(&self, kind: EventKind, hit: &Hit, label: &str) {
        let event = self.build_event(kind, hit, label);
        debug!("insights event: {label} for {}", hit.permalink);

        // Record before any async work so a click is captured even when the
        // browser navigates away immediately afterwards.
        self.recorded.borrow_mut().push(event.clone());
        self.deliver(event);
    }
}

/// Sink that drops every event, for deployments with insights disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _kind: EventKind, _hit: &Hit, _label: &str) {}
}

/// Test sink recording every emitted event in order.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<(EventKind, Hit, String)>>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far, in emission order.
    pub fn events(&self) -> Vec<(EventKind, Hit, String)> {
        self.events.borrow().clone()
    }

    /// Number of events emitted so far.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether no event has been emitted.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, kind: EventKind, hit: &Hit, label: &str) {
        self.events
            .borrow_mut()
            .push((kind, hit.clone(), label.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SearchConfig {
        SearchConfig::new("APP123", "secret", "blogpost")
    }

    #[test]
    fn test_events_url() {
        let sink = InsightsClient::new(test_config()).with_base_url("http://localhost:9000");
        assert_eq!(sink.events_url(), "http://localhost:9000/1/events");
    }

    #[test]
    fn test_emit_records_synchronously() {
        let sink = InsightsClient::new(test_config());
        let hit = Hit::new("Hello", "World", "/p/1");

        sink.emit(EventKind::Click, &hit, "Title Clicked");

        assert_eq!(sink.recorded_count(), 1);
    }

    #[test]
    fn test_built_event_carries_hit() {
        let sink = InsightsClient::new(test_config());
        let mut hit = Hit::new("Hello", "World", "/p/1");
        hit.object_id = Some("42".to_string());

        let event = sink.build_event(EventKind::Click, &hit, "Title Clicked");

        assert_eq!(event.event_name, "Title Clicked");
        assert_eq!(event.index, "blogpost");
        assert_eq!(event.object_ids, vec!["42".to_string()]);
        assert_eq!(event.urls, vec!["/p/1".to_string()]);
    }

    #[test]
    fn test_event_wire_format() {
        let event = InsightsEvent {
            event_type: EventKind::Click,
            event_name: "Title Clicked".to_string(),
            index: "blogpost".to_string(),
            object_ids: vec!["42".to_string()],
            urls: vec!["/p/1".to_string()],
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"eventType\":\"click\""));
        assert!(json.contains("\"eventName\":\"Title Clicked\""));
        assert!(json.contains("\"objectIDs\":[\"42\"]"));
    }

    #[test]
    fn test_recording_sink_orders_events() {
        let sink = RecordingSink::new();
        let hit = Hit::new("Hello", "World", "/p/1");

        sink.emit(EventKind::Click, &hit, "Title Clicked");
        sink.emit(EventKind::Click, &hit, "Continue-Reading Clicked");

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].2, "Title Clicked");
        assert_eq!(events[1].2, "Continue-Reading Clicked");
        assert_eq!(events[0].1, hit);
    }

    #[test]
    fn test_null_sink_drops_events() {
        let sink = NullSink;
        let hit = Hit::new("Hello", "World", "/p/1");
        // Must not panic or record anywhere.
        sink.emit(EventKind::Click, &hit, "Title Clicked");
    }
}
