//! Fire-and-forget usage events.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::json;

use crate::category::Category;

pub const MENU_FILTER_EVENT: &str = "menu_filter";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackedEvent {
    pub name: Cow<'static, str>,
    pub payload: serde_json::Value,
}

impl TrackedEvent {
    pub fn new(name: impl Into<Cow<'static, str>>, payload: serde_json::Value) -> Self {
        TrackedEvent {
            name: name.into(),
            payload,
        }
    }

    /// `("menu_filter", { "category": <label> })`
    pub fn menu_filter(category: &Category) -> Self {
        TrackedEvent::new(MENU_FILTER_EVENT, json!({ "category": category.as_str() }))
    }
}

/// Analytics sink. Implementations must not fail loudly; a sink that can't
/// deliver an event just drops it.
pub trait TelemetrySink {
    fn track(&self, event: &TrackedEvent);
}

/// Writes every event to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn track(&self, event: &TrackedEvent) {
        log::info!("Event tracked: {} {}", event.name, event.payload);
    }
}

/// Fan-out: both sinks see every event, left first.
impl<A: TelemetrySink, B: TelemetrySink> TelemetrySink for (A, B) {
    fn track(&self, event: &TrackedEvent) {
        self.0.track(event);
        self.1.track(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::RecordingSink;

    #[test]
    fn menu_filter_payload() {
        let event = TrackedEvent::menu_filter(&Category::new("pizza"));
        assert_eq!(event.name, "menu_filter");
        assert_eq!(event.payload, json!({ "category": "pizza" }));
    }

    #[test]
    fn paired_sinks_both_receive_events() {
        let recorded = RecordingSink::new();
        let sink = (recorded.clone(), LogSink);
        sink.track(&TrackedEvent::menu_filter(&Category::new("pizza")));
        sink.track(&TrackedEvent::menu_filter(&Category::new("drinks")));

        let categories: Vec<_> = recorded
            .events()
            .iter()
            .map(|event| event.payload["category"].clone())
            .collect();
        assert_eq!(categories, [json!("pizza"), json!("drinks")]);
    }

    #[test]
    fn serializes_flat() {
        let event = TrackedEvent::menu_filter(&Category::new("drinks"));
        let encoded = serde_json::to_value(&event).unwrap();
        assert_eq!(
            encoded,
            json!({ "name": "menu_filter", "payload": { "category": "drinks" } })
        );
    }
}
