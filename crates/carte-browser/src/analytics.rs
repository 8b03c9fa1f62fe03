use carte::{TelemetrySink, TrackedEvent};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

/// Forwards events to Google Analytics when the page loaded `gtag`.
///
/// Events are always logged, so a page without analytics still shows them
/// in the console.
pub struct GtagSink;

impl TelemetrySink for GtagSink {
    fn track(&self, event: &TrackedEvent) {
        if let Some(gtag) = gtag() {
            match event
                .payload
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            {
                Ok(payload) => {
                    let name = JsValue::from_str(&event.name);
                    if let Err(error) =
                        gtag.call3(&JsValue::NULL, &"event".into(), &name, &payload)
                    {
                        log::warn!("gtag rejected '{}': {:?}", event.name, error);
                    }
                }
                Err(error) => log::warn!("Cannot convert '{}' payload: {}", event.name, error),
            }
        }
        log::info!("Event tracked: {} {}", event.name, event.payload);
    }
}

fn gtag() -> Option<js_sys::Function> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str("gtag"))
        .ok()?
        .dyn_into()
        .ok()
}
