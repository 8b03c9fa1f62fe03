//! Small DOM helpers shared by the page modules.
//!
//! Lookups return `Option`/empty collections instead of failing: a page
//! without some element just doesn't get that feature.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, NodeList,
    ScrollBehavior, ScrollToOptions,
};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn by_id(id: &str) -> Option<HtmlElement> {
    document()?.get_element_by_id(id)?.dyn_into().ok()
}

pub fn query(selector: &str) -> Option<HtmlElement> {
    document()?.query_selector(selector).ok()??.dyn_into().ok()
}

pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    document()
        .and_then(|document| document.query_selector_all(selector).ok())
        .map(html_elements)
        .unwrap_or_default()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<HtmlElement> {
    root.query_selector_all(selector)
        .map(html_elements)
        .unwrap_or_default()
}

fn html_elements(nodes: NodeList) -> Vec<HtmlElement> {
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Lock or release page scrolling behind an overlay.
pub fn lock_body_scroll(locked: bool) {
    if let Some(body) = document().and_then(|document| document.body()) {
        set_style(&body, "overflow", carte::popup::body_overflow(locked));
    }
}

/// Whether an event was dispatched on `element` itself rather than a child.
pub fn is_event_target(event: &Event, element: &Element) -> bool {
    event
        .target()
        .is_some_and(|target| js_sys::Object::is(target.as_ref(), element.as_ref()))
}

/// Register a listener for the lifetime of the page.
pub fn on(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        zoon::eprintln!("Failed to listen for '{}'", event);
        return;
    }
    closure.forget();
}

pub fn on_passive(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    if target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .is_err()
    {
        zoon::eprintln!("Failed to listen for '{}'", event);
        return;
    }
    closure.forget();
}

/// Fire-and-forget timer.
pub fn after(ms: u64, callback: impl FnOnce() + 'static) {
    let ms = u32::try_from(ms).unwrap_or(u32::MAX);
    zoon::Task::start(async move {
        zoon::Timer::sleep(ms).await;
        callback();
    });
}

/// Run `callback` on the next animation frame.
pub fn next_frame(callback: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(callback);
    let _ = window.request_animation_frame(callback.unchecked_ref());
}

/// Monotonic page time in ms.
pub fn now_ms() -> u64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now() as u64)
        .unwrap_or_default()
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|window| window.scroll_y().ok())
        .unwrap_or_default()
}

pub fn smooth_scroll_to(top: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Append a `<style>` block to the document head.
pub fn inject_style(css: &str) {
    let Some(document) = document() else {
        return;
    };
    let (Some(head), Ok(style)) = (document.head(), document.create_element("style")) else {
        return;
    };
    style.set_text_content(Some(css));
    let _ = head.append_child(&style);
}
