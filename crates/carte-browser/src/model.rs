//! `<model-viewer>` loading overlay.

use std::cell::RefCell;
use std::rc::Rc;

use carte::config::ModelConfig;
use carte::model::{
    LOAD_ERROR_ICON, LOAD_ERROR_MESSAGE, LOAD_ERROR_TITLE, LOADED_ANIMATION, ModelLoader,
    RELOAD_LABEL,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use web_sys::{CustomEvent, HtmlElement, IntersectionObserver, IntersectionObserverEntry};

use crate::dom;

const LOADED_KEYFRAMES: &str = "
@keyframes modelLoaded {
  0% { opacity: 0; transform: scale(0.9) rotateY(10deg); }
  50% { opacity: 0.7; transform: scale(1.05) rotateY(-5deg); }
  100% { opacity: 1; transform: scale(1) rotateY(0deg); }
}
";

/// A `setInterval` timer, cleared on drop.
struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    fn start(period_ms: u64, callback: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let callback = Closure::<dyn FnMut()>::new(callback);
        let period_ms = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms,
            )
            .ok()?;
        Some(Interval {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

struct ProgressView {
    overlay: HtmlElement,
    fill: HtmlElement,
    text: HtmlElement,
}

impl ProgressView {
    fn render(&self, loader: &ModelLoader) {
        dom::set_style(&self.fill, "width", &loader.bar_width());
        self.text.set_text_content(Some(&loader.label()));
    }

    fn show_error(&self) {
        self.overlay.set_inner_html(&format!(
            r#"<div class="model-loading-content">
  <div style="font-size: 3rem; margin-bottom: 1rem;">{LOAD_ERROR_ICON}</div>
  <h3>{LOAD_ERROR_TITLE}</h3>
  <p>{LOAD_ERROR_MESSAGE}</p>
  <button class="btn btn-primary" style="margin-top: 1rem;">{RELOAD_LABEL}</button>
</div>"#
        ));
        if let Some(reload) = dom::query_all_in(&self.overlay, "button").first() {
            dom::on(reload, "click", |_| {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
        }
    }
}

pub fn init(config: &ModelConfig) {
    let Some(viewer) = dom::query("model-viewer") else {
        return;
    };
    let (Some(overlay), Some(fill), Some(text)) = (
        dom::by_id("modelLoadingOverlay"),
        dom::by_id("progressFill"),
        dom::by_id("progressText"),
    ) else {
        log::warn!("model-viewer present without its loading overlay");
        return;
    };
    dom::inject_style(LOADED_KEYFRAMES);

    let view = Rc::new(ProgressView {
        overlay,
        fill,
        text,
    });
    let loader = Rc::new(RefCell::new(ModelLoader::new(config.clone())));
    let reveal_delay_ms = config.reveal_delay_ms;

    let interval = {
        let loader = loader.clone();
        let view = view.clone();
        Interval::start(config.tick_ms, move || {
            let mut loader = loader.borrow_mut();
            if loader.simulate_tick(js_sys::Math::random()).is_some() {
                view.render(&loader);
            }
        })
    };
    let interval = Rc::new(RefCell::new(interval));

    {
        let loader = loader.clone();
        let view = view.clone();
        let interval = interval.clone();
        let loaded = viewer.clone();
        dom::on(&viewer, "load", move |_| {
            interval.borrow_mut().take();
            let mut state = loader.borrow_mut();
            state.finish();
            view.render(&state);

            let view = view.clone();
            let loaded = loaded.clone();
            dom::after(reveal_delay_ms, move || {
                dom::set_class(&view.overlay, "hidden", true);
                dom::set_style(&loaded, "opacity", "1");
                dom::set_style(&loaded, "animation", LOADED_ANIMATION);
            });
            log::info!("3D Model loaded successfully");
        });
    }

    {
        let loader = loader.clone();
        let view = view.clone();
        dom::on(&viewer, "error", move |_| {
            interval.borrow_mut().take();
            loader.borrow_mut().fail();
            view.show_error();
            log::error!("Error loading 3D model");
        });
    }

    {
        let loader = loader.clone();
        dom::on(&viewer, "progress", move |event| {
            let Some(total) = event
                .dyn_ref::<CustomEvent>()
                .and_then(|event| {
                    js_sys::Reflect::get(&event.detail(), &JsValue::from_str("totalProgress")).ok()
                })
                .and_then(|total| total.as_f64())
            else {
                return;
            };
            let mut loader = loader.borrow_mut();
            loader.report_progress(total);
            view.render(&loader);
        });
    }

    observe_visibility(&viewer, loader);
}

/// Switch the viewer to eager loading the first time it scrolls into view.
fn observe_visibility(viewer: &HtmlElement, loader: Rc<RefCell<ModelLoader>>) {
    let eager = viewer.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() && loader.borrow_mut().request_eager() {
                    let _ = eager.set_attribute("loading", "eager");
                    observer.unobserve(&entry.target());
                }
            }
        },
    );
    match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => {
            observer.observe(viewer);
            callback.forget();
        }
        Err(error) => log::warn!("IntersectionObserver unavailable: {:?}", error),
    }
}
