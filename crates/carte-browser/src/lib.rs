//! Browser layer for the restaurant site.
//!
//! This crate is the only place where DOM handles, browser timers and
//! `Rc<RefCell<_>>` page state are allowed. Every decision (which items to
//! show, when the navbar hides, when a modal may open) is made by `carte`;
//! the modules here read the markup, forward events and apply the results.
//!
//! Native builds compile to an empty crate.

#![cfg(target_arch = "wasm32")]

mod analytics;
mod dom;
mod logger;
mod menu;
mod model;
mod nav;
mod order;
mod popup;
mod scroll;

use std::cell::RefCell;
use std::rc::Rc;

use carte::SiteConfig;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

pub use analytics::GtagSink;
pub use menu::{DomItems, MenuFilter, read_items, settle_step, wire_menu_filter};
pub use order::OrderController;

struct Page {
    config: SiteConfig,
    orders: Rc<order::OrderController>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    logger::init(log::LevelFilter::Info);

    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        dom::on(&document, "DOMContentLoaded", |_| init_page());
    } else {
        init_page();
    }
}

fn init_page() {
    let config = SiteConfig::default();

    nav::init(&config.nav);
    menu::init(&config.filter);
    scroll::init(&config.scroll);
    model::init(&config.model);
    popup::init();
    let orders = order::init(&config.order);
    nav::refresh_active_link(config.scroll.active_marker_offset);

    if let Some(window) = web_sys::window() {
        dom::on(&window, "error", |event| {
            let error = js_sys::Reflect::get(&event, &JsValue::from_str("error"))
                .unwrap_or(JsValue::UNDEFINED);
            log::error!("JavaScript Error: {:?}", error);
        });
        expose_globals(&window);
    }

    PAGE.with(|page| *page.borrow_mut() = Some(Page { config, orders }));
    log::info!("Page ready");
}

fn with_page(f: impl FnOnce(&Page)) {
    PAGE.with(|page| match page.borrow().as_ref() {
        Some(page) => f(page),
        None => log::warn!("Page is not initialised yet"),
    });
}

/// Smooth-scroll to `#section_id`, leaving room for the fixed navbar.
pub fn scroll_to_section(section_id: &str) {
    let Some(section) = dom::by_id(section_id) else {
        return;
    };
    with_page(|page| nav::scroll_to_element(&section, page.config.nav.navbar_offset));
}

pub fn scroll_to_top() {
    dom::smooth_scroll_to(0.0);
}

pub fn order_item(item_name: &str) {
    let orders = PAGE.with(|page| page.borrow().as_ref().map(|page| page.orders.clone()));
    match orders {
        Some(orders) => orders.show(item_name),
        None => log::warn!("Page is not initialised yet"),
    }
}

pub fn close_order_modal() {
    let orders = PAGE.with(|page| page.borrow().as_ref().map(|page| page.orders.clone()));
    if let Some(orders) = orders {
        orders.close();
    }
}

/// Inline `onclick` handlers in the markup call these by name.
fn expose_globals(window: &web_sys::Window) {
    fn expose(window: &web_sys::Window, name: &str, function: &JsValue) {
        if js_sys::Reflect::set(window, &JsValue::from_str(name), function).is_err() {
            log::warn!("Cannot expose window.{}", name);
        }
    }

    let scroll_to = Closure::<dyn Fn(String)>::new(|id: String| scroll_to_section(&id));
    expose(window, "scrollToSection", scroll_to.as_ref());
    scroll_to.forget();

    let to_top = Closure::<dyn Fn()>::new(scroll_to_top);
    expose(window, "scrollToTop", to_top.as_ref());
    to_top.forget();

    let order = Closure::<dyn Fn(String)>::new(|name: String| order_item(&name));
    expose(window, "orderItem", order.as_ref());
    order.forget();

    let close = Closure::<dyn Fn()>::new(close_order_modal);
    expose(window, "closeOrderModal", close.as_ref());
    close.forget();
}
