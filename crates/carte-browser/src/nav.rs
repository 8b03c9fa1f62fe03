use std::cell::RefCell;
use std::rc::Rc;

use carte::config::NavConfig;
use carte::nav::{NavMenu, SectionBounds, active_section, link_targets, scroll_target};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Node};

use crate::dom;

struct NavElements {
    toggle: HtmlElement,
    list: HtmlElement,
}

impl NavElements {
    fn render(&self, menu: &NavMenu) {
        dom::set_class(&self.list, "active", menu.is_open());
        dom::set_class(&self.toggle, "active", menu.is_open());
        for (bar, style) in dom::query_all_in(&self.toggle, "span")
            .iter()
            .zip(menu.bar_styles())
        {
            if let Some(transform) = style.transform {
                dom::set_style(bar, "transform", transform);
            }
            if let Some(opacity) = style.opacity {
                dom::set_style(bar, "opacity", opacity);
            }
        }
    }
}

pub fn init(config: &NavConfig) {
    let navbar_offset = config.navbar_offset;
    let menu = Rc::new(RefCell::new(NavMenu::default()));
    let elements = match (dom::by_id("navToggle"), dom::query(".nav-list")) {
        (Some(toggle), Some(list)) => Some(Rc::new(NavElements { toggle, list })),
        _ => {
            log::debug!("No mobile navigation on this page");
            None
        }
    };

    if let Some(elements) = &elements {
        let menu = menu.clone();
        let rendered = elements.clone();
        dom::on(&elements.toggle, "click", move |_| {
            let mut menu = menu.borrow_mut();
            menu.toggle();
            rendered.render(&menu);
        });
    }

    for link in dom::query_all(".nav-link") {
        let menu = menu.clone();
        let elements = elements.clone();
        let href = link.get_attribute("href").unwrap_or_default();
        dom::on(&link, "click", move |event| {
            event.prevent_default();
            if let Some(target) = section_for(&href) {
                scroll_to_element(&target, navbar_offset);
            }
            let mut menu = menu.borrow_mut();
            if !menu.close() {
                return;
            }
            if let Some(elements) = &elements {
                elements.render(&menu);
            }
        });
    }

    if let (Some(elements), Some(document)) = (elements, dom::document()) {
        dom::on(&document, "click", move |event| {
            let Some(node) = event.target().and_then(|target| target.dyn_into::<Node>().ok())
            else {
                return;
            };
            let inside_toggle = elements.toggle.contains(Some(&node));
            let inside_list = elements.list.contains(Some(&node));
            let mut menu = menu.borrow_mut();
            if menu.on_document_click(inside_toggle, inside_list) {
                elements.render(&menu);
            }
        });
    }
}

/// Element a link's `#fragment` points at.
fn section_for(href: &str) -> Option<HtmlElement> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    dom::by_id(id)
}

pub fn scroll_to_element(target: &HtmlElement, navbar_offset: f64) {
    dom::smooth_scroll_to(scroll_target(f64::from(target.offset_top()), navbar_offset));
}

/// Mark the nav link whose section contains the marker line as active.
pub fn refresh_active_link(marker_offset: f64) {
    let sections: Vec<SectionBounds> = dom::query_all("section[id]")
        .iter()
        .map(|section| {
            SectionBounds::new(
                section.id(),
                f64::from(section.offset_top()),
                f64::from(section.offset_height()),
            )
        })
        .collect();
    let active = active_section(&sections, dom::scroll_y(), marker_offset);

    for link in dom::query_all(".nav-link") {
        let href = link.get_attribute("href").unwrap_or_default();
        let is_active = active.is_some_and(|id| link_targets(&href, id));
        dom::set_class(&link, "active", is_active);
    }
}
