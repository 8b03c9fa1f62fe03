//! Category filter buttons driving the [`Sequencer`].
//!
//! The sequencer owns every decision; this module only turns its reveal plan
//! into browser timers. Each step gets a timer at its offset (which calls
//! `advance`) followed by an animation frame (which calls `animation_frame`),
//! and one more timer at the settle point releases the busy flag.

use std::cell::RefCell;
use std::rc::Rc;

use carte::config::FilterConfig;
use carte::{ItemId, ItemSurface, MenuItem, RequestOutcome, RevealPlan, Sequencer, VisualState};

use crate::analytics::GtagSink;
use crate::dom;
use web_sys::HtmlElement;

/// `.menu-item` cards in document order; `ItemId(n)` is the n-th card.
pub struct DomItems {
    elements: Vec<HtmlElement>,
}

impl DomItems {
    pub fn new(elements: Vec<HtmlElement>) -> Self {
        DomItems { elements }
    }

    pub fn element(&self, item: ItemId) -> Option<&HtmlElement> {
        self.elements.get(item.0)
    }
}

impl ItemSurface for DomItems {
    fn show(&mut self, item: ItemId) {
        if let Some(element) = self.element(item) {
            dom::set_style(element, "display", "block");
        }
    }

    fn hide(&mut self, item: ItemId) {
        if let Some(element) = self.element(item) {
            dom::set_style(element, "display", "none");
        }
    }

    fn set_visual_state(&mut self, item: ItemId, state: VisualState) {
        if let Some(element) = self.element(item) {
            dom::set_style(element, "opacity", state.opacity());
            dom::set_style(element, "transform", state.transform());
        }
    }
}

/// The page's filter state, shared by button listeners and timers.
pub type MenuFilter = Rc<RefCell<Sequencer<DomItems>>>;

/// Menu entries as read from the cards: heading text and `data-category`.
pub fn read_items(elements: &[HtmlElement]) -> Vec<MenuItem> {
    elements
        .iter()
        .map(|element| {
            let name = element
                .query_selector("h3")
                .ok()
                .flatten()
                .and_then(|heading| heading.text_content())
                .unwrap_or_default();
            let category = element.get_attribute("data-category").unwrap_or_default();
            MenuItem::new(name.trim(), category)
        })
        .collect()
}

pub fn init(config: &FilterConfig) {
    let elements = dom::query_all(".menu-item");
    let buttons = dom::query_all(".filter-btn");
    let filter = wire_menu_filter(config, elements, buttons);

    let filter = filter.borrow();
    log::info!(
        "Menu filter ready: {} items in {} categories, showing '{}'",
        filter.index().item_count(),
        filter.index().categories().count(),
        filter.current_category()
    );
}

/// Build the filter over `cards` and hook up the `.filter-btn` controls.
pub fn wire_menu_filter(
    config: &FilterConfig,
    cards: Vec<HtmlElement>,
    buttons: Vec<HtmlElement>,
) -> MenuFilter {
    let items = read_items(&cards);
    let filter: MenuFilter = Rc::new(RefCell::new(Sequencer::new(
        &items,
        config.default_category.clone(),
        config.timing(),
        DomItems::new(cards),
        Some(Box::new(GtagSink)),
    )));
    let buttons = Rc::new(buttons);

    for button in buttons.iter() {
        let category = button.get_attribute("data-category").unwrap_or_default();

        {
            let filter = filter.clone();
            let buttons = buttons.clone();
            let clicked = button.clone();
            dom::on(button, "click", move |_| {
                let outcome = filter
                    .borrow_mut()
                    .request_category(category.as_str(), dom::now_ms());
                let RequestOutcome::Accepted(plan) = outcome else {
                    log::debug!("Filter '{}' ignored", category);
                    return;
                };
                for other in buttons.iter() {
                    dom::set_class(other, "active", false);
                    dom::set_style(other, "transform", "translateY(0)");
                }
                dom::set_class(&clicked, "active", true);
                schedule(&filter, &plan);
            });
        }

        {
            let filter = filter.clone();
            let hovered = button.clone();
            dom::on_passive(button, "mouseenter", move |_| {
                if !dom::has_class(&hovered, "active") && !filter.borrow().is_busy() {
                    dom::set_style(&hovered, "transform", "translateY(-1px)");
                }
            });
        }

        let left = button.clone();
        dom::on_passive(button, "mouseleave", move |_| {
            if !dom::has_class(&left, "active") {
                dom::set_style(&left, "transform", "translateY(0)");
            }
        });
    }
    filter
}

fn schedule(sequencer: &MenuFilter, plan: &RevealPlan) {
    for step in &plan.steps {
        let sequencer = sequencer.clone();
        if step.start_offset_ms == 0 {
            // Already displayed by `request_category`.
            dom::next_frame(move || sequencer.borrow_mut().animation_frame());
            continue;
        }
        dom::after(step.start_offset_ms, move || {
            sequencer.borrow_mut().advance(dom::now_ms());
            dom::next_frame(move || sequencer.borrow_mut().animation_frame());
        });
    }

    let sequencer = sequencer.clone();
    dom::after(plan.settle_at_ms, move || settle(sequencer));
}

fn settle(filter: MenuFilter) {
    let retry = {
        let mut sequencer = filter.borrow_mut();
        settle_step(&mut *sequencer, dom::now_ms())
    };
    if let Some(wait_ms) = retry {
        dom::after(wait_ms, move || settle(filter));
    }
}

/// Advance to `now_ms`. Returns how long to wait before trying again when the
/// settle timer fired before the sequence was due.
pub fn settle_step<S: ItemSurface>(sequencer: &mut Sequencer<S>, now_ms: u64) -> Option<u64> {
    sequencer.advance(now_ms);
    sequencer
        .next_deadline()
        .map(|deadline| deadline.saturating_sub(now_ms).max(1))
}
