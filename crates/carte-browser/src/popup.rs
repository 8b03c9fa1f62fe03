//! Developer info popup opened from the footer tag.

use std::cell::RefCell;
use std::rc::Rc;

use carte::popup::Overlay;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};

use crate::dom;

struct DevPopup {
    overlay: RefCell<Overlay>,
    element: HtmlElement,
}

impl DevPopup {
    fn render(&self) {
        let open = self.overlay.borrow().is_open();
        dom::set_class(&self.element, "active", open);
        dom::lock_body_scroll(open);
    }

    fn update(&self, change: impl FnOnce(&mut Overlay) -> bool) {
        let changed = change(&mut self.overlay.borrow_mut());
        if changed {
            self.render();
        }
    }
}

pub fn init() {
    let (Some(tag), Some(element), Some(close)) = (
        dom::by_id("devTag"),
        dom::by_id("devPopup"),
        dom::by_id("devPopupClose"),
    ) else {
        return;
    };
    let popup = Rc::new(DevPopup {
        overlay: RefCell::new(Overlay::dev_popup()),
        element,
    });

    {
        let popup = popup.clone();
        dom::on(&tag, "click", move |_| popup.update(Overlay::open));
    }
    {
        let popup = popup.clone();
        dom::on(&close, "click", move |_| popup.update(Overlay::close));
    }
    {
        let popup = popup.clone();
        let backdrop = popup.element.clone();
        dom::on(&backdrop, "click", move |event| {
            let on_backdrop = dom::is_event_target(&event, &popup.element);
            popup.update(|overlay| overlay.on_click(on_backdrop));
        });
    }
    if let Some(document) = dom::document() {
        dom::on(&document, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                let key = event.key();
                popup.update(|overlay| overlay.on_key(&key));
            }
        });
    }
}
