//! Order buttons and the confirmation modal.

use std::cell::RefCell;
use std::rc::Rc;

use carte::config::OrderConfig;
use carte::order::{
    CANCEL_LABEL, MODAL_TITLE, OrderModal, OrderPrompt, PRESSED_TRANSFORM, WHATSAPP_ICON,
    WHATSAPP_LABEL,
};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;

const MODAL_CSS: &str = "
.order-modal {
  position: fixed;
  top: 0;
  left: 0;
  width: 100%;
  height: 100%;
  background: rgba(0, 0, 0, 0.5);
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 10000;
  animation: fadeIn 0.3s ease;
}
.modal-content {
  background: white;
  border-radius: 16px;
  padding: 2rem;
  max-width: 400px;
  width: 90%;
  text-align: center;
  animation: slideUp 0.3s ease;
}
.modal-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  margin-bottom: 1rem;
}
.modal-close {
  background: none;
  border: none;
  font-size: 1.5rem;
  cursor: pointer;
  color: #666;
}
.modal-actions {
  display: flex;
  gap: 1rem;
  justify-content: center;
  margin-top: 1.5rem;
}
@keyframes fadeIn { from { opacity: 0; } to { opacity: 1; } }
@keyframes slideUp { from { transform: translateY(20px); opacity: 0; } to { transform: translateY(0); opacity: 1; } }
";

/// Modal state plus the element currently mounted for it.
pub struct OrderController {
    modal: RefCell<OrderModal>,
    mounted: RefCell<Option<HtmlElement>>,
}

impl OrderController {
    pub fn new(config: OrderConfig) -> Rc<Self> {
        Rc::new(OrderController {
            modal: RefCell::new(OrderModal::new(config)),
            mounted: RefCell::new(None),
        })
    }

    pub fn show(self: &Rc<Self>, item_name: &str) {
        let prompt = self.modal.borrow_mut().open(item_name).cloned();
        self.mount(prompt);
    }

    fn show_for(self: &Rc<Self>, data_item: Option<&str>, card_heading: Option<&str>) {
        let prompt = self
            .modal
            .borrow_mut()
            .open_for(data_item, card_heading)
            .cloned();
        self.mount(prompt);
    }

    pub fn close(&self) {
        if !self.modal.borrow_mut().close() {
            return;
        }
        self.unmount();
    }

    fn unmount(&self) {
        if let Some(element) = self.mounted.borrow_mut().take() {
            element.remove();
        }
        dom::lock_body_scroll(false);
    }

    fn mount(self: &Rc<Self>, prompt: Option<OrderPrompt>) {
        let Some(prompt) = prompt else {
            log::debug!("Order modal already open");
            return;
        };
        let Some(element) = build_modal(&prompt) else {
            self.modal.borrow_mut().close();
            return;
        };
        let Some(body) = dom::document().and_then(|document| document.body()) else {
            self.modal.borrow_mut().close();
            return;
        };
        if body.append_child(&element).is_err() {
            self.modal.borrow_mut().close();
            return;
        }

        if let Some(close) = dom::query_all_in(&element, ".modal-close").first() {
            let controller = self.clone();
            dom::on(close, "click", move |_| controller.close());
        }
        if let Some(cancel) = dom::query_all_in(&element, ".btn-secondary").first() {
            let controller = self.clone();
            dom::on(cancel, "click", move |_| controller.close());
        }
        {
            let controller = self.clone();
            let backdrop = element.clone();
            dom::on(&element, "click", move |event| {
                let on_backdrop = dom::is_event_target(&event, &backdrop);
                let closed = controller.modal.borrow_mut().on_click(on_backdrop);
                if closed {
                    controller.unmount();
                }
            });
        }

        *self.mounted.borrow_mut() = Some(element);
        dom::lock_body_scroll(true);
        log::info!("Order confirmation for '{}'", prompt.item_name);
    }
}

fn build_modal(prompt: &OrderPrompt) -> Option<HtmlElement> {
    let document = dom::document()?;
    let element: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    element.set_class_name("order-modal");
    element.set_inner_html(&format!(
        r#"<div class="modal-content">
  <div class="modal-header">
    <h3>{MODAL_TITLE}</h3>
    <button class="modal-close">&times;</button>
  </div>
  <div class="modal-body">
    <p class="order-question"></p>
    <div class="modal-actions">
      <button class="btn btn-secondary">{CANCEL_LABEL}</button>
      <a class="btn btn-primary" target="_blank" rel="noopener">
        <span>{WHATSAPP_LABEL}</span>
        <span class="btn-icon">{WHATSAPP_ICON}</span>
      </a>
    </div>
  </div>
</div>"#
    ));

    // Item names come from page markup or script callers; keep them as text.
    let question = element.query_selector(".order-question").ok()??;
    let (before, name, after) = prompt.question_parts();
    let strong = document.create_element("strong").ok()?;
    strong.set_text_content(Some(name));
    question.append_with_str_1(before).ok()?;
    question.append_with_node_1(&strong).ok()?;
    question.append_with_str_1(after).ok()?;

    let link = element.query_selector(".btn-primary").ok()??;
    link.set_attribute("href", &prompt.whatsapp_url).ok()?;
    Some(element)
}

pub fn init(config: &OrderConfig) -> Rc<OrderController> {
    dom::inject_style(MODAL_CSS);
    let controller = OrderController::new(config.clone());
    let press_ms = config.press_ms;

    for button in dom::query_all(".order-btn") {
        let controller = controller.clone();
        let pressed = button.clone();
        dom::on(&button, "click", move |event| {
            event.prevent_default();

            dom::set_style(&pressed, "transform", PRESSED_TRANSFORM);
            let released = pressed.clone();
            dom::after(press_ms, move || dom::set_style(&released, "transform", ""));

            let data_item = pressed.get_attribute("data-item");
            let heading = pressed
                .closest(".menu-item")
                .ok()
                .flatten()
                .and_then(|card| card.query_selector("h3").ok().flatten())
                .and_then(|heading| heading.text_content());
            controller.show_for(data_item.as_deref(), heading.as_deref());
        });
    }
    controller
}
