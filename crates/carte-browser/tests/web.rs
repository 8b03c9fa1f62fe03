#![cfg(target_arch = "wasm32")]

use carte::config::{FilterConfig, OrderConfig};
use carte::{MenuItem, RevealTiming, Sequencer};
use carte_browser::{DomItems, OrderController, read_items, settle_step, wire_menu_filter};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn card(name: &str, category: &str) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    element.set_class_name("menu-item");
    element.set_attribute("data-category", category).unwrap();
    element.set_inner_html(&format!("<h3> {name} </h3>"));
    element
}

fn filter_button(category: &str) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element: HtmlElement = document.create_element("button").unwrap().dyn_into().unwrap();
    element.set_class_name("filter-btn");
    element.set_attribute("data-category", category).unwrap();
    element
}

fn has_class(element: &HtmlElement, class: &str) -> bool {
    element.class_list().contains(class)
}

fn style(element: &HtmlElement, property: &str) -> String {
    element.style().get_property_value(property).unwrap()
}

#[wasm_bindgen_test]
fn reads_cards_in_document_order() {
    let cards = vec![card("Classic", "burger"), card("Margherita", "pizza")];
    let items = read_items(&cards);
    assert_eq!(
        items,
        vec![
            MenuItem::new("Classic", "burger"),
            MenuItem::new("Margherita", "pizza"),
        ]
    );
}

#[wasm_bindgen_test]
fn default_category_is_applied_to_the_cards() {
    let cards = vec![
        card("Classic", "burger"),
        card("Margherita", "pizza"),
        card("Double", "burger"),
    ];
    let items = read_items(&cards);
    let _sequencer = Sequencer::new(
        &items,
        "burger",
        RevealTiming::default(),
        DomItems::new(cards.clone()),
        None,
    );

    assert_eq!(style(&cards[0], "display"), "block");
    assert_eq!(style(&cards[0], "opacity"), "1");
    assert_eq!(style(&cards[1], "display"), "none");
    assert_eq!(style(&cards[1], "opacity"), "0");
    assert_eq!(style(&cards[2], "transform"), "scale(1)");
}

#[wasm_bindgen_test]
fn accepted_request_hides_outgoing_cards_immediately() {
    let cards = vec![card("Classic", "burger"), card("Margherita", "pizza")];
    let items = read_items(&cards);
    let mut sequencer = Sequencer::new(
        &items,
        "burger",
        RevealTiming::default(),
        DomItems::new(cards.clone()),
        None,
    );

    assert!(sequencer.request_category("pizza", 0).is_accepted());
    assert_eq!(style(&cards[0], "display"), "none");
    assert_eq!(style(&cards[1], "display"), "block");

    sequencer.animation_frame();
    assert_eq!(style(&cards[1], "opacity"), "1");
}

#[wasm_bindgen_test]
fn filter_buttons_follow_accepted_requests_only() {
    let cards = vec![
        card("Classic", "burger"),
        card("Margherita", "pizza"),
        card("Cola", "drinks"),
    ];
    let buttons = vec![
        filter_button("burger"),
        filter_button("pizza"),
        filter_button("drinks"),
    ];
    buttons[0].class_list().add_1("active").unwrap();
    let filter = wire_menu_filter(&FilterConfig::default(), cards.clone(), buttons.clone());

    buttons[1].click();
    assert!(filter.borrow().is_busy());
    assert!(!has_class(&buttons[0], "active"));
    assert!(has_class(&buttons[1], "active"));
    assert_eq!(style(&buttons[0], "transform"), "translateY(0)");
    assert_eq!(style(&cards[0], "display"), "none");

    // Dropped while the reveal is in flight.
    buttons[2].click();
    assert!(has_class(&buttons[1], "active"));
    assert!(!has_class(&buttons[2], "active"));
    assert_eq!(filter.borrow().current_category().as_str(), "pizza");

    // No hover lift while busy.
    buttons[2]
        .dispatch_event(&Event::new("mouseenter").unwrap())
        .unwrap();
    assert_eq!(style(&buttons[2], "transform"), "translateY(0)");
}

#[wasm_bindgen_test]
fn hover_lifts_inactive_button_when_idle() {
    let cards = vec![card("Classic", "burger"), card("Margherita", "pizza")];
    let buttons = vec![filter_button("burger"), filter_button("pizza")];
    let _filter = wire_menu_filter(&FilterConfig::default(), cards, buttons.clone());

    buttons[1]
        .dispatch_event(&Event::new("mouseenter").unwrap())
        .unwrap();
    assert_eq!(style(&buttons[1], "transform"), "translateY(-1px)");
    buttons[1]
        .dispatch_event(&Event::new("mouseleave").unwrap())
        .unwrap();
    assert_eq!(style(&buttons[1], "transform"), "translateY(0)");
}

#[wasm_bindgen_test]
fn settle_rearms_for_the_remaining_window_after_clock_steps_back() {
    let cards = vec![card("Classic", "burger"), card("Margherita", "pizza")];
    let items = read_items(&cards);
    let mut sequencer = Sequencer::new(
        &items,
        "burger",
        RevealTiming::default(),
        DomItems::new(cards.clone()),
        None,
    );
    assert!(sequencer.request_category("pizza", 1_000_000).is_accepted());

    let wait_ms = settle_step(&mut sequencer, 940_000).unwrap();
    assert_eq!(wait_ms, 100);
    assert!(sequencer.is_busy());

    assert_eq!(settle_step(&mut sequencer, 940_000 + wait_ms), None);
    assert!(!sequencer.is_busy());
    assert_eq!(style(&cards[1], "opacity"), "1");
}

#[wasm_bindgen_test]
fn order_item_name_is_inserted_as_text() {
    let orders = OrderController::new(OrderConfig::default());
    orders.show("<b>x</b>");

    let document = web_sys::window().unwrap().document().unwrap();
    let strong = document
        .query_selector(".order-modal .order-question strong")
        .unwrap()
        .unwrap();
    assert_eq!(strong.text_content().as_deref(), Some("<b>x</b>"));
    assert_eq!(strong.child_element_count(), 0);

    orders.close();
    assert!(document.query_selector(".order-modal").unwrap().is_none());
}
