//! Order confirmation modal with the messaging deep link.

use crate::config::OrderConfig;
use crate::popup::Overlay;

pub const MODAL_TITLE: &str = "تأكيد الطلب";
pub const CANCEL_LABEL: &str = "إلغاء";
pub const WHATSAPP_LABEL: &str = "واتساب الآن";
pub const WHATSAPP_ICON: &str = "📱";

/// Button transform during the press animation.
pub const PRESSED_TRANSFORM: &str = "scale(0.95)";

/// First non-blank of the button's `data-item`, the card heading, the fallback.
pub fn resolve_item_name<'a>(
    data_item: Option<&'a str>,
    card_heading: Option<&'a str>,
    fallback: &'a str,
) -> &'a str {
    data_item
        .filter(|name| !name.trim().is_empty())
        .or(card_heading.filter(|name| !name.trim().is_empty()))
        .unwrap_or(fallback)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderPrompt {
    pub item_name: String,
    pub whatsapp_url: String,
}

impl OrderPrompt {
    /// Question shown in the modal body, split around the bolded item name.
    pub fn question_parts(&self) -> (&'static str, &str, &'static str) {
        ("هل تريد طلب ", self.item_name.as_str(), "؟")
    }
}

pub struct OrderModal {
    config: OrderConfig,
    overlay: Overlay,
    prompt: Option<OrderPrompt>,
}

impl OrderModal {
    pub fn new(config: OrderConfig) -> Self {
        OrderModal {
            config,
            overlay: Overlay::new(false),
            prompt: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    pub fn prompt(&self) -> Option<&OrderPrompt> {
        self.prompt.as_ref()
    }

    /// Open the modal for `item_name`. Only one modal exists at a time; while
    /// one is open further requests are ignored and `None` is returned.
    pub fn open(&mut self, item_name: &str) -> Option<&OrderPrompt> {
        if !self.overlay.open() {
            return None;
        }
        self.prompt = Some(OrderPrompt {
            item_name: item_name.to_string(),
            whatsapp_url: self.config.whatsapp_url.clone(),
        });
        self.prompt.as_ref()
    }

    /// Resolve the item name the way order buttons do, then open.
    pub fn open_for(
        &mut self,
        data_item: Option<&str>,
        card_heading: Option<&str>,
    ) -> Option<&OrderPrompt> {
        let name = resolve_item_name(data_item, card_heading, &self.config.fallback_item_name)
            .to_string();
        self.open(&name)
    }

    pub fn close(&mut self) -> bool {
        self.prompt = None;
        self.overlay.close()
    }

    pub fn on_click(&mut self, target_is_backdrop: bool) -> bool {
        if self.overlay.on_click(target_is_backdrop) {
            self.prompt = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_name_fallback_chain() {
        assert_eq!(resolve_item_name(Some("Zinger"), Some("Classic"), "x"), "Zinger");
        assert_eq!(resolve_item_name(None, Some("Classic"), "x"), "Classic");
        assert_eq!(resolve_item_name(Some("  "), Some("Classic"), "x"), "Classic");
        assert_eq!(resolve_item_name(None, None, "x"), "x");
        assert_eq!(resolve_item_name(Some(""), Some(""), "x"), "x");
    }

    #[test]
    fn open_uses_configured_link() {
        let mut modal = OrderModal::new(OrderConfig::default());
        let prompt = modal.open_for(None, None).cloned().unwrap();
        assert_eq!(prompt.item_name, "المنتج المحدد");
        assert_eq!(prompt.whatsapp_url, "https://wa.me/+963996222278");
        assert_eq!(prompt.question_parts().1, "المنتج المحدد");
    }

    #[test]
    fn single_modal_at_a_time() {
        let mut modal = OrderModal::new(OrderConfig::default());
        assert!(modal.open("Classic").is_some());
        assert!(modal.open("Double").is_none());
        assert_eq!(modal.prompt().unwrap().item_name, "Classic");

        assert!(!modal.on_click(false));
        assert!(modal.on_click(true));
        assert!(modal.prompt().is_none());
        assert!(modal.open("Double").is_some());
        assert!(modal.close());
        assert!(!modal.is_open());
    }
}
