//! Dismissable overlays (developer info popup, order modal) and body scroll lock.

/// Body `overflow` while an overlay is open / closed.
pub fn body_overflow(locked: bool) -> &'static str {
    if locked { "hidden" } else { "visible" }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlay {
    open: bool,
    dismiss_on_escape: bool,
}

impl Overlay {
    pub fn new(dismiss_on_escape: bool) -> Self {
        Overlay {
            open: false,
            dismiss_on_escape,
        }
    }

    /// Developer info popup: Escape closes it.
    pub fn dev_popup() -> Self {
        Overlay::new(true)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns `true` if the overlay was closed before.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    /// Returns `true` if the overlay was open before.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Clicks on the backdrop itself close; clicks inside the content don't.
    pub fn on_click(&mut self, target_is_backdrop: bool) -> bool {
        target_is_backdrop && self.close()
    }

    pub fn on_key(&mut self, key: &str) -> bool {
        self.dismiss_on_escape && key == "Escape" && self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_closes_only_when_open() {
        let mut popup = Overlay::dev_popup();
        assert!(!popup.on_key("Escape"));
        popup.open();
        assert!(!popup.on_key("Enter"));
        assert!(popup.on_key("Escape"));
        assert!(!popup.is_open());
    }

    #[test]
    fn backdrop_click() {
        let mut popup = Overlay::dev_popup();
        popup.open();
        assert!(!popup.on_click(false));
        assert!(popup.is_open());
        assert!(popup.on_click(true));
        assert!(!popup.is_open());
    }

    #[test]
    fn escape_ignored_when_not_dismissable() {
        let mut modal = Overlay::new(false);
        modal.open();
        assert!(!modal.on_key("Escape"));
        assert!(modal.is_open());
    }

    #[test]
    fn open_reports_transition() {
        let mut popup = Overlay::dev_popup();
        assert!(popup.open());
        assert!(!popup.open());
        assert_eq!(body_overflow(popup.is_open()), "hidden");
        popup.close();
        assert_eq!(body_overflow(popup.is_open()), "visible");
    }
}
