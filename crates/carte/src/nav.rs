//! Mobile navigation menu and section tracking.

use serde::{Deserialize, Serialize};

/// Inline style for one hamburger bar. `None` leaves the property untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarStyle {
    pub transform: Option<&'static str>,
    pub opacity: Option<&'static str>,
}

const OPEN_BARS: [BarStyle; 3] = [
    BarStyle {
        transform: Some("rotate(45deg) translate(5px, 5px)"),
        opacity: None,
    },
    BarStyle {
        transform: None,
        opacity: Some("0"),
    },
    BarStyle {
        transform: Some("rotate(-45deg) translate(7px, -6px)"),
        opacity: None,
    },
];

const CLOSED_BAR: BarStyle = BarStyle {
    transform: Some("none"),
    opacity: Some("1"),
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns `true` if the menu was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// A click anywhere on the page closes the menu unless it hit the toggle
    /// button or the link list.
    pub fn on_document_click(&mut self, inside_toggle: bool, inside_list: bool) -> bool {
        if inside_toggle || inside_list {
            return false;
        }
        self.close()
    }

    pub fn bar_styles(&self) -> [BarStyle; 3] {
        if self.open { OPEN_BARS } else { [CLOSED_BAR; 3] }
    }
}

/// Layout of a `section[id]` element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        SectionBounds {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Scroll position that brings a section's top just below the fixed navbar.
pub fn scroll_target(section_top: f64, navbar_offset: f64) -> f64 {
    section_top - navbar_offset
}

/// The last section, in document order, containing `scroll_y + marker_offset`.
pub fn active_section(
    sections: &[SectionBounds],
    scroll_y: f64,
    marker_offset: f64,
) -> Option<&str> {
    let marker = scroll_y + marker_offset;
    sections
        .iter()
        .rev()
        .find(|section| section.contains(marker))
        .map(|section| section.id.as_str())
}

/// Whether a nav link `href` (e.g. `#menu`) points at `section_id`.
pub fn link_targets(href: &str, section_id: &str) -> bool {
    href.strip_prefix('#') == Some(section_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_and_bars() {
        let mut menu = NavMenu::default();
        assert_eq!(menu.bar_styles(), [CLOSED_BAR; 3]);

        assert!(menu.toggle());
        let bars = menu.bar_styles();
        assert_eq!(bars[0].transform, Some("rotate(45deg) translate(5px, 5px)"));
        assert_eq!(bars[1].opacity, Some("0"));
        assert_eq!(bars[2].transform, Some("rotate(-45deg) translate(7px, -6px)"));

        assert!(!menu.toggle());
    }

    #[test]
    fn outside_click_closes() {
        let mut menu = NavMenu::default();
        menu.toggle();
        assert!(!menu.on_document_click(true, false));
        assert!(!menu.on_document_click(false, true));
        assert!(menu.is_open());
        assert!(menu.on_document_click(false, false));
        assert!(!menu.is_open());
        assert!(!menu.close());
    }

    #[test]
    fn picks_section_under_marker() {
        let sections = [
            SectionBounds::new("home", 0.0, 600.0),
            SectionBounds::new("menu", 600.0, 1200.0),
            SectionBounds::new("contact", 1800.0, 400.0),
        ];
        assert_eq!(active_section(&sections, 0.0, 100.0), Some("home"));
        assert_eq!(active_section(&sections, 500.0, 100.0), Some("menu"));
        assert_eq!(active_section(&sections, 1750.0, 100.0), Some("contact"));
        assert_eq!(active_section(&sections, 2200.0, 100.0), None);
    }

    #[test]
    fn overlapping_sections_prefer_later() {
        let sections = [
            SectionBounds::new("hero", 0.0, 1000.0),
            SectionBounds::new("about", 400.0, 300.0),
        ];
        assert_eq!(active_section(&sections, 400.0, 100.0), Some("about"));
    }

    #[test]
    fn scroll_target_and_links() {
        assert_eq!(scroll_target(900.0, 80.0), 820.0);
        assert!(link_targets("#menu", "menu"));
        assert!(!link_targets("menu", "menu"));
        assert!(!link_targets("#menus", "menu"));
    }
}
