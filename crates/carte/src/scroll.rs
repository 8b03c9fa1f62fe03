//! Scroll-driven navbar and call-to-action state.

use crate::config::ScrollConfig;
use crate::gate::LeadingEdge;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavbarBackground {
    Solid,
    Translucent,
}

impl NavbarBackground {
    pub fn background(self) -> &'static str {
        match self {
            NavbarBackground::Solid => "var(--white)",
            NavbarBackground::Translucent => "rgba(255, 255, 255, 0.95)",
        }
    }

    pub fn backdrop_filter(self) -> &'static str {
        match self {
            NavbarBackground::Solid => "none",
            NavbarBackground::Translucent => "blur(10px)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavbarFrame {
    pub background: NavbarBackground,
    pub hidden: bool,
}

impl NavbarFrame {
    pub fn transform(&self) -> &'static str {
        if self.hidden { "translateY(-100%)" } else { "translateY(0)" }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollUpdate {
    pub navbar: NavbarFrame,
    pub cta_visible: bool,
    /// Recompute the active nav link (leading edge of a scroll burst only).
    pub refresh_active_section: bool,
}

pub struct ScrollTracker {
    config: ScrollConfig,
    last_scroll_top: f64,
    burst: LeadingEdge,
}

impl ScrollTracker {
    pub fn new(config: ScrollConfig) -> Self {
        let burst = LeadingEdge::new(config.quiet_ms);
        ScrollTracker {
            config,
            last_scroll_top: 0.0,
            burst,
        }
    }

    pub fn on_scroll(&mut self, scroll_top: f64, now_ms: u64) -> ScrollUpdate {
        let background = if scroll_top > self.config.navbar_solid_threshold {
            NavbarBackground::Translucent
        } else {
            NavbarBackground::Solid
        };
        let scrolling_down = scroll_top > self.last_scroll_top;
        let hidden = scrolling_down && scroll_top > self.config.navbar_hide_threshold;
        self.last_scroll_top = scroll_top;

        ScrollUpdate {
            navbar: NavbarFrame { background, hidden },
            cta_visible: cta_visible(scroll_top, &self.config),
            refresh_active_section: self.burst.hit(now_ms),
        }
    }
}

pub fn cta_visible(scroll_top: f64, config: &ScrollConfig) -> bool {
    scroll_top > config.cta_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ScrollTracker {
        ScrollTracker::new(ScrollConfig::default())
    }

    #[test]
    fn background_switches_past_threshold() {
        let mut tracker = tracker();
        let update = tracker.on_scroll(100.0, 0);
        assert_eq!(update.navbar.background, NavbarBackground::Solid);
        let update = tracker.on_scroll(101.0, 10);
        assert_eq!(update.navbar.background, NavbarBackground::Translucent);
        assert_eq!(update.navbar.background.backdrop_filter(), "blur(10px)");
    }

    #[test]
    fn hides_only_when_scrolling_down_past_threshold() {
        let mut tracker = tracker();
        assert!(!tracker.on_scroll(150.0, 0).navbar.hidden);
        assert!(tracker.on_scroll(250.0, 10).navbar.hidden);
        let update = tracker.on_scroll(240.0, 20);
        assert!(!update.navbar.hidden);
        assert_eq!(update.navbar.transform(), "translateY(0)");
    }

    #[test]
    fn cta_after_five_hundred() {
        let mut tracker = tracker();
        assert!(!tracker.on_scroll(500.0, 0).cta_visible);
        assert!(tracker.on_scroll(501.0, 5).cta_visible);
    }

    #[test]
    fn active_section_refresh_on_burst_start() {
        let mut tracker = tracker();
        assert!(tracker.on_scroll(10.0, 0).refresh_active_section);
        assert!(!tracker.on_scroll(20.0, 50).refresh_active_section);
        assert!(!tracker.on_scroll(30.0, 120).refresh_active_section);
        assert!(tracker.on_scroll(40.0, 400).refresh_active_section);
    }
}
