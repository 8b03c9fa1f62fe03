use carte::config::ScrollConfig;
use carte::scroll::ScrollTracker;

use crate::{dom, nav};

pub fn init(config: &ScrollConfig) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navbar = dom::by_id("navbar");
    let cta = dom::by_id("floatingCta");
    let marker_offset = config.active_marker_offset;
    let mut tracker = ScrollTracker::new(config.clone());

    dom::on_passive(&window, "scroll", move |_| {
        let update = tracker.on_scroll(dom::scroll_y(), dom::now_ms());

        if let Some(navbar) = &navbar {
            let background = update.navbar.background;
            dom::set_style(navbar, "background", background.background());
            dom::set_style(navbar, "backdrop-filter", background.backdrop_filter());
            dom::set_style(navbar, "transform", update.navbar.transform());
        }
        if let Some(cta) = &cta {
            dom::set_class(cta, "visible", update.cta_visible);
        }
        if update.refresh_active_section {
            nav::refresh_active_link(marker_offset);
        }
    });
}
