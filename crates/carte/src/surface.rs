//! Rendering capability used by the sequencer.
//!
//! The sequencer never touches styles directly. The browser layer implements
//! [`ItemSurface`] over real elements; tests and the CLI use
//! [`crate::harness::RecordingSurface`].

use serde::Serialize;

use crate::category::ItemId;

/// Opacity/scale state of an item's transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    Hidden,
    Visible,
}

impl VisualState {
    pub fn opacity(self) -> &'static str {
        match self {
            VisualState::Hidden => "0",
            VisualState::Visible => "1",
        }
    }

    pub fn transform(self) -> &'static str {
        match self {
            VisualState::Hidden => "scale(0.95)",
            VisualState::Visible => "scale(1)",
        }
    }
}

pub trait ItemSurface {
    /// Put the item into the layout (display on).
    fn show(&mut self, item: ItemId);
    /// Take the item out of the layout (display off).
    fn hide(&mut self, item: ItemId);
    fn set_visual_state(&mut self, item: ItemId, state: VisualState);
}

impl<S: ItemSurface + ?Sized> ItemSurface for &mut S {
    fn show(&mut self, item: ItemId) {
        (**self).show(item);
    }

    fn hide(&mut self, item: ItemId) {
        (**self).hide(item);
    }

    fn set_visual_state(&mut self, item: ItemId, state: VisualState) {
        (**self).set_visual_state(item, state);
    }
}

impl<S: ItemSurface + ?Sized> ItemSurface for Box<S> {
    fn show(&mut self, item: ItemId) {
        (**self).show(item);
    }

    fn hide(&mut self, item: ItemId) {
        (**self).hide(item);
    }

    fn set_visual_state(&mut self, item: ItemId, state: VisualState) {
        (**self).set_visual_state(item, state);
    }
}
