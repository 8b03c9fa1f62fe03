//! Category labels and menu items as discovered in the page markup.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Label partitioning menu items into display groups (e.g. "burger").
///
/// Cloning is O(1); the same label is shared by the index, the filter
/// state and every tracked event.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub Arc<str>);

impl Category {
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Category(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::new(label)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::new(label)
    }
}

/// Position of a menu item in markup order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub usize);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A displayable menu entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: Arc<str>,
    pub category: Category,
}

impl MenuItem {
    pub fn new(name: impl Into<Arc<str>>, category: impl Into<Category>) -> Self {
        MenuItem {
            name: name.into(),
            category: category.into(),
        }
    }
}
