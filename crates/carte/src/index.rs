//! Category → items index, built once from the menu markup.

use indexmap::IndexMap;

use crate::category::{Category, ItemId, MenuItem};

/// Items grouped by category label.
///
/// Buckets keep first-seen markup order, both for the categories
/// themselves and for the items inside each bucket. Every item lands in
/// exactly one bucket, and a bucket only exists if it has at least one item.
#[derive(Clone, Debug, Default)]
pub struct CategoryIndex {
    buckets: IndexMap<Category, Vec<ItemId>>,
    item_count: usize,
}

impl CategoryIndex {
    /// Single pass over `items`; `ItemId(n)` is the n-th item.
    pub fn build(items: &[MenuItem]) -> Self {
        let mut buckets: IndexMap<Category, Vec<ItemId>> = IndexMap::new();
        for (position, item) in items.iter().enumerate() {
            buckets
                .entry(item.category.clone())
                .or_default()
                .push(ItemId(position));
        }
        CategoryIndex {
            buckets,
            item_count: items.len(),
        }
    }

    /// Items of `category` in markup order. Unknown categories give an empty slice.
    pub fn bucket(&self, category: &Category) -> &[ItemId] {
        self.buckets
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.buckets.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.buckets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &[ItemId])> {
        self.buckets
            .iter()
            .map(|(category, items)| (category, items.as_slice()))
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}
