//! [`revenge_core::ItemOracle`] backed by the loaded item catalog.
use revenge_core::{Item, ItemId, ItemOracle};

/// ItemOracle implementation with static item definitions.
///
/// Keeps catalog order, which is the order the selection cursor walks.
pub struct ItemOracleImpl {
    items: Vec<Item>,
}

impl ItemOracleImpl {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Add an item definition, replacing any existing one with the same id.
    pub fn add_item(&mut self, item: Item) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }
}

impl ItemOracle for ItemOracleImpl {
    fn item(&self, id: ItemId) -> Option<Item> {
        self.items.iter().find(|item| item.id == id).cloned()
    }

    fn all_items(&self) -> Vec<Item> {
        self.items.clone()
    }
}
