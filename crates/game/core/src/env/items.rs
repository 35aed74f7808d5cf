use crate::item::{Item, ItemId};

/// Read-only item catalog.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: ItemId) -> Option<Item>;

    /// Every item definition, in catalog order.
    fn all_items(&self) -> Vec<Item>;

    /// Items unlocked regardless of stage progress.
    fn starter_items(&self) -> Vec<ItemId> {
        self.all_items()
            .into_iter()
            .filter(|item| item.starter)
            .map(|item| item.id)
            .collect()
    }
}
