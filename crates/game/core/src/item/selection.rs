use super::ItemId;

/// Cursor over the unlocked items plus the item chosen for the next attack.
///
/// Navigation wraps in both directions. Moving the cursor also records the
/// highlighted item as the pending choice.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSelection {
    available: Vec<ItemId>,
    cursor: usize,
    pending: Option<ItemId>,
}

impl ItemSelection {
    pub fn new(available: Vec<ItemId>) -> Self {
        let mut selection = Self::default();
        selection.refresh(available);
        selection
    }

    pub fn available(&self) -> &[ItemId] {
        &self.available
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Item under the cursor.
    pub fn current(&self) -> Option<ItemId> {
        self.available.get(self.cursor).copied()
    }

    /// Item chosen for the next attack, if any.
    pub fn pending(&self) -> Option<ItemId> {
        self.pending
    }

    /// Replaces the available list, keeping the cursor if it is still in range.
    pub fn refresh(&mut self, available: Vec<ItemId>) {
        self.available = available;
        if self.cursor >= self.available.len() {
            self.cursor = 0;
        }
        if self
            .pending
            .is_some_and(|pending| !self.available.contains(&pending))
        {
            self.pending = None;
        }
    }

    pub fn select_next(&mut self) -> Option<ItemId> {
        if self.available.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.available.len();
        self.pending = self.current();
        self.pending
    }

    pub fn select_previous(&mut self) -> Option<ItemId> {
        if self.available.is_empty() {
            return None;
        }
        self.cursor = self
            .cursor
            .checked_sub(1)
            .unwrap_or(self.available.len() - 1);
        self.pending = self.current();
        self.pending
    }

    /// Moves the cursor to `id` and records it. Returns false if `id` is not available.
    pub fn select(&mut self, id: ItemId) -> bool {
        match self.available.iter().position(|item| *item == id) {
            Some(index) => {
                self.cursor = index;
                self.pending = Some(id);
                true
            }
            None => false,
        }
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u16]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId).collect()
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut selection = ItemSelection::new(ids(&[0, 1, 2]));
        assert_eq!(selection.select_previous(), Some(ItemId(2)));
        assert_eq!(selection.select_next(), Some(ItemId(0)));
        assert_eq!(selection.select_next(), Some(ItemId(1)));
        assert_eq!(selection.pending(), Some(ItemId(1)));
    }

    #[test]
    fn refresh_keeps_valid_cursor() {
        let mut selection = ItemSelection::new(ids(&[0, 1]));
        selection.select_next();
        selection.refresh(ids(&[0, 1, 2]));
        assert_eq!(selection.cursor(), 1);
        assert_eq!(selection.pending(), Some(ItemId(1)));

        selection.refresh(ids(&[0]));
        assert_eq!(selection.cursor(), 0);
        assert_eq!(selection.pending(), None);
    }

    #[test]
    fn empty_selection_has_nothing_to_pick() {
        let mut selection = ItemSelection::default();
        assert_eq!(selection.select_next(), None);
        assert_eq!(selection.select_previous(), None);
        assert!(!selection.select(ItemId(0)));
    }
}
