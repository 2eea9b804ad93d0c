//! Selection state and keyboard-order traversal.

use super::Menu;
use crate::item::{ItemId, MenuItem};

/// Traversal direction for [`Menu::move_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the start, wrapping to the end
    Prev,
    /// Toward the end, wrapping to the start
    Next,
}

impl Menu {
    /// Step the selection through the visible items, wrapping at both ends.
    ///
    /// With nothing selected, `Next` lands on the last visible item and
    /// `Prev` on the first. If the selected item is hidden, `Next` lands on
    /// the first visible item and `Prev` on the last. Does nothing when no
    /// item is visible.
    pub fn move_selection(&mut self, direction: Direction) -> &mut Self {
        let navigable: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| !item.is_hidden())
            .map(MenuItem::id)
            .collect();
        let Some(last) = navigable.len().checked_sub(1) else {
            return self;
        };

        let current = self
            .selected
            .map(|id| navigable.iter().position(|&n| n == id));
        let target = match (current, direction) {
            (None, Direction::Next) | (Some(None), Direction::Prev) => last,
            (None, Direction::Prev) | (Some(None), Direction::Next) => 0,
            (Some(Some(i)), Direction::Next) => {
                if i == last {
                    0
                } else {
                    i + 1
                }
            }
            (Some(Some(i)), Direction::Prev) => {
                if i == 0 {
                    last
                } else {
                    i - 1
                }
            }
        };

        log::trace!("move {direction:?}: {current:?} -> {target}");
        self.select(navigable[target])
    }

    /// Make `id` the selection, moving the selected class and input focus
    /// to it. Unknown handles are ignored.
    pub fn select(&mut self, id: ItemId) -> &mut Self {
        if !self.has(id) {
            log::warn!("select ignored, {id:?} is not in the menu");
            return self;
        }

        let class = self.config.classes.selected.clone();
        if let Some(previous) = self.selected {
            if let Some(item) = self.item_mut(previous) {
                item.set_class(&class, false);
            }
        }
        if let Some(item) = self.item_mut(id) {
            item.set_class(&class, true);
            item.focus();
        }
        self.selected = Some(id);
        self
    }

    /// Drop the selection. No-op when nothing is selected.
    pub fn deselect(&mut self) -> &mut Self {
        let Some(id) = self.selected.take() else {
            return self;
        };
        let class = self.config.classes.selected.clone();
        if let Some(item) = self.item_mut(id) {
            item.set_class(&class, false);
        }
        self
    }

    /// Handle of the selected item.
    #[must_use]
    pub const fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    /// The selected item.
    #[must_use]
    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.selected.and_then(|id| self.item(id))
    }
}
