//! Item registry: add, look up, replace, remove, and show/hide items.

use super::Menu;
use crate::bindings::Role;
use crate::emitter::{events, Payload};
use crate::error::MenuError;
use crate::item::{ItemId, ItemSpec, MenuItem};
use popmenu_core::{slugify, EventKind, Scope};

impl Menu {
    /// Append an item.
    ///
    /// A visible item already carrying the same slug is hidden, so the most
    /// recently added item wins navigation for that slug.
    pub fn add(&mut self, spec: impl Into<ItemSpec>) -> &mut Self {
        self.push(spec);
        self
    }

    /// Like [`add`](Self::add), returning the new item's handle.
    pub fn push(&mut self, spec: impl Into<ItemSpec>) -> ItemId {
        let item = self.create_item(spec.into());
        let id = item.id();
        self.items.push(item);
        id
    }

    fn create_item(&mut self, spec: ItemSpec) -> MenuItem {
        let slug = spec.resolved_slug();
        for existing in self
            .items
            .iter_mut()
            .filter(|i| i.slug() == slug && !i.is_hidden())
        {
            log::trace!("slug {slug:?} superseded, hiding {:?}", existing.id());
            existing.set_hidden(true);
        }

        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;

        let mut surface = self
            .backend
            .create_item_surface(self.surface.id(), spec.text());
        surface.set_class(&self.config.classes.item(&slug), true);
        let scope = Scope::Surface(surface.id());

        let mut item = MenuItem::new(id, spec, surface);
        for (kind, role) in [
            (EventKind::PointerDown, Role::ItemPress(id)),
            (EventKind::PointerUp, Role::ItemRelease(id)),
            (EventKind::Click, Role::ItemClick(id)),
        ] {
            let listener = self.backend.listen(scope, kind);
            self.bindings.bind(listener, role);
            item.listeners.push(listener);
        }
        item
    }

    /// Tear down an item that has left the sequence.
    fn release(&mut self, item: &mut MenuItem) {
        for listener in item.listeners.drain(..) {
            self.bindings.unbind(listener);
            self.backend.unlisten(listener);
        }
        item.destroy_surface();
        if self.selected == Some(item.id()) {
            self.selected = None;
        }
    }

    fn find(&self, slug: &str) -> Result<usize, MenuError> {
        self.items
            .iter()
            .position(|item| item.slug() == slug)
            .ok_or_else(|| {
                log::warn!("no menu item with slug {slug:?}");
                MenuError::NotFound {
                    slug: slug.to_string(),
                }
            })
    }

    /// First item, in insertion order, whose slug matches `slug` after
    /// normalization.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&MenuItem> {
        let slug = slugify(slug);
        self.items.iter().find(|item| item.slug() == slug)
    }

    /// Item with handle `id`.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether the item with handle `id` is in the menu.
    #[must_use]
    pub fn has(&self, id: ItemId) -> bool {
        self.position_of(id).is_some()
    }

    /// Position of the item with handle `id`.
    #[must_use]
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.position_of(id)
    }

    /// Remove the first item matching `slug`, destroying its surface, and
    /// publish [`events::REMOVE`].
    ///
    /// # Errors
    ///
    /// [`MenuError::NotFound`] if no item matches. Nothing changes.
    pub fn remove(&mut self, slug: &str) -> Result<&mut Self, MenuError> {
        let index = self.find(&slugify(slug))?;
        let mut item = self.items.remove(index);
        self.release(&mut item);
        log::debug!("removed menu item {:?}", item.slug());

        self.emitter
            .emit(events::REMOVE, Payload::Removed(std::slice::from_ref(&item)));
        Ok(self)
    }

    /// Replace the first item matching `slug` with a new item built from
    /// `spec`, keeping its position, then select the new item.
    ///
    /// # Errors
    ///
    /// [`MenuError::NotFound`] if no item matches. Nothing changes.
    pub fn change(&mut self, slug: &str, spec: impl Into<ItemSpec>) -> Result<&mut Self, MenuError> {
        let index = self.find(&slugify(slug))?;

        let replacement = self.create_item(spec.into());
        let id = replacement.id();
        if let (Some(node), Some(sibling)) = (replacement.surface_id(), self.items[index].surface_id()) {
            self.backend.insert_before(node, sibling);
        }

        let mut old = std::mem::replace(&mut self.items[index], replacement);
        self.release(&mut old);
        log::debug!("replaced menu item {:?} with {:?}", old.slug(), self.items[index].slug());

        self.select(id);
        Ok(self)
    }

    /// Destroy every item. The open state is unchanged.
    pub fn clear(&mut self) -> &mut Self {
        let mut items = std::mem::take(&mut self.items);
        for item in &mut items {
            self.release(item);
        }
        self.selected = None;
        self
    }

    /// Make the item navigable and visible again.
    pub fn show_item(&mut self, id: ItemId) -> &mut Self {
        if let Some(item) = self.item_mut(id) {
            item.set_hidden(false);
        }
        self
    }

    /// Conceal the item and skip it during navigation.
    pub fn hide_item(&mut self, id: ItemId) -> &mut Self {
        if let Some(item) = self.item_mut(id) {
            item.set_hidden(true);
        }
        self
    }

    /// Reveal every item.
    pub fn unhide_all(&mut self) -> &mut Self {
        for item in &mut self.items {
            item.set_hidden(false);
        }
        self
    }

    /// Show the items `predicate` accepts and hide the rest. Order is
    /// untouched.
    pub fn filter(&mut self, mut predicate: impl FnMut(&MenuItem) -> bool) -> &mut Self {
        for item in &mut self.items {
            let keep = predicate(item);
            item.set_hidden(!keep);
        }
        self
    }
}
