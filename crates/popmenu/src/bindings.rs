//! Listener binding table.
//!
//! Maps every backend registration a menu owns to the role it plays, and
//! tracks which registrations belong to the current open session so `hide`
//! can release exactly what `show` attached.

use crate::item::ItemId;
use popmenu_core::{EventKind, ListenerId, Scope};
use std::collections::HashMap;

/// What a registration does when an event arrives on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    /// Document-level key handler, open session only.
    Keyboard,
    /// Document-level pointer release that closes the menu.
    OutsideClick,
    /// One-shot pointer-over on the menu surface that drops the selection.
    HoverClear,
    /// Pointer press on an item.
    ItemPress(ItemId),
    /// Pointer release on an item.
    ItemRelease(ItemId),
    /// Click on an item.
    ItemClick(ItemId),
}

impl Role {
    pub(crate) const fn item(self) -> Option<ItemId> {
        match self {
            Self::ItemPress(id) | Self::ItemRelease(id) | Self::ItemClick(id) => Some(id),
            Self::Keyboard | Self::OutsideClick | Self::HoverClear => None,
        }
    }
}

/// An attach waiting for the next [`Menu::tick`](crate::Menu::tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Deferred {
    pub(crate) scope: Scope,
    pub(crate) kind: EventKind,
    pub(crate) role: Role,
}

#[derive(Debug, Default)]
pub(crate) struct Bindings {
    roles: HashMap<ListenerId, Role>,
    session: Vec<ListenerId>,
    deferred: Vec<Deferred>,
}

impl Bindings {
    pub(crate) fn bind(&mut self, id: ListenerId, role: Role) {
        log::trace!("bind {id:?} as {role:?}");
        self.roles.insert(id, role);
    }

    /// Bind a registration that lives until the session ends.
    pub(crate) fn bind_session(&mut self, id: ListenerId, role: Role) {
        self.bind(id, role);
        self.session.push(id);
    }

    pub(crate) fn unbind(&mut self, id: ListenerId) -> Option<Role> {
        let role = self.roles.remove(&id);
        if role.is_some() {
            log::trace!("unbind {id:?}");
            self.session.retain(|&s| s != id);
        }
        role
    }

    /// Forget every session registration and queued attach. Returns the ids
    /// the caller must release from the backend.
    pub(crate) fn end_session(&mut self) -> Vec<ListenerId> {
        self.deferred.clear();
        let ids: Vec<ListenerId> = self.session.drain(..).collect();
        for id in &ids {
            self.roles.remove(id);
        }
        ids
    }

    pub(crate) fn defer(&mut self, deferred: Deferred) {
        self.deferred.push(deferred);
    }

    pub(crate) fn take_deferred(&mut self) -> Vec<Deferred> {
        std::mem::take(&mut self.deferred)
    }

    pub(crate) fn pending(&self) -> usize {
        self.deferred.len()
    }

    pub(crate) fn role(&self, id: ListenerId) -> Option<Role> {
        self.roles.get(&id).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.roles.len()
    }

    pub(crate) fn session_len(&self) -> usize {
        self.session.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_lookup() {
        let mut bindings = Bindings::default();
        bindings.bind(ListenerId(1), Role::ItemPress(ItemId(0)));
        assert_eq!(bindings.role(ListenerId(1)), Some(Role::ItemPress(ItemId(0))));
        assert_eq!(bindings.role(ListenerId(2)), None);
        assert_eq!(bindings.session_len(), 0);
    }

    #[test]
    fn test_end_session_keeps_item_bindings() {
        let mut bindings = Bindings::default();
        bindings.bind(ListenerId(1), Role::ItemRelease(ItemId(3)));
        bindings.bind_session(ListenerId(2), Role::Keyboard);
        bindings.bind_session(ListenerId(3), Role::HoverClear);
        bindings.defer(Deferred {
            scope: Scope::Document,
            kind: EventKind::PointerUp,
            role: Role::OutsideClick,
        });

        let released = bindings.end_session();
        assert_eq!(released, vec![ListenerId(2), ListenerId(3)]);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.pending(), 0);
        assert!(bindings.role(ListenerId(1)).is_some());
    }

    #[test]
    fn test_unbind_session_member() {
        let mut bindings = Bindings::default();
        bindings.bind_session(ListenerId(5), Role::HoverClear);
        assert_eq!(bindings.unbind(ListenerId(5)), Some(Role::HoverClear));
        assert_eq!(bindings.unbind(ListenerId(5)), None);
        assert!(bindings.end_session().is_empty());
    }

    #[test]
    fn test_take_deferred_drains() {
        let mut bindings = Bindings::default();
        bindings.defer(Deferred {
            scope: Scope::Document,
            kind: EventKind::PointerUp,
            role: Role::OutsideClick,
        });
        assert_eq!(bindings.take_deferred().len(), 1);
        assert!(bindings.take_deferred().is_empty());
    }

    #[test]
    fn test_role_item() {
        assert_eq!(Role::ItemClick(ItemId(4)).item(), Some(ItemId(4)));
        assert_eq!(Role::Keyboard.item(), None);
    }
}
