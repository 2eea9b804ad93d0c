//! Input arbitration: turns events delivered on the menu's registrations
//! into selection changes, confirmation, and closing.

use super::{Direction, Menu};
use crate::bindings::Role;
use crate::config::KeyAction;
use crate::emitter::{events, Payload};
use crate::item::ItemId;
use popmenu_core::{Event, EventSink, ListenerId, Outcome};

impl Menu {
    /// Handle `event` delivered on registration `listener`.
    ///
    /// Registrations the menu does not own are ignored.
    pub fn handle_event(&mut self, listener: ListenerId, event: &Event) -> Outcome {
        let Some(role) = self.bindings.role(listener) else {
            log::warn!("event {:?} on unknown listener {listener:?}", event.kind());
            return Outcome::IGNORED;
        };
        if let Some(id) = role.item() {
            if !self.has(id) {
                log::warn!("event on listener {listener:?} for departed item {id:?}");
                return Outcome::IGNORED;
            }
        }

        match (role, event) {
            (Role::Keyboard, Event::KeyDown { key }) => match self.config.keys.action(*key) {
                Some(action) => self.on_key_action(action),
                None => Outcome::IGNORED,
            },
            (Role::OutsideClick, Event::PointerUp { .. }) => {
                if self.open {
                    self.hide();
                    Outcome::HANDLED
                } else {
                    Outcome::IGNORED
                }
            }
            (Role::HoverClear, Event::PointerOver { .. }) => {
                self.bindings.unbind(listener);
                self.backend.unlisten(listener);
                self.deselect();
                Outcome::HANDLED
            }
            (Role::ItemPress(_), Event::PointerDown { .. }) => {
                self.selecting = true;
                Outcome::HANDLED
            }
            (Role::ItemRelease(id), Event::PointerUp { .. }) => {
                self.on_item_release(id);
                Outcome::CONSUMED
            }
            (Role::ItemClick(_), Event::Click { .. }) => Outcome::PREVENT_DEFAULT,
            _ => Outcome::IGNORED,
        }
    }

    fn on_key_action(&mut self, action: KeyAction) -> Outcome {
        match action {
            KeyAction::Confirm => {
                self.emit_selection();
                self.hide();
                Outcome::HANDLED
            }
            KeyAction::Cancel => {
                self.deselect();
                self.hide();
                Outcome::HANDLED
            }
            KeyAction::Prev => {
                self.move_selection(Direction::Prev);
                self.selecting = true;
                Outcome::PREVENT_DEFAULT
            }
            KeyAction::Next => {
                self.move_selection(Direction::Next);
                self.selecting = true;
                Outcome::PREVENT_DEFAULT
            }
        }
    }

    fn on_item_release(&mut self, id: ItemId) {
        self.select(id);
        self.emit_selection();
        if self.config.close_on_pointer_select {
            self.hide();
        }
    }

    /// Publish the selected item under [`events::SELECT`], its slug, and its
    /// label, in that order, then run its callback.
    fn emit_selection(&mut self) {
        let Some(index) = self.selected.and_then(|id| self.position_of(id)) else {
            return;
        };

        let item = &self.items[index];
        log::debug!("confirmed menu item {:?}", item.slug());
        self.emitter.emit(events::SELECT, Payload::Item(item));
        self.emitter.emit(item.slug(), Payload::Item(item));
        self.emitter.emit(item.text(), Payload::Item(item));

        if let Some(callback) = self.items[index].callback.as_mut() {
            callback();
        }
    }
}

impl EventSink for Menu {
    fn handle_event(&mut self, listener: ListenerId, event: &Event) -> Outcome {
        Self::handle_event(self, listener, event)
    }
}
