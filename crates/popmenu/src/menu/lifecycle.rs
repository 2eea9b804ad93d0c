//! Open/close transitions and the listener session they own.

use super::Menu;
use crate::bindings::{Deferred, Role};
use crate::emitter::{events, Payload};
use popmenu_core::{EventKind, Scope};

impl Menu {
    /// Open the menu. No-op when already open.
    ///
    /// Attaches the keyboard listener and, if configured, the one-shot
    /// hover listener immediately. The outside-click listener is queued and
    /// only attached by the next [`tick`](Self::tick), so the pointer
    /// release that opened the menu cannot close it again.
    pub fn show(&mut self) -> &mut Self {
        if self.open {
            return self;
        }

        self.open = true;
        self.surface.set_visible(true);

        let keyboard = self.backend.listen(Scope::Document, EventKind::KeyDown);
        self.bindings.bind_session(keyboard, Role::Keyboard);

        if self.config.clear_selection_on_hover {
            let hover = self
                .backend
                .listen(Scope::Surface(self.surface.id()), EventKind::PointerOver);
            self.bindings.bind_session(hover, Role::HoverClear);
        }

        self.bindings.defer(Deferred {
            scope: Scope::Document,
            kind: EventKind::PointerUp,
            role: Role::OutsideClick,
        });

        log::debug!("menu {:?} shown", self.surface.id());
        self.emitter.emit(events::SHOW, Payload::None);
        self
    }

    /// Close the menu. No-op when already closed.
    ///
    /// Releases every listener `show` attached and drops attaches still
    /// waiting for a tick. The selection is kept.
    pub fn hide(&mut self) -> &mut Self {
        if !self.open {
            return self;
        }

        self.emitter.emit(events::HIDE, Payload::None);
        self.surface.set_visible(false);
        self.open = false;

        for listener in self.bindings.end_session() {
            self.backend.unlisten(listener);
        }
        self.selecting = false;

        log::debug!("menu {:?} hidden", self.surface.id());
        self
    }

    /// [`show`](Self::show) when closed, [`hide`](Self::hide) when open.
    pub fn toggle(&mut self) -> &mut Self {
        if self.open {
            self.hide()
        } else {
            self.show()
        }
    }

    /// Perform attaches deferred by [`show`](Self::show). The host calls
    /// this once the input turn that opened the menu has finished
    /// dispatching.
    pub fn tick(&mut self) -> &mut Self {
        for deferred in self.bindings.take_deferred() {
            if !self.open {
                continue;
            }
            let listener = self.backend.listen(deferred.scope, deferred.kind);
            self.bindings.bind_session(listener, deferred.role);
            log::debug!("attached deferred {:?} listener {listener:?}", deferred.role);
        }
        self
    }

    /// Whether the menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a selection gesture has started since the menu opened.
    #[must_use]
    pub const fn is_selecting(&self) -> bool {
        self.selecting
    }
}
