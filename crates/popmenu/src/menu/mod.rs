//! The popup menu component.
//!
//! A [`Menu`] owns its items and their surfaces, tracks the selection and
//! the open state, and turns input delivered by the host into selection
//! changes and published events.
//!
//! # Hosting
//!
//! The host supplies a [`Backend`] and a [`Viewport`]. Whenever an event
//! reaches a registration the menu made through [`Backend::listen`], the
//! host passes it to [`Menu::handle_event`] (the [`EventSink`] impl) and
//! applies the returned [`Outcome`]. After each input turn the host calls
//! [`Menu::tick`] so that attaches deferred by [`Menu::show`] take effect.
//!
//! # Example
//!
//! ```
//! use popmenu::{events, Menu, Observable};
//! use popmenu_test::{MockBackend, MockViewport};
//!
//! let mut menu = Menu::new(MockBackend::new(), MockViewport::desktop());
//! menu.add("Copy").add("Paste");
//! menu.on(events::SELECT, |payload| {
//!     println!("chose {}", payload.item().map_or("", |i| i.text()));
//! });
//! menu.move_to(10.0, 10.0).show();
//! assert!(menu.is_open());
//! ```

mod input;
mod lifecycle;
mod navigation;
mod position;
mod registry;

pub use navigation::Direction;

use crate::bindings::Bindings;
use crate::config::MenuConfig;
use crate::emitter::{Emitter, Observable};
use crate::error::ConfigError;
use crate::item::{ItemId, MenuItem};
use popmenu_core::{Backend, Point, Surface, SurfaceId, Viewport};
use std::fmt;

/// A popup menu of selectable, slug-addressed items.
pub struct Menu {
    items: Vec<MenuItem>,
    selected: Option<ItemId>,
    open: bool,
    selecting: bool,
    next_item_id: u64,
    position: Point,
    surface: Box<dyn Surface>,
    backend: Box<dyn Backend>,
    viewport: Box<dyn Viewport>,
    emitter: Emitter,
    bindings: Bindings,
    config: MenuConfig,
}

impl Menu {
    /// Create a closed, empty menu with the default configuration.
    pub fn new(backend: impl Backend + 'static, viewport: impl Viewport + 'static) -> Self {
        Self::build(Box::new(backend), Box::new(viewport), MenuConfig::default())
    }

    /// Create a closed, empty menu with `config`.
    pub fn with_config(
        backend: impl Backend + 'static,
        viewport: impl Viewport + 'static,
        config: MenuConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(Box::new(backend), Box::new(viewport), config))
    }

    fn build(mut backend: Box<dyn Backend>, viewport: Box<dyn Viewport>, config: MenuConfig) -> Self {
        let mut surface = backend.create_menu_surface();
        surface.set_class(&config.classes.menu, true);
        surface.set_visible(false);

        Self {
            items: Vec::new(),
            selected: None,
            open: false,
            selecting: false,
            next_item_id: 0,
            position: Point::ORIGIN,
            surface,
            backend,
            viewport,
            emitter: Emitter::new(),
            bindings: Bindings::default(),
            config,
        }
    }

    /// Items in navigation order, hidden ones included.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Surface of the menu container.
    #[must_use]
    pub fn surface_id(&self) -> SurfaceId {
        self.surface.id()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Top-left corner applied by the last [`move_to`](Self::move_to).
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Number of backend registrations the menu currently owns.
    #[must_use]
    pub fn bound_listeners(&self) -> usize {
        self.bindings.len()
    }

    /// Number of attaches waiting for [`tick`](Self::tick).
    #[must_use]
    pub fn pending_attaches(&self) -> usize {
        self.bindings.pending()
    }

    fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut MenuItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}

impl Observable for Menu {
    fn emitter_mut(&mut self) -> &mut Emitter {
        &mut self.emitter
    }
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("items", &self.items)
            .field("selected", &self.selected)
            .field("open", &self.open)
            .field("selecting", &self.selecting)
            .field("position", &self.position)
            .field("surface", &self.surface.id())
            .field("listeners", &self.bindings.len())
            .field("session_listeners", &self.bindings.session_len())
            .field("emitter", &self.emitter)
            .finish_non_exhaustive()
    }
}
