#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Popup menu component for Popmenu.
//!
//! A [`Menu`] holds an ordered list of [`MenuItem`]s addressed by slug. It
//! can be placed inside a viewport, opened and closed, navigated with the
//! keyboard or the pointer, and it publishes `show`, `hide`, `remove`,
//! `select`, and per-item events through its [`Emitter`].
//!
//! Rendering and input delivery are supplied by the host through the
//! [`Backend`](popmenu_core::Backend) and [`Viewport`](popmenu_core::Viewport)
//! traits from `popmenu-core`.
//!
//! ```
//! use popmenu::{ItemSpec, Menu};
//! use popmenu_core::{Event, Key, Scope};
//! use popmenu_test::{MockBackend, MockViewport};
//!
//! let backend = MockBackend::new();
//! let mut menu = Menu::new(backend.clone(), MockViewport::desktop());
//! menu.add("Undo")
//!     .add(ItemSpec::new("Redo").callback(|| println!("redo")));
//!
//! menu.show().tick();
//! backend.dispatch(&mut menu, Scope::Document, &Event::key_down(Key::Up));
//! assert_eq!(menu.selected_item().map(|i| i.slug()), Some("undo"));
//!
//! backend.dispatch(&mut menu, Scope::Document, &Event::key_down(Key::Enter));
//! assert!(!menu.is_open());
//! ```

mod bindings;
mod config;
mod emitter;
mod error;
mod item;
mod menu;

pub use config::{ClassNames, KeyAction, KeyBindings, MenuConfig};
pub use emitter::{events, Emitter, Handler, Observable, Payload, SubscriptionId};
pub use error::{ConfigError, MenuError};
pub use item::{Callback, ItemId, ItemSpec, MenuItem};
pub use menu::{Direction, Menu};
