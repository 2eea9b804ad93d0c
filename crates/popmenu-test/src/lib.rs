#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Collaborator fixtures for exercising popmenu hosts without a real
//! rendering tree.
//!
//! [`MockBackend`] keeps surfaces and listener registrations in memory and
//! can route events through them the way a document would: target first,
//! then ancestors, then the document root. [`MockViewport`] reports bounds
//! that tests can change between refreshes.
//!
//! ```
//! use popmenu_core::{Backend, EventKind, Scope};
//! use popmenu_test::MockBackend;
//!
//! let mut backend = MockBackend::new();
//! let probe = backend.clone();
//! backend.listen(Scope::Document, EventKind::KeyDown);
//! assert_eq!(probe.listener_count(), 1);
//! ```

mod backend;
mod viewport;

pub use backend::{MockBackend, MockSurface, NodeSnapshot, DEFAULT_MENU_SIZE, ITEM_SIZE};
pub use viewport::MockViewport;
