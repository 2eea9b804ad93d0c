//! Core types and collaborator traits for the popmenu component.
//!
//! This crate provides foundational types used by the menu:
//! - Geometric primitives: [`Point`], [`Size`], [`Bounds`]
//! - Input events: [`Event`], [`Key`], [`EventKind`], [`Outcome`], [`EventSink`]
//! - Collaborator contracts: [`Surface`], [`Backend`], [`Viewport`]
//! - Identifier normalization: [`slugify`]

mod event;
mod geometry;
mod slug;
mod surface;

pub use event::{Event, EventKind, EventSink, Key, MouseButton, Outcome};
pub use geometry::{Bounds, Point, Size};
pub use slug::slugify;
pub use surface::{Backend, ListenerId, Scope, Surface, SurfaceId, Viewport};
