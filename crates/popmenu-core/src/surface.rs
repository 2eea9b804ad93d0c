//! Collaborator contracts: rendered surfaces, the backend that owns them,
//! and the viewport provider used for positioning.
//!
//! A menu never touches a concrete rendering tree. It asks a [`Backend`] to
//! create surfaces and to register listeners, and it is handed events back
//! by [`ListenerId`]. Anything that can answer these calls (a DOM bridge, a
//! terminal cell buffer, an in-memory fixture) can host a menu.

use crate::event::EventKind;
use crate::geometry::{Bounds, Point, Size};
use serde::{Deserialize, Serialize};

/// Identifier of a rendered surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// Identifier of a listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// The root of the tree; sees every event that bubbles up.
    Document,
    /// A single surface and its descendants.
    Surface(SurfaceId),
}

/// A rendered element exclusively owned by one menu or menu item.
pub trait Surface {
    /// Stable identifier of this surface.
    fn id(&self) -> SurfaceId;

    /// Show or conceal the surface.
    fn set_visible(&mut self, visible: bool);

    /// Whether the surface is currently shown.
    fn is_visible(&self) -> bool;

    /// Add or remove a presentation class.
    fn set_class(&mut self, class: &str, enabled: bool);

    /// Whether a presentation class is applied.
    fn has_class(&self, class: &str) -> bool;

    /// Rendered outer size, optionally including margins.
    fn outer_size(&self, include_margin: bool) -> Size;

    /// Place the top-left corner of the surface.
    fn set_position(&mut self, origin: Point);

    /// Forward input focus to the surface's activation target.
    fn focus(&mut self);

    /// Detach from the tree and release the surface.
    fn destroy(self: Box<Self>);
}

/// Factory for surfaces and registry for input listeners.
pub trait Backend {
    /// Render the container surface for a menu. Starts detached from
    /// nothing; visibility is left to the caller.
    fn create_menu_surface(&mut self) -> Box<dyn Surface>;

    /// Render an item surface labelled `text` and append it to `parent`.
    fn create_item_surface(&mut self, parent: SurfaceId, text: &str) -> Box<dyn Surface>;

    /// Move `node` so that it sits immediately before `sibling`.
    fn insert_before(&mut self, node: SurfaceId, sibling: SurfaceId);

    /// Start delivering `kind` events reaching `scope`.
    fn listen(&mut self, scope: Scope, kind: EventKind) -> ListenerId;

    /// Stop a registration. Returns false if it was not active.
    fn unlisten(&mut self, id: ListenerId) -> bool;
}

/// Source of the visible region used to clamp menu placement.
pub trait Viewport {
    /// Re-read the bounds from the environment.
    fn refresh(&mut self);

    /// Bounds as of the last refresh.
    fn bounds(&self) -> Bounds;
}
