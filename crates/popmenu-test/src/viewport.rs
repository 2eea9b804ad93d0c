//! Viewport provider whose bounds can be changed behind the menu's back.

use popmenu_core::{Bounds, Viewport};
use std::cell::Cell;
use std::rc::Rc;

/// Caching viewport. [`MockViewport::set_bounds`] changes the environment;
/// the new bounds only become visible through [`Viewport::bounds`] after a
/// [`Viewport::refresh`].
#[derive(Debug, Clone)]
pub struct MockViewport {
    source: Rc<Cell<Bounds>>,
    cached: Bounds,
    refreshes: Rc<Cell<usize>>,
}

impl MockViewport {
    /// Viewport whose environment and cache both start at `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            source: Rc::new(Cell::new(bounds)),
            cached: bounds,
            refreshes: Rc::new(Cell::new(0)),
        }
    }

    /// An 800x600 viewport anchored at the origin.
    pub fn desktop() -> Self {
        Self::new(Bounds::new(0.0, 800.0, 600.0, 0.0))
    }

    /// Change the environment's bounds.
    pub fn set_bounds(&self, bounds: Bounds) {
        self.source.set(bounds);
    }

    /// Refreshes performed by any clone.
    pub fn refresh_count(&self) -> usize {
        self.refreshes.get()
    }
}

impl Viewport for MockViewport {
    fn refresh(&mut self) {
        self.cached = self.source.get();
        self.refreshes.set(self.refreshes.get() + 1);
    }

    fn bounds(&self) -> Bounds {
        self.cached
    }
}
