//! Viewport-clamped placement.

use super::Menu;
use popmenu_core::Point;

impl Menu {
    /// Place the menu's top-left corner at `(x, y)`, shifted as needed so
    /// the rendered box stays inside the viewport. Bounds are refreshed
    /// before measuring.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.viewport.refresh();
        let bounds = self.viewport.bounds();
        let size = self.surface.outer_size(false);

        let origin = bounds.clamp_origin(Point::new(x, y), size);
        log::trace!("move_to ({x}, {y}) -> ({}, {})", origin.x, origin.y);
        self.surface.set_position(origin);
        self.position = origin;
        self
    }

    /// Like [`move_to`](Self::move_to), with `y` taken as the vertical
    /// center of the menu, margins included.
    pub fn move_to_center(&mut self, x: f32, y: f32) -> &mut Self {
        let height = self.surface.outer_size(true).height;
        self.move_to(x, y - height / 2.0)
    }
}
