//! Input events delivered to a menu.

use crate::geometry::Point;
use crate::surface::ListenerId;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Pointer button pressed
    PointerDown {
        /// Position of press
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Pointer button released
    PointerUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Pointer moved over an element
    PointerOver {
        /// Pointer position
        position: Point,
    },
    /// Full press and release on the same element
    Click {
        /// Position of click
        position: Point,
        /// Button clicked
        button: MouseButton,
    },
}

impl Event {
    /// Shorthand for a key press.
    #[must_use]
    pub const fn key_down(key: Key) -> Self {
        Self::KeyDown { key }
    }

    /// Shorthand for a primary-button press at `position`.
    #[must_use]
    pub const fn pointer_down(position: Point) -> Self {
        Self::PointerDown {
            position,
            button: MouseButton::Left,
        }
    }

    /// Shorthand for a primary-button release at `position`.
    #[must_use]
    pub const fn pointer_up(position: Point) -> Self {
        Self::PointerUp {
            position,
            button: MouseButton::Left,
        }
    }

    /// The listener kind this event is delivered to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::PointerUp { .. } => EventKind::PointerUp,
            Self::PointerOver { .. } => EventKind::PointerOver,
            Self::Click { .. } => EventKind::Click,
        }
    }
}

/// Discriminant used when registering listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Key pressed
    KeyDown,
    /// Pointer pressed
    PointerDown,
    /// Pointer released
    PointerUp,
    /// Pointer entered an element
    PointerOver,
    /// Click completed
    Click,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Control keys
    /// Enter/Return key
    Enter,
    /// Escape key
    Escape,
    /// Backspace key
    Backspace,
    /// Tab key
    Tab,
    /// Space key
    Space,
    /// Delete key
    Delete,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,

    // Arrow keys
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,

    /// Printable character
    Char(char),
}

/// What a listener did with an event, reported back to the host so it can
/// finish the dispatch (suppress the platform default, stop bubbling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// The event was meaningful to the receiver
    pub handled: bool,
    /// Suppress the platform default action (scrolling, link follow)
    pub prevent_default: bool,
    /// Do not deliver to listeners further up the tree
    pub stop_propagation: bool,
}

impl Outcome {
    /// The event was not relevant.
    pub const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
        stop_propagation: false,
    };

    /// The event was consumed with no further dispatch requirements.
    pub const HANDLED: Self = Self {
        handled: true,
        prevent_default: false,
        stop_propagation: false,
    };

    /// Handled, with the default action suppressed.
    pub const PREVENT_DEFAULT: Self = Self {
        handled: true,
        prevent_default: true,
        stop_propagation: false,
    };

    /// Handled, default suppressed, and bubbling stopped.
    pub const CONSUMED: Self = Self {
        handled: true,
        prevent_default: true,
        stop_propagation: true,
    };

    /// Combine outcomes from several listeners on one dispatch path.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            handled: self.handled || other.handled,
            prevent_default: self.prevent_default || other.prevent_default,
            stop_propagation: self.stop_propagation || other.stop_propagation,
        }
    }
}

/// Receiver of events routed by listener registration.
///
/// The host looks up which registrations an event reaches and hands it to
/// the owner once per registration, in bubbling order.
pub trait EventSink {
    /// Handle `event` delivered through `listener`.
    fn handle_event(&mut self, listener: ListenerId, event: &Event) -> Outcome;
}
