//! Input abstraction layer.
//!
//! Normalizes browser pointer, wheel and keyboard events into a unified
//! `InputEvent` enum consumed by tools. Coordinates are screen pixels
//! relative to the canvas' top-left corner.

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Ctrl on Linux/Windows, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Shift at release turns a drag into a reparent.
    pub fn reparent(&self) -> bool {
        self.shift
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f64, y: f64, modifiers: Modifiers },

    /// Pointer moved.
    PointerMove { x: f64, y: f64, modifiers: Modifiers },

    /// Pointer released. `modifiers` decide move vs. reparent.
    PointerUp { x: f64, y: f64, modifiers: Modifiers },

    DoubleClick { x: f64, y: f64 },

    /// Wheel / trackpad scroll. Negative `delta_y` zooms in.
    Wheel { x: f64, y: f64, delta_y: f64 },

    /// Keyboard event (`KeyboardEvent.key` value).
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerDown { x, y, modifiers }
    }

    pub fn from_pointer_move(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerMove { x, y, modifiers }
    }

    pub fn from_pointer_up(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerUp { x, y, modifiers }
    }

    /// Extract position if this event has one.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::DoubleClick { x, y }
            | Self::Wheel { x, y, .. } => Some((*x, *y)),
            Self::Key { .. } => None,
        }
    }
}
