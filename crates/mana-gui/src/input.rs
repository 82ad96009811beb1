//! Raw input records and the queue they wait in.
//!
//! The platform layer converts its native events into [`MouseInput`] and
//! [`KeyInput`] records and pushes them with `Gui::queue_mouse_input` and
//! `Gui::queue_key_input`. `Gui::logic` drains the queue once per frame.

use std::collections::VecDeque;

use crate::widget::{Key, KeyEventType, KeyboardModifiers, MouseButton};

/// What happened to the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseInputType {
    /// The pointer moved.
    Moved,
    /// A button went down.
    Pressed,
    /// A button went up.
    Released,
    /// The wheel scrolled up.
    WheelMovedUp,
    /// The wheel scrolled down.
    WheelMovedDown,
}

/// A raw mouse input in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseInput {
    /// Input kind.
    pub kind: MouseInputType,
    /// Button for presses and releases.
    pub button: Option<MouseButton>,
    /// Horizontal screen position.
    pub x: i32,
    /// Vertical screen position.
    pub y: i32,
    /// Milliseconds on a monotonic clock; used for multi-click detection.
    pub timestamp_ms: u64,
    /// Modifier keys held.
    pub modifiers: KeyboardModifiers,
}

impl MouseInput {
    fn new(
        kind: MouseInputType,
        button: Option<MouseButton>,
        x: i32,
        y: i32,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            kind,
            button,
            x,
            y,
            timestamp_ms,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Pointer movement.
    pub fn moved(x: i32, y: i32) -> Self {
        Self::new(MouseInputType::Moved, None, x, y, 0)
    }

    /// Button press.
    pub fn pressed(button: MouseButton, x: i32, y: i32, timestamp_ms: u64) -> Self {
        Self::new(MouseInputType::Pressed, Some(button), x, y, timestamp_ms)
    }

    /// Button release.
    pub fn released(button: MouseButton, x: i32, y: i32, timestamp_ms: u64) -> Self {
        Self::new(MouseInputType::Released, Some(button), x, y, timestamp_ms)
    }

    /// Wheel scrolled up.
    pub fn wheel_up(x: i32, y: i32) -> Self {
        Self::new(MouseInputType::WheelMovedUp, None, x, y, 0)
    }

    /// Wheel scrolled down.
    pub fn wheel_down(x: i32, y: i32) -> Self {
        Self::new(MouseInputType::WheelMovedDown, None, x, y, 0)
    }

    /// Set the held modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A raw key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// Pressed or released.
    pub kind: KeyEventType,
    /// The key.
    pub key: Key,
    /// Modifier keys held.
    pub modifiers: KeyboardModifiers,
    /// The key is on the numeric pad.
    pub numeric_pad: bool,
}

impl KeyInput {
    /// Key press.
    pub fn pressed(key: Key) -> Self {
        Self {
            kind: KeyEventType::Pressed,
            key,
            modifiers: KeyboardModifiers::NONE,
            numeric_pad: false,
        }
    }

    /// Key release.
    pub fn released(key: Key) -> Self {
        Self {
            kind: KeyEventType::Released,
            ..Self::pressed(key)
        }
    }

    /// Set the held modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the key as coming from the numeric pad.
    pub fn on_numeric_pad(mut self) -> Self {
        self.numeric_pad = true;
        self
    }
}

/// FIFO queues of pending input, one per device.
#[derive(Debug, Default)]
pub struct InputQueue {
    mouse: VecDeque<MouseInput>,
    keys: VecDeque<KeyInput>,
}

impl InputQueue {
    /// Create empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a mouse input.
    pub fn push_mouse_input(&mut self, input: MouseInput) {
        self.mouse.push_back(input);
    }

    /// Take the oldest mouse input.
    pub fn pop_mouse_input(&mut self) -> Option<MouseInput> {
        self.mouse.pop_front()
    }

    /// Queue a key input.
    pub fn push_key_input(&mut self, input: KeyInput) {
        self.keys.push_back(input);
    }

    /// Take the oldest key input.
    pub fn pop_key_input(&mut self) -> Option<KeyInput> {
        self.keys.pop_front()
    }

    /// Whether both queues are empty.
    pub fn is_empty(&self) -> bool {
        self.mouse.is_empty() && self.keys.is_empty()
    }

    /// Drop everything queued.
    pub fn clear(&mut self) {
        self.mouse.clear();
        self.keys.clear();
    }
}
