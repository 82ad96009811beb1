//! Event value types delivered to listeners.
//!
//! Events are built fresh for each dispatch pass. A single [`MouseEvent`] is
//! shared by every widget of one ancestor walk; its coordinates are rewritten
//! relative to each visited widget before that widget's listeners run.

use mana_gui_core::WidgetId;

/// Keyboard modifiers held during an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

/// The kind of a [`MouseEvent`], selecting which listener callback runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventType {
    /// The pointer entered the widget's bounds.
    Entered,
    /// The pointer left the widget's bounds.
    Exited,
    /// The pointer moved with no drag in progress.
    Moved,
    /// A button was pressed.
    Pressed,
    /// A button was released.
    Released,
    /// The wheel was scrolled up.
    WheelMovedUp,
    /// The wheel was scrolled down.
    WheelMovedDown,
    /// The pointer moved while a button press started on the widget.
    Dragged,
    /// A press and release of the same button landed on the same widget.
    Clicked,
}

/// A mouse event.
#[derive(Debug, Clone)]
pub struct MouseEvent {
    source: WidgetId,
    kind: MouseEventType,
    button: Option<MouseButton>,
    x: i32,
    y: i32,
    modifiers: KeyboardModifiers,
    click_count: u32,
    consumed: bool,
}

impl MouseEvent {
    /// Create a new mouse event. `x` and `y` are relative to `source`.
    pub fn new(
        source: WidgetId,
        kind: MouseEventType,
        button: Option<MouseButton>,
        x: i32,
        y: i32,
        modifiers: KeyboardModifiers,
        click_count: u32,
    ) -> Self {
        Self {
            source,
            kind,
            button,
            x,
            y,
            modifiers,
            click_count,
            consumed: false,
        }
    }

    /// The widget the event was distributed from.
    pub fn source(&self) -> WidgetId {
        self.source
    }

    /// The event kind.
    pub fn kind(&self) -> MouseEventType {
        self.kind
    }

    /// The button involved, if any.
    pub fn button(&self) -> Option<MouseButton> {
        self.button
    }

    /// Horizontal position relative to the widget whose listener is running.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Vertical position relative to the widget whose listener is running.
    pub fn y(&self) -> i32 {
        self.y
    }

    pub(crate) fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Modifier keys held when the event was created.
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Number of consecutive presses of the same button.
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    /// Mark the event as consumed.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Whether a listener consumed the event.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Keyboard keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Character(char),
    Tab,
    Enter,
    Escape,
    Backspace,
    Delete,
    Insert,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Shift,
    Control,
    Alt,
    Meta,
    /// Function key `F1`..`F15`.
    Function(u8),
    /// A key with no mapping; carries the platform code.
    Unknown(u32),
}

impl Key {
    /// Whether this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }

    /// The character this key types, if any.
    pub fn to_char(&self) -> Option<char> {
        match self {
            Key::Character(c) => Some(*c),
            Key::Space => Some(' '),
            _ => None,
        }
    }
}

/// The kind of a [`KeyEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventType {
    /// The key went down.
    Pressed,
    /// The key went up.
    Released,
}

/// A key event.
///
/// Key events given to global key listeners have no source widget.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    source: Option<WidgetId>,
    kind: KeyEventType,
    key: Key,
    modifiers: KeyboardModifiers,
    numeric_pad: bool,
    consumed: bool,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(
        source: Option<WidgetId>,
        kind: KeyEventType,
        key: Key,
        modifiers: KeyboardModifiers,
        numeric_pad: bool,
    ) -> Self {
        Self {
            source,
            kind,
            key,
            modifiers,
            numeric_pad,
            consumed: false,
        }
    }

    /// The widget the event was distributed from.
    pub fn source(&self) -> Option<WidgetId> {
        self.source
    }

    /// The event kind.
    pub fn kind(&self) -> KeyEventType {
        self.kind
    }

    /// The key.
    pub fn key(&self) -> Key {
        self.key
    }

    /// Modifier keys held.
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Whether the key is on the numeric pad.
    pub fn is_numeric_pad(&self) -> bool {
        self.numeric_pad
    }

    /// Mark the event as consumed.
    ///
    /// Consuming stops the global key listener list and keeps the key from
    /// reaching widgets or Tab navigation. It does not stop the ancestor walk
    /// of a widget-level dispatch.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Whether a listener consumed the event.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// The kind of a [`FocusEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusEventType {
    /// The widget received keyboard focus.
    Gained,
    /// The widget lost keyboard focus.
    Lost,
}

/// A keyboard focus change, delivered to the affected widget only.
#[derive(Debug, Clone, Copy)]
pub struct FocusEvent {
    source: WidgetId,
    kind: FocusEventType,
}

impl FocusEvent {
    /// Create a new focus event.
    pub fn new(source: WidgetId, kind: FocusEventType) -> Self {
        Self { source, kind }
    }

    /// The widget whose focus changed.
    pub fn source(&self) -> WidgetId {
        self.source
    }

    /// The event kind.
    pub fn kind(&self) -> FocusEventType {
        self.kind
    }
}
