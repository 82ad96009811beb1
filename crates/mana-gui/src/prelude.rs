//! Prelude module for mana-gui.
//!
//! ```
//! use mana_gui::prelude::*;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use crate::Gui;
pub use mana_gui_core::{GuiConfig, GuiError, Point, Rect, Result, WidgetId};

// ============================================================================
// Input
// ============================================================================

pub use crate::input::{KeyInput, MouseInput};

// ============================================================================
// Widgets and Events
// ============================================================================

pub use crate::widget::{
    EventContext, FocusEvent, FocusListener, Key, KeyEvent, KeyEventType, KeyListener,
    KeyboardModifiers, MouseButton, MouseEvent, MouseEventType, MouseListener, WidgetTree,
};
