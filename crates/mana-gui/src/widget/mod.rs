//! Widget tree, events, listeners and focus.
//!
//! # Overview
//!
//! Widgets live in a [`WidgetTree`] arena and are referred to by
//! [`WidgetId`](mana_gui_core::WidgetId). Behavior is attached through
//! listeners:
//!
//! - [`MouseListener`]: pointer enter/exit, movement, buttons, wheel, drag
//! - [`KeyListener`]: key presses and releases
//! - [`FocusListener`]: keyboard focus gained and lost
//!
//! Listeners are reference counted so the same listener can be shared by
//! several widgets, or kept by the caller for later removal.
//!
//! ```
//! use std::rc::Rc;
//! use mana_gui::widget::{EventContext, MouseEvent, MouseListener, WidgetTree};
//! use mana_gui_core::Rect;
//!
//! struct Hover;
//! impl MouseListener for Hover {
//!     fn mouse_entered(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {}
//! }
//!
//! let mut tree = WidgetTree::new();
//! let button = tree.create("button", Rect::new(0, 0, 80, 24));
//! let listener: Rc<dyn MouseListener> = Rc::new(Hover);
//! tree.add_mouse_listener(button, listener.clone()).unwrap();
//! assert!(tree.remove_mouse_listener(button, &listener));
//! ```
//!
//! # Coordinate Systems
//!
//! - **Parent coordinates**: a widget's dimension is relative to its
//!   parent's children area
//! - **Screen coordinates**: input positions and
//!   [`WidgetTree::absolute_position`]
//! - **Widget coordinates**: [`MouseEvent::x`] and [`MouseEvent::y`], relative
//!   to the widget whose listener is running

mod debug;
mod dispatcher;
mod events;
mod focus;
mod listener;
mod tree;


pub use debug::{TreeFormatOptions, TreeStyle, WidgetTreeDebug};
pub use dispatcher::EventDispatcher;
pub use events::{
    FocusEvent, FocusEventType, Key, KeyEvent, KeyEventType, KeyboardModifiers, MouseButton,
    MouseEvent, MouseEventType,
};
pub use focus::{FocusHandler, TabDirection};
pub use listener::{EventContext, FocusListener, KeyListener, MouseListener};
pub use tree::WidgetTree;
