//! mana-gui: widget event distribution and focus management.
//!
//! This crate turns raw mouse and keyboard input into listener callbacks on a
//! tree of widgets:
//!
//! - [`Gui`]: hit testing, the widget-with-mouse queue, enter/exit synthesis,
//!   clicks and drags, key routing and modal transitions
//! - [`widget`]: the widget arena, event types, listener traits, the focus
//!   handler and the ancestor-walk dispatcher
//! - [`input`]: raw input records and the per-frame input queue
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use mana_gui::prelude::*;
//!
//! #[derive(Default)]
//! struct ClickCounter(Cell<u32>);
//!
//! impl MouseListener for ClickCounter {
//!     fn mouse_clicked(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
//!         self.0.set(self.0.get() + 1);
//!     }
//! }
//!
//! let mut gui = Gui::new(GuiConfig::default());
//! let top = gui.top().unwrap();
//! let button = gui.tree_mut().create("button", Rect::new(10, 10, 80, 24));
//! gui.tree_mut().add_child(top, button).unwrap();
//!
//! let counter = Rc::new(ClickCounter::default());
//! gui.tree_mut().add_mouse_listener(button, counter.clone()).unwrap();
//!
//! gui.queue_mouse_input(MouseInput::pressed(MouseButton::Left, 20, 20, 0));
//! gui.queue_mouse_input(MouseInput::released(MouseButton::Left, 20, 20, 50));
//! gui.logic();
//!
//! assert_eq!(counter.0.get(), 1);
//! ```

mod gui;
pub mod input;
pub mod prelude;
pub mod widget;

pub use gui::Gui;
pub use input::{InputQueue, KeyInput, MouseInput, MouseInputType};

pub use mana_gui_core::{GuiConfig, GuiError, Point, Rect, Result, WidgetId};

static_assertions::assert_not_impl_any!(Gui: Send, Sync);
