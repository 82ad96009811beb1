//! Listener traits and the context handed to them.
//!
//! Listeners are registered per widget in the [`WidgetTree`] and invoked by
//! the dispatcher. Every callback receives the event and an
//! [`EventContext`], which gives the listener mutable access to the widget
//! tree and the focus handler. This lets a listener destroy widgets, move
//! focus or grab modal focus while it runs. The dispatcher re-validates
//! every widget id after each callback.
//!
//! All trait methods have empty default bodies, so a listener only
//! overrides what it cares about:
//!
//! ```
//! use mana_gui::widget::{EventContext, MouseEvent, MouseListener};
//!
//! struct CloseOnClick;
//!
//! impl MouseListener for CloseOnClick {
//!     fn mouse_clicked(&self, event: &mut MouseEvent, cx: &mut EventContext<'_>) {
//!         let _ = cx.destroy(event.source());
//!     }
//! }
//! ```

use mana_gui_core::logging::targets;
use mana_gui_core::{GuiError, Result, WidgetId};

use super::dispatcher::EventDispatcher;
use super::events::{FocusEvent, FocusEventType, KeyEvent, MouseEvent};
use super::focus::{FocusHandler, TabDirection};
use super::tree::WidgetTree;

/// Receives mouse events for a widget.
pub trait MouseListener {
    /// The pointer entered the widget.
    fn mouse_entered(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {}
    /// The pointer left the widget.
    fn mouse_exited(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {}
    /// The pointer moved over the widget.
    fn mouse_moved(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {}
    /// A button went down over the widget.
    fn mouse_pressed(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {}
    /// A button went up.
    fn mouse_released(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {}
    /// The wheel scrolled up.
    fn mouse_wheel_moved_up(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {}
    /// The wheel scrolled down.
    fn mouse_wheel_moved_down(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {}
    /// The pointer moved during a drag that started on the widget.
    fn mouse_dragged(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {}
    /// A press and release of one button landed on the widget.
    fn mouse_clicked(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {}
}

/// Receives key events for a widget, or globally.
pub trait KeyListener {
    /// A key went down.
    fn key_pressed(&self, _event: &mut KeyEvent, _cx: &mut EventContext<'_>) {}
    /// A key went up.
    fn key_released(&self, _event: &mut KeyEvent, _cx: &mut EventContext<'_>) {}
}

/// Receives focus changes of a widget.
pub trait FocusListener {
    /// The widget received keyboard focus.
    fn focus_gained(&self, _event: &FocusEvent, _cx: &mut EventContext<'_>) {}
    /// The widget lost keyboard focus.
    fn focus_lost(&self, _event: &FocusEvent, _cx: &mut EventContext<'_>) {}
}

/// Mutable view of the GUI state available to listeners.
///
/// Also obtained from `Gui::context` to perform focus operations from
/// outside a listener, so that focus events are delivered the same way in
/// both cases.
pub struct EventContext<'a> {
    tree: &'a mut WidgetTree,
    focus: &'a mut FocusHandler,
    top: Option<WidgetId>,
}

impl<'a> EventContext<'a> {
    /// Build a context over a tree and its focus handler.
    ///
    /// `top` is the root of Tab navigation.
    pub fn new(
        tree: &'a mut WidgetTree,
        focus: &'a mut FocusHandler,
        top: Option<WidgetId>,
    ) -> Self {
        Self { tree, focus, top }
    }

    /// The widget tree.
    pub fn tree(&self) -> &WidgetTree {
        self.tree
    }

    /// Mutable access to the widget tree.
    ///
    /// Destroying widgets through this leaves stale ids in the focus
    /// handler until the next prune; prefer [`destroy`](Self::destroy).
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        self.tree
    }

    /// The focus handler.
    pub fn focus(&self) -> &FocusHandler {
        self.focus
    }

    /// The top widget, if one is set.
    pub fn top(&self) -> Option<WidgetId> {
        self.top
    }

    /// Destroy a widget subtree and forget it in the focus handler.
    pub fn destroy(&mut self, id: WidgetId) -> Result<()> {
        self.tree.destroy(id)?;
        self.focus.prune(self.tree);
        Ok(())
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Give keyboard focus to a widget.
    ///
    /// Returns `false` if the widget does not exist or is not focusable.
    /// The previous widget receives `focus_lost` before the new one receives
    /// `focus_gained`.
    pub fn request_focus(&mut self, id: WidgetId) -> bool {
        if !self.tree.is_focusable(id) {
            return false;
        }
        if self.focus.focused() == Some(id) {
            return true;
        }

        let old = self.focus.focused();
        self.focus.set_focused(Some(id));
        tracing::debug!(target: targets::FOCUS, from = ?old, to = ?id, "focus changed");

        if let Some(old) = old {
            self.notify_focus(old, FocusEventType::Lost);
        }
        self.notify_focus(id, FocusEventType::Gained);
        true
    }

    /// Clear keyboard focus, notifying the widget that had it.
    pub fn focus_none(&mut self) {
        if let Some(old) = self.focus.focused() {
            self.focus.set_focused(None);
            tracing::debug!(target: targets::FOCUS, from = ?old, "focus cleared");
            self.notify_focus(old, FocusEventType::Lost);
        }
    }

    fn notify_focus(&mut self, id: WidgetId, kind: FocusEventType) {
        let event = FocusEvent::new(id, kind);
        EventDispatcher::distribute_focus_event(self, &event);
    }

    /// Grab modal focus: keyboard and mouse events are confined to the
    /// subtree of `id`.
    ///
    /// Fails if another live widget already holds modal focus. If the
    /// focused widget lies outside the subtree, focus is cleared.
    pub fn request_modal_focus(&mut self, id: WidgetId) -> Result<()> {
        if !self.tree.exists(id) {
            return Err(GuiError::WidgetNotFound(id));
        }
        if let Some(holder) = self.focus.modal_focused() {
            if holder != id && self.tree.exists(holder) {
                return Err(GuiError::ModalFocusHeld { holder });
            }
        }

        self.focus.set_modal_focused(Some(id));
        tracing::debug!(target: targets::FOCUS, ?id, "modal focus requested");

        if let Some(focused) = self.focus.focused() {
            if !self.focus.is_modal_focused(self.tree, focused) {
                self.focus_none();
            }
        }
        Ok(())
    }

    /// Grab modal mouse input focus: mouse events are confined to the
    /// subtree of `id`.
    pub fn request_modal_mouse_input_focus(&mut self, id: WidgetId) -> Result<()> {
        if !self.tree.exists(id) {
            return Err(GuiError::WidgetNotFound(id));
        }
        if let Some(holder) = self.focus.modal_mouse_input_focused() {
            if holder != id && self.tree.exists(holder) {
                return Err(GuiError::ModalMouseInputFocusHeld { holder });
            }
        }

        self.focus.set_modal_mouse_input_focused(Some(id));
        tracing::debug!(target: targets::FOCUS, ?id, "modal mouse input focus requested");
        Ok(())
    }

    /// Release modal focus. Only the holder can release it.
    pub fn release_modal_focus(&mut self, id: WidgetId) {
        if self.focus.modal_focused() == Some(id) {
            self.focus.set_modal_focused(None);
            tracing::debug!(target: targets::FOCUS, ?id, "modal focus released");
        }
    }

    /// Release modal mouse input focus. Only the holder can release it.
    pub fn release_modal_mouse_input_focus(&mut self, id: WidgetId) {
        if self.focus.modal_mouse_input_focused() == Some(id) {
            self.focus.set_modal_mouse_input_focused(None);
            tracing::debug!(target: targets::FOCUS, ?id, "modal mouse input focus released");
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Focus the next focusable widget, ignoring tab flags.
    pub fn focus_next(&mut self) -> bool {
        self.navigate(TabDirection::Forward, false)
    }

    /// Focus the previous focusable widget, ignoring tab flags.
    pub fn focus_previous(&mut self) -> bool {
        self.navigate(TabDirection::Backward, false)
    }

    /// Move focus forward as the Tab key does.
    pub fn tab_next(&mut self) -> bool {
        self.navigate(TabDirection::Forward, true)
    }

    /// Move focus backward as Shift+Tab does.
    pub fn tab_previous(&mut self) -> bool {
        self.navigate(TabDirection::Backward, true)
    }

    fn navigate(&mut self, direction: TabDirection, tabbing: bool) -> bool {
        let Some(root) = self.top.filter(|&top| self.tree.exists(top)) else {
            return false;
        };
        match self.focus.next_candidate(self.tree, root, direction, tabbing) {
            Some(next) => {
                tracing::trace!(
                    target: targets::FOCUS,
                    ?direction,
                    tabbing,
                    ?next,
                    "navigating focus"
                );
                self.request_focus(next)
            }
            None => false,
        }
    }
}
