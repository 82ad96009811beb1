//! Event distribution over the widget tree.
//!
//! # Ancestor walk
//!
//! Mouse and key events are distributed by walking from a source widget up
//! through its ancestors:
//!
//! 1. Unless the dispatch is forced, an event whose source lies outside the
//!    modal subtree (while modal focus or modal mouse input focus is held) is
//!    dropped before any listener runs.
//! 2. For each widget on the walk, its listeners run if it is enabled (or the
//!    dispatch is forced). Mouse coordinates are rewritten relative to that
//!    widget first.
//! 3. A target-only dispatch stops after the source, even when the source
//!    is disabled and its listeners did not run.
//! 4. The walk stops at the first parent outside the modal subtree.
//!
//! Listener lists are snapshotted before they run, and every widget id is
//! checked for liveness before it is touched, so listeners may destroy
//! widgets (including the one being visited) during dispatch.
//!
//! # Hit testing
//!
//! [`EventDispatcher::hit_test`] descends from a root through the frontmost
//! visible child containing the point, the way mouse events pick their
//! source.

use std::rc::Rc;

use mana_gui_core::logging::targets;
use mana_gui_core::{Point, WidgetId};

use super::events::{FocusEvent, FocusEventType, KeyEvent, KeyEventType, MouseEvent, MouseEventType};
use super::listener::{EventContext, FocusListener, KeyListener, MouseListener};
use super::tree::WidgetTree;

/// Stateless event distribution helpers.
pub struct EventDispatcher;

impl EventDispatcher {
    /// Distribute a mouse event from `event.source()` up its ancestor chain.
    ///
    /// `position` is the event position in screen coordinates.
    pub fn distribute_mouse_event(
        cx: &mut EventContext<'_>,
        event: &mut MouseEvent,
        position: Point,
        force: bool,
        to_source_only: bool,
    ) {
        let source = event.source();
        if !cx.tree().exists(source) {
            tracing::trace!(target: targets::DISPATCH, ?source, "mouse event source is gone");
            return;
        }

        if !force && Self::outside_modal_scope(cx, source) {
            tracing::trace!(
                target: targets::DISPATCH,
                ?source,
                kind = ?event.kind(),
                "mouse event blocked by modal focus"
            );
            return;
        }

        let mut current = Some(source);
        while let Some(widget) = current {
            if !cx.tree().exists(widget) {
                tracing::trace!(
                    target: targets::DISPATCH,
                    ?widget,
                    "widget destroyed during dispatch"
                );
                break;
            }
            let parent = cx.tree().parent(widget);

            if force || cx.tree().is_enabled(widget) {
                let relative = position - cx.tree().absolute_position(widget).unwrap_or_default();
                event.set_position(relative.x, relative.y);

                tracing::trace!(
                    target: targets::DISPATCH,
                    ?widget,
                    kind = ?event.kind(),
                    x = event.x(),
                    y = event.y(),
                    "delivering mouse event"
                );
                for listener in cx.tree().mouse_listeners(widget) {
                    Self::notify_mouse_listener(listener.as_ref(), event, cx);
                }
            }

            if to_source_only {
                break;
            }

            current = parent;
            if let Some(next) = current {
                if Self::outside_modal_scope(cx, next) {
                    break;
                }
            }
        }
    }

    fn outside_modal_scope(cx: &EventContext<'_>, id: WidgetId) -> bool {
        let focus = cx.focus();
        let tree = cx.tree();
        (focus.modal_focused().is_some() && !focus.is_modal_focused(tree, id))
            || (focus.modal_mouse_input_focused().is_some()
                && !focus.is_modal_mouse_input_focused(tree, id))
    }

    fn notify_mouse_listener(
        listener: &dyn MouseListener,
        event: &mut MouseEvent,
        cx: &mut EventContext<'_>,
    ) {
        match event.kind() {
            MouseEventType::Entered => listener.mouse_entered(event, cx),
            MouseEventType::Exited => listener.mouse_exited(event, cx),
            MouseEventType::Moved => listener.mouse_moved(event, cx),
            MouseEventType::Pressed => listener.mouse_pressed(event, cx),
            MouseEventType::Released => listener.mouse_released(event, cx),
            MouseEventType::WheelMovedUp => listener.mouse_wheel_moved_up(event, cx),
            MouseEventType::WheelMovedDown => listener.mouse_wheel_moved_down(event, cx),
            MouseEventType::Dragged => listener.mouse_dragged(event, cx),
            MouseEventType::Clicked => listener.mouse_clicked(event, cx),
        }
    }

    /// Distribute a key event from `event.source()` up its ancestor chain.
    ///
    /// Disabled widgets are skipped. Consuming the event does not stop the
    /// walk.
    pub fn distribute_key_event(cx: &mut EventContext<'_>, event: &mut KeyEvent) {
        let Some(source) = event.source() else {
            return;
        };
        if !cx.tree().exists(source) {
            return;
        }

        if Self::outside_modal_scope(cx, source) {
            tracing::trace!(target: targets::DISPATCH, ?source, "key event blocked by modal focus");
            return;
        }

        let mut current = Some(source);
        while let Some(widget) = current {
            if !cx.tree().exists(widget) {
                break;
            }
            let parent = cx.tree().parent(widget);

            if cx.tree().is_enabled(widget) {
                tracing::trace!(
                    target: targets::DISPATCH,
                    ?widget,
                    key = ?event.key(),
                    "delivering key event"
                );
                for listener in cx.tree().key_listeners(widget) {
                    Self::notify_key_listener(listener.as_ref(), event, cx);
                }
            }

            current = parent;
            if let Some(next) = current {
                if Self::outside_modal_scope(cx, next) {
                    break;
                }
            }
        }
    }

    /// Offer a key event to global listeners in registration order, stopping
    /// as soon as one consumes it.
    pub fn distribute_key_event_to_global_key_listeners(
        cx: &mut EventContext<'_>,
        listeners: &[Rc<dyn KeyListener>],
        event: &mut KeyEvent,
    ) {
        for listener in listeners {
            Self::notify_key_listener(listener.as_ref(), event, cx);
            if event.is_consumed() {
                tracing::trace!(
                    target: targets::DISPATCH,
                    key = ?event.key(),
                    "key consumed by global listener"
                );
                break;
            }
        }
    }

    fn notify_key_listener(
        listener: &dyn KeyListener,
        event: &mut KeyEvent,
        cx: &mut EventContext<'_>,
    ) {
        match event.kind() {
            KeyEventType::Pressed => listener.key_pressed(event, cx),
            KeyEventType::Released => listener.key_released(event, cx),
        }
    }

    /// Deliver a focus event to the listeners of its source widget only.
    pub fn distribute_focus_event(cx: &mut EventContext<'_>, event: &FocusEvent) {
        let listeners = cx.tree().focus_listeners(event.source());
        for listener in listeners {
            Self::notify_focus_listener(listener.as_ref(), event, cx);
        }
    }

    fn notify_focus_listener(
        listener: &dyn FocusListener,
        event: &FocusEvent,
        cx: &mut EventContext<'_>,
    ) {
        match event.kind() {
            FocusEventType::Gained => listener.focus_gained(event, cx),
            FocusEventType::Lost => listener.focus_lost(event, cx),
        }
    }

    /// Find the deepest widget under a screen point, starting at `root`.
    ///
    /// Returns `root` itself when no child contains the point, and `None`
    /// only when `root` does not exist.
    pub fn hit_test(tree: &WidgetTree, root: WidgetId, position: Point) -> Option<WidgetId> {
        if !tree.exists(root) {
            return None;
        }

        let mut current = root;
        // A descent never visits more widgets than the tree holds.
        for _ in 0..tree.len() {
            let origin = tree.absolute_position(current).unwrap_or_default();
            match tree.child_at(current, position - origin) {
                Some(child) => current = child,
                None => break,
            }
        }
        Some(current)
    }
}
