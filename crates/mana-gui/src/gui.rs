//! The event core: turns raw input into listener callbacks.
//!
//! [`Gui`] owns the widget tree, the focus handler, the global key listeners
//! and the *widget-with-mouse queue*: the widgets currently under the
//! pointer, innermost at the front. Every mouse movement diffs the queue
//! against the new hit-test chain to synthesize EXITED and ENTERED events,
//! so every widget that received ENTERED receives exactly one EXITED before
//! it can be entered again.
//!
//! # Frame loop
//!
//! ```
//! use mana_gui::{Gui, MouseInput};
//! use mana_gui_core::GuiConfig;
//!
//! let mut gui = Gui::new(GuiConfig::default());
//! gui.queue_mouse_input(MouseInput::moved(100, 100));
//! gui.logic();
//! assert_eq!(gui.widgets_with_mouse().collect::<Vec<_>>(), vec![gui.top().unwrap()]);
//! ```

use std::collections::VecDeque;
use std::rc::Rc;

use mana_gui_core::logging::{span_names, targets};
use mana_gui_core::{GuiConfig, GuiError, PerfSpan, Point, Result, WidgetId};

use crate::input::{InputQueue, KeyInput, MouseInput, MouseInputType};
use crate::widget::{
    EventContext, EventDispatcher, FocusHandler, Key, KeyEvent, KeyEventType, KeyListener,
    KeyboardModifiers, MouseButton, MouseEvent, MouseEventType, WidgetTree, WidgetTreeDebug,
};

/// The GUI event core.
pub struct Gui {
    tree: WidgetTree,
    focus: FocusHandler,
    top: Option<WidgetId>,
    config: GuiConfig,
    input: InputQueue,
    global_key_listeners: Vec<Rc<dyn KeyListener>>,
    /// Widgets under the pointer, innermost first.
    widget_with_mouse_queue: VecDeque<WidgetId>,
    modifiers: KeyboardModifiers,
    click_count: u32,
    last_mouse_x: i32,
    last_mouse_y: i32,
    last_mouse_press_button: Option<MouseButton>,
    last_mouse_press_timestamp: Option<u64>,
    last_mouse_drag_button: Option<MouseButton>,
}

impl Default for Gui {
    fn default() -> Self {
        Self::new(GuiConfig::default())
    }
}

impl Gui {
    /// Create a GUI with an empty full-screen top widget.
    pub fn new(config: GuiConfig) -> Self {
        let mut tree = WidgetTree::new();
        let top = tree.create("top", config.screen.bounds());
        tracing::debug!(target: targets::GUI, ?top, screen = ?config.screen, "gui created");

        Self {
            tree,
            focus: FocusHandler::new(),
            top: Some(top),
            config,
            input: InputQueue::new(),
            global_key_listeners: Vec::new(),
            widget_with_mouse_queue: VecDeque::new(),
            modifiers: KeyboardModifiers::NONE,
            click_count: 0,
            last_mouse_x: 0,
            last_mouse_y: 0,
            last_mouse_press_button: None,
            last_mouse_press_timestamp: None,
            last_mouse_drag_button: None,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// The widget tree.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Mutable access to the widget tree.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The focus handler.
    pub fn focus_handler(&self) -> &FocusHandler {
        &self.focus
    }

    /// Mutable access to the focus handler.
    ///
    /// Changes made here do not notify focus listeners.
    pub fn focus_handler_mut(&mut self) -> &mut FocusHandler {
        &mut self.focus
    }

    /// A context for focus operations that notify listeners.
    pub fn context(&mut self) -> EventContext<'_> {
        EventContext::new(&mut self.tree, &mut self.focus, self.top)
    }

    /// Destroy a widget subtree.
    pub fn destroy_widget(&mut self, id: WidgetId) -> Result<()> {
        self.context().destroy(id)
    }

    /// The root of hit testing and tab order.
    pub fn top(&self) -> Option<WidgetId> {
        self.top.filter(|&top| self.tree.exists(top))
    }

    /// Replace the top widget.
    ///
    /// Focus, modal focus and drag state held by widgets of the previous top
    /// subtree are released without notification.
    pub fn set_top(&mut self, top: WidgetId) -> Result<()> {
        if !self.tree.exists(top) {
            return Err(GuiError::WidgetNotFound(top));
        }
        if let Some(old) = self.top.filter(|&old| old != top && self.tree.exists(old)) {
            self.focus.forget_subtree(&self.tree, old, Some(top));
        }
        tracing::debug!(target: targets::GUI, old = ?self.top, new = ?top, "top widget replaced");
        self.top = Some(top);
        Ok(())
    }

    /// Widgets currently under the pointer, innermost first.
    pub fn widgets_with_mouse(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.widget_with_mouse_queue.iter().copied()
    }

    /// Number of consecutive presses of the last pressed button.
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    /// Outline of the widget tree under the top widget.
    pub fn debug_tree(&self) -> String {
        self.top()
            .map(|top| WidgetTreeDebug::new().format_subtree(&self.tree, top))
            .unwrap_or_default()
    }

    // =========================================================================
    // Global key listeners
    // =========================================================================

    /// Register a listener that sees every key input before any widget.
    pub fn add_global_key_listener(&mut self, listener: Rc<dyn KeyListener>) {
        self.global_key_listeners.push(listener);
    }

    /// Unregister a global key listener. Returns `true` if it was registered.
    pub fn remove_global_key_listener(&mut self, listener: &Rc<dyn KeyListener>) -> bool {
        let before = self.global_key_listeners.len();
        self.global_key_listeners
            .retain(|registered| !std::ptr::addr_eq(Rc::as_ptr(registered), Rc::as_ptr(listener)));
        self.global_key_listeners.len() != before
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Queue a mouse input for the next [`logic`](Self::logic) call.
    pub fn queue_mouse_input(&mut self, input: MouseInput) {
        self.input.push_mouse_input(input);
    }

    /// Queue a key input for the next [`logic`](Self::logic) call.
    pub fn queue_key_input(&mut self, input: KeyInput) {
        self.input.push_key_input(input);
    }

    /// Run one frame: react to modal transitions, then handle queued input.
    pub fn logic(&mut self) {
        let _span = PerfSpan::new(span_names::LOGIC_TICK);

        self.focus.prune(&self.tree);
        self.handle_modal_focus();
        self.handle_modal_mouse_input_focus();

        while let Some(input) = self.input.pop_key_input() {
            self.handle_key_input(&input);
        }
        while let Some(input) = self.input.pop_mouse_input() {
            self.handle_mouse_input(&input);
        }
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// The deepest visible widget under a screen point.
    ///
    /// Returns the top widget when no child contains the point, and `None`
    /// only when there is no live top widget.
    pub fn widget_at(&self, x: i32, y: i32) -> Option<WidgetId> {
        let top = self.top()?;
        EventDispatcher::hit_test(&self.tree, top, Point::new(x, y))
    }

    /// The widget mouse input at a point is routed to.
    ///
    /// While a widget holds modal mouse input focus, hits outside its subtree
    /// are redirected to it.
    pub fn mouse_event_source(&self, x: i32, y: i32) -> Option<WidgetId> {
        let widget = self.widget_at(x, y)?;
        let redirect = self
            .focus
            .modal_mouse_input_focused()
            .filter(|&modal| self.tree.exists(modal))
            .filter(|_| !self.focus.is_modal_mouse_input_focused(&self.tree, widget));
        Some(redirect.unwrap_or(widget))
    }

    /// The widget key input is routed to: the focused widget, descending
    /// through composite widgets' internal focus.
    pub fn key_event_source(&self) -> Option<WidgetId> {
        let mut widget = self.focus.focused().filter(|&id| self.tree.exists(id))?;
        for _ in 0..self.tree.len() {
            let inner = self
                .tree
                .internal_focus_handler(widget)
                .and_then(FocusHandler::focused)
                .filter(|&id| self.tree.exists(id));
            match inner {
                Some(inner) if inner != widget => widget = inner,
                _ => break,
            }
        }
        Some(widget)
    }

    // =========================================================================
    // Distribution
    // =========================================================================

    /// Build a mouse event and distribute it from `source`.
    ///
    /// `x` and `y` are screen coordinates. `force` bypasses the enabled and
    /// modal checks; `to_source_only` stops after `source` itself.
    #[allow(clippy::too_many_arguments)]
    pub fn distribute_mouse_event(
        &mut self,
        source: WidgetId,
        kind: MouseEventType,
        button: Option<MouseButton>,
        x: i32,
        y: i32,
        force: bool,
        to_source_only: bool,
    ) {
        let mut event = MouseEvent::new(
            source,
            kind,
            button,
            x,
            y,
            self.modifiers,
            self.click_count,
        );
        let mut cx = EventContext::new(&mut self.tree, &mut self.focus, self.top);
        EventDispatcher::distribute_mouse_event(
            &mut cx,
            &mut event,
            Point::new(x, y),
            force,
            to_source_only,
        );
    }

    /// Distribute a key event from its source up the ancestor chain.
    pub fn distribute_key_event(&mut self, event: &mut KeyEvent) {
        let mut cx = EventContext::new(&mut self.tree, &mut self.focus, self.top);
        EventDispatcher::distribute_key_event(&mut cx, event);
    }

    /// Offer a key event to the global key listeners.
    pub fn distribute_key_event_to_global_key_listeners(&mut self, event: &mut KeyEvent) {
        let listeners = self.global_key_listeners.clone();
        let mut cx = EventContext::new(&mut self.tree, &mut self.focus, self.top);
        EventDispatcher::distribute_key_event_to_global_key_listeners(&mut cx, &listeners, event);
    }

    // =========================================================================
    // Mouse input
    // =========================================================================

    fn record_mouse_state(&mut self, input: &MouseInput) {
        self.last_mouse_x = input.x;
        self.last_mouse_y = input.y;
        self.modifiers = input.modifiers;
    }

    /// Route a mouse input to its handler.
    pub fn handle_mouse_input(&mut self, input: &MouseInput) {
        self.focus.prune(&self.tree);
        match input.kind {
            MouseInputType::Moved => self.handle_mouse_moved(input),
            MouseInputType::Pressed => self.handle_mouse_pressed(input),
            MouseInputType::Released => self.handle_mouse_released(input),
            MouseInputType::WheelMovedUp => self.handle_mouse_wheel_moved_up(input),
            MouseInputType::WheelMovedDown => self.handle_mouse_wheel_moved_down(input),
        }
    }

    /// Pointer movement: exit stale widgets, enter new ones, then deliver
    /// DRAGGED or MOVED.
    pub fn handle_mouse_moved(&mut self, input: &MouseInput) {
        self.record_mouse_state(input);
        let position = Point::new(input.x, input.y);

        let inside_top = self
            .top()
            .and_then(|top| self.tree.dimension(top))
            .is_some_and(|bounds| position.x >= 0 && position.y >= 0 && bounds.contains(position));
        if !inside_top {
            self.flush_widget_with_mouse_queue(input.button, position);
            return;
        }

        self.exit_widgets_not_under(input.button, position);

        let mut entry = self.mouse_event_source(position.x, position.y);
        if let (Some(modal), Some(hit)) = (self.focus.modal_mouse_input_focused(), entry) {
            let over_modal = self
                .tree
                .absolute_bounds(modal)
                .is_some_and(|bounds| bounds.contains(position));
            if hit == modal && !over_modal {
                entry = None;
            }
        }
        if let Some(entry) = entry {
            self.enter_widgets_from(entry, input.button, position, true);
        }

        match self.focus.dragged().filter(|&id| self.tree.exists(id)) {
            Some(dragged) => {
                let button = self.last_mouse_drag_button;
                self.distribute_mouse_event(
                    dragged,
                    MouseEventType::Dragged,
                    button,
                    input.x,
                    input.y,
                    false,
                    false,
                );
            }
            None => {
                if let Some(source) = self.mouse_event_source(input.x, input.y) {
                    self.distribute_mouse_event(
                        source,
                        MouseEventType::Moved,
                        input.button,
                        input.x,
                        input.y,
                        false,
                        false,
                    );
                }
            }
        }
    }

    /// Remove queue entries that are gone, hidden or no longer under the
    /// pointer, sending EXITED to the live ones.
    fn exit_widgets_not_under(&mut self, button: Option<MouseButton>, position: Point) {
        loop {
            let snapshot: Vec<WidgetId> = self.widget_with_mouse_queue.iter().copied().collect();
            let mut removed = false;

            for widget in snapshot {
                if !self.tree.exists(widget) {
                    self.widget_with_mouse_queue.retain(|&queued| queued != widget);
                    removed = true;
                    continue;
                }

                let under_pointer = self.tree.is_visible(widget)
                    && self
                        .tree
                        .absolute_bounds(widget)
                        .is_some_and(|bounds| bounds.contains(position));
                if under_pointer {
                    continue;
                }

                self.widget_with_mouse_queue.retain(|&queued| queued != widget);
                removed = true;
                tracing::trace!(target: targets::GUI, ?widget, "pointer left widget");
                self.distribute_mouse_event(
                    widget,
                    MouseEventType::Exited,
                    button,
                    position.x,
                    position.y,
                    true,
                    true,
                );
                self.click_count = 1;
                self.last_mouse_press_timestamp = None;
            }

            if !removed {
                break;
            }
        }
    }

    /// Send ENTERED to every widget from `start` to the root that is not in
    /// the queue yet, and queue it.
    ///
    /// Newly entered widgets go to the front of the queue, innermost first.
    fn enter_widgets_from(
        &mut self,
        start: WidgetId,
        button: Option<MouseButton>,
        position: Point,
        force: bool,
    ) {
        let mut inserted = 0;
        for widget in self.tree.ancestors_inclusive(start) {
            if !self.tree.exists(widget) || self.widget_with_mouse_queue.contains(&widget) {
                continue;
            }
            tracing::trace!(target: targets::GUI, ?widget, "pointer entered widget");
            self.distribute_mouse_event(
                widget,
                MouseEventType::Entered,
                button,
                position.x,
                position.y,
                force,
                true,
            );
            if self.tree.exists(widget) {
                self.widget_with_mouse_queue.insert(inserted, widget);
                inserted += 1;
            }
        }
    }

    /// Send EXITED to every live queued widget and empty the queue.
    fn flush_widget_with_mouse_queue(&mut self, button: Option<MouseButton>, position: Point) {
        if self.widget_with_mouse_queue.is_empty() {
            return;
        }
        let flushed: Vec<WidgetId> = self.widget_with_mouse_queue.drain(..).collect();
        tracing::debug!(
            target: targets::GUI,
            count = flushed.len(),
            "flushing widget-with-mouse queue"
        );

        for widget in flushed {
            if self.tree.exists(widget) {
                self.distribute_mouse_event(
                    widget,
                    MouseEventType::Exited,
                    button,
                    position.x,
                    position.y,
                    true,
                    true,
                );
            }
        }
    }

    /// Button press: focus, multi-click counting, PRESSED, and drag start.
    pub fn handle_mouse_pressed(&mut self, input: &MouseInput) {
        self.record_mouse_state(input);

        let source = self
            .focus
            .dragged()
            .filter(|&id| self.tree.exists(id))
            .or_else(|| self.mouse_event_source(input.x, input.y));
        let Some(source) = source else {
            return;
        };

        if self.focus.modal_focused().is_none() || self.focus.is_modal_focused(&self.tree, source) {
            self.context().request_focus(source);
        }

        let interval = self.config.double_click_interval_ms;
        let repeated = self.last_mouse_press_button == input.button
            && self
                .last_mouse_press_timestamp
                .is_some_and(|last| input.timestamp_ms.saturating_sub(last) < interval);
        self.click_count = if repeated { self.click_count.saturating_add(1) } else { 1 };

        self.distribute_mouse_event(
            source,
            MouseEventType::Pressed,
            input.button,
            input.x,
            input.y,
            false,
            false,
        );

        self.focus.set_last_widget_pressed(Some(source));
        self.focus.set_dragged(Some(source));
        self.last_mouse_drag_button = input.button;
        self.last_mouse_press_button = input.button;
        self.last_mouse_press_timestamp = Some(input.timestamp_ms);
    }

    /// Button release: RELEASED, CLICKED when it completes a click, and drag
    /// end.
    pub fn handle_mouse_released(&mut self, input: &MouseInput) {
        self.record_mouse_state(input);

        let mut source = self.mouse_event_source(input.x, input.y);
        if let Some(dragged) = self.focus.dragged().filter(|&id| self.tree.exists(id)) {
            if source != self.focus.last_widget_pressed() {
                self.focus.set_last_widget_pressed(None);
            }
            source = Some(dragged);
        }

        if let Some(source) = source {
            self.distribute_mouse_event(
                source,
                MouseEventType::Released,
                input.button,
                input.x,
                input.y,
                false,
                false,
            );

            if input.button == self.last_mouse_press_button
                && self.focus.last_widget_pressed() == Some(source)
            {
                self.distribute_mouse_event(
                    source,
                    MouseEventType::Clicked,
                    input.button,
                    input.x,
                    input.y,
                    false,
                    false,
                );
                self.focus.set_last_widget_pressed(None);
            } else {
                self.last_mouse_press_button = None;
                self.click_count = 0;
            }
        }

        self.focus.set_dragged(None);
    }

    /// Wheel up: delivered to the drag target or the widget under the
    /// pointer only.
    pub fn handle_mouse_wheel_moved_up(&mut self, input: &MouseInput) {
        self.handle_mouse_wheel(input, MouseEventType::WheelMovedUp);
    }

    /// Wheel down: delivered to the drag target or the widget under the
    /// pointer only.
    pub fn handle_mouse_wheel_moved_down(&mut self, input: &MouseInput) {
        self.handle_mouse_wheel(input, MouseEventType::WheelMovedDown);
    }

    fn handle_mouse_wheel(&mut self, input: &MouseInput, kind: MouseEventType) {
        self.record_mouse_state(input);
        let source = self
            .focus
            .dragged()
            .filter(|&id| self.tree.exists(id))
            .or_else(|| self.mouse_event_source(input.x, input.y));
        if let Some(source) = source {
            self.distribute_mouse_event(source, kind, input.button, input.x, input.y, false, true);
        }
    }

    // =========================================================================
    // Key input
    // =========================================================================

    /// Key input: global listeners, then the focused widget, then Tab
    /// navigation.
    pub fn handle_key_input(&mut self, input: &KeyInput) {
        self.modifiers = input.modifiers;

        let mut global = KeyEvent::new(
            None,
            input.kind,
            input.key,
            input.modifiers,
            input.numeric_pad,
        );
        self.distribute_key_event_to_global_key_listeners(&mut global);
        if global.is_consumed() {
            return;
        }

        let mut consumed = false;
        if let Some(focused) = self.focus.focused().filter(|&id| self.tree.exists(id)) {
            if !self.tree.is_focusable(focused) {
                self.context().focus_none();
            } else if let Some(source) = self.key_event_source() {
                let mut event = KeyEvent::new(
                    Some(source),
                    input.kind,
                    input.key,
                    input.modifiers,
                    input.numeric_pad,
                );
                self.distribute_key_event(&mut event);
                consumed = event.is_consumed();
            }
        }

        if !consumed
            && self.config.tabbing
            && input.key == Key::Tab
            && input.kind == KeyEventType::Pressed
        {
            let mut cx = self.context();
            if input.modifiers.shift {
                cx.tab_previous();
            } else {
                cx.tab_next();
            }
        }
    }

    // =========================================================================
    // Modal transitions
    // =========================================================================

    /// React to modal focus being grabbed or released since the last call.
    pub fn handle_modal_focus(&mut self) {
        let current = self.focus.modal_focused();
        let last = self.focus.last_widget_with_modal_focus();
        if current == last {
            return;
        }

        if last.is_none() {
            tracing::debug!(target: targets::GUI, modal = ?current, "modal focus gained");
            self.handle_modal_focus_gained();
            self.focus.set_last_widget_with_modal_focus(current);
        } else {
            tracing::debug!(target: targets::GUI, modal = ?last, "modal focus released");
            self.handle_modal_focus_released();
            self.focus.set_last_widget_with_modal_focus(None);
        }
    }

    /// React to modal mouse input focus being grabbed or released since the
    /// last call.
    pub fn handle_modal_mouse_input_focus(&mut self) {
        let current = self.focus.modal_mouse_input_focused();
        let last = self.focus.last_widget_with_modal_mouse_input_focus();
        if current == last {
            return;
        }

        if last.is_none() {
            tracing::debug!(
                target: targets::GUI,
                modal = ?current,
                "modal mouse input focus gained"
            );
            self.handle_modal_focus_gained();
            self.focus.set_last_widget_with_modal_mouse_input_focus(current);
        } else {
            tracing::debug!(
                target: targets::GUI,
                modal = ?last,
                "modal mouse input focus released"
            );
            self.handle_modal_focus_released();
            self.focus.set_last_widget_with_modal_mouse_input_focus(None);
        }
    }

    /// Exit every hovered widget as if the pointer had left the screen.
    pub fn handle_modal_focus_gained(&mut self) {
        let position = Point::new(self.last_mouse_x, self.last_mouse_y);
        self.flush_widget_with_mouse_queue(self.last_mouse_press_button, position);
        self.focus
            .set_last_widget_with_modal_mouse_input_focus(self.focus.modal_mouse_input_focused());
    }

    /// Re-enter the widgets under the last known pointer position.
    pub fn handle_modal_focus_released(&mut self) {
        let position = Point::new(self.last_mouse_x, self.last_mouse_y);
        if let Some(source) = self.mouse_event_source(position.x, position.y) {
            self.enter_widgets_from(source, self.last_mouse_press_button, position, false);
        }
    }
}
