//! Focus and modal state for a widget tree.
//!
//! [`FocusHandler`] is the single source of truth for:
//!
//! - the keyboard-focused widget
//! - the widget holding modal focus, and the one holding modal mouse input
//!   focus
//! - the widget being dragged and the widget that received the last press
//! - the modal holders seen at the previous logic tick, used to detect
//!   modal transitions
//!
//! The handler stores plain [`WidgetId`]s and performs no event delivery on
//! its own. Operations that notify listeners live on
//! [`EventContext`](super::EventContext), which pairs the handler with the
//! widget tree.
//!
//! # Modal focus
//!
//! A widget is *modal focused* when it is the modal holder or a descendant of
//! it. While modal focus is held, distribution of key and mouse events stops
//! at the first widget outside the modal subtree. Modal mouse input focus
//! works the same way but confines only mouse events.
//!
//! # Tab order
//!
//! Tab order is a depth-first pre-order traversal of the visible widgets
//! under the top widget: parents before children, siblings back to front.
//! Navigation wraps around at both ends.

use mana_gui_core::WidgetId;

use super::tree::WidgetTree;

/// Direction of focus navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    /// Toward the end of the tab order.
    Forward,
    /// Toward the start of the tab order.
    Backward,
}

/// Focus, modal and drag bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusHandler {
    focused: Option<WidgetId>,
    modal_focused: Option<WidgetId>,
    modal_mouse_input_focused: Option<WidgetId>,
    dragged: Option<WidgetId>,
    last_widget_pressed: Option<WidgetId>,
    last_widget_with_modal_focus: Option<WidgetId>,
    last_widget_with_modal_mouse_input_focus: Option<WidgetId>,
}

impl FocusHandler {
    /// Create a handler with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// The widget with keyboard focus.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Check if a specific widget has keyboard focus.
    #[inline]
    pub fn has_focus(&self, id: WidgetId) -> bool {
        self.focused == Some(id)
    }

    /// Set the focused widget without notifying anyone.
    ///
    /// Composite widgets use this on their internal handler. For the main
    /// handler use [`EventContext::request_focus`](super::EventContext::request_focus).
    pub fn set_focused(&mut self, id: Option<WidgetId>) {
        self.focused = id;
    }

    /// The widget holding modal focus.
    #[inline]
    pub fn modal_focused(&self) -> Option<WidgetId> {
        self.modal_focused
    }

    pub(crate) fn set_modal_focused(&mut self, id: Option<WidgetId>) {
        self.modal_focused = id;
    }

    /// The widget holding modal mouse input focus.
    #[inline]
    pub fn modal_mouse_input_focused(&self) -> Option<WidgetId> {
        self.modal_mouse_input_focused
    }

    pub(crate) fn set_modal_mouse_input_focused(&mut self, id: Option<WidgetId>) {
        self.modal_mouse_input_focused = id;
    }

    /// The widget a drag started on.
    pub fn dragged(&self) -> Option<WidgetId> {
        self.dragged
    }

    /// Set or clear the dragged widget.
    pub fn set_dragged(&mut self, id: Option<WidgetId>) {
        self.dragged = id;
    }

    /// The widget that received the last unmatched press.
    pub fn last_widget_pressed(&self) -> Option<WidgetId> {
        self.last_widget_pressed
    }

    /// Set or clear the last pressed widget.
    pub fn set_last_widget_pressed(&mut self, id: Option<WidgetId>) {
        self.last_widget_pressed = id;
    }

    /// Modal focus holder observed at the previous logic tick.
    pub fn last_widget_with_modal_focus(&self) -> Option<WidgetId> {
        self.last_widget_with_modal_focus
    }

    /// Record the modal focus holder for transition detection.
    pub fn set_last_widget_with_modal_focus(&mut self, id: Option<WidgetId>) {
        self.last_widget_with_modal_focus = id;
    }

    /// Modal mouse input focus holder observed at the previous logic tick.
    pub fn last_widget_with_modal_mouse_input_focus(&self) -> Option<WidgetId> {
        self.last_widget_with_modal_mouse_input_focus
    }

    /// Record the modal mouse input focus holder for transition detection.
    pub fn set_last_widget_with_modal_mouse_input_focus(&mut self, id: Option<WidgetId>) {
        self.last_widget_with_modal_mouse_input_focus = id;
    }

    /// Whether `id` is the modal focus holder or one of its descendants.
    ///
    /// Always `false` when no widget holds modal focus.
    pub fn is_modal_focused(&self, tree: &WidgetTree, id: WidgetId) -> bool {
        self.modal_focused
            .is_some_and(|modal| tree.exists(id) && tree.is_ancestor_of(modal, id))
    }

    /// Whether `id` is the modal mouse input holder or one of its descendants.
    pub fn is_modal_mouse_input_focused(&self, tree: &WidgetTree, id: WidgetId) -> bool {
        self.modal_mouse_input_focused
            .is_some_and(|modal| tree.exists(id) && tree.is_ancestor_of(modal, id))
    }

    /// Forget every widget that no longer exists.
    ///
    /// The modal holders recorded at the previous logic tick are kept, so
    /// that the next tick still sees a destroyed holder as a release.
    pub fn prune(&mut self, tree: &WidgetTree) {
        for slot in self.slots_mut() {
            if slot.is_some_and(|id| !tree.exists(id)) {
                *slot = None;
            }
        }
    }

    /// Forget every widget inside the subtree of `root`, except those inside
    /// the subtree of `keep`.
    pub(crate) fn forget_subtree(
        &mut self,
        tree: &WidgetTree,
        root: WidgetId,
        keep: Option<WidgetId>,
    ) {
        for slot in self.slots_mut() {
            let Some(id) = *slot else {
                continue;
            };
            let kept = keep.is_some_and(|keep| tree.is_ancestor_of(keep, id));
            if tree.is_ancestor_of(root, id) && !kept {
                *slot = None;
            }
        }
    }

    fn slots_mut(&mut self) -> [&mut Option<WidgetId>; 5] {
        [
            &mut self.focused,
            &mut self.modal_focused,
            &mut self.modal_mouse_input_focused,
            &mut self.dragged,
            &mut self.last_widget_pressed,
        ]
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Pick the widget focus navigation would move to.
    ///
    /// With `tabbing` set, the current widget must allow tabbing out and the
    /// candidate must allow tabbing in. Candidates must be focusable and,
    /// while modal focus is held, inside the modal subtree. Returns `None`
    /// when no candidate exists.
    pub fn next_candidate(
        &self,
        tree: &WidgetTree,
        root: WidgetId,
        direction: TabDirection,
        tabbing: bool,
    ) -> Option<WidgetId> {
        if tabbing
            && self
                .focused
                .is_some_and(|current| tree.exists(current) && !tree.is_tab_out_enabled(current))
        {
            return None;
        }

        let order = self.build_tab_order(tree, root, tabbing);
        if order.is_empty() {
            return None;
        }

        let position = self
            .focused
            .and_then(|current| order.iter().position(|&id| id == current));

        let next = match (direction, position) {
            (TabDirection::Forward, Some(pos)) => order[(pos + 1) % order.len()],
            (TabDirection::Forward, None) => order[0],
            (TabDirection::Backward, Some(pos)) => {
                let prev = if pos == 0 { order.len() - 1 } else { pos - 1 };
                order[prev]
            }
            (TabDirection::Backward, None) => order[order.len() - 1],
        };
        Some(next)
    }

    /// Widgets eligible for focus, in tab order.
    fn build_tab_order(&self, tree: &WidgetTree, root: WidgetId, tabbing: bool) -> Vec<WidgetId> {
        let mut order = Vec::new();
        self.collect_tab_order_recursive(tree, root, tabbing, &mut order);
        order
    }

    fn collect_tab_order_recursive(
        &self,
        tree: &WidgetTree,
        id: WidgetId,
        tabbing: bool,
        order: &mut Vec<WidgetId>,
    ) {
        // Hidden widgets hide their whole subtree.
        if !tree.is_visible(id) {
            return;
        }

        let modal_ok = self.modal_focused.is_none() || self.is_modal_focused(tree, id);
        if tree.is_focusable(id) && modal_ok && (!tabbing || tree.is_tab_in_enabled(id)) {
            order.push(id);
        }

        for &child in tree.children(id) {
            self.collect_tab_order_recursive(tree, child, tabbing, order);
        }
    }
}
