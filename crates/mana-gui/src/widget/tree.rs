//! The widget arena and liveness registry.
//!
//! [`WidgetTree`] owns every widget's state: geometry, visibility, parent and
//! children, listener registrations and an optional internal focus handler.
//! Widgets are addressed by [`WidgetId`], a generation-checked key, so a
//! stale id is detected by a single lookup ([`WidgetTree::exists`]) rather
//! than dereferenced.
//!
//! Geometry follows the container model of the widget library the game
//! client uses:
//!
//! - A widget's dimension is relative to its parent's *children area*.
//! - The children area defaults to the whole widget (`0, 0, width, height`)
//!   and can be narrowed for frames with borders or title bars.
//! - Children are kept in z-order; the last child is the frontmost.

use std::rc::Rc;

use slotmap::SlotMap;

use mana_gui_core::logging::targets;
use mana_gui_core::{GuiError, Point, Rect, Result, WidgetId};

use super::focus::FocusHandler;
use super::listener::{FocusListener, KeyListener, MouseListener};

/// Per-widget data stored in the arena.
struct WidgetNode {
    /// Human-readable name for debugging.
    name: String,
    /// Position relative to the parent's children area, and size.
    dimension: Rect,
    /// Area children are laid out in, relative to this widget.
    children_area: Option<Rect>,
    visible: bool,
    enabled: bool,
    focusable: bool,
    tab_in: bool,
    tab_out: bool,
    parent: Option<WidgetId>,
    /// Children in z-order, back to front.
    children: Vec<WidgetId>,
    mouse_listeners: Vec<Rc<dyn MouseListener>>,
    key_listeners: Vec<Rc<dyn KeyListener>>,
    focus_listeners: Vec<Rc<dyn FocusListener>>,
    /// Sub-focus of composite widgets.
    internal_focus_handler: Option<FocusHandler>,
}

impl WidgetNode {
    fn new(name: String, dimension: Rect) -> Self {
        Self {
            name,
            dimension,
            children_area: None,
            visible: true,
            enabled: true,
            focusable: false,
            tab_in: true,
            tab_out: true,
            parent: None,
            children: Vec::new(),
            mouse_listeners: Vec::new(),
            key_listeners: Vec::new(),
            focus_listeners: Vec::new(),
            internal_focus_handler: None,
        }
    }

    fn children_area(&self) -> Rect {
        self.children_area
            .unwrap_or_else(|| Rect::new(0, 0, self.dimension.width, self.dimension.height))
    }
}

/// Arena of widgets and the registry of which widgets are alive.
///
/// The tree is the single owner of widget state. Everything else, including
/// the `Gui`, the focus handler and the widget-with-mouse queue, holds
/// [`WidgetId`]s and re-validates them before use.
pub struct WidgetTree {
    widgets: SlotMap<WidgetId, WidgetNode>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
        }
    }

    /// Create a new root widget and return its id.
    ///
    /// The widget is visible, enabled and not focusable. Attach it to a
    /// container with [`add_child`](Self::add_child).
    pub fn create(&mut self, name: impl Into<String>, dimension: Rect) -> WidgetId {
        let name = name.into();
        tracing::trace!(target: targets::TREE, %name, ?dimension, "creating widget");
        self.widgets.insert(WidgetNode::new(name, dimension))
    }

    /// Destroy a widget and all of its descendants.
    ///
    /// Ids of destroyed widgets stay invalid forever; [`exists`](Self::exists)
    /// returns `false` for them.
    #[tracing::instrument(skip(self), target = "mana_gui::tree", level = "trace")]
    pub fn destroy(&mut self, id: WidgetId) -> Result<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::debug!(
            target: targets::TREE,
            ?id,
            descendant_count = descendants.len(),
            "destroying widget subtree"
        );

        if let Some(parent) = self.widgets.get(id).and_then(|node| node.parent) {
            if let Some(parent_node) = self.widgets.get_mut(parent) {
                parent_node.children.retain(|&child| child != id);
            }
        }

        for child in descendants {
            self.widgets.remove(child);
        }
        self.widgets.remove(id);
        Ok(())
    }

    /// Collect all descendants, children before their parents.
    fn collect_descendants(&self, id: WidgetId) -> Result<Vec<WidgetId>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        id: WidgetId,
        result: &mut Vec<WidgetId>,
    ) -> Result<()> {
        let node = self.node(id)?;
        for &child in &node.children {
            self.collect_descendants_recursive(child, result)?;
            result.push(child);
        }
        Ok(())
    }

    fn node(&self, id: WidgetId) -> Result<&WidgetNode> {
        self.widgets.get(id).ok_or(GuiError::WidgetNotFound(id))
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut WidgetNode> {
        self.widgets.get_mut(id).ok_or(GuiError::WidgetNotFound(id))
    }

    /// Check whether a widget is alive.
    #[inline]
    pub fn exists(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns `true` if the tree holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// Append `child` to `parent`'s children, making it the frontmost child.
    ///
    /// The child is detached from its previous parent first.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.set_parent(child, Some(parent))
    }

    /// Detach `child` from `parent`, making it a root widget.
    ///
    /// Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        if self.node(child)?.parent == Some(parent) {
            self.set_parent(child, None)?;
        }
        Ok(())
    }

    /// Set the parent of a widget. `None` makes it a root widget.
    pub fn set_parent(&mut self, id: WidgetId, new_parent: Option<WidgetId>) -> Result<()> {
        self.node(id)?;
        if let Some(parent) = new_parent {
            self.node(parent)?;
            if self.is_ancestor_of(id, parent) {
                return Err(GuiError::CircularParentage);
            }
        }

        let old_parent = self.node(id)?.parent;
        if let Some(old) = old_parent {
            if let Some(old_node) = self.widgets.get_mut(old) {
                old_node.children.retain(|&child| child != id);
            }
        }

        self.node_mut(id)?.parent = new_parent;

        if let Some(parent) = new_parent {
            self.node_mut(parent)?.children.push(id);
        }

        tracing::trace!(target: targets::TREE, ?id, ?old_parent, ?new_parent, "reparented widget");
        Ok(())
    }

    /// Check if `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_of(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(widget) = current {
            if widget == ancestor {
                return true;
            }
            current = self.parent(widget);
        }
        false
    }

    /// The parent of a widget, or `None` for roots and dead widgets.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(id).and_then(|node| node.parent)
    }

    /// The children of a widget in z-order (back to front).
    ///
    /// Empty for dead widgets.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.widgets
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// The widget followed by its ancestors up to the root.
    pub fn ancestors_inclusive(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut chain = Vec::new();
        let mut current = self.exists(id).then_some(id);
        while let Some(widget) = current {
            chain.push(widget);
            current = self.parent(widget);
        }
        chain
    }

    /// Depth-first pre-order traversal: parents before children, children
    /// back to front.
    pub fn preorder(&self, root: WidgetId) -> Vec<WidgetId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.widgets.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    /// Raise a widget to the front of its siblings.
    pub fn move_to_top(&mut self, id: WidgetId) -> Result<()> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        let siblings = &mut self.node_mut(parent)?.children;
        siblings.retain(|&child| child != id);
        siblings.push(id);
        Ok(())
    }

    /// Lower a widget behind all of its siblings.
    pub fn move_to_bottom(&mut self, id: WidgetId) -> Result<()> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        let siblings = &mut self.node_mut(parent)?.children;
        siblings.retain(|&child| child != id);
        siblings.insert(0, id);
        Ok(())
    }

    // =========================================================================
    // Naming
    // =========================================================================

    /// The widget's name.
    pub fn name(&self, id: WidgetId) -> Option<&str> {
        self.widgets.get(id).map(|node| node.name.as_str())
    }

    /// Rename a widget.
    pub fn set_name(&mut self, id: WidgetId, name: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }

    /// Find the first widget in the subtree of `root` with the given name.
    pub fn find_by_name(&self, root: WidgetId, name: &str) -> Option<WidgetId> {
        self.preorder(root)
            .into_iter()
            .find(|&id| self.name(id) == Some(name))
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position (relative to the parent's children area) and size.
    pub fn dimension(&self, id: WidgetId) -> Option<Rect> {
        self.widgets.get(id).map(|node| node.dimension)
    }

    /// Replace position and size.
    pub fn set_dimension(&mut self, id: WidgetId, dimension: Rect) -> Result<()> {
        self.node_mut(id)?.dimension = dimension;
        Ok(())
    }

    /// Move a widget within its parent.
    pub fn set_position(&mut self, id: WidgetId, x: i32, y: i32) -> Result<()> {
        let node = self.node_mut(id)?;
        node.dimension.x = x;
        node.dimension.y = y;
        Ok(())
    }

    /// Resize a widget.
    pub fn set_size(&mut self, id: WidgetId, width: i32, height: i32) -> Result<()> {
        let node = self.node_mut(id)?;
        node.dimension.width = width;
        node.dimension.height = height;
        Ok(())
    }

    /// Width in pixels, 0 for dead widgets.
    pub fn width(&self, id: WidgetId) -> i32 {
        self.dimension(id).map_or(0, |rect| rect.width)
    }

    /// Height in pixels, 0 for dead widgets.
    pub fn height(&self, id: WidgetId) -> i32 {
        self.dimension(id).map_or(0, |rect| rect.height)
    }

    /// The area children are placed in, relative to the widget.
    pub fn children_area(&self, id: WidgetId) -> Option<Rect> {
        self.widgets.get(id).map(WidgetNode::children_area)
    }

    /// Narrow (or with `None`, reset) the children area.
    pub fn set_children_area(&mut self, id: WidgetId, area: Option<Rect>) -> Result<()> {
        self.node_mut(id)?.children_area = area;
        Ok(())
    }

    /// Position of the widget's top-left corner in screen coordinates.
    pub fn absolute_position(&self, id: WidgetId) -> Option<Point> {
        let node = self.widgets.get(id)?;
        let mut position = node.dimension.origin();
        let mut parent = node.parent;
        while let Some(parent_id) = parent {
            let parent_node = self.widgets.get(parent_id)?;
            position = position
                + parent_node.children_area().origin()
                + parent_node.dimension.origin();
            parent = parent_node.parent;
        }
        Some(position)
    }

    /// The widget's bounds in screen coordinates.
    pub fn absolute_bounds(&self, id: WidgetId) -> Option<Rect> {
        let position = self.absolute_position(id)?;
        let dimension = self.dimension(id)?;
        Some(Rect::new(position.x, position.y, dimension.width, dimension.height))
    }

    /// Find the frontmost visible child under a point.
    ///
    /// `point` is relative to `id`. Returns `None` when the point is outside
    /// the children area or no visible child contains it.
    pub fn child_at(&self, id: WidgetId, point: Point) -> Option<WidgetId> {
        let node = self.widgets.get(id)?;
        let area = node.children_area();
        if !area.contains(point) {
            return None;
        }
        let local = point - area.origin();
        node.children.iter().rev().copied().find(|&child| {
            self.widgets.get(child).is_some_and(|child_node| {
                child_node.visible && child_node.dimension.contains(local)
            })
        })
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Whether the widget and all of its ancestors are visible.
    pub fn is_visible(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(widget) = current {
            match self.widgets.get(widget) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Show or hide a widget.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<()> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    /// Whether the widget accepts input: its own flag and effective visibility.
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.widgets.get(id).is_some_and(|node| node.enabled) && self.is_visible(id)
    }

    /// Enable or disable a widget.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<()> {
        self.node_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// Whether the widget can take keyboard focus right now.
    pub fn is_focusable(&self, id: WidgetId) -> bool {
        self.widgets.get(id).is_some_and(|node| node.focusable) && self.is_enabled(id)
    }

    /// Allow or forbid keyboard focus.
    pub fn set_focusable(&mut self, id: WidgetId, focusable: bool) -> Result<()> {
        self.node_mut(id)?.focusable = focusable;
        Ok(())
    }

    /// Whether Tab navigation may move focus into this widget.
    pub fn is_tab_in_enabled(&self, id: WidgetId) -> bool {
        self.widgets.get(id).is_some_and(|node| node.tab_in)
    }

    /// Allow or forbid Tab navigation into this widget.
    pub fn set_tab_in_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<()> {
        self.node_mut(id)?.tab_in = enabled;
        Ok(())
    }

    /// Whether Tab navigation may move focus out of this widget.
    pub fn is_tab_out_enabled(&self, id: WidgetId) -> bool {
        self.widgets.get(id).is_some_and(|node| node.tab_out)
    }

    /// Allow or forbid Tab navigation out of this widget.
    pub fn set_tab_out_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<()> {
        self.node_mut(id)?.tab_out = enabled;
        Ok(())
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register a mouse listener. Listeners run in registration order.
    pub fn add_mouse_listener(
        &mut self,
        id: WidgetId,
        listener: Rc<dyn MouseListener>,
    ) -> Result<()> {
        self.node_mut(id)?.mouse_listeners.push(listener);
        Ok(())
    }

    /// Unregister a mouse listener. Returns `true` if it was registered.
    pub fn remove_mouse_listener(
        &mut self,
        id: WidgetId,
        listener: &Rc<dyn MouseListener>,
    ) -> bool {
        let Some(node) = self.widgets.get_mut(id) else {
            return false;
        };
        let before = node.mouse_listeners.len();
        node.mouse_listeners
            .retain(|registered| !std::ptr::addr_eq(Rc::as_ptr(registered), Rc::as_ptr(listener)));
        node.mouse_listeners.len() != before
    }

    /// Snapshot of the widget's mouse listeners.
    pub fn mouse_listeners(&self, id: WidgetId) -> Vec<Rc<dyn MouseListener>> {
        self.widgets
            .get(id)
            .map(|node| node.mouse_listeners.clone())
            .unwrap_or_default()
    }

    /// Register a key listener. Listeners run in registration order.
    pub fn add_key_listener(&mut self, id: WidgetId, listener: Rc<dyn KeyListener>) -> Result<()> {
        self.node_mut(id)?.key_listeners.push(listener);
        Ok(())
    }

    /// Unregister a key listener. Returns `true` if it was registered.
    pub fn remove_key_listener(&mut self, id: WidgetId, listener: &Rc<dyn KeyListener>) -> bool {
        let Some(node) = self.widgets.get_mut(id) else {
            return false;
        };
        let before = node.key_listeners.len();
        node.key_listeners
            .retain(|registered| !std::ptr::addr_eq(Rc::as_ptr(registered), Rc::as_ptr(listener)));
        node.key_listeners.len() != before
    }

    /// Snapshot of the widget's key listeners.
    pub fn key_listeners(&self, id: WidgetId) -> Vec<Rc<dyn KeyListener>> {
        self.widgets
            .get(id)
            .map(|node| node.key_listeners.clone())
            .unwrap_or_default()
    }

    /// Register a focus listener.
    pub fn add_focus_listener(
        &mut self,
        id: WidgetId,
        listener: Rc<dyn FocusListener>,
    ) -> Result<()> {
        self.node_mut(id)?.focus_listeners.push(listener);
        Ok(())
    }

    /// Unregister a focus listener. Returns `true` if it was registered.
    pub fn remove_focus_listener(
        &mut self,
        id: WidgetId,
        listener: &Rc<dyn FocusListener>,
    ) -> bool {
        let Some(node) = self.widgets.get_mut(id) else {
            return false;
        };
        let before = node.focus_listeners.len();
        node.focus_listeners
            .retain(|registered| !std::ptr::addr_eq(Rc::as_ptr(registered), Rc::as_ptr(listener)));
        node.focus_listeners.len() != before
    }

    /// Snapshot of the widget's focus listeners.
    pub fn focus_listeners(&self, id: WidgetId) -> Vec<Rc<dyn FocusListener>> {
        self.widgets
            .get(id)
            .map(|node| node.focus_listeners.clone())
            .unwrap_or_default()
    }

    // =========================================================================
    // Internal focus
    // =========================================================================

    /// The focus handler a composite widget uses for its own sub-focus.
    pub fn internal_focus_handler(&self, id: WidgetId) -> Option<&FocusHandler> {
        self.widgets
            .get(id)
            .and_then(|node| node.internal_focus_handler.as_ref())
    }

    /// Mutable access to a composite widget's focus handler.
    pub fn internal_focus_handler_mut(&mut self, id: WidgetId) -> Option<&mut FocusHandler> {
        self.widgets
            .get_mut(id)
            .and_then(|node| node.internal_focus_handler.as_mut())
    }

    /// Install or remove a composite widget's focus handler.
    pub fn set_internal_focus_handler(
        &mut self,
        id: WidgetId,
        handler: Option<FocusHandler>,
    ) -> Result<()> {
        self.node_mut(id)?.internal_focus_handler = handler;
        Ok(())
    }
}
