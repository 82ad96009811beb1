//! Human-readable dumps of the widget tree.
//!
//! ```
//! use mana_gui::widget::{TreeFormatOptions, WidgetTree, WidgetTreeDebug};
//! use mana_gui_core::Rect;
//!
//! let mut tree = WidgetTree::new();
//! let window = tree.create("window", Rect::new(0, 0, 200, 100));
//! let button = tree.create("ok", Rect::new(10, 10, 40, 20));
//! tree.add_child(window, button).unwrap();
//!
//! let debug = WidgetTreeDebug::with_options(TreeFormatOptions::minimal());
//! let dump = debug.format_subtree(&tree, window);
//! assert_eq!(dump, "window\n\u{2514}\u{2500}\u{2500} ok\n");
//! ```

use mana_gui_core::WidgetId;

use super::tree::WidgetTree;

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show widget ids.
    pub show_ids: bool,
    /// Whether to show each widget's dimension.
    pub show_geometry: bool,
    /// Whether to flag hidden, disabled and focusable widgets.
    pub show_state: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_geometry: true,
            show_state: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_geometry: false,
            show_state: false,
            ..Default::default()
        }
    }
}

/// Formats a widget subtree as an indented outline.
#[derive(Debug, Clone, Default)]
pub struct WidgetTreeDebug {
    options: TreeFormatOptions,
}

impl WidgetTreeDebug {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`. Empty if `root` does not exist.
    pub fn format_subtree(&self, tree: &WidgetTree, root: WidgetId) -> String {
        let mut output = String::new();
        let mut open_levels = Vec::new();
        self.format_subtree_into(tree, root, 0, true, &mut open_levels, &mut output);
        output
    }

    /// `open_levels` holds one entry per ancestor below the root: `true`
    /// when that ancestor has later siblings, so its column stays drawn.
    fn format_subtree_into(
        &self,
        tree: &WidgetTree,
        id: WidgetId,
        depth: usize,
        is_last: bool,
        open_levels: &mut Vec<bool>,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        let Some(name) = tree.name(id) else {
            return;
        };

        output.push_str(&self.build_prefix(depth, is_last, open_levels));
        output.push_str(if name.is_empty() { "(unnamed)" } else { name });

        if self.options.show_ids {
            output.push_str(&format!(" [{id:?}]"));
        }
        if self.options.show_geometry {
            if let Some(rect) = tree.dimension(id) {
                output.push_str(&format!(
                    " ({}, {}, {}x{})",
                    rect.x, rect.y, rect.width, rect.height
                ));
            }
        }
        if self.options.show_state {
            if !tree.is_visible(id) {
                output.push_str(" hidden");
            } else if !tree.is_enabled(id) {
                output.push_str(" disabled");
            }
            if tree.is_focusable(id) {
                output.push_str(" focusable");
            }
        }
        output.push('\n');

        if depth > 0 {
            open_levels.push(!is_last);
        }
        let children = tree.children(id);
        let child_count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.format_subtree_into(
                tree,
                child,
                depth + 1,
                i + 1 == child_count,
                open_levels,
                output,
            );
        }
        if depth > 0 {
            open_levels.pop();
        }
    }

    fn build_prefix(&self, depth: usize, is_last: bool, open_levels: &[bool]) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => (
                "\u{2502}",
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
            ),
        };

        let mut prefix = String::new();
        for &open in open_levels {
            prefix.push_str(if open { branch } else { " " });
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}
