//! Error types for mana-gui.
//!
//! Event dispatch never fails: stale widget ids and out-of-bounds points are
//! skipped. These errors come only from operations that mutate the widget
//! tree or focus state, and from configuration loading.

use thiserror::Error;

use crate::id::WidgetId;

/// The main error type for mana-gui operations.
#[derive(Debug, Error)]
pub enum GuiError {
    /// The widget id is invalid or the widget has been destroyed.
    #[error("widget {0:?} does not exist")]
    WidgetNotFound(WidgetId),
    /// Attempted to make a widget its own ancestor.
    #[error("cannot set a widget as its own parent or ancestor")]
    CircularParentage,
    /// Another widget already holds modal focus.
    #[error("widget {holder:?} already has modal focus")]
    ModalFocusHeld {
        /// The widget currently holding modal focus.
        holder: WidgetId,
    },
    /// Another widget already holds modal mouse input focus.
    #[error("widget {holder:?} already has modal mouse input focus")]
    ModalMouseInputFocusHeld {
        /// The widget currently holding modal mouse input focus.
        holder: WidgetId,
    },
    /// The configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for mana-gui operations.
pub type Result<T> = std::result::Result<T, GuiError>;
