//! Core types for mana-gui.
//!
//! This crate holds the pieces of the GUI event engine that carry no widget
//! behavior of their own:
//!
//! - **Widget ids**: generation-checked handles into the widget arena
//! - **Geometry**: integer points and rectangles used for hit testing
//! - **Errors**: the error taxonomy returned by mutating APIs
//! - **Configuration**: [`GuiConfig`], loadable from TOML
//! - **Logging**: tracing targets and helpers shared by all subsystems
//!
//! # Example
//!
//! ```
//! use mana_gui_core::{GuiConfig, Point, Rect};
//!
//! let config = GuiConfig::from_toml_str("double_click_interval_ms = 250").unwrap();
//! assert_eq!(config.double_click_interval_ms, 250);
//!
//! let bounds = Rect::new(10, 10, 20, 20);
//! assert!(bounds.contains(Point::new(15, 15)));
//! assert!(!bounds.contains(Point::new(30, 15)));
//! ```

mod config;
mod error;
mod geometry;
mod id;
pub mod logging;

pub use config::{GuiConfig, ScreenConfig};
pub use error::{GuiError, Result};
pub use geometry::{Point, Rect};
pub use id::WidgetId;
pub use logging::PerfSpan;
