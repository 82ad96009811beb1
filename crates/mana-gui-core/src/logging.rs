//! Logging facilities for mana-gui.
//!
//! mana-gui is instrumented with the `tracing` crate. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("mana_gui::gui=debug,mana_gui::dispatch=trace")
//!     .init();
//! ```
//!
//! Per-event dispatch is logged at `trace`, queue flushes and modal
//! transitions at `debug`.

/// Target names for log filtering.
pub mod targets {
    /// Gui core: mouse queue, input handling, modal transitions.
    pub const GUI: &str = "mana_gui::gui";
    /// Ancestor-walk event distribution.
    pub const DISPATCH: &str = "mana_gui::dispatch";
    /// Focus changes and tab navigation.
    pub const FOCUS: &str = "mana_gui::focus";
    /// Widget creation, destruction and reparenting.
    pub const TREE: &str = "mana_gui::tree";
    /// The core crate itself (configuration loading). Used by the
    /// `mana_*!` macros.
    pub const CORE: &str = "mana_gui::core";
    /// Timing spans.
    pub const PERF: &str = "mana_gui::perf";
}

/// Span names used for tracing.
pub mod span_names {
    /// One call to `Gui::logic`.
    pub const LOGIC_TICK: &str = "logic_tick";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing an operation with a span-aware subscriber.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span named `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

// ============================================================================
// Convenience macros
// ============================================================================

/// Log a trace message under the core target.
#[macro_export]
macro_rules! mana_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

/// Log a debug message under the core target.
#[macro_export]
macro_rules! mana_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

/// Log an info message under the core target.
#[macro_export]
macro_rules! mana_info {
    ($($arg:tt)*) => {
        tracing::info!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

/// Log a warning under the core target.
#[macro_export]
macro_rules! mana_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

/// Log an error under the core target.
#[macro_export]
macro_rules! mana_error {
    ($($arg:tt)*) => {
        tracing::error!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}
