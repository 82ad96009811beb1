//! GUI configuration.
//!
//! ```toml
//! double_click_interval_ms = 300
//! tabbing = true
//!
//! [screen]
//! width = 1024
//! height = 768
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Rect;

/// Size of the default top widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl ScreenConfig {
    /// The full-screen rectangle anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Tunables for input handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Dimensions of the top widget created by default.
    pub screen: ScreenConfig,
    /// Two presses of the same button closer than this count as a multi-click.
    pub double_click_interval_ms: u64,
    /// Whether Tab / Shift+Tab move keyboard focus.
    pub tabbing: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            double_click_interval_ms: 300,
            tabbing: true,
        }
    }
}

impl GuiConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        crate::mana_debug!(path = %path.display(), ?config, "loaded gui configuration");
        Ok(config)
    }
}
