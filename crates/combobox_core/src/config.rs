//! Combobox configuration
//!
//! Flags can be set in code through the builder methods or loaded from a
//! TOML table:
//!
//! ```toml
//! menu_id = "states-menu"
//! auto_highlight = true
//! select_on_blur = false
//! open_on_focus = false
//! debug = true
//! ```

use crate::error::{ComboboxError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Live-region copy announced after the result count
pub const DEFAULT_RESULTS_COPY: &str = "Autocomplete results are available below.";

/// Number of debug snapshots kept when `debug` is on
pub const DEFAULT_DEBUG_HISTORY: usize = 5;

/// Configuration for a [`crate::Combobox`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboboxConfig {
    /// DOM id of the suggestions menu. Item ids are derived from it.
    pub menu_id: String,
    /// Propose the first prefix-matching item as the value changes
    pub auto_highlight: bool,
    /// Commit the highlighted item when the input loses focus
    pub select_on_blur: bool,
    /// Open the menu on focus, even with an empty value
    pub open_on_focus: bool,
    /// Externally managed menu visibility. `None` lets the engine decide.
    pub open: Option<bool>,
    /// Record state snapshots for inspection
    pub debug: bool,
    /// How many snapshots to keep when `debug` is on
    pub debug_history: usize,
    /// Text announced after the result count in the live region
    pub results_available_copy: String,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            menu_id: default_menu_id(),
            auto_highlight: true,
            select_on_blur: false,
            open_on_focus: false,
            open: None,
            debug: false,
            debug_history: DEFAULT_DEBUG_HISTORY,
            results_available_copy: DEFAULT_RESULTS_COPY.to_string(),
        }
    }
}

fn default_menu_id() -> String {
    "combobox-menu".to_string()
}

impl ComboboxConfig {
    /// Create a config with the given menu id and default flags
    pub fn new(menu_id: impl Into<String>) -> Self {
        Self {
            menu_id: menu_id.into(),
            ..Default::default()
        }
    }

    /// Set the menu id
    pub fn menu_id(mut self, menu_id: impl Into<String>) -> Self {
        self.menu_id = menu_id.into();
        self
    }

    /// Enable or disable auto-highlight
    pub fn auto_highlight(mut self, enabled: bool) -> Self {
        self.auto_highlight = enabled;
        self
    }

    /// Enable or disable select-on-blur
    pub fn select_on_blur(mut self, enabled: bool) -> Self {
        self.select_on_blur = enabled;
        self
    }

    /// Enable or disable open-on-focus
    pub fn open_on_focus(mut self, enabled: bool) -> Self {
        self.open_on_focus = enabled;
        self
    }

    /// Manage menu visibility externally
    pub fn open(mut self, open: Option<bool>) -> Self {
        self.open = open;
        self
    }

    /// Enable debug snapshots
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Set the debug snapshot window
    pub fn debug_history(mut self, len: usize) -> Self {
        self.debug_history = len;
        self
    }

    /// Set the live-region copy
    pub fn results_available_copy(mut self, copy: impl Into<String>) -> Self {
        self.results_available_copy = copy.into();
        self
    }

    /// Check that the config can drive a combobox
    pub fn validate(&self) -> Result<()> {
        if self.menu_id.trim().is_empty() {
            return Err(ComboboxError::InvalidConfig(
                "menu_id must not be empty".to_string(),
            ));
        }
        if self.menu_id.chars().any(char::is_whitespace) {
            return Err(ComboboxError::InvalidConfig(format!(
                "menu_id {:?} must not contain whitespace",
                self.menu_id
            )));
        }
        if self.debug && self.debug_history == 0 {
            return Err(ComboboxError::InvalidConfig(
                "debug_history must be at least 1 when debug is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a config from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ComboboxConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        tracing::debug!("Loaded combobox config from {}", path.display());
        Self::from_toml_str(&content)
    }
}
