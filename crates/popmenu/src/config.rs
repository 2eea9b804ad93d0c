//! Menu configuration: key bindings, presentation class names, and
//! behaviour switches. Loadable from TOML.
//!
//! ```toml
//! clear_selection_on_hover = true
//!
//! [keys]
//! confirm = ["Enter", "Tab"]
//! cancel = ["Escape"]
//!
//! [classes]
//! selected = "is-active"
//! ```

use crate::error::ConfigError;
use popmenu_core::Key;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a key press means to an open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Emit the selection and close
    Confirm,
    /// Drop the selection and close
    Cancel,
    /// Move to the previous navigable item
    Prev,
    /// Move to the next navigable item
    Next,
}

/// Keys bound to each [`KeyAction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Confirm keys
    pub confirm: Vec<Key>,
    /// Cancel keys
    pub cancel: Vec<Key>,
    /// Previous-item keys
    pub prev: Vec<Key>,
    /// Next-item keys
    pub next: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            confirm: vec![Key::Enter, Key::Right, Key::Tab],
            cancel: vec![Key::Escape, Key::Left],
            prev: vec![Key::Up],
            next: vec![Key::Down],
        }
    }
}

impl KeyBindings {
    /// Resolve a key. A key listed in several sets resolves in the order
    /// confirm, cancel, prev, next.
    #[must_use]
    pub fn action(&self, key: Key) -> Option<KeyAction> {
        if self.confirm.contains(&key) {
            Some(KeyAction::Confirm)
        } else if self.cancel.contains(&key) {
            Some(KeyAction::Cancel)
        } else if self.prev.contains(&key) {
            Some(KeyAction::Prev)
        } else if self.next.contains(&key) {
            Some(KeyAction::Next)
        } else {
            None
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (action, keys) in [
            ("confirm", &self.confirm),
            ("cancel", &self.cancel),
            ("prev", &self.prev),
            ("next", &self.next),
        ] {
            if keys.is_empty() {
                return Err(ConfigError::EmptyKeySet { action });
            }
        }
        Ok(())
    }
}

/// Presentation class names applied to surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    /// Class on the menu container
    pub menu: String,
    /// Class on the selected item
    pub selected: String,
    /// Prefix joined with the slug for each item's class
    pub item_prefix: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            menu: "menu".to_string(),
            selected: "selected".to_string(),
            item_prefix: "menu-item-".to_string(),
        }
    }
}

impl ClassNames {
    /// Class identifying the item with `slug`.
    #[must_use]
    pub fn item(&self, slug: &str) -> String {
        format!("{}{slug}", self.item_prefix)
    }
}

/// Full menu configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Register the one-shot listener that drops the selection when the
    /// pointer first moves over the open menu
    pub clear_selection_on_hover: bool,
    /// Close after an item is chosen with the pointer
    pub close_on_pointer_select: bool,
    /// Key bindings
    pub keys: KeyBindings,
    /// Class names
    pub classes: ClassNames,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            clear_selection_on_hover: true,
            close_on_pointer_select: true,
            keys: KeyBindings::default(),
            classes: ClassNames::default(),
        }
    }
}

impl MenuConfig {
    /// Parse and validate a TOML document. Missing fields take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded menu config from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.keys.validate()
    }
}
