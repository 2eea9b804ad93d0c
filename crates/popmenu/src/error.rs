//! Error types for popmenu.

use thiserror::Error;

/// Errors raised by menu operations that address an item by slug.
///
/// These indicate a caller bug. The menu is left exactly as it was before
/// the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// No item carries the slug.
    #[error("no menu item with slug \"{slug}\"")]
    NotFound {
        /// Normalized slug that failed to resolve
        slug: String,
    },
}

impl MenuError {
    /// The slug the failing call referenced.
    #[must_use]
    pub fn slug(&self) -> &str {
        match self {
            Self::NotFound { slug } => slug,
        }
    }
}

/// Errors loading a [`MenuConfig`](crate::MenuConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid TOML for the config schema.
    #[error("invalid menu config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A key binding set was configured with no keys.
    #[error("key binding \"{action}\" has no keys")]
    EmptyKeySet {
        /// Name of the binding
        action: &'static str,
    },
}
