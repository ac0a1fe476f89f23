//! Combobox error types

use thiserror::Error;

/// Errors raised while building or configuring a combobox
///
/// Interaction itself never fails: unknown keys, empty item lists and stale
/// highlights are treated as ordinary input.
#[derive(Error, Debug)]
pub enum ComboboxError {
    /// Configuration file could not be read
    #[error("Failed to read combobox config: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`crate::ComboboxConfig`]
    #[error("Failed to parse combobox config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but is not usable
    #[error("Invalid combobox config: {0}")]
    InvalidConfig(String),

    /// Debug snapshots could not be serialized
    #[error("Failed to serialize debug snapshots: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type for combobox operations
pub type Result<T> = std::result::Result<T, ComboboxError>;
