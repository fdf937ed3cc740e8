//! Loading element inventories from YAML/JSON.
//!
//! An inventory is a sequence of [`UiElement`] records in the order the
//! extractor found them on the page. Order is preserved exactly, since the
//! classifier depends on it.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::UiElement;

/// Errors that can occur when loading an inventory.
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Failed to read inventory file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON inventory: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML inventory: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse an inventory from a JSON array.
pub fn from_json(json: &str) -> Result<Vec<UiElement>, InventoryError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse an inventory from a YAML sequence.
pub fn from_yaml(yaml: &str) -> Result<Vec<UiElement>, InventoryError> {
    Ok(serde_yaml::from_str(yaml)?)
}

pub fn from_json_file(path: impl AsRef<Path>) -> Result<Vec<UiElement>, InventoryError> {
    let content = fs::read_to_string(path)?;
    from_json(&content)
}

pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Vec<UiElement>, InventoryError> {
    let content = fs::read_to_string(path)?;
    from_yaml(&content)
}

/// Load an inventory, choosing the format by extension.
///
/// `.json` is parsed as JSON; anything else as YAML.
pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<UiElement>, InventoryError> {
    let path = path.as_ref();
    if path.extension().map(|e| e == "json").unwrap_or(false) {
        from_json_file(path)
    } else {
        from_yaml_file(path)
    }
}
