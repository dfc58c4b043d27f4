//! Layout configuration files.
//!
//! A configuration selects the startup layout, sets the compare grid and
//! panel state, and registers extra layout descriptions:
//!
//! ```yaml
//! initial_layout: 1001
//! compare: { rows: 2, columns: 3 }
//! panels: { side: right, main_size: 320 }
//! layouts:
//!   - id: 1001
//!     name: Red and 3D
//!     xml: <layout type="horizontal">...</layout>
//! ```

use std::collections::HashSet;
use std::path::Path;

use dmml_scene::{BuiltinLayout, COMPARE_VIEW_MAX, COMPARE_VIEW_MIN, LayoutId, LayoutTree, PanelSide};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_layout: Option<LayoutId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare: Option<CompareConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panels: Option<PanelConfig>,
    #[serde(default)]
    pub layouts: Vec<CustomLayoutDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareConfig {
    #[serde(default = "one")]
    pub rows: u32,
    #[serde(default = "one")]
    pub columns: u32,
    #[serde(default = "one")]
    pub lightbox_rows: u32,
    #[serde(default = "one")]
    pub lightbox_columns: u32,
}

fn one() -> u32 {
    1
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            lightbox_rows: 1,
            lightbox_columns: 1,
        }
    }
}

/// Panel state. Absent fields leave the layout node untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gui_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<PanelSideDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapse_slice_controllers: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelSideDef {
    Left,
    Right,
}

impl From<PanelSideDef> for PanelSide {
    fn from(side: PanelSideDef) -> Self {
        match side {
            PanelSideDef::Left => PanelSide::Left,
            PanelSideDef::Right => PanelSide::Right,
        }
    }
}

/// An extra layout description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLayoutDef {
    pub id: LayoutId,
    #[serde(default)]
    pub name: String,
    pub xml: String,
    /// Overwrite a description already registered under `id`.
    #[serde(default)]
    pub replace: bool,
}

pub fn load_yaml(path: &Path) -> ConfigResult<LayoutConfig> {
    let content = read(path)?;
    let config: LayoutConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &LayoutConfig) -> ConfigResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_json(path: &Path) -> ConfigResult<LayoutConfig> {
    let content = read(path)?;
    let config: LayoutConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load by extension: `.json` is JSON, anything else YAML.
pub fn load(path: &Path) -> ConfigResult<LayoutConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn validate_config(config: &LayoutConfig) -> ConfigResult<()> {
    if let Some(id) = config.initial_layout {
        if id < 0 {
            return Err(invalid("initial_layout", id, "layout ids are non-negative"));
        }
    }

    if let Some(compare) = &config.compare {
        for (field, value) in [
            ("compare.rows", compare.rows),
            ("compare.columns", compare.columns),
            ("compare.lightbox_rows", compare.lightbox_rows),
            ("compare.lightbox_columns", compare.lightbox_columns),
        ] {
            if !(COMPARE_VIEW_MIN..=COMPARE_VIEW_MAX).contains(&value) {
                return Err(invalid(
                    field,
                    value,
                    &format!("must be in {COMPARE_VIEW_MIN}..={COMPARE_VIEW_MAX}"),
                ));
            }
        }
    }

    let mut ids = HashSet::new();
    for layout in &config.layouts {
        if layout.id < 0 {
            return Err(invalid("layouts.id", layout.id, "layout ids are non-negative"));
        }
        if !ids.insert(layout.id) {
            return Err(ConfigError::DuplicateId { id: layout.id });
        }
        if let Some(builtin) = BuiltinLayout::from_id(layout.id) {
            if builtin != BuiltinLayout::User && !layout.replace {
                return Err(ConfigError::BuiltinCollision {
                    id: layout.id,
                    builtin: builtin.name(),
                });
            }
        }
        LayoutTree::parse(&layout.xml).map_err(|source| ConfigError::InvalidDescription {
            id: layout.id,
            name: layout.name.clone(),
            source,
        })?;
    }
    Ok(())
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
