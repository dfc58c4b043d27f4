//! dmml-layout: keeps a scene's view nodes in step with its selected layout.
//!
//! Provides:
//! - The built-in layout descriptions and the generated compare layouts
//! - View element matching, view node synthesis and property application
//! - Reconciliation of a parsed layout against the scene
//! - `LayoutLogic`, the controller that owns a scene and publishes the
//!   ordered views of its current layout
//! - YAML/JSON layout configuration
//!
//! # Example
//!
//! ```
//! use dmml_layout::LayoutLogic;
//! use dmml_scene::{BuiltinLayout, Scene};
//!
//! let mut logic = LayoutLogic::with_scene(Scene::new());
//! logic.set_view_arrangement(BuiltinLayout::FourUp.id()).unwrap();
//! assert_eq!(logic.view_nodes().len(), 4);
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod logic;
pub mod matcher;
pub mod properties;
pub mod reconciler;
pub mod synthesizer;
pub mod templates;

pub use compare::CompareGrid;
pub use config::{CompareConfig, CustomLayoutDef, LayoutConfig, PanelConfig, validate_config};
pub use error::{ConfigError, ConfigResult, LayoutError, LayoutResult};
pub use logic::{AttachState, LayoutLogic};
pub use matcher::match_view_element;
pub use properties::apply_properties;
pub use reconciler::{Reconciliation, create_missing_views, views_from_layout};
pub use synthesizer::synthesize_view_node;
pub use templates::builtin_description;
