//! dmml-scene: the scene graph the layout engine works against.
//!
//! Provides:
//! - View nodes as a closed variant over the known view kinds
//! - A node-class registry mapping class names to node factories
//! - The layout node (layout description registry + current parsed layout)
//! - The layout description parser (XML into an owned element tree)
//! - The scene container with queued events, states and snapshots
//!
//! # Example
//!
//! ```
//! use dmml_scene::{Scene, SceneNode, ViewNode, ViewKind};
//!
//! let mut scene = Scene::new();
//! let red = scene.add_node(SceneNode::View(ViewNode::with_tag(ViewKind::Slice, "Red")));
//!
//! assert_eq!(scene.nodes_by_class("vtkDMMLSliceNode"), vec![red]);
//! assert_eq!(scene.view_node(red).unwrap().name(), "Red");
//! ```

pub mod description;
pub mod error;
pub mod layout_id;
pub mod layout_node;
pub mod registry;
pub mod scene;
pub mod view;

// Re-exports for ergonomics
pub use description::{
    ElementKind, LayoutElement, LayoutKind, LayoutTree, PropertyAction, ViewElement, ViewProperty,
};
pub use error::{LayoutNodeError, LayoutParseError, SceneError};
pub use layout_id::{BuiltinLayout, LayoutId};
pub use layout_node::{COMPARE_VIEW_MAX, COMPARE_VIEW_MIN, LAYOUT_NODE_CLASS, LayoutNode, PanelSide};
pub use registry::{NodeClass, NodeClassRegistry};
pub use scene::{Scene, SceneEvent, SceneNode, SceneSnapshot};
pub use view::{
    PLOT_VIEW_CLASS, SLICE_VIEW_CLASS, SliceSettings, TABLE_VIEW_CLASS, THREE_D_VIEW_CLASS,
    VIEW_TYPE_ATTRIBUTE, ViewKind, ViewNode, ViewSettings,
};
