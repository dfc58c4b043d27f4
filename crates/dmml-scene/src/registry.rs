//! Node class registry: the factory behind `Scene::create_node_by_class`.

use std::collections::BTreeMap;

use crate::layout_node::{LAYOUT_NODE_CLASS, LayoutNode};
use crate::scene::SceneNode;
use crate::view::{ViewKind, ViewNode};

/// What a registered class name instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    View(ViewKind),
    Layout,
}

/// Maps class names to node kinds.
///
/// The canonical view classes and the layout node class are always
/// registered. Extra names can be registered as aliases of a view kind.
#[derive(Debug, Clone)]
pub struct NodeClassRegistry {
    classes: BTreeMap<String, NodeClass>,
}

impl NodeClassRegistry {
    pub fn new() -> Self {
        let mut classes = BTreeMap::new();
        for kind in ViewKind::ALL {
            classes.insert(kind.class_name().to_string(), NodeClass::View(kind));
        }
        classes.insert(LAYOUT_NODE_CLASS.to_string(), NodeClass::Layout);
        Self { classes }
    }

    /// Register `class_name` as a view class of `kind`. Returns false if the
    /// name was already registered (the existing entry is kept).
    pub fn register_view_class(&mut self, class_name: &str, kind: ViewKind) -> bool {
        if self.classes.contains_key(class_name) {
            return false;
        }
        self.classes
            .insert(class_name.to_string(), NodeClass::View(kind));
        true
    }

    pub fn lookup(&self, class_name: &str) -> Option<NodeClass> {
        self.classes.get(class_name).copied()
    }

    pub fn is_registered(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Instantiate a fresh, untagged node of `class_name`.
    pub fn create(&self, class_name: &str) -> Option<SceneNode> {
        match self.lookup(class_name)? {
            NodeClass::View(kind) => Some(SceneNode::View(ViewNode::with_class_name(
                kind, class_name,
            ))),
            NodeClass::Layout => Some(SceneNode::Layout(Box::new(LayoutNode::new()))),
        }
    }
}

impl Default for NodeClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
