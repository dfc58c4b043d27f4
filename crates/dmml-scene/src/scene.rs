//! The scene: an arena of nodes plus queued events.
//!
//! Mutations never call observers directly. They queue [`SceneEvent`]s; the
//! owner of the scene drains the queue with [`Scene::take_events`], updates
//! whatever it derives from the scene, then forwards each event to external
//! observers with [`Scene::dispatch`]. Code without such an owner calls
//! [`Scene::flush`].

use std::collections::VecDeque;

use dmml_core::{NodeId, ObserverId, Observers};
use tracing::{debug, warn};

use crate::error::SceneError;
use crate::layout_node::{LAYOUT_NODE_CLASS, LayoutNode};
use crate::registry::NodeClassRegistry;
use crate::view::{ViewKind, ViewNode};

/// A node stored in the scene.
#[derive(Debug, Clone)]
pub enum SceneNode {
    View(ViewNode),
    Layout(Box<LayoutNode>),
}

impl SceneNode {
    pub fn class_name(&self) -> &str {
        match self {
            SceneNode::View(view) => view.class_name(),
            SceneNode::Layout(_) => LAYOUT_NODE_CLASS,
        }
    }

    pub fn is_a(&self, class_name: &str) -> bool {
        match self {
            SceneNode::View(view) => view.is_a(class_name),
            SceneNode::Layout(_) => class_name == LAYOUT_NODE_CLASS,
        }
    }

    pub fn singleton_tag(&self) -> Option<&str> {
        match self {
            SceneNode::View(view) => view.singleton_tag(),
            SceneNode::Layout(_) => Some(LAYOUT_NODE_CLASS),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            SceneNode::View(view) => view.attribute(name),
            SceneNode::Layout(layout) => layout.attribute(name),
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        match self {
            SceneNode::View(view) => view.set_attribute(name, value),
            SceneNode::Layout(layout) => layout.set_attribute(name, value),
        }
    }

    pub fn as_view(&self) -> Option<&ViewNode> {
        match self {
            SceneNode::View(view) => Some(view),
            SceneNode::Layout(_) => None,
        }
    }

    pub fn as_layout(&self) -> Option<&LayoutNode> {
        match self {
            SceneNode::Layout(layout) => Some(layout),
            SceneNode::View(_) => None,
        }
    }

    fn take_notifications(&mut self) -> u32 {
        match self {
            SceneNode::View(view) => view.modified_state_mut().take_notifications(),
            SceneNode::Layout(layout) => layout.modified_state_mut().take_notifications(),
        }
    }

    fn clear_notifications(&mut self) {
        match self {
            SceneNode::View(view) => view.modified_state_mut().clear_notifications(),
            SceneNode::Layout(layout) => layout.modified_state_mut().clear_notifications(),
        }
    }
}

impl From<ViewNode> for SceneNode {
    fn from(view: ViewNode) -> Self {
        SceneNode::View(view)
    }
}

impl From<LayoutNode> for SceneNode {
    fn from(layout: LayoutNode) -> Self {
        SceneNode::Layout(Box::new(layout))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    NodeAdded(NodeId),
    NodeRemoved(NodeId),
    NodeModified(NodeId),
    StartBatchProcess,
    EndBatchProcess,
    StartImport,
    EndImport,
    StartRestore,
    EndRestore,
    StartClose,
    EndClose,
}

/// Saved node set, restorable with [`Scene::restore`].
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    nodes: Vec<Option<SceneNode>>,
}

impl SceneSnapshot {
    /// Build a snapshot from nodes. Restoring it installs the nodes as given,
    /// without merging singletons.
    pub fn from_nodes(nodes: impl IntoIterator<Item = SceneNode>) -> Self {
        Self {
            nodes: nodes.into_iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Option<SceneNode>>,
    registry: NodeClassRegistry,
    batch_depth: u32,
    import_depth: u32,
    restore_depth: u32,
    close_depth: u32,
    events: VecDeque<SceneEvent>,
    observers: Observers<SceneEvent>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // --- classes ---

    pub fn registry(&self) -> &NodeClassRegistry {
        &self.registry
    }

    pub fn register_view_class(&mut self, class_name: &str, kind: ViewKind) -> bool {
        self.registry.register_view_class(class_name, kind)
    }

    /// Instantiate a node of `class_name`; the node is not added.
    pub fn create_node_by_class(&self, class_name: &str) -> Option<SceneNode> {
        self.registry.create(class_name)
    }

    // --- lookup ---

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index() as usize)?.as_ref()
    }

    pub fn view_node(&self, id: NodeId) -> Option<&ViewNode> {
        self.node(id)?.as_view()
    }

    pub fn layout_node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.node(id)?.as_layout()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Ids of all nodes, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| NodeId::from_index(i as u32))
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn nodes_by_class(&self, class_name: &str) -> Vec<NodeId> {
        self.node_ids()
            .filter(|&id| self.node(id).is_some_and(|n| n.is_a(class_name)))
            .collect()
    }

    pub fn first_node_by_class(&self, class_name: &str) -> Option<NodeId> {
        self.node_ids()
            .find(|&id| self.node(id).is_some_and(|n| n.is_a(class_name)))
    }

    /// First node of `class_name` whose singleton tag is `tag`.
    pub fn singleton_by_tag(&self, class_name: &str, tag: &str) -> Option<NodeId> {
        self.node_ids().find(|&id| {
            self.node(id)
                .is_some_and(|n| n.is_a(class_name) && n.singleton_tag() == Some(tag))
        })
    }

    // --- structure ---

    /// Add a node and return the id it lives under.
    ///
    /// A tagged node whose class and tag match a node already in the scene is
    /// merged into that node; the existing id is returned.
    pub fn add_node(&mut self, node: SceneNode) -> NodeId {
        if let Some(tag) = node.singleton_tag() {
            if let Some(existing) = self.singleton_by_tag(node.class_name(), tag) {
                debug!(%existing, tag, "merging singleton into existing node");
                self.merge_into(existing, node);
                return existing;
            }
        }
        self.insert_node(node)
    }

    fn merge_into(&mut self, existing: NodeId, node: SceneNode) {
        let Some(slot) = self.nodes[existing.index() as usize].as_mut() else {
            return;
        };
        match (slot, &node) {
            (SceneNode::View(current), SceneNode::View(incoming)) => current.copy_content(incoming),
            (SceneNode::Layout(current), SceneNode::Layout(incoming)) => {
                current.copy_settings(incoming)
            }
            _ => {}
        }
        self.collect_notifications(existing);
    }

    fn insert_node(&mut self, mut node: SceneNode) -> NodeId {
        node.clear_notifications();
        let id = NodeId::from_index(self.nodes.len() as u32);
        debug!(%id, class = node.class_name(), tag = node.singleton_tag(), "node added");
        self.nodes.push(Some(node));
        self.events.push_back(SceneEvent::NodeAdded(id));
        id
    }

    pub fn remove_node(&mut self, id: NodeId) -> Result<SceneNode, SceneError> {
        let node = self
            .nodes
            .get_mut(id.index() as usize)
            .and_then(Option::take)
            .ok_or(SceneError::NodeNotFound { node: id })?;
        self.events.push_back(SceneEvent::NodeRemoved(id));
        Ok(node)
    }

    /// Mutate a view node. Changes it reports are queued as `NodeModified`.
    pub fn modify_view_node<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut ViewNode) -> R,
    ) -> Result<R, SceneError> {
        let result = match self.nodes.get_mut(id.index() as usize) {
            Some(Some(SceneNode::View(view))) => f(view),
            Some(Some(other)) => {
                return Err(SceneError::WrongNodeKind {
                    node: id,
                    expected: "view node",
                    actual: other.class_name().to_string(),
                });
            }
            _ => return Err(SceneError::NodeNotFound { node: id }),
        };
        self.collect_notifications(id);
        Ok(result)
    }

    /// Mutate a layout node. Changes it reports are queued as `NodeModified`.
    pub fn modify_layout_node<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut LayoutNode) -> R,
    ) -> Result<R, SceneError> {
        let result = match self.nodes.get_mut(id.index() as usize) {
            Some(Some(SceneNode::Layout(layout))) => f(layout),
            Some(Some(other)) => {
                return Err(SceneError::WrongNodeKind {
                    node: id,
                    expected: LAYOUT_NODE_CLASS,
                    actual: other.class_name().to_string(),
                });
            }
            _ => return Err(SceneError::NodeNotFound { node: id }),
        };
        self.collect_notifications(id);
        Ok(result)
    }

    fn collect_notifications(&mut self, id: NodeId) {
        let fired = self
            .nodes
            .get_mut(id.index() as usize)
            .and_then(Option::as_mut)
            .map_or(0, SceneNode::take_notifications);
        for _ in 0..fired {
            self.events.push_back(SceneEvent::NodeModified(id));
        }
    }

    // --- states ---

    pub fn start_batch_process(&mut self) {
        self.batch_depth += 1;
        if self.batch_depth == 1 {
            self.events.push_back(SceneEvent::StartBatchProcess);
        }
    }

    pub fn end_batch_process(&mut self) {
        debug_assert!(self.batch_depth > 0, "unbalanced end_batch_process");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            self.events.push_back(SceneEvent::EndBatchProcess);
        }
    }

    pub fn is_batch_processing(&self) -> bool {
        self.batch_depth > 0
    }

    pub fn is_importing(&self) -> bool {
        self.import_depth > 0
    }

    pub fn is_restoring(&self) -> bool {
        self.restore_depth > 0
    }

    pub fn is_closing(&self) -> bool {
        self.close_depth > 0
    }

    /// Add `nodes` as one batch, merging singletons into existing nodes.
    pub fn import(&mut self, nodes: impl IntoIterator<Item = SceneNode>) -> Vec<NodeId> {
        self.start_batch_process();
        self.import_depth += 1;
        self.events.push_back(SceneEvent::StartImport);
        let ids = nodes.into_iter().map(|n| self.add_node(n)).collect();
        self.import_depth -= 1;
        self.events.push_back(SceneEvent::EndImport);
        self.end_batch_process();
        ids
    }

    /// Remove untagged views; reset tagged views and the layout node.
    pub fn clear(&mut self) {
        self.start_batch_process();
        self.close_depth += 1;
        self.events.push_back(SceneEvent::StartClose);

        let ids: Vec<NodeId> = self.node_ids().collect();
        for id in ids {
            let untagged_view = match self.node(id) {
                Some(SceneNode::View(view)) => view.singleton_tag().is_none(),
                Some(SceneNode::Layout(_)) => false,
                None => continue,
            };
            let outcome = if untagged_view {
                self.remove_node(id).map(drop)
            } else if let Some(kind) = self.view_node(id).map(ViewNode::kind) {
                let default = ViewNode::new(kind);
                self.modify_view_node(id, |v| v.reset(&default))
            } else {
                self.modify_layout_node(id, |l| l.reset(None))
            };
            if let Err(err) = outcome {
                warn!(%id, error = %err, "node not cleared");
            }
        }

        self.close_depth -= 1;
        self.events.push_back(SceneEvent::EndClose);
        self.end_batch_process();
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let mut nodes = self.nodes.clone();
        for node in nodes.iter_mut().flatten() {
            node.clear_notifications();
        }
        SceneSnapshot { nodes }
    }

    /// Replace the node set with `snapshot`, node ids included.
    pub fn restore(&mut self, snapshot: &SceneSnapshot) {
        self.restore_depth += 1;
        self.events.push_back(SceneEvent::StartRestore);
        self.nodes = snapshot.nodes.clone();
        self.restore_depth -= 1;
        self.events.push_back(SceneEvent::EndRestore);
    }

    // --- events ---

    pub fn add_observer(&mut self, callback: impl FnMut(&SceneEvent) + 'static) -> ObserverId {
        self.observers.add(callback)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// Drain queued events without delivering them.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        self.events.drain(..).collect()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Deliver one event to external observers.
    pub fn dispatch(&mut self, event: &SceneEvent) {
        self.observers.notify(event);
    }

    /// Deliver every queued event, in order.
    pub fn flush(&mut self) {
        while let Some(event) = self.events.pop_front() {
            self.observers.notify(&event);
        }
    }
}
