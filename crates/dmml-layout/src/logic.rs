//! The scene-level layout controller.
//!
//! `LayoutLogic` owns the scene it manages. Every change to the layout node
//! goes through [`LayoutLogic::modify_layout_node`], which updates the
//! derived state (compare descriptions, missing views, the view collection)
//! while the node's batch is still open. Only then is the single
//! `NodeModified` released and the queued scene events handed to observers,
//! so an observer always sees a consistent layout.

use dmml_core::{NodeId, ObserverId};
use dmml_scene::{
    BuiltinLayout, LAYOUT_NODE_CLASS, LayoutId, LayoutNode, LayoutTree, Scene, SceneError,
    SceneEvent, SceneNode, VIEW_TYPE_ATTRIBUTE,
};
use tracing::{debug, info, warn};

use crate::compare::{CompareGrid, compare_descriptions};
use crate::config::{LayoutConfig, validate_config};
use crate::error::{LayoutError, LayoutResult};
use crate::reconciler::{create_missing_views, views_from_layout};
use crate::templates::{STATIC_LAYOUTS, builtin_description, maximized_description};

const NONE_LAYOUT: LayoutId = BuiltinLayout::None.id();
const MAXIMIZED_LAYOUT: LayoutId = BuiltinLayout::Maximized.id();
const CUSTOM_LAYOUT: LayoutId = BuiltinLayout::Custom.id();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachState {
    Unattached,
    AttachedNoLayoutNode,
    AttachedWithLayoutNode,
}

#[derive(Debug)]
pub struct LayoutLogic {
    scene: Option<Scene>,
    layout_node: Option<NodeId>,
    view_nodes: Vec<NodeId>,
    /// Layout node mtime the derived state was computed at.
    synced_mtime: u64,
    last_valid_view_arrangement: LayoutId,
    arrangement_before_maximize: Option<LayoutId>,
    processing_events: bool,
}

impl Default for LayoutLogic {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutLogic {
    pub fn new() -> Self {
        Self {
            scene: None,
            layout_node: None,
            view_nodes: Vec::new(),
            synced_mtime: 0,
            last_valid_view_arrangement: NONE_LAYOUT,
            arrangement_before_maximize: None,
            processing_events: false,
        }
    }

    pub fn with_scene(scene: Scene) -> Self {
        let mut logic = Self::new();
        logic.set_scene(scene);
        logic
    }

    // --- attachment ---

    /// Take ownership of `scene` and return the previously managed one.
    ///
    /// Creates the baseline views (3D `1` and the `Red`, `Green`, `Yellow`
    /// slices) if missing, then finds or creates the layout node and seeds
    /// its descriptions.
    pub fn set_scene(&mut self, mut scene: Scene) -> Option<Scene> {
        let previous = self.take_scene();

        if let Some(xml) = builtin_description(BuiltinLayout::Conventional) {
            match LayoutTree::parse(&xml) {
                Ok(tree) => {
                    let outcome = create_missing_views(&mut scene, &tree);
                    debug!(created = outcome.created.len(), "baseline views ensured");
                }
                Err(err) => warn!(error = %err, "conventional layout does not parse"),
            }
        }

        self.scene = Some(scene);
        self.find_or_create_layout_node();
        self.process_events();
        previous
    }

    /// Stop managing the scene and hand it back.
    pub fn take_scene(&mut self) -> Option<Scene> {
        self.layout_node = None;
        self.view_nodes.clear();
        self.synced_mtime = 0;
        self.arrangement_before_maximize = None;
        self.scene.take()
    }

    pub fn into_scene(mut self) -> Option<Scene> {
        self.take_scene()
    }

    pub fn attach_state(&self) -> AttachState {
        match (&self.scene, self.layout_node) {
            (None, _) => AttachState::Unattached,
            (Some(_), None) => AttachState::AttachedNoLayoutNode,
            (Some(_), Some(_)) => AttachState::AttachedWithLayoutNode,
        }
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    // --- published state ---

    pub fn layout_node_id(&self) -> Option<NodeId> {
        self.layout_node
    }

    pub fn layout_node(&self) -> Option<&LayoutNode> {
        self.scene.as_ref()?.layout_node(self.layout_node?)
    }

    /// Views of the current layout, in document order.
    pub fn view_nodes(&self) -> &[NodeId] {
        &self.view_nodes
    }

    pub fn last_valid_view_arrangement(&self) -> LayoutId {
        self.last_valid_view_arrangement
    }

    pub fn add_observer(
        &mut self,
        callback: impl FnMut(&SceneEvent) + 'static,
    ) -> LayoutResult<ObserverId> {
        let scene = self.scene.as_mut().ok_or(LayoutError::Unattached)?;
        Ok(scene.add_observer(callback))
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.scene
            .as_mut()
            .is_some_and(|scene| scene.remove_observer(id))
    }

    // --- mutation ---

    /// Change the layout node. Derived state is brought up to date before
    /// any observer hears about the change, and at most one `NodeModified`
    /// is emitted for the layout node.
    pub fn modify_layout_node<R>(&mut self, f: impl FnOnce(&mut LayoutNode) -> R) -> LayoutResult<R> {
        let id = self.layout_node.ok_or(LayoutError::Unattached)?;
        let result = self.update_layout_node(id, f)?;
        self.process_events();
        Ok(result)
    }

    /// Run a scene operation, then react to what it changed.
    pub fn modify_scene<R>(&mut self, f: impl FnOnce(&mut Scene) -> R) -> LayoutResult<R> {
        let scene = self.scene.as_mut().ok_or(LayoutError::Unattached)?;
        let result = f(scene);
        self.process_events();
        Ok(result)
    }

    pub fn set_view_arrangement(&mut self, id: LayoutId) -> LayoutResult<bool> {
        self.modify_layout_node(|node| node.set_view_arrangement(id))
    }

    pub fn set_number_of_compare_view_rows(&mut self, rows: u32) -> LayoutResult<bool> {
        self.modify_layout_node(|node| node.set_number_of_compare_view_rows(rows))
    }

    pub fn set_number_of_compare_view_columns(&mut self, columns: u32) -> LayoutResult<bool> {
        self.modify_layout_node(|node| node.set_number_of_compare_view_columns(columns))
    }

    pub fn set_number_of_compare_view_lightbox_rows(&mut self, rows: u32) -> LayoutResult<bool> {
        self.modify_layout_node(|node| node.set_number_of_compare_view_lightbox_rows(rows))
    }

    pub fn set_number_of_compare_view_lightbox_columns(&mut self, columns: u32) -> LayoutResult<bool> {
        self.modify_layout_node(|node| node.set_number_of_compare_view_lightbox_columns(columns))
    }

    pub fn add_layout_description(&mut self, id: LayoutId, xml: &str) -> LayoutResult<()> {
        self.modify_layout_node(|node| node.add_layout_description(id, xml))??;
        Ok(())
    }

    pub fn set_layout_description(&mut self, id: LayoutId, xml: &str) -> LayoutResult<()> {
        self.modify_layout_node(|node| node.set_layout_description(id, xml))??;
        Ok(())
    }

    /// Show only `view`, remembering the arrangement to go back to.
    pub fn maximize_view(&mut self, view: NodeId) -> LayoutResult<()> {
        let scene = self.scene.as_ref().ok_or(LayoutError::Unattached)?;
        let node = scene.view_node(view).ok_or_else(|| match scene.node(view) {
            Some(other) => SceneError::WrongNodeKind {
                node: view,
                expected: "view node",
                actual: other.class_name().to_string(),
            },
            None => SceneError::NodeNotFound { node: view },
        })?;
        // only the singleton tag tells a view apart from others of its class
        let tag = node
            .singleton_tag()
            .ok_or(LayoutError::UntaggedView { node: view })?;
        let xml = maximized_description(
            node.class_name(),
            Some(tag),
            node.attribute(VIEW_TYPE_ATTRIBUTE),
        );

        let previous = self.modify_layout_node(|layout| {
            let previous = layout.view_arrangement();
            register_description(layout, MAXIMIZED_LAYOUT, xml);
            layout.set_maximized_view_node(Some(view));
            layout.set_view_arrangement(MAXIMIZED_LAYOUT);
            previous
        })?;
        if previous != MAXIMIZED_LAYOUT {
            self.arrangement_before_maximize = Some(previous);
        }
        Ok(())
    }

    /// Leave the maximized layout. Returns false if it was not selected.
    pub fn restore_maximized_view(&mut self) -> LayoutResult<bool> {
        let current = self
            .layout_node()
            .map(LayoutNode::view_arrangement)
            .ok_or(LayoutError::Unattached)?;
        if current != MAXIMIZED_LAYOUT {
            return Ok(false);
        }
        let target = self
            .arrangement_before_maximize
            .take()
            .unwrap_or(BuiltinLayout::Conventional.id());
        self.modify_layout_node(|layout| {
            layout.set_maximized_view_node(None);
            layout.set_view_arrangement(target);
        })?;
        Ok(true)
    }

    /// Register `xml` as the custom layout and select it.
    pub fn set_custom_layout(&mut self, xml: &str) -> LayoutResult<()> {
        LayoutTree::parse(xml)?;
        self.modify_layout_node(|layout| {
            register_description(layout, CUSTOM_LAYOUT, xml);
            layout.set_view_arrangement(CUSTOM_LAYOUT);
        })
    }

    /// Apply a validated configuration as one layout node change.
    pub fn apply_config(&mut self, config: &LayoutConfig) -> LayoutResult<()> {
        validate_config(config)?;
        self.modify_layout_node(|layout| {
            if let Some(compare) = &config.compare {
                layout.set_number_of_compare_view_rows(compare.rows);
                layout.set_number_of_compare_view_columns(compare.columns);
                layout.set_number_of_compare_view_lightbox_rows(compare.lightbox_rows);
                layout.set_number_of_compare_view_lightbox_columns(compare.lightbox_columns);
            }
            if let Some(panels) = &config.panels {
                if let Some(visible) = panels.gui_visible {
                    layout.set_gui_panel_visibility(visible);
                }
                if let Some(visible) = panels.bottom_visible {
                    layout.set_bottom_panel_visibility(visible);
                }
                if let Some(side) = panels.side {
                    layout.set_gui_panel_lr(side.into());
                }
                if let Some(size) = panels.main_size {
                    layout.set_main_panel_size(size);
                }
                if let Some(size) = panels.secondary_size {
                    layout.set_secondary_panel_size(size);
                }
                if let Some(module) = &panels.selected_module {
                    layout.set_selected_module(module.clone());
                }
                if let Some(collapse) = panels.collapse_slice_controllers {
                    layout.set_collapse_slice_controllers(collapse);
                }
            }
            for def in &config.layouts {
                let result = if def.replace && layout.is_layout_description(def.id) {
                    layout.set_layout_description(def.id, def.xml.as_str())
                } else {
                    layout.add_layout_description(def.id, def.xml.as_str())
                };
                if let Err(err) = result {
                    warn!(id = def.id, name = %def.name, error = %err, "layout not registered");
                }
            }
            if let Some(id) = config.initial_layout {
                layout.set_view_arrangement(id);
            }
        })
    }

    // --- internals ---

    fn find_or_create_layout_node(&mut self) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let id = match scene.first_node_by_class(LAYOUT_NODE_CLASS) {
            Some(id) => id,
            None => {
                let id = scene.add_node(SceneNode::from(LayoutNode::new()));
                info!(%id, "created layout node");
                id
            }
        };
        self.layout_node = Some(id);
        if let Err(err) = self.update_layout_node(id, seed_descriptions) {
            warn!(error = %err, "cannot seed layout descriptions");
        }
    }

    fn update_layout_node<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut LayoutNode) -> R,
    ) -> LayoutResult<R> {
        self.run_update(id, f, true)
    }

    /// Catch up with a layout node change that was already announced. The
    /// refresh itself adds no second `NodeModified`.
    fn resync_layout_node(&mut self, id: NodeId) -> LayoutResult<()> {
        self.run_update(id, |_| (), false)
    }

    fn run_update<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut LayoutNode) -> R,
        announce: bool,
    ) -> LayoutResult<R> {
        let scene = self.scene.as_mut().ok_or(LayoutError::Unattached)?;
        let result = scene.modify_layout_node(id, |node| {
            node.start_modify();
            f(node)
        })?;
        let views = refresh_derived_state(scene, id);
        let (mtime, arrangement) = scene.modify_layout_node(id, |node| {
            node.end_modify();
            if !announce {
                node.modified_state_mut().take_notifications();
            }
            (node.modified_state().mtime(), node.view_arrangement())
        })?;

        self.view_nodes = views;
        self.synced_mtime = mtime;
        if arrangement != NONE_LAYOUT {
            self.last_valid_view_arrangement = arrangement;
        }
        Ok(result)
    }

    /// Drain queued scene events: react to each, then pass it on. Events
    /// raised while reacting are drained by the same loop.
    fn process_events(&mut self) {
        if self.processing_events {
            return;
        }
        self.processing_events = true;
        loop {
            let Some(scene) = self.scene.as_mut() else {
                break;
            };
            let events = scene.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.handle_scene_event(event);
                if let Some(scene) = self.scene.as_mut() {
                    scene.dispatch(&event);
                }
            }
        }
        self.processing_events = false;
    }

    fn handle_scene_event(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::StartRestore => {
                debug!("scene restore started; detaching from layout node");
                self.layout_node = None;
                self.view_nodes.clear();
            }
            SceneEvent::EndRestore => self.find_or_create_layout_node(),
            SceneEvent::EndBatchProcess => self.restore_valid_arrangement(),
            SceneEvent::NodeModified(id) if Some(id) == self.layout_node => {
                let stale = self
                    .layout_node()
                    .is_some_and(|node| node.modified_state().mtime() != self.synced_mtime);
                if stale {
                    if let Err(err) = self.resync_layout_node(id) {
                        warn!(error = %err, "cannot update layout");
                    }
                }
            }
            SceneEvent::NodeRemoved(id) if Some(id) == self.layout_node => {
                let restoring = self.scene.as_ref().is_some_and(Scene::is_restoring);
                self.layout_node = None;
                self.view_nodes.clear();
                if !restoring {
                    self.find_or_create_layout_node();
                }
            }
            _ => {}
        }
    }

    fn restore_valid_arrangement(&mut self) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        if scene.is_batch_processing() {
            return;
        }
        let Some(id) = self.layout_node else {
            return;
        };
        let current = scene.layout_node(id).map(LayoutNode::view_arrangement);
        let target = self.last_valid_view_arrangement;
        if current == Some(NONE_LAYOUT) && target != NONE_LAYOUT {
            debug!(target, "restoring last valid arrangement");
            if let Err(err) = self.update_layout_node(id, |node| node.set_view_arrangement(target)) {
                warn!(error = %err, "cannot restore arrangement");
            }
        }
    }
}

/// Register every fixed built-in description the node does not have yet.
fn seed_descriptions(node: &mut LayoutNode) {
    for builtin in STATIC_LAYOUTS {
        if node.is_layout_description(builtin.id()) {
            continue;
        }
        if let Some(xml) = builtin_description(builtin) {
            register_description(node, builtin.id(), xml);
        }
    }
}

/// Add `xml` under `id`, replacing any description already registered.
fn register_description(node: &mut LayoutNode, id: LayoutId, xml: impl Into<String>) {
    let result = if node.is_layout_description(id) {
        node.set_layout_description(id, xml)
    } else {
        node.add_layout_description(id, xml)
    };
    if let Err(err) = result {
        warn!(id, error = %err, "layout description not registered");
    }
}

/// Regenerate compare descriptions, create the current layout's missing
/// views and return its view collection. Mapped flags follow the collection.
fn refresh_derived_state(scene: &mut Scene, layout: NodeId) -> Vec<NodeId> {
    let grid = match scene.layout_node(layout) {
        Some(node) => CompareGrid::from_layout_node(node),
        None => return Vec::new(),
    };
    let descriptions = compare_descriptions(&grid);
    let registered = scene.modify_layout_node(layout, |node| {
        for (id, xml) in descriptions {
            register_description(node, id, xml);
        }
    });
    if let Err(err) = registered {
        warn!(error = %err, "cannot update compare layouts");
    }

    let tree = scene
        .layout_node(layout)
        .and_then(LayoutNode::current_layout)
        .cloned();
    let views = match &tree {
        Some(tree) => {
            let outcome = create_missing_views(scene, tree);
            if !outcome.created.is_empty() {
                debug!(created = outcome.created.len(), "created views for layout");
            }
            views_from_layout(scene, tree)
        }
        None => Vec::new(),
    };

    let all_views: Vec<NodeId> = scene
        .node_ids()
        .filter(|&id| scene.view_node(id).is_some())
        .collect();
    for id in all_views {
        let mapped = views.contains(&id);
        if let Err(err) = scene.modify_view_node(id, |view| view.set_mapped_in_layout(mapped)) {
            warn!(%id, error = %err, "cannot update mapped flag");
        }
    }
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmml_scene::{ViewKind, ViewNode};

    fn tags(logic: &LayoutLogic) -> Vec<String> {
        let scene = logic.scene().unwrap();
        logic
            .view_nodes()
            .iter()
            .map(|&id| {
                scene
                    .view_node(id)
                    .and_then(ViewNode::singleton_tag)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn attach_creates_baseline_and_layout_node() {
        let mut logic = LayoutLogic::new();
        assert_eq!(logic.attach_state(), AttachState::Unattached);
        logic.set_scene(Scene::new());

        assert_eq!(logic.attach_state(), AttachState::AttachedWithLayoutNode);
        let scene = logic.scene().unwrap();
        assert_eq!(scene.nodes_by_class("vtkDMMLSliceNode").len(), 3);
        assert_eq!(scene.nodes_by_class("vtkDMMLViewNode").len(), 1);
        let layout = logic.layout_node().unwrap();
        assert_eq!(layout.view_arrangement(), NONE_LAYOUT);
        assert!(layout.is_layout_description(BuiltinLayout::Conventional.id()));
        assert!(layout.is_layout_description(BuiltinLayout::CompareGrid.id()));
        assert!(logic.view_nodes().is_empty());
    }

    #[test]
    fn existing_layout_node_is_reused() {
        let mut scene = Scene::new();
        let existing = scene.add_node(LayoutNode::new().into());
        let logic = LayoutLogic::with_scene(scene);
        assert_eq!(logic.layout_node_id(), Some(existing));
    }

    #[test]
    fn unattached_operations_fail() {
        let mut logic = LayoutLogic::new();
        assert!(matches!(
            logic.set_view_arrangement(2),
            Err(LayoutError::Unattached)
        ));
        assert!(logic.layout_node().is_none());
    }

    #[test]
    fn selecting_a_layout_publishes_views() {
        let mut logic = LayoutLogic::with_scene(Scene::new());
        assert!(logic.set_view_arrangement(BuiltinLayout::Conventional.id()).unwrap());
        assert_eq!(tags(&logic), ["1", "Red", "Green", "Yellow"]);
        assert_eq!(logic.last_valid_view_arrangement(), 2);

        let scene = logic.scene().unwrap();
        assert!(
            logic
                .view_nodes()
                .iter()
                .all(|&id| scene.view_node(id).unwrap().is_mapped_in_layout())
        );
    }

    #[test]
    fn on_demand_views_are_created_once() {
        let mut logic = LayoutLogic::with_scene(Scene::new());
        logic.set_view_arrangement(BuiltinLayout::FourUpTable.id()).unwrap();
        let table = logic.scene().unwrap().first_node_by_class("vtkDMMLTableViewNode");
        assert!(table.is_some());

        logic.set_view_arrangement(BuiltinLayout::ThreeDTable.id()).unwrap();
        let tables = logic.scene().unwrap().nodes_by_class("vtkDMMLTableViewNode");
        assert_eq!(tables, vec![table.unwrap()]);
    }

    #[test]
    fn custom_layout_is_selected() {
        let mut logic = LayoutLogic::with_scene(Scene::new());
        logic
            .set_custom_layout(
                r#"<layout type="horizontal"><item><view class="vtkDMMLSliceNode" singletontag="Green"/></item></layout>"#,
            )
            .unwrap();
        assert_eq!(logic.layout_node().unwrap().view_arrangement(), CUSTOM_LAYOUT);
        assert_eq!(tags(&logic), ["Green"]);

        assert!(logic.set_custom_layout("<layout>").is_err());
        assert_eq!(tags(&logic), ["Green"]);
    }

    #[test]
    fn maximize_and_restore() {
        let mut logic = LayoutLogic::with_scene(Scene::new());
        logic.set_view_arrangement(BuiltinLayout::FourUp.id()).unwrap();
        let red = logic.view_nodes()[0];

        logic.maximize_view(red).unwrap();
        assert_eq!(logic.view_nodes(), [red]);
        assert_eq!(logic.layout_node().unwrap().maximized_view_node(), Some(red));

        assert!(logic.restore_maximized_view().unwrap());
        let layout = logic.layout_node().unwrap();
        assert_eq!(layout.view_arrangement(), BuiltinLayout::FourUp.id());
        assert_eq!(layout.maximized_view_node(), None);
        assert!(!logic.restore_maximized_view().unwrap());
    }

    #[test]
    fn maximize_rejects_non_views() {
        let mut logic = LayoutLogic::with_scene(Scene::new());
        let layout = logic.layout_node_id().unwrap();
        assert!(matches!(
            logic.maximize_view(layout),
            Err(LayoutError::Scene(SceneError::WrongNodeKind { .. }))
        ));
    }

    #[test]
    fn maximize_rejects_untagged_views() {
        let mut scene = Scene::new();
        let plain = scene.add_node(ViewNode::new(ViewKind::ThreeD).into());
        let mut logic = LayoutLogic::with_scene(scene);
        logic.set_view_arrangement(BuiltinLayout::FourUp.id()).unwrap();

        assert!(matches!(
            logic.maximize_view(plain),
            Err(LayoutError::UntaggedView { node }) if node == plain
        ));
        let layout = logic.layout_node().unwrap();
        assert_eq!(layout.view_arrangement(), BuiltinLayout::FourUp.id());
        assert_eq!(layout.maximized_view_node(), None);
    }

    #[test]
    fn maximized_layout_shows_only_the_tagged_view() {
        let mut scene = Scene::new();
        scene.add_node(ViewNode::new(ViewKind::ThreeD).into());
        let mut logic = LayoutLogic::with_scene(scene);
        let three_d = logic
            .scene()
            .unwrap()
            .singleton_by_tag("vtkDMMLViewNode", "1")
            .unwrap();

        logic.maximize_view(three_d).unwrap();
        assert_eq!(logic.view_nodes(), [three_d]);
    }

    #[test]
    fn external_compare_change_notifies_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut logic = LayoutLogic::with_scene(Scene::new());
        logic.set_view_arrangement(BuiltinLayout::CompareGrid.id()).unwrap();
        let id = logic.layout_node_id().unwrap();
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        logic
            .add_observer(move |e| {
                if *e == SceneEvent::NodeModified(id) {
                    sink.set(sink.get() + 1);
                }
            })
            .unwrap();

        logic
            .modify_scene(|scene| {
                scene.modify_layout_node(id, |node| node.set_number_of_compare_view_rows(2))
            })
            .unwrap()
            .unwrap();
        assert_eq!(count.get(), 1);
        assert_eq!(logic.view_nodes().len(), 4);

        // the resync is not mistaken for a further external change
        logic.modify_scene(|_| ()).unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn external_layout_change_is_picked_up() {
        let mut logic = LayoutLogic::with_scene(Scene::new());
        let id = logic.layout_node_id().unwrap();
        logic
            .modify_scene(|scene| {
                scene.modify_layout_node(id, |node| node.set_view_arrangement(4))
            })
            .unwrap()
            .unwrap();
        assert_eq!(tags(&logic), ["1"]);
    }

    #[test]
    fn clear_restores_last_valid_arrangement() {
        let mut logic = LayoutLogic::with_scene(Scene::new());
        logic.set_view_arrangement(BuiltinLayout::OneUpRedSlice.id()).unwrap();
        logic.modify_scene(Scene::clear).unwrap();

        let layout = logic.layout_node().unwrap();
        assert_eq!(layout.view_arrangement(), BuiltinLayout::OneUpRedSlice.id());
        assert_eq!(tags(&logic), ["Red"]);
    }

    #[test]
    fn restore_reattaches() {
        let mut logic = LayoutLogic::with_scene(Scene::new());
        logic.set_view_arrangement(BuiltinLayout::Conventional.id()).unwrap();
        let snapshot = logic.scene().unwrap().snapshot();
        logic.set_view_arrangement(BuiltinLayout::OneUp3D.id()).unwrap();

        logic.modify_scene(|scene| scene.restore(&snapshot)).unwrap();
        assert_eq!(logic.attach_state(), AttachState::AttachedWithLayoutNode);
        assert_eq!(logic.layout_node().unwrap().view_arrangement(), 2);
        assert_eq!(tags(&logic), ["1", "Red", "Green", "Yellow"]);
    }

    #[test]
    fn extra_view_class_alias_is_usable() {
        let mut scene = Scene::new();
        scene.register_view_class("vtkDMMLChartViewNode", ViewKind::Plot);
        let mut logic = LayoutLogic::with_scene(scene);
        logic
            .set_custom_layout(
                r#"<layout type="horizontal"><item><view class="vtkDMMLChartViewNode" singletontag="ChartView1"/></item></layout>"#,
            )
            .unwrap();
        assert_eq!(tags(&logic), ["ChartView1"]);
    }
}
