//! The layout node: registry of layout descriptions plus the currently
//! selected arrangement and panel settings.
//!
//! Structural changes (selecting an arrangement, registering a description
//! for the current arrangement, changing the compare grid) are wrapped in a
//! batch so that observers receive exactly one notification per operation.

use std::collections::BTreeMap;

use dmml_core::{ModifiedState, NodeId};
use tracing::{debug, warn};

use crate::description::LayoutTree;
use crate::error::{LayoutNodeError, LayoutParseError};
use crate::layout_id::{BuiltinLayout, LayoutId};

pub const LAYOUT_NODE_CLASS: &str = "vtkDMMLLayoutNode";

/// Bounds for the compare-view grid settings.
pub const COMPARE_VIEW_MIN: u32 = 1;
pub const COMPARE_VIEW_MAX: u32 = 50;

/// Which side of the main window hosts the module panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelSide {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct LayoutNode {
    descriptions: BTreeMap<LayoutId, String>,
    view_arrangement: LayoutId,
    current_description: String,
    current_layout: Option<LayoutTree>,

    gui_panel_visibility: bool,
    bottom_panel_visibility: bool,
    gui_panel_lr: PanelSide,
    collapse_slice_controllers: bool,
    main_panel_size: i32,
    secondary_panel_size: i32,
    selected_module: String,

    number_of_compare_view_rows: u32,
    number_of_compare_view_columns: u32,
    number_of_compare_view_lightbox_rows: u32,
    number_of_compare_view_lightbox_columns: u32,

    maximized_view_node: Option<NodeId>,
    attributes: BTreeMap<String, String>,
    modified: ModifiedState,
}

impl LayoutNode {
    pub fn new() -> Self {
        Self {
            descriptions: BTreeMap::new(),
            view_arrangement: BuiltinLayout::None.id(),
            current_description: String::new(),
            current_layout: None,
            gui_panel_visibility: true,
            bottom_panel_visibility: true,
            gui_panel_lr: PanelSide::Left,
            collapse_slice_controllers: false,
            main_panel_size: 400,
            secondary_panel_size: 400,
            selected_module: String::new(),
            number_of_compare_view_rows: 1,
            number_of_compare_view_columns: 1,
            number_of_compare_view_lightbox_rows: 1,
            number_of_compare_view_lightbox_columns: 1,
            maximized_view_node: None,
            attributes: BTreeMap::new(),
            modified: ModifiedState::new(),
        }
    }

    /// Parse a layout description into a tree owned by the caller.
    pub fn parse_layout(xml: &str) -> Result<LayoutTree, LayoutParseError> {
        LayoutTree::parse(xml)
    }

    // --- description registry ---

    /// Register a new description. Fails without changes if `id` is taken.
    pub fn add_layout_description(
        &mut self,
        id: LayoutId,
        xml: impl Into<String>,
    ) -> Result<(), LayoutNodeError> {
        if self.is_layout_description(id) {
            debug!(id, "layout description already registered");
            return Err(LayoutNodeError::DuplicateLayout(id));
        }
        self.modified.start_modify();
        self.descriptions.insert(id, xml.into());
        if id == self.view_arrangement {
            self.update_current_layout_description();
        }
        self.modified.end_modify();
        Ok(())
    }

    /// Replace an existing description. Fails without changes if `id` is
    /// unknown.
    pub fn set_layout_description(
        &mut self,
        id: LayoutId,
        xml: impl Into<String>,
    ) -> Result<(), LayoutNodeError> {
        let Some(slot) = self.descriptions.get_mut(&id) else {
            debug!(id, "no layout description to replace");
            return Err(LayoutNodeError::UnknownLayout(id));
        };
        let xml = xml.into();
        if *slot == xml {
            return Ok(());
        }
        *slot = xml;
        self.modified.start_modify();
        if id == self.view_arrangement {
            self.update_current_layout_description();
        }
        self.modified.end_modify();
        Ok(())
    }

    pub fn is_layout_description(&self, id: LayoutId) -> bool {
        self.descriptions.contains_key(&id)
    }

    /// Description registered for `id`, or an empty string.
    pub fn layout_description(&self, id: LayoutId) -> &str {
        self.descriptions.get(&id).map_or("", String::as_str)
    }

    pub fn layout_description_ids(&self) -> Vec<LayoutId> {
        self.descriptions.keys().copied().collect()
    }

    // --- current arrangement ---

    pub fn view_arrangement(&self) -> LayoutId {
        self.view_arrangement
    }

    /// Select an arrangement. An unknown id selects an empty layout.
    /// Returns false (and notifies nobody) if `id` is already selected.
    pub fn set_view_arrangement(&mut self, id: LayoutId) -> bool {
        if id == self.view_arrangement {
            return false;
        }
        self.modified.start_modify();
        self.view_arrangement = id;
        self.modified.modified();
        self.update_current_layout_description();
        self.modified.end_modify();
        true
    }

    pub fn current_layout_description(&self) -> &str {
        &self.current_description
    }

    /// The parsed tree of the current description, if it parsed.
    pub fn current_layout(&self) -> Option<&LayoutTree> {
        self.current_layout.as_ref()
    }

    fn update_current_layout_description(&mut self) {
        let description = self.layout_description(self.view_arrangement).to_string();
        self.set_and_parse_current_layout_description(description);
    }

    fn set_and_parse_current_layout_description(&mut self, description: String) {
        if description == self.current_description {
            return;
        }
        self.current_layout = if description.trim().is_empty() {
            None
        } else {
            match LayoutTree::parse(&description) {
                Ok(tree) => Some(tree),
                Err(err) => {
                    warn!(
                        arrangement = self.view_arrangement,
                        error = %err,
                        "failed to parse layout description"
                    );
                    None
                }
            }
        };
        self.current_description = description;
        self.modified.modified();
    }

    // --- panels ---

    pub fn gui_panel_visibility(&self) -> bool {
        self.gui_panel_visibility
    }

    pub fn set_gui_panel_visibility(&mut self, visible: bool) -> bool {
        self.update(|n| &mut n.gui_panel_visibility, visible)
    }

    pub fn bottom_panel_visibility(&self) -> bool {
        self.bottom_panel_visibility
    }

    pub fn set_bottom_panel_visibility(&mut self, visible: bool) -> bool {
        self.update(|n| &mut n.bottom_panel_visibility, visible)
    }

    pub fn gui_panel_lr(&self) -> PanelSide {
        self.gui_panel_lr
    }

    pub fn set_gui_panel_lr(&mut self, side: PanelSide) -> bool {
        self.update(|n| &mut n.gui_panel_lr, side)
    }

    pub fn collapse_slice_controllers(&self) -> bool {
        self.collapse_slice_controllers
    }

    pub fn set_collapse_slice_controllers(&mut self, collapse: bool) -> bool {
        self.update(|n| &mut n.collapse_slice_controllers, collapse)
    }

    pub fn main_panel_size(&self) -> i32 {
        self.main_panel_size
    }

    pub fn set_main_panel_size(&mut self, size: i32) -> bool {
        self.update(|n| &mut n.main_panel_size, size)
    }

    pub fn secondary_panel_size(&self) -> i32 {
        self.secondary_panel_size
    }

    pub fn set_secondary_panel_size(&mut self, size: i32) -> bool {
        self.update(|n| &mut n.secondary_panel_size, size)
    }

    pub fn selected_module(&self) -> &str {
        &self.selected_module
    }

    pub fn set_selected_module(&mut self, module: impl Into<String>) -> bool {
        self.update(|n| &mut n.selected_module, module.into())
    }

    // --- compare grid ---

    pub fn number_of_compare_view_rows(&self) -> u32 {
        self.number_of_compare_view_rows
    }

    pub fn set_number_of_compare_view_rows(&mut self, rows: u32) -> bool {
        self.update(|n| &mut n.number_of_compare_view_rows, clamp_compare(rows))
    }

    pub fn number_of_compare_view_columns(&self) -> u32 {
        self.number_of_compare_view_columns
    }

    pub fn set_number_of_compare_view_columns(&mut self, columns: u32) -> bool {
        self.update(
            |n| &mut n.number_of_compare_view_columns,
            clamp_compare(columns),
        )
    }

    pub fn number_of_compare_view_lightbox_rows(&self) -> u32 {
        self.number_of_compare_view_lightbox_rows
    }

    pub fn set_number_of_compare_view_lightbox_rows(&mut self, rows: u32) -> bool {
        self.update(
            |n| &mut n.number_of_compare_view_lightbox_rows,
            clamp_compare(rows),
        )
    }

    pub fn number_of_compare_view_lightbox_columns(&self) -> u32 {
        self.number_of_compare_view_lightbox_columns
    }

    pub fn set_number_of_compare_view_lightbox_columns(&mut self, columns: u32) -> bool {
        self.update(
            |n| &mut n.number_of_compare_view_lightbox_columns,
            clamp_compare(columns),
        )
    }

    // --- maximized view ---

    pub fn maximized_view_node(&self) -> Option<NodeId> {
        self.maximized_view_node
    }

    pub fn set_maximized_view_node(&mut self, node: Option<NodeId>) -> bool {
        self.update(|n| &mut n.maximized_view_node, node)
    }

    // --- attributes ---

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        let changed = match value {
            Some(value) if self.attribute(name) == Some(value) => false,
            Some(value) => {
                self.attributes.insert(name.to_string(), value.to_string());
                true
            }
            None => self.attributes.remove(name).is_some(),
        };
        if changed {
            self.modified.modified();
        }
        changed
    }

    // --- whole-node operations ---

    /// Restore the settings of `default` (or of a fresh node) and forget the
    /// maximized view. Registered descriptions are kept.
    pub fn reset(&mut self, default: Option<&LayoutNode>) {
        let fresh;
        let default = match default {
            Some(node) => node,
            None => {
                fresh = LayoutNode::new();
                &fresh
            }
        };
        self.modified.start_modify();
        self.copy_settings(default);
        self.set_maximized_view_node(None);
        self.modified.end_modify();
    }

    /// Copy arrangement, panel and compare settings from `other` as one change.
    pub fn copy_settings(&mut self, other: &LayoutNode) {
        self.modified.start_modify();
        self.set_view_arrangement(other.view_arrangement);
        self.set_gui_panel_visibility(other.gui_panel_visibility);
        self.set_bottom_panel_visibility(other.bottom_panel_visibility);
        self.set_gui_panel_lr(other.gui_panel_lr);
        self.set_collapse_slice_controllers(other.collapse_slice_controllers);
        self.set_main_panel_size(other.main_panel_size);
        self.set_secondary_panel_size(other.secondary_panel_size);
        self.set_selected_module(other.selected_module.clone());
        self.set_number_of_compare_view_rows(other.number_of_compare_view_rows);
        self.set_number_of_compare_view_columns(other.number_of_compare_view_columns);
        self.set_number_of_compare_view_lightbox_rows(other.number_of_compare_view_lightbox_rows);
        self.set_number_of_compare_view_lightbox_columns(
            other.number_of_compare_view_lightbox_columns,
        );
        self.modified.end_modify();
    }

    /// Open a batch; changes until the matching `end_modify` notify once.
    pub fn start_modify(&mut self) -> bool {
        self.modified.start_modify()
    }

    /// Close a batch. Returns true if the aggregate notification fired.
    pub fn end_modify(&mut self) -> bool {
        self.modified.end_modify()
    }

    pub fn modified_state(&self) -> &ModifiedState {
        &self.modified
    }

    pub fn modified_state_mut(&mut self) -> &mut ModifiedState {
        &mut self.modified
    }

    fn update<T: PartialEq>(&mut self, field: impl FnOnce(&mut Self) -> &mut T, value: T) -> bool {
        let slot = field(self);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.modified.modified();
        true
    }
}

impl Default for LayoutNode {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_compare(value: u32) -> u32 {
    value.clamp(COMPARE_VIEW_MIN, COMPARE_VIEW_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_UP: &str =
        r#"<layout type="horizontal"><item><view class="vtkDMMLViewNode" singletontag="1"/></item></layout>"#;
    const RED: &str =
        r#"<layout type="horizontal"><item><view class="vtkDMMLSliceNode" singletontag="Red"/></item></layout>"#;

    fn notifications(node: &mut LayoutNode) -> u32 {
        node.modified_state_mut().take_notifications()
    }

    #[test]
    fn defaults() {
        let node = LayoutNode::new();
        assert_eq!(node.view_arrangement(), BuiltinLayout::None.id());
        assert_eq!(node.current_layout_description(), "");
        assert!(node.current_layout().is_none());
        assert_eq!(node.number_of_compare_view_rows(), 1);
        assert_eq!(node.maximized_view_node(), None);
    }

    #[test]
    fn registry_round_trip() {
        let mut node = LayoutNode::new();
        node.add_layout_description(4, ONE_UP).unwrap();
        assert!(node.is_layout_description(4));
        assert_eq!(node.layout_description(4), ONE_UP);

        node.set_layout_description(4, RED).unwrap();
        assert_eq!(node.layout_description(4), RED);
        assert_eq!(node.layout_description(5), "");
        assert_eq!(node.layout_description_ids(), vec![4]);
    }

    #[test]
    fn duplicate_and_missing_registrations_fail_without_change() {
        let mut node = LayoutNode::new();
        node.add_layout_description(4, ONE_UP).unwrap();
        assert_eq!(
            node.add_layout_description(4, RED),
            Err(LayoutNodeError::DuplicateLayout(4))
        );
        assert_eq!(node.layout_description(4), ONE_UP);
        assert_eq!(
            node.set_layout_description(6, RED),
            Err(LayoutNodeError::UnknownLayout(6))
        );
        assert!(!node.is_layout_description(6));
    }

    #[test]
    fn set_view_arrangement_notifies_once() {
        let mut node = LayoutNode::new();
        node.add_layout_description(4, ONE_UP).unwrap();
        notifications(&mut node);

        assert!(node.set_view_arrangement(4));
        assert_eq!(notifications(&mut node), 1);
        assert_eq!(node.current_layout_description(), ONE_UP);
        assert_eq!(node.current_layout().unwrap().view_elements().len(), 1);

        assert!(!node.set_view_arrangement(4));
        assert_eq!(notifications(&mut node), 0);
    }

    #[test]
    fn unknown_arrangement_selects_empty_layout() {
        let mut node = LayoutNode::new();
        node.add_layout_description(4, ONE_UP).unwrap();
        node.set_view_arrangement(4);
        node.set_view_arrangement(77);
        assert_eq!(node.current_layout_description(), "");
        assert!(node.current_layout().is_none());
    }

    #[test]
    fn updating_current_description_reparses() {
        let mut node = LayoutNode::new();
        node.add_layout_description(4, ONE_UP).unwrap();
        node.set_view_arrangement(4);
        notifications(&mut node);

        node.set_layout_description(4, RED).unwrap();
        assert_eq!(notifications(&mut node), 1);
        let tree = node.current_layout().unwrap();
        assert_eq!(tree.view_elements()[0].singleton_tag(), Some("Red"));

        node.set_layout_description(4, RED).unwrap();
        assert_eq!(notifications(&mut node), 0);
    }

    #[test]
    fn adding_description_for_current_arrangement_parses_it() {
        let mut node = LayoutNode::new();
        node.set_view_arrangement(100);
        assert!(node.current_layout().is_none());
        node.add_layout_description(100, RED).unwrap();
        assert_eq!(node.current_layout_description(), RED);
        assert!(node.current_layout().is_some());
    }

    #[test]
    fn compare_settings_clamp_and_skip_unchanged() {
        let mut node = LayoutNode::new();
        assert!(!node.set_number_of_compare_view_rows(0));
        assert_eq!(node.number_of_compare_view_rows(), 1);
        assert!(node.set_number_of_compare_view_columns(80));
        assert_eq!(node.number_of_compare_view_columns(), 50);
        notifications(&mut node);
        assert!(!node.set_number_of_compare_view_columns(50));
        assert_eq!(notifications(&mut node), 0);
    }

    #[test]
    fn reset_clears_maximized_view_and_keeps_descriptions() {
        let mut node = LayoutNode::new();
        node.add_layout_description(4, ONE_UP).unwrap();
        node.set_view_arrangement(4);
        node.set_maximized_view_node(Some(NodeId::from_index(3)));
        node.set_main_panel_size(120);
        notifications(&mut node);

        node.reset(None);
        assert_eq!(notifications(&mut node), 1);
        assert_eq!(node.maximized_view_node(), None);
        assert_eq!(node.view_arrangement(), BuiltinLayout::None.id());
        assert_eq!(node.main_panel_size(), 400);
        assert!(node.is_layout_description(4));
    }

    #[test]
    fn malformed_description_leaves_no_tree() {
        let mut node = LayoutNode::new();
        node.add_layout_description(100, "<layout><item>").unwrap();
        node.set_view_arrangement(100);
        assert_eq!(node.current_layout_description(), "<layout><item>");
        assert!(node.current_layout().is_none());
    }
}
