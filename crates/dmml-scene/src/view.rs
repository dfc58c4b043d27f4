//! View nodes.
//!
//! Every view the layout engine can place in a pane is a [`ViewNode`]. The
//! kind-specific state lives in [`ViewSettings`], a closed variant, so code
//! that needs slice-only fields pattern-matches instead of probing class
//! names at runtime.

use std::collections::BTreeMap;

use dmml_core::{ModifiedState, Rgb};

/// Custom attribute recording the `type` a view was created for
/// (for example `secondary` or `endoscopy`). Absent means the main view.
pub const VIEW_TYPE_ATTRIBUTE: &str = "ViewType";

pub const THREE_D_VIEW_CLASS: &str = "vtkDMMLViewNode";
pub const SLICE_VIEW_CLASS: &str = "vtkDMMLSliceNode";
pub const TABLE_VIEW_CLASS: &str = "vtkDMMLTableViewNode";
pub const PLOT_VIEW_CLASS: &str = "vtkDMMLPlotViewNode";

/// The known view kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    ThreeD,
    Slice,
    Table,
    Plot,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::ThreeD,
        ViewKind::Slice,
        ViewKind::Table,
        ViewKind::Plot,
    ];

    /// Canonical scene class name.
    pub const fn class_name(self) -> &'static str {
        match self {
            ViewKind::ThreeD => THREE_D_VIEW_CLASS,
            ViewKind::Slice => SLICE_VIEW_CLASS,
            ViewKind::Table => TABLE_VIEW_CLASS,
            ViewKind::Plot => PLOT_VIEW_CLASS,
        }
    }

    /// Node name derived from a singleton tag.
    ///
    /// Slice, table and plot views are named by their tag alone; 3D views get
    /// a `View` prefix. Existing scenes depend on these names.
    pub fn name_for_tag(self, tag: &str) -> String {
        match self {
            ViewKind::Slice | ViewKind::Table | ViewKind::Plot => tag.to_string(),
            ViewKind::ThreeD => format!("View{tag}"),
        }
    }

    fn default_settings(self) -> ViewSettings {
        match self {
            ViewKind::ThreeD => ViewSettings::ThreeD,
            ViewKind::Slice => ViewSettings::Slice(SliceSettings::default()),
            ViewKind::Table => ViewSettings::Table,
            ViewKind::Plot => ViewSettings::Plot,
        }
    }

    fn default_color(self) -> Rgb {
        match self {
            ViewKind::ThreeD => Rgb::from_bytes(0x74, 0x83, 0xE9),
            ViewKind::Slice | ViewKind::Table | ViewKind::Plot => Rgb::new(0.5, 0.5, 0.5),
        }
    }
}

/// Slice-only state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceSettings {
    pub orientation: String,
    pub default_orientation: String,
    pub lightbox_rows: u32,
    pub lightbox_columns: u32,
}

impl Default for SliceSettings {
    fn default() -> Self {
        Self {
            orientation: "Axial".to_string(),
            default_orientation: "Axial".to_string(),
            lightbox_rows: 1,
            lightbox_columns: 1,
        }
    }
}

/// Kind-specific view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSettings {
    ThreeD,
    Slice(SliceSettings),
    Table,
    Plot,
}

impl ViewSettings {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewSettings::ThreeD => ViewKind::ThreeD,
            ViewSettings::Slice(_) => ViewKind::Slice,
            ViewSettings::Table => ViewKind::Table,
            ViewSettings::Plot => ViewKind::Plot,
        }
    }
}

/// A view that can be placed in a layout pane.
#[derive(Debug, Clone)]
pub struct ViewNode {
    class_name: String,
    settings: ViewSettings,
    singleton_tag: Option<String>,
    name: String,
    layout_label: String,
    layout_color: Rgb,
    view_group: i32,
    mapped_in_layout: bool,
    attributes: BTreeMap<String, String>,
    modified: ModifiedState,
}

impl ViewNode {
    /// Create an untagged view of `kind` under its canonical class name.
    pub fn new(kind: ViewKind) -> Self {
        Self::with_class_name(kind, kind.class_name())
    }

    /// Create an untagged view of `kind` registered under `class_name`.
    pub fn with_class_name(kind: ViewKind, class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            settings: kind.default_settings(),
            singleton_tag: None,
            name: String::new(),
            layout_label: String::new(),
            layout_color: kind.default_color(),
            view_group: 0,
            mapped_in_layout: false,
            attributes: BTreeMap::new(),
            modified: ModifiedState::new(),
        }
    }

    /// Create a view with a singleton tag and the name derived from it.
    pub fn with_tag(kind: ViewKind, tag: &str) -> Self {
        let mut view = Self::new(kind);
        view.singleton_tag = Some(tag.to_string());
        view.name = kind.name_for_tag(tag);
        view
    }

    pub fn kind(&self) -> ViewKind {
        self.settings.kind()
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// True if this node was created for `class_name`, either its registered
    /// class or the canonical class of its kind.
    pub fn is_a(&self, class_name: &str) -> bool {
        self.class_name == class_name || self.kind().class_name() == class_name
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn slice_settings(&self) -> Option<&SliceSettings> {
        match &self.settings {
            ViewSettings::Slice(slice) => Some(slice),
            _ => None,
        }
    }

    pub fn singleton_tag(&self) -> Option<&str> {
        self.singleton_tag.as_deref()
    }

    /// Empty tags are stored as "no tag".
    pub fn set_singleton_tag(&mut self, tag: Option<&str>) -> bool {
        let tag = tag.filter(|t| !t.is_empty()).map(str::to_string);
        self.update(|v| &mut v.singleton_tag, tag)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        self.update(|v| &mut v.name, name.into())
    }

    pub fn layout_label(&self) -> &str {
        &self.layout_label
    }

    pub fn set_layout_label(&mut self, label: impl Into<String>) -> bool {
        self.update(|v| &mut v.layout_label, label.into())
    }

    pub fn layout_color(&self) -> Rgb {
        self.layout_color
    }

    pub fn set_layout_color(&mut self, color: Rgb) -> bool {
        self.update(|v| &mut v.layout_color, color)
    }

    pub fn view_group(&self) -> i32 {
        self.view_group
    }

    pub fn set_view_group(&mut self, group: i32) -> bool {
        self.update(|v| &mut v.view_group, group)
    }

    /// Whether the view is part of the currently displayed layout.
    pub fn is_mapped_in_layout(&self) -> bool {
        self.mapped_in_layout
    }

    pub fn set_mapped_in_layout(&mut self, mapped: bool) -> bool {
        self.update(|v| &mut v.mapped_in_layout, mapped)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Set or (with `None`) remove a custom attribute.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        let changed = match value {
            Some(value) => {
                if self.attribute(name) == Some(value) {
                    false
                } else {
                    self.attributes.insert(name.to_string(), value.to_string());
                    true
                }
            }
            None => self.attributes.remove(name).is_some(),
        };
        if changed {
            self.modified.modified();
        }
        changed
    }

    /// Set both the default and the current slice orientation.
    /// Returns `None` if this is not a slice view.
    pub fn set_orientation(&mut self, orientation: &str) -> Option<bool> {
        let ViewSettings::Slice(slice) = &mut self.settings else {
            return None;
        };
        let changed = slice.orientation != orientation || slice.default_orientation != orientation;
        if changed {
            slice.orientation = orientation.to_string();
            slice.default_orientation = orientation.to_string();
            self.modified.modified();
        }
        Some(changed)
    }

    /// Returns `None` if this is not a slice view.
    pub fn set_lightbox_rows(&mut self, rows: u32) -> Option<bool> {
        let ViewSettings::Slice(slice) = &mut self.settings else {
            return None;
        };
        let changed = slice.lightbox_rows != rows;
        if changed {
            slice.lightbox_rows = rows;
            self.modified.modified();
        }
        Some(changed)
    }

    /// Returns `None` if this is not a slice view.
    pub fn set_lightbox_columns(&mut self, columns: u32) -> Option<bool> {
        let ViewSettings::Slice(slice) = &mut self.settings else {
            return None;
        };
        let changed = slice.lightbox_columns != columns;
        if changed {
            slice.lightbox_columns = columns;
            self.modified.modified();
        }
        Some(changed)
    }

    /// Restore state from `default`, keeping identity (class, tag, name,
    /// attributes) and the user-facing layout label and view group.
    pub fn reset(&mut self, default: &ViewNode) {
        self.modified.start_modify();
        if self.kind() == default.kind() && self.settings != default.settings {
            self.settings = default.settings.clone();
            self.modified.modified();
        }
        self.set_layout_color(default.layout_color);
        self.set_mapped_in_layout(default.mapped_in_layout);
        self.modified.end_modify();
    }

    /// Copy everything but the class from `other`, as one change.
    pub fn copy_content(&mut self, other: &ViewNode) {
        self.modified.start_modify();
        if self.kind() == other.kind() && self.settings != other.settings {
            self.settings = other.settings.clone();
            self.modified.modified();
        }
        self.set_singleton_tag(other.singleton_tag());
        self.set_name(other.name.clone());
        self.set_layout_label(other.layout_label.clone());
        self.set_layout_color(other.layout_color);
        self.set_view_group(other.view_group);
        if self.attributes != other.attributes {
            self.attributes = other.attributes.clone();
            self.modified.modified();
        }
        self.modified.end_modify();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_kind_rule() {
        assert_eq!(ViewNode::with_tag(ViewKind::Slice, "Red").name(), "Red");
        assert_eq!(ViewNode::with_tag(ViewKind::ThreeD, "1").name(), "View1");
        assert_eq!(
            ViewNode::with_tag(ViewKind::Table, "TableView1").name(),
            "TableView1"
        );
        assert_eq!(
            ViewNode::with_tag(ViewKind::Plot, "PlotView1").name(),
            "PlotView1"
        );
    }

    #[test]
    fn unchanged_values_do_not_notify() {
        let mut view = ViewNode::new(ViewKind::ThreeD);
        assert!(view.set_layout_label("1"));
        assert!(!view.set_layout_label("1"));
        assert!(view.set_view_group(2));
        assert!(!view.set_view_group(2));
        assert_eq!(view.modified_state().mtime(), 2);
    }

    #[test]
    fn slice_only_setters_reject_other_kinds() {
        let mut view = ViewNode::new(ViewKind::ThreeD);
        assert_eq!(view.set_orientation("Sagittal"), None);
        assert_eq!(view.set_lightbox_rows(2), None);
        assert_eq!(view.set_lightbox_columns(2), None);
        assert_eq!(view.modified_state().mtime(), 0);

        let mut slice = ViewNode::new(ViewKind::Slice);
        assert_eq!(slice.set_orientation("Sagittal"), Some(true));
        assert_eq!(slice.set_orientation("Sagittal"), Some(false));
        let settings = slice.slice_settings().unwrap();
        assert_eq!(settings.orientation, "Sagittal");
        assert_eq!(settings.default_orientation, "Sagittal");
    }

    #[test]
    fn empty_singleton_tag_means_none() {
        let mut view = ViewNode::with_tag(ViewKind::Slice, "Red");
        assert!(view.set_singleton_tag(Some("")));
        assert_eq!(view.singleton_tag(), None);
    }

    #[test]
    fn attributes_set_and_remove() {
        let mut view = ViewNode::new(ViewKind::ThreeD);
        assert!(view.set_attribute(VIEW_TYPE_ATTRIBUTE, Some("endoscopy")));
        assert!(!view.set_attribute(VIEW_TYPE_ATTRIBUTE, Some("endoscopy")));
        assert_eq!(view.attribute(VIEW_TYPE_ATTRIBUTE), Some("endoscopy"));
        assert!(view.set_attribute(VIEW_TYPE_ATTRIBUTE, None));
        assert_eq!(view.attribute(VIEW_TYPE_ATTRIBUTE), None);
    }

    #[test]
    fn reset_keeps_label_and_group() {
        let mut view = ViewNode::with_tag(ViewKind::Slice, "Red");
        view.set_layout_label("R");
        view.set_view_group(3);
        view.set_lightbox_rows(4);
        view.set_layout_color(Rgb::from_bytes(0xF3, 0x4A, 0x33));

        view.modified_state_mut().take_notifications();
        view.reset(&ViewNode::new(ViewKind::Slice));

        assert_eq!(view.layout_label(), "R");
        assert_eq!(view.view_group(), 3);
        assert_eq!(view.name(), "Red");
        assert_eq!(view.slice_settings().unwrap().lightbox_rows, 1);
        assert_eq!(view.layout_color(), Rgb::new(0.5, 0.5, 0.5));
        assert_eq!(view.modified_state_mut().take_notifications(), 1);
    }

    #[test]
    fn is_a_accepts_alias_and_canonical_class() {
        let view = ViewNode::with_class_name(ViewKind::ThreeD, "vtkDMMLCustomViewNode");
        assert!(view.is_a("vtkDMMLCustomViewNode"));
        assert!(view.is_a(THREE_D_VIEW_CLASS));
        assert!(!view.is_a(SLICE_VIEW_CLASS));
    }
}
