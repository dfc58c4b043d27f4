//! Layout description parsing.
//!
//! A layout description is a small XML document:
//!
//! ```text
//! <layout type="vertical|horizontal|tab" [split="true"]>
//!   <item [splitSize="N"] [multiple="true"]>
//!     ( <layout>...</layout> | <view class="CLASS" [singletontag="TAG"] [type="TYPE"]>
//!          <property name="NAME" action="default|relayout">VALUE</property>*
//!        </view> )
//!   </item>+
//! </layout>
//! ```
//!
//! [`LayoutTree::parse`] turns it into an owned arena of elements linked by
//! indices. The `view` elements, with their properties, are flattened once
//! into document order so consumers iterate a slice instead of re-walking
//! the tree.

use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use crate::error::LayoutParseError;

/// Index of an element inside its [`LayoutTree`].
pub type ElementIndex = usize;

/// Orientation of a `layout` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    Vertical,
    #[default]
    Horizontal,
    Tab,
}

impl LayoutKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "vertical" => Some(LayoutKind::Vertical),
            "horizontal" => Some(LayoutKind::Horizontal),
            "tab" => Some(LayoutKind::Tab),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Vertical => "vertical",
            LayoutKind::Horizontal => "horizontal",
            LayoutKind::Tab => "tab",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Layout { kind: LayoutKind, split: bool },
    Item { split_size: Option<u32>, multiple: bool },
    View,
    Property,
    /// Unknown element names are kept as transparent containers.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutElement {
    pub name: String,
    pub kind: ElementKind,
    pub attributes: BTreeMap<String, String>,
    /// Trimmed character data, if any.
    pub text: Option<String>,
    pub parent: Option<ElementIndex>,
    pub children: Vec<ElementIndex>,
}

impl LayoutElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_view(&self) -> bool {
        self.kind == ElementKind::View
    }
}

/// When a property is applied to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyAction {
    /// Applied once, when the view node is created.
    Default,
    /// Applied every time an existing view is placed in a layout.
    Relayout,
    Other(String),
}

impl PropertyAction {
    pub fn parse(s: &str) -> Self {
        match s {
            "default" => PropertyAction::Default,
            "relayout" => PropertyAction::Relayout,
            other => PropertyAction::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropertyAction::Default => "default",
            PropertyAction::Relayout => "relayout",
            PropertyAction::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewProperty {
    pub name: String,
    pub action: PropertyAction,
    pub value: String,
}

/// A `view` element together with its declared properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewElement {
    pub element: ElementIndex,
    pub attributes: BTreeMap<String, String>,
    pub properties: Vec<ViewProperty>,
}

impl ViewElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn class_name(&self) -> Option<&str> {
        self.attribute("class")
    }

    pub fn singleton_tag(&self) -> Option<&str> {
        self.attribute("singletontag")
    }

    pub fn view_type(&self) -> Option<&str> {
        self.attribute("type")
    }

    /// Properties declared with `action`, in document order.
    pub fn properties_for<'a>(
        &'a self,
        action: &'a PropertyAction,
    ) -> impl Iterator<Item = &'a ViewProperty> + 'a {
        self.properties.iter().filter(move |p| &p.action == action)
    }
}

/// Parsed layout description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutTree {
    elements: Vec<LayoutElement>,
    views: Vec<ViewElement>,
    duplicates: Vec<(String, String)>,
}

impl LayoutTree {
    /// Parse a layout description.
    pub fn parse(xml: &str) -> Result<Self, LayoutParseError> {
        let doc = roxmltree::Document::parse(xml)?;
        let root = doc.root_element();
        if root.tag_name().name() != "layout" {
            return Err(LayoutParseError::UnexpectedRoot {
                name: root.tag_name().name().to_string(),
            });
        }

        let mut tree = LayoutTree::default();
        tree.push_element(root, None);
        tree.flatten_views();
        Ok(tree)
    }

    fn push_element(&mut self, node: roxmltree::Node<'_, '_>, parent: Option<ElementIndex>) {
        let name = node.tag_name().name().to_string();
        let attributes: BTreeMap<String, String> = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();
        let kind = element_kind(&name, &attributes);

        let text: String = node
            .children()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text())
            .collect();
        let text = text.trim();

        let index = self.elements.len();
        self.elements.push(LayoutElement {
            name,
            kind,
            attributes,
            text: (!text.is_empty()).then(|| text.to_string()),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.elements[parent].children.push(index);
        }

        for child in node.children().filter(|c| c.is_element()) {
            self.push_element(child, Some(index));
        }
    }

    fn flatten_views(&mut self) {
        let mut seen = HashSet::new();
        let mut next = self.next_view_element(None);
        while let Some(index) = next {
            let element = &self.elements[index];
            let properties = element
                .children
                .iter()
                .map(|&c| &self.elements[c])
                .filter(|c| c.kind == ElementKind::Property)
                .filter_map(|p| {
                    Some(ViewProperty {
                        name: p.attribute("name")?.to_string(),
                        action: PropertyAction::parse(p.attribute("action").unwrap_or("")),
                        value: p.text.clone().unwrap_or_default(),
                    })
                })
                .collect();
            let view = ViewElement {
                element: index,
                attributes: element.attributes.clone(),
                properties,
            };

            if let (Some(class), Some(tag)) = (view.class_name(), view.singleton_tag()) {
                if !seen.insert((class.to_string(), tag.to_string())) {
                    warn!(class, tag, "layout description declares the same view twice");
                    self.duplicates.push((class.to_string(), tag.to_string()));
                }
            }
            self.views.push(view);
            next = self.next_view_element(Some(index));
        }
    }

    /// Next `view` element in document order after `after` (or the first one
    /// when `after` is `None`): descendants first, then following siblings of
    /// the nearest ancestor that has any.
    pub fn next_view_element(&self, after: Option<ElementIndex>) -> Option<ElementIndex> {
        let Some(start) = after else {
            if self.elements.is_empty() {
                return None;
            }
            return self.first_view_in_subtree(0);
        };

        for &child in &self.elements.get(start)?.children {
            if let Some(found) = self.first_view_in_subtree(child) {
                return Some(found);
            }
        }

        let mut current = start;
        while let Some(parent) = self.elements[current].parent {
            let siblings = &self.elements[parent].children;
            let position = siblings.iter().position(|&s| s == current)?;
            for &sibling in &siblings[position + 1..] {
                if let Some(found) = self.first_view_in_subtree(sibling) {
                    return Some(found);
                }
            }
            current = parent;
        }
        None
    }

    fn first_view_in_subtree(&self, index: ElementIndex) -> Option<ElementIndex> {
        let element = &self.elements[index];
        if element.is_view() {
            return Some(index);
        }
        element
            .children
            .iter()
            .find_map(|&child| self.first_view_in_subtree(child))
    }

    pub fn root(&self) -> Option<&LayoutElement> {
        self.elements.first()
    }

    pub fn element(&self, index: ElementIndex) -> Option<&LayoutElement> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[LayoutElement] {
        &self.elements
    }

    /// All `view` elements in depth-first document order.
    pub fn view_elements(&self) -> &[ViewElement] {
        &self.views
    }

    /// `(class, singletontag)` pairs declared more than once.
    pub fn duplicate_views(&self) -> &[(String, String)] {
        &self.duplicates
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn element_kind(name: &str, attributes: &BTreeMap<String, String>) -> ElementKind {
    let flag = |key: &str| attributes.get(key).is_some_and(|v| v == "true");
    match name {
        "layout" => {
            let kind = match attributes.get("type") {
                None => LayoutKind::default(),
                Some(value) => LayoutKind::parse(value).unwrap_or_else(|| {
                    warn!(value = value.as_str(), "unknown layout type, using horizontal");
                    LayoutKind::default()
                }),
            };
            ElementKind::Layout {
                kind,
                split: flag("split"),
            }
        }
        "item" => ElementKind::Item {
            split_size: attributes.get("splitSize").and_then(|s| s.trim().parse().ok()),
            multiple: flag("multiple"),
        },
        "view" => ElementKind::View,
        "property" => ElementKind::Property,
        _ => ElementKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONVENTIONAL: &str = r#"
<layout type="vertical" split="true">
 <item splitSize="500">
  <view class="vtkDMMLViewNode" singletontag="1">
   <property name="viewlabel" action="default">1</property>
  </view>
 </item>
 <item splitSize="500">
  <layout type="horizontal">
   <item>
    <view class="vtkDMMLSliceNode" singletontag="Red">
     <property name="orientation" action="default">Axial</property>
     <property name="viewlabel" action="default">R</property>
     <property name="viewcolor" action="default">#F34A33</property>
    </view>
   </item>
   <item>
    <view class="vtkDMMLSliceNode" singletontag="Green">
     <property name="orientation" action="default">Coronal</property>
    </view>
   </item>
  </layout>
 </item>
</layout>"#;

    #[test]
    fn parses_structure() {
        let tree = LayoutTree::parse(CONVENTIONAL).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(
            root.kind,
            ElementKind::Layout {
                kind: LayoutKind::Vertical,
                split: true
            }
        );
        assert_eq!(root.children.len(), 2);
        let first_item = tree.element(root.children[0]).unwrap();
        assert_eq!(
            first_item.kind,
            ElementKind::Item {
                split_size: Some(500),
                multiple: false
            }
        );
    }

    #[test]
    fn flattens_views_in_document_order() {
        let tree = LayoutTree::parse(CONVENTIONAL).unwrap();
        let tags: Vec<_> = tree
            .view_elements()
            .iter()
            .map(|v| v.singleton_tag().unwrap())
            .collect();
        assert_eq!(tags, vec!["1", "Red", "Green"]);

        let red = &tree.view_elements()[1];
        assert_eq!(red.class_name(), Some("vtkDMMLSliceNode"));
        assert_eq!(red.properties.len(), 3);
        assert_eq!(red.properties[2].name, "viewcolor");
        assert_eq!(red.properties[2].value, "#F34A33");
        assert_eq!(red.properties[2].action, PropertyAction::Default);
    }

    #[test]
    fn next_view_element_walks_siblings_then_uncles() {
        let tree = LayoutTree::parse(CONVENTIONAL).unwrap();
        let mut walked = Vec::new();
        let mut next = tree.next_view_element(None);
        while let Some(index) = next {
            walked.push(index);
            next = tree.next_view_element(Some(index));
        }
        let flattened: Vec<_> = tree.view_elements().iter().map(|v| v.element).collect();
        assert_eq!(walked, flattened);
    }

    #[test]
    fn filters_properties_by_action() {
        let tree = LayoutTree::parse(
            r#"<layout><item><view class="vtkDMMLSliceNode" singletontag="Compare1">
                 <property name="lightboxrows" action="default">1</property>
                 <property name="lightboxcolumns" action="relayout">6</property>
               </view></item></layout>"#,
        )
        .unwrap();
        let view = &tree.view_elements()[0];
        let relayout: Vec<_> = view
            .properties_for(&PropertyAction::Relayout)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(relayout, vec!["lightboxcolumns"]);
    }

    #[test]
    fn reports_duplicate_views() {
        let tree = LayoutTree::parse(
            r#"<layout><item><view class="vtkDMMLSliceNode" singletontag="Red"/></item>
               <item><view class="vtkDMMLSliceNode" singletontag="Red"/></item></layout>"#,
        )
        .unwrap();
        assert_eq!(tree.view_elements().len(), 2);
        assert_eq!(
            tree.duplicate_views(),
            &[("vtkDMMLSliceNode".to_string(), "Red".to_string())]
        );
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(matches!(
            LayoutTree::parse("<layout><item></layout>"),
            Err(LayoutParseError::Xml(_))
        ));
        assert_eq!(
            LayoutTree::parse("<view class=\"vtkDMMLViewNode\"/>"),
            Err(LayoutParseError::UnexpectedRoot {
                name: "view".to_string()
            })
        );
    }

    #[test]
    fn keeps_unknown_attributes_and_elements() {
        let tree = LayoutTree::parse(
            r#"<layout type="tab"><extra/><item multiple="true">
                 <view class="vtkDMMLViewNode" singletontag="1" future="x"/>
               </item></layout>"#,
        )
        .unwrap();
        assert_eq!(tree.elements()[1].kind, ElementKind::Other);
        assert_eq!(tree.view_elements()[0].attribute("future"), Some("x"));
        assert_eq!(
            tree.elements()[2].kind,
            ElementKind::Item {
                split_size: None,
                multiple: true
            }
        );
    }
}
