//! Reconcile a parsed layout against the scene's view nodes.
//!
//! Both passes walk the `view` elements in document order. Structural
//! `layout` and `item` elements only affect where views are shown, not which.

use dmml_core::NodeId;
use dmml_scene::{LayoutTree, PropertyAction, Scene, SceneNode, ViewElement};
use tracing::{debug, warn};

use crate::matcher::match_view_element;
use crate::properties::apply_properties;
use crate::synthesizer::synthesize_view_node;

/// Outcome of [`create_missing_views`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Nodes created for elements nothing matched.
    pub created: Vec<NodeId>,
    /// Existing nodes that had `relayout` properties applied.
    pub relayout: Vec<NodeId>,
    /// Elements skipped because no node could be made for them.
    pub skipped: usize,
}

/// Make sure every view `tree` refers to exists.
///
/// The first node matching an element gets the element's `relayout`
/// properties; missing ones are created and get its `default` properties. Running this twice creates
/// nothing the second time.
pub fn create_missing_views(scene: &mut Scene, tree: &LayoutTree) -> Reconciliation {
    let mut outcome = Reconciliation::default();
    for element in tree.view_elements() {
        match match_view_element(scene, element).first() {
            Some(&id) => {
                apply_to(scene, id, element, &PropertyAction::Relayout);
                outcome.relayout.push(id);
            }
            None => match create_view(scene, element) {
                Some(id) => outcome.created.push(id),
                None => outcome.skipped += 1,
            },
        }
    }
    outcome
}

/// The views `tree` shows, one per matched `view` element, in document
/// order. An element matching several nodes shows the first of them.
/// Nothing is created or modified.
pub fn views_from_layout(scene: &Scene, tree: &LayoutTree) -> Vec<NodeId> {
    tree.view_elements()
        .iter()
        .filter_map(|element| match_view_element(scene, element).first().copied())
        .collect()
}

fn create_view(scene: &mut Scene, element: &ViewElement) -> Option<NodeId> {
    let view = match synthesize_view_node(scene, element) {
        Ok(view) => view,
        Err(err) => {
            warn!(
                error = %err,
                class = element.class_name(),
                tag = element.singleton_tag(),
                "cannot create view for layout element; skipped"
            );
            return None;
        }
    };
    let id = scene.add_node(SceneNode::View(view));
    debug!(%id, class = element.class_name(), tag = element.singleton_tag(), "created view");
    apply_to(scene, id, element, &PropertyAction::Default);
    Some(id)
}

fn apply_to(scene: &mut Scene, id: NodeId, element: &ViewElement, action: &PropertyAction) {
    if let Err(err) = scene.modify_view_node(id, |view| apply_properties(view, element, action)) {
        warn!(error = %err, "cannot apply view properties");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmml_scene::{SceneEvent, ViewKind, ViewNode};

    const TWO_SLICES: &str = r#"
        <layout type="vertical">
          <item>
            <view class="vtkDMMLSliceNode" singletontag="Red">
              <property name="viewlabel" action="default">R</property>
              <property name="lightboxrows" action="relayout">2</property>
            </view>
          </item>
          <item>
            <layout type="horizontal">
              <item><view singletontag="orphan"/></item>
              <item><view class="vtkDMMLSliceNode" singletontag="Green"/></item>
            </layout>
          </item>
        </layout>"#;

    #[test]
    fn creates_missing_and_skips_malformed() {
        let mut scene = Scene::new();
        let tree = LayoutTree::parse(TWO_SLICES).unwrap();
        let outcome = create_missing_views(&mut scene, &tree);

        assert_eq!(outcome.created.len(), 2);
        assert_eq!(outcome.skipped, 1);
        let red = outcome.created[0];
        let view = scene.view_node(red).unwrap();
        assert_eq!(view.layout_label(), "R");
        // relayout properties are not applied on creation
        assert_eq!(view.slice_settings().unwrap().lightbox_rows, 1);
    }

    #[test]
    fn existing_views_get_relayout_only() {
        let mut scene = Scene::new();
        let mut red = ViewNode::with_tag(ViewKind::Slice, "Red");
        red.set_layout_label("custom");
        let red = scene.add_node(red.into());

        let tree = LayoutTree::parse(TWO_SLICES).unwrap();
        let outcome = create_missing_views(&mut scene, &tree);
        assert_eq!(outcome.relayout, vec![red]);
        let view = scene.view_node(red).unwrap();
        assert_eq!(view.layout_label(), "custom");
        assert_eq!(view.slice_settings().unwrap().lightbox_rows, 2);
    }

    #[test]
    fn second_pass_is_quiet() {
        let mut scene = Scene::new();
        let tree = LayoutTree::parse(TWO_SLICES).unwrap();
        create_missing_views(&mut scene, &tree);
        let first = views_from_layout(&scene, &tree);
        scene.take_events();

        let outcome = create_missing_views(&mut scene, &tree);
        assert!(outcome.created.is_empty());
        assert_eq!(views_from_layout(&scene, &tree), first);
        let events = scene.take_events();
        assert!(
            events
                .iter()
                .all(|e| !matches!(e, SceneEvent::NodeAdded(_))),
            "{events:?}"
        );
    }

    #[test]
    fn untagged_element_maps_to_one_view() {
        let mut scene = Scene::new();
        let first = scene.add_node(ViewNode::new(ViewKind::ThreeD).into());
        let second = scene.add_node(ViewNode::with_tag(ViewKind::ThreeD, "1").into());
        let tree = LayoutTree::parse(
            r#"<layout type="horizontal"><item><view class="vtkDMMLViewNode"><property name="viewlabel" action="relayout">A</property></view></item></layout>"#,
        )
        .unwrap();

        let outcome = create_missing_views(&mut scene, &tree);
        assert_eq!(outcome.relayout, vec![first]);
        assert_eq!(scene.view_node(first).unwrap().layout_label(), "A");
        assert_ne!(scene.view_node(second).unwrap().layout_label(), "A");
        assert_eq!(views_from_layout(&scene, &tree), vec![first]);
    }

    #[test]
    fn collection_is_in_document_order() {
        let mut scene = Scene::new();
        let green = scene.add_node(ViewNode::with_tag(ViewKind::Slice, "Green").into());
        let red = scene.add_node(ViewNode::with_tag(ViewKind::Slice, "Red").into());
        let tree = LayoutTree::parse(TWO_SLICES).unwrap();
        assert_eq!(views_from_layout(&scene, &tree), vec![red, green]);
    }
}
