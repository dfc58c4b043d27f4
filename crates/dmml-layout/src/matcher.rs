//! Find the scene view nodes a `view` element refers to.

use dmml_core::NodeId;
use dmml_scene::{NodeClass, Scene, VIEW_TYPE_ATTRIBUTE, ViewElement, ViewKind};
use tracing::warn;

/// `type` value that selects the 3D view without a `ViewType` attribute.
pub const MAIN_VIEW_TYPE: &str = "main";

/// Existing nodes matching `element`, in scene order.
///
/// Returns nothing when the element has no class, or when its singleton tag
/// is shared by more than one node (an inconsistent scene).
pub fn match_view_element(scene: &Scene, element: &ViewElement) -> Vec<NodeId> {
    let Some(class) = element.class_name() else {
        return Vec::new();
    };
    let mut candidates = scene.nodes_by_class(class);

    if let Some(tag) = element.singleton_tag() {
        candidates.retain(|&id| {
            scene
                .node(id)
                .is_some_and(|n| n.singleton_tag().unwrap_or("") == tag)
        });
        if candidates.len() > 1 {
            warn!(
                class,
                tag,
                count = candidates.len(),
                "several nodes share a singleton tag; treating as unmatched"
            );
            return Vec::new();
        }
    }

    let is_three_d = scene.registry().lookup(class) == Some(NodeClass::View(ViewKind::ThreeD));
    if let (true, Some(view_type)) = (is_three_d, element.view_type()) {
        candidates.retain(|&id| {
            let attribute = scene.node(id).and_then(|n| n.attribute(VIEW_TYPE_ATTRIBUTE));
            match attribute {
                None => view_type == MAIN_VIEW_TYPE,
                Some(value) => value == view_type,
            }
        });
    }

    candidates
}
