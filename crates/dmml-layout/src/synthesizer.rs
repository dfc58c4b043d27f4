//! Create the view node a `view` element describes.

use dmml_scene::{Scene, SceneNode, VIEW_TYPE_ATTRIBUTE, ViewElement, ViewNode};

use crate::error::{LayoutError, LayoutResult};
use crate::matcher::MAIN_VIEW_TYPE;

/// Build a new, uninserted view node with the identity `element` declares.
/// Default properties are not applied.
///
/// `type="main"` is not stored: the matcher reads a missing `ViewType` as
/// main, so the node is found again on the next pass.
pub fn synthesize_view_node(scene: &Scene, element: &ViewElement) -> LayoutResult<ViewNode> {
    let class = element.class_name().ok_or(LayoutError::MissingClass)?;
    let node = scene
        .create_node_by_class(class)
        .ok_or_else(|| LayoutError::UnknownClass {
            class: class.to_string(),
        })?;
    let SceneNode::View(mut view) = node else {
        return Err(LayoutError::NotAView {
            class: class.to_string(),
        });
    };

    if let Some(view_type) = element.view_type() {
        if view_type != MAIN_VIEW_TYPE {
            view.set_attribute(VIEW_TYPE_ATTRIBUTE, Some(view_type));
        }
    }
    if let Some(tag) = element.singleton_tag() {
        view.set_singleton_tag(Some(tag));
        view.set_name(view.kind().name_for_tag(tag));
    }
    Ok(view)
}
