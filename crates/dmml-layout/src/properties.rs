//! Apply the `property` children of a `view` element to a view node.

use dmml_core::Rgb;
use dmml_scene::{PropertyAction, ViewElement, ViewNode, ViewProperty};
use tracing::warn;

/// Apply every property of `element` declared with `action`, in document
/// order. Properties that do not fit the node or do not parse are skipped.
/// Returns how many were applied.
pub fn apply_properties(view: &mut ViewNode, element: &ViewElement, action: &PropertyAction) -> usize {
    let mut applied = 0;
    view.modified_state_mut().start_modify();
    for property in element.properties_for(action) {
        if apply_property(view, property) {
            applied += 1;
        }
    }
    view.modified_state_mut().end_modify();
    applied
}

fn apply_property(view: &mut ViewNode, property: &ViewProperty) -> bool {
    let value = property.value.trim();
    match property.name.as_str() {
        "orientation" => {
            let result = view.set_orientation(value);
            slice_only(view, property, result)
        }
        "viewgroup" => match value.parse::<i32>() {
            Ok(group) => {
                view.set_view_group(group);
                true
            }
            Err(_) => unparseable(property),
        },
        "viewlabel" => {
            view.set_layout_label(value);
            true
        }
        "viewcolor" => match Rgb::from_hex(value) {
            Some(color) => {
                view.set_layout_color(color);
                true
            }
            None => unparseable(property),
        },
        "lightboxrows" | "lightboxcolumns" => match value.parse::<u32>() {
            Ok(n) if n > 0 => {
                let result = if property.name == "lightboxrows" {
                    view.set_lightbox_rows(n)
                } else {
                    view.set_lightbox_columns(n)
                };
                slice_only(view, property, result)
            }
            _ => unparseable(property),
        },
        other => {
            warn!(property = other, "unknown view property; skipped");
            false
        }
    }
}

/// `result` is `None` when a slice-only setter was called on another view.
fn slice_only(view: &ViewNode, property: &ViewProperty, result: Option<bool>) -> bool {
    if result.is_none() {
        warn!(
            property = %property.name,
            class = view.class_name(),
            "property applies to slice views only; skipped"
        );
    }
    result.is_some()
}

fn unparseable(property: &ViewProperty) -> bool {
    warn!(
        property = %property.name,
        value = %property.value,
        "unparseable property value; skipped"
    );
    false
}
