//! Compare layouts, generated from the layout node's compare-grid settings.

use dmml_scene::{BuiltinLayout, LayoutId, LayoutKind, LayoutNode, SLICE_VIEW_CLASS};

use crate::templates::{layout, property, red, three_d, view};

pub const COMPARE_COLOR: &str = "#E17012";

/// Grid dimensions the compare layouts are generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareGrid {
    pub rows: u32,
    pub columns: u32,
    pub lightbox_rows: u32,
    pub lightbox_columns: u32,
}

impl CompareGrid {
    pub fn from_layout_node(node: &LayoutNode) -> Self {
        Self {
            rows: node.number_of_compare_view_rows(),
            columns: node.number_of_compare_view_columns(),
            lightbox_rows: node.number_of_compare_view_lightbox_rows(),
            lightbox_columns: node.number_of_compare_view_lightbox_columns(),
        }
    }
}

impl Default for CompareGrid {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            lightbox_rows: 1,
            lightbox_columns: 1,
        }
    }
}

/// A compare slice view tagged `Compare{index}` with the given lightbox.
pub fn compare_view(index: u32, lightbox_rows: u32, lightbox_columns: u32) -> String {
    let label = index.to_string();
    let rows = lightbox_rows.to_string();
    let columns = lightbox_columns.to_string();
    view(
        SLICE_VIEW_CLASS,
        Some(&format!("Compare{index}")),
        None,
        &[
            property("orientation", "default", "Axial"),
            property("viewlabel", "default", &label),
            property("viewcolor", "default", COMPARE_COLOR),
            property("lightboxrows", "default", &rows),
            property("lightboxcolumns", "default", &columns),
            property("lightboxrows", "relayout", &rows),
            property("lightboxcolumns", "relayout", &columns),
        ],
    )
}

/// `grid.rows` compare views stacked vertically, each a one-row lightbox.
pub fn stacked_rows(grid: &CompareGrid) -> String {
    let views: Vec<String> = (1..=grid.rows)
        .map(|i| compare_view(i, 1, grid.lightbox_columns))
        .collect();
    layout(LayoutKind::Vertical, &views)
}

/// `grid.columns` compare views side by side, each a one-column lightbox.
pub fn stacked_columns(grid: &CompareGrid) -> String {
    let views: Vec<String> = (1..=grid.columns)
        .map(|i| compare_view(i, grid.lightbox_rows, 1))
        .collect();
    layout(LayoutKind::Horizontal, &views)
}

/// `Red` and 3D `1` above a `rows x columns` grid of compare views,
/// numbered row-major.
pub fn grid(grid: &CompareGrid) -> String {
    let rows: Vec<String> = (0..grid.rows)
        .map(|r| {
            let cells: Vec<String> = (1..=grid.columns)
                .map(|c| compare_view(r * grid.columns + c, 1, 1))
                .collect();
            layout(LayoutKind::Horizontal, &cells)
        })
        .collect();
    layout(
        LayoutKind::Vertical,
        &[
            layout(LayoutKind::Horizontal, &[red(), three_d("1")]),
            layout(LayoutKind::Vertical, &rows),
        ],
    )
}

/// The three compare descriptions keyed by layout id.
pub fn compare_descriptions(grid_settings: &CompareGrid) -> [(LayoutId, String); 3] {
    [
        (BuiltinLayout::Compare.id(), stacked_rows(grid_settings)),
        (BuiltinLayout::CompareWidescreen.id(), stacked_columns(grid_settings)),
        (BuiltinLayout::CompareGrid.id(), grid(grid_settings)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmml_scene::{LayoutTree, PropertyAction};

    fn view_tags(xml: &str) -> Vec<String> {
        LayoutTree::parse(xml)
            .unwrap()
            .view_elements()
            .iter()
            .map(|v| v.singleton_tag().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn grid_numbers_row_major() {
        let settings = CompareGrid {
            rows: 2,
            columns: 3,
            ..CompareGrid::default()
        };
        assert_eq!(
            view_tags(&grid(&settings)),
            ["Red", "1", "Compare1", "Compare2", "Compare3", "Compare4", "Compare5", "Compare6"]
        );
    }

    #[test]
    fn stacked_layouts_follow_their_dimension() {
        let settings = CompareGrid {
            rows: 3,
            columns: 2,
            lightbox_rows: 4,
            lightbox_columns: 5,
        };
        assert_eq!(view_tags(&stacked_rows(&settings)).len(), 3);
        assert_eq!(view_tags(&stacked_columns(&settings)).len(), 2);
    }

    #[test]
    fn compare_view_lightbox_is_relayout() {
        let tree = LayoutTree::parse(&stacked_rows(&CompareGrid {
            lightbox_columns: 6,
            ..CompareGrid::default()
        }))
        .unwrap();
        let element = &tree.view_elements()[0];
        let relayout: Vec<(&str, &str)> = element
            .properties_for(&PropertyAction::Relayout)
            .map(|p| (p.name.as_str(), p.value.as_str()))
            .collect();
        assert_eq!(relayout, [("lightboxrows", "1"), ("lightboxcolumns", "6")]);
    }

    #[test]
    fn descriptions_cover_the_three_ids() {
        let ids: Vec<LayoutId> = compare_descriptions(&CompareGrid::default())
            .iter()
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(ids, [12, 17, 23]);
    }
}
