//! Built-in layout descriptions.
//!
//! Every layout node gets its own copy of these at seeding time. The compare
//! layouts are parameterized and live in [`crate::compare`].

use dmml_scene::{
    BuiltinLayout, LayoutKind, PLOT_VIEW_CLASS, SLICE_VIEW_CLASS, TABLE_VIEW_CLASS,
    THREE_D_VIEW_CLASS,
};

pub const RED_COLOR: &str = "#F34A33";
pub const YELLOW_COLOR: &str = "#EDD54C";
pub const GREEN_COLOR: &str = "#6EB04B";
pub const THREE_D_COLOR: &str = "#7483E9";

/// Colors for the numbered slice views (`Slice4` onwards), cycled.
const EXTRA_SLICE_COLORS: [&str; 6] = [
    "#8C8C8C", "#E1A9C6", "#6F9BC7", "#C79E5E", "#A77CC0", "#5EB7A3",
];

// --- element builders ---

/// Escape text for use inside a double-quoted attribute or character data.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// `<property name=".." action="..">value</property>`
pub fn property(name: &str, action: &str, value: &str) -> String {
    format!(
        r#"<property name="{}" action="{}">{}</property>"#,
        escape(name),
        escape(action),
        escape(value)
    )
}

/// A `view` element. `properties` are pre-rendered `property` elements.
pub fn view(class: &str, tag: Option<&str>, view_type: Option<&str>, properties: &[String]) -> String {
    let mut out = format!(r#"<view class="{}""#, escape(class));
    if let Some(tag) = tag {
        out.push_str(&format!(r#" singletontag="{}""#, escape(tag)));
    }
    if let Some(view_type) = view_type {
        out.push_str(&format!(r#" type="{}""#, escape(view_type)));
    }
    if properties.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');
        for p in properties {
            out.push_str(p);
        }
        out.push_str("</view>");
    }
    out
}

pub fn item(content: &str) -> String {
    format!("<item>{content}</item>")
}

/// A `layout` element wrapping each of `contents` in its own `item`.
pub fn layout<S: AsRef<str>>(kind: LayoutKind, contents: &[S]) -> String {
    layout_element(kind, false, contents)
}

fn split_layout<S: AsRef<str>>(kind: LayoutKind, contents: &[S]) -> String {
    layout_element(kind, true, contents)
}

fn layout_element<S: AsRef<str>>(kind: LayoutKind, split: bool, contents: &[S]) -> String {
    let mut out = format!(r#"<layout type="{}""#, kind.as_str());
    if split {
        out.push_str(r#" split="true""#);
    }
    out.push('>');
    for content in contents {
        out.push_str(&item(content.as_ref()));
    }
    out.push_str("</layout>");
    out
}

fn row<S: AsRef<str>>(contents: &[S]) -> String {
    layout(LayoutKind::Horizontal, contents)
}

fn column<S: AsRef<str>>(contents: &[S]) -> String {
    layout(LayoutKind::Vertical, contents)
}

// --- standard views ---

pub fn slice_view(tag: &str, orientation: &str, label: &str, color: &str) -> String {
    view(
        SLICE_VIEW_CLASS,
        Some(tag),
        None,
        &[
            property("orientation", "default", orientation),
            property("viewlabel", "default", label),
            property("viewcolor", "default", color),
        ],
    )
}

pub fn red() -> String {
    slice_view("Red", "Axial", "R", RED_COLOR)
}

pub fn yellow() -> String {
    slice_view("Yellow", "Sagittal", "Y", YELLOW_COLOR)
}

pub fn green() -> String {
    slice_view("Green", "Coronal", "G", GREEN_COLOR)
}

/// `Slice4`, `Slice5`, ... for the multi-slice grids.
fn numbered_slice(n: usize) -> String {
    let color = EXTRA_SLICE_COLORS[(n - 4) % EXTRA_SLICE_COLORS.len()];
    slice_view(&format!("Slice{n}"), "Axial", &n.to_string(), color)
}

pub fn three_d(tag: &str) -> String {
    view(
        THREE_D_VIEW_CLASS,
        Some(tag),
        None,
        &[
            property("viewlabel", "default", tag),
            property("viewcolor", "default", THREE_D_COLOR),
        ],
    )
}

pub fn table() -> String {
    view(
        TABLE_VIEW_CLASS,
        Some("TableView1"),
        None,
        &[property("viewlabel", "default", "T")],
    )
}

pub fn plot() -> String {
    view(
        PLOT_VIEW_CLASS,
        Some("PlotView1"),
        None,
        &[property("viewlabel", "default", "P")],
    )
}

/// The `Red`, `Yellow`, `Green` slices followed by numbered slices up to
/// `count` views, laid out `per_row` to a row.
fn slice_grid(count: usize, per_row: usize) -> String {
    let mut slices = vec![red(), yellow(), green()];
    slices.extend((4..=count).map(numbered_slice));
    let rows: Vec<String> = slices.chunks(per_row).map(row).collect();
    column(&rows)
}

// --- the table ---

/// Layouts that are registered with a fixed description.
pub const STATIC_LAYOUTS: [BuiltinLayout; 31] = [
    BuiltinLayout::Conventional,
    BuiltinLayout::FourUp,
    BuiltinLayout::OneUp3D,
    BuiltinLayout::OneUpRedSlice,
    BuiltinLayout::OneUpYellowSlice,
    BuiltinLayout::OneUpGreenSlice,
    BuiltinLayout::Tabbed3D,
    BuiltinLayout::TabbedSlice,
    BuiltinLayout::Dual3D,
    BuiltinLayout::ConventionalWidescreen,
    BuiltinLayout::Triple3DEndoscopy,
    BuiltinLayout::ThreeOverThree,
    BuiltinLayout::FourOverFour,
    BuiltinLayout::ConventionalQuantitative,
    BuiltinLayout::FourUpQuantitative,
    BuiltinLayout::OneUpQuantitative,
    BuiltinLayout::TwoOverTwo,
    BuiltinLayout::ThreeOverThreeQuantitative,
    BuiltinLayout::SideBySide,
    BuiltinLayout::FourByThreeSlice,
    BuiltinLayout::FourByTwoSlice,
    BuiltinLayout::FiveByTwoSlice,
    BuiltinLayout::ThreeByThreeSlice,
    BuiltinLayout::FourUpTable,
    BuiltinLayout::ThreeDTable,
    BuiltinLayout::ConventionalPlot,
    BuiltinLayout::FourUpPlot,
    BuiltinLayout::FourUpPlotTable,
    BuiltinLayout::OneUpPlot,
    BuiltinLayout::ThreeOverThreePlot,
    BuiltinLayout::DualMonitorFourUp,
];

/// Fixed description for `builtin`, or `None` for layouts that are generated
/// (compare, maximized, custom) or have no description at all.
pub fn builtin_description(builtin: BuiltinLayout) -> Option<String> {
    use BuiltinLayout as L;
    use LayoutKind::{Horizontal, Tab, Vertical};

    let four_up = || column(&[row(&[red(), three_d("1")]), row(&[green(), yellow()])]);

    let xml = match builtin {
        L::Conventional => split_layout(
            Vertical,
            &[three_d("1"), row(&[red(), green(), yellow()])],
        ),
        L::FourUp => four_up(),
        L::OneUp3D => row(&[three_d("1")]),
        L::OneUpRedSlice => row(&[red()]),
        L::OneUpYellowSlice => row(&[yellow()]),
        L::OneUpGreenSlice => row(&[green()]),
        L::Tabbed3D => layout(Tab, &[three_d("1")]),
        L::TabbedSlice => layout(Tab, &[red(), yellow(), green()]),
        L::Dual3D => column(&[
            row(&[three_d("1"), three_d("2")]),
            row(&[red(), yellow(), green()]),
        ]),
        L::ConventionalWidescreen => split_layout(
            Horizontal,
            &[three_d("1"), column(&[red(), yellow(), green()])],
        ),
        L::Triple3DEndoscopy => column(&[
            row(&[three_d("1"), column(&[three_d("2"), three_d("3")])]),
            row(&[red(), yellow(), green()]),
        ]),
        L::ThreeOverThree => slice_grid(6, 3),
        L::FourOverFour => slice_grid(8, 4),
        L::ConventionalQuantitative => column(&[
            row(&[three_d("1"), plot()]),
            row(&[red(), yellow(), green()]),
        ]),
        L::FourUpQuantitative => column(&[row(&[red(), plot()]), row(&[yellow(), green()])]),
        L::OneUpQuantitative | L::OneUpPlot => row(&[plot()]),
        L::TwoOverTwo => column(&[row(&[red(), yellow()]), row(&[green(), numbered_slice(4)])]),
        L::ThreeOverThreeQuantitative => column(&[
            row(&[red(), yellow(), green()]),
            row(&[numbered_slice(4), numbered_slice(5), plot()]),
        ]),
        L::SideBySide => row(&[red(), yellow()]),
        L::FourByThreeSlice => slice_grid(12, 4),
        L::FourByTwoSlice => slice_grid(8, 4),
        L::FiveByTwoSlice => slice_grid(10, 5),
        L::ThreeByThreeSlice => slice_grid(9, 3),
        L::FourUpTable => column(&[four_up(), table()]),
        L::ThreeDTable => column(&[three_d("1"), table()]),
        L::ConventionalPlot => column(&[
            three_d("1"),
            row(&[red(), yellow(), green(), plot()]),
        ]),
        L::FourUpPlot => column(&[four_up(), plot()]),
        L::FourUpPlotTable => column(&[four_up(), row(&[plot(), table()])]),
        L::ThreeOverThreePlot => column(&[
            row(&[red(), yellow(), green()]),
            row(&[three_d("1"), plot(), table()]),
        ]),
        L::DualMonitorFourUp => row(&[four_up(), three_d("2")]),
        L::Initial
        | L::Default
        | L::Compare
        | L::SideBySideLightbox
        | L::None
        | L::CompareWidescreen
        | L::CompareGrid
        | L::Maximized
        | L::Custom
        | L::User => return None,
    };
    Some(xml)
}

/// Single-view layout showing one view node.
pub fn maximized_description(class: &str, tag: Option<&str>, view_type: Option<&str>) -> String {
    row(&[view(class, tag, view_type, &[])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmml_scene::LayoutTree;
    use std::collections::BTreeSet;

    fn tags(xml: &str) -> Vec<(String, String)> {
        let tree = LayoutTree::parse(xml).unwrap();
        tree.view_elements()
            .iter()
            .map(|v| {
                (
                    v.class_name().unwrap_or_default().to_string(),
                    v.singleton_tag().unwrap_or_default().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn every_static_layout_parses_with_unique_views() {
        for layout in STATIC_LAYOUTS {
            let xml = builtin_description(layout).unwrap();
            let tree = LayoutTree::parse(&xml).unwrap();
            assert!(tree.duplicate_views().is_empty(), "{layout:?} has duplicates");
            let views = tags(&xml);
            let unique: BTreeSet<_> = views.iter().collect();
            assert_eq!(unique.len(), views.len(), "{layout:?}");
            assert!(!views.is_empty(), "{layout:?}");
        }
    }

    #[test]
    fn conventional_order() {
        let xml = builtin_description(BuiltinLayout::Conventional).unwrap();
        let order: Vec<String> = tags(&xml).into_iter().map(|(_, t)| t).collect();
        assert_eq!(order, ["1", "Red", "Green", "Yellow"]);
    }

    #[test]
    fn four_up_order() {
        let xml = builtin_description(BuiltinLayout::FourUp).unwrap();
        let order: Vec<String> = tags(&xml).into_iter().map(|(_, t)| t).collect();
        assert_eq!(order, ["Red", "1", "Green", "Yellow"]);
    }

    #[test]
    fn generated_layouts_have_no_static_text() {
        assert!(builtin_description(BuiltinLayout::CompareGrid).is_none());
        assert!(builtin_description(BuiltinLayout::None).is_none());
        assert!(builtin_description(BuiltinLayout::Maximized).is_none());
    }

    #[test]
    fn attribute_text_is_escaped() {
        let xml = maximized_description("vtkDMMLSliceNode", Some("a\"<b>"), None);
        assert_eq!(tags(&xml), vec![("vtkDMMLSliceNode".into(), "a\"<b>".into())]);
    }

    #[test]
    fn slice_grid_sizes() {
        assert_eq!(tags(&builtin_description(BuiltinLayout::FourByThreeSlice).unwrap()).len(), 12);
        assert_eq!(tags(&builtin_description(BuiltinLayout::FiveByTwoSlice).unwrap()).len(), 10);
        assert_eq!(tags(&builtin_description(BuiltinLayout::ThreeByThreeSlice).unwrap()).len(), 9);
    }
}
