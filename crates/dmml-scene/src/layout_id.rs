//! Layout identifiers.
//!
//! Layout ids are persisted in scene files, so every value below is fixed:
//! id 2 means the conventional layout in every release.

/// Integer id selecting a layout description.
pub type LayoutId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinLayout {
    Initial,
    Default,
    Conventional,
    FourUp,
    OneUp3D,
    OneUpRedSlice,
    OneUpYellowSlice,
    OneUpGreenSlice,
    Tabbed3D,
    TabbedSlice,
    Compare,
    SideBySideLightbox,
    None,
    Dual3D,
    ConventionalWidescreen,
    CompareWidescreen,
    Triple3DEndoscopy,
    ThreeOverThree,
    FourOverFour,
    CompareGrid,
    ConventionalQuantitative,
    FourUpQuantitative,
    OneUpQuantitative,
    TwoOverTwo,
    ThreeOverThreeQuantitative,
    SideBySide,
    FourByThreeSlice,
    FourByTwoSlice,
    FiveByTwoSlice,
    ThreeByThreeSlice,
    FourUpTable,
    ThreeDTable,
    ConventionalPlot,
    FourUpPlot,
    FourUpPlotTable,
    OneUpPlot,
    ThreeOverThreePlot,
    DualMonitorFourUp,
    Maximized,
    Custom,
    User,
}

impl BuiltinLayout {
    pub const ALL: [BuiltinLayout; 41] = [
        BuiltinLayout::Initial,
        BuiltinLayout::Default,
        BuiltinLayout::Conventional,
        BuiltinLayout::FourUp,
        BuiltinLayout::OneUp3D,
        BuiltinLayout::OneUpRedSlice,
        BuiltinLayout::OneUpYellowSlice,
        BuiltinLayout::OneUpGreenSlice,
        BuiltinLayout::Tabbed3D,
        BuiltinLayout::TabbedSlice,
        BuiltinLayout::Compare,
        BuiltinLayout::SideBySideLightbox,
        BuiltinLayout::None,
        BuiltinLayout::Dual3D,
        BuiltinLayout::ConventionalWidescreen,
        BuiltinLayout::CompareWidescreen,
        BuiltinLayout::Triple3DEndoscopy,
        BuiltinLayout::ThreeOverThree,
        BuiltinLayout::FourOverFour,
        BuiltinLayout::CompareGrid,
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
        BuiltinLayout::Maximized,
        BuiltinLayout::Custom,
        BuiltinLayout::User,
    ];

    pub const fn id(self) -> LayoutId {
        match self {
            BuiltinLayout::Initial => 0,
            BuiltinLayout::Default => 1,
            BuiltinLayout::Conventional => 2,
            BuiltinLayout::FourUp => 3,
            BuiltinLayout::OneUp3D => 4,
            BuiltinLayout::OneUpRedSlice => 6,
            BuiltinLayout::OneUpYellowSlice => 7,
            BuiltinLayout::OneUpGreenSlice => 8,
            BuiltinLayout::Tabbed3D => 9,
            BuiltinLayout::TabbedSlice => 10,
            BuiltinLayout::Compare => 12,
            BuiltinLayout::SideBySideLightbox => 13,
            BuiltinLayout::None => 14,
            BuiltinLayout::Dual3D => 15,
            BuiltinLayout::ConventionalWidescreen => 16,
            BuiltinLayout::CompareWidescreen => 17,
            BuiltinLayout::Triple3DEndoscopy => 19,
            BuiltinLayout::ThreeOverThree => 21,
            BuiltinLayout::FourOverFour => 22,
            BuiltinLayout::CompareGrid => 23,
            BuiltinLayout::ConventionalQuantitative => 24,
            BuiltinLayout::FourUpQuantitative => 25,
            BuiltinLayout::OneUpQuantitative => 26,
            BuiltinLayout::TwoOverTwo => 27,
            BuiltinLayout::ThreeOverThreeQuantitative => 28,
            BuiltinLayout::SideBySide => 29,
            BuiltinLayout::FourByThreeSlice => 30,
            BuiltinLayout::FourByTwoSlice => 31,
            BuiltinLayout::FiveByTwoSlice => 32,
            BuiltinLayout::ThreeByThreeSlice => 33,
            BuiltinLayout::FourUpTable => 34,
            BuiltinLayout::ThreeDTable => 35,
            BuiltinLayout::ConventionalPlot => 36,
            BuiltinLayout::FourUpPlot => 37,
            BuiltinLayout::FourUpPlotTable => 38,
            BuiltinLayout::OneUpPlot => 39,
            BuiltinLayout::ThreeOverThreePlot => 40,
            BuiltinLayout::DualMonitorFourUp => 42,
            BuiltinLayout::Maximized => 98,
            BuiltinLayout::Custom => 100,
            BuiltinLayout::User => 1000,
        }
    }

    pub fn from_id(id: LayoutId) -> Option<Self> {
        Self::ALL.iter().copied().find(|layout| layout.id() == id)
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinLayout::Initial => "Initial view",
            BuiltinLayout::Default => "Default view",
            BuiltinLayout::Conventional => "Conventional",
            BuiltinLayout::FourUp => "Four-Up",
            BuiltinLayout::OneUp3D => "3D only",
            BuiltinLayout::OneUpRedSlice => "Red slice only",
            BuiltinLayout::OneUpYellowSlice => "Yellow slice only",
            BuiltinLayout::OneUpGreenSlice => "Green slice only",
            BuiltinLayout::Tabbed3D => "Tabbed 3D",
            BuiltinLayout::TabbedSlice => "Tabbed slice",
            BuiltinLayout::Compare => "Compare",
            BuiltinLayout::SideBySideLightbox => "Side by side lightbox",
            BuiltinLayout::None => "None",
            BuiltinLayout::Dual3D => "Dual 3D",
            BuiltinLayout::ConventionalWidescreen => "Conventional widescreen",
            BuiltinLayout::CompareWidescreen => "Compare widescreen",
            BuiltinLayout::Triple3DEndoscopy => "Triple 3D endoscopy",
            BuiltinLayout::ThreeOverThree => "Three over three",
            BuiltinLayout::FourOverFour => "Four over four",
            BuiltinLayout::CompareGrid => "Compare grid",
            BuiltinLayout::ConventionalQuantitative => "Conventional quantitative",
            BuiltinLayout::FourUpQuantitative => "Four-Up quantitative",
            BuiltinLayout::OneUpQuantitative => "Quantitative only",
            BuiltinLayout::TwoOverTwo => "Two over two",
            BuiltinLayout::ThreeOverThreeQuantitative => "Three over three quantitative",
            BuiltinLayout::SideBySide => "Side by side",
            BuiltinLayout::FourByThreeSlice => "Four by three slice",
            BuiltinLayout::FourByTwoSlice => "Four by two slice",
            BuiltinLayout::FiveByTwoSlice => "Five by two slice",
            BuiltinLayout::ThreeByThreeSlice => "Three by three slice",
            BuiltinLayout::FourUpTable => "Four-Up table",
            BuiltinLayout::ThreeDTable => "3D table",
            BuiltinLayout::ConventionalPlot => "Conventional plot",
            BuiltinLayout::FourUpPlot => "Four-Up plot",
            BuiltinLayout::FourUpPlotTable => "Four-Up plot table",
            BuiltinLayout::OneUpPlot => "Plot only",
            BuiltinLayout::ThreeOverThreePlot => "Three over three plot",
            BuiltinLayout::DualMonitorFourUp => "Dual monitor four-up",
            BuiltinLayout::Maximized => "Maximized view",
            BuiltinLayout::Custom => "Custom",
            BuiltinLayout::User => "User",
        }
    }
}

impl From<BuiltinLayout> for LayoutId {
    fn from(layout: BuiltinLayout) -> Self {
        layout.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn persisted_ids_are_fixed() {
        assert_eq!(BuiltinLayout::Conventional.id(), 2);
        assert_eq!(BuiltinLayout::FourUp.id(), 3);
        assert_eq!(BuiltinLayout::OneUp3D.id(), 4);
        assert_eq!(BuiltinLayout::None.id(), 14);
        assert_eq!(BuiltinLayout::ConventionalWidescreen.id(), 16);
        assert_eq!(BuiltinLayout::CompareGrid.id(), 23);
        assert_eq!(BuiltinLayout::Maximized.id(), 98);
    }

    #[test]
    fn ids_are_unique_and_round_trip() {
        let mut seen = HashSet::new();
        for layout in BuiltinLayout::ALL {
            assert!(seen.insert(layout.id()), "duplicate id {}", layout.id());
            assert_eq!(BuiltinLayout::from_id(layout.id()), Some(layout));
        }
        assert_eq!(BuiltinLayout::from_id(5), None);
    }
}
