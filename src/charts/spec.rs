//! Declarative chart specifications.
//!
//! These are pure rendering configuration: assignments of aggregate rows
//! to visual channels (position, magnitude, label, tooltip). Builders in
//! `build` produce them; the TUI is their only interpreter. Nothing here
//! computes aggregates.

/// Mark used for a ranked chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Bar,
    Lollipop,
}

/// One mark in a ranked chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDatum {
    /// Full untruncated key; drives tooltips and identity.
    pub key: String,
    /// Display label, possibly shortened for the axis.
    pub label: String,
    /// Magnitude on the value axis.
    pub value: f64,
    /// Value as printed next to the mark.
    pub formatted: String,
}

/// A ranked bar or lollipop chart, already sorted descending.
#[derive(Debug, Clone)]
pub struct RankedSpec {
    pub title: String,
    pub value_axis: String,
    pub mark: Mark,
    pub data: Vec<RankedDatum>,
    /// Value-axis domain end (at least the max datum value).
    pub max_value: f64,
}

/// One tile of the choropleth. `intensity` is a color bucket from the
/// sqrt scale: 0 = zero grants, 1..=4 increasingly hot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTile {
    pub code: String,
    pub count: usize,
    pub budget_cents: u64,
    pub intensity: u8,
}

/// The geographic view: one tile per mapped state with data.
#[derive(Debug, Clone)]
pub struct ChoroplethSpec {
    pub title: String,
    pub legend: String,
    pub tiles: Vec<MapTile>,
}

impl ChoroplethSpec {
    pub fn tile(&self, code: &str) -> Option<&MapTile> {
        self.tiles.iter().find(|t| t.code == code)
    }
}

/// One category in a grouped comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedDatum {
    pub category: String,
    pub value: f64,
    pub formatted: String,
    /// Group size, where the comparison is rate-based.
    pub n: Option<usize>,
}

/// A small grouped bar comparison (two to a handful of categories).
#[derive(Debug, Clone)]
pub struct GroupedBarSpec {
    pub title: String,
    pub subtitle: Option<String>,
    pub value_axis: String,
    pub data: Vec<GroupedDatum>,
    pub max_value: f64,
}
