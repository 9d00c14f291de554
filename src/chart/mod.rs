pub mod pie;
pub mod raster;
pub mod trend;

use serde::{Deserialize, Serialize};

/// Series colors shared by both palettes; index 0 is reserved for the
/// aggregate series in the trend chart.
pub const PALETTE: [&str; 10] = [
    "#5470c6", "#91cc75", "#fac858", "#ee6666", "#73c0de", "#3ba272", "#fc8452", "#9a60b4",
    "#ea7ccc", "#ff9f7f",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub axis: &'static str,
    pub grid: &'static str,
    pub border: &'static str,
    pub area_fill: &'static str,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: "#fffef0",
            text: "#333333",
            axis: "#555555",
            grid: "#e8e6d9",
            border: "#d0cec0",
            area_fill: "rgba(84, 112, 198, 0.1)",
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: "#0d1117",
            text: "#c9d1d9",
            axis: "#8b949e",
            grid: "#30363d",
            border: "#30363d",
            area_fill: "rgba(84, 112, 198, 0.25)",
        }
    }

    pub fn both() -> [Self; 2] {
        [Self::light(), Self::dark()]
    }
}

/// Language-agnostic chart description: what to draw, not how. Produced by
/// the update pipeline and embedded verbatim in `pulsechart` fenced blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    LanguageRing(RingSpec),
    CommitTrend(TrendSpec),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingSpec {
    pub title: String,
    pub slices: Vec<Slice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSpec {
    pub title: String,
    /// One label per day, oldest first.
    pub labels: Vec<String>,
    /// Daily total commit counts, parallel to `labels`.
    pub total: Vec<u32>,
    /// Per-repository series, heaviest contributors first.
    pub series: Vec<TrendSeries>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    pub name: String,
    pub points: Vec<u32>,
}

/// Render a spec to standalone SVG markup in the given palette.
pub fn render(spec: &ChartSpec, theme: &Theme) -> String {
    match spec {
        ChartSpec::LanguageRing(ring) => pie::render(ring, theme),
        ChartSpec::CommitTrend(trend) => trend::render(trend, theme),
    }
}

/// Short file-name stem for a spec, used in output names.
pub fn spec_kind(spec: &ChartSpec) -> &'static str {
    match spec {
        ChartSpec::LanguageRing(_) => "languages",
        ChartSpec::CommitTrend(_) => "trend",
    }
}
