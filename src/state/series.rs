use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::data::columns::{ColumnPair, XColumn};
use crate::data::loader::LogTable;
use crate::error::{LogError, LogResult};

/// Default color palette, cycled inside each line style.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#2d8ff3", // Blue
    "#fc585e", // Red
    "#1aaf54", // Green
    "#e05fba", // Pink
    "#e37529", // Orange
    "#f65394", // Rose
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyleKind {
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyleKind {
    pub const ALL: [LineStyleKind; 4] = [
        LineStyleKind::Solid,
        LineStyleKind::Dashed,
        LineStyleKind::Dotted,
        LineStyleKind::DashDot,
    ];

    pub fn plot_style(&self) -> egui_plot::LineStyle {
        match self {
            LineStyleKind::Solid => egui_plot::LineStyle::Solid,
            LineStyleKind::Dashed => egui_plot::LineStyle::dashed_loose(),
            LineStyleKind::Dotted => egui_plot::LineStyle::dotted_dense(),
            // egui_plot has no dash-dot pattern, short dashes read closest.
            LineStyleKind::DashDot => egui_plot::LineStyle::dashed_dense(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LineStyleKind::Solid => "solid",
            LineStyleKind::Dashed => "dashed",
            LineStyleKind::Dotted => "dotted",
            LineStyleKind::DashDot => "dash-dot",
        }
    }
}

/// Parse a `#rrggbb` color string.
pub fn parse_hex_color(hex: &str) -> LogResult<Color32> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LogError::InvalidColor(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| LogError::InvalidColor(hex.to_string()))
    };
    Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Color and line-style palettes, combined as style x color.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub colors: Vec<Color32>,
    pub styles: Vec<LineStyleKind>,
}

impl StyleConfig {
    pub fn new(colors: Vec<Color32>, styles: Vec<LineStyleKind>) -> LogResult<Self> {
        if colors.is_empty() || styles.is_empty() {
            return Err(LogError::InvalidParameter(
                "palette and line styles must not be empty".to_string(),
            ));
        }
        Ok(Self { colors, styles })
    }

    /// Style of the `index`-th series. Colors cycle fastest, so the first
    /// `colors.len()` series are all solid.
    pub fn style_for_index(&self, index: usize) -> (LineStyleKind, Color32) {
        let n_colors = self.colors.len();
        let style = self.styles[(index / n_colors) % self.styles.len()];
        (style, self.colors[index % n_colors])
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        let colors = DEFAULT_PALETTE
            .iter()
            .filter_map(|hex| parse_hex_color(hex).ok())
            .collect();
        Self {
            colors,
            styles: LineStyleKind::ALL.to_vec(),
        }
    }
}

/// One plotted (x, y) column pair: the full line plus its latest point.
#[derive(Debug, Clone)]
pub struct Series {
    pub pair: ColumnPair,
    pub label: String,
    pub color: Color32,
    pub line_style: LineStyleKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Whether the last refresh replaced `x`/`y` with current data.
    pub fresh: bool,
}

/// Outcome of refreshing a series from a new table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Updated,
    /// A column holds non-numeric cells, the previous data is kept.
    NonNumeric,
    /// A column no longer exists.
    Missing,
}

impl Series {
    pub fn new(pair: ColumnPair, color: Color32, line_style: LineStyleKind) -> Self {
        Self {
            label: pair.label(),
            pair,
            color,
            line_style,
            x: Vec::new(),
            y: Vec::new(),
            fresh: false,
        }
    }

    /// Reload the series from `table`. On anything but [`Refresh::Updated`]
    /// the previous data stays in place and the series is marked stale.
    pub fn refresh(&mut self, table: &LogTable) -> Refresh {
        self.fresh = false;
        let x_exists = match &self.pair.x {
            XColumn::Index => true,
            XColumn::Named(name) => table.column_index(name).is_some(),
        };
        if !x_exists || table.column_index(&self.pair.y).is_none() {
            return Refresh::Missing;
        }
        let x = match &self.pair.x {
            XColumn::Index => Some(table.index_column()),
            XColumn::Named(name) => table.numeric_column(name),
        };
        match (x, table.numeric_column(&self.pair.y)) {
            (Some(x), Some(y)) => {
                self.x = x;
                self.y = y;
                self.fresh = true;
                Refresh::Updated
            }
            _ => Refresh::NonNumeric,
        }
    }

    pub fn last_point(&self) -> Option<[f64; 2]> {
        Some([*self.x.last()?, *self.y.last()?])
    }

    /// Drawable points; rows with a NaN coordinate are left out.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.x
            .iter()
            .zip(&self.y)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| [x, y])
            .collect()
    }

    pub fn point_count(&self) -> usize {
        self.x.len()
    }

    /// Finite (min, max) of x and y, if any. Stale series have none.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        if !self.fresh {
            return None;
        }
        Some((finite_range(&self.x)?, finite_range(&self.y)?))
    }
}

pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    (min <= max).then_some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_log;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#2d8ff3").unwrap(), Color32::from_rgb(0x2d, 0x8f, 0xf3));
        assert_eq!(parse_hex_color("FC585E").unwrap(), Color32::from_rgb(0xfc, 0x58, 0x5e));
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("#+f+f+f").is_err());
        assert!(parse_hex_color("+fffff").is_err());
    }

    #[test]
    fn styles_cycle_colors_first() {
        let style = StyleConfig::default();
        let n = style.colors.len();
        assert_eq!(style.style_for_index(0), (LineStyleKind::Solid, style.colors[0]));
        assert_eq!(style.style_for_index(n - 1).0, LineStyleKind::Solid);
        assert_eq!(style.style_for_index(n), (LineStyleKind::Dashed, style.colors[0]));
        assert_eq!(style.style_for_index(n * 4), style.style_for_index(0));
    }

    #[test]
    fn empty_palettes_are_rejected() {
        assert!(StyleConfig::new(Vec::new(), LineStyleKind::ALL.to_vec()).is_err());
        assert!(StyleConfig::new(vec![Color32::RED], Vec::new()).is_err());
    }

    #[test]
    fn refresh_reports_non_numeric_and_missing() {
        let table = parse_log("a,b\n1,x\n2,3\n", 10).unwrap();
        let mut s = Series::new(ColumnPair::index("b"), Color32::RED, LineStyleKind::Solid);
        assert_eq!(s.refresh(&table), Refresh::NonNumeric);
        assert!(!s.fresh);
        let mut s = Series::new(ColumnPair::named("a", "c"), Color32::RED, LineStyleKind::Solid);
        assert_eq!(s.refresh(&table), Refresh::Missing);
        let mut s = Series::new(ColumnPair::index("a"), Color32::RED, LineStyleKind::Solid);
        assert_eq!(s.refresh(&table), Refresh::Updated);
        assert_eq!(s.last_point(), Some([1.0, 2.0]));
        assert!(s.fresh);
    }

    #[test]
    fn stale_series_has_no_bounds() {
        let good = parse_log("a\n1\n5\n", 10).unwrap();
        let mut s = Series::new(ColumnPair::index("a"), Color32::RED, LineStyleKind::Solid);
        assert_eq!(s.bounds(), None);
        s.refresh(&good);
        assert_eq!(s.bounds(), Some(((0.0, 1.0), (1.0, 5.0))));

        let glitch = parse_log("a\n1\n5\nx\n", 10).unwrap();
        assert_eq!(s.refresh(&glitch), Refresh::NonNumeric);
        assert_eq!(s.y, vec![1.0, 5.0]);
        assert_eq!(s.bounds(), None);
    }

    #[test]
    fn range_ignores_nan() {
        assert_eq!(finite_range(&[f64::NAN, 2.0, -1.0]), Some((-1.0, 2.0)));
        assert_eq!(finite_range(&[f64::NAN]), None);
    }
}
