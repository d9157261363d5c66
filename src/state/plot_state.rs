use crate::data::columns::{ColumnPair, Resolution};
use crate::data::loader::LogTable;
use crate::state::axis::{AxisRange, AxisState, RescaleParams};
use crate::state::series::{Refresh, Series, StyleConfig};

pub const TITLE: &str = "Log Visualizer";
pub const Y_LABEL: &str = "Value";

/// Everything the plot panel draws: the series, the visible axis ranges
/// and the labels. Owned by the app and handed to the UI each frame.
#[derive(Debug, Clone)]
pub struct PlotState {
    pub series: Vec<Series>,
    pub axes: AxisState,
    pub x_label: String,
    pub y_label: String,
    style: StyleConfig,
    rescale: RescaleParams,
}

/// Combined finite bounds over all series: ((x_min, x_max), (y_min, y_max)).
pub type Bounds = ((f64, f64), (f64, f64));

impl PlotState {
    pub fn new(style: StyleConfig, rescale: RescaleParams) -> Self {
        Self {
            series: Vec::new(),
            axes: AxisState::default(),
            x_label: String::new(),
            y_label: Y_LABEL.to_string(),
            style,
            rescale,
        }
    }

    /// Build the series for the first frame and fit the axes to the data
    /// directly.
    pub fn prime(&mut self, table: &LogTable, resolution: &Resolution) {
        self.rebuild_series(resolution);
        self.refresh_series(table);
        if let Some(((x_min, x_max), (y_min, y_max))) = self.bounds() {
            self.axes.x = AxisRange::fit(x_min, x_max, &self.rescale);
            self.axes.y = AxisRange::fit(y_min, y_max, &self.rescale);
        }
    }

    /// Refresh every series from a new table and nudge the axes toward the
    /// data. The series set is rebuilt when the resolved pairs changed.
    pub fn update(&mut self, table: &LogTable, resolution: &Resolution) {
        if !self.matches(&resolution.pairs) {
            tracing::debug!(
                "Column set changed, rebuilding {} series",
                resolution.pairs.len()
            );
            self.rebuild_series(resolution);
        }
        self.refresh_series(table);
        if let Some(((x_min, x_max), (y_min, y_max))) = self.bounds() {
            self.axes.x.rescale_toward(x_min, x_max, &self.rescale);
            self.axes.y.rescale_toward(y_min, y_max, &self.rescale);
        }
    }

    fn matches(&self, pairs: &[ColumnPair]) -> bool {
        self.series.len() == pairs.len()
            && self.series.iter().zip(pairs).all(|(s, p)| s.pair == *p)
    }

    fn rebuild_series(&mut self, resolution: &Resolution) {
        self.series = resolution
            .pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                let (line_style, color) = self.style.style_for_index(i);
                Series::new(pair.clone(), color, line_style)
            })
            .collect();
        self.x_label = resolution.x_labels().join("\n");
    }

    fn refresh_series(&mut self, table: &LogTable) {
        self.series.retain_mut(|s| match s.refresh(table) {
            Refresh::Updated => true,
            Refresh::NonNumeric => {
                tracing::debug!("Skipping non-numeric data for {}", s.label);
                true
            }
            Refresh::Missing => {
                tracing::warn!("Dropping series {}: column not found", s.label);
                false
            }
        });
    }

    /// Bounding box of the series refreshed with numeric data this cycle.
    pub fn bounds(&self) -> Option<Bounds> {
        self.series
            .iter()
            .filter_map(Series::bounds)
            .reduce(|((ax0, ax1), (ay0, ay1)), ((bx0, bx1), (by0, by1))| {
                ((ax0.min(bx0), ax1.max(bx1)), (ay0.min(by0), ay1.max(by1)))
            })
    }

    pub fn series_by_label(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }
}
