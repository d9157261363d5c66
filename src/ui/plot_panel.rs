use egui_plot::{MarkerShape, Plot, PlotBounds, PlotPoints, Points};

use crate::state::plot_state::{PlotState, TITLE};
use crate::state::theme::Theme;

const LINE_WIDTH: f32 = 1.5;
const LAST_POINT_RADIUS: f32 = 3.0;

/// Draw the title and the chart. Axis limits come from `plot.axes`; user
/// pan/zoom is disabled since the limits are rewritten every frame.
pub fn show_plot_panel(plot: &PlotState, ui: &mut egui::Ui, theme: &Theme) {
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(TITLE)
                .strong()
                .size(18.0)
                .color(theme.text_color()),
        );
    });
    ui.add_space(4.0);

    if plot.series.is_empty() {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("No plottable columns").strong().size(16.0));
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new("Check the -x/-y selectors against the log header.").weak(),
            );
        });
        return;
    }

    let axes = plot.axes;
    Plot::new("log_plot")
        .x_axis_label(egui::RichText::new(&plot.x_label).strong())
        .y_axis_label(egui::RichText::new(&plot.y_label).strong())
        .show_grid([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show_background(true)
        .show(ui, |plot_ui| {
            for series in &plot.series {
                let line = egui_plot::Line::new(PlotPoints::new(series.points()))
                    .name(&series.label)
                    .color(series.color)
                    .style(series.line_style.plot_style())
                    .width(LINE_WIDTH);
                plot_ui.line(line);

                let last = series.last_point().filter(|p| p.iter().all(|v| v.is_finite()));
                if let Some(last) = last {
                    let marker = Points::new(PlotPoints::new(vec![last]))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(LAST_POINT_RADIUS)
                        .color(series.color);
                    plot_ui.points(marker);
                }
            }
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [axes.x.min, axes.y.min],
                [axes.x.max, axes.y.max],
            ));
        });
}
