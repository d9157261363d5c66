use egui::{Pos2, Shape, Stroke};

use crate::state::plot_state::PlotState;
use crate::state::series::{LineStyleKind, Series};
use crate::state::theme::Theme;

const SWATCH_SIZE: egui::Vec2 = egui::vec2(32.0, 14.0);

/// Legend drawn beside the plot rather than over it.
pub fn show_legend(plot: &PlotState, ui: &mut egui::Ui, theme: &Theme) {
    ui.add_space(8.0);
    ui.label(egui::RichText::new("Series").strong());
    ui.separator();
    for series in &plot.series {
        ui.horizontal(|ui| {
            paint_swatch(ui, series);
            ui.label(egui::RichText::new(&series.label).color(theme.text_color()))
                .on_hover_text(format!(
                    "{} line, {} points",
                    series.line_style.label(),
                    series.point_count()
                ));
        });
    }
}

fn paint_swatch(ui: &mut egui::Ui, series: &Series) {
    let (rect, _) = ui.allocate_exact_size(SWATCH_SIZE, egui::Sense::hover());
    let y = rect.center().y;
    let ends = [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)];
    let stroke = Stroke::new(2.0, series.color);
    let painter = ui.painter();
    match series.line_style {
        LineStyleKind::Solid => {
            painter.line_segment(ends, stroke);
        }
        LineStyleKind::Dashed => {
            painter.extend(Shape::dashed_line(&ends, stroke, 6.0, 4.0));
        }
        LineStyleKind::Dotted => {
            painter.extend(Shape::dotted_line(&ends, series.color, 4.0, 1.0));
        }
        LineStyleKind::DashDot => {
            painter.extend(Shape::dashed_line(&ends, stroke, 3.0, 2.0));
        }
    }
    painter.circle_filled(rect.center(), 2.5, series.color);
}
