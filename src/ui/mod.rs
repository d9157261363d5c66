pub mod legend;
pub mod plot_panel;
