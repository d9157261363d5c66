pub mod axis;
pub mod plot_state;
pub mod series;
pub mod theme;
