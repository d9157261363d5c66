//! Synthetic coordinate stream: a noisy heart curve with per-axis
//! exponential smoothing, printed as CSV lines.

pub mod curve;
pub mod smoothing;
pub mod source;
