use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};

/// Parameters of the damped axis rescale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RescaleParams {
    /// Padding added on each side of the data range, as a fraction of the span.
    pub margin: f64,
    /// Largest slack (fraction of the span) tolerated between view and target.
    pub threshold: f64,
    /// Fraction of the remaining distance covered per update.
    pub factor: f64,
    /// How far (fraction of the span) the view may cut into the margin
    /// before it moves.
    pub tolerance: f64,
}

impl Default for RescaleParams {
    fn default() -> Self {
        Self {
            margin: 0.05,
            threshold: 0.2,
            factor: 0.9,
            tolerance: 1e-3,
        }
    }
}

impl RescaleParams {
    pub fn validate(&self) -> LogResult<()> {
        let finite = [self.margin, self.threshold, self.factor, self.tolerance]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.margin < 0.0 || self.threshold < 0.0 || self.tolerance < 0.0 {
            return Err(LogError::InvalidParameter(format!(
                "rescale margin, threshold and tolerance must be finite and non-negative: {self:?}"
            )));
        }
        if !(self.factor > 0.0 && self.factor <= 1.0) {
            return Err(LogError::InvalidParameter(format!(
                "rescale factor must be in (0, 1], got {}",
                self.factor
            )));
        }
        Ok(())
    }
}

/// Visible range of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Padded target range for data spanning `[data_min, data_max]`, and the
    /// span used to normalize discrepancies.
    fn target(data_min: f64, data_max: f64, margin: f64) -> (AxisRange, f64) {
        let span = data_max - data_min;
        if span.abs() < 1e-15 {
            (AxisRange::new(data_min - 0.5, data_max + 0.5), 1.0)
        } else {
            let pad = span * margin;
            (AxisRange::new(data_min - pad, data_max + pad), span)
        }
    }

    /// Jump straight to the padded data range, used for the first frame.
    pub fn fit(data_min: f64, data_max: f64, params: &RescaleParams) -> Self {
        Self::target(data_min, data_max, params.margin).0
    }

    /// Move toward the padded data range. Nothing happens while the view
    /// contains the target with less than `threshold` slack on either side;
    /// otherwise both limits cover `factor` of the distance. Returns whether
    /// the range changed.
    pub fn rescale_toward(&mut self, data_min: f64, data_max: f64, params: &RescaleParams) -> bool {
        if !data_min.is_finite() || !data_max.is_finite() {
            return false;
        }
        let (target, span) = Self::target(data_min, data_max, params.margin);
        let low_rel = (target.min - self.min) / span;
        let high_rel = (self.max - target.max) / span;
        let off = |rel: f64| rel < -params.tolerance || rel > params.threshold;
        if !off(low_rel) && !off(high_rel) {
            return false;
        }
        self.min += (target.min - self.min) * params.factor;
        self.max += (target.max - self.max) * params.factor;
        true
    }
}

/// Visible x and y ranges of the plot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisState {
    pub x: AxisRange,
    pub y: AxisRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_adds_margin() {
        let r = AxisRange::fit(0.0, 10.0, &RescaleParams::default());
        assert!((r.min + 0.5).abs() < 1e-12);
        assert!((r.max - 10.5).abs() < 1e-12);
        let flat = AxisRange::fit(3.0, 3.0, &RescaleParams::default());
        assert_eq!(flat, AxisRange::new(2.5, 3.5));
    }

    #[test]
    fn small_slack_does_not_move() {
        let params = RescaleParams::default();
        // Target is [-0.5, 10.5]; a view of [-1, 11] has 0.05 slack per side.
        let mut r = AxisRange::new(-1.0, 11.0);
        assert!(!r.rescale_toward(0.0, 10.0, &params));
        assert_eq!(r, AxisRange::new(-1.0, 11.0));
    }

    #[test]
    fn clipped_data_moves_ninety_percent() {
        let params = RescaleParams::default();
        let mut r = AxisRange::new(-0.5, 10.5);
        // Data grew to 20: target max becomes 21.
        assert!(r.rescale_toward(0.0, 20.0, &params));
        assert!((r.min - (-0.5 + (-1.0 + 0.5) * 0.9)).abs() < 1e-12);
        assert!((r.max - (10.5 + (21.0 - 10.5) * 0.9)).abs() < 1e-12);
    }

    #[test]
    fn shrinking_data_moves_once_slack_exceeds_threshold() {
        let params = RescaleParams::default();
        let mut r = AxisRange::new(-0.5, 10.5);
        // Data shrank to [0, 5]: target [-0.25, 5.25], high slack 5.25/5 > 0.2.
        assert!(r.rescale_toward(0.0, 5.0, &params));
        assert!(r.max < 10.5);
    }

    #[test]
    fn settles_when_bounds_are_stable() {
        let params = RescaleParams::default();
        let mut r = AxisRange::new(-100.0, -50.0);
        let mut moves = 0;
        for _ in 0..100 {
            if r.rescale_toward(0.0, 10.0, &params) {
                moves += 1;
            }
        }
        assert!(moves > 0 && moves < 20, "moved {moves} times");
        let settled = r;
        for _ in 0..10 {
            assert!(!r.rescale_toward(0.0, 10.0, &params));
        }
        assert_eq!(r, settled);
        assert!((r.min - (-0.5)).abs() < 0.01 * 10.0);
        assert!((r.max - 10.5).abs() < 0.01 * 10.0);
    }

    #[test]
    fn non_finite_bounds_are_ignored() {
        let mut r = AxisRange::default();
        assert!(!r.rescale_toward(f64::INFINITY, f64::NEG_INFINITY, &RescaleParams::default()));
        assert_eq!(r, AxisRange::default());
    }

    #[test]
    fn validation() {
        assert!(RescaleParams::default().validate().is_ok());
        let bad = RescaleParams {
            factor: 0.0,
            ..RescaleParams::default()
        };
        assert!(bad.validate().is_err());
        let bad = RescaleParams {
            margin: -1.0,
            ..RescaleParams::default()
        };
        assert!(bad.validate().is_err());
    }
}
