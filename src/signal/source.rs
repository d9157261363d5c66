use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use rand::Rng;
use thiserror::Error;

use crate::signal::curve::{heart_curve, perturb};
use crate::signal::smoothing::Ema;

pub const HEADER: &str = "x(t), y(t), x_s(t), y_s(t)";

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("write failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SignalError {
    /// Failures worth retrying on the next tick.
    pub fn is_transient(&self) -> bool {
        match self {
            SignalError::Io(e) => matches!(
                e.kind(),
                ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::TimedOut
            ),
            SignalError::InvalidParameter(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    /// Half-width of the uniform noise added to both axes.
    pub noise: f64,
    /// Smoothing factor of the moving average.
    pub alpha: f64,
    /// Pause between two emitted lines.
    pub interval: Duration,
    /// Advance `t` by this step per sample instead of reading the clock.
    pub fixed_step: Option<Duration>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            noise: 1.5,
            alpha: 0.1,
            interval: Duration::from_millis(20),
            fixed_step: None,
        }
    }
}

impl SignalConfig {
    pub fn validate(&self) -> Result<(), SignalError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(SignalError::InvalidParameter(format!(
                "alpha must be in [0, 1], got {}",
                self.alpha
            )));
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(SignalError::InvalidParameter(format!(
                "noise must be a non-negative number, got {}",
                self.noise
            )));
        }
        Ok(())
    }
}

/// One tick of the signal: raw and smoothed coordinates at time `t` (seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub x_s: f64,
    pub y_s: f64,
}

impl Sample {
    pub fn to_line(&self) -> String {
        format!("{:.3},{:.3},{:.3},{:.3}", self.x, self.y, self.x_s, self.y_s)
    }
}

#[derive(Debug, Clone, Copy)]
enum Clock {
    Wall(Instant),
    Fixed { step: f64, tick: u64 },
}

impl Clock {
    fn now(&mut self) -> f64 {
        match self {
            Clock::Wall(start) => start.elapsed().as_secs_f64(),
            Clock::Fixed { step, tick } => {
                let t = *step * *tick as f64;
                *tick += 1;
                t
            }
        }
    }
}

/// Unbounded stream of noisy, smoothed heart-curve samples.
#[derive(Debug)]
pub struct SignalSource<R> {
    noise: f64,
    clock: Clock,
    smooth_x: Ema,
    smooth_y: Ema,
    rng: R,
}

impl<R: Rng> SignalSource<R> {
    pub fn new(config: &SignalConfig, rng: R) -> Self {
        let clock = match config.fixed_step {
            Some(step) => Clock::Fixed {
                step: step.as_secs_f64(),
                tick: 0,
            },
            None => Clock::Wall(Instant::now()),
        };
        Self {
            noise: config.noise,
            clock,
            smooth_x: Ema::new(config.alpha),
            smooth_y: Ema::new(config.alpha),
            rng,
        }
    }
}

impl<R: Rng> Iterator for SignalSource<R> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let t = self.clock.now();
        let (x, y) = perturb(heart_curve(t), self.noise, &mut self.rng);
        Some(Sample {
            t,
            x,
            y,
            x_s: self.smooth_x.update(x),
            y_s: self.smooth_y.update(y),
        })
    }
}

/// Write the header and then one line per sample, pausing `interval`
/// between lines. Transient write failures are logged and the loop goes on;
/// a closed pipe ends it normally.
pub fn emit<W, I>(out: &mut W, samples: I, interval: Duration) -> Result<(), SignalError>
where
    W: Write,
    I: IntoIterator<Item = Sample>,
{
    if write_line(out, HEADER)? == Flow::Closed {
        return Ok(());
    }
    for sample in samples {
        if write_line(out, &sample.to_line())? == Flow::Closed {
            return Ok(());
        }
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Closed,
}

fn write_line<W: Write>(out: &mut W, line: &str) -> Result<Flow, SignalError> {
    let result = writeln!(out, "{line}").and_then(|()| out.flush());
    match result {
        Ok(()) => Ok(Flow::Continue),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            tracing::info!("Output closed, stopping");
            Ok(Flow::Closed)
        }
        Err(e) => {
            let err = SignalError::from(e);
            if err.is_transient() {
                tracing::warn!("Retrying! ({err})");
                Ok(Flow::Continue)
            } else {
                Err(err)
            }
        }
    }
}

/// Create (or truncate) the file a run writes its copy of the stream to,
/// creating missing parent directories. Every run starts a fresh log with a
/// single header line.
pub fn create_output(path: &Path) -> Result<File, SignalError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

/// Writes everything to two sinks, like `tee`.
pub struct Tee<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}
