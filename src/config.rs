use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};
use crate::state::axis::RescaleParams;
use crate::state::series::{parse_hex_color, LineStyleKind, StyleConfig, DEFAULT_PALETTE};
use crate::state::theme::Theme;

pub const DEFAULT_LOG_PATH: &str = "logging/log.txt";
pub const DEFAULT_SLEEP_SECS: f64 = 0.05;
pub const DEFAULT_MAX_SAMPLES: usize = 100;
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

/// Plot a growing CSV log in real time.
///
/// The log must start with a comma-separated header line followed by
/// comma-separated numeric rows, e.g. the output of
/// `signal-source | tee logging/log.txt`.
#[derive(Debug, Clone, Parser)]
#[command(name = "logplot", version, about)]
pub struct Cli {
    /// Path to the log file
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Sleep time between updates in seconds (default: 0.05)
    #[arg(short = 's', long = "sleep", allow_negative_numbers = true)]
    pub sleep: Option<f64>,

    /// Maximum number of samples to plot (default: 100)
    #[arg(short = 'n', long = "max-samples")]
    pub max_samples: Option<usize>,

    /// Timeout for log file detection in seconds (default: 10)
    #[arg(long, allow_negative_numbers = true)]
    pub timeout: Option<f64>,

    /// Names or indices of the columns with y-values. If not provided, all
    /// columns are plotted.
    #[arg(
        short = 'y',
        long = "y-cols",
        visible_alias = "y-col",
        num_args = 1..,
        allow_negative_numbers = true
    )]
    pub y_cols: Option<Vec<String>>,

    /// Names or indices of the columns with x-values. If not provided, the
    /// sample index is used. Several x-columns must match the number of
    /// y-columns.
    #[arg(
        short = 'x',
        long = "x-cols",
        visible_alias = "x-col",
        num_args = 1..,
        allow_negative_numbers = true
    )]
    pub x_cols: Option<Vec<String>>,

    /// JSON file with palette, line style and rescale settings
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Color theme of the window
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,
}

/// Optional overrides read from a JSON settings file. Every field may be
/// omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerSettings {
    pub file: Option<PathBuf>,
    pub sleep: Option<f64>,
    pub max_samples: Option<usize>,
    pub timeout: Option<f64>,
    pub palette: Option<Vec<String>>,
    pub styles: Option<Vec<LineStyleKind>>,
    pub rescale: Option<RescaleParams>,
    pub theme: Option<Theme>,
}

impl ViewerSettings {
    pub fn load(path: &Path) -> LogResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| LogError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Immutable viewer configuration, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub log_path: PathBuf,
    pub sleep: Duration,
    pub max_samples: usize,
    pub startup_timeout: Duration,
    /// Pause between attempts of the blocking priming read.
    pub retry_interval: Duration,
    /// Pause between checks for the log file to appear.
    pub file_poll_interval: Duration,
    pub x_cols: Option<Vec<String>>,
    pub y_cols: Option<Vec<String>>,
    pub style: StyleConfig,
    pub rescale: RescaleParams,
    pub theme: Theme,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            sleep: Duration::from_secs_f64(DEFAULT_SLEEP_SECS),
            max_samples: DEFAULT_MAX_SAMPLES,
            startup_timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            retry_interval: Duration::from_secs(1),
            file_poll_interval: Duration::from_millis(100),
            x_cols: None,
            y_cols: None,
            style: StyleConfig::default(),
            rescale: RescaleParams::default(),
            theme: Theme::default(),
        }
    }
}

impl ViewerConfig {
    /// Defaults, overridden by the settings file, overridden by CLI flags.
    pub fn from_cli(cli: &Cli) -> LogResult<Self> {
        let settings = match &cli.settings {
            Some(path) => ViewerSettings::load(path)?,
            None => ViewerSettings::default(),
        };
        Self::from_parts(&settings, cli)
    }

    pub fn from_parts(settings: &ViewerSettings, cli: &Cli) -> LogResult<Self> {
        let mut config = Self::default();

        if let Some(file) = cli.file.as_ref().or(settings.file.as_ref()) {
            config.log_path = file.clone();
        }
        if let Some(sleep) = cli.sleep.or(settings.sleep) {
            config.sleep = seconds("sleep", sleep)?;
        }
        if let Some(n) = cli.max_samples.or(settings.max_samples) {
            if n == 0 {
                return Err(LogError::InvalidParameter(
                    "max-samples must be at least 1".to_string(),
                ));
            }
            config.max_samples = n;
        }
        if let Some(timeout) = cli.timeout.or(settings.timeout) {
            config.startup_timeout = seconds("timeout", timeout)?;
        }

        config.x_cols = cli.x_cols.clone();
        config.y_cols = cli.y_cols.clone();

        let colors = match &settings.palette {
            Some(hexes) => hexes
                .iter()
                .map(|hex| parse_hex_color(hex))
                .collect::<LogResult<Vec<_>>>()?,
            None => DEFAULT_PALETTE
                .iter()
                .map(|hex| parse_hex_color(hex))
                .collect::<LogResult<Vec<_>>>()?,
        };
        let styles = settings
            .styles
            .clone()
            .unwrap_or_else(|| LineStyleKind::ALL.to_vec());
        config.style = StyleConfig::new(colors, styles)?;

        if let Some(rescale) = settings.rescale {
            rescale.validate()?;
            config.rescale = rescale;
        }
        if let Some(theme) = cli.theme.or(settings.theme) {
            config.theme = theme;
        }

        Ok(config)
    }
}

fn seconds(name: &str, value: f64) -> LogResult<Duration> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        LogError::InvalidParameter(format!(
            "{name} must be a non-negative number of seconds, got {value}"
        ))
    })
}
