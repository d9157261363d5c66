//! The viewer's control loop, split into its three phases.
//!
//! * **Waiting**: [`wait_for_log`] blocks until the log file exists or the
//!   startup timeout elapses.
//! * **Priming**: [`prime`] performs one blocking read, resolves the columns
//!   (with warnings) and fits the first frame.
//! * **Streaming**: [`LogMonitor::poll`] is called from the UI loop at the
//!   configured interval until the window is closed.

use crate::config::ViewerConfig;
use crate::data::columns::{resolve_columns, Resolution};
use crate::data::loader::{self, LogTable};
use crate::error::{LogError, LogResult};
use crate::state::plot_state::PlotState;

/// Resolve the configured selectors against a table's columns.
pub fn resolve_for(config: &ViewerConfig, table: &LogTable) -> Resolution {
    resolve_columns(
        &table.columns,
        config.x_cols.as_deref(),
        config.y_cols.as_deref(),
    )
}

pub fn wait_for_log(config: &ViewerConfig) -> LogResult<()> {
    tracing::info!("Log file: {}", config.log_path.display());
    tracing::info!("Waiting for log file...");
    loader::wait_for_file(
        &config.log_path,
        config.startup_timeout,
        config.file_poll_interval,
    )
}

pub fn prime(config: &ViewerConfig) -> LogResult<LogMonitor> {
    let table = loader::read_log_until(
        &config.log_path,
        config.max_samples,
        config.startup_timeout,
        config.retry_interval,
    )?
    .ok_or_else(|| LogError::EmptyOrUnparsable(config.log_path.clone()))?;

    let resolution = resolve_for(config, &table);
    resolution.log_warnings();

    let mut plot = PlotState::new(config.style.clone(), config.rescale);
    plot.prime(&table, &resolution);
    tracing::info!(
        "Plotting {} series from {} rows",
        plot.series.len(),
        table.row_count()
    );

    Ok(LogMonitor {
        config: config.clone(),
        plot,
    })
}

/// Result of one streaming step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Updated { rows: usize },
    /// The file was empty or unreadable this time, the plot is unchanged.
    NoData,
}

/// Streaming phase: owns the plot and refreshes it from the log file.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    config: ViewerConfig,
    plot: PlotState,
}

impl LogMonitor {
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn plot(&self) -> &PlotState {
        &self.plot
    }

    /// Non-blocking read, silent re-resolve, plot update.
    pub fn poll(&mut self) -> LogResult<PollOutcome> {
        let table = loader::read_log(&self.config.log_path, self.config.max_samples)?;
        let Some(table) = table else {
            return Ok(PollOutcome::NoData);
        };
        let resolution = resolve_for(&self.config, &table);
        self.plot.update(&table, &resolution);
        Ok(PollOutcome::Updated {
            rows: table.row_count(),
        })
    }
}
