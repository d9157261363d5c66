use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use eframe::egui;

use logplot::app::{FatalSlot, LogPlotApp};
use logplot::config::{Cli, ViewerConfig};
use logplot::control;
use logplot::error::{LogError, LogResult};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> LogResult<()> {
    let config = ViewerConfig::from_cli(cli)?;

    control::wait_for_log(&config)?;
    let monitor = control::prime(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("logplot - {}", config.log_path.display()))
            .with_inner_size([1000.0, 640.0])
            .with_min_inner_size([480.0, 320.0]),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    let fatal: FatalSlot = Arc::new(Mutex::new(None));
    let app_fatal = Arc::clone(&fatal);
    eframe::run_native(
        "logplot",
        options,
        Box::new(move |cc| Ok(Box::new(LogPlotApp::new(cc, monitor, app_fatal)))),
    )
    .map_err(|e| LogError::Gui(e.to_string()))?;

    let streaming_error = fatal.lock().ok().and_then(|mut slot| slot.take());
    match streaming_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
