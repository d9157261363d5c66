use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use logplot::signal::source::{
    create_output, emit, Sample, SignalConfig, SignalError, SignalSource, Tee,
};

/// Stream a noisy heart curve and its smoothed version as CSV lines.
///
/// Pipe it into a log file and point `logplot` at that file:
/// `signal-source | tee logging/log.txt`
#[derive(Debug, Parser)]
#[command(name = "signal-source", version, about)]
struct Args {
    /// Half-width of the uniform noise added to both coordinates
    #[arg(long, default_value_t = 1.5)]
    noise: f64,

    /// Smoothing factor of the moving average, in [0, 1]
    #[arg(long, default_value_t = 0.1)]
    alpha: f64,

    /// Pause between samples in milliseconds
    #[arg(long, default_value_t = 20)]
    interval_ms: u64,

    /// Stop after this many samples instead of running forever
    #[arg(long)]
    count: Option<usize>,

    /// Seed for the noise; also makes time advance by a fixed step per
    /// sample so the output is reproducible
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the output to this file, replacing its contents
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    // stdout carries the data, diagnostics go to stderr.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SignalError> {
    let interval = Duration::from_millis(args.interval_ms);
    let config = SignalConfig {
        noise: args.noise,
        alpha: args.alpha,
        interval,
        fixed_step: args.seed.map(|_| interval),
    };
    config.validate()?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let source = SignalSource::new(&config, rng);
    let samples: Box<dyn Iterator<Item = Sample>> = match args.count {
        Some(n) => Box::new(source.take(n)),
        None => Box::new(source),
    };

    let stdout = io::stdout().lock();
    match &args.output {
        Some(path) => {
            let file = create_output(path)?;
            tracing::info!("Writing samples to {}", path.display());
            let mut out = Tee {
                first: stdout,
                second: io::BufWriter::new(file),
            };
            emit(&mut out, samples, config.interval)?;
            out.flush()?;
        }
        None => {
            let mut out = stdout;
            emit(&mut out, samples, config.interval)?;
        }
    }
    Ok(())
}
