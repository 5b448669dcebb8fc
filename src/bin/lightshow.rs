use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::Parser;
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use lightshow::{run_file, LightshowError, Variant, DEFAULT_GRID_SIZE};

#[derive(Parser)]
#[command(name = "lightshow", about = "Perform Lightshow")]
struct Cli {
    /// The input data file name, or "-" to read standard input.
    input: PathBuf,

    /// Directory in which to look for the input file.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Lighting system: 1 (on/off) or 2 (brightness).
    #[arg(long, default_value = "1")]
    system: Variant,

    /// The side length of the grid.
    #[arg(
        long,
        default_value_t = DEFAULT_GRID_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    grid: usize,
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn run(cli: &Cli) -> Result<u64, LightshowError> {
    let path = match &cli.data_dir {
        Some(dir) => dir.join(&cli.input),
        None => cli.input.clone(),
    };
    let total = run_file(&path, cli.system, cli.grid)?;
    event!(
        Level::INFO,
        "[{}] The final brightness is {}.",
        cli.system,
        total
    );
    Ok(total)
}

/// The error's message followed by each underlying cause.
fn error_report(e: &dyn Error) -> String {
    let mut report = e.to_string();
    let mut cause = e.source();
    while let Some(c) = cause {
        report.push_str(": ");
        report.push_str(&c.to_string());
        cause = c.source();
    }
    report
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    match run(&cli) {
        Ok(total) => println!("{}", total),
        Err(e) => {
            event!(Level::ERROR, "{}", error_report(&e));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_dir() -> String {
        format!("{}/data", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn test_default_filter_builds() {
        assert!(tracing_subscriber::EnvFilter::try_new("info").is_ok());
        assert!(tracing_subscriber::EnvFilter::try_new("lightshow=debug,warn").is_ok());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["lightshow", "sample_input.txt"]);
        assert_eq!(cli.system, Variant::Binary);
        assert_eq!(cli.grid, DEFAULT_GRID_SIZE);
        assert_eq!(cli.data_dir, None);
    }

    #[test]
    fn test_run_sample_from_data_dir() {
        let dir = data_dir();
        let cli = Cli::parse_from(["lightshow", "--data-dir", dir.as_str(), "sample_input.txt"]);
        assert_eq!(run(&cli).unwrap(), 998996);
    }

    #[test]
    fn test_run_sample_system_2() {
        let dir = data_dir();
        let cli = Cli::parse_from([
            "lightshow",
            "--system",
            "2",
            "--data-dir",
            dir.as_str(),
            "sample_input.txt",
        ]);
        assert_eq!(cli.system, Variant::Additive);
        assert_eq!(run(&cli).unwrap(), 1001996);
    }

    #[test]
    fn test_small_grid_rejects_sample() {
        let dir = data_dir();
        let cli = Cli::parse_from([
            "lightshow",
            "--grid",
            "500",
            "--data-dir",
            dir.as_str(),
            "sample_input.txt",
        ]);
        assert!(matches!(run(&cli), Err(LightshowError::Coordinate)));
    }

    #[test]
    fn test_missing_input_reports_cause() {
        let dir = data_dir();
        let cli = Cli::parse_from(["lightshow", "--data-dir", dir.as_str(), "nope.txt"]);
        let err = run(&cli).unwrap_err();
        assert!(matches!(err, LightshowError::Io(_)));
        let report = error_report(&err);
        assert!(report.starts_with("Input data is unavailable."));
        assert!(report.len() > err.to_string().len());
    }

    #[test]
    fn test_read_failure_cause_is_reported() {
        let cause = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let report = error_report(&LightshowError::Io(cause));
        assert!(report.ends_with(": stream did not contain valid UTF-8"));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(Cli::try_parse_from(["lightshow", "--grid", "0", "sample_input.txt"]).is_err());
        assert!(Cli::try_parse_from(["lightshow", "--grid", "-5", "sample_input.txt"]).is_err());
        assert!(Cli::try_parse_from(["lightshow", "--system", "3", "sample_input.txt"]).is_err());
        assert!(Cli::try_parse_from(["lightshow"]).is_err());
    }
}
