use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use reinfect::{OutputFormat, Overrides, init_logging, load_config, render_results, write_output};
use reinfect_core::{AnalysisConfig, run_analysis};

#[derive(Parser, Debug)]
#[command(name = "reinfect")]
#[command(about = "Monte Carlo analysis of partner-mediated chlamydia reinfection")]
struct Args {
    /// YAML analysis config; defaults are used for anything it omits
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ensemble size
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Include per-member arrays, not just summaries
    #[arg(long)]
    include_vectors: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    let config = Overrides {
        seed: args.seed,
        samples: args.samples,
    }
    .apply(config);

    let results = run_analysis(&config).wrap_err("analysis failed")?;
    let rendered = render_results(&results, args.format, args.include_vectors)?;
    write_output(args.output.as_deref(), &rendered)?;

    if let Some(path) = &args.output {
        tracing::info!(path = %path.display(), "results written");
    }
    Ok(())
}
