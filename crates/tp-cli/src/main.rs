//! tagperf CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tp_perf::{PerfConfig, RunSummary};

#[derive(Parser)]
#[command(name = "tagperf")]
#[command(about = "tagperf - flavor-tagging performance histograms")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill b/c-tagging histograms from full-schema event files
    BuildHists {
        /// Input event files (JSON lines, optionally .gz), read in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file; must not exist
        #[arg(short, long)]
        output: PathBuf,

        /// Test run: first events only
        #[arg(long)]
        test: bool,

        /// JSON run configuration (binning, selection, event caps)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fill JetFitterCharm study histograms from reduced-schema event files
    FillPeters {
        /// Input event files (JSON lines, optionally .gz), read in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file; must not exist
        #[arg(short, long)]
        output: PathBuf,

        /// Test run: first events only, and list the fields read
        #[arg(long)]
        test: bool,

        /// JSON run configuration (binning, selection, event caps)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::BuildHists { files, output, test, config } => {
            let config = load_config(config.as_deref(), test)?;
            tracing::info!(files = files.len(), output = %output.display(), "building hists");
            let summary = tp_perf::build_hists(&files, &output, config)?;
            report(&summary)
        }
        Commands::FillPeters { files, output, test, config } => {
            let config = load_config(config.as_deref(), test)?;
            tracing::info!(files = files.len(), output = %output.display(), "filling peter hists");
            let summary = tp_perf::fill_peters_hists(&files, &output, config)?;
            report(&summary)
        }
        Commands::Version => {
            println!("tagperf {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>, test: bool) -> Result<PerfConfig> {
    let mut config = match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading config");
            PerfConfig::from_json_file(p)?
        }
        None => PerfConfig::default(),
    };
    config.test_mode |= test;
    Ok(config)
}

fn report(summary: &RunSummary) -> Result<()> {
    tracing::info!(
        events = summary.events,
        jets = summary.total_jets,
        selected = summary.selected_jets,
        "run complete"
    );
    let out = serde_json::json!({
        "events": summary.events,
        "total_jets": summary.total_jets,
        "selected_jets": summary.selected_jets,
        "output": summary.output.display().to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
