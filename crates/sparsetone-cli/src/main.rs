//! sparsetone - block-wise group-sparse decomposition CLI
//!
//! Usage:
//!   sparsetone info --config run.json              # Dictionary shape and Lipschitz constant
//!   sparsetone solve blocks.json --config run.json # Solve every block, JSON to stdout
//!   sparsetone solve signal.json -o out.json       # Split a flat signal into blocks first
//!   sparsetone activity out.json --threshold 0.05  # Active atoms per block

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;
mod logging;

use commands::{activity, info, solve};

/// sparsetone - group-sparse tonal decomposition
///
/// Solves ½‖Ax − y‖² + γ Σ‖x_g‖₂ block by block, with γ fixed or tuned to a
/// residual target.
#[derive(Parser)]
#[command(name = "sparsetone")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Run configuration (JSON); defaults apply when omitted
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve every block in a JSON file
    Solve {
        /// Blocks as `[[...], ...]`, or one flat signal `[...]`
        #[arg(value_name = "BLOCKS")]
        blocks: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Solve blocks in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Show dictionary dimensions and Lipschitz constant
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List active atoms per block from a solve report
    Activity {
        /// Report written by `solve`
        #[arg(value_name = "SOLUTIONS")]
        solutions: PathBuf,

        /// Magnitude an atom must exceed to count as active
        #[arg(short, long, default_value = "0.01")]
        threshold: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.quiet) {
        eprintln!("warning: logging disabled: {e}");
    }

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Solve {
            blocks,
            output,
            parallel,
        } => solve::run(config, &blocks, output.as_deref(), parallel),

        Commands::Info { json } => info::run(config, json),

        Commands::Activity {
            solutions,
            threshold,
            json,
        } => activity::run(&solutions, threshold, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
