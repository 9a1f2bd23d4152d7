mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "payout",
    version,
    about = "Convert marketplace payout statements (PDF) into Excel datasets"
)]
struct Cli {
    /// Log extraction decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a statement PDF into an .xlsx workbook
    Convert {
        /// Path to the statement PDF
        input_file: PathBuf,

        /// Write the workbook to this file
        #[arg(short, long, value_name = "FILE", conflicts_with = "dir")]
        output: Option<PathBuf>,

        /// Write the workbook under its generated name into this directory
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Leave extracted page tables out of the workbook
        #[arg(long)]
        no_raw_tables: bool,
    },
    /// Extract a statement PDF without writing a workbook
    Parse {
        /// Path to the statement PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Rows shown per dataset preview
        #[arg(long, value_name = "N", default_value_t = output::table::DEFAULT_PREVIEW_ROWS)]
        rows: usize,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input_file,
            output,
            dir,
            no_raw_tables,
        } => commands::convert::run(input_file, output, dir, no_raw_tables),
        Commands::Parse {
            input_file,
            output,
            out,
            rows,
        } => commands::parse::run(input_file, &output, out, rows),
    };

    if let Err(e) = result {
        eprintln!("Error: Error processing PDF: {e}");
        std::process::exit(1);
    }
}
