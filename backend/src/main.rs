//! siz-hazards CLI - forward-fill a hazard/event table
//!
//! ```bash
//! siz-hazards                                  # files/siz_by_dangerous.csv → files/result.csv
//! siz-hazards -i table.csv -o out.csv          # other locations
//! siz-hazards --verbose                        # list every skipped row
//! ```

use clap::Parser;
use siz_hazards::logs::log_error;
use siz_hazards::{normalize_file, NormalizeOptions, DEFAULT_INPUT, DEFAULT_OUTPUT, HEADER_ROWS};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "siz-hazards")]
#[command(about = "Fill hazard fields of event rows and write complete records", long_about = None)]
struct Cli {
    /// Input table
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output table (overwritten)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Leading rows to skip
    #[arg(long, default_value_t = HEADER_ROWS)]
    header_rows: usize,

    /// Accept rows with differing field counts
    #[arg(long)]
    flexible: bool,

    /// Debug output, including skipped rows
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    fn options(&self) -> NormalizeOptions {
        NormalizeOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            header_rows: self.header_rows,
            flexible: self.flexible,
        }
    }
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::new(format!("siz_hazards={level}"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", level);
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.log_level());

    if let Err(e) = normalize_file(&cli.options()) {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }

    debug!("Done");
}
