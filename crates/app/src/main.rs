//! apiprobe - HTTP API assertion test runner
//!
//! Runs suites of HTTP cases and reports which assertions held.

use apiprobe::{Cli, logging};
use clap::Parser;

/// Exit code for usage and configuration errors.
const EXIT_USAGE: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbosity());

    match cli.execute().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(EXIT_USAGE);
        }
    }
}
