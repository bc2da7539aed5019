//! halo-issues - report open Halo security issues across a server group hierarchy

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod output;
mod report;

use cli::Cli;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    cli::report::run(&cli).await
}

/// Log to stderr. Flags raise the level of this crate only; dependencies stay
/// at `warn`. `RUST_LOG` overrides both.
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), log_level(cli.verbose, cli.debug))
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn log_level(verbose: bool, debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}
