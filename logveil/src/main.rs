// logveil/src/main.rs
//! Logveil entry point: parse arguments, initialize logging, run the
//! stream-masking loop.

use anyhow::Result;
use clap::Parser;

use logveil::cli::Cli;
use logveil::commands::mask;
use logveil::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if cli.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    mask::run(&cli)
}
