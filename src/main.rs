//! # suicide-rates entry point
//!
//! ```bash
//! suicide-rates                            # default data file, opens a window
//! suicide-rates --no-display -o chart.svg  # headless, SVG output
//! suicide-rates --config rates.json print-config
//! ```
//!
//! Errors propagate to `main`, which prints the context chain and exits
//! with a non-zero status.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // print-config writes JSON to stdout

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    suicide_rates::logging::init_with(cli.log_dir.as_deref(), cli.verbose)?;

    cli::run(&cli)
}
