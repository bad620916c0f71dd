//! Command-line interface.
//!
//! Flags override the values of the optional JSON config file, which in turn
//! override the built-in defaults.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use suicide_rates::chart::{self, RunOptions};
use suicide_rates::config::ChartConfig;

#[derive(Parser, Debug)]
#[command(
    name = "suicide-rates",
    version,
    about = "Chart suicide rates by sex for two countries"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON configuration file. Keys that are left out use the built-in defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data file to read (overrides the config file)
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Chart image to write; `.svg` writes SVG, anything else PNG
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Number of leading lines to skip
    #[arg(long, global = true)]
    pub header: Option<usize>,

    /// Field delimiter (single ASCII character)
    #[arg(long, global = true)]
    pub delimiter: Option<char>,

    /// Year labels for the value columns, comma separated
    #[arg(long, value_delimiter = ',', global = true)]
    pub years: Vec<String>,

    /// Write the chart without opening a window
    #[arg(long)]
    pub no_display: bool,

    /// Also write rolling log files to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Print the effective configuration as JSON and exit
    PrintConfig,
}

impl Cli {
    /// The config file (or defaults) with command-line overrides applied.
    pub fn chart_config(&self) -> Result<ChartConfig> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::load(path)?,
            None => ChartConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(header) = self.header {
            config.header = header;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if !self.years.is_empty() {
            config.years.clone_from(&self.years);
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.chart_config()?;

    match cli.command {
        Some(Commands::PrintConfig) => {
            println!("{}", config.to_json()?);
        }
        None => {
            let options = RunOptions {
                display: !cli.no_display,
            };
            let mut stdout = std::io::stdout().lock();
            chart::run(&config, &options, &mut stdout).context("Chart run failed")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
