//! # suicide-rates
//!
//! Reads a table of suicide rates by country, sex and year, picks out two
//! countries, and charts their Both sexes / Male / Female series side by side.
//!
//! ```no_run
//! use suicide_rates::config::ChartConfig;
//! use suicide_rates::select::select_country;
//! use suicide_rates::table::load_table;
//!
//! # fn example() -> suicide_rates::error::Result<()> {
//! let config = ChartConfig::default();
//! let table = load_table(&config.input, &config.load_options()?)?;
//!
//! let afghanistan = select_country(&table, "Afghanistan");
//! if let Some(row) = afghanistan.male() {
//!     println!("{} fields from line {}", row.len(), row.line());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`table`]: delimited-text loader producing mixed number/text rows
//! - [`select`]: per-country lookup bucketed by sex category
//! - [`chart`]: turns selections into plot series and drives a full run
//! - [`render`]: SVG composition and PNG rasterisation
//! - [`viewer`]: interactive `egui` window
//! - [`config`]: run configuration (JSON, serde)
//! - [`error`]: error type and context helpers
//! - [`logging`]: `tracing` subscriber setup

#![warn(clippy::all, rust_2018_idioms)]

pub mod chart;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod select;
pub mod table;
pub mod theme;
pub mod viewer;
