//! Run configuration.
//!
//! [`ChartConfig`] holds every parameter of a chart run: input file and load
//! options, the two countries and how they are drawn, year labels, output
//! image and the interpretation text. It is read from JSON with serde, with
//! missing keys taking the defaults that reproduce the stock comparison.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result, ResultExt as _};
use crate::table::LoadOptions;

/// Leading columns (country, sex) that precede the year values.
pub const LEADING_COLUMNS: usize = 2;

pub const DEFAULT_INTERPRETATION: &str = "Interpretation: The graph compares the suicide rates of Afghanistan (a developing country) and the United States (a developed country). This data is crucial because it highlights significant differences in suicide rates between these two countries. Specifically, the trend for both sexes in the United States shows a clear decrease from 2000 to 2015, whereas Afghanistan exhibits an increase. This disparity may be due to differences in healthcare systems. Afghanistan's healthcare system is less developed and lacks resources for mental health care, while the United States has a more advanced healthcare infrastructure with greater access to mental health services. Additionally, the comparison between male and female suicide rates reveals that, in the United States, both genders show a decreasing trend, aligning with the overall decline in suicide rates for both sexes. Conversely, Afghanistan shows a notable increase in the male suicide rate, while the female rate remains relatively stable with a minor decrease.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle,
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Solid,
    Dotted,
}

/// A country to plot and how its three series are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryConfig {
    /// Name as it appears in the country column.
    pub name: String,
    /// Prefix for legend entries, e.g. `USA` gives `USA(Male)`.
    pub label: String,
    pub marker: Marker,
    pub line: LineKind,
}

impl CountryConfig {
    pub fn new(name: &str, label: &str, marker: Marker, line: LineKind) -> Self {
        Self {
            name: name.to_owned(),
            label: label.to_owned(),
            marker,
            line,
        }
    }
}

/// Everything the chart run needs. Missing keys in a config file fall back
/// to [`ChartConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub input: PathBuf,
    pub header: usize,
    pub delimiter: char,
    /// Plotted in this order.
    pub countries: [CountryConfig; 2],
    /// One label per value column after the country and sex columns.
    pub years: Vec<String>,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub interpretation: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("suicide_data.csv"),
            header: 1,
            delimiter: ',',
            countries: [
                CountryConfig::new(
                    "United States of America",
                    "USA",
                    Marker::Cross,
                    LineKind::Dotted,
                ),
                CountryConfig::new(
                    "Afghanistan",
                    "Afghanistan",
                    Marker::Circle,
                    LineKind::Solid,
                ),
            ],
            years: ["2000", "2005", "2010", "2015"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            output: PathBuf::from("suicide_rate.png"),
            width: 1200,
            height: 600,
            title: "Suicide Rates in Afghanistan vs America".to_owned(),
            x_label: "Years".to_owned(),
            y_label: "Suicide Rates".to_owned(),
            interpretation: DEFAULT_INTERPRETATION.to_owned(),
        }
    }
}

impl ChartConfig {
    /// Reads a JSON config file and validates it.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON, or does not pass
    /// [`ChartConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded chart config");
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialisation fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.years.is_empty() {
            return Err(Error::Config("at least one year label is required".to_owned()));
        }
        if !self.delimiter.is_ascii() {
            return Err(Error::Config(format!(
                "delimiter {:?} must be a single ASCII character",
                self.delimiter
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "image size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        for country in &self.countries {
            if country.name.trim().is_empty() {
                return Err(Error::Config("country name must not be empty".to_owned()));
            }
        }
        let [first, second] = &self.countries;
        if first.name.trim() == second.name.trim() {
            return Err(Error::Config(format!(
                "cannot compare {} with itself",
                first.name.trim()
            )));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] if the delimiter is not ASCII.
    pub fn load_options(&self) -> Result<LoadOptions> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Error::Config(format!(
                    "delimiter {:?} must be a single ASCII character",
                    self.delimiter
                ))
            })?;
        Ok(LoadOptions {
            header: self.header,
            delimiter,
        })
    }
}
