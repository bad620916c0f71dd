//! Composition of loading, selection and rendering into one chart run.
//!
//! [`build_chart`] turns a loaded [`Table`] into six numeric series (three sex
//! categories for each of the two configured countries). Selected rows are
//! checked against the configured year labels before their value columns are
//! taken, so a file with a different column layout is rejected instead of
//! being silently mislabelled.

use std::io::Write;

use tracing::{debug, info};

use crate::config::{ChartConfig, LEADING_COLUMNS, LineKind, Marker};
use crate::error::{Error, Result};
use crate::render;
use crate::select::{SexCategory, select_country};
use crate::table::{Field, Row, Table, load_table};
use crate::viewer;

/// One plotted line: values aligned with [`ChartData::years`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub category: SexCategory,
    pub marker: Marker,
    pub line: LineKind,
    pub values: Vec<f64>,
}

/// What the renderers draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub years: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    /// Smallest and largest finite value across all series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// The year-value columns of `row`, which must hold exactly `years` numbers
/// after the country and sex columns.
///
/// # Errors
///
/// [`Error::ColumnLayout`] on a width mismatch, [`Error::NonNumeric`] when a
/// value column holds text.
pub fn year_values(
    row: &Row,
    country: &str,
    category: SexCategory,
    years: usize,
) -> Result<Vec<f64>> {
    let expected = LEADING_COLUMNS + years;
    if row.len() != expected {
        return Err(Error::ColumnLayout {
            country: country.to_owned(),
            category,
            expected,
            found: row.len(),
        });
    }

    row.fields()
        .iter()
        .enumerate()
        .skip(LEADING_COLUMNS)
        .map(|(column, field)| match field {
            Field::Number(v) => Ok(*v),
            Field::Text(text) => Err(Error::NonNumeric {
                country: country.to_owned(),
                category,
                column,
                value: text.clone(),
            }),
        })
        .collect()
}

/// Selects both configured countries and builds their series.
///
/// Series come in config order, each country contributing Both sexes, Male
/// and Female in that order.
///
/// # Errors
///
/// Fails if a country lacks a row for any sex category, or a selected row
/// does not match the year labels (see [`year_values`]).
pub fn build_chart(table: &Table, config: &ChartConfig) -> Result<ChartData> {
    let mut series = Vec::with_capacity(config.countries.len() * SexCategory::ALL.len());

    for country in &config.countries {
        let selection = select_country(table, &country.name);
        for category in SexCategory::ALL {
            let row = selection.require(category)?;
            let values = year_values(row, selection.country(), category, config.years.len())?;
            debug!(
                country = selection.country(),
                %category,
                line = row.line(),
                ?values,
                "Built series"
            );
            series.push(Series {
                label: format!("{}({})", country.label, category),
                category,
                marker: country.marker,
                line: country.line,
                values,
            });
        }
    }

    Ok(ChartData {
        title: config.title.clone(),
        x_label: config.x_label.clone(),
        y_label: config.y_label.clone(),
        years: config.years.clone(),
        series,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Open the interactive viewer after writing the image.
    pub display: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { display: true }
    }
}

/// Load, select, render, then write the interpretation paragraph to `out`.
///
/// # Errors
///
/// Propagates configuration, loading, layout, rendering and viewer errors.
pub fn run(config: &ChartConfig, options: &RunOptions, out: &mut dyn Write) -> Result<ChartData> {
    config.validate()?;

    let table = load_table(&config.input, &config.load_options()?)?;
    info!(
        input = %config.input.display(),
        rows = table.len(),
        "Loaded suicide-rate table"
    );

    let chart = build_chart(&table, config)?;

    render::save_chart(&chart, &config.output, config.width, config.height)?;
    info!(output = %config.output.display(), "Chart written");

    if options.display {
        viewer::show(chart.clone(), config.width, config.height)?;
    }

    writeln!(out, "{}", config.interpretation)?;
    Ok(chart)
}
