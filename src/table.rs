//! Table loading: delimited text in, mixed-type rows out.
//!
//! Fields that parse as floating-point numbers become [`Field::Number`];
//! everything else is kept verbatim as [`Field::Text`], surrounding whitespace
//! included. Row width is checked while loading so a truncated line is
//! reported with its line number instead of failing later on access.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// One cell of a data row.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Number(f64),
    Text(String),
}

impl Field {
    /// Numeric if the text (ignoring surrounding whitespace) is a float
    /// literal, otherwise the original text unchanged.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) => Self::Number(value),
            Err(_) => Self::Text(raw.to_owned()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s.as_str()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// A parsed data line: `[country, sex, value columns...]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// 1-based line in the source file, 0 for rows built in memory.
    line: u64,
    fields: Vec<Field>,
}

impl Row {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { line: 0, fields }
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Trimmed text of a column, `None` if the column is missing or numeric.
    pub fn text_trimmed(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Field::as_text).map(str::trim)
    }
}

/// All data rows of a file, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Leading lines discarded without inspection.
    pub header: usize,
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            header: 0,
            delimiter: b',',
        }
    }
}

/// Loads `path` into a [`Table`].
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, and the
/// errors of [`read_table`] for malformed content.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<Table> {
    let file = File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })?;

    let table = read_table(file, options)?;
    debug!(
        path = %path.display(),
        rows = table.len(),
        header = options.header,
        "Loaded table"
    );
    Ok(table)
}

/// Parses delimited text from any reader.
///
/// The first `header` physical lines are discarded before CSV parsing, so
/// quotes in them cannot swallow data lines. Empty lines after the header are
/// ignored by the CSV reader. The last field of each line has trailing
/// whitespace removed.
///
/// # Errors
///
/// Returns [`Error::RowShape`] when a data row is wider or narrower than the
/// first data row, [`Error::Csv`] when a record cannot be decoded, and
/// [`Error::Io`] when the header lines cannot be read.
pub fn read_table<R: Read>(reader: R, options: &LoadOptions) -> Result<Table> {
    let mut reader = BufReader::new(reader);
    let skipped = skip_lines(&mut reader, options.header)?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::None)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut width: Option<usize> = None;

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        let line = skipped
            + record
                .position()
                .map_or(idx as u64 + 1, csv::Position::line);

        let last = record.len().saturating_sub(1);
        let fields: Vec<Field> = record
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                if i == last {
                    Field::parse(raw.trim_end())
                } else {
                    Field::parse(raw)
                }
            })
            .collect();

        match width {
            None => width = Some(fields.len()),
            Some(expected) if expected != fields.len() => {
                return Err(Error::RowShape {
                    line,
                    expected,
                    found: fields.len(),
                });
            }
            Some(_) => {}
        }

        rows.push(Row { line, fields });
    }

    Ok(Table::from_rows(rows))
}

/// Discards up to `count` lines, returning how many were actually there.
fn skip_lines<R: BufRead>(reader: &mut R, count: usize) -> Result<u64> {
    let mut buf = Vec::new();
    let mut skipped = 0;
    for _ in 0..count {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        skipped += 1;
        trace!(line = skipped, "Skipping header line");
    }
    Ok(skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str, header: usize) -> Result<Table> {
        read_table(
            text.as_bytes(),
            &LoadOptions {
                header,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_single_data_line() -> Result<()> {
        let table = read(
            "Country,Sex,2000,2005\nAfghanistan, Both sexes, 10.0, 20.0\n",
            1,
        )?;

        assert_eq!(table.len(), 1);
        let row = table.rows().first().expect("one row");
        assert_eq!(
            row.fields(),
            &[
                Field::from("Afghanistan"),
                Field::from(" Both sexes"),
                Field::Number(10.0),
                Field::Number(20.0),
            ]
        );
        assert_eq!(row.line(), 2);
        Ok(())
    }

    #[test]
    fn test_header_lines_are_skipped_in_order() -> Result<()> {
        let text = "title\ncolumns\na,1\nb,2\nc,3\n";
        let table = read(text, 2)?;

        assert_eq!(table.len(), 3);
        let names: Vec<_> = table.iter().filter_map(|r| r.text_trimmed(0)).collect();
        assert_eq!(names, ["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn test_quote_in_header_does_not_swallow_rows() -> Result<()> {
        let table = read("Country,\"Sex,2000\nA,Male,1\nB,Male,2\n", 1)?;

        assert_eq!(table.len(), 2);
        let lines: Vec<_> = table.iter().map(Row::line).collect();
        assert_eq!(lines, [2, 3]);
        Ok(())
    }

    #[test]
    fn test_empty_header_lines_are_counted() -> Result<()> {
        let table = read("\n\nA,Male,1\n", 2)?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows().first().map(Row::line), Some(3));
        Ok(())
    }

    #[test]
    fn test_header_zero_keeps_everything() -> Result<()> {
        let table = read("x,1\ny,2\n", 0)?;
        assert_eq!(table.len(), 2);
        Ok(())
    }

    #[test]
    fn test_header_larger_than_file() -> Result<()> {
        let table = read("x,1\ny,2\n", 5)?;
        assert!(table.is_empty());
        Ok(())
    }

    #[test]
    fn test_numeric_parsing() {
        assert_eq!(Field::parse("12.5"), Field::Number(12.5));
        assert_eq!(Field::parse(" 3"), Field::Number(3.0));
        assert_eq!(Field::parse("-1e3"), Field::Number(-1000.0));
        assert_eq!(Field::parse(".5 "), Field::Number(0.5));
        assert!(matches!(Field::parse("inf"), Field::Number(v) if v.is_infinite()));
    }

    #[test]
    fn test_text_keeps_whitespace() {
        assert_eq!(Field::parse(" Male"), Field::Text(" Male".to_owned()));
        assert_eq!(Field::parse("10.2 [5-16]"), Field::from("10.2 [5-16]"));
        assert_eq!(Field::parse(""), Field::from(""));
        assert_eq!(Field::parse(" "), Field::from(" "));
    }

    #[test]
    fn test_trailing_whitespace_on_last_field_is_removed() -> Result<()> {
        let table = read("a, note  \r\n", 0)?;
        let row = table.rows().first().expect("one row");
        assert_eq!(row.get(1), Some(&Field::from(" note")));
        Ok(())
    }

    #[test]
    fn test_row_shape_mismatch_reports_line() {
        let text = "header\nA,Male,1,2\nB,Male,1\n";
        let err = read(text, 1).expect_err("short row must fail");
        assert!(
            matches!(
                err,
                Error::RowShape {
                    line: 3,
                    expected: 4,
                    found: 3
                }
            ),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_header_width_is_not_checked() -> Result<()> {
        let table = read("only,two\nA,Male,1,2\n", 1)?;
        assert_eq!(table.len(), 1);
        Ok(())
    }

    #[test]
    fn test_custom_delimiter_and_quotes() -> Result<()> {
        let options = LoadOptions {
            header: 0,
            delimiter: b';',
        };
        let table = read_table("\"Korea; Republic of\";Female;4.5\n".as_bytes(), &options)?;
        let row = table.rows().first().expect("one row");
        assert_eq!(row.text_trimmed(0), Some("Korea; Republic of"));
        assert_eq!(row.get(2).and_then(Field::as_number), Some(4.5));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_table(
            Path::new("definitely/not/here.csv"),
            &LoadOptions::default(),
        )
        .expect_err("missing file");
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("here.csv"));
    }
}
