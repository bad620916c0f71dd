//! Per-country row selection.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::table::{Row, Table};

/// Column holding the country name.
pub const COUNTRY_COLUMN: usize = 0;
/// Column holding the sex category label.
pub const SEX_COLUMN: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SexCategory {
    BothSexes,
    Male,
    Female,
}

impl SexCategory {
    pub const ALL: [Self; 3] = [Self::BothSexes, Self::Male, Self::Female];

    pub fn label(self) -> &'static str {
        match self {
            Self::BothSexes => "Both sexes",
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    /// Exact match against the label; callers trim first.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    fn slot(self) -> usize {
        match self {
            Self::BothSexes => 0,
            Self::Male => 1,
            Self::Female => 2,
        }
    }
}

impl fmt::Display for SexCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A country's rows, one optional slot per sex category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    country: String,
    slots: [Option<Row>; 3],
}

impl Selection {
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn get(&self, category: SexCategory) -> Option<&Row> {
        self.slots.get(category.slot()).and_then(Option::as_ref)
    }

    pub fn both_sexes(&self) -> Option<&Row> {
        self.get(SexCategory::BothSexes)
    }

    pub fn male(&self) -> Option<&Row> {
        self.get(SexCategory::Male)
    }

    pub fn female(&self) -> Option<&Row> {
        self.get(SexCategory::Female)
    }

    /// The row for `category`, or [`Error::MissingCategory`].
    ///
    /// # Errors
    ///
    /// Fails when no row for this country had that sex label.
    pub fn require(&self, category: SexCategory) -> Result<&Row> {
        self.get(category).ok_or_else(|| Error::MissingCategory {
            country: self.country.clone(),
            category,
        })
    }

    /// True when no row matched the country at all.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Present slots in category order.
    pub fn iter(&self) -> impl Iterator<Item = (SexCategory, &Row)> + '_ {
        SexCategory::ALL
            .into_iter()
            .filter_map(|c| self.get(c).map(|row| (c, row)))
    }

    fn set(&mut self, category: SexCategory, row: Row) {
        if let Some(slot) = self.slots.get_mut(category.slot()) {
            *slot = Some(row);
        }
    }
}

/// Scans `table` for rows whose country column equals `country_name`.
///
/// Both the stored name and `country_name` are trimmed before the
/// case-sensitive comparison. Later rows overwrite earlier ones with the same
/// sex category. Rows with an unrecognised sex label are skipped.
pub fn select_country(table: &Table, country_name: &str) -> Selection {
    let target = country_name.trim();
    let mut selection = Selection {
        country: target.to_owned(),
        ..Default::default()
    };

    for row in table {
        if row.text_trimmed(COUNTRY_COLUMN) != Some(target) {
            continue;
        }

        match row.text_trimmed(SEX_COLUMN).and_then(SexCategory::from_label) {
            Some(category) => selection.set(category, row.clone()),
            None => debug!(
                country = target,
                line = row.line(),
                sex = ?row.get(SEX_COLUMN),
                "Ignoring row with unrecognised sex category"
            ),
        }
    }

    debug!(
        country = target,
        found = selection.iter().count(),
        "Selected country rows"
    );
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Field;

    fn row(country: &str, sex: &str, values: &[f64]) -> Row {
        let mut fields = vec![Field::from(country), Field::from(sex)];
        fields.extend(values.iter().copied().map(Field::Number));
        Row::new(fields)
    }

    fn sample_table() -> Table {
        Table::from_rows(vec![
            row("Albania", " Both sexes", &[5.0, 6.0]),
            row("Afghanistan", " Both sexes", &[10.0, 20.0]),
            row("Afghanistan", " Male", &[11.0, 21.0]),
            row("Afghanistan", " Female", &[9.0, 19.0]),
            row("Albania", " Male", &[7.0, 8.0]),
        ])
    }

    #[test]
    fn test_selects_each_category() {
        let table = sample_table();
        let selection = select_country(&table, "Afghanistan");

        assert_eq!(selection.country(), "Afghanistan");
        assert_eq!(selection.both_sexes(), table.rows().get(1));
        assert_eq!(selection.male(), table.rows().get(2));
        assert_eq!(selection.female(), table.rows().get(3));
        assert_eq!(selection.iter().count(), 3);
    }

    #[test]
    fn test_absent_country_gives_empty_selection() {
        let selection = select_country(&sample_table(), "Atlantis");
        assert!(selection.is_empty());
        assert!(selection.both_sexes().is_none());
        assert!(selection.male().is_none());
        assert!(selection.female().is_none());
    }

    #[test]
    fn test_partial_selection() {
        let table = Table::from_rows(vec![row("Afghanistan", " Both sexes", &[10.0, 20.0])]);
        let selection = select_country(&table, "Afghanistan");

        assert_eq!(
            selection.both_sexes().map(Row::fields),
            Some(
                &[
                    Field::from("Afghanistan"),
                    Field::from(" Both sexes"),
                    Field::Number(10.0),
                    Field::Number(20.0),
                ][..]
            )
        );
        assert!(selection.male().is_none());
        assert!(selection.female().is_none());

        let err = selection
            .require(SexCategory::Male)
            .expect_err("male row is missing");
        assert!(matches!(
            err,
            Error::MissingCategory {
                category: SexCategory::Male,
                ..
            }
        ));
    }

    #[test]
    fn test_last_match_wins() {
        let table = Table::from_rows(vec![
            row("Chad", "Male", &[1.0]),
            row("Chad", "Male", &[2.0]),
            row("Chad", "Male", &[3.0]),
        ]);
        let selection = select_country(&table, "Chad");
        let values = selection
            .male()
            .and_then(|r| r.get(2))
            .and_then(Field::as_number);
        assert_eq!(values, Some(3.0));
    }

    #[test]
    fn test_target_name_is_trimmed() {
        let table = Table::from_rows(vec![row(" Peru ", "Female", &[2.0])]);
        let selection = select_country(&table, "  Peru\t");
        assert!(selection.female().is_some());
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let table = Table::from_rows(vec![row("Peru", "Female", &[2.0])]);
        assert!(select_country(&table, "peru").is_empty());
        assert!(select_country(&Table::default(), "Peru").is_empty());
    }

    #[test]
    fn test_unknown_sex_label_is_dropped() {
        let table = Table::from_rows(vec![
            row("Peru", "Unknown", &[1.0]),
            row("Peru", "male", &[1.0]),
        ]);
        assert!(select_country(&table, "Peru").is_empty());
    }

    #[test]
    fn test_short_and_numeric_rows_do_not_match() {
        let table = Table::from_rows(vec![
            Row::new(vec![Field::from("Peru")]),
            Row::new(vec![Field::Number(1.0), Field::from("Male")]),
            Row::default(),
        ]);
        assert!(select_country(&table, "Peru").is_empty());
        assert!(select_country(&table, "1").is_empty());
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in SexCategory::ALL {
            assert_eq!(SexCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(SexCategory::from_label(" Male"), None);
    }
}
