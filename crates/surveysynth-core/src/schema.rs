use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::table::ResponseTable;

/// Inferred value domain for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDomain {
    /// All observations parse as numbers; bounded by the observed extremes.
    Numeric { min: f64, max: f64 },
    /// Distinct observed string values in first-seen order.
    Categorical { values: Vec<String> },
}

/// Per-column inferred domains for one table.
///
/// Derived once per run from the observed data and discarded after
/// generation; never persisted independently of its table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    columns: BTreeMap<String, ColumnDomain>,
}

impl TableSchema {
    /// Infer per-column domains from the non-missing observations.
    ///
    /// Columns with zero non-missing values are excluded, as are numeric
    /// columns whose extremes are not finite (NaN/inf pollution).
    pub fn infer(table: &ResponseTable) -> Self {
        let mut columns = BTreeMap::new();

        for column in table.columns() {
            let observed: Vec<&str> = column.observed().collect();
            if observed.is_empty() {
                continue;
            }

            match numeric_bounds(&observed) {
                NumericBounds::Range { min, max } => {
                    columns.insert(column.name.clone(), ColumnDomain::Numeric { min, max });
                }
                NumericBounds::Malformed => continue,
                NumericBounds::NotNumeric => {
                    let mut seen = HashSet::new();
                    let mut values = Vec::new();
                    for value in observed {
                        if seen.insert(value) {
                            values.push(value.to_string());
                        }
                    }
                    columns.insert(column.name.clone(), ColumnDomain::Categorical { values });
                }
            }
        }

        Self { columns }
    }

    pub fn domain(&self, column: &str) -> Option<&ColumnDomain> {
        self.columns.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnDomain)> {
        self.columns
            .iter()
            .map(|(name, domain)| (name.as_str(), domain))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

enum NumericBounds {
    Range { min: f64, max: f64 },
    Malformed,
    NotNumeric,
}

fn numeric_bounds(observed: &[&str]) -> NumericBounds {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in observed {
        let Ok(parsed) = value.trim().parse::<f64>() else {
            return NumericBounds::NotNumeric;
        };
        if !parsed.is_finite() {
            return NumericBounds::Malformed;
        }
        min = min.min(parsed);
        max = max.max(parsed);
    }

    NumericBounds::Range { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ResponseColumn;

    fn cell(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn table(columns: Vec<(&str, Vec<Option<String>>)>) -> ResponseTable {
        ResponseTable::from_columns(
            columns
                .into_iter()
                .map(|(name, cells)| ResponseColumn {
                    name: name.to_string(),
                    cells,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn all_missing_column_is_excluded() {
        let table = table(vec![("empty", vec![None, cell("  ")])]);
        let schema = TableSchema::infer(&table);
        assert!(schema.is_empty());
    }

    #[test]
    fn numeric_column_uses_observed_extremes() {
        let table = table(vec![("age", vec![cell("5"), cell("3"), None, cell("4")])]);
        let schema = TableSchema::infer(&table);
        assert_eq!(
            schema.domain("age"),
            Some(&ColumnDomain::Numeric { min: 3.0, max: 5.0 })
        );
    }

    #[test]
    fn mixed_values_classify_as_categorical_in_first_seen_order() {
        let table = table(vec![(
            "answer",
            vec![cell("نعم"), cell("لا"), cell("نعم"), cell("3")],
        )]);
        let schema = TableSchema::infer(&table);
        assert_eq!(
            schema.domain("answer"),
            Some(&ColumnDomain::Categorical {
                values: vec!["نعم".to_string(), "لا".to_string(), "3".to_string()],
            })
        );
    }

    #[test]
    fn non_finite_numeric_column_is_excluded() {
        let table = table(vec![("polluted", vec![cell("1"), cell("NaN")])]);
        let schema = TableSchema::infer(&table);
        assert!(schema.domain("polluted").is_none());
    }
}
