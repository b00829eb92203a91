use std::cmp::Ordering;

use super::cell::CellValue;
use super::column::Column;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Case-insensitive substring on the displayed value.
    Contains(String),
    Equals(CellValue),
    /// Inclusive range; a missing bound is open.
    Between {
        min: Option<CellValue>,
        max: Option<CellValue>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    pub key: String,
    pub op: FilterOp,
}

impl ColumnFilter {
    pub fn contains(key: impl Into<String>, needle: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op: FilterOp::Contains(needle.into()),
        }
    }

    pub fn equals(key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Self {
            key: key.into(),
            op: FilterOp::Equals(value.into()),
        }
    }

    pub fn between(
        key: impl Into<String>,
        min: Option<CellValue>,
        max: Option<CellValue>,
    ) -> Self {
        Self {
            key: key.into(),
            op: FilterOp::Between { min, max },
        }
    }

    pub fn matches(&self, value: &CellValue) -> bool {
        match &self.op {
            FilterOp::Contains(needle) => {
                let needle = needle.trim().to_lowercase();
                needle.is_empty() || value.contains_lowercase(&needle)
            }
            FilterOp::Equals(expected) => value.compare(expected) == Ordering::Equal,
            FilterOp::Between { min, max } => {
                if value.is_empty() {
                    return false;
                }
                let above = min
                    .as_ref()
                    .map_or(true, |min| value.compare(min) != Ordering::Less);
                let below = max
                    .as_ref()
                    .map_or(true, |max| value.compare(max) != Ordering::Greater);
                above && below
            }
        }
    }
}

/// Global search: any filterable column contains the text. Blank matches all.
pub fn matches_search<T>(columns: &[Column<T>], row: &T, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    columns
        .iter()
        .filter(|c| c.filterable)
        .any(|c| c.value(row).contains_lowercase(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn between_has_open_bounds() {
        let filter = ColumnFilter::between("price", Some(dec!(10).into()), None);
        assert!(filter.matches(&dec!(10).into()));
        assert!(filter.matches(&dec!(1000).into()));
        assert!(!filter.matches(&dec!(9.99).into()));
        assert!(!filter.matches(&CellValue::Empty));
    }

    #[test]
    fn equals_compares_numbers_by_value() {
        let filter = ColumnFilter::equals("tax", dec!(21));
        assert!(filter.matches(&dec!(21.00).into()));
    }

    #[test]
    fn blank_contains_matches_everything() {
        let filter = ColumnFilter::contains("code", "  ");
        assert!(filter.matches(&CellValue::Empty));
    }
}
