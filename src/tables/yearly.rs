//! Year-keyed reference tables (wage growth, CPI index, average pension)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map from calendar year to a rate or amount.
///
/// The same type backs annual rates (wage growth), cumulative indices (CPI)
/// and amounts (average pension); the meaning is fixed by the field of
/// `ReferenceTables` holding it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearTable {
    values: BTreeMap<i32, f64>,
}

impl YearTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit (year, value) pairs; later duplicates win
    pub fn from_entries<I: IntoIterator<Item = (i32, f64)>>(entries: I) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }

    /// Build a compounding series: `start_value` in `start_year`, then each
    /// following year multiplied by `1 + rate` for the next rate in `rates`.
    ///
    /// Used for cumulative price indices and for amounts that grow from a
    /// known anchor.
    pub fn compounding<I: IntoIterator<Item = f64>>(
        start_year: i32,
        start_value: f64,
        rates: I,
    ) -> Self {
        let mut values = BTreeMap::new();
        values.insert(start_year, start_value);

        let mut current = start_value;
        for (offset, rate) in rates.into_iter().enumerate() {
            current *= 1.0 + rate;
            values.insert(start_year + 1 + offset as i32, current);
        }

        Self { values }
    }

    /// Same rate for every year in `first_year..=last_year`
    pub fn constant(first_year: i32, last_year: i32, value: f64) -> Self {
        Self::from_entries((first_year..=last_year).map(|year| (year, value)))
    }

    pub fn insert(&mut self, year: i32, value: f64) {
        self.values.insert(year, value);
    }

    pub fn get(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }

    /// Value for `year`, or `default` when the year is not in the table
    pub fn get_or(&self, year: i32, default: f64) -> f64 {
        match self.values.get(&year) {
            Some(value) => *value,
            None => {
                log::trace!("no table entry for {}, using default {}", year, default);
                default
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.values.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.values.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.values.iter().map(|(year, value)| (*year, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_get_or_falls_back() {
        let table = YearTable::from_entries([(2020, 0.05), (2021, 0.07)]);
        assert_eq!(table.get_or(2020, 0.03), 0.05);
        assert_eq!(table.get_or(2030, 0.03), 0.03);
        assert_eq!(table.get(2030), None);
    }

    #[test]
    fn test_compounding_series() {
        let table = YearTable::compounding(2020, 100.0, [0.10, 0.05]);
        assert_eq!(table.len(), 3);
        assert_relative_eq!(table.get(2020).unwrap(), 100.0);
        assert_relative_eq!(table.get(2021).unwrap(), 110.0);
        assert_relative_eq!(table.get(2022).unwrap(), 115.5, epsilon = 1e-9);
        assert_eq!(table.first_year(), Some(2020));
        assert_eq!(table.last_year(), Some(2022));
    }

    #[test]
    fn test_constant_table() {
        let table = YearTable::constant(2000, 2004, 0.02);
        assert_eq!(table.len(), 5);
        assert!(table.iter().all(|(_, rate)| rate == 0.02));
    }
}
