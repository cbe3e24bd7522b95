//! Life expectancy (remaining months) by age and month of age

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::nearest_key;

/// Unisex remaining life expectancy in months, keyed by exact age in months
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifeExpectancyTable {
    months_by_age: BTreeMap<u32, f64>,
}

impl LifeExpectancyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (age, month, remaining_months) rows; month is 0-11
    pub fn from_rows<I: IntoIterator<Item = (u32, u32, f64)>>(rows: I) -> Self {
        let mut table = Self::default();
        for (age, month, months) in rows {
            table.insert(age, month, months);
        }
        table
    }

    /// Monthly grid derived from yearly values by linear interpolation
    /// between consecutive ages
    pub fn interpolated(yearly: &[(u32, f64)]) -> Self {
        let mut table = Self::default();
        for pair in yearly.windows(2) {
            let (age, months) = pair[0];
            let (next_age, next_months) = pair[1];
            let span = ((next_age - age) * 12) as f64;
            for step in 0..(next_age - age) * 12 {
                let value = months + (next_months - months) * step as f64 / span;
                table.months_by_age.insert(age * 12 + step, value);
            }
        }
        if let Some((age, months)) = yearly.last() {
            table.insert(*age, 0, *months);
        }
        table
    }

    pub fn insert(&mut self, age: u32, month: u32, months: f64) {
        self.months_by_age.insert(age * 12 + month.min(11), months);
    }

    pub fn is_empty(&self) -> bool {
        self.months_by_age.is_empty()
    }

    pub fn len(&self) -> usize {
        self.months_by_age.len()
    }

    /// Remaining months at `age` years and `month` months, nearest entry
    /// when the exact point is absent. `None` only for an empty table.
    pub fn months_remaining(&self, age: u32, month: u32) -> Option<f64> {
        let key = age * 12 + month.min(11);
        nearest_key(&self.months_by_age, key).map(|k| self.months_by_age[&k])
    }
}
