//! Reference tables consumed by the projection engine
//!
//! Tables are loaded once (from CSV or from built-in data) and shared
//! read-only across calculations. Every lookup gap resolves through a
//! fallback:
//! - wage growth: configured default rate (3%)
//! - annuity divisor: nearest age, smaller age on ties
//! - CPI: current-year index (no further inflation)
//! - average pension: configured default amount

mod by_sex;
mod divisor;
mod life_expectancy;
mod yearly;
pub mod loader;

pub use by_sex::BySex;
pub use divisor::{AnnuityDivisorTable, DivisorLookup};
pub use life_expectancy::LifeExpectancyTable;
pub use yearly::YearTable;

use crate::error::TableError;
use std::collections::BTreeMap;
use std::path::Path;

/// Bundle of every table a calculation reads
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    /// Nominal wage growth by year; also the account revaluation rate
    pub wage_growth: YearTable,

    /// Cumulative consumer price index by year
    pub cpi: YearTable,

    /// Average monthly pension paid in each year
    pub average_pension: YearTable,

    pub divisors: AnnuityDivisorTable,

    /// Sick-leave reduction coefficient per sex
    pub sick_leave: BySex<f64>,

    pub retirement_age: BySex<u32>,

    pub life_expectancy: LifeExpectancyTable,
}

impl ReferenceTables {
    /// Built-in tables
    pub fn default_tables() -> Self {
        let divisors = AnnuityDivisorTable::default_divisors();
        let life_expectancy = LifeExpectancyTable::interpolated(&unisex_yearly(&divisors));

        Self {
            wage_growth: default_wage_growth(),
            cpi: default_cpi(),
            average_pension: default_average_pension(),
            divisors,
            sick_leave: BySex::<f64>::default_sick_leave(),
            retirement_age: BySex::<u32>::default_retirement_ages(),
            life_expectancy,
        }
    }

    /// Deterministic tables with one wage-growth rate and one inflation rate
    /// over `first_year..=last_year`; divisors and demographic tables are the
    /// built-in ones. CPI is anchored at 100 in `first_year`.
    pub fn flat(first_year: i32, last_year: i32, wage_growth: f64, inflation: f64) -> Self {
        let years = (last_year - first_year).max(0) as usize;
        Self {
            wage_growth: YearTable::constant(first_year, last_year, wage_growth),
            cpi: YearTable::compounding(
                first_year,
                100.0,
                std::iter::repeat(inflation).take(years),
            ),
            average_pension: YearTable::new(),
            ..Self::default_tables()
        }
    }

    /// Load tables from CSV files in the default location (data/tables/)
    pub fn from_csv() -> Result<Self, TableError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TABLES_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, TableError> {
        let loaded = loader::LoadedTables::load_from(path)?;

        Ok(Self {
            wage_growth: loaded.wage_growth,
            cpi: loaded.cpi,
            average_pension: loaded.average_pension,
            divisors: loaded.divisors,
            sick_leave: loaded.sick_leave,
            retirement_age: loaded.retirement_age,
            life_expectancy: loaded.life_expectancy,
        })
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::default_tables()
    }
}

/// Key closest to `target`; the smaller key wins a tie
pub(crate) fn nearest_key<V>(map: &BTreeMap<u32, V>, target: u32) -> Option<u32> {
    let below = map.range(..=target).next_back().map(|(k, _)| *k);
    let above = map.range(target..).next().map(|(k, _)| *k);

    match (below, above) {
        (Some(b), Some(a)) => Some(if target - b <= a - target { b } else { a }),
        (Some(b), None) => Some(b),
        (None, a) => a,
    }
}

/// Yearly unisex life expectancy as the mean of the female and male divisors
fn unisex_yearly(divisors: &AnnuityDivisorTable) -> Vec<(u32, f64)> {
    use crate::input::Sex;

    divisors
        .ages(Sex::Female)
        .filter_map(|age| {
            let female = divisors.lookup(Sex::Female, age).ok()?;
            let male = divisors.lookup(Sex::Male, age).ok()?;
            (!male.fallback).then_some((age, (female.months + male.months) / 2.0))
        })
        .collect()
}

/// Nominal average wage growth 2000-2035; later years use the engine default
fn default_wage_growth() -> YearTable {
    const RATES: [f64; 36] = [
        // 2000-2009
        0.113, 0.079, 0.039, 0.037, 0.040, 0.032, 0.049, 0.089, 0.102, 0.051,
        // 2010-2019
        0.038, 0.050, 0.035, 0.037, 0.036, 0.035, 0.038, 0.057, 0.071, 0.065,
        // 2020-2029
        0.048, 0.088, 0.121, 0.128, 0.141, 0.082, 0.066, 0.058, 0.052, 0.049,
        // 2030-2035
        0.047, 0.045, 0.043, 0.041, 0.040, 0.039,
    ];
    YearTable::from_entries(RATES.iter().enumerate().map(|(i, rate)| (2000 + i as i32, *rate)))
}

/// Cumulative CPI, 2000 = 100, with 2.5% annual inflation assumed from 2029 to 2080
fn default_cpi() -> YearTable {
    const HISTORY: [f64; 28] = [
        // 2001-2010
        0.055, 0.019, 0.008, 0.035, 0.021, 0.010, 0.025, 0.042, 0.035, 0.026,
        // 2011-2020
        0.043, 0.037, 0.009, 0.000, -0.009, -0.006, 0.020, 0.016, 0.023, 0.034,
        // 2021-2028
        0.051, 0.144, 0.114, 0.036, 0.040, 0.030, 0.027, 0.025,
    ];
    let projected = std::iter::repeat(0.025).take((2080 - 2028) as usize);
    YearTable::compounding(2000, 100.0, HISTORY.iter().copied().chain(projected))
}

/// Average monthly pension from 2100 in 2015, growing 4% a year after 2025
fn default_average_pension() -> YearTable {
    const HISTORY: [f64; 10] = [
        0.030, 0.030, 0.040, 0.050, 0.060, 0.045, 0.090, 0.140, 0.120, 0.070,
    ];
    let projected = std::iter::repeat(0.04).take((2080 - 2025) as usize);
    YearTable::compounding(2015, 2100.0, HISTORY.iter().copied().chain(projected))
}
