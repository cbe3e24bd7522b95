//! Replacement rate and comparison against the average pension

use super::salary::SalaryPath;
use crate::tables::YearTable;
use serde::{Deserialize, Serialize};

/// Average pension assumed for years the table does not list
pub const DEFAULT_AVERAGE_PENSION: f64 = 3500.0;

/// Position of a pension relative to the average paid in the same year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageComparison {
    pub average_pension: f64,
    /// `pension - average`
    pub absolute_diff: f64,
    /// `pension / average * 100`
    pub relative_percent: f64,
}

/// Nominal pension as a percentage of the monthly salary in the retirement
/// year; 0 when the path does not cover that year
pub fn calculate_replacement_rate(
    nominal_pension: f64,
    salary_path: &SalaryPath,
    retirement_year: i32,
) -> f64 {
    match salary_path.get(retirement_year) {
        Some(point) if point.monthly_amount != 0.0 => {
            nominal_pension / point.monthly_amount * 100.0
        }
        _ => 0.0,
    }
}

pub fn compare_to_average(
    nominal_pension: f64,
    retirement_year: i32,
    average_pension: &YearTable,
    default_average: f64,
) -> AverageComparison {
    let average = average_pension.get(retirement_year).unwrap_or_else(|| {
        log::debug!("no average pension for {}, using {}", retirement_year, default_average);
        default_average
    });

    let relative_percent = if average != 0.0 {
        nominal_pension / average * 100.0
    } else {
        0.0
    };

    AverageComparison {
        average_pension: average,
        absolute_diff: nominal_pension - average,
        relative_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::salary::build_salary_path;
    use approx::assert_relative_eq;

    #[test]
    fn test_replacement_rate() {
        let path = build_salary_path(8000.0, 2055, 2050, 2055, &YearTable::new(), 0.03);
        assert_relative_eq!(calculate_replacement_rate(4000.0, &path, 2055), 50.0);
    }

    #[test]
    fn test_replacement_rate_missing_year_is_zero() {
        let path = build_salary_path(8000.0, 2055, 2050, 2055, &YearTable::new(), 0.03);
        assert_eq!(calculate_replacement_rate(4000.0, &path, 2060), 0.0);
        assert_eq!(calculate_replacement_rate(4000.0, &SalaryPath::default(), 2055), 0.0);
    }

    #[test]
    fn test_compare_to_average() {
        let table = YearTable::from_entries([(2055, 8000.0)]);
        let cmp = compare_to_average(6000.0, 2055, &table, DEFAULT_AVERAGE_PENSION);
        assert_eq!(cmp.average_pension, 8000.0);
        assert_relative_eq!(cmp.absolute_diff, -2000.0);
        assert_relative_eq!(cmp.relative_percent, 75.0);
    }

    #[test]
    fn test_compare_to_average_default() {
        let cmp = compare_to_average(7000.0, 2099, &YearTable::new(), DEFAULT_AVERAGE_PENSION);
        assert_eq!(cmp.average_pension, 3500.0);
        assert_relative_eq!(cmp.absolute_diff, 3500.0);
        assert_relative_eq!(cmp.relative_percent, 200.0);
    }
}
