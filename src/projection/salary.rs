//! Career salary path reconstruction and sick-leave adjustment

use crate::input::Sex;
use crate::tables::{BySex, YearTable};
use serde::{Deserialize, Serialize};

/// Salary for one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPoint {
    pub year: i32,
    pub monthly_amount: f64,
    /// Always `monthly_amount * 12`
    pub annual_amount: f64,
}

impl SalaryPoint {
    pub fn new(year: i32, monthly_amount: f64) -> Self {
        Self {
            year,
            monthly_amount,
            annual_amount: monthly_amount * 12.0,
        }
    }
}

/// One salary point per year, strictly increasing and without gaps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPath {
    points: Vec<SalaryPoint>,
}

impl SalaryPath {
    pub fn points(&self) -> &[SalaryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.points.first().map(|p| p.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|p| p.year)
    }

    /// Point for `year`, if the path covers it
    pub fn get(&self, year: i32) -> Option<&SalaryPoint> {
        let first = self.first_year()?;
        let idx = usize::try_from(year.checked_sub(first)?).ok()?;
        self.points.get(idx)
    }

    /// New path with every amount multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| SalaryPoint::new(p.year, p.monthly_amount * factor))
                .collect(),
        }
    }
}

/// Reconstruct a salary path over `start_year..=end_year` from one anchor.
///
/// Years before `current_year` undo growth: the anchor is divided by
/// `(1 + g[y])` for every y in `year..current_year`. Years after it compound:
/// the anchor is multiplied by `(1 + g[y])` for every y in
/// `current_year + 1..=year`. Missing rates use `default_growth`.
pub fn build_salary_path(
    current_salary: f64,
    current_year: i32,
    start_year: i32,
    end_year: i32,
    wage_growth: &YearTable,
    default_growth: f64,
) -> SalaryPath {
    let growth = |year: i32| 1.0 + wage_growth.get_or(year, default_growth);

    let points = (start_year..=end_year)
        .map(|year| {
            let monthly = if year < current_year {
                let cumulative: f64 = (year..current_year).map(growth).product();
                current_salary / cumulative
            } else if year > current_year {
                let cumulative: f64 = (current_year + 1..=year).map(growth).product();
                current_salary * cumulative
            } else {
                current_salary
            };
            SalaryPoint::new(year, monthly)
        })
        .collect();

    SalaryPath { points }
}

/// Both salary variants used for the sick-leave comparison
#[derive(Debug, Clone, PartialEq)]
pub struct SickLeaveVariants {
    pub without_sick_leave: SalaryPath,
    pub with_sick_leave: SalaryPath,
}

/// Derive the sick-leave variant of `base` for `sex`.
///
/// The adjusted path is the base scaled by `1 - coefficient`, so a
/// coefficient of 0 leaves it unchanged and anything in (0, 1) lowers every
/// year.
pub fn apply_sick_leave_impact(
    base: &SalaryPath,
    sex: Sex,
    coefficients: &BySex<f64>,
) -> SickLeaveVariants {
    let coefficient = coefficients.get(sex);
    SickLeaveVariants {
        without_sick_leave: base.clone(),
        with_sick_leave: base.scaled(1.0 - coefficient),
    }
}
