//! Year-by-year contribution and revaluation of the two capital accounts

use super::salary::SalaryPath;
use crate::tables::YearTable;
use serde::{Deserialize, Serialize};

/// Share of annual gross salary paid into the pension accounts
pub const CONTRIBUTION_RATE: f64 = 0.1952;

/// Share of each contribution credited to the primary account; the rest goes
/// to the sub-account
pub const PRIMARY_SHARE: f64 = 0.80;

/// Contribution and revaluation parameters for one accumulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccumulationParams {
    pub contribution_rate: f64,
    pub primary_share: f64,
    /// Revaluation rate for years missing from the wage-growth table
    pub default_revaluation: f64,
}

impl Default for AccumulationParams {
    fn default() -> Self {
        Self {
            contribution_rate: CONTRIBUTION_RATE,
            primary_share: PRIMARY_SHARE,
            default_revaluation: 0.03,
        }
    }
}

/// Account balances at the end of one year, rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalPoint {
    pub year: i32,
    pub primary_balance: f64,
    pub sub_account_balance: f64,
    /// Exactly `primary_balance + sub_account_balance` (rounded)
    pub total_balance: f64,
}

/// Capital balances aligned with the years of a salary path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalTrajectory {
    pub points: Vec<CapitalPoint>,
    /// Seed balances before the first year's contribution
    pub initial_primary: f64,
    pub initial_sub: f64,
}

impl CapitalTrajectory {
    /// Total capital at the end of the last year, or the seed balances when
    /// no year was accumulated
    pub fn final_total(&self) -> f64 {
        self.points
            .last()
            .map(|p| p.total_balance)
            .unwrap_or_else(|| round2(self.initial_primary + self.initial_sub))
    }

    pub fn final_point(&self) -> Option<&CapitalPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Round a currency amount to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Run the contribution + revaluation recurrence over `start_year..=end_year`.
///
/// Each year the contribution (`annual salary * contribution_rate`) is split
/// between the accounts and added first; then both balances grow by that
/// year's wage-growth rate, which doubles as the revaluation index. Running
/// balances stay unrounded; emitted points are rounded.
pub fn accumulate_capital(
    salary_path: &SalaryPath,
    start_year: i32,
    end_year: i32,
    initial_primary: f64,
    initial_sub: f64,
    wage_growth: &YearTable,
    params: &AccumulationParams,
) -> CapitalTrajectory {
    let mut primary = initial_primary;
    let mut sub = initial_sub;

    let points = salary_path
        .points()
        .iter()
        .filter(|p| p.year >= start_year && p.year <= end_year)
        .map(|salary| {
            let contribution = salary.annual_amount * params.contribution_rate;
            primary += contribution * params.primary_share;
            sub += contribution * (1.0 - params.primary_share);

            let revaluation = 1.0 + wage_growth.get_or(salary.year, params.default_revaluation);
            primary *= revaluation;
            sub *= revaluation;

            let primary_balance = round2(primary);
            let sub_account_balance = round2(sub);
            CapitalPoint {
                year: salary.year,
                primary_balance,
                sub_account_balance,
                total_balance: round2(primary_balance + sub_account_balance),
            }
        })
        .collect();

    CapitalTrajectory {
        points,
        initial_primary,
        initial_sub,
    }
}
