//! Result value objects produced by one pension calculation

use super::capital::CapitalTrajectory;
use super::compare::AverageComparison;
use super::salary::SalaryPath;
use serde::{Deserialize, Serialize};

/// Nominal pensions with and without the sick-leave reduction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeaveImpact {
    pub without_sick_leave: f64,
    pub with_sick_leave: f64,
    /// `without - with`
    pub absolute_diff: f64,
    /// `absolute_diff / without * 100`
    pub relative_percent: f64,
}

impl SickLeaveImpact {
    pub fn new(without_sick_leave: f64, with_sick_leave: f64) -> Self {
        let absolute_diff = without_sick_leave - with_sick_leave;
        let relative_percent = if without_sick_leave != 0.0 {
            absolute_diff / without_sick_leave * 100.0
        } else {
            0.0
        };

        Self {
            without_sick_leave,
            with_sick_leave,
            absolute_diff,
            relative_percent,
        }
    }
}

/// Pension when retirement is pushed back by `additional_years`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostponementVariant {
    pub additional_years: u32,
    pub retirement_year: i32,
    pub retirement_age: u32,
    pub nominal_pension: f64,
    pub real_pension: f64,
    /// Increase of the nominal pension over the base case, in percent
    pub percent_increase_over_base: f64,
}

/// Whether the expected pension is reached, and how
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TargetStatus {
    /// Real pension at the planned end year already meets the expectation
    Met,
    /// Met after working this many additional years
    Reachable { additional_years: u32 },
    /// Not met even at the maximum retirement age
    Unreachable,
}

impl TargetStatus {
    pub fn additional_years(&self) -> Option<u32> {
        match self {
            TargetStatus::Reachable { additional_years } => Some(*additional_years),
            TargetStatus::Met | TargetStatus::Unreachable => None,
        }
    }
}

/// Complete outcome of a calculation. Produced fresh per request and only
/// read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionResult {
    pub retirement_year: i32,
    pub retirement_age: u32,
    pub statutory_retirement_age: u32,

    /// Monthly pension in retirement-year money
    pub nominal_pension: f64,
    /// Monthly pension in present-day money
    pub real_pension: f64,
    pub replacement_rate_percent: f64,
    pub average_comparison: AverageComparison,
    pub sick_leave_impact: SickLeaveImpact,

    /// One entry per configured offset, in configuration order
    pub postponement_variants: Vec<PostponementVariant>,

    /// `expected - real`; zero or negative when the expectation is met
    pub gap_to_expected_pension: f64,
    pub additional_years_to_reach_expected: Option<u32>,
    pub target_status: TargetStatus,

    /// Remaining life expectancy at the retirement age, in months
    pub life_expectancy_months: Option<f64>,

    pub capital_trajectory: CapitalTrajectory,
    pub salary_path_used: SalaryPath,
}

impl PensionResult {
    pub fn postponement(&self, additional_years: u32) -> Option<&PostponementVariant> {
        self.postponement_variants
            .iter()
            .find(|v| v.additional_years == additional_years)
    }

    /// Capital converted into the annuity
    pub fn final_capital(&self) -> f64 {
        self.capital_trajectory.final_total()
    }

    pub fn expectation_met(&self) -> bool {
        self.gap_to_expected_pension <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Sex, UserInput};
    use crate::projection::{PensionEngine, ProjectionConfig};
    use crate::tables::ReferenceTables;
    use approx::assert_relative_eq;

    #[test]
    fn test_sick_leave_impact() {
        let impact = SickLeaveImpact::new(4000.0, 3800.0);
        assert_relative_eq!(impact.absolute_diff, 200.0);
        assert_relative_eq!(impact.relative_percent, 5.0);

        let zero = SickLeaveImpact::new(0.0, 0.0);
        assert_eq!(zero.relative_percent, 0.0);
    }

    #[test]
    fn test_target_status_years() {
        assert_eq!(TargetStatus::Met.additional_years(), None);
        assert_eq!(TargetStatus::Unreachable.additional_years(), None);
        assert_eq!(TargetStatus::Reachable { additional_years: 3 }.additional_years(), Some(3));
    }

    #[test]
    fn test_target_status_serializes_with_tag() {
        let json = serde_json::to_string(&TargetStatus::Reachable { additional_years: 2 }).unwrap();
        assert_eq!(json, r#"{"status":"reachable","additionalYears":2}"#);
        assert_eq!(serde_json::to_string(&TargetStatus::Met).unwrap(), r#"{"status":"met"}"#);
    }

    fn collect_keys(value: &serde_json::Value, keys: &mut Vec<String>) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, nested) in map {
                    keys.push(key.clone());
                    collect_keys(nested, keys);
                }
            }
            serde_json::Value::Array(items) => {
                items.iter().for_each(|item| collect_keys(item, keys))
            }
            _ => {}
        }
    }

    #[test]
    fn test_result_json_is_camel_case_throughout() {
        let engine = PensionEngine::new(
            ReferenceTables::default_tables(),
            ProjectionConfig::for_year(2025),
        );
        let input = UserInput {
            age: 30,
            sex: Sex::Male,
            monthly_gross_salary: 5000.0,
            career_start_year: 2015,
            career_planned_end_year: 2055,
            known_primary_account_balance: None,
            known_sub_account_balance: None,
            include_sick_leave: false,
            expected_monthly_pension: 9000.0,
            postal_code: None,
        };
        let result = engine.calculate(&input).unwrap();
        assert!(matches!(
            result.target_status,
            TargetStatus::Reachable { .. } | TargetStatus::Unreachable
        ));

        let value = serde_json::to_value(&result).unwrap();
        let mut keys = Vec::new();
        collect_keys(&value, &mut keys);

        let snake: Vec<&String> = keys.iter().filter(|key| key.contains('_')).collect();
        assert!(snake.is_empty(), "snake_case keys in result JSON: {:?}", snake);

        assert_eq!(
            value["averageComparison"]["absoluteDiff"],
            result.average_comparison.absolute_diff
        );
        assert!(value["sickLeaveImpact"].get("relativePercent").is_some());
        assert!(value["postponementVariants"][0].get("percentIncreaseOverBase").is_some());
        assert!(value["capitalTrajectory"]["points"][0].get("totalBalance").is_some());
        assert!(value["salaryPathUsed"]["points"][0].get("monthlyAmount").is_some());

        let round_trip: PensionResult = serde_json::from_value(value).unwrap();
        assert_eq!(round_trip.target_status, result.target_status);
    }
}
