//! Pension projection engine: one request in, one result out

use super::annuity::{calculate_nominal_pension, calculate_real_pension};
use super::capital::{
    accumulate_capital, AccumulationParams, CapitalTrajectory, CONTRIBUTION_RATE, PRIMARY_SHARE,
};
use super::compare::{calculate_replacement_rate, compare_to_average, DEFAULT_AVERAGE_PENSION};
use super::result::{PensionResult, SickLeaveImpact, TargetStatus};
use super::salary::{apply_sick_leave_impact, build_salary_path, SalaryPath};
use crate::error::ProjectionError;
use crate::input::UserInput;
use crate::scenario::ScenarioExplorer;
use crate::tables::ReferenceTables;
use chrono::Datelike;

/// Wage growth (and revaluation) assumed for years missing from the table
pub const DEFAULT_WAGE_GROWTH: f64 = 0.03;

/// Highest retirement age the target search will consider
pub const MAX_RETIREMENT_AGE: u32 = 75;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Year the input salary and age refer to
    pub current_year: i32,

    /// Extra working years evaluated as postponement variants
    pub postponement_offsets: Vec<u32>,

    /// Ceiling for the target search
    pub max_retirement_age: u32,

    pub default_wage_growth: f64,

    pub default_average_pension: f64,

    pub contribution_rate: f64,

    /// Share of contributions going to the primary account
    pub primary_share: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            current_year: chrono::Local::now().year(),
            postponement_offsets: vec![1, 2, 5],
            max_retirement_age: MAX_RETIREMENT_AGE,
            default_wage_growth: DEFAULT_WAGE_GROWTH,
            default_average_pension: DEFAULT_AVERAGE_PENSION,
            contribution_rate: CONTRIBUTION_RATE,
            primary_share: PRIMARY_SHARE,
        }
    }
}

impl ProjectionConfig {
    /// Default configuration anchored at `current_year`
    pub fn for_year(current_year: i32) -> Self {
        Self {
            current_year,
            ..Default::default()
        }
    }

    pub fn accumulation_params(&self) -> AccumulationParams {
        AccumulationParams {
            contribution_rate: self.contribution_rate,
            primary_share: self.primary_share,
            default_revaluation: self.default_wage_growth,
        }
    }
}

/// One pass through path, accumulation, annuity and deflation for a given
/// end year
#[derive(Debug, Clone, PartialEq)]
pub struct TrackProjection {
    pub end_year: i32,
    pub retirement_age: u32,
    pub salary_path: SalaryPath,
    pub trajectory: CapitalTrajectory,
    pub nominal_pension: f64,
    pub real_pension: f64,
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct PensionEngine {
    tables: ReferenceTables,
    config: ProjectionConfig,
}

impl PensionEngine {
    /// Create a new engine with the given tables and config
    pub fn new(tables: ReferenceTables, config: ProjectionConfig) -> Self {
        Self { tables, config }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Salary path from the career start to `end_year`
    pub fn build_path(&self, input: &UserInput, end_year: i32) -> SalaryPath {
        build_salary_path(
            input.monthly_gross_salary,
            self.config.current_year,
            input.career_start_year,
            end_year,
            &self.tables.wage_growth,
            self.config.default_wage_growth,
        )
    }

    /// Full pipeline for a career ending in `end_year`, with or without the
    /// sick-leave reduction. Scenario variants rerun this from scratch.
    pub fn project_track(
        &self,
        input: &UserInput,
        end_year: i32,
        with_sick_leave: bool,
    ) -> Result<TrackProjection, ProjectionError> {
        let base = self.build_path(input, end_year);
        let path = if with_sick_leave {
            apply_sick_leave_impact(&base, input.sex, &self.tables.sick_leave).with_sick_leave
        } else {
            base
        };
        self.finish_track(input, end_year, path)
    }

    /// Accumulate, convert and deflate an already built salary path
    fn finish_track(
        &self,
        input: &UserInput,
        end_year: i32,
        salary_path: SalaryPath,
    ) -> Result<TrackProjection, ProjectionError> {
        let trajectory = accumulate_capital(
            &salary_path,
            input.career_start_year,
            end_year,
            input.initial_primary(),
            input.initial_sub(),
            &self.tables.wage_growth,
            &self.config.accumulation_params(),
        );

        let retirement_age = input.age_in_year(end_year, self.config.current_year);
        let nominal_pension = calculate_nominal_pension(
            trajectory.final_total(),
            retirement_age,
            input.sex,
            &self.tables.divisors,
        )?;
        let real_pension = calculate_real_pension(
            nominal_pension,
            end_year,
            self.config.current_year,
            &self.tables.cpi,
        )?;

        Ok(TrackProjection {
            end_year,
            retirement_age,
            salary_path,
            trajectory,
            nominal_pension,
            real_pension,
        })
    }

    /// Run the complete calculation for one request.
    ///
    /// Both sick-leave tracks are always projected so the impact comparison
    /// is available; the track selected by `include_sick_leave` drives the
    /// replacement rate, the average comparison and the scenarios.
    pub fn calculate(&self, input: &UserInput) -> Result<PensionResult, ProjectionError> {
        let end_year = input.career_planned_end_year;

        let base = self.build_path(input, end_year);
        let variants = apply_sick_leave_impact(&base, input.sex, &self.tables.sick_leave);
        let without = self.finish_track(input, end_year, variants.without_sick_leave)?;
        let with = self.finish_track(input, end_year, variants.with_sick_leave)?;

        let sick_leave_impact = SickLeaveImpact::new(without.nominal_pension, with.nominal_pension);
        let official = if input.include_sick_leave { with } else { without };

        let replacement_rate_percent =
            calculate_replacement_rate(official.nominal_pension, &official.salary_path, end_year);
        let average_comparison = compare_to_average(
            official.nominal_pension,
            end_year,
            &self.tables.average_pension,
            self.config.default_average_pension,
        );

        let explorer = ScenarioExplorer::new(self, input);
        let postponement_variants = explorer.postponement_variants(official.nominal_pension)?;

        let gap_to_expected_pension = input.expected_monthly_pension - official.real_pension;
        let target_status = if gap_to_expected_pension <= 0.0 {
            TargetStatus::Met
        } else {
            match explorer.find_years_to_target(input.expected_monthly_pension)? {
                Some(additional_years) => TargetStatus::Reachable { additional_years },
                None => TargetStatus::Unreachable,
            }
        };

        let life_expectancy_months = self
            .tables
            .life_expectancy
            .months_remaining(official.retirement_age, 0);

        log::info!(
            "{} age {} retiring {} at {}: nominal {:.2}, real {:.2}, target {:?}",
            input.sex,
            input.age,
            end_year,
            official.retirement_age,
            official.nominal_pension,
            official.real_pension,
            target_status
        );

        Ok(PensionResult {
            retirement_year: end_year,
            retirement_age: official.retirement_age,
            statutory_retirement_age: self.tables.retirement_age.get(input.sex),
            nominal_pension: official.nominal_pension,
            real_pension: official.real_pension,
            replacement_rate_percent,
            average_comparison,
            sick_leave_impact,
            postponement_variants,
            gap_to_expected_pension,
            additional_years_to_reach_expected: target_status.additional_years(),
            target_status,
            life_expectancy_months,
            capital_trajectory: official.trajectory,
            salary_path_used: official.salary_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Sex;
    use crate::tables::{AnnuityDivisorTable, YearTable};
    use approx::assert_relative_eq;

    fn sample_input() -> UserInput {
        UserInput {
            age: 30,
            sex: Sex::Male,
            monthly_gross_salary: 5000.0,
            career_start_year: 2015,
            career_planned_end_year: 2055,
            known_primary_account_balance: None,
            known_sub_account_balance: None,
            include_sick_leave: false,
            expected_monthly_pension: 4000.0,
            postal_code: None,
        }
    }

    fn default_engine() -> PensionEngine {
        PensionEngine::new(
            ReferenceTables::default_tables(),
            ProjectionConfig::for_year(2025),
        )
    }

    #[test]
    fn test_reference_scenario() {
        let engine = default_engine();
        let result = engine.calculate(&sample_input()).unwrap();

        assert_eq!(result.retirement_year, 2055);
        assert_eq!(result.retirement_age, 60);
        assert_eq!(result.statutory_retirement_age, 65);
        assert!(result.nominal_pension > 0.0);

        // Cumulative CPI rises between 2025 and 2055
        assert!(result.real_pension <= result.nominal_pension);

        assert!(result.replacement_rate_percent > 0.0 && result.replacement_rate_percent < 100.0);

        let plus_five = result.postponement(5).unwrap();
        assert!(plus_five.nominal_pension > result.nominal_pension);
        assert_eq!(plus_five.retirement_age, 65);
        assert_eq!(plus_five.retirement_year, 2060);

        assert_eq!(result.salary_path_used.get(2025).unwrap().monthly_amount, 5000.0);
        assert_eq!(result.capital_trajectory.len(), 41);
        assert_eq!(
            result.final_capital(),
            result.capital_trajectory.final_point().unwrap().total_balance
        );
        assert!(result.life_expectancy_months.is_some());
    }

    #[test]
    fn test_nominal_matches_pipeline_by_hand() {
        let engine = default_engine();
        let input = sample_input();
        let result = engine.calculate(&input).unwrap();

        let divisor = engine.tables().divisors.lookup(Sex::Male, 60).unwrap().months;
        assert_relative_eq!(
            result.nominal_pension,
            result.final_capital() / divisor,
            epsilon = 1e-9
        );

        let cpi = &engine.tables().cpi;
        let ratio = cpi.get(2055).unwrap() / cpi.get(2025).unwrap();
        assert_relative_eq!(result.real_pension, result.nominal_pension / ratio, epsilon = 1e-9);
    }

    #[test]
    fn test_postponement_variants_in_config_order() {
        let result = default_engine().calculate(&sample_input()).unwrap();
        let offsets: Vec<u32> = result
            .postponement_variants
            .iter()
            .map(|v| v.additional_years)
            .collect();
        assert_eq!(offsets, vec![1, 2, 5]);

        let nominals: Vec<f64> = result
            .postponement_variants
            .iter()
            .map(|v| v.nominal_pension)
            .collect();
        assert!(nominals.windows(2).all(|w| w[1] > w[0]));
        assert!(result.postponement_variants.iter().all(|v| v.percent_increase_over_base > 0.0));
    }

    #[test]
    fn test_sick_leave_impact_always_reported() {
        let engine = default_engine();

        let without = engine.calculate(&sample_input()).unwrap();
        let with = engine
            .calculate(&UserInput { include_sick_leave: true, ..sample_input() })
            .unwrap();

        assert!(without.sick_leave_impact.absolute_diff > 0.0);
        assert_eq!(without.sick_leave_impact, with.sick_leave_impact);

        assert_relative_eq!(without.nominal_pension, without.sick_leave_impact.without_sick_leave);
        assert_relative_eq!(with.nominal_pension, with.sick_leave_impact.with_sick_leave);
        assert!(with.nominal_pension < without.nominal_pension);
    }

    #[test]
    fn test_low_expectation_is_met() {
        let input = UserInput { expected_monthly_pension: 1.0, ..sample_input() };
        let result = default_engine().calculate(&input).unwrap();

        assert!(result.gap_to_expected_pension < 0.0);
        assert!(result.expectation_met());
        assert_eq!(result.target_status, TargetStatus::Met);
        assert_eq!(result.additional_years_to_reach_expected, None);
    }

    #[test]
    fn test_unreachable_expectation() {
        let input = UserInput { expected_monthly_pension: 1_000_000.0, ..sample_input() };
        let result = default_engine().calculate(&input).unwrap();

        assert!(result.gap_to_expected_pension > 0.0);
        assert_eq!(result.target_status, TargetStatus::Unreachable);
        assert_eq!(result.additional_years_to_reach_expected, None);
    }

    #[test]
    fn test_reachable_expectation_is_minimal() {
        let engine = default_engine();
        let input = sample_input();
        let base = engine.calculate(&input).unwrap();

        // Aim between the +2 and +3 year real pensions
        let plus_two = engine.project_track(&input, 2057, false).unwrap().real_pension;
        let plus_three = engine.project_track(&input, 2058, false).unwrap().real_pension;
        assert!(plus_three > plus_two && plus_two > base.real_pension);

        let target = (plus_two + plus_three) / 2.0;
        let result = engine
            .calculate(&UserInput { expected_monthly_pension: target, ..input })
            .unwrap();

        assert_eq!(result.additional_years_to_reach_expected, Some(3));
        assert_eq!(result.target_status, TargetStatus::Reachable { additional_years: 3 });
    }

    #[test]
    fn test_known_balances_raise_pension() {
        let engine = default_engine();
        let base = engine.calculate(&sample_input()).unwrap();
        let seeded = engine
            .calculate(&UserInput {
                known_primary_account_balance: Some(50_000.0),
                known_sub_account_balance: Some(10_000.0),
                ..sample_input()
            })
            .unwrap();

        assert!(seeded.nominal_pension > base.nominal_pension);
        assert_eq!(seeded.capital_trajectory.initial_primary, 50_000.0);
    }

    #[test]
    fn test_flat_tables_closed_form() {
        // No growth, no inflation: capital is the plain sum of contributions
        let tables = ReferenceTables::flat(2000, 2060, 0.0, 0.0);
        let engine = PensionEngine::new(tables, ProjectionConfig::for_year(2025));
        let input = UserInput {
            career_start_year: 2025,
            career_planned_end_year: 2034,
            age: 55,
            ..sample_input()
        };
        let result = engine.calculate(&input).unwrap();

        let capital = 5000.0 * 12.0 * CONTRIBUTION_RATE * 10.0;
        assert_relative_eq!(result.final_capital(), capital, epsilon = 0.05);
        let divisor = engine.tables().divisors.lookup(Sex::Male, 64).unwrap().months;
        assert_relative_eq!(
            result.nominal_pension,
            result.final_capital() / divisor,
            epsilon = 1e-9
        );
        assert_relative_eq!(result.real_pension, result.nominal_pension, epsilon = 1e-9);
        assert_relative_eq!(
            result.replacement_rate_percent,
            result.nominal_pension / 5000.0 * 100.0,
            epsilon = 1e-9
        );
        // Flat tables carry no average pension, so the default applies
        assert_eq!(result.average_comparison.average_pension, DEFAULT_AVERAGE_PENSION);
    }

    #[test]
    fn test_missing_divisors_propagate() {
        let mut tables = ReferenceTables::default_tables();
        tables.divisors = AnnuityDivisorTable::default();
        let engine = PensionEngine::new(tables, ProjectionConfig::for_year(2025));

        assert_eq!(
            engine.calculate(&sample_input()),
            Err(ProjectionError::MissingDivisors(Sex::Male))
        );
    }

    #[test]
    fn test_missing_current_cpi_propagates() {
        let mut tables = ReferenceTables::default_tables();
        tables.cpi = YearTable::from_entries([(2055, 150.0)]);
        let engine = PensionEngine::new(tables, ProjectionConfig::for_year(2025));

        assert_eq!(engine.calculate(&sample_input()), Err(ProjectionError::MissingCpi(2025)));
    }

    #[test]
    fn test_out_of_range_years_degrade_gracefully() {
        let engine = default_engine();
        let input = UserInput {
            age: 18,
            career_start_year: 2040,
            career_planned_end_year: 2090,
            ..sample_input()
        };
        let result = engine.calculate(&input).unwrap();

        // Age 83 at retirement uses the oldest divisor; 2090 is past the CPI horizon
        assert_eq!(result.retirement_age, 83);
        assert!(result.nominal_pension.is_finite() && result.nominal_pension > 0.0);
        assert_relative_eq!(result.real_pension, result.nominal_pension, epsilon = 1e-9);
        assert_eq!(result.salary_path_used.get(2025), None);
        assert!(result.replacement_rate_percent > 0.0);
    }
}
