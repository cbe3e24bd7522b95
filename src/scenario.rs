//! Counterfactual scenarios: postponed retirement and target search
//!
//! Every scenario reruns the whole pipeline (salary path, accumulation,
//! annuity, deflation) for a later end year, starting from the same initial
//! balances. Nothing is memoized between runs.

use crate::error::ProjectionError;
use crate::input::UserInput;
use crate::projection::{PensionEngine, PostponementVariant, TrackProjection};

/// Scenario runner bound to one engine and one request
#[derive(Debug, Clone, Copy)]
pub struct ScenarioExplorer<'a> {
    engine: &'a PensionEngine,
    input: &'a UserInput,
}

impl<'a> ScenarioExplorer<'a> {
    pub fn new(engine: &'a PensionEngine, input: &'a UserInput) -> Self {
        Self { engine, input }
    }

    /// Official track for a career extended by `additional_years`
    fn extended_track(&self, additional_years: u32) -> Result<TrackProjection, ProjectionError> {
        let end_year = self.input.career_planned_end_year + additional_years as i32;
        self.engine
            .project_track(self.input, end_year, self.input.include_sick_leave)
    }

    /// Retirement age at the planned end year
    pub fn base_retirement_age(&self) -> u32 {
        self.input.age_in_year(
            self.input.career_planned_end_year,
            self.engine.config().current_year,
        )
    }

    /// One postponement variant compared against `base_nominal`
    pub fn postponement(
        &self,
        additional_years: u32,
        base_nominal: f64,
    ) -> Result<PostponementVariant, ProjectionError> {
        let track = self.extended_track(additional_years)?;

        let percent_increase_over_base = if base_nominal != 0.0 {
            (track.nominal_pension - base_nominal) / base_nominal * 100.0
        } else {
            0.0
        };

        Ok(PostponementVariant {
            additional_years,
            retirement_year: track.end_year,
            retirement_age: track.retirement_age,
            nominal_pension: track.nominal_pension,
            real_pension: track.real_pension,
            percent_increase_over_base,
        })
    }

    /// Variants for every configured offset, in configuration order
    pub fn postponement_variants(
        &self,
        base_nominal: f64,
    ) -> Result<Vec<PostponementVariant>, ProjectionError> {
        self.engine
            .config()
            .postponement_offsets
            .iter()
            .map(|&years| self.postponement(years, base_nominal))
            .collect()
    }

    /// Smallest number of additional working years whose real pension reaches
    /// `expected`, or `None` if none does before the maximum retirement age.
    ///
    /// Linear scan from one year upwards; the first hit wins. The scan assumes
    /// the real pension grows with every extra year (true for non-negative
    /// wage growth and divisors that shrink with age) but does not check it.
    pub fn find_years_to_target(&self, expected: f64) -> Result<Option<u32>, ProjectionError> {
        let ceiling = self
            .engine
            .config()
            .max_retirement_age
            .saturating_sub(self.base_retirement_age());

        for additional_years in 1..=ceiling {
            let track = self.extended_track(additional_years)?;
            log::trace!(
                "target search +{}: real pension {:.2} vs expected {:.2}",
                additional_years, track.real_pension, expected
            );
            if track.real_pension >= expected {
                return Ok(Some(additional_years));
            }
        }

        log::warn!(
            "expected pension {:.2} not reached within {} additional years",
            expected, ceiling
        );
        Ok(None)
    }
}
