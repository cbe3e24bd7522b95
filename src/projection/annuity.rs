//! Capital to monthly annuity, and nominal to present-day value

use crate::error::ProjectionError;
use crate::input::Sex;
use crate::tables::{AnnuityDivisorTable, YearTable};

/// Monthly pension in retirement-year money: capital divided by the expected
/// remaining months of life at `retirement_age`
pub fn calculate_nominal_pension(
    total_capital: f64,
    retirement_age: u32,
    sex: Sex,
    divisors: &AnnuityDivisorTable,
) -> Result<f64, ProjectionError> {
    let divisor = divisors.lookup(sex, retirement_age)?;
    Ok(total_capital / divisor.months)
}

/// Deflate a nominal pension to `current_year` purchasing power.
///
/// Uses the ratio of cumulative CPI indices. A retirement year beyond the
/// table reuses the current-year index, i.e. assumes no further inflation.
pub fn calculate_real_pension(
    nominal_pension: f64,
    retirement_year: i32,
    current_year: i32,
    cpi: &YearTable,
) -> Result<f64, ProjectionError> {
    let current_index = cpi
        .get(current_year)
        .ok_or(ProjectionError::MissingCpi(current_year))?;
    if current_index <= 0.0 {
        return Err(ProjectionError::InvalidCpi {
            year: current_year,
            index: current_index,
        });
    }

    let retirement_index = match cpi.get(retirement_year) {
        Some(index) => index,
        None => {
            log::debug!(
                "no CPI for {}, assuming no inflation beyond {}",
                retirement_year, current_year
            );
            current_index
        }
    };
    if retirement_index <= 0.0 {
        return Err(ProjectionError::InvalidCpi {
            year: retirement_year,
            index: retirement_index,
        });
    }

    Ok(nominal_pension / (retirement_index / current_index))
}
