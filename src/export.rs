//! Flat export rows for the admin report
//!
//! One row per calculation: the request, the headline results, a capture
//! timestamp and the optional postal code.

use crate::input::{Sex, UserInput};
use crate::projection::PensionResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    /// RFC 3339 capture timestamp
    pub captured_at: String,
    pub age: u32,
    pub sex: Sex,
    pub monthly_gross_salary: f64,
    pub career_start_year: i32,
    pub career_planned_end_year: i32,
    pub include_sick_leave: bool,
    pub known_primary_account_balance: Option<f64>,
    pub known_sub_account_balance: Option<f64>,
    pub expected_monthly_pension: f64,
    pub retirement_age: u32,
    pub final_capital: f64,
    pub nominal_pension: f64,
    pub real_pension: f64,
    pub replacement_rate_percent: f64,
    pub average_pension: f64,
    pub sick_leave_diff: f64,
    pub gap_to_expected_pension: f64,
    pub additional_years_to_reach_expected: Option<u32>,
    pub postal_code: Option<String>,
}

impl ExportRow {
    pub fn from_result(
        input: &UserInput,
        result: &PensionResult,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            captured_at: captured_at.to_rfc3339(),
            age: input.age,
            sex: input.sex,
            monthly_gross_salary: input.monthly_gross_salary,
            career_start_year: input.career_start_year,
            career_planned_end_year: input.career_planned_end_year,
            include_sick_leave: input.include_sick_leave,
            known_primary_account_balance: input.known_primary_account_balance,
            known_sub_account_balance: input.known_sub_account_balance,
            expected_monthly_pension: input.expected_monthly_pension,
            retirement_age: result.retirement_age,
            final_capital: result.final_capital(),
            nominal_pension: result.nominal_pension,
            real_pension: result.real_pension,
            replacement_rate_percent: result.replacement_rate_percent,
            average_pension: result.average_comparison.average_pension,
            sick_leave_diff: result.sick_leave_impact.absolute_diff,
            gap_to_expected_pension: result.gap_to_expected_pension,
            additional_years_to_reach_expected: result.additional_years_to_reach_expected,
            postal_code: input.postal_code.clone(),
        }
    }
}

/// Write rows as CSV with a header line
pub fn write_export_rows<W: Write>(rows: &[ExportRow], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
