//! User input record as submitted by the calculator form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TableError;

/// Sex of the insured person, used to index divisor and sick-leave tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(TableError::UnknownSex(s.to_string())),
        }
    }
}

/// One calculation request.
///
/// Years are calendar years anchored at January. The engine does not enforce
/// `career_start_year <= current year <= career_planned_end_year`; anchors
/// outside that range are extrapolated through the wage-growth table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    /// Age in whole years at the current year
    pub age: u32,

    pub sex: Sex,

    /// Present-day gross monthly salary
    pub monthly_gross_salary: f64,

    pub career_start_year: i32,

    /// Last working year; also the retirement year
    pub career_planned_end_year: i32,

    /// Balance already on the primary account, if known
    #[serde(default)]
    pub known_primary_account_balance: Option<f64>,

    /// Balance already on the sub-account, if known
    #[serde(default)]
    pub known_sub_account_balance: Option<f64>,

    /// Whether the official result should use the sick-leave adjusted track
    #[serde(default)]
    pub include_sick_leave: bool,

    /// Monthly pension the person hopes for, in present-day money
    pub expected_monthly_pension: f64,

    /// Presentational only, carried through to exports
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl UserInput {
    /// Initial primary account balance, zero when unknown
    pub fn initial_primary(&self) -> f64 {
        self.known_primary_account_balance.unwrap_or(0.0)
    }

    /// Initial sub-account balance, zero when unknown
    pub fn initial_sub(&self) -> f64 {
        self.known_sub_account_balance.unwrap_or(0.0)
    }

    /// Age reached in `end_year`, given the age held in `current_year`.
    /// Floored at zero for end years far before the anchor.
    pub fn age_in_year(&self, end_year: i32, current_year: i32) -> u32 {
        let age = self.age as i64 + (end_year as i64 - current_year as i64);
        age.max(0) as u32
    }

    /// Year in which this person reaches `statutory_age`
    pub fn statutory_end_year(&self, statutory_age: u32, current_year: i32) -> i32 {
        current_year + (statutory_age as i32 - self.age as i32)
    }
}
