//! Pension Projection - retirement pension engine for a defined-contribution scheme
//!
//! This library provides:
//! - Career salary path reconstruction from a single present-day salary
//! - Sick-leave adjusted contribution base
//! - Primary account / sub-account accumulation with annual revaluation
//! - Annuity conversion by sex- and age-indexed divisors, and CPI deflation
//! - Postponed-retirement scenarios and a search for the years needed to
//!   reach an expected pension

pub mod error;
pub mod export;
pub mod input;
pub mod projection;
pub mod scenario;
pub mod tables;

// Re-export commonly used types
pub use error::{ProjectionError, TableError};
pub use input::{Sex, UserInput};
pub use projection::{PensionEngine, PensionResult, ProjectionConfig};
pub use scenario::ScenarioExplorer;
pub use tables::ReferenceTables;
