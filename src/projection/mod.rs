//! Pension projection pipeline: salary path, capital, annuity, comparison

mod annuity;
mod capital;
mod compare;
mod engine;
mod result;
mod salary;

pub use annuity::{calculate_nominal_pension, calculate_real_pension};
pub use capital::{
    accumulate_capital, round2, AccumulationParams, CapitalPoint, CapitalTrajectory,
    CONTRIBUTION_RATE, PRIMARY_SHARE,
};
pub use compare::{
    calculate_replacement_rate, compare_to_average, AverageComparison, DEFAULT_AVERAGE_PENSION,
};
pub use engine::{
    PensionEngine, ProjectionConfig, TrackProjection, DEFAULT_WAGE_GROWTH, MAX_RETIREMENT_AGE,
};
pub use result::{PensionResult, PostponementVariant, SickLeaveImpact, TargetStatus};
pub use salary::{
    apply_sick_leave_impact, build_salary_path, SalaryPath, SalaryPoint, SickLeaveVariants,
};
