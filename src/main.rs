//! Pension Projection CLI
//!
//! Runs one pension calculation and prints the result

use anyhow::{bail, Context, Result};
use clap::Parser;
use pension_projection::{
    PensionEngine, PensionResult, ProjectionConfig, ReferenceTables, Sex, UserInput,
};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "pension-projection", version, about = "Project a retirement pension")]
struct Cli {
    /// Read the request from a JSON file instead of flags
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    age: Option<u32>,

    /// male or female
    #[arg(long)]
    sex: Option<String>,

    /// Present-day gross monthly salary
    #[arg(long)]
    salary: Option<f64>,

    #[arg(long)]
    start_year: Option<i32>,

    /// Defaults to the year the statutory retirement age is reached
    #[arg(long)]
    end_year: Option<i32>,

    #[arg(long)]
    primary_balance: Option<f64>,

    #[arg(long)]
    sub_account_balance: Option<f64>,

    #[arg(long)]
    sick_leave: bool,

    /// Expected monthly pension in present-day money
    #[arg(long, default_value_t = 0.0)]
    expected: f64,

    #[arg(long)]
    postal_code: Option<String>,

    /// Directory with reference table CSV files; built-in tables if omitted
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Anchor year for the salary and age (defaults to this year)
    #[arg(long)]
    current_year: Option<i32>,

    /// Write salary path and capital trajectory to this CSV file
    #[arg(long)]
    trajectory_csv: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn user_input(&self, tables: &ReferenceTables, current_year: i32) -> Result<UserInput> {
        if let Some(path) = &self.input {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            return serde_json::from_reader(file)
                .with_context(|| format!("parsing {}", path.display()));
        }

        let (Some(age), Some(sex), Some(salary), Some(start_year)) =
            (self.age, self.sex.as_deref(), self.salary, self.start_year)
        else {
            bail!("either --input or all of --age, --sex, --salary and --start-year are required");
        };
        let sex: Sex = sex.parse()?;

        let mut input = UserInput {
            age,
            sex,
            monthly_gross_salary: salary,
            career_start_year: start_year,
            career_planned_end_year: 0,
            known_primary_account_balance: self.primary_balance,
            known_sub_account_balance: self.sub_account_balance,
            include_sick_leave: self.sick_leave,
            expected_monthly_pension: self.expected,
            postal_code: self.postal_code.clone(),
        };
        let statutory_end = input.statutory_end_year(tables.retirement_age.get(sex), current_year);
        input.career_planned_end_year = self.end_year.unwrap_or(statutory_end);

        Ok(input)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tables = match &cli.tables {
        Some(dir) => ReferenceTables::from_csv_path(dir)
            .with_context(|| format!("loading tables from {}", dir.display()))?,
        None => ReferenceTables::default_tables(),
    };

    let mut config = ProjectionConfig::default();
    if let Some(year) = cli.current_year {
        config.current_year = year;
    }

    let input = cli.user_input(&tables, config.current_year)?;
    let engine = PensionEngine::new(tables, config);
    let result = engine.calculate(&input)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&input, &result);
    }

    if let Some(path) = &cli.trajectory_csv {
        write_trajectory(path, &result)?;
        println!("\nTrajectory written to: {}", path.display());
    }

    Ok(())
}

fn print_report(input: &UserInput, result: &PensionResult) {
    println!("Pension Projection");
    println!("==================\n");

    println!(
        "Retirement: {} at age {} (statutory age {})",
        result.retirement_year, result.retirement_age, result.statutory_retirement_age
    );
    println!("  Final capital:     {:>12.2}", result.final_capital());
    println!("  Nominal pension:   {:>12.2}", result.nominal_pension);
    println!("  Real pension:      {:>12.2}", result.real_pension);
    println!("  Replacement rate:  {:>11.1}%", result.replacement_rate_percent);
    println!(
        "  vs average:        {:>12.2} ({:.1}% of {:.2})",
        result.average_comparison.absolute_diff,
        result.average_comparison.relative_percent,
        result.average_comparison.average_pension
    );

    let impact = &result.sick_leave_impact;
    println!(
        "\nSick leave: {:.2} without, {:.2} with ({:.2}, {:.1}%)",
        impact.without_sick_leave,
        impact.with_sick_leave,
        impact.absolute_diff,
        impact.relative_percent
    );

    println!(
        "\n{:>6} {:>6} {:>5} {:>12} {:>12} {:>9}",
        "Extra", "Year", "Age", "Nominal", "Real", "Increase"
    );
    println!("{}", "-".repeat(55));
    for variant in &result.postponement_variants {
        println!(
            "{:>6} {:>6} {:>5} {:>12.2} {:>12.2} {:>8.1}%",
            format!("+{}", variant.additional_years),
            variant.retirement_year,
            variant.retirement_age,
            variant.nominal_pension,
            variant.real_pension,
            variant.percent_increase_over_base
        );
    }

    let gap = result.gap_to_expected_pension;
    println!("\nExpected pension: {:.2}", input.expected_monthly_pension);
    if result.expectation_met() {
        println!("  Met, {:.2} above expectation", -gap);
    } else {
        match result.additional_years_to_reach_expected {
            Some(years) => {
                println!("  Short by {:.2}; reached after {} more year(s)", gap, years)
            }
            None => println!(
                "  Short by {:.2}; not reachable before the maximum retirement age",
                gap
            ),
        }
    }
}

fn write_trajectory(path: &Path, result: &PensionResult) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;

    writeln!(
        file,
        "Year,MonthlySalary,AnnualSalary,PrimaryBalance,SubAccountBalance,TotalBalance"
    )?;
    for point in &result.capital_trajectory.points {
        let Some(salary) = result.salary_path_used.get(point.year) else {
            continue;
        };
        writeln!(
            file,
            "{},{:.2},{:.2},{:.2},{:.2},{:.2}",
            point.year,
            salary.monthly_amount,
            salary.annual_amount,
            point.primary_balance,
            point.sub_account_balance,
            point.total_balance,
        )?;
    }

    Ok(())
}
