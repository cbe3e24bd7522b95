//! CSV-based reference table loader
//!
//! Loads reference tables from CSV files in data/tables/

use super::{AnnuityDivisorTable, BySex, LifeExpectancyTable, YearTable};
use crate::error::TableError;
use crate::input::Sex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Default path to the tables directory
pub const DEFAULT_TABLES_PATH: &str = "data/tables";

fn open(path: &Path, file_name: &str) -> Result<File, TableError> {
    let full = path.join(file_name);
    File::open(&full).map_err(|source| TableError::Io {
        path: full.display().to_string(),
        source,
    })
}

fn parse<T: FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    column: &'static str,
) -> Result<T, TableError> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse().map_err(|_| TableError::Parse {
        column,
        value: raw.to_string(),
    })
}

/// Read a two-column (year, value) table
pub fn year_table_from_reader<R: Read>(reader: R) -> Result<YearTable, TableError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut table = YearTable::new();

    for result in reader.records() {
        let record = result?;
        let year: i32 = parse(&record, 0, "year")?;
        let value: f64 = parse(&record, 1, "value")?;
        table.insert(year, value);
    }

    Ok(table)
}

/// Load wage growth rates: year,rate
pub fn load_wage_growth(path: &Path) -> Result<YearTable, TableError> {
    year_table_from_reader(open(path, "wage_growth.csv")?)
}

/// Load cumulative CPI: year,index. Every index must be positive.
pub fn load_cpi(path: &Path) -> Result<YearTable, TableError> {
    let table = year_table_from_reader(open(path, "cpi.csv")?)?;

    if let Some((year, index)) = table.iter().find(|(_, index)| *index <= 0.0) {
        return Err(TableError::Invalid {
            table: "cpi",
            message: format!("index for {} is {}", year, index),
        });
    }

    Ok(table)
}

/// Load average monthly pension: year,amount
pub fn load_average_pension(path: &Path) -> Result<YearTable, TableError> {
    year_table_from_reader(open(path, "average_pension.csv")?)
}

/// Read annuity divisors: age,female,male (months)
pub fn divisors_from_reader<R: Read>(reader: R) -> Result<AnnuityDivisorTable, TableError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let age: u32 = parse(&record, 0, "age")?;
        let female: f64 = parse(&record, 1, "female")?;
        let male: f64 = parse(&record, 2, "male")?;

        if female <= 0.0 || male <= 0.0 {
            return Err(TableError::Invalid {
                table: "annuity_divisors",
                message: format!("non-positive divisor at age {}", age),
            });
        }
        rows.push((age, female, male));
    }

    Ok(AnnuityDivisorTable::from_rows(rows))
}

pub fn load_annuity_divisors(path: &Path) -> Result<AnnuityDivisorTable, TableError> {
    divisors_from_reader(open(path, "annuity_divisors.csv")?)
}

/// Read a per-sex scalar table: sex,value. Both sexes must be present.
pub fn by_sex_from_reader<T, R>(reader: R, table: &'static str) -> Result<BySex<T>, TableError>
where
    T: FromStr + Copy,
    R: Read,
{
    let mut reader = csv::Reader::from_reader(reader);
    let mut female = None;
    let mut male = None;

    for result in reader.records() {
        let record = result?;
        let sex: Sex = record.get(0).unwrap_or("").parse()?;
        let value: T = parse(&record, 1, "value")?;
        match sex {
            Sex::Female => female = Some(value),
            Sex::Male => male = Some(value),
        }
    }

    match (female, male) {
        (Some(female), Some(male)) => Ok(BySex::new(female, male)),
        _ => Err(TableError::Invalid {
            table,
            message: "both female and male rows are required".to_string(),
        }),
    }
}

/// Load sick-leave coefficients: sex,coefficient, each within [0, 1]
pub fn load_sick_leave(path: &Path) -> Result<BySex<f64>, TableError> {
    let table: BySex<f64> = by_sex_from_reader(open(path, "sick_leave.csv")?, "sick_leave")?;

    for sex in [Sex::Female, Sex::Male] {
        let coefficient = table.get(sex);
        if !(0.0..=1.0).contains(&coefficient) {
            return Err(TableError::Invalid {
                table: "sick_leave",
                message: format!("coefficient for {} is {}", sex, coefficient),
            });
        }
    }

    Ok(table)
}

/// Load statutory retirement ages: sex,age
pub fn load_retirement_ages(path: &Path) -> Result<BySex<u32>, TableError> {
    by_sex_from_reader(open(path, "retirement_age.csv")?, "retirement_age")
}

/// Read life expectancy: age,month,months
pub fn life_expectancy_from_reader<R: Read>(reader: R) -> Result<LifeExpectancyTable, TableError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut table = LifeExpectancyTable::new();

    for result in reader.records() {
        let record = result?;
        let age: u32 = parse(&record, 0, "age")?;
        let month: u32 = parse(&record, 1, "month")?;
        let months: f64 = parse(&record, 2, "months")?;
        table.insert(age, month, months);
    }

    Ok(table)
}

pub fn load_life_expectancy(path: &Path) -> Result<LifeExpectancyTable, TableError> {
    life_expectancy_from_reader(open(path, "life_expectancy.csv")?)
}

/// All tables loaded from one directory
pub struct LoadedTables {
    pub wage_growth: YearTable,
    pub cpi: YearTable,
    pub average_pension: YearTable,
    pub divisors: AnnuityDivisorTable,
    pub sick_leave: BySex<f64>,
    pub retirement_age: BySex<u32>,
    pub life_expectancy: LifeExpectancyTable,
}

impl LoadedTables {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, TableError> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, TableError> {
        log::info!("loading reference tables from {}", path.display());

        Ok(Self {
            wage_growth: load_wage_growth(path)?,
            cpi: load_cpi(path)?,
            average_pension: load_average_pension(path)?,
            divisors: load_annuity_divisors(path)?,
            sick_leave: load_sick_leave(path)?,
            retirement_age: load_retirement_ages(path)?,
            life_expectancy: load_life_expectancy(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_table_from_reader() {
        let csv = "year,rate\n2024,0.141\n2025,0.082\n";
        let table = year_table_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(2025), Some(0.082));
    }

    #[test]
    fn test_year_table_rejects_garbage() {
        let csv = "year,rate\n2024,abc\n";
        let err = year_table_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::Parse { column: "value", .. }));
    }

    #[test]
    fn test_divisors_from_reader() {
        let csv = "age,female,male\n60,299.4,245.5\n65,251.2,203.9\n";
        let table = divisors_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.lookup(Sex::Male, 65).unwrap().months, 203.9);
        assert_eq!(table.lookup(Sex::Female, 61).unwrap().age, 60);
    }

    #[test]
    fn test_divisors_reject_non_positive() {
        let csv = "age,female,male\n60,0,245.5\n";
        assert!(matches!(
            divisors_from_reader(csv.as_bytes()),
            Err(TableError::Invalid { .. })
        ));
    }

    #[test]
    fn test_by_sex_requires_both_rows() {
        let csv = "sex,coefficient\nfemale,0.046\nmale,0.033\n";
        let table: BySex<f64> = by_sex_from_reader(csv.as_bytes(), "sick_leave").unwrap();
        assert_eq!(table.get(Sex::Male), 0.033);

        let partial = "sex,age\nmale,65\n";
        let result: Result<BySex<u32>, _> =
            by_sex_from_reader(partial.as_bytes(), "retirement_age");
        assert!(result.is_err());
    }

    #[test]
    fn test_life_expectancy_from_reader() {
        let csv = "age,month,months\n60,0,264.0\n60,6,258.0\n";
        let table = life_expectancy_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.months_remaining(60, 6), Some(258.0));
        assert_eq!(table.months_remaining(60, 2), Some(264.0));
    }

    #[test]
    fn test_missing_directory_reports_path() {
        let err = LoadedTables::load_from(Path::new("no/such/dir")).err().unwrap();
        assert!(matches!(err, TableError::Io { .. }));
        assert!(err.to_string().contains("wage_growth.csv"));
    }

    #[test]
    fn test_load_default_reads_shipped_tables() {
        let loaded = LoadedTables::load_default().unwrap();
        assert_eq!(loaded.wage_growth.first_year(), Some(2000));
        assert_eq!(loaded.cpi.get(2000), Some(100.0));
        assert_eq!(loaded.retirement_age.get(Sex::Male), 65);
        assert_eq!(loaded.life_expectancy.len(), 241);
        assert_eq!(loaded.divisors.lookup(Sex::Male, 60).unwrap().months, 245.5);
    }
}
