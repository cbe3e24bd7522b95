//! Load calculation requests from a CSV file, one request per row

use super::{Sex, UserInput};
use crate::error::TableError;
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the batch input columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    age: u32,
    sex: String,
    monthly_gross_salary: f64,
    career_start_year: i32,
    career_planned_end_year: i32,
    #[serde(default)]
    primary_balance: Option<f64>,
    #[serde(default)]
    sub_account_balance: Option<f64>,
    #[serde(default)]
    include_sick_leave: Option<bool>,
    expected_monthly_pension: f64,
    #[serde(default)]
    postal_code: Option<String>,
}

impl CsvRow {
    fn into_input(self) -> Result<UserInput, TableError> {
        let sex: Sex = self.sex.parse()?;

        Ok(UserInput {
            age: self.age,
            sex,
            monthly_gross_salary: self.monthly_gross_salary,
            career_start_year: self.career_start_year,
            career_planned_end_year: self.career_planned_end_year,
            known_primary_account_balance: self.primary_balance,
            known_sub_account_balance: self.sub_account_balance,
            include_sick_leave: self.include_sick_leave.unwrap_or(false),
            expected_monthly_pension: self.expected_monthly_pension,
            postal_code: self.postal_code.filter(|code| !code.trim().is_empty()),
        })
    }
}

/// Load all inputs from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<UserInput>, TableError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| TableError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_inputs_from_reader(file)
}

/// Load inputs from any reader (e.g., string buffer, request body)
pub fn load_inputs_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<UserInput>, TableError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut inputs = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        inputs.push(row.into_input()?);
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
age,sex,monthly_gross_salary,career_start_year,career_planned_end_year,primary_balance,sub_account_balance,include_sick_leave,expected_monthly_pension,postal_code
30,male,5000,2015,2055,,,false,4000,
52,Female,8100.50,1995,2033,210000,35000,true,3900,31-000
";

    #[test]
    fn test_load_inputs_from_reader() {
        let inputs = load_inputs_from_reader(SAMPLE.as_bytes()).expect("Failed to load inputs");
        assert_eq!(inputs.len(), 2);

        let first = &inputs[0];
        assert_eq!(first.sex, Sex::Male);
        assert_eq!(first.known_primary_account_balance, None);
        assert!(!first.include_sick_leave);
        assert_eq!(first.postal_code, None);

        let second = &inputs[1];
        assert_eq!(second.sex, Sex::Female);
        assert_eq!(second.known_primary_account_balance, Some(210000.0));
        assert_eq!(second.known_sub_account_balance, Some(35000.0));
        assert!(second.include_sick_leave);
        assert_eq!(second.postal_code.as_deref(), Some("31-000"));
    }

    #[test]
    fn test_unknown_sex_is_rejected() {
        let csv = "\
age,sex,monthly_gross_salary,career_start_year,career_planned_end_year,expected_monthly_pension
40,x,5000,2010,2050,3000
";
        let err = load_inputs_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::UnknownSex(_)));
    }
}
