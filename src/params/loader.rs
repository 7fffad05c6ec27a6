//! Load parameter records from JSON

use super::SimulationParameters;
use crate::error::{ProjectionError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default location of the reference parameter record
pub const DEFAULT_PARAMETERS_PATH: &str = "data/parameters/base_case.json";

/// Load one parameter record from a JSON file
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<SimulationParameters> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ProjectionError::io(path, e))?;
    load_parameters_from_reader(BufReader::new(file))
}

/// Load one parameter record from any reader (e.g., string buffer, stdin)
///
/// Missing keys take their default value.
pub fn load_parameters_from_reader<R: std::io::Read>(reader: R) -> Result<SimulationParameters> {
    let params = serde_json::from_reader(reader)?;
    Ok(params)
}

/// Load the reference record shipped in data/parameters/
pub fn load_default_parameters() -> Result<SimulationParameters> {
    load_parameters(DEFAULT_PARAMETERS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SavingsRouting;

    #[test]
    fn test_load_default_parameters() {
        let params = load_default_parameters().expect("Failed to load parameters");
        assert_eq!(params, SimulationParameters::default());
    }

    #[test]
    fn test_partial_record_uses_defaults() {
        let json = r#"{
            "base_capital": 100000,
            "margin_loan": { "enabled": true, "loan_to_value_pct": 50 },
            "savings": { "routing": "sweep_to_loan" }
        }"#;

        let params = load_parameters_from_reader(json.as_bytes()).unwrap();
        assert_eq!(params.base_capital, 100_000.0);
        assert!(params.margin_loan.enabled);
        assert_eq!(params.margin_loan.duration_years, 5);
        assert_eq!(params.savings.routing, SavingsRouting::SweepToLoan);
        assert_eq!(params.annuity.monthly_annuity, 850.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_parameters("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ProjectionError::Io { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = load_parameters_from_reader("{ base_capital: ".as_bytes()).unwrap_err();
        assert!(matches!(err, ProjectionError::Json(_)));
    }
}
