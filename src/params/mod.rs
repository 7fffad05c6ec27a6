//! Parameter records and JSON loading

mod data;
pub mod loader;

pub use data::{
    AnnuityParams, ContributionFrequency, EquityParams, IncomeFundParams, InflationParams,
    MarginLoanParams, PeriodicContribution, RealEstateParams, RetirementParams, SavingsParams,
    SavingsRouting, SimulationParameters,
};
pub use loader::{load_default_parameters, load_parameters, load_parameters_from_reader};
