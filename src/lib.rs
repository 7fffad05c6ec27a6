//! Wealth Projection - deterministic 8-year projection of a multi-sleeve portfolio
//!
//! This library provides:
//! - Allocation of a starting capital across an annuity wrapper, an income fund,
//!   a furnished rental, two equity wrappers, regulated savings and a retirement plan
//! - A margin loan against the equity allocation, serviced from rent and distributions
//! - French taxation of income during the projection and of gains at the horizon
//! - Market scenario presets and parallel batch runs
//! - Advisory findings and an equity-split comparison

pub mod analysis;
pub mod assumptions;
pub mod error;
pub mod params;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{Assumptions, FundCatalog, TaxRates};
pub use error::{ProjectionError, Result};
pub use params::SimulationParameters;
pub use projection::{ProjectionEngine, ProjectionResult, Synthesis, YearSnapshot};
pub use scenario::{Scenario, ScenarioRunner};
