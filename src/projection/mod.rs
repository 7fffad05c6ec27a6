//! Yearly projection of the multi-sleeve portfolio

mod allocation;
mod annuity;
mod cashflows;
mod engine;
mod loan;
mod state;
mod synthesis;

pub use allocation::{Allocation, AllocationStatus, CashSink, SavingsSweep, HORIZON_YEARS};
pub use annuity::{annuity_duration, remaining_duration, AnnuityDuration};
pub use cashflows::{CashFlowDetail, ProjectionResult, YearSnapshot};
pub use engine::ProjectionEngine;
pub use loan::{service_year, LoanYear, ServicingOutcome};
pub use state::SimulationState;
pub use synthesis::{LiquidationTaxes, Synthesis};
