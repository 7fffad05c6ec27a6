//! Advisory checks and comparisons computed on top of a projection

pub mod equity_mix;
pub mod insights;

pub use equity_mix::{compare_equity_mixes, EquityMix, EquityMixOutcome};
pub use insights::{review, CeilingUsage, Finding};
