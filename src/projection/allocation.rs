//! Allocation of the starting capital across sleeves
//!
//! Runs once before the yearly loop. It also fixes the cash-routing policy so
//! the loop never has to re-derive it from the parameter flags.

use crate::assumptions::{FundCatalog, FundTerms};
use crate::params::{SavingsRouting, SimulationParameters};
use log::warn;
use serde::{Deserialize, Serialize};

/// Number of simulated years after year 0
pub const HORIZON_YEARS: u32 = 8;

/// Tolerance for treating an allocation total as exactly 100%
const FULL_ALLOCATION_TOLERANCE: f64 = 0.1;

/// How the enabled allocation percentages compare to 100%
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AllocationStatus {
    Complete { total_pct: f64 },
    Remaining { pct: f64 },
    Overflow { pct: f64 },
}

impl AllocationStatus {
    pub fn from_total(total_pct: f64) -> Self {
        if (total_pct - 100.0).abs() < FULL_ALLOCATION_TOLERANCE {
            AllocationStatus::Complete { total_pct }
        } else if total_pct < 100.0 {
            AllocationStatus::Remaining {
                pct: 100.0 - total_pct,
            }
        } else {
            AllocationStatus::Overflow {
                pct: total_pct - 100.0,
            }
        }
    }
}

/// Destination of rent and distributions not consumed by the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashSink {
    Savings,
    Annuity,
    /// Neither sleeve is enabled; the cash leaves the model
    Unrouted,
}

/// What happens to the savings balance, resolved from `SavingsRouting`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsSweep {
    None,
    IntoLoanService,
    IntoAnnuityAtHorizon,
}

/// Starting capital of every sleeve and the routing policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub base_capital: f64,

    /// Amount drawn on the margin loan (zero when unavailable)
    pub loan_proceeds: f64,

    /// Base capital plus loan proceeds
    pub effective_capital: f64,

    /// Annuity wrapper capital, net of entry fee
    pub annuity_capital: f64,

    /// Income-fund capital, net of product and wrapper entry fees
    pub fund_capital: f64,

    /// Property purchase price
    pub property_capital: f64,

    pub sheltered_equity_capital: f64,
    pub unsheltered_equity_capital: f64,

    /// Yearly retirement contribution, paid from year 1
    pub retirement_annual_contribution: f64,

    /// Sum of enabled allocation percentages
    pub total_allocation_pct: f64,

    /// Effective capital times the allocation total
    pub allocated_capital: f64,

    /// Effective capital left after allocation (negative on overflow)
    pub available_capital: f64,

    /// Base capital left uninvested
    pub unallocated_capital: f64,

    pub surplus_sink: CashSink,
    pub savings_sweep: SavingsSweep,

    /// Terms of the selected income-fund product
    pub fund_terms: FundTerms,
}

impl Allocation {
    /// Resolve the allocation for a parameter record
    pub fn resolve(params: &SimulationParameters, funds: &FundCatalog) -> Self {
        let base_capital = params.base_capital;

        let equity_fraction = if params.equities.enabled {
            params.equities.allocation_pct / 100.0
        } else {
            0.0
        };

        if params.margin_loan.enabled && !params.loan_available() {
            warn!("Margin loan enabled without an equity allocation; no proceeds drawn");
        }

        let loan_proceeds = if params.margin_loan.enabled {
            base_capital * equity_fraction * (params.margin_loan.loan_to_value_pct / 100.0)
        } else {
            0.0
        };
        let effective_capital = base_capital + loan_proceeds;
        let share = |enabled: bool, pct: f64| {
            if enabled {
                effective_capital * pct / 100.0
            } else {
                0.0
            }
        };

        let wrapper_fee_factor = 1.0 - params.annuity.entry_fee_pct / 100.0;

        let annuity_capital =
            share(params.annuity.enabled, params.annuity.allocation_pct) * wrapper_fee_factor;

        let fund_terms = match funds.get(&params.income_fund.product) {
            Some(terms) => terms.clone(),
            None => {
                if params.income_fund.enabled {
                    warn!(
                        "Unknown income-fund product '{}'; using zero-rate terms",
                        params.income_fund.product
                    );
                }
                FundTerms::zero_rate(&params.income_fund.product)
            }
        };
        let fund_capital = share(params.income_fund.enabled, params.income_fund.allocation_pct)
            * (1.0 - fund_terms.entry_fee_pct / 100.0)
            * wrapper_fee_factor;

        let property_capital = share(params.real_estate.enabled, params.real_estate.allocation_pct);

        let equity_capital = share(params.equities.enabled, params.equities.allocation_pct);
        let sheltered_equity_capital = equity_capital * params.equities.sheltered_share_pct / 100.0;
        let unsheltered_equity_capital =
            equity_capital * (100.0 - params.equities.sheltered_share_pct) / 100.0;

        let retirement_annual_contribution =
            share(params.retirement.enabled, params.retirement.allocation_pct) / HORIZON_YEARS as f64;

        let total_allocation_pct = params.total_allocation_pct();
        if total_allocation_pct > 100.0 + FULL_ALLOCATION_TOLERANCE {
            warn!("Allocations sum to {:.1}%, above 100%", total_allocation_pct);
        }
        let allocated_capital = effective_capital * total_allocation_pct / 100.0;

        let surplus_sink = if params.savings.enabled {
            CashSink::Savings
        } else if params.annuity.enabled {
            CashSink::Annuity
        } else {
            CashSink::Unrouted
        };

        let savings_sweep = match params.savings.routing {
            SavingsRouting::SweepToLoan if params.savings.enabled && params.margin_loan.enabled => {
                SavingsSweep::IntoLoanService
            }
            SavingsRouting::SweepToAnnuity if params.savings.enabled && params.annuity.enabled => {
                SavingsSweep::IntoAnnuityAtHorizon
            }
            _ => SavingsSweep::None,
        };

        Self {
            base_capital,
            loan_proceeds,
            effective_capital,
            annuity_capital,
            fund_capital,
            property_capital,
            sheltered_equity_capital,
            unsheltered_equity_capital,
            retirement_annual_contribution,
            total_allocation_pct,
            allocated_capital,
            available_capital: effective_capital - allocated_capital,
            unallocated_capital: base_capital * (1.0 - total_allocation_pct / 100.0),
            surplus_sink,
            savings_sweep,
            fund_terms,
        }
    }

    pub fn equity_capital(&self) -> f64 {
        self.sheltered_equity_capital + self.unsheltered_equity_capital
    }

    pub fn status(&self) -> AllocationStatus {
        AllocationStatus::from_total(self.total_allocation_pct)
    }
}
