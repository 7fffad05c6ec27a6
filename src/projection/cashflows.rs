//! Output structures for projections

use super::allocation::Allocation;
use super::loan::ServicingOutcome;
use super::synthesis::Synthesis;
use crate::params::SimulationParameters;
use serde::{Deserialize, Serialize};

/// Round a currency amount to whole units (half away from zero)
pub(crate) fn round_currency(value: f64) -> f64 {
    value.round()
}

/// Round a percentage to two decimals
pub(crate) fn round_pct(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sleeve balances and headline flows at the end of one simulated year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    pub year: u32,

    // Balances
    pub annuity_balance: f64,
    pub fund_balance: f64,
    pub property_value: f64,
    pub sheltered_equity: f64,
    pub unsheltered_equity: f64,
    pub savings_balance: f64,
    pub retirement_balance: f64,
    pub loan_balance: f64,

    // Aggregates
    pub gross_wealth: f64,
    pub net_wealth: f64,

    // Flows
    pub net_rent: f64,
    /// Fund distributions after fee and tax
    pub fund_income: f64,
    pub loan_interest: f64,
    pub loan_amortization: f64,
    pub annuity_paid: f64,
    /// Annuity, rental and fund taxes of the year
    pub taxes: f64,
}

impl YearSnapshot {
    pub fn new(year: u32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    pub fn rounded(&self) -> Self {
        let r = round_currency;
        Self {
            year: self.year,
            annuity_balance: r(self.annuity_balance),
            fund_balance: r(self.fund_balance),
            property_value: r(self.property_value),
            sheltered_equity: r(self.sheltered_equity),
            unsheltered_equity: r(self.unsheltered_equity),
            savings_balance: r(self.savings_balance),
            retirement_balance: r(self.retirement_balance),
            loan_balance: r(self.loan_balance),
            gross_wealth: r(self.gross_wealth),
            net_wealth: r(self.net_wealth),
            net_rent: r(self.net_rent),
            fund_income: r(self.fund_income),
            loan_interest: r(self.loan_interest),
            loan_amortization: r(self.loan_amortization),
            annuity_paid: r(self.annuity_paid),
            taxes: r(self.taxes),
        }
    }
}

/// Itemized pre-tax and tax components of one simulated year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowDetail {
    pub year: u32,

    // Real estate
    pub rent_gross: f64,
    pub rent_tax: f64,
    pub rent_charges: f64,
    pub rent_net: f64,

    // Income fund
    pub fund_gross: f64,
    pub fund_fee: f64,
    pub fund_tax: f64,
    /// After fee and tax
    pub fund_net: f64,

    // Annuity wrapper
    pub annuity_gross_interest: f64,
    pub annuity_management_fee: f64,
    pub annuity_net_interest: f64,
    pub annuity_paid: f64,
    /// Taxable share of the annuity paid
    pub annuity_interest_portion: f64,
    pub annuity_tax: f64,

    // Savings and retirement
    pub savings_interest: f64,
    pub savings_tax: f64,
    pub retirement_contribution: f64,
    pub retirement_relief: f64,

    // Equities (unrealized growth of the year)
    pub sheltered_equity_gain: f64,
    pub unsheltered_equity_gain: f64,

    // Margin loan
    pub loan_active: bool,
    pub loan_outcome: Option<ServicingOutcome>,
    pub loan_interest: f64,
    pub loan_amortization: f64,
    pub loan_capitalized_interest: f64,
    pub savings_swept_to_loan: f64,

    /// Rent and distributions routed to the surplus sleeve
    pub routed_income: f64,
    /// Rent and distributions with no sleeve to receive them
    pub unrouted_income: f64,
}

impl CashFlowDetail {
    pub fn new(year: u32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    pub fn rounded(&self) -> Self {
        let r = round_currency;
        Self {
            year: self.year,
            rent_gross: r(self.rent_gross),
            rent_tax: r(self.rent_tax),
            rent_charges: r(self.rent_charges),
            rent_net: r(self.rent_net),
            fund_gross: r(self.fund_gross),
            fund_fee: r(self.fund_fee),
            fund_tax: r(self.fund_tax),
            fund_net: r(self.fund_net),
            annuity_gross_interest: r(self.annuity_gross_interest),
            annuity_management_fee: r(self.annuity_management_fee),
            annuity_net_interest: r(self.annuity_net_interest),
            annuity_paid: r(self.annuity_paid),
            annuity_interest_portion: r(self.annuity_interest_portion),
            annuity_tax: r(self.annuity_tax),
            savings_interest: r(self.savings_interest),
            savings_tax: r(self.savings_tax),
            retirement_contribution: r(self.retirement_contribution),
            retirement_relief: r(self.retirement_relief),
            sheltered_equity_gain: r(self.sheltered_equity_gain),
            unsheltered_equity_gain: r(self.unsheltered_equity_gain),
            loan_active: self.loan_active,
            loan_outcome: self.loan_outcome,
            loan_interest: r(self.loan_interest),
            loan_amortization: r(self.loan_amortization),
            loan_capitalized_interest: r(self.loan_capitalized_interest),
            savings_swept_to_loan: r(self.savings_swept_to_loan),
            routed_income: r(self.routed_income),
            unrouted_income: r(self.unrouted_income),
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Input record the projection ran on
    pub params: SimulationParameters,

    pub allocation: Allocation,

    /// One snapshot per year, year 0 first
    pub snapshots: Vec<YearSnapshot>,

    /// Same length and order as `snapshots`
    pub details: Vec<CashFlowDetail>,

    pub synthesis: Synthesis,
}

impl ProjectionResult {
    pub fn final_snapshot(&self) -> Option<&YearSnapshot> {
        self.snapshots.last()
    }

    /// Copy with every externally visible amount rounded
    ///
    /// Currency to whole units, percentages to two decimals.
    pub fn rounded(&self) -> Self {
        let r = round_currency;
        let allocation = Allocation {
            base_capital: r(self.allocation.base_capital),
            loan_proceeds: r(self.allocation.loan_proceeds),
            effective_capital: r(self.allocation.effective_capital),
            annuity_capital: r(self.allocation.annuity_capital),
            fund_capital: r(self.allocation.fund_capital),
            property_capital: r(self.allocation.property_capital),
            sheltered_equity_capital: r(self.allocation.sheltered_equity_capital),
            unsheltered_equity_capital: r(self.allocation.unsheltered_equity_capital),
            retirement_annual_contribution: r(self.allocation.retirement_annual_contribution),
            total_allocation_pct: round_pct(self.allocation.total_allocation_pct),
            allocated_capital: r(self.allocation.allocated_capital),
            available_capital: r(self.allocation.available_capital),
            unallocated_capital: r(self.allocation.unallocated_capital),
            ..self.allocation.clone()
        };

        Self {
            params: self.params.clone(),
            allocation,
            snapshots: self.snapshots.iter().map(YearSnapshot::rounded).collect(),
            details: self.details.iter().map(CashFlowDetail::rounded).collect(),
            synthesis: self.synthesis.rounded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round_currency(1234.5), 1235.0);
        assert_eq!(round_currency(-1234.5), -1235.0);
        assert_eq!(round_currency(0.49), 0.0);
        assert_eq!(round_pct(12.3456), 12.35);
        assert_eq!(round_pct(-0.004), -0.0);
    }

    #[test]
    fn test_snapshot_rounding_keeps_year() {
        let snapshot = YearSnapshot {
            year: 3,
            annuity_balance: 10_000.4,
            net_wealth: 99_999.5,
            ..YearSnapshot::default()
        };
        let rounded = snapshot.rounded();

        assert_eq!(rounded.year, 3);
        assert_eq!(rounded.annuity_balance, 10_000.0);
        assert_eq!(rounded.net_wealth, 100_000.0);
    }

    #[test]
    fn test_detail_rounding_keeps_loan_flags() {
        let detail = CashFlowDetail {
            loan_active: true,
            loan_outcome: Some(ServicingOutcome::Capitalized),
            loan_capitalized_interest: 12.7,
            ..CashFlowDetail::new(2)
        };
        let rounded = detail.rounded();

        assert!(rounded.loan_active);
        assert_eq!(rounded.loan_outcome, Some(ServicingOutcome::Capitalized));
        assert_eq!(rounded.loan_capitalized_interest, 13.0);
    }
}
