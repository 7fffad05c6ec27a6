//! Running state threaded through the yearly loop

use super::allocation::Allocation;

/// Sleeve balances and cumulative counters at a point in the projection
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Current simulated year (0..=horizon)
    pub year: u32,

    // Sleeve balances
    pub annuity_balance: f64,
    pub fund_balance: f64,
    pub property_value: f64,
    pub sheltered_equity: f64,
    pub unsheltered_equity: f64,
    pub savings_balance: f64,
    pub retirement_balance: f64,

    /// Outstanding margin-loan principal
    pub loan_balance: f64,

    /// Principal drawn at origination, zero until then
    pub loan_borrowed: f64,

    /// Year the annuity sleeve ran dry, set once
    pub annuity_depleted_year: Option<u32>,

    // Cumulative counters
    pub cumulative_annuity_paid: f64,
    pub cumulative_net_annuity: f64,
    pub cumulative_taxes: f64,
    pub cumulative_fund_income: f64,
    pub cumulative_loan_interest: f64,
    pub cumulative_retirement_relief: f64,
    pub cumulative_unrouted_income: f64,
}

impl SimulationState {
    /// Initialize balances from the resolved allocation
    pub fn from_allocation(allocation: &Allocation) -> Self {
        Self {
            year: 0,
            annuity_balance: allocation.annuity_capital,
            fund_balance: allocation.fund_capital,
            property_value: allocation.property_capital,
            sheltered_equity: allocation.sheltered_equity_capital,
            unsheltered_equity: allocation.unsheltered_equity_capital,
            savings_balance: 0.0,
            retirement_balance: 0.0,
            loan_balance: 0.0,
            loan_borrowed: 0.0,
            annuity_depleted_year: None,
            cumulative_annuity_paid: 0.0,
            cumulative_net_annuity: 0.0,
            cumulative_taxes: 0.0,
            cumulative_fund_income: 0.0,
            cumulative_loan_interest: 0.0,
            cumulative_retirement_relief: 0.0,
            cumulative_unrouted_income: 0.0,
        }
    }

    pub fn is_annuity_depleted(&self) -> bool {
        self.annuity_depleted_year.is_some()
    }

    /// Sum of every sleeve balance, before debt
    pub fn gross_wealth(&self) -> f64 {
        self.annuity_balance
            + self.fund_balance
            + self.property_value
            + self.sheltered_equity
            + self.unsheltered_equity
            + self.savings_balance
            + self.retirement_balance
    }

    pub fn net_wealth(&self) -> f64 {
        self.gross_wealth() - self.loan_balance
    }
}
