//! Terminal summary derived after the yearly loop
//!
//! Liquidation taxes (property disposal, equity gains) only exist here, at the
//! horizon. They are added to the cumulative tax counter carried by the loop.

use super::allocation::{Allocation, HORIZON_YEARS};
use super::annuity::{annuity_duration, remaining_duration, AnnuityDuration};
use super::cashflows::{round_currency, round_pct};
use super::state::SimulationState;
use crate::assumptions::TaxRates;
use crate::params::SimulationParameters;
use serde::{Deserialize, Serialize};

/// Gains below this are reported as a zero average return
const NEGLIGIBLE_GAIN: f64 = 1.0;

/// Taxes settled when positions are valued at the horizon
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LiquidationTaxes {
    /// Capital-gains tax on the property, only when sold
    pub property_gain: f64,
    /// Social levies on the sheltered equity gain
    pub sheltered_equity: f64,
    /// Flat tax on the unsheltered equity gain
    pub unsheltered_equity: f64,
}

impl LiquidationTaxes {
    pub fn total(&self) -> f64 {
        self.property_gain + self.sheltered_equity + self.unsheltered_equity
    }
}

/// Final aggregate metrics of one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synthesis {
    pub initial_capital: f64,
    pub loan_proceeds: f64,
    pub effective_capital: f64,

    // Wealth and returns
    pub final_net_wealth: f64,
    /// Deflated final wealth; equals the nominal figure when inflation is off
    pub final_real_wealth: f64,
    pub total_gain: f64,
    pub total_gain_pct: f64,
    pub real_gain: f64,
    pub real_gain_pct: f64,
    pub average_annual_return_pct: f64,
    pub real_average_annual_return_pct: f64,
    pub cumulative_inflation_pct: f64,

    // Terminal values after liquidation
    pub property_final_value: f64,
    pub net_equity_value: f64,
    pub savings_final: f64,
    pub retirement_final: f64,

    // Taxes
    /// Yearly taxes plus liquidation taxes
    pub total_taxes: f64,
    pub liquidation_taxes: LiquidationTaxes,
    pub retirement_tax_relief: f64,

    // Income
    pub cumulative_annuity_paid: f64,
    pub cumulative_net_annuity: f64,
    pub cumulative_fund_income: f64,
    /// Rent and distributions with no savings or annuity sleeve to receive them
    pub unrouted_income: f64,

    // Annuity
    pub annuity_duration: AnnuityDuration,
    pub remaining_annuity_duration: AnnuityDuration,
    pub annuity_years_consumed: f64,
    pub annuity_capital_start: f64,
    pub annuity_capital_final: f64,
    pub annuity_depleted_year: Option<u32>,
    /// The yearly trace ran dry before the closed-form duration
    pub annuity_depleted_early: bool,

    // Margin loan
    pub loan_borrowed: f64,
    pub loan_total_interest: f64,
    pub loan_final_balance: f64,

    // Uninvested capital
    pub total_allocation_pct: f64,
    pub unallocated_capital: f64,
    pub unallocated_real_value: f64,
}

fn annual_return_pct(gain: f64, base: f64) -> Option<f64> {
    if gain.abs() > NEGLIGIBLE_GAIN && base > 0.0 {
        Some(gain / base / HORIZON_YEARS as f64 * 100.0)
    } else {
        None
    }
}

fn pct_of(value: f64, base: f64) -> f64 {
    if base > 0.0 {
        value / base * 100.0
    } else {
        0.0
    }
}

impl Synthesis {
    /// Build the summary from the state left at the horizon
    pub fn build(
        params: &SimulationParameters,
        allocation: &Allocation,
        state: &SimulationState,
        tax: &TaxRates,
    ) -> Self {
        let base = allocation.base_capital;

        // Property disposal
        let mut liquidation = LiquidationTaxes::default();
        let mut property_final_value = state.property_value;
        if params.real_estate.sell_at_horizon && params.real_estate.enabled {
            let gain = (state.property_value - allocation.property_capital).max(0.0);
            liquidation.property_gain = tax.property_gain_tax(gain, HORIZON_YEARS);
            property_final_value -= liquidation.property_gain;
        }

        // Equities
        if params.equities.enabled {
            let sheltered_gain = (state.sheltered_equity - allocation.sheltered_equity_capital).max(0.0);
            let unsheltered_gain = (state.unsheltered_equity - allocation.unsheltered_equity_capital).max(0.0);
            liquidation.sheltered_equity = sheltered_gain * tax.social_levy;
            liquidation.unsheltered_equity = unsheltered_gain * tax.flat_tax;
        }
        let net_equity_value = state.sheltered_equity + state.unsheltered_equity
            - liquidation.sheltered_equity
            - liquidation.unsheltered_equity;

        let final_net_wealth = state.annuity_balance
            + state.fund_balance
            + property_final_value
            + net_equity_value
            + state.savings_balance
            + state.retirement_balance
            - state.loan_balance
            + allocation.unallocated_capital;

        let inflation = &params.inflation;
        let deflator = if inflation.enabled {
            (1.0 + inflation.rate_pct / 100.0).powi(HORIZON_YEARS as i32)
        } else {
            1.0
        };
        let final_real_wealth = final_net_wealth / deflator;

        let total_gain = final_net_wealth - base;
        let real_gain = final_real_wealth - base;
        let average_annual_return_pct = annual_return_pct(total_gain, base).unwrap_or(0.0);
        let real_average_annual_return_pct = if inflation.enabled {
            annual_return_pct(real_gain, base).unwrap_or(-inflation.rate_pct)
        } else {
            average_annual_return_pct
        };
        let cumulative_inflation_pct = if inflation.enabled {
            (deflator - 1.0) * 100.0
        } else {
            0.0
        };

        // Annuity report: closed form first, trace second
        let annual_annuity = params.annuity.annual_annuity();
        let duration = if params.annuity.enabled {
            annuity_duration(
                allocation.annuity_capital,
                annual_annuity,
                params.annuity.gross_yield_pct / 100.0,
                params.annuity.management_fee_pct / 100.0,
            )
        } else {
            AnnuityDuration::NONE
        };
        let years_consumed = if params.annuity.monthly_annuity > 0.0 {
            state.cumulative_annuity_paid / annual_annuity
        } else {
            0.0
        };
        let remaining = if params.annuity.enabled {
            remaining_duration(duration, years_consumed)
        } else {
            AnnuityDuration::NONE
        };
        let depleted_early = state.annuity_depleted_year.is_some()
            && duration.as_years().map_or(true, |years| years_consumed < years);

        Self {
            initial_capital: base,
            loan_proceeds: allocation.loan_proceeds,
            effective_capital: allocation.effective_capital,
            final_net_wealth,
            final_real_wealth,
            total_gain,
            total_gain_pct: pct_of(total_gain, base),
            real_gain,
            real_gain_pct: pct_of(real_gain, base),
            average_annual_return_pct,
            real_average_annual_return_pct,
            cumulative_inflation_pct,
            property_final_value,
            net_equity_value,
            savings_final: state.savings_balance,
            retirement_final: state.retirement_balance,
            total_taxes: state.cumulative_taxes + liquidation.total(),
            liquidation_taxes: liquidation,
            retirement_tax_relief: state.cumulative_retirement_relief,
            cumulative_annuity_paid: state.cumulative_annuity_paid,
            cumulative_net_annuity: state.cumulative_net_annuity,
            cumulative_fund_income: state.cumulative_fund_income,
            unrouted_income: state.cumulative_unrouted_income,
            annuity_duration: duration,
            remaining_annuity_duration: remaining,
            annuity_years_consumed: years_consumed,
            annuity_capital_start: allocation.annuity_capital,
            annuity_capital_final: state.annuity_balance,
            annuity_depleted_year: state.annuity_depleted_year,
            annuity_depleted_early: depleted_early,
            loan_borrowed: state.loan_borrowed,
            loan_total_interest: state.cumulative_loan_interest,
            loan_final_balance: state.loan_balance,
            total_allocation_pct: allocation.total_allocation_pct,
            unallocated_capital: allocation.unallocated_capital,
            unallocated_real_value: allocation.unallocated_capital / deflator,
        }
    }

    pub fn rounded(&self) -> Self {
        let r = round_currency;
        let p = round_pct;
        Self {
            initial_capital: r(self.initial_capital),
            loan_proceeds: r(self.loan_proceeds),
            effective_capital: r(self.effective_capital),
            final_net_wealth: r(self.final_net_wealth),
            final_real_wealth: r(self.final_real_wealth),
            total_gain: r(self.total_gain),
            total_gain_pct: p(self.total_gain_pct),
            real_gain: r(self.real_gain),
            real_gain_pct: p(self.real_gain_pct),
            average_annual_return_pct: p(self.average_annual_return_pct),
            real_average_annual_return_pct: p(self.real_average_annual_return_pct),
            cumulative_inflation_pct: p(self.cumulative_inflation_pct),
            property_final_value: r(self.property_final_value),
            net_equity_value: r(self.net_equity_value),
            savings_final: r(self.savings_final),
            retirement_final: r(self.retirement_final),
            total_taxes: r(self.total_taxes),
            liquidation_taxes: LiquidationTaxes {
                property_gain: r(self.liquidation_taxes.property_gain),
                sheltered_equity: r(self.liquidation_taxes.sheltered_equity),
                unsheltered_equity: r(self.liquidation_taxes.unsheltered_equity),
            },
            retirement_tax_relief: r(self.retirement_tax_relief),
            cumulative_annuity_paid: r(self.cumulative_annuity_paid),
            cumulative_net_annuity: r(self.cumulative_net_annuity),
            cumulative_fund_income: r(self.cumulative_fund_income),
            unrouted_income: r(self.unrouted_income),
            annuity_duration: self.annuity_duration,
            remaining_annuity_duration: self.remaining_annuity_duration,
            annuity_years_consumed: p(self.annuity_years_consumed),
            annuity_capital_start: r(self.annuity_capital_start),
            annuity_capital_final: r(self.annuity_capital_final),
            annuity_depleted_year: self.annuity_depleted_year,
            annuity_depleted_early: self.annuity_depleted_early,
            loan_borrowed: r(self.loan_borrowed),
            loan_total_interest: r(self.loan_total_interest),
            loan_final_balance: r(self.loan_final_balance),
            total_allocation_pct: p(self.total_allocation_pct),
            unallocated_capital: r(self.unallocated_capital),
            unallocated_real_value: r(self.unallocated_real_value),
        }
    }
}
