//! Simulation parameter record
//!
//! Percentages are on a 0-100 scale. The record is assumed to be well formed:
//! the engine does not validate or clamp it.

use serde::{Deserialize, Serialize};

/// Where the regulated savings balance goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SavingsRouting {
    /// Keep the balance in the savings sleeve
    #[default]
    Retain,
    /// Move the whole balance into the annuity sleeve at the horizon
    SweepToAnnuity,
    /// Use the balance to service the margin loan
    SweepToLoan,
}

/// Frequency of voluntary top-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContributionFrequency {
    #[default]
    Monthly,
    Weekly,
}

impl ContributionFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            ContributionFrequency::Monthly => 12,
            ContributionFrequency::Weekly => 52,
        }
    }
}

/// Voluntary periodic top-ups.
///
/// Carried with the record for the caller; the yearly loop does not consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PeriodicContribution {
    pub enabled: bool,
    pub frequency: ContributionFrequency,
    pub amount: f64,
}

impl PeriodicContribution {
    /// Yearly total of the top-ups, zero when disabled
    pub fn annual_amount(&self) -> f64 {
        if self.enabled {
            self.amount * self.frequency.periods_per_year() as f64
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InflationParams {
    pub enabled: bool,
    pub rate_pct: f64,
}

impl Default for InflationParams {
    fn default() -> Self {
        Self {
            enabled: false,
            rate_pct: 2.0,
        }
    }
}

/// Life-insurance wrapper paying a fixed annuity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnuityParams {
    pub enabled: bool,
    pub allocation_pct: f64,
    /// Gross yearly yield on the balance
    pub gross_yield_pct: f64,
    /// Annuity paid each month
    pub monthly_annuity: f64,
    /// Entry fee on money paid into the wrapper
    pub entry_fee_pct: f64,
    /// Yearly management fee on the balance
    pub management_fee_pct: f64,
}

impl Default for AnnuityParams {
    fn default() -> Self {
        Self {
            enabled: true,
            allocation_pct: 30.0,
            gross_yield_pct: 3.0,
            monthly_annuity: 850.0,
            entry_fee_pct: 1.0,
            management_fee_pct: 0.7,
        }
    }
}

impl AnnuityParams {
    pub fn annual_annuity(&self) -> f64 {
        self.monthly_annuity * 12.0
    }
}

/// Real-estate income fund, held through the annuity wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeFundParams {
    pub enabled: bool,
    pub allocation_pct: f64,
    /// Key into the fund catalog
    pub product: String,
}

impl Default for IncomeFundParams {
    fn default() -> Self {
        Self {
            enabled: false,
            allocation_pct: 0.0,
            product: "sofidynamic".to_string(),
        }
    }
}

/// Directly held furnished rental property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealEstateParams {
    pub enabled: bool,
    pub allocation_pct: f64,
    /// Gross rent as a percentage of the current value
    pub rental_yield_pct: f64,
    /// Yearly change in property value
    pub appreciation_pct: f64,
    /// Fixed yearly charge (property tax) deducted from rent
    pub annual_charges: f64,
    /// Sell at the horizon and settle the capital-gains tax
    pub sell_at_horizon: bool,
}

impl Default for RealEstateParams {
    fn default() -> Self {
        Self {
            enabled: true,
            allocation_pct: 25.0,
            rental_yield_pct: 6.0,
            appreciation_pct: 2.0,
            annual_charges: 300.0,
            sell_at_horizon: false,
        }
    }
}

/// Equity allocation split between a tax-sheltered and an unsheltered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityParams {
    pub enabled: bool,
    pub allocation_pct: f64,
    /// Share of the equity allocation held in the sheltered wrapper
    pub sheltered_share_pct: f64,
    pub sheltered_yield_pct: f64,
    pub unsheltered_yield_pct: f64,
}

impl Default for EquityParams {
    fn default() -> Self {
        Self {
            enabled: true,
            allocation_pct: 30.0,
            sheltered_share_pct: 70.0,
            sheltered_yield_pct: 7.8,
            unsheltered_yield_pct: 29.8,
        }
    }
}

/// Securities-backed (Lombard) loan against the equity allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginLoanParams {
    pub enabled: bool,
    /// Loan amount as a percentage of the equity allocation
    pub loan_to_value_pct: f64,
    /// Simulated year in which the loan is drawn
    pub origination_year: u32,
    pub rate_pct: f64,
    pub duration_years: u32,
}

impl Default for MarginLoanParams {
    fn default() -> Self {
        Self {
            enabled: false,
            loan_to_value_pct: 0.0,
            origination_year: 0,
            rate_pct: 3.0,
            duration_years: 5,
        }
    }
}

impl MarginLoanParams {
    /// Whether the loan is inside its repayment window in `year`
    pub fn is_active(&self, year: u32) -> bool {
        self.enabled
            && year >= self.origination_year
            && year - self.origination_year < self.duration_years
    }
}

/// Regulated home-savings account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsParams {
    pub enabled: bool,
    pub rate_pct: f64,
    pub routing: SavingsRouting,
}

impl Default for SavingsParams {
    fn default() -> Self {
        Self {
            enabled: true,
            rate_pct: 1.75,
            routing: SavingsRouting::Retain,
        }
    }
}

/// Retirement savings plan funded by equal yearly contributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetirementParams {
    pub enabled: bool,
    pub allocation_pct: f64,
    pub gross_yield_pct: f64,
    pub management_fee_pct: f64,
    /// Marginal income-tax rate used to value the contribution deduction
    pub marginal_tax_rate_pct: f64,
}

impl Default for RetirementParams {
    fn default() -> Self {
        Self {
            enabled: true,
            allocation_pct: 5.0,
            gross_yield_pct: 4.0,
            management_fee_pct: 0.8,
            marginal_tax_rate_pct: 30.0,
        }
    }
}

/// Complete input of one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Capital available at year 0, before any loan
    pub base_capital: f64,
    pub periodic_contribution: PeriodicContribution,
    pub inflation: InflationParams,
    pub annuity: AnnuityParams,
    pub income_fund: IncomeFundParams,
    pub real_estate: RealEstateParams,
    pub equities: EquityParams,
    pub margin_loan: MarginLoanParams,
    pub savings: SavingsParams,
    pub retirement: RetirementParams,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            base_capital: 230_000.0,
            periodic_contribution: PeriodicContribution::default(),
            inflation: InflationParams::default(),
            annuity: AnnuityParams::default(),
            income_fund: IncomeFundParams::default(),
            real_estate: RealEstateParams::default(),
            equities: EquityParams::default(),
            margin_loan: MarginLoanParams::default(),
            savings: SavingsParams::default(),
            retirement: RetirementParams::default(),
        }
    }
}

impl SimulationParameters {
    /// Record with every sleeve, the loan and inflation switched off
    pub fn all_disabled(base_capital: f64) -> Self {
        let mut params = Self {
            base_capital,
            ..Self::default()
        };
        params.annuity.enabled = false;
        params.income_fund.enabled = false;
        params.real_estate.enabled = false;
        params.equities.enabled = false;
        params.margin_loan.enabled = false;
        params.savings.enabled = false;
        params.retirement.enabled = false;
        params.inflation.enabled = false;
        params
    }

    /// Sum of the allocation percentages of the enabled sleeves
    pub fn total_allocation_pct(&self) -> f64 {
        let pct = |enabled: bool, value: f64| if enabled { value } else { 0.0 };
        pct(self.annuity.enabled, self.annuity.allocation_pct)
            + pct(self.income_fund.enabled, self.income_fund.allocation_pct)
            + pct(self.real_estate.enabled, self.real_estate.allocation_pct)
            + pct(self.equities.enabled, self.equities.allocation_pct)
            + pct(self.retirement.enabled, self.retirement.allocation_pct)
    }

    /// The loan needs an equity allocation to borrow against
    pub fn loan_available(&self) -> bool {
        self.equities.enabled && self.equities.allocation_pct > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_total_allocation() {
        let params = SimulationParameters::default();
        // 30 + 25 + 30 + 5, the income fund is off
        assert_eq!(params.total_allocation_pct(), 90.0);
    }

    #[test]
    fn test_disabled_sleeves_do_not_count() {
        let params = SimulationParameters::all_disabled(100_000.0);
        assert_eq!(params.total_allocation_pct(), 0.0);
        assert!(!params.loan_available());
    }

    #[test]
    fn test_loan_window() {
        let loan = MarginLoanParams {
            enabled: true,
            loan_to_value_pct: 50.0,
            origination_year: 2,
            rate_pct: 3.0,
            duration_years: 3,
        };

        assert!(!loan.is_active(1));
        assert!(loan.is_active(2));
        assert!(loan.is_active(4));
        assert!(!loan.is_active(5));

        let zero_duration = MarginLoanParams {
            duration_years: 0,
            ..loan
        };
        assert!(!zero_duration.is_active(2));
    }

    #[test]
    fn test_periodic_contribution_annual_amount() {
        let weekly = PeriodicContribution {
            enabled: true,
            frequency: ContributionFrequency::Weekly,
            amount: 10.0,
        };
        assert_eq!(weekly.annual_amount(), 520.0);

        let off = PeriodicContribution {
            enabled: false,
            ..weekly
        };
        assert_eq!(off.annual_amount(), 0.0);
    }

    #[test]
    fn test_routing_serde_names() {
        let routing: SavingsRouting = serde_json::from_str("\"sweep_to_loan\"").unwrap();
        assert_eq!(routing, SavingsRouting::SweepToLoan);
    }
}
