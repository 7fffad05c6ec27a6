//! Advisory findings on a finished projection
//!
//! Nothing here changes the projection. Findings flag wrapper ceilings, idle
//! capital, the overall tax take and similar points for the reader.

use crate::assumptions::ContributionCeilings;
use crate::projection::{AllocationStatus, ProjectionResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of a ceiling above which usage is reported as close to the limit
const NEAR_CEILING_SHARE: f64 = 0.9;

/// Target for taxes as a share of the total gain (percent)
pub const TAX_TAKE_TARGET_PCT: f64 = 25.0;

/// How much of a wrapper ceiling a plan uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "usage", rename_all = "snake_case")]
pub enum CeilingUsage {
    Within { used_pct: f64 },
    Near { headroom: f64 },
    Exceeded { excess: f64 },
}

impl CeilingUsage {
    pub fn assess(amount: f64, limit: f64) -> Self {
        if amount > limit {
            CeilingUsage::Exceeded { excess: amount - limit }
        } else if amount > limit * NEAR_CEILING_SHARE {
            CeilingUsage::Near {
                headroom: limit - amount,
            }
        } else {
            let used_pct = if limit > 0.0 { amount / limit * 100.0 } else { 0.0 };
            CeilingUsage::Within { used_pct }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// One advisory finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    Allocation { status: AllocationStatus },
    ShelteredEquityCeiling { invested: f64, limit: f64, usage: CeilingUsage },
    RetirementContribution { annual: f64, limit: f64, exceeded: bool },
    SavingsCeilingExceeded { balance: f64, limit: f64 },
    /// Loan requested without an equity allocation to borrow against
    LoanUnavailable,
    UnallocatedCapital { amount: f64, real_value: f64 },
    TaxTake { pct: f64, target_pct: f64, met: bool },
    OutstandingLoan { balance: f64 },
    AnnuityDepleted { year: u32, early: bool },
    /// Figures are nominal only
    InflationIgnored,
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::Allocation { status } => match status {
                AllocationStatus::Complete { .. } => Severity::Info,
                _ => Severity::Warning,
            },
            Finding::ShelteredEquityCeiling { usage, .. } => match usage {
                CeilingUsage::Within { .. } => Severity::Info,
                _ => Severity::Warning,
            },
            Finding::RetirementContribution { exceeded, .. } => {
                if *exceeded {
                    Severity::Warning
                } else {
                    Severity::Info
                }
            }
            Finding::TaxTake { met, .. } => {
                if *met {
                    Severity::Info
                } else {
                    Severity::Warning
                }
            }
            Finding::InflationIgnored => Severity::Info,
            Finding::SavingsCeilingExceeded { .. }
            | Finding::LoanUnavailable
            | Finding::UnallocatedCapital { .. }
            | Finding::OutstandingLoan { .. }
            | Finding::AnnuityDepleted { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Allocation { status } => match status {
                AllocationStatus::Complete { total_pct } => write!(f, "Allocation complete ({:.1}%)", total_pct),
                AllocationStatus::Remaining { pct } => write!(f, "{:.1}% of the capital is not allocated", pct),
                AllocationStatus::Overflow { pct } => write!(f, "Allocation exceeds 100% by {:.1} points", pct),
            },
            Finding::ShelteredEquityCeiling { invested, limit, usage } => match usage {
                CeilingUsage::Within { used_pct } => {
                    write!(f, "Sheltered equity wrapper: {:.0}% of the {:.0} ceiling used", used_pct, limit)
                }
                CeilingUsage::Near { headroom } => {
                    write!(f, "Sheltered equity wrapper close to its ceiling: {:.0} left", headroom)
                }
                CeilingUsage::Exceeded { excess } => write!(
                    f,
                    "Equity allocation of {:.0} exceeds the {:.0} sheltered ceiling; {:.0} must be held unsheltered",
                    invested, limit, excess
                ),
            },
            Finding::RetirementContribution { annual, limit, exceeded } => {
                if *exceeded {
                    write!(f, "Retirement contribution of {:.0}/year exceeds the {:.0} ceiling", annual, limit)
                } else {
                    write!(f, "Retirement contribution of {:.0}/year is within the {:.0} ceiling", annual, limit)
                }
            }
            Finding::SavingsCeilingExceeded { balance, limit } => write!(
                f,
                "Savings balance of {:.0} exceeds the {:.0} regulated ceiling",
                balance, limit
            ),
            Finding::LoanUnavailable => write!(f, "Margin loan requested without an equity allocation; nothing borrowed"),
            Finding::UnallocatedCapital { amount, real_value } => write!(
                f,
                "{:.0} left uninvested (worth {:.0} in today's money at the horizon)",
                amount, real_value
            ),
            Finding::TaxTake { pct, target_pct, met } => write!(
                f,
                "Overall tax take {:.1}% of the gain, target below {:.0}%: {}",
                pct,
                target_pct,
                if *met { "met" } else { "not met" }
            ),
            Finding::OutstandingLoan { balance } => write!(f, "Margin loan balance of {:.0} still due at the horizon", balance),
            Finding::AnnuityDepleted { year, early } => {
                write!(f, "Annuity sleeve ran out in year {}", year)?;
                if *early {
                    write!(f, ", before the projected duration")?;
                }
                Ok(())
            }
            Finding::InflationIgnored => write!(f, "Inflation disabled: all figures are nominal"),
        }
    }
}

/// Overall tax take as a percentage of the absolute gain
pub fn tax_take_pct(total_taxes: f64, total_gain: f64) -> f64 {
    if total_gain.abs() > 0.0 {
        total_taxes / total_gain.abs() * 100.0
    } else {
        0.0
    }
}

/// Review a projection against the wrapper ceilings
pub fn review(result: &ProjectionResult, ceilings: &ContributionCeilings) -> Vec<Finding> {
    let params = &result.params;
    let allocation = &result.allocation;
    let synthesis = &result.synthesis;
    let mut findings = vec![Finding::Allocation {
        status: allocation.status(),
    }];

    if params.equities.enabled {
        let invested = allocation.equity_capital();
        findings.push(Finding::ShelteredEquityCeiling {
            invested,
            limit: ceilings.sheltered_equity,
            usage: CeilingUsage::assess(invested, ceilings.sheltered_equity),
        });
    }

    if params.retirement.enabled {
        let annual = allocation.retirement_annual_contribution;
        findings.push(Finding::RetirementContribution {
            annual,
            limit: ceilings.retirement_annual,
            exceeded: annual > ceilings.retirement_annual,
        });
    }

    if params.savings.enabled && synthesis.savings_final > ceilings.savings_balance {
        findings.push(Finding::SavingsCeilingExceeded {
            balance: synthesis.savings_final,
            limit: ceilings.savings_balance,
        });
    }

    if params.margin_loan.enabled && !params.loan_available() {
        findings.push(Finding::LoanUnavailable);
    }

    if synthesis.unallocated_capital > 0.0 {
        findings.push(Finding::UnallocatedCapital {
            amount: synthesis.unallocated_capital,
            real_value: synthesis.unallocated_real_value,
        });
    }

    let pct = tax_take_pct(synthesis.total_taxes, synthesis.total_gain);
    findings.push(Finding::TaxTake {
        pct,
        target_pct: TAX_TAKE_TARGET_PCT,
        met: pct < TAX_TAKE_TARGET_PCT,
    });

    if synthesis.loan_final_balance > 0.0 {
        findings.push(Finding::OutstandingLoan {
            balance: synthesis.loan_final_balance,
        });
    }

    if let Some(year) = synthesis.annuity_depleted_year {
        findings.push(Finding::AnnuityDepleted {
            year,
            early: synthesis.annuity_depleted_early,
        });
    }

    if !params.inflation.enabled {
        findings.push(Finding::InflationIgnored);
    }

    findings
}
