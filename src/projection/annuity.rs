//! Closed-form duration of the annuity paid from the savings wrapper
//!
//! Independent of the yearly trace: the trace compounds with actual cash
//! injections, this assumes a constant net yield and no top-ups.

use serde::{Deserialize, Serialize};

/// Net yields at or below this are treated as zero (straight drawdown)
const NEGLIGIBLE_NET_YIELD: f64 = 0.001;

/// How long the annuity can be paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnuityDuration {
    Finite { years: u32, months: u32 },
    /// Net interest covers the annuity; capital is never consumed
    Perpetual,
}

impl AnnuityDuration {
    pub const NONE: AnnuityDuration = AnnuityDuration::Finite { years: 0, months: 0 };

    /// Split fractional years into whole years and whole months
    pub fn from_years(years: f64) -> Self {
        let years = years.max(0.0);
        let whole = years.floor();
        AnnuityDuration::Finite {
            years: whole as u32,
            months: ((years - whole) * 12.0).floor() as u32,
        }
    }

    /// Duration in fractional years, `None` when perpetual
    pub fn as_years(&self) -> Option<f64> {
        match self {
            AnnuityDuration::Finite { years, months } => Some(*years as f64 + *months as f64 / 12.0),
            AnnuityDuration::Perpetual => None,
        }
    }

    pub fn is_perpetual(&self) -> bool {
        matches!(self, AnnuityDuration::Perpetual)
    }
}

/// Years until `capital` is exhausted by a yearly `annuity`
///
/// `gross_yield` and `management_fee` are decimals. Zero capital or annuity
/// gives a zero duration.
pub fn annuity_duration(capital: f64, annuity: f64, gross_yield: f64, management_fee: f64) -> AnnuityDuration {
    if capital <= 0.0 || annuity <= 0.0 {
        return AnnuityDuration::NONE;
    }

    let net_yield = gross_yield - management_fee;
    if net_yield <= NEGLIGIBLE_NET_YIELD {
        return AnnuityDuration::from_years(capital / annuity);
    }

    if capital * net_yield >= annuity {
        return AnnuityDuration::Perpetual;
    }

    // Balance after n years: C(1+r)^n - A((1+r)^n - 1)/r = 0
    let years = -(1.0 - net_yield * capital / annuity).ln() / (1.0 + net_yield).ln();
    AnnuityDuration::from_years(years)
}

/// Duration left once `years_consumed` years of annuity have been paid
pub fn remaining_duration(total: AnnuityDuration, years_consumed: f64) -> AnnuityDuration {
    match total.as_years() {
        Some(years) => AnnuityDuration::from_years(years - years_consumed),
        None => AnnuityDuration::Perpetual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_inputs() {
        assert_eq!(annuity_duration(0.0, 10_200.0, 0.03, 0.007), AnnuityDuration::NONE);
        assert_eq!(annuity_duration(50_000.0, 0.0, 0.03, 0.007), AnnuityDuration::NONE);
    }

    #[test]
    fn test_perpetual_when_interest_covers_annuity() {
        // 2.3% of 500k = 11.5k >= 10.2k
        let duration = annuity_duration(500_000.0, 10_200.0, 0.03, 0.007);
        assert!(duration.is_perpetual());
        assert_eq!(duration.as_years(), None);
    }

    #[test]
    fn test_zero_yield_is_straight_drawdown() {
        let duration = annuity_duration(51_000.0, 10_200.0, 0.005, 0.005);
        assert_eq!(duration, AnnuityDuration::Finite { years: 5, months: 0 });

        let duration = annuity_duration(56_100.0, 10_200.0, 0.0, 0.0);
        assert_eq!(duration, AnnuityDuration::Finite { years: 5, months: 6 });
    }

    #[test]
    fn test_reference_annuity_duration() {
        // 68,310 at 2.3% net paying 10,200 a year
        let duration = annuity_duration(68_310.0, 10_200.0, 0.03, 0.007);
        let expected = -(1.0 - 0.023 * 68_310.0 / 10_200.0_f64).ln() / 1.023_f64.ln();
        assert_eq!(duration, AnnuityDuration::from_years(expected));
        assert_eq!(duration, AnnuityDuration::Finite { years: 7, months: 4 });
    }

    #[test]
    fn test_remaining_duration() {
        let total = AnnuityDuration::Finite { years: 7, months: 6 };
        assert_eq!(
            remaining_duration(total, 2.0),
            AnnuityDuration::Finite { years: 5, months: 6 }
        );
        assert_eq!(remaining_duration(total, 9.0), AnnuityDuration::NONE);
        assert!(remaining_duration(AnnuityDuration::Perpetual, 8.0).is_perpetual());
    }
}
