//! Margin (Lombard) loan servicing
//!
//! Each active year the loan asks for interest plus a straight-line share of
//! the original principal. What can actually be paid depends on the cash the
//! other sleeves produced that year.

use serde::{Deserialize, Serialize};

/// Which branch of the servicing policy applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServicingOutcome {
    /// Interest and scheduled amortization paid in full
    FullService,
    /// Interest paid, whatever was left went to principal
    InterestOnly,
    /// Cash did not cover interest; the shortfall was added to principal
    Capitalized,
}

/// One year of loan service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanYear {
    pub outcome: ServicingOutcome,
    pub interest: f64,
    /// Principal repaid this year
    pub amortization: f64,
    /// Interest shortfall added to principal
    pub capitalized_interest: f64,
    /// Cash left after full service, to be routed elsewhere
    pub surplus: f64,
    pub closing_balance: f64,
}

/// Service the loan for one year
///
/// * `balance` - outstanding principal at the start of the year
/// * `borrowed` - original principal, used for the straight-line schedule
/// * `rate` - yearly interest rate (decimal)
/// * `duration_years` - repayment window, must be non-zero
/// * `available` - cash available for debt service this year
pub fn service_year(balance: f64, borrowed: f64, rate: f64, duration_years: u32, available: f64) -> LoanYear {
    let interest = balance * rate;
    let scheduled = borrowed / duration_years as f64;
    let required = scheduled + interest;

    if available >= required {
        LoanYear {
            outcome: ServicingOutcome::FullService,
            interest,
            amortization: scheduled,
            capitalized_interest: 0.0,
            surplus: available - required,
            closing_balance: (balance - scheduled).max(0.0),
        }
    } else if available >= interest {
        let amortization = available - interest;
        LoanYear {
            outcome: ServicingOutcome::InterestOnly,
            interest,
            amortization,
            capitalized_interest: 0.0,
            surplus: 0.0,
            closing_balance: (balance - amortization).max(0.0),
        }
    } else {
        let shortfall = interest - available;
        LoanYear {
            outcome: ServicingOutcome::Capitalized,
            interest,
            amortization: 0.0,
            capitalized_interest: shortfall,
            surplus: 0.0,
            closing_balance: balance + shortfall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn test_full_service_with_surplus() {
        // 50k over 5 years at 3%: 10k principal + 1.5k interest
        let year = service_year(50_000.0, 50_000.0, 0.03, 5, 14_000.0);

        assert_eq!(year.outcome, ServicingOutcome::FullService);
        assert_relative_eq!(year.interest, 1_500.0, epsilon = 1e-9);
        assert_relative_eq!(year.amortization, 10_000.0, epsilon = 1e-9);
        assert_relative_eq!(year.surplus, 2_500.0, epsilon = 1e-9);
        assert_relative_eq!(year.closing_balance, 40_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_interest_only_partial_amortization() {
        let year = service_year(50_000.0, 50_000.0, 0.03, 5, 4_000.0);

        assert_eq!(year.outcome, ServicingOutcome::InterestOnly);
        assert_relative_eq!(year.amortization, 2_500.0, epsilon = 1e-9);
        assert_eq!(year.surplus, 0.0);
        assert_relative_eq!(year.closing_balance, 47_500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shortfall_is_capitalized() {
        let year = service_year(50_000.0, 50_000.0, 0.03, 5, 500.0);

        assert_eq!(year.outcome, ServicingOutcome::Capitalized);
        assert_eq!(year.amortization, 0.0);
        assert_relative_eq!(year.capitalized_interest, 1_000.0, epsilon = 1e-9);
        assert_relative_eq!(year.closing_balance, 51_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_last_installment_clamps_at_zero() {
        // Only 4k left but the schedule asks for 10k
        let year = service_year(4_000.0, 50_000.0, 0.03, 5, 20_000.0);

        assert_eq!(year.outcome, ServicingOutcome::FullService);
        assert_eq!(year.closing_balance, 0.0);
    }

    #[test]
    fn test_exact_schedule_reaches_zero() {
        let mut balance = 30_000.0;
        for _ in 0..3 {
            balance = service_year(balance, 30_000.0, 0.02, 3, 1_000_000.0).closing_balance;
        }
        assert_eq!(balance, 0.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_balance_never_negative_and_moves_with_branch(
            balance in 0u32..500_000,
            borrowed in 1u32..500_000,
            rate_bp in 0u32..1_500,
            duration in 1u32..15,
            available in 0u32..200_000
        ) {
            let balance = balance as f64;
            let year = service_year(
                balance,
                borrowed as f64,
                rate_bp as f64 / 10_000.0,
                duration,
                available as f64,
            );

            prop_assert!(year.closing_balance >= 0.0);
            match year.outcome {
                ServicingOutcome::Capitalized => prop_assert!(year.closing_balance >= balance),
                _ => prop_assert!(year.closing_balance <= balance),
            }
            prop_assert!(year.surplus >= 0.0);
            prop_assert!(year.amortization >= 0.0);
        }
    }
}
