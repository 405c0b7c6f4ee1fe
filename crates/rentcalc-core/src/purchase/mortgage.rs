use serde::{Deserialize, Serialize};

use super::PurchaseInputs;
use crate::locale::safe;
use crate::types::{Money, Rate};

/// One mortgage year of the amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub ending_balance: Money,
}

/// Financing terms derived from the purchase inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageTerms {
    pub loan_amount: Money,
    pub monthly_rate: Rate,
    pub total_months: u32,
    /// Number of yearly rows in the schedule
    pub years: u32,
}

impl MortgageTerms {
    /// Loan = price less deposit; term rounded to whole months and at least one.
    pub fn from_inputs(input: &PurchaseInputs) -> Self {
        let financed_share = 1.0 - safe(input.down_payment_pct) / 100.0;
        let loan_amount = (safe(input.price) * financed_share).max(0.0);
        let monthly_rate = safe(input.mortgage_rate_pct) / 100.0 / 12.0;
        let years = safe(input.mortgage_years);
        let total_months = (years * 12.0).round().max(1.0) as u32;
        let years = years.round().max(1.0) as u32;

        Self {
            loan_amount,
            monthly_rate,
            total_months,
            years,
        }
    }

    pub fn monthly_payment(&self) -> Money {
        monthly_payment(self.loan_amount, self.monthly_rate, self.total_months)
    }

    pub fn schedule(&self) -> Vec<AmortizationYear> {
        amortization_schedule(self.loan_amount, self.monthly_rate, self.total_months, self.years)
    }
}

/// Fixed monthly payment of an annuity loan.
pub fn monthly_payment(loan_amount: Money, monthly_rate: Rate, total_months: u32) -> Money {
    let n = f64::from(total_months);
    if monthly_rate == 0.0 {
        return loan_amount / n;
    }
    let q = (1.0 + monthly_rate).powf(n);
    loan_amount * (monthly_rate * q) / (q - 1.0)
}

/// Year-by-year interest, principal and remaining balance.
///
/// Months are simulated one by one with no intermediate rounding. Once a
/// year closes with nothing left to repay, the remaining years are reported
/// as all-zero rows.
pub fn amortization_schedule(
    loan_amount: Money,
    monthly_rate: Rate,
    total_months: u32,
    years: u32,
) -> Vec<AmortizationYear> {
    let payment = monthly_payment(loan_amount, monthly_rate, total_months);
    let mut balance = loan_amount;
    let mut out = Vec::with_capacity(years as usize);

    for year in 1..=years {
        let mut interest_paid = 0.0;
        let mut principal_paid = 0.0;

        for _ in 0..12 {
            if balance <= 0.0 {
                break;
            }
            let interest = balance * monthly_rate;
            let principal = (payment - interest).min(balance);
            interest_paid += interest;
            principal_paid += principal;
            balance -= principal;
        }

        out.push(AmortizationYear {
            year,
            interest_paid,
            principal_paid,
            ending_balance: balance.max(0.0),
        });

        if balance <= 0.0 {
            out.extend((year + 1..=years).map(|year| AmortizationYear {
                year,
                interest_paid: 0.0,
                principal_paid: 0.0,
                ending_balance: 0.0,
            }));
            break;
        }
    }

    out
}

/// Interest paid over every year of the schedule.
pub fn total_interest(schedule: &[AmortizationYear]) -> Money {
    schedule.iter().map(|y| y.interest_paid).sum()
}
