use serde::{Deserialize, Serialize};

use super::tax::{marginal_rate, rental_income_reduction};
use super::RentalInputs;
use crate::locale::safe;
use crate::purchase::mortgage::AmortizationYear;
use crate::types::{Money, Rate};

/// Yearly growth applied to fixed running costs.
const COST_INFLATION: Rate = 0.02;

/// One year of the rental cash-flow projection.
///
/// `total_expenses` includes the mortgage, so
/// `net_cash_flow = gross_rent - total_expenses - income_tax_paid`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    pub year: u32,
    pub gross_rent: Money,
    pub maintenance: Money,
    pub fixed_costs: Money,
    /// Maintenance plus fixed costs
    pub operating_expenses: Money,
    /// Twelve monthly mortgage payments
    pub mortgage_payment: Money,
    pub total_expenses: Money,
    pub interest_deducted: Money,
    pub taxable_base: Money,
    /// Taxable base after the rental income reduction
    pub reduced_base: Money,
    pub marginal_rate: Rate,
    pub income_tax_paid: Money,
    pub net_cash_flow: Money,
}

/// Project rent, costs, income tax and net cash flow for every year of the horizon.
///
/// Mortgage interest for year `y` comes from row `y` of `schedule` and is
/// deductible; years past the end of the schedule deduct nothing. Rent grows
/// by `rent_growth_pct` after each year and fixed costs by 2% a year.
pub fn project(
    input: &RentalInputs,
    monthly_payment: Money,
    schedule: &[AmortizationYear],
    reform_cost: Money,
) -> Vec<ProjectionYear> {
    let horizon = input.horizon();
    let reduction = rental_income_reduction(safe(reform_cost));
    let base_fixed = input.costs.annual_total();
    let maintenance_share = safe(input.maintenance_pct) / 100.0;
    let growth = 1.0 + safe(input.rent_growth_pct) / 100.0;
    let annual_mortgage = safe(monthly_payment) * 12.0;

    let mut current_rent = safe(input.monthly_rent);
    let mut out = Vec::with_capacity(horizon as usize);

    for year in 1..=horizon {
        let gross_rent = current_rent * 12.0;
        let maintenance = maintenance_share * gross_rent;
        let fixed_costs = base_fixed * (1.0 + COST_INFLATION).powi(year as i32 - 1);
        let operating_expenses = maintenance + fixed_costs;
        let total_expenses = operating_expenses + annual_mortgage;
        let net_before_tax = gross_rent - total_expenses;

        let interest_deducted = schedule
            .get(year as usize - 1)
            .map_or(0.0, |row| safe(row.interest_paid));
        let taxable_base = (gross_rent - (operating_expenses + interest_deducted)).max(0.0);
        let reduced_base = taxable_base * (1.0 - reduction);
        let rate = marginal_rate(reduced_base);
        let income_tax_paid = reduced_base * rate;

        out.push(ProjectionYear {
            year,
            gross_rent,
            maintenance,
            fixed_costs,
            operating_expenses,
            mortgage_payment: annual_mortgage,
            total_expenses,
            interest_deducted,
            taxable_base,
            reduced_base,
            marginal_rate: rate,
            income_tax_paid,
            net_cash_flow: net_before_tax - income_tax_paid,
        });

        current_rent *= growth;
    }

    out
}
