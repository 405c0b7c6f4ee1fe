use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, warn};

use crate::locale::{format_currency, format_pct, safe};
use crate::purchase::closing_costs::{resolve_closing_costs, ClosingCostBreakdown};
use crate::purchase::mortgage::{total_interest, AmortizationYear, MortgageTerms};
use crate::purchase::PurchaseInputs;
use crate::rental::projection::{project, ProjectionYear};
use crate::rental::RentalInputs;
use crate::time_value::{irr, npv};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};

/// Gross yield a fairly priced buy-to-let should reach.
pub const TARGET_GROSS_YIELD: Rate = 0.065;

/// Years averaged for the headline net yield.
pub const YIELD_AVERAGING_YEARS: usize = 10;

/// Starting guess for the investment IRR.
const INVESTMENT_IRR_GUESS: Rate = 0.06;

/// NPV residual (in currency) above which the IRR is reported as unreliable.
const IRR_RESIDUAL_TOLERANCE: Money = 1.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Full input snapshot handed over by the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentInput {
    pub purchase: PurchaseInputs,
    pub rental: RentalInputs,
}

/// Qualitative verdict on the first-year net yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Excellent,
    Good,
    Acceptable,
    Poor,
    #[serde(rename = "Very poor")]
    VeryPoor,
    #[serde(rename = "–")]
    Undefined,
}

impl Grade {
    pub fn from_yield(yield_pct: Percent) -> Self {
        if yield_pct.is_nan() {
            Grade::Undefined
        } else if yield_pct >= 10.0 {
            Grade::Excellent
        } else if yield_pct >= 7.0 {
            Grade::Good
        } else if yield_pct >= 4.0 {
            Grade::Acceptable
        } else if yield_pct >= 2.0 {
            Grade::Poor
        } else {
            Grade::VeryPoor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Acceptable => "Acceptable",
            Grade::Poor => "Poor",
            Grade::VeryPoor => "Very poor",
            Grade::Undefined => "–",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Money needed up front and the figures derived from it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PurchaseSummary {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    /// Price less the financed part
    pub down_payment: Money,
    pub closing_costs: ClosingCostBreakdown,
    /// Down payment plus closing costs
    pub initial_cash_needed: Money,
    /// Initial cash plus reform
    pub total_cash_invested: Money,
    /// Price plus closing costs plus reform
    pub total_acquisition_cost: Money,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub average_net_yield_10y: Percent,
    pub year_one_yield: Percent,
    /// IRR in percent; `null` when the solver produced no finite rate
    pub irr_pct: Percent,
    pub total_interest: Money,
    pub total_cost_of_ownership: Money,
    pub recommended_max_price: Money,
    pub recommended_rent: Money,
    pub grade: Grade,
}

/// Presentation-ready text for the headline figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySummary {
    pub monthly_payment: String,
    pub total_cash_invested: String,
    pub total_cost_of_ownership: String,
    pub recommended_max_price: String,
    pub recommended_rent: String,
    pub average_net_yield_10y: String,
    pub year_one_yield: String,
    pub irr: String,
    pub grade: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentAnalysis {
    pub purchase: PurchaseSummary,
    pub amortization: Vec<AmortizationYear>,
    pub projection: Vec<ProjectionYear>,
    pub metrics: InvestmentMetrics,
    pub display: DisplaySummary,
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Mean net cash flow of the first `years` projection years as a percentage
/// of the cash invested. Cash below one unit is treated as one.
pub fn average_net_yield(
    projection: &[ProjectionYear],
    cash_invested: Money,
    years: usize,
) -> Percent {
    let n = years.min(projection.len()).max(1);
    let total: Money = projection.iter().take(n).map(|p| p.net_cash_flow).sum();
    (total / n as f64) / safe(cash_invested).max(1.0) * 100.0
}

/// First-year net cash flow over cash invested; `NaN` with no projection.
pub fn year_one_yield(projection: &[ProjectionYear], cash_invested: Money) -> Percent {
    projection.first().map_or(f64::NAN, |y1| {
        y1.net_cash_flow / safe(cash_invested).max(1.0) * 100.0
    })
}

/// Highest price at which the current rent still hits the target gross yield.
pub fn recommended_max_price(monthly_rent: Money) -> Money {
    let annual_rent = safe(monthly_rent) * 12.0;
    if annual_rent <= 0.0 {
        return f64::NAN;
    }
    annual_rent / TARGET_GROSS_YIELD
}

/// Monthly rent needed for the acquisition cost to hit the target gross yield.
pub fn recommended_rent(total_acquisition_cost: Money) -> Money {
    total_acquisition_cost * TARGET_GROSS_YIELD / 12.0
}

/// Initial outlay as a negative flow followed by each year's net cash flow.
pub fn investment_cash_flows(cash_invested: Money, projection: &[ProjectionYear]) -> Vec<Money> {
    std::iter::once(-cash_invested)
        .chain(projection.iter().map(|p| p.net_cash_flow))
        .collect()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full purchase + rental analysis.
///
/// Never fails: missing inputs count as zero and undefined metrics come
/// back as `NaN` (serialised as `null`). Suspicious situations are reported
/// in the output's `warnings`.
pub fn analyze(input: &InvestmentInput) -> ComputationOutput<InvestmentAnalysis> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let purchase = &input.purchase;
    let mut rental = input.rental.clone();
    rental.costs.derive_from_rent(rental.monthly_rent);

    // --- Purchase ---
    let closing_costs = resolve_closing_costs(purchase);
    let terms = MortgageTerms::from_inputs(purchase);
    let monthly_payment = terms.monthly_payment();
    let amortization = terms.schedule();
    debug!(
        loan = terms.loan_amount,
        months = terms.total_months,
        monthly_payment,
        "mortgage terms resolved"
    );

    let price = safe(purchase.price);
    let reform_cost = safe(purchase.reform_cost);
    let down_payment = price * (safe(purchase.down_payment_pct) / 100.0);
    let initial_cash_needed = down_payment + closing_costs.total;
    let total_cash_invested = initial_cash_needed + reform_cost;
    let total_acquisition_cost = price + closing_costs.total + reform_cost;

    // --- Rental ---
    let projection = project(&rental, monthly_payment, &amortization, reform_cost);
    debug!(years = projection.len(), "rental projection built");

    // --- Returns ---
    let flows = investment_cash_flows(total_cash_invested, &projection);
    let rate = irr(&flows, INVESTMENT_IRR_GUESS);
    let irr_pct = if rate.is_finite() { rate * 100.0 } else { f64::NAN };
    let residual = npv(rate, &flows);
    if !projection.is_empty() && residual.abs() > IRR_RESIDUAL_TOLERANCE {
        warn!(rate, residual, "IRR did not converge");
        warnings.push(format!(
            "IRR did not converge (NPV residual {residual:.2} at {:.2}%); treat it as indicative",
            rate * 100.0
        ));
    }

    let total_interest = total_interest(&amortization);
    let year_one = year_one_yield(&projection, total_cash_invested);
    let metrics = InvestmentMetrics {
        average_net_yield_10y: average_net_yield(
            &projection,
            total_cash_invested,
            YIELD_AVERAGING_YEARS,
        ),
        year_one_yield: year_one,
        irr_pct,
        total_interest,
        total_cost_of_ownership: total_acquisition_cost + total_interest,
        recommended_max_price: recommended_max_price(rental.monthly_rent),
        recommended_rent: recommended_rent(total_acquisition_cost),
        grade: Grade::from_yield(year_one),
    };

    collect_warnings(&rental, &terms, total_cash_invested, &projection, &mut warnings);

    let display = DisplaySummary {
        monthly_payment: format_currency(monthly_payment),
        total_cash_invested: format_currency(total_cash_invested),
        total_cost_of_ownership: format_currency(metrics.total_cost_of_ownership),
        recommended_max_price: format_currency(metrics.recommended_max_price),
        recommended_rent: format_currency(metrics.recommended_rent),
        average_net_yield_10y: format_pct(metrics.average_net_yield_10y),
        year_one_yield: format_pct(metrics.year_one_yield),
        irr: format_pct(metrics.irr_pct),
        grade: metrics.grade.to_string(),
    };

    let output = InvestmentAnalysis {
        purchase: PurchaseSummary {
            loan_amount: terms.loan_amount,
            monthly_payment,
            down_payment,
            closing_costs,
            initial_cash_needed,
            total_cash_invested,
            total_acquisition_cost,
        },
        amortization,
        projection,
        metrics,
        display,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Buy-to-let analysis: annuity mortgage, rental cash-flow projection, Newton-Raphson IRR",
        input,
        warnings,
        elapsed,
        output,
    )
}

fn collect_warnings(
    rental: &RentalInputs,
    terms: &MortgageTerms,
    cash_invested: Money,
    projection: &[ProjectionYear],
    warnings: &mut Vec<String>,
) {
    if cash_invested < 1.0 {
        warnings.push("No cash invested; yields are computed against a floor of 1".into());
    }

    if safe(rental.monthly_rent) <= 0.0 {
        warnings.push("Monthly rent is zero or missing; no recommended price".into());
    }

    if projection.is_empty() {
        warnings.push("Projection horizon is zero years; yields are undefined".into());
    } else if rental.horizon() > terms.years && terms.loan_amount > 0.0 {
        warnings.push(format!(
            "Projection runs {} years beyond the {}-year mortgage; the payment is still counted every year",
            rental.horizon() - terms.years,
            terms.years
        ));
    }

    if let Some(y1) = projection.first() {
        if y1.net_cash_flow < 0.0 {
            warnings.push(format!(
                "Year-one net cash flow is negative ({})",
                format_currency(y1.net_cash_flow)
            ));
        }
    }
}
