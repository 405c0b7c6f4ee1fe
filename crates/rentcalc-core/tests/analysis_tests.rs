use pretty_assertions::assert_eq;
use rentcalc_core::analysis::{self, Grade, InvestmentInput};
use rentcalc_core::purchase::{PropertyType, PurchaseInputs, Region};
use rentcalc_core::rental::RentalInputs;
use serde_json::Value;

// ===========================================================================
// Fixtures
// ===========================================================================

/// 250k resale flat in La Rioja (ITP 7%, AJD 1%), 80% financed at 3% over 25 years,
/// let at 1200/month growing 2% a year.
fn reference_input() -> InvestmentInput {
    InvestmentInput {
        purchase: PurchaseInputs {
            price: 250000.0,
            down_payment_pct: 20.0,
            mortgage_rate_pct: 3.0,
            mortgage_years: 25.0,
            reform_cost: 0.0,
            property_type: PropertyType::Existing,
            region: Some(Region::LaRioja),
            ..PurchaseInputs::default()
        },
        rental: RentalInputs {
            monthly_rent: 1200.0,
            rent_growth_pct: 2.0,
            projection_years: 10.0,
            ..RentalInputs::default()
        },
    }
}

fn assert_no_nulls(path: &str, value: &Value) {
    match value {
        Value::Null => panic!("null at {path}"),
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                assert_no_nulls(&format!("{path}[{i}]"), v);
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                assert_no_nulls(&format!("{path}.{k}"), v);
            }
        }
        _ => {}
    }
}

// ===========================================================================
// End-to-end
// ===========================================================================

#[test]
fn test_reference_scenario_has_no_undefined_outputs() {
    let output = analysis::analyze(&reference_input());
    let result = &output.result;

    // 200k over 300 months at 0.25%/month
    assert!((result.purchase.monthly_payment - 948.42).abs() < 0.01);
    assert_eq!(result.projection.len(), 10);
    assert_eq!(result.projection[0].gross_rent, 14400.0);
    assert!(result.metrics.irr_pct.is_finite());

    let json = serde_json::to_value(result).unwrap();
    assert_no_nulls("result", &json);
}

#[test]
fn test_reference_scenario_purchase_figures() {
    let result = analysis::analyze(&reference_input()).result;
    let p = &result.purchase;

    assert_eq!(p.loan_amount, 200000.0);
    assert_eq!(p.down_payment, 50000.0);
    // ITP 17500 + notary 700 + registry 350 + gestoría 350 + appraisal 450
    assert_eq!(p.closing_costs.total, 19350.0);
    assert_eq!(p.initial_cash_needed, 69350.0);
    assert_eq!(p.total_cash_invested, 69350.0);
    assert_eq!(p.total_acquisition_cost, 269350.0);
}

#[test]
fn test_reference_scenario_metrics() {
    let result = analysis::analyze(&reference_input()).result;
    let m = &result.metrics;

    // Fixed costs are derived from the rent: 720 + 600 + 300 + 360 + 600
    assert_eq!(result.projection[0].fixed_costs, 2580.0);
    assert_eq!(result.projection[0].maintenance, 720.0);

    let expected_y1 = result.projection[0].net_cash_flow / 69350.0 * 100.0;
    assert!((m.year_one_yield - expected_y1).abs() < 1e-9);
    assert_eq!(m.grade, Grade::from_yield(m.year_one_yield));

    let interest: f64 = result.amortization.iter().map(|y| y.interest_paid).sum();
    assert!((m.total_cost_of_ownership - (269350.0 + interest)).abs() < 1e-6);
    assert!((m.recommended_max_price - 14400.0 / 0.065).abs() < 1e-6);
    assert!((m.recommended_rent - 269350.0 * 0.065 / 12.0).abs() < 1e-9);
}

#[test]
fn test_full_term_schedule_repays_loan() {
    let result = analysis::analyze(&reference_input()).result;
    assert_eq!(result.amortization.len(), 25);
    let principal: f64 = result.amortization.iter().map(|y| y.principal_paid).sum();
    assert!((principal - 200000.0).abs() < 1e-4);
}

#[test]
fn test_projection_identity_holds_every_year() {
    let result = analysis::analyze(&reference_input()).result;
    for row in &result.projection {
        let expected = row.gross_rent - row.total_expenses - row.income_tax_paid;
        assert!((row.net_cash_flow - expected).abs() < 1e-9, "year {}", row.year);
        assert!(row.taxable_base >= 0.0);
    }
}

#[test]
fn test_user_edited_cost_is_kept() {
    let mut input = reference_input();
    input.rental.costs.ibi.set(300.0);
    let result = analysis::analyze(&input).result;
    // 300 + 600 + 300 + 360 + 600
    assert_eq!(result.projection[0].fixed_costs, 2160.0);
}

#[test]
fn test_cash_purchase_has_no_mortgage() {
    let mut input = reference_input();
    input.purchase.down_payment_pct = 100.0;
    let result = analysis::analyze(&input).result;

    assert_eq!(result.purchase.loan_amount, 0.0);
    assert_eq!(result.purchase.monthly_payment, 0.0);
    assert!(result.projection.iter().all(|r| r.mortgage_payment == 0.0));
    assert_eq!(result.metrics.total_interest, 0.0);
    assert!(result.metrics.year_one_yield > 0.0);
}

#[test]
fn test_empty_input_degrades_without_panicking() {
    let output = analysis::analyze(&InvestmentInput::default());
    let m = &output.result.metrics;

    assert!(m.recommended_max_price.is_nan());
    assert!(!output.warnings.is_empty());
    // Default horizon still projects ten empty years
    assert_eq!(output.result.projection.len(), 10);
    assert_eq!(output.result.display.recommended_max_price, "");
}

#[test]
fn test_zero_horizon_leaves_grade_undefined() {
    let mut input = reference_input();
    input.rental.projection_years = 0.0;
    let output = analysis::analyze(&input);

    assert!(output.result.projection.is_empty());
    assert!(output.result.metrics.year_one_yield.is_nan());
    assert_eq!(output.result.metrics.grade, Grade::Undefined);
    assert_eq!(output.result.display.grade, "–");
    assert_eq!(output.result.display.year_one_yield, "–");
}

#[test]
fn test_new_build_costs_more_up_front() {
    let resale = analysis::analyze(&reference_input()).result;
    let mut input = reference_input();
    input.purchase.property_type = PropertyType::New;
    let new_build = analysis::analyze(&input).result;

    // VAT 25000 + AJD 2500 vs ITP 17500
    assert_eq!(
        new_build.purchase.closing_costs.total - resale.purchase.closing_costs.total,
        10000.0
    );
}

// ===========================================================================
// JSON snapshots
// ===========================================================================

#[test]
fn test_analyze_from_locale_json() {
    let json = r#"{
        "purchase": {
            "price": "250.000",
            "down_payment_pct": "20",
            "mortgage_rate_pct": "3",
            "mortgage_years": 25,
            "region": "la_rioja"
        },
        "rental": { "monthly_rent": "1.200" }
    }"#;
    let input: InvestmentInput = serde_json::from_str(json).unwrap();
    let from_json = analysis::analyze(&input).result;
    let reference = analysis::analyze(&reference_input()).result;

    assert_eq!(from_json.purchase.closing_costs, reference.purchase.closing_costs);
    assert_eq!(from_json.amortization, reference.amortization);
    assert_eq!(from_json.projection, reference.projection);
}

#[test]
fn test_output_envelope() {
    let output = analysis::analyze(&reference_input());
    let value = serde_json::to_value(&output).unwrap();

    assert!(value["methodology"].as_str().unwrap().contains("IRR"));
    assert_eq!(value["metadata"]["precision"], "f64");
    assert_eq!(value["assumptions"]["purchase"]["region"], "la_rioja");
    assert!(value["result"]["metrics"]["grade"].is_string());
}
