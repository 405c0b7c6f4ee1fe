use clap::Args;
use serde_json::Value;

use rentcalc_core::analysis::{self, InvestmentInput};
use rentcalc_core::purchase::{PropertyType, Region};
use rentcalc_core::validation;

use crate::input::{self, locale_number};

/// Arguments for the full investment analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price (decimal comma accepted, e.g. "250.000")
    #[arg(long, value_parser = locale_number)]
    pub price: Option<f64>,

    /// Down payment as a percentage of the price
    #[arg(long, value_parser = locale_number)]
    pub down_pct: Option<f64>,

    /// Annual mortgage rate in percent
    #[arg(long, value_parser = locale_number)]
    pub rate: Option<f64>,

    /// Mortgage term in years
    #[arg(long, value_parser = locale_number)]
    pub years: Option<f64>,

    /// Refurbishment budget
    #[arg(long, value_parser = locale_number)]
    pub reform: Option<f64>,

    /// Region, by name ("Comunidad de Madrid") or key ("madrid")
    #[arg(long)]
    pub region: Option<Region>,

    /// The home is a new build (VAT + AJD instead of ITP)
    #[arg(long)]
    pub new_build: bool,

    /// Use this ITP percentage instead of the regional table
    #[arg(long, value_parser = locale_number)]
    pub itp_pct: Option<f64>,

    /// Use this AJD percentage instead of the regional table
    #[arg(long, value_parser = locale_number)]
    pub ajd_pct: Option<f64>,

    /// Monthly rent
    #[arg(long, value_parser = locale_number)]
    pub rent: Option<f64>,

    /// Annual rent growth in percent
    #[arg(long, value_parser = locale_number)]
    pub growth: Option<f64>,

    /// Projection horizon in years
    #[arg(long, value_parser = locale_number)]
    pub horizon: Option<f64>,

    /// Maintenance reserve as a percentage of yearly rent
    #[arg(long, value_parser = locale_number)]
    pub maintenance_pct: Option<f64>,

    /// Run even when required fields are missing
    #[arg(long)]
    pub skip_validation: bool,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = match input::read_snapshot::<InvestmentInput>(args.input.as_deref())? {
        Some(snapshot) => snapshot,
        None => snapshot_from_flags(&args),
    };

    if !args.skip_validation {
        validation::validate(&snapshot)?;
    }

    let result = analysis::analyze(&snapshot);
    for w in &result.warnings {
        tracing::info!(warning = %w, "analysis warning");
    }
    Ok(serde_json::to_value(result)?)
}

fn snapshot_from_flags(args: &AnalyzeArgs) -> InvestmentInput {
    let mut snapshot = InvestmentInput::default();

    let p = &mut snapshot.purchase;
    p.price = args.price.unwrap_or(f64::NAN);
    p.down_payment_pct = args.down_pct.unwrap_or(f64::NAN);
    p.mortgage_rate_pct = args.rate.unwrap_or(f64::NAN);
    p.mortgage_years = args.years.unwrap_or(f64::NAN);
    p.reform_cost = args.reform.unwrap_or(f64::NAN);
    p.region = args.region;
    if args.new_build {
        p.property_type = PropertyType::New;
    }
    if args.itp_pct.is_some() || args.ajd_pct.is_some() {
        p.use_official_rates = false;
        p.manual_itp_pct = args.itp_pct.unwrap_or(p.manual_itp_pct);
        p.manual_ajd_pct = args.ajd_pct.unwrap_or(p.manual_ajd_pct);
    }

    let r = &mut snapshot.rental;
    r.monthly_rent = args.rent.unwrap_or(f64::NAN);
    if let Some(growth) = args.growth {
        r.rent_growth_pct = growth;
    }
    if let Some(horizon) = args.horizon {
        r.projection_years = horizon;
    }
    if let Some(pct) = args.maintenance_pct {
        r.maintenance_pct = pct;
    }

    snapshot
}
