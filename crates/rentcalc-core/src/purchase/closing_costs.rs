use serde::{Deserialize, Serialize};

use super::{PropertyType, PurchaseInputs, Region};
use crate::locale::safe;
use crate::types::{Money, Percent, Rate};

const GESTORIA_FEE: Money = 350.0;
const NEW_BUILD_VAT: Rate = 0.10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Default notary, registry and gestoría fees for a given price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosingCostEstimate {
    pub notary: Money,
    pub registry: Money,
    pub gestoria: Money,
}

/// Transfer tax percentages applied to the purchase price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferTaxRates {
    pub itp_pct: Percent,
    pub ajd_pct: Percent,
}

/// Transfer taxes due on the purchase. Only one of `itp` or `iva + ajd` is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferTaxes {
    pub itp: Money,
    pub iva: Money,
    pub ajd: Money,
}

impl TransferTaxes {
    pub fn total(&self) -> Money {
        self.itp + self.iva + self.ajd
    }
}

/// Every one-off cost of the acquisition apart from the price itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosingCostBreakdown {
    pub rates: TransferTaxRates,
    pub taxes: TransferTaxes,
    pub notary: Money,
    pub registry: Money,
    pub gestoria: Money,
    pub appraisal: Money,
    pub agency_commission: Money,
    pub other_closing: Money,
    /// Taxes plus all fees
    pub total: Money,
}

// ---------------------------------------------------------------------------
// Estimates
// ---------------------------------------------------------------------------

/// Estimate notary, registry and gestoría fees from the purchase price.
pub fn estimate_closing_costs(price: Money) -> ClosingCostEstimate {
    let notary = (400.0 + price * 0.0012).clamp(600.0, 1500.0);
    let registry = (200.0 + price * 0.0006).clamp(300.0, 900.0);
    ClosingCostEstimate {
        notary: notary.round(),
        registry: registry.round(),
        gestoria: GESTORIA_FEE,
    }
}

/// Estimate the bank appraisal fee from the purchase price.
pub fn estimate_appraisal(price: Money) -> Money {
    (200.0 + price * 0.001).clamp(250.0, 600.0).round()
}

// ---------------------------------------------------------------------------
// Transfer taxes
// ---------------------------------------------------------------------------

/// Official ITP/AJD rates for a region. An unknown region pays nothing.
pub fn official_rates(region: Option<Region>) -> TransferTaxRates {
    let (itp_pct, ajd_pct) = match region {
        Some(Region::Andalucia) => (7.0, 1.2),
        Some(Region::Aragon) => (8.0, 1.0),
        Some(Region::Asturias) => (8.0, 1.2),
        Some(Region::Baleares) => (8.0, 1.5),
        Some(Region::Canarias) => (6.5, 1.0),
        Some(Region::Cantabria) => (10.0, 1.5),
        Some(Region::CastillaLaMancha) => (9.0, 1.5),
        Some(Region::CastillaYLeon) => (8.0, 1.5),
        Some(Region::Cataluna) => (10.0, 1.5),
        Some(Region::ComunidadValenciana) => (10.0, 1.5),
        Some(Region::Extremadura) => (8.0, 1.5),
        Some(Region::Galicia) => (9.0, 1.5),
        Some(Region::LaRioja) => (7.0, 1.0),
        Some(Region::Madrid) => (6.0, 0.75),
        Some(Region::Murcia) => (8.0, 1.5),
        Some(Region::Navarra) => (6.0, 0.5),
        Some(Region::PaisVasco) => (4.0, 0.5),
        Some(Region::Ceuta) => (6.0, 1.0),
        Some(Region::Melilla) => (6.0, 1.0),
        None => (0.0, 0.0),
    };
    TransferTaxRates { itp_pct, ajd_pct }
}

/// Rates actually applied: the regional table, or the user's own figures.
pub fn effective_rates(input: &PurchaseInputs) -> TransferTaxRates {
    if input.use_official_rates {
        official_rates(input.region)
    } else {
        TransferTaxRates {
            itp_pct: input.manual_itp_pct,
            ajd_pct: input.manual_ajd_pct,
        }
    }
}

pub fn transfer_taxes(input: &PurchaseInputs) -> TransferTaxes {
    let price = safe(input.price);
    let rates = effective_rates(input);
    match input.property_type {
        PropertyType::Existing => TransferTaxes {
            itp: price * safe(rates.itp_pct) / 100.0,
            iva: 0.0,
            ajd: 0.0,
        },
        PropertyType::New => TransferTaxes {
            itp: 0.0,
            iva: price * NEW_BUILD_VAT,
            ajd: price * safe(rates.ajd_pct) / 100.0,
        },
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve the closing costs the buyer will actually pay.
///
/// In auto mode the notary, registry and gestoría estimates for the current
/// price win over anything the user typed. Without auto mode the user's
/// figures apply, and a field left empty keeps its estimate. The appraisal
/// is always the user's, defaulting to [`estimate_appraisal`]. Agency
/// commission and other costs are always the user's and default to zero.
pub fn resolve_closing_costs(input: &PurchaseInputs) -> ClosingCostBreakdown {
    let price = safe(input.price);
    let user = &input.closing_costs;
    let est = estimate_closing_costs(price);

    let (notary, registry, gestoria) = if user.auto_mode {
        (est.notary, est.registry, est.gestoria)
    } else {
        (
            or_estimate(user.notary, est.notary),
            or_estimate(user.registry, est.registry),
            or_estimate(user.gestoria, est.gestoria),
        )
    };
    let appraisal = or_estimate(user.appraisal, estimate_appraisal(price));
    let agency_commission = safe(user.agency_commission);
    let other_closing = safe(user.other_closing);

    let rates = effective_rates(input);
    let taxes = transfer_taxes(input);
    let total = taxes.total()
        + notary
        + registry
        + gestoria
        + appraisal
        + agency_commission
        + other_closing;

    ClosingCostBreakdown {
        rates,
        taxes,
        notary,
        registry,
        gestoria,
        appraisal,
        agency_commission,
        other_closing,
        total,
    }
}

fn or_estimate(value: Money, estimate: Money) -> Money {
    if value.is_nan() {
        estimate
    } else {
        value
    }
}
