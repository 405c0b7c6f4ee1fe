//! Purchase side of an investment: acquisition taxes, closing costs and the
//! mortgage that finances the part of the price not covered by the deposit.

pub mod closing_costs;
pub mod mortgage;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RentCalcError;
use crate::types::{lenient_number, missing, Money, Percent};

/// Resale homes pay ITP; new builds pay VAT plus AJD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[default]
    Existing,
    New,
}

/// Spanish autonomous communities and cities, each with its own transfer tax rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Andalucia,
    Aragon,
    Asturias,
    Baleares,
    Canarias,
    Cantabria,
    CastillaLaMancha,
    CastillaYLeon,
    Cataluna,
    ComunidadValenciana,
    Extremadura,
    Galicia,
    LaRioja,
    Madrid,
    Murcia,
    Navarra,
    PaisVasco,
    Ceuta,
    Melilla,
}

impl Region {
    pub const ALL: [Region; 19] = [
        Region::Andalucia,
        Region::Aragon,
        Region::Asturias,
        Region::Baleares,
        Region::Canarias,
        Region::Cantabria,
        Region::CastillaLaMancha,
        Region::CastillaYLeon,
        Region::Cataluna,
        Region::ComunidadValenciana,
        Region::Extremadura,
        Region::Galicia,
        Region::LaRioja,
        Region::Madrid,
        Region::Murcia,
        Region::Navarra,
        Region::PaisVasco,
        Region::Ceuta,
        Region::Melilla,
    ];

    /// Official display name.
    pub fn name(self) -> &'static str {
        match self {
            Region::Andalucia => "Andalucía",
            Region::Aragon => "Aragón",
            Region::Asturias => "Asturias",
            Region::Baleares => "Baleares",
            Region::Canarias => "Canarias",
            Region::Cantabria => "Cantabria",
            Region::CastillaLaMancha => "Castilla-La Mancha",
            Region::CastillaYLeon => "Castilla y León",
            Region::Cataluna => "Cataluña",
            Region::ComunidadValenciana => "Comunidad Valenciana",
            Region::Extremadura => "Extremadura",
            Region::Galicia => "Galicia",
            Region::LaRioja => "La Rioja",
            Region::Madrid => "Comunidad de Madrid",
            Region::Murcia => "Murcia",
            Region::Navarra => "Navarra",
            Region::PaisVasco => "País Vasco",
            Region::Ceuta => "Ceuta",
            Region::Melilla => "Melilla",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = RentCalcError;

    /// Accepts the display name ("Castilla y León") or the snake_case key
    /// ("castilla_y_leon"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if let Ok(region) = serde_json::from_value(serde_json::Value::String(wanted.clone())) {
            return Ok(region);
        }
        Region::ALL
            .into_iter()
            .find(|r| r.name().to_lowercase() == wanted)
            .ok_or_else(|| RentCalcError::InvalidInput {
                field: "region".into(),
                reason: format!("unknown region '{}'", s.trim()),
            })
    }
}

/// Notary, registry and other one-off purchase costs.
///
/// With `auto_mode` on, the notary, registry and gestoría estimates from
/// [`closing_costs::estimate_closing_costs`] replace the user's figures.
/// Empty fields fall back to the estimates in either mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosingCostInputs {
    pub auto_mode: bool,
    #[serde(deserialize_with = "lenient_number")]
    pub notary: Money,
    #[serde(deserialize_with = "lenient_number")]
    pub registry: Money,
    #[serde(deserialize_with = "lenient_number")]
    pub gestoria: Money,
    #[serde(deserialize_with = "lenient_number")]
    pub appraisal: Money,
    #[serde(deserialize_with = "lenient_number")]
    pub agency_commission: Money,
    #[serde(deserialize_with = "lenient_number")]
    pub other_closing: Money,
}

impl Default for ClosingCostInputs {
    fn default() -> Self {
        Self {
            auto_mode: true,
            notary: missing(),
            registry: missing(),
            gestoria: missing(),
            appraisal: missing(),
            agency_commission: missing(),
            other_closing: missing(),
        }
    }
}

/// Snapshot of everything the buyer enters about the acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseInputs {
    #[serde(deserialize_with = "lenient_number")]
    pub price: Money,
    #[serde(deserialize_with = "lenient_number")]
    pub down_payment_pct: Percent,
    /// Annual nominal rate
    #[serde(deserialize_with = "lenient_number")]
    pub mortgage_rate_pct: Percent,
    #[serde(deserialize_with = "lenient_number")]
    pub mortgage_years: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub reform_cost: Money,
    pub property_type: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    /// Use the regional table instead of `manual_itp_pct` / `manual_ajd_pct`
    pub use_official_rates: bool,
    #[serde(deserialize_with = "lenient_number")]
    pub manual_itp_pct: Percent,
    #[serde(deserialize_with = "lenient_number")]
    pub manual_ajd_pct: Percent,
    pub closing_costs: ClosingCostInputs,
}

impl Default for PurchaseInputs {
    fn default() -> Self {
        Self {
            price: missing(),
            down_payment_pct: missing(),
            mortgage_rate_pct: missing(),
            mortgage_years: missing(),
            reform_cost: missing(),
            property_type: PropertyType::Existing,
            region: None,
            use_official_rates: true,
            manual_itp_pct: 7.0,
            manual_ajd_pct: 1.0,
            closing_costs: ClosingCostInputs::default(),
        }
    }
}
