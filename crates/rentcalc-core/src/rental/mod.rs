//! Rental side of an investment: running costs, income tax and the
//! year-by-year cash-flow projection.

pub mod auto_field;
pub mod costs;
pub mod projection;
pub mod tax;

use serde::{Deserialize, Serialize};

use crate::locale::safe;
use crate::types::{lenient_number, missing, Money, Percent};
use self::costs::FixedCosts;

/// Snapshot of everything the landlord enters about letting the home.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalInputs {
    #[serde(deserialize_with = "lenient_number")]
    pub monthly_rent: Money,
    /// Annual rent increase
    #[serde(deserialize_with = "lenient_number")]
    pub rent_growth_pct: Percent,
    #[serde(deserialize_with = "lenient_number")]
    pub projection_years: f64,
    pub costs: FixedCosts,
    /// Share of the yearly rent set aside for maintenance
    #[serde(deserialize_with = "lenient_number")]
    pub maintenance_pct: Percent,
}

impl RentalInputs {
    /// Whole years to project; missing or negative horizons project nothing.
    pub fn horizon(&self) -> u32 {
        safe(self.projection_years).max(0.0).floor() as u32
    }
}

impl Default for RentalInputs {
    fn default() -> Self {
        Self {
            monthly_rent: missing(),
            rent_growth_pct: 2.0,
            projection_years: 10.0,
            costs: FixedCosts::default(),
            maintenance_pct: 5.0,
        }
    }
}
