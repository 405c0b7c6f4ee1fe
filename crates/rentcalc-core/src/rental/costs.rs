use serde::{Deserialize, Serialize};

use super::auto_field::AutoField;
use crate::locale::{is_num, safe};
use crate::types::Money;

const IBI_RATIO: f64 = 0.60;
const COMMUNITY_FEES_RATIO: f64 = 0.50;
const HOME_INSURANCE_RATIO: f64 = 0.25;
const LIFE_INSURANCE_RATIO: f64 = 0.30;
const UNPAID_RENT_INSURANCE_RATIO: f64 = 0.50;

/// Yearly fixed running costs of the rented home.
///
/// All but `misc_expenses` default to a fraction of the monthly rent until
/// the user enters a figure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedCosts {
    /// Municipal property tax
    pub ibi: AutoField,
    pub community_fees: AutoField,
    pub home_insurance: AutoField,
    pub life_insurance: AutoField,
    pub unpaid_rent_insurance: AutoField,
    pub misc_expenses: AutoField,
}

impl FixedCosts {
    /// Refresh untouched fields from the monthly rent. No-op without a rent.
    pub fn derive_from_rent(&mut self, monthly_rent: Money) {
        if !is_num(monthly_rent) {
            return;
        }
        self.ibi.derive((monthly_rent * IBI_RATIO).round());
        self.community_fees
            .derive((monthly_rent * COMMUNITY_FEES_RATIO).round());
        self.home_insurance
            .derive((monthly_rent * HOME_INSURANCE_RATIO).round());
        self.life_insurance
            .derive((monthly_rent * LIFE_INSURANCE_RATIO).round());
        self.unpaid_rent_insurance
            .derive((monthly_rent * UNPAID_RENT_INSURANCE_RATIO).round());
    }

    /// Sum of all fields, missing ones counted as zero.
    pub fn annual_total(&self) -> Money {
        [
            &self.ibi,
            &self.community_fees,
            &self.home_insurance,
            &self.life_insurance,
            &self.unpaid_rent_insurance,
            &self.misc_expenses,
        ]
        .iter()
        .map(|f| safe(f.value()))
        .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_from_rent() {
        let mut costs = FixedCosts::default();
        costs.derive_from_rent(1200.0);
        assert_eq!(costs.ibi.value(), 720.0);
        assert_eq!(costs.community_fees.value(), 600.0);
        assert_eq!(costs.home_insurance.value(), 300.0);
        assert_eq!(costs.life_insurance.value(), 360.0);
        assert_eq!(costs.unpaid_rent_insurance.value(), 600.0);
        assert!(costs.misc_expenses.value().is_nan());
        assert_eq!(costs.annual_total(), 2580.0);
    }

    #[test]
    fn test_derive_rounds_to_whole_units() {
        let mut costs = FixedCosts::default();
        costs.derive_from_rent(950.0);
        // 950 * 0.25 = 237.5 -> 238
        assert_eq!(costs.home_insurance.value(), 238.0);
    }

    #[test]
    fn test_touched_field_survives_rent_change() {
        let mut costs = FixedCosts::default();
        costs.derive_from_rent(1000.0);
        costs.ibi.set(400.0);
        costs.misc_expenses.set(150.0);
        costs.derive_from_rent(2000.0);

        assert_eq!(costs.ibi.value(), 400.0);
        assert_eq!(costs.community_fees.value(), 1000.0);
        assert_eq!(costs.misc_expenses.value(), 150.0);
    }

    #[test]
    fn test_missing_rent_leaves_fields_alone() {
        let mut costs = FixedCosts::default();
        costs.derive_from_rent(f64::NAN);
        assert!(costs.ibi.value().is_nan());
        assert_eq!(costs.annual_total(), 0.0);
    }
}
