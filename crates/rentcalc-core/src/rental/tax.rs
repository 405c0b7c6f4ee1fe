use crate::types::{Money, Rate};

/// Upper bound of each bracket and the rate applied to a base inside it.
const BRACKETS: [(Money, Rate); 5] = [
    (12_450.0, 0.19),
    (20_200.0, 0.24),
    (35_200.0, 0.30),
    (60_000.0, 0.37),
    (300_000.0, 0.45),
];
const TOP_RATE: Rate = 0.47;

const REDUCTION_WITH_REFORM: Rate = 0.60;
const REDUCTION_STANDARD: Rate = 0.50;

/// Income tax rate for a yearly taxable base.
///
/// The rate of the bracket containing the base is applied to the whole base;
/// there is no bracket-by-bracket integration.
pub fn marginal_rate(base: Money) -> Rate {
    let base = base.max(0.0);
    BRACKETS
        .iter()
        .find(|(upper, _)| base <= *upper)
        .map_or(TOP_RATE, |(_, rate)| *rate)
}

/// Share of net rental income exempt from tax. Refurbished homes get the
/// higher reduction.
pub fn rental_income_reduction(reform_cost: Money) -> Rate {
    if reform_cost > 0.0 {
        REDUCTION_WITH_REFORM
    } else {
        REDUCTION_STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_edges() {
        assert_eq!(marginal_rate(10000.0), 0.19);
        assert_eq!(marginal_rate(12450.0), 0.19);
        assert_eq!(marginal_rate(12451.0), 0.24);
        assert_eq!(marginal_rate(20200.0), 0.24);
        assert_eq!(marginal_rate(35200.0), 0.30);
        assert_eq!(marginal_rate(60000.0), 0.37);
        assert_eq!(marginal_rate(300000.0), 0.45);
        assert_eq!(marginal_rate(500000.0), 0.47);
    }

    #[test]
    fn test_negative_base_clamps_to_lowest_bracket() {
        assert_eq!(marginal_rate(-5000.0), 0.19);
    }

    #[test]
    fn test_nan_base_is_lowest_bracket() {
        // NaN.max(0.0) is 0.0
        assert_eq!(marginal_rate(f64::NAN), 0.19);
    }

    #[test]
    fn test_reduction() {
        assert_eq!(rental_income_reduction(0.0), 0.50);
        assert_eq!(rental_income_reduction(f64::NAN), 0.50);
        assert_eq!(rental_income_reduction(15000.0), 0.60);
    }
}
