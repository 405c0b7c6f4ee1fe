use tracing::debug;

use crate::types::{Money, Rate};

const CONVERGENCE_THRESHOLD: f64 = 1e-7;
const MAX_IRR_ITERATIONS: u32 = 40;
const MIN_RATE: Rate = -0.99;

/// Starting point for [`irr`] when the caller has no better estimate.
pub const DEFAULT_IRR_GUESS: Rate = 0.05;

/// Net Present Value of a series of yearly cash flows, the first at t = 0.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> Money {
    let one_plus_r = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / one_plus_r.powi(t as i32))
        .sum()
}

/// Internal Rate of Return using Newton-Raphson.
///
/// Runs at most 40 iterations and stops once successive rates differ by
/// less than 1e-7. Each new rate is floored at -99% so the discount factor
/// stays positive. A non-finite step ends the search and the last finite
/// rate is returned, so the result is always a number; when the flows have
/// no root near the guess it may simply be the guess.
pub fn irr(cash_flows: &[Money], guess: Rate) -> Rate {
    let mut rate = guess;

    for i in 0..MAX_IRR_ITERATIONS {
        let one_plus_r = 1.0 + rate;
        let mut f = 0.0;
        let mut df = 0.0;

        for (t, cf) in cash_flows.iter().enumerate() {
            let t = t as i32;
            f += cf / one_plus_r.powi(t);
            df -= f64::from(t) * cf / one_plus_r.powi(t + 1);
        }

        let next = rate - f / df;
        if !next.is_finite() {
            debug!(iteration = i, rate, "IRR step is not finite, keeping last rate");
            break;
        }
        let next = next.max(MIN_RATE);
        if (next - rate).abs() < CONVERGENCE_THRESHOLD {
            debug!(iteration = i, rate = next, "IRR converged");
            rate = next;
            break;
        }
        rate = next;
    }

    rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npv_basic() {
        let cfs = vec![-1000.0, 300.0, 400.0, 500.0];
        let result = npv(0.10, &cfs);
        // NPV at 10%: -1000 + 300/1.1 + 400/1.21 + 500/1.331 ≈ -21.04
        assert!((result - -21.04).abs() < 0.01);
    }

    #[test]
    fn test_npv_zero_rate() {
        let cfs = vec![-100.0, 50.0, 50.0, 50.0];
        assert_eq!(npv(0.0, &cfs), 50.0);
    }

    #[test]
    fn test_irr_single_period() {
        let result = irr(&[-100.0, 110.0], DEFAULT_IRR_GUESS);
        assert!((result - 0.10).abs() < 1e-3, "got {result}");
    }

    #[test]
    fn test_irr_basic() {
        let cfs = vec![-1000.0, 400.0, 400.0, 400.0];
        let result = irr(&cfs, 0.10);
        // IRR should be ~9.7%
        assert!((result - 0.097).abs() < 0.01);
        assert!(npv(result, &cfs).abs() < 1e-3);
    }

    #[test]
    fn test_irr_negative_return() {
        let cfs = vec![-1000.0, 100.0, 100.0, 100.0];
        let result = irr(&cfs, DEFAULT_IRR_GUESS);
        assert!(result < 0.0);
        assert!(result >= MIN_RATE);
        assert!(npv(result, &cfs).abs() < 1e-3);
    }

    #[test]
    fn test_irr_degenerate_flows_keep_guess() {
        // Zero derivative: the first step is NaN, so the guess survives.
        assert_eq!(irr(&[], 0.05), 0.05);
        assert_eq!(irr(&[0.0, 0.0], 0.06), 0.06);
    }

    #[test]
    fn test_irr_overshoot_is_floored() {
        // First step from 5% lands near -109; the root itself sits at -99%.
        let result = irr(&[-100.0, 1.0], DEFAULT_IRR_GUESS);
        assert!(result.is_finite());
        assert!(result >= MIN_RATE, "got {result}");
        assert!((result - MIN_RATE).abs() < 1e-6, "got {result}");
    }

    #[test]
    fn test_irr_keeps_last_rate_when_later_step_overflows() {
        // Step one jumps far below -99% and is floored. At -99% the
        // discount factor for year 400 underflows to zero, so step two is
        // NaN and the floored rate from step one is returned.
        let mut cfs = vec![0.0; 401];
        cfs[0] = -100.0;
        cfs[400] = 1.0;
        let result = irr(&cfs, DEFAULT_IRR_GUESS);
        assert_eq!(result, MIN_RATE);
        assert_ne!(result, DEFAULT_IRR_GUESS);
    }
}
