const IRR_SEARCH_MIN: f64 = -0.99;
const IRR_SEARCH_MAX: f64 = 10.0;
const IRR_TOLERANCE: f64 = 1e-7;
const IRR_MAX_ITERATIONS: u32 = 200;

/// Discounted sum of a per-turn cash flow sequence. The first element is
/// treated as occurring now and is not discounted.
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    let factor = 1.0 + rate;
    let mut discount = 1.0;
    let mut total = 0.0;
    for &flow in cash_flows {
        total += flow / discount;
        discount *= factor;
    }
    total
}

/// Internal rate of return: the discount rate that zeroes the NPV of the
/// cash flow sequence, found by bisection over a fixed bracket. The search
/// accepts a midpoint once its NPV is within tolerance of zero, or once the
/// bracket has collapsed to floating-point resolution (the NPV curve can be
/// steep enough near the lower bound that no fixed interval width bounds the
/// residual). Returns `None` when no root exists in the bracket (all flows
/// one-signed, or the sequence never changes NPV sign) or the iteration cap
/// is hit first.
pub fn irr(cash_flows: &[f64]) -> Option<f64> {
    let has_negative = cash_flows.iter().any(|&f| f < 0.0);
    let has_positive = cash_flows.iter().any(|&f| f > 0.0);
    if !has_negative || !has_positive {
        return None;
    }

    let mut lo = IRR_SEARCH_MIN;
    let mut hi = IRR_SEARCH_MAX;
    let npv_lo = npv(lo, cash_flows);
    let npv_hi = npv(hi, cash_flows);
    if !npv_lo.is_finite() || !npv_hi.is_finite() || npv_lo.signum() == npv_hi.signum() {
        return None;
    }

    let lo_sign = npv_lo.signum();
    let mut it = 0;
    while it < IRR_MAX_ITERATIONS {
        it += 1;
        let mid = (lo + hi) * 0.5;
        if mid <= lo || mid >= hi {
            // No representable point remains strictly inside the bracket.
            return Some(mid);
        }
        let npv_mid = npv(mid, cash_flows);
        if !npv_mid.is_finite() {
            return None;
        }
        if npv_mid.abs() <= IRR_TOLERANCE {
            return Some(mid);
        }

        if npv_mid.signum() == lo_sign {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn assert_approx(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn npv_discounts_later_flows() {
        assert_approx(npv(0.0, &[-100.0, 50.0, 50.0]), 0.0, 1e-12);
        assert_approx(npv(0.10, &[-100.0, 110.0]), 0.0, 1e-12);
        assert_approx(
            npv(0.05, &[-300.0, 100.0, 100.0, 100.0]),
            -300.0 + 100.0 / 1.05 + 100.0 / 1.05_f64.powi(2) + 100.0 / 1.05_f64.powi(3),
            1e-12,
        );
    }

    #[test]
    fn irr_recovers_known_rate() {
        let rate = irr(&[-100.0, 110.0]).unwrap();
        assert_approx(rate, 0.10, 1e-6);

        // -100 + 60/(1+r) + 60/(1+r)^2 = 0 => r ~ 13.07%
        let rate = irr(&[-100.0, 60.0, 60.0]).unwrap();
        assert_approx(rate, 0.130662, 1e-5);
    }

    #[test]
    fn irr_is_none_for_one_signed_flows() {
        assert_eq!(irr(&[10.0, 20.0, 30.0]), None);
        assert_eq!(irr(&[-10.0, -20.0]), None);
        assert_eq!(irr(&[]), None);
        assert_eq!(irr(&[0.0, 0.0]), None);
    }

    #[test]
    fn irr_finds_deeply_negative_rate_for_partial_recovery() {
        // -100 + 5/(1+r) = 0 => r = -0.95 exactly; the bracket opens at
        // -0.99, so near-total losses still resolve to a rate.
        let rate = irr(&[-100.0, 5.0]).unwrap();
        assert_approx(rate, -0.95, 1e-6);
        assert_approx(npv(rate, &[-100.0, 5.0]), 0.0, 1e-3);
    }

    #[test]
    fn irr_residual_stays_small_on_steep_npv_curves() {
        // A long trickle of tiny flows puts the root near the bottom of the
        // bracket, where the NPV curve is steepest. The search must refine
        // past a fixed interval width to keep the residual bounded.
        let mut flows = vec![-1_000.0];
        flows.extend(std::iter::repeat(1.0).take(30));
        let rate = irr(&flows).unwrap();
        assert!(rate < 0.0, "rate was {rate}");
        assert_approx(npv(rate, &flows), 0.0, 1e-3);

        let short = [-1_000.0, 1.0, 1.0];
        let rate = irr(&short).unwrap();
        assert!(rate < -0.9, "rate was {rate}");
        assert_approx(npv(rate, &short), 0.0, 1e-3);
    }

    proptest! {
        #[test]
        fn prop_irr_zeroes_npv_when_it_converges(
            investment in 10.0_f64..1_000.0,
            flow in 1.0_f64..500.0,
            periods in 1_usize..30,
        ) {
            let mut flows = vec![-investment];
            flows.extend(std::iter::repeat(flow).take(periods));
            if let Some(rate) = irr(&flows) {
                let residual = npv(rate, &flows);
                prop_assert!(residual.abs() < 1e-3, "npv at irr was {residual}");
            }
        }
    }
}
