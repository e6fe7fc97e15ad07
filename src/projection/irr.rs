//! Money-weighted return of a projection
//!
//! The annual rate that discounts every contribution, dividend payout and the
//! final portfolio value back to zero.

/// Periodic rates searched. Both ends keep `(1 + r)^600` finite, so NPV is
/// well defined across the longest horizon.
const RATE_BRACKET: (f64, f64) = (-0.5, 1.0);
const RATE_TOLERANCE: f64 = 1e-12;
const CASHFLOW_EPSILON: f64 = 1e-10;

/// Annualized IRR of evenly spaced cashflows.
///
/// Bisects the periodic rate inside a fixed bracket, then compounds it over
/// `periods_per_year`. Returns `None` for an empty series, when flows never
/// change sign, or when no root lies inside the bracket.
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }
    if cashflows.iter().all(|cf| cf.abs() < CASHFLOW_EPSILON) {
        return Some(0.0);
    }

    let has_inflow = cashflows.iter().any(|&cf| cf > CASHFLOW_EPSILON);
    let has_outflow = cashflows.iter().any(|&cf| cf < -CASHFLOW_EPSILON);
    if !has_inflow || !has_outflow {
        return None;
    }

    let periodic = bisect(cashflows)?;
    Some((1.0 + periodic).powi(periods_per_year as i32) - 1.0)
}

/// Present value at periodic `rate`, discounted with a running factor
fn npv(cashflows: &[f64], rate: f64) -> f64 {
    let growth = 1.0 + rate;
    let mut discount = 1.0;
    let mut total = 0.0;
    for &cf in cashflows {
        total += cf * discount;
        discount /= growth;
    }
    total
}

fn bisect(cashflows: &[f64]) -> Option<f64> {
    let (mut low, mut high) = RATE_BRACKET;
    let mut npv_low = npv(cashflows, low);
    let npv_high = npv(cashflows, high);

    if !npv_low.is_finite() || !npv_high.is_finite() || npv_low * npv_high > 0.0 {
        return None;
    }

    while high - low > RATE_TOLERANCE {
        let mid = 0.5 * (low + high);
        let npv_mid = npv(cashflows, mid);
        if npv_mid == 0.0 {
            return Some(mid);
        }
        if (npv_mid < 0.0) == (npv_low < 0.0) {
            low = mid;
            npv_low = npv_mid;
        } else {
            high = mid;
        }
    }

    Some(0.5 * (low + high))
}
