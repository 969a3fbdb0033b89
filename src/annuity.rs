//! Annuity and compounding helpers
//!
//! Monthly-rate building blocks shared by the loan and growth engines:
//! - EMI for a level-payment loan
//! - Future value of a monthly annuity-due
//! - Compounding and inflation deflation

/// Rates below this are treated as zero to avoid dividing by (1+r)^n - 1 ≈ 0
const ZERO_RATE: f64 = 1e-12;

/// Convert an annual percentage rate into a monthly decimal rate (12% -> 0.01)
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

/// Level monthly payment that repays `principal` over `n_months`
///
/// EMI = P·r·(1+r)^n / ((1+r)^n − 1), and P/n when r = 0.
pub fn emi(principal: f64, monthly_rate: f64, n_months: u32) -> f64 {
    if n_months == 0 {
        return 0.0;
    }
    if monthly_rate.abs() < ZERO_RATE {
        return principal / n_months as f64;
    }

    let growth = (1.0 + monthly_rate).powi(n_months as i32);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Future value of `amount` paid at the start of each month for `n_months`
pub fn fv_annuity_due(amount: f64, monthly_rate: f64, n_months: u32) -> f64 {
    if monthly_rate.abs() < ZERO_RATE {
        return amount * n_months as f64;
    }

    let growth = (1.0 + monthly_rate).powi(n_months as i32);
    amount * (growth - 1.0) / monthly_rate * (1.0 + monthly_rate)
}

/// Present value of `amount` paid at the end of each month for `n_months`
pub fn pv_annuity_ordinary(amount: f64, monthly_rate: f64, n_months: u32) -> f64 {
    if monthly_rate.abs() < ZERO_RATE {
        return amount * n_months as f64;
    }

    let v = 1.0 / (1.0 + monthly_rate);
    amount * (1.0 - v.powi(n_months as i32)) / monthly_rate
}

/// Grow `value` at `monthly_rate` for `n_months`
pub fn compound(value: f64, monthly_rate: f64, n_months: u32) -> f64 {
    value * (1.0 + monthly_rate).powi(n_months as i32)
}

/// Express a nominal amount `years` from now in today's money
pub fn deflate(value: f64, inflation_percent: f64, years: u32) -> f64 {
    value / (1.0 + inflation_percent / 100.0).powi(years as i32)
}
