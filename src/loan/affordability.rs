//! Vehicle affordability: how much a financed purchase really costs
//!
//! Missing optional inputs fall back to `AffordabilityDefaults`
//! (20% down payment, 4 year tenure, 9% p.a.). An EMI above 10% of
//! monthly income is flagged as unaffordable.

use serde::{Deserialize, Serialize};

use super::amortization::compute_amortization;
use super::terms::LoanTerms;
use crate::annuity;
use crate::config::AffordabilityDefaults;
use crate::error::{CalcError, CalcResult};

/// Inputs as submitted by the user; `None` means "use the default"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffordabilityInputs {
    pub cost: f64,
    pub monthly_income: f64,
    pub down_payment: Option<f64>,
    pub tenure_years: Option<u32>,
    pub annual_rate_percent: Option<f64>,
    pub inflation_percent: Option<f64>,
}

/// Cumulative amount paid by the end of a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiabilityPoint {
    pub year: u32,
    pub nominal: f64,
    /// Nominal amount expressed in today's money
    pub real: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityReport {
    pub down_payment: f64,
    pub principal: f64,
    pub tenure_years: u32,
    pub annual_rate_percent: f64,
    pub emi: f64,
    pub max_affordable_emi: f64,
    pub is_affordable: bool,
    pub total_emi_payment: f64,
    pub total_cost: f64,
    pub total_interest: f64,
    /// Year 0 (down payment) through the end of the tenure
    pub liability: Vec<LiabilityPoint>,
}

/// Work out the EMI, the income check and the cumulative liability curve
pub fn assess_affordability(
    inputs: &AffordabilityInputs,
    defaults: &AffordabilityDefaults,
) -> CalcResult<AffordabilityReport> {
    if !inputs.cost.is_finite() || inputs.cost <= 0.0 {
        return Err(CalcError::invalid(format!("cost must be positive, got {}", inputs.cost)));
    }
    if !inputs.monthly_income.is_finite() || inputs.monthly_income < 0.0 {
        return Err(CalcError::invalid(format!(
            "monthly income must not be negative, got {}",
            inputs.monthly_income
        )));
    }

    // Zero means "not provided", same as an empty form field
    let down_payment = inputs
        .down_payment
        .filter(|d| *d > 0.0)
        .unwrap_or(inputs.cost * defaults.down_payment_fraction);
    let tenure_years = inputs
        .tenure_years
        .filter(|t| *t > 0)
        .unwrap_or(defaults.loan_tenure_years);
    let annual_rate_percent = inputs
        .annual_rate_percent
        .filter(|r| *r > 0.0)
        .unwrap_or(defaults.loan_rate_percent);
    let inflation_percent = inputs.inflation_percent.unwrap_or(0.0);

    if down_payment >= inputs.cost {
        return Err(CalcError::invalid(format!(
            "down payment {:.2} leaves nothing to finance on a cost of {:.2}",
            down_payment, inputs.cost
        )));
    }
    if !inflation_percent.is_finite() || inflation_percent <= -100.0 {
        return Err(CalcError::invalid(format!(
            "inflation must be above -100%, got {}",
            inflation_percent
        )));
    }

    let principal = inputs.cost - down_payment;
    let terms = LoanTerms::new(principal, annual_rate_percent, tenure_years);
    let schedule = compute_amortization(&terms)?;
    let emi = schedule.emi;

    let max_affordable_emi = inputs.monthly_income * defaults.max_emi_income_fraction;
    let is_affordable = emi <= max_affordable_emi;
    if !is_affordable {
        log::debug!(
            "EMI {:.2} exceeds {:.0}% of income ({:.2})",
            emi,
            defaults.max_emi_income_fraction * 100.0,
            max_affordable_emi
        );
    }

    let mut liability = Vec::with_capacity(tenure_years as usize + 1);
    let mut cumulative = down_payment;
    liability.push(LiabilityPoint {
        year: 0,
        nominal: cumulative,
        real: cumulative,
    });
    for year in 1..=tenure_years {
        cumulative += emi * 12.0;
        liability.push(LiabilityPoint {
            year,
            nominal: cumulative,
            real: annuity::deflate(cumulative, inflation_percent, year),
        });
    }

    let total_emi_payment = emi * terms.total_months() as f64;

    Ok(AffordabilityReport {
        down_payment,
        principal,
        tenure_years,
        annual_rate_percent,
        emi,
        max_affordable_emi,
        is_affordable,
        total_emi_payment,
        total_cost: down_payment + total_emi_payment,
        total_interest: total_emi_payment - principal,
        liability,
    })
}
