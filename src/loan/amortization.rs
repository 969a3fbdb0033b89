//! Month-by-month amortization with yearly roll-up rows

use serde::{Deserialize, Serialize};

use super::terms::LoanTerms;
use crate::error::CalcResult;

/// Loan state at the end of a year (year 0 is the disbursement date)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub year: u32,
    pub outstanding: f64,
    pub cumulative_principal: f64,
    pub cumulative_interest: f64,
}

impl AmortizationRow {
    fn opening(principal: f64) -> Self {
        Self {
            year: 0,
            outstanding: principal,
            cumulative_principal: 0.0,
            cumulative_interest: 0.0,
        }
    }
}

/// A single monthly installment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// Month number (1-indexed)
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Balance after this payment
    pub outstanding: f64,
}

/// Complete amortization result for one set of loan terms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,

    /// Equated monthly installment
    pub emi: f64,

    /// One row per completed year, starting with year 0
    pub yearly: Vec<AmortizationRow>,

    /// Every monthly installment
    pub monthly: Vec<Installment>,
}

impl AmortizationSchedule {
    pub fn total_payment(&self) -> f64 {
        self.monthly.iter().map(|m| m.payment).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.monthly.iter().map(|m| m.interest).sum()
    }

    pub fn summary(&self) -> AmortizationSummary {
        AmortizationSummary {
            principal: self.terms.principal,
            emi: self.emi,
            months: self.monthly.len() as u32,
            total_payment: self.total_payment(),
            total_interest: self.total_interest(),
        }
    }
}

/// Headline figures for a loan
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub principal: f64,
    pub emi: f64,
    pub months: u32,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// Build the amortization schedule for `terms`
pub fn compute_amortization(terms: &LoanTerms) -> CalcResult<AmortizationSchedule> {
    terms.validate()?;

    let r = terms.monthly_rate();
    let n = terms.total_months();
    let emi = terms.emi();

    log::debug!(
        "Amortizing {:.2} at {}% over {} months: EMI {:.2}",
        terms.principal,
        terms.annual_rate_percent,
        n,
        emi
    );

    let mut yearly = Vec::with_capacity(terms.term_years as usize + 1);
    let mut monthly = Vec::with_capacity(n as usize);
    yearly.push(AmortizationRow::opening(terms.principal));

    let mut balance = terms.principal;
    let mut cumulative_principal = 0.0;
    let mut cumulative_interest = 0.0;

    for month in 1..=n {
        let interest = balance * r;
        let mut principal = emi - interest;

        // Absorb floating point drift so the loan closes at exactly zero
        if principal > balance || month == n {
            principal = balance;
        }
        balance = (balance - principal).max(0.0);

        cumulative_principal += principal;
        cumulative_interest += interest;

        monthly.push(Installment {
            month,
            payment: principal + interest,
            principal,
            interest,
            outstanding: balance,
        });

        if month % 12 == 0 {
            yearly.push(AmortizationRow {
                year: month / 12,
                outstanding: balance,
                cumulative_principal,
                cumulative_interest,
            });
        }
    }

    Ok(AmortizationSchedule {
        terms: *terms,
        emi,
        yearly,
        monthly,
    })
}
