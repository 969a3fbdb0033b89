//! Loan terms

use serde::{Deserialize, Serialize};

use crate::annuity;
use crate::error::{CalcError, CalcResult};

/// Longest loan term accepted, in years
pub const MAX_TERM_YEARS: u32 = 100;

/// Immutable description of a level-payment loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual interest rate in percent (9.0 = 9% p.a.)
    pub annual_rate_percent: f64,

    /// Loan term in whole years
    pub term_years: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    /// Reject terms the amortization engine cannot process
    pub fn validate(&self) -> CalcResult<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(CalcError::invalid(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(CalcError::invalid(format!(
                "annual rate must be zero or positive, got {}",
                self.annual_rate_percent
            )));
        }
        if self.term_years == 0 || self.term_years > MAX_TERM_YEARS {
            return Err(CalcError::invalid(format!(
                "term must be between 1 and {} years, got {}",
                MAX_TERM_YEARS, self.term_years
            )));
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        annuity::monthly_rate(self.annual_rate_percent)
    }

    pub fn total_months(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    /// Equated monthly installment
    pub fn emi(&self) -> f64 {
        annuity::emi(self.principal, self.monthly_rate(), self.total_months())
    }
}
