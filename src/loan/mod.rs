//! Loan EMI, amortization schedules and vehicle affordability

mod terms;
mod amortization;
pub mod affordability;

pub use terms::{LoanTerms, MAX_TERM_YEARS};
pub use amortization::{
    compute_amortization, AmortizationRow, AmortizationSchedule, AmortizationSummary, Installment,
};
pub use affordability::{assess_affordability, AffordabilityInputs, AffordabilityReport, LiabilityPoint};
