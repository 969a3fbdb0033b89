//! Fincalc - personal finance calculators and group bill settlement
//!
//! This library provides:
//! - Level-payment loan amortization and vehicle affordability checks
//! - SIP growth projection with step-up contributions and inflation adjustment
//! - Group expense tracking with net balances and minimal settlements
//! - Role-based calculator input schemas and a calculator catalog
//! - Parallel batch evaluation of scenarios

pub mod error;
pub mod config;
pub mod annuity;
pub mod loan;
pub mod growth;
pub mod split;
pub mod calculator;
pub mod format;
pub mod scenario;

// Re-export commonly used types
pub use error::{CalcError, CalcResult};
pub use config::Config;
pub use loan::{compute_amortization, AmortizationSchedule, LoanTerms};
pub use growth::{project_growth, GrowthInputs, GrowthProjection, StepUpPlan};
pub use split::{net_balances, Balance, Expense, Group, Member, Settlement};
pub use format::{format_currency, FormatOptions, Locale};
pub use scenario::ScenarioRunner;
