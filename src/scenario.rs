//! Scenario runner for batch calculations
//!
//! Holds the configuration once, then evaluates many independent growth
//! projections, loan schedules or affordability checks in parallel.
//! Results always come back in input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::CalcResult;
use crate::growth::{annualized_return, project_growth, GrowthInputs, GrowthProjection};
use crate::loan::{
    assess_affordability, compute_amortization, AffordabilityInputs, AffordabilityReport,
    AmortizationSchedule, LoanTerms,
};

/// One cell of a rate/term sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub annual_rate_percent: f64,
    pub years: u32,
    pub total_invested: f64,
    pub maturity_value: f64,
    pub real_maturity_value: f64,
    pub total_returns: f64,
    /// Annualized IRR of the contribution stream, when it converges
    pub annualized_return: Option<f64>,
}

/// Batch runner sharing one configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(Config::from_env());
/// let base = GrowthInputs::new(5000.0, 12.0, 10);
/// let grid = runner.sweep_growth(&base, &[8.0, 10.0, 12.0], &[5, 10, 20])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: Config,
}

impl ScenarioRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Project every input set; a bad input fails only its own slot
    pub fn run_growth(&self, inputs: &[GrowthInputs]) -> Vec<CalcResult<GrowthProjection>> {
        inputs.par_iter().map(project_growth).collect()
    }

    pub fn run_loans(&self, terms: &[LoanTerms]) -> Vec<CalcResult<AmortizationSchedule>> {
        terms.par_iter().map(compute_amortization).collect()
    }

    /// Affordability checks using the configured defaults
    pub fn run_affordability(&self, inputs: &[AffordabilityInputs]) -> Vec<CalcResult<AffordabilityReport>> {
        let defaults = &self.config.affordability;
        inputs
            .par_iter()
            .map(|i| assess_affordability(i, defaults))
            .collect()
    }

    /// Vary rate and term around `base`, keeping contributions, step-ups
    /// and inflation fixed
    ///
    /// Output is rate-major: every term for the first rate, then the next.
    pub fn sweep_growth(&self, base: &GrowthInputs, rates: &[f64], terms: &[u32]) -> CalcResult<Vec<SweepPoint>> {
        let grid: Vec<(f64, u32)> = rates
            .iter()
            .flat_map(|&rate| terms.iter().map(move |&years| (rate, years)))
            .collect();

        log::debug!("Sweeping {} rate/term combinations", grid.len());

        grid.par_iter()
            .map(|&(rate, years)| {
                let mut inputs = base.clone();
                inputs.annual_rate_percent = rate;
                inputs.years = years;
                inputs.step_up.extend_to(years);

                let projection = project_growth(&inputs)?;
                let summary = projection.summary();
                Ok(SweepPoint {
                    annual_rate_percent: rate,
                    years,
                    total_invested: summary.total_invested,
                    maturity_value: summary.maturity_value,
                    real_maturity_value: summary.real_maturity_value,
                    total_returns: summary.total_returns,
                    annualized_return: annualized_return(&projection),
                })
            })
            .collect()
    }
}
