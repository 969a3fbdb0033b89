//! Year-by-year SIP growth projection
//!
//! Each year the prior balance compounds monthly for 12 months and the
//! year's 12 contributions are added as an annuity-due (paid at the start
//! of each month). Step-up rules raise the contribution on entering a
//! covered year; inflation deflates the balance by (1 + i)^year.

use serde::{Deserialize, Serialize};

use super::step_up::StepUpPlan;
use crate::annuity;
use crate::error::{CalcError, CalcResult};

const MONTHS_PER_YEAR: u32 = 12;

/// Longest projection accepted, in years
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Inputs for one growth projection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthInputs {
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    #[serde(default)]
    pub step_up: StepUpPlan,
    #[serde(default)]
    pub inflation_percent: Option<f64>,
}

impl GrowthInputs {
    pub fn new(monthly_contribution: f64, annual_rate_percent: f64, years: u32) -> Self {
        Self {
            monthly_contribution,
            annual_rate_percent,
            years,
            step_up: StepUpPlan::default(),
            inflation_percent: None,
        }
    }

    pub fn with_step_up(mut self, step_up: StepUpPlan) -> Self {
        self.step_up = step_up;
        self
    }

    pub fn with_inflation(mut self, inflation_percent: f64) -> Self {
        self.inflation_percent = Some(inflation_percent);
        self
    }
}

/// Position at the end of a year (year 0 is the start)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub year: u32,
    /// Step-up applied on entering this year
    pub step_up_percent: f64,
    /// Monthly contribution in force during this year
    pub monthly_contribution: f64,
    /// Amount contributed during this year
    pub contribution: f64,
    pub total_invested: f64,
    pub nominal_value: f64,
    /// Nominal value in today's money
    pub real_value: f64,
}

impl GrowthRow {
    fn start(monthly_contribution: f64) -> Self {
        Self {
            year: 0,
            step_up_percent: 0.0,
            monthly_contribution,
            contribution: 0.0,
            total_invested: 0.0,
            nominal_value: 0.0,
            real_value: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthProjection {
    pub inputs: GrowthInputs,
    pub rows: Vec<GrowthRow>,
}

impl GrowthProjection {
    pub fn summary(&self) -> GrowthSummary {
        let last = self
            .rows
            .last()
            .copied()
            .unwrap_or_else(|| GrowthRow::start(0.0));

        GrowthSummary {
            years: last.year,
            total_invested: last.total_invested,
            maturity_value: last.nominal_value,
            real_maturity_value: last.real_value,
            total_returns: last.nominal_value - last.total_invested,
        }
    }

    /// Monthly cashflows from the investor's side: contributions negative,
    /// maturity value positive in the final period
    pub fn monthly_cashflows(&self) -> Vec<f64> {
        let mut flows: Vec<f64> = self
            .rows
            .iter()
            .skip(1)
            .flat_map(|row| std::iter::repeat(-row.monthly_contribution).take(MONTHS_PER_YEAR as usize))
            .collect();
        if flows.is_empty() {
            return flows;
        }
        flows.push(self.summary().maturity_value);
        flows
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GrowthSummary {
    pub years: u32,
    pub total_invested: f64,
    pub maturity_value: f64,
    pub real_maturity_value: f64,
    pub total_returns: f64,
}

/// Project accumulated value for every year of the term
pub fn project_growth(inputs: &GrowthInputs) -> CalcResult<GrowthProjection> {
    let rate = inputs.annual_rate_percent;
    if !rate.is_finite() || rate < 0.0 {
        return Err(CalcError::invalid(format!(
            "annual return rate must be zero or positive, got {}",
            rate
        )));
    }
    let inflation = inputs.inflation_percent.unwrap_or(0.0);
    if !inflation.is_finite() || inflation <= -100.0 {
        return Err(CalcError::invalid(format!(
            "inflation must be above -100%, got {}",
            inflation
        )));
    }

    if inputs.years > MAX_PROJECTION_YEARS {
        return Err(CalcError::invalid(format!(
            "projection must be at most {} years, got {}",
            MAX_PROJECTION_YEARS, inputs.years
        )));
    }
    inputs.step_up.validate()?;

    let base = inputs.monthly_contribution;
    if !base.is_finite() || base <= 0.0 || inputs.years == 0 {
        log::debug!(
            "Nothing to project (contribution {}, {} years); returning the starting row",
            base,
            inputs.years
        );
        return Ok(GrowthProjection {
            inputs: inputs.clone(),
            rows: vec![GrowthRow::start(base.max(0.0))],
        });
    }

    let r = annuity::monthly_rate(rate);
    let mut rows = Vec::with_capacity(inputs.years as usize + 1);
    rows.push(GrowthRow::start(base));

    let mut monthly = base;
    let mut total_invested = 0.0;
    let mut value = 0.0;

    for year in 1..=inputs.years {
        let step_up_percent = inputs.step_up.applicable_percent(year).unwrap_or(0.0);
        monthly *= 1.0 + step_up_percent / 100.0;

        let contribution = monthly * MONTHS_PER_YEAR as f64;
        total_invested += contribution;

        value = annuity::compound(value, r, MONTHS_PER_YEAR)
            + annuity::fv_annuity_due(monthly, r, MONTHS_PER_YEAR);

        rows.push(GrowthRow {
            year,
            step_up_percent,
            monthly_contribution: monthly,
            contribution,
            total_invested,
            nominal_value: value,
            real_value: annuity::deflate(value, inflation, year),
        });
    }

    log::debug!(
        "Projected {:.2}/month at {}% for {} years: maturity {:.2}",
        base,
        rate,
        inputs.years,
        value
    );

    Ok(GrowthProjection {
        inputs: inputs.clone(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::StepUpRule;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    /// Closed-form SIP future value after `years`
    fn sip_future_value(monthly: f64, annual_rate_percent: f64, years: u32) -> f64 {
        let r = annual_rate_percent / 12.0 / 100.0;
        let n = (years * 12) as i32;
        monthly * ((1.0 + r).powi(n) - 1.0) / r * (1.0 + r)
    }

    #[test]
    fn test_sip_example() {
        let projection = project_growth(&GrowthInputs::new(5000.0, 12.0, 10)).unwrap();
        let summary = projection.summary();

        assert_eq!(projection.rows.len(), 11);
        assert_abs_diff_eq!(summary.total_invested, 600_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(summary.maturity_value, 1_161_695.38, epsilon = 0.01);
        assert_abs_diff_eq!(summary.real_maturity_value, summary.maturity_value, epsilon = 1e-9);
    }

    #[test]
    fn test_matches_closed_form_every_year() {
        for (monthly, rate, years) in [(5000.0, 12.0, 10), (2500.0, 7.25, 25), (100.0, 18.0, 3)] {
            let projection = project_growth(&GrowthInputs::new(monthly, rate, years)).unwrap();
            for row in projection.rows.iter().skip(1) {
                assert_relative_eq!(
                    row.nominal_value,
                    sip_future_value(monthly, rate, row.year),
                    max_relative = 1e-10
                );
            }
        }
    }

    #[test]
    fn test_zero_rate_accumulates_contributions() {
        let projection = project_growth(&GrowthInputs::new(1000.0, 0.0, 5)).unwrap();
        let summary = projection.summary();
        assert_abs_diff_eq!(summary.maturity_value, 60_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.total_returns, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_year_zero_row() {
        let projection = project_growth(&GrowthInputs::new(5000.0, 12.0, 3)).unwrap();
        let start = projection.rows[0];
        assert_eq!(start.year, 0);
        assert_eq!(start.monthly_contribution, 5000.0);
        assert_eq!(start.nominal_value, 0.0);
        assert_eq!(start.total_invested, 0.0);
    }

    #[test]
    fn test_degenerate_inputs_yield_single_row() {
        for inputs in [
            GrowthInputs::new(5000.0, 12.0, 0),
            GrowthInputs::new(0.0, 12.0, 10),
            GrowthInputs::new(-10.0, 12.0, 10),
        ] {
            let projection = project_growth(&inputs).unwrap();
            assert_eq!(projection.rows.len(), 1);
            assert_eq!(projection.rows[0].nominal_value, 0.0);
            assert!(projection.monthly_cashflows().is_empty());
        }
    }

    #[test]
    fn test_invalid_rate_or_inflation() {
        assert!(matches!(
            project_growth(&GrowthInputs::new(5000.0, -1.0, 10)),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(project_growth(&GrowthInputs::new(5000.0, f64::NAN, 10)).is_err());
        assert!(project_growth(&GrowthInputs::new(5000.0, 12.0, 10).with_inflation(-100.0)).is_err());
    }

    #[test]
    fn test_malformed_step_up_rules_rejected() {
        for rule in [
            StepUpRule::new(2, 10, f64::NAN),
            StepUpRule::new(2, 10, 0.0),
            StepUpRule::new(0, 10, 5.0),
        ] {
            let inputs = GrowthInputs::new(5000.0, 12.0, 10).with_step_up(StepUpPlan::from_rules(vec![rule]));
            assert!(matches!(project_growth(&inputs), Err(CalcError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_term_upper_bound() {
        assert!(project_growth(&GrowthInputs::new(5000.0, 12.0, MAX_PROJECTION_YEARS)).is_ok());
        assert!(matches!(
            project_growth(&GrowthInputs::new(5000.0, 12.0, u32::MAX)),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_step_up_compounds_contribution() {
        let mut plan = StepUpPlan::new();
        plan.add(2, 10.0, 3).unwrap();
        let projection = project_growth(&GrowthInputs::new(1000.0, 0.0, 3).with_step_up(plan)).unwrap();

        let monthly: Vec<f64> = projection.rows.iter().map(|r| r.monthly_contribution).collect();
        assert_abs_diff_eq!(monthly[1], 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(monthly[2], 1100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(monthly[3], 1210.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            projection.summary().total_invested,
            (1000.0 + 1100.0 + 1210.0) * 12.0,
            epsilon = 1e-6
        );
        assert_eq!(projection.rows[2].step_up_percent, 10.0);
    }

    #[test]
    fn test_step_up_beats_flat_sip() {
        let flat = project_growth(&GrowthInputs::new(5000.0, 12.0, 10)).unwrap();
        let mut plan = StepUpPlan::new();
        plan.add(2, 10.0, 10).unwrap();
        let stepped = project_growth(&GrowthInputs::new(5000.0, 12.0, 10).with_step_up(plan)).unwrap();

        assert!(stepped.summary().maturity_value > flat.summary().maturity_value);
        assert_eq!(stepped.rows[1].nominal_value, flat.rows[1].nominal_value);
    }

    #[test]
    fn test_inflation_deflates_by_year() {
        let projection = project_growth(&GrowthInputs::new(5000.0, 12.0, 10).with_inflation(6.0)).unwrap();
        for row in projection.rows.iter().skip(1) {
            assert_relative_eq!(
                row.real_value,
                row.nominal_value / 1.06_f64.powi(row.year as i32),
                max_relative = 1e-12
            );
            assert!(row.real_value < row.nominal_value);
        }
    }

    #[test]
    fn test_monthly_cashflows_shape() {
        let projection = project_growth(&GrowthInputs::new(1000.0, 10.0, 2)).unwrap();
        let flows = projection.monthly_cashflows();
        assert_eq!(flows.len(), 25);
        assert!(flows[..24].iter().all(|&cf| cf == -1000.0));
        assert_abs_diff_eq!(flows[24], projection.summary().maturity_value, epsilon = 1e-9);
    }
}
