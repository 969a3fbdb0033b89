//! Step-up rules: yearly increases to the monthly contribution
//!
//! A rule raises the running monthly contribution by `increase_percent`
//! at the start of every year in `from_year..=to_year`. Increases compound
//! across years and never reset. Where raw rules overlap, the last rule
//! covering a year wins; `StepUpPlan::add` keeps rules disjoint.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepUpRule {
    /// First year the increase applies (1-based)
    pub from_year: u32,
    /// Last year the increase applies (inclusive)
    pub to_year: u32,
    pub increase_percent: f64,
}

impl StepUpRule {
    pub fn new(from_year: u32, to_year: u32, increase_percent: f64) -> Self {
        Self {
            from_year,
            to_year,
            increase_percent,
        }
    }

    pub fn covers(&self, year: u32) -> bool {
        year >= self.from_year && year <= self.to_year
    }

    /// A usable rule starts in year 1 or later, ends no earlier than it
    /// starts and changes the contribution by a finite non-zero percentage
    pub fn validate(&self) -> CalcResult<()> {
        if self.from_year == 0 || self.from_year > self.to_year {
            return Err(CalcError::invalid(format!(
                "step-up years must satisfy 1 <= from <= to, got {}..={}",
                self.from_year, self.to_year
            )));
        }
        if !self.increase_percent.is_finite() || self.increase_percent == 0.0 {
            return Err(CalcError::invalid(format!(
                "step-up percentage must be a non-zero number, got {}",
                self.increase_percent
            )));
        }
        Ok(())
    }
}

/// Monthly contribution in force during a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionStep {
    pub year: u32,
    /// Increase applied on entering this year (0 when none)
    pub step_up_percent: f64,
    pub monthly: f64,
}

/// Ordered set of step-up rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepUpPlan {
    rules: Vec<StepUpRule>,
}

impl StepUpPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take rules as given; overlaps resolve to the later rule
    pub fn from_rules(rules: Vec<StepUpRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[StepUpRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Add a rule running from `from_year` to the end of the term
    ///
    /// A rule starting in the same year is replaced, earlier overlapping
    /// rules are cut short, and rules starting later are superseded.
    pub fn add(&mut self, from_year: u32, increase_percent: f64, term_years: u32) -> CalcResult<()> {
        if from_year == 0 || from_year > term_years {
            return Err(CalcError::invalid(format!(
                "step-up start year must be within 1..={}, got {}",
                term_years, from_year
            )));
        }
        let rule = StepUpRule::new(from_year, term_years, increase_percent);
        rule.validate()?;

        self.rules.retain(|rule| rule.from_year < from_year);
        for rule in &mut self.rules {
            if rule.to_year >= from_year {
                rule.to_year = from_year - 1;
            }
        }
        self.rules.push(rule);
        self.rules.sort_by_key(|rule| rule.from_year);
        Ok(())
    }

    /// Check every rule; plans built with `from_rules` or deserialized
    /// skip the checks `add` makes
    pub fn validate(&self) -> CalcResult<()> {
        self.rules.iter().try_for_each(StepUpRule::validate)
    }

    pub fn remove(&mut self, index: usize) -> Option<StepUpRule> {
        if index < self.rules.len() {
            Some(self.rules.remove(index))
        } else {
            None
        }
    }

    /// Stretch the rule that currently ends last so it reaches `term_years`
    pub fn extend_to(&mut self, term_years: u32) {
        if let Some(last) = self.rules.iter_mut().max_by_key(|rule| rule.to_year) {
            if last.to_year < term_years {
                last.to_year = term_years;
            }
        }
    }

    /// Step-up percentage for `year`, if any rule covers it
    pub fn applicable_percent(&self, year: u32) -> Option<f64> {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.covers(year))
            .map(|rule| rule.increase_percent)
    }

    /// Monthly contribution for years 0..=term_years
    pub fn schedule(&self, base_monthly: f64, term_years: u32) -> Vec<ContributionStep> {
        let mut steps = Vec::with_capacity(term_years as usize + 1);
        let mut monthly = base_monthly;
        steps.push(ContributionStep {
            year: 0,
            step_up_percent: 0.0,
            monthly,
        });

        for year in 1..=term_years {
            let percent = self.applicable_percent(year).unwrap_or(0.0);
            monthly *= 1.0 + percent / 100.0;
            steps.push(ContributionStep {
                year,
                step_up_percent: percent,
                monthly,
            });
        }
        steps
    }

    /// Total contributed across the years covered by rule `index`
    pub fn rule_total(&self, base_monthly: f64, index: usize) -> Option<f64> {
        let rule = self.rules.get(index)?;
        let schedule = self.schedule(base_monthly, rule.to_year);
        let total = schedule
            .iter()
            .filter(|step| rule.covers(step.year))
            .map(|step| step.monthly * 12.0)
            .sum();
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_add_truncates_earlier_rule() {
        let mut plan = StepUpPlan::new();
        plan.add(2, 10.0, 10).unwrap();
        plan.add(5, 5.0, 10).unwrap();

        assert_eq!(
            plan.rules(),
            &[StepUpRule::new(2, 4, 10.0), StepUpRule::new(5, 10, 5.0)]
        );
    }

    #[test]
    fn test_add_replaces_same_start_and_supersedes_later() {
        let mut plan = StepUpPlan::new();
        plan.add(3, 10.0, 10).unwrap();
        plan.add(6, 8.0, 10).unwrap();
        plan.add(3, 12.5, 10).unwrap();

        assert_eq!(plan.rules(), &[StepUpRule::new(3, 10, 12.5)]);

        plan.add(2, 4.0, 10).unwrap();
        assert_eq!(plan.rules(), &[StepUpRule::new(2, 10, 4.0)]);
    }

    #[test]
    fn test_add_validation() {
        let mut plan = StepUpPlan::new();
        assert!(plan.add(0, 10.0, 10).is_err());
        assert!(plan.add(11, 10.0, 10).is_err());
        assert!(plan.add(2, 0.0, 10).is_err());
        assert!(plan.add(2, f64::INFINITY, 10).is_err());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_validate_raw_rules() {
        assert!(StepUpPlan::new().validate().is_ok());
        assert!(StepUpPlan::from_rules(vec![StepUpRule::new(1, 10, 10.0)]).validate().is_ok());

        for rule in [
            StepUpRule::new(2, 10, f64::NAN),
            StepUpRule::new(2, 10, 0.0),
            StepUpRule::new(0, 10, 5.0),
            StepUpRule::new(6, 5, 5.0),
        ] {
            let plan = StepUpPlan::from_rules(vec![StepUpRule::new(1, 1, 5.0), rule]);
            assert!(matches!(plan.validate(), Err(CalcError::InvalidInput(_))));
        }

        let json = r#"{"rules":[{"from_year":0,"to_year":4,"increase_percent":10.0}]}"#;
        let plan: StepUpPlan = serde_json::from_str(json).unwrap();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_overlapping_raw_rules_resolve_to_last() {
        let plan = StepUpPlan::from_rules(vec![
            StepUpRule::new(1, 10, 10.0),
            StepUpRule::new(4, 6, 2.5),
        ]);
        assert_eq!(plan.applicable_percent(3), Some(10.0));
        assert_eq!(plan.applicable_percent(5), Some(2.5));
        assert_eq!(plan.applicable_percent(7), Some(10.0));
        assert_eq!(plan.applicable_percent(11), None);
    }

    #[test]
    fn test_schedule_compounds() {
        let mut plan = StepUpPlan::new();
        plan.add(2, 10.0, 4).unwrap();

        let steps = plan.schedule(1000.0, 4);
        let monthly: Vec<f64> = steps.iter().map(|s| s.monthly).collect();
        assert_eq!(steps.len(), 5);
        assert_abs_diff_eq!(monthly[0], 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(monthly[1], 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(monthly[2], 1100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(monthly[3], 1210.0, epsilon = 1e-9);
        assert_abs_diff_eq!(monthly[4], 1331.0, epsilon = 1e-9);
        assert_eq!(steps[1].step_up_percent, 0.0);
        assert_eq!(steps[2].step_up_percent, 10.0);
    }

    #[test]
    fn test_extend_and_remove() {
        let mut plan = StepUpPlan::new();
        plan.add(2, 10.0, 5).unwrap();
        plan.add(4, 5.0, 5).unwrap();

        plan.extend_to(8);
        assert_eq!(plan.rules()[1], StepUpRule::new(4, 8, 5.0));
        assert_eq!(plan.rules()[0].to_year, 3);

        plan.extend_to(6);
        assert_eq!(plan.rules()[1].to_year, 8);

        assert_eq!(plan.remove(0), Some(StepUpRule::new(2, 3, 10.0)));
        assert_eq!(plan.remove(5), None);
        assert_eq!(plan.rules().len(), 1);
    }

    #[test]
    fn test_rule_total() {
        let mut plan = StepUpPlan::new();
        plan.add(2, 10.0, 3).unwrap();

        // Years 2 and 3 at 1,100 and 1,210 per month
        let total = plan.rule_total(1000.0, 0).unwrap();
        assert_abs_diff_eq!(total, (1100.0 + 1210.0) * 12.0, epsilon = 1e-6);
        assert!(plan.rule_total(1000.0, 3).is_none());
    }
}
