//! Turning an amount and a split method into per-member shares

use serde::{Deserialize, Serialize};

use super::model::{ExpenseSplit, SplitType};
use super::netting::SPLIT_TOLERANCE;
use crate::error::{CalcError, CalcResult};

/// How an expense is divided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SplitMethod {
    /// Same share for every participant
    Equal(Vec<String>),
    /// (member, percent of the amount); percents must total 100
    Percentage(Vec<(String, f64)>),
    /// (member, exact amount); amounts must total the expense
    Custom(Vec<(String, f64)>),
}

impl SplitMethod {
    pub fn split_type(&self) -> SplitType {
        match self {
            SplitMethod::Equal(_) => SplitType::Equal,
            SplitMethod::Percentage(_) => SplitType::Percentage,
            SplitMethod::Custom(_) => SplitType::Custom,
        }
    }
}

pub fn calculate_splits(amount: f64, method: &SplitMethod) -> CalcResult<Vec<ExpenseSplit>> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CalcError::invalid(format!("amount must be greater than 0, got {}", amount)));
    }

    match method {
        SplitMethod::Equal(participants) => {
            if participants.is_empty() {
                return Err(CalcError::invalid("equal split needs at least one participant"));
            }
            let share = amount / participants.len() as f64;
            Ok(participants
                .iter()
                .map(|id| ExpenseSplit::new(id.clone(), share))
                .collect())
        }
        SplitMethod::Percentage(percentages) => {
            if percentages.is_empty() {
                return Err(CalcError::invalid("percentage split needs at least one participant"));
            }
            if let Some((id, pct)) = percentages.iter().find(|(_, p)| !p.is_finite() || *p < 0.0) {
                return Err(CalcError::invalid(format!("invalid percentage {} for {}", pct, id)));
            }
            let total: f64 = percentages.iter().map(|(_, p)| p).sum();
            if (total - 100.0).abs() > SPLIT_TOLERANCE {
                return Err(CalcError::invalid(format!(
                    "percentages must add up to 100, got {}",
                    total
                )));
            }
            Ok(percentages
                .iter()
                .map(|(id, pct)| ExpenseSplit {
                    member_id: id.clone(),
                    amount: amount * pct / 100.0,
                    percentage: Some(*pct),
                })
                .collect())
        }
        SplitMethod::Custom(amounts) => {
            if amounts.is_empty() {
                return Err(CalcError::invalid("custom split needs at least one participant"));
            }
            let splits: Vec<ExpenseSplit> = amounts
                .iter()
                .map(|(id, share)| ExpenseSplit::new(id.clone(), *share))
                .collect();
            let total: f64 = splits.iter().map(|s| s.amount).sum();
            if (total - amount).abs() > SPLIT_TOLERANCE {
                return Err(CalcError::SplitMismatch {
                    expense_id: String::new(),
                    expected: amount,
                    actual: total,
                });
            }
            Ok(splits)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_equal_split() {
        let splits = calculate_splits(100.0, &SplitMethod::Equal(ids(&["a", "b", "c"]))).unwrap();
        assert_eq!(splits.len(), 3);
        for split in &splits {
            assert_abs_diff_eq!(split.amount, 100.0 / 3.0, epsilon = 1e-12);
        }
        let total: f64 = splits.iter().map(|s| s.amount).sum();
        assert_abs_diff_eq!(total, 100.0, epsilon = 0.01);
    }

    #[test]
    fn test_percentage_split() {
        let method = SplitMethod::Percentage(vec![("a".into(), 50.0), ("b".into(), 30.0), ("c".into(), 20.0)]);
        let splits = calculate_splits(2000.0, &method).unwrap();
        assert_abs_diff_eq!(splits[0].amount, 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(splits[1].amount, 600.0, epsilon = 1e-9);
        assert_abs_diff_eq!(splits[2].amount, 400.0, epsilon = 1e-9);
        assert_eq!(splits[1].percentage, Some(30.0));
        assert_eq!(method.split_type(), SplitType::Percentage);
    }

    #[test]
    fn test_percentage_must_total_hundred() {
        let method = SplitMethod::Percentage(vec![("a".into(), 50.0), ("b".into(), 40.0)]);
        assert!(matches!(calculate_splits(100.0, &method), Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_custom_split() {
        let method = SplitMethod::Custom(vec![("a".into(), 70.0), ("b".into(), 30.0)]);
        let splits = calculate_splits(100.0, &method).unwrap();
        assert_eq!(splits[0], ExpenseSplit::new("a", 70.0));

        let short = SplitMethod::Custom(vec![("a".into(), 70.0), ("b".into(), 20.0)]);
        assert!(matches!(calculate_splits(100.0, &short), Err(CalcError::SplitMismatch { .. })));
    }

    #[test]
    fn test_rejects_empty_and_bad_amounts() {
        assert!(calculate_splits(100.0, &SplitMethod::Equal(vec![])).is_err());
        assert!(calculate_splits(0.0, &SplitMethod::Equal(ids(&["a"]))).is_err());
        assert!(calculate_splits(-5.0, &SplitMethod::Equal(ids(&["a"]))).is_err());
    }
}
