//! Group, member and expense records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::netting::{net_balances_in, Netting, SPLIT_TOLERANCE};
use crate::config::DEFAULT_CURRENCY;
use crate::error::{CalcError, CalcResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Travel,
    Shopping,
    Entertainment,
    Utilities,
    Housing,
    Transportation,
    Healthcare,
    Education,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitType {
    #[default]
    Equal,
    Percentage,
    Custom,
}

/// One member's share of an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    pub member_id: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl ExpenseSplit {
    pub fn new(member_id: impl Into<String>, amount: f64) -> Self {
        Self {
            member_id: member_id.into(),
            amount,
            percentage: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    /// Member who paid
    pub paid_by: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub category: ExpenseCategory,
    #[serde(default)]
    pub split_type: SplitType,
    pub splits: Vec<ExpenseSplit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        paid_by: impl Into<String>,
        splits: Vec<ExpenseSplit>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            date: Utc::now(),
            category: ExpenseCategory::default(),
            split_type: SplitType::default(),
            splits,
            notes: None,
        }
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_split_type(mut self, split_type: SplitType) -> Self {
        self.split_type = split_type;
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Sum of all split amounts
    pub fn split_total(&self) -> f64 {
        self.splits.iter().map(|s| s.amount).sum()
    }

    /// The share `member_id` owes for this expense (0 if not part of it)
    pub fn share_of(&self, member_id: &str) -> f64 {
        self.splits
            .iter()
            .filter(|s| s.member_id == member_id)
            .map(|s| s.amount)
            .sum()
    }

    pub fn involves(&self, member_id: &str) -> bool {
        self.paid_by == member_id || self.splits.iter().any(|s| s.member_id == member_id)
    }

    /// Check the expense is well formed and only references `members`
    pub fn validate(&self, members: &[Member]) -> CalcResult<()> {
        if self.description.trim().is_empty() {
            return Err(CalcError::invalid(format!("expense {} has no description", self.id)));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(CalcError::invalid(format!(
                "expense {} amount must be greater than 0, got {}",
                self.id, self.amount
            )));
        }
        if self.splits.is_empty() {
            return Err(CalcError::invalid(format!("expense {} has no splits", self.id)));
        }

        let is_member = |id: &str| members.iter().any(|m| m.id == id);
        if !is_member(&self.paid_by) {
            return Err(CalcError::UnknownMember(self.paid_by.clone()));
        }
        if let Some(split) = self.splits.iter().find(|s| !is_member(&s.member_id)) {
            return Err(CalcError::UnknownMember(split.member_id.clone()));
        }
        if let Some(split) = self.splits.iter().find(|s| !s.amount.is_finite() || s.amount < 0.0) {
            return Err(CalcError::invalid(format!(
                "expense {} has an invalid share {} for {}",
                self.id, split.amount, split.member_id
            )));
        }

        let total = self.split_total();
        if (total - self.amount).abs() > SPLIT_TOLERANCE {
            return Err(CalcError::SplitMismatch {
                expense_id: self.id.clone(),
                expected: self.amount,
                actual: total,
            });
        }
        Ok(())
    }
}

/// Net position of one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub member_id: String,
    /// Positive: owed money. Negative: owes money.
    pub amount: f64,
    pub currency: String,
}

/// A transfer that settles part of a debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

/// A bill-splitting group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub members: Vec<Member>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            currency: default_currency(),
            members: Vec::new(),
            expenses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn add_member(&mut self, member: Member) -> CalcResult<()> {
        if self.member(&member.id).is_some() {
            return Err(CalcError::DuplicateMember(member.id));
        }
        self.members.push(member);
        self.touch();
        Ok(())
    }

    /// Remove a member who takes no part in any expense
    pub fn remove_member(&mut self, id: &str) -> CalcResult<Member> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| CalcError::UnknownMember(id.to_string()))?;

        if let Some(expense) = self.expenses.iter().find(|e| e.involves(id)) {
            return Err(CalcError::invalid(format!(
                "member {} is part of expense {} and cannot be removed",
                id, expense.id
            )));
        }

        let removed = self.members.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Validate and record an expense
    pub fn add_expense(&mut self, expense: Expense) -> CalcResult<()> {
        if let Err(err) = expense.validate(&self.members) {
            log::warn!("Rejected expense {} in group {}: {}", expense.id, self.id, err);
            return Err(err);
        }
        if self.expenses.iter().any(|e| e.id == expense.id) {
            return Err(CalcError::invalid(format!("expense {} already exists", expense.id)));
        }
        self.expenses.push(expense);
        self.touch();
        Ok(())
    }

    pub fn remove_expense(&mut self, id: &str) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id == id)?;
        self.touch();
        Some(self.expenses.remove(index))
    }

    /// Balances and settlements in the group's currency
    pub fn net_balances(&self) -> CalcResult<Netting> {
        net_balances_in(&self.members, &self.expenses, &self.currency)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trio() -> Vec<Member> {
        vec![Member::new("a", "Asha"), Member::new("b", "Bilal"), Member::new("c", "Chen")]
    }

    fn dinner() -> Expense {
        Expense::new(
            "e1",
            "Dinner",
            300.0,
            "a",
            vec![
                ExpenseSplit::new("a", 100.0),
                ExpenseSplit::new("b", 100.0),
                ExpenseSplit::new("c", 100.0),
            ],
        )
    }

    #[test]
    fn test_valid_expense() {
        assert!(dinner().validate(&trio()).is_ok());
    }

    #[test]
    fn test_split_mismatch() {
        let mut expense = dinner();
        expense.splits[2].amount = 90.0;
        match expense.validate(&trio()) {
            Err(CalcError::SplitMismatch { expense_id, expected, actual }) => {
                assert_eq!(expense_id, "e1");
                assert_eq!(expected, 300.0);
                assert_eq!(actual, 290.0);
            }
            other => panic!("expected SplitMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_split_within_tolerance() {
        let mut expense = dinner();
        expense.splits[2].amount = 100.005;
        assert!(expense.validate(&trio()).is_ok());
    }

    #[test]
    fn test_validation_rules() {
        let members = trio();

        let mut expense = dinner();
        expense.description = "  ".to_string();
        assert!(matches!(expense.validate(&members), Err(CalcError::InvalidInput(_))));

        let mut expense = dinner();
        expense.amount = 0.0;
        assert!(matches!(expense.validate(&members), Err(CalcError::InvalidInput(_))));

        let mut expense = dinner();
        expense.splits.clear();
        assert!(matches!(expense.validate(&members), Err(CalcError::InvalidInput(_))));

        let mut expense = dinner();
        expense.paid_by = "z".to_string();
        assert!(matches!(expense.validate(&members), Err(CalcError::UnknownMember(id)) if id == "z"));

        let mut expense = dinner();
        expense.splits[1].member_id = "y".to_string();
        assert!(matches!(expense.validate(&members), Err(CalcError::UnknownMember(id)) if id == "y"));
    }

    #[test]
    fn test_group_membership() {
        let mut group = Group::new("g1", "Goa trip");
        for member in trio() {
            group.add_member(member).unwrap();
        }
        assert!(matches!(
            group.add_member(Member::new("a", "Again")),
            Err(CalcError::DuplicateMember(_))
        ));

        group.add_expense(dinner()).unwrap();
        assert!(group.remove_member("b").is_err());
        assert!(matches!(group.remove_member("nobody"), Err(CalcError::UnknownMember(_))));

        group.remove_expense("e1").unwrap();
        assert_eq!(group.remove_member("b").unwrap().name, "Bilal");
        assert_eq!(group.members.len(), 2);
    }

    #[test]
    fn test_rejected_expense_is_not_recorded() {
        let mut group = Group::new("g1", "Flat");
        for member in trio() {
            group.add_member(member).unwrap();
        }
        let mut bad = dinner();
        bad.amount = 310.0;
        assert!(group.add_expense(bad).is_err());
        assert!(group.expenses.is_empty());

        group.add_expense(dinner()).unwrap();
        assert!(group.add_expense(dinner()).is_err());
        assert_eq!(group.expenses.len(), 1);
    }

    #[test]
    fn test_share_of() {
        let expense = dinner();
        assert_eq!(expense.share_of("b"), 100.0);
        assert_eq!(expense.share_of("zed"), 0.0);
        assert!(expense.involves("a"));
        assert!(!expense.involves("zed"));
    }
}
