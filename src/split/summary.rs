//! Group spending summary

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::model::{Balance, ExpenseCategory, Group};
use crate::error::CalcResult;

/// Number of expenses listed as recent activity
pub const RECENT_EXPENSES: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub total_expenses: f64,
    pub average_expense: f64,
    pub category_breakdown: BTreeMap<ExpenseCategory, f64>,
    pub member_balances: Vec<Balance>,
    /// Ids of the most recent expenses, newest first
    pub recent_expenses: Vec<String>,
}

impl GroupSummary {
    pub fn for_group(group: &Group) -> CalcResult<Self> {
        let total_expenses: f64 = group.expenses.iter().map(|e| e.amount).sum();
        let average_expense = if group.expenses.is_empty() {
            0.0
        } else {
            total_expenses / group.expenses.len() as f64
        };

        let mut category_breakdown = BTreeMap::new();
        for expense in &group.expenses {
            *category_breakdown.entry(expense.category).or_insert(0.0) += expense.amount;
        }

        let mut recent: Vec<_> = group.expenses.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        let recent_expenses = recent
            .into_iter()
            .take(RECENT_EXPENSES)
            .map(|e| e.id.clone())
            .collect();

        Ok(Self {
            total_expenses,
            average_expense,
            category_breakdown,
            member_balances: group.net_balances()?.balances,
            recent_expenses,
        })
    }
}
