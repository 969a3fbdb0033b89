//! Balance netting and greedy settlement
//!
//! A member's balance is what they paid minus what they owe. Creditors
//! and debtors are each sorted by size, then the largest debtor pays the
//! largest creditor until one side reaches zero. Every non-zero balance
//! takes part, however small, so sub-paisa debts still reach their
//! creditor. This yields at most
//! `members - 1` transfers and keeps the total at zero throughout.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::model::{Balance, Expense, Member, Settlement};
use crate::config::DEFAULT_CURRENCY;
use crate::error::{CalcError, CalcResult};

/// Amounts within a paisa/cent of zero count as settled
pub const SPLIT_TOLERANCE: f64 = 0.01;

/// Floating-point noise floor when pairing debtors with creditors
const SETTLE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Netting {
    /// One entry per member, in member order
    pub balances: Vec<Balance>,
    pub settlements: Vec<Settlement>,
}

/// Net balances and settlements, in the default currency
pub fn net_balances(members: &[Member], expenses: &[Expense]) -> CalcResult<Netting> {
    net_balances_in(members, expenses, DEFAULT_CURRENCY)
}

pub fn net_balances_in(members: &[Member], expenses: &[Expense], currency: &str) -> CalcResult<Netting> {
    let balances = member_balances(members, expenses, currency)?;
    let settlements = settle(&balances);
    Ok(Netting { balances, settlements })
}

/// Paid-minus-owed for every member; every expense is validated first
pub fn member_balances(members: &[Member], expenses: &[Expense], currency: &str) -> CalcResult<Vec<Balance>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(members.len());
    for (i, member) in members.iter().enumerate() {
        if index.insert(member.id.as_str(), i).is_some() {
            return Err(CalcError::DuplicateMember(member.id.clone()));
        }
    }

    let mut amounts = vec![0.0_f64; members.len()];
    for expense in expenses {
        expense.validate(members)?;

        amounts[index[expense.paid_by.as_str()]] += expense.amount;
        for split in &expense.splits {
            amounts[index[split.member_id.as_str()]] -= split.amount;
        }
    }

    Ok(members
        .iter()
        .zip(amounts)
        .map(|(member, amount)| Balance {
            member_id: member.id.clone(),
            amount,
            currency: currency.to_string(),
        })
        .collect())
}

/// Greedy settlement of `balances`: largest debtor pays largest creditor
pub fn settle(balances: &[Balance]) -> Vec<Settlement> {
    let mut creditors: Vec<(&str, f64)> = balances
        .iter()
        .filter(|b| b.amount > SETTLE_EPSILON)
        .map(|b| (b.member_id.as_str(), b.amount))
        .collect();
    let mut debtors: Vec<(&str, f64)> = balances
        .iter()
        .filter(|b| b.amount < -SETTLE_EPSILON)
        .map(|b| (b.member_id.as_str(), -b.amount))
        .collect();

    // Stable sorts keep member order among equal amounts
    creditors.sort_by(|a, b| b.1.total_cmp(&a.1));
    debtors.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut settlements = Vec::with_capacity(creditors.len() + debtors.len());
    let (mut i, mut j) = (0, 0);

    while i < creditors.len() && j < debtors.len() {
        let amount = creditors[i].1.min(debtors[j].1);

        settlements.push(Settlement {
            from: debtors[j].0.to_string(),
            to: creditors[i].0.to_string(),
            amount,
        });

        creditors[i].1 -= amount;
        debtors[j].1 -= amount;

        if creditors[i].1 <= SETTLE_EPSILON {
            i += 1;
        }
        if debtors[j].1 <= SETTLE_EPSILON {
            j += 1;
        }
    }

    log::debug!("Settled {} balances with {} transfers", balances.len(), settlements.len());
    settlements
}
