//! Manual debt adjustments and the hotel running-account ledger
//!
//! Hotel customers are billed as running accounts: every order, payment, and
//! manual correction is mirrored into a ledger entry carrying the cumulative
//! balance at that point. Replaying a customer's entries in creation order
//! must reproduce their current pending amount; that invariant is what the
//! integrity checker verifies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AdjustmentId, CustomerId, LedgerEntryId, Money};

/// A manual correction to a customer's running balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtAdjustment {
    /// Unique identifier
    pub id: AdjustmentId,
    /// Customer being corrected
    pub customer_id: CustomerId,
    /// Signed amount: positive increases the debt, negative reduces it
    pub amount: Money,
    /// Why the correction was made
    pub reason: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl DebtAdjustment {
    pub fn new(customer_id: CustomerId, amount: Money, reason: impl Into<String>) -> Self {
        Self {
            id: AdjustmentId::new_v7(),
            customer_id,
            amount,
            reason: reason.into(),
            created_at: Utc::now(),
        }
    }
}

/// What produced a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryKind {
    /// An order charged to the account (positive amount)
    Order,
    /// A payment received (negative amount)
    Payment,
    /// A manual correction (signed)
    Adjustment,
}

/// One line of a customer's running-account ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: LedgerEntryId,
    /// Owning customer
    pub customer_id: CustomerId,
    /// Source event
    pub kind: LedgerEntryKind,
    /// Signed delta: charges positive, payments negative
    pub amount: Money,
    /// Human-readable description
    pub description: String,
    /// Cumulative balance including this entry
    pub running_balance: Money,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Creates the next entry after `previous_balance`
    pub fn next(
        previous_balance: Money,
        customer_id: CustomerId,
        kind: LedgerEntryKind,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: LedgerEntryId::new_v7(),
            customer_id,
            kind,
            amount,
            description: description.into(),
            running_balance: previous_balance + amount,
            created_at: Utc::now(),
        }
    }
}

/// Replays entries in creation order and returns the final balance
///
/// Entries are sorted by `created_at` (id as deterministic tie-break) before
/// summing, so callers may pass them in any order.
pub fn replay(entries: &[LedgerEntry]) -> Money {
    let mut sorted: Vec<&LedgerEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    sorted.iter().map(|e| e.amount).sum()
}

/// Checks that every stored running balance matches the replayed cumulative sum
pub fn running_balances_consistent(entries: &[LedgerEntry]) -> bool {
    let mut sorted: Vec<&LedgerEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let mut balance = Money::zero();
    for entry in sorted {
        balance = balance + entry.amount;
        if entry.running_balance != balance {
            return false;
        }
    }
    true
}

/// Re-derives the running balance column in creation order
///
/// Used after administrative edits that bypass the normal append path.
pub fn rebuild_running_balances(entries: &mut [LedgerEntry]) {
    entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let mut balance = Money::zero();
    for entry in entries.iter_mut() {
        balance = balance + entry.amount;
        entry.running_balance = balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn charge(customer_id: CustomerId, previous: Money, amount: Money) -> LedgerEntry {
        LedgerEntry::next(previous, customer_id, LedgerEntryKind::Order, amount, "order")
    }

    #[test]
    fn test_running_balance_accumulates() {
        let customer_id = CustomerId::new();
        let first = charge(customer_id, Money::zero(), Money::new(dec!(600)));
        assert_eq!(first.running_balance.amount(), dec!(600));

        let second = LedgerEntry::next(
            first.running_balance,
            customer_id,
            LedgerEntryKind::Payment,
            -Money::new(dec!(250)),
            "payment",
        );
        assert_eq!(second.running_balance.amount(), dec!(350));

        let entries = vec![first, second];
        assert_eq!(replay(&entries).amount(), dec!(350));
        assert!(running_balances_consistent(&entries));
    }

    #[test]
    fn test_replay_is_order_insensitive() {
        let customer_id = CustomerId::new();
        let a = charge(customer_id, Money::zero(), Money::new(dec!(100)));
        let b = LedgerEntry::next(
            a.running_balance,
            customer_id,
            LedgerEntryKind::Adjustment,
            -Money::new(dec!(40)),
            "correction",
        );
        let shuffled = vec![b.clone(), a.clone()];
        assert_eq!(replay(&shuffled).amount(), dec!(60));
    }

    #[test]
    fn test_rebuild_repairs_corrupted_balances() {
        let customer_id = CustomerId::new();
        let a = charge(customer_id, Money::zero(), Money::new(dec!(100)));
        let mut b = LedgerEntry::next(
            a.running_balance,
            customer_id,
            LedgerEntryKind::Payment,
            -Money::new(dec!(30)),
            "payment",
        );
        // Simulate drift from a partial failure
        b.running_balance = Money::new(dec!(999));

        let mut entries = vec![a, b];
        assert!(!running_balances_consistent(&entries));

        rebuild_running_balances(&mut entries);
        assert!(running_balances_consistent(&entries));
        assert_eq!(entries.last().unwrap().running_balance.amount(), dec!(70));
    }
}
