//! Balance aggregator: folds the full event history into one net balance per
//! member.
//!
//! Sign convention (fixed by the classification below): positive = the member
//! is owed money, negative = the member owes money. Folding rules:
//!
//! - expense: the payer is credited the full total, every participant is
//!   debited their share (a payer who also participates nets the two).
//! - collection: the contributor is credited, the collector is debited. A
//!   collection is a settlement paid "to the pool", with the collector
//!   standing in for the pool, which keeps the member balances zero-sum.
//! - settlement: the payer is credited, the payee is debited (the payment
//!   cancels exactly this much mutual debt).
//!
//! The aggregator never partially applies an event set: the whole snapshot is
//! validated before any folding happens, so a bad event yields an error and
//! no output. The fold itself is checked as well; a balance leaving the i64
//! range is reported as an error, never a panic.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{Collection, Expense, LedgerError, Member, MoneyCents, ResultLedger, Settlement};

/// Net balance per member, keyed by member id.
///
/// `BTreeMap` so iteration order is stable; downstream tie-breaks and test
/// output depend on it.
pub type MemberBalances = BTreeMap<Uuid, MoneyCents>;

/// Classification of a net balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceStatus {
    Owed,
    Owes,
    Settled,
}

impl BalanceStatus {
    /// Classifies a net amount. Settled means exactly zero, never near-zero.
    #[must_use]
    pub fn of(amount: MoneyCents) -> Self {
        if amount.is_positive() {
            Self::Owed
        } else if amount.is_negative() {
            Self::Owes
        } else {
            Self::Settled
        }
    }
}

/// Folds every event for a group into a net balance per member.
///
/// Members with no events are reported with a zero balance. Over a closed
/// group the balances always sum to zero: every credit folded here has a
/// matching debit.
pub fn compute_balances(
    members: &[Member],
    expenses: &[Expense],
    collections: &[Collection],
    settlements: &[Settlement],
) -> ResultLedger<MemberBalances> {
    let mut balances: MemberBalances = members
        .iter()
        .map(|member| (member.id, MoneyCents::ZERO))
        .collect();

    // Validate the whole snapshot before touching any balance, so the output
    // is all-or-nothing.
    for expense in expenses {
        if !expense.total.is_positive() {
            return Err(LedgerError::NegativeAmount(format!(
                "expense {} total must be positive, got {}",
                expense.id, expense.total
            )));
        }
        if expense.shares.is_empty() {
            return Err(LedgerError::NoParticipants(format!(
                "expense {} has no shares",
                expense.id
            )));
        }
        ensure_known(&balances, expense.payer_id)?;
        let mut share_sum = MoneyCents::ZERO;
        for share in &expense.shares {
            if share.amount.is_negative() {
                return Err(LedgerError::NegativeAmount(format!(
                    "expense {} has a negative share for member {}",
                    expense.id, share.member_id
                )));
            }
            ensure_known(&balances, share.member_id)?;
            share_sum = share_sum.checked_add(share.amount).ok_or_else(|| {
                LedgerError::NegativeAmount(format!(
                    "expense {} share amounts overflow when summed",
                    expense.id
                ))
            })?;
        }
        if share_sum != expense.total {
            return Err(LedgerError::SplitMismatch(format!(
                "expense {} shares sum to {share_sum}, total is {}",
                expense.id, expense.total
            )));
        }
    }
    for collection in collections {
        if !collection.amount.is_positive() {
            return Err(LedgerError::NegativeAmount(format!(
                "collection {} amount must be positive, got {}",
                collection.id, collection.amount
            )));
        }
        ensure_known(&balances, collection.contributor_id)?;
        ensure_known(&balances, collection.collector_id)?;
    }
    for settlement in settlements {
        if !settlement.amount.is_positive() {
            return Err(LedgerError::NegativeAmount(format!(
                "settlement {} amount must be positive, got {}",
                settlement.id, settlement.amount
            )));
        }
        ensure_known(&balances, settlement.from_member_id)?;
        ensure_known(&balances, settlement.to_member_id)?;
    }

    for expense in expenses {
        credit(&mut balances, expense.payer_id, expense.total)?;
        for share in &expense.shares {
            debit(&mut balances, share.member_id, share.amount)?;
        }
    }
    for collection in collections {
        credit(&mut balances, collection.contributor_id, collection.amount)?;
        debit(&mut balances, collection.collector_id, collection.amount)?;
    }
    for settlement in settlements {
        credit(&mut balances, settlement.from_member_id, settlement.amount)?;
        debit(&mut balances, settlement.to_member_id, settlement.amount)?;
    }

    debug_assert!(
        balances
            .values()
            .map(|balance| i128::from(balance.cents()))
            .sum::<i128>()
            == 0,
        "balance conservation violated"
    );
    Ok(balances)
}

fn ensure_known(balances: &MemberBalances, member_id: Uuid) -> ResultLedger<()> {
    if balances.contains_key(&member_id) {
        Ok(())
    } else {
        Err(LedgerError::UnknownMember(member_id.to_string()))
    }
}

fn credit(balances: &mut MemberBalances, member_id: Uuid, amount: MoneyCents) -> ResultLedger<()> {
    if let Some(balance) = balances.get_mut(&member_id) {
        *balance = balance.checked_add(amount).ok_or_else(|| {
            LedgerError::NegativeAmount(format!("balance overflow for member {member_id}"))
        })?;
    }
    Ok(())
}

fn debit(balances: &mut MemberBalances, member_id: Uuid, amount: MoneyCents) -> ResultLedger<()> {
    if let Some(balance) = balances.get_mut(&member_id) {
        *balance = balance.checked_sub(amount).ok_or_else(|| {
            LedgerError::NegativeAmount(format!("balance overflow for member {member_id}"))
        })?;
    }
    Ok(())
}
