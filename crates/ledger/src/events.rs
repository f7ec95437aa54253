//! Monetary events recorded against a group.
//!
//! Events are immutable once created; the only mutation the surrounding
//! system performs is deletion, and aggregates are always recomputed from the
//! full remaining event set afterwards.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{LedgerError, MoneyCents, ResultLedger};

/// One participant's portion of a single expense.
///
/// `percent_bp` is only set for percentage splits and records the requested
/// fraction in hundredths of a percent (10_000 = 100%).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Share {
    pub member_id: Uuid,
    pub amount: MoneyCents,
    pub percent_bp: Option<i64>,
}

/// A shared expense paid by one member and split across participants.
///
/// Invariant: the share amounts sum exactly to `total`; [`Expense::new`]
/// rejects anything else, so a stored expense can always be folded without
/// rounding leakage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub payer_id: Uuid,
    pub total: MoneyCents,
    pub shares: Vec<Share>,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        payer_id: Uuid,
        total: MoneyCents,
        shares: Vec<Share>,
        note: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> ResultLedger<Self> {
        if !total.is_positive() {
            return Err(LedgerError::NegativeAmount(format!(
                "expense total must be positive, got {total}"
            )));
        }
        if shares.is_empty() {
            return Err(LedgerError::NoParticipants(
                "expense has no shares".to_string(),
            ));
        }
        if shares.iter().any(|share| share.amount.is_negative()) {
            return Err(LedgerError::NegativeAmount(
                "share amounts must not be negative".to_string(),
            ));
        }
        let share_sum = MoneyCents::checked_sum(shares.iter().map(|share| share.amount))
            .ok_or_else(|| {
                LedgerError::NegativeAmount("share amounts overflow when summed".to_string())
            })?;
        if share_sum != total {
            return Err(LedgerError::SplitMismatch(format!(
                "shares sum to {share_sum}, expense total is {total}"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            payer_id,
            total,
            shares,
            note,
            occurred_at,
        })
    }
}

/// A contribution paid into the shared pool, not tied to any expense.
///
/// The contributor hands `amount` to the collector, who holds it on behalf of
/// the pool. In balance terms this works exactly like a settlement paid to
/// the collector; see the aggregator for the folding rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    pub id: Uuid,
    pub contributor_id: Uuid,
    pub collector_id: Uuid,
    pub amount: MoneyCents,
    pub occurred_at: DateTime<Utc>,
}

impl Collection {
    pub fn new(
        contributor_id: Uuid,
        collector_id: Uuid,
        amount: MoneyCents,
        occurred_at: DateTime<Utc>,
    ) -> ResultLedger<Self> {
        if !amount.is_positive() {
            return Err(LedgerError::NegativeAmount(format!(
                "collection amount must be positive, got {amount}"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            contributor_id,
            collector_id,
            amount,
            occurred_at,
        })
    }
}

/// A direct payment from one member to another.
///
/// Settlements are the only event kind that reduces outstanding balance
/// without creating new shared cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub id: Uuid,
    pub from_member_id: Uuid,
    pub to_member_id: Uuid,
    pub amount: MoneyCents,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl Settlement {
    pub fn new(
        from_member_id: Uuid,
        to_member_id: Uuid,
        amount: MoneyCents,
        note: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> ResultLedger<Self> {
        if !amount.is_positive() {
            return Err(LedgerError::NegativeAmount(format!(
                "settlement amount must be positive, got {amount}"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            from_member_id,
            to_member_id,
            amount,
            note,
            occurred_at,
        })
    }
}
