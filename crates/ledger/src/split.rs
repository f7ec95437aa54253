//! Split calculator: turns one expense total into per-participant shares.
//!
//! All three policies guarantee `sum(shares) == total` exactly, in minor
//! units. Whenever rounding produces a remainder it is redistributed one
//! minor unit at a time over the participants in list order, so the output is
//! fully determined by the input.

use uuid::Uuid;

use crate::{LedgerError, MoneyCents, ResultLedger, Share};

/// Fixed-point percentage scale: hundredths of a percent (10_000 = 100%).
pub const PERCENT_SCALE: i64 = 10_000;

/// Tolerance on the percentage sum, in hundredths of a percent.
///
/// Percentages are entered as decimal fractions, so entries like
/// 33.33 / 33.33 / 33.33 must be accepted even though they sum to 99.99.
pub const PERCENT_TOLERANCE_BP: i64 = 1;

/// How an expense total is divided across its participants.
///
/// `Unequal` and `Percentage` carry one entry per participant, in the same
/// order as the participant list passed to [`compute_split`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitPolicy {
    Equal,
    Unequal(Vec<MoneyCents>),
    Percentage(Vec<i64>),
}

/// Computes the per-participant shares for one expense.
///
/// The output is side-effect-free and deterministic: the same inputs always
/// produce the same shares, including the remainder assignment order.
pub fn compute_split(
    total: MoneyCents,
    policy: &SplitPolicy,
    participants: &[Uuid],
) -> ResultLedger<Vec<Share>> {
    if participants.is_empty() {
        return Err(LedgerError::NoParticipants(
            "split requested over an empty participant set".to_string(),
        ));
    }
    if !total.is_positive() {
        return Err(LedgerError::NegativeAmount(format!(
            "expense total must be positive, got {total}"
        )));
    }
    for (i, member_id) in participants.iter().enumerate() {
        if participants[..i].contains(member_id) {
            return Err(LedgerError::SplitMismatch(format!(
                "duplicate participant {member_id}"
            )));
        }
    }

    match policy {
        SplitPolicy::Equal => Ok(split_equal(total, participants)),
        SplitPolicy::Unequal(amounts) => split_unequal(total, participants, amounts),
        SplitPolicy::Percentage(percents) => split_percentage(total, participants, percents),
    }
}

fn split_equal(total: MoneyCents, participants: &[Uuid]) -> Vec<Share> {
    let count = participants.len() as i64;
    let base = total.cents() / count;
    let remainder = total.cents() % count;

    // The first `remainder` participants in list order carry one extra unit.
    participants
        .iter()
        .enumerate()
        .map(|(i, member_id)| Share {
            member_id: *member_id,
            amount: MoneyCents::new(base + i64::from((i as i64) < remainder)),
            percent_bp: None,
        })
        .collect()
}

fn split_unequal(
    total: MoneyCents,
    participants: &[Uuid],
    amounts: &[MoneyCents],
) -> ResultLedger<Vec<Share>> {
    if amounts.len() != participants.len() {
        return Err(LedgerError::SplitMismatch(format!(
            "{} amounts supplied for {} participants",
            amounts.len(),
            participants.len()
        )));
    }
    if amounts.iter().any(|amount| amount.is_negative()) {
        return Err(LedgerError::NegativeAmount(
            "share amounts must not be negative".to_string(),
        ));
    }
    let sum = MoneyCents::checked_sum(amounts.iter().copied()).ok_or_else(|| {
        LedgerError::NegativeAmount("share amounts overflow when summed".to_string())
    })?;
    if sum != total {
        return Err(LedgerError::SplitMismatch(format!(
            "amounts sum to {sum}, expense total is {total}"
        )));
    }

    Ok(participants
        .iter()
        .zip(amounts)
        .map(|(member_id, amount)| Share {
            member_id: *member_id,
            amount: *amount,
            percent_bp: None,
        })
        .collect())
}

fn split_percentage(
    total: MoneyCents,
    participants: &[Uuid],
    percents: &[i64],
) -> ResultLedger<Vec<Share>> {
    if percents.len() != participants.len() {
        return Err(LedgerError::PercentageMismatch(format!(
            "{} percentages supplied for {} participants",
            percents.len(),
            participants.len()
        )));
    }
    if percents.iter().any(|pct| *pct < 0) {
        return Err(LedgerError::NegativeAmount(
            "percentages must not be negative".to_string(),
        ));
    }
    // i128 so absurdly large entries fail the tolerance check instead of
    // overflowing the sum.
    let pct_sum: i128 = percents.iter().map(|pct| i128::from(*pct)).sum();
    if (pct_sum - i128::from(PERCENT_SCALE)).abs() > i128::from(PERCENT_TOLERANCE_BP) {
        return Err(LedgerError::PercentageMismatch(format!(
            "percentages sum to {pct_sum} bp, expected {PERCENT_SCALE} bp"
        )));
    }

    // round(total * pct / 100), half away from zero; everything is
    // non-negative here so this is plain half-up in i128.
    let mut shares = Vec::with_capacity(participants.len());
    for (member_id, pct) in participants.iter().zip(percents) {
        let rounded =
            (i128::from(total.cents()) * i128::from(*pct) + i128::from(PERCENT_SCALE) / 2)
                / i128::from(PERCENT_SCALE);
        let amount = i64::try_from(rounded).map_err(|_| {
            LedgerError::NegativeAmount(format!(
                "share amount out of range for member {member_id}"
            ))
        })?;
        shares.push(Share {
            member_id: *member_id,
            amount: MoneyCents::new(amount),
            percent_bp: Some(*pct),
        });
    }

    reconcile_remainder(total, &mut shares);
    Ok(shares)
}

/// Adjusts rounded shares one minor unit at a time, in list order, until they
/// sum exactly to `total`. Shares already at zero are never pushed negative.
fn reconcile_remainder(total: MoneyCents, shares: &mut [Share]) {
    // The interim sum can exceed `i64` range even when every share fits, so
    // the difference is tracked in i128.
    let sum: i128 = shares
        .iter()
        .map(|share| i128::from(share.amount.cents()))
        .sum();
    let mut diff = i128::from(total.cents()) - sum;
    let step = MoneyCents::new(diff.signum() as i64);

    let mut i = 0;
    while diff != 0 {
        let share = &mut shares[i % shares.len()];
        if !(step.is_negative() && share.amount.is_zero()) {
            share.amount += step;
            diff -= i128::from(step.cents());
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(count: usize) -> Vec<Uuid> {
        (0..count).map(|_| Uuid::new_v4()).collect()
    }

    fn amounts(shares: &[Share]) -> Vec<i64> {
        shares.iter().map(|share| share.amount.cents()).collect()
    }

    #[test]
    fn equal_split_assigns_remainder_in_list_order() {
        let participants = members(3);
        let shares =
            compute_split(MoneyCents::new(100_00), &SplitPolicy::Equal, &participants).unwrap();

        assert_eq!(amounts(&shares), vec![33_34, 33_33, 33_33]);
        assert_eq!(
            shares.iter().map(|s| s.amount).sum::<MoneyCents>(),
            MoneyCents::new(100_00)
        );
    }

    #[test]
    fn equal_split_spread_is_at_most_one_minor_unit() {
        for total in [1, 7, 99, 100, 101, 12_345] {
            let participants = members(4);
            let shares =
                compute_split(MoneyCents::new(total), &SplitPolicy::Equal, &participants).unwrap();
            let cents = amounts(&shares);
            let max = cents.iter().max().unwrap();
            let min = cents.iter().min().unwrap();
            assert!(max - min <= 1, "total {total} spread too wide: {cents:?}");
            assert_eq!(cents.iter().sum::<i64>(), total);
        }
    }

    #[test]
    fn unequal_split_requires_exact_sum() {
        let participants = members(2);
        let policy = SplitPolicy::Unequal(vec![MoneyCents::new(60), MoneyCents::new(30)]);
        let err = compute_split(MoneyCents::new(100), &policy, &participants).unwrap_err();
        assert!(matches!(err, LedgerError::SplitMismatch(_)));
    }

    #[test]
    fn unequal_split_keeps_supplied_amounts() {
        let participants = members(2);
        let policy = SplitPolicy::Unequal(vec![MoneyCents::new(70), MoneyCents::new(30)]);
        let shares = compute_split(MoneyCents::new(100), &policy, &participants).unwrap();
        assert_eq!(amounts(&shares), vec![70, 30]);
        assert_eq!(shares[0].member_id, participants[0]);
    }

    #[test]
    fn unequal_split_rejects_amount_sum_overflow() {
        // Each amount is valid on its own; only the sum exceeds the i64
        // range. Must come back as an error, not a panic.
        let participants = members(2);
        let policy = SplitPolicy::Unequal(vec![
            MoneyCents::new(i64::MAX),
            MoneyCents::new(i64::MAX),
        ]);
        let err = compute_split(MoneyCents::new(i64::MAX), &policy, &participants).unwrap_err();
        assert!(matches!(err, LedgerError::NegativeAmount(_)));
    }

    #[test]
    fn unequal_split_allows_zero_shares() {
        let participants = members(2);
        let policy = SplitPolicy::Unequal(vec![MoneyCents::new(100), MoneyCents::ZERO]);
        let shares = compute_split(MoneyCents::new(100), &policy, &participants).unwrap();
        assert_eq!(amounts(&shares), vec![100, 0]);
    }

    #[test]
    fn percentage_split_matches_requested_fractions() {
        let participants = members(2);
        let policy = SplitPolicy::Percentage(vec![33_33, 66_67]);
        let shares = compute_split(MoneyCents::new(100_00), &policy, &participants).unwrap();
        assert_eq!(amounts(&shares), vec![33_33, 66_67]);
        assert_eq!(shares[0].percent_bp, Some(33_33));
    }

    #[test]
    fn percentage_split_reconciles_rounding_remainder() {
        // 33.33% of 1.01 rounds to 0.34 three times: 1.02 in total, one unit
        // over. The first participant gives the unit back.
        let participants = members(3);
        let policy = SplitPolicy::Percentage(vec![33_33, 33_33, 33_33]);
        let shares = compute_split(MoneyCents::new(101), &policy, &participants).unwrap();
        assert_eq!(amounts(&shares).iter().sum::<i64>(), 101);
        assert_eq!(amounts(&shares), vec![33, 34, 34]);
    }

    #[test]
    fn percentage_split_accepts_one_bp_tolerance() {
        let participants = members(3);
        let policy = SplitPolicy::Percentage(vec![33_33, 33_33, 33_33]);
        let shares = compute_split(MoneyCents::new(300), &policy, &participants).unwrap();
        assert_eq!(amounts(&shares).iter().sum::<i64>(), 300);
    }

    #[test]
    fn percentage_split_rejects_sum_outside_tolerance() {
        let participants = members(2);
        let policy = SplitPolicy::Percentage(vec![50_00, 49_00]);
        let err = compute_split(MoneyCents::new(100), &policy, &participants).unwrap_err();
        assert!(matches!(err, LedgerError::PercentageMismatch(_)));
    }

    #[test]
    fn percentage_split_rejects_overlarge_entries() {
        let participants = members(2);
        let policy = SplitPolicy::Percentage(vec![i64::MAX, i64::MAX]);
        let err = compute_split(MoneyCents::new(100), &policy, &participants).unwrap_err();
        assert!(matches!(err, LedgerError::PercentageMismatch(_)));
    }

    #[test]
    fn empty_participants_is_an_error_not_a_zero_split() {
        let err = compute_split(MoneyCents::new(100), &SplitPolicy::Equal, &[]).unwrap_err();
        assert!(matches!(err, LedgerError::NoParticipants(_)));
    }

    #[test]
    fn duplicate_participants_are_rejected() {
        let id = Uuid::new_v4();
        let err = compute_split(MoneyCents::new(100), &SplitPolicy::Equal, &[id, id]).unwrap_err();
        assert!(matches!(err, LedgerError::SplitMismatch(_)));
    }

    #[test]
    fn split_is_deterministic() {
        let participants = members(5);
        let policy = SplitPolicy::Percentage(vec![20_00, 20_00, 20_00, 20_00, 20_00]);
        let first = compute_split(MoneyCents::new(99_99), &policy, &participants).unwrap();
        let second = compute_split(MoneyCents::new(99_99), &policy, &participants).unwrap();
        assert_eq!(first, second);
    }
}
