//! Settlement suggestion engine: debt simplification over a balance vector.
//!
//! Greedy largest-first matching: repeatedly pair the largest remaining
//! creditor with the largest remaining debtor and settle the smaller of the
//! two amounts. This is the standard practical heuristic for minimizing the
//! transaction count in a debt-netting problem; it is not guaranteed globally
//! minimal in every theoretical case, and that trade-off is deliberate.
//!
//! Ties on the remaining amount break toward the smaller member id, so the
//! output is fully deterministic for a given balance vector.

use std::cmp::Reverse;

use uuid::Uuid;

use crate::{MemberBalances, MoneyCents};

/// One suggested point-to-point payment: `from` (a debtor) pays `to`
/// (a creditor).
///
/// Suggestions are transient. They are recomputed from the current balances
/// on every request and are never stable across ledger changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentSuggestion {
    pub from_member_id: Uuid,
    pub to_member_id: Uuid,
    pub amount: MoneyCents,
}

/// Computes the list of payments that zeroes every balance.
///
/// An all-settled balance vector yields an empty list. The suggested amounts
/// always sum to the total of the positive balances.
#[must_use]
pub fn suggest_settlements(balances: &MemberBalances) -> Vec<PaymentSuggestion> {
    debug_assert!(
        balances
            .values()
            .map(|balance| i128::from(balance.cents()))
            .sum::<i128>()
            == 0,
        "suggestions require a zero-sum balance vector"
    );

    let mut creditors: Vec<(Uuid, MoneyCents)> = Vec::new();
    let mut debtors: Vec<(Uuid, MoneyCents)> = Vec::new();
    for (member_id, balance) in balances {
        if balance.is_positive() {
            creditors.push((*member_id, *balance));
        } else if balance.is_negative() {
            debtors.push((*member_id, balance.abs()));
        }
    }

    let mut suggestions = Vec::new();
    while !creditors.is_empty() && !debtors.is_empty() {
        let creditor_idx = largest(&creditors);
        let debtor_idx = largest(&debtors);
        let settled = creditors[creditor_idx].1.min(debtors[debtor_idx].1);

        suggestions.push(PaymentSuggestion {
            from_member_id: debtors[debtor_idx].0,
            to_member_id: creditors[creditor_idx].0,
            amount: settled,
        });

        creditors[creditor_idx].1 -= settled;
        debtors[debtor_idx].1 -= settled;
        if creditors[creditor_idx].1.is_zero() {
            creditors.remove(creditor_idx);
        }
        if debtors[debtor_idx].1.is_zero() {
            debtors.remove(debtor_idx);
        }
    }

    suggestions
}

/// Index of the entry with the largest remaining amount; ties go to the
/// smaller member id.
fn largest(entries: &[(Uuid, MoneyCents)]) -> usize {
    let mut best = 0;
    for (i, entry) in entries.iter().enumerate().skip(1) {
        if (entry.1, Reverse(entry.0)) > (entries[best].1, Reverse(entries[best].0)) {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(entries: &[(Uuid, i64)]) -> MemberBalances {
        entries
            .iter()
            .map(|(id, cents)| (*id, MoneyCents::new(*cents)))
            .collect()
    }

    fn ordered_ids(count: usize) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = (0..count).map(|_| Uuid::new_v4()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn all_settled_yields_no_suggestions() {
        let ids = ordered_ids(2);
        let suggestions = suggest_settlements(&balances(&[(ids[0], 0), (ids[1], 0)]));
        assert!(suggestions.is_empty());
    }

    #[test]
    fn single_pair_yields_one_suggestion() {
        let ids = ordered_ids(2);
        let suggestions = suggest_settlements(&balances(&[(ids[0], 40_00), (ids[1], -40_00)]));

        assert_eq!(
            suggestions,
            vec![PaymentSuggestion {
                from_member_id: ids[1],
                to_member_id: ids[0],
                amount: MoneyCents::new(40_00),
            }]
        );
    }

    #[test]
    fn largest_first_matching_produces_three_payments() {
        // {A: +50, B: +30, C: -40, D: -40}: C pays A 40 (A drops to +10, so
        // B is now the largest creditor), D pays B 30, D pays A 10.
        let ids = ordered_ids(4);
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
        let suggestions = suggest_settlements(&balances(&[
            (a, 50_00),
            (b, 30_00),
            (c, -40_00),
            (d, -40_00),
        ]));

        assert_eq!(
            suggestions,
            vec![
                PaymentSuggestion {
                    from_member_id: c,
                    to_member_id: a,
                    amount: MoneyCents::new(40_00),
                },
                PaymentSuggestion {
                    from_member_id: d,
                    to_member_id: b,
                    amount: MoneyCents::new(30_00),
                },
                PaymentSuggestion {
                    from_member_id: d,
                    to_member_id: a,
                    amount: MoneyCents::new(10_00),
                },
            ]
        );
    }

    #[test]
    fn suggested_total_equals_positive_balance_total() {
        let ids = ordered_ids(5);
        let set = balances(&[
            (ids[0], 12_34),
            (ids[1], 7_66),
            (ids[2], -10_00),
            (ids[3], -5_00),
            (ids[4], -5_00),
        ]);

        let suggestions = suggest_settlements(&set);
        let suggested: MoneyCents = suggestions.iter().map(|s| s.amount).sum();
        let positive: MoneyCents = set.values().filter(|b| b.is_positive()).copied().sum();
        assert_eq!(suggested, positive);
    }

    #[test]
    fn applying_suggestions_zeroes_every_balance() {
        let ids = ordered_ids(4);
        let mut set = balances(&[
            (ids[0], 33_34),
            (ids[1], 33_33),
            (ids[2], -50_00),
            (ids[3], -16_67),
        ]);

        for suggestion in suggest_settlements(&set) {
            *set.get_mut(&suggestion.from_member_id).unwrap() += suggestion.amount;
            *set.get_mut(&suggestion.to_member_id).unwrap() -= suggestion.amount;
        }
        assert!(set.values().all(|b| b.is_zero()));
    }

    #[test]
    fn ties_break_toward_smaller_member_id() {
        let ids = ordered_ids(4);
        let suggestions = suggest_settlements(&balances(&[
            (ids[0], 25_00),
            (ids[1], 25_00),
            (ids[2], -25_00),
            (ids[3], -25_00),
        ]));

        assert_eq!(
            suggestions,
            vec![
                PaymentSuggestion {
                    from_member_id: ids[2],
                    to_member_id: ids[0],
                    amount: MoneyCents::new(25_00),
                },
                PaymentSuggestion {
                    from_member_id: ids[3],
                    to_member_id: ids[1],
                    amount: MoneyCents::new(25_00),
                },
            ]
        );
    }
}
