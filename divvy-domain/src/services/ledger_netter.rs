use indexmap::IndexMap;

use crate::model::{Expense, MemberId, Money, PairwiseBalance};

/// Accumulation key for one unordered pair of people.
///
/// The two ids are stored sorted, so claims in either direction land on the
/// same entry and at most one balance can survive per pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PairKey {
    low: MemberId,
    high: MemberId,
}

impl PairKey {
    fn new(a: MemberId, b: MemberId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

/// Nets the expense ledger into directed pairwise balances.
pub struct LedgerNetter;

impl LedgerNetter {
    /// Computes the net pairwise balances for a snapshot of the expense list.
    ///
    /// Every participant who is not the payer owes the payer one even share
    /// of the amount; claims between the same two people accumulate into a
    /// single signed total, so a later expense where the previous debtor is
    /// the payer reduces or reverses the earlier claim. Pairs whose net is
    /// within tolerance emit nothing.
    ///
    /// Output order is the first-seen order of pairs, which is deterministic
    /// for a fixed input.
    pub fn compute_balances(&self, expenses: &[Expense]) -> Vec<PairwiseBalance> {
        // Positive totals mean `low` owes `high`.
        let mut pair_totals: IndexMap<PairKey, Money> = IndexMap::new();

        for expense in expenses {
            let share = expense.participant_share();
            for &participant in expense.participants() {
                if participant == expense.payer() {
                    continue;
                }
                let key = PairKey::new(participant, expense.payer());
                let total = pair_totals.entry(key).or_insert(Money::ZERO);
                if key.low == participant {
                    *total += share;
                } else {
                    *total -= share;
                }
            }
        }

        pair_totals
            .into_iter()
            .filter(|(_, net)| !net.is_settled())
            .map(|(key, net)| {
                if net.signum() > 0 {
                    PairwiseBalance {
                        debtor: key.low,
                        creditor: key.high,
                        amount: net,
                    }
                } else {
                    PairwiseBalance {
                        debtor: key.high,
                        creditor: key.low,
                        amount: -net,
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn netter() -> LedgerNetter {
        LedgerNetter
    }

    fn money(value: &str) -> Money {
        Money::from_decimal(value.parse().expect("valid decimal literal"))
    }

    fn expenses(cases: &[(&str, u64, &[u64])]) -> Vec<Expense> {
        cases
            .iter()
            .map(|&(amount, payer, participants)| {
                Expense::try_new(
                    money(amount),
                    MemberId(payer),
                    participants.iter().copied().map(MemberId).collect(),
                )
                .expect("valid test expense")
            })
            .collect()
    }

    #[rstest]
    #[case::single_expense_even_split(
        &[("120", 1, &[1, 2, 3][..])],
        &[(2, 1, "40"), (3, 1, "40")]
    )]
    #[case::payer_outside_split(
        &[("30", 1, &[2][..])],
        &[(2, 1, "30")]
    )]
    #[case::payer_is_sole_participant(
        &[("30", 1, &[1][..])],
        &[]
    )]
    #[case::self_cancellation(
        &[("30", 1, &[1, 2][..]), ("30", 2, &[1, 2][..])],
        &[]
    )]
    #[case::reversal_flips_direction(
        &[("10", 1, &[2][..]), ("25", 2, &[1][..])],
        &[(1, 2, "15")]
    )]
    #[case::same_pair_accumulates(
        &[("10", 1, &[2][..]), ("20", 1, &[2][..])],
        &[(2, 1, "30")]
    )]
    #[case::net_at_tolerance_dropped(
        &[("0.01", 1, &[2][..])],
        &[]
    )]
    fn netting_cases(
        netter: LedgerNetter,
        #[case] cases: &[(&str, u64, &[u64])],
        #[case] expected: &[(u64, u64, &str)],
    ) {
        let balances = netter.compute_balances(&expenses(cases));

        let expected: Vec<PairwiseBalance> = expected
            .iter()
            .map(|&(debtor, creditor, amount)| PairwiseBalance {
                debtor: MemberId(debtor),
                creditor: MemberId(creditor),
                amount: money(amount),
            })
            .collect();
        assert_eq!(balances, expected);
    }

    #[rstest]
    fn pair_order_is_first_seen(netter: LedgerNetter) {
        let ledger = expenses(&[
            ("85", 3, &[1, 2, 3, 4][..]),
            ("120", 1, &[1, 2, 3][..]),
        ]);

        let balances = netter.compute_balances(&ledger);
        let pairs: Vec<(MemberId, MemberId)> = balances
            .iter()
            .map(|balance| (balance.debtor, balance.creditor))
            .collect();

        // Pairs {1,3}, {2,3}, {3,4} appear with the first expense, {1,2}
        // only with the second.
        assert_eq!(
            pairs,
            vec![
                (MemberId(3), MemberId(1)),
                (MemberId(2), MemberId(3)),
                (MemberId(4), MemberId(3)),
                (MemberId(2), MemberId(1)),
            ]
        );
    }
}
