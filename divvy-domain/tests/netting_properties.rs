use std::collections::HashSet;

use divvy_domain::{
    Expense, LedgerNetter, MemberId, Money, NetPositions, SettlementSimplifier, Transfer,
    net_positions,
};
use proptest::prelude::*;

fn build_expenses(
    member_count: usize,
    amounts: &[i64],
    payer_indexes: &[usize],
    participant_masks: &[usize],
) -> Vec<Expense> {
    let count = amounts
        .len()
        .min(payer_indexes.len())
        .min(participant_masks.len());

    let mut expenses = Vec::with_capacity(count);
    for idx in 0..count {
        let payer = MemberId((payer_indexes[idx] % member_count) as u64 + 1);
        let mask = participant_masks[idx] & ((1 << member_count) - 1);
        let mut participants: Vec<MemberId> = (0..member_count)
            .filter(|bit| mask & (1 << bit) != 0)
            .map(|bit| MemberId(bit as u64 + 1))
            .collect();
        if participants.is_empty() {
            participants.push(payer);
        }

        expenses.push(
            Expense::try_new(Money::new(amounts[idx], 2), payer, participants)
                .expect("generated expense is valid"),
        );
    }
    expenses
}

fn replay_transfers(transfers: &[Transfer]) -> NetPositions {
    let mut positions = NetPositions::default();
    for transfer in transfers {
        *positions.entry(transfer.from).or_insert(Money::ZERO) -= transfer.amount;
        *positions.entry(transfer.to).or_insert(Money::ZERO) += transfer.amount;
    }
    positions
}

proptest! {
    #[test]
    fn emitted_balances_net_to_zero(
        member_count in 2usize..=6,
        amounts in prop::collection::vec(1i64..=100_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=30),
        participant_masks in prop::collection::vec(1usize..=63, 0..=30),
    ) {
        let expenses = build_expenses(member_count, &amounts, &payer_indexes, &participant_masks);
        let balances = LedgerNetter.compute_balances(&expenses);

        let total: Money = net_positions(&balances).values().sum();
        prop_assert!(total.is_zero());
    }

    #[test]
    fn at_most_one_balance_per_pair(
        member_count in 2usize..=6,
        amounts in prop::collection::vec(1i64..=100_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=30),
        participant_masks in prop::collection::vec(1usize..=63, 0..=30),
    ) {
        let expenses = build_expenses(member_count, &amounts, &payer_indexes, &participant_masks);
        let balances = LedgerNetter.compute_balances(&expenses);

        let mut pairs = HashSet::new();
        for balance in &balances {
            prop_assert!(balance.amount.signum() > 0);
            prop_assert!(!balance.amount.is_settled());
            prop_assert_ne!(balance.debtor, balance.creditor);

            let pair = if balance.debtor < balance.creditor {
                (balance.debtor, balance.creditor)
            } else {
                (balance.creditor, balance.debtor)
            };
            prop_assert!(pairs.insert(pair), "duplicate balance for pair {:?}", pair);
        }
    }

    #[test]
    fn recomputation_is_deterministic(
        member_count in 2usize..=6,
        amounts in prop::collection::vec(1i64..=100_000, 0..=20),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=20),
        participant_masks in prop::collection::vec(1usize..=63, 0..=20),
    ) {
        let expenses = build_expenses(member_count, &amounts, &payer_indexes, &participant_masks);

        let first = LedgerNetter.compute_balances(&expenses);
        let second = LedgerNetter.compute_balances(&expenses);
        prop_assert_eq!(&first, &second);

        let first_plan = SettlementSimplifier.simplify(&first).expect("balanced input");
        let second_plan = SettlementSimplifier.simplify(&second).expect("balanced input");
        prop_assert_eq!(first_plan, second_plan);
    }

    #[test]
    fn transfers_settle_net_positions(
        member_count in 2usize..=6,
        amounts in prop::collection::vec(1i64..=100_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=30),
        participant_masks in prop::collection::vec(1usize..=63, 0..=30),
    ) {
        let expenses = build_expenses(member_count, &amounts, &payer_indexes, &participant_masks);
        let balances = LedgerNetter.compute_balances(&expenses);
        let positions = net_positions(&balances);

        let transfers = SettlementSimplifier.simplify(&balances).expect("balanced input");

        for transfer in &transfers {
            prop_assert!(transfer.amount.signum() > 0);
            prop_assert_ne!(transfer.from, transfer.to);
        }

        let creditor_count = positions
            .values()
            .filter(|net| !net.is_settled() && net.signum() > 0)
            .count();
        let debtor_count = positions
            .values()
            .filter(|net| !net.is_settled() && net.signum() < 0)
            .count();
        if creditor_count > 0 {
            prop_assert!(transfers.len() <= creditor_count + debtor_count - 1);
        } else {
            prop_assert!(transfers.is_empty());
        }

        // Replaying the plan against a zeroed ledger reproduces every net
        // position within tolerance.
        let replayed = replay_transfers(&transfers);
        for (person, net) in &positions {
            let actual = replayed.get(person).copied().unwrap_or(Money::ZERO);
            prop_assert!(
                (*net - actual).is_settled(),
                "net position mismatch for {}: expected {}, replayed {}",
                person,
                net,
                actual
            );
        }
    }
}
