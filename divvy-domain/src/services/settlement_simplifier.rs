//! Greedy min-cash-flow settlement planning.
//!
//! Pairwise balances are folded into one signed net position per person, then
//! creditors and debtors are matched with two cursors: each step transfers the
//! smaller of the two outstanding amounts and advances whichever side drops
//! within tolerance. The plan is zero-sum-equivalent to the input balances but
//! is a heuristic, not a provably minimal transaction count.

use thiserror::Error;

use crate::model::{MemberId, Money, NetPositions, PairwiseBalance, Transfer};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimplifyError {
    #[error("net positions must sum to zero within tolerance (found {0})")]
    ImbalancedTotal(Money),
}

/// Folds pairwise balances into one signed net position per person,
/// in first-seen order.
pub fn net_positions(balances: &[PairwiseBalance]) -> NetPositions {
    let mut positions = NetPositions::default();
    for balance in balances {
        *positions.entry(balance.debtor).or_insert(Money::ZERO) -= balance.amount;
        *positions.entry(balance.creditor).or_insert(Money::ZERO) += balance.amount;
    }
    positions
}

/// Derives a settlement plan that zeroes every person's net position.
pub struct SettlementSimplifier;

impl SettlementSimplifier {
    pub fn simplify(&self, balances: &[PairwiseBalance]) -> Result<Vec<Transfer>, SimplifyError> {
        self.simplify_positions(&net_positions(balances))
    }

    /// Plans transfers directly from a net-position vector.
    ///
    /// Positions that do not sum to zero within tolerance signal a defect in
    /// whatever produced them and are rejected, never silently truncated.
    pub fn simplify_positions(
        &self,
        positions: &NetPositions,
    ) -> Result<Vec<Transfer>, SimplifyError> {
        let total: Money = positions.values().sum();
        if !total.is_settled() {
            tracing::error!(
                reject_reason = "imbalanced_net_positions",
                person_count = positions.len(),
                total = %total,
                "Settlement simplification rejected due to non-zero net-position total"
            );
            return Err(SimplifyError::ImbalancedTotal(total));
        }

        let mut creditors: Vec<(MemberId, Money)> = Vec::new();
        let mut debtors: Vec<(MemberId, Money)> = Vec::new();
        for (&person, &net) in positions {
            if net.is_settled() {
                continue;
            }
            if net.signum() > 0 {
                creditors.push((person, net));
            } else {
                debtors.push((person, net.abs()));
            }
        }

        let mut transfers = Vec::new();
        let mut creditor_idx = 0;
        let mut debtor_idx = 0;

        while creditor_idx < creditors.len() && debtor_idx < debtors.len() {
            let amount = creditors[creditor_idx].1.min(debtors[debtor_idx].1);

            transfers.push(Transfer {
                from: debtors[debtor_idx].0,
                to: creditors[creditor_idx].0,
                amount,
            });

            creditors[creditor_idx].1 -= amount;
            debtors[debtor_idx].1 -= amount;

            if creditors[creditor_idx].1.is_settled() {
                creditor_idx += 1;
            }
            if debtors[debtor_idx].1.is_settled() {
                debtor_idx += 1;
            }
        }

        Ok(transfers)
    }
}
