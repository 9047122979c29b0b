use chrono::Utc;
use divvy_domain::{
    Expense, LedgerNetter, MemberId, Money, PairwiseBalance, SettlementSimplifier, SimplifyError,
    Transfer,
};
use fxhash::FxHashSet;
use uuid::Uuid;

use crate::{
    error::LedgerError,
    model::{ExpenseRecord, Group, Member, NewExpense, SettlementRecord},
};

/// The expense ledger: sole owner of the recorded expenses and the
/// collaborator that rejects malformed ones before they can reach a
/// computation.
///
/// Balances and settlement plans are pure derived views, recomputed from a
/// snapshot of the expense list on every query.
#[derive(Debug, Default)]
pub struct Ledger {
    members: Vec<Member>,
    expenses: Vec<ExpenseRecord>,
    groups: Vec<Group>,
    settlements: Vec<SettlementRecord>,
    next_member_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a member and allocates their id.
    pub fn add_member(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: Option<String>,
    ) -> MemberId {
        self.next_member_id += 1;
        let id = MemberId(self.next_member_id);
        let member = Member {
            id,
            name: name.into(),
            email: email.into(),
            avatar,
        };
        tracing::debug!(member_id = %id, name = %member.name, "member registered");
        self.members.push(member);
        id
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Records an expense, rejecting precondition violations at ingestion:
    /// non-positive amount, empty or duplicated split, unknown members,
    /// unknown group.
    pub fn add_expense(&mut self, new: NewExpense) -> Result<Uuid, LedgerError> {
        let expense = Expense::try_new(new.amount, new.paid_by, new.split_between)?;

        let known: FxHashSet<MemberId> = self.members.iter().map(|member| member.id).collect();
        if !known.contains(&expense.payer()) {
            return Err(LedgerError::UnknownMember(expense.payer()));
        }
        if let Some(&unknown) = expense
            .participants()
            .iter()
            .find(|participant| !known.contains(*participant))
        {
            return Err(LedgerError::UnknownMember(unknown));
        }
        if let Some(group_id) = new.group_id
            && !self.groups.iter().any(|group| group.id == group_id)
        {
            return Err(LedgerError::UnknownGroup(group_id));
        }

        let id = Uuid::new_v4();
        let record = ExpenseRecord::new(
            id,
            new.description,
            Utc::now(),
            new.category,
            new.group_id,
            expense,
        );
        tracing::debug!(
            expense_id = %id,
            amount = %record.amount(),
            payer = %record.paid_by(),
            split_count = record.split_between().len(),
            "expense recorded"
        );
        self.expenses.push(record);
        Ok(id)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<ExpenseRecord, LedgerError> {
        let index = self
            .expenses
            .iter()
            .position(|record| record.id == id)
            .ok_or(LedgerError::UnknownExpense(id))?;
        tracing::debug!(expense_id = %id, "expense removed");
        Ok(self.expenses.remove(index))
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        members: Vec<MemberId>,
    ) -> Result<Uuid, LedgerError> {
        if members.is_empty() {
            return Err(LedgerError::EmptyGroup);
        }
        let known: FxHashSet<MemberId> = self.members.iter().map(|member| member.id).collect();
        if let Some(&unknown) = members.iter().find(|member| !known.contains(*member)) {
            return Err(LedgerError::UnknownMember(unknown));
        }

        let id = Uuid::new_v4();
        tracing::debug!(group_id = %id, member_count = members.len(), "group created");
        self.groups.push(Group {
            id,
            name: name.into(),
            members,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Records that a settlement payment was made between two members.
    ///
    /// Recorded settlements are bookkeeping only and never feed the balance
    /// computation; the expense list stays the single source of truth.
    pub fn record_settlement(
        &mut self,
        from: MemberId,
        to: MemberId,
        amount: Money,
    ) -> Result<Uuid, LedgerError> {
        if amount.signum() <= 0 {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        for member in [from, to] {
            if self.member(member).is_none() {
                return Err(LedgerError::UnknownMember(member));
            }
        }

        let id = Uuid::new_v4();
        tracing::debug!(
            settlement_id = %id,
            from = %from,
            to = %to,
            amount = %amount,
            "settlement recorded"
        );
        self.settlements.push(SettlementRecord {
            id,
            from,
            to,
            amount,
            date: Utc::now(),
            settled: false,
        });
        Ok(id)
    }

    pub fn mark_settled(&mut self, id: Uuid) -> Result<(), LedgerError> {
        let record = self
            .settlements
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(LedgerError::UnknownSettlement(id))?;
        record.settled = true;
        Ok(())
    }

    pub fn settlements(&self) -> &[SettlementRecord] {
        &self.settlements
    }

    /// Net pairwise balances derived from the current expense list.
    pub fn balances(&self) -> Vec<PairwiseBalance> {
        let snapshot: Vec<Expense> = self
            .expenses
            .iter()
            .map(|record| record.expense().clone())
            .collect();
        LedgerNetter.compute_balances(&snapshot)
    }

    /// Settlement plan that zeroes every member's net position.
    pub fn settlement_plan(&self) -> Result<Vec<Transfer>, SimplifyError> {
        SettlementSimplifier.simplify(&self.balances())
    }
}
