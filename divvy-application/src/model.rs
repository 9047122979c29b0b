use chrono::{DateTime, Utc};
use divvy_domain::{Expense, MemberId, Money};
use uuid::Uuid;

/// A person known to the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// Caller-supplied input for recording an expense.
///
/// The ledger stamps the id and date and validates the split before anything
/// is stored.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub paid_by: MemberId,
    pub split_between: Vec<MemberId>,
    pub category: String,
    pub group_id: Option<Uuid>,
}

/// A stored expense: the validated domain expense plus its bookkeeping
/// metadata. The split itself is only reachable through the wrapped
/// [`Expense`], so stored records stay valid by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub group_id: Option<Uuid>,
    expense: Expense,
}

impl ExpenseRecord {
    pub(crate) fn new(
        id: Uuid,
        description: String,
        date: DateTime<Utc>,
        category: String,
        group_id: Option<Uuid>,
        expense: Expense,
    ) -> Self {
        Self {
            id,
            description,
            date,
            category,
            group_id,
            expense,
        }
    }

    pub fn expense(&self) -> &Expense {
        &self.expense
    }

    pub fn amount(&self) -> Money {
        self.expense.amount()
    }

    pub fn paid_by(&self) -> MemberId {
        self.expense.payer()
    }

    pub fn split_between(&self) -> &[MemberId] {
        self.expense.participants()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<MemberId>,
    pub created_at: DateTime<Utc>,
}

/// A settlement payment the group has recorded as made (or pending).
///
/// Bookkeeping only: balances always derive from the expense list, so a
/// recorded settlement never feeds the netter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementRecord {
    pub id: Uuid,
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub settled: bool,
}
