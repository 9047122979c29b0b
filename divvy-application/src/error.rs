use divvy_domain::{ExpenseError, MemberId, Money};
use thiserror::Error;
use uuid::Uuid;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("expense amount must be positive (found {0})")]
    NonPositiveAmount(Money),
    #[error("expense must be split between at least one member")]
    EmptySplit,
    #[error("member {0} appears more than once in the split")]
    DuplicateSplitMember(MemberId),
    #[error("unknown member {0}")]
    UnknownMember(MemberId),
    #[error("unknown expense {0}")]
    UnknownExpense(Uuid),
    #[error("unknown group {0}")]
    UnknownGroup(Uuid),
    #[error("unknown settlement {0}")]
    UnknownSettlement(Uuid),
    #[error("group must have at least one member")]
    EmptyGroup,
}

impl From<ExpenseError> for LedgerError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::NonPositiveAmount(amount) => LedgerError::NonPositiveAmount(amount),
            ExpenseError::EmptyParticipants => LedgerError::EmptySplit,
            ExpenseError::DuplicateParticipant(member) => LedgerError::DuplicateSplitMember(member),
        }
    }
}
