#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod ledger;
pub mod model;
pub mod ports;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use model::{ExpenseRecord, Group, Member, NewExpense, SettlementRecord};
pub use ports::MemberDirectory;
