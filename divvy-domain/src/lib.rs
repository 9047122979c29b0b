#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Expense, ExpenseError, MemberId, Money, NetPositions, PairwiseBalance, Transfer,
};
pub use services::{LedgerNetter, SettlementSimplifier, SimplifyError, net_positions};
