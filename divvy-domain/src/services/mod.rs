pub mod ledger_netter;
pub mod settlement_simplifier;

pub use ledger_netter::LedgerNetter;
pub use settlement_simplifier::{SettlementSimplifier, SimplifyError, net_positions};
