use std::{
    cmp::Ordering,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use fxhash::FxHashSet;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use thiserror::Error;

/// Stable, session-unique identifier of a person in the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed currency amount with exact decimal arithmetic.
///
/// Amounts within [`Money::tolerance`] of zero are treated as settled
/// everywhere balances and net positions are evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    /// `value` scaled by `10^-scale`, e.g. `Money::new(1750, 2)` is 17.50.
    pub fn new(value: i64, scale: u32) -> Self {
        Self(Decimal::new(value, scale))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Threshold below which a balance is considered settled noise.
    pub fn tolerance() -> Self {
        Self(Decimal::new(1, 2))
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Whether the amount is within tolerance of zero.
    pub fn is_settled(self) -> bool {
        self.0.abs() <= Self::tolerance().0
    }

    pub fn signum(self) -> i64 {
        match self.0.cmp(&Decimal::ZERO) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    #[error("expense amount must be positive (found {0})")]
    NonPositiveAmount(Money),
    #[error("expense must have at least one participant")]
    EmptyParticipants,
    #[error("participant {0} listed more than once")]
    DuplicateParticipant(MemberId),
}

/// One recorded expense: paid by one person, split evenly across the
/// participants. The payer may or may not be a participant.
///
/// Immutable once built; the validating constructor is the only way in, so a
/// malformed expense can never reach a computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    amount: Money,
    payer: MemberId,
    participants: Vec<MemberId>,
}

impl Expense {
    pub fn try_new(
        amount: Money,
        payer: MemberId,
        participants: Vec<MemberId>,
    ) -> Result<Self, ExpenseError> {
        if amount.signum() <= 0 {
            return Err(ExpenseError::NonPositiveAmount(amount));
        }
        if participants.is_empty() {
            return Err(ExpenseError::EmptyParticipants);
        }
        let mut seen = FxHashSet::default();
        for &participant in &participants {
            if !seen.insert(participant) {
                return Err(ExpenseError::DuplicateParticipant(participant));
            }
        }

        Ok(Self {
            amount,
            payer,
            participants,
        })
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn payer(&self) -> MemberId {
        self.payer
    }

    pub fn participants(&self) -> &[MemberId] {
        &self.participants
    }

    /// Even per-participant share of the amount.
    pub fn participant_share(&self) -> Money {
        let ways = Decimal::from(self.participants.len() as u64);
        Money::from_decimal(self.amount.as_decimal() / ways)
    }
}

/// Net directed debt between one unordered pair of people.
///
/// For any pair at most one of these exists; its direction reflects the net
/// of all historical claims between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairwiseBalance {
    pub debtor: MemberId,
    pub creditor: MemberId,
    pub amount: Money,
}

/// One instruction of a settlement plan. Computed on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

/// Signed aggregate balance per person, in first-seen order.
/// Positive means the person is owed money overall.
pub type NetPositions = IndexMap<MemberId, Money>;
