//! Position domain models.
//!
//! A position is one user's holding in one named instrument: quantity held,
//! cost basis, current market value, and an append-only transaction log.
//! The write path never persists an impossible economic state: candidate
//! values are normalized (not rejected) before every save.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

/// Kind of a ledger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Buy,
    Sell,
}

/// One buy/sell event in a position's transaction log.
///
/// The log is stored as an opaque JSON array blob, not normalized into its
/// own table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub kind: TransactionKind,
    pub quantity: Decimal,
    pub price: Decimal,
    pub date: NaiveDate,
}

impl TransactionRecord {
    /// Validates a transaction record before it is applied to a position.
    pub fn validate(&self) -> Result<()> {
        if self.quantity <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Transaction quantity must be positive".to_string(),
            )));
        }
        if self.price < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Transaction price cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// A clamp applied by write-path normalization.
///
/// Normalization is silent and total: every input maps to a valid state and
/// no error is ever raised. These warnings give callers visibility into when
/// clamping rewrote their input.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizationWarning {
    /// Quantity was zero or negative; quantity, cost basis and market value
    /// were all reset to zero.
    NonPositiveQuantity { quantity: Decimal },
    /// Cost basis was negative and was reset to zero.
    NegativeCostBasis { cost_basis: Decimal },
}

impl fmt::Display for NormalizationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationWarning::NonPositiveQuantity { quantity } => write!(
                f,
                "non-positive quantity {} cleared the position to an empty state",
                quantity
            ),
            NormalizationWarning::NegativeCostBasis { cost_basis } => {
                write!(f, "negative cost basis {} was clamped to zero", cost_basis)
            }
        }
    }
}

/// Normalizes a candidate valuation triple into a persistable state.
///
/// Unset fields default to zero. A fully liquidated position (quantity <= 0)
/// carries no residual value, and cost basis is never negative. Returns the
/// normalized triple together with the clamps that were applied.
pub fn normalize_valuation(
    quantity: Option<Decimal>,
    cost_basis: Option<Decimal>,
    market_value: Option<Decimal>,
) -> (Decimal, Decimal, Decimal, Vec<NormalizationWarning>) {
    let mut quantity = quantity.unwrap_or(Decimal::ZERO);
    let mut cost_basis = cost_basis.unwrap_or(Decimal::ZERO);
    let mut market_value = market_value.unwrap_or(Decimal::ZERO);
    let mut warnings = Vec::new();

    if quantity <= Decimal::ZERO {
        let had_residual = !quantity.is_zero()
            || !cost_basis.is_zero()
            || !market_value.is_zero();
        if had_residual {
            warnings.push(NormalizationWarning::NonPositiveQuantity { quantity });
        }
        quantity = Decimal::ZERO;
        cost_basis = Decimal::ZERO;
        market_value = Decimal::ZERO;
    } else if cost_basis < Decimal::ZERO {
        warnings.push(NormalizationWarning::NegativeCostBasis { cost_basis });
        cost_basis = Decimal::ZERO;
    }

    (quantity, cost_basis, market_value, warnings)
}

/// Domain model representing a position: one user's holding in one named
/// instrument.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    /// Instrument name, unique per (user, name, category).
    pub name: String,
    /// Random 15-letter identifier, globally unique across positions.
    pub slug: String,
    /// Units currently held. Never negative once persisted.
    pub quantity: Decimal,
    /// Total USD spent to acquire the current holding. Never negative.
    pub cost_basis: Decimal,
    /// Current USD value of the holding.
    pub market_value: Decimal,
    /// Append-only buy/sell history.
    pub transaction_log: Vec<TransactionRecord>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Position {
    /// Total amount invested in this position.
    pub fn total_invested(&self) -> Decimal {
        self.cost_basis
    }

    /// Current market value in USD.
    pub fn current_value(&self) -> Decimal {
        self.market_value
    }

    /// Gain or loss in USD. May be negative.
    pub fn gain_loss(&self) -> Decimal {
        self.current_value() - self.total_invested()
    }

    /// Gain or loss as a percentage of the amount invested.
    ///
    /// Returns zero when nothing has been invested, regardless of market
    /// value.
    pub fn gain_loss_percentage(&self) -> Decimal {
        let invested = self.total_invested();
        if invested.is_zero() {
            return Decimal::ZERO;
        }
        self.gain_loss() / invested * Decimal::ONE_HUNDRED
    }

    /// Re-applies the write-path normalization to the current state.
    pub fn normalize(&mut self) -> Vec<NormalizationWarning> {
        let (quantity, cost_basis, market_value, warnings) = normalize_valuation(
            Some(self.quantity),
            Some(self.cost_basis),
            Some(self.market_value),
        );
        self.quantity = quantity;
        self.cost_basis = cost_basis;
        self.market_value = market_value;
        warnings
    }

    /// Appends a transaction to the log and adjusts the running state.
    ///
    /// A buy increases quantity and cost basis; a sell decreases quantity and
    /// reduces cost basis in proportion to the fraction of the holding sold.
    /// The result is normalized, so selling the whole holding (or more)
    /// collapses the position to the clean empty state.
    pub fn apply_transaction(&mut self, record: TransactionRecord) -> Vec<NormalizationWarning> {
        match record.kind {
            TransactionKind::Buy => {
                self.quantity += record.quantity;
                self.cost_basis += record.quantity * record.price;
            }
            TransactionKind::Sell => {
                if self.quantity > Decimal::ZERO {
                    let fraction = (record.quantity / self.quantity).min(Decimal::ONE);
                    self.cost_basis -= self.cost_basis * fraction;
                }
                self.quantity -= record.quantity;
            }
        }
        self.transaction_log.push(record);
        self.normalize()
    }
}

/// Input model for creating a new position.
///
/// Numeric fields may be left unset; they default to zero on the write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub user_id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub quantity: Option<Decimal>,
    pub cost_basis: Option<Decimal>,
    pub market_value: Option<Decimal>,
    #[serde(default)]
    pub transaction_log: Vec<TransactionRecord>,
}

impl NewPosition {
    /// Validates the new position data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Position name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// Normalizes the candidate valuation fields.
    pub fn normalized_valuation(&self) -> (Decimal, Decimal, Decimal, Vec<NormalizationWarning>) {
        normalize_valuation(self.quantity, self.cost_basis, self.market_value)
    }
}

/// Input model for updating a position's valuation state.
///
/// Mirrors the save-time semantics of the write path: an unset field is
/// treated as zero, not as "keep the current value".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    pub id: String,
    pub quantity: Option<Decimal>,
    pub cost_basis: Option<Decimal>,
    pub market_value: Option<Decimal>,
}

impl PositionUpdate {
    /// Validates the update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        Ok(())
    }

    /// Normalizes the candidate valuation fields.
    pub fn normalized_valuation(&self) -> (Decimal, Decimal, Decimal, Vec<NormalizationWarning>) {
        normalize_valuation(self.quantity, self.cost_basis, self.market_value)
    }
}
