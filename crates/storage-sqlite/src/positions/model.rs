//! Database model for positions.
//!
//! Quantities and monetary values are stored as TEXT and surfaced as
//! `rust_decimal::Decimal`; the transaction log is an opaque JSON array
//! blob. Decoding is tolerant: a corrupt stored value is logged and read as
//! empty/zero rather than failing the whole row.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use tradehub_core::errors::Result;
use tradehub_core::positions::{NewPosition, Position, TransactionRecord};

/// Parses a stored decimal column, falling back to zero on corrupt data.
pub fn parse_stored_decimal(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(decimal) => decimal,
        Err(err) => {
            log::error!(
                "Failed to parse stored {} '{}': {}. Falling back to zero.",
                field_name,
                value,
                err
            );
            Decimal::ZERO
        }
    }
}

/// Parses a stored transaction-log blob, falling back to an empty log on
/// corrupt data.
pub fn parse_stored_log(value: Option<&str>) -> Vec<TransactionRecord> {
    match value {
        None => Vec::new(),
        Some(raw) => match serde_json::from_str(raw) {
            Ok(log) => log,
            Err(err) => {
                log::error!(
                    "Failed to parse stored transaction log '{}': {}. Falling back to empty.",
                    raw,
                    err
                );
                Vec::new()
            }
        },
    }
}

/// Encodes a transaction log for storage. An empty log is stored as NULL.
pub fn encode_log(log: &[TransactionRecord]) -> Result<Option<String>> {
    if log.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(log)?))
}

/// Database model for positions
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionDB {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub quantity: String,
    pub cost_basis: String,
    pub market_value: String,
    pub transaction_log: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<PositionDB> for Position {
    fn from(db: PositionDB) -> Self {
        Self {
            quantity: parse_stored_decimal(&db.quantity, "quantity"),
            cost_basis: parse_stored_decimal(&db.cost_basis, "cost_basis"),
            market_value: parse_stored_decimal(&db.market_value, "market_value"),
            transaction_log: parse_stored_log(db.transaction_log.as_deref()),
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            name: db.name,
            slug: db.slug,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl PositionDB {
    /// Builds an insertable row from the create input and its assigned slug.
    ///
    /// The valuation triple is normalized here, so the persisted state never
    /// represents an impossible economic condition.
    pub fn from_new(domain: NewPosition, slug: String) -> Result<Self> {
        let (quantity, cost_basis, market_value, _) = domain.normalized_valuation();
        let now = chrono::Utc::now().naive_utc();
        Ok(Self {
            id: String::new(), // assigned by the repository
            user_id: domain.user_id,
            category_id: domain.category_id,
            name: domain.name,
            slug,
            quantity: quantity.to_string(),
            cost_basis: cost_basis.to_string(),
            market_value: market_value.to_string(),
            transaction_log: encode_log(&domain.transaction_log)?,
            created_at: now,
            updated_at: now,
        })
    }
}
