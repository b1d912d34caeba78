//! Demo dataset definitions for database seeding.
//!
//! The dataset is fixed: four categories, one demo identity, and ten sample
//! positions with synthetic single-entry transaction histories.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::positions::{NewPosition, TransactionKind, TransactionRecord};
use crate::users::NewUser;

/// Username of the seeded demo identity.
pub const DEMO_USERNAME: &str = "demo";

/// A category definition in the seed dataset.
#[derive(Debug, Clone, Copy)]
pub struct SeedCategory {
    pub name: &'static str,
    pub slug: &'static str,
}

/// A sample position definition in the seed dataset.
#[derive(Debug, Clone)]
pub struct SeedPosition {
    pub name: &'static str,
    pub category_slug: &'static str,
    pub quantity: Decimal,
    pub cost_basis: Decimal,
    pub market_value: Decimal,
    pub transaction_log: Vec<TransactionRecord>,
}

impl SeedPosition {
    /// Builds the create input for this sample position.
    pub fn to_new_position(&self, user_id: &str, category_id: Option<String>) -> NewPosition {
        NewPosition {
            user_id: user_id.to_string(),
            category_id,
            name: self.name.to_string(),
            quantity: Some(self.quantity),
            cost_basis: Some(self.cost_basis),
            market_value: Some(self.market_value),
            transaction_log: self.transaction_log.clone(),
        }
    }
}

/// Counts of rows created by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories_created: usize,
    pub users_created: usize,
    pub positions_created: usize,
}

/// The seeded category set.
pub fn demo_categories() -> Vec<SeedCategory> {
    vec![
        SeedCategory { name: "Cryptocurrency", slug: "crypto" },
        SeedCategory { name: "Stocks", slug: "stocks" },
        SeedCategory { name: "Bonds", slug: "bonds" },
        SeedCategory { name: "Real Estate", slug: "real-estate" },
    ]
}

/// The seeded demo identity.
pub fn demo_user() -> NewUser {
    NewUser {
        username: DEMO_USERNAME.to_string(),
        email: "demo@example.com".to_string(),
        first_name: "Demo".to_string(),
        last_name: "User".to_string(),
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid")
}

fn buy(quantity: Decimal, price: Decimal, date: NaiveDate) -> TransactionRecord {
    TransactionRecord {
        kind: TransactionKind::Buy,
        quantity,
        price,
        date,
    }
}

/// The ten sample positions.
pub fn demo_positions() -> Vec<SeedPosition> {
    vec![
        SeedPosition {
            name: "Bitcoin",
            category_slug: "crypto",
            quantity: dec!(0.40),
            cost_basis: dec!(15000.00),
            market_value: dec!(37500.00),
            transaction_log: vec![buy(dec!(0.40), dec!(37500.00), seed_date(2025, 6, 15))],
        },
        SeedPosition {
            name: "Ethereum",
            category_slug: "crypto",
            quantity: dec!(5.00),
            cost_basis: dec!(11250.00),
            market_value: dec!(17250.00),
            transaction_log: vec![buy(dec!(5.00), dec!(2250.00), seed_date(2025, 7, 10))],
        },
        SeedPosition {
            name: "Cardano",
            category_slug: "crypto",
            quantity: dec!(1500.00),
            cost_basis: dec!(750.00),
            market_value: dec!(1425.00),
            transaction_log: vec![buy(dec!(1500.00), dec!(0.50), seed_date(2025, 8, 20))],
        },
        SeedPosition {
            name: "Apple Inc.",
            category_slug: "stocks",
            quantity: dec!(50.00),
            cost_basis: dec!(7500.00),
            market_value: dec!(9787.50),
            transaction_log: vec![buy(dec!(50.00), dec!(150.00), seed_date(2024, 3, 1))],
        },
        SeedPosition {
            name: "Microsoft Corporation",
            category_slug: "stocks",
            quantity: dec!(30.00),
            cost_basis: dec!(9300.00),
            market_value: dec!(13065.00),
            transaction_log: vec![buy(dec!(30.00), dec!(310.00), seed_date(2024, 5, 10))],
        },
        SeedPosition {
            name: "Tesla Inc.",
            category_slug: "stocks",
            quantity: dec!(20.00),
            cost_basis: dec!(4900.00),
            market_value: dec!(5706.00),
            transaction_log: vec![buy(dec!(20.00), dec!(245.00), seed_date(2024, 7, 15))],
        },
        SeedPosition {
            name: "Alphabet Inc.",
            category_slug: "stocks",
            quantity: dec!(15.00),
            cost_basis: dec!(2100.00),
            market_value: dec!(2736.00),
            transaction_log: vec![buy(dec!(15.00), dec!(140.00), seed_date(2024, 9, 22))],
        },
        SeedPosition {
            name: "US Treasury Bond 10Y",
            category_slug: "bonds",
            quantity: dec!(10000.00),
            cost_basis: dec!(10000.00),
            market_value: dec!(10200.00),
            transaction_log: vec![buy(dec!(10000.00), dec!(1.00), seed_date(2024, 1, 15))],
        },
        SeedPosition {
            name: "IBM Corporate Bond",
            category_slug: "bonds",
            quantity: dec!(5000.00),
            cost_basis: dec!(5000.00),
            market_value: dec!(4900.00),
            transaction_log: vec![buy(dec!(5000.00), dec!(1.00), seed_date(2024, 2, 28))],
        },
        SeedPosition {
            name: "Realty Income Corp REITs",
            category_slug: "real-estate",
            quantity: dec!(200.00),
            cost_basis: dec!(13100.00),
            market_value: dec!(15840.00),
            transaction_log: vec![buy(dec!(200.00), dec!(65.50), seed_date(2024, 4, 10))],
        },
    ]
}
