//! Database model for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use tradehub_core::categories::{Category, NewCategory};

/// Database model for categories
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
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            slug: db.slug,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl CategoryDB {
    /// Builds an insertable row from the create input and its resolved slug.
    pub fn from_new(domain: NewCategory, resolved_slug: String) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            name: domain.name,
            slug: resolved_slug,
            created_at: now,
            updated_at: now,
        }
    }
}
