//! Database model for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use tradehub_core::users::{NewUser, User};

/// Database model for users
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
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            username: db.username,
            email: db.email,
            first_name: db.first_name,
            last_name: db.last_name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            username: domain.username,
            email: domain.email,
            first_name: domain.first_name,
            last_name: domain.last_name,
            created_at: now,
            updated_at: now,
        }
    }
}
