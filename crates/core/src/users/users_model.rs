//! User domain models.
//!
//! Identity management (credentials, sessions) lives outside this system;
//! positions only hold a foreign reference to a user row, and the seeder
//! needs to create and remove the demo identity.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

/// Domain model representing a user the portfolio belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Unique login name.
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    /// Validates the new user data.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Username cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
