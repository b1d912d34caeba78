//! Category domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

/// Derives a URL-safe slug from a display name.
///
/// Lowercases the input and joins alphanumeric runs with single hyphens, so
/// "Real Estate" becomes "real-estate" and "US Treasury Bond 10Y" becomes
/// "us-treasury-bond-10y".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Domain model representing an asset category.
///
/// Categories are a flat lookup table (Cryptocurrency, Stocks, Bonds, ...).
/// Deleting a category cascades to the positions filed under it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// URL-safe identifier, unique across all categories.
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    /// Explicit slug; derived from `name` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl NewCategory {
    /// Validates the new category data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category name cannot be empty".to_string(),
            )));
        }
        if let Some(slug) = &self.slug {
            if slug.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Category slug cannot be empty when provided".to_string(),
                )));
            }
        }
        Ok(())
    }

    /// Returns the slug to persist: the explicit one, or one derived from the
    /// name.
    pub fn resolved_slug(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => slugify(&self.name),
        }
    }
}
