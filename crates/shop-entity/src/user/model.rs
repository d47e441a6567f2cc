//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::address::ShippingAddress;
use super::role::UserRole;

/// A registered shop account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email, unique across accounts.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
    /// The one session token currently considered valid for this user.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// Delivery address.
    pub shipping_address: Json<ShippingAddress>,
}

impl User {
    /// Whether `token` is bit-for-bit the stored authoritative token.
    pub fn holds_token(&self, token: &str) -> bool {
        self.token.as_deref() == Some(token)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    pub role: UserRole,
    pub shipping_address: ShippingAddress,
}

impl NewUser {
    /// Materialize the row with a fresh id and creation time.
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            token: None,
            created_at: now,
            shipping_address: Json(self.shipping_address),
        }
    }
}

/// Listing filter for the admin user search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring matched against email or name.
    pub search: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub created_to: Option<DateTime<Utc>>,
}

impl UserFilter {
    /// Evaluate the filter against a single user.
    pub fn matches(&self, user: &User) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !user.email.to_lowercase().contains(&needle)
                && !user.name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(from) = self.created_from {
            if user.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.created_to {
            if user.created_at > to {
                return false;
            }
        }
        true
    }
}
