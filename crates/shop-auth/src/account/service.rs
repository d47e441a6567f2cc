//! Account service: hashing on create, listing, rename and removal.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use shop_core::error::AppError;
use shop_database::UserStore;
use shop_entity::user::{NewUser, ShippingAddress, User, UserFilter, UserRole};

use crate::password::PasswordHasher;

/// Input for creating an account with a plaintext password.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Role name; must be `user` or `admin`.
    pub role: String,
    pub shipping_address: ShippingAddress,
}

/// Raw listing parameters as received from the client.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub search: Option<String>,
    /// `YYYY-MM-DD`, inclusive from midnight UTC.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, inclusive up to midnight UTC.
    pub end_date: Option<String>,
}

impl UserListQuery {
    /// Converts to a store filter. Unparsable dates are dropped.
    pub fn to_filter(&self) -> UserFilter {
        UserFilter {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            created_from: self.start_date.as_deref().and_then(parse_day),
            created_to: self.end_date.as_deref().and_then(parse_day),
        }
    }
}

fn parse_day(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
}

/// Administers accounts on top of the user store.
#[derive(Clone)]
pub struct AccountService {
    hasher: Arc<PasswordHasher>,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

impl AccountService {
    pub fn new(hasher: Arc<PasswordHasher>, users: Arc<dyn UserStore>) -> Self {
        Self { hasher, users }
    }

    /// Creates an account, hashing the password before it is stored.
    pub async fn create_user(&self, account: NewAccount) -> Result<User, AppError> {
        let role: UserRole = account.role.parse()?;
        let email = account.email.trim().to_string();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already in use"));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = account.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))??;

        let user = self
            .users
            .insert(NewUser {
                name: account.name,
                email,
                password_hash,
                role,
                shipping_address: account.shipping_address,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Lists accounts matching `query`, oldest first.
    pub async fn list_users(&self, query: &UserListQuery) -> Result<Vec<User>, AppError> {
        let filter = query.to_filter();
        let users = self.users.list(&filter).await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Renames an account.
    pub async fn update_name(&self, id: Uuid, name: &str) -> Result<(), AppError> {
        if !self.users.update_name(id, name).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %id, "User renamed");
        Ok(())
    }

    /// Deletes an account.
    pub async fn remove_user(&self, id: Uuid) -> Result<(), AppError> {
        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
