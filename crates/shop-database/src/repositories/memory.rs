//! In-memory account store backed by `dashmap`.
//!
//! Used by the development profile and by tests. Each document lives in a
//! sharded map, so concurrent readers never block each other and a write
//! only locks the shard holding that user.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use shop_core::error::AppError;
use shop_core::result::AppResult;
use shop_entity::user::{NewUser, User, UserFilter};

use crate::store::{AccountStore, UserStore};

/// Process-local user repository.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    /// Users keyed by id.
    users: DashMap<Uuid, User>,
    /// Lowercased email to user id; claims an email atomically on insert.
    emails: DashMap<String, Uuid>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the repository holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AccountStore for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let id = self.emails.get(&email_key(email)).map(|id| *id.value());
        match id {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn set_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.token = Some(token.to_string());
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let user = new_user.into_user(Utc::now());

        match self.emails.entry(email_key(&user.email)) {
            Entry::Occupied(_) => Err(AppError::conflict("Email already in use")),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                debug!(user_id = %user.id, "User inserted");
                Ok(user)
            }
        }
    }

    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }

    async fn update_name(&self, id: Uuid, name: &str) -> AppResult<bool> {
        match self.users.get_mut(&id) {
            Some(mut user) => {
                user.name = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        match self.users.remove(&id) {
            Some((_, user)) => {
                self.emails.remove(&email_key(&user.email));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::error::ErrorKind;
    use shop_entity::user::{ShippingAddress, UserRole};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: UserRole::User,
            shipping_address: ShippingAddress::default(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryUserRepository::new();
        let user = repo.insert(new_user("a@x.com")).await.unwrap();

        let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");

        let by_email = repo.find_by_email("A@X.COM").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert!(by_email.token.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = MemoryUserRepository::new();
        repo.insert(new_user("a@x.com")).await.unwrap();
        let err = repo.insert(new_user("A@x.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_set_token_overwrites() {
        let repo = MemoryUserRepository::new();
        let user = repo.insert(new_user("a@x.com")).await.unwrap();

        repo.set_token(user.id, "first").await.unwrap();
        repo.set_token(user.id, "second").await.unwrap();

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.token.as_deref(), Some("second"));

        let err = repo.set_token(Uuid::new_v4(), "x").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_releases_email() {
        let repo = MemoryUserRepository::new();
        let user = repo.insert(new_user("a@x.com")).await.unwrap();

        assert!(repo.delete(user.id).await.unwrap());
        assert!(!repo.delete(user.id).await.unwrap());
        assert!(repo.find_by_email("a@x.com").await.unwrap().is_none());
        assert!(repo.insert(new_user("a@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_name_and_list() {
        let repo = MemoryUserRepository::new();
        let user = repo.insert(new_user("a@x.com")).await.unwrap();
        repo.insert(new_user("b@y.com")).await.unwrap();

        assert!(repo.update_name(user.id, "Alice").await.unwrap());
        assert!(!repo.update_name(Uuid::new_v4(), "Nobody").await.unwrap());

        let filter = UserFilter {
            search: Some("alice".to_string()),
            ..Default::default()
        };
        let found = repo.list(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, user.id);

        let all = repo.list(&UserFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
