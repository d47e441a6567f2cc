//! Storage traits consumed by the auth core and the account service.

use async_trait::async_trait;
use uuid::Uuid;

use shop_core::result::AppResult;
use shop_entity::user::{NewUser, User, UserFilter};

/// The slice of the account store the session layer depends on.
///
/// `set_token` records the one authoritative token for a user. Whatever
/// was stored before is overwritten, which is what supersedes an older
/// session.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email, case-insensitively.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Replace the authoritative token of `id`. `NotFound` if the user is gone.
    async fn set_token(&self, id: Uuid, token: &str) -> AppResult<()>;
}

/// Administrative CRUD over user accounts.
#[async_trait]
pub trait UserStore: AccountStore {
    /// Insert a new user. `Conflict` if the email is already taken.
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// List users matching `filter`, oldest first.
    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>>;

    /// Rename a user. Returns `false` if no such user exists.
    async fn update_name(&self, id: Uuid, name: &str) -> AppResult<bool>;

    /// Delete a user. Returns `false` if no such user exists.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
