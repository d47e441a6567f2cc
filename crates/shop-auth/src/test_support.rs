//! Shared fixtures for unit tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use shop_core::config::AuthConfig;
use shop_core::error::AppError;
use shop_core::result::AppResult;
use shop_database::{AccountStore, MemoryUserRepository, UserStore};
use shop_entity::user::{NewUser, ShippingAddress, User, UserRole};

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::revocation::RevocationRegistry;
use crate::session::{SessionManager, SessionValidator};

pub const SECRET: &str = "unit-test-secret";

pub fn config(secret: &str) -> AuthConfig {
    AuthConfig {
        jwt_secret: secret.to_string(),
        ..AuthConfig::default()
    }
}

pub fn encoder(secret: &str) -> JwtEncoder {
    JwtEncoder::new(&config(secret)).unwrap()
}

pub struct Fixture {
    pub encoder: Arc<JwtEncoder>,
    pub decoder: Arc<JwtDecoder>,
    pub revocations: Arc<RevocationRegistry>,
    pub store: Arc<MemoryUserRepository>,
    pub hasher: Arc<PasswordHasher>,
    pub validator: SessionValidator,
    pub manager: SessionManager,
}

pub fn fixture() -> Fixture {
    let cfg = config(SECRET);
    let encoder = Arc::new(JwtEncoder::new(&cfg).unwrap());
    let decoder = Arc::new(JwtDecoder::new(&cfg).unwrap());
    let revocations = Arc::new(RevocationRegistry::new());
    let store = Arc::new(MemoryUserRepository::new());
    let hasher = Arc::new(PasswordHasher::new());

    let validator = SessionValidator::from_config(
        decoder.clone(),
        revocations.clone(),
        store.clone(),
        &cfg,
    );
    let manager = SessionManager::new(
        encoder.clone(),
        decoder.clone(),
        revocations.clone(),
        store.clone(),
        hasher.clone(),
        Duration::from_secs(cfg.store_timeout_seconds),
    );

    Fixture {
        encoder,
        decoder,
        revocations,
        store,
        hasher,
        validator,
        manager,
    }
}

impl Fixture {
    pub async fn create_user(&self, email: &str, password: &str, role: UserRole) -> User {
        self.store
            .insert(NewUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                password_hash: self.hasher.hash(password).unwrap(),
                role,
                shipping_address: ShippingAddress::default(),
            })
            .await
            .unwrap()
    }

    /// Issues a token and stores it as the user's authoritative token.
    pub async fn login(&self, user: &User) -> String {
        let issued = self.encoder.issue(&user.id.to_string(), user.role).unwrap();
        self.store.set_token(user.id, &issued.token).await.unwrap();
        issued.token
    }
}

/// Delays calls by a fixed amount before delegating.
#[derive(Debug)]
pub struct SlowStore {
    inner: Arc<MemoryUserRepository>,
    read_delay: Duration,
    write_delay: Duration,
}

impl SlowStore {
    /// Delays every lookup.
    pub fn new(inner: Arc<MemoryUserRepository>, delay: Duration) -> Self {
        Self {
            inner,
            read_delay: delay,
            write_delay: Duration::ZERO,
        }
    }

    /// Delays only `set_token`.
    pub fn slow_writes(inner: Arc<MemoryUserRepository>, delay: Duration) -> Self {
        Self {
            inner,
            read_delay: Duration::ZERO,
            write_delay: delay,
        }
    }
}

#[async_trait]
impl AccountStore for SlowStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        tokio::time::sleep(self.read_delay).await;
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        tokio::time::sleep(self.read_delay).await;
        self.inner.find_by_email(email).await
    }

    async fn set_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        tokio::time::sleep(self.write_delay).await;
        self.inner.set_token(id, token).await
    }
}

/// Fails every call.
#[derive(Debug)]
pub struct FailingStore;

#[async_trait]
impl AccountStore for FailingStore {
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<User>> {
        Err(AppError::database("connection refused"))
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
        Err(AppError::database("connection refused"))
    }

    async fn set_token(&self, _id: Uuid, _token: &str) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }
}

/// Serves reads from the wrapped store and fails every write.
#[derive(Debug)]
pub struct ReadOnlyStore {
    inner: Arc<MemoryUserRepository>,
}

impl ReadOnlyStore {
    pub fn new(inner: Arc<MemoryUserRepository>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl AccountStore for ReadOnlyStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.inner.find_by_email(email).await
    }

    async fn set_token(&self, _id: Uuid, _token: &str) -> AppResult<()> {
        Err(AppError::database("read-only replica"))
    }
}
