//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use shop_auth::{
    AccountService, JwtDecoder, JwtEncoder, PasswordHasher, RevocationRegistry, SessionManager,
    SessionValidator,
};
use shop_core::config::AppConfig;
use shop_core::result::AppResult;
use shop_database::{AccountStore, UserStore};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Logout blocklist, shared with the background sweeper
    pub revocations: Arc<RevocationRegistry>,
    /// Per-request session validation
    pub session_validator: Arc<SessionValidator>,
    /// Login and logout
    pub session_manager: Arc<SessionManager>,
    /// Account administration
    pub account_service: Arc<AccountService>,
}

impl AppState {
    /// Wires the auth components over the given stores.
    ///
    /// `accounts` and `users` are normally the same repository seen through
    /// its two traits. Fails if the signing secret is unusable.
    pub fn new(
        config: AppConfig,
        accounts: Arc<dyn AccountStore>,
        users: Arc<dyn UserStore>,
        revocations: Arc<RevocationRegistry>,
    ) -> AppResult<Self> {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth)?);
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth)?);
        let password_hasher = Arc::new(PasswordHasher::new());

        let session_validator = Arc::new(SessionValidator::from_config(
            Arc::clone(&jwt_decoder),
            Arc::clone(&revocations),
            Arc::clone(&accounts),
            &config.auth,
        ));
        let session_manager = Arc::new(SessionManager::from_config(
            jwt_encoder,
            jwt_decoder,
            Arc::clone(&revocations),
            accounts,
            Arc::clone(&password_hasher),
            &config.auth,
        ));
        let account_service = Arc::new(AccountService::new(password_hasher, users));

        Ok(Self {
            config: Arc::new(config),
            revocations,
            session_validator,
            session_manager,
            account_service,
        })
    }
}
