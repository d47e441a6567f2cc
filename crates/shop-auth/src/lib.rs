//! # shop-auth
//!
//! Authentication and session core for Shop Online.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `jwt`: signed, time-bounded session token issuance and verification
//! - `revocation`: logout blocklist that forgets tokens at their natural expiry
//! - `rbac`: allowed-role sets declared per protected endpoint
//! - `session`: per-request validation, login and logout
//! - `account`: account creation and administration on top of the user store

pub mod account;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod revocation;
pub mod session;

#[cfg(test)]
mod test_support;

pub use account::{AccountService, NewAccount, UserListQuery};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenError};
pub use password::PasswordHasher;
pub use rbac::RoleSet;
pub use revocation::{RevocationRegistry, RevocationSweeper};
pub use session::{LoginResult, Principal, Rejection, SessionManager, SessionValidator};
