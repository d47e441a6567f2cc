//! Session lifecycle: per-request validation, login and logout.
//!
//! Each user has at most one authoritative token, stored on the account by
//! login. Validation accepts a token only while it is that stored token,
//! unrevoked and unexpired.

pub mod manager;
pub mod principal;
pub mod rejection;
pub mod validator;

pub use manager::{LoginResult, SessionManager};
pub use principal::Principal;
pub use rejection::Rejection;
pub use validator::SessionValidator;
