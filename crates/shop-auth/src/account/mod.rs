//! Account creation and administration.

pub mod service;

pub use service::{AccountService, NewAccount, UserListQuery};
