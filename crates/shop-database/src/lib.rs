//! # shop-database
//!
//! The account store collaborator used by the auth core: the
//! [`AccountStore`] and [`UserStore`] traits, a PostgreSQL implementation
//! on sqlx and a DashMap-backed in-memory implementation.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::memory::MemoryUserRepository;
pub use repositories::user::PgUserRepository;
pub use store::{AccountStore, UserStore};
