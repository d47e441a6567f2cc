//! # shop-entity
//!
//! Domain entity models for Shop Online. Database entities derive
//! `sqlx::FromRow`; every entity derives `Debug`, `Clone`, `Serialize`
//! and `Deserialize`.

pub mod user;
