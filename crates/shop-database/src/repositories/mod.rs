//! Concrete account store implementations.

pub mod memory;
pub mod user;
