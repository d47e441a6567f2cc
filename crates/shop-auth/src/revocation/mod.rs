//! Logout blocklist: tokens revoked before their natural expiry.

pub mod registry;
pub mod sweeper;

pub use registry::RevocationRegistry;
pub use sweeper::RevocationSweeper;
