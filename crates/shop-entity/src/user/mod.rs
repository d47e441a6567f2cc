//! User domain entities.

pub mod address;
pub mod model;
pub mod role;

pub use address::ShippingAddress;
pub use model::{NewUser, User, UserFilter};
pub use role::UserRole;
