//! Role-based access: the set of roles an endpoint admits.

pub mod role_set;

pub use role_set::RoleSet;
