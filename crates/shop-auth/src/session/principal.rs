//! The authenticated caller attached to a request.

use uuid::Uuid;

use shop_entity::user::UserRole;

/// Identity and role of a request whose session token was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// Account the token was issued to.
    pub user_id: Uuid,
    /// Role carried by the token.
    pub role: UserRole,
}
