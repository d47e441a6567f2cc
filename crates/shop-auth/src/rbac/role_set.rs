//! Allowed-role sets declared per protected endpoint.

use std::fmt;

use shop_core::error::AppError;
use shop_entity::user::UserRole;

/// A non-empty set of roles admitted by an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet(Vec<UserRole>);

impl RoleSet {
    /// Builds a set from `roles`, dropping duplicates.
    ///
    /// An empty set would admit nobody and is rejected.
    pub fn new(roles: impl IntoIterator<Item = UserRole>) -> Result<Self, AppError> {
        let mut unique = Vec::new();
        for role in roles {
            if !unique.contains(&role) {
                unique.push(role);
            }
        }
        if unique.is_empty() {
            return Err(AppError::configuration("Allowed role set must not be empty"));
        }
        Ok(Self(unique))
    }

    /// Builds a set from role names such as `["user", "admin"]`.
    pub fn parse(names: &[&str]) -> Result<Self, AppError> {
        let roles = names
            .iter()
            .map(|name| name.parse::<UserRole>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(roles)
    }

    /// Every authenticated role.
    pub fn any_user() -> Self {
        Self(UserRole::ALL.to_vec())
    }

    /// Administrators only.
    pub fn admin_only() -> Self {
        Self(vec![UserRole::Admin])
    }

    /// Whether `role` is admitted.
    pub fn contains(&self, role: UserRole) -> bool {
        self.0.contains(&role)
    }

    /// The admitted roles in declaration order.
    pub fn roles(&self) -> &[UserRole] {
        &self.0
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, role) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{role}")?;
        }
        Ok(())
    }
}
