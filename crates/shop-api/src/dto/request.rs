//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use shop_auth::{NewAccount, UserListQuery};
use shop_core::error::AppError;
use shop_entity::user::ShippingAddress;

/// Runs derive validation and folds the field errors into one message.
pub fn validated<T: Validate>(req: T) -> Result<T, AppError> {
    req.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        AppError::validation(format!("Invalid fields: {}", fields.join(", ")))
    })?;
    Ok(req)
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// `user` or `admin`.
    pub role: String,
    #[serde(default, alias = "address")]
    pub shipping_address: ShippingAddress,
}

impl From<CreateUserRequest> for NewAccount {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            shipping_address: req.shipping_address,
        }
    }
}

/// Rename request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
}

/// Query string of `GET /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub search: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<UserListParams> for UserListQuery {
    fn from(params: UserListParams) -> Self {
        Self {
            search: params.search,
            start_date: params.start_date,
            end_date: params.end_date,
        }
    }
}
