//! Reasons a presented session token is refused.

use thiserror::Error;

use shop_core::error::AppError;

use crate::jwt::TokenError;

/// Terminal outcome of a failed session validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no credential presented")]
    MissingCredential,
    #[error("token failed decoding or signature verification")]
    InvalidToken,
    #[error("token was revoked by logout")]
    Revoked,
    #[error("token is past its expiry")]
    Expired,
    #[error("token subject is not a valid user id")]
    MalformedSubject,
    #[error("token subject does not exist")]
    UnknownSubject,
    #[error("account lookup timed out")]
    StoreTimeout,
    #[error("account store unavailable")]
    StoreUnavailable,
    #[error("token is no longer the account's current session")]
    Superseded,
    #[error("role is not allowed for this endpoint")]
    Forbidden,
}

impl Rejection {
    /// Stable snake_case code used in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::InvalidToken => "invalid_token",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
            Self::MalformedSubject => "malformed_subject",
            Self::UnknownSubject => "unknown_subject",
            Self::StoreTimeout => "store_timeout",
            Self::StoreUnavailable => "store_unavailable",
            Self::Superseded => "superseded",
            Self::Forbidden => "forbidden",
        }
    }
}

impl From<TokenError> for Rejection {
    fn from(_: TokenError) -> Self {
        Self::InvalidToken
    }
}

/// Clients only see the class of failure; the reason stays in the logs.
impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::MalformedSubject => AppError::bad_request("Invalid user id"),
            Rejection::Forbidden => AppError::authorization("Your role does not have access"),
            _ => AppError::authentication("Unauthenticated"),
        }
    }
}
