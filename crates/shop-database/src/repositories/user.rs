//! PostgreSQL user repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use shop_core::error::{AppError, ErrorKind};
use shop_core::result::AppResult;
use shop_entity::user::{NewUser, User, UserFilter};

use crate::store::{AccountStore, UserStore};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, token, created_at, shipping_address";

/// Repository for user CRUD and the authoritative-token field.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

/// Escape `%`, `_` and `\` so user input is matched literally by ILIKE.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl AccountStore for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find user by email"))
    }

    async fn set_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to store session token"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let user = new_user.into_user(Utc::now());

        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.token)
        .bind(user.created_at)
        .bind(Json(&user.shipping_address.0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::conflict("Email already in use");
                }
            }
            AppError::with_source(ErrorKind::Database, "Failed to insert user", e)
        })
    }

    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let pattern = filter
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE ($1::text IS NULL OR email ILIKE $1 OR name ILIKE $1) \
               AND ($2::timestamptz IS NULL OR created_at >= $2) \
               AND ($3::timestamptz IS NULL OR created_at <= $3) \
             ORDER BY created_at ASC"
        ))
        .bind(pattern)
        .bind(filter.created_from)
        .bind(filter.created_to)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list users"))
    }

    async fn update_name(&self, id: Uuid, name: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE users SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update user name"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete user"))?;
        Ok(result.rows_affected() > 0)
    }
}
