//! User repository for database operations

use chrono::Utc;
use common::error::DatabaseResult;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{NewUser, UpdateUser, User};

const USER_COLUMNS: &str =
    "id, account, username, gender, email, password_hash, picture, created_at, updated_at";

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user with an already hashed password
    pub async fn create(&self, new_user: &NewUser, password_hash: &str) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.account);

        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (account, username, gender, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.account)
        .bind(&new_user.username)
        .bind(&new_user.gender)
        .bind(&new_user.email)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by account
    pub async fn find_by_account(&self, account: &str) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE account = ?"
        ))
        .bind(account)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Apply a partial profile update, returning the updated row
    pub async fn update_profile(
        &self,
        account: &str,
        update: &UpdateUser,
    ) -> DatabaseResult<Option<User>> {
        info!("Updating profile for user: {}", account);

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET username = COALESCE(?, username),
                gender = COALESCE(?, gender),
                email = COALESCE(?, email),
                picture = COALESCE(?, picture),
                updated_at = ?
            WHERE account = ?
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&update.username)
        .bind(&update.gender)
        .bind(&update.email)
        .bind(&update.picture)
        .bind(Utc::now())
        .bind(account)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Replace the stored password hash
    pub async fn update_password(&self, account: &str, password_hash: &str) -> DatabaseResult<bool> {
        info!("Changing password for user: {}", account);

        let result =
            sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE account = ?")
                .bind(password_hash)
                .bind(Utc::now())
                .bind(account)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
