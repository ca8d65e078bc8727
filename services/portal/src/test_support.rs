//! Fixtures shared by the unit and router tests

use chrono::Utc;
use common::database::{DatabaseConfig, init_pool};
use sqlx::SqlitePool;

/// Fresh in-memory database with the given accounts registered
pub async fn pool_with_accounts(accounts: &[&str]) -> SqlitePool {
    let pool = init_pool(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");

    for account in accounts {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO users (account, username, gender, email, password_hash, created_at, updated_at)
            VALUES (?, ?, '', ?, 'unused', ?, ?)
            "#,
        )
        .bind(account)
        .bind(account)
        .bind(format!("{account}@example.edu"))
        .bind(now)
        .bind(now)
        .execute(&pool)
        .await
        .expect("seed account");
    }

    pool
}
