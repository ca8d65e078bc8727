//! Subject repository for database operations

use common::error::DatabaseResult;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{NewSubject, Subject};

/// Subject repository
#[derive(Clone)]
pub struct SubjectRepository {
    pool: SqlitePool,
}

impl SubjectRepository {
    /// Create a new subject repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> DatabaseResult<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT id, code, name, description FROM subjects ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(subjects)
    }

    pub async fn create(&self, subject: &NewSubject) -> DatabaseResult<Subject> {
        info!("Creating subject: {}", subject.code);

        let subject = sqlx::query_as::<_, Subject>(
            r#"
            INSERT INTO subjects (code, name, description)
            VALUES (?, ?, ?)
            RETURNING id, code, name, description
            "#,
        )
        .bind(&subject.code)
        .bind(&subject.name)
        .bind(&subject.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(subject)
    }

    pub async fn exists(&self, id: i64) -> DatabaseResult<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM subjects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }
}
