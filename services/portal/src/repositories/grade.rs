//! Grade repository for database operations

use chrono::Utc;
use common::error::DatabaseResult;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{Grade, GradeQuery, NewGrade};

const GRADE_COLUMNS: &str = "id, account, academic_year, term, course_code, course_name, score, \
     credits, score_type, class_rank, class_size, created_at, updated_at";

/// Grade repository
#[derive(Clone)]
pub struct GradeRepository {
    pool: SqlitePool,
}

impl GradeRepository {
    /// Create a new grade repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List an account's grades, optionally filtered
    pub async fn list(&self, account: &str, query: &GradeQuery) -> DatabaseResult<Vec<Grade>> {
        let grades = sqlx::query_as::<_, Grade>(&format!(
            r#"
            SELECT {GRADE_COLUMNS} FROM grades
            WHERE account = ?
                AND (? IS NULL OR academic_year = ?)
                AND (? IS NULL OR term = ?)
                AND (? IS NULL OR score_type = ?)
            ORDER BY academic_year, term, course_code, score_type
            "#
        ))
        .bind(account)
        .bind(&query.academic_year)
        .bind(&query.academic_year)
        .bind(query.term)
        .bind(query.term)
        .bind(query.score_type)
        .bind(query.score_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(grades)
    }

    /// Insert a grade row owned by `account`
    pub async fn create(&self, account: &str, grade: &NewGrade) -> DatabaseResult<Grade> {
        info!(
            "Creating grade {} {}/{} for {}",
            grade.course_code, grade.academic_year, grade.term, account
        );

        let now = Utc::now();
        let grade = sqlx::query_as::<_, Grade>(&format!(
            r#"
            INSERT INTO grades (account, academic_year, term, course_code, course_name, score,
                                credits, score_type, class_rank, class_size, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {GRADE_COLUMNS}
            "#
        ))
        .bind(account)
        .bind(&grade.academic_year)
        .bind(grade.term)
        .bind(&grade.course_code)
        .bind(&grade.course_name)
        .bind(grade.score)
        .bind(grade.credits)
        .bind(grade.score_type.code())
        .bind(grade.class_rank)
        .bind(grade.class_size)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(grade)
    }

    /// Replace a grade row; `None` when no row with that id belongs to `account`
    pub async fn update(
        &self,
        id: i64,
        account: &str,
        grade: &NewGrade,
    ) -> DatabaseResult<Option<Grade>> {
        let grade = sqlx::query_as::<_, Grade>(&format!(
            r#"
            UPDATE grades
            SET academic_year = ?, term = ?, course_code = ?, course_name = ?, score = ?,
                credits = ?, score_type = ?, class_rank = ?, class_size = ?, updated_at = ?
            WHERE id = ? AND account = ?
            RETURNING {GRADE_COLUMNS}
            "#
        ))
        .bind(&grade.academic_year)
        .bind(grade.term)
        .bind(&grade.course_code)
        .bind(&grade.course_name)
        .bind(grade.score)
        .bind(grade.credits)
        .bind(grade.score_type.code())
        .bind(grade.class_rank)
        .bind(grade.class_size)
        .bind(Utc::now())
        .bind(id)
        .bind(account)
        .fetch_optional(&self.pool)
        .await?;

        Ok(grade)
    }

    /// Delete a grade row; false when no row with that id belongs to `account`
    pub async fn delete(&self, id: i64, account: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM grades WHERE id = ? AND account = ?")
            .bind(id)
            .bind(account)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
