//! Question bank repository for database operations

use chrono::{DateTime, Utc};
use common::error::DatabaseResult;
use sqlx::{FromRow, SqlitePool};
use tracing::info;

use crate::models::{Answer, NewQuestion, QuestionDetail, QuestionOption, QuestionSummary};

const ANSWER_COLUMNS: &str = "id, question_id, account, option_id, is_correct, created_at";

#[derive(FromRow)]
struct QuestionRow {
    id: i64,
    subject_id: Option<i64>,
    account: String,
    content: String,
    explanation: Option<String>,
    created_at: DateTime<Utc>,
}

impl QuestionRow {
    fn with_options(self, options: Vec<QuestionOption>) -> QuestionDetail {
        QuestionDetail {
            id: self.id,
            subject_id: self.subject_id,
            author: self.account,
            content: self.content,
            created_at: self.created_at,
            options,
            explanation: self.explanation,
        }
    }
}

/// Question repository
#[derive(Clone)]
pub struct QuestionRepository {
    pool: SqlitePool,
}

impl QuestionRepository {
    /// Create a new question repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List questions with their option counts, newest first
    pub async fn list(&self, subject_id: Option<i64>) -> DatabaseResult<Vec<QuestionSummary>> {
        let questions = sqlx::query_as::<_, QuestionSummary>(
            r#"
            SELECT q.id, q.subject_id, q.account, q.content, COUNT(o.id) AS option_count, q.created_at
            FROM questions q
            LEFT JOIN question_options o ON o.question_id = q.id
            WHERE ? IS NULL OR q.subject_id = ?
            GROUP BY q.id
            ORDER BY q.created_at DESC, q.id DESC
            "#,
        )
        .bind(subject_id)
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    /// Insert a question and its options atomically
    pub async fn create(
        &self,
        account: &str,
        question: &NewQuestion,
    ) -> DatabaseResult<QuestionDetail> {
        info!("Creating question for {}", account);

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            INSERT INTO questions (subject_id, account, content, explanation, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, subject_id, account, content, explanation, created_at
            "#,
        )
        .bind(question.subject_id)
        .bind(account)
        .bind(&question.content)
        .bind(&question.explanation)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let mut options = Vec::with_capacity(question.options.len());
        for (position, (content, is_correct)) in question.options.iter().enumerate() {
            let option = sqlx::query_as::<_, QuestionOption>(
                r#"
                INSERT INTO question_options (question_id, position, content, is_correct)
                VALUES (?, ?, ?, ?)
                RETURNING id, question_id, position, content, is_correct
                "#,
            )
            .bind(row.id)
            .bind(position as i64)
            .bind(content)
            .bind(is_correct)
            .fetch_one(&mut *tx)
            .await?;
            options.push(option);
        }

        tx.commit().await?;

        Ok(row.with_options(options))
    }

    /// Fetch a question with its options in display order
    pub async fn find(&self, id: i64) -> DatabaseResult<Option<QuestionDetail>> {
        let Some(row) = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, subject_id, account, content, explanation, created_at FROM questions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let options = sqlx::query_as::<_, QuestionOption>(
            r#"
            SELECT id, question_id, position, content, is_correct
            FROM question_options
            WHERE question_id = ?
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.with_options(options)))
    }

    /// Delete a question authored by `account`; options and answers cascade
    pub async fn delete(&self, id: i64, account: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ? AND account = ?")
            .bind(id)
            .bind(account)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Store a graded answer
    pub async fn record_answer(
        &self,
        question_id: i64,
        account: &str,
        option_id: i64,
        is_correct: bool,
    ) -> DatabaseResult<Answer> {
        let answer = sqlx::query_as::<_, Answer>(&format!(
            r#"
            INSERT INTO answers (question_id, account, option_id, is_correct, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {ANSWER_COLUMNS}
            "#
        ))
        .bind(question_id)
        .bind(account)
        .bind(option_id)
        .bind(is_correct)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(answer)
    }

    /// An account's answer history, newest first
    pub async fn answers_for(&self, account: &str) -> DatabaseResult<Vec<Answer>> {
        let answers = sqlx::query_as::<_, Answer>(&format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE account = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(account)
        .fetch_all(&self.pool)
        .await?;

        Ok(answers)
    }
}
