//! Question bank: questions, their options, and submitted answers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    error::{ApiError, ApiResult},
    validation::{optional_text, required_text},
};

/// Upper bound on options per question
pub const MAX_OPTIONS: usize = 10;

/// Question row as listed, without options or explanation
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuestionSummary {
    pub id: i64,
    pub subject_id: Option<i64>,
    #[serde(rename = "author")]
    pub account: String,
    pub content: String,
    pub option_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Option row; correctness stays server-side
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuestionOption {
    pub id: i64,
    #[serde(skip)]
    pub question_id: i64,
    pub position: i64,
    pub content: String,
    #[serde(skip)]
    pub is_correct: bool,
}

/// Question as shown to someone answering it
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetail {
    pub id: i64,
    pub subject_id: Option<i64>,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub options: Vec<QuestionOption>,
    /// Revealed only once an answer is submitted
    #[serde(skip)]
    pub explanation: Option<String>,
}

impl QuestionDetail {
    pub fn option(&self, option_id: i64) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn correct_option_ids(&self) -> Vec<i64> {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.id)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionPayload {
    pub content: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionPayload {
    pub subject_id: Option<i64>,
    pub content: Option<String>,
    pub explanation: Option<String>,
    pub options: Option<Vec<OptionPayload>>,
}

/// Validated question with its options in display order
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub subject_id: Option<i64>,
    pub content: String,
    pub explanation: Option<String>,
    pub options: Vec<(String, bool)>,
}

impl TryFrom<QuestionPayload> for NewQuestion {
    type Error = ApiError;

    fn try_from(payload: QuestionPayload) -> ApiResult<Self> {
        let content = required_text(payload.content, "content")?;
        let raw_options = payload
            .options
            .ok_or_else(|| ApiError::missing_field("options"))?;

        if raw_options.len() < 2 || raw_options.len() > MAX_OPTIONS {
            return Err(ApiError::BadRequest(format!(
                "a question needs between 2 and {} options",
                MAX_OPTIONS
            )));
        }

        let options = raw_options
            .into_iter()
            .map(|o| Ok((required_text(o.content, "options.content")?, o.is_correct)))
            .collect::<ApiResult<Vec<_>>>()?;

        if !options.iter().any(|(_, correct)| *correct) {
            return Err(ApiError::BadRequest(
                "at least one option must be marked correct".to_string(),
            ));
        }

        Ok(Self {
            subject_id: payload.subject_id,
            content,
            explanation: optional_text(payload.explanation),
            options,
        })
    }
}

/// Query parameters for question listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionQuery {
    pub subject_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerPayload {
    pub option_id: Option<i64>,
}

/// Answer row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub account: String,
    pub option_id: i64,
    pub is_correct: bool,
    pub created_at: DateTime<Utc>,
}

/// Graded answer returned after submission
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResult {
    pub answer_id: i64,
    pub question_id: i64,
    pub option_id: i64,
    pub is_correct: bool,
    pub correct_option_ids: Vec<i64>,
    pub explanation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(content: &str, is_correct: bool) -> OptionPayload {
        OptionPayload {
            content: Some(content.to_string()),
            is_correct,
        }
    }

    fn payload() -> QuestionPayload {
        QuestionPayload {
            subject_id: None,
            content: Some("2 + 2 = ?".to_string()),
            explanation: Some("Basic arithmetic".to_string()),
            options: Some(vec![option("3", false), option("4", true)]),
        }
    }

    #[test]
    fn test_valid_question_keeps_option_order() {
        let question = NewQuestion::try_from(payload()).unwrap();
        assert_eq!(
            question.options,
            vec![("3".to_string(), false), ("4".to_string(), true)]
        );
    }

    #[test]
    fn test_question_needs_two_options_and_a_correct_one() {
        assert!(
            NewQuestion::try_from(QuestionPayload {
                options: Some(vec![option("4", true)]),
                ..payload()
            })
            .is_err()
        );
        assert!(
            NewQuestion::try_from(QuestionPayload {
                options: Some(vec![option("3", false), option("5", false)]),
                ..payload()
            })
            .is_err()
        );
        assert!(
            NewQuestion::try_from(QuestionPayload {
                options: Some(vec![option("3", false), option(" ", true)]),
                ..payload()
            })
            .is_err()
        );
    }

    #[test]
    fn test_option_serialization_hides_correctness() {
        let option = QuestionOption {
            id: 3,
            question_id: 1,
            position: 0,
            content: "4".to_string(),
            is_correct: true,
        };
        let json = serde_json::to_value(&option).unwrap();
        assert!(json.get("is_correct").is_none());
        assert!(json.get("question_id").is_none());
        assert_eq!(json["content"], "4");
    }
}
