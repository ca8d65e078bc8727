//! Grade records and per-term summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    error::{ApiError, ApiResult},
    validation::required_text,
};

/// Grade category, stored as its integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreType {
    Semester = 1,
    Midterm = 2,
    Final = 3,
    Other = 4,
}

impl ScoreType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(ScoreType::Semester),
            2 => Some(ScoreType::Midterm),
            3 => Some(ScoreType::Final),
            4 => Some(ScoreType::Other),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

/// Grade entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Grade {
    pub id: i64,
    pub account: String,
    pub academic_year: String,
    pub term: i64,
    pub course_code: String,
    pub course_name: String,
    pub score: f64,
    pub credits: f64,
    pub score_type: i64,
    pub class_rank: Option<i64>,
    pub class_size: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat grade payload as sent by clients
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradePayload {
    pub academic_year: Option<String>,
    pub term: Option<i64>,
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub score: Option<f64>,
    pub credits: Option<f64>,
    pub score_type: Option<i64>,
    pub class_rank: Option<i64>,
    pub class_size: Option<i64>,
}

/// Validated grade fields, used for both insert and update
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub academic_year: String,
    pub term: i64,
    pub course_code: String,
    pub course_name: String,
    pub score: f64,
    pub credits: f64,
    pub score_type: ScoreType,
    pub class_rank: Option<i64>,
    pub class_size: Option<i64>,
}

impl TryFrom<GradePayload> for NewGrade {
    type Error = ApiError;

    fn try_from(payload: GradePayload) -> ApiResult<Self> {
        let academic_year = required_text(payload.academic_year, "academic_year")?;
        let term = payload.term.ok_or_else(|| ApiError::missing_field("term"))?;
        let course_code = required_text(payload.course_code, "course_code")?.to_uppercase();
        let course_name = required_text(payload.course_name, "course_name")?;
        let score = payload
            .score
            .ok_or_else(|| ApiError::missing_field("score"))?;
        let credits = payload
            .credits
            .ok_or_else(|| ApiError::missing_field("credits"))?;
        let score_type = payload
            .score_type
            .ok_or_else(|| ApiError::missing_field("score_type"))?;

        if term < 1 {
            return Err(ApiError::BadRequest("`term` must be at least 1".to_string()));
        }
        if !(0.0..=100.0).contains(&score) {
            return Err(ApiError::BadRequest(
                "`score` must be between 0 and 100".to_string(),
            ));
        }
        if !credits.is_finite() || credits <= 0.0 {
            return Err(ApiError::BadRequest(
                "`credits` must be greater than 0".to_string(),
            ));
        }
        let score_type = ScoreType::from_code(score_type).ok_or_else(|| {
            ApiError::BadRequest("`score_type` must be one of 1, 2, 3, 4".to_string())
        })?;

        match (payload.class_rank, payload.class_size) {
            (Some(rank), _) if rank < 1 => {
                return Err(ApiError::BadRequest(
                    "`class_rank` must be at least 1".to_string(),
                ));
            }
            (Some(rank), Some(size)) if rank > size => {
                return Err(ApiError::BadRequest(
                    "`class_rank` cannot exceed `class_size`".to_string(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            academic_year,
            term,
            course_code,
            course_name,
            score,
            credits,
            score_type,
            class_rank: payload.class_rank,
            class_size: payload.class_size,
        })
    }
}

/// Query parameters for grade listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradeQuery {
    pub academic_year: Option<String>,
    pub term: Option<i64>,
    pub score_type: Option<i64>,
}

/// Credit-weighted aggregate for one term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermSummary {
    pub academic_year: String,
    pub term: i64,
    pub weighted_average: f64,
    pub total_credits: f64,
    pub course_count: usize,
}

/// Aggregate over all terms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSummary {
    pub weighted_average: f64,
    pub total_credits: f64,
    pub course_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSummary {
    pub terms: Vec<TermSummary>,
    pub overall: Option<OverallSummary>,
}

impl GradeSummary {
    /// Summarise semester grades per `(academic_year, term)`
    ///
    /// Midterm, final and other score types are progress marks and do not
    /// count towards the averages.
    pub fn from_grades(grades: &[Grade]) -> Self {
        let mut semester: Vec<&Grade> = grades
            .iter()
            .filter(|g| g.score_type == ScoreType::Semester.code())
            .collect();
        semester.sort_by(|a, b| {
            a.academic_year
                .cmp(&b.academic_year)
                .then(a.term.cmp(&b.term))
        });

        let mut terms: Vec<TermSummary> = Vec::new();
        for chunk in semester.chunk_by(|a, b| a.academic_year == b.academic_year && a.term == b.term)
        {
            let (weighted, credits) = weigh(chunk);
            terms.push(TermSummary {
                academic_year: chunk[0].academic_year.clone(),
                term: chunk[0].term,
                weighted_average: round2(weighted / credits),
                total_credits: credits,
                course_count: chunk.len(),
            });
        }

        let overall = if semester.is_empty() {
            None
        } else {
            let (weighted, credits) = weigh(&semester);
            Some(OverallSummary {
                weighted_average: round2(weighted / credits),
                total_credits: credits,
                course_count: semester.len(),
            })
        };

        Self { terms, overall }
    }
}

fn weigh(grades: &[&Grade]) -> (f64, f64) {
    grades.iter().fold((0.0, 0.0), |(weighted, credits), g| {
        (weighted + g.score * g.credits, credits + g.credits)
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
