//! Weekly schedule entries

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    error::{ApiError, ApiResult},
    models::clock,
    validation::{optional_text, parse_time, required_text},
};

/// Schedule entry entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScheduleEntry {
    pub id: i64,
    pub account: String,
    pub semester: String,
    pub title: String,
    /// 1 = Monday .. 7 = Sunday
    pub day_of_week: i64,
    #[serde(serialize_with = "clock::serialize")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "clock::serialize")]
    pub end_time: NaiveTime,
    pub location: Option<String>,
    pub instructor: Option<String>,
    pub course_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat schedule payload as sent by clients
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchedulePayload {
    pub title: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub day_of_week: Option<i64>,
    pub semester: Option<String>,
    pub location: Option<String>,
    pub instructor: Option<String>,
    pub course_type: Option<String>,
}

/// Validated schedule fields
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub semester: String,
    pub title: String,
    pub day_of_week: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
    pub instructor: Option<String>,
    pub course_type: String,
}

impl TryFrom<SchedulePayload> for NewSchedule {
    type Error = ApiError;

    fn try_from(payload: SchedulePayload) -> ApiResult<Self> {
        let title = required_text(payload.title, "title")?;
        let start_raw = required_text(payload.start_time, "start_time")?;
        let end_raw = required_text(payload.end_time, "end_time")?;
        let day_of_week = payload
            .day_of_week
            .ok_or_else(|| ApiError::missing_field("day_of_week"))?;
        let semester = required_text(payload.semester, "semester")?;

        let start_time = parse_time(&start_raw, "start_time")?;
        let end_time = parse_time(&end_raw, "end_time")?;

        if !(1..=7).contains(&day_of_week) {
            return Err(ApiError::BadRequest(
                "`day_of_week` must be between 1 (Monday) and 7 (Sunday)".to_string(),
            ));
        }
        if start_time >= end_time {
            return Err(ApiError::BadRequest(
                "`start_time` must be before `end_time`".to_string(),
            ));
        }

        let course_type = optional_text(payload.course_type)
            .unwrap_or_else(|| CourseType::from_title(&title).as_str().to_string());

        Ok(Self {
            semester,
            title,
            day_of_week,
            start_time,
            end_time,
            location: optional_text(payload.location),
            instructor: optional_text(payload.instructor),
            course_type,
        })
    }
}

/// Query parameters for schedule listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleQuery {
    pub semester: Option<String>,
}

/// Course category guessed from a course title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseType {
    Lecture,
    Lab,
    Seminar,
    PhysicalEducation,
    GeneralEducation,
}

impl CourseType {
    pub fn as_str(self) -> &'static str {
        match self {
            CourseType::Lecture => "lecture",
            CourseType::Lab => "lab",
            CourseType::Seminar => "seminar",
            CourseType::PhysicalEducation => "physical_education",
            CourseType::GeneralEducation => "general_education",
        }
    }

    /// Guess the course type from its title, falling back to a lecture
    pub fn from_title(title: &str) -> Self {
        let lower = title.trim().to_lowercase();

        if lower.contains("lab") || lower.contains("實驗") {
            CourseType::Lab
        } else if lower.contains("physical education")
            || lower.starts_with("pe ")
            || lower == "pe"
            || lower.contains("體育")
        {
            CourseType::PhysicalEducation
        } else if lower.contains("seminar") || lower.contains("專題") {
            CourseType::Seminar
        } else if lower.contains("general") || lower.contains("通識") {
            CourseType::GeneralEducation
        } else {
            CourseType::Lecture
        }
    }
}
